use ratatui::style::Color;

/// Parses a theme color: a named terminal color, `r,g,b`, or `#rrggbb`.
/// Anything else falls back to the terminal default.
pub fn parse_color(s: &str) -> Color {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => parse_hex(&s).or_else(|| parse_rgb(&s)).unwrap_or(Color::Reset),
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb(s: &str) -> Option<Color> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].trim().parse().ok()?;
    let g = parts[1].trim().parse().ok()?;
    let b = parts[2].trim().parse().ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::parse_color;
    use ratatui::style::Color;

    #[test]
    fn parses_named_colors_case_insensitive() {
        assert_eq!(parse_color("Yellow"), Color::Yellow);
        assert_eq!(parse_color("lightred"), Color::LightRed);
        assert_eq!(parse_color("DarkGrey"), Color::DarkGray);
    }

    #[test]
    fn parses_rgb_and_hex_values() {
        assert_eq!(parse_color("50,50,50"), Color::Rgb(50, 50, 50));
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
    }

    #[test]
    fn invalid_values_fall_back_to_reset() {
        assert_eq!(parse_color("blurple"), Color::Reset);
        assert_eq!(parse_color("1,2"), Color::Reset);
        assert_eq!(parse_color("300,0,0"), Color::Reset);
        assert_eq!(parse_color("#12345"), Color::Reset);
    }
}
