use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn key_match(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|binding| is_match(key, binding))
}

fn is_match(key: &KeyEvent, binding: &str) -> bool {
    let binding = binding.to_lowercase();
    let mut target_modifiers = KeyModifiers::NONE;
    let mut target_code = KeyCode::Null;

    for part in binding.split('+') {
        match part {
            "ctrl" => target_modifiers.insert(KeyModifiers::CONTROL),
            "opt" | "alt" => target_modifiers.insert(KeyModifiers::ALT),
            "shift" => target_modifiers.insert(KeyModifiers::SHIFT),
            "enter" => target_code = KeyCode::Enter,
            "esc" => target_code = KeyCode::Esc,
            "backspace" => target_code = KeyCode::Backspace,
            "tab" => target_code = KeyCode::Tab,
            "space" => target_code = KeyCode::Char(' '),
            "up" => target_code = KeyCode::Up,
            "down" => target_code = KeyCode::Down,
            "home" => target_code = KeyCode::Home,
            "end" => target_code = KeyCode::End,
            "delete" => target_code = KeyCode::Delete,
            "f5" => target_code = KeyCode::F(5),
            c if c.chars().count() == 1 => {
                if let Some(ch) = c.chars().next() {
                    target_code = KeyCode::Char(ch);
                }
            }
            _ => {}
        }
    }

    let code_matches = if key.code == target_code {
        true
    } else if let (KeyCode::Char(c), KeyCode::Char(tc)) = (key.code, target_code) {
        c.to_lowercase().next() == Some(tc)
    } else {
        false
    };
    if !code_matches {
        return false;
    }

    // Shift is ignored unless the binding asks for it ('?' arrives as shift+/).
    let mut key_mods = key.modifiers;
    if !target_modifiers.contains(KeyModifiers::SHIFT) {
        key_mods.remove(KeyModifiers::SHIFT);
    }
    key_mods == target_modifiers
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "meghendra", "todoterm")
}

fn default_data_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("TODOTERM_DATA_DIR") {
        return PathBuf::from(path);
    }
    if let Some(dirs) = project_dirs() {
        return dirs.data_dir().to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".todoterm")
}

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("TODOTERM_CONFIG") {
        return PathBuf::from(path);
    }
    if let Some(dirs) = project_dirs() {
        return dirs.config_dir().join("config.toml");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".todoterm-config.toml")
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub timeout_seconds: u64,
    /// 0 disables periodic refresh.
    pub refresh_seconds: u64,
    pub refresh_after_update: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            user_id: None,
            timeout_seconds: 10,
            refresh_seconds: 0,
            refresh_after_update: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub confirm_delete: bool,
    pub error_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            error_seconds: 3,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_data_dir().join("todoterm.log"),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct KeyBindings {
    pub global: GlobalBindings,
    pub tasks: TasksBindings,
    pub popup: PopupBindings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GlobalBindings {
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub refresh: Vec<String>,
    pub filter: Vec<String>,
}

impl Default for GlobalBindings {
    fn default() -> Self {
        Self {
            quit: vec!["ctrl+q".to_string(), "q".to_string()],
            help: vec!["?".to_string()],
            refresh: vec!["r".to_string(), "f5".to_string()],
            filter: vec!["f".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TasksBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub top: Vec<String>,
    pub bottom: Vec<String>,
    pub toggle: Vec<String>,
    pub delete: Vec<String>,
}

impl Default for TasksBindings {
    fn default() -> Self {
        Self {
            up: vec!["k".to_string(), "up".to_string()],
            down: vec!["j".to_string(), "down".to_string()],
            top: vec!["g".to_string(), "home".to_string()],
            bottom: vec!["shift+g".to_string(), "end".to_string()],
            toggle: vec!["space".to_string(), "enter".to_string()],
            delete: vec!["d".to_string(), "delete".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PopupBindings {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

impl Default for PopupBindings {
    fn default() -> Self {
        Self {
            confirm: vec!["enter".to_string(), "y".to_string()],
            cancel: vec!["esc".to_string(), "n".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    pub border_default: String,
    pub border_focus: String,
    pub text_highlight: String,
    pub todo_done: String,
    pub todo_open: String,
    pub busy: String,
    pub muted: String,
    pub toast: String,
    pub error: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_default: "Reset".to_string(),
            border_focus: "Cyan".to_string(),
            text_highlight: "50,50,50".to_string(),
            todo_done: "Green".to_string(),
            todo_open: "Reset".to_string(),
            busy: "Yellow".to_string(),
            muted: "DarkGray".to_string(),
            toast: "Cyan".to_string(),
            error: "LightRed".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from_path(&config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Self {
        let mut config = if let Ok(content) = fs::read_to_string(config_path) {
            match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to parse config.toml ({config_path:?}), using defaults: {e}");
                    Config::default()
                }
            }
        } else {
            Config::default()
        };

        let changed = config.normalize();

        if changed || !config_path.exists() {
            let _ = config.save_to_path(config_path);
        }

        config
    }

    pub fn save_to_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).unwrap_or_default();
        fs::write(path, content)
    }

    fn normalize(&mut self) -> bool {
        let mut changed = false;

        if self.remote.base_url.trim().is_empty() {
            self.remote.base_url = RemoteConfig::default().base_url;
            changed = true;
        }

        if self.log.path.as_os_str().is_empty() {
            self.log.path = LogConfig::default().path;
            changed = true;
        }

        if self.log.path.is_relative() {
            self.log.path = default_data_dir().join(&self.log.path);
            changed = true;
        }

        changed
    }
}
