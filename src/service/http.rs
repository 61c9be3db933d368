use super::{ServiceError, TaskService};
use crate::config::RemoteConfig;
use crate::models::{Task, TaskId, TaskPatch};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// JSON-over-HTTP adapter for a `/todos` REST resource.
pub struct HttpTaskService {
    client: Client,
    base_url: String,
    user_id: Option<u64>,
}

impl HttpTaskService {
    pub fn new(config: &RemoteConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| ServiceError::Request(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id: config.user_id,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

impl TaskService for HttpTaskService {
    fn list(&self) -> Result<Vec<Task>, ServiceError> {
        let url = self.collection_url();
        let mut request = self.client.get(&url);
        if let Some(user_id) = self.user_id {
            request = request.query(&[("userId", user_id)]);
        }
        let resp = request
            .send()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        decode(check_status(resp, &url)?)
    }

    fn patch(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ServiceError> {
        let url = self.task_url(id);
        let resp = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        let task: Task = decode(check_status(resp, &url)?)?;
        if task.id != id {
            return Err(ServiceError::Mismatch {
                requested: id,
                returned: task.id,
            });
        }
        Ok(task)
    }

    fn delete(&self, id: TaskId) -> Result<(), ServiceError> {
        let url = self.task_url(id);
        let resp = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        check_status(resp, &url)?;
        Ok(())
    }
}

fn check_status(resp: Response, url: &str) -> Result<Response, ServiceError> {
    if !resp.status().is_success() {
        return Err(ServiceError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp)
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ServiceError> {
    resp.json().map_err(|e| ServiceError::Decode(e.to_string()))
}
