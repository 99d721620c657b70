use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{AppError, AppResult};
use crate::source::{EventLister, LogFetch, LogFetcher, PodSource};
use crate::types::{PodEvent, PodSnapshot};

/// In-memory cluster serving pods, logs and events without an API server.
#[derive(Debug, Default)]
pub struct DevCluster {
    pods: Vec<PodSnapshot>,
    logs: HashMap<(String, String), String>,
    events: HashMap<String, Vec<PodEvent>>,
    log_requests: Mutex<Vec<(String, u32)>>,
}

impl DevCluster {
    pub fn with_pod(mut self, pod: PodSnapshot) -> Self {
        self.pods.push(pod);
        self
    }

    pub fn with_logs(mut self, pod: &str, container: &str, text: &str) -> Self {
        self.logs
            .insert((pod.to_string(), container.to_string()), text.to_string());
        self
    }

    /// Events must be given oldest first.
    pub fn with_events(mut self, pod: &str, events: Vec<PodEvent>) -> Self {
        self.events.insert(pod.to_string(), events);
        self
    }

    /// Containers logs were requested for, with the requested tail, sorted.
    pub fn log_requests(&self) -> Vec<(String, u32)> {
        let mut requests = self
            .log_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default();
        requests.sort();
        requests
    }
}

impl PodSource for DevCluster {
    async fn get(&self, namespace: &str, name: &str) -> AppResult<PodSnapshot> {
        self.pods
            .iter()
            .find(|p| p.namespace == namespace && p.name == name)
            .cloned()
            .ok_or_else(|| AppError::PodNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn list(&self, namespace: &str) -> AppResult<Vec<PodSnapshot>> {
        Ok(self
            .pods
            .iter()
            .filter(|p| p.namespace == namespace)
            .cloned()
            .collect())
    }
}

impl LogFetcher for DevCluster {
    async fn fetch(
        &self,
        _namespace: &str,
        pod: &str,
        container: &str,
        tail_lines: u32,
    ) -> AppResult<LogFetch> {
        if let Ok(mut requests) = self.log_requests.lock() {
            requests.push((container.to_string(), tail_lines));
        }

        let Some(text) = self.logs.get(&(pod.to_string(), container.to_string())) else {
            return Ok(LogFetch::Unavailable);
        };

        Ok(LogFetch::Logs(tail(text, tail_lines)))
    }
}

impl EventLister for DevCluster {
    async fn list(&self, _namespace: &str, pod: &str) -> AppResult<Vec<PodEvent>> {
        Ok(self.events.get(pod).cloned().unwrap_or_default())
    }
}

fn tail(text: &str, lines: u32) -> String {
    if lines == 0 {
        return text.to_string();
    }

    let all: Vec<&str> = text.split_inclusive('\n').collect();
    let skip = all.len().saturating_sub(lines as usize);
    all[skip..].concat()
}
