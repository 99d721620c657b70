//! Contracts for the collaborators that read cluster state.
//!
//! The inspector never talks to a cluster itself; it is handed a pod snapshot
//! and calls back into these traits for logs and events.

use std::future::Future;

use crate::errors::AppResult;
use crate::types::{PodEvent, PodSnapshot};

/// Outcome of a log request that did not fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogFetch {
    Logs(String),
    /// The container has no logs to give, e.g. it never started.
    Unavailable,
}

pub trait PodSource: Sync {
    fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> impl Future<Output = AppResult<PodSnapshot>> + Send;

    fn list(&self, namespace: &str) -> impl Future<Output = AppResult<Vec<PodSnapshot>>> + Send;
}

pub trait LogFetcher: Sync {
    /// `tail_lines == 0` asks for the whole log.
    fn fetch(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
        tail_lines: u32,
    ) -> impl Future<Output = AppResult<LogFetch>> + Send;
}

pub trait EventLister: Sync {
    /// Events involving `pod`, oldest first.
    fn list(
        &self,
        namespace: &str,
        pod: &str,
    ) -> impl Future<Output = AppResult<Vec<PodEvent>>> + Send;
}
