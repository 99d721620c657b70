use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppResult;
use crate::inspect::conditions::{self, FailedCondition};
use crate::inspect::diagnostics;
use crate::inspect::events::{self, EventWindow};
use crate::inspect::roster::{self, ContainerRecord};
use crate::source::{EventLister, LogFetcher};
use crate::types::PodSnapshot;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InspectOptions {
    /// `0` keeps every event.
    pub max_events: usize,
    /// `0` fetches whole logs.
    pub max_log_lines: u32,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            max_events: 10,
            max_log_lines: 5,
        }
    }
}

/// Pod-level failure, reported when no container ever got a status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TotalFailure {
    pub phase: String,
    pub reason: String,
    pub message: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PodReport {
    pub namespace: String,
    pub pod_name: String,
    pub node_name: String,
    pub containers: Vec<ContainerRecord>,
    pub total_failure: Option<TotalFailure>,
    pub failed_conditions: Vec<FailedCondition>,
    pub event_window: EventWindow,
    /// Only containers whose verdict is not OK can appear here.
    pub container_logs: BTreeMap<String, String>,
    pub log_tail_lines: u32,
}

impl PodReport {
    fn new(pod: &PodSnapshot, options: &InspectOptions) -> Self {
        Self {
            namespace: pod.namespace.clone(),
            pod_name: pod.name.clone(),
            node_name: pod.node_name.clone(),
            containers: Vec::new(),
            total_failure: None,
            failed_conditions: Vec::new(),
            event_window: EventWindow::default(),
            container_logs: BTreeMap::new(),
            log_tail_lines: options.max_log_lines,
        }
    }
}

/// Build the full report for one pod.
///
/// Either the whole report is produced or the first error is returned; an
/// orphan status, a failed log fetch or a failed event listing all abort.
pub async fn assemble<L, E>(
    pod: &PodSnapshot,
    log_fetcher: &L,
    event_lister: &E,
    options: &InspectOptions,
) -> AppResult<PodReport>
where
    L: LogFetcher,
    E: EventLister,
{
    let mut report = PodReport::new(pod, options);

    if pod.init_statuses.is_empty() && pod.statuses.is_empty() {
        tracing::info!(
            namespace = %pod.namespace,
            pod = %pod.name,
            phase = %pod.phase,
            "pod has no container statuses"
        );
        report.total_failure = Some(TotalFailure {
            phase: pod.phase.clone(),
            reason: pod.reason.clone(),
            message: pod.message.clone(),
        });
        return Ok(report);
    }

    let containers = roster::build(
        &pod.init_containers,
        &pod.init_statuses,
        &pod.containers,
        &pod.statuses,
    )?;

    let container_logs = diagnostics::select(
        &pod.namespace,
        &pod.name,
        &containers,
        log_fetcher,
        options.max_log_lines,
    )
    .await?;

    let pod_events = event_lister.list(&pod.namespace, &pod.name).await?;

    report.containers = containers;
    report.container_logs = container_logs;
    report.failed_conditions = conditions::filter(&pod.conditions);
    report.event_window = events::window(&pod_events, options.max_events);

    tracing::debug!(
        pod = %pod.name,
        containers = report.containers.len(),
        logs = report.container_logs.len(),
        events = report.event_window.events.len(),
        "report assembled"
    );

    Ok(report)
}
