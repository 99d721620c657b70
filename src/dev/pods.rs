use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::dev::cluster::DevCluster;
use crate::types::{
    ContainerObservation, ContainerSpec, ContainerState, PodCondition, PodEvent, PodSnapshot,
    TerminatedState,
};

const EPOCH: OffsetDateTime = datetime!(2024-06-01 08:00:00 UTC);

/// Fixture namespace used by `--dev`: a crash-looping web pod, a finished
/// batch job and an unschedulable pod.
pub fn dev_cluster(namespace: &str) -> DevCluster {
    tracing::info!(namespace = %namespace, "using dev-mode pod fixtures");

    DevCluster::default()
        .with_pod(web_pod(namespace))
        .with_pod(batch_pod(namespace))
        .with_pod(pending_pod(namespace))
        .with_logs(
            "web-7f9c",
            "app",
            "listening on :8080\nconnecting to db at db:5432\npanic: dial tcp: connection refused\n",
        )
        .with_logs("web-7f9c", "sidecar", "proxy ready\n")
        .with_events(
            "web-7f9c",
            vec![
                event(0, "Normal", "Scheduled", "Successfully assigned to node-a"),
                event(
                    1,
                    "Normal",
                    "Pulled",
                    "Container image \"shop/web:1.4\" already present on machine",
                ),
                event(2, "Normal", "Started", "Started container app"),
                event(6, "Warning", "BackOff", "Back-off restarting failed container app"),
            ],
        )
        .with_events(
            "batch-job-1",
            vec![event(0, "Normal", "Completed", "Job finished")],
        )
        .with_events(
            "pending-0",
            vec![event(
                0,
                "Warning",
                "FailedScheduling",
                "0/3 nodes are available: 3 Insufficient memory.",
            )],
        )
}

fn at(minutes: i64) -> OffsetDateTime {
    EPOCH + Duration::minutes(minutes)
}

fn event(minutes: i64, type_: &str, reason: &str, message: &str) -> PodEvent {
    PodEvent {
        last_timestamp: Some(at(minutes)),
        created_at: Some(at(minutes)),
        type_: type_.to_string(),
        reason: reason.to_string(),
        message: message.to_string(),
    }
}

fn condition(type_: &str, status: &str, reason: &str, message: &str) -> PodCondition {
    PodCondition {
        type_: type_.to_string(),
        status: status.to_string(),
        reason: reason.to_string(),
        message: message.to_string(),
    }
}

fn completed(minutes: i64) -> TerminatedState {
    TerminatedState {
        reason: "Completed".to_string(),
        message: String::new(),
        exit_code: 0,
        finished_at: Some(at(minutes)),
    }
}

fn web_pod(namespace: &str) -> PodSnapshot {
    let app = ContainerObservation {
        last_terminated: Some(TerminatedState {
            reason: "Error".to_string(),
            message: String::new(),
            exit_code: 2,
            finished_at: Some(at(5)),
        }),
        restart_count: 4,
        ready: false,
        ..ContainerObservation::new(
            "app",
            ContainerState::Waiting {
                reason: "CrashLoopBackOff".to_string(),
                message: "back-off 1m20s restarting failed container=app".to_string(),
            },
        )
    };

    let sidecar = ContainerObservation {
        ready: true,
        ..ContainerObservation::new("sidecar", ContainerState::Running)
    };

    PodSnapshot {
        namespace: namespace.to_string(),
        name: "web-7f9c".to_string(),
        node_name: "node-a".to_string(),
        init_containers: vec![ContainerSpec::new("migrate", "shop/migrate:1.4")],
        containers: vec![
            ContainerSpec::new("sidecar", "envoyproxy/envoy:v1.30"),
            ContainerSpec::new("app", "shop/web:1.4"),
        ],
        init_statuses: vec![ContainerObservation::new(
            "migrate",
            ContainerState::Terminated(completed(1)),
        )],
        statuses: vec![app, sidecar],
        phase: "Running".to_string(),
        conditions: vec![
            condition("Initialized", "True", "", ""),
            condition(
                "Ready",
                "False",
                "ContainersNotReady",
                "containers with unready status: [app]",
            ),
            condition(
                "ContainersReady",
                "False",
                "ContainersNotReady",
                "containers with unready status: [app]",
            ),
            condition("PodScheduled", "True", "", ""),
        ],
        ..Default::default()
    }
}

fn batch_pod(namespace: &str) -> PodSnapshot {
    PodSnapshot {
        namespace: namespace.to_string(),
        name: "batch-job-1".to_string(),
        node_name: "node-b".to_string(),
        containers: vec![ContainerSpec::new("report", "shop/report:2.0")],
        statuses: vec![ContainerObservation::new(
            "report",
            ContainerState::Terminated(completed(3)),
        )],
        phase: "Succeeded".to_string(),
        conditions: vec![
            condition("Initialized", "True", "PodCompleted", ""),
            condition("Ready", "False", "PodCompleted", ""),
            condition("PodScheduled", "True", "", ""),
        ],
        ..Default::default()
    }
}

fn pending_pod(namespace: &str) -> PodSnapshot {
    PodSnapshot {
        namespace: namespace.to_string(),
        name: "pending-0".to_string(),
        containers: vec![ContainerSpec::new("app", "shop/web:1.4")],
        phase: "Pending".to_string(),
        reason: "Unschedulable".to_string(),
        message: "0/3 nodes are available: 3 Insufficient memory.".to_string(),
        conditions: vec![condition(
            "PodScheduled",
            "False",
            "Unschedulable",
            "0/3 nodes are available: 3 Insufficient memory.",
        )],
        ..Default::default()
    }
}
