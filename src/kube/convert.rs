//! Flatten `k8s-openapi` objects into the snapshot model.

use k8s_openapi::api::core::v1::{
    Container, ContainerState as K8sContainerState, ContainerStateTerminated, ContainerStatus,
    Event, Pod, PodCondition as K8sPodCondition,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::ResourceExt;
use time::OffsetDateTime;

use crate::types::{
    ContainerObservation, ContainerSpec, ContainerState, PodCondition, PodEvent, PodSnapshot,
    TerminatedState,
};

pub fn pod_snapshot(pod: &Pod, namespace: &str) -> PodSnapshot {
    let spec = pod.spec.as_ref();
    let status = pod.status.as_ref();

    PodSnapshot {
        namespace: pod.namespace().unwrap_or_else(|| namespace.to_string()),
        name: pod.name_any(),
        node_name: spec.and_then(|s| s.node_name.clone()).unwrap_or_default(),

        init_containers: spec
            .and_then(|s| s.init_containers.as_deref())
            .map(container_specs)
            .unwrap_or_default(),
        containers: spec.map(|s| container_specs(&s.containers)).unwrap_or_default(),
        init_statuses: status
            .and_then(|s| s.init_container_statuses.as_deref())
            .map(observations)
            .unwrap_or_default(),
        statuses: status
            .and_then(|s| s.container_statuses.as_deref())
            .map(observations)
            .unwrap_or_default(),

        phase: status.and_then(|s| s.phase.clone()).unwrap_or_default(),
        reason: status.and_then(|s| s.reason.clone()).unwrap_or_default(),
        message: status.and_then(|s| s.message.clone()).unwrap_or_default(),
        conditions: status
            .and_then(|s| s.conditions.as_deref())
            .map(|cs| cs.iter().map(condition).collect())
            .unwrap_or_default(),
    }
}

pub fn pod_event(ev: &Event) -> PodEvent {
    PodEvent {
        last_timestamp: ev.last_timestamp.as_ref().and_then(to_offset),
        created_at: ev.metadata.creation_timestamp.as_ref().and_then(to_offset),
        type_: ev.type_.clone().unwrap_or_default(),
        reason: ev.reason.clone().unwrap_or_default(),
        message: ev.message.clone().unwrap_or_default(),
    }
}

/// Stable sort by last-seen time, falling back to creation time.
pub fn oldest_first(events: &mut [PodEvent]) {
    events.sort_by_key(PodEvent::effective_timestamp);
}

fn container_specs(containers: &[Container]) -> Vec<ContainerSpec> {
    containers
        .iter()
        .map(|c| ContainerSpec::new(c.name.clone(), c.image.clone().unwrap_or_default()))
        .collect()
}

fn observations(statuses: &[ContainerStatus]) -> Vec<ContainerObservation> {
    statuses.iter().map(observation).collect()
}

fn observation(cs: &ContainerStatus) -> ContainerObservation {
    ContainerObservation {
        name: cs.name.clone(),
        state: cs.state.as_ref().map(state).unwrap_or(ContainerState::Unset),
        last_terminated: cs
            .last_state
            .as_ref()
            .and_then(|s| s.terminated.as_ref())
            .map(terminated),
        restart_count: cs.restart_count,
        ready: cs.ready,
    }
}

fn state(s: &K8sContainerState) -> ContainerState {
    if s.running.is_some() {
        ContainerState::Running
    } else if let Some(t) = &s.terminated {
        ContainerState::Terminated(terminated(t))
    } else if let Some(w) = &s.waiting {
        ContainerState::Waiting {
            reason: w.reason.clone().unwrap_or_default(),
            message: w.message.clone().unwrap_or_default(),
        }
    } else {
        ContainerState::Unset
    }
}

fn terminated(t: &ContainerStateTerminated) -> TerminatedState {
    TerminatedState {
        reason: t.reason.clone().unwrap_or_default(),
        message: t.message.clone().unwrap_or_default(),
        exit_code: t.exit_code,
        finished_at: t.finished_at.as_ref().and_then(to_offset),
    }
}

fn condition(c: &K8sPodCondition) -> PodCondition {
    PodCondition {
        type_: c.type_.clone(),
        status: c.status.clone(),
        reason: c.reason.clone().unwrap_or_default(),
        message: c.message.clone().unwrap_or_default(),
    }
}

fn to_offset(t: &Time) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(t.0.timestamp()).ok()
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{
        ContainerStateRunning, ContainerStateWaiting, PodSpec, PodStatus,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    use super::*;

    fn container(name: &str) -> Container {
        Container {
            name: name.to_string(),
            image: Some(format!("{name}:1")),
            ..Default::default()
        }
    }

    #[test]
    fn flattens_spec_and_status() {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                namespace: Some("shop".to_string()),
                ..Default::default()
            },
            spec: Some(PodSpec {
                node_name: Some("node-a".to_string()),
                init_containers: Some(vec![container("migrate")]),
                containers: vec![container("app")],
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                container_statuses: Some(vec![ContainerStatus {
                    name: "app".to_string(),
                    restart_count: 2,
                    state: Some(K8sContainerState {
                        waiting: Some(ContainerStateWaiting {
                            reason: Some("CrashLoopBackOff".to_string()),
                            message: None,
                        }),
                        ..Default::default()
                    }),
                    last_state: Some(K8sContainerState {
                        terminated: Some(ContainerStateTerminated {
                            reason: Some("Error".to_string()),
                            exit_code: 1,
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
        };

        let snap = pod_snapshot(&pod, "default");

        assert_eq!(snap.namespace, "shop");
        assert_eq!(snap.name, "web");
        assert_eq!(snap.node_name, "node-a");
        assert_eq!(snap.init_containers, vec![ContainerSpec::new("migrate", "migrate:1")]);
        assert!(snap.init_statuses.is_empty());

        let app = &snap.statuses[0];
        assert_eq!(app.restart_count, 2);
        assert_eq!(
            app.state,
            ContainerState::Waiting {
                reason: "CrashLoopBackOff".to_string(),
                message: String::new(),
            }
        );
        assert_eq!(app.last_terminated.as_ref().map(|t| t.exit_code), Some(1));
    }

    #[test]
    fn running_wins_and_empty_state_is_unset() {
        let running = K8sContainerState {
            running: Some(ContainerStateRunning::default()),
            ..Default::default()
        };
        assert_eq!(state(&running), ContainerState::Running);
        assert_eq!(state(&K8sContainerState::default()), ContainerState::Unset);
    }

    fn seen(reason: &str, created: i64, last: Option<i64>) -> PodEvent {
        let at = |m: i64| {
            OffsetDateTime::from_unix_timestamp(1_717_228_800 + m * 60).unwrap()
        };
        PodEvent {
            last_timestamp: last.map(at),
            created_at: Some(at(created)),
            type_: "Normal".to_string(),
            reason: reason.to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn repeated_event_moves_to_its_last_sighting() {
        let mut events = vec![
            seen("BackOff", 0, Some(30)),
            seen("Pulled", 1, Some(1)),
            seen("Started", 2, None),
            seen("Created", 2, Some(2)),
        ];

        oldest_first(&mut events);

        let reasons: Vec<&str> = events.iter().map(|e| e.reason.as_str()).collect();
        assert_eq!(reasons, vec!["Pulled", "Started", "Created", "BackOff"]);

        let window = crate::inspect::events::window(&events, 1);
        assert_eq!(window.events[0].reason, "BackOff");
    }
}
