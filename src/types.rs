use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Facts of a terminated container run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TerminatedState {
    pub reason: String,
    pub message: String,
    pub exit_code: i32,
    pub finished_at: Option<OffsetDateTime>,
}

/// Current state of a container at the moment the snapshot was taken.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContainerState {
    Running,
    Terminated(TerminatedState),
    Waiting { reason: String, message: String },
    /// The status carried no state at all.
    Unset,
}

/// Raw per-container status, as reported by the cluster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerObservation {
    pub name: String,
    pub state: ContainerState,
    pub last_terminated: Option<TerminatedState>,
    pub restart_count: i32,
    pub ready: bool,
}

impl ContainerObservation {
    pub fn new(name: impl Into<String>, state: ContainerState) -> Self {
        Self {
            name: name.into(),
            state,
            last_terminated: None,
            restart_count: 0,
            ready: false,
        }
    }
}

/// A container declared in the pod spec.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
}

impl ContainerSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PodCondition {
    pub type_: String,
    pub status: String,
    pub reason: String,
    pub message: String,
}

/// A lifecycle event recorded against a pod.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PodEvent {
    pub last_timestamp: Option<OffsetDateTime>,
    pub created_at: Option<OffsetDateTime>,
    pub type_: String,
    pub reason: String,
    pub message: String,
}

impl PodEvent {
    /// When the event was last seen, falling back to its creation time.
    pub fn effective_timestamp(&self) -> Option<OffsetDateTime> {
        self.last_timestamp.or(self.created_at)
    }
}

/// Everything known about one pod, already fetched and flattened.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PodSnapshot {
    pub namespace: String,
    pub name: String,
    pub node_name: String,

    pub init_containers: Vec<ContainerSpec>,
    pub containers: Vec<ContainerSpec>,
    pub init_statuses: Vec<ContainerObservation>,
    pub statuses: Vec<ContainerObservation>,

    pub phase: String,
    pub reason: String,
    pub message: String,
    pub conditions: Vec<PodCondition>,
}

pub fn format_ts(ts: &OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}
