use serde::Serialize;

use crate::types::{format_ts, ContainerState, TerminatedState};

/// Coarse health summary of one container.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthBucket {
    Ok,
    Waiting,
    Failed,
    Unknown,
}

impl HealthBucket {
    pub fn is_ok(self) -> bool {
        matches!(self, HealthBucket::Ok)
    }
}

/// Readiness icon; the renderer decides glyph and color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Check,
    Cross,
    Ellipsis,
    Question,
}

impl From<HealthBucket> for Icon {
    fn from(bucket: HealthBucket) -> Self {
        match bucket {
            HealthBucket::Ok => Icon::Check,
            HealthBucket::Failed => Icon::Cross,
            HealthBucket::Waiting => Icon::Ellipsis,
            HealthBucket::Unknown => Icon::Question,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum StateCode {
    #[serde(rename = "R")]
    Running,
    #[serde(rename = "T")]
    Terminated,
    #[serde(rename = "W")]
    Waiting,
    #[serde(rename = "n/a")]
    NotAvailable,
}

impl StateCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StateCode::Running => "R",
            StateCode::Terminated => "T",
            StateCode::Waiting => "W",
            StateCode::NotAvailable => "n/a",
        }
    }
}

/// Health verdict derived from a single container observation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ContainerVerdict {
    pub code: StateCode,
    /// `code` plus the reason in parentheses, when there is one.
    pub state: String,
    pub reason: String,
    pub message: String,
    pub bucket: HealthBucket,
    pub icon: Icon,
}

/// Classify a container's current state.
///
/// State alone does not tell healthy from failing: a completed job and a
/// crashed process are both `Terminated`, and a crash-looping container waits
/// just like one starting for the first time. Terminal reasons and the
/// presence of a previous termination settle it.
pub fn classify(
    state: &ContainerState,
    last_terminated: Option<&TerminatedState>,
) -> ContainerVerdict {
    let (code, reason, mut message, bucket) = match state {
        ContainerState::Unset => {
            return ContainerVerdict {
                code: StateCode::NotAvailable,
                state: StateCode::NotAvailable.as_str().to_string(),
                reason: String::new(),
                message: String::new(),
                bucket: HealthBucket::Unknown,
                icon: Icon::Question,
            };
        }
        ContainerState::Running => (
            StateCode::Running,
            String::new(),
            String::new(),
            HealthBucket::Ok,
        ),
        ContainerState::Terminated(t) => {
            let bucket = if t.reason == "Completed" {
                HealthBucket::Ok
            } else {
                HealthBucket::Failed
            };
            (StateCode::Terminated, t.reason.clone(), t.message.clone(), bucket)
        }
        ContainerState::Waiting { reason, message } => {
            let bucket = if reason == "ImagePullBackOff" || last_terminated.is_some() {
                // waiting after a previous termination means a crash loop
                HealthBucket::Failed
            } else {
                HealthBucket::Waiting
            };
            (StateCode::Waiting, reason.clone(), message.clone(), bucket)
        }
    };

    if let Some(lt) = last_terminated {
        let note = last_terminated_note(lt);
        if message.is_empty() {
            message = note;
        } else {
            message.push('\n');
            message.push_str(&note);
        }
    }

    let state = if reason.is_empty() {
        code.as_str().to_string()
    } else {
        format!("{} ({reason})", code.as_str())
    };

    ContainerVerdict {
        code,
        state,
        reason,
        message,
        bucket,
        icon: Icon::from(bucket),
    }
}

fn last_terminated_note(lt: &TerminatedState) -> String {
    let finished = lt
        .finished_at
        .as_ref()
        .map(format_ts)
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "⚠ Last Terminated: {} ({}), {finished}",
        lt.reason, lt.exit_code
    )
}
