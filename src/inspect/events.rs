use serde::Serialize;
use time::OffsetDateTime;

use crate::types::PodEvent;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WindowedEvent {
    /// Last time the event was seen, or when it was created.
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    #[serde(rename = "type")]
    pub type_: String,
    pub reason: String,
    pub message: String,
}

impl From<&PodEvent> for WindowedEvent {
    fn from(ev: &PodEvent) -> Self {
        Self {
            timestamp: ev.effective_timestamp(),
            type_: ev.type_.clone(),
            reason: ev.reason.clone(),
            message: ev.message.clone(),
        }
    }
}

/// How the renderer should title the window.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowLabel {
    #[default]
    AllEvents,
    SingleMostRecent,
    LastN(usize),
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventWindow {
    pub events: Vec<WindowedEvent>,
    pub truncated: bool,
    pub total_available: usize,
    pub label: WindowLabel,
}

impl EventWindow {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Keep the `max_count` most recent events; `0` keeps everything.
///
/// Events must already be ordered oldest first.
pub fn window(events: &[PodEvent], max_count: usize) -> EventWindow {
    let total_available = events.len();
    let truncated = max_count > 0 && total_available > max_count;

    let kept = if truncated {
        &events[total_available - max_count..]
    } else {
        events
    };

    let label = match (truncated, kept.len()) {
        (true, 1) => WindowLabel::SingleMostRecent,
        (true, n) => WindowLabel::LastN(n),
        (false, _) => WindowLabel::AllEvents,
    };

    EventWindow {
        events: kept.iter().map(WindowedEvent::from).collect(),
        truncated,
        total_available,
        label,
    }
}
