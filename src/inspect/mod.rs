//! Health classification and report assembly for a single pod.

pub mod classify;
pub mod conditions;
pub mod diagnostics;
pub mod events;
pub mod report;
pub mod roster;

pub use report::{assemble, InspectOptions, PodReport};
