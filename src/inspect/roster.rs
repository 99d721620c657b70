use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::inspect::classify::{classify, ContainerVerdict};
use crate::types::{ContainerObservation, ContainerSpec};

/// Init containers order before regular ones.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Init,
    Regular,
}

impl ContainerKind {
    /// Short type column code.
    pub fn code(self) -> &'static str {
        match self {
            ContainerKind::Init => "IC",
            ContainerKind::Regular => "C",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Init => f.write_str("init container"),
            ContainerKind::Regular => f.write_str("container"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ContainerRecord {
    pub kind: ContainerKind,
    pub name: String,
    pub image: String,
    /// Unset until a status for the container has been seen.
    pub verdict: Option<ContainerVerdict>,
    pub restart_count: i32,
    pub ready: bool,
}

impl ContainerRecord {
    fn declared(kind: ContainerKind, spec: &ContainerSpec) -> Self {
        Self {
            kind,
            name: spec.name.clone(),
            image: spec.image.clone(),
            verdict: None,
            restart_count: 0,
            ready: false,
        }
    }

    /// A container without a verdict yet is not considered healthy.
    pub fn is_healthy(&self) -> bool {
        self.verdict.as_ref().is_some_and(|v| v.bucket.is_ok())
    }
}

type RecordKey = (ContainerKind, String);

/// Merge declared containers with their observed statuses.
///
/// Returns records ordered init first, then by name. A status that names no
/// declared container of its kind fails the whole roster.
pub fn build(
    init_specs: &[ContainerSpec],
    init_statuses: &[ContainerObservation],
    specs: &[ContainerSpec],
    statuses: &[ContainerObservation],
) -> AppResult<Vec<ContainerRecord>> {
    let mut records: BTreeMap<RecordKey, ContainerRecord> = BTreeMap::new();

    declare(&mut records, ContainerKind::Init, init_specs);
    declare(&mut records, ContainerKind::Regular, specs);

    observe(&mut records, ContainerKind::Init, init_statuses)?;
    observe(&mut records, ContainerKind::Regular, statuses)?;

    Ok(records.into_values().collect())
}

fn declare(
    records: &mut BTreeMap<RecordKey, ContainerRecord>,
    kind: ContainerKind,
    specs: &[ContainerSpec],
) {
    for spec in specs {
        records.insert(
            (kind, spec.name.clone()),
            ContainerRecord::declared(kind, spec),
        );
    }
}

fn observe(
    records: &mut BTreeMap<RecordKey, ContainerRecord>,
    kind: ContainerKind,
    statuses: &[ContainerObservation],
) -> AppResult<()> {
    for status in statuses {
        let Some(record) = records.get_mut(&(kind, status.name.clone())) else {
            return Err(AppError::OrphanStatus {
                kind,
                name: status.name.clone(),
            });
        };

        record.verdict = Some(classify(&status.state, status.last_terminated.as_ref()));
        record.restart_count = status.restart_count;
        record.ready = status.ready;
    }

    Ok(())
}
