use std::collections::BTreeMap;

use futures::future::try_join_all;

use crate::errors::{AppError, AppResult};
use crate::inspect::roster::ContainerRecord;
use crate::source::{LogFetch, LogFetcher};

fn needs_logs(record: &ContainerRecord) -> bool {
    record
        .verdict
        .as_ref()
        .is_some_and(|v| !v.bucket.is_ok())
}

/// Fetch logs for every container whose verdict is not OK.
///
/// Requests run concurrently; the result is keyed by container name and only
/// holds non-empty logs. Any fetch error fails the whole selection.
pub async fn select<F: LogFetcher>(
    namespace: &str,
    pod: &str,
    records: &[ContainerRecord],
    fetcher: &F,
    max_lines: u32,
) -> AppResult<BTreeMap<String, String>> {
    let fetches = records.iter().filter(|r| needs_logs(r)).map(|record| async move {
        tracing::debug!(
            namespace = %namespace,
            pod = %pod,
            container = %record.name,
            tail = max_lines,
            "fetching logs"
        );

        let fetched = fetcher
            .fetch(namespace, pod, &record.name, max_lines)
            .await
            .map_err(|e| AppError::LogFetch {
                container: record.name.clone(),
                source: Box::new(e),
            })?;

        Ok::<_, AppError>((record.name.as_str(), fetched))
    });

    let mut logs = BTreeMap::new();
    for (name, fetched) in try_join_all(fetches).await? {
        match fetched {
            LogFetch::Logs(text) if !text.is_empty() => {
                logs.insert(name.to_string(), text);
            }
            LogFetch::Logs(_) => {}
            LogFetch::Unavailable => {
                tracing::debug!(pod = %pod, container = %name, "no logs available");
            }
        }
    }

    Ok(logs)
}
