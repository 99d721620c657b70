use k8s_openapi::api::core::v1::{Event, Pod};
use kube::api::{ListParams, LogParams};
use kube::{Api, Client};
use tokio_util::sync::CancellationToken;

use crate::errors::{AppError, AppResult};
use crate::kube::convert;
use crate::shutdown::cancellable;
use crate::source::{EventLister, LogFetch, LogFetcher, PodSource};
use crate::types::{PodEvent, PodSnapshot};

/// Pods, logs and events read from the API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
    cancel: CancellationToken,
}

impl KubeCluster {
    pub fn new(client: Client, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

impl PodSource for KubeCluster {
    async fn get(&self, namespace: &str, name: &str) -> AppResult<PodSnapshot> {
        let api = self.pods(namespace);
        let pod = cancellable(&self.cancel, async {
            api.get(name).await.map_err(AppError::from)
        })
        .await?;
        Ok(convert::pod_snapshot(&pod, namespace))
    }

    async fn list(&self, namespace: &str) -> AppResult<Vec<PodSnapshot>> {
        let api = self.pods(namespace);
        let pods = cancellable(&self.cancel, async {
            api.list(&ListParams::default()).await.map_err(AppError::from)
        })
        .await?;

        Ok(pods
            .items
            .iter()
            .map(|p| convert::pod_snapshot(p, namespace))
            .collect())
    }
}

impl LogFetcher for KubeCluster {
    async fn fetch(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
        tail_lines: u32,
    ) -> AppResult<LogFetch> {
        let api = self.pods(namespace);

        let lp = LogParams {
            container: Some(container.to_string()),
            tail_lines: (tail_lines > 0).then_some(i64::from(tail_lines)),
            ..Default::default()
        };

        let res = cancellable(&self.cancel, async {
            Ok::<_, AppError>(api.logs(pod, &lp).await)
        })
        .await?;

        log_result(container, res)
    }
}

/// Map the raw `logs` call onto a fetch outcome.
///
/// Log bodies that are not valid UTF-8 are decoded lossily.
fn log_result(container: &str, res: Result<String, kube::Error>) -> AppResult<LogFetch> {
    match res {
        Ok(text) => Ok(LogFetch::Logs(text)),
        Err(kube::Error::FromUtf8(e)) => {
            tracing::debug!(container = %container, error = %e, "log body is not utf-8");
            Ok(LogFetch::Logs(String::from_utf8_lossy(e.as_bytes()).into_owned()))
        }
        // 400: container is waiting to start; 404: no such container run yet
        Err(kube::Error::Api(resp)) if resp.code == 400 || resp.code == 404 => {
            tracing::debug!(container = %container, reason = %resp.message, "logs not available");
            Ok(LogFetch::Unavailable)
        }
        Err(e) => Err(e.into()),
    }
}

impl EventLister for KubeCluster {
    async fn list(&self, namespace: &str, pod: &str) -> AppResult<Vec<PodEvent>> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default().fields(&format!("involvedObject.name={pod}"));

        let events = cancellable(&self.cancel, async {
            api.list(&lp).await.map_err(AppError::from)
        })
        .await?;

        let mut events: Vec<PodEvent> = events.items.iter().map(convert::pod_event).collect();
        convert::oldest_first(&mut events);
        Ok(events)
    }
}
