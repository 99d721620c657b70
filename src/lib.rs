pub mod cli;
pub mod config;
pub mod dev;
pub mod errors;
pub mod inspect;
pub mod kube;
pub mod logging;
pub mod render;
pub mod shutdown;
pub mod source;
pub mod types;

use std::io::{self, Write};

use crate::config::Config;
use crate::errors::AppResult;
use crate::inspect::assemble;
use crate::render::output::ReportWriter;
use crate::shutdown::Shutdown;
use crate::source::{EventLister, LogFetcher, PodSource};

pub async fn run(config: Config) -> AppResult<()> {
    let shutdown = Shutdown::new();
    shutdown.cancel_on_ctrl_c();

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), config.output);

    if config.dev_mode {
        let namespace = config
            .namespace
            .clone()
            .unwrap_or_else(|| "default".to_string());
        let cluster = crate::dev::pods::dev_cluster(&namespace);
        inspect_pods(&cluster, &namespace, &config, &mut writer).await
    } else {
        let client = crate::kube::client::make_client().await?;
        let namespace = config
            .namespace
            .clone()
            .unwrap_or_else(|| client.default_namespace().to_string());
        let cluster = crate::kube::cluster::KubeCluster::new(client, shutdown.token());
        inspect_pods(&cluster, &namespace, &config, &mut writer).await
    }
}

/// Inspect the configured pod, or every pod in the namespace.
///
/// A single requested pod fails the run on error. When walking the whole
/// namespace, a broken pod is logged and skipped.
async fn inspect_pods<C, W>(
    cluster: &C,
    namespace: &str,
    config: &Config,
    writer: &mut ReportWriter<W>,
) -> AppResult<()>
where
    C: PodSource + LogFetcher + EventLister,
    W: Write,
{
    if let Some(name) = &config.pod {
        let pod = PodSource::get(cluster, namespace, name).await?;
        let report = assemble(&pod, cluster, cluster, &config.inspect).await?;
        writer.write(&report)?;
        return Ok(());
    }

    let pods = PodSource::list(cluster, namespace).await?;
    if pods.is_empty() {
        tracing::warn!(namespace = %namespace, "no pods found");
    }

    for pod in pods {
        let report = match assemble(&pod, cluster, cluster, &config.inspect).await {
            Ok(report) => report,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    namespace = %pod.namespace,
                    pod = %pod.name,
                    error = %e,
                    "skipping pod"
                );
                continue;
            }
        };

        if !writer.write(&report)? {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, OutputMode};
    use crate::dev::cluster::DevCluster;
    use crate::errors::AppError;
    use crate::inspect::roster::ContainerKind;
    use crate::inspect::InspectOptions;
    use crate::source::LogFetch;
    use crate::types::{ContainerObservation, ContainerSpec, ContainerState, PodEvent, PodSnapshot};

    fn config(pod: Option<&str>) -> Config {
        Config {
            namespace: None,
            pod: pod.map(str::to_string),
            dev_mode: true,
            inspect: InspectOptions::default(),
            output: OutputConfig {
                mode: OutputMode::Json,
                color: false,
            },
        }
    }

    fn pod(name: &str, status: ContainerObservation) -> PodSnapshot {
        PodSnapshot {
            namespace: "default".to_string(),
            name: name.to_string(),
            containers: vec![ContainerSpec::new("app", "app:1")],
            statuses: vec![status],
            phase: "Running".to_string(),
            ..Default::default()
        }
    }

    fn crashing(name: &str) -> PodSnapshot {
        pod(
            name,
            ContainerObservation::new(
                "app",
                ContainerState::Waiting {
                    reason: "CrashLoopBackOff".to_string(),
                    message: String::new(),
                },
            ),
        )
    }

    fn cluster() -> DevCluster {
        DevCluster::default()
            .with_pod(pod(
                "a-orphan",
                ContainerObservation::new("ghost", ContainerState::Running),
            ))
            .with_pod(pod(
                "b-good",
                ContainerObservation::new("app", ContainerState::Running),
            ))
    }

    fn json_writer() -> ReportWriter<Vec<u8>> {
        ReportWriter::new(Vec::new(), config(None).output)
    }

    fn written(writer: ReportWriter<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(writer.into_inner())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn broken_pod_is_skipped_and_the_rest_are_reported() {
        let mut writer = json_writer();

        inspect_pods(&cluster(), "default", &config(None), &mut writer)
            .await
            .unwrap();

        let reports = written(writer);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0]["pod_name"], "b-good");
    }

    #[tokio::test]
    async fn requested_pod_errors_are_fatal() {
        let mut writer = json_writer();

        let err = inspect_pods(&cluster(), "default", &config(Some("a-orphan")), &mut writer)
            .await
            .unwrap_err();

        match err {
            AppError::OrphanStatus { kind, name } => {
                assert_eq!(kind, ContainerKind::Regular);
                assert_eq!(name, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(written(writer).is_empty());
    }

    /// Serves pods and events, but every log read is interrupted.
    struct Interrupted(DevCluster);

    impl PodSource for Interrupted {
        async fn get(&self, namespace: &str, name: &str) -> AppResult<PodSnapshot> {
            PodSource::get(&self.0, namespace, name).await
        }

        async fn list(&self, namespace: &str) -> AppResult<Vec<PodSnapshot>> {
            PodSource::list(&self.0, namespace).await
        }
    }

    impl EventLister for Interrupted {
        async fn list(&self, namespace: &str, pod: &str) -> AppResult<Vec<PodEvent>> {
            EventLister::list(&self.0, namespace, pod).await
        }
    }

    impl LogFetcher for Interrupted {
        async fn fetch(&self, _: &str, _: &str, _: &str, _: u32) -> AppResult<LogFetch> {
            Err(AppError::Cancelled)
        }
    }

    #[tokio::test]
    async fn interrupted_log_fetch_stops_the_loop() {
        let cluster = Interrupted(
            DevCluster::default()
                .with_pod(crashing("a-crash"))
                .with_pod(crashing("b-crash")),
        );
        let mut writer = json_writer();

        let err = inspect_pods(&cluster, "default", &config(None), &mut writer)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::LogFetch { .. }), "{err}");
        assert!(err.is_cancelled());
        assert!(written(writer).is_empty());
    }

    /// Reader that has gone away; counts write attempts.
    #[derive(Default)]
    struct HungUp {
        attempts: usize,
    }

    impl Write for HungUp {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn broken_pipe_ends_the_loop_quietly() {
        let cluster = DevCluster::default()
            .with_pod(crashing("a-crash"))
            .with_pod(crashing("b-crash"));
        let mut writer = ReportWriter::new(HungUp::default(), config(None).output);

        inspect_pods(&cluster, "default", &config(None), &mut writer)
            .await
            .unwrap();

        assert_eq!(writer.into_inner().attempts, 1);
    }
}
