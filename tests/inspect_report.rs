use kube_pod_inspect::dev::cluster::DevCluster;
use kube_pod_inspect::dev::pods::dev_cluster;
use kube_pod_inspect::errors::AppError;
use kube_pod_inspect::inspect::classify::{HealthBucket, Icon};
use kube_pod_inspect::inspect::roster::ContainerKind;
use kube_pod_inspect::inspect::{assemble, InspectOptions};
use kube_pod_inspect::source::PodSource;
use kube_pod_inspect::types::{ContainerObservation, ContainerSpec, ContainerState, PodSnapshot};

#[tokio::test]
async fn fixture_namespace_produces_consistent_reports() {
    let cluster = dev_cluster("staging");
    let pods = PodSource::list(&cluster, "staging").await.unwrap();
    assert_eq!(pods.len(), 3);

    for pod in &pods {
        let report = assemble(pod, &cluster, &cluster, &InspectOptions::default())
            .await
            .unwrap();

        assert_eq!(report.namespace, "staging");

        let kinds: Vec<ContainerKind> = report.containers.iter().map(|r| r.kind).collect();
        let mut sorted = report.containers.clone();
        sorted.sort_by(|a, b| (a.kind, &a.name).cmp(&(b.kind, &b.name)));
        assert_eq!(report.containers, sorted, "unordered roster in {}", report.pod_name);
        assert!(kinds.windows(2).all(|w| w[0] <= w[1]));

        for name in report.container_logs.keys() {
            let record = report
                .containers
                .iter()
                .find(|r| &r.name == name)
                .expect("logs only for known containers");
            let bucket = record.verdict.as_ref().map(|v| v.bucket);
            assert_ne!(bucket, Some(HealthBucket::Ok), "logs kept for healthy {name}");
        }
    }
}

#[tokio::test]
async fn web_fixture_flags_only_the_crash_looping_container() {
    let cluster = dev_cluster("default");
    let pod = PodSource::get(&cluster, "default", "web-7f9c").await.unwrap();

    let report = assemble(&pod, &cluster, &cluster, &InspectOptions::default())
        .await
        .unwrap();

    let icons: Vec<(&str, Icon)> = report
        .containers
        .iter()
        .map(|r| (r.name.as_str(), r.verdict.as_ref().unwrap().icon))
        .collect();
    assert_eq!(
        icons,
        vec![
            ("migrate", Icon::Check),
            ("app", Icon::Cross),
            ("sidecar", Icon::Check),
        ]
    );
    assert_eq!(cluster.log_requests(), vec![("app".to_string(), 5)]);
}

#[tokio::test]
async fn orphan_init_status_is_a_data_consistency_error() {
    let pod = PodSnapshot {
        namespace: "default".to_string(),
        name: "odd".to_string(),
        containers: vec![ContainerSpec::new("app", "app:1")],
        init_statuses: vec![ContainerObservation::new("app", ContainerState::Running)],
        statuses: vec![ContainerObservation::new("app", ContainerState::Running)],
        ..Default::default()
    };
    let cluster = DevCluster::default().with_pod(pod.clone());

    let err = assemble(&pod, &cluster, &cluster, &InspectOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::OrphanStatus {
            kind: ContainerKind::Init,
            ..
        }
    ));
}
