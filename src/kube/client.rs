use crate::errors::AppResult;

/// Client from the local kubeconfig or in-cluster config.
pub async fn make_client() -> AppResult<kube::Client> {
    let client = kube::Client::try_default().await?;
    tracing::debug!(namespace = %client.default_namespace(), "connected to cluster");
    Ok(client)
}
