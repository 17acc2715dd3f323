// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation

use crate::config::ClientConfig;
use crate::error::{PodWaitError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Create a Kubernetes client, either from an explicit kubeconfig file or
/// inferred from the environment (in-cluster, `KUBECONFIG`, `~/.kube/config`).
#[instrument(skip(config))]
pub async fn create_client(config: &ClientConfig) -> Result<Client> {
    let kube_config = match &config.kubeconfig_path {
        Some(path) => load_kubeconfig_file(path).await?,
        None => KConfig::infer()
            .await
            .map_err(|e| PodWaitError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };
    let kube_config = with_http_timeout(kube_config, config.http_timeout);

    info!(
        "Connecting to Kubernetes API at {} (timeout {:?})",
        kube_config.cluster_url, config.http_timeout
    );

    Client::try_from(kube_config)
        .map_err(|e| PodWaitError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Read and parse a kubeconfig file
async fn load_kubeconfig_file(path: &Path) -> Result<KConfig> {
    debug!("Loading kubeconfig from {}", path.display());

    let kubeconfig = tokio::fs::read_to_string(path).await.map_err(|e| {
        PodWaitError::KubeconfigError(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    config_from_kubeconfig(&kubeconfig).await
}

/// Build a client config from kubeconfig YAML, using its current context
async fn config_from_kubeconfig(kubeconfig: &str) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| PodWaitError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| PodWaitError::KubeconfigError(format!("Failed to create config: {}", e)))
}

/// Bound connecting and sending requests. The read timeout keeps kube's
/// default, which outlives the server-side watch timeout, so an idle watch is
/// not cut off.
fn with_http_timeout(mut config: KConfig, timeout: Duration) -> KConfig {
    config.connect_timeout = Some(timeout);
    config.write_timeout = Some(timeout);
    config
}
