// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use podwait::config::{Config, Target};
use podwait::kubernetes::{create_client, watch_for_status, KubePods};
use podwait::watcher::PodWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: target={:?}, phase={:?}, wait_timeout={:?}",
        config.target, config.target_phase, config.wait_timeout
    );

    // Create Kubernetes client
    let client = create_client(&config.client).await?;
    let watcher = PodWatcher::new(KubePods::new(client)).with_interval(config.poll_interval);

    // Ctrl-C aborts a running wait
    let token = CancellationToken::new();
    let opts = config.wait_options().cancel_on(token.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling wait");
            token.cancel();
        }
    });

    match (&config.target, config.target_phase) {
        (Target::Pod(pod), Some(phase)) if config.use_watch => {
            watch_for_status(watcher.source().client(), pod, phase, &opts).await?;
            info!("Pod {} is {}", pod, phase);
        }
        (Target::Pod(pod), Some(phase)) => {
            watcher.wait_for_status(pod, phase, &opts).await?;
            info!("Pod {} is {}", pod, phase);
        }
        (Target::Pod(pod), None) => {
            if !watcher.exists(pod).await? {
                bail!("pod {} does not exist", pod);
            }
            info!("Pod {} exists", pod);
        }
        (Target::Labeled { namespace, selector }, Some(phase)) => {
            watcher
                .wait_for_labeled_status(namespace, selector, phase, &opts)
                .await?;
            info!("Pods {} in namespace {} are {}", selector, namespace, phase);
        }
        (Target::Labeled { namespace, selector }, None) => {
            if !watcher.exists_by_label(namespace, selector).await? {
                bail!("no pod matches {} in namespace {}", selector, namespace);
            }
            info!("Pods matching {} exist in namespace {}", selector, namespace);
        }
    }

    Ok(())
}
