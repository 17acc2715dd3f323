// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Event-driven alternative to the polling wait, built on the watch API

use crate::error::{PodWaitError, Result};
use crate::types::{PodExt, PodPhase, PodRef};
use crate::watcher::WaitOptions;
use futures::{Stream, TryStreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::{
    runtime::{watcher, WatchStreamExt},
    Api, Client,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::pin::pin;
use tracing::{debug, info, instrument};

/// Watcher configuration selecting a single pod by name
pub fn single_pod_config(pod: &PodRef) -> WatcherConfig {
    WatcherConfig::default().fields(&format!("metadata.name={}", pod.name()))
}

/// Wait for a pod to reach `target` by following its watch stream instead of
/// polling. Pods that do not exist yet simply produce no events. Any watch
/// error is fatal.
///
/// The watcher re-establishes a watch the API server closes, so only the
/// deadline or cancellation in `opts` ends a wait for a pod that never gets
/// there.
#[instrument(skip_all, fields(pod = %pod, target = %target))]
pub async fn watch_for_status(
    client: &Client,
    pod: &PodRef,
    target: PodPhase,
    opts: &WaitOptions,
) -> Result<()> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), pod.namespace());
    let what = format!("pod {} to reach phase {}", pod, target);
    let updates = watcher(pods, single_pod_config(pod)).applied_objects();

    opts.bound(&what, await_phase(updates, pod, target, &what)).await
}

/// Consume pod updates until one is in `target`
async fn await_phase<S>(updates: S, pod: &PodRef, target: PodPhase, what: &str) -> Result<()>
where
    S: Stream<Item = std::result::Result<Pod, watcher::Error>>,
{
    let mut updates = pin!(updates);

    while let Some(p) = updates.try_next().await? {
        if p.is_in_phase(target) {
            info!("Pod {} reached phase {}", pod, target);
            return Ok(());
        }
        debug!(phase = ?p.phase(), "Pod {} changed, not in phase {} yet", pod, target);
    }

    Err(PodWaitError::WatchClosed(what.to_string()))
}
