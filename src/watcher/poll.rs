// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval polling of pod existence and phase

use crate::constants::wait::POLL_INTERVAL_SECS;
use crate::error::Result;
use crate::kubernetes::PodSource;
use crate::types::{LabelSelector, PodExt, PodPhase, PodRef};
use crate::watcher::WaitOptions;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Existence checks and wait-for-phase loops over a [`PodSource`].
///
/// Only a "not found" answer is treated as benign. Any other error from the
/// source ends the call immediately and is returned unchanged; there is no
/// retry on transient failures.
pub struct PodWatcher<S> {
    source: S,
    interval: Duration,
}

impl<S: PodSource> PodWatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
        }
    }

    /// Override the sleep between poll attempts
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Check if a pod exists, independently of its phase
    #[instrument(skip(self, pod), fields(pod = %pod))]
    pub async fn exists(&self, pod: &PodRef) -> Result<bool> {
        Ok(self
            .source
            .get_pod(pod.namespace(), pod.name())
            .await?
            .is_some())
    }

    /// Check if at least one pod in `namespace` matches `selector`,
    /// independently of its phase
    #[instrument(skip(self, selector), fields(selector = %selector))]
    pub async fn exists_by_label(&self, namespace: &str, selector: &LabelSelector) -> Result<bool> {
        Ok(!self.source.list_pods(namespace, selector).await?.is_empty())
    }

    /// Wait for a pod to reach `target`. A pod that does not exist yet is
    /// waited for like one in another phase.
    #[instrument(skip_all, fields(pod = %pod, target = %target))]
    pub async fn wait_for_status(
        &self,
        pod: &PodRef,
        target: PodPhase,
        opts: &WaitOptions,
    ) -> Result<()> {
        let what = format!("pod {} to reach phase {}", pod, target);
        opts.bound(&what, self.poll_status(pod, target)).await
    }

    /// Wait for every pod matching `selector` to be in `target`.
    ///
    /// An empty selection counts as satisfied and returns on the first
    /// attempt.
    #[instrument(skip_all, fields(selector = %selector, target = %target))]
    pub async fn wait_for_labeled_status(
        &self,
        namespace: &str,
        selector: &LabelSelector,
        target: PodPhase,
        opts: &WaitOptions,
    ) -> Result<()> {
        let what = format!(
            "pods {} in namespace {} to reach phase {}",
            selector, namespace, target
        );
        opts.bound(&what, self.poll_labeled_status(namespace, selector, target))
            .await
    }

    async fn poll_status(&self, pod: &PodRef, target: PodPhase) -> Result<()> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.source.get_pod(pod.namespace(), pod.name()).await? {
                Some(p) if p.is_in_phase(target) => {
                    info!("Pod {} reached phase {} after {} attempts", pod, target, attempt);
                    return Ok(());
                }
                Some(p) => debug!(
                    attempt,
                    phase = ?p.phase(),
                    "Pod {} not in phase {} yet, retrying in {:?}",
                    pod,
                    target,
                    self.interval
                ),
                None => debug!(
                    attempt,
                    "Pod {} not found yet, retrying in {:?}", pod, self.interval
                ),
            }

            sleep(self.interval).await;
        }
    }

    async fn poll_labeled_status(
        &self,
        namespace: &str,
        selector: &LabelSelector,
        target: PodPhase,
    ) -> Result<()> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let pods = self.source.list_pods(namespace, selector).await?;

            if pods.is_empty() {
                warn!(
                    "No pods match {} in namespace {}, treating phase {} as reached",
                    selector, namespace, target
                );
                return Ok(());
            }

            // Stop at the first pod that is off target
            let lagging = pods.iter().position(|p| !p.is_in_phase(target));
            match lagging {
                None => {
                    info!(
                        "All {} pods matching {} reached phase {} after {} attempts",
                        pods.len(),
                        selector,
                        target,
                        attempt
                    );
                    return Ok(());
                }
                Some(idx) => debug!(
                    attempt,
                    pod = ?pods[idx].metadata.name,
                    phase = ?pods[idx].phase(),
                    "Not all pods matching {} in phase {} yet, retrying in {:?}",
                    selector,
                    target,
                    self.interval
                ),
            }

            sleep(self.interval).await;
        }
    }
}
