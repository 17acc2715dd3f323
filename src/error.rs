// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodWaitError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Pod watch failed: {0}")]
    WatchError(#[from] kube_runtime::watcher::Error),

    #[error("Pod watch stream closed while waiting for {0}")]
    WatchClosed(String),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    #[error("Cancelled while waiting for {0}")]
    Cancelled(String),
}

pub type Result<T> = std::result::Result<T, PodWaitError>;

/// True when the API server answered that the object does not exist.
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404 || resp.reason == "NotFound")
}
