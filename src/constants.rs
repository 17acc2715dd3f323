// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Poll loop configuration
pub mod wait {
    /// Fixed sleep between two poll attempts, in seconds
    pub const POLL_INTERVAL_SECS: u64 = 3;
}

/// Kubernetes client configuration
pub mod client {
    /// HTTP timeout applied to the API client, in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}

/// Environment variables read by the runner
pub mod env {
    pub const NAMESPACE: &str = "POD_NAMESPACE";
    pub const NAME: &str = "POD_NAME";
    pub const LABEL: &str = "POD_LABEL";
    pub const TARGET_PHASE: &str = "TARGET_PHASE";
    pub const KUBECONFIG_PATH: &str = "KUBECONFIG_PATH";
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
    pub const POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
    pub const WAIT_TIMEOUT_SECS: &str = "WAIT_TIMEOUT_SECS";
    pub const USE_WATCH: &str = "USE_WATCH";
}
