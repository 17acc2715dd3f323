// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{client, env as keys, wait};
use crate::types::{LabelSelector, PodPhase, PodRef};
use crate::watcher::WaitOptions;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings used to build the Kubernetes client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Explicit kubeconfig file; inferred from the environment when unset
    pub kubeconfig_path: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            kubeconfig_path: None,
            http_timeout: Duration::from_secs(client::HTTP_TIMEOUT_SECS),
        }
    }
}

/// What the runner looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Pod(PodRef),
    Labeled {
        namespace: String,
        selector: LabelSelector,
    },
}

/// Runner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub target: Target,
    /// Phase to wait for; only existence is checked when unset
    pub target_phase: Option<PodPhase>,
    pub poll_interval: Duration,
    /// Deadline for the wait; `None` waits forever
    pub wait_timeout: Option<Duration>,
    /// Follow the pod's watch stream instead of polling (single pod only)
    pub use_watch: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let namespace = lookup(keys::NAMESPACE)
            .filter(|s| !s.is_empty())
            .with_context(|| format!("{} environment variable not set", keys::NAMESPACE))?;

        let target = match (lookup(keys::NAME), lookup(keys::LABEL)) {
            (Some(name), None) => Target::Pod(PodRef::new(namespace, name)?),
            (None, Some(label)) => Target::Labeled {
                namespace,
                selector: label
                    .parse::<LabelSelector>()
                    .with_context(|| format!("invalid {}", keys::LABEL))?,
            },
            (Some(_), Some(_)) => bail!("only one of {} and {} may be set", keys::NAME, keys::LABEL),
            (None, None) => bail!("one of {} or {} must be set", keys::NAME, keys::LABEL),
        };

        let target_phase = lookup(keys::TARGET_PHASE)
            .map(|p| p.parse::<PodPhase>())
            .transpose()
            .with_context(|| format!("invalid {}", keys::TARGET_PHASE))?;

        let http_timeout = parse_secs(&lookup, keys::HTTP_TIMEOUT_SECS)?
            .unwrap_or(Duration::from_secs(client::HTTP_TIMEOUT_SECS));
        let poll_interval = parse_secs(&lookup, keys::POLL_INTERVAL_SECS)?
            .unwrap_or(Duration::from_secs(wait::POLL_INTERVAL_SECS));
        if poll_interval.is_zero() {
            bail!("{} must be greater than zero", keys::POLL_INTERVAL_SECS);
        }
        let wait_timeout = parse_secs(&lookup, keys::WAIT_TIMEOUT_SECS)?;
        let use_watch: bool = lookup(keys::USE_WATCH)
            .unwrap_or_else(|| "false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Config {
            client: ClientConfig {
                kubeconfig_path: lookup(keys::KUBECONFIG_PATH).map(PathBuf::from),
                http_timeout,
            },
            target,
            target_phase,
            poll_interval,
            wait_timeout,
            use_watch,
        })
    }

    /// Wait options carrying the configured deadline
    pub fn wait_options(&self) -> WaitOptions {
        match self.wait_timeout {
            Some(timeout) => WaitOptions::with_timeout(timeout),
            None => WaitOptions::unbounded(),
        }
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("{} must be a number of seconds, got '{}'", key, v))
        })
        .transpose()
}
