// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{PodWaitError, Result};
use k8s_openapi::api::core::v1::Pod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase of a pod as reported in `status.phase`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PodPhase {
    type Err = PodWaitError;

    fn from_str(s: &str) -> Result<Self> {
        [
            PodPhase::Pending,
            PodPhase::Running,
            PodPhase::Succeeded,
            PodPhase::Failed,
            PodPhase::Unknown,
        ]
        .into_iter()
        .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| PodWaitError::InvalidArgument(format!("unknown pod phase '{}'", s)))
    }
}

/// A single pod, identified by namespace and name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "PodRefFields")]
pub struct PodRef {
    namespace: String,
    name: String,
}

#[derive(Deserialize)]
struct PodRefFields {
    namespace: String,
    name: String,
}

impl PodRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let name = name.into();
        if namespace.is_empty() {
            return Err(PodWaitError::InvalidArgument(
                "namespace must not be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(PodWaitError::InvalidArgument(
                "pod name must not be empty".to_string(),
            ));
        }
        Ok(Self { namespace, name })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<PodRefFields> for PodRef {
    type Error = PodWaitError;

    fn try_from(fields: PodRefFields) -> Result<Self> {
        PodRef::new(fields.namespace, fields.name)
    }
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Equality label selector, rendered as `key=value`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "LabelSelectorFields")]
pub struct LabelSelector {
    key: String,
    value: String,
}

#[derive(Deserialize)]
struct LabelSelectorFields {
    key: String,
    value: String,
}

impl LabelSelector {
    /// A single `key=value` term. The key must be non-empty and neither part
    /// may contain `,`, which would turn the rendered selector into several
    /// terms.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        if key.is_empty() {
            return Err(PodWaitError::InvalidArgument(
                "label key must not be empty".to_string(),
            ));
        }
        if key.contains(',') || value.contains(',') {
            return Err(PodWaitError::InvalidArgument(format!(
                "label selector '{}={}' must be a single term",
                key, value
            )));
        }
        Ok(Self { key, value })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TryFrom<LabelSelectorFields> for LabelSelector {
    type Error = PodWaitError;

    fn try_from(fields: LabelSelectorFields) -> Result<Self> {
        LabelSelector::new(fields.key, fields.value)
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl FromStr for LabelSelector {
    type Err = PodWaitError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((key, value)) = s.split_once('=') else {
            return Err(PodWaitError::InvalidArgument(format!(
                "label selector '{}' is not of the form key=value",
                s
            )));
        };
        LabelSelector::new(key.trim(), value.trim())
    }
}

/// Phase accessors for [`Pod`]
pub trait PodExt {
    /// The pod's phase, or `None` when the status carries no recognised phase
    fn phase(&self) -> Option<PodPhase>;

    fn is_in_phase(&self, target: PodPhase) -> bool {
        self.phase() == Some(target)
    }
}

impl PodExt for Pod {
    fn phase(&self) -> Option<PodPhase> {
        self.status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .and_then(|p| p.parse().ok())
    }
}
