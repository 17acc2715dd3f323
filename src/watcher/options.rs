// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deadline and cancellation envelope for wait operations

use crate::error::{PodWaitError, Result};
use std::future::{pending, Future};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Bounds for a single wait call.
///
/// The default is unbounded: the wait only returns on success or on a
/// fatal query error.
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Give up with [`PodWaitError::Timeout`] after this long
    pub timeout: Option<Duration>,
    /// Give up with [`PodWaitError::Cancelled`] once this token fires
    pub cancel: Option<CancellationToken>,
}

impl WaitOptions {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: None,
        }
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Drive `fut` to completion unless the deadline passes or the token
    /// fires first. The inner future is dropped on either, which also aborts
    /// an in-flight API request.
    pub async fn bound<F>(&self, what: &str, fut: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        let deadline = async {
            match self.timeout {
                Some(after) => {
                    tokio::time::sleep(after).await;
                    after
                }
                None => pending().await,
            }
        };
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => pending().await,
            }
        };

        tokio::select! {
            biased;
            res = fut => res,
            _ = cancelled => Err(PodWaitError::Cancelled(what.to_string())),
            after = deadline => Err(PodWaitError::Timeout {
                what: what.to_string(),
                after,
            }),
        }
    }
}
