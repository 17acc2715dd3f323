// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, pod lookups and pod watches.

pub mod client;
pub mod pods;
pub mod watch;

pub use client::create_client;
pub use pods::{KubePods, PodSource};
pub use watch::watch_for_status;
