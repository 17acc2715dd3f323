// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod handles, label selectors and lifecycle phases.

pub mod pod;

pub use pod::{LabelSelector, PodExt, PodPhase, PodRef};
