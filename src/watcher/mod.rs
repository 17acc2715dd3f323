// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Blocking wait-for-phase operations and pod existence checks.

pub mod options;
pub mod poll;

pub use options::WaitOptions;
pub use poll::PodWatcher;
