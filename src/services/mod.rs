// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregation;
pub mod charts;
pub mod dataset;
pub mod derivation;
pub mod details;
pub mod filters;
pub mod map;
pub mod translation;

pub use dataset::{Dataset, DatasetError, DatasetService};
pub use filters::{AltitudeRange, CategoryFilterPolicy, YearRange};
pub use translation::Language;
