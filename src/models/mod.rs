// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod derived;
pub mod metadata;
pub mod place;

pub use activity::{Activity, ActivityCategory, Context, Role, WAYPOINT_SEPARATOR};
pub use derived::{DerivedActivity, GradeRank, VisitRow};
pub use metadata::Metadata;
pub use place::{Place, PlaceCategory};
