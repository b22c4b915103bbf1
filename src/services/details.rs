// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Detail panel for a single selected activity.

use crate::models::{Activity, Metadata, Place};
use serde::Serialize;

pub const NO_COMMENTS: &str = "Aucun commentaire";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopoLink {
    pub href: String,
    pub label: &'static str,
}

/// A visited place, listed highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailWaypoint {
    pub waypoint: String,
    pub altitude: i32,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDetails {
    pub id: u64,
    pub label: String,
    pub days: String,
    pub grade: String,
    pub topo: Option<TopoLink>,
    pub comments: String,
    pub icon: Option<String>,
    pub waypoints: Vec<DetailWaypoint>,
}

/// "1 day", "2.5 days".
pub fn days_text(days: f64) -> String {
    let plural = if days > 1.0 { "s" } else { "" };
    format!("{} day{}", days, plural)
}

/// Short label for a topo link based on the site it points to.
pub fn topo_label(href: &str) -> &'static str {
    if href.contains("camptocamp") {
        "Camptocamp"
    } else if href.contains("youtube") {
        "Youtube"
    } else if href.contains("blogger") {
        "Blog"
    } else {
        "Link"
    }
}

pub fn activity_details(activity: &Activity, places: &[Place], metadata: &Metadata) -> ActivityDetails {
    let mut visited: Vec<&Place> = places
        .iter()
        .filter(|p| activity.waypoints.contains(&p.waypoint))
        .collect();
    visited.sort_by(|a, b| b.altitude.cmp(&a.altitude));

    let waypoints = visited
        .into_iter()
        .map(|place| DetailWaypoint {
            waypoint: place.waypoint.clone(),
            altitude: place.altitude,
            icon: metadata.icon(place.category.code()).map(String::from),
            color: metadata.place_color(&place.category).map(String::from),
        })
        .collect();

    ActivityDetails {
        id: activity.id,
        label: activity.label.clone(),
        days: days_text(activity.days),
        grade: activity.grade.clone(),
        topo: activity
            .topo
            .as_deref()
            .filter(|href| !href.is_empty())
            .map(|href| TopoLink {
                href: href.to_string(),
                label: topo_label(href),
            }),
        comments: activity
            .comments
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| NO_COMMENTS.to_string()),
        icon: metadata.icon(activity.category.code()).map(String::from),
        waypoints,
    }
}
