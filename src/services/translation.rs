// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! French/English display labels for domain codes.
//!
//! Every lookup is a total function over the enum; unknown codes map to
//! `None` rather than failing.

use crate::models::{ActivityCategory, Context, DerivedActivity, PlaceCategory, Role};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder shown when an activity has no role.
pub const ROLE_NOT_FILLED: &str = "not filled";

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Pick the label for `lang` from a (fr, en) pair.
fn pick(lang: Language, fr: &'static str, en: &'static str) -> &'static str {
    match lang {
        Language::Fr => fr,
        Language::En => en,
    }
}

pub fn activity_category_label(category: &ActivityCategory, lang: Language) -> Option<&'static str> {
    let label = match category {
        ActivityCategory::Ski => pick(lang, "Ski", "Ski"),
        ActivityCategory::Mountaineering => pick(lang, "Alpinisme", "Mountaineering"),
        ActivityCategory::Hike => pick(lang, "Randonnée", "Hike"),
        ActivityCategory::Bike => pick(lang, "Vélo", "Bike"),
        ActivityCategory::ViaFerrata => pick(lang, "Via ferrata", "Via ferrata"),
        ActivityCategory::Climbing => pick(lang, "Escalade", "Climbing"),
        ActivityCategory::Canoe => pick(lang, "Canoë", "Canoe"),
        ActivityCategory::Other(_) => return None,
    };
    Some(label)
}

pub fn context_label(context: &Context, lang: Language) -> Option<&'static str> {
    let label = match context {
        Context::AlpineClub => pick(lang, "Club alpin", "Alpine club"),
        Context::WithGuide => pick(lang, "Avec guide", "With a guide"),
        Context::Solo => pick(lang, "Solo", "Solo"),
        Context::Family => pick(lang, "En famille", "With family"),
        Context::Friends => pick(lang, "Entre amis", "With friends"),
        Context::Other(_) => return None,
    };
    Some(label)
}

pub fn role_label(role: &Role, lang: Language) -> Option<&'static str> {
    let label = match role {
        Role::Lead => pick(lang, "Encadrant", "Lead"),
        Role::First => pick(lang, "Premier de cordée", "Rope 1st"),
        Role::Switch => pick(lang, "Réversible", "Switch"),
        Role::Second => pick(lang, "Seconde cordée", "Rope 2nd"),
        Role::Participant => pick(lang, "Participant", "Participant"),
        Role::Other(_) => return None,
    };
    Some(label)
}

pub fn place_category_label(category: &PlaceCategory, lang: Language) -> Option<&'static str> {
    let label = match category {
        PlaceCategory::Summit => pick(lang, "Sommet", "Summit"),
        PlaceCategory::Pass => pick(lang, "Col", "Pass"),
        PlaceCategory::Hut => pick(lang, "Refuge", "Hut"),
        PlaceCategory::Poi => pick(lang, "Point d'intérêt", "Point of interest"),
        PlaceCategory::Cliff => pick(lang, "Falaise", "Cliff"),
        PlaceCategory::Other(_) => return None,
    };
    Some(label)
}

/// Fill the `*_translated` columns of derived rows for `lang`.
///
/// Missing roles get the [`ROLE_NOT_FILLED`] placeholder; unknown codes leave
/// the column empty.
pub fn translate_labels(rows: &mut [DerivedActivity], lang: Language) {
    for row in rows.iter_mut() {
        row.category_translated =
            activity_category_label(&row.activity.category, lang).map(String::from);
        row.context_translated = row
            .activity
            .context
            .as_ref()
            .and_then(|c| context_label(c, lang))
            .map(String::from);
        row.role_translated = match &row.activity.role {
            Some(role) => role_label(role, lang).map(String::from),
            None => Some(ROLE_NOT_FILLED.to_string()),
        };
    }
}
