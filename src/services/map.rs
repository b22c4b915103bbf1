// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view: visible places as GeoJSON plus where to point the camera.

use crate::models::{Metadata, Place, PlaceCategory};
use crate::services::filters::{
    filter_by_search, filter_places, AltitudeRange, CategoryFilterPolicy,
};
use crate::services::translation::{place_category_label, Language};
use geo::{BoundingRect, Centroid, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

/// Zoom level for the overview map.
pub const DEFAULT_ZOOM: u8 = 8;
/// Zoom level when the search narrows the map to a single place.
pub const FOCUSED_ZOOM: u8 = 12;

/// Filters selected on the map page.
#[derive(Debug, Clone, Default)]
pub struct MapQuery {
    /// Place names picked in the search box
    pub search: Option<Vec<String>>,
    pub categories: Vec<PlaceCategory>,
    pub altitude: Option<AltitudeRange>,
}

/// Camera position hint for the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// `[longitude, latitude]`
    pub center: Option<[f64; 2]>,
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub bounds: Option<[f64; 4]>,
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapData {
    pub places: FeatureCollection,
    pub view: MapView,
}

/// Apply the map filters: search first, then category (an empty selection
/// shows everything), then altitude.
pub fn visible_places(places: &[Place], query: &MapQuery) -> (Vec<Place>, bool) {
    let searched = filter_by_search(places.to_vec(), query.search.as_deref());
    let visible = filter_places(
        &searched.places,
        query.altitude.unwrap_or(AltitudeRange::ANY),
        &query.categories,
        CategoryFilterPolicy::IgnoreWhenEmpty,
    );
    (visible, searched.zoom_in)
}

/// Build the GeoJSON layer and camera hint for the visible places.
pub fn build_map(places: &[Place], query: &MapQuery, metadata: &Metadata, lang: Language) -> MapData {
    let (visible, zoom_in) = visible_places(places, query);

    let view = map_view(&visible, zoom_in);
    let features = visible
        .iter()
        .map(|place| place_feature(place, metadata, lang))
        .collect();

    MapData {
        places: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        view,
    }
}

/// Center and bounds of `places`, zoomed in when a search hit a single place.
pub fn map_view(places: &[Place], zoom_in: bool) -> MapView {
    let points: MultiPoint<f64> = places
        .iter()
        .map(|p| Point::new(p.longitude, p.latitude))
        .collect::<Vec<_>>()
        .into();

    let center = points.centroid().map(|c| [c.x(), c.y()]);
    let bounds = points
        .bounding_rect()
        .map(|r| [r.min().x, r.min().y, r.max().x, r.max().y]);

    MapView {
        center,
        bounds,
        zoom: if zoom_in { FOCUSED_ZOOM } else { DEFAULT_ZOOM },
    }
}

fn place_feature(place: &Place, metadata: &Metadata, lang: Language) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("waypoint".to_string(), place.waypoint.clone().into());
    properties.insert("altitude".to_string(), place.altitude.into());
    properties.insert("category".to_string(), place.category.code().into());
    properties.insert(
        "category_translated".to_string(),
        place_category_label(&place.category, lang).into(),
    );
    properties.insert(
        "color".to_string(),
        metadata.place_color(&place.category).into(),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            place.longitude,
            place.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
