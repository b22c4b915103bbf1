// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! "Table orient" JSON documents.
//!
//! Each collection is stored as
//! `{"schema": {"fields": [...], "primaryKey": [...], "pandas_version": ...}, "data": [...]}`
//! so the files stay readable by the pandas tooling that created them.

use crate::models::{Activity, Place};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PANDAS_VERSION: &str = "1.4.0";

/// Column description in the table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<String>>,
    #[serde(default)]
    pub pandas_version: String,
}

/// Raw document as read from storage; rows are decoded one by one.
/// The schema is rewritten on every save, so it is not read back.
#[derive(Debug, Deserialize)]
pub struct RawTable {
    pub data: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct TableRef<'a, T> {
    schema: Schema,
    data: Vec<Row<'a, T>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Row<'a, T> {
    Record(&'a T),
    Raw(&'a Value),
}

/// A record type stored as a table.
pub trait TableRecord: Serialize + DeserializeOwned {
    /// Identity column.
    const PRIMARY_KEY: &'static str;

    /// Column names and table-schema types, in persisted order.
    const COLUMNS: &'static [(&'static str, &'static str)];

    fn schema() -> Schema {
        Schema {
            fields: Self::COLUMNS
                .iter()
                .map(|(name, field_type)| Field {
                    name: name.to_string(),
                    field_type: field_type.to_string(),
                })
                .collect(),
            primary_key: Some(vec![Self::PRIMARY_KEY.to_string()]),
            pandas_version: PANDAS_VERSION.to_string(),
        }
    }
}

impl TableRecord for Place {
    const PRIMARY_KEY: &'static str = "waypoint";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("waypoint", "string"),
        ("latitude", "number"),
        ("longitude", "number"),
        ("altitude", "integer"),
        ("category", "string"),
    ];
}

impl TableRecord for Activity {
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("id", "integer"),
        ("label", "string"),
        ("category", "string"),
        ("grade", "string"),
        ("date", "string"),
        ("days", "number"),
        ("context", "string"),
        ("role", "string"),
        ("waypoints", "string"),
        ("participants", "integer"),
        ("topo", "string"),
        ("comments", "string"),
    ];
}

/// Encode records as a table document. `unreadable` rows follow the records
/// verbatim.
pub fn encode<T: TableRecord>(records: &[T], unreadable: &[Value]) -> serde_json::Result<String> {
    let data = records
        .iter()
        .map(Row::Record)
        .chain(unreadable.iter().map(Row::Raw))
        .collect();
    serde_json::to_string(&TableRef {
        schema: T::schema(),
        data,
    })
}

/// Decoded records plus the raw rows that could not be decoded.
#[derive(Debug)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub unreadable: Vec<Value>,
}

/// Decode rows individually so one malformed record does not discard the rest.
pub fn decode_rows<T: TableRecord>(rows: Vec<Value>) -> Decoded<T> {
    let mut records = Vec::with_capacity(rows.len());
    let mut unreadable = Vec::new();
    for row in rows {
        match T::deserialize(&row) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(error = %e, "Keeping undecodable record as is");
                unreadable.push(row);
            }
        }
    }

    Decoded {
        records,
        unreadable,
    }
}

/// One past the highest `id` among `rows`, or 0 when none has one.
pub fn next_free_id(rows: &[Value]) -> u64 {
    rows.iter()
        .filter_map(|row| row.get("id").and_then(Value::as_u64))
        .max()
        .map_or(0, |max| max + 1)
}

/// Give rows without an `id` the next free ids, in file order.
///
/// Older files keyed activities by label and date only.
pub fn assign_missing_ids(rows: &mut [Value]) -> usize {
    let mut next = next_free_id(rows);

    let mut assigned = 0;
    for row in rows.iter_mut() {
        let Some(object) = row.as_object_mut() else {
            continue;
        };
        if object.get("id").and_then(Value::as_u64).is_none() {
            object.insert("id".to_string(), Value::from(next));
            next += 1;
            assigned += 1;
        }
    }
    assigned
}
