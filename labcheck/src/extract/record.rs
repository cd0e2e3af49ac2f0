// Labcheck: Validating Network-Wide Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Schema-driven device records and extraction tables

use itertools::Itertools;
use serde_json::{Map, Value};

use std::fmt;

use super::Captures;

/// Declaration of a single record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    repeated: bool,
}

impl Field {
    /// Declare a scalar field. When multiple lines capture it, the last value wins. Its
    /// default value is the empty string.
    pub fn scalar(name: &'static str) -> Self {
        Self {
            name,
            repeated: false,
        }
    }

    /// Declare a repeated field, collecting every captured value in line order. Its default
    /// value is the empty list.
    pub fn repeated(name: &'static str) -> Self {
        Self {
            name,
            repeated: true,
        }
    }

    /// Name of the field
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the field collects all captured values
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }
}

/// Ordered set of field declarations, defining the column order of the extracted tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema(Vec<Field>);

impl Schema {
    /// Create a schema from field declarations in column order
    pub fn new(fields: Vec<Field>) -> Self {
        Self(fields)
    }

    /// Iterate over the fields in column order
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.0.iter()
    }

    /// Build a record for the given device with every field at its default value
    pub fn empty_record(&self, device: impl Into<String>) -> DeviceRecord {
        DeviceRecord {
            node: device.into(),
            fields: self
                .0
                .iter()
                .map(|f| {
                    let default = if f.repeated {
                        FieldValue::List(Vec::new())
                    } else {
                        FieldValue::Scalar(String::new())
                    };
                    (f.name, default)
                })
                .collect(),
        }
    }
}

/// Value of a single record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Single value, the empty string if no line captured the field
    Scalar(String),
    /// All captured values in line order
    List(Vec<String>),
}

impl FieldValue {
    /// Json representation of the value
    pub fn json(&self) -> Value {
        match self {
            FieldValue::Scalar(s) => Value::String(s.clone()),
            FieldValue::List(l) => Value::Array(l.iter().map(|v| Value::String(v.clone())).collect()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(s) => f.write_str(s),
            FieldValue::List(l) => write!(f, "[{}]", l.iter().join(", ")),
        }
    }
}

/// One extracted row, holding the device name and one value per schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    node: String,
    fields: Vec<(&'static str, FieldValue)>,
}

impl DeviceRecord {
    /// Name of the device this record was extracted from
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Value of the given field, `None` if the field is not part of the schema
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// Scalar value of the given field, empty if never captured or not a scalar field
    pub fn scalar(&self, field: &str) -> &str {
        match self.get(field) {
            Some(FieldValue::Scalar(s)) => s,
            _ => "",
        }
    }

    /// List value of the given field, empty if never captured or not a repeated field
    pub fn list(&self, field: &str) -> &[String] {
        match self.get(field) {
            Some(FieldValue::List(l)) => l,
            _ => &[],
        }
    }

    /// Fold one set of captures into the record. Repeated fields append the captured value,
    /// scalar fields are overwritten. Captures of fields outside the schema are dropped.
    pub(super) fn merge(&mut self, captures: &Captures) {
        for (field, value) in captures.iter() {
            if let Some((_, slot)) = self.fields.iter_mut().find(|(f, _)| *f == field) {
                match slot {
                    FieldValue::Scalar(s) => {
                        s.clear();
                        s.push_str(value);
                    }
                    FieldValue::List(l) => l.push(value.to_string()),
                }
            }
        }
    }
}

/// # Extraction Table
///
/// One extracted record per device, along with the schema defining the column order.
#[derive(Debug, Clone)]
pub struct ExtractTable {
    schema: Schema,
    rows: Vec<DeviceRecord>,
}

impl ExtractTable {
    /// Create an empty table over the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Append a record to the table
    pub fn push(&mut self, record: DeviceRecord) {
        self.rows.push(record);
    }

    /// Number of device rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = &DeviceRecord> + '_ {
        self.rows.iter()
    }

    /// Build a new table containing only the rows matching the predicate
    pub fn filter<F>(&self, predicate: F) -> ExtractTable
    where
        F: Fn(&DeviceRecord) -> bool,
    {
        ExtractTable {
            schema: self.schema.clone(),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Json representation of the table, one object per row
    pub fn json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|r| {
                    let mut row = Map::new();
                    row.insert(String::from("Node"), Value::String(r.node.clone()));
                    for (field, value) in &r.fields {
                        row.insert(field.to_string(), value.json());
                    }
                    Value::Object(row)
                })
                .collect(),
        )
    }
}

impl fmt::Display for ExtractTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = std::iter::once(String::from("Node"))
            .chain(self.schema.fields().map(|c| c.name().to_string()))
            .collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                std::iter::once(r.node().to_string())
                    .chain(self.schema.fields().map(|c| {
                        r.get(c.name()).map(|v| v.to_string()).unwrap_or_default()
                    }))
                    .collect()
            })
            .collect();
        f.write_str(&render_table(&headers, &rows))
    }
}

/// Render headers and rows as an aligned table, columns separated by two spaces
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<w$}", cell, w = *width))
            .join("  ")
            .trim_end()
            .to_string()
    };
    std::iter::once(render_row(headers))
        .chain(rows.iter().map(|r| render_row(r)))
        .join("\n")
}
