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

//! # Batfish Types

use itertools::Itertools;
use serde::Deserialize;
use serde_json::{Map, Value};

use std::fmt;

/// Version information of the service
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResponseVersion {
    /// Version string of the service
    #[serde(rename = "version")]
    pub version: String,
}

/// Batfish Network
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Network {
    /// Network name
    #[serde(rename = "name")]
    pub name: String,
}

/// Batfish Snapshot
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Snapshot {
    /// Snapshot name
    #[serde(rename = "name")]
    pub name: String,
}

/// Entry of the question catalog
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QuestionInfo {
    /// Question name, as used when asking the question
    #[serde(rename = "name")]
    pub name: String,
    /// Human readable description of the question
    #[serde(rename = "description", default)]
    pub description: Option<String>,
}

/// Tabular answer to a question
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Answer {
    /// Column metadata, in display order
    #[serde(rename = "columns", default)]
    pub columns: Vec<Column>,
    /// All rows of the answer
    #[serde(rename = "rows", default)]
    pub rows: Vec<Row>,
}

impl Answer {
    /// Number of rows in the answer
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the answer has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a new answer containing only the rows matching the predicate, keeping the column
    /// metadata.
    pub fn filter<F>(&self, predicate: F) -> Answer
    where
        F: Fn(&Row) -> bool,
    {
        Answer {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self.columns.iter().map(|c| c.name.clone()).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| self.columns.iter().map(|c| r.cell(&c.name)).collect())
            .collect();
        f.write_str(&render_table(&headers, &rows))
    }
}

/// Column metadata of an answer
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Column {
    /// Column name
    #[serde(rename = "name")]
    pub name: String,
    /// Human readable description of the column
    #[serde(rename = "description", default)]
    pub description: Option<String>,
}

/// A single answer row, mapping column names to json values
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Raw json value of the given column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// String value of the given column, `None` if the column is missing or not a string
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(Value::as_str)
    }

    /// All string values of the given column. A json array yields its string elements, a plain
    /// string yields itself, anything else yields nothing.
    pub fn get_str_list(&self, column: &str) -> Vec<&str> {
        match self.0.get(column) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(s)) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }

    /// Human readable form of the given column, empty if the column is missing
    pub fn cell(&self, column: &str) -> String {
        self.0.get(column).map(value_str).unwrap_or_default()
    }
}

/// Render a json value for tabular display
fn value_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(values) => format!("[{}]", values.iter().map(value_str).join(", ")),
        v => v.to_string(),
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
