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

//! # Property Validators
//!
//! Every validator checks one aspect of the device configurations. It extracts a table with
//! one row per configuration file, checks that the table covers the expected number of
//! devices, and then asserts the required properties, reporting the violating devices as a
//! rendered table inside the error.

pub mod clock;
pub mod snmp;
pub mod syslog;

use crate::extract::ExtractTable;
use crate::CheckError;

use std::fs;
use std::path::{Path, PathBuf};

/// List all configuration files in the given directory, sorted by file name
pub fn config_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, CheckError> {
    let dir = dir.as_ref();
    let list_err = |source| CheckError::ListDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Check that the table contains one row per expected device
fn expect_devices(table: &ExtractTable, expected: usize) -> Result<(), CheckError> {
    if table.len() == expected {
        Ok(())
    } else {
        Err(CheckError::DeviceCount {
            expected,
            found: table.len(),
            table: table.to_string(),
        })
    }
}

/// Fail with the violating devices if the table is non-empty
fn expect_no_violators(violators: ExtractTable, what: &'static str) -> Result<(), CheckError> {
    if violators.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Violations {
            what,
            table: violators.to_string(),
        })
    }
}
