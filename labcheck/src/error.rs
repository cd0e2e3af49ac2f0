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

//! Module containing all error types of the configuration checks

use thiserror::Error;

use std::path::PathBuf;

/// # Check Error
///
/// Every violation found by a validator is a hard failure, carrying a rendered table of the
/// offending devices.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The configuration directory cannot be listed
    #[error("Cannot list configuration directory {}: {}", .path.display(), .source)]
    ListDir {
        /// Path of the directory
        path: PathBuf,
        /// IO error raised while listing
        source: std::io::Error,
    },
    /// A configuration file cannot be read
    #[error("Cannot read configuration file {}: {}", .path.display(), .source)]
    Read {
        /// Path of the file
        path: PathBuf,
        /// IO error raised while reading
        source: std::io::Error,
    },
    /// The configuration directory contains no files
    #[error("No configuration files found in {}", .0.display())]
    NoConfigFiles(PathBuf),
    /// The number of extracted devices does not match the lab
    #[error("Expecting {expected} devices, found {found}:\n{table}")]
    DeviceCount {
        /// Number of devices expected in the lab
        expected: usize,
        /// Number of devices found
        found: usize,
        /// Rendered table of all extracted devices
        table: String,
    },
    /// Some devices violate a required property
    #[error("{what}:\n{table}")]
    Violations {
        /// Short description of the violated property
        what: &'static str,
        /// Rendered table of the violating devices
        table: String,
    },
}
