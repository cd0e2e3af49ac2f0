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

//! Checks on the device configuration files

use labcheck::checks::{self, clock, snmp, syslog};
use labcheck::report::Reporter;
use labcheck::CheckError;

use log::*;
use maplit::hashset;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Number of devices in the lab
const NUM_DEVICES: usize = 5;
/// Read-only community string that every device must configure
const READ_COMMUNITY: &str = "dcread";
/// Syslog server that every device must log to
const LOG_SERVER: &str = "10.1.155.100";
/// Required timezone shift in hours
const TIME_SHIFT: &str = "-4";
/// Required summer-time zone
const SUMMER_ZONE: &str = "ADT";

/// Run all checks on the device configuration files found in `path`.
pub fn run(
    path: &str,
    json_filename: Option<&str>,
    reporter: &mut impl Reporter,
) -> Result<(), Box<dyn Error>> {
    reporter.rule("Checking presence of configuration files");
    let files = checks::config_files(path)?;
    if files.is_empty() {
        return Err(CheckError::NoConfigFiles(PathBuf::from(path)).into());
    }
    info!("Found {} configuration files in {}", files.len(), path);

    snmp::check(
        &files,
        NUM_DEVICES,
        &hashset! {String::from(READ_COMMUNITY)},
        reporter,
    )?;
    syslog::check(
        &files,
        NUM_DEVICES,
        &hashset! {String::from(LOG_SERVER)},
        reporter,
    )?;
    clock::check(&files, NUM_DEVICES, TIME_SHIFT, SUMMER_ZONE, reporter)?;

    if let Some(json_filename) = json_filename {
        let data = serde_json::json!({
            "snmp": snmp::extractor().table(&files)?.json(),
            "syslog": syslog::extractor().table(&files)?.json(),
            "clock": clock::extractor().table(&files)?.json(),
        });
        fs::write(json_filename, serde_json::to_string(&data)?)?;
        info!("Extracted tables written to {}", json_filename);
    }

    reporter.rule("✓ All checks passed ✓");
    Ok(())
}
