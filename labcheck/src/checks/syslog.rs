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

//! Validator for the syslog settings
//!
//! Extracts the following lines of every device:
//!
//! ```text
//! logging host 10.1.155.100
//! ```

use crate::extract::{Extractor, Field, Grammar, Pattern, Schema, Token};
use crate::report::Reporter;
use crate::CheckError;

use std::collections::HashSet;
use std::path::PathBuf;

/// Build the extractor for the syslog settings
pub fn extractor() -> Extractor {
    Extractor::new(
        Schema::new(vec![Field::repeated("Host")]),
        Grammar::new(vec![Pattern::new(
            "logging",
            vec![Token::Keyword("host"), Token::Remainder("Host")],
        )]),
    )
}

/// Check that every device logs to one of the given syslog servers
pub fn check(
    files: &[PathBuf],
    devices: usize,
    servers: &HashSet<String>,
    reporter: &mut impl Reporter,
) -> Result<(), CheckError> {
    reporter.rule("Checking syslog configuration");
    let table = extractor().table(files)?;
    super::expect_devices(&table, devices)?;
    super::expect_no_violators(
        table.filter(|r| r.list("Host").is_empty()),
        "Missing syslog configuration",
    )?;
    super::expect_no_violators(
        table.filter(|r| !r.list("Host").iter().any(|h| servers.contains(h))),
        "Missing or incorrect syslog server address",
    )?;
    Ok(())
}
