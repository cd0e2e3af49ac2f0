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

//! Validator for the SNMP settings
//!
//! Extracts the following lines of every device:
//!
//! ```text
//! snmp-server community dcread RO
//! snmp-server community dcwrite RW
//! snmp-server location INWK Lab
//! snmp-server contact admin@inwk.local
//! ```

use crate::extract::{Extractor, Field, Grammar, Pattern, Schema, Token};
use crate::report::Reporter;
use crate::CheckError;

use std::collections::HashSet;
use std::path::PathBuf;

/// Build the extractor for the SNMP settings
pub fn extractor() -> Extractor {
    Extractor::new(
        Schema::new(vec![
            Field::repeated("Read"),
            Field::repeated("Write"),
            Field::scalar("Location"),
            Field::scalar("Contact"),
        ]),
        Grammar::new(vec![
            Pattern::new(
                "snmp-server",
                vec![
                    Token::Keyword("community"),
                    Token::Word("Read"),
                    Token::Keyword("RO"),
                ],
            ),
            Pattern::new(
                "snmp-server",
                vec![
                    Token::Keyword("community"),
                    Token::Word("Write"),
                    Token::Keyword("RW"),
                ],
            ),
            Pattern::new(
                "snmp-server",
                vec![Token::Keyword("location"), Token::Remainder("Location")],
            ),
            Pattern::new(
                "snmp-server",
                vec![Token::Keyword("contact"), Token::Remainder("Contact")],
            ),
        ]),
    )
}

/// Check that every device configures a read-only community from the given set
pub fn check(
    files: &[PathBuf],
    devices: usize,
    communities: &HashSet<String>,
    reporter: &mut impl Reporter,
) -> Result<(), CheckError> {
    reporter.rule("Checking SNMP configuration");
    let table = extractor().table(files)?;
    super::expect_devices(&table, devices)?;
    super::expect_no_violators(
        table.filter(|r| r.list("Read").is_empty()),
        "Missing SNMP configuration",
    )?;
    super::expect_no_violators(
        table.filter(|r| !r.list("Read").iter().any(|c| communities.contains(c))),
        "Missing or incorrect community string",
    )?;
    Ok(())
}
