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

//! Validator for the clock and timezone settings
//!
//! Extracts the following lines of every device:
//!
//! ```text
//! clock timezone AST -4 0
//! clock summer-time ADT recurring
//! ```

use crate::extract::{Extractor, Field, Grammar, Pattern, Schema, Token};
use crate::report::Reporter;
use crate::CheckError;

use std::path::PathBuf;

/// Build the extractor for the clock settings
pub fn extractor() -> Extractor {
    Extractor::new(
        Schema::new(vec![
            Field::scalar("Zone"),
            Field::scalar("HRS"),
            Field::scalar("MIN"),
            Field::scalar("Summer"),
            Field::scalar("Recurring"),
        ]),
        Grammar::new(vec![
            Pattern::new(
                "clock",
                vec![
                    Token::Keyword("timezone"),
                    Token::Word("Zone"),
                    Token::SignedInt("HRS"),
                    Token::Int("MIN"),
                ],
            ),
            Pattern::new(
                "clock",
                vec![
                    Token::Keyword("summer-time"),
                    Token::Word("Summer"),
                    Token::Flag {
                        keyword: "recurring",
                        field: "Recurring",
                        value: "enabled",
                    },
                ],
            ),
        ]),
    )
}

/// Check that every device applies the expected timezone shift and summer-time zone
pub fn check(
    files: &[PathBuf],
    devices: usize,
    time_shift: &str,
    summer_zone: &str,
    reporter: &mut impl Reporter,
) -> Result<(), CheckError> {
    reporter.rule("Checking clock configuration");
    let table = extractor().table(files)?;
    super::expect_devices(&table, devices)?;
    super::expect_no_violators(
        table.filter(|r| r.scalar("HRS") != time_shift),
        "Missing or incorrect time zone",
    )?;
    super::expect_no_violators(
        table.filter(|r| r.scalar("Summer") != summer_zone),
        "Missing or incorrect summer time",
    )?;
    Ok(())
}
