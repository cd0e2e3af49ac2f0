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

//! # Labcheck: Validating Network-Wide Device Configurations
//!
//! This library checks a set of router configuration files for required properties. It
//! consists of three parts:
//!
//! - The module [`extract`] contains a small, line-oriented grammar engine. A
//!   [`Grammar`](extract::Grammar) is an ordered set of line patterns. Scanning a
//!   configuration file with a grammar produces named captures, which are folded into one
//!   record per device according to a [`Schema`](extract::Schema).
//! - The module [`checks`] contains the property validators of the lab (SNMP, syslog and
//!   clock settings), each built on its own grammar and schema.
//! - The module [`report`] contains the [`Reporter`](report::Reporter) seam through which
//!   validators announce the check they are about to perform.
//!
//! ```
//! use labcheck::extract::{Extractor, Field, Grammar, Pattern, Schema, Token};
//!
//! // extract the timezone of a device
//! let extractor = Extractor::new(
//!     Schema::new(vec![Field::scalar("Zone")]),
//!     Grammar::new(vec![Pattern::new(
//!         "clock",
//!         vec![Token::Keyword("timezone"), Token::Word("Zone")],
//!     )]),
//! );
//!
//! let record = extractor.record("r11", "hostname r11\nclock timezone AST -4 0\n");
//! assert_eq!(record.scalar("Zone"), "AST");
//! ```
#![deny(missing_docs)]

// test modules
mod test;

mod error;
pub mod checks;
pub mod extract;
pub mod report;

pub use error::CheckError;
