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

//! # Batfish Service API
//!
//! This is a very simple crate to interact with a running Batfish service, uploading
//! configuration snapshots, asking questions about them, and asserting properties on the
//! tabular answers.
//!
//! ```
//! use batfish::{assert_num_results, BatfishSession};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // connect to the service
//!     let mut bf = match BatfishSession::connect("localhost", 9996) {
//!         Ok(s) => s,
//!         Err(e) => {
//!             eprintln!("Cannot connect to the service: {}", e);
//! # return Ok(());
//!             return Err(e.into());
//!         }
//!     };
//!
//!     // register the network and upload the snapshot
//!     bf.set_network("EXAMPLE_NET")?;
//!     bf.init_snapshot("lab", "lab1", true)?;
//!     bf.load_questions()?;
//!
//!     // ask a question and assert on the answer
//!     let answer = bf.file_parse_status()?;
//!     assert_num_results(&answer, 5, false)?;
//!
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod asserts;
mod session;
mod types;
pub use asserts::*;
pub use session::BatfishSession;
pub use types::*;

use thiserror::Error;

/// # Batfish Error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error during handling of the HTTP request
    #[error("HTTP Error: {0}")]
    HttpError(#[from] isahc::Error),
    /// Cannot deserialize the response
    #[error("Cannot parse JSON response: {0}")]
    JsonError(#[from] serde_json::error::Error),
    /// IO Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// HTTP Response Error
    #[error("HTTP Response Error: {0}. Message:\n{1}")]
    ResponseError(u16, String),
    /// No network is selected
    #[error("No network is selected!")]
    NoNetworkSet,
    /// No snapshot is initialized
    #[error("No snapshot is initialized!")]
    NoSnapshotSet,
    /// The question catalog is not loaded
    #[error("The question catalog is not loaded!")]
    QuestionsNotLoaded,
    /// The question is not part of the loaded catalog
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),
    /// Router IDs cannot be checked for the given protocol
    #[error("Cannot check router IDs for protocol: {0}")]
    UnsupportedProtocol(String),
    /// A hard assertion on an answer has failed
    #[error("{0}")]
    AssertFailed(String),
}

/// Batfish Result type
type Result<T> = core::result::Result<T, Error>;
