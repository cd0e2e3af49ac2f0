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

//! # Assertions on Answers
//!
//! All assertions distinguish soft and hard failures. A soft failure logs a warning and
//! returns `Ok(false)`, so a check battery can continue with the remaining checks. A hard
//! failure returns [`Error::AssertFailed`] and aborts the battery.

use crate::types::Answer;
use crate::{BatfishSession, Error, Result};

use log::*;

use std::collections::HashMap;

/// Configured statuses of a BGP session that are considered compatible
const COMPATIBLE_BGP_STATUS: [&str; 3] = ["UNIQUE_MATCH", "DYNAMIC_MATCH", "UNKNOWN_REMOTE"];

/// Fail an assertion, either by logging a warning (soft) or by returning an error (hard)
fn fail(message: String, soft: bool) -> Result<bool> {
    if soft {
        warn!("{}", message);
        Ok(false)
    } else {
        Err(Error::AssertFailed(message))
    }
}

/// Assert that the answer contains exactly `num` rows
pub fn assert_num_results(answer: &Answer, num: usize, soft: bool) -> Result<bool> {
    if answer.len() == num {
        Ok(true)
    } else {
        fail(
            format!(
                "Expecting {} results, found {}:\n{}",
                num,
                answer.len(),
                answer
            ),
            soft,
        )
    }
}

/// Assert that the answer contains no rows
pub fn assert_zero_results(answer: &Answer, soft: bool) -> Result<bool> {
    assert_num_results(answer, 0, soft)
}

/// Assert that the snapshot contains no references to undefined configuration structures
pub fn assert_no_undefined_references(bf: &BatfishSession, soft: bool) -> Result<bool> {
    let answer = bf.undefined_references()?;
    if answer.is_empty() {
        Ok(true)
    } else {
        fail(format!("Found undefined references:\n{}", answer), soft)
    }
}

/// Assert that no two routers share the same router ID, for each of the given protocols.
/// Supported protocols are `bgp` and `ospf`.
pub fn assert_no_duplicate_router_ids(
    bf: &BatfishSession,
    protocols: &[&str],
    soft: bool,
) -> Result<bool> {
    let mut ok = true;
    for protocol in protocols {
        let answer = match *protocol {
            "bgp" => bf.bgp_process_configuration("Router_ID")?,
            "ospf" => bf.ospf_process_configuration("Router_ID")?,
            p => return Err(Error::UnsupportedProtocol(p.to_string())),
        };
        let duplicates = duplicate_router_ids(&answer);
        if !duplicates.is_empty() {
            ok &= fail(
                format!("Found duplicate {} router IDs:\n{}", protocol, duplicates),
                soft,
            )?;
        }
    }
    Ok(ok)
}

/// Assert that all configured BGP sessions are compatible
pub fn assert_no_incompatible_bgp_sessions(bf: &BatfishSession, soft: bool) -> Result<bool> {
    let violators = incompatible_sessions(&bf.bgp_session_compatibility()?);
    if violators.is_empty() {
        Ok(true)
    } else {
        fail(
            format!("Found incompatible BGP sessions:\n{}", violators),
            soft,
        )
    }
}

/// Assert that all configured BGP sessions are established in the data plane
pub fn assert_no_unestablished_bgp_sessions(bf: &BatfishSession, soft: bool) -> Result<bool> {
    let violators = unestablished_sessions(&bf.bgp_session_status()?);
    if violators.is_empty() {
        Ok(true)
    } else {
        fail(
            format!("Found unestablished BGP sessions:\n{}", violators),
            soft,
        )
    }
}

/// Rows whose `Router_ID` is claimed by more than one row of the answer
fn duplicate_router_ids(answer: &Answer) -> Answer {
    let mut claims: HashMap<&str, usize> = HashMap::new();
    for row in &answer.rows {
        if let Some(id) = row.get_str("Router_ID") {
            *claims.entry(id).or_insert(0) += 1;
        }
    }
    answer.filter(|row| {
        row.get_str("Router_ID")
            .map(|id| claims.get(id).copied().unwrap_or(0) > 1)
            .unwrap_or(false)
    })
}

/// Rows whose `Configured_Status` is not one of the compatible statuses
fn incompatible_sessions(answer: &Answer) -> Answer {
    answer.filter(|row| {
        row.get_str("Configured_Status")
            .map(|s| !COMPATIBLE_BGP_STATUS.contains(&s))
            .unwrap_or(true)
    })
}

/// Rows whose `Established_Status` is not `ESTABLISHED`
fn unestablished_sessions(answer: &Answer) -> Answer {
    answer.filter(|row| row.get_str("Established_Status") != Some("ESTABLISHED"))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn answer(data: serde_json::Value) -> Answer {
        serde_json::from_value(data).unwrap()
    }

    #[test]
    fn num_results() {
        let a = answer(json!({
            "columns": [{"name": "File_Name"}],
            "rows": [{"File_Name": "configs/r11.cfg"}, {"File_Name": "configs/r12.cfg"}]
        }));
        assert!(assert_num_results(&a, 2, false).unwrap());
        // soft failures only warn
        assert_eq!(assert_num_results(&a, 5, true).unwrap(), false);
        // hard failures carry the expected count and the table
        match assert_num_results(&a, 5, false) {
            Err(Error::AssertFailed(msg)) => {
                assert!(msg.contains("Expecting 5 results, found 2"));
                assert!(msg.contains("configs/r11.cfg"));
            }
            r => panic!("Expected a hard failure, got {:?}", r),
        }
    }

    #[test]
    fn zero_results() {
        let empty = answer(json!({"columns": [{"name": "Node"}], "rows": []}));
        assert!(assert_zero_results(&empty, false).unwrap());
    }

    #[test]
    fn router_id_duplicates() {
        let a = answer(json!({
            "columns": [{"name": "Node"}, {"name": "Router_ID"}],
            "rows": [
                {"Node": "r11", "Router_ID": "10.0.0.1"},
                {"Node": "r12", "Router_ID": "10.0.0.1"},
                {"Node": "r21", "Router_ID": "10.0.0.3"}
            ]
        }));
        let duplicates = duplicate_router_ids(&a);
        assert_eq!(duplicates.len(), 2);
        assert_eq!(duplicates.rows[0].get_str("Node"), Some("r11"));
        assert_eq!(duplicates.rows[1].get_str("Node"), Some("r12"));
    }

    #[test]
    fn router_id_unique() {
        let a = answer(json!({
            "columns": [{"name": "Node"}, {"name": "Router_ID"}],
            "rows": [
                {"Node": "r11", "Router_ID": "10.0.0.1"},
                {"Node": "r12", "Router_ID": "10.0.0.2"}
            ]
        }));
        assert!(duplicate_router_ids(&a).is_empty());
    }

    #[test]
    fn compatible_sessions() {
        let a = answer(json!({
            "columns": [{"name": "Node"}, {"name": "Configured_Status"}],
            "rows": [
                {"Node": "r11", "Configured_Status": "UNIQUE_MATCH"},
                {"Node": "r12", "Configured_Status": "DYNAMIC_MATCH"},
                {"Node": "r21", "Configured_Status": "UNKNOWN_REMOTE"},
                {"Node": "r22", "Configured_Status": "HALF_OPEN"}
            ]
        }));
        let violators = incompatible_sessions(&a);
        assert_eq!(violators.len(), 1);
        assert_eq!(violators.rows[0].get_str("Node"), Some("r22"));
    }

    #[test]
    fn established_sessions() {
        let a = answer(json!({
            "columns": [{"name": "Node"}, {"name": "Established_Status"}],
            "rows": [
                {"Node": "r11", "Established_Status": "ESTABLISHED"},
                {"Node": "r12", "Established_Status": "NOT_ESTABLISHED"}
            ]
        }));
        let violators = unestablished_sessions(&a);
        assert_eq!(violators.len(), 1);
        assert_eq!(violators.rows[0].get_str("Node"), Some("r12"));
    }
}
