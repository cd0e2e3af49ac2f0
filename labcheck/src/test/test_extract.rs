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

use crate::checks::{self, clock, snmp, syslog};
use crate::extract::{Extractor, Field, Grammar, Pattern, Schema, Token};
use crate::CheckError;

use std::path::PathBuf;

fn lab_files(name: &str) -> Vec<PathBuf> {
    checks::config_files(format!("{}/test_files/{}", env!("CARGO_MANIFEST_DIR"), name)).unwrap()
}

#[test]
fn defaults_on_empty_text() {
    let record = snmp::extractor().record("r11", "");
    assert_eq!(record.node(), "r11");
    assert_eq!(record.scalar("Location"), "");
    assert_eq!(record.scalar("Contact"), "");
    assert!(record.list("Read").is_empty());
    assert!(record.list("Write").is_empty());
}

#[test]
fn repeated_fields_append_in_line_order() {
    let text = "logging host 10.1.155.100\nlogging host 10.1.155.200\n";
    let record = syslog::extractor().record("r21", text);
    assert_eq!(record.list("Host"), ["10.1.155.100", "10.1.155.200"]);
}

#[test]
fn scalar_fields_keep_last_value() {
    let text = "snmp-server location Old Lab\nsnmp-server location INWK Lab Pod 2\n";
    let record = snmp::extractor().record("r23", text);
    assert_eq!(record.scalar("Location"), "INWK Lab Pod 2");
}

#[test]
fn read_and_write_communities_are_separated() {
    let text = "snmp-server community dcread RO\n\
                snmp-server community dcwrite RW\n\
                snmp-server community public RO\n";
    let record = snmp::extractor().record("r11", text);
    assert_eq!(record.list("Read"), ["dcread", "public"]);
    assert_eq!(record.list("Write"), ["dcwrite"]);
}

#[test]
fn custom_extractor_with_mixed_fields() {
    let extractor = Extractor::new(
        Schema::new(vec![Field::repeated("Server"), Field::scalar("Source")]),
        Grammar::new(vec![
            Pattern::new("ntp", vec![Token::Keyword("server"), Token::Word("Server")]),
            Pattern::new("ntp", vec![Token::Keyword("source"), Token::Word("Source")]),
        ]),
    );
    let text = "ntp server 10.1.155.100\n\
                ntp source Loopback0\n\
                ntp server 10.1.155.101\n";
    let record = extractor.record("r11", text);
    assert_eq!(record.list("Server"), ["10.1.155.100", "10.1.155.101"]);
    assert_eq!(record.scalar("Source"), "Loopback0");
}

#[test]
fn device_names_are_file_stems_in_file_order() {
    let table = snmp::extractor().table(&lab_files("lab_ok")).unwrap();
    let nodes: Vec<&str> = table.rows().map(|r| r.node()).collect();
    assert_eq!(nodes, vec!["r11", "r12", "r21", "r22", "r23"]);
}

#[test]
fn extraction_is_deterministic() {
    let files = lab_files("lab_ok");
    let first = clock::extractor().table(&files).unwrap().to_string();
    let second = clock::extractor().table(&files).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn unreadable_file_reports_path() {
    let files = vec![PathBuf::from("does/not/exist.cfg")];
    match snmp::extractor().table(&files) {
        Err(CheckError::Read { path, .. }) => {
            assert_eq!(path, PathBuf::from("does/not/exist.cfg"))
        }
        r => panic!("Expected a read error, got {:?}", r),
    }
}

#[test]
fn table_display_has_one_line_per_device() {
    let table = snmp::extractor().table(&lab_files("lab_ok")).unwrap();
    let rendered = table.to_string();
    let header = rendered.lines().next().unwrap();
    assert!(header.starts_with("Node"));
    assert!(header.contains("Read"));
    assert!(header.contains("Location"));
    assert_eq!(rendered.lines().count(), 6);
}

#[test]
fn json_export() {
    let table = syslog::extractor().table(&lab_files("lab_ok")).unwrap();
    let data = table.json();
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["Node"], "r11");
    // r21 logs to a second server on top of the required one
    assert_eq!(
        rows[2]["Host"],
        serde_json::json!(["10.1.155.100", "10.1.155.200"])
    );
}
