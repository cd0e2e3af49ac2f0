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

//! Structural checks of the snapshot, delegated to a Batfish service

use batfish::{
    assert_no_duplicate_router_ids, assert_no_incompatible_bgp_sessions,
    assert_no_undefined_references, assert_no_unestablished_bgp_sessions, assert_num_results,
    assert_zero_results, BatfishSession,
};
use labcheck::report::Reporter;

use log::*;

use std::collections::HashSet;
use std::env;
use std::error::Error;

/// Environment variable naming the host of the Batfish service
const BATFISH_SERVER_VAR: &str = "BATFISH_SERVER";
/// Name under which the lab network is registered on the service
const NETWORK_NAME: &str = "DESIGN_LAB1";
/// Name of the uploaded snapshot
const SNAPSHOT_NAME: &str = "lab1";
/// Number of configuration files expected in the snapshot
const NUM_FILES: usize = 5;
/// Domain name that every device must be configured with
const DOMAIN_NAME: &str = "inwk.local";
/// Hostnames expected in the lab
const ROUTERS: [&str; 5] = ["r11", "r12", "r21", "r22", "r23"];
/// NTP servers, of which every device must use at least one
const NTP_SERVERS: [&str; 1] = ["10.1.155.100"];

/// Upload the snapshot in `snapshot_dir` to the Batfish service and run all structural
/// checks on it. The host of the service is taken from the `BATFISH_SERVER` environment
/// variable.
pub fn run(
    snapshot_dir: &str,
    port: u32,
    reporter: &mut impl Reporter,
) -> Result<(), Box<dyn Error>> {
    let host = match env::var(BATFISH_SERVER_VAR) {
        Ok(host) => host,
        Err(_) => {
            return Err(format!(
                "Environment variable '{}' is not defined!",
                BATFISH_SERVER_VAR
            )
            .into())
        }
    };

    let mut bf = BatfishSession::connect(&host, port)?;
    debug!("Connected to Batfish {} on {}", bf.version(), host);
    bf.set_network(NETWORK_NAME)?;
    bf.init_snapshot(snapshot_dir, SNAPSHOT_NAME, true)?;
    bf.load_questions()?;

    check_num_configs(&bf, NUM_FILES, reporter)?;
    check_init_issues(&bf, reporter)?;
    check_clean_parsing(&bf, reporter)?;
    check_host_properties(
        &bf,
        DOMAIN_NAME,
        &ROUTERS.iter().map(|r| r.to_string()).collect(),
        &NTP_SERVERS.iter().map(|s| s.to_string()).collect(),
        reporter,
    )?;
    check_shut_interfaces(&bf, reporter)?;
    check_undefined_references(&bf, reporter)?;
    check_duplicate_router_ids(&bf, reporter)?;
    check_bgp_compatibility(&bf, reporter)?;
    check_bgp_unestablished(&bf, reporter)?;

    reporter.rule("✓ All checks passed ✓");
    Ok(())
}

/// Check that the snapshot contains exactly `num` configuration files
fn check_num_configs(
    bf: &BatfishSession,
    num: usize,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking number of config files");
    let answer = bf.file_parse_status()?;
    assert_num_results(&answer, num, false)?;
    Ok(())
}

/// Report issues encountered while initializing the snapshot. Issues are expected for
/// unsupported configuration features, so this check only warns.
fn check_init_issues(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking for init issues");
    let answer = bf.init_issues()?;
    assert_zero_results(&answer, true)?;
    Ok(())
}

/// Report configuration files that did not parse cleanly
fn check_clean_parsing(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking for clean parsing");
    let answer = bf.file_parse_status()?;
    let violators = answer.filter(|row| row.get_str("Status") != Some("PASSED"));
    assert_zero_results(&violators, true)?;
    Ok(())
}

/// Check the hostname, the domain name and the NTP servers of every device
fn check_host_properties(
    bf: &BatfishSession,
    domain: &str,
    hosts: &HashSet<String>,
    ntp_servers: &HashSet<String>,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking host properties");
    let props = bf.node_properties("", "Hostname, Domain_Name, NTP_Servers")?;
    let violators = props.filter(|row| {
        row.get_str("Hostname")
            .map(|h| !hosts.contains(h))
            .unwrap_or(true)
    });
    assert_zero_results(&violators, false)?;
    let violators = props.filter(|row| row.get_str("Domain_Name") != Some(domain));
    assert_zero_results(&violators, false)?;
    let violators = props.filter(|row| {
        !row.get_str_list("NTP_Servers")
            .iter()
            .any(|s| ntp_servers.contains(*s))
    });
    assert_zero_results(&violators, false)?;
    Ok(())
}

/// Report shut interfaces that are expected to be active
fn check_shut_interfaces(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking for shut interfaces");
    let violators = bf.interface_properties("/GigabitEthernet[23]/", "Active", true)?;
    assert_zero_results(&violators, true)?;
    Ok(())
}

/// Check that the configurations contain no references to undefined structures
fn check_undefined_references(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking for undefined references");
    assert_no_undefined_references(bf, false)?;
    Ok(())
}

/// Check that no two BGP processes share the same router ID
fn check_duplicate_router_ids(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking for duplicate router IDs");
    assert_no_duplicate_router_ids(bf, &["bgp"], false)?;
    Ok(())
}

/// Check that all configured BGP sessions are compatible
fn check_bgp_compatibility(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking BGP session compatibility");
    assert_no_incompatible_bgp_sessions(bf, false)?;
    Ok(())
}

/// Check that all configured BGP sessions are established in the data plane
fn check_bgp_unestablished(
    bf: &BatfishSession,
    reporter: &mut impl Reporter,
) -> Result<(), batfish::Error> {
    reporter.rule("Checking BGP session establishment");
    assert_no_unestablished_bgp_sessions(bf, false)?;
    Ok(())
}
