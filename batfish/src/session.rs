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

//! # Batfish Session

use crate::types::*;
use crate::{Error, Result};

use isahc::prelude::*;
use log::*;
use serde_json::{json, Map, Value};

use std::fs;
use std::path::Path;

/// # Batfish Session Handle
///
/// A session wraps the address of a running Batfish service, along with the network, the
/// snapshot and the question catalog selected so far. Questions can only be asked once the
/// network is set, the snapshot is initialized and the catalog is loaded.
#[derive(Debug, PartialEq, Clone)]
pub struct BatfishSession {
    address: String,
    version: String,
    network: Option<String>,
    snapshot: Option<String>,
    questions: Option<Vec<String>>,
}

impl BatfishSession {
    /// Create a new session by querying the version of the service
    pub fn connect(address: impl AsRef<str>, port: u32) -> Result<Self> {
        let address = format!("http://{}:{}", address.as_ref(), port);
        let version_addr = format!("{}/v2/version", address);
        let v: ResponseVersion = serde_json::from_str(&isahc::get(&version_addr)?.text()?)?;
        Ok(Self {
            address,
            version: v.version,
            network: None,
            snapshot: None,
            questions: None,
        })
    }

    /// Get the version of the service
    pub fn version(&self) -> &str {
        self.version.as_ref()
    }

    /// Select the network to work on, creating it on the service if it does not yet exist
    pub fn set_network(&mut self, name: impl AsRef<str>) -> Result<()> {
        let networks: Vec<Network> = serde_json::from_str(&self.request_get("networks")?)?;
        if networks.iter().all(|n| n.name != name.as_ref()) {
            debug!("Creating network {}", name.as_ref());
            self.request_post("networks", json!({ "name": name.as_ref() }).to_string())?;
        }
        self.network = Some(name.as_ref().to_string());
        Ok(())
    }

    /// Initialize a snapshot by uploading all files found in `dir` (recursively, with their
    /// paths relative to `dir`), and select it for the questions to come.
    pub fn init_snapshot(
        &mut self,
        dir: impl AsRef<Path>,
        name: impl AsRef<str>,
        overwrite: bool,
    ) -> Result<Snapshot> {
        let network = self.network.clone().ok_or(Error::NoNetworkSet)?;
        let mut files: Map<String, Value> = Map::new();
        collect_files(dir.as_ref(), "", &mut files)?;
        debug!(
            "Uploading {} files as snapshot {}",
            files.len(),
            name.as_ref()
        );
        let snapshot: Snapshot = serde_json::from_str(&self.request_post(
            format!(
                "networks/{}/snapshots?name={}&overwrite={}",
                network,
                name.as_ref(),
                overwrite
            ),
            json!({ "files": files }).to_string(),
        )?)?;
        self.snapshot = Some(snapshot.name.clone());
        Ok(snapshot)
    }

    /// Load the question catalog of the service, and return the number of available questions
    pub fn load_questions(&mut self) -> Result<usize> {
        let questions: Vec<QuestionInfo> = serde_json::from_str(&self.request_get("questions")?)?;
        let names: Vec<String> = questions.into_iter().map(|q| q.name).collect();
        debug!("Loaded {} questions", names.len());
        let num = names.len();
        self.questions = Some(names);
        Ok(num)
    }

    /// Ask a question from the loaded catalog with the given parameters, and return the
    /// tabular answer.
    pub fn run_question(&self, name: impl AsRef<str>, parameters: Value) -> Result<Answer> {
        let network = self.network.as_ref().ok_or(Error::NoNetworkSet)?;
        let snapshot = self.snapshot.as_ref().ok_or(Error::NoSnapshotSet)?;
        let questions = self.questions.as_ref().ok_or(Error::QuestionsNotLoaded)?;
        if !questions.iter().any(|q| q == name.as_ref()) {
            return Err(Error::UnknownQuestion(name.as_ref().to_string()));
        }
        debug!("Asking question {}", name.as_ref());
        Ok(serde_json::from_str(&self.request_post(
            format!("networks/{}/snapshots/{}/answer", network, snapshot),
            json!({ "question": name.as_ref(), "parameters": parameters }).to_string(),
        )?)?)
    }

    /// Parse status of every file in the snapshot, one row per file
    pub fn file_parse_status(&self) -> Result<Answer> {
        self.run_question("fileParseStatus", json!({}))
    }

    /// Issues encountered while initializing the snapshot, one row per issue
    pub fn init_issues(&self) -> Result<Answer> {
        self.run_question("initIssues", json!({}))
    }

    /// Properties of the selected nodes. Both `nodes` and `properties` use the Batfish
    /// specifier grammar, where an empty string selects everything.
    pub fn node_properties(
        &self,
        nodes: impl AsRef<str>,
        properties: impl AsRef<str>,
    ) -> Result<Answer> {
        self.run_question(
            "nodeProperties",
            json!({
                "nodes": nodes.as_ref(),
                "properties": properties.as_ref(),
            }),
        )
    }

    /// Properties of the selected interfaces, optionally excluding interfaces that are
    /// administratively shut down.
    pub fn interface_properties(
        &self,
        interfaces: impl AsRef<str>,
        properties: impl AsRef<str>,
        exclude_shut_interfaces: bool,
    ) -> Result<Answer> {
        self.run_question(
            "interfaceProperties",
            json!({
                "interfaces": interfaces.as_ref(),
                "properties": properties.as_ref(),
                "excludeShutInterfaces": exclude_shut_interfaces,
            }),
        )
    }

    /// References to undefined configuration structures, one row per reference
    pub fn undefined_references(&self) -> Result<Answer> {
        self.run_question("undefinedReferences", json!({}))
    }

    /// Configuration of all BGP processes, restricted to the given properties
    pub fn bgp_process_configuration(&self, properties: impl AsRef<str>) -> Result<Answer> {
        self.run_question(
            "bgpProcessConfiguration",
            json!({ "properties": properties.as_ref() }),
        )
    }

    /// Configuration of all OSPF processes, restricted to the given properties
    pub fn ospf_process_configuration(&self, properties: impl AsRef<str>) -> Result<Answer> {
        self.run_question(
            "ospfProcessConfiguration",
            json!({ "properties": properties.as_ref() }),
        )
    }

    /// Compatibility of all configured BGP sessions, one row per session
    pub fn bgp_session_compatibility(&self) -> Result<Answer> {
        self.run_question("bgpSessionCompatibility", json!({}))
    }

    /// Status of all configured BGP sessions in the data plane, one row per session
    pub fn bgp_session_status(&self) -> Result<Answer> {
        self.run_question("bgpSessionStatus", json!({}))
    }

    fn request_get(&self, key: impl AsRef<str>) -> Result<String> {
        let addr = format!("{}/v2/{}", self.address, key.as_ref());
        self.handle_response(isahc::get(&addr)?)
    }

    fn request_post(&self, key: impl AsRef<str>, data: String) -> Result<String> {
        let addr = format!("{}/v2/{}", self.address, key.as_ref());
        self.handle_response(isahc::post(&addr, data)?)
    }

    fn handle_response(&self, mut response: Response<Body>) -> Result<String> {
        let status = response.status();
        if status.is_success() {
            Ok(response.text()?)
        } else {
            Err(Error::ResponseError(status.as_u16(), response.text()?))
        }
    }
}

/// Recursively collect all files below `dir` into the map, keyed by their path relative to
/// the starting directory.
fn collect_files(dir: &Path, prefix: &str, files: &mut Map<String, Value>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let key = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, &key, files)?;
        } else {
            files.insert(key, Value::String(fs::read_to_string(&path)?));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn offline_session() -> BatfishSession {
        BatfishSession {
            address: String::from("http://localhost:9996"),
            version: String::from("test"),
            network: None,
            snapshot: None,
            questions: None,
        }
    }

    #[test]
    fn connect_service() {
        // skip the test if no service is running on localhost
        let bf = match BatfishSession::connect("localhost", 9996) {
            Ok(s) => s,
            Err(_) => return,
        };
        assert!(!bf.version().is_empty());
    }

    #[test]
    fn question_requires_setup() {
        let mut bf = offline_session();
        assert!(matches!(bf.file_parse_status(), Err(Error::NoNetworkSet)));
        bf.network = Some(String::from("NET"));
        assert!(matches!(bf.file_parse_status(), Err(Error::NoSnapshotSet)));
        bf.snapshot = Some(String::from("snap"));
        assert!(matches!(
            bf.file_parse_status(),
            Err(Error::QuestionsNotLoaded)
        ));
    }

    #[test]
    fn question_must_be_in_catalog() {
        let mut bf = offline_session();
        bf.network = Some(String::from("NET"));
        bf.snapshot = Some(String::from("snap"));
        bf.questions = Some(vec![String::from("initIssues")]);
        match bf.file_parse_status() {
            Err(Error::UnknownQuestion(q)) => assert_eq!(q, "fileParseStatus"),
            r => panic!("Expected an unknown question error, got {:?}", r),
        }
    }

    #[test]
    fn snapshot_requires_network() {
        let mut bf = offline_session();
        assert!(matches!(
            bf.init_snapshot("lab", "lab1", true),
            Err(Error::NoNetworkSet)
        ));
    }
}
