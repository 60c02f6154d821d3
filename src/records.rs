// NERVE: Verification of Reachability and Path-Preference Intents from Network Summaries
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Module defining record data types to deserialize the monitoring input documents.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
/// Reachability summary document as emitted by the monitoring controller.
pub struct ReachSummaryDoc {
    #[serde(rename = "reach-summary")]
    pub reach_summary: Vec<FlowEdgesRecord>,
}

#[derive(Debug, Deserialize)]
/// All edges observed for a single flow.
pub struct FlowEdgesRecord {
    pub flow: String,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
/// A single observed edge together with its metrics.
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "rank-0")]
    pub rank_0: f64,
    #[serde(default)]
    pub history: serde_json::Value,
}

#[derive(Debug, Deserialize)]
/// Link summary document, an adjacency view of the same observations.
pub struct LinkSummaryDoc {
    pub flows: Vec<FlowLinksRecord>,
}

#[derive(Debug, Deserialize)]
/// All links observed for a single flow.
pub struct FlowLinksRecord {
    pub flow: String,
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Deserialize)]
/// Policy document holding the declared intents.
pub struct PolicyDoc {
    pub policies: Vec<PolicyRecord>,
}

#[derive(Debug, Deserialize)]
/// A single policy record, before its kind discriminator is interpreted.
///
/// The per-kind fields stay optional here; `parse_policies` decides which ones are required
/// once the discriminator is known.
pub struct PolicyRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub flow: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub paths: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Deserialize)]
/// Router identity document mapping interface addresses to router names.
pub struct RdnsDoc {
    pub routers: Vec<RouterRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RouterRecord {
    pub name: String,
    pub ifaces: Vec<String>,
}

/// Error type thrown while parsing any of the input documents.
///
/// Lookup misses are not errors; they surface as empty views or the violated sentinel during
/// evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A structurally malformed document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// A flow string that does not denote a valid IP network. Fatal for the whole document.
    #[error("invalid flow prefix {0:?}: {1}")]
    MalformedFlow(String, #[source] ipnet::AddrParseError),
    /// An interface string that does not denote a valid IP address.
    #[error("invalid interface address {0:?}: {1}")]
    MalformedAddr(String, #[source] std::net::AddrParseError),
    /// A recognized policy record that lacks one of its required fields.
    #[error("policy record is missing the `{0}` field")]
    MissingField(&'static str),
    /// A path-preference policy declaring a path with no nodes.
    #[error("path-preference policy declares an empty path")]
    EmptyPath,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_summary_doc() {
        let doc: ReachSummaryDoc = serde_json::from_str(
            r#"{"reach-summary": [
                {"flow": "10.0.0.0/24", "edges": [
                    {"source": "R1", "target": "R2", "rank-0": 0.5, "history": [1, 0, 1]}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.reach_summary.len(), 1);
        assert_eq!(doc.reach_summary[0].edges[0].source, "R1");
        assert_eq!(doc.reach_summary[0].edges[0].rank_0, 0.5);
    }

    #[test]
    fn deserialize_policy_record_ignores_kind() {
        // records with an unknown kind must still deserialize; skipping happens later
        let doc: PolicyDoc = serde_json::from_str(
            r#"{"policies": [{"type": "latency-bound", "flow": "10.0.0.0/24", "bound": 3}]}"#,
        )
        .unwrap();
        assert_eq!(doc.policies[0].kind, "latency-bound");
        assert!(doc.policies[0].source.is_none());
    }
}
