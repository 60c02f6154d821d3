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
//! Immutable summary indices over the forwarding behavior observed by the monitoring
//! controller. Built once from a JSON document, read-only afterwards.

use std::{collections::HashMap, fmt, str::FromStr};

use serde_json::Value;

use crate::{
    records::{LinkSummaryDoc, ParseError, ReachSummaryDoc},
    util::round_sig_figs,
    Flow,
};

/// Number of significant figures to which edge ranks are rounded on read.
pub const DEFAULT_SIGFIGS: i32 = 8;

/// A directed hop between two named routers, observed for a given flow.
///
/// Directed: `(A, B)` and `(B, A)` are different edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Metrics attached to an observed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMetrics {
    /// Confidence that the edge carries the flow's traffic.
    pub rank: f64,
    /// Observation history of the monitoring controller, passed through unmodified.
    pub history: Value,
}

#[derive(Debug, Clone, Default)]
struct FlowEdges {
    /// Edges in the order they were first parsed. Invariant: exactly the keys of `metrics`.
    order: Vec<Edge>,
    metrics: HashMap<Edge, EdgeMetrics>,
}

/// Index of all observed (flow, edge) pairs with their metrics.
///
/// Lookups are exact-match on the canonical network value of the flow: a queried flow must
/// appear verbatim as a summary key, or the query misses.
#[derive(Debug, Clone)]
pub struct ReachSummary {
    sigfigs: i32,
    flows: Vec<Flow>,
    edges: HashMap<Flow, FlowEdges>,
}

impl ReachSummary {
    /// Build the summary from a reachability summary document, rounding ranks to
    /// [`DEFAULT_SIGFIGS`] significant figures on read.
    pub fn from_json(summary_json: &str) -> Result<Self, ParseError> {
        Self::with_sigfigs(summary_json, DEFAULT_SIGFIGS)
    }

    /// Build the summary with a custom number of significant figures for rank lookups.
    pub fn with_sigfigs(summary_json: &str, sigfigs: i32) -> Result<Self, ParseError> {
        let doc: ReachSummaryDoc = serde_json::from_str(summary_json)?;
        let mut flows = Vec::with_capacity(doc.reach_summary.len());
        let mut edges: HashMap<Flow, FlowEdges> = HashMap::with_capacity(doc.reach_summary.len());

        for flow_record in doc.reach_summary {
            let flow = Flow::from_str(&flow_record.flow)
                .map_err(|e| ParseError::MalformedFlow(flow_record.flow.clone(), e))?;
            let flow_edges = edges.entry(flow).or_insert_with(|| {
                flows.push(flow);
                FlowEdges::default()
            });
            for edge_record in flow_record.edges {
                let edge = Edge::new(edge_record.source, edge_record.target);
                let metrics = EdgeMetrics {
                    rank: edge_record.rank_0,
                    history: edge_record.history,
                };
                // an edge appears at most once per flow; a duplicate replaces the metrics
                if flow_edges.metrics.insert(edge.clone(), metrics).is_none() {
                    flow_edges.order.push(edge);
                }
            }
        }

        log::debug!(
            "built reachability summary with {} flows and {} edges",
            flows.len(),
            edges.values().map(|e| e.order.len()).sum::<usize>()
        );
        Ok(Self {
            sigfigs,
            flows,
            edges,
        })
    }

    /// All summary flows, in the order they first appeared in the document.
    pub fn flows(&self) -> impl Iterator<Item = &Flow> + '_ {
        self.flows.iter()
    }

    /// All edges observed for the given flow with their metrics, in parse order. Empty if the
    /// flow is absent.
    pub fn edges(&self, flow: &Flow) -> impl Iterator<Item = (&Edge, &EdgeMetrics)> + '_ {
        self.edges
            .get(flow)
            .into_iter()
            .flat_map(|fe| fe.order.iter().map(move |e| (e, &fe.metrics[e])))
    }

    fn edge_metrics(&self, flow: &Flow, edge: &Edge) -> Option<&EdgeMetrics> {
        self.edges.get(flow).and_then(|fe| fe.metrics.get(edge))
    }

    /// The rank of the given edge, rounded to the configured significant figures, or `None` if
    /// the flow or the edge was never observed.
    pub fn edge_rank(&self, flow: &Flow, edge: &Edge) -> Option<f64> {
        self.edge_metrics(flow, edge)
            .map(|m| round_sig_figs(m.rank, self.sigfigs))
    }

    /// The observation history of the given edge, or `None` if the flow or the edge was never
    /// observed.
    pub fn edge_history(&self, flow: &Flow, edge: &Edge) -> Option<&Value> {
        self.edge_metrics(flow, edge).map(|m| &m.history)
    }

    /// Every (flow, edge) pair of the summary, in insertion order of flows, then edges.
    ///
    /// The iterator is lazy and can be restarted by calling this again.
    pub fn flow_edges(&self) -> impl Iterator<Item = (&Flow, &Edge)> + '_ {
        self.flows
            .iter()
            .flat_map(move |f| self.edges[f].order.iter().map(move |e| (f, e)))
    }
}

#[derive(Debug, Clone, Default)]
struct FlowLinks {
    targets: HashMap<String, Vec<String>>,
}

/// Adjacency view of the observed behavior: flow to source to observed next-hop targets.
///
/// A source may carry several targets for the same flow; all of them are retained, in
/// observation order.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    flows: Vec<Flow>,
    links: HashMap<Flow, FlowLinks>,
}

impl LinkSummary {
    /// Build the summary from a link summary document.
    pub fn from_json(summary_json: &str) -> Result<Self, ParseError> {
        let doc: LinkSummaryDoc = serde_json::from_str(summary_json)?;
        let mut flows = Vec::with_capacity(doc.flows.len());
        let mut links: HashMap<Flow, FlowLinks> = HashMap::with_capacity(doc.flows.len());

        for flow_record in doc.flows {
            let flow = Flow::from_str(&flow_record.flow)
                .map_err(|e| ParseError::MalformedFlow(flow_record.flow.clone(), e))?;
            let flow_links = links.entry(flow).or_insert_with(|| {
                flows.push(flow);
                FlowLinks::default()
            });
            for link in flow_record.links {
                flow_links
                    .targets
                    .entry(link.source)
                    .or_default()
                    .push(link.target);
            }
        }

        Ok(Self { flows, links })
    }

    /// All summary flows, in the order they first appeared in the document.
    pub fn flows(&self) -> impl Iterator<Item = &Flow> + '_ {
        self.flows.iter()
    }

    /// The next-hop targets observed for the given source, in observation order. Empty if the
    /// flow or the source is absent.
    pub fn targets(&self, flow: &Flow, source: &str) -> &[String] {
        self.links
            .get(flow)
            .and_then(|fl| fl.targets.get(source))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
