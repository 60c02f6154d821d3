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
//! The closed set of policy variants and the derivations between them.

use std::fmt;

use itertools::Itertools;

use crate::{summary::Edge, Flow};

/// Kind discriminator used in policy documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum_macros::EnumString,
)]
pub enum PolicyKind {
    #[strum(serialize = "reachability")]
    Reachability,
    #[strum(serialize = "path-preference")]
    PathPreference,
}

/// A single declared intent, tagged by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Policy {
    /// A directed source/target pair that must be observed reachable for a flow.
    Reachability(ReachabilityPolicy),
    /// An ordered list of acceptable end-to-end paths for a flow, most preferred first.
    PathPreference(PathPreferencePolicy),
}

impl Policy {
    /// The flow this policy applies to.
    pub fn flow(&self) -> Flow {
        match self {
            Self::Reachability(p) => p.flow,
            Self::PathPreference(p) => p.flow,
        }
    }

    /// The kind discriminator of this policy.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Reachability(_) => PolicyKind::Reachability,
            Self::PathPreference(_) => PolicyKind::PathPreference,
        }
    }
}

/// Intent that a specific directed source/target pair is observed reachable for a flow.
///
/// Ordered by flow, then source, then target, so policy reports can be emitted
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReachabilityPolicy {
    pub flow: Flow,
    pub source: String,
    pub target: String,
}

impl ReachabilityPolicy {
    pub fn new(flow: Flow, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            flow,
            source: source.into(),
            target: target.into(),
        }
    }

    /// The directed edge this policy requires in a summary.
    pub fn edge(&self) -> Edge {
        Edge::new(self.source.as_str(), self.target.as_str())
    }
}

impl fmt::Display for ReachabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}->{}", self.flow, self.source, self.target)
    }
}

/// Intent that traffic for a flow follows one of the declared end-to-end paths, most preferred
/// first. Every path holds at least one node.
///
/// The evaluator cannot check a whole-route intent against a per-edge summary directly;
/// [`PathPreferencePolicy::implied_reachability`] reduces it to checkable pairwise
/// obligations, losing the preference order.
#[derive(Debug, Clone)]
pub struct PathPreferencePolicy {
    pub flow: Flow,
    pub paths: Vec<Vec<String>>,
}

impl PathPreferencePolicy {
    /// Collapse to the end-to-end pair of the most preferred path.
    pub fn to_reachability(&self) -> ReachabilityPolicy {
        let first = &self.paths[0];
        ReachabilityPolicy::new(
            self.flow,
            first[0].as_str(),
            first[first.len() - 1].as_str(),
        )
    }

    /// Routers that appear in every declared path, in the order of the most preferred path.
    pub fn waypoints(&self) -> Vec<&String> {
        let mut waypoints = Vec::new();
        for node in &self.paths[0] {
            if !waypoints.contains(&node) && self.paths.iter().all(|p| p.contains(node)) {
                waypoints.push(node);
            }
        }
        waypoints
    }

    /// Expand into the pairwise reachability obligations implied by the declared paths.
    ///
    /// Without `waypoints_only`, every ordered forward pair within each path is emitted (not
    /// just adjacent hops, never across paths). Pairs repeated by several paths stay repeated.
    ///
    /// With `waypoints_only`, every router common to all declared paths yields the pair from
    /// the most preferred path's source to the waypoint and from the waypoint to its sink.
    /// Degenerate self-pairs at the endpoints are kept. With a single declared path, every one
    /// of its nodes is a waypoint.
    pub fn implied_reachability(&self, waypoints_only: bool) -> Vec<ReachabilityPolicy> {
        if waypoints_only {
            let first = &self.paths[0];
            let (source, sink) = (&first[0], &first[first.len() - 1]);
            let waypoints = self.waypoints();
            waypoints
                .iter()
                .map(|w| ReachabilityPolicy::new(self.flow, source.as_str(), w.as_str()))
                .chain(
                    waypoints
                        .iter()
                        .map(|w| ReachabilityPolicy::new(self.flow, w.as_str(), sink.as_str())),
                )
                .collect()
        } else {
            self.paths
                .iter()
                .flat_map(|path| {
                    path.iter().tuple_combinations::<(_, _)>().map(|(n, m)| {
                        ReachabilityPolicy::new(self.flow, n.as_str(), m.as_str())
                    })
                })
                .collect()
        }
    }
}

/// Paths compare as a set: listing order and repetition of whole paths are irrelevant, the
/// node order within each path is not.
impl PartialEq for PathPreferencePolicy {
    fn eq(&self, other: &Self) -> bool {
        self.flow == other.flow
            && self.paths.iter().all(|p| other.paths.contains(p))
            && other.paths.iter().all(|p| self.paths.contains(p))
    }
}

impl fmt::Display for PathPreferencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.flow,
            self.paths.iter().map(|p| p.iter().join("->")).join(" > ")
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn flow() -> Flow {
        "10.0.0.0/24".parse().unwrap()
    }

    fn path(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    fn pairs(policies: &[ReachabilityPolicy]) -> Vec<(String, String)> {
        policies
            .iter()
            .map(|p| (p.source.clone(), p.target.clone()))
            .collect()
    }

    #[test]
    fn reachability_ordering() {
        let a = ReachabilityPolicy::new(flow(), "R1", "R2");
        let b = ReachabilityPolicy::new(flow(), "R1", "R3");
        let c = ReachabilityPolicy::new(flow(), "R2", "R1");
        let d = ReachabilityPolicy::new("10.0.1.0/24".parse().unwrap(), "A", "A");
        assert!(a < b && b < c && c < d);
        assert_eq!(a.to_string(), "10.0.0.0/24 R1->R2");
    }

    #[test]
    fn collapse_to_most_preferred_pair() {
        let policy = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "B", "C"]), path(&["A", "X", "Y", "C"])],
        };
        assert_eq!(
            policy.to_reachability(),
            ReachabilityPolicy::new(flow(), "A", "C")
        );
    }

    #[test]
    fn implied_all_forward_pairs() {
        let policy = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "B", "C"])],
        };
        assert_eq!(
            pairs(&policy.implied_reachability(false)),
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn implied_pairs_not_deduplicated_across_paths() {
        let policy = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "B"]), path(&["A", "B"])],
        };
        assert_eq!(policy.implied_reachability(false).len(), 2);
    }

    #[test]
    fn implied_waypoints() {
        let policy = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "B", "C"]), path(&["A", "X", "C"])],
        };
        assert_eq!(policy.waypoints(), [&"A".to_string(), &"C".to_string()]);
        // for each waypoint: source->w, then for each waypoint: w->sink, self-pairs kept
        assert_eq!(
            pairs(&policy.implied_reachability(true)),
            vec![
                ("A".to_string(), "A".to_string()),
                ("A".to_string(), "C".to_string()),
                ("A".to_string(), "C".to_string()),
                ("C".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn single_path_degenerates_to_per_node_splits() {
        let policy = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "B", "C"])],
        };
        assert_eq!(
            pairs(&policy.implied_reachability(true)),
            vec![
                ("A".to_string(), "A".to_string()),
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
                ("C".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn path_set_equality() {
        let a = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "B", "C"]), path(&["A", "X", "C"])],
        };
        let b = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["A", "X", "C"]), path(&["A", "B", "C"])],
        };
        assert_eq!(a, b);

        let extra = PathPreferencePolicy {
            flow: flow(),
            paths: vec![
                path(&["A", "B", "C"]),
                path(&["A", "X", "C"]),
                path(&["A", "Y", "C"]),
            ],
        };
        assert_ne!(a, extra);

        let reordered_nodes = PathPreferencePolicy {
            flow: flow(),
            paths: vec![path(&["C", "B", "A"]), path(&["A", "X", "C"])],
        };
        assert_ne!(a, reordered_nodes);

        let other_flow = PathPreferencePolicy {
            flow: "10.0.1.0/24".parse().unwrap(),
            paths: a.paths.clone(),
        };
        assert_ne!(a, other_flow);
    }
}
