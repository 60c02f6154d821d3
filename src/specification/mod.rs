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
//! Parsing declared intents and evaluating them against a reachability summary.

use std::str::FromStr;

use rayon::prelude::*;

use crate::{
    records::{ParseError, PolicyDoc},
    summary::ReachSummary,
    Flow,
};

mod policy;

pub use policy::{PathPreferencePolicy, Policy, PolicyKind, ReachabilityPolicy};

/// Rank reported for a policy whose flow or edge is absent from the summary. Out of the valid
/// rank domain `[0, 1]`.
pub const VIOLATED: f64 = -1.0;

/// Convert a policy document into a list of typed policies, in document order.
///
/// Records with an unrecognized kind discriminator are skipped, so newer policy kinds do not
/// abort the batch. A flow that fails to parse, or a recognized record lacking its required
/// fields, aborts the whole document.
pub fn parse_policies(policies_json: &str) -> Result<Vec<Policy>, ParseError> {
    let doc: PolicyDoc = serde_json::from_str(policies_json)?;
    let mut policies = Vec::with_capacity(doc.policies.len());

    for record in doc.policies {
        let Ok(kind) = PolicyKind::from_str(&record.kind) else {
            log::warn!("skipping policy record with unknown type {:?}", record.kind);
            continue;
        };
        let flow = Flow::from_str(&record.flow)
            .map_err(|e| ParseError::MalformedFlow(record.flow.clone(), e))?;

        policies.push(match kind {
            PolicyKind::Reachability => {
                let source = record.source.ok_or(ParseError::MissingField("source"))?;
                let target = record.target.ok_or(ParseError::MissingField("target"))?;
                Policy::Reachability(ReachabilityPolicy {
                    flow,
                    source,
                    target,
                })
            }
            PolicyKind::PathPreference => {
                let paths = record
                    .paths
                    .filter(|paths| !paths.is_empty())
                    .ok_or(ParseError::MissingField("paths"))?;
                if paths.iter().any(|path| path.is_empty()) {
                    return Err(ParseError::EmptyPath);
                }
                Policy::PathPreference(PathPreferencePolicy { flow, paths })
            }
        });
    }

    Ok(policies)
}

/// Check a reachability policy against the summary.
///
/// Returns the rank of the policy's edge, or [`VIOLATED`] if the flow or the exact directed
/// edge was never observed. Both the flow and the edge endpoints must match exactly.
pub fn evaluate(policy: &ReachabilityPolicy, summary: &ReachSummary) -> f64 {
    summary
        .edge_rank(&policy.flow, &policy.edge())
        .unwrap_or(VIOLATED)
}

/// Evaluate a batch of policies against the summary, fanned out over the rayon thread pool.
///
/// Path-preference policies are first expanded to their implied reachability policies (all
/// forward pairs, or the waypoint form with `waypoints_only`). The result holds one entry per
/// reachability obligation, in expansion order; a miss never aborts the batch.
pub fn evaluate_all(
    policies: &[Policy],
    summary: &ReachSummary,
    waypoints_only: bool,
) -> Vec<(ReachabilityPolicy, f64)> {
    let expanded = policies
        .iter()
        .flat_map(|policy| match policy {
            Policy::Reachability(p) => vec![p.clone()],
            Policy::PathPreference(p) => p.implied_reachability(waypoints_only),
        })
        .collect::<Vec<_>>();

    expanded
        .into_par_iter()
        .map(|policy| {
            let rank = evaluate(&policy, summary);
            log::trace!("{policy} evaluated to {rank}");
            (policy, rank)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::summary::Edge;

    const SUMMARY: &str = r#"{"reach-summary": [
        {"flow": "10.0.0.0/24", "edges": [
            {"source": "R1", "target": "R2", "rank-0": 0.87654321, "history": null},
            {"source": "R2", "target": "R3", "rank-0": 0.25, "history": null}
        ]}
    ]}"#;

    #[test]
    fn evaluate_hit_and_miss() {
        let summary = ReachSummary::from_json(SUMMARY).unwrap();
        let flow: Flow = "10.0.0.0/24".parse().unwrap();

        let hit = ReachabilityPolicy::new(flow, "R1", "R2");
        assert_eq!(evaluate(&hit, &summary), 0.87654321);

        // reversed edge direction is a different edge
        let reversed = ReachabilityPolicy::new(flow, "R2", "R1");
        assert_eq!(evaluate(&reversed, &summary), VIOLATED);

        let absent_flow: Flow = "10.0.1.0/24".parse().unwrap();
        let miss = ReachabilityPolicy::new(absent_flow, "R1", "R2");
        assert_eq!(evaluate(&miss, &summary), VIOLATED);
    }

    #[test]
    fn parse_in_document_order() {
        let policies = parse_policies(
            r#"{"policies": [
                {"type": "reachability", "flow": "10.0.0.0/24", "source": "R1", "target": "R2"},
                {"type": "path-preference", "flow": "10.0.0.0/24",
                 "paths": [["R1", "R2", "R3"], ["R1", "R4", "R3"]]},
                {"type": "reachability", "flow": "10.0.1.0/24", "source": "R2", "target": "R3"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(policies.len(), 3);
        assert_eq!(policies[0].kind(), PolicyKind::Reachability);
        assert_eq!(policies[1].kind(), PolicyKind::PathPreference);
        assert_eq!(policies[2].flow(), "10.0.1.0/24".parse().unwrap());
    }

    #[test]
    fn unknown_kinds_are_skipped() {
        let policies = parse_policies(
            r#"{"policies": [
                {"type": "reachability", "flow": "10.0.0.0/24", "source": "R1", "target": "R2"},
                {"type": "isolation", "flow": "10.0.0.0/24", "zones": ["a", "b"]},
                {"type": "reachability", "flow": "10.0.0.0/24", "source": "R2", "target": "R3"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(policies.len(), 2);
        assert!(policies
            .iter()
            .all(|p| p.kind() == PolicyKind::Reachability));
    }

    #[test]
    fn malformed_flow_aborts_the_parse() {
        let result = parse_policies(
            r#"{"policies": [
                {"type": "reachability", "flow": "10.0.0.0/24", "source": "R1", "target": "R2"},
                {"type": "reachability", "flow": "300.0.0.0/24", "source": "R1", "target": "R2"}
            ]}"#,
        );
        assert!(matches!(result, Err(ParseError::MalformedFlow(_, _))));
    }

    #[test]
    fn missing_fields_abort_the_parse() {
        let result = parse_policies(
            r#"{"policies": [{"type": "reachability", "flow": "10.0.0.0/24", "source": "R1"}]}"#,
        );
        assert!(matches!(result, Err(ParseError::MissingField("target"))));

        let result = parse_policies(
            r#"{"policies": [{"type": "path-preference", "flow": "10.0.0.0/24", "paths": []}]}"#,
        );
        assert!(matches!(result, Err(ParseError::MissingField("paths"))));
    }

    #[test]
    fn evaluate_all_expands_path_preferences() {
        let summary = ReachSummary::from_json(SUMMARY).unwrap();
        let policies = parse_policies(
            r#"{"policies": [
                {"type": "path-preference", "flow": "10.0.0.0/24",
                 "paths": [["R1", "R2", "R3"]]},
                {"type": "reachability", "flow": "10.0.0.0/24", "source": "R3", "target": "R1"}
            ]}"#,
        )
        .unwrap();

        let report = evaluate_all(&policies, &summary, false);
        let lines = report
            .iter()
            .map(|(p, rank)| format!("{p} {rank}"))
            .collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "10.0.0.0/24 R1->R2 0.87654321",
                "10.0.0.0/24 R1->R3 -1",
                "10.0.0.0/24 R2->R3 0.25",
                "10.0.0.0/24 R3->R1 -1",
            ]
        );

        // the summary itself is untouched by evaluation
        let flow: Flow = "10.0.0.0/24".parse().unwrap();
        assert_eq!(summary.edge_rank(&flow, &Edge::new("R2", "R3")), Some(0.25));
    }
}
