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
//! Library for verifying reachability intents against observed network forwarding summaries.

pub mod command;
pub mod flow;
pub mod rdns;
pub mod records;
pub mod specification;
pub mod summary;
pub mod util;

pub use flow::Flow;

pub mod prelude {
    pub use super::{
        specification::{
            evaluate, evaluate_all, parse_policies, Policy, ReachabilityPolicy, VIOLATED,
        },
        summary::{Edge, EdgeMetrics, LinkSummary, ReachSummary},
        Flow,
    };
}
