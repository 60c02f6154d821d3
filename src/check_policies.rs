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
use std::{fs, path::PathBuf};

use clap::Parser;

use nerve::{
    specification::{evaluate_all, parse_policies},
    summary::ReachSummary,
    util,
};

/// Check reachability and path-preference policies against a network summary.
///
/// Prints one line per reachability policy, including those implied by path-preference
/// policies: `<flow> <source>-><target> <rank>`, where a rank of -1 marks a violated policy.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the summary JSON file.
    #[arg(short, long)]
    summary: PathBuf,
    /// Path to the policies JSON file.
    #[arg(short, long)]
    policies: PathBuf,
    /// Reduce path-preference policies to their common waypoints instead of all forward pairs.
    #[arg(short, long)]
    waypoints_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();
    let args = Args::parse();

    let summary = ReachSummary::from_json(&fs::read_to_string(&args.summary)?)?;
    let policies = parse_policies(&fs::read_to_string(&args.policies)?)?;
    log::info!(
        "loaded {} summary flows and {} policies",
        summary.flows().count(),
        policies.len()
    );

    for (policy, rank) in evaluate_all(&policies, &summary, args.waypoints_only) {
        println!("{policy} {rank}");
    }

    Ok(())
}
