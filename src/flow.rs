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
//! Canonical CIDR flow keys used to index summaries and policies.

use std::{fmt, net::IpAddr, str::FromStr};

use ipnet::IpNet;

/// A traffic class, identified by its destination prefix.
///
/// Construction normalizes the host bits away, so any two strings denoting the same network map
/// to the same key no matter how they are spelled. Lookups keyed by `Flow` are exact-match on
/// the canonical network value, never longest-prefix-match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Flow(IpNet);

impl Flow {
    /// The canonical network value of this flow.
    pub fn net(&self) -> IpNet {
        self.0
    }
}

impl From<IpNet> for Flow {
    fn from(net: IpNet) -> Self {
        Self(net.trunc())
    }
}

impl FromStr for Flow {
    type Err = ipnet::AddrParseError;

    /// Parse a CIDR string into a flow key. A bare address is treated as a host network.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match IpNet::from_str(s) {
            Ok(net) => Ok(net.into()),
            Err(e) => match IpAddr::from_str(s) {
                Ok(addr) => Ok(IpNet::from(addr).into()),
                Err(_) => Err(e),
            },
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
