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
//! Import of router identity documents into an interface-address-to-name map.

use std::{collections::HashMap, net::IpAddr, str::FromStr};

use crate::records::{ParseError, RdnsDoc};

/// Convert a router identity document into a map from interface address to router name.
///
/// A malformed interface address aborts the whole document.
pub fn parse_rdns(rdns_json: &str) -> Result<HashMap<IpAddr, String>, ParseError> {
    let doc: RdnsDoc = serde_json::from_str(rdns_json)?;
    let mut rdns = HashMap::new();
    for router in doc.routers {
        for iface in router.ifaces {
            let addr = IpAddr::from_str(&iface)
                .map_err(|e| ParseError::MalformedAddr(iface.clone(), e))?;
            rdns.insert(addr, router.name.clone());
        }
    }
    Ok(rdns)
}
