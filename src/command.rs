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
//! Outbound control messages understood by the monitoring controller.
//!
//! The verification core never receives commands; it only produces the envelope an operator
//! sends upstream.

use serde::Serialize;

/// Operations the monitoring controller can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Print the controller's event log.
    PrintLog = 0,
    /// Discard the current network summary.
    ResetSummary = 1,
    /// Recompute the network summary as of a timestamp.
    RefreshSummary = 2,
}

/// A command envelope, serialized as `{"Command": {"Opcode": <int>, "Timestamp"?: <float>}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    opcode: Opcode,
    timestamp: Option<f64>,
}

#[derive(Serialize)]
struct Envelope {
    #[serde(rename = "Command")]
    command: Payload,
}

#[derive(Serialize)]
struct Payload {
    #[serde(rename = "Opcode")]
    opcode: u8,
    #[serde(rename = "Timestamp", skip_serializing_if = "Option::is_none")]
    timestamp: Option<f64>,
}

impl Command {
    pub fn print_log() -> Self {
        Self {
            opcode: Opcode::PrintLog,
            timestamp: None,
        }
    }

    pub fn reset_summary() -> Self {
        Self {
            opcode: Opcode::ResetSummary,
            timestamp: None,
        }
    }

    /// Ask the controller to refresh its summary as of the given epoch timestamp.
    pub fn refresh_summary(timestamp: f64) -> Self {
        Self {
            opcode: Opcode::RefreshSummary,
            timestamp: Some(timestamp),
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Serialize to the wire envelope expected by the controller.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&Envelope {
            command: Payload {
                opcode: self.opcode as u8,
                timestamp: self.timestamp,
            },
        })
        .unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn envelopes() {
        assert_eq!(Command::print_log().to_json(), r#"{"Command":{"Opcode":0}}"#);
        assert_eq!(
            Command::reset_summary().to_json(),
            r#"{"Command":{"Opcode":1}}"#
        );
        assert_eq!(
            Command::refresh_summary(1700000000.5).to_json(),
            r#"{"Command":{"Opcode":2,"Timestamp":1700000000.5}}"#
        );
    }
}
