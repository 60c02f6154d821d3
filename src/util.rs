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
//! Utility module collection of functions

pub fn init_logging() {
    pretty_env_logger::init();
}

/// Round `x` to `sigfigs` significant figures.
///
/// The scaling factor depends on the order of magnitude of `x`, as opposed to rounding to a
/// fixed number of decimal places. Zero and non-finite values are returned unchanged.
pub fn round_sig_figs(x: f64, sigfigs: i32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let magnitude = x.abs().log10().floor() as i32;
    let factor = 10f64.powi(sigfigs - 1 - magnitude);
    (x * factor).round() / factor
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sig_figs_in_rank_domain() {
        assert_eq!(round_sig_figs(0.87654321, 8), 0.87654321);
        assert_eq!(round_sig_figs(0.876543219, 8), 0.87654322);
        assert_eq!(round_sig_figs(0.123456789, 8), 0.12345679);
        assert_eq!(round_sig_figs(0.123456789, 2), 0.12);
        assert_eq!(round_sig_figs(0.000123456789, 3), 0.000123);
    }

    #[test]
    fn sig_figs_degenerate() {
        assert_eq!(round_sig_figs(0.0, 8), 0.0);
        assert_eq!(round_sig_figs(-1.0, 8), -1.0);
        assert!(round_sig_figs(f64::NAN, 8).is_nan());
    }
}
