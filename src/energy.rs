// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Energy model mapping byte sizes to a synthetic energy cost

use crate::config::constants::ENERGY_COST_PER_BYTE;

/// Energy cost of `size_bytes` bytes of chain data
///
/// # Examples
///
/// ```rust
/// use energyscan::energy_cost;
///
/// assert_eq!(energy_cost(250.0), 1140.0);
/// assert_eq!(energy_cost(0.0), 0.0);
/// ```
#[inline]
pub fn energy_cost(size_bytes: f64) -> f64 {
    size_bytes * ENERGY_COST_PER_BYTE
}
