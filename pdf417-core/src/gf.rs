// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GF(929) discrete-log tables backing the Reed-Solomon decoder.
//!
//! PDF417 codewords are symbols of GF(929), a prime field (929 is prime, not
//! a power of 2), so error correction works with `Alpha_to`/`Index_of`
//! lookup tables built from a generator rather than the XOR-based GF(2^m)
//! tables most Reed-Solomon references assume. The generator used here is 3.

use once_cell::sync::Lazy;

/// The field's prime order.
pub const GPRIME: i32 = 929;

/// Sentinel "index of zero" value: there is no real exponent `i` with
/// `3^i = 0`, so index-form arithmetic uses `A0` to mean "log of zero" /
/// negative infinity. Numerically it coincides with `GPRIME - 1`.
pub const A0: i32 = GPRIME - 1;

/// Discrete-log tables for GF(929) under generator 3.
pub struct GfTables {
    /// `alpha_to[i] = 3^i mod 929`.
    pub alpha_to: [i32; 1024],
    /// `index_of[x]` is the `i` such that `3^i mod 929 == x`, or `A0` for
    /// `x == 0`.
    pub index_of: [i32; 1024],
}

/// The process-wide GF(929) table pair, built on first use.
pub static GF929: Lazy<GfTables> = Lazy::new(build_tables);

fn build_tables() -> GfTables {
    let mut alpha_to = [0i32; 1024];
    let mut index_of = [0i32; 1024];

    let mut power_of_3: i32 = 1;
    index_of[1] = GPRIME - 1;

    for ii in 0..(GPRIME - 1) {
        alpha_to[ii as usize] = power_of_3;
        if power_of_3 < GPRIME {
            if ii != GPRIME - 1 {
                index_of[power_of_3 as usize] = ii;
            }
        }
        power_of_3 = (power_of_3 * 3) % GPRIME;
    }
    index_of[0] = GPRIME - 1;
    alpha_to[(GPRIME - 1) as usize] = 1;
    index_of[GPRIME as usize] = A0;

    GfTables { alpha_to, index_of }
}
