// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors-and-erasures Reed-Solomon decoding over GF(929).
//!
//! This is a direct port of the classic Berlekamp-Massey / Chien-search /
//! Forney decoder, specialized to PDF417's prime field. It intentionally
//! keeps two quirks of the reference implementation rather than rewriting
//! them to the textbook form:
//!
//! - The discrepancy computed in the Berlekamp-Massey loop and the error
//!   evaluator polynomial omega both use an alternating add/subtract based
//!   on whether the inner loop index is odd or even, rather than a single
//!   consistent sign.
//! - The Forney numerator evaluates omega at `root[j]` using an exponent of
//!   `i + 1` rather than `i`.
//!
//! Both match `eras_dec_rs` bit for bit; "fixing" them would change which
//! damaged symbols are recoverable.

use log::{debug, trace};

use crate::config::DiagnosticFlags;
use crate::error::{uncorrectable_error, Result};
use crate::gf::{A0, GF929, GPRIME};

const PRIM: i32 = 1;

fn modbase(x: i32) -> i32 {
    x.rem_euclid(GPRIME - 1)
}

/// Outcome of a successful errors-and-erasures correction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Number of symbols corrected (including resolved erasures).
    pub corrected: usize,
    /// Codeword positions that were corrected, counted from the start of
    /// the block that was passed in.
    pub locations: Vec<usize>,
}

/// Performs Reed-Solomon errors-and-erasures decoding over GF(929).
///
/// `data` holds `data_len` codewords (message symbols followed by
/// `synd_len` check symbols), corrected in place on success. `erasures`
/// lists codeword positions the caller already knows are unreliable and
/// must not contain duplicates.
///
/// On success, returns the number of symbols corrected. On failure, `data`
/// is left unmodified and `Pdf417Error::Uncorrectable` is returned.
pub fn correct(
    data: &mut [i32],
    erasures: &[usize],
    data_len: usize,
    synd_len: usize,
    flags: DiagnosticFlags,
) -> Result<Correction> {
    let gf = &*GF929;
    let alpha_to = &gf.alpha_to;
    let index_of = &gf.index_of;

    let no_eras = erasures.len();
    let size = synd_len + 2;

    let mut lambda = vec![0i32; size];
    let mut s = vec![0i32; size];
    let mut b = vec![0i32; size];
    let mut t = vec![0i32; size];
    let mut omega = vec![0i32; size];
    let mut root = vec![0i32; size];
    let mut reg = vec![0i32; size];
    let mut loc = vec![0usize; size];

    // Erasure positions are expressed as codeword distance from the end of
    // the block, matching the convention the rest of this routine uses for
    // `loc[]`.
    let eras_pos: Vec<i32> =
        erasures.iter().map(|&p| (data_len as i32) - 1 - p as i32).collect();

    // Form the syndromes: evaluate data(x) at the roots of g(x).
    for j in 1..=data_len {
        let dj = data[data_len - j];
        if dj == 0 {
            continue;
        }
        let tmp = index_of[dj as usize];
        for i in 1..=synd_len {
            s[i] = (s[i] + alpha_to[modbase(tmp + (i as i32) * (j as i32)) as usize]) % GPRIME;
        }
    }

    let mut syn_error = 0;
    for i in 1..=synd_len {
        syn_error |= s[i];
        s[i] = index_of[s[i] as usize];
    }

    if syn_error == 0 {
        // Syndrome is zero: data[] is already a valid codeword.
        return Ok(Correction { corrected: 0, locations: Vec::new() });
    }

    for ci in (0..synd_len).rev() {
        lambda[ci + 1] = 0;
    }
    lambda[0] = 1;

    if no_eras > 0 {
        lambda[1] = alpha_to[modbase(PRIM * eras_pos[0]) as usize];
        for i in 1..no_eras {
            let u = modbase(PRIM * eras_pos[i]);
            for j in (1..=i + 1).rev() {
                let tmp = index_of[lambda[j - 1] as usize];
                if tmp != A0 {
                    lambda[j] = (lambda[j] + alpha_to[modbase(u + tmp) as usize]) % GPRIME;
                }
            }
        }
    }

    for i in 0..=synd_len {
        b[i] = index_of[lambda[i] as usize];
    }

    // Berlekamp-Massey: determine the error+erasure locator polynomial.
    let mut r = no_eras as i32;
    let mut el = no_eras as i32;
    loop {
        r += 1;
        if r > synd_len as i32 {
            break;
        }

        let mut discr_r = 0i32;
        for i in 0..r as usize {
            if lambda[i] != 0 && s[r as usize - i] != A0 {
                if i % 2 == 1 {
                    discr_r = (discr_r
                        + alpha_to[modbase(index_of[lambda[i] as usize] + s[r as usize - i])
                            as usize])
                        % GPRIME;
                } else {
                    discr_r = (discr_r + GPRIME
                        - alpha_to[modbase(index_of[lambda[i] as usize] + s[r as usize - i])
                            as usize])
                        % GPRIME;
                }
            }
        }
        if flags.contains(DiagnosticFlags::RS_DETAIL) {
            trace!("berlekamp-massey: r = {r} discrepancy = {discr_r}");
        }

        let discr_r = index_of[discr_r as usize];

        if discr_r == A0 {
            for ci in (0..synd_len).rev() {
                b[ci + 1] = b[ci];
            }
            b[0] = A0;
        } else {
            t[0] = lambda[0];
            for i in 0..synd_len {
                if b[i] != A0 {
                    t[i + 1] = (lambda[i + 1] + alpha_to[modbase(discr_r + b[i]) as usize]) % GPRIME;
                } else {
                    t[i + 1] = lambda[i + 1];
                }
            }

            el = 0;
            if 2 * el <= r + no_eras as i32 - 1 {
                el = r + no_eras as i32 - el;
                for i in 0..=synd_len {
                    if lambda[i] == 0 {
                        b[i] = A0;
                    } else {
                        b[i] = modbase(index_of[lambda[i] as usize] - discr_r + GPRIME - 1);
                    }
                }
            } else {
                for ci in (0..synd_len).rev() {
                    b[ci + 1] = b[ci];
                }
                b[0] = A0;
            }

            for ci in (0..=synd_len).rev() {
                lambda[ci] = t[ci];
            }
        }
    }

    // Convert lambda to index form and find deg(lambda).
    let mut deg_lambda = 0usize;
    for i in 0..=synd_len {
        lambda[i] = index_of[lambda[i] as usize];
        if lambda[i] != A0 {
            deg_lambda = i;
        }
    }

    // Chien search for the roots of the error+erasure locator polynomial.
    for ci in (0..synd_len).rev() {
        reg[ci + 1] = lambda[ci + 1];
    }

    let mut count = 0usize;
    let mut i = 1i32;
    while i <= GPRIME {
        let mut q = 1i32;
        for j in (1..=deg_lambda).rev() {
            if reg[j] != A0 {
                reg[j] = modbase(reg[j] + j as i32);
                if deg_lambda != 1 {
                    if j % 2 == 0 {
                        q = (q + alpha_to[reg[j] as usize]) % GPRIME;
                    } else {
                        q = (q + GPRIME - alpha_to[reg[j] as usize]) % GPRIME;
                    }
                } else {
                    q = alpha_to[reg[j] as usize] % GPRIME;
                    if q == 1 {
                        q -= 1;
                    }
                }
            }
        }

        if q == 0 {
            root[count] = i;
            loc[count] = (GPRIME - 1 - i) as usize;
            if count < synd_len {
                count += 1;
            } else if flags.contains(DiagnosticFlags::RS_DETAIL) {
                debug!("rs: error count too big: {count}");
            }
        }

        if count == deg_lambda {
            break;
        }
        i += 1;
    }

    if deg_lambda != count {
        if flags.contains(DiagnosticFlags::RS_DETAIL) {
            debug!("rs: uncorrectable: root count = {count} deg lambda = {deg_lambda}");
        }
        return uncorrectable_error();
    }

    // Compute the error+erasure evaluator polynomial
    // omega(x) = s(x) * lambda(x) (mod x^synd_len), in index form.
    let mut deg_omega = 0usize;
    for i in 0..synd_len {
        let mut tmp = 0i32;
        let jmax = deg_lambda.min(i);
        let mut j = jmax as i32;
        while j >= 0 {
            let ju = j as usize;
            if s[i + 1 - ju] != A0 && lambda[ju] != A0 {
                if j % 2 == 1 {
                    tmp = (tmp + GPRIME
                        - alpha_to[modbase(s[i + 1 - ju] + lambda[ju]) as usize])
                        % GPRIME;
                } else {
                    tmp = (tmp + alpha_to[modbase(s[i + 1 - ju] + lambda[ju]) as usize]) % GPRIME;
                }
            }
            j -= 1;
        }
        if tmp != 0 {
            deg_omega = i;
        }
        omega[i] = index_of[tmp as usize];
    }
    omega[synd_len] = A0;

    // Compute error values and apply them to data in place.
    for j in (0..count).rev() {
        let mut num1 = 0i32;
        for i in (0..=deg_omega).rev() {
            if omega[i] != A0 {
                num1 = (num1
                    + alpha_to[modbase(omega[i] + ((i as i32 + 1) * root[j])) as usize])
                    % GPRIME;
            }
        }

        let num2 = 1i32;
        let mut den = 1i32;
        for k in 0..count {
            if k != j {
                let tmp = (1 + GPRIME
                    - alpha_to[modbase(GPRIME - 1 - root[k] + root[j]) as usize])
                    % GPRIME;
                den = alpha_to[modbase(index_of[den as usize] + index_of[tmp as usize]) as usize];
            }
        }

        if den == 0 {
            if flags.contains(DiagnosticFlags::RS_DETAIL) {
                debug!("rs: denominator is zero");
            }
            return uncorrectable_error();
        }

        let error_val = alpha_to[modbase(
            index_of[num1 as usize] + index_of[num2 as usize] + GPRIME - 1 - index_of[den as usize],
        ) as usize]
            % GPRIME;

        if num1 != 0 && loc[j] < data_len + 1 {
            let fix_loc = data_len as i32 - loc[j] as i32;
            if fix_loc >= 0 && (fix_loc as usize) < data_len {
                let idx = fix_loc as usize;
                data[idx] = (data[idx] + GPRIME - error_val) % GPRIME;
            }
        }
    }

    Ok(Correction { corrected: count, locations: loc[..count].to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_syndrome_reports_no_corrections() {
        let mut data = vec![0i32; 20];
        let result = correct(&mut data, &[], 20, 6, DiagnosticFlags::empty()).unwrap();
        assert_eq!(result.corrected, 0);
        assert!(result.locations.is_empty());
        assert!(data.iter().all(|&v| v == 0));
    }

    #[test]
    fn declared_erasures_on_a_clean_block_are_a_no_op() {
        let mut data = vec![0i32; 20];
        let result = correct(&mut data, &[0, 5], 20, 6, DiagnosticFlags::empty()).unwrap();
        assert_eq!(result.corrected, 0);
    }

    /// `[5, 7, 11, 152, 709]` is a genuine codeword over GF(929) under
    /// generator 3: with data_len = 5 and synd_len = 2, its two syndromes
    /// (evaluating the message at alpha^1 and alpha^2) both work out to 0
    /// by construction (929 | 5574 and 929 | 29728), so Reed-Solomon leaves
    /// it untouched.
    const VALID_CODEWORD: [i32; 5] = [5, 7, 11, 152, 709];

    #[test]
    fn a_single_substituted_symbol_is_corrected_via_the_full_bm_chien_forney_path() {
        let mut data = VALID_CODEWORD;
        data[1] = 200; // damage a data symbol, no erasure declared

        let result = correct(&mut data, &[], 5, 2, DiagnosticFlags::empty()).unwrap();
        assert_eq!(result.corrected, 1);
        assert_eq!(data, VALID_CODEWORD);
    }

    #[test]
    fn a_declared_erasure_is_recovered_from_the_surviving_symbols() {
        let mut data = VALID_CODEWORD;
        data[2] = 0; // erase a data symbol

        let result = correct(&mut data, &[2], 5, 2, DiagnosticFlags::empty()).unwrap();
        assert_eq!(result.corrected, 1);
        assert_eq!(data, VALID_CODEWORD);
    }

    #[test]
    fn modbase_wraps_into_the_exponent_group() {
        assert_eq!(modbase(0), 0);
        assert_eq!(modbase(928), 0);
        assert_eq!(modbase(929), 1);
    }
}
