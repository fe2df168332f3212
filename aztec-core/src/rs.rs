// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `rs` module implements Reed-Solomon coding over the symbology's Galois fields.
//!
//! The generator polynomial uses the consecutive roots α¹ through α^K. Codewords are handled in
//! descending degree order: index 0 of a slice is the coefficient of the highest power of x.
//! Decoding runs the classic pipeline: syndromes, Berlekamp-Massey, Chien search, and Forney's
//! formula.

use log::trace;
use smallvec::{smallvec, SmallVec};

use crate::errors::{AztecError, Result};
use crate::gf::GaloisField;

// Polynomial scratch is bounded by the check length, which user-selected error-correction
// ratios can push well past the inline capacity; longer polynomials spill to the heap.
type Poly = SmallVec<[u16; 64]>;

/// Builds the generator polynomial g(x) = ∏_{i=1..check_len} (x − αⁱ), coefficients in
/// descending degree order with a leading 1.
pub fn generator_poly(gf: &GaloisField, check_len: usize) -> Vec<u16> {
    let mut g = Vec::with_capacity(check_len + 1);
    g.push(1);

    for i in 1..=check_len {
        // Multiply g by (x + αⁱ); subtraction and addition coincide in a binary field.
        let root = gf.exp(i);
        g.push(0);
        for j in (1..g.len()).rev() {
            g[j] = gf.add(g[j], gf.mul(g[j - 1], root));
        }
    }

    g
}

/// Computes `check_len` check codewords for `data`: the remainder of data(x) · x^check_len
/// divided by the generator polynomial, left-padded with zeros to the check length.
pub fn encode(gf: &GaloisField, data: &[u16], check_len: usize) -> Vec<u16> {
    let g = generator_poly(gf, check_len);

    // Synthetic division of data(x) · x^check_len by g(x). The quotient is discarded; the
    // remainder accumulates in the appended zero tail.
    let mut buf = Vec::with_capacity(data.len() + check_len);
    buf.extend_from_slice(data);
    buf.resize(data.len() + check_len, 0);

    for j in 0..data.len() {
        let factor = buf[j];
        if factor == 0 {
            continue;
        }
        // g[0] is 1, so the leading term clears exactly.
        for (t, &coeff) in g.iter().enumerate().skip(1) {
            buf[j + t] = gf.sub(buf[j + t], gf.mul(coeff, factor));
        }
        buf[j] = 0;
    }

    buf.split_off(data.len())
}

/// Decodes a received codeword of `check_len` check symbols, correcting up to
/// ⌊check_len / 2⌋ errors. Returns the corrected codeword (data followed by check symbols),
/// or `TooManyErrors` when correction is impossible.
pub fn decode(gf: &GaloisField, received: &[u16], check_len: usize) -> Result<Vec<u16>> {
    let n = received.len();
    let mut corrected = received.to_vec();

    let syndromes = compute_syndromes(gf, &corrected, check_len);
    if syndromes.iter().all(|&s| s == 0) {
        return Ok(corrected);
    }

    let sigma = berlekamp_massey(gf, &syndromes, check_len)?;
    let positions = chien_search(gf, &sigma, n)?;
    let magnitudes = forney(gf, &syndromes, &sigma, &positions, check_len)?;

    for (&pos, &magnitude) in positions.iter().zip(magnitudes.iter()) {
        // Position is a polynomial degree; the codeword is stored high-to-low.
        corrected[n - 1 - pos as usize] ^= magnitude;
    }

    // A locator of valid degree can still survive when the error count exceeds the design
    // distance. Reject the word unless the corrected syndromes vanish.
    let check = compute_syndromes(gf, &corrected, check_len);
    if check.iter().any(|&s| s != 0) {
        return Err(AztecError::TooManyErrors);
    }

    trace!("reed-solomon corrected {} errors", positions.len());

    Ok(corrected)
}

/// Evaluates the received polynomial at α¹ through α^K by Horner's rule. Index `i` of the
/// result holds S_{i+1}.
fn compute_syndromes(gf: &GaloisField, received: &[u16], check_len: usize) -> Poly {
    let mut syndromes: Poly = smallvec![0; check_len];

    for (i, syndrome) in syndromes.iter_mut().enumerate() {
        let x = gf.exp(i + 1);
        let mut acc = 0;
        for &coeff in received {
            acc = gf.add(gf.mul(acc, x), coeff);
        }
        *syndrome = acc;
    }

    syndromes
}

/// Finds the error-locator polynomial σ(x) = 1 + σ₁x + …, in ascending order, by the
/// Berlekamp-Massey iteration.
fn berlekamp_massey(gf: &GaloisField, syndromes: &Poly, check_len: usize) -> Result<Poly> {
    let mut sigma: Poly = smallvec![1];
    let mut b: Poly = smallvec![1];
    let mut errors = 0usize;

    for i in 0..check_len {
        // Discrepancy of the next syndrome against the current locator.
        let mut delta = 0;
        for (j, &coeff) in sigma.iter().enumerate() {
            if j <= i {
                delta = gf.add(delta, gf.mul(coeff, syndromes[i - j]));
            }
        }

        if delta == 0 {
            b.insert(0, 0);
            continue;
        }

        // t = σ + Δ·x·b
        let mut t: Poly = smallvec![0; (b.len() + 1).max(sigma.len())];
        t[..sigma.len()].copy_from_slice(&sigma);
        for (j, &coeff) in b.iter().enumerate() {
            t[j + 1] = gf.add(t[j + 1], gf.mul(delta, coeff));
        }

        if 2 * errors <= i {
            let inv = gf.inv(delta)?;
            b = sigma.iter().map(|&c| gf.mul(c, inv)).collect();
            errors = i + 1 - errors;
        }
        else {
            b.insert(0, 0);
        }

        sigma = t;
    }

    while sigma.last() == Some(&0) {
        sigma.pop();
    }

    if sigma.len() - 1 > check_len / 2 {
        return Err(AztecError::TooManyErrors);
    }

    Ok(sigma)
}

/// Finds the error positions: the degrees `i` for which σ(α^{−i}) = 0. Fails when the root
/// count does not account for the whole locator degree.
fn chien_search(gf: &GaloisField, sigma: &Poly, n: usize) -> Result<Poly> {
    let mut positions: Poly = SmallVec::new();

    for i in 0..n {
        let x = gf.exp_neg(i);
        let mut acc = 0;
        let mut x_pow = 1;
        for &coeff in sigma.iter() {
            acc = gf.add(acc, gf.mul(coeff, x_pow));
            x_pow = gf.mul(x_pow, x);
        }
        if acc == 0 {
            positions.push(i as u16);
        }
    }

    if positions.len() != sigma.len() - 1 {
        return Err(AztecError::TooManyErrors);
    }

    Ok(positions)
}

/// Computes the error magnitudes by Forney's formula with Ω(x) = S(x)·σ(x) mod x^K and the
/// characteristic-2 formal derivative of σ.
fn forney(
    gf: &GaloisField,
    syndromes: &Poly,
    sigma: &Poly,
    positions: &Poly,
    check_len: usize,
) -> Result<Poly> {
    // Ω(x) = S(x)·σ(x) mod x^K, with S ascending and S₁ in the constant term.
    let mut omega: Poly = smallvec![0; check_len];
    for (i, &s) in syndromes.iter().enumerate() {
        for (j, &coeff) in sigma.iter().enumerate() {
            if i + j < check_len {
                omega[i + j] = gf.add(omega[i + j], gf.mul(s, coeff));
            }
        }
    }

    // The formal derivative keeps only the odd-degree terms of σ.
    let mut d_sigma: Poly = smallvec![0; sigma.len().saturating_sub(1)];
    for (j, &coeff) in sigma.iter().enumerate().skip(1) {
        if j % 2 == 1 {
            d_sigma[j - 1] = coeff;
        }
    }

    let mut magnitudes: Poly = SmallVec::new();
    for &pos in positions.iter() {
        let x = gf.exp_neg(pos as usize);

        let mut num = 0;
        let mut x_pow = 1;
        for &coeff in omega.iter() {
            num = gf.add(num, gf.mul(coeff, x_pow));
            x_pow = gf.mul(x_pow, x);
        }

        let mut den = 0;
        x_pow = 1;
        for &coeff in d_sigma.iter() {
            den = gf.add(den, gf.mul(coeff, x_pow));
            x_pow = gf.mul(x_pow, x);
        }

        magnitudes.push(if den == 0 { 0 } else { gf.div(num, den)? });
    }

    Ok(magnitudes)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, generator_poly};
    use crate::errors::AztecError;
    use crate::gf::GaloisField;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn verify_generator_poly() {
        // Every αⁱ for i in 1..=K must be a root of the generator.
        for p in [4u32, 6, 8] {
            let gf = GaloisField::for_word_size(p);
            for check_len in [3usize, 5, 6, 8] {
                let g = generator_poly(gf, check_len);
                assert_eq!(g.len(), check_len + 1);
                assert_eq!(g[0], 1);

                for i in 1..=check_len {
                    let x = gf.exp(i);
                    let mut acc = 0;
                    for &coeff in &g {
                        acc = gf.add(gf.mul(acc, x), coeff);
                    }
                    assert_eq!(acc, 0, "α^{} is not a root in GF(2^{})", i, p);
                }
            }
        }
    }

    #[test]
    fn verify_round_trip_without_errors() {
        let mut rng = SmallRng::seed_from_u64(0x517d);

        for p in [4u32, 6, 8, 10, 12] {
            let gf = GaloisField::for_word_size(p);
            let max = gf.order() as u16 - 1;

            let data: Vec<u16> = (0..20).map(|_| rng.random_range(0..=max)).collect();
            let check = encode(gf, &data, 8);
            assert_eq!(check.len(), 8);

            let mut word = data.clone();
            word.extend_from_slice(&check);

            let decoded = decode(gf, &word, 8).unwrap();
            assert_eq!(decoded, word);
        }
    }

    #[test]
    fn verify_error_correction() {
        let mut rng = SmallRng::seed_from_u64(0x9b3e);

        for p in [6u32, 8, 10] {
            let gf = GaloisField::for_word_size(p);
            let max = gf.order() as u16 - 1;

            for check_len in [4usize, 8, 16] {
                let data: Vec<u16> = (0..24).map(|_| rng.random_range(0..=max)).collect();
                let check = encode(gf, &data, check_len);

                let mut word = data.clone();
                word.extend_from_slice(&check);

                for n_errors in 1..=check_len / 2 {
                    let mut corrupted = word.clone();
                    // Corrupt distinct positions.
                    let mut hit = vec![false; corrupted.len()];
                    for _ in 0..n_errors {
                        let mut pos = rng.random_range(0..corrupted.len());
                        while hit[pos] {
                            pos = rng.random_range(0..corrupted.len());
                        }
                        hit[pos] = true;
                        corrupted[pos] ^= rng.random_range(1..=max);
                    }

                    let decoded = decode(gf, &corrupted, check_len).unwrap();
                    assert_eq!(decoded, word, "p={} K={} errors={}", p, check_len, n_errors);
                }
            }
        }
    }

    #[test]
    fn verify_too_many_errors() {
        let mut rng = SmallRng::seed_from_u64(0x77aa);
        let gf = GaloisField::for_word_size(8);

        let data: Vec<u16> = (0..30).map(|_| rng.random_range(0..256)).collect();
        let check_len = 8;
        let check = encode(gf, &data, check_len);

        let mut word = data;
        word.extend_from_slice(&check);

        let mut failures = 0;
        for trial in 0..40 {
            let mut corrupted = word.clone();
            // Flip far more positions than the code can correct.
            let n_errors = check_len / 2 + 2 + trial % 4;
            let mut hit = vec![false; corrupted.len()];
            for _ in 0..n_errors {
                let mut pos = rng.random_range(0..corrupted.len());
                while hit[pos] {
                    pos = rng.random_range(0..corrupted.len());
                }
                hit[pos] = true;
                corrupted[pos] ^= rng.random_range(1..256);
            }

            match decode(gf, &corrupted, check_len) {
                Err(AztecError::TooManyErrors) => failures += 1,
                Err(e) => panic!("unexpected error {:?}", e),
                // A random overload can in principle land on another codeword, but the
                // corrected output must then be a valid one; tolerate without counting.
                Ok(_) => (),
            }
        }

        // Non-adversarial overloads must be overwhelmingly detected.
        assert!(failures >= 38, "only {} of 40 overloads detected", failures);
    }
}
