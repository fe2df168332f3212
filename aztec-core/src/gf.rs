// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `gf` module implements arithmetic over the binary Galois fields GF(2^p) used by the
//! symbology: p = 4 for the mode message, and p = 6, 8, 10, or 12 for payload codewords.
//!
//! Elements are represented as the low `p` bits of a `u16`. Multiplication and division run on
//! log/antilog tables built once per field and shared process-wide.

use once_cell::sync::Lazy;

use crate::errors::{AztecError, Result};

/// A binary Galois field GF(2^p) with precomputed log and antilog tables.
pub struct GaloisField {
    word_size: u32,
    order: usize,
    exp: Vec<u16>,
    log: Vec<u16>,
}

/// GF(16), primitive polynomial x⁴ + x + 1.
pub static GF16: Lazy<GaloisField> = Lazy::new(|| GaloisField::new(4, 0b10011));
/// GF(64), primitive polynomial x⁶ + x + 1.
pub static GF64: Lazy<GaloisField> = Lazy::new(|| GaloisField::new(6, 0b1000011));
/// GF(256), primitive polynomial x⁸ + x⁵ + x³ + x² + 1.
pub static GF256: Lazy<GaloisField> = Lazy::new(|| GaloisField::new(8, 0b100101101));
/// GF(1024), primitive polynomial x¹⁰ + x³ + 1.
pub static GF1024: Lazy<GaloisField> = Lazy::new(|| GaloisField::new(10, 0b10000001001));
/// GF(4096), primitive polynomial x¹² + x⁶ + x⁵ + x³ + 1.
pub static GF4096: Lazy<GaloisField> = Lazy::new(|| GaloisField::new(12, 0b1000001101001));

impl GaloisField {
    fn new(word_size: u32, poly: u32) -> GaloisField {
        let order = 1usize << word_size;

        // exp[i] is α^i for i in [0, order - 2]. Powers of α cycle with period order - 1, so the
        // table stops one short of wrapping back to 1.
        let mut exp = vec![0u16; order - 1];
        let mut log = vec![0u16; order];

        let mut value = 1u32;
        for i in 0..order - 1 {
            exp[i] = value as u16;
            log[value as usize] = i as u16;

            value <<= 1;
            if value & order as u32 != 0 {
                value = (value ^ poly) & (order as u32 - 1);
            }
        }

        GaloisField { word_size, order, exp, log }
    }

    /// Returns the field whose elements are `word_size` bits wide.
    pub fn for_word_size(word_size: u32) -> &'static GaloisField {
        match word_size {
            4 => &GF16,
            6 => &GF64,
            8 => &GF256,
            10 => &GF1024,
            12 => &GF4096,
            _ => unreachable!("no field for word size {}", word_size),
        }
    }

    /// The element width in bits.
    pub fn word_size(&self) -> u32 {
        self.word_size
    }

    /// The number of elements in the field, 2^p.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Adds two elements. Addition in a binary field is XOR.
    #[inline(always)]
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// Subtracts `b` from `a`. In a binary field subtraction is identical to addition.
    #[inline(always)]
    pub fn sub(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// Multiplies two elements.
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let i = usize::from(self.log[a as usize]) + usize::from(self.log[b as usize]);
        self.exp[i % (self.order - 1)]
    }

    /// Divides `a` by `b`.
    pub fn div(&self, a: u16, b: u16) -> Result<u16> {
        if b == 0 {
            return Err(AztecError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let i = usize::from(self.log[a as usize]) + (self.order - 1)
            - usize::from(self.log[b as usize]);
        Ok(self.exp[i % (self.order - 1)])
    }

    /// The multiplicative inverse of `a`.
    pub fn inv(&self, a: u16) -> Result<u16> {
        if a == 0 {
            return Err(AztecError::UndefinedInverse);
        }
        let i = (self.order - 1) - usize::from(self.log[a as usize]);
        Ok(self.exp[i % (self.order - 1)])
    }

    /// Raises `a` to the `n`-th power.
    pub fn pow(&self, a: u16, n: u32) -> u16 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let i = usize::from(self.log[a as usize]) * n as usize;
        self.exp[i % (self.order - 1)]
    }

    /// The `n`-th power of the primitive element, with the exponent reduced modulo 2^p − 1.
    #[inline]
    pub fn exp(&self, n: usize) -> u16 {
        self.exp[n % (self.order - 1)]
    }

    /// The discrete logarithm of `a` to base α.
    pub fn log(&self, a: u16) -> Result<u32> {
        if a == 0 {
            return Err(AztecError::UndefinedLog);
        }
        Ok(u32::from(self.log[a as usize]))
    }

    /// α^(−n), used when walking error locations from a received codeword.
    #[inline]
    pub fn exp_neg(&self, n: usize) -> u16 {
        let max = self.order - 1;
        self.exp[(max - n % max) % max]
    }
}

#[cfg(test)]
mod tests {
    use super::{GaloisField, GF256};
    use crate::errors::AztecError;

    const WORD_SIZES: [u32; 5] = [4, 6, 8, 10, 12];

    #[test]
    fn verify_generator_property() {
        // The first 2^p - 1 powers of α must be distinct and non-zero.
        for p in WORD_SIZES {
            let gf = GaloisField::for_word_size(p);
            let mut seen = vec![false; gf.order()];
            for i in 0..gf.order() - 1 {
                let value = gf.exp(i) as usize;
                assert!(value != 0 && !seen[value], "GF(2^{}) repeats at exponent {}", p, i);
                seen[value] = true;
            }
        }
    }

    #[test]
    fn verify_field_round_trips() {
        for p in WORD_SIZES {
            let gf = GaloisField::for_word_size(p);
            let max = gf.order() as u16 - 1;

            // Exhaustive pairs are cheap for the small fields; sample the large ones.
            let step = if gf.order() > 256 { 23 } else { 1 };

            for a in (1..=max).step_by(step) {
                assert_eq!(gf.mul(a, gf.inv(a).unwrap()), 1);
                for b in (1..=max).step_by(step) {
                    assert_eq!(gf.div(gf.mul(a, b), b).unwrap(), a);
                    assert_eq!(gf.add(gf.add(a, b), b), a);
                }
            }
        }
    }

    #[test]
    fn verify_undefined_operations() {
        let gf = GaloisField::for_word_size(6);
        assert_eq!(gf.div(7, 0), Err(AztecError::DivisionByZero));
        assert_eq!(gf.inv(0), Err(AztecError::UndefinedInverse));
        assert_eq!(gf.log(0), Err(AztecError::UndefinedLog));
    }

    #[test]
    fn verify_gf256_known_values() {
        assert_eq!(GF256.exp(0), 1);
        // The primitive element is α = 2.
        assert_eq!(GF256.exp(1), 2);

        let product = GF256.mul(42, 23);
        assert!(product < 256);
        assert_eq!(GF256.mul(42, 23), product);
        assert_eq!(GF256.div(product, 23).unwrap(), 42);
    }

    #[test]
    fn verify_pow() {
        let gf = GaloisField::for_word_size(8);
        assert_eq!(gf.pow(5, 0), 1);
        assert_eq!(gf.pow(0, 0), 1);
        assert_eq!(gf.pow(0, 3), 0);
        assert_eq!(gf.pow(2, 8), gf.exp(8));

        let mut acc = 1;
        for _ in 0..5 {
            acc = gf.mul(acc, 7);
        }
        assert_eq!(gf.pow(7, 5), acc);
    }
}
