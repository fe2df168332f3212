// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `stuff` module implements bit stuffing and codeword packing.
//!
//! The all-zero and all-one codewords are reserved: a reader treats them as erasures. Stuffing
//! breaks any run that would produce one by inserting a complementary bit whenever the first
//! `b - 1` bits of a codeword come out identical.

use crate::bits::BitVec;

/// Stuffs `bits` for codewords of `word_size` bits.
///
/// Walking the stream in groups of `word_size` bits, when the first `word_size - 1` bits of a
/// group are identical a complementary bit is inserted before the final bit of the group and
/// the group counter resets.
pub fn stuff(bits: &BitVec, word_size: u32) -> BitVec {
    let b = word_size as usize;

    let mut out = BitVec::with_capacity(bits.len() + bits.len() / b + b);
    let mut fill = 0;
    let mut first = false;
    let mut same = true;

    for i in 0..bits.len() {
        let bit = bits.get(i);

        if fill == b - 1 && same {
            // The codeword would come out all-zero or all-one; complete it with the
            // complement and start a fresh group at the current bit.
            out.push(!first);
            fill = 0;
        }

        if fill == 0 {
            first = bit;
            same = true;
        }
        else if bit != first {
            same = false;
        }

        out.push(bit);
        fill += 1;
        if fill == b {
            fill = 0;
        }
    }

    out
}

/// Pads `bits` with one-bits up to the next codeword boundary. If padding makes the final
/// codeword all ones, its last bit is flipped to zero.
pub fn pad(bits: &BitVec, word_size: u32) -> BitVec {
    let b = word_size as usize;

    let mut out = bits.clone();
    if out.len() % b == 0 {
        return out;
    }

    while out.len() % b != 0 {
        out.push(true);
    }

    let last = out.len() - b;
    if (last..out.len() - 1).all(|i| out.get(i)) {
        // Rebuild with the final bit cleared; BitVec has no truncate, and the final word is
        // the only one that can change.
        let mut flipped = BitVec::with_capacity(out.len());
        for i in 0..out.len() - 1 {
            flipped.push(out.get(i));
        }
        flipped.push(false);
        return flipped;
    }

    out
}

/// Removes the bits inserted by `stuff`: in each group of `word_size` bits, when the first
/// `word_size - 1` bits are identical the following bit was inserted and is dropped.
pub fn unstuff(bits: &BitVec, word_size: u32) -> BitVec {
    let b = word_size as usize;

    let mut out = BitVec::with_capacity(bits.len());
    let mut fill = 0;
    let mut first = false;
    let mut same = true;

    for i in 0..bits.len() {
        let bit = bits.get(i);

        if fill == b - 1 && same {
            // This is the inserted complement; drop it and reset the group.
            fill = 0;
            continue;
        }

        if fill == 0 {
            first = bit;
            same = true;
        }
        else if bit != first {
            same = false;
        }

        out.push(bit);
        fill += 1;
        if fill == b {
            fill = 0;
        }
    }

    out
}

/// Packs `bits` into codewords of `word_size` bits, most-significant bit first. A trailing
/// chunk shorter than one codeword is dropped.
pub fn to_codewords(bits: &BitVec, word_size: u32) -> Vec<u16> {
    let b = word_size as usize;

    let mut words = Vec::with_capacity(bits.len() / b);
    for chunk in 0..bits.len() / b {
        let mut word = 0u16;
        for i in 0..b {
            word = (word << 1) | u16::from(bits.get(chunk * b + i));
        }
        words.push(word);
    }
    words
}

/// Unpacks codewords into a bit stream, each codeword emitted most-significant bit first.
pub fn from_codewords(words: &[u16], word_size: u32) -> BitVec {
    let mut bits = BitVec::with_capacity(words.len() * word_size as usize);
    for &word in words {
        bits.push_bits(u32::from(word), word_size);
    }
    bits
}
