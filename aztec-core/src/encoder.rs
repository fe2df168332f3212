// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `encoder` module assembles complete symbols: it sizes the symbol for the payload,
//! protects the data field with Reed-Solomon check words, and draws the module grid.

use log::debug;

use crate::bits::BitVec;
use crate::errors::{AztecError, Result};
use crate::gf::{GaloisField, GF16};
use crate::matrix::BitMatrix;
use crate::{geom, highlevel, rs, stuff};

/// Options controlling symbol selection.
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// The fraction of the symbol capacity reserved for error correction, beyond the fixed
    /// three-codeword floor.
    pub error_correction: f64,
    /// The smallest acceptable layer count.
    pub min_layers: u32,
    /// Force a compact (`Some(true)`) or full (`Some(false)`) symbol; `None` picks the
    /// smallest symbol of either family.
    pub compact: Option<bool>,
}

impl Default for EncodeOptions {
    fn default() -> EncodeOptions {
        EncodeOptions { error_correction: 0.23, min_layers: 1, compact: None }
    }
}

/// An encoded symbol.
#[derive(Clone, Debug)]
pub struct Code {
    /// The module grid, `size` modules per side.
    pub matrix: BitMatrix,
    /// Whether this is a compact symbol.
    pub compact: bool,
    /// The number of data layers.
    pub layers: u32,
    /// The payload codeword width in bits. Mode messages always use 4-bit codewords.
    pub codeword_size: u32,
    /// The number of data codewords in the data field.
    pub data_codewords: usize,
    /// The side length of the symbol in modules.
    pub size: usize,
}

/// The selected symbol geometry for a payload.
struct SymbolPlan {
    compact: bool,
    layers: u32,
    word_size: u32,
    data_words: usize,
    total_words: usize,
}

/// Encodes `data` into an Aztec symbol.
pub fn encode(data: &[u8], options: &EncodeOptions) -> Result<Code> {
    let bits = highlevel::encode(data);
    let plan = select_symbol(&bits, options)?;

    let size = geom::size(plan.compact, plan.layers);

    debug!(
        "encoding {} payload bits as {} symbol, {} layers, {} modules",
        bits.len(),
        if plan.compact { "compact" } else { "full" },
        plan.layers,
        size,
    );

    // Stuff and pad the payload, then append the Reed-Solomon check words.
    let gf = GaloisField::for_word_size(plan.word_size);
    let stuffed = stuff::pad(&stuff::stuff(&bits, plan.word_size), plan.word_size);
    let words = stuff::to_codewords(&stuffed, plan.word_size);
    let check = rs::encode(gf, &words, plan.total_words - words.len());

    // The data field is left-padded with zero bits up to the exact spiral capacity, so the
    // payload ends on the last spiral position.
    let capacity = geom::capacity(plan.compact, plan.layers);
    let mut field = BitVec::with_capacity(capacity);
    for _ in 0..capacity - plan.total_words * plan.word_size as usize {
        field.push(false);
    }
    for &word in words.iter().chain(check.iter()) {
        field.push_bits(u32::from(word), plan.word_size);
    }

    let mut matrix = BitMatrix::square(size);
    draw_finder(&mut matrix, plan.compact);
    draw_orientation(&mut matrix, plan.compact);
    if !plan.compact {
        draw_reference_grid(&mut matrix);
    }
    draw_mode_message(&mut matrix, plan.compact, plan.layers, plan.data_words);

    for (i, (x, y)) in geom::data_positions(plan.compact, plan.layers, size).iter().enumerate() {
        if field.get(i) {
            matrix.set(*x, *y);
        }
    }

    Ok(Code {
        matrix,
        compact: plan.compact,
        layers: plan.layers,
        codeword_size: plan.word_size,
        data_codewords: plan.data_words,
        size,
    })
}

/// Picks the smallest symbol that holds `bits` at the requested error-correction ratio, trying
/// the allowed layer counts of both families. Compact symbols are always smaller than full
/// ones, so walking compact sizes first visits candidates in side order.
fn select_symbol(bits: &BitVec, options: &EncodeOptions) -> Result<SymbolPlan> {
    let mut families: Vec<bool> = Vec::new();
    if options.compact != Some(false) {
        families.push(true);
    }
    if options.compact != Some(true) {
        families.push(false);
    }

    for compact in families {
        for layers in options.min_layers.max(1)..=geom::max_layers(compact) {
            let word_size = geom::word_size(compact, layers);
            let total_words = geom::capacity(compact, layers) / word_size as usize;

            // Stuffing inflates the payload, so the data codeword count depends on the
            // candidate's codeword width.
            let stuffed = stuff::pad(&stuff::stuff(bits, word_size), word_size);
            let data_words = stuffed.len() / word_size as usize;

            // The mode message caps the representable data codeword count.
            let field_bits = if compact { 6 } else { 11 };
            if data_words > 1usize << field_bits {
                continue;
            }

            let required = (total_words as f64 * options.error_correction).ceil() as usize + 3;
            if data_words + required < total_words {
                return Ok(SymbolPlan { compact, layers, word_size, data_words, total_words });
            }
        }
    }

    Err(AztecError::DataTooLarge)
}

/// Draws the bull's eye: concentric square rings, dark at even offsets from the centre.
fn draw_finder(matrix: &mut BitMatrix, compact: bool) {
    let (size, _) = matrix.dimensions();
    let c = size / 2;

    for ring in 0..=geom::finder_rings(compact) {
        if ring % 2 == 0 {
            for (x, y) in geom::ring_perimeter(c, c, ring) {
                matrix.set(x, y);
            }
        }
    }
}

/// Draws the orientation marks on the corners of the mode-message ring: three dark modules at
/// top-left, three at top-right, one at bottom-left. The bottom-right corner stays light.
fn draw_orientation(matrix: &mut BitMatrix, compact: bool) {
    let (size, _) = matrix.dimensions();
    let c = size / 2;
    let h = geom::core_half(compact);

    matrix.set(c - h, c - h);
    matrix.set(c - h + 1, c - h);
    matrix.set(c - h, c - h + 1);

    matrix.set(c + h, c - h);
    matrix.set(c + h - 1, c - h);
    matrix.set(c + h, c - h + 1);

    matrix.set(c - h, c + h);
}

/// Draws the reference grid of a full symbol: on every row and column at a multiple of sixteen
/// modules from the centre, modules with both offsets even are dark. The finder core carries
/// its own pattern and is skipped.
fn draw_reference_grid(matrix: &mut BitMatrix) {
    let (size, _) = matrix.dimensions();
    let c = size / 2;
    let h = geom::core_half(false);

    for y in 0..size {
        for x in 0..size {
            if !geom::on_reference_grid(x, y, size) {
                continue;
            }
            let (dx, dy) = (x.abs_diff(c), y.abs_diff(c));
            if dx.max(dy) > h && dx % 2 == 0 && dy % 2 == 0 {
                matrix.set(x, y);
            }
        }
    }
}

/// Builds and places the mode message: the layer count and data codeword count, protected by
/// GF(16) Reed-Solomon check words.
fn draw_mode_message(matrix: &mut BitMatrix, compact: bool, layers: u32, data_words: usize) {
    let bits = mode_message_bits(compact, layers, data_words);

    let (size, _) = matrix.dimensions();
    for (i, (x, y)) in geom::mode_message_positions(compact, size).iter().enumerate() {
        if bits.get(i) {
            matrix.set(*x, *y);
        }
    }
}

fn mode_message_bits(compact: bool, layers: u32, data_words: usize) -> BitVec {
    // An empty payload has no data codewords; the count field saturates at zero.
    let field = data_words.saturating_sub(1) as u32;

    let mut bits = BitVec::new();
    if compact {
        bits.push_bits(layers - 1, 2);
        bits.push_bits(field, 6);
    }
    else {
        bits.push_bits(layers - 1, 5);
        bits.push_bits(field, 11);
    }

    let mut words = stuff::to_codewords(&bits, 4);
    let check_len = if compact { 5 } else { 6 };
    let check = rs::encode(&GF16, &words, check_len);
    words.extend(check);

    stuff::from_codewords(&words, 4)
}
