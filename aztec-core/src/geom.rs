// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `geom` module holds every piece of symbol geometry shared by the encoder and decoder:
//! sizing tables, the bull's eye, orientation marks, mode-message positions, the reference
//! grid, and the data spiral. Factoring the position computations here keeps the two sides of
//! the codec reading and writing exactly the same modules.

/// Half the width of the finder core, mode message included: the mode message sits on the ring
/// at this offset from the centre.
pub fn core_half(compact: bool) -> usize {
    if compact {
        5
    }
    else {
        7
    }
}

/// The highest layer count of a symbol family.
pub fn max_layers(compact: bool) -> u32 {
    if compact {
        4
    }
    else {
        32
    }
}

/// The codeword width in bits for a symbol of `layers` layers.
pub fn word_size(compact: bool, layers: u32) -> u32 {
    if compact {
        if layers <= 2 {
            6
        }
        else {
            8
        }
    }
    else if layers <= 2 {
        6
    }
    else if layers <= 8 {
        8
    }
    else if layers <= 22 {
        10
    }
    else {
        12
    }
}

/// The total data-field capacity of a symbol, in bits.
pub fn capacity(compact: bool, layers: u32) -> usize {
    let l = layers as usize;
    if compact {
        (88 + 16 * l) * l
    }
    else {
        (112 + 16 * l) * l
    }
}

/// The module side length of a symbol.
pub fn size(compact: bool, layers: u32) -> usize {
    let l = layers as usize;
    if compact {
        11 + 4 * l
    }
    else {
        27 + 4 * l + 2 * ((l.saturating_sub(4) + 14) / 15)
    }
}

/// The number of bull's-eye rings beyond the centre module.
pub fn finder_rings(compact: bool) -> usize {
    if compact {
        4
    }
    else {
        6
    }
}

/// All positions of a square ring at `offset` modules from the centre `(cx, cy)`. Offset zero
/// is the centre module itself.
pub fn ring_perimeter(cx: usize, cy: usize, offset: usize) -> Vec<(usize, usize)> {
    if offset == 0 {
        return vec![(cx, cy)];
    }

    let mut cells = Vec::with_capacity(8 * offset);
    let (lo_x, hi_x) = (cx - offset, cx + offset);
    let (lo_y, hi_y) = (cy - offset, cy + offset);

    for x in lo_x..=hi_x {
        cells.push((x, lo_y));
        cells.push((x, hi_y));
    }
    for y in lo_y + 1..hi_y {
        cells.push((lo_x, y));
        cells.push((hi_x, y));
    }
    cells
}

/// The mode-message positions of a symbol of side `size`, in write order.
///
/// The message occupies the ring just outside the bull's eye, clockwise from the top edge. A
/// compact symbol uses a run of seven modules per side. A full symbol uses two runs of five
/// per side, skipping the middle module, which belongs to the reference grid.
pub fn mode_message_positions(compact: bool, size: usize) -> Vec<(usize, usize)> {
    let c = size / 2;
    let h = core_half(compact);

    let mut cells = Vec::with_capacity(if compact { 28 } else { 40 });

    if compact {
        // Top, right, bottom, left; the bottom and left runs walk backwards.
        for i in 0..7 {
            cells.push((c - 3 + i, c - h));
        }
        for i in 0..7 {
            cells.push((c + h, c - 3 + i));
        }
        for i in 0..7 {
            cells.push((c + 3 - i, c + h));
        }
        for i in 0..7 {
            cells.push((c - h, c + 3 - i));
        }
    }
    else {
        for i in 0..5 {
            cells.push((c - 5 + i, c - h));
        }
        for i in 0..5 {
            cells.push((c + 1 + i, c - h));
        }
        for i in 0..5 {
            cells.push((c + h, c - 5 + i));
        }
        for i in 0..5 {
            cells.push((c + h, c + 1 + i));
        }
        for i in 0..5 {
            cells.push((c + 5 - i, c + h));
        }
        for i in 0..5 {
            cells.push((c - 1 - i, c + h));
        }
        for i in 0..5 {
            cells.push((c - h, c + 5 - i));
        }
        for i in 0..5 {
            cells.push((c - h, c - 1 - i));
        }
    }

    cells
}

/// Returns true when `(x, y)` lies on the reference grid of a full symbol: a row or column
/// whose offset from the centre is a multiple of sixteen.
pub fn on_reference_grid(x: usize, y: usize, size: usize) -> bool {
    let c = size / 2;
    let dx = x.abs_diff(c);
    let dy = y.abs_diff(c);
    dx % 16 == 0 || dy % 16 == 0
}

/// Emits one two-module-thick ring of the data spiral, square bounds `lo..=hi` on both axes,
/// in the block order top, right, bottom, left. Each block covers two rows (or columns) of
/// `hi - lo - 1` modules, paired outer module first, so the four blocks tile the ring exactly.
fn ring_blocks(lo: usize, hi: usize, cells: &mut Vec<(usize, usize)>) {
    for x in lo..=hi - 2 {
        cells.push((x, lo));
        cells.push((x, lo + 1));
    }
    for y in lo..=hi - 2 {
        cells.push((hi, y));
        cells.push((hi - 1, y));
    }
    for x in (lo + 2..=hi).rev() {
        cells.push((x, hi));
        cells.push((x, hi - 1));
    }
    for y in (lo + 2..=hi).rev() {
        cells.push((lo, y));
        cells.push((lo + 1, y));
    }
}

/// The positions of every data module of the spiral, outermost layer first, in read/write
/// order. The position count equals `capacity(compact, layers)` exactly.
///
/// Full symbols are generated on a reduced grid with the reference rows and columns removed,
/// then projected onto the real matrix through an alignment map, so no data module ever lands
/// on the reference grid.
pub fn data_positions(compact: bool, layers: u32, size: usize) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(capacity(compact, layers));

    if compact {
        let c = size / 2;
        for k in (1..=layers as usize).rev() {
            // Outer offset of layer k; the mode-message ring sits at the core boundary.
            let o = core_half(true) + 2 * (k - 1) + 2;
            ring_blocks(c - o, c + o, &mut cells);
        }
        return cells;
    }

    // Reduced grid: the core spans fourteen cells, each layer adds two per side.
    let reduced = 14 + 4 * layers as usize;
    let map = alignment_map(layers, size);

    let mut reduced_cells = Vec::with_capacity(capacity(false, layers));
    for k in (1..=layers as usize).rev() {
        let t = layers as usize - k;
        ring_blocks(2 * t, reduced - 1 - 2 * t, &mut reduced_cells);
    }

    for (ux, uy) in reduced_cells {
        cells.push((map[ux], map[uy]));
    }
    cells
}

/// Maps reduced-grid indices of a full symbol onto matrix columns/rows, stepping over every
/// reference-grid line. The centre line itself is part of the grid, so reduced indices fan out
/// from the two cells beside it, with one extra skip every fifteen cells.
fn alignment_map(layers: u32, size: usize) -> Vec<usize> {
    let reduced = 14 + 4 * layers as usize;
    let half = reduced / 2;
    let c = size / 2;

    let mut map = vec![0; reduced];
    for i in 0..half {
        let offset = 1 + i + i / 15;
        map[half - 1 - i] = c - offset;
        map[half + i] = c + offset;
    }
    map
}
