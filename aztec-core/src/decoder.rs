// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `decoder` module recovers a payload from a module grid in canonical orientation: it
//! verifies the bull's eye, decodes the mode message, walks the data spiral, and reverses the
//! error protection and high-level encoding.

use log::debug;

use crate::bits::{BitReaderLtr, BitVec};
use crate::errors::{finder_error, mode_message_error, Result};
use crate::gf::{GaloisField, GF16};
use crate::matrix::BitMatrix;
use crate::{geom, highlevel, rs, stuff};

/// Decodes an Aztec symbol back into its payload.
///
/// The matrix must be square, sized like a valid symbol, and presented in canonical
/// orientation; rotation search from the corner marks is not performed.
pub fn decode(matrix: &BitMatrix) -> Result<Vec<u8>> {
    let (width, height) = matrix.dimensions();
    if width != height {
        return finder_error("matrix is not square");
    }
    if width < geom::size(true, 1) || width % 2 == 0 {
        return finder_error("matrix does not match any symbol size");
    }

    let compact = detect_type(matrix)?;
    let (layers, data_words) = read_mode_message(matrix, compact)?;

    debug!(
        "detected {} symbol, {} layers, {} data codewords",
        if compact { "compact" } else { "full" },
        layers,
        data_words,
    );

    if geom::size(compact, layers) != width {
        return mode_message_error("layer count does not match matrix size");
    }

    let word_size = geom::word_size(compact, layers);
    let capacity = geom::capacity(compact, layers);
    let total_words = capacity / word_size as usize;
    if data_words > total_words {
        return mode_message_error("data codeword count exceeds symbol capacity");
    }

    // Walk the spiral, then drop the zero bits prefixed to align the codewords to its end.
    let mut field = BitVec::with_capacity(capacity);
    let positions = geom::data_positions(compact, layers, width);
    let prefix = capacity % word_size as usize;
    for &(x, y) in positions.iter().skip(prefix) {
        field.push(matrix.get(x, y));
    }

    let received = stuff::to_codewords(&field, word_size);
    let gf = GaloisField::for_word_size(word_size);
    let corrected = rs::decode(gf, &received, total_words - data_words)?;

    let data_bits = stuff::from_codewords(&corrected[..data_words], word_size);
    let payload = stuff::unstuff(&data_bits, word_size);

    Ok(highlevel::decode(&payload))
}

/// Determines the symbol family from the bull's eye. A full bull's eye embeds a compact one,
/// so the full pattern is tried first.
fn detect_type(matrix: &BitMatrix) -> Result<bool> {
    let (size, _) = matrix.dimensions();
    let c = size / 2;

    if !matrix.get(c, c) {
        return finder_error("centre module is not set");
    }

    if check_rings(matrix, geom::finder_rings(false)) {
        Ok(false)
    }
    else if check_rings(matrix, geom::finder_rings(true)) {
        Ok(true)
    }
    else {
        finder_error("bull's eye pattern mismatch")
    }
}

/// Checks that every ring up to `max_ring` matches the alternating bull's-eye pattern.
fn check_rings(matrix: &BitMatrix, max_ring: usize) -> bool {
    let (size, _) = matrix.dimensions();
    let c = size / 2;

    if c < max_ring {
        return false;
    }

    for ring in 0..=max_ring {
        let expected = ring % 2 == 0;
        for (x, y) in geom::ring_perimeter(c, c, ring) {
            if matrix.get(x, y) != expected {
                return false;
            }
        }
    }
    true
}

/// Reads and error-corrects the mode message, returning the layer count and the number of
/// data codewords.
fn read_mode_message(matrix: &BitMatrix, compact: bool) -> Result<(u32, usize)> {
    let (size, _) = matrix.dimensions();

    let mut bits = BitVec::with_capacity(if compact { 28 } else { 40 });
    for (x, y) in geom::mode_message_positions(compact, size) {
        bits.push(matrix.get(x, y));
    }

    let received = stuff::to_codewords(&bits, 4);
    let check_len = if compact { 5 } else { 6 };
    let corrected = match rs::decode(&GF16, &received, check_len) {
        Ok(words) => words,
        Err(_) => return mode_message_error("check codewords do not validate"),
    };

    let fields = stuff::from_codewords(&corrected[..received.len() - check_len], 4);
    let mut reader = BitReaderLtr::new(&fields);

    // Both counts are stored biased by one.
    let (layers, data_words) = if compact {
        (reader.read_bits(2)? + 1, reader.read_bits(6)? as usize + 1)
    }
    else {
        (reader.read_bits(5)? + 1, reader.read_bits(11)? as usize + 1)
    };

    Ok((layers, data_words))
}

#[cfg(test)]
mod tests {
    use super::decode;
    use crate::encoder::{encode, EncodeOptions};
    use crate::errors::AztecError;
    use crate::matrix::BitMatrix;

    #[test]
    fn verify_round_trip_compact() {
        let code = encode(b"HELLO WORLD", &EncodeOptions::default()).unwrap();
        assert_eq!(decode(&code.matrix).unwrap(), b"HELLO WORLD");
    }

    #[test]
    fn verify_round_trip_full() {
        let code = encode(
            b"Full symbols carry a reference grid",
            &EncodeOptions { compact: Some(false), ..Default::default() },
        )
        .unwrap();
        assert!(!code.compact);
        assert_eq!(decode(&code.matrix).unwrap(), b"Full symbols carry a reference grid");
    }

    #[test]
    fn verify_blank_matrix_rejected() {
        let err = decode(&BitMatrix::square(15)).unwrap_err();
        assert!(matches!(err, AztecError::FinderNotFound(_)));
    }

    #[test]
    fn verify_non_square_rejected() {
        let err = decode(&BitMatrix::new(15, 19)).unwrap_err();
        assert!(matches!(err, AztecError::FinderNotFound(_)));
    }

    #[test]
    fn verify_data_errors_corrected() {
        let code = encode(b"CORRECT ME PLEASE", &EncodeOptions::default()).unwrap();

        let mut matrix = code.matrix.clone();
        let c = code.size / 2;
        // Flip a handful of data modules in the outermost layer.
        for i in 0..3 {
            matrix.flip(2 * i, 0);
        }
        // The core is untouched, so detection still sees the bull's eye at (c, c).
        assert!(matrix.get(c, c));

        assert_eq!(decode(&matrix).unwrap(), b"CORRECT ME PLEASE");
    }

    #[test]
    fn verify_mode_message_errors_corrected() {
        let code = encode(b"TOUGH HEADER", &EncodeOptions::default()).unwrap();

        let mut matrix = code.matrix.clone();
        let c = code.size / 2;
        // Flip two modules of the mode-message ring.
        matrix.flip(c - 3, c - 5);
        matrix.flip(c + 5, c + 1);

        assert_eq!(decode(&matrix).unwrap(), b"TOUGH HEADER");
    }

    #[test]
    fn verify_hopeless_corruption_rejected() {
        let code = encode(b"BEYOND REPAIR", &EncodeOptions::default()).unwrap();

        let mut matrix = code.matrix.clone();
        let (size, _) = matrix.dimensions();
        let h = crate::geom::core_half(code.compact);
        let c = size / 2;
        for y in 0..size {
            for x in 0..size {
                // Trash everything outside the core so detection still succeeds.
                if x.abs_diff(c).max(y.abs_diff(c)) > h && (x * 31 + y * 17) % 3 == 0 {
                    matrix.flip(x, y);
                }
            }
        }

        assert!(decode(&matrix).is_err());
    }
}
