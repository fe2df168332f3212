// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `charset` module provides the static character, latch, and shift tables of the five
//! high-level encoding modes.

/// The five character modes. Both encoder and decoder start in `Upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Upper,
    Lower,
    Mixed,
    Punct,
    Digit,
}

/// All modes, in table order.
pub const MODES: [Mode; 5] = [Mode::Upper, Mode::Lower, Mode::Mixed, Mode::Punct, Mode::Digit];

impl Mode {
    /// The width in bits of one code in this mode.
    #[inline]
    pub fn bit_width(self) -> u32 {
        match self {
            Mode::Digit => 4,
            _ => 5,
        }
    }

    /// The index of this mode in `MODES`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Mode::Upper => 0,
            Mode::Lower => 1,
            Mode::Mixed => 2,
            Mode::Punct => 3,
            Mode::Digit => 4,
        }
    }
}

/// A decoded table entry: either one byte or a two-byte punctuation pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharCode {
    Single(u8),
    Pair(u8, u8),
}

/// Single characters of the punctuation mode, codes 6 through 30.
const PUNCT_CHARS: &[u8; 25] = b"!\"#$%&'()*+,-./:;<=>?[]{}";

/// Control characters of the mixed mode mapped by codes 2 through 14 (0x01..0x0D) and 15
/// through 19 (0x1B..0x1F), followed by the printable symbols of codes 20 through 27.
const MIXED_SYMBOLS: &[u8; 8] = b"@\\^_`|~\x7f";

/// The two-byte pairs of the punctuation mode, codes 2 through 5.
const PUNCT_PAIRS: [(u8, u8); 4] = [(b'\r', b'\n'), (b'.', b' '), (b',', b' '), (b':', b' ')];

/// The code of `byte` in `mode`, if the mode can encode it directly.
pub fn char_code(mode: Mode, byte: u8) -> Option<u32> {
    match mode {
        Mode::Upper => match byte {
            b' ' => Some(1),
            b'A'..=b'Z' => Some(u32::from(byte - b'A') + 2),
            _ => None,
        },
        Mode::Lower => match byte {
            b' ' => Some(1),
            b'a'..=b'z' => Some(u32::from(byte - b'a') + 2),
            _ => None,
        },
        Mode::Mixed => match byte {
            b' ' => Some(1),
            0x01..=0x0d => Some(u32::from(byte) + 1),
            0x1b..=0x1f => Some(u32::from(byte - 0x1b) + 15),
            _ => MIXED_SYMBOLS.iter().position(|&s| s == byte).map(|i| i as u32 + 20),
        },
        Mode::Punct => match byte {
            b'\r' => Some(1),
            _ => PUNCT_CHARS.iter().position(|&s| s == byte).map(|i| i as u32 + 6),
        },
        Mode::Digit => match byte {
            b' ' => Some(1),
            b'0'..=b'9' => Some(u32::from(byte - b'0') + 2),
            b',' => Some(12),
            b'.' => Some(13),
            _ => None,
        },
    }
}

/// The punctuation-mode code of the two-byte pair `(b1, b2)`, if one exists.
pub fn pair_code(b1: u8, b2: u8) -> Option<u32> {
    PUNCT_PAIRS.iter().position(|&p| p == (b1, b2)).map(|i| i as u32 + 2)
}

/// Maps a code in `mode` back to its character or pair. Returns `None` for latch, shift,
/// binary-shift, and FLG codes.
pub fn code_to_char(mode: Mode, code: u32) -> Option<CharCode> {
    match mode {
        Mode::Upper | Mode::Lower => match code {
            1 => Some(CharCode::Single(b' ')),
            2..=27 => {
                let base = if mode == Mode::Upper { b'A' } else { b'a' };
                Some(CharCode::Single(base + (code - 2) as u8))
            }
            _ => None,
        },
        Mode::Mixed => match code {
            1 => Some(CharCode::Single(b' ')),
            2..=14 => Some(CharCode::Single((code - 1) as u8)),
            15..=19 => Some(CharCode::Single(0x1b + (code - 15) as u8)),
            20..=27 => Some(CharCode::Single(MIXED_SYMBOLS[code as usize - 20])),
            _ => None,
        },
        Mode::Punct => match code {
            1 => Some(CharCode::Single(b'\r')),
            2..=5 => {
                let (b1, b2) = PUNCT_PAIRS[code as usize - 2];
                Some(CharCode::Pair(b1, b2))
            }
            6..=30 => Some(CharCode::Single(PUNCT_CHARS[code as usize - 6])),
            _ => None,
        },
        Mode::Digit => match code {
            1 => Some(CharCode::Single(b' ')),
            2..=11 => Some(CharCode::Single(b'0' + (code - 2) as u8)),
            12 => Some(CharCode::Single(b',')),
            13 => Some(CharCode::Single(b'.')),
            _ => None,
        },
    }
}

/// The modes that can encode `byte` directly.
pub fn modes_for_byte(byte: u8) -> impl Iterator<Item = Mode> {
    MODES.into_iter().filter(move |&m| char_code(m, byte).is_some())
}

/// The single-step latch from one mode to another, as `(code, width)`.
pub fn latch(from: Mode, to: Mode) -> Option<(u32, u32)> {
    match (from, to) {
        (Mode::Upper, Mode::Lower) => Some((28, 5)),
        (Mode::Upper, Mode::Mixed) => Some((29, 5)),
        (Mode::Upper, Mode::Digit) => Some((30, 5)),
        (Mode::Lower, Mode::Mixed) => Some((29, 5)),
        (Mode::Lower, Mode::Digit) => Some((30, 5)),
        (Mode::Mixed, Mode::Lower) => Some((28, 5)),
        (Mode::Mixed, Mode::Upper) => Some((29, 5)),
        (Mode::Mixed, Mode::Punct) => Some((30, 5)),
        (Mode::Punct, Mode::Upper) => Some((31, 5)),
        (Mode::Digit, Mode::Upper) => Some((14, 4)),
        _ => None,
    }
}

/// The shift from one mode to another, as `(code, width)`. A shift applies to exactly one
/// following character.
pub fn shift(from: Mode, to: Mode) -> Option<(u32, u32)> {
    match (from, to) {
        (Mode::Upper | Mode::Lower | Mode::Mixed, Mode::Punct) => Some((0, 5)),
        (Mode::Digit, Mode::Punct) => Some((0, 4)),
        (Mode::Lower, Mode::Upper) => Some((28, 5)),
        (Mode::Digit, Mode::Upper) => Some((15, 4)),
        _ => None,
    }
}

/// The latch sequence from one mode to another, possibly through intermediate modes. There is
/// no single-step latch between every mode pair; the composite paths below are the shortest.
pub fn latch_path(from: Mode, to: Mode) -> &'static [(u32, u32)] {
    const EMPTY: &[(u32, u32)] = &[];
    match (from, to) {
        (Mode::Upper, Mode::Lower) => &[(28, 5)],
        (Mode::Upper, Mode::Mixed) => &[(29, 5)],
        (Mode::Upper, Mode::Punct) => &[(29, 5), (30, 5)],
        (Mode::Upper, Mode::Digit) => &[(30, 5)],
        // Lower has no latch back to Upper; go through Digit.
        (Mode::Lower, Mode::Upper) => &[(30, 5), (14, 4)],
        (Mode::Lower, Mode::Mixed) => &[(29, 5)],
        (Mode::Lower, Mode::Punct) => &[(29, 5), (30, 5)],
        (Mode::Lower, Mode::Digit) => &[(30, 5)],
        (Mode::Mixed, Mode::Upper) => &[(29, 5)],
        (Mode::Mixed, Mode::Lower) => &[(28, 5)],
        (Mode::Mixed, Mode::Punct) => &[(30, 5)],
        (Mode::Mixed, Mode::Digit) => &[(29, 5), (30, 5)],
        (Mode::Punct, Mode::Upper) => &[(31, 5)],
        (Mode::Punct, Mode::Lower) => &[(31, 5), (28, 5)],
        (Mode::Punct, Mode::Mixed) => &[(31, 5), (29, 5)],
        (Mode::Punct, Mode::Digit) => &[(31, 5), (30, 5)],
        (Mode::Digit, Mode::Upper) => &[(14, 4)],
        (Mode::Digit, Mode::Lower) => &[(14, 4), (28, 5)],
        (Mode::Digit, Mode::Mixed) => &[(14, 4), (29, 5)],
        (Mode::Digit, Mode::Punct) => &[(14, 4), (29, 5), (30, 5)],
        _ => EMPTY,
    }
}

/// The binary-shift code of `mode`, as `(code, width)`. Punctuation and digit modes have no
/// binary shift; the encoder latches to upper mode first.
pub fn binary_shift_code(mode: Mode) -> Option<(u32, u32)> {
    match mode {
        Mode::Upper | Mode::Lower | Mode::Mixed => Some((31, 5)),
        Mode::Punct | Mode::Digit => None,
    }
}

/// The FLG(n) escape, code 0 of the punctuation mode.
pub fn flg_code() -> (u32, u32) {
    (0, 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_upper_codes() {
        assert_eq!(char_code(Mode::Upper, b' '), Some(1));
        assert_eq!(char_code(Mode::Upper, b'A'), Some(2));
        assert_eq!(char_code(Mode::Upper, b'Z'), Some(27));
        assert_eq!(char_code(Mode::Upper, b'a'), None);
        assert_eq!(char_code(Mode::Upper, b'0'), None);
    }

    #[test]
    fn verify_punct_codes() {
        assert_eq!(char_code(Mode::Punct, b'\r'), Some(1));
        assert_eq!(char_code(Mode::Punct, b'!'), Some(6));
        assert_eq!(char_code(Mode::Punct, b'#'), Some(8));
        assert_eq!(char_code(Mode::Punct, b'}'), Some(30));

        assert_eq!(pair_code(b'\r', b'\n'), Some(2));
        assert_eq!(pair_code(b'.', b' '), Some(3));
        assert_eq!(pair_code(b',', b' '), Some(4));
        assert_eq!(pair_code(b':', b' '), Some(5));
        assert_eq!(pair_code(b'.', b'.'), None);
    }

    #[test]
    fn verify_mixed_codes() {
        assert_eq!(char_code(Mode::Mixed, 0x01), Some(2));
        assert_eq!(char_code(Mode::Mixed, 0x0d), Some(14));
        assert_eq!(char_code(Mode::Mixed, 0x1b), Some(15));
        assert_eq!(char_code(Mode::Mixed, 0x1f), Some(19));
        assert_eq!(char_code(Mode::Mixed, b'@'), Some(20));
        assert_eq!(char_code(Mode::Mixed, 0x7f), Some(27));
    }

    #[test]
    fn verify_digit_codes() {
        assert_eq!(char_code(Mode::Digit, b' '), Some(1));
        assert_eq!(char_code(Mode::Digit, b'0'), Some(2));
        assert_eq!(char_code(Mode::Digit, b'9'), Some(11));
        assert_eq!(char_code(Mode::Digit, b','), Some(12));
        assert_eq!(char_code(Mode::Digit, b'.'), Some(13));
    }

    #[test]
    fn verify_code_to_char_inverts_char_code() {
        for mode in MODES {
            for byte in 0..=255u8 {
                if let Some(code) = char_code(mode, byte) {
                    assert_eq!(code_to_char(mode, code), Some(CharCode::Single(byte)));
                }
            }
        }
    }

    #[test]
    fn verify_latch_paths_are_latches() {
        // Every step of every composite path must be a real single-step latch.
        for from in MODES {
            for to in MODES {
                if from == to {
                    continue;
                }
                let path = latch_path(from, to);
                assert!(!path.is_empty(), "missing latch path {:?} -> {:?}", from, to);

                let mut mode = from;
                for &step in path {
                    let next = MODES
                        .into_iter()
                        .find(|&t| latch(mode, t) == Some(step))
                        .unwrap_or_else(|| panic!("bad step {:?} from {:?}", step, mode));
                    mode = next;
                }
                assert_eq!(mode, to);
            }
        }
    }

    #[test]
    fn verify_modes_for_byte() {
        let modes: Vec<Mode> = modes_for_byte(b' ').collect();
        assert_eq!(modes, vec![Mode::Upper, Mode::Lower, Mode::Mixed, Mode::Digit]);

        assert_eq!(modes_for_byte(0x80).count(), 0);
        assert_eq!(modes_for_byte(b'.').collect::<Vec<_>>(), vec![Mode::Punct, Mode::Digit]);
    }
}
