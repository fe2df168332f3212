// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `highlevel` module translates between byte payloads and the symbology's high-level bit
//! stream.
//!
//! The encoder searches for a shortest bit stream over the five character modes. Rather than a
//! greedy scan with a look-ahead tie breaker, it runs a small dynamic program keyed by
//! (position, mode): every candidate transition (direct code, shift, latch sequence,
//! punctuation pair, binary shift) relaxes a successor state, and the cheapest path through the
//! table is emitted. The decoder is a straightforward mode-tracking loop.

use crate::bits::{BitReaderLtr, BitVec};
use crate::charset::{self, CharCode, Mode, MODES};
use crate::errors::Result;

/// The group-separator byte produced by FLG(0).
const GS: u8 = 0x1d;

/// The longest run coverable by the 5-bit binary-shift length.
const BINARY_SHORT_RUN: usize = 31;

/// The longest run coverable by one extended binary shift: 31 plus an 11-bit extension.
const BINARY_LONG_RUN: usize = 31 + 2047;

// ---- encoder ----

/// One relaxed transition of the dynamic program: the state it came from and the codes the
/// transition appends to the bit stream.
#[derive(Clone)]
struct Step {
    prev_pos: usize,
    prev_mode: usize,
    emit: Vec<(u32, u32)>,
}

/// Encodes `data` into a near-shortest high-level bit stream. Both sides of the channel start
/// in upper mode.
pub fn encode(data: &[u8]) -> BitVec {
    let n = data.len();

    // cost[pos][mode] is the fewest bits that encode data[..pos] and leave the channel in
    // `mode`; step[pos][mode] is the transition that achieved it.
    let mut cost = vec![[u32::MAX; 5]; n + 1];
    let mut step: Vec<[Option<Step>; 5]> = vec![Default::default(); n + 1];
    cost[0][Mode::Upper.index()] = 0;

    fn relax(
        cost: &mut [[u32; 5]],
        step: &mut [[Option<Step>; 5]],
        pos: usize,
        mode: usize,
        new_cost: u32,
        from: (usize, usize),
        emit: Vec<(u32, u32)>,
    ) {
        if new_cost < cost[pos][mode] {
            cost[pos][mode] = new_cost;
            step[pos][mode] = Some(Step { prev_pos: from.0, prev_mode: from.1, emit });
        }
    }

    for pos in 0..n {
        for m_idx in 0..5 {
            let base = cost[pos][m_idx];
            if base == u32::MAX {
                continue;
            }
            let mode = MODES[m_idx];
            let byte = data[pos];
            let from = (pos, m_idx);

            for target in MODES {
                let Some(code) = charset::char_code(target, byte) else { continue };
                let width = target.bit_width();

                if target == mode {
                    relax(&mut cost, &mut step, pos + 1, m_idx, base + width, from, vec![(
                        code, width,
                    )]);
                    continue;
                }

                if let Some((sc, sw)) = charset::shift(mode, target) {
                    // A shift covers one character and falls back to the current mode.
                    relax(&mut cost, &mut step, pos + 1, m_idx, base + sw + width, from, vec![
                        (sc, sw),
                        (code, width),
                    ]);
                }

                let path = charset::latch_path(mode, target);
                let path_bits: u32 = path.iter().map(|&(_, w)| w).sum();
                let mut emit: Vec<(u32, u32)> = path.to_vec();
                emit.push((code, width));
                relax(
                    &mut cost,
                    &mut step,
                    pos + 1,
                    target.index(),
                    base + path_bits + width,
                    from,
                    emit,
                );
            }

            // A two-byte punctuation pair beats any pair of single characters when reachable.
            if pos + 1 < n {
                if let Some(pc) = charset::pair_code(byte, data[pos + 1]) {
                    if mode == Mode::Punct {
                        relax(&mut cost, &mut step, pos + 2, m_idx, base + 5, from, vec![(
                            pc, 5,
                        )]);
                    }
                    else {
                        if let Some((sc, sw)) = charset::shift(mode, Mode::Punct) {
                            relax(&mut cost, &mut step, pos + 2, m_idx, base + sw + 5, from, vec![
                                (sc, sw),
                                (pc, 5),
                            ]);
                        }

                        let path = charset::latch_path(mode, Mode::Punct);
                        let path_bits: u32 = path.iter().map(|&(_, w)| w).sum();
                        let mut emit: Vec<(u32, u32)> = path.to_vec();
                        emit.push((pc, 5));
                        relax(
                            &mut cost,
                            &mut step,
                            pos + 2,
                            Mode::Punct.index(),
                            base + path_bits + 5,
                            from,
                            emit,
                        );
                    }
                }
            }

            // Bytes with no code in any mode force a binary shift covering the whole run.
            if charset::modes_for_byte(byte).next().is_none() {
                let mut run = 1;
                while pos + run < n
                    && run < BINARY_LONG_RUN
                    && charset::modes_for_byte(data[pos + run]).next().is_none()
                {
                    run += 1;
                }

                let mut emit: Vec<(u32, u32)> = Vec::with_capacity(run + 3);
                let mut land = m_idx;

                let (bsc, bsw) = match charset::binary_shift_code(mode) {
                    Some(code) => code,
                    None => {
                        // Digit and punctuation modes cannot open a binary shift.
                        emit.extend_from_slice(charset::latch_path(mode, Mode::Upper));
                        land = Mode::Upper.index();
                        (31, 5)
                    }
                };
                emit.push((bsc, bsw));

                if run <= BINARY_SHORT_RUN {
                    emit.push((run as u32, 5));
                }
                else {
                    emit.push((0, 5));
                    emit.push((run as u32 - 31, 11));
                }

                for &b in &data[pos..pos + run] {
                    emit.push((u32::from(b), 8));
                }

                let bits: u32 = emit.iter().map(|&(_, w)| w).sum();
                relax(&mut cost, &mut step, pos + run, land, base + bits, from, emit);
            }
        }
    }

    // Cheapest terminal state, then walk the transitions back to the start.
    let mut best = Mode::Upper.index();
    for m_idx in 0..5 {
        if cost[n][m_idx] < cost[n][best] {
            best = m_idx;
        }
    }

    let mut steps: Vec<&Step> = Vec::new();
    let mut state = (n, best);
    while state.0 > 0 {
        let s = step[state.0][state.1]
            .as_ref()
            .unwrap_or_else(|| unreachable!("dynamic program left an unreachable state"));
        steps.push(s);
        state = (s.prev_pos, s.prev_mode);
    }

    let mut bits = BitVec::new();
    for s in steps.iter().rev() {
        for &(value, width) in &s.emit {
            bits.push_bits(value, width);
        }
    }
    bits
}

// ---- decoder ----

/// The decoded meaning of one code in a given mode.
enum Sym {
    Char(CharCode),
    Latch(Mode),
    Shift(Mode),
    Binary,
    Flg,
}

fn classify(mode: Mode, code: u32) -> Option<Sym> {
    let sym = match (mode, code) {
        (Mode::Upper | Mode::Lower | Mode::Mixed, 0) => Sym::Shift(Mode::Punct),
        (Mode::Upper, 28) => Sym::Latch(Mode::Lower),
        (Mode::Upper | Mode::Lower, 29) => Sym::Latch(Mode::Mixed),
        (Mode::Upper | Mode::Lower, 30) => Sym::Latch(Mode::Digit),
        (Mode::Upper | Mode::Lower | Mode::Mixed, 31) => Sym::Binary,
        (Mode::Lower, 28) => Sym::Shift(Mode::Upper),
        (Mode::Mixed, 28) => Sym::Latch(Mode::Lower),
        (Mode::Mixed, 29) => Sym::Latch(Mode::Upper),
        (Mode::Mixed, 30) => Sym::Latch(Mode::Punct),
        (Mode::Punct, 0) => Sym::Flg,
        (Mode::Punct, 31) => Sym::Latch(Mode::Upper),
        (Mode::Digit, 0) => Sym::Shift(Mode::Punct),
        (Mode::Digit, 14) => Sym::Latch(Mode::Upper),
        (Mode::Digit, 15) => Sym::Shift(Mode::Upper),
        _ => return charset::code_to_char(mode, code).map(Sym::Char),
    };
    Some(sym)
}

fn push_char(out: &mut Vec<u8>, code: CharCode) {
    match code {
        CharCode::Single(b) => out.push(b),
        CharCode::Pair(b1, b2) => {
            out.push(b1);
            out.push(b2);
        }
    }
}

fn read_flg(reader: &mut BitReaderLtr<'_>, out: &mut Vec<u8>) -> Result<()> {
    match reader.read_bits(3)? {
        0 => out.push(GS),
        // ECI designators are skipped, four bits per digit. FLG(7) is reserved.
        n @ 1..=6 => reader.ignore_bits(4 * n)?,
        _ => (),
    }
    Ok(())
}

fn read_shifted(reader: &mut BitReaderLtr<'_>, target: Mode, out: &mut Vec<u8>) -> Result<()> {
    let code = reader.read_bits(target.bit_width())?;
    if target == Mode::Punct && code == 0 {
        return read_flg(reader, out);
    }
    if let Some(c) = charset::code_to_char(target, code) {
        push_char(out, c);
    }
    Ok(())
}

fn read_binary(reader: &mut BitReaderLtr<'_>, out: &mut Vec<u8>) -> Result<()> {
    let mut len = reader.read_bits(5)? as usize;
    if len == 0 {
        // Extended form: eleven more bits, biased by the short-form maximum.
        len = reader.read_bits(11)? as usize + 31;
    }
    for _ in 0..len {
        out.push(reader.read_bits(8)? as u8);
    }
    Ok(())
}

/// Decodes a high-level bit stream back into bytes.
///
/// The stream carries no explicit terminator; decoding stops when fewer bits remain than the
/// next read requires, returning everything decoded up to that point.
pub fn decode(bits: &BitVec) -> Vec<u8> {
    let mut reader = BitReaderLtr::new(bits);
    let mut out = Vec::new();
    let mut mode = Mode::Upper;

    loop {
        let Ok(code) = reader.read_bits(mode.bit_width()) else { break };

        match classify(mode, code) {
            Some(Sym::Char(c)) => push_char(&mut out, c),
            Some(Sym::Latch(target)) => mode = target,
            Some(Sym::Shift(target)) => {
                if read_shifted(&mut reader, target, &mut out).is_err() {
                    break;
                }
            }
            Some(Sym::Binary) => {
                if read_binary(&mut reader, &mut out).is_err() {
                    break;
                }
            }
            Some(Sym::Flg) => {
                if read_flg(&mut reader, &mut out).is_err() {
                    break;
                }
            }
            // A code with no assignment in the current mode; nothing to emit.
            None => (),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::bits::{BitReaderLtr, BitVec};

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn codes(bits: &BitVec, widths: &[u32]) -> Vec<u32> {
        let mut reader = BitReaderLtr::new(bits);
        widths.iter().map(|&w| reader.read_bits(w).unwrap()).collect()
    }

    #[test]
    fn verify_upper_direct() {
        let bits = encode(b"HELLO WORLD");
        assert_eq!(bits.len(), 55);
        assert_eq!(
            codes(&bits, &[5; 11]),
            vec![9, 6, 13, 13, 16, 1, 24, 16, 19, 13, 5]
        );
    }

    #[test]
    fn verify_lower_latch() {
        let bits = encode(b"hello");
        // Latch upper -> lower, then direct lower codes.
        assert_eq!(codes(&bits, &[5; 6]), vec![28, 9, 6, 13, 13, 16]);
    }

    #[test]
    fn verify_digit_latch() {
        let bits = encode(b"12345");
        assert_eq!(codes(&bits, &[5, 4, 4, 4, 4, 4]), vec![30, 3, 4, 5, 6, 7]);
        assert_eq!(bits.len(), 25);
    }

    #[test]
    fn verify_punct_pair() {
        // A pair code through shift-punct is cheaper than two single characters.
        let bits = encode(b"A. B");
        assert_eq!(codes(&bits, &[5, 5, 5, 5]), vec![2, 0, 3, 3]);
        assert_eq!(decode(&bits), b"A. B");
    }

    #[test]
    fn verify_binary_shift() {
        let bits = encode(&[0x80, 0x81]);
        // Binary shift, length 2, then the raw bytes.
        assert_eq!(codes(&bits, &[5, 5, 8, 8]), vec![31, 2, 0x80, 0x81]);
    }

    #[test]
    fn verify_extended_binary_shift() {
        let data: Vec<u8> = (0..200u16).map(|i| 0x80 | (i % 64) as u8).collect();
        let bits = encode(&data);

        // One extended header instead of chained short shifts.
        assert_eq!(codes(&bits, &[5, 5, 11]), vec![31, 0, 200 - 31]);
        assert_eq!(bits.len(), 5 + 5 + 11 + 8 * 200);
        assert_eq!(decode(&bits), data);
    }

    #[test]
    fn verify_empty() {
        let bits = encode(b"");
        assert!(bits.is_empty());
        assert!(decode(&bits).is_empty());
    }

    #[test]
    fn verify_flg_zero_emits_gs() {
        let mut bits = BitVec::new();
        bits.push_bits(0, 5); // shift punct from upper
        bits.push_bits(0, 5); // FLG
        bits.push_bits(0, 3); // n = 0
        assert_eq!(decode(&bits), vec![0x1d]);
    }

    #[test]
    fn verify_flg_eci_skipped() {
        let mut bits = BitVec::new();
        bits.push_bits(0, 5); // shift punct
        bits.push_bits(0, 5); // FLG
        bits.push_bits(2, 3); // n = 2: skip two 4-bit digits
        bits.push_bits(0b1010_0101, 8);
        bits.push_bits(2, 5); // back in upper: 'A'
        assert_eq!(decode(&bits), b"A");
    }

    #[test]
    fn verify_truncated_stream_keeps_prefix() {
        let mut bits = encode(b"AB");
        // Append half a code.
        bits.push_bits(0b010, 3);
        assert_eq!(decode(&bits), b"AB");
    }

    #[test]
    fn verify_round_trips() {
        let cases: &[&[u8]] = &[
            b"A",
            b"HELLO WORLD",
            b"hello world",
            b"Hello, World! 123",
            b"Code 2D!",
            b"aztec: 3.14159, mixed\x1b@case",
            b"\r\n\r\ntwo pairs",
            b"punct: <>[]{}?",
            b"12345678901234567890",
            b"\x00\x01\x02\x03",
            b"ends with binary \xff\xfe",
            b"\x80mixed\x81binary\x82runs",
        ];

        for &case in cases {
            assert_eq!(decode(&encode(case)), case, "case {:?}", case);
        }
    }

    #[test]
    fn verify_random_round_trips() {
        let mut rng = SmallRng::seed_from_u64(0x42aa);

        for _ in 0..200 {
            let len = rng.random_range(0..64);
            let data: Vec<u8> = (0..len)
                .map(|_| {
                    if rng.random_range(0..4) == 0 {
                        rng.random()
                    }
                    else {
                        rng.random_range(0x20..0x7f)
                    }
                })
                .collect();

            assert_eq!(decode(&encode(&data)), data, "case {:?}", data);
        }
    }
}
