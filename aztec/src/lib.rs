// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project Aztec is a pure Rust encoder and decoder for Aztec 2D barcode symbols.
//!
//! Encoding turns a byte payload into a [`Code`] holding the module grid of the smallest
//! symbol that carries the payload at the requested error-correction level. Decoding accepts a
//! square [`BitMatrix`] in canonical orientation and recovers the payload, correcting module
//! errors up to the strength of the symbol's Reed-Solomon protection.
//!
//! ```
//! use aztec::{decode, encode, EncodeOptions};
//!
//! let code = encode(b"HELLO WORLD", &EncodeOptions::default()).unwrap();
//! assert!(code.compact);
//!
//! let payload = decode(&code.matrix).unwrap();
//! assert_eq!(payload, b"HELLO WORLD");
//! ```
//!
//! Image capture concerns (binarization, perspective correction, rotation search) and symbol
//! renderers are out of scope; the library begins and ends at the module grid.

pub use aztec_core::decoder::decode;
pub use aztec_core::encoder::{encode, Code, EncodeOptions};
pub use aztec_core::errors::{AztecError, Result};
pub use aztec_core::matrix::BitMatrix;

pub use aztec_core as core;
