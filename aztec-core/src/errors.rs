// Aztec
// Copyright (c) 2026 The Project Aztec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::result;

/// `AztecError` provides an enumeration of all possible errors reported by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AztecError {
    /// No symbol size can hold the payload at the requested error-correction ratio.
    DataTooLarge,
    /// The Reed-Solomon decoder found more errors than the check words can correct.
    TooManyErrors,
    /// Division by zero in a Galois field.
    DivisionByZero,
    /// The multiplicative inverse of zero was requested in a Galois field.
    UndefinedInverse,
    /// The discrete logarithm of zero was requested in a Galois field.
    UndefinedLog,
    /// The matrix does not carry a recognizable bull's eye, or has invalid dimensions.
    FinderNotFound(&'static str),
    /// The mode message could not be recovered.
    ModeMessageDecodeFailed(&'static str),
    /// A read was attempted past the end of a bit stream.
    TruncatedBitstream,
}

impl AztecError {
    fn as_str(&self) -> &'static str {
        match *self {
            AztecError::DataTooLarge => "data does not fit any symbol size",
            AztecError::TooManyErrors => "too many errors to correct",
            AztecError::DivisionByZero => "division by zero in galois field",
            AztecError::UndefinedInverse => "zero has no multiplicative inverse",
            AztecError::UndefinedLog => "zero has no discrete logarithm",
            AztecError::FinderNotFound(_) => "finder pattern not found",
            AztecError::ModeMessageDecodeFailed(_) => "mode message decode failed",
            AztecError::TruncatedBitstream => "unexpected end of bitstream",
        }
    }
}

impl fmt::Display for AztecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AztecError::FinderNotFound(msg) => {
                write!(f, "finder pattern not found: {}", msg)
            }
            AztecError::ModeMessageDecodeFailed(msg) => {
                write!(f, "mode message decode failed: {}", msg)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

impl error::Error for AztecError {}

pub type Result<T> = result::Result<T, AztecError>;

/// Convenience function to create a finder error.
pub fn finder_error<T>(msg: &'static str) -> Result<T> {
    Err(AztecError::FinderNotFound(msg))
}

/// Convenience function to create a mode-message error.
pub fn mode_message_error<T>(msg: &'static str) -> Result<T> {
    Err(AztecError::ModeMessageDecodeFailed(msg))
}
