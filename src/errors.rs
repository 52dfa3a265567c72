// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Errors surfaced by key generation and shared-secret derivation.

use core::fmt;
use core::fmt::Display;

/// Reasons a key-exchange operation can fail.
///
/// Errors are returned to the caller and never retried internally.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SidhError {
    /// A caller-supplied input was rejected at the boundary: a secret
    /// scalar outside its range, a generator that is not on the base
    /// curve, or a strategy of the wrong length or with an entry outside
    /// the remaining walk budget.
    MalformedInput,
    /// The counterparty's public key does not describe a usable Montgomery
    /// curve: the coefficient recovery has a zero denominator, the
    /// recovered curve is singular, or a kernel point degenerated during
    /// the walk.
    InvalidPublicKey,
    /// A zero value reached the simultaneous inversion that normalizes the
    /// public key.  This indicates an internal invariant violation and is
    /// fatal to the operation.
    FieldZeroDivision,
}

impl Display for SidhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SidhError::MalformedInput => write!(f, "malformed input"),
            SidhError::InvalidPublicKey => write!(f, "invalid public key"),
            SidhError::FieldZeroDivision => write!(f, "division by zero in field inversion"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SidhError {}
