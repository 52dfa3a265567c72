// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
//------------------------------------------------------------------------
// Documentation:
//------------------------------------------------------------------------
#![doc = include_str!("../README.md")]
//------------------------------------------------------------------------
// Linting:
//------------------------------------------------------------------------
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

//------------------------------------------------------------------------
// sidh-core public modules
//------------------------------------------------------------------------

// Key generation and shared-secret derivation for both parties
pub mod sidh;

// Errors surfaced by the public entry points
pub mod errors;

// The p503 parameter set and precomputed walk strategies
pub mod constants;

//------------------------------------------------------------------------
// sidh-core internal modules
//------------------------------------------------------------------------

// Macros for deriving owned-operand arithmetic from borrowed-operand impls
#[macro_use]
pub(crate) mod macros;

// Finite field arithmetic mod p = 2^250 * 3^159 - 1
pub(crate) mod field;

// Arithmetic backends (using u64 limbs) live here
pub(crate) mod backend;

// The quadratic extension field F_{p^2} = F_p(i)
pub(crate) mod fp2;

// Projective x-only points and curves in Montgomery form
pub(crate) mod montgomery;

// 4- and 3-isogeny computation and evaluation
pub(crate) mod isogeny;

// The strategy-driven isogeny-tree traversal
pub(crate) mod walk;
