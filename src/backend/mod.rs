// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! **INTERNALS:** Pluggable implementations for different architectures.
//!
//! The [`serial`] backend contains the 64-bit implementation of the base
//! field arithmetic.  The walk itself is backend-agnostic: everything above
//! this module speaks `field::FieldElement`, which is a type alias into the
//! selected backend.

pub(crate) mod serial;
