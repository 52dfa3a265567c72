// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! The `u64` backend: base field arithmetic with 64-bit limbs and 128-bit
//! intermediate products.

pub(crate) mod constants;
pub(crate) mod field;
