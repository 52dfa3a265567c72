// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2^{250} \cdot 3^{159} - 1\\).
//!
//! The `sidh_core::field` module provides a type alias
//! `sidh_core::field::FieldElement` to the field element type defined in
//! the `backend` module.
//!
//! Operations defined in terms of machine words, such as multiplication or
//! squaring, live in the backend; everything above this module is
//! backend-agnostic.

pub(crate) type FieldElement = crate::backend::serial::u64::field::FieldElement503;
