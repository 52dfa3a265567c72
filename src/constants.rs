// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! The p503 parameter set and the precomputed walk strategies.
//!
//! The prime is \\(p = 2^{250} \cdot 3^{159} - 1\\) and the base curve is
//! \\(E_0 : y^2 = x^3 + x\\).  The torsion generators are
//! \\(\mathbb F_p\\)-rational points of exact order \\(2^{250}\\) and
//! \\(3^{159}\\), chosen so that \\([2^{248}] P_A\\) has x-coordinate 1,
//! the invariant the special first 4-isogeny relies on.
//!
//! The strategies were computed offline with the usual dynamic program
//! over the walk's cost model (two doublings against one 4-isogeny
//! evaluation for Alice, one tripling against one 3-isogeny evaluation
//! for Bob).  Any table satisfying the split bounds produces the same
//! keys; these minimize work.  `STRATEGY[s - 1]` is the number of levels
//! to descend when the remaining subtree has size `s`.

use crate::backend::serial::u64::constants as backend;
use crate::fp2::ExtensionFieldElement;
use crate::sidh::SidhParams;

/// The p503 parameter table.
pub const P503_PARAMS: SidhParams = SidhParams {
    e_a: 250,
    e_b: 159,
    bits_a: 250,
    bits_b: 253,
    order_b: [
        0x2B, 0xE8, 0x79, 0x84, 0x88, 0xF6, 0x16, 0xC2,
        0xC4, 0x6B, 0x9F, 0xDF, 0x1E, 0xB2, 0xFD, 0xE6,
        0x06, 0x34, 0xE9, 0x9D, 0x76, 0xAF, 0x71, 0x11,
        0x98, 0x87, 0x47, 0x60, 0x50, 0xBD, 0x19, 0x10,
    ],
    xpa: ExtensionFieldElement::from_real(backend::AFFINE_X_PA),
    ypa: ExtensionFieldElement::from_real(backend::AFFINE_Y_PA),
    xpb: ExtensionFieldElement::from_real(backend::AFFINE_X_PB),
    ypb: ExtensionFieldElement::from_real(backend::AFFINE_Y_PB),
};

/// Alice's optimal strategy for the depth-124 walk of 4-isogenies.
#[rustfmt::skip]
pub static P503_ALICE_STRATEGY: [usize; 123] = [
     1,  1,  1,  2,  2,  2,  3,  4,  4,  4,  4,  5,  5,  6,  7,  7,
     8,  8,  8,  8,  9,  9,  9,  9, 10, 11, 12, 12, 12, 13, 14, 15,
    15, 15, 15, 15, 16, 17, 17, 17, 17, 17, 17, 17, 18, 19, 20, 21,
    21, 21, 21, 21, 21, 22, 23, 24, 25, 26, 27, 27, 27, 27, 27, 27,
    28, 28, 29, 30, 31, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32,
    33, 34, 35, 36, 37, 37, 38, 38, 38, 38, 38, 38, 38, 38, 38, 38,
    38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 48, 48, 48, 48, 48,
    48, 49, 49, 49, 49, 49, 49, 50, 51, 52, 53,
];

/// Bob's optimal strategy for the depth-159 walk of 3-isogenies.
#[rustfmt::skip]
pub static P503_BOB_STRATEGY: [usize; 158] = [
     1,  1,  1,  1,  2,  2,  2,  3,  3,  3,  3,  4,  5,  5,  5,  5,
     5,  5,  6,  7,  8,  8,  8,  8,  8,  8,  8,  8,  8,  9, 10, 11,
    12, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 14,
    15, 16, 17, 18, 19, 20, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21,
    21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31, 32, 33, 34, 34, 34, 34, 34, 34, 34, 34,
    34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34,
    34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 34, 35, 36, 37, 38, 39,
    40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55,
    55, 55, 55, 55, 55, 55, 55, 55, 55, 55, 55, 55, 55, 55,
];
