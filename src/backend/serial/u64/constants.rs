// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Limb-level constants for the 64-bit backend.
//!
//! All `FieldElement503` constants are in the Montgomery domain, i.e. a
//! value \\(a\\) is stored as \\(a \cdot R \bmod p\\) with \\(R = 2^{512}\\).
//! Raw limb arrays (the prime, the inversion exponent) are plain integers.

use crate::backend::serial::u64::field::FieldElement503;

/// The prime \\(p = 2^{250} \cdot 3^{159} - 1\\), little-endian limbs.
pub(crate) const PRIME: [u64; 8] = [
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xABFF_FFFF_FFFF_FFFF,
    0x1308_5BDA_2211_E7A0,
    0x1B9B_F6C8_7B7E_7DAF,
    0x6045_C6BD_DA77_A4D0,
    0x0040_66F5_4181_1E1E,
];

/// The Fermat inversion exponent \\(p - 2\\), little-endian limbs.
pub(crate) const PRIME_MINUS_TWO: [u64; 8] = [
    0xFFFF_FFFF_FFFF_FFFD,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xABFF_FFFF_FFFF_FFFF,
    0x1308_5BDA_2211_E7A0,
    0x1B9B_F6C8_7B7E_7DAF,
    0x6045_C6BD_DA77_A4D0,
    0x0040_66F5_4181_1E1E,
];

/// \\(-p^{-1} \bmod 2^{64}\\).  Since \\(p \equiv -1 \pmod{2^{64}}\\) for
/// every SIDH-shaped prime, this is just 1; the reduction code keeps the
/// multiplication so that the prime can be swapped without touching it.
pub(crate) const PRIME_INV_NEG: u64 = 0x0000_0000_0000_0001;

/// \\(R \bmod p\\): the Montgomery-domain representation of 1.
pub(crate) const MONTGOMERY_ONE: FieldElement503 = FieldElement503::from_limbs([
    0x0000_0000_0000_03F9,
    0x0000_0000_0000_0000,
    0x0000_0000_0000_0000,
    0xB400_0000_0000_0000,
    0x63CB_1A6E_A6DE_D2B4,
    0x5168_9D8D_667E_B37D,
    0x8ACD_77C7_1AB2_4142,
    0x0026_FBAE_C60F_5953,
]);

/// \\(R^2 \bmod p\\), the to-Montgomery conversion factor.
pub(crate) const MONTGOMERY_RSQ: FieldElement503 = FieldElement503::from_limbs([
    0x5289_A0CF_641D_011F,
    0x9B88_2571_89FE_D2B9,
    0xA3B3_65D5_8DC8_F17A,
    0x5BC5_7AB6_EFF1_68EC,
    0x9E51_998B_D84D_4423,
    0xBF89_99CB_AC3B_5695,
    0x46E9_127B_CE14_CDB6,
    0x003F_6CFC_E8B8_1771,
]);

/// The affine x-coordinate of the 2-power torsion generator
/// \\(P_A \in E_0(\mathbb F_p)\\) of order \\(2^{250}\\).
pub(crate) const AFFINE_X_PA: FieldElement503 = FieldElement503::from_limbs([
    0x5843_4DFE_4DA5_7B0F,
    0x1234_0D1F_ADB8_6715,
    0xCD4C_3CBD_E208_EEC0,
    0x7FDD_4B42_C9DA_B2BF,
    0xEC54_D63B_29E9_CFAB,
    0xD930_6E1F_5FC1_B22A,
    0xF9B3_215C_1A75_B843,
    0x001B_5AB2_9BD1_D50A,
]);

/// The affine y-coordinate of \\(P_A\\).
pub(crate) const AFFINE_Y_PA: FieldElement503 = FieldElement503::from_limbs([
    0x330B_ED7C_1142_42AA,
    0x9995_ADAD_9D6B_E2F4,
    0x350A_325A_F500_6595,
    0x5CB4_307D_7590_F21D,
    0x56BD_C7B2_4778_4A3B,
    0xCD61_3C2B_2ECA_A6A6,
    0x4B31_6D80_EABA_CF83,
    0x002A_C524_E9E1_6B6C,
]);

/// The affine x-coordinate of the 3-power torsion generator
/// \\(P_B \in E_0(\mathbb F_p)\\) of order \\(3^{159}\\).
pub(crate) const AFFINE_X_PB: FieldElement503 = FieldElement503::from_limbs([
    0x42BD_E740_9338_F131,
    0xD208_7345_B294_4B0E,
    0x55B1_C691_8603_B8E3,
    0x6A7B_762E_C7C9_E176,
    0x0F47_0FA1_9CA5_1145,
    0xE8A1_2F2A_6D41_9B95,
    0xCEE6_CDE6_C531_4213,
    0x0002_B22D_9ADB_6994,
]);

/// The affine y-coordinate of \\(P_B\\).
pub(crate) const AFFINE_Y_PB: FieldElement503 = FieldElement503::from_limbs([
    0x2AB9_8313_5B55_3FA8,
    0x8553_C908_DEFC_3C28,
    0xA7DD_B6C5_424A_04CB,
    0x7010_310C_ED82_C789,
    0x9D58_2013_D230_A596,
    0x5844_288C_46CD_8EB9,
    0xAC69_F856_3CED_2011,
    0x0009_B5C4_91B4_3653,
]);
