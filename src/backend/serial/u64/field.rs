// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2^{250} \cdot 3^{159} - 1\\), using
//! \\(64\\)-bit limbs with \\(128\\)-bit products.
//!
//! Elements are kept in the Montgomery domain: a value \\(a\\) is stored as
//! \\(a \cdot R \bmod p\\) with \\(R = 2^{512}\\), fully reduced below
//! \\(p\\) after every operation.  Montgomery multiplication uses the CIOS
//! schedule; since \\(p \equiv -1 \pmod {2^{64}}\\) the per-word reduction
//! factor is 1, but the code retains the generic multiplication so the
//! prime can be replaced wholesale.
//!
//! All operations are constant time with respect to operand values: there
//! are no data-dependent branches or table lookups, and reductions are
//! applied through masked selection.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::constants;

/// A `FieldElement503` represents an element of the field
/// \\( \mathbb Z / (2^{250} \cdot 3^{159} - 1)\\).
///
/// In the 64-bit implementation, a field element is eight `u64` limbs in
/// little-endian order, holding the Montgomery residue \\(a R \bmod p\\).
#[derive(Copy, Clone, Default)]
pub(crate) struct FieldElement503(pub(crate) [u64; 8]);

/// Compute `a + b + carry`, returning the result and the new carry.
#[inline(always)]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Compute `a - b - borrow`, returning the result and the new borrow.
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, ((t >> 64) as u64) & 1)
}

/// Compute `acc + a * b + carry`, returning the result and the new carry.
#[inline(always)]
const fn mac(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (acc as u128) + (a as u128) * (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

impl Debug for FieldElement503 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement503({:?})", &self.0[..])
    }
}

impl<'a, 'b> Add<&'b FieldElement503> for &'a FieldElement503 {
    type Output = FieldElement503;
    fn add(self, rhs: &'b FieldElement503) -> FieldElement503 {
        let mut sum = [0u64; 8];
        let mut carry = 0;
        for i in 0..8 {
            (sum[i], carry) = adc(self.0[i], rhs.0[i], carry);
        }
        // Both inputs are below p, so the sum is below 2p < 2^504 and the
        // final carry is always clear; reduce with one masked subtraction.
        FieldElement503::reduce_once(sum, carry)
    }
}

impl<'a, 'b> Sub<&'b FieldElement503> for &'a FieldElement503 {
    type Output = FieldElement503;
    fn sub(self, rhs: &'b FieldElement503) -> FieldElement503 {
        let mut diff = [0u64; 8];
        let mut borrow = 0;
        for i in 0..8 {
            (diff[i], borrow) = sbb(self.0[i], rhs.0[i], borrow);
        }
        // Add p back when the subtraction underflowed.
        let mask = borrow.wrapping_neg();
        let mut carry = 0;
        for i in 0..8 {
            (diff[i], carry) = adc(diff[i], constants::PRIME[i] & mask, carry);
        }
        FieldElement503(diff)
    }
}

impl<'a, 'b> Mul<&'b FieldElement503> for &'a FieldElement503 {
    type Output = FieldElement503;
    fn mul(self, rhs: &'b FieldElement503) -> FieldElement503 {
        FieldElement503::montgomery_mul(&self.0, &rhs.0)
    }
}

impl<'a> Neg for &'a FieldElement503 {
    type Output = FieldElement503;
    fn neg(self) -> FieldElement503 {
        &FieldElement503::ZERO - self
    }
}

define_add_variants!(
    LHS = FieldElement503,
    RHS = FieldElement503,
    Output = FieldElement503
);
define_sub_variants!(
    LHS = FieldElement503,
    RHS = FieldElement503,
    Output = FieldElement503
);
define_mul_variants!(
    LHS = FieldElement503,
    RHS = FieldElement503,
    Output = FieldElement503
);

impl ConditionallySelectable for FieldElement503 {
    fn conditional_select(
        a: &FieldElement503,
        b: &FieldElement503,
        choice: Choice,
    ) -> FieldElement503 {
        let mut limbs = [0u64; 8];
        for i in 0..8 {
            limbs[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement503(limbs)
    }
}

impl ConstantTimeEq for FieldElement503 {
    /// Test equality between two `FieldElement503`s.  The representation is
    /// kept fully reduced, so limbwise comparison is canonical.
    fn ct_eq(&self, other: &FieldElement503) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for FieldElement503 {
    fn eq(&self, other: &FieldElement503) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement503 {}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement503 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl FieldElement503 {
    pub(crate) const fn from_limbs(limbs: [u64; 8]) -> FieldElement503 {
        FieldElement503(limbs)
    }

    /// The element \\( 0 \\).
    pub(crate) const ZERO: FieldElement503 = FieldElement503::from_limbs([0, 0, 0, 0, 0, 0, 0, 0]);
    /// The element \\( 1 \\) (the Montgomery residue \\(R \bmod p\\)).
    pub(crate) const ONE: FieldElement503 = constants::MONTGOMERY_ONE;

    /// Reduce a 504-bit value (eight limbs plus a carry word) that is known
    /// to be below \\(2p\\) into \\([0, p)\\) with one masked subtraction.
    fn reduce_once(limbs: [u64; 8], extra: u64) -> FieldElement503 {
        let mut r = [0u64; 8];
        let mut borrow = 0;
        for i in 0..8 {
            (r[i], borrow) = sbb(limbs[i], constants::PRIME[i], borrow);
        }
        let (_, borrow) = sbb(extra, 0, borrow);
        // borrow set => the value was already below p; keep the original.
        let mask = borrow.wrapping_neg();
        let mut out = [0u64; 8];
        for i in 0..8 {
            out[i] = r[i] ^ (mask & (r[i] ^ limbs[i]));
        }
        FieldElement503(out)
    }

    /// CIOS Montgomery multiplication: returns \\(a b R^{-1} \bmod p\\).
    fn montgomery_mul(a: &[u64; 8], b: &[u64; 8]) -> FieldElement503 {
        let mut t = [0u64; 9];
        let mut t_top: u64 = 0;
        for i in 0..8 {
            // t += a * b[i]
            let mut carry = 0;
            for j in 0..8 {
                (t[j], carry) = mac(t[j], a[j], b[i], carry);
            }
            let (t8, c) = adc(t[8], carry, 0);
            t[8] = t8;
            t_top = c;

            // t += (t[0] * p') * p, clearing the low word
            let m = t[0].wrapping_mul(constants::PRIME_INV_NEG);
            let mut carry = 0;
            for j in 0..8 {
                (t[j], carry) = mac(t[j], m, constants::PRIME[j], carry);
            }
            let (t8, c) = adc(t[8], carry, 0);
            t[8] = t8;
            t_top += c;

            // divide by 2^64
            for j in 0..8 {
                t[j] = t[j + 1];
            }
            t[8] = t_top;
            t_top = 0;
        }
        // Since p < R/4 the accumulator is below 2p here.
        let mut limbs = [0u64; 8];
        limbs.copy_from_slice(&t[..8]);
        FieldElement503::reduce_once(limbs, t[8])
    }

    /// Compute `self^2`.
    pub(crate) fn square(&self) -> FieldElement503 {
        FieldElement503::montgomery_mul(&self.0, &self.0)
    }

    /// Halve this element: multiply by the inverse of 2.
    ///
    /// Used to derive \\((A+2)/4\\)-style ladder constants without a field
    /// inversion.
    pub(crate) fn div2(&self) -> FieldElement503 {
        // Make the value even by conditionally adding p, then shift right.
        let mask = (self.0[0] & 1).wrapping_neg();
        let mut s = [0u64; 8];
        let mut carry = 0;
        for i in 0..8 {
            (s[i], carry) = adc(self.0[i], constants::PRIME[i] & mask, carry);
        }
        let mut out = [0u64; 8];
        for i in 0..7 {
            out[i] = (s[i] >> 1) | (s[i + 1] << 63);
        }
        out[7] = (s[7] >> 1) | (carry << 63);
        FieldElement503(out)
    }

    /// Raise this element to the power given by a little-endian limb
    /// exponent.  The exponent is public (it is always \\(p-2\\)); the
    /// square-and-multiply schedule is nevertheless fixed, with the
    /// multiply applied through masked selection.
    fn pow_limbs(&self, exp: &[u64; 8]) -> FieldElement503 {
        let mut acc = FieldElement503::ONE;
        for i in (0..8).rev() {
            for bit in (0..64).rev() {
                acc = acc.square();
                let t = &acc * self;
                acc.conditional_assign(&t, Choice::from(((exp[i] >> bit) & 1) as u8));
            }
        }
        acc
    }

    /// Compute the multiplicative inverse \\(a^{p-2}\\) of this element.
    ///
    /// Returns zero for a zero input; callers that must distinguish the
    /// degenerate case check for zero first.
    pub(crate) fn invert(&self) -> FieldElement503 {
        self.pow_limbs(&constants::PRIME_MINUS_TWO)
    }

    /// Test whether this element is zero, in constant time.
    pub(crate) fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement503::ZERO)
    }

    /// Parse a canonical 63-byte little-endian encoding.  The conversion
    /// into the Montgomery domain only happens for in-range values; the
    /// returned `CtOption` is `None` when the encoding is not below p.
    pub(crate) fn from_canonical_bytes(bytes: &[u8; 63]) -> CtOption<FieldElement503> {
        let mut limbs = [0u64; 8];
        for (i, b) in bytes.iter().enumerate() {
            limbs[i / 8] |= (*b as u64) << (8 * (i % 8));
        }
        // in range iff limbs - p borrows
        let mut borrow = 0;
        for i in 0..8 {
            let (_, b) = sbb(limbs[i], constants::PRIME[i], borrow);
            borrow = b;
        }
        let element = FieldElement503::montgomery_mul(&limbs, &constants::MONTGOMERY_RSQ.0);
        CtOption::new(element, Choice::from(borrow as u8))
    }

    /// Serialize to the canonical 63-byte little-endian encoding.
    pub(crate) fn as_bytes(&self) -> [u8; 63] {
        // Leave the Montgomery domain: multiply by 1 and reduce.
        let plain = FieldElement503::montgomery_mul(&self.0, &[1, 0, 0, 0, 0, 0, 0, 0]);
        let mut bytes = [0u8; 63];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (plain.0[i / 8] >> (8 * (i % 8))) as u8;
        }
        bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // A few arbitrary canonical encodings for identity tests.
    fn fe(hexstr: &str) -> FieldElement503 {
        let v = hex::decode(hexstr).unwrap();
        let mut bytes = [0u8; 63];
        bytes.copy_from_slice(&v);
        FieldElement503::from_canonical_bytes(&bytes).unwrap()
    }

    fn a() -> FieldElement503 {
        fe("5257dbb942d5251afe09160e78afb7ccbdea78eb8c8440844c5f49e61b0a35aecfc1d8591c403a06d2336e744de84e30637456eb26d936db8b8daeb30d9f1e")
    }

    fn b() -> FieldElement503 {
        fe("c36bbb91c2d26cd2a3082549d15eadd8e73b73bf0e094464c60891897cd42d3bf11276237b6f23d71aae3048471bc0776ce4628c8e250a6ef5610df07f3301")
    }

    #[test]
    fn one_times_one() {
        assert_eq!(&FieldElement503::ONE * &FieldElement503::ONE, FieldElement503::ONE);
    }

    #[test]
    fn bytes_roundtrip() {
        let x = a();
        let bytes = x.as_bytes();
        let y = FieldElement503::from_canonical_bytes(&bytes).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn from_bytes_rejects_noncanonical() {
        // p - 1 is canonical; p is not.
        let mut pm1 = [0xFFu8; 63];
        pm1[62] = 0; // definitely below p
        assert!(bool::from(FieldElement503::from_canonical_bytes(&pm1).is_some()));
        let mut p_bytes = [0u8; 63];
        for i in 0..63 {
            p_bytes[i] = (constants::PRIME[i / 8] >> (8 * (i % 8))) as u8;
        }
        assert!(bool::from(FieldElement503::from_canonical_bytes(&p_bytes).is_none()));
    }

    #[test]
    fn add_neg_is_zero() {
        let x = a();
        assert_eq!(&x + &(-&x), FieldElement503::ZERO);
    }

    #[test]
    fn mul_distributes_over_add() {
        let (x, y) = (a(), b());
        let z = &x + &y;
        let lhs = &z * &x;
        let rhs = &(&x * &x) + &(&y * &x);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn square_matches_mul() {
        let x = b();
        assert_eq!(x.square(), &x * &x);
    }

    #[test]
    fn div2_doubles_back() {
        for x in [a(), b(), FieldElement503::ONE] {
            let h = x.div2();
            assert_eq!(&h + &h, x);
        }
    }

    #[test]
    fn invert_roundtrips() {
        let x = a();
        assert_eq!(&x * &x.invert(), FieldElement503::ONE);
    }

    #[test]
    fn invert_zero_is_zero() {
        assert_eq!(FieldElement503::ZERO.invert(), FieldElement503::ZERO);
    }
}
