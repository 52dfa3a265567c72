// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Key generation and shared-secret derivation for both parties of the
//! key exchange.
//!
//! Alice walks the 4-isogeny tree: her kernel has order \\(2^{e_A}\\),
//! one special first step leaves the base curve, and
//! \\(e_A/2 - 1\\) generic rows follow.  Bob walks the 3-isogeny tree of
//! depth \\(e_B\\) with no special step.  Key generation pushes the
//! counterparty's torsion basis \\((x_P, x_Q, x_{Q-P})\\) through every
//! isogeny and normalizes the three results with a single simultaneous
//! inversion; shared-secret derivation rebuilds the peer's curve from
//! those three values, walks again, and returns the j-invariant of the
//! final curve.
//!
//! Each entry point is a pure function of its inputs.  The fast variants
//! consume a precomputed strategy; the `_simple` variants run the
//! textbook recursion and exist as an equivalence oracle.

use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::errors::SidhError;
use crate::fp2::{inv_3_way, ExtensionFieldElement};
use crate::montgomery::{
    distort_and_diff, ladder_3pt, secret_point, ProjectiveCurveParameters, ProjectivePoint,
};
use crate::walk::{traverse, traverse_simple, FourStep, ThreeStep};

/// The length of a secret scalar encoding, in bytes.
pub const SECRET_KEY_BYTES: usize = 32;
/// The length of a public key encoding, in bytes.
pub const PUBLIC_KEY_BYTES: usize = 378;
/// The length of a shared secret encoding, in bytes.
pub const SHARED_SECRET_BYTES: usize = 126;

/// The two roles of the key exchange.
///
/// Alice owns the \\(2^{e_A}\\) torsion and computes 4-isogenies; Bob owns
/// the \\(3^{e_B}\\) torsion and computes 3-isogenies.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Party {
    /// The 2-power side.
    Alice,
    /// The 3-power side.
    Bob,
}

/// The external parameter table for one SIDH prime: torsion exponents,
/// scalar bit lengths, and the affine base-curve generators of both
/// torsion bases.
///
/// The crate ships [`crate::constants::P503_PARAMS`]; the generators are
/// validated against the base curve at every use, so a corrupted table is
/// reported rather than walked on.
#[derive(Copy, Clone, Debug)]
pub struct SidhParams {
    /// Alice's torsion exponent \\(e_A\\).
    pub(crate) e_a: usize,
    /// Bob's torsion exponent \\(e_B\\).
    pub(crate) e_b: usize,
    /// Ladder bit length for Alice's scalars (\\(e_A\\)).
    pub(crate) bits_a: usize,
    /// Ladder bit length for Bob's scalars (\\(\lceil \log_2 3^{e_B} \rceil\\)).
    pub(crate) bits_b: usize,
    /// Bob's scalar bound \\(3^{e_B}\\), little-endian.
    pub(crate) order_b: [u8; 32],
    /// x-coordinate of Alice's generator \\(P_A\\).
    pub(crate) xpa: ExtensionFieldElement,
    /// y-coordinate of \\(P_A\\).
    pub(crate) ypa: ExtensionFieldElement,
    /// x-coordinate of Bob's generator \\(P_B\\).
    pub(crate) xpb: ExtensionFieldElement,
    /// y-coordinate of \\(P_B\\).
    pub(crate) ypb: ExtensionFieldElement,
}

impl SidhParams {
    /// Alice's walk depth: the special first step absorbs two levels of
    /// \\(e_A\\), the remaining \\(e_A/2 - 1\\) rows are generic.
    pub(crate) fn max_alice(&self) -> usize {
        self.e_a / 2 - 1
    }

    /// Bob's walk depth.
    pub(crate) fn max_bob(&self) -> usize {
        self.e_b
    }
}

/// A public key: the images \\((x_{\phi(P)}, x_{\phi(Q)}, x_{\phi(Q-P)})\\)
/// of the counterparty's torsion basis, affinely normalized.
#[derive(Copy, Clone, Debug)]
pub struct PublicKey {
    pub(crate) xs: [ExtensionFieldElement; 3],
}

impl ConstantTimeEq for PublicKey {
    fn ct_eq(&self, other: &PublicKey) -> Choice {
        self.xs[0].ct_eq(&other.xs[0])
            & self.xs[1].ct_eq(&other.xs[1])
            & self.xs[2].ct_eq(&other.xs[2])
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &PublicKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PublicKey {}

impl PublicKey {
    /// Serialize to the canonical 378-byte encoding: the three
    /// x-coordinates in order, each 126 bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        let mut bytes = [0u8; PUBLIC_KEY_BYTES];
        for (chunk, x) in bytes.chunks_exact_mut(126).zip(self.xs.iter()) {
            chunk.copy_from_slice(&x.as_bytes());
        }
        bytes
    }

    /// Parse a canonical encoding.  Rejects out-of-range field elements;
    /// consistency of the three coordinates is only checked when the key
    /// is used, by the curve recovery.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_BYTES]) -> Result<PublicKey, SidhError> {
        let mut xs = [ExtensionFieldElement::ZERO; 3];
        for (chunk, x) in bytes.chunks_exact(126).zip(xs.iter_mut()) {
            let mut buf = [0u8; 126];
            buf.copy_from_slice(chunk);
            *x = Option::from(ExtensionFieldElement::from_canonical_bytes(&buf))
                .ok_or(SidhError::MalformedInput)?;
        }
        Ok(PublicKey { xs })
    }
}

/// A shared secret: the j-invariant of the final curve.
#[derive(Copy, Clone, Debug)]
pub struct SharedSecret {
    pub(crate) j: ExtensionFieldElement,
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &SharedSecret) -> Choice {
        self.j.ct_eq(&other.j)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &SharedSecret) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl SharedSecret {
    /// Serialize to the canonical 126-byte encoding.
    pub fn to_bytes(&self) -> [u8; SHARED_SECRET_BYTES] {
        self.j.as_bytes()
    }
}

/// Generate a public key with the strategy-driven walk.
///
/// `strategy` must have length depth − 1 for the party's walk depth, with
/// every split inside the remaining budget; the shipped tables are
/// [`crate::constants::P503_ALICE_STRATEGY`] and
/// [`crate::constants::P503_BOB_STRATEGY`].
pub fn keygen(
    party: Party,
    secret: &[u8; SECRET_KEY_BYTES],
    params: &SidhParams,
    strategy: &[usize],
) -> Result<PublicKey, SidhError> {
    match party {
        Party::Alice => alice_keygen(secret, params, Some(strategy)),
        Party::Bob => bob_keygen(secret, params, Some(strategy)),
    }
}

/// Generate a public key with the multiply-then-isogenize recursion.
/// Identical output to [`keygen`] for every valid strategy.
pub fn keygen_simple(
    party: Party,
    secret: &[u8; SECRET_KEY_BYTES],
    params: &SidhParams,
) -> Result<PublicKey, SidhError> {
    match party {
        Party::Alice => alice_keygen(secret, params, None),
        Party::Bob => bob_keygen(secret, params, None),
    }
}

/// Derive the shared secret from the counterparty's public key with the
/// strategy-driven walk.
pub fn shared_secret(
    party: Party,
    secret: &[u8; SECRET_KEY_BYTES],
    peer: &PublicKey,
    params: &SidhParams,
    strategy: &[usize],
) -> Result<SharedSecret, SidhError> {
    match party {
        Party::Alice => alice_shared_secret(secret, peer, params, Some(strategy)),
        Party::Bob => bob_shared_secret(secret, peer, params, Some(strategy)),
    }
}

/// Derive the shared secret with the multiply-then-isogenize recursion.
/// Identical output to [`shared_secret`].
pub fn shared_secret_simple(
    party: Party,
    secret: &[u8; SECRET_KEY_BYTES],
    peer: &PublicKey,
    params: &SidhParams,
) -> Result<SharedSecret, SidhError> {
    match party {
        Party::Alice => alice_shared_secret(secret, peer, params, None),
        Party::Bob => bob_shared_secret(secret, peer, params, None),
    }
}

/// Validate and normalize Alice's scalar: reject values at or above
/// \\(2^{e_A}\\), clear the low bit (Alice's scalars are even), and
/// reject a zero result.
fn alice_scalar(
    secret: &[u8; SECRET_KEY_BYTES],
    params: &SidhParams,
) -> Result<[u8; SECRET_KEY_BYTES], SidhError> {
    let mut k = *secret;
    // No bit at or above e_a may be set.
    let mut high = 0u8;
    for (i, byte) in k.iter().enumerate() {
        let bit0 = 8 * i;
        if bit0 >= params.e_a {
            high |= *byte;
        } else if bit0 + 8 > params.e_a {
            high |= *byte >> (params.e_a - bit0);
        }
    }
    if high != 0 {
        return Err(SidhError::MalformedInput);
    }
    k[0] &= 0xFE;
    if k.iter().all(|b| *b == 0) {
        return Err(SidhError::MalformedInput);
    }
    Ok(k)
}

/// Validate Bob's scalar: it must lie in \\([1, 3^{e_B})\\).
fn bob_scalar(
    secret: &[u8; SECRET_KEY_BYTES],
    params: &SidhParams,
) -> Result<[u8; SECRET_KEY_BYTES], SidhError> {
    // secret < order iff the subtraction borrows
    let mut borrow = 0u16;
    for i in 0..SECRET_KEY_BYTES {
        let d = (secret[i] as u16)
            .wrapping_sub(params.order_b[i] as u16)
            .wrapping_sub(borrow);
        borrow = (d >> 8) & 1;
    }
    if borrow == 0 {
        return Err(SidhError::MalformedInput);
    }
    if secret.iter().all(|b| *b == 0) {
        return Err(SidhError::MalformedInput);
    }
    Ok(*secret)
}

/// Check that an affine point lies on the base curve
/// \\(y^2 = x^3 + x\\); a generator table that fails this is corrupt.
fn on_base_curve(x: &ExtensionFieldElement, y: &ExtensionFieldElement) -> bool {
    let rhs = &(&x.square() * x) + x;
    y.square() == rhs
}

fn validate_generators(params: &SidhParams) -> Result<(), SidhError> {
    if on_base_curve(&params.xpa, &params.ypa) && on_base_curve(&params.xpb, &params.ypb) {
        Ok(())
    } else {
        Err(SidhError::MalformedInput)
    }
}

fn alice_keygen(
    secret: &[u8; SECRET_KEY_BYTES],
    params: &SidhParams,
    strategy: Option<&[usize]>,
) -> Result<PublicKey, SidhError> {
    let k = alice_scalar(secret, params)?;
    validate_generators(params)?;

    let r = secret_point(&params.xpa, &k, params.bits_a);
    // Bob's torsion basis: x(P_B), x(tau(P_B)) = -x(P_B), x(tau(P_B) - P_B).
    let mut aux = [
        ProjectivePoint::from_affine(params.xpb),
        ProjectivePoint::from_affine(-&params.xpb),
        distort_and_diff(&params.xpb),
    ];

    // The special first step off the base curve.
    let (curve, first) = crate::isogeny::FirstFourIsogeny::compute(&ExtensionFieldElement::ZERO);
    let r = first.eval(&r);
    for point in aux.iter_mut() {
        *point = first.eval(point);
    }

    let max = params.max_alice();
    match strategy {
        Some(splits) => {
            traverse::<FourStep>(curve, r, splits, max, &mut aux)?;
        }
        None => {
            traverse_simple::<FourStep>(curve, r, max, &mut aux)?;
        }
    }

    let (z1_inv, z2_inv, z3_inv) = inv_3_way(&aux[0].Z, &aux[1].Z, &aux[2].Z)?;
    Ok(PublicKey {
        xs: [
            &aux[0].X * &z1_inv,
            &aux[1].X * &z2_inv,
            &aux[2].X * &z3_inv,
        ],
    })
}

fn bob_keygen(
    secret: &[u8; SECRET_KEY_BYTES],
    params: &SidhParams,
    strategy: Option<&[usize]>,
) -> Result<PublicKey, SidhError> {
    let k = bob_scalar(secret, params)?;
    validate_generators(params)?;

    let r = secret_point(&params.xpb, &k, params.bits_b);
    // Alice's torsion basis images travel through Bob's walk.
    let mut aux = [
        ProjectivePoint::from_affine(params.xpa),
        ProjectivePoint::from_affine(-&params.xpa),
        distort_and_diff(&params.xpa),
    ];

    let max = params.max_bob();
    match strategy {
        Some(splits) => {
            traverse::<ThreeStep>(ProjectiveCurveParameters::BASE, r, splits, max, &mut aux)?;
        }
        None => {
            traverse_simple::<ThreeStep>(ProjectiveCurveParameters::BASE, r, max, &mut aux)?;
        }
    }

    let (z1_inv, z2_inv, z3_inv) = inv_3_way(&aux[0].Z, &aux[1].Z, &aux[2].Z)?;
    Ok(PublicKey {
        xs: [
            &aux[0].X * &z1_inv,
            &aux[1].X * &z2_inv,
            &aux[2].X * &z3_inv,
        ],
    })
}

fn alice_shared_secret(
    secret: &[u8; SECRET_KEY_BYTES],
    peer: &PublicKey,
    params: &SidhParams,
    strategy: Option<&[usize]>,
) -> Result<SharedSecret, SidhError> {
    let k = alice_scalar(secret, params)?;
    let [x1, x2, x3] = peer.xs;
    let start = ProjectiveCurveParameters::recover(&x1, &x2, &x3)
        .ok_or(SidhError::InvalidPublicKey)?;

    let diff = ProjectivePoint::from_affine(x3);
    let r = ladder_3pt(&k, params.bits_a, &x1, &x2, &diff, &start.A);

    let (curve, first) = crate::isogeny::FirstFourIsogeny::compute(&start.A);
    let r = first.eval(&r);

    let max = params.max_alice();
    let final_curve = match strategy {
        Some(splits) => traverse::<FourStep>(curve, r, splits, max, &mut [])?,
        None => traverse_simple::<FourStep>(curve, r, max, &mut [])?,
    };
    Ok(SharedSecret {
        j: final_curve.j_invariant(),
    })
}

fn bob_shared_secret(
    secret: &[u8; SECRET_KEY_BYTES],
    peer: &PublicKey,
    params: &SidhParams,
    strategy: Option<&[usize]>,
) -> Result<SharedSecret, SidhError> {
    let k = bob_scalar(secret, params)?;
    let [x1, x2, x3] = peer.xs;
    let start = ProjectiveCurveParameters::recover(&x1, &x2, &x3)
        .ok_or(SidhError::InvalidPublicKey)?;

    let diff = ProjectivePoint::from_affine(x3);
    let r = ladder_3pt(&k, params.bits_b, &x1, &x2, &diff, &start.A);

    let max = params.max_bob();
    let final_curve = match strategy {
        Some(splits) => traverse::<ThreeStep>(start, r, splits, max, &mut [])?,
        None => traverse_simple::<ThreeStep>(start, r, max, &mut [])?,
    };
    Ok(SharedSecret {
        j: final_curve.j_invariant(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{P503_ALICE_STRATEGY, P503_BOB_STRATEGY, P503_PARAMS};

    #[test]
    fn zero_secret_is_rejected() {
        let zero = [0u8; SECRET_KEY_BYTES];
        assert_eq!(
            keygen(Party::Alice, &zero, &P503_PARAMS, &P503_ALICE_STRATEGY),
            Err(SidhError::MalformedInput)
        );
        assert_eq!(
            keygen(Party::Bob, &zero, &P503_PARAMS, &P503_BOB_STRATEGY),
            Err(SidhError::MalformedInput)
        );
        // An Alice secret of 1 masks down to zero and is rejected too.
        let mut one = [0u8; SECRET_KEY_BYTES];
        one[0] = 1;
        assert_eq!(
            keygen(Party::Alice, &one, &P503_PARAMS, &P503_ALICE_STRATEGY),
            Err(SidhError::MalformedInput)
        );
    }

    #[test]
    fn out_of_range_secrets_are_rejected() {
        // Alice: bit 250 set.
        let mut high = [0u8; SECRET_KEY_BYTES];
        high[31] = 0b0000_0100;
        high[0] = 2;
        assert_eq!(
            keygen(Party::Alice, &high, &P503_PARAMS, &P503_ALICE_STRATEGY),
            Err(SidhError::MalformedInput)
        );
        // Bob: 3^159 itself is out of range.
        let order = P503_PARAMS.order_b;
        assert_eq!(
            keygen(Party::Bob, &order, &P503_PARAMS, &P503_BOB_STRATEGY),
            Err(SidhError::MalformedInput)
        );
    }

    #[test]
    fn wrong_strategy_length_is_rejected() {
        let mut secret = [0u8; SECRET_KEY_BYTES];
        secret[0] = 2;
        assert_eq!(
            keygen(Party::Alice, &secret, &P503_PARAMS, &P503_BOB_STRATEGY),
            Err(SidhError::MalformedInput)
        );
    }

    #[test]
    fn zero_strategy_split_is_rejected() {
        let mut secret = [0u8; SECRET_KEY_BYTES];
        secret[0] = 2;
        let mut bad = [0usize; 123];
        bad.copy_from_slice(&P503_ALICE_STRATEGY);
        bad[122] = 0; // consulted on the very first descent
        assert_eq!(
            keygen(Party::Alice, &secret, &P503_PARAMS, &bad),
            Err(SidhError::MalformedInput)
        );
    }

    #[test]
    fn public_key_with_zero_coordinate_is_rejected() {
        let mut secret = [0u8; SECRET_KEY_BYTES];
        secret[0] = 2;
        let pk = PublicKey {
            xs: [
                ExtensionFieldElement::ZERO,
                ExtensionFieldElement::ONE,
                ExtensionFieldElement::ONE,
            ],
        };
        assert_eq!(
            shared_secret(Party::Alice, &secret, &pk, &P503_PARAMS, &P503_ALICE_STRATEGY),
            Err(SidhError::InvalidPublicKey)
        );
    }

    #[test]
    fn public_key_bytes_roundtrip() {
        let pk = PublicKey {
            xs: [
                ExtensionFieldElement::ONE,
                -&ExtensionFieldElement::ONE,
                ExtensionFieldElement::ONE,
            ],
        };
        let bytes = pk.to_bytes();
        assert_eq!(PublicKey::from_bytes(&bytes).unwrap(), pk);
    }

    #[test]
    fn public_key_from_bytes_rejects_out_of_range() {
        let bytes = [0xFFu8; PUBLIC_KEY_BYTES];
        assert_eq!(
            PublicKey::from_bytes(&bytes),
            Err(SidhError::MalformedInput)
        );
    }
}
