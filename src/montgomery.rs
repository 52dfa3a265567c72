// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Projective x-only arithmetic on Montgomery curves over
//! \\(\mathbb F_{p^2}\\).
//!
//! A curve \\(y^2 = x^3 + (A/C)x^2 + x\\) is carried as the projective
//! coefficient pair \\((A : C)\\), \\(C \neq 0\\), and a point as the
//! projective x-coordinate \\((X : Z)\\) with \\(x = X/Z\\) and
//! \\(Z = 0\\) denoting the point at infinity.  No operation in this
//! module divides; the single inversion a walk performs happens when its
//! outputs are normalized.
//!
//! The doubling and tripling formulas work through the cached coefficient
//! forms \\((A + 2C : 4C)\\) and \\((A + 2C : A - 2C)\\) respectively, and
//! the three-point ladder is the right-to-left variant whose per-bit work
//! is one combined differential double-and-add.

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::fp2::ExtensionFieldElement;

/// A point on the Kummer line of a Montgomery curve, as the projective
/// x-coordinate \\((X : Z)\\).
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub(crate) X: ExtensionFieldElement,
    pub(crate) Z: ExtensionFieldElement,
}

/// A Montgomery curve coefficient in projective form \\((A : C)\\).
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectiveCurveParameters {
    pub(crate) A: ExtensionFieldElement,
    pub(crate) C: ExtensionFieldElement,
}

/// The coefficient form \\((A + 2C : 4C)\\) consumed by doubling.
#[derive(Copy, Clone)]
struct CachedCurveParameters {
    A24: ExtensionFieldElement,
    C24: ExtensionFieldElement,
}

/// The coefficient form \\((A + 2C : A - 2C)\\) consumed by tripling.
#[derive(Copy, Clone)]
struct CachedTripleParameters {
    A24_plus: ExtensionFieldElement,
    A24_minus: ExtensionFieldElement,
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(
        a: &ProjectivePoint,
        b: &ProjectivePoint,
        choice: Choice,
    ) -> ProjectivePoint {
        ProjectivePoint {
            X: ExtensionFieldElement::conditional_select(&a.X, &b.X, choice),
            Z: ExtensionFieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    /// Equality on the Kummer line: \\(X_1 Z_2 = X_2 Z_1\\).
    fn ct_eq(&self, other: &ProjectivePoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Z.zeroize();
    }
}

impl ProjectiveCurveParameters {
    /// The base curve \\(E_0 : y^2 = x^3 + x\\).
    pub(crate) const BASE: ProjectiveCurveParameters = ProjectiveCurveParameters {
        A: ExtensionFieldElement::ZERO,
        C: ExtensionFieldElement::ONE,
    };

    /// Construct a curve with an affine coefficient (C = 1).
    pub(crate) const fn from_affine(A: ExtensionFieldElement) -> ProjectiveCurveParameters {
        ProjectiveCurveParameters {
            A,
            C: ExtensionFieldElement::ONE,
        }
    }

    fn cached_params(&self) -> CachedCurveParameters {
        let two_C = &self.C + &self.C;
        CachedCurveParameters {
            A24: &self.A + &two_C,
            C24: &two_C + &two_C,
        }
    }

    fn cached_triple_params(&self) -> CachedTripleParameters {
        let two_C = &self.C + &self.C;
        CachedTripleParameters {
            A24_plus: &self.A + &two_C,
            A24_minus: &self.A - &two_C,
        }
    }

    /// The j-invariant
    /// \\(256 (A^2 - 3C^2)^3 / (C^4 (A^2 - 4C^2))\\),
    /// computed projectively and normalized with one field inversion.
    pub(crate) fn j_invariant(&self) -> ExtensionFieldElement {
        let A2 = self.A.square();
        let C2 = self.C.square();
        let three_C2 = &(&C2 + &C2) + &C2;
        let four_C2 = &(&C2 + &C2) + &(&C2 + &C2);
        let t = &A2 - &three_C2;
        let mut num = &t.square() * &t;
        for _ in 0..8 {
            num = &num + &num;
        }
        let den = &C2.square() * &(&A2 - &four_C2);
        &num * &den.invert()
    }

    /// Recover the Montgomery coefficient of the curve containing points
    /// with x-coordinates `xP`, `xQ` and `x(Q-P)`:
    /// \\(A = (1 - x_P x_Q - x_P x_R - x_Q x_R)^2 / (4 x_P x_Q x_R)
    ///        - x_P - x_Q - x_R.\\)
    ///
    /// Returns `None` when the denominator vanishes (the coordinates are
    /// inconsistent with any Montgomery curve) or the recovered curve is
    /// singular.  All inputs are public, so the zero tests may branch.
    pub(crate) fn recover(
        xP: &ExtensionFieldElement,
        xQ: &ExtensionFieldElement,
        xQmP: &ExtensionFieldElement,
    ) -> Option<ProjectiveCurveParameters> {
        let one = ExtensionFieldElement::ONE;
        let t = xP * xQ;
        let s = &(xP + xQ) + xQmP;
        let num = (&(&(&one - &t) - &(xP * xQmP)) - &(xQ * xQmP)).square();
        let den = &t * xQmP;
        if bool::from(den.is_zero()) {
            return None;
        }
        let A = &(&num * &den.invert()).div2().div2() - &s;
        // Reject the singular coefficients A = +-2.
        let two = &one + &one;
        let four = &two + &two;
        if bool::from((&A.square() - &four).is_zero()) {
            return None;
        }
        Some(ProjectiveCurveParameters::from_affine(A))
    }
}

impl ProjectivePoint {
    /// Construct a point with an affine x-coordinate (Z = 1).
    pub(crate) const fn from_affine(x: ExtensionFieldElement) -> ProjectivePoint {
        ProjectivePoint {
            X: x,
            Z: ExtensionFieldElement::ONE,
        }
    }

    /// Test for the point at infinity.
    pub(crate) fn is_infinity(&self) -> Choice {
        self.Z.is_zero()
    }

    /// Dehomogenize to the affine x-coordinate \\(X/Z\\).
    ///
    /// The walks never call this (they defer their single inversion to
    /// the 3-way batch at the end); it serves diagnostics and tests.
    #[allow(unused)]
    pub(crate) fn as_affine_x(&self) -> ExtensionFieldElement {
        &self.X * &self.Z.invert()
    }

    /// One projective doubling.
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn dbl(&self, curve: &CachedCurveParameters) -> ProjectivePoint {
        let t0 = (&self.X + &self.Z).square();  // (X + Z)^2
        let t1 = (&self.X - &self.Z).square();  // (X - Z)^2
        let t2 = &t0 - &t1;                     // 4 X Z
        let t3 = &t1 * &curve.C24;              // 4C (X - Z)^2
        let X2 = &t0 * &t3;
        let t4 = &(&t2 * &curve.A24) + &t3;     // (A+2C) 4XZ + 4C (X - Z)^2
        let Z2 = &t4 * &t2;
        ProjectivePoint { X: X2, Z: Z2 }
    }

    /// Compute \\([2^k]\\) times this point: `k` iterated doublings on the
    /// curve \\((A : C)\\).
    pub(crate) fn pow2k(&self, curve: &ProjectiveCurveParameters, k: usize) -> ProjectivePoint {
        let cached = curve.cached_params();
        let mut R = *self;
        for _ in 0..k {
            R = R.dbl(&cached);
        }
        R
    }

    /// One projective tripling, via the \\((A+2C : A-2C)\\) coefficients.
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn triple(&self, curve: &CachedTripleParameters) -> ProjectivePoint {
        let t0 = &self.X - &self.Z;
        let t2 = t0.square();
        let t1 = &self.X + &self.Z;
        let t3 = t1.square();
        let t4 = &t1 + &t0;                     // 2X
        let t0 = &t1 - &t0;                     // 2Z
        let t1 = &t4.square() - &t3;
        let t1 = &t1 - &t2;
        let t5 = &t3 * &curve.A24_plus;
        let t3 = &t5 * &t3;
        let t6 = &t2 * &curve.A24_minus;
        let t2 = &t2 * &t6;
        let t3 = &t2 - &t3;
        let t2 = &t5 - &t6;
        let t1 = &t2 * &t1;
        let t2 = (&t3 + &t1).square();
        let X3 = &t2 * &t4;
        let t1 = (&t3 - &t1).square();
        let Z3 = &t1 * &t0;
        ProjectivePoint { X: X3, Z: Z3 }
    }

    /// Compute \\([3^k]\\) times this point: `k` iterated triplings on the
    /// curve \\((A : C)\\).
    pub(crate) fn pow3k(&self, curve: &ProjectiveCurveParameters, k: usize) -> ProjectivePoint {
        let cached = curve.cached_triple_params();
        let mut R = *self;
        for _ in 0..k {
            R = R.triple(&cached);
        }
        R
    }

    /// Differential addition: \\(x(P + Q)\\) from \\(x(P)\\), \\(x(Q)\\)
    /// and the projective difference \\(x(P - Q)\\).
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn diff_add(
        P: &ProjectivePoint,
        Q: &ProjectivePoint,
        diff: &ProjectivePoint,
    ) -> ProjectivePoint {
        let t0 = &(&P.X + &P.Z) * &(&Q.X - &Q.Z);
        let t1 = &(&P.X - &P.Z) * &(&Q.X + &Q.Z);
        ProjectivePoint {
            X: &diff.Z * &(&t0 + &t1).square(), // Z_D (U + V)^2
            Z: &diff.X * &(&t0 - &t1).square(), // X_D (U - V)^2
        }
    }
}

/// The right-to-left three-point ladder: compute \\(x(P + [k]Q)\\) from
/// \\(x(P)\\), \\(x(Q)\\) and \\(x(Q - P)\\) on the curve with affine
/// coefficient `A`.
///
/// The scalar is scanned from the least significant bit over a fixed,
/// party-selected number of bits; all state motion is by constant-time
/// conditional swaps keyed on bit transitions.
pub(crate) fn ladder_3pt(
    scalar: &[u8; 32],
    nbits: usize,
    xP: &ExtensionFieldElement,
    xQ: &ExtensionFieldElement,
    xQmP: &ProjectivePoint,
    A: &ExtensionFieldElement,
) -> ProjectivePoint {
    let curve = ProjectiveCurveParameters::from_affine(*A);
    let cached = curve.cached_params();

    // R0 = [2^i]Q; R1 = P + [k mod 2^i]Q; R2 = [2^i]Q - R1.
    let mut R0 = ProjectivePoint::from_affine(*xQ);
    let mut R1 = ProjectivePoint::from_affine(*xP);
    let mut R2 = *xQmP;

    let mut prev_bit = Choice::from(0u8);
    for i in 0..nbits {
        let bit = Choice::from((scalar[i >> 3] >> (i & 7)) & 1);
        // Keep the addend in the R2 slot and this step's difference in R1.
        ProjectivePoint::conditional_swap(&mut R1, &mut R2, bit ^ prev_bit);
        R2 = ProjectivePoint::diff_add(&R0, &R2, &R1);
        R0 = R0.dbl(&cached);
        prev_bit = bit;
    }
    ProjectivePoint::conditional_swap(&mut R1, &mut R2, prev_bit);
    R1
}

/// On the base curve, \\(x(\tau(P) - P)\\) for the distortion map
/// \\(\tau(x, y) = (-x, iy)\\):
/// \\((X : Z) = (i(x_P^2 + 1) : 2 x_P)\\).
pub(crate) fn distort_and_diff(xP: &ExtensionFieldElement) -> ProjectivePoint {
    let one = ExtensionFieldElement::ONE;
    ProjectivePoint {
        X: (&xP.square() + &one).mul_by_i(),
        Z: xP + xP,
    }
}

/// The projective x-coordinate of the initial kernel generator
/// \\(P + [k]\tau(P)\\) on the base curve, where \\(\tau\\) is the
/// distortion map.  This is the three-point ladder specialized to
/// \\(x(\tau(P)) = -x_P\\) and the closed-form difference.
pub(crate) fn secret_point(
    xP: &ExtensionFieldElement,
    scalar: &[u8; 32],
    nbits: usize,
) -> ProjectivePoint {
    let xQ = -xP;
    let diff = distort_and_diff(xP);
    ladder_3pt(scalar, nbits, xP, &xQ, &diff, &ExtensionFieldElement::ZERO)
}
