// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Computation and evaluation of 4- and 3-isogenies between Montgomery
//! curves, in projective x-only coordinates.
//!
//! A kernel point of exact order 4 or 3 fixes an isogeny up to isomorphism
//! of the codomain; the `compute` constructors derive the codomain
//! coefficients together with whatever constants evaluation needs, and the
//! `eval` methods push points through the map.  Evaluation is a pure
//! function of the constants and the input point, so the order in which
//! the walk pushes its stack and auxiliary points is immaterial.
//!
//! The 4-isogeny codomain falls out naturally in the \\((A+2C : 4C)\\)
//! coefficient form and the 3-isogeny codomain in \\((A+2C : A-2C)\\);
//! both are converted back to \\((A : C)\\) on return so the walk carries
//! a single representation.
//!
//! The first step of a 2-power walk is special: its kernel lies above the
//! 2-torsion point \\((0, 0)\\), at x = 1, where the generic 4-isogeny
//! formulas degenerate.  [`FirstFourIsogeny`] implements that single step
//! with its own formulas; the kernel is implicit, so the map depends only
//! on the domain curve.

#![allow(non_snake_case)]

use crate::fp2::ExtensionFieldElement;
use crate::montgomery::{ProjectiveCurveParameters, ProjectivePoint};

/// A 4-isogeny, held as the three evaluation constants derived from its
/// kernel point \\((X_4 : Z_4)\\):
/// \\(K_1 = 4Z_4^2\\), \\(K_2 = X_4 - Z_4\\), \\(K_3 = X_4 + Z_4\\).
///
/// The constants are opaque to callers and valid only against the curve
/// the kernel lived on.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FourIsogeny {
    K1: ExtensionFieldElement,
    K2: ExtensionFieldElement,
    K3: ExtensionFieldElement,
}

impl FourIsogeny {
    /// Derive the codomain curve and evaluation constants from a kernel
    /// point of exact order 4.  Undefined for kernels of any other order;
    /// in particular the walk never feeds this the x = ±1 points above
    /// \\((0,0)\\), which belong to [`FirstFourIsogeny`].
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn compute(kernel: &ProjectivePoint) -> (ProjectiveCurveParameters, FourIsogeny) {
        let K2 = &kernel.X - &kernel.Z;
        let K3 = &kernel.X + &kernel.Z;
        let t0 = kernel.Z.square();
        let t0 = &t0 + &t0;                     // 2 Z4^2
        let C24 = t0.square();                  // 4 Z4^4
        let K1 = &t0 + &t0;                     // 4 Z4^2
        let t1 = kernel.X.square();
        let t1 = &t1 + &t1;
        let A24 = t1.square();                  // 4 X4^4
        // (A + 2C : 4C) -> (A : C) = (4*A24 - 2*C24 : C24)
        let four_A24 = {
            let d = &A24 + &A24;
            &d + &d
        };
        let two_C24 = &C24 + &C24;
        let curve = ProjectiveCurveParameters {
            A: &four_A24 - &two_C24,
            C: C24,
        };
        (curve, FourIsogeny { K1, K2, K3 })
    }

    /// Push one point through the isogeny.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn eval(&self, P: &ProjectivePoint) -> ProjectivePoint {
        let t0 = &P.X + &P.Z;
        let t1 = &P.X - &P.Z;
        let X = &t0 * &self.K2;
        let Z = &t1 * &self.K3;
        let t0 = &(&t0 * &t1) * &self.K1;       // K1 (X^2 - Z^2)
        let t1 = (&X + &Z).square();
        let Z = (&X - &Z).square();
        let X = &t0 + &t1;
        let t0 = &Z - &t0;
        ProjectivePoint {
            X: &X * &t1,
            Z: &Z * &t0,
        }
    }
}

/// A 3-isogeny, held as its kernel point \\((K_X : K_Z)\\); evaluation
/// reuses the kernel coordinates directly, so there are no separate
/// constants to carry.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ThreeIsogeny {
    KX: ExtensionFieldElement,
    KZ: ExtensionFieldElement,
}

impl ThreeIsogeny {
    /// Derive the codomain curve from a kernel point of exact order 3.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn compute(kernel: &ProjectivePoint) -> (ProjectiveCurveParameters, ThreeIsogeny) {
        let t0 = (&kernel.X - &kernel.Z).square();
        let t1 = (&kernel.X + &kernel.Z).square();
        let t3 = (&kernel.X + &kernel.X).square();
        let t2 = &t3 - &t0;
        let t3 = &t3 - &t1;
        let t4 = &t0 + &t3;
        let t4 = &t4 + &t4;
        let t4 = &t4 + &t1;
        let A24_minus = &t2 * &t4;
        let t4 = &t1 + &t2;
        let t4 = &t4 + &t4;
        let t4 = &t4 + &t0;
        let A24_plus = &t3 * &t4;
        // (A + 2C : A - 2C) -> (A : C) = (2(A24p + A24m) : A24p - A24m)
        let s = &A24_plus + &A24_minus;
        let curve = ProjectiveCurveParameters {
            A: &s + &s,
            C: &A24_plus - &A24_minus,
        };
        let phi = ThreeIsogeny {
            KX: kernel.X,
            KZ: kernel.Z,
        };
        (curve, phi)
    }

    /// Push one point through the isogeny.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn eval(&self, P: &ProjectivePoint) -> ProjectivePoint {
        let c0 = &self.KX - &self.KZ;
        let c1 = &self.KX + &self.KZ;
        let t0 = &(&P.X + &P.Z) * &c0;
        let t1 = &(&P.X - &P.Z) * &c1;
        let t2 = (&t0 + &t1).square();
        let t0 = (&t1 - &t0).square();
        ProjectivePoint {
            X: &P.X * &t2,
            Z: &P.Z * &t0,
        }
    }
}

/// The exceptional first 4-isogeny of a 2-power walk, with implicit kernel
/// generated by the order-4 point at x = 1 above \\((0, 0)\\).
///
/// The map depends only on the domain coefficient: the codomain is
/// \\((A' : C') = (-2(A + 6) : A - 2)\\) and the image of a point is
/// \\(X' = (X^2 + AXZ + Z^2)(X + Z)^2\\), \\(Z' = (A-2) XZ (X - Z)^2\\).
/// The domain always has C = 1 (the base curve in key generation, a
/// recovered public-key curve in shared-secret derivation).
#[derive(Copy, Clone, Debug)]
pub(crate) struct FirstFourIsogeny {
    A: ExtensionFieldElement,
    A_minus_two: ExtensionFieldElement,
}

impl FirstFourIsogeny {
    /// Derive the codomain curve from the domain coefficient `A`.
    pub(crate) fn compute(A: &ExtensionFieldElement) -> (ProjectiveCurveParameters, FirstFourIsogeny) {
        let one = ExtensionFieldElement::ONE;
        let two = &one + &one;
        let six = &(&two + &two) + &two;
        let t = &(A + &six) + &(A + &six);
        let curve = ProjectiveCurveParameters {
            A: -&t,
            C: A - &two,
        };
        let phi = FirstFourIsogeny {
            A: *A,
            A_minus_two: A - &two,
        };
        (curve, phi)
    }

    /// Push one point through the isogeny.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn eval(&self, P: &ProjectivePoint) -> ProjectivePoint {
        let t0 = (&P.X + &P.Z).square();        // (X + Z)^2
        let t1 = &P.X * &P.Z;                   // X Z
        let t2 = &(&P.X.square() + &P.Z.square()) + &(&self.A * &t1);
        ProjectivePoint {
            X: &t2 * &t0,
            Z: &(&self.A_minus_two * &t1) * &(&P.X - &P.Z).square(),
        }
    }
}
