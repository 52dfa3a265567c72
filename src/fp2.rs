// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! Arithmetic in the quadratic extension
//! \\(\mathbb F_{p^2} = \mathbb F_p(i)\\), \\(i^2 = -1\\).
//!
//! Every public value of the key exchange (curve coefficients, point
//! coordinates, j-invariants) lives in this field.  The representation is
//! a pair \\((a_0, a_1)\\) meaning \\(a_0 + a_1 i\\); \\(i^2 = -1\\) is
//! well-defined because \\(p \equiv 3 \pmod 4\\).
//!
//! Multiplication uses the 3-multiplication Karatsuba schedule, squaring
//! the 2-multiplication difference-of-squares form, and inversion one base
//! field inversion via the norm \\(a_0^2 + a_1^2\\).

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::errors::SidhError;
use crate::field::FieldElement;

/// An element \\(a_0 + a_1 i\\) of \\(\mathbb F_{p^2}\\).
#[derive(Copy, Clone)]
pub(crate) struct ExtensionFieldElement {
    /// The real component \\(a_0\\).
    pub(crate) re: FieldElement,
    /// The imaginary component \\(a_1\\).
    pub(crate) im: FieldElement,
}

impl Debug for ExtensionFieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ExtensionFieldElement {{ re: {:?}, im: {:?} }}", &self.re, &self.im)
    }
}

impl<'a, 'b> Add<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn add(self, rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re: &self.re + &rhs.re,
            im: &self.im + &rhs.im,
        }
    }
}

impl<'a, 'b> Sub<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn sub(self, rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re: &self.re - &rhs.re,
            im: &self.im - &rhs.im,
        }
    }
}

impl<'a, 'b> Mul<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn mul(self, rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        let t0 = &self.re * &rhs.re;        // a0 b0
        let t1 = &self.im * &rhs.im;        // a1 b1
        let s0 = &self.re + &self.im;       // a0 + a1
        let s1 = &rhs.re + &rhs.im;         // b0 + b1
        let t2 = &s0 * &s1;                 // a0 b0 + a0 b1 + a1 b0 + a1 b1
        ExtensionFieldElement {
            re: &t0 - &t1,                  // a0 b0 - a1 b1
            im: &(&t2 - &t0) - &t1,         // a0 b1 + a1 b0
        }
    }
}

impl<'a> Neg for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn neg(self) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re: -&self.re,
            im: -&self.im,
        }
    }
}

define_add_variants!(
    LHS = ExtensionFieldElement,
    RHS = ExtensionFieldElement,
    Output = ExtensionFieldElement
);
define_sub_variants!(
    LHS = ExtensionFieldElement,
    RHS = ExtensionFieldElement,
    Output = ExtensionFieldElement
);
define_mul_variants!(
    LHS = ExtensionFieldElement,
    RHS = ExtensionFieldElement,
    Output = ExtensionFieldElement
);

impl ConditionallySelectable for ExtensionFieldElement {
    fn conditional_select(
        a: &ExtensionFieldElement,
        b: &ExtensionFieldElement,
        choice: Choice,
    ) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re: FieldElement::conditional_select(&a.re, &b.re, choice),
            im: FieldElement::conditional_select(&a.im, &b.im, choice),
        }
    }
}

impl ConstantTimeEq for ExtensionFieldElement {
    fn ct_eq(&self, other: &ExtensionFieldElement) -> Choice {
        self.re.ct_eq(&other.re) & self.im.ct_eq(&other.im)
    }
}

impl PartialEq for ExtensionFieldElement {
    fn eq(&self, other: &ExtensionFieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ExtensionFieldElement {}

#[cfg(feature = "zeroize")]
impl Zeroize for ExtensionFieldElement {
    fn zeroize(&mut self) {
        self.re.zeroize();
        self.im.zeroize();
    }
}

impl ExtensionFieldElement {
    /// The element \\( 0 \\).
    pub(crate) const ZERO: ExtensionFieldElement = ExtensionFieldElement {
        re: FieldElement::ZERO,
        im: FieldElement::ZERO,
    };

    /// The element \\( 1 \\).
    pub(crate) const ONE: ExtensionFieldElement = ExtensionFieldElement {
        re: FieldElement::ONE,
        im: FieldElement::ZERO,
    };

    /// Construct an element with the given real part and zero imaginary
    /// part.
    pub(crate) const fn from_real(re: FieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re,
            im: FieldElement::ZERO,
        }
    }

    /// Compute `self^2`.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn square(&self) -> ExtensionFieldElement {
        let s = &self.re + &self.im;        // a0 + a1
        let d = &self.re - &self.im;        // a0 - a1
        let t = &self.re * &self.im;        // a0 a1
        ExtensionFieldElement {
            re: &s * &d,                    // a0^2 - a1^2
            im: &t + &t,                    // 2 a0 a1
        }
    }

    /// Multiply by \\(i\\): \\((a_0 + a_1 i) i = -a_1 + a_0 i\\).
    pub(crate) fn mul_by_i(&self) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re: -&self.im,
            im: self.re,
        }
    }

    /// Halve this element.
    pub(crate) fn div2(&self) -> ExtensionFieldElement {
        ExtensionFieldElement {
            re: self.re.div2(),
            im: self.im.div2(),
        }
    }

    /// Compute the multiplicative inverse
    /// \\((a_0 + a_1 i)^{-1} = (a_0 - a_1 i) / (a_0^2 + a_1^2)\\).
    ///
    /// Returns zero for a zero input, like the base field inversion; the
    /// walk only ever inverts values it has verified to be nonzero.
    pub(crate) fn invert(&self) -> ExtensionFieldElement {
        let norm = &self.re.square() + &self.im.square();
        let norm_inv = norm.invert();
        ExtensionFieldElement {
            re: &self.re * &norm_inv,
            im: &(-&self.im) * &norm_inv,
        }
    }

    /// Test whether this element is zero, in constant time.
    pub(crate) fn is_zero(&self) -> Choice {
        self.re.is_zero() & self.im.is_zero()
    }

    /// Parse the canonical 126-byte encoding \\(a_0 \Vert a_1\\), both
    /// components little-endian.  `None` when either component is out of
    /// range.
    pub(crate) fn from_canonical_bytes(bytes: &[u8; 126]) -> CtOption<ExtensionFieldElement> {
        let mut re_bytes = [0u8; 63];
        let mut im_bytes = [0u8; 63];
        re_bytes.copy_from_slice(&bytes[..63]);
        im_bytes.copy_from_slice(&bytes[63..]);
        let re = FieldElement::from_canonical_bytes(&re_bytes);
        let im = FieldElement::from_canonical_bytes(&im_bytes);
        re.and_then(|re| im.map(|im| ExtensionFieldElement { re, im }))
    }

    /// Serialize to the canonical 126-byte encoding.
    pub(crate) fn as_bytes(&self) -> [u8; 126] {
        let mut bytes = [0u8; 126];
        bytes[..63].copy_from_slice(&self.re.as_bytes());
        bytes[63..].copy_from_slice(&self.im.as_bytes());
        bytes
    }
}

/// Simultaneously invert three nonzero elements at the cost of one field
/// inversion and a handful of multiplications (Montgomery's trick).
///
/// This is the only inversion performed during a keygen walk: the whole
/// traversal stays projective precisely to defer to this point, where one
/// inversion is amortized over the three public-key coordinates.
///
/// A zero input breaks the back-distribution and signals a corrupted walk;
/// it is reported as [`SidhError::FieldZeroDivision`].
#[rustfmt::skip] // keep alignment of explanatory comments
pub(crate) fn inv_3_way(
    z1: &ExtensionFieldElement,
    z2: &ExtensionFieldElement,
    z3: &ExtensionFieldElement,
) -> Result<(ExtensionFieldElement, ExtensionFieldElement, ExtensionFieldElement), SidhError> {
    if bool::from(z1.is_zero() | z2.is_zero() | z3.is_zero()) {
        return Err(SidhError::FieldZeroDivision);
    }
    let t12 = z1 * z2;                  // z1 z2
    let t123 = &t12 * z3;               // z1 z2 z3
    let s = t123.invert();              // 1 / (z1 z2 z3)
    let s12 = z3 * &s;                  // 1 / (z1 z2)
    Ok((
        &s12 * z2,                      // 1 / z1
        &s12 * z1,                      // 1 / z2
        &t12 * &s,                      // 1 / z3
    ))
}
