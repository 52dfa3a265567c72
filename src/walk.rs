// -*- mode: rust; -*-
//
// This file is part of sidh-core.
// Copyright (c) 2021-2024 the sidh-core authors
// See LICENSE for licensing information.

//! The strategy-driven isogeny-tree traversal.
//!
//! A walk of depth \\(n\\) starts from a working kernel point \\(R\\) of
//! exact order \\(\ell^n\\) and applies \\(n\\) degree-\\(\ell\\)
//! isogenies, each derived from an order-\\(\ell\\) multiple of \\(R\\).
//! The traversal order is driven by a precomputed *strategy*: a table of
//! split points over the remaining subtree size that balances the cost of
//! scalar multiplications against isogeny evaluations.  Intermediate
//! multiples are parked on a stack, each remembering how many levels it
//! has already descended, and become the working point again after the
//! isogeny that reduces their order.
//!
//! The strategy is public data and branching on it is fine; the point
//! coordinates it shuffles are not, and all point arithmetic below is
//! constant-time.
//!
//! [`traverse_simple`] is the textbook multiply-then-isogenize recursion.
//! It visits \\(O(n^2)\\) scalar multiplications instead of the
//! strategy's \\(O(n \log n)\\), but computes the identical composite
//! isogeny, which makes it the equivalence oracle for the fast path.

use alloc::vec::Vec;

use crate::errors::SidhError;
use crate::isogeny::{FourIsogeny, ThreeIsogeny};
use crate::montgomery::{ProjectiveCurveParameters, ProjectivePoint};

/// One step class of a walk: how to advance the working point by
/// \\([\ell^m]\\), and how to turn an order-\\(\ell\\) kernel into a curve
/// and an evaluable map.
pub(crate) trait WalkStep {
    /// The evaluable isogeny produced from a kernel.
    type Map;

    /// Compute \\([\ell^m]\\) times `point`.
    fn advance(
        curve: &ProjectiveCurveParameters,
        point: &ProjectivePoint,
        m: usize,
    ) -> ProjectivePoint;

    /// Derive the codomain and the map from an order-\\(\ell\\) kernel.
    fn compute(kernel: &ProjectivePoint) -> (ProjectiveCurveParameters, Self::Map);

    /// Push a point through the map.
    fn push(map: &Self::Map, point: &ProjectivePoint) -> ProjectivePoint;
}

/// 4-isogeny steps: one level of the walk is two doublings.
pub(crate) struct FourStep;

impl WalkStep for FourStep {
    type Map = FourIsogeny;

    fn advance(
        curve: &ProjectiveCurveParameters,
        point: &ProjectivePoint,
        m: usize,
    ) -> ProjectivePoint {
        point.pow2k(curve, 2 * m)
    }

    fn compute(kernel: &ProjectivePoint) -> (ProjectiveCurveParameters, FourIsogeny) {
        FourIsogeny::compute(kernel)
    }

    fn push(map: &FourIsogeny, point: &ProjectivePoint) -> ProjectivePoint {
        map.eval(point)
    }
}

/// 3-isogeny steps: one level of the walk is one tripling.
pub(crate) struct ThreeStep;

impl WalkStep for ThreeStep {
    type Map = ThreeIsogeny;

    fn advance(
        curve: &ProjectiveCurveParameters,
        point: &ProjectivePoint,
        m: usize,
    ) -> ProjectivePoint {
        point.pow3k(curve, m)
    }

    fn compute(kernel: &ProjectivePoint) -> (ProjectiveCurveParameters, ThreeIsogeny) {
        ThreeIsogeny::compute(kernel)
    }

    fn push(map: &ThreeIsogeny, point: &ProjectivePoint) -> ProjectivePoint {
        map.eval(point)
    }
}

/// A kernel that collapsed to (0 : 0) or to the point at infinity means
/// the walk was started from a point of the wrong order, which can only
/// happen through a corrupted peer key on an unexpected curve.
fn reject_degenerate(kernel: &ProjectivePoint) -> Result<(), SidhError> {
    if bool::from(kernel.is_infinity()) {
        return Err(SidhError::InvalidPublicKey);
    }
    Ok(())
}

/// Derive this row's isogeny and push every parked and auxiliary point
/// through it.
fn apply_row<S: WalkStep>(
    kernel: &ProjectivePoint,
    stack: &mut [(ProjectivePoint, usize)],
    aux: &mut [ProjectivePoint],
) -> Result<ProjectiveCurveParameters, SidhError> {
    reject_degenerate(kernel)?;
    let (codomain, map) = S::compute(kernel);
    for (point, _) in stack.iter_mut() {
        *point = S::push(&map, point);
    }
    for point in aux.iter_mut() {
        *point = S::push(&map, point);
    }
    Ok(codomain)
}

/// Run a strategy-driven walk of depth `max` from the working point `r` of
/// order \\(\ell^{max}\\), pushing the points in `aux` through every
/// isogeny.  Returns the final codomain.
///
/// `strategy[s - 1]` is the number of levels to descend when the remaining
/// subtree has size `s`; the table must have an entry for every size in
/// `1..max`, and a split of zero or beyond the remaining budget is
/// rejected as malformed before any state is touched.
pub(crate) fn traverse<S: WalkStep>(
    mut curve: ProjectiveCurveParameters,
    mut r: ProjectivePoint,
    strategy: &[usize],
    max: usize,
    aux: &mut [ProjectivePoint],
) -> Result<ProjectiveCurveParameters, SidhError> {
    if strategy.len() != max.saturating_sub(1) {
        return Err(SidhError::MalformedInput);
    }
    let mut stack: Vec<(ProjectivePoint, usize)> = Vec::with_capacity(max);
    let mut index = 0;
    for row in 1..max {
        // Descend to an order-l kernel, parking intermediates as directed
        // by the strategy.
        while index < max - row {
            stack.push((r, index));
            let m = strategy[max - index - row - 1];
            if m == 0 || m > max - index - row {
                return Err(SidhError::MalformedInput);
            }
            r = S::advance(&curve, &r, m);
            index += m;
        }
        debug_assert!(
            bool::from(S::advance(&curve, &r, 1).is_infinity()),
            "working point must have exact order l at the row bottom",
        );
        curve = apply_row::<S>(&r, &mut stack, aux)?;
        // The deepest parked point becomes the working point; its order on
        // the new curve dropped by one level.
        let (next, next_index) = stack.pop().ok_or(SidhError::MalformedInput)?;
        r = next;
        index = next_index;
    }
    debug_assert!(stack.is_empty(), "strategy must consume the whole stack");
    // Trailing step: r now generates the last kernel.
    apply_row::<S>(&r, &mut [], aux)
}

/// The multiply-then-isogenize recursion: at step `e` (descending), the
/// kernel is \\([\ell^e] R\\).  Same composite isogeny as [`traverse`],
/// quadratically more multiplications.
pub(crate) fn traverse_simple<S: WalkStep>(
    mut curve: ProjectiveCurveParameters,
    mut r: ProjectivePoint,
    max: usize,
    aux: &mut [ProjectivePoint],
) -> Result<ProjectiveCurveParameters, SidhError> {
    for e in (0..max).rev() {
        let kernel = S::advance(&curve, &r, e);
        reject_degenerate(&kernel)?;
        let (codomain, map) = S::compute(&kernel);
        r = S::push(&map, &r);
        for point in aux.iter_mut() {
            *point = S::push(&map, point);
        }
        curve = codomain;
    }
    Ok(curve)
}
