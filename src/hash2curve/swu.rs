// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::Mapped;

/// Prime-field arithmetic needed by the SWU map and the isogeny, constant
/// time in the operand values. `pow` is variable-time in the exponent only;
/// every exponent used here is a fixed public constant.
pub(crate) trait MapField: Copy + ConditionallySelectable + ConstantTimeEq {
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    fn add(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn square(&self) -> Self;
    fn negate(&self) -> Self;
    /// Multiplicative inverse, or zero when `self` is zero.
    fn invert_or_zero(&self) -> Self;
    /// `self^exp` for a little-endian limb exponent.
    fn pow(&self, exp: &[u64; 4]) -> Self;
    /// sgn0 from RFC 9380 §4.1: parity of the canonical representative.
    fn is_odd(&self) -> Choice;

    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }
}

/// Which curve the SWU map lands on.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Landing {
    /// Directly on the target curve (A ≠ 0, P-256 style).
    Target,
    /// On an isogenous curve E′ that the caller must map over
    /// (AB = 0, secp256k1 style).
    Isogenous,
}

/// Parameters of the simplified SWU map for one curve, passed around as a
/// plain value.
pub(crate) struct SwuParams<F> {
    pub a: F,
    pub b: F,
    pub z: F,
    /// (p − 3) / 4, little-endian limbs.
    pub c1: [u64; 4],
    /// (p + 1) / 4, little-endian limbs.
    pub sqrt_exp: [u64; 4],
    pub landing: Landing,
}

impl<F: MapField> SwuParams<F> {
    /// map_to_curve_simple_swu from RFC 9380 §6.6.2.
    ///
    /// The output coordinates satisfy y² = x³ + a·x + b for this parameter
    /// set; the [`Mapped`] tag records whether that curve is the target or
    /// the isogenous one. All selections on values derived from `u` are
    /// branchless.
    pub fn map_to_curve(&self, u: &F) -> Mapped<F> {
        let tv1 = self.z.mul(&u.square());
        let tv2 = tv1.square().add(&tv1);
        let tv3 = self.b.mul(&tv2.add(&F::ONE));
        let tv4 = self
            .a
            .mul(&F::conditional_select(&tv2.negate(), &self.z, tv2.is_zero()));
        let tv2 = tv3.square();
        let tv6 = tv4.square();
        let tv5 = self.a.mul(&tv6);
        let tv2 = tv2.add(&tv5).mul(&tv3);
        let tv6 = tv6.mul(&tv4);
        let tv5 = self.b.mul(&tv6);
        let tv2 = tv2.add(&tv5);
        let x = tv1.mul(&tv3);
        let (is_gx1_square, y1) = self.sqrt_ratio(&tv2, &tv6);
        let y = tv1.mul(u).mul(&y1);
        let x = F::conditional_select(&x, &tv3, is_gx1_square);
        let y = F::conditional_select(&y, &y1, is_gx1_square);
        let e1 = !(u.is_odd() ^ y.is_odd());
        let y = F::conditional_select(&y.negate(), &y, e1);
        let x = x.mul(&tv4.invert_or_zero());

        match self.landing {
            Landing::Target => Mapped::OnTarget { x, y },
            Landing::Isogenous => Mapped::OnIsogenous { x, y },
        }
    }

    // sqrt_ratio(u, v) for p ≡ 3 (mod 4), RFC 9380 §F.2.1: returns
    // (true, sqrt(u/v)) when u/v is square, else (false, sqrt(Z·u/v)).
    fn sqrt_ratio(&self, u: &F, v: &F) -> (Choice, F) {
        // c2 = sqrt(-Z) = (-Z)^((p + 1) / 4)
        let c2 = self.z.negate().pow(&self.sqrt_exp);

        let tv1 = v.square();
        let tv2 = u.mul(v);
        let tv1 = tv1.mul(&tv2);
        let y1 = tv1.pow(&self.c1).mul(&tv2);
        let y2 = y1.mul(&c2);
        let tv3 = y1.square().mul(v);
        let is_square = tv3.ct_eq(u);
        let y = F::conditional_select(&y2, &y1, is_square);
        (is_square, y)
    }
}
