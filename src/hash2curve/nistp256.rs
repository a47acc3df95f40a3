// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! `P256_XMD:SHA-256_SSWU_RO_` (RFC 9380 §8.2)
//!
//! P-256 has A ≠ 0, so the SWU map lands directly on the curve and no
//! isogeny is involved.

use elliptic_curve::bigint::{NonZero, U256, U384};
use elliptic_curve::sec1::FromEncodedPoint;
use p256::{AffinePoint, EncodedPoint, FieldBytes, FieldElement, ProjectivePoint};
use subtle::Choice;

use super::field::hash_to_field;
use super::swu::{Landing, MapField, SwuParams};
use super::Mapped;
use crate::{Error, Result};

/// The P-256 field prime, widened for the hash_to_field reduction.
pub(crate) const FIELD_MODULUS: NonZero<U384> = NonZero::from_uint(U384::from_be_hex(
    "00000000000000000000000000000000ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
));

// Map parameters from RFC 9380 §8.2: the curve's own coefficients and
// Z = -10 mod p.
const SWU_A: FieldElement = FieldElement::from_u64(3).neg();
fn swu_b() -> FieldElement {
    Option::from(FieldElement::from_uint(U256::from_be_hex(
        "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    )))
    .expect("SWU_B constant is within the field modulus")
}
const SWU_Z: FieldElement = FieldElement::from_u64(10).neg();

// (p - 3) / 4 and (p + 1) / 4, little-endian limbs.
const C1: [u64; 4] = [
    0xffff_ffff_ffff_ffff,
    0x0000_0000_3fff_ffff,
    0x4000_0000_0000_0000,
    0x3fff_ffff_c000_0000,
];
const SQRT_EXP: [u64; 4] = [
    0x0000_0000_0000_0000,
    0x0000_0000_4000_0000,
    0x4000_0000_0000_0000,
    0x3fff_ffff_c000_0000,
];

impl MapField for FieldElement {
    const ZERO: Self = FieldElement::ZERO;
    const ONE: Self = FieldElement::ONE;

    fn add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }

    fn mul(&self, rhs: &Self) -> Self {
        *self * *rhs
    }

    fn square(&self) -> Self {
        FieldElement::square(self)
    }

    fn negate(&self) -> Self {
        -*self
    }

    fn invert_or_zero(&self) -> Self {
        FieldElement::invert(self).unwrap_or(FieldElement::ZERO)
    }

    fn pow(&self, exp: &[u64; 4]) -> Self {
        self.pow_vartime(exp)
    }

    fn is_odd(&self) -> Choice {
        FieldElement::is_odd(self)
    }
}

pub(crate) fn params() -> SwuParams<FieldElement> {
    SwuParams {
        a: SWU_A,
        b: swu_b(),
        z: SWU_Z,
        c1: C1,
        sqrt_exp: SQRT_EXP,
        landing: Landing::Target,
    }
}

/// Corresponds to the hash_to_curve() function from RFC 9380 §3 for the
/// `P256_XMD:SHA-256_SSWU_RO_` suite.
pub fn hash_to_curve(msg: &[&[u8]], dst: &[u8]) -> Result<ProjectivePoint> {
    let [u0, u1] = hash_to_field::<2>(msg, dst, &FIELD_MODULUS)?;
    let params = params();
    let q0 = lift(params.map_to_curve(&element_from_reduced(&u0)?))?;
    let q1 = lift(params.map_to_curve(&element_from_reduced(&u1)?))?;
    // clear_cofactor is the identity map: h = 1 for P-256
    Ok(ProjectivePoint::from(q0) + &ProjectivePoint::from(q1))
}

fn lift(mapped: Mapped<FieldElement>) -> Result<AffinePoint> {
    let (x, y) = mapped.into_target(None).ok_or(Error::HashToCurve)?;
    point_from_coordinates(&x, &y)
}

// hash_to_field output is already reduced, so this cannot fail for inputs
// that came through the pipeline.
pub(crate) fn element_from_reduced(bytes: &[u8; 32]) -> Result<FieldElement> {
    let bytes = FieldBytes::from(*bytes);
    Option::from(FieldElement::from_bytes(&bytes)).ok_or(Error::HashToCurve)
}

fn point_from_coordinates(x: &FieldElement, y: &FieldElement) -> Result<AffinePoint> {
    let encoded = EncodedPoint::from_affine_coordinates(&x.to_bytes(), &y.to_bytes(), false);
    Option::from(AffinePoint::from_encoded_point(&encoded)).ok_or(Error::HashToCurve)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const DST: &[u8] = b"QUUX-V01-CS02-with-P256_XMD:SHA-256_SSWU_RO_";

    fn fe(bytes: [u8; 32]) -> FieldElement {
        element_from_reduced(&bytes).unwrap()
    }

    // Intermediate vectors from RFC 9380 §J.1.1, msg = "".
    const U_0: [u8; 32] = hex!("ad5342c66a6dd0ff080df1da0ea1c04b96e0330dd89406465eeba11582515009");
    const U_1: [u8; 32] = hex!("8c0f1d43204bd6f6ea70ae8013070a1518b43873bcd850aafa0a9e220e2eea5a");

    #[test]
    fn hash_to_field_matches_rfc9380_intermediates() {
        let [u0, u1] = hash_to_field::<2>(&[b""], DST, &FIELD_MODULUS).unwrap();
        assert_eq!(u0, U_0);
        assert_eq!(u1, U_1);
    }

    #[test]
    fn swu_map_matches_rfc9380_intermediates() {
        let Mapped::OnTarget { x, y } = params().map_to_curve(&fe(U_0)) else {
            panic!("the P-256 map lands on the target curve");
        };
        assert_eq!(
            x.to_bytes().as_slice(),
            hex!("ab640a12220d3ff283510ff3f4b1953d09fad35795140b1c5d64f313967934d5")
        );
        assert_eq!(
            y.to_bytes().as_slice(),
            hex!("dccb558863804a881d4fff3455716c836cef230e5209594ddd33d85c565b19b1")
        );

        let Mapped::OnTarget { x, y } = params().map_to_curve(&fe(U_1)) else {
            panic!("the P-256 map lands on the target curve");
        };
        assert_eq!(
            x.to_bytes().as_slice(),
            hex!("51cce63c50d972a6e51c61334f0f4875c9ac1cd2d3238412f84e31da7d980ef5")
        );
        assert_eq!(
            y.to_bytes().as_slice(),
            hex!("b45d1a36d00ad90e5ec7840a60a4de411917fbe7c82c3949a6e699e5a1b66aac")
        );
    }

    // The SWU output always satisfies the curve equation, whatever the input.
    #[test]
    fn swu_output_is_on_the_curve() {
        for seed in 0_u64..8 {
            let u = FieldElement::from_u64(seed * 7 + 1);
            let Mapped::OnTarget { x, y } = params().map_to_curve(&u) else {
                panic!("the P-256 map lands on the target curve");
            };
            let lhs = MapField::square(&y);
            let x_cubed = MapField::mul(&MapField::square(&x), &x);
            let rhs = MapField::add(
                &MapField::add(&x_cubed, &MapField::mul(&SWU_A, &x)),
                &swu_b(),
            );
            assert_eq!(lhs.to_bytes(), rhs.to_bytes());
            assert!(point_from_coordinates(&x, &y).is_ok());
        }
    }
}
