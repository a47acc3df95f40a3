// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! `secp256k1_XMD:SHA-256_SSWU_RO_` (RFC 9380 §8.7)
//!
//! secp256k1 has A = 0, so the SWU map targets an isogenous curve E′ and a
//! degree-3 isogeny carries the mapped points onto the curve itself.

use elliptic_curve::bigint::{NonZero, U384};
use elliptic_curve::sec1::FromEncodedPoint;
use elliptic_curve::Field;
use hex_literal::hex;
use k256::{AffinePoint, EncodedPoint, FieldBytes, FieldElement, ProjectivePoint};
use subtle::Choice;

use super::field::hash_to_field;
use super::isogeny::Isogeny;
use super::swu::{Landing, MapField, SwuParams};
use super::Mapped;
use crate::{Error, Result};

/// The secp256k1 field prime, widened for the hash_to_field reduction.
pub(crate) const FIELD_MODULUS: NonZero<U384> = NonZero::from_uint(U384::from_be_hex(
    "00000000000000000000000000000000fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
));

// (p - 3) / 4 and (p + 1) / 4, little-endian limbs.
const C1: [u64; 4] = [
    0xffff_ffff_bfff_ff0b,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x3fff_ffff_ffff_ffff,
];
const SQRT_EXP: [u64; 4] = [
    0xffff_ffff_bfff_ff0c,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x3fff_ffff_ffff_ffff,
];

impl MapField for FieldElement {
    const ZERO: Self = FieldElement::ZERO;
    const ONE: Self = FieldElement::ONE;

    // k256 uses a lazily-normalized field representation; every operation
    // here hands back a fully normalized value so parity, equality and
    // serialization stay meaningful.
    fn add(&self, rhs: &Self) -> Self {
        (*self + *rhs).normalize()
    }

    fn mul(&self, rhs: &Self) -> Self {
        (*self * *rhs).normalize()
    }

    fn square(&self) -> Self {
        FieldElement::square(self).normalize()
    }

    fn negate(&self) -> Self {
        FieldElement::negate(self, 1).normalize()
    }

    fn invert_or_zero(&self) -> Self {
        FieldElement::invert(self)
            .unwrap_or(FieldElement::ZERO)
            .normalize()
    }

    fn pow(&self, exp: &[u64; 4]) -> Self {
        self.pow_vartime(exp).normalize()
    }

    fn is_odd(&self) -> Choice {
        FieldElement::is_odd(self)
    }
}

// Map parameters from RFC 9380 §8.7: the isogenous curve E′ has
// A′ = 0x3f8731ab…4533 and B′ = 1771; Z = -11 mod p.
pub(crate) fn params() -> SwuParams<FieldElement> {
    SwuParams {
        a: fe(hex!(
            "3f8731abdd661adca08a5558f0f5d272e953d363cb6f0e5d405447c01a444533"
        )),
        b: fe(hex!(
            "00000000000000000000000000000000000000000000000000000000000006eb"
        )),
        z: fe(hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc24"
        )),
        c1: C1,
        sqrt_exp: SQRT_EXP,
        landing: Landing::Isogenous,
    }
}

// Degree-3 isogeny E′ → secp256k1, coefficient tables from RFC 9380
// Appendix E.1, ascending powers.
pub(crate) fn isogeny() -> Isogeny<FieldElement> {
    Isogeny {
        x_num: [
            fe(hex!(
                "8e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38daaaaa8c7"
            )),
            fe(hex!(
                "07d3d4c80bc321d5b9f315cea7fd44c5d595d2fc0bf63b92dfff1044f17c6581"
            )),
            fe(hex!(
                "534c328d23f234e6e2a413deca25caece4506144037c40314ecbd0b53d9dd262"
            )),
            fe(hex!(
                "8e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38e38daaaaa88c"
            )),
        ],
        x_den: [
            fe(hex!(
                "d35771193d94918a9ca34ccbb7b640dd86cd409542f8487d9fe6b745781eb49b"
            )),
            fe(hex!(
                "edadc6f64383dc1df7c4b2d51b54225406d36b641f5e41bbc52a56612a8c6d14"
            )),
            FieldElement::ONE,
        ],
        y_num: [
            fe(hex!(
                "4bda12f684bda12f684bda12f684bda12f684bda12f684bda12f684b8e38e23c"
            )),
            fe(hex!(
                "c75e0c32d5cb7c0fa9d0a54b12a0a6d5647ab046d686da6fdffc90fc201d71a3"
            )),
            fe(hex!(
                "29a6194691f91a73715209ef6512e576722830a201be2018a765e85a9ecee931"
            )),
            fe(hex!(
                "2f684bda12f684bda12f684bda12f684bda12f684bda12f684bda12f38e38d84"
            )),
        ],
        y_den: [
            fe(hex!(
                "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffff93b"
            )),
            fe(hex!(
                "7a06534bb8bdb49fd5e9e6632722c2989467c1bfc8e8d978dfb425d2685c2573"
            )),
            fe(hex!(
                "6484aa716545ca2cf3a70c3fa8fe337e0a3d21162f0d6299a7bf8192bfd2a76f"
            )),
            FieldElement::ONE,
        ],
    }
}

/// Corresponds to the hash_to_curve() function from RFC 9380 §3 for the
/// `secp256k1_XMD:SHA-256_SSWU_RO_` suite.
pub fn hash_to_curve(msg: &[&[u8]], dst: &[u8]) -> Result<ProjectivePoint> {
    let [u0, u1] = hash_to_field::<2>(msg, dst, &FIELD_MODULUS)?;
    let params = params();
    let iso = isogeny();
    let q0 = lift(&iso, params.map_to_curve(&element_from_reduced(&u0)?))?;
    let q1 = lift(&iso, params.map_to_curve(&element_from_reduced(&u1)?))?;
    // clear_cofactor is the identity map: h = 1 for secp256k1
    Ok(ProjectivePoint::from(q0) + &ProjectivePoint::from(q1))
}

fn lift(iso: &Isogeny<FieldElement>, mapped: Mapped<FieldElement>) -> Result<AffinePoint> {
    let (x, y) = mapped.into_target(Some(iso)).ok_or(Error::HashToCurve)?;
    point_from_coordinates(&x, &y)
}

pub(crate) fn element_from_reduced(bytes: &[u8; 32]) -> Result<FieldElement> {
    let bytes = FieldBytes::from(*bytes);
    Option::from(FieldElement::from_bytes(&bytes)).ok_or(Error::HashToCurve)
}

// Field-element constant from its canonical big-endian bytes.
fn fe(bytes: [u8; 32]) -> FieldElement {
    let bytes = FieldBytes::from(bytes);
    Option::from(FieldElement::from_bytes(&bytes)).expect("canonical field-element constant")
}

fn point_from_coordinates(x: &FieldElement, y: &FieldElement) -> Result<AffinePoint> {
    let encoded = EncodedPoint::from_affine_coordinates(&x.to_bytes(), &y.to_bytes(), false);
    Option::from(AffinePoint::from_encoded_point(&encoded)).ok_or(Error::HashToCurve)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DST: &[u8] = b"QUUX-V01-CS02-with-secp256k1_XMD:SHA-256_SSWU_RO_";

    // Intermediate vectors from RFC 9380 §J.8.1, msg = "".
    const U_0: [u8; 32] = hex!("6b0f9910dd2ba71c78f2ee9f04d73b5f4c5f7fc773a701abea1e573cab002fb3");
    const U_1: [u8; 32] = hex!("1ae6c212e08fe1a5937f6202f929a2cc8ef4ee5b9782db68b0d5799fd8f09e16");

    #[test]
    fn hash_to_field_matches_rfc9380_intermediates() {
        let [u0, u1] = hash_to_field::<2>(&[b""], DST, &FIELD_MODULUS).unwrap();
        assert_eq!(u0, U_0);
        assert_eq!(u1, U_1);
    }

    #[test]
    fn swu_with_isogeny_matches_rfc9380_intermediates() {
        let params = params();
        let iso = isogeny();

        let mapped = params.map_to_curve(&element_from_reduced(&U_0).unwrap());
        assert!(matches!(mapped, Mapped::OnIsogenous { .. }));
        let (x, y) = mapped.into_target(Some(&iso)).unwrap();
        assert_eq!(
            x.to_bytes().as_slice(),
            hex!("74519ef88b32b425a095e4ebcc84d81b64e9e2c2675340a720bb1a1857b99f1e")
        );
        assert_eq!(
            y.to_bytes().as_slice(),
            hex!("c174fa322ab7c192e11748beed45b508e9fdb1ce046dee9c2cd3a2a86b410936")
        );

        let mapped = params.map_to_curve(&element_from_reduced(&U_1).unwrap());
        let (x, y) = mapped.into_target(Some(&iso)).unwrap();
        assert_eq!(
            x.to_bytes().as_slice(),
            hex!("44548adb1b399263ded3510554d28b4bead34b8cf9a37b4bd0bd2ba4db87ae63")
        );
        assert_eq!(
            y.to_bytes().as_slice(),
            hex!("96eb8e2faf05e368efe5957c6167001760233e6dd2487516b46ae725c4cce0c6")
        );
    }

    // The tagged variant without its isogeny has nowhere to land.
    #[test]
    fn isogenous_variant_requires_the_isogeny() {
        let mapped = params().map_to_curve(&element_from_reduced(&U_0).unwrap());
        assert!(mapped.into_target(None).is_none());
    }
}
