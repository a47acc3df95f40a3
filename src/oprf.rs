// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! RFC 9497 OPRF(P-256, SHA-256) cipher suite, mode 0 (OPRF)
//!
//! The building blocks of the protocol: HashToGroup and HashToScalar with
//! their suite DSTs, DeriveKeyPair, Blind, BlindEvaluate and Finalize, plus
//! the SEC1-compressed element codec used on the wire. Scalars that must
//! never be zero — the server key and the blinding factor — are carried as
//! [`NonZeroScalar`] so the invariant lives in the type.

use digest::{Digest, Output};
use elliptic_curve::bigint::{NonZero, U384};
use elliptic_curve::group::Group;
use elliptic_curve::ops::Invert;
use elliptic_curve::sec1::ToEncodedPoint;
use elliptic_curve::PrimeField;
use p256::{NonZeroScalar, ProjectivePoint, PublicKey, Scalar};
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;

use crate::hash2curve::{self, hash_to_field};
use crate::octet::i2osp_2;
use crate::{Error, Result};

/// contextString = "OPRFV1-" || I2OSP(0, 1) || "-P256-SHA256"
pub const CONTEXT_STRING: &[u8] = b"OPRFV1-\x00-P256-SHA256";

// Suite DSTs. DeriveKeyPair carries no separator before the context string.
const HASH_TO_GROUP_DST: &[u8] = b"HashToGroup-OPRFV1-\x00-P256-SHA256";
const HASH_TO_SCALAR_DST: &[u8] = b"HashToScalar-OPRFV1-\x00-P256-SHA256";
const DERIVE_KEY_PAIR_DST: &[u8] = b"DeriveKeyPairOPRFV1-\x00-P256-SHA256";

/// Byte length of a serialized group element (SEC1 compressed).
pub const ELEMENT_LEN: usize = 33;

/// The P-256 group order n, widened for the HashToScalar reduction.
const GROUP_ORDER: NonZero<U384> = NonZero::from_uint(U384::from_be_hex(
    "00000000000000000000000000000000ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
));

/// G.HashToGroup: hashes `input` to a P-256 point with the suite DST.
pub fn hash_to_group(input: &[u8]) -> Result<ProjectivePoint> {
    hash2curve::nistp256::hash_to_curve(&[input], HASH_TO_GROUP_DST)
}

/// G.HashToScalar: hash_to_field with the group order as the modulus,
/// count 1. A zero scalar is a legal (if astronomically unlikely) output.
pub fn hash_to_scalar(input: &[&[u8]], dst: &[u8]) -> Result<Scalar> {
    let [bytes] = hash_to_field::<1>(input, dst, &GROUP_ORDER)?;
    Option::from(Scalar::from_repr(bytes.into())).ok_or(Error::WeakScalar)
}

/// DeriveKeyPair from RFC 9497 §3.2.1: derives the server private key from a
/// seed and an info string, retrying with a counter until the scalar is
/// non-zero.
pub fn derive_key_pair(seed: &[u8], info: &[u8]) -> Result<NonZeroScalar> {
    // deriveInput = seed || I2OSP(len(info), 2) || info
    let info_len = i2osp_2(info.len())?;

    for counter in 0..=255_u8 {
        // skS = G.HashToScalar(deriveInput || I2OSP(counter, 1))
        let sk_s = hash_to_scalar(&[seed, &info_len, info, &[counter]], DERIVE_KEY_PAIR_DST)?;
        if let Some(sk_s) = Option::<NonZeroScalar>::from(NonZeroScalar::new(sk_s)) {
            return Ok(sk_s);
        }
    }
    Err(Error::DeriveKeyPairExhausted)
}

/// Output of [`blind`]: the secret blinding factor to keep for
/// [`finalize`], and the blinded element to send.
pub struct BlindResult {
    /// The blinding factor; uniform in [1, n-1] and fresh per invocation.
    pub blind: NonZeroScalar,
    /// The blinded group element for the server.
    pub blinded_element: ProjectivePoint,
}

/// Blind from RFC 9497 §3.3.1: hashes the input to the group and multiplies
/// by a fresh uniform non-zero scalar.
pub fn blind<R: RngCore + CryptoRng>(input: &[u8], rng: &mut R) -> Result<BlindResult> {
    let blind = NonZeroScalar::random(rng);
    let blinded_element = hash_to_group(input)? * &*blind;
    Ok(BlindResult {
        blind,
        blinded_element,
    })
}

// Blind with a caller-supplied factor; the RFC vectors fix the blind.
#[cfg(test)]
pub(crate) fn deterministic_blind(input: &[u8], blind: &NonZeroScalar) -> Result<ProjectivePoint> {
    Ok(hash_to_group(input)? * &**blind)
}

/// BlindEvaluate from RFC 9497 §3.3.1, the server side of the protocol.
pub fn evaluate(blinded_element: &ProjectivePoint, key: &NonZeroScalar) -> ProjectivePoint {
    *blinded_element * &**key
}

/// Finalize from RFC 9497 §3.3.1: unblinds the evaluated element and hashes
/// it together with the input.
pub fn finalize(
    input: &[u8],
    blind: &NonZeroScalar,
    evaluated_element: &ProjectivePoint,
) -> Result<Output<Sha256>> {
    // N = blind^-1 * evaluatedElement = skS * H(input)
    let unblinded_element = *evaluated_element * &*blind.invert();
    let issued_element = serialize_element(&unblinded_element)?;

    // hashInput = I2OSP(len(input), 2) || input ||
    //             I2OSP(len(issuedElement), 2) || issuedElement || "Finalize"
    Ok(Sha256::new()
        .chain_update(i2osp_2(input.len())?)
        .chain_update(input)
        .chain_update(i2osp_2(issued_element.len())?)
        .chain_update(issued_element)
        .chain_update(b"Finalize")
        .finalize())
}

/// SerializeElement: the 33-byte SEC1 compressed encoding of a normalised
/// point. The identity has no wire form.
pub fn serialize_element(element: &ProjectivePoint) -> Result<[u8; ELEMENT_LEN]> {
    if bool::from(element.is_identity()) {
        return Err(Error::OffCurvePoint);
    }
    let encoded = element.to_affine().to_encoded_point(true);
    let mut out = [0; ELEMENT_LEN];
    out.copy_from_slice(encoded.as_bytes());
    Ok(out)
}

/// DeserializeElement: strict 33-byte compressed decoding, rejecting
/// off-curve points and the identity.
pub fn deserialize_element(bytes: &[u8]) -> Result<ProjectivePoint> {
    if bytes.len() != ELEMENT_LEN {
        return Err(Error::InvalidLength);
    }
    PublicKey::from_sec1_bytes(bytes)
        .map(|public_key| public_key.to_projective())
        .map_err(|_| Error::OffCurvePoint)
}

/// Serializes an element as lowercase compressed hex, the wire form.
pub fn element_to_hex(element: &ProjectivePoint) -> Result<String> {
    Ok(hex::encode(serialize_element(element)?))
}

/// Parses a hex-coded compressed element, validating it is on the curve.
pub fn element_from_hex(hex_coded: &str) -> Result<ProjectivePoint> {
    let bytes = hex::decode(hex_coded).map_err(|_| Error::InvalidHex)?;
    deserialize_element(&bytes)
}
