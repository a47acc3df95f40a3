// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

use elliptic_curve::bigint::{Encoding, NonZero, U384};

use crate::hash2curve::{expand_message_xmd, L};
use crate::octet::os2ip;
use crate::Result;

/// Corresponds to the hash_to_field() function from RFC 9380 §5.2 for prime
/// fields (m = 1), producing `COUNT` elements of the field described by
/// `modulus`.
///
/// The modulus is an explicit argument — the P-256 field prime, the P-256
/// group order and the secp256k1 field prime all flow through here — and each
/// element comes back as its canonical 32-byte big-endian encoding, reduced
/// and ready for the curve library's deserializers.
pub fn hash_to_field<const COUNT: usize>(
    msg: &[&[u8]],
    dst: &[u8],
    modulus: &NonZero<U384>,
) -> Result<[[u8; 32]; COUNT]> {
    let uniform_bytes = expand_message_xmd(msg, dst, COUNT * L)?;

    let mut elements = [[0; 32]; COUNT];
    for (window, element) in uniform_bytes.chunks_exact(L).zip(&mut elements) {
        // e_i = OS2IP(substr(uniform_bytes, i * L, L)) mod modulus
        let reduced = os2ip(window)? % *modulus;
        element.copy_from_slice(&reduced.to_be_bytes()[U384::BYTES - 32..]);
    }
    Ok(elements)
}
