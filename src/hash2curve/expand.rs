// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

use digest::{Digest, Output};
use sha2::Sha256;

use crate::octet::{i2osp, strxor};
use crate::{Error, Result};

// b_in_bytes: output size of SHA-256
const B_IN_BYTES: usize = 32;
// r_in_bytes: input block size of SHA-256
const R_IN_BYTES: usize = 64;
// DSTs longer than this are hashed down before use (RFC 9380 §5.3.3)
const MAX_DST_LEN: usize = 255;

const OVERSIZE_DST_PREFIX: &[u8] = b"H2C-OVERSIZE-DST-";

/// Corresponds to the expand_message_xmd() function from RFC 9380 §5.3.1,
/// instantiated with SHA-256.
///
/// The message is taken in parts so callers can feed concatenations without
/// assembling them first. `len_in_bytes` must lie in `[1, 65535]` and may
/// request at most 255 hash blocks.
pub fn expand_message_xmd(msg: &[&[u8]], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>> {
    if len_in_bytes == 0 {
        return Err(Error::InvalidLength);
    }
    if dst.is_empty() {
        return Err(Error::InvalidDst);
    }

    // l_i_b_str = I2OSP(len_in_bytes, 2); also enforces the 65535 ceiling
    let l_i_b_str = i2osp(len_in_bytes, 2)?;

    // ell = ceil(len_in_bytes / b_in_bytes), ABORT if ell > 255
    let ell = u8::try_from((len_in_bytes + B_IN_BYTES - 1) / B_IN_BYTES)
        .map_err(|_| Error::InvalidLength)?;

    // DST_prime = DST || I2OSP(len(DST), 1), hashing oversized tags first
    let mut dst_prime = if dst.len() > MAX_DST_LEN {
        Sha256::new()
            .chain_update(OVERSIZE_DST_PREFIX)
            .chain_update(dst)
            .finalize()
            .to_vec()
    } else {
        dst.to_vec()
    };
    let dst_len = u8::try_from(dst_prime.len()).map_err(|_| Error::InvalidDst)?;
    dst_prime.push(dst_len);

    // b_0 = H(msg_prime)
    // msg_prime = Z_pad || msg || l_i_b_str || I2OSP(0, 1) || DST_prime
    let mut hash = Sha256::new();
    Digest::update(&mut hash, [0; R_IN_BYTES]);
    for part in msg {
        Digest::update(&mut hash, part);
    }
    Digest::update(&mut hash, &l_i_b_str);
    Digest::update(&mut hash, [0]);
    Digest::update(&mut hash, &dst_prime);
    let b_0 = hash.finalize_reset();

    let mut b_i = Output::<Sha256>::default();
    let mut uniform_bytes = vec![0; len_in_bytes];

    // b_1 = H(b_0 || I2OSP(1, 1) || DST_prime)
    // b_i = H(strxor(b_0, b_(i - 1)) || I2OSP(i, 1) || DST_prime)
    for (i, chunk) in (1..=ell).zip(uniform_bytes.chunks_mut(B_IN_BYTES)) {
        Digest::update(&mut hash, strxor(&b_0, &b_i)?);
        Digest::update(&mut hash, [i]);
        Digest::update(&mut hash, &dst_prime);
        b_i = hash.finalize_reset();
        // uniform_bytes = b_1 || ... || b_ell, truncated to len_in_bytes
        chunk.copy_from_slice(&b_i[..chunk.len()]);
    }

    Ok(uniform_bytes)
}
