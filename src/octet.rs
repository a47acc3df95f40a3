// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Octet-string primitives from RFC 8017

use elliptic_curve::bigint::U384;

use crate::{Error, Result};

// Corresponds to the I2OSP() function from RFC8017: big-endian serialization
// of `value` into exactly `length` bytes.
pub(crate) fn i2osp(value: usize, length: usize) -> Result<Vec<u8>> {
    const SIZEOF_USIZE: usize = core::mem::size_of::<usize>();

    // Check if value >= 256^length
    if length < SIZEOF_USIZE && (value >> (8 * length)) != 0 {
        return Err(Error::InvalidLength);
    }

    if length >= SIZEOF_USIZE {
        let mut output = vec![0; length];
        output[length - SIZEOF_USIZE..].copy_from_slice(&value.to_be_bytes());
        return Ok(output);
    }

    Ok(value.to_be_bytes()[SIZEOF_USIZE - length..].to_vec())
}

// Two-byte I2OSP, the only fixed width the OPRF suite needs.
pub(crate) fn i2osp_2(value: usize) -> Result<[u8; 2]> {
    u16::try_from(value)
        .map(u16::to_be_bytes)
        .map_err(|_| Error::InvalidLength)
}

// Corresponds to the OS2IP() function from RFC8017. `U384` is wide enough for
// the 48-byte windows hash_to_field feeds through here.
pub(crate) fn os2ip(bytes: &[u8]) -> Result<U384> {
    if bytes.len() > U384::BYTES {
        return Err(Error::InvalidLength);
    }
    let mut padded = [0; U384::BYTES];
    padded[U384::BYTES - bytes.len()..].copy_from_slice(bytes);
    Ok(U384::from_be_slice(&padded))
}

// XOR of two equal-length byte strings.
pub(crate) fn strxor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(Error::InvalidLength);
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;

    // Test the error condition for I2OSP
    #[test]
    fn i2osp_err_check() {
        assert!(i2osp(0, 1).is_ok());

        assert!(i2osp(255, 1).is_ok());
        assert!(i2osp(256, 1).is_err());
        assert!(i2osp(257, 1).is_err());

        assert!(i2osp(256 * 256 - 1, 2).is_ok());
        assert!(i2osp(256 * 256, 2).is_err());
        assert!(i2osp(256 * 256 + 1, 2).is_err());

        assert!(i2osp(0, 0).is_ok());
        assert!(i2osp(1, 0).is_err());
    }

    #[test]
    fn i2osp_pads_to_length() {
        assert_eq!(i2osp(1, 2).unwrap(), [0x00, 0x01]);
        assert_eq!(i2osp(0x0102, 2).unwrap(), [0x01, 0x02]);
        assert_eq!(i2osp(7, 12).unwrap(), [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7]);
        assert_eq!(i2osp_2(33).unwrap(), [0x00, 0x21]);
        assert!(i2osp_2(65536).is_err());
    }

    #[test]
    fn strxor_rejects_mismatched_lengths() {
        assert_eq!(strxor(&[0xff, 0x0f], &[0x0f, 0xff]).unwrap(), [0xf0, 0xf0]);
        assert_eq!(strxor(&[], &[]).unwrap(), Vec::<u8>::new());
        assert_eq!(strxor(&[1, 2], &[1]), Err(Error::InvalidLength));
    }

    #[test]
    fn os2ip_rejects_oversized_input() {
        assert!(os2ip(&[0xff; 48]).is_ok());
        assert_eq!(os2ip(&[0xff; 49]), Err(Error::InvalidLength));
    }

    proptest! {
        // I2OSP and OS2IP are mutually inverse on their legal domain.
        #[test]
        fn i2osp_os2ip_roundtrip(value: u32, length in 4_usize..=48) {
            let encoded = i2osp(value as usize, length).unwrap();
            prop_assert_eq!(encoded.len(), length);
            prop_assert_eq!(os2ip(&encoded).unwrap(), U384::from_u64(value.into()));
        }

        #[test]
        fn strxor_is_an_involution(a in vec(any::<u8>(), 0..64)) {
            let b: Vec<u8> = a.iter().map(|x| x.wrapping_add(0x5a)).collect();
            let xored = strxor(&a, &b).unwrap();
            prop_assert_eq!(strxor(&xored, &b).unwrap(), a);
        }
    }
}
