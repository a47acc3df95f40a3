// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Errors which are produced during an execution of the protocol

use displaydoc::Display;

/// [`Result`](core::result::Result) shorthand that uses [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Represents an error in the manipulation of the protocol's cryptographic
/// data.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Error {
    /// could not decode a hex-coded elliptic-curve element
    InvalidHex,
    /// decoded element is off the curve, the identity, or not constructible
    OffCurvePoint,
    /// an integer or byte-string argument was outside its legal range
    InvalidLength,
    /// the domain separation tag is empty
    InvalidDst,
    /// key derivation exhausted all 256 counter values without a usable key
    DeriveKeyPairExhausted,
    /// scalar is zero or not canonical for the group order
    WeakScalar,
    /// the hash-to-curve pipeline produced an invalid element
    HashToCurve,
}

impl std::error::Error for Error {}
