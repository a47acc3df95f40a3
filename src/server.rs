// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The server side of the protocol

use core::fmt;

use p256::NonZeroScalar;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};
use uuid::Uuid;
use zeroize::ZeroizeOnDrop;

use crate::message::{EvaluationRequest, EvaluationResponse};
use crate::{oprf, Result};

/// The boundary between clients and whatever hosts the server key: a single
/// operation that evaluates one blinded element.
///
/// Implementations hold no per-client state. All linkage between inputs and
/// outputs is carried by the server's secret scalar and never exposed.
pub trait Server {
    /// Evaluates the blinded element in `request` under the server key.
    ///
    /// # Errors
    /// - [`Error::InvalidHex`](crate::Error::InvalidHex) when the request
    ///   element is not valid hex.
    /// - [`Error::InvalidLength`](crate::Error::InvalidLength) when it is not
    ///   33 bytes.
    /// - [`Error::OffCurvePoint`](crate::Error::OffCurvePoint) when it fails
    ///   the curve equation or encodes the identity — potentially adversarial
    ///   input.
    fn process(&self, request: &EvaluationRequest) -> Result<EvaluationResponse>;
}

/// An in-process [`Server`] owning a P-256 OPRF key.
///
/// The key is either drawn uniformly at random ([`LocalServer::new`]) or
/// derived deterministically from a seed ([`LocalServer::from_seed`]). Every
/// instance mints a fresh process identifier, so two servers with the same
/// key still namespace their identity keys apart. The key is zeroized on
/// drop.
#[derive(ZeroizeOnDrop)]
pub struct LocalServer {
    key: NonZeroScalar,
    process_identifier: String,
}

impl LocalServer {
    /// Creates a server with a uniformly random key in [1, n-1].
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            key: NonZeroScalar::random(rng),
            process_identifier: fresh_process_identifier(),
        }
    }

    /// Creates a server whose key is derived from `seed` and `info` via
    /// DeriveKeyPair (RFC 9497 §3.2.1).
    ///
    /// # Errors
    /// [`Error::DeriveKeyPairExhausted`](crate::Error::DeriveKeyPairExhausted)
    /// when no non-zero scalar is found in 256 attempts — cryptographically
    /// negligible.
    pub fn from_seed(seed: &[u8], info: &[u8]) -> Result<Self> {
        Ok(Self {
            key: oprf::derive_key_pair(seed, info)?,
            process_identifier: fresh_process_identifier(),
        })
    }

    /// The opaque token this server stamps on every response.
    pub fn process_identifier(&self) -> &str {
        &self.process_identifier
    }

    // Only used for tests
    #[cfg(test)]
    pub(crate) fn key(&self) -> &NonZeroScalar {
        &self.key
    }
}

impl Server for LocalServer {
    #[instrument(level = "debug", skip_all, fields(request_id = %request.request_id))]
    fn process(&self, request: &EvaluationRequest) -> Result<EvaluationResponse> {
        let blinded_element = oprf::element_from_hex(&request.hex_coded_ec_point)?;
        let evaluated_element = oprf::evaluate(&blinded_element, &self.key);
        debug!("evaluated blinded element");
        Ok(EvaluationResponse {
            hex_coded_ec_point: oprf::element_to_hex(&evaluated_element)?,
            process_identifier: self.process_identifier.clone(),
        })
    }
}

impl fmt::Debug for LocalServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The key never appears in diagnostics.
        f.debug_struct("LocalServer")
            .field("process_identifier", &self.process_identifier)
            .finish_non_exhaustive()
    }
}

fn fresh_process_identifier() -> String {
    format!("SP:{}", Uuid::new_v4())
}
