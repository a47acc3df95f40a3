// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The client side of the protocol

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::message::EvaluationRequest;
use crate::server::Server;
use crate::{oprf, Result};

/// The client side of the protocol: turns sensitive data into an identity
/// key with the help of a [`Server`], without the server ever seeing the
/// data or the derived key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Client;

impl Client {
    /// Creates a client.
    pub const fn new() -> Self {
        Self
    }

    /// Converts `sensitive_data` into an identity key of the form
    /// `"<processIdentifier>:<64 hex chars>"`.
    ///
    /// The result is deterministic for a given (server key, input) pair: any
    /// client converting the same data against the same server obtains the
    /// same key, while the blinding keeps the data hidden from the server.
    /// Blinding factors come from [`OsRng`] and are zeroized before
    /// returning.
    ///
    /// # Errors
    /// Failures reported by the server's [`process`](Server::process), and
    /// the same error kinds again when the server's response element fails
    /// to parse.
    pub fn convert_to_identity_key<S>(&self, server: &S, sensitive_data: &str) -> Result<String>
    where
        S: Server + ?Sized,
    {
        self.convert_to_identity_key_with_rng(server, sensitive_data, &mut OsRng)
    }

    /// [`convert_to_identity_key`](Self::convert_to_identity_key) with a
    /// caller-supplied source of blinding randomness, which must be
    /// cryptographically strong.
    #[instrument(level = "debug", skip_all)]
    pub fn convert_to_identity_key_with_rng<S, R>(
        &self,
        server: &S,
        sensitive_data: &str,
        rng: &mut R,
    ) -> Result<String>
    where
        S: Server + ?Sized,
        R: RngCore + CryptoRng,
    {
        // RFC 9497 passes the raw UTF-8 bytes straight into HashToGroup.
        let input = sensitive_data.as_bytes();

        let blind_result = oprf::blind(input, rng)?;
        let blind = Zeroizing::new(blind_result.blind);

        let request = EvaluationRequest {
            hex_coded_ec_point: oprf::element_to_hex(&blind_result.blinded_element)?,
            request_id: Uuid::new_v4().to_string(),
        };
        debug!(request_id = %request.request_id, "requesting evaluation");
        let response = server.process(&request)?;

        let evaluated_element = oprf::element_from_hex(&response.hex_coded_ec_point)?;
        let output = oprf::finalize(input, &blind, &evaluated_element)?;

        Ok(format!(
            "{}:{}",
            response.process_identifier,
            hex::encode(output)
        ))
    }
}
