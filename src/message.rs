// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Wire messages exchanged between [`Client`](crate::Client) and a
//! [`Server`](crate::Server)
//!
//! Both messages carry a single group element as 66 lowercase hex characters
//! (the 33-byte SEC1 compressed encoding). The identifiers travelling next to
//! it are opaque: the request id only serves tracing, and the process
//! identifier is whatever token the server chooses to mint.

use serde::{Deserialize, Serialize};

/// A request to evaluate a blinded element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// The blinded element, SEC1 compressed, hex-coded.
    pub hex_coded_ec_point: String,
    /// Opaque id used for request tracing; never fed into the OPRF
    /// computation.
    pub request_id: String,
}

/// The server's answer to an [`EvaluationRequest`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    /// The evaluated element, SEC1 compressed, hex-coded.
    pub hex_coded_ec_point: String,
    /// Opaque token identifying the server process that produced the
    /// evaluation; identity keys are namespaced by it.
    pub process_identifier: String,
}
