// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! An implementation of an oblivious pseudorandom function (OPRF) for
//! deriving stable identity keys from sensitive data
//!
//! A client holding sensitive input (an email address, a document number)
//! and a server holding a secret scalar jointly compute a deterministic
//! identifier for that input. The server never sees the input or the
//! resulting identifier; the client never sees the server key. Two clients
//! converting the same input against the same server obtain the same
//! identity key, and the same input against a different server yields an
//! unrelated one — which makes the output safe to use as a join key,
//! dedupe key or blind index without becoming a global correlation handle.
//!
//! The cipher suite is OPRF(P-256, SHA-256) in mode 0 of [RFC 9497], with
//! hash-to-curve per [RFC 9380] (`P256_XMD:SHA-256_SSWU_RO_`). The whole
//! pipeline — `expand_message_xmd`, `hash_to_field`, the simplified SWU map
//! and the protocol on top — is implemented in this crate and validated
//! against the RFC test vectors; only the underlying field and group
//! arithmetic is delegated to the `p256`/`k256` crates.
//!
//! # Protocol flow
//!
//! ```text
//! client: input ── HashToGroup ── ·r ──► request (hex, request id)
//! server:                               ·skS ──► response (hex, process id)
//! client: ·r⁻¹ ── Finalize ──► "<processIdentifier>:<hex(output)>"
//! ```
//!
//! # Example
//!
//! ```
//! use blind_id::{Client, LocalServer};
//! use rand::rngs::OsRng;
//!
//! let server = LocalServer::new(&mut OsRng);
//! let client = Client::new();
//!
//! let key = client
//!     .convert_to_identity_key(&server, "alice@example.com")
//!     .expect("evaluation failed");
//! let again = client
//!     .convert_to_identity_key(&server, "alice@example.com")
//!     .expect("evaluation failed");
//!
//! // Deterministic per (server, input), regardless of the blinding.
//! assert_eq!(key, again);
//! ```
//!
//! Servers that must survive restarts derive their key from a seed instead
//! of drawing it at random, and anything that can evaluate a request can
//! stand behind the [`Server`] trait:
//!
//! ```
//! use blind_id::{Client, LocalServer, Server};
//!
//! let server = LocalServer::from_seed(&[0xa3; 32], b"identity-keys/v1")
//!     .expect("key derivation failed");
//! let handle: &dyn Server = &server;
//!
//! let key = Client::new()
//!     .convert_to_identity_key(handle, "alice@example.com")
//!     .expect("evaluation failed");
//! assert!(key.starts_with(server.process_identifier()));
//! ```
//!
//! [RFC 9380]: https://www.rfc-editor.org/rfc/rfc9380
//! [RFC 9497]: https://www.rfc-editor.org/rfc/rfc9497

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;
pub mod hash2curve;
mod message;
mod octet;
pub mod oprf;
mod server;

#[cfg(test)]
mod tests;

// Exports

pub use crate::client::Client;
pub use crate::error::{Error, Result};
pub use crate::message::{EvaluationRequest, EvaluationResponse};
pub use crate::server::{LocalServer, Server};
