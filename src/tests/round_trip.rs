// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! End-to-end client/server scenarios over the wire representation

use proptest::prelude::*;
use rand::rngs::OsRng;

use crate::message::{EvaluationRequest, EvaluationResponse};
use crate::{Client, Error, LocalServer, Result, Server};

const TEST_DATA: &str = "test data for round trip";
const TEST_DATA_2: &str = "Different Data";

#[test]
fn same_server_same_data_same_key() {
    let server = LocalServer::new(&mut OsRng);
    let alice = Client::new();
    let bob = Client::new();

    let alice_key = alice.convert_to_identity_key(&server, TEST_DATA).unwrap();
    let bob_key = bob.convert_to_identity_key(&server, TEST_DATA).unwrap();
    let alice_key_2 = alice.convert_to_identity_key(&server, TEST_DATA_2).unwrap();
    let bob_key_2 = bob.convert_to_identity_key(&server, TEST_DATA_2).unwrap();

    assert_eq!(alice_key, bob_key);
    assert_eq!(alice_key_2, bob_key_2);
    assert_ne!(alice_key, alice_key_2);
}

#[test]
fn different_servers_produce_different_keys() {
    let server_1 = LocalServer::new(&mut OsRng);
    let server_2 = LocalServer::new(&mut OsRng);
    let client = Client::new();

    let key_1 = client.convert_to_identity_key(&server_1, TEST_DATA).unwrap();
    let key_2 = client.convert_to_identity_key(&server_2, TEST_DATA).unwrap();

    assert_ne!(key_1, key_2);
}

#[test]
fn identity_key_is_namespaced_by_the_process_identifier() {
    let server = LocalServer::new(&mut OsRng);
    let key = Client::new()
        .convert_to_identity_key(&server, TEST_DATA)
        .unwrap();

    let (namespace, digest) = key.rsplit_once(':').unwrap();
    assert_eq!(namespace, server.process_identifier());
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

// Two servers seeded identically share the OPRF key but not the process
// identifier, so the digest halves agree while the full keys differ.
#[test]
fn seeded_servers_share_digests_but_not_namespaces() {
    let seed = [0x17; 32];
    let server_1 = LocalServer::from_seed(&seed, b"info").unwrap();
    let server_2 = LocalServer::from_seed(&seed, b"info").unwrap();
    let client = Client::new();

    let key_1 = client.convert_to_identity_key(&server_1, TEST_DATA).unwrap();
    let key_2 = client.convert_to_identity_key(&server_2, TEST_DATA).unwrap();

    assert_ne!(key_1, key_2);
    let digest_1 = key_1.rsplit_once(':').unwrap().1;
    let digest_2 = key_2.rsplit_once(':').unwrap().1;
    assert_eq!(digest_1, digest_2);

    let server_3 = LocalServer::from_seed(&seed, b"other info").unwrap();
    let key_3 = client.convert_to_identity_key(&server_3, TEST_DATA).unwrap();
    assert_ne!(digest_1, key_3.rsplit_once(':').unwrap().1);
}

// A server answering with garbage surfaces the parse error unchanged.
#[test]
fn malformed_server_responses_propagate() {
    struct BrokenServer(&'static str);

    impl Server for BrokenServer {
        fn process(&self, _request: &EvaluationRequest) -> Result<EvaluationResponse> {
            Ok(EvaluationResponse {
                hex_coded_ec_point: self.0.into(),
                process_identifier: "SP:broken".into(),
            })
        }
    }

    let client = Client::new();
    assert_eq!(
        client.convert_to_identity_key(&BrokenServer("not hex"), TEST_DATA),
        Err(Error::InvalidHex)
    );
    assert_eq!(
        client.convert_to_identity_key(&BrokenServer("02ab"), TEST_DATA),
        Err(Error::InvalidLength)
    );

    struct FailingServer;

    impl Server for FailingServer {
        fn process(&self, _request: &EvaluationRequest) -> Result<EvaluationResponse> {
            Err(Error::OffCurvePoint)
        }
    }

    assert_eq!(
        client.convert_to_identity_key(&FailingServer, TEST_DATA),
        Err(Error::OffCurvePoint)
    );
}

proptest! {
    // Arbitrary request payloads never panic the server, valid or not.
    #[test]
    fn process_never_panics(payload in ".{0,80}") {
        let server = LocalServer::new(&mut OsRng);
        let _ = server.process(&EvaluationRequest {
            hex_coded_ec_point: payload,
            request_id: "prop".into(),
        });
    }

    #[test]
    fn process_never_panics_on_hexish_input(payload in "[0-9a-f]{0,132}") {
        let server = LocalServer::new(&mut OsRng);
        let _ = server.process(&EvaluationRequest {
            hex_coded_ec_point: payload,
            request_id: "prop".into(),
        });
    }

    // Any data the protocol accepts round-trips deterministically.
    #[test]
    fn identity_keys_are_stable(data in ".{0,40}") {
        let server = LocalServer::new(&mut OsRng);
        let client = Client::new();
        let first = client.convert_to_identity_key(&server, &data).unwrap();
        let second = client.convert_to_identity_key(&server, &data).unwrap();
        prop_assert_eq!(first, second);
    }
}
