// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! RFC 9380 hash-to-curve pipeline
//!
//! The pipeline is `hash_to_field` (via [`expand_message_xmd`]) followed by
//! two simplified SWU maps, point addition and cofactor clearing (a no-op for
//! the curves here, h = 1). Two random-oracle suites are provided:
//!
//! - [`nistp256`]: `P256_XMD:SHA-256_SSWU_RO_` — the SWU map lands directly
//!   on the curve (A ≠ 0).
//! - [`secp256k1`]: `secp256k1_XMD:SHA-256_SSWU_RO_` — the SWU map lands on
//!   an isogenous curve E′ and a degree-3 isogeny carries the point over
//!   (AB = 0).
//!
//! Which of the two happens is visible in the type: `map_to_curve` returns a
//! `Mapped` value, and the suite applies the isogeny exactly when the
//! variant demands it.

mod expand;
mod field;
mod isogeny;
pub mod nistp256;
pub mod secp256k1;
mod swu;

pub use expand::expand_message_xmd;
pub use field::hash_to_field;

use isogeny::Isogeny;
use swu::MapField;

/// Output length parameter `L` of hash_to_field: 48 bytes suffices for
/// 256-bit moduli at the 128-bit security level (RFC 9380 §5.2).
pub const L: usize = 48;

/// Affine output of the SWU map, tagged with the curve it landed on.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Mapped<F> {
    /// The map landed directly on the target curve.
    OnTarget {
        /// Affine x coordinate.
        x: F,
        /// Affine y coordinate.
        y: F,
    },
    /// The map landed on the isogenous curve; the isogeny is still owed.
    OnIsogenous {
        /// Affine x coordinate on E′.
        x: F,
        /// Affine y coordinate on E′.
        y: F,
    },
}

impl<F: MapField> Mapped<F> {
    // Target-curve coordinates, applying `isogeny` when the variant demands
    // it. `None` only when the variant demands an isogeny the suite did not
    // supply.
    pub(crate) fn into_target(self, isogeny: Option<&Isogeny<F>>) -> Option<(F, F)> {
        match self {
            Self::OnTarget { x, y } => Some((x, y)),
            Self::OnIsogenous { x, y } => isogeny.map(|iso| iso.map(&x, &y)),
        }
    }
}
