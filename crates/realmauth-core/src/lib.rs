// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

//! Core library for the Realmauth SRP6 credential engine.
//!
//! Implements the Secure Remote Password (version 6) arithmetic used by
//! game-account registration portals that target the AzerothCore account
//! table: password verifier derivation at registration time and the
//! challenge/proof computations of the login exchange. Both sides of the
//! exchange share these primitives so the formulas cannot drift apart.
//!
//! A compatibility note that governs everything in [`srp`]: the portal this
//! engine interoperates with hashes the **uppercase, zero-padded hex text**
//! of big integers, not their raw bytes. `u`, the session key, and the
//! `M1`/`M2` proofs are all SHA1 digests of concatenated hex strings.
//!
//! # Crate layout
//!
//! * [`types`] -- shared constants, the error taxonomy, and constant-time
//!   comparison.
//! * [`codec`] -- fixed-width hex and base64 encoding for values that cross
//!   the wire or touch the account table.
//! * [`srp`] -- the SRP6 group and the verifier/exchange arithmetic.

/// Fixed-width hex and base64 codecs for wire and storage values.
pub mod codec;
/// SRP6 group parameters and protocol arithmetic.
pub mod srp;
/// Shared constants, error types, and constant-time comparison.
pub mod types;
