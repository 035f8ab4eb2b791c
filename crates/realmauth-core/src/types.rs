// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Length of a per-account salt in bytes.
pub const SALT_LENGTH: usize = 32;
/// Length of a password verifier in bytes.
pub const VERIFIER_LENGTH: usize = 32;
/// Length of a SHA1 digest in bytes.
pub const DIGEST_LENGTH: usize = 20;
/// Length of a hex-encoded ephemeral value (`A`, `B`) in characters.
pub const EPHEMERAL_HEX_LENGTH: usize = 64;
/// Length of a hex-encoded proof (`M1`, `M2`) or session key in characters.
pub const PROOF_HEX_LENGTH: usize = 2 * DIGEST_LENGTH;

const _: () = assert!(SALT_LENGTH == VERIFIER_LENGTH);
const _: () = assert!(EPHEMERAL_HEX_LENGTH == 2 * VERIFIER_LENGTH);
const _: () = assert!(PROOF_HEX_LENGTH == 40);

/// Enumerates all error conditions that can arise in the credential engine.
///
/// The display strings are what a transport layer may surface verbatim.
/// [`SrpError::AuthenticationFailed`] deliberately reads the same whether the
/// account is unknown or the proof was wrong, so responses never reveal
/// whether a username exists.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SrpError {
    /// A registration field violates the length or character policy.
    #[error("username or password does not meet the account policy")]
    InvalidInput,
    /// A proof payload is not well-formed hex/base64 of the expected width.
    #[error("invalid username or password")]
    MalformedInput,
    /// A proof arrived for an unknown, expired, or already-consumed session.
    #[error("invalid username or password")]
    ProtocolState,
    /// The client proof did not match, or the account is unknown.
    #[error("invalid username or password")]
    AuthenticationFailed,
    /// An operation was invoked under a configuration that excludes it.
    #[error("operation not available under the active authentication mode")]
    UnsupportedConfig,
}

/// Convenience alias for `Result<T, SrpError>`.
pub type SrpResult<T> = Result<T, SrpError>;

/// Selects the formula for the server public ephemeral `B`.
///
/// [`EphemeralScheme::Classic`] is the full SRP6 form and the default. The
/// plain form is a known weaker variant that some deployed portals use; it
/// exists only behind this named flag so the divergence is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EphemeralScheme {
    /// `B = (k*v + g^b) mod N`.
    Classic,
    /// `B = g^b mod N`, omitting the `k*v` term.
    PlainModPow,
}

/// Compares two byte slices in constant time.
///
/// Returns `true` if the slices are equal. If the lengths differ, returns
/// `false` immediately (length itself is not secret).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
