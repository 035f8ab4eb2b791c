// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

//! Encoding helpers for values that cross the wire or touch the account
//! table: 32-byte big-endian buffers for salts and verifiers, 64-character
//! uppercase hex for the `A`/`B` ephemerals, base64 for storage text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use num_bigint::BigUint;

use crate::types::{SrpError, SrpResult, EPHEMERAL_HEX_LENGTH, PROOF_HEX_LENGTH, SALT_LENGTH};

/// Renders an unsigned big integer as exactly 64 uppercase hex characters,
/// left-padded with zeros.
///
/// # Errors
///
/// Returns [`SrpError::MalformedInput`] if the value does not fit in 32 bytes.
pub fn hex64(value: &BigUint) -> SrpResult<String> {
    if value.bits() > 8 * SALT_LENGTH as u64 {
        return Err(SrpError::MalformedInput);
    }
    Ok(format!("{value:064X}"))
}

/// Renders an unsigned big integer as a 32-byte big-endian buffer,
/// left-padded with zero bytes.
///
/// # Errors
///
/// Returns [`SrpError::MalformedInput`] if the value does not fit in 32 bytes.
pub fn fixed_bytes_32(value: &BigUint) -> SrpResult<[u8; SALT_LENGTH]> {
    let raw = value.to_bytes_be();
    if raw.len() > SALT_LENGTH {
        return Err(SrpError::MalformedInput);
    }
    let mut out = [0u8; SALT_LENGTH];
    out[SALT_LENGTH - raw.len()..].copy_from_slice(&raw);
    Ok(out)
}

/// Parses a client-supplied ephemeral (`A`) from hex.
///
/// Accepts 1 to 64 hex digits in either case; clients are expected to send
/// the zero-padded form but the original portal tolerated shorter values.
///
/// # Errors
///
/// Returns [`SrpError::MalformedInput`] if the input is empty, longer than
/// 64 characters, or contains a non-hex character.
pub fn parse_ephemeral_hex(hex: &str) -> SrpResult<BigUint> {
    if hex.is_empty() || hex.len() > EPHEMERAL_HEX_LENGTH {
        return Err(SrpError::MalformedInput);
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SrpError::MalformedInput);
    }
    BigUint::parse_bytes(hex.as_bytes(), 16).ok_or(SrpError::MalformedInput)
}

/// Normalizes a client-supplied proof (`M1`) to uppercase hex.
///
/// # Errors
///
/// Returns [`SrpError::MalformedInput`] if the input is not exactly 40 hex
/// characters.
pub fn normalize_proof_hex(hex: &str) -> SrpResult<String> {
    if hex.len() != PROOF_HEX_LENGTH || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SrpError::MalformedInput);
    }
    Ok(hex.to_ascii_uppercase())
}

/// Encodes a salt as base64 for the challenge payload and the account table.
pub fn salt_to_base64(salt: &[u8; SALT_LENGTH]) -> String {
    STANDARD.encode(salt)
}

/// Decodes a base64 salt, enforcing the fixed 32-byte width.
///
/// # Errors
///
/// Returns [`SrpError::MalformedInput`] if the input is not valid base64 or
/// does not decode to exactly 32 bytes.
pub fn salt_from_base64(encoded: &str) -> SrpResult<[u8; SALT_LENGTH]> {
    let raw = STANDARD
        .decode(encoded)
        .map_err(|_| SrpError::MalformedInput)?;
    let raw: [u8; SALT_LENGTH] = raw.try_into().map_err(|_| SrpError::MalformedInput)?;
    Ok(raw)
}

/// Uppercase hex of an arbitrary byte string.
pub fn digest_hex_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}
