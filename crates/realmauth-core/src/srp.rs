// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

//! SRP6 group parameters and protocol arithmetic.
//!
//! Every exchange-phase hash (`u`, the session key, `M1`, `M2`) is a SHA1
//! digest of concatenated **uppercase, zero-padded hex strings**, matching
//! the account portal this engine is bit-compatible with. Only the
//! registration-phase `x` mixes a raw-text identity hash into a hex salt.

use md5::Md5;
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use sha1::{Digest, Sha1};

use crate::codec::{digest_hex_upper, fixed_bytes_32, hex64};
use crate::types::{EphemeralScheme, SrpResult, DIGEST_LENGTH, SALT_LENGTH, VERIFIER_LENGTH};

/// Hex form of the AzerothCore 256-bit safe prime, as sent in challenges.
pub const N_HEX: &str = "894B645E89E1535BBDAD5B8B290650530801B18EBFBF5E8FAB3C82872A3E9BB7";
/// The generator `g`.
pub const GENERATOR: u32 = 7;
/// The SRP6 multiplier `k` of the classic variant.
pub const MULTIPLIER: u32 = 3;

const N_BYTES: [u8; 32] = [
    0x89, 0x4B, 0x64, 0x5E, 0x89, 0xE1, 0x53, 0x5B, 0xBD, 0xAD, 0x5B, 0x8B, 0x29, 0x06, 0x50,
    0x53, 0x08, 0x01, 0xB1, 0x8E, 0xBF, 0xBF, 0x5E, 0x8F, 0xAB, 0x3C, 0x82, 0x87, 0x2A, 0x3E,
    0x9B, 0xB7,
];

/// Group parameters shared by both sides of the exchange.
pub struct SrpGroup {
    /// The 256-bit safe prime `N`.
    pub n: BigUint,
    /// The generator `g`.
    pub g: BigUint,
    /// The multiplier `k` used by the classic `B` formula.
    pub k: BigUint,
}

/// The AzerothCore-standard group (`N` above, `g = 7`, `k = 3`).
pub static AZEROTH_GROUP: Lazy<SrpGroup> = Lazy::new(|| SrpGroup {
    n: BigUint::from_bytes_be(&N_BYTES),
    g: BigUint::from(GENERATOR),
    k: BigUint::from(MULTIPLIER),
});

fn sha1_hex_of_str(input: &str) -> String {
    digest_hex_upper(&Sha1::digest(input.as_bytes()))
}

/// The identity hash `SHA1(UPPER(username) ":" UPPER(password))`.
///
/// This is the shared primitive behind both the verifier derivation and the
/// legacy `sha_pass_hash` column; the two must stay byte-identical.
pub fn identity_hash(username: &str, password: &str) -> [u8; DIGEST_LENGTH] {
    let identity = format!(
        "{}:{}",
        username.to_uppercase(),
        password.to_uppercase()
    );
    Sha1::digest(identity.as_bytes()).into()
}

/// The legacy password hash: uppercase hex of [`identity_hash`].
pub fn legacy_hash(username: &str, password: &str) -> String {
    digest_hex_upper(&identity_hash(username, password))
}

/// A plain `SHA1(password)` hash for servers that store the bare digest.
///
/// The password is hashed as typed; `uppercase` selects the hex case of the
/// stored text.
pub fn password_only_hash(password: &str, uppercase: bool) -> String {
    let digest = Sha1::digest(password.as_bytes());
    if uppercase {
        digest_hex_upper(&digest)
    } else {
        hex::encode(&digest[..])
    }
}

/// The vBulletin password hash `MD5(password || salt)`, with the salt
/// appended as configured text.
///
/// Some custom servers imported their forum's account table wholesale;
/// this matches that column. `uppercase` selects the hex case of the
/// stored text.
pub fn vbulletin_hash(password: &str, salt: &str, uppercase: bool) -> String {
    let digest = Md5::digest(format!("{password}{salt}").as_bytes());
    if uppercase {
        digest_hex_upper(&digest)
    } else {
        hex::encode(&digest[..])
    }
}

/// The private exponent `x = SHA1(HEX(salt) || HEX(identityHash))`, with
/// both hex strings uppercase.
pub fn compute_x(salt: &[u8; SALT_LENGTH], identity: &[u8; DIGEST_LENGTH]) -> BigUint {
    let input = format!(
        "{}{}",
        digest_hex_upper(salt),
        digest_hex_upper(identity)
    );
    BigUint::from_bytes_be(&Sha1::digest(input.as_bytes()))
}

/// The password verifier `v = g^x mod N` as a 32-byte big-endian buffer.
///
/// # Errors
///
/// Infallible for any `v < N`; the error branch exists only because the
/// fixed-width rendering is shared with values that can overflow.
pub fn compute_verifier(
    group: &SrpGroup,
    username: &str,
    password: &str,
    salt: &[u8; SALT_LENGTH],
) -> SrpResult<[u8; VERIFIER_LENGTH]> {
    let x = compute_x(salt, &identity_hash(username, password));
    fixed_bytes_32(&group.g.modpow(&x, &group.n))
}

/// The server public ephemeral `B` for the configured scheme.
pub fn server_ephemeral(
    group: &SrpGroup,
    verifier: &[u8; VERIFIER_LENGTH],
    b: &[u8; SALT_LENGTH],
    scheme: EphemeralScheme,
) -> BigUint {
    let b = BigUint::from_bytes_be(b);
    let g_b = group.g.modpow(&b, &group.n);
    match scheme {
        EphemeralScheme::Classic => {
            let v = BigUint::from_bytes_be(verifier);
            (&group.k * v + g_b) % &group.n
        }
        EphemeralScheme::PlainModPow => g_b,
    }
}

/// The scrambling parameter `u = SHA1(HEX64(A) || HEX64(B))`.
///
/// Both inputs must already be 64-character uppercase hex.
pub fn compute_u(a_hex: &str, b_hex: &str) -> BigUint {
    let input = format!("{a_hex}{b_hex}");
    BigUint::from_bytes_be(&Sha1::digest(input.as_bytes()))
}

/// The server-side shared secret `S = (A * v^u)^b mod N`.
pub fn compute_shared_secret(
    group: &SrpGroup,
    a_pub: &BigUint,
    v: &BigUint,
    u: &BigUint,
    b: &BigUint,
) -> BigUint {
    (a_pub * v.modpow(u, &group.n)).modpow(b, &group.n)
}

/// The client-side shared secret.
///
/// Classic: `(B - k*g^x)^(a + u*x) mod N`, with the subtraction performed
/// modulo `N`. Plain: `B^(a + u*x) mod N`.
pub fn client_shared_secret(
    group: &SrpGroup,
    b_pub: &BigUint,
    x: &BigUint,
    a: &BigUint,
    u: &BigUint,
    scheme: EphemeralScheme,
) -> BigUint {
    let exponent = a + u * x;
    match scheme {
        EphemeralScheme::Classic => {
            let kg_x = (&group.k * group.g.modpow(x, &group.n)) % &group.n;
            let base = (b_pub % &group.n + &group.n - kg_x) % &group.n;
            base.modpow(&exponent, &group.n)
        }
        EphemeralScheme::PlainModPow => b_pub.modpow(&exponent, &group.n),
    }
}

/// The session key `K = SHA1(HEX64(S))`, as uppercase hex.
///
/// # Errors
///
/// Returns an error if `S` does not fit in 32 bytes (never the case for a
/// reduced value).
pub fn session_key_hex(s: &BigUint) -> SrpResult<String> {
    Ok(sha1_hex_of_str(&hex64(s)?))
}

/// The client proof `M1 = SHA1(HEX64(A) || HEX64(B) || K)`, uppercase hex.
pub fn compute_m1(a_hex: &str, b_hex: &str, key_hex: &str) -> String {
    sha1_hex_of_str(&format!("{a_hex}{b_hex}{key_hex}"))
}

/// The server proof `M2 = SHA1(HEX64(A) || M1 || K)`, uppercase hex.
pub fn compute_m2(a_hex: &str, m1_hex: &str, key_hex: &str) -> String {
    sha1_hex_of_str(&format!("{a_hex}{m1_hex}{key_hex}"))
}
