// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use realmauth_core::codec::{hex64, parse_ephemeral_hex, salt_from_base64};
use realmauth_core::srp::{
    client_shared_secret, compute_m1, compute_m2, compute_u, compute_x, identity_hash,
    session_key_hex, AZEROTH_GROUP,
};
use realmauth_core::types::{constant_time_eq, EphemeralScheme, SrpError, SrpResult};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One login attempt from the client's point of view.
///
/// Holds the credentials and the private ephemeral `a` for the duration of
/// the exchange; everything is scrubbed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClientExchange {
    username: String,
    password: String,
    a: [u8; 32],
    #[zeroize(skip)]
    scheme: EphemeralScheme,
}

/// The client's computed proof material for one challenge.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClientProof {
    #[zeroize(skip)]
    m1: String,
    #[zeroize(skip)]
    expected_m2: String,
    session_key: String,
}

impl ClientExchange {
    /// Starts an exchange with a fresh random private ephemeral.
    pub fn new(username: &str, password: &str, scheme: EphemeralScheme) -> Self {
        let mut a = [0u8; 32];
        OsRng.fill_bytes(&mut a);
        Self::from_private_ephemeral(username, password, a, scheme)
    }

    /// Starts an exchange from a fixed private ephemeral, for deterministic
    /// tests and interop fixtures.
    pub fn from_private_ephemeral(
        username: &str,
        password: &str,
        a: [u8; 32],
        scheme: EphemeralScheme,
    ) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
            a,
            scheme,
        }
    }

    /// The public ephemeral `A = g^a mod N`, 64-character uppercase hex.
    ///
    /// # Errors
    ///
    /// Infallible for a reduced value; shares the fixed-width rendering's
    /// error type.
    pub fn public_ephemeral_hex(&self) -> SrpResult<String> {
        let group = &*AZEROTH_GROUP;
        let a = BigUint::from_bytes_be(&self.a);
        hex64(&group.g.modpow(&a, &group.n))
    }

    /// Processes a server challenge into proof material.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::MalformedInput`] if the salt or `B` is not
    /// well-formed, or if `B` is a multiple of `N` (a malicious server
    /// would learn the password offset from such a value).
    pub fn process_challenge(&self, salt_b64: &str, b_pub_hex: &str) -> SrpResult<ClientProof> {
        let group = &*AZEROTH_GROUP;
        let salt = salt_from_base64(salt_b64)?;
        let b_pub = parse_ephemeral_hex(b_pub_hex)?;
        if &b_pub % &group.n == BigUint::default() {
            return Err(SrpError::MalformedInput);
        }

        let a = BigUint::from_bytes_be(&self.a);
        let a_pub = group.g.modpow(&a, &group.n);
        let a_hex = hex64(&a_pub)?;
        let b_hex = hex64(&b_pub)?;

        let u = compute_u(&a_hex, &b_hex);
        let x = compute_x(&salt, &identity_hash(&self.username, &self.password));
        let s = client_shared_secret(group, &b_pub, &x, &a, &u, self.scheme);
        let session_key = session_key_hex(&s)?;

        let m1 = compute_m1(&a_hex, &b_hex, &session_key);
        let expected_m2 = compute_m2(&a_hex, &m1, &session_key);
        Ok(ClientProof {
            m1,
            expected_m2,
            session_key,
        })
    }
}

impl ClientProof {
    /// The proof `M1` to send to the server, uppercase hex.
    pub fn proof(&self) -> &str {
        &self.m1
    }

    /// The shared session key `K`, uppercase hex.
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Verifies the server's `M2`, completing mutual authentication.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::AuthenticationFailed`] if the reply does not
    /// match.
    pub fn verify_server(&self, m2_hex: &str) -> SrpResult<()> {
        let reply = m2_hex.to_ascii_uppercase();
        if !constant_time_eq(self.expected_m2.as_bytes(), reply.as_bytes()) {
            return Err(SrpError::AuthenticationFailed);
        }
        Ok(())
    }
}
