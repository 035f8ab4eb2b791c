// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use std::sync::Arc;
use std::time::Duration;

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use realmauth_core::codec::{hex64, normalize_proof_hex, parse_ephemeral_hex, salt_to_base64};
use realmauth_core::srp::{
    self, AZEROTH_GROUP, GENERATOR, N_HEX,
};
use realmauth_core::types::{
    constant_time_eq, SrpError, SrpResult, SALT_LENGTH, VERIFIER_LENGTH,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{AuthMode, LegacyHashKind, PortalConfig};
use crate::session::{LoginSession, SessionStore};
use crate::store::CredentialStore;

/// The challenge payload returned to a client starting a login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Identifier the client must present with its proof.
    pub session_id: Uuid,
    /// Account salt, base64.
    pub salt: String,
    /// Server public ephemeral `B`, 64-character uppercase hex.
    pub b_pub: String,
    /// The group prime, hex, for clients that do not pin it.
    pub n: String,
    /// The group generator.
    pub g: u32,
}

/// The outcome of a verified proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSuccess {
    /// Server proof `M2` for mutual authentication, uppercase hex.
    pub m2: String,
    /// Shared session key `K`, uppercase hex.
    pub session_key: String,
}

/// The SRP6 login exchange state machine, plus the legacy login path.
///
/// One instance serves the whole portal; every login attempt gets its own
/// isolated session inside the injected-TTL store. No global state.
pub struct LoginExchange {
    config: PortalConfig,
    store: Arc<dyn CredentialStore>,
    sessions: SessionStore,
}

impl LoginExchange {
    /// Builds the exchange from a validated configuration and a store.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::UnsupportedConfig`] if the configuration fails
    /// validation.
    pub fn new(config: PortalConfig, store: Arc<dyn CredentialStore>) -> SrpResult<Self> {
        config.validate()?;
        let ttl = Duration::from_secs(config.session_ttl_secs);
        Ok(Self {
            config,
            store,
            sessions: SessionStore::new(ttl),
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// In-flight session count, for observability.
    pub fn pending_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Issues an SRP6 challenge for the account, with a random `b`.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::UnsupportedConfig`] when the portal runs in
    /// legacy mode. Unknown accounts are *not* an error: they receive a
    /// decoy challenge indistinguishable from a real one, so the response
    /// never confirms whether a username exists.
    pub fn issue_challenge(&self, username: &str) -> SrpResult<Challenge> {
        let mut b = [0u8; 32];
        OsRng.fill_bytes(&mut b);
        self.issue_challenge_with_ephemeral(username, b)
    }

    /// Issues a challenge from a caller-supplied private ephemeral.
    ///
    /// Exists for deterministic tests and interop fixtures; production
    /// callers use [`LoginExchange::issue_challenge`].
    ///
    /// # Errors
    ///
    /// Same as [`LoginExchange::issue_challenge`].
    pub fn issue_challenge_with_ephemeral(
        &self,
        username: &str,
        b: [u8; 32],
    ) -> SrpResult<Challenge> {
        if self.config.auth_mode != AuthMode::Srp6 {
            return Err(SrpError::UnsupportedConfig);
        }
        self.sessions.purge_expired();

        let username = username.to_uppercase();
        let (salt, verifier, decoy) = match self.store.get(&username) {
            Some(credential) => (credential.salt, credential.verifier, false),
            None => {
                // Same shape, same math, worthless verifier: the proof can
                // never succeed but the caller learns nothing.
                let mut salt = [0u8; SALT_LENGTH];
                let mut verifier = [0u8; VERIFIER_LENGTH];
                OsRng.fill_bytes(&mut salt);
                OsRng.fill_bytes(&mut verifier);
                (salt, verifier, true)
            }
        };

        let b_pub = srp::server_ephemeral(
            &AZEROTH_GROUP,
            &verifier,
            &b,
            self.config.ephemeral_scheme,
        );
        let b_pub_hex = hex64(&b_pub)?;
        let salt_b64 = salt_to_base64(&salt);

        let session =
            LoginSession::new(username.clone(), salt, verifier, b, b_pub_hex.clone(), decoy);
        let session_id = self.sessions.insert(session);
        debug!(username = %username, session = %session_id, "challenge issued");

        Ok(Challenge {
            session_id,
            salt: salt_b64,
            b_pub: b_pub_hex,
            n: N_HEX.to_owned(),
            g: GENERATOR,
        })
    }

    /// Verifies a client proof, consuming the session either way.
    ///
    /// # Errors
    ///
    /// * [`SrpError::ProtocolState`] -- unknown, expired, or replayed
    ///   session id.
    /// * [`SrpError::MalformedInput`] -- `A` or `M1` is not hex of the
    ///   expected width, or `A` is a multiple of `N`.
    /// * [`SrpError::AuthenticationFailed`] -- the proof did not match
    ///   (which includes every decoy session).
    pub fn verify_proof(
        &self,
        session_id: Uuid,
        a_hex: &str,
        m1_hex: &str,
    ) -> SrpResult<ProofSuccess> {
        let session = self.sessions.take(session_id)?;
        let group = &*AZEROTH_GROUP;

        let a_pub = parse_ephemeral_hex(a_hex)?;
        // Safeguard against a malicious A that collapses the shared secret.
        if &a_pub % &group.n == BigUint::default() {
            return Err(SrpError::MalformedInput);
        }
        let m1 = normalize_proof_hex(m1_hex)?;

        let a_hex64 = hex64(&a_pub)?;
        let u = srp::compute_u(&a_hex64, &session.b_pub_hex);
        let v = BigUint::from_bytes_be(&session.verifier);
        let b = BigUint::from_bytes_be(&session.b);
        let s = srp::compute_shared_secret(group, &a_pub, &v, &u, &b);
        let key_hex = srp::session_key_hex(&s)?;
        let expected_m1 = srp::compute_m1(&a_hex64, &session.b_pub_hex, &key_hex);

        if !constant_time_eq(expected_m1.as_bytes(), m1.as_bytes()) {
            warn!(
                username = %session.username,
                session = %session_id,
                unknown_account = session.decoy,
                "proof rejected"
            );
            return Err(SrpError::AuthenticationFailed);
        }

        let m2 = srp::compute_m2(&a_hex64, &expected_m1, &key_hex);
        info!(username = %session.username, session = %session_id, "login verified");
        Ok(ProofSuccess {
            m2,
            session_key: key_hex,
        })
    }

    /// Single-step legacy login: hash the password and compare.
    ///
    /// Unknown account and wrong password are indistinguishable to the
    /// caller, and the comparison against a dummy digest keeps the work
    /// per attempt uniform.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::UnsupportedConfig`] outside legacy mode and
    /// [`SrpError::AuthenticationFailed`] on any mismatch.
    pub fn legacy_login(&self, username: &str, password: &str) -> SrpResult<()> {
        if self.config.auth_mode != AuthMode::Legacy {
            return Err(SrpError::UnsupportedConfig);
        }
        let username = username.to_uppercase();

        let computed = match self.config.legacy_hash {
            LegacyHashKind::UsernameColonPassword => {
                let hash = srp::legacy_hash(&username, password);
                if self.config.legacy_uppercase {
                    hash
                } else {
                    hash.to_lowercase()
                }
            }
            LegacyHashKind::PasswordOnly => {
                srp::password_only_hash(password, self.config.legacy_uppercase)
            }
            LegacyHashKind::Vbulletin => srp::vbulletin_hash(
                password,
                &self.config.legacy_salt,
                self.config.legacy_uppercase,
            ),
        };

        let stored = self.store.get_legacy_hash(&username);
        // Unknown accounts compare against a same-length dummy so both
        // branches hash and compare; the outcome is forced to fail below.
        let dummy = "0".repeat(computed.len());
        let reference = stored.as_deref().unwrap_or(&dummy);
        let matches = constant_time_eq(computed.as_bytes(), reference.as_bytes());
        if stored.is_none() || !matches {
            warn!(username = %username, "legacy login rejected");
            return Err(SrpError::AuthenticationFailed);
        }
        info!(username = %username, "legacy login verified");
        Ok(())
    }
}
