// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use std::time::{Duration, Instant};

use dashmap::DashMap;
use realmauth_core::types::{SrpError, SrpResult, SALT_LENGTH, VERIFIER_LENGTH};
use tracing::debug;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ephemeral state of one login attempt, alive for a single
/// challenge-to-proof round trip and consumed by its first proof attempt
/// or at expiry. Never persisted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct LoginSession {
    /// Uppercase account name the challenge was issued for.
    #[zeroize(skip)]
    pub username: String,
    /// Salt snapshot copied from the credential record.
    pub salt: [u8; SALT_LENGTH],
    /// Verifier snapshot copied from the credential record.
    pub verifier: [u8; VERIFIER_LENGTH],
    /// Server private ephemeral `b`.
    pub b: [u8; 32],
    /// Server public ephemeral `B`, 64-character uppercase hex.
    #[zeroize(skip)]
    pub b_pub_hex: String,
    /// Set when the account was unknown and the challenge is a decoy.
    #[zeroize(skip)]
    pub decoy: bool,
    #[zeroize(skip)]
    issued_at: Instant,
}

impl LoginSession {
    pub fn new(
        username: String,
        salt: [u8; SALT_LENGTH],
        verifier: [u8; VERIFIER_LENGTH],
        b: [u8; 32],
        b_pub_hex: String,
        decoy: bool,
    ) -> Self {
        Self {
            username,
            salt,
            verifier,
            b,
            b_pub_hex,
            decoy,
            issued_at: Instant::now(),
        }
    }
}

/// Keyed store of in-flight login sessions with TTL-bound reclamation.
///
/// Safe for concurrent issue/verify/expire across request handlers; a given
/// session is only ever advanced by the one request holding its id, which
/// [`SessionStore::take`] enforces by removing the entry.
pub struct SessionStore {
    sessions: DashMap<Uuid, LoginSession>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    fn is_expired(&self, session: &LoginSession) -> bool {
        self.ttl.is_zero() || session.issued_at.elapsed() > self.ttl
    }

    /// Inserts a fresh session and returns its identifier.
    pub fn insert(&self, session: LoginSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, session);
        id
    }

    /// Removes and returns the session, consuming it for good.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::ProtocolState`] if the id is unknown, already
    /// consumed, or the session outlived the TTL.
    pub fn take(&self, id: Uuid) -> SrpResult<LoginSession> {
        let (_, session) = self.sessions.remove(&id).ok_or(SrpError::ProtocolState)?;
        if self.is_expired(&session) {
            debug!(session = %id, "login session expired before proof");
            return Err(SrpError::ProtocolState);
        }
        Ok(session)
    }

    /// Drops every session past its TTL; returns how many were reclaimed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !self.is_expired(session));
        let reclaimed = before.saturating_sub(self.sessions.len());
        if reclaimed > 0 {
            debug!(reclaimed, "purged expired login sessions");
        }
        reclaimed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
