// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use dashmap::DashMap;
use realmauth_core::types::{SALT_LENGTH, VERIFIER_LENGTH};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One account's stored authentication material.
///
/// The salt is generated once at registration and immutable thereafter; the
/// verifier changes only on password change. The plaintext password never
/// appears here.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    /// Per-account random salt.
    pub salt: [u8; SALT_LENGTH],
    /// `g^x mod N`, big-endian.
    pub verifier: [u8; VERIFIER_LENGTH],
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential([REDACTED])")
    }
}

/// The storage boundary the engine reads and writes through.
///
/// Implementations wrap whatever holds the account table. Usernames passed
/// in are already normalized to uppercase. Storage failures are an
/// implementation concern; from the engine's point of view a record either
/// exists or it does not.
pub trait CredentialStore: Send + Sync {
    /// Fetches the salt/verifier pair for an account, if present.
    fn get(&self, username: &str) -> Option<Credential>;
    /// Writes the salt/verifier pair for an account.
    fn put(&self, username: &str, credential: Credential);
    /// Fetches the legacy `sha_pass_hash` value for an account, if present.
    fn get_legacy_hash(&self, username: &str) -> Option<String>;
    /// Writes the legacy `sha_pass_hash` value for an account.
    fn put_legacy_hash(&self, username: &str, hash: String);
    /// Reports whether any record exists for the account.
    fn contains(&self, username: &str) -> bool;
}

/// Concurrent in-memory store, for tests and self-contained deployments.
#[derive(Default)]
pub struct MemoryCredentialStore {
    records: DashMap<String, Credential>,
    legacy: DashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts with any stored material.
    pub fn len(&self) -> usize {
        let srp_only = self
            .records
            .iter()
            .filter(|entry| !self.legacy.contains_key(entry.key()))
            .count();
        srp_only + self.legacy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.legacy.is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, username: &str) -> Option<Credential> {
        self.records.get(username).map(|entry| entry.clone())
    }

    fn put(&self, username: &str, credential: Credential) {
        self.records.insert(username.to_owned(), credential);
    }

    fn get_legacy_hash(&self, username: &str) -> Option<String> {
        self.legacy.get(username).map(|entry| entry.clone())
    }

    fn put_legacy_hash(&self, username: &str, hash: String) {
        self.legacy.insert(username.to_owned(), hash);
    }

    fn contains(&self, username: &str) -> bool {
        self.records.contains_key(username) || self.legacy.contains_key(username)
    }
}
