// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use rand::rngs::OsRng;
use rand::RngCore;
use realmauth_core::srp::{self, AZEROTH_GROUP};
use realmauth_core::types::{SrpError, SrpResult, SALT_LENGTH};
use tracing::{debug, info};

use crate::config::{AuthMode, LegacyHashKind, PortalConfig};
use crate::store::{Credential, CredentialStore};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;

/// A freshly created account, returned so the caller can persist the fields
/// the engine does not own (email, expansion, join date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Uppercase-normalized account name, as stored.
    pub username: String,
    /// Lowercase-normalized email, empty if none was supplied.
    pub email: String,
}

fn validate_username(username: &str) -> SrpResult<String> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(SrpError::InvalidInput);
    }
    // The account table stores ASCII; ':' would corrupt the identity hash.
    if !username
        .bytes()
        .all(|b| b.is_ascii_graphic() && b != b':')
    {
        return Err(SrpError::InvalidInput);
    }
    Ok(username.to_uppercase())
}

fn validate_password(config: &PortalConfig, password: &str) -> SrpResult<()> {
    if password.chars().count() < config.min_password_len {
        return Err(SrpError::InvalidInput);
    }
    Ok(())
}

/// Lowercases an email address at the storage boundary.
///
/// # Errors
///
/// Returns [`SrpError::InvalidInput`] if a non-empty address has no `@`.
pub fn normalize_email(email: &str) -> SrpResult<String> {
    let email = email.trim();
    if !email.is_empty() && !email.contains('@') {
        return Err(SrpError::InvalidInput);
    }
    Ok(email.to_lowercase())
}

/// Generates a fresh salt and the matching verifier for one account.
///
/// Pure aside from the salt randomness: calling twice with the same inputs
/// yields different salts and therefore different stored verifiers, while
/// the verifier stays a deterministic function of (username, password,
/// salt). The plaintext password is not retained.
///
/// # Errors
///
/// Returns [`SrpError::InvalidInput`] if the username or password violates
/// the active policy.
pub fn generate_credential(
    config: &PortalConfig,
    username: &str,
    password: &str,
) -> SrpResult<Credential> {
    let username = validate_username(username)?;
    validate_password(config, password)?;

    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let verifier = srp::compute_verifier(&AZEROTH_GROUP, &username, password, &salt)?;
    Ok(Credential { salt, verifier })
}

/// Registers an account under the active authentication mode.
///
/// SRP6 mode persists a salt/verifier pair; legacy mode persists the
/// configured digest of the password. Duplicate usernames are rejected.
///
/// # Errors
///
/// Returns [`SrpError::InvalidInput`] on policy violations or when the
/// username is already taken.
pub fn register(
    store: &dyn CredentialStore,
    config: &PortalConfig,
    username: &str,
    email: &str,
    password: &str,
) -> SrpResult<NewAccount> {
    let normalized = validate_username(username)?;
    validate_password(config, password)?;
    let email = normalize_email(email)?;

    if store.contains(&normalized) {
        debug!(username = %normalized, "registration rejected: username taken");
        return Err(SrpError::InvalidInput);
    }

    match config.auth_mode {
        AuthMode::Srp6 => {
            let credential = generate_credential(config, &normalized, password)?;
            store.put(&normalized, credential);
        }
        AuthMode::Legacy => {
            let hash = match config.legacy_hash {
                LegacyHashKind::UsernameColonPassword => {
                    let hash = srp::legacy_hash(&normalized, password);
                    if config.legacy_uppercase {
                        hash
                    } else {
                        hash.to_lowercase()
                    }
                }
                LegacyHashKind::PasswordOnly => {
                    srp::password_only_hash(password, config.legacy_uppercase)
                }
                LegacyHashKind::Vbulletin => {
                    srp::vbulletin_hash(password, &config.legacy_salt, config.legacy_uppercase)
                }
            };
            store.put_legacy_hash(&normalized, hash);
        }
    }

    info!(username = %normalized, mode = ?config.auth_mode, "account registered");
    Ok(NewAccount {
        username: normalized,
        email,
    })
}
