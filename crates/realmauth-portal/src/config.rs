// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

use realmauth_core::types::{EphemeralScheme, SrpError, SrpResult};
use serde::{Deserialize, Serialize};

/// Which authentication path the portal runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Challenge/proof exchange against the `salt`/`verifier` columns.
    Srp6,
    /// Single-step hash comparison against the `sha_pass_hash` column.
    Legacy,
}

/// Which digest the legacy mode stores and compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyHashKind {
    /// `SHA1(UPPER(username) ":" UPPER(password))`, the AzerothCore default.
    UsernameColonPassword,
    /// `SHA1(password)` of the password as typed.
    PasswordOnly,
    /// `MD5(password || salt)` with the configured salt string, for servers
    /// that imported a vBulletin account table.
    Vbulletin,
}

/// Runtime configuration, resolved once at startup.
///
/// The host's config loader (file, environment, whatever) deserializes into
/// this struct; the engine never parses configuration text itself. Call
/// [`PortalConfig::validate`] before constructing anything from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Active authentication path.
    pub auth_mode: AuthMode,
    /// Formula for the server public ephemeral `B`.
    pub ephemeral_scheme: EphemeralScheme,
    /// Digest variant used by the legacy path.
    pub legacy_hash: LegacyHashKind,
    /// Hex case of the stored legacy digest.
    pub legacy_uppercase: bool,
    /// Salt string appended by [`LegacyHashKind::Vbulletin`]; unused by the
    /// other kinds.
    pub legacy_salt: String,
    /// Minimum accepted password length at registration.
    pub min_password_len: usize,
    /// Seconds an unproven login session stays alive.
    pub session_ttl_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::Srp6,
            ephemeral_scheme: EphemeralScheme::Classic,
            legacy_hash: LegacyHashKind::UsernameColonPassword,
            legacy_uppercase: true,
            legacy_salt: String::new(),
            min_password_len: 8,
            session_ttl_secs: 300,
        }
    }
}

impl PortalConfig {
    /// Checks the configuration against the schema bounds.
    ///
    /// The password minimum must lie in `4..=16` (4 is the legacy server
    /// floor, 16 the game client's input limit) and the session TTL must not
    /// exceed an hour. A TTL of zero is accepted and expires sessions
    /// immediately, which is only useful in tests.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::UnsupportedConfig`] if a value is out of range.
    pub fn validate(&self) -> SrpResult<()> {
        if !(4..=16).contains(&self.min_password_len) {
            return Err(SrpError::UnsupportedConfig);
        }
        if self.session_ttl_secs > 3600 {
            return Err(SrpError::UnsupportedConfig);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PortalConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_password_minimum() {
        let mut config = PortalConfig::default();
        config.min_password_len = 3;
        assert_eq!(config.validate(), Err(SrpError::UnsupportedConfig));
        config.min_password_len = 17;
        assert_eq!(config.validate(), Err(SrpError::UnsupportedConfig));
    }

    #[test]
    fn rejects_excessive_ttl() {
        let mut config = PortalConfig::default();
        config.session_ttl_secs = 3601;
        assert_eq!(config.validate(), Err(SrpError::UnsupportedConfig));
    }
}
