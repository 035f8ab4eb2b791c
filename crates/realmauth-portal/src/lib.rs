// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

//! Server side of the Realmauth SRP6 credential engine.
//!
//! This crate implements the portal-facing half of the protocol: the
//! verifier generator invoked at registration, the two-round SRP6 exchange
//! state machine invoked at login, and the legacy single-step hash mode for
//! servers that never migrated to SRP6. Transport and durable storage stay
//! outside; callers inject a [`CredentialStore`] and receive plain payload
//! structs they can serialize however they like.

/// SRP6 login exchange and the legacy login path.
mod authentication;
/// Typed runtime configuration.
mod config;
/// Account registration and the verifier generator.
mod registration;
/// Ephemeral per-login session state and its TTL-bound store.
mod session;
/// The storage boundary trait and an in-memory implementation.
mod store;

pub use authentication::{Challenge, LoginExchange, ProofSuccess};
pub use config::{AuthMode, LegacyHashKind, PortalConfig};
pub use registration::{generate_credential, normalize_email, register, NewAccount};
pub use session::{LoginSession, SessionStore};
pub use store::{Credential, CredentialStore, MemoryCredentialStore};

pub use realmauth_core::types::{EphemeralScheme, SrpError, SrpResult};
