// Copyright (c) 2026 Realmauth Contributors
// Licensed under the MIT License

//! Client side of the Realmauth SRP6 exchange.
//!
//! Computes the public ephemeral `A`, turns a server challenge into an `M1`
//! proof and session key, and verifies the server's `M2`. Uses the same
//! `realmauth-core` primitives as the portal, so client and server cannot
//! disagree on a formula.

mod exchange;

pub use exchange::{ClientExchange, ClientProof};

pub use realmauth_core::types::{EphemeralScheme, SrpError, SrpResult};
