//! Credential types and sources for the authenticated route.
//!
//! `credentials` holds the temporary access triple with redacting secret wrappers;
//! `provider` defines the async [`CredentialsProvider`](provider::CredentialsProvider)
//! capability the client consumes, plus the trivial static implementation.

pub mod credentials;
pub mod provider;

pub use credentials::*;
pub use provider::*;
