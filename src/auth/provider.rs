//! Credentials source contracts that let callers plug identity pools, token
//! exchangers, or fixtures into the authenticated route.

// self
use crate::{_prelude::*, auth::Credentials};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by [`CredentialsProvider::credentials`].
pub type CredentialsFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Credentials, CredentialsError>> + 'a + Send>>;

/// Capability yielding temporary credentials for a federated caller identity.
///
/// The client requests a fresh triple on every authenticated call and performs no caching,
/// freshness validation, or retries; keeping issued credentials warm is the provider's
/// concern. A provider failure propagates to the caller unchanged.
pub trait CredentialsProvider: Send + Sync {
	/// Asynchronously yields a credential triple.
	fn credentials(&self) -> CredentialsFuture<'_>;
}

/// Error raised by a credentials provider, surfaced to callers unchanged.
#[derive(Debug, ThisError)]
#[error("Credentials source failed to yield a credential triple.")]
pub struct CredentialsError {
	/// Provider-specific failure.
	#[source]
	pub source: BoxError,
}
impl CredentialsError {
	/// Wraps a provider-specific failure.
	pub fn new(src: impl 'static + Send + Sync + StdError) -> Self {
		Self { source: Box::new(src) }
	}

	/// Wraps a plain message when no structured source exists.
	pub fn message(msg: impl Into<String>) -> Self {
		Self { source: msg.into().into() }
	}
}

/// Provider wrapping a fixed credential triple.
///
/// Mirrors an already-resolved identity store; every call yields a clone of the same
/// triple, which matches the per-call fetch contract without ever failing.
#[derive(Clone, Debug)]
pub struct StaticCredentials(Credentials);
impl StaticCredentials {
	/// Wraps the provided triple.
	pub fn new(credentials: Credentials) -> Self {
		Self(credentials)
	}
}
impl CredentialsProvider for StaticCredentials {
	fn credentials(&self) -> CredentialsFuture<'_> {
		let credentials = self.0.clone();

		Box::pin(async move { Ok(credentials) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn static_provider_yields_fresh_clone_per_call() {
		let provider = StaticCredentials::new(
			Credentials::new("AKIDEXAMPLE", "secret").with_session_token("session"),
		);
		let first = provider.credentials().await.expect("Static provider should never fail.");
		let second = provider.credentials().await.expect("Static provider should never fail.");

		assert_eq!(first, second);
		assert_eq!(first.effective_session_token(), Some("session"));
	}

	#[test]
	fn credentials_error_wraps_plain_messages() {
		let err = CredentialsError::message("identity pool rejected the login");

		assert!(err.source.to_string().contains("identity pool"));
	}
}
