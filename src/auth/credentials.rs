//! Temporary credential triple issued to a federated caller identity.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping key material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(String);
impl SecretKey {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for SecretKey {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretKey").field(&"<redacted>").finish()
	}
}
impl Display for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Temporary access triple for a federated caller identity.
///
/// Obtained fresh per authenticated call from a
/// [`CredentialsProvider`](crate::auth::CredentialsProvider); the client never caches or
/// persists a triple and performs no expiry handling of its own. A missing (or empty)
/// session token selects the 2-credential signing mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Access key identifier placed in the credential scope.
	pub access_key_id: String,
	/// Secret access key the signing key is derived from.
	pub secret_access_key: SecretKey,
	/// Session token for 3-credential (federated) mode.
	pub session_token: Option<SecretKey>,
}
impl Credentials {
	/// Creates a 2-credential triple without a session token.
	pub fn new(
		access_key_id: impl Into<String>,
		secret_access_key: impl Into<String>,
	) -> Self {
		Self {
			access_key_id: access_key_id.into(),
			secret_access_key: SecretKey::new(secret_access_key),
			session_token: None,
		}
	}

	/// Attaches a session token, selecting 3-credential mode.
	pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
		self.session_token = Some(SecretKey::new(token));

		self
	}

	/// Returns the session token when present and non-empty.
	///
	/// An empty token signs identically to an absent one, so providers that hand back
	/// empty strings for non-federated identities still produce valid signatures.
	pub fn effective_session_token(&self) -> Option<&str> {
		self.session_token.as_ref().map(SecretKey::expose).filter(|t| !t.is_empty())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let credentials = Credentials::new("AKIDEXAMPLE", "super-secret");

		assert!(!format!("{credentials:?}").contains("super-secret"));
	}

	#[test]
	fn empty_session_token_selects_two_credential_mode() {
		let credentials = Credentials::new("AKIDEXAMPLE", "secret").with_session_token("");

		assert_eq!(credentials.effective_session_token(), None);

		let credentials = credentials.with_session_token("session");

		assert_eq!(credentials.effective_session_token(), Some("session"));
	}
}
