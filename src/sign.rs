//! SigV4 request signing isolated behind the [`RequestSigner`] seam.
//!
//! `canonical` builds the deterministic canonical-request text; `sigv4` derives the
//! signing key and emits the `authorization`/`x-amz-date`/`x-amz-security-token` headers.
//! Keeping the algorithm behind a trait lets tests pin timestamps and swap signers
//! without any network dependency.

pub mod canonical;

mod sigv4;
pub use sigv4::*;

// self
use crate::{_prelude::*, auth::Credentials};

/// Service identifier for gateway invocation in the credential scope.
pub const EXECUTE_API_SERVICE: &str = "execute-api";

/// HTTP request description consumed by a [`RequestSigner`].
///
/// Constructed fresh per call and discarded after dispatch.
#[derive(Clone, Debug)]
pub struct SigningRequest {
	/// HTTP method (always `GET` for the gateway routes).
	pub method: String,
	/// Target service name in the credential scope, e.g. [`EXECUTE_API_SERVICE`].
	pub service: String,
	/// Region identifier in the credential scope.
	pub region: String,
	/// URL path including the stage prefix; a `?` suffix carries the query string.
	pub path: String,
	/// Target host, signed as the `host` header.
	pub host: String,
	/// Caller-supplied headers to include in the signature.
	pub headers: BTreeMap<String, String>,
	/// Full request URL used for dispatch.
	pub url: Url,
}

/// A [`SigningRequest`] augmented with computed authentication headers.
///
/// Derived value; never mutated after creation, lifetime is a single call.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// The request the signature was computed over.
	pub request: SigningRequest,
	/// Complete signed header map, including `host` and the computed headers.
	pub headers: BTreeMap<String, String>,
}
impl SignedRequest {
	/// Returns the headers to place on the wire.
	///
	/// `host` is part of the signature but must never be dispatched explicitly: the
	/// transport derives it from the URL, and a stale signed value would mismatch.
	pub fn dispatch_headers(&self) -> BTreeMap<String, String> {
		let mut headers = self.headers.clone();

		headers.remove("host");

		headers
	}
}

/// Produces request-authentication headers from a request description and a credential
/// triple.
///
/// Implementations must be deterministic for a fixed signing timestamp and must not touch
/// the network or any mutable shared state.
pub trait RequestSigner: Send + Sync {
	/// Signs `request` with the provided credential triple.
	fn sign(
		&self,
		request: &SigningRequest,
		credentials: &Credentials,
	) -> Result<SignedRequest, SigningError>;
}

/// Errors raised while validating signing inputs or verifying a signature.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// A required signing input was empty.
	#[error("Signing input `{field}` must not be empty.")]
	EmptyField {
		/// Name of the offending input.
		field: &'static str,
	},
	/// Signing timestamp could not be formatted.
	#[error("Signing timestamp could not be formatted.")]
	Timestamp(#[from] time::error::Format),
	/// `authorization` header did not match the expected shape.
	#[error("Authorization header is malformed.")]
	MalformedAuthorization,
	/// A header required for verification was absent.
	#[error("Signed request is missing the `{header}` header.")]
	MissingHeader {
		/// Name of the absent header.
		header: &'static str,
	},
}
