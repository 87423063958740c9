//! Client-level error types shared across configuration, credentials, signing, and transport.
//!
//! An HTTP-level rejection on the authenticated route is deliberately absent from this
//! taxonomy: the gateway refusing a request is an in-band
//! [`RouteOutcome::Denied`](crate::client::RouteOutcome) value, not an error.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; fatal, surfaced before any request leaves the process.
	#[error(transparent)]
	Config(#[from] crate::config::GatewayConfigError),
	/// Credentials source failure, propagated unchanged.
	#[error(transparent)]
	Credentials(#[from] crate::auth::CredentialsError),
	/// Request signing failure, raised before any network call is made.
	#[error(transparent)]
	Signing(#[from] crate::sign::SigningError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Transport-level failures (network, IO). No retry is performed on any of them.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the gateway.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the gateway.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failure decoding a JSON response body.
#[derive(Debug, ThisError)]
#[error("Gateway returned a body that is not valid JSON (HTTP {status}).")]
pub struct DecodeError {
	/// Structured parsing failure with the path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status code the body arrived with.
	pub status: u16,
}
