//! High-level gateway call façade.

mod no_auth;
mod require_auth;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	config::GatewayConfig,
	error::DecodeError,
	http::{GatewayTransport, RawResponse},
	sign::{RequestSigner, SigV4Signer},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Coordinates the two gateway routes for a single deployment.
///
/// The client owns the transport, configuration, and signer references so the route
/// implementations can focus on call-specific behavior. Configuration is validated once
/// at construction and never re-read; the two operations are independent and reentrant,
/// sharing no mutable state across concurrent calls.
pub struct ApiClient<T>
where
	T: ?Sized + GatewayTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Immutable deployment configuration.
	pub config: GatewayConfig,
	/// Signer applied to authenticated-route requests.
	pub signer: Arc<dyn RequestSigner>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + GatewayTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(config: GatewayConfig, transport: impl Into<Arc<T>>) -> Self {
		Self { transport: transport.into(), config, signer: Arc::new(SigV4Signer::new()) }
	}

	/// Replaces the request signer (e.g. with a pinned-timestamp [`SigV4Signer`]).
	pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
		self.signer = signer;

		self
	}

	pub(crate) fn decode<R>(response: &RawResponse) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError { source, status: response.status }.into())
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client with its own reqwest-backed transport.
	pub fn new(config: GatewayConfig) -> Self {
		Self::with_transport(config, ReqwestTransport::default())
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + GatewayTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			config: self.config.clone(),
			signer: Arc::clone(&self.signer),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + GatewayTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("config", &self.config).finish()
	}
}

/// Outcome of an authenticated-route call.
///
/// An HTTP-level rejection is a normal return value, not an error: the gateway refusing a
/// request (403, 429, ...) is in-band signal the caller branches on, while credentials,
/// signing, transport, and decode failures stay in the error channel. Preserve this
/// asymmetry when wrapping the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome<R> {
	/// 2xx response with a decoded body.
	Granted(R),
	/// Non-2xx response; the body is never read.
	Denied {
		/// Status text reported by the gateway, e.g. `Forbidden`.
		message: String,
	},
}
impl<R> RouteOutcome<R> {
	/// Returns the decoded body when access was granted.
	pub fn granted(self) -> Option<R> {
		match self {
			RouteOutcome::Granted(body) => Some(body),
			RouteOutcome::Denied { .. } => None,
		}
	}

	/// Whether the gateway denied the call.
	pub fn is_denied(&self) -> bool {
		matches!(self, RouteOutcome::Denied { .. })
	}
}
