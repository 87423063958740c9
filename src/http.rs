//! Transport primitives for gateway calls.
//!
//! [`GatewayTransport`] is the crate's only dependency on an HTTP stack: the façade hands
//! it a fully prepared [`DispatchRequest`] and consumes the [`RawResponse`] view it
//! resolves to. Each call opens its own request; no pooling, retries, or local admission
//! control are layered on top (the gateway rate-limits server-side, and a `429` is handled
//! like any other failure status).

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`GatewayTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing gateway calls.
///
/// Implementations must be `Send + Sync + 'static` so a client can be shared across tasks
/// without additional wrappers, and the futures they return must be `Send` for the
/// lifetime of the in-flight call. The transport derives the `Host` header from the URL;
/// [`DispatchRequest::headers`] never carries one.
pub trait GatewayTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes a single `GET` described by `request`.
	fn execute(&self, request: DispatchRequest) -> TransportFuture<'_>;
}

/// Wire-level request description handed to a transport.
#[derive(Clone, Debug)]
pub struct DispatchRequest {
	/// Full request URL.
	pub url: Url,
	/// Header map to place on the wire.
	pub headers: BTreeMap<String, String>,
}

/// Minimal response view consumed by the client façade.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Canonical status reason phrase, or the numeric code when none exists.
	pub status_text: String,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Whether the status is in the 2xx success class.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts and TLS settings belong to the wrapped client; configure them there before
/// handing the transport to a client façade.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl GatewayTransport for ReqwestTransport {
	fn execute(&self, request: DispatchRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.get(request.url.clone());

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status();
			let status_text = status
				.canonical_reason()
				.map(str::to_owned)
				.unwrap_or_else(|| status.as_u16().to_string());
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status: status.as_u16(), status_text, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_class_is_2xx_only() {
		let response = |status| RawResponse { status, status_text: String::new(), body: vec![] };

		assert!(response(200).is_success());
		assert!(response(204).is_success());
		assert!(!response(301).is_success());
		assert!(!response(403).is_success());
		assert!(!response(429).is_success());
	}
}
