//! API-key-only route call.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	config::Route,
	http::{DispatchRequest, GatewayTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<T> ApiClient<T>
where
	T: ?Sized + GatewayTransport,
{
	/// Calls `GET /{stage}/no-auth` with the API key only.
	///
	/// The body is JSON-decoded regardless of HTTP status; there is no in-band denial
	/// value on this route, so a `403` with a JSON error body decodes like any other
	/// response and a non-JSON body surfaces as a decode error. This is deliberately
	/// asymmetric with [`authenticated_call`](ApiClient::authenticated_call).
	pub async fn no_auth_call<R>(&self) -> Result<R>
	where
		R: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::NoAuth;

		let span = CallSpan::new(KIND, "no_auth_call");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.route_url(Route::NoAuth)?;
				let headers = BTreeMap::from([(
					"x-api-key".to_owned(),
					self.config.api_key.expose().to_owned(),
				)]);
				let response = self.transport.execute(DispatchRequest { url, headers }).await?;

				Self::decode(&response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
