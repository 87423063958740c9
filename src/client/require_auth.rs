//! SigV4-authenticated route call.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::CredentialsProvider,
	client::{ApiClient, RouteOutcome},
	config::Route,
	http::{DispatchRequest, GatewayTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	sign::{EXECUTE_API_SERVICE, SigningRequest},
};

impl<T> ApiClient<T>
where
	T: ?Sized + GatewayTransport,
{
	/// Calls `GET /{stage}/require-auth`, signing the request with credentials fetched
	/// fresh from `provider`.
	///
	/// The sequence is linear: build the signing request, fetch credentials, sign, strip
	/// the signed `host` header, dispatch. A 2xx response decodes into
	/// [`RouteOutcome::Granted`]; any other status becomes [`RouteOutcome::Denied`]
	/// carrying the status text, with the body left unread. Credentials, signing,
	/// transport, and decode failures propagate unchanged as errors.
	pub async fn authenticated_call<R>(
		&self,
		provider: &dyn CredentialsProvider,
	) -> Result<RouteOutcome<R>>
	where
		R: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::RequireAuth;

		let span = CallSpan::new(KIND, "authenticated_call");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.route_url(Route::RequireAuth)?;
				let request = SigningRequest {
					method: "GET".into(),
					service: EXECUTE_API_SERVICE.into(),
					region: self.config.region.clone(),
					path: self.config.route_path(Route::RequireAuth),
					host: self.config.host.clone(),
					headers: BTreeMap::from([(
						"x-api-key".to_owned(),
						self.config.api_key.expose().to_owned(),
					)]),
					url: url.clone(),
				};
				let credentials = provider.credentials().await?;
				let signed = self.signer.sign(&request, &credentials)?;
				let response = self
					.transport
					.execute(DispatchRequest { url, headers: signed.dispatch_headers() })
					.await?;

				if response.is_success() {
					Ok(RouteOutcome::Granted(Self::decode(&response)?))
				} else {
					Ok(RouteOutcome::Denied { message: response.status_text })
				}
			})
			.await;

		match &result {
			Ok(RouteOutcome::Granted(_)) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Ok(RouteOutcome::Denied { .. }) => obs::record_call_outcome(KIND, CallOutcome::Denied),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
