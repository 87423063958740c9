//! Issues the SigV4-authenticated route call with a fixed credential triple.
//!
//! 1. Read the deployment values and a temporary credential triple from the environment
//!    once at startup (in production the triple would come from an identity-pool
//!    exchange; [`StaticCredentials`] stands in for that store here).
//! 2. Build a validated [`GatewayConfig`] and a reqwest-backed [`ApiClient`].
//! 3. Call `authenticated_call` and branch on the in-band outcome: a denial (403, 429,
//!    ...) is a normal return value, not an error.
//!
//! ```sh
//! API_HOST=... API_STAGE=prod API_KEY=... API_REGION=us-east-1 \
//! ACCESS_KEY_ID=... SECRET_ACCESS_KEY=... SESSION_TOKEN=... \
//! cargo run --example authenticated_call
//! ```

// std
use std::env;
// crates.io
use color_eyre::Result;
use serde_json::Value;
// self
use apigw_client::{
	auth::{Credentials, StaticCredentials},
	client::{ApiClient, RouteOutcome},
	config::GatewayConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = GatewayConfig::builder()
		.host(env::var("API_HOST")?)
		.stage(env::var("API_STAGE")?)
		.api_key(env::var("API_KEY")?)
		.region(env::var("API_REGION")?)
		.build()?;
	let client = ApiClient::new(config);
	let mut credentials =
		Credentials::new(env::var("ACCESS_KEY_ID")?, env::var("SECRET_ACCESS_KEY")?);

	// Absent token selects 2-credential mode; federated identities carry one.
	if let Ok(token) = env::var("SESSION_TOKEN") {
		credentials = credentials.with_session_token(token);
	}

	let provider = StaticCredentials::new(credentials);
	let outcome: RouteOutcome<Value> = client.authenticated_call(&provider).await?;

	match outcome {
		RouteOutcome::Granted(body) => {
			println!("Gateway granted the authenticated route: {body}.");
		},
		RouteOutcome::Denied { message } => {
			println!("Gateway denied the authenticated route: {message}.");
		},
	}

	Ok(())
}
