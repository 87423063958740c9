//! Issues the API-key-only route call against a live gateway deployment.
//!
//! 1. Read the deployment values from the environment once at startup.
//! 2. Build a validated [`GatewayConfig`] and a reqwest-backed [`ApiClient`].
//! 3. Call `no_auth_call` and print the decoded JSON body.
//!
//! ```sh
//! API_HOST=abc123.execute-api.us-east-1.amazonaws.com \
//! API_STAGE=prod \
//! API_KEY=... \
//! API_REGION=us-east-1 \
//! cargo run --example no_auth_call
//! ```

// std
use std::env;
// crates.io
use color_eyre::Result;
use serde_json::Value;
// self
use apigw_client::{client::ApiClient, config::GatewayConfig};

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
	let body: Value = client.no_auth_call().await?;

	println!("Gateway responded on the no-auth route: {body}.");

	Ok(())
}
