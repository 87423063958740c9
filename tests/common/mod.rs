#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use apigw_client::{
	auth::{Credentials, StaticCredentials},
	client::ReqwestApiClient,
	config::GatewayConfig,
	http::ReqwestTransport,
	reqwest::Client as ReqwestClient,
};

pub const API_KEY: &str = "demo-api-key";
pub const STAGE: &str = "demo";

/// Builds a reqwest transport that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_transport() -> ReqwestTransport {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	ReqwestTransport::with_client(client)
}

/// Builds a client pointed at the mock gateway with the shared stage + API key.
pub fn build_test_client(server: &MockServer) -> ReqwestApiClient {
	let config = GatewayConfig::builder()
		.host(server.address().to_string())
		.stage(STAGE)
		.api_key(API_KEY)
		.region("us-east-1")
		.build()
		.expect("Gateway configuration should build successfully.");

	ReqwestApiClient::with_transport(config, test_transport())
}

/// Fixed federated triple standing in for an identity-pool credential fetch.
pub fn federated_credentials() -> StaticCredentials {
	StaticCredentials::new(
		Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
			.with_session_token("IQoJb3JpZ2luX2VjDemoSessionToken"),
	)
}
