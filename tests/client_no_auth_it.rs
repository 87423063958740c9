mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use apigw_client::error::Error;

#[tokio::test]
async fn no_auth_call_decodes_success_body() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/demo/no-auth")
				.header("x-api-key", common::API_KEY)
				.header_missing("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"ok\":true}");
		})
		.await;
	let body: Value =
		client.no_auth_call().await.expect("No-auth call should decode the response body.");

	assert_eq!(body, json!({ "ok": true }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn no_auth_call_decodes_body_even_on_failure_status() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/demo/no-auth");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"message\":\"Forbidden\"}");
		})
		.await;
	// No status check happens on this route: the 403 body decodes like any other.
	let body: Value = client
		.no_auth_call()
		.await
		.expect("No-auth call should decode failure-status bodies.");

	assert_eq!(body, json!({ "message": "Forbidden" }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn no_auth_call_propagates_decode_failure() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/demo/no-auth");
			then.status(200).header("content-type", "text/html").body("<html>not json</html>");
		})
		.await;
	let err = client
		.no_auth_call::<Value>()
		.await
		.expect_err("A non-JSON body should surface as a decode error.");

	assert!(matches!(err, Error::Decode(_)));
}
