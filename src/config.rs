//! Immutable process-wide gateway configuration.
//!
//! A [`GatewayConfig`] is constructed once at process start through the validating builder
//! and injected into the client façade; call logic never reads the process environment.
//! Validation fails fast with a descriptive error instead of letting a later call send a
//! malformed request.

// self
use crate::_prelude::*;

/// Redacted API key wrapper keeping the static key out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey(String);
impl ApiKey {
	/// Wraps a new API key string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ApiKey {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiKey").field(&"<redacted>").finish()
	}
}
impl Display for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Gateway routes exposed by the deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
	/// API-key-only route.
	NoAuth,
	/// SigV4-authenticated route.
	RequireAuth,
}
impl Route {
	/// Returns the route's path segment.
	pub const fn as_str(self) -> &'static str {
		match self {
			Route::NoAuth => "no-auth",
			Route::RequireAuth => "require-auth",
		}
	}
}
impl Display for Route {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Errors raised while constructing or using a [`GatewayConfig`].
#[derive(Debug, ThisError)]
pub enum GatewayConfigError {
	/// API host was never supplied.
	#[error("Missing API host.")]
	MissingHost,
	/// Deployment stage was never supplied.
	#[error("Missing deployment stage.")]
	MissingStage,
	/// API key was never supplied or was empty.
	#[error("Missing API key.")]
	MissingApiKey,
	/// Region identifier was never supplied.
	#[error("Missing region identifier.")]
	MissingRegion,
	/// Host must be a bare authority (no scheme, path, or whitespace).
	#[error("Host must be a bare authority without scheme or path: {host}.")]
	MalformedHost {
		/// Host value that failed validation.
		host: String,
	},
	/// Host does not form a valid request URL.
	#[error("Host does not form a valid request URL: {host}.")]
	UnparsableHost {
		/// Host value that failed to parse.
		host: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Stage must be a single path segment.
	#[error("Stage must be a single path segment: {stage}.")]
	MalformedStage {
		/// Stage value that failed validation.
		stage: String,
	},
	/// Region must be a non-empty identifier without whitespace.
	#[error("Region must be a non-empty identifier: {region}.")]
	MalformedRegion {
		/// Region value that failed validation.
		region: String,
	},
}

/// Validated, immutable configuration for one gateway deployment.
///
/// All four fields are required by both routes; the builder rejects anything that would
/// produce an unusable request URL or credential scope.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
	/// API host without scheme, e.g. `abc123.execute-api.us-east-1.amazonaws.com`.
	pub host: String,
	/// Deployment stage path segment prefixing every route.
	pub stage: String,
	/// Static API key sent on every route.
	pub api_key: ApiKey,
	/// Region identifier used in the credential scope.
	pub region: String,
}
impl GatewayConfig {
	/// Creates a new builder with no fields populated.
	pub fn builder() -> GatewayConfigBuilder {
		GatewayConfigBuilder::new()
	}

	/// Returns the stage-prefixed path for `route`.
	pub fn route_path(&self, route: Route) -> String {
		format!("/{}/{route}", self.stage)
	}

	/// Returns the full request URL for `route`.
	pub fn route_url(&self, route: Route) -> Result<Url, GatewayConfigError> {
		let raw = format!("https://{}{}", self.host, self.route_path(route));

		Url::parse(&raw).map_err(|source| GatewayConfigError::UnparsableHost {
			host: self.host.clone(),
			source,
		})
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct GatewayConfigBuilder {
	/// API host under construction.
	pub host: Option<String>,
	/// Deployment stage under construction.
	pub stage: Option<String>,
	/// API key under construction.
	pub api_key: Option<ApiKey>,
	/// Region identifier under construction.
	pub region: Option<String>,
}
impl GatewayConfigBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the API host.
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());

		self
	}

	/// Sets the deployment stage.
	pub fn stage(mut self, stage: impl Into<String>) -> Self {
		self.stage = Some(stage.into());

		self
	}

	/// Sets the static API key.
	pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(ApiKey::new(api_key));

		self
	}

	/// Sets the region identifier.
	pub fn region(mut self, region: impl Into<String>) -> Self {
		self.region = Some(region.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<GatewayConfig, GatewayConfigError> {
		let host = self.host.filter(|h| !h.is_empty()).ok_or(GatewayConfigError::MissingHost)?;

		if host.contains('/') || host.chars().any(char::is_whitespace) {
			return Err(GatewayConfigError::MalformedHost { host });
		}

		let stage =
			self.stage.filter(|s| !s.is_empty()).ok_or(GatewayConfigError::MissingStage)?;

		if stage.contains('/') || stage.chars().any(char::is_whitespace) {
			return Err(GatewayConfigError::MalformedStage { stage });
		}

		let api_key = self
			.api_key
			.filter(|k| !k.expose().is_empty())
			.ok_or(GatewayConfigError::MissingApiKey)?;
		let region =
			self.region.filter(|r| !r.is_empty()).ok_or(GatewayConfigError::MissingRegion)?;

		if region.chars().any(char::is_whitespace) {
			return Err(GatewayConfigError::MalformedRegion { region });
		}

		let config = GatewayConfig { host, stage, api_key, region };

		// Surfaces hosts that pass the character checks but still cannot anchor a URL.
		config.route_url(Route::NoAuth)?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> GatewayConfigBuilder {
		GatewayConfig::builder()
			.host("abc123.execute-api.us-east-1.amazonaws.com")
			.stage("prod")
			.api_key("demo-key")
			.region("us-east-1")
	}

	#[test]
	fn build_produces_route_urls() {
		let config = builder().build().expect("Configuration should build successfully.");

		assert_eq!(config.route_path(Route::NoAuth), "/prod/no-auth");
		assert_eq!(config.route_path(Route::RequireAuth), "/prod/require-auth");
		assert_eq!(
			config
				.route_url(Route::RequireAuth)
				.expect("Route URL should parse successfully.")
				.as_str(),
			"https://abc123.execute-api.us-east-1.amazonaws.com/prod/require-auth",
		);
	}

	#[test]
	fn build_rejects_missing_fields() {
		assert!(matches!(
			GatewayConfig::builder().build(),
			Err(GatewayConfigError::MissingHost)
		));
		assert!(matches!(
			GatewayConfig::builder().host("example.com").build(),
			Err(GatewayConfigError::MissingStage)
		));
		assert!(matches!(
			GatewayConfig::builder().host("example.com").stage("prod").api_key("").build(),
			Err(GatewayConfigError::MissingApiKey)
		));
		assert!(matches!(
			GatewayConfig::builder().host("example.com").stage("prod").api_key("k").build(),
			Err(GatewayConfigError::MissingRegion)
		));
	}

	#[test]
	fn build_rejects_malformed_values() {
		assert!(matches!(
			builder().host("https://example.com").build(),
			Err(GatewayConfigError::MalformedHost { .. })
		));
		assert!(matches!(
			builder().stage("prod/extra").build(),
			Err(GatewayConfigError::MalformedStage { .. })
		));
		assert!(matches!(
			builder().region("us east 1").build(),
			Err(GatewayConfigError::MalformedRegion { .. })
		));
	}

	#[test]
	fn host_with_port_is_accepted() {
		let config = builder()
			.host("127.0.0.1:8443")
			.build()
			.expect("Host with a port should be accepted.");

		assert_eq!(
			config.route_url(Route::NoAuth).expect("Route URL should parse.").as_str(),
			"https://127.0.0.1:8443/prod/no-auth",
		);
	}

	#[test]
	fn api_key_formatters_redact() {
		let key = ApiKey::new("super-secret");

		assert_eq!(format!("{key:?}"), "ApiKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");
	}
}
