//! Canonical request construction for AWS Signature Version 4.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! Header maps are keyed by lowercase name in a `BTreeMap`, so header ordering is already
//! canonical; the helpers here normalize the remaining components.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
// self
use crate::_prelude::*;

/// Characters that must be percent-encoded in URI path segments: everything except the
/// RFC 3986 unreserved set. Forward slashes between segments are preserved.
const URI_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Builds the full canonical request string from its components.
pub fn canonical_request(
	method: &str,
	path: &str,
	query: &str,
	headers: &BTreeMap<String, String>,
	payload_hash: &str,
) -> String {
	format!(
		"{method}\n{}\n{}\n{}\n\n{}\n{payload_hash}",
		canonical_uri(path),
		canonical_query(query),
		canonical_headers(headers),
		signed_header_list(headers),
	)
}

/// Builds the canonical URI by percent-encoding each path segment individually.
///
/// Segments are decoded first so an already-encoded path is not double-encoded. Empty
/// paths normalize to `/`.
pub fn canonical_uri(path: &str) -> String {
	if path.is_empty() || path == "/" {
		return "/".to_owned();
	}

	path.split('/')
		.map(|segment| {
			let decoded = percent_decode_str(segment).decode_utf8_lossy();

			utf8_percent_encode(&decoded, URI_ENCODE_SET).to_string()
		})
		.collect::<Vec<_>>()
		.join("/")
}

/// Builds the canonical query string by sorting parameters by key, then value.
///
/// Raw parameter text is preserved as-is; the signature must cover exactly the encoding
/// that goes on the wire.
pub fn canonical_query(query: &str) -> String {
	if query.is_empty() {
		return String::new();
	}

	let mut params = query
		.split('&')
		.filter(|param| !param.is_empty())
		.map(|param| param.split_once('=').unwrap_or((param, "")))
		.collect::<Vec<_>>();

	params.sort_unstable();

	params.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
}

/// Builds the canonical headers block (`name:value` lines, no trailing newline).
///
/// Values are trimmed and runs of whitespace collapse to a single space.
pub fn canonical_headers(headers: &BTreeMap<String, String>) -> String {
	headers
		.iter()
		.map(|(name, value)| format!("{name}:{}", collapse_whitespace(value.trim())))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Builds the semicolon-separated signed-header list.
pub fn signed_header_list(headers: &BTreeMap<String, String>) -> String {
	headers.keys().cloned().collect::<Vec<_>>().join(";")
}

fn collapse_whitespace(s: &str) -> String {
	let mut result = String::with_capacity(s.len());
	let mut prev_was_space = false;

	for ch in s.chars() {
		if ch.is_whitespace() {
			if !prev_was_space {
				result.push(' ');

				prev_was_space = true;
			}
		} else {
			result.push(ch);

			prev_was_space = false;
		}
	}

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
		pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	#[test]
	fn canonical_uri_normalizes_and_encodes() {
		assert_eq!(canonical_uri(""), "/");
		assert_eq!(canonical_uri("/"), "/");
		assert_eq!(canonical_uri("/prod/require-auth"), "/prod/require-auth");
		assert_eq!(canonical_uri("/hello world"), "/hello%20world");
		// Already-encoded input is not double-encoded.
		assert_eq!(canonical_uri("/hello%20world"), "/hello%20world");
	}

	#[test]
	fn canonical_query_sorts_by_key_then_value() {
		assert_eq!(canonical_query(""), "");
		assert_eq!(canonical_query("b=2&a=1&c=3"), "a=1&b=2&c=3");
		assert_eq!(canonical_query("k=2&k=1"), "k=1&k=2");
		// Raw encoding is preserved.
		assert_eq!(canonical_query("key=hello%20world"), "key=hello%20world");
	}

	#[test]
	fn canonical_headers_trim_and_collapse_whitespace() {
		let map = headers(&[("host", "  example.com  "), ("x-custom", "a   b   c")]);

		assert_eq!(canonical_headers(&map), "host:example.com\nx-custom:a b c");
		assert_eq!(signed_header_list(&map), "host;x-custom");
	}

	#[test]
	fn canonical_request_matches_aws_example() {
		// crates.io
		use sha2::{Digest, Sha256};

		let empty_hash = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
		let map = headers(&[
			("host", "examplebucket.s3.amazonaws.com"),
			("range", "bytes=0-9"),
			("x-amz-content-sha256", empty_hash),
			("x-amz-date", "20130524T000000Z"),
		]);
		let canonical = canonical_request("GET", "/test.txt", "", &map, empty_hash);

		assert!(canonical.starts_with("GET\n/test.txt\n\nhost:examplebucket.s3.amazonaws.com\n"));
		assert!(canonical.contains("\n\nhost;range;x-amz-content-sha256;x-amz-date\n"));
		assert_eq!(
			hex::encode(Sha256::digest(canonical.as_bytes())),
			"7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972",
		);
	}
}
