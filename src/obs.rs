//! Optional observability helpers for gateway calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `apigw_client.call` with the `route`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `apigw_client_call_total` counter for every
//!   attempt/success/denied/failure, labeled by `route` + `outcome`.
//!
//! Both features default to off, so surfacing outcomes stays the caller's responsibility
//! unless explicitly opted into.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Gateway call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// API-key-only route.
	NoAuth,
	/// SigV4-authenticated route.
	RequireAuth,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::NoAuth => "no_auth",
			CallKind::RequireAuth => "require_auth",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a call helper.
	Attempt,
	/// Successful completion with a decoded body.
	Success,
	/// In-band HTTP-level denial on the authenticated route.
	Denied,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Denied => "denied",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
