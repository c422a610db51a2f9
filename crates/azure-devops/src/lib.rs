//! Azure DevOps infrastructure adapter.
//!
//! Implements the [`pipeline::DevOpsClient`] trait over the Azure DevOps REST
//! API: build definitions and builds on the collection host, release
//! definitions and releases on the Release Management host.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Endpoint derivation, authentication, HTTP transport,
//! status handling and response decoding live here. The [`pipeline`] crate
//! sees only [`pipeline::DevOpsClient`] and [`pipeline::RemoteError`].
//!
//! ## Authentication
//!
//! Requests carry the personal access token as HTTP basic auth with an empty
//! user name. Nothing is retried; the request timeout is the only limit.

mod client;
mod endpoints;
mod models;

pub use client::{AzureDevOpsClient, API_VERSION, DEFAULT_TIMEOUT};
pub use endpoints::ServiceEndpoints;
