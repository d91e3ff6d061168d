//! App Store Connect synchronization engine.
//!
//! This crate owns everything between the parsed project configuration and
//! the catalog service: JWT authentication, the HTTP transport, the generic
//! create-or-update reconciler, the checksum-gated asset upload pipeline,
//! and one synchronization operation per managed resource (App Store
//! metadata and TestFlight configuration).
//!
//! Sync is additive and convergent: remote records the configuration does
//! not mention are never deleted or modified, and every run re-reads the
//! authoritative remote state before deciding what to do.

pub mod assets;
pub mod auth;
pub mod error;
pub mod http;
pub mod reconcile;
pub mod resources;
pub mod store;
pub mod testflight;

use orchard_core::Credentials;

pub use assets::{upload_file, AssetSlot, UploadOutcome};
pub use error::{ConnectError, Result};

use auth::TokenSource;
use http::Api;

/// An authenticated App Store Connect client.
///
/// Cheap to clone; clones share the HTTP pool and token cache, which lets
/// sync operations fan out across task groups freely.
#[derive(Clone)]
pub struct Client {
    pub(crate) api: Api,
}

impl Client {
    /// Create a client for the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            api: Api::new(TokenSource::new(credentials)),
        }
    }

    /// Override the API base URL, mainly for tests
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            api: self.api.with_base_url(base_url),
        }
    }
}
