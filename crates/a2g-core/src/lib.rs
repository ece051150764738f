//! Aggregation layer for the A2G command center: a cached adapter over the
//! launch provider, a gateway over the relational store, and the query
//! service that normalizes both for callers.

pub mod config;
pub mod error;
pub mod http_client;
pub mod launches;
pub mod query;
pub mod store;

pub use config::{CredentialPresence, SourcesConfig};
pub use error::{ErrorKind, QueryError};
pub use launches::{LaunchAdapter, LaunchCollection, LaunchFilter, LaunchRecord};
pub use query::{Absence, Payload, QueryService, Resource};
pub use store::{
    ObservabilityPoint, ObservabilitySnapshot, ReleasesSummary, StoreGateway, StoreRead,
};
