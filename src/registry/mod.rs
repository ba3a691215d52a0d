//! Package registry lookup.
//!
//! The search flow only depends on the [`PackageLookup`] seam. The crate
//! ships [`RegistryClient`], an HTTP implementation against the npm search
//! API; tests substitute scripted lookups.

mod client;
mod error;
mod types;

pub use client::RegistryClient;
pub use error::RegistryError;
pub use types::PackageSummary;

use crate::store::BoxFuture;

/// Asynchronous package search by term.
///
/// Implementations return packages in the order the registry ranked them
/// and own their timeout policy.
pub trait PackageLookup: Send + Sync {
    fn lookup<'a>(
        &'a self,
        term: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PackageSummary>, RegistryError>>;
}
