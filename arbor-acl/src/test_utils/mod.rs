// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
//!
//! In-memory implementations of the repository and identity directory interfaces, preloaded with
//! the standard privilege hierarchy.
mod directory;
mod registry;
mod repository;

use thiserror::Error;

pub use directory::{EVERYONE, MemoryDirectory, MemoryPrincipal};
pub use registry::{MemoryPrivilege, MemoryRegistry, standard_registry};
pub use repository::{MemoryAcl, MemoryEntry, MemoryPolicy, MemoryRepository};

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("unknown privilege {0}")]
    UnknownPrivilege(String),

    #[error("privilege {0} would aggregate itself")]
    CyclicAggregation(String),

    #[error("entry not found in access control list")]
    EntryNotFound,

    #[error("repository unavailable at {0}")]
    Unavailable(String),

    #[error("identity directory unavailable")]
    DirectoryUnavailable,
}

/// Install a fmt subscriber when `RUST_LOG` is set.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}
