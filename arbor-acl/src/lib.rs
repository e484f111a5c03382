// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access-control engine for hierarchical content repositories.
//!
//! Translates the privilege descriptors and access-control lists of a repository into plain
//! values ([`Privilege`], [`RightsSet`]), writes desired rights back as allow and deny entries and
//! answers capability queries of the current session. The repository and the identity directory
//! are reached through the interfaces in [`traits`].
mod checker;
mod config;
mod display;
mod entry;
mod error;
pub mod graph;
mod manager;
pub mod names;
mod privilege;
pub mod resolver;
mod rights;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
#[cfg(test)]
mod tests;
pub mod traits;
pub mod writer;

pub use checker::CapabilityChecker;
pub use config::Config;
pub use display::{DisplayClass, DisplayNames};
pub use entry::{AccessControlEntry, Polarity};
pub use error::AclError;
pub use manager::AccessManager;
pub use privilege::Privilege;
pub use resolver::Scope;
pub use rights::{RightsMap, RightsSet};
