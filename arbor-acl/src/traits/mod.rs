// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces of the collaborators the access-control engine is driven by.
mod identity;
mod privilege;
mod repository;

pub use identity::{IdentityDirectory, Principal};
pub use privilege::NativePrivilege;
pub use repository::{AccessControlList, AccessControlPolicy, Repository};
