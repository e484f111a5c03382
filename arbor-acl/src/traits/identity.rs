// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;
use std::fmt::Debug;

/// An identity (user or group) which can be granted or denied privileges.
pub trait Principal: Clone + Debug + PartialEq {
    /// Name the principal is known by in the identity directory.
    fn name(&self) -> &str;

    /// Path of the repository item backing this principal.
    ///
    /// Not every principal is backed by an item (the built-in "everyone" principal is not),
    /// `None` signals that the lookup is unsupported.
    fn item_path(&self) -> Option<&str> {
        None
    }
}

/// Lookup of principals by name.
pub trait IdentityDirectory {
    type Principal: Principal;
    type Error: Error + Send + Sync + 'static;

    /// Find a user or group principal by name.
    ///
    /// Returns `None` when no principal with this name exists.
    fn find_principal(&self, name: &str) -> Result<Option<Self::Principal>, Self::Error>;

    /// The built-in principal every session is a member of.
    fn everyone(&self) -> Self::Principal;
}
