// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use crate::entry::{AccessControlEntry, Polarity};
use crate::traits::{NativePrivilege, Principal};

/// An ordered list of access-control entries bound (or bindable) to a path.
///
/// Changes to the list are local until it is handed back via [`Repository::set_policy`].
pub trait AccessControlList {
    type Principal: Principal;
    type Privilege: NativePrivilege;
    type Error: Error + Send + Sync + 'static;

    /// Entries in the order they are evaluated.
    #[allow(clippy::type_complexity)]
    fn entries(
        &self,
    ) -> Result<Vec<AccessControlEntry<Self::Principal, Self::Privilege>>, Self::Error>;

    /// Remove a single entry from the list.
    fn remove_entry(
        &mut self,
        entry: &AccessControlEntry<Self::Principal, Self::Privilege>,
    ) -> Result<(), Self::Error>;

    /// Append an entry for the principal.
    ///
    /// Returns `false` when the list refused to take the entry, for example because one of the
    /// privileges is abstract.
    fn add_entry(
        &mut self,
        principal: &Self::Principal,
        privileges: Vec<Self::Privilege>,
        polarity: Polarity,
    ) -> Result<bool, Self::Error>;
}

/// A policy returned by the repository.
///
/// Only list-shaped policies carry entries, other policy kinds are skipped by the engine.
pub trait AccessControlPolicy {
    type List;

    /// Return the entry list if this policy is list-shaped.
    fn into_list(self) -> Option<Self::List>;
}

/// Access-control view of a repository, bound to the session of the calling principal.
pub trait Repository {
    type Principal: Principal;
    type Privilege: NativePrivilege;
    type List: AccessControlList<
            Principal = Self::Principal,
            Privilege = Self::Privilege,
            Error = Self::Error,
        >;
    type Policy: AccessControlPolicy<List = Self::List>;
    type Error: Error + Send + Sync + 'static;

    /// Policies set directly on the node at `path`.
    fn policies(&self, path: &str) -> Result<Vec<Self::Policy>, Self::Error>;

    /// Policies which could be bound to `path` but are not yet.
    fn applicable_policies(&self, path: &str) -> Result<Vec<Self::Policy>, Self::Error>;

    /// Policies in effect at `path`, including the ones inherited from ancestors.
    fn effective_policies(&self, path: &str) -> Result<Vec<Self::Policy>, Self::Error>;

    /// Bind the list to `path`, replacing whatever was bound before.
    fn set_policy(&mut self, path: &str, list: Self::List) -> Result<(), Self::Error>;

    /// Privileges which can be used in entries at `path`.
    fn supported_privileges(&self, path: &str) -> Result<Vec<Self::Privilege>, Self::Error>;

    /// Look up a privilege in the repository's registry.
    fn privilege_from_name(&self, name: &str) -> Result<Self::Privilege, Self::Error>;

    /// Return `true` if the session holds all named privileges at `path`.
    fn has_privileges(&self, path: &str, names: &[&str]) -> Result<bool, Self::Error>;
}
