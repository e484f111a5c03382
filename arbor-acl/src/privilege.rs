// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::traits::NativePrivilege;

/// A named capability, possibly aggregating other privileges.
///
/// Privileges are plain values detached from the registry they were translated from. Two
/// privileges are the same privilege when their names are equal, the aggregation lists are not
/// taken into account for equality, ordering or hashing.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Privilege {
    name: String,
    is_abstract: bool,
    declared_aggregate_privileges: Vec<Privilege>,
    aggregate_privileges: Vec<Privilege>,
}

impl Privilege {
    /// Create a non-aggregate, non-abstract privilege.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            declared_aggregate_privileges: Vec::new(),
            aggregate_privileges: Vec::new(),
        }
    }

    /// Create an aggregate privilege from its immediate children.
    ///
    /// The transitive aggregate list is derived from the children: each child followed by its own
    /// aggregates, first occurrence wins.
    pub fn aggregate(name: impl Into<String>, children: Vec<Privilege>) -> Self {
        let mut aggregate_privileges: Vec<Privilege> = Vec::new();
        for child in &children {
            for privilege in std::iter::once(child).chain(child.aggregate_privileges.iter()) {
                if !aggregate_privileges.contains(privilege) {
                    aggregate_privileges.push(privilege.clone());
                }
            }
        }

        Self {
            name: name.into(),
            is_abstract: false,
            declared_aggregate_privileges: children,
            aggregate_privileges,
        }
    }

    /// Mark the privilege as abstract.
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Translate a registry descriptor, recursing into both child lists.
    ///
    /// Registries are expected to be acyclic, this is not checked here.
    pub fn from_native<N: NativePrivilege>(native: &N) -> Self {
        Self {
            name: native.name().to_owned(),
            is_abstract: native.is_abstract(),
            declared_aggregate_privileges: Self::from_native_list(
                native.declared_aggregate_privileges(),
            ),
            aggregate_privileges: Self::from_native_list(native.aggregate_privileges()),
        }
    }

    /// Translate a list of registry descriptors, keeping their order.
    pub fn from_native_list<N: NativePrivilege>(natives: &[N]) -> Vec<Self> {
        natives.iter().map(Self::from_native).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Return `true` if this privilege declares children.
    pub fn is_aggregate(&self) -> bool {
        !self.declared_aggregate_privileges.is_empty()
    }

    pub fn declared_aggregate_privileges(&self) -> &[Privilege] {
        &self.declared_aggregate_privileges
    }

    pub fn aggregate_privileges(&self) -> &[Privilege] {
        &self.aggregate_privileges
    }

    /// Return `true` if holding this privilege implies holding the named one.
    pub fn includes(&self, name: &str) -> bool {
        self.name == name || self.aggregate_privileges.iter().any(|p| p.name == name)
    }
}

impl PartialEq for Privilege {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Privilege {}

impl Hash for Privilege {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Privilege {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Privilege {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Display for Privilege {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
