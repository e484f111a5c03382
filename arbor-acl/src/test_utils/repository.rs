// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::checker::parent_path;
use crate::entry::{AccessControlEntry, Polarity};
use crate::test_utils::{MemoryError, MemoryPrincipal, MemoryPrivilege, MemoryRegistry, standard_registry};
use crate::traits::{AccessControlList, AccessControlPolicy, Repository};

pub type MemoryEntry = AccessControlEntry<MemoryPrincipal, MemoryPrivilege>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryAcl {
    pub entries: Vec<MemoryEntry>,
}

impl MemoryAcl {
    pub fn entries_of(&self, principal: &MemoryPrincipal) -> Vec<&MemoryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.principal == *principal)
            .collect()
    }
}

impl AccessControlList for MemoryAcl {
    type Principal = MemoryPrincipal;
    type Privilege = MemoryPrivilege;
    type Error = MemoryError;

    fn entries(&self) -> Result<Vec<MemoryEntry>, Self::Error> {
        Ok(self.entries.clone())
    }

    fn remove_entry(&mut self, entry: &MemoryEntry) -> Result<(), Self::Error> {
        let index = self
            .entries
            .iter()
            .position(|candidate| candidate == entry)
            .ok_or(MemoryError::EntryNotFound)?;
        self.entries.remove(index);
        Ok(())
    }

    fn add_entry(
        &mut self,
        principal: &MemoryPrincipal,
        privileges: Vec<MemoryPrivilege>,
        polarity: Polarity,
    ) -> Result<bool, Self::Error> {
        if privileges.is_empty() || privileges.iter().any(|p| p.is_abstract) {
            return Ok(false);
        }

        self.entries.push(AccessControlEntry {
            principal: principal.clone(),
            privileges,
            polarity,
        });
        Ok(true)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemoryPolicy {
    List(MemoryAcl),

    /// A policy kind without entries, for example a retention policy.
    Opaque(String),
}

impl AccessControlPolicy for MemoryPolicy {
    type List = MemoryAcl;

    fn into_list(self) -> Option<MemoryAcl> {
        match self {
            MemoryPolicy::List(acl) => Some(acl),
            MemoryPolicy::Opaque(_) => None,
        }
    }
}

/// Repository keeping one optional ACL per path, evaluated for a fixed set of session principals.
///
/// Entries of the everyone principal apply to every session.
#[derive(Clone, Debug)]
pub struct MemoryRepository {
    registry: MemoryRegistry,
    session: Vec<MemoryPrincipal>,
    acls: BTreeMap<String, MemoryAcl>,
    opaque: HashMap<String, Vec<String>>,
    failing: BTreeSet<String>,
    no_applicable: BTreeSet<String>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new(standard_registry())
    }
}

impl MemoryRepository {
    pub fn new(registry: MemoryRegistry) -> Self {
        Self {
            registry,
            session: Vec::new(),
            acls: BTreeMap::new(),
            opaque: HashMap::new(),
            failing: BTreeSet::new(),
            no_applicable: BTreeSet::new(),
        }
    }

    pub fn with_session(mut self, principals: Vec<MemoryPrincipal>) -> Self {
        self.session = principals;
        self
    }

    pub fn register_privilege(
        &mut self,
        name: &str,
        is_abstract: bool,
        children: &[&str],
    ) -> Result<(), MemoryError> {
        self.registry.register(name, is_abstract, children)
    }

    /// Append an allow entry to the ACL of `path`, binding a new one if needed.
    pub fn allow(&mut self, path: &str, principal: &MemoryPrincipal, privileges: &[&str]) {
        self.append(path, principal, privileges, Polarity::Allow);
    }

    /// Append a deny entry to the ACL of `path`, binding a new one if needed.
    pub fn deny(&mut self, path: &str, principal: &MemoryPrincipal, privileges: &[&str]) {
        self.append(path, principal, privileges, Polarity::Deny);
    }

    pub fn add_opaque_policy(&mut self, path: &str, name: &str) {
        self.opaque
            .entry(path.to_owned())
            .or_default()
            .push(name.to_owned());
    }

    /// Every call touching `path` fails from now on.
    pub fn fail_on(&mut self, path: &str) {
        self.failing.insert(path.to_owned());
    }

    /// Stop offering applicable policies for `path`.
    pub fn disable_applicable(&mut self, path: &str) {
        self.no_applicable.insert(path.to_owned());
    }

    pub fn acl(&self, path: &str) -> Option<&MemoryAcl> {
        self.acls.get(path)
    }

    fn append(&mut self, path: &str, principal: &MemoryPrincipal, privileges: &[&str], polarity: Polarity) {
        let privileges: Vec<MemoryPrivilege> = privileges
            .iter()
            .map(|name| self.registry.descriptor(name).expect("registered privilege"))
            .collect();
        self.acls
            .entry(path.to_owned())
            .or_default()
            .entries
            .push(AccessControlEntry {
                principal: principal.clone(),
                privileges,
                polarity,
            });
    }

    fn check(&self, path: &str) -> Result<(), MemoryError> {
        if self.failing.contains(path) {
            return Err(MemoryError::Unavailable(path.to_owned()));
        }
        Ok(())
    }

    /// `path` followed by its ancestors up to the root.
    fn lineage<'a>(&self, path: &'a str) -> Result<Vec<&'a str>, MemoryError> {
        let lineage: Vec<&str> = std::iter::successors(Some(path), |path| parent_path(*path)).collect();
        for node in &lineage {
            self.check(node)?;
        }
        Ok(lineage)
    }

    fn applies_to_session(&self, principal: &MemoryPrincipal) -> bool {
        principal.is_everyone() || self.session.contains(principal)
    }

    /// Decision of the ACL at one node for `leaf`, `None` if the node does not mention it.
    fn decide(&self, node: &str, leaf: &str) -> Option<bool> {
        let mut decision = None;
        for entry in &self.acls.get(node)?.entries {
            if !self.applies_to_session(&entry.principal)
                || !entry.privileges.iter().any(|p| p.covers(leaf))
            {
                continue;
            }
            if entry.polarity.is_deny() {
                return Some(false);
            }
            decision = Some(true);
        }
        decision
    }
}

impl Repository for MemoryRepository {
    type Principal = MemoryPrincipal;
    type Privilege = MemoryPrivilege;
    type List = MemoryAcl;
    type Policy = MemoryPolicy;
    type Error = MemoryError;

    fn policies(&self, path: &str) -> Result<Vec<MemoryPolicy>, MemoryError> {
        self.check(path)?;
        let opaque = self.opaque.get(path).into_iter().flatten().cloned().map(MemoryPolicy::Opaque);
        let list = self.acls.get(path).cloned().map(MemoryPolicy::List);
        Ok(opaque.chain(list).collect())
    }

    fn applicable_policies(&self, path: &str) -> Result<Vec<MemoryPolicy>, MemoryError> {
        self.check(path)?;
        if self.no_applicable.contains(path) || self.acls.contains_key(path) {
            return Ok(Vec::new());
        }
        Ok(vec![MemoryPolicy::List(MemoryAcl::default())])
    }

    fn effective_policies(&self, path: &str) -> Result<Vec<MemoryPolicy>, MemoryError> {
        let opaque = self.opaque.get(path).into_iter().flatten().cloned().map(MemoryPolicy::Opaque);
        let lists = self
            .lineage(path)?
            .into_iter()
            .filter_map(|node| self.acls.get(node).cloned())
            .map(MemoryPolicy::List);
        Ok(opaque.chain(lists).collect())
    }

    fn set_policy(&mut self, path: &str, list: MemoryAcl) -> Result<(), MemoryError> {
        self.check(path)?;
        self.acls.insert(path.to_owned(), list);
        Ok(())
    }

    fn supported_privileges(&self, path: &str) -> Result<Vec<MemoryPrivilege>, MemoryError> {
        self.check(path)?;
        self.registry
            .names()
            .map(|name| self.registry.descriptor(name))
            .collect()
    }

    fn privilege_from_name(&self, name: &str) -> Result<MemoryPrivilege, MemoryError> {
        self.registry.descriptor(name)
    }

    fn has_privileges(&self, path: &str, names: &[&str]) -> Result<bool, MemoryError> {
        let lineage = self.lineage(path)?;
        for name in names {
            for leaf in self.registry.leaves(name)? {
                let granted = lineage
                    .iter()
                    .find_map(|node| self.decide(node, &leaf))
                    .unwrap_or(false);
                if !granted {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}
