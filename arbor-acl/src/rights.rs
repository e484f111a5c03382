// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use crate::display::DisplayClass;
use crate::traits::Principal;
use crate::{Privilege, names};

/// Granted and denied privileges of one principal at one path.
///
/// Both sets are deduplicated by privilege name. A name can end up in both sets when it was
/// allowed and denied by different entries; such conflicts are resolved in favour of the deny
/// (see [`RightsSet::effective_granted`] and [`RightsSet::resolve_conflicts`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RightsSet {
    granted: BTreeSet<Privilege>,
    denied: BTreeSet<Privilege>,
}

impl RightsSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rights set granting the given privileges.
    pub fn granting<I>(privileges: I) -> Self
    where
        I: IntoIterator<Item = Privilege>,
    {
        Self::new().with_granted(privileges)
    }

    pub fn with_granted<I>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = Privilege>,
    {
        self.granted.extend(privileges);
        self
    }

    pub fn with_denied<I>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = Privilege>,
    {
        self.denied.extend(privileges);
        self
    }

    /// Add a granted privilege, returns `false` if it was already granted.
    pub fn grant(&mut self, privilege: Privilege) -> bool {
        self.granted.insert(privilege)
    }

    /// Add a denied privilege, returns `false` if it was already denied.
    pub fn deny(&mut self, privilege: Privilege) -> bool {
        self.denied.insert(privilege)
    }

    pub fn extend_granted<I>(&mut self, privileges: I)
    where
        I: IntoIterator<Item = Privilege>,
    {
        self.granted.extend(privileges);
    }

    pub fn extend_denied<I>(&mut self, privileges: I)
    where
        I: IntoIterator<Item = Privilege>,
    {
        self.denied.extend(privileges);
    }

    pub fn granted(&self) -> &BTreeSet<Privilege> {
        &self.granted
    }

    pub fn denied(&self) -> &BTreeSet<Privilege> {
        &self.denied
    }

    pub fn granted_names(&self) -> Vec<&str> {
        self.granted.iter().map(Privilege::name).collect()
    }

    pub fn denied_names(&self) -> Vec<&str> {
        self.denied.iter().map(Privilege::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty() && self.denied.is_empty()
    }

    /// Names which are both granted and denied.
    pub fn conflicts(&self) -> Vec<&str> {
        self.granted
            .intersection(&self.denied)
            .map(Privilege::name)
            .collect()
    }

    /// Granted privileges which are not denied at the same time.
    pub fn effective_granted(&self) -> impl Iterator<Item = &Privilege> {
        self.granted.difference(&self.denied)
    }

    /// Copy of this set with every conflicting name removed from the granted side.
    pub fn resolve_conflicts(&self) -> Self {
        Self {
            granted: self.effective_granted().cloned().collect(),
            denied: self.denied.clone(),
        }
    }

    /// Classify using the standard privilege names.
    pub fn display_class(&self) -> DisplayClass {
        self.classify(names::ALL, names::READ, names::WRITE)
    }

    /// Classify against the given "all", "read" and "write" privilege names.
    pub fn classify(&self, all: &str, read: &str, write: &str) -> DisplayClass {
        if !self.denied.is_empty() {
            return DisplayClass::Custom;
        }

        let granted = self.granted_names();
        match granted.as_slice() {
            [] => DisplayClass::None,
            [name] if *name == all => DisplayClass::AllPrivileges,
            [name] if *name == read => DisplayClass::ReadOnly,
            [first, second]
                if (*first == read && *second == write) || (*first == write && *second == read) =>
            {
                DisplayClass::ReadWrite
            }
            _ => DisplayClass::Custom,
        }
    }
}

/// Rights sets keyed by principal, in the order principals were first seen.
#[derive(Clone, Debug, PartialEq)]
pub struct RightsMap<P> {
    entries: Vec<(P, RightsSet)>,
}

impl<P> Default for RightsMap<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P> RightsMap<P>
where
    P: Principal,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Rights set of the principal, created empty on first access.
    pub fn entry(&mut self, principal: &P) -> &mut RightsSet {
        let index = match self.entries.iter().position(|(p, _)| p == principal) {
            Some(index) => index,
            None => {
                self.entries.push((principal.clone(), RightsSet::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn get(&self, principal: &P) -> Option<&RightsSet> {
        self.entries
            .iter()
            .find(|(p, _)| p == principal)
            .map(|(_, rights)| rights)
    }

    /// Look up by principal name.
    pub fn get_by_name(&self, name: &str) -> Option<&RightsSet> {
        self.entries
            .iter()
            .find(|(p, _)| p.name() == name)
            .map(|(_, rights)| rights)
    }

    pub fn principals(&self) -> impl Iterator<Item = &P> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&P, &RightsSet)> {
        self.entries.iter().map(|(p, rights)| (p, rights))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P> IntoIterator for RightsMap<P> {
    type Item = (P, RightsSet);
    type IntoIter = std::vec::IntoIter<(P, RightsSet)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::display::DisplayClass;
    use crate::test_utils::MemoryPrincipal;
    use crate::{Privilege, names};

    use super::{RightsMap, RightsSet};

    fn privileges(list: &[&str]) -> Vec<Privilege> {
        list.iter().map(|name| Privilege::new(*name)).collect()
    }

    #[test]
    fn dedupe_by_name() {
        let mut rights = RightsSet::new();
        assert!(rights.grant(Privilege::new(names::READ)));
        assert!(!rights.grant(Privilege::aggregate(names::READ, privileges(&["x"]))));
        assert_eq!(rights.granted().len(), 1);
    }

    #[test]
    fn display_class_truth_table() {
        let cases = [
            (RightsSet::new(), DisplayClass::None),
            (
                RightsSet::granting(privileges(&[names::ALL])),
                DisplayClass::AllPrivileges,
            ),
            (
                RightsSet::granting(privileges(&[names::READ])),
                DisplayClass::ReadOnly,
            ),
            (
                RightsSet::granting(privileges(&[names::READ, names::WRITE])),
                DisplayClass::ReadWrite,
            ),
            (
                RightsSet::granting(privileges(&[names::WRITE, names::READ])),
                DisplayClass::ReadWrite,
            ),
            (
                RightsSet::new().with_denied(privileges(&[names::REMOVE_NODE])),
                DisplayClass::Custom,
            ),
            (
                RightsSet::granting(privileges(&[names::ALL]))
                    .with_denied(privileges(&[names::REMOVE_NODE])),
                DisplayClass::Custom,
            ),
            (
                RightsSet::granting(privileges(&[names::WRITE])),
                DisplayClass::Custom,
            ),
            (
                RightsSet::granting(privileges(&[names::READ, names::MODIFY_PROPERTIES])),
                DisplayClass::Custom,
            ),
            (
                RightsSet::granting(privileges(&[names::READ, names::WRITE, names::ALL])),
                DisplayClass::Custom,
            ),
        ];

        for (rights, expected) in cases {
            assert_eq!(rights.display_class(), expected, "{rights:?}");
        }
    }

    #[test]
    fn classify_with_custom_names() {
        let rights = RightsSet::granting(privileges(&["ex:read"]));
        assert_eq!(rights.display_class(), DisplayClass::Custom);
        assert_eq!(
            rights.classify("ex:all", "ex:read", "ex:write"),
            DisplayClass::ReadOnly
        );
    }

    #[test]
    fn deny_wins_on_conflict() {
        let rights = RightsSet::granting(privileges(&[names::READ, names::WRITE]))
            .with_denied(privileges(&[names::WRITE]));

        assert_eq!(rights.conflicts(), vec![names::WRITE]);

        let effective: Vec<&str> = rights.effective_granted().map(Privilege::name).collect();
        assert_eq!(effective, vec![names::READ]);

        let resolved = rights.resolve_conflicts();
        assert_eq!(resolved.granted_names(), vec![names::READ]);
        assert_eq!(resolved.denied_names(), vec![names::WRITE]);
        assert!(resolved.conflicts().is_empty());

        // Raw sets stay untouched.
        assert_eq!(rights.granted().len(), 2);
    }

    #[test]
    fn map_keeps_first_seen_order() {
        let alice = MemoryPrincipal::user("alice");
        let editors = MemoryPrincipal::group("editors");

        let mut map = RightsMap::new();
        map.entry(&editors).grant(Privilege::new(names::WRITE));
        map.entry(&alice).grant(Privilege::new(names::READ));
        map.entry(&editors).deny(Privilege::new(names::REMOVE_NODE));

        let order: Vec<&str> = map.principals().map(|p| p.name.as_str()).collect();
        assert_eq!(order, vec!["editors", "alice"]);
        assert_eq!(map.len(), 2);

        let rights = map.get_by_name("editors").unwrap();
        assert_eq!(rights.granted_names(), vec![names::WRITE]);
        assert_eq!(rights.denied_names(), vec![names::REMOVE_NODE]);
        assert!(map.get(&MemoryPrincipal::user("bob")).is_none());
    }
}
