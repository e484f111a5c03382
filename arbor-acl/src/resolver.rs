// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolve access-control entries of a path into rights sets per principal.
//!
//! Declared and effective resolution run the same fold, they only differ in which policies are
//! requested from the repository: the ones bound directly to the node, or the ones in effect
//! there (including inherited policies). Every call reads fresh from the repository.
use std::fmt::Display;

use tracing::{debug, trace};

use crate::entry::AccessControlEntry;
use crate::error::AclError;
use crate::rights::{RightsMap, RightsSet};
use crate::traits::{AccessControlList, AccessControlPolicy, NativePrivilege, Principal, Repository};
use crate::Privilege;

/// Which policies of a path are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Policies set directly on the node.
    Declared,

    /// Policies in effect at the node, including inherited ones.
    Effective,
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Scope::Declared => "declared",
            Scope::Effective => "effective",
        };

        write!(f, "{}", s)
    }
}

type Entries<R> =
    Vec<AccessControlEntry<<R as Repository>::Principal, <R as Repository>::Privilege>>;

/// Entries of the first list-shaped policy in `scope`, or none if no policy is list-shaped.
fn entries<R>(repository: &R, path: &str, scope: Scope) -> Result<Entries<R>, AclError>
where
    R: Repository,
{
    let policies = match scope {
        Scope::Declared => repository.policies(path),
        Scope::Effective => repository.effective_policies(path),
    }
    .map_err(|err| AclError::internal(format!("failed to read {scope} policies of {path}"), err))?;

    let Some(list) = policies.into_iter().find_map(AccessControlPolicy::into_list) else {
        trace!(%path, %scope, "no access control list");
        return Ok(Vec::new());
    };

    list.entries()
        .map_err(|err| AclError::internal(format!("failed to read {scope} entries of {path}"), err))
}

fn fold_entry<P, V>(rights: &mut RightsSet, entry: &AccessControlEntry<P, V>)
where
    V: NativePrivilege,
{
    let privileges = Privilege::from_native_list(&entry.privileges);
    if entry.polarity.is_allow() {
        rights.extend_granted(privileges);
    } else {
        rights.extend_denied(privileges);
    }
}

/// Rights of every principal mentioned by the policies of `path`.
pub fn resolve<R>(repository: &R, path: &str, scope: Scope) -> Result<RightsMap<R::Principal>, AclError>
where
    R: Repository,
{
    let mut rights = RightsMap::new();
    for entry in entries(repository, path, scope)? {
        fold_entry(rights.entry(&entry.principal), &entry);
    }

    debug!(%path, %scope, principals = rights.len(), "resolved rights");
    Ok(rights)
}

/// Rights of the principal named `principal_id` at `path`.
///
/// An empty principal id resolves to an empty rights set without consulting the repository.
pub fn resolve_for_principal<R>(
    repository: &R,
    path: &str,
    scope: Scope,
    principal_id: &str,
) -> Result<RightsSet, AclError>
where
    R: Repository,
{
    let mut rights = RightsSet::new();
    if principal_id.is_empty() {
        return Ok(rights);
    }

    for entry in entries(repository, path, scope)?
        .iter()
        .filter(|entry| entry.principal.name() == principal_id)
    {
        fold_entry(&mut rights, entry);
    }

    debug!(%path, %scope, principal = principal_id, "resolved rights of principal");
    Ok(rights)
}

pub fn resolve_declared<R: Repository>(
    repository: &R,
    path: &str,
) -> Result<RightsMap<R::Principal>, AclError> {
    resolve(repository, path, Scope::Declared)
}

pub fn resolve_effective<R: Repository>(
    repository: &R,
    path: &str,
) -> Result<RightsMap<R::Principal>, AclError> {
    resolve(repository, path, Scope::Effective)
}

pub fn resolve_declared_for_principal<R: Repository>(
    repository: &R,
    path: &str,
    principal_id: &str,
) -> Result<RightsSet, AclError> {
    resolve_for_principal(repository, path, Scope::Declared, principal_id)
}

pub fn resolve_effective_for_principal<R: Repository>(
    repository: &R,
    path: &str,
    principal_id: &str,
) -> Result<RightsSet, AclError> {
    resolve_for_principal(repository, path, Scope::Effective, principal_id)
}

/// Privileges which can be used in entries at `path`.
pub fn supported_privileges<R: Repository>(
    repository: &R,
    path: &str,
) -> Result<Vec<Privilege>, AclError> {
    let natives = repository.supported_privileges(path).map_err(|err| {
        AclError::internal(format!("failed to read supported privileges of {path}"), err)
    })?;
    Ok(Privilege::from_native_list(&natives))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::AclError;
    use crate::names;
    use crate::test_utils::{MemoryPrincipal, MemoryRepository};

    use super::{
        resolve_declared, resolve_declared_for_principal, resolve_effective,
        resolve_effective_for_principal, supported_privileges,
    };

    #[test]
    fn no_entries_resolve_to_empty_map() {
        let repository = MemoryRepository::default();
        assert!(resolve_declared(&repository, "/content").unwrap().is_empty());
        assert!(resolve_effective(&repository, "/content").unwrap().is_empty());
    }

    #[test]
    fn allow_and_deny_entries_of_one_principal() {
        let alice = MemoryPrincipal::user("alice");
        let mut repository = MemoryRepository::default();
        repository.allow("/content", &alice, &[names::READ, names::WRITE]);
        repository.deny("/content", &alice, &[names::REMOVE_NODE]);

        let rights = resolve_declared_for_principal(&repository, "/content", "alice").unwrap();
        assert_eq!(rights.granted_names(), vec![names::READ, names::WRITE]);
        assert_eq!(rights.denied_names(), vec![names::REMOVE_NODE]);

        let map = resolve_declared(&repository, "/content").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&alice), Some(&rights));
    }

    #[test]
    fn map_is_ordered_by_first_entry() {
        let alice = MemoryPrincipal::user("alice");
        let editors = MemoryPrincipal::group("editors");
        let mut repository = MemoryRepository::default();
        repository.allow("/content", &editors, &[names::WRITE]);
        repository.allow("/content", &alice, &[names::READ]);
        repository.deny("/content", &editors, &[names::REMOVE_NODE]);

        let map = resolve_declared(&repository, "/content").unwrap();
        let order: Vec<&str> = map.principals().map(|p| p.name.as_str()).collect();
        assert_eq!(order, vec!["editors", "alice"]);
    }

    #[test]
    fn translated_privileges_keep_aggregates() {
        let alice = MemoryPrincipal::user("alice");
        let mut repository = MemoryRepository::default();
        repository.allow("/content", &alice, &[names::WRITE]);

        let rights = resolve_declared_for_principal(&repository, "/content", "alice").unwrap();
        let write = rights.granted().first().unwrap();
        assert!(write.is_aggregate());
        assert!(write.includes(names::REMOVE_NODE));
    }

    #[test]
    fn unknown_or_empty_principal() {
        let alice = MemoryPrincipal::user("alice");
        let mut repository = MemoryRepository::default();
        repository.allow("/content", &alice, &[names::READ]);

        assert!(resolve_declared_for_principal(&repository, "/content", "bob").unwrap().is_empty());

        // Empty ids never reach the repository, not even a failing one.
        repository.fail_on("/content");
        assert!(resolve_declared_for_principal(&repository, "/content", "").unwrap().is_empty());
    }

    #[test]
    fn effective_rights_are_inherited() {
        let alice = MemoryPrincipal::user("alice");
        let mut repository = MemoryRepository::default();
        repository.allow("/content", &alice, &[names::READ]);

        assert!(resolve_declared(&repository, "/content/page").unwrap().is_empty());

        let rights = resolve_effective_for_principal(&repository, "/content/page", "alice").unwrap();
        assert_eq!(rights.granted_names(), vec![names::READ]);

        // The nearest list wins.
        repository.allow("/content/page", &alice, &[names::WRITE]);
        let rights = resolve_effective_for_principal(&repository, "/content/page", "alice").unwrap();
        assert_eq!(rights.granted_names(), vec![names::WRITE]);
    }

    #[test]
    fn non_list_policies_are_skipped() {
        let alice = MemoryPrincipal::user("alice");
        let mut repository = MemoryRepository::default();
        repository.add_opaque_policy("/content", "retention");
        assert!(resolve_declared(&repository, "/content").unwrap().is_empty());

        repository.allow("/content", &alice, &[names::READ]);
        assert_eq!(resolve_declared(&repository, "/content").unwrap().len(), 1);
    }

    #[test]
    fn repository_failure_is_internal() {
        let mut repository = MemoryRepository::default();
        repository.fail_on("/content");

        assert_matches!(
            resolve_declared(&repository, "/content"),
            Err(AclError::Internal { context, source: Some(_) }) if context.contains("/content")
        );
        assert_matches!(
            resolve_effective_for_principal(&repository, "/content", "alice"),
            Err(AclError::Internal { .. })
        );
        assert_matches!(
            supported_privileges(&repository, "/content"),
            Err(AclError::Internal { .. })
        );
    }

    #[test]
    fn supported_privileges_are_translated() {
        let repository = MemoryRepository::default();
        let supported = supported_privileges(&repository, "/content").unwrap();
        assert_eq!(supported.len(), 14);

        let all = supported.iter().find(|p| p.name() == names::ALL).unwrap();
        assert_eq!(all.aggregate_privileges().len(), 13);
    }
}
