// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merge a principal's desired rights into the access-control list of a path.
//!
//! Writing is a read-modify-write of the whole list: every entry of the principal is replaced by
//! at most one allow and one deny entry. The repository handle is borrowed mutably for the whole
//! operation, concurrent writers to the same path in other sessions must be serialized by the
//! repository.
use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::config::Config;
use crate::entry::Polarity;
use crate::error::AclError;
use crate::rights::RightsSet;
use crate::traits::{AccessControlList, AccessControlPolicy, IdentityDirectory, Repository};
use crate::Privilege;

/// Resolve a principal name, mapping the configured "everyone" literal to the built-in principal.
pub fn resolve_principal<D>(
    directory: &D,
    config: &Config,
    principal_name: &str,
) -> Result<D::Principal, AclError>
where
    D: IdentityDirectory,
{
    if config.is_everyone(principal_name) {
        return Ok(directory.everyone());
    }

    directory
        .find_principal(principal_name)
        .map_err(|err| {
            AclError::internal(format!("failed to look up principal {principal_name}"), err)
        })?
        .ok_or_else(|| AclError::PrincipalNotFound(principal_name.to_owned()))
}

/// The list bound to `path`, or a fresh applicable one if nothing is bound yet.
fn access_control_list<R>(repository: &R, path: &str) -> Result<R::List, AclError>
where
    R: Repository,
{
    let bound = repository
        .policies(path)
        .map_err(|err| AclError::internal(format!("failed to read policies of {path}"), err))?
        .into_iter()
        .find_map(AccessControlPolicy::into_list);
    if let Some(list) = bound {
        return Ok(list);
    }

    trace!(%path, "no list bound, requesting applicable policies");
    repository
        .applicable_policies(path)
        .map_err(|err| {
            AclError::internal(format!("failed to read applicable policies of {path}"), err)
        })?
        .into_iter()
        .find_map(AccessControlPolicy::into_list)
        .ok_or_else(|| AclError::invariant(format!("could not obtain ACL for resource {path}")))
}

/// Remove every entry of `principal` from the list, returning how many were removed.
fn remove_entries<L>(list: &mut L, principal: &L::Principal, path: &str) -> Result<usize, AclError>
where
    L: AccessControlList,
{
    let stale: Vec<_> = list
        .entries()
        .map_err(|err| AclError::internal(format!("failed to read entries of {path}"), err))?
        .into_iter()
        .filter(|entry| entry.principal == *principal)
        .collect();

    for entry in &stale {
        list.remove_entry(entry).map_err(|err| {
            AclError::internal(format!("failed to remove entry from {path}"), err)
        })?;
    }
    Ok(stale.len())
}

/// Look up each privilege by name in the repository's own registry.
fn native_privileges<R>(
    repository: &R,
    privileges: &BTreeSet<Privilege>,
) -> Result<Vec<R::Privilege>, AclError>
where
    R: Repository,
{
    privileges
        .iter()
        .map(|privilege| {
            repository.privilege_from_name(privilege.name()).map_err(|err| {
                AclError::internal(format!("unknown privilege {}", privilege.name()), err)
            })
        })
        .collect()
}

fn append_entry<R>(
    repository: &R,
    list: &mut R::List,
    principal: &R::Principal,
    principal_name: &str,
    privileges: &BTreeSet<Privilege>,
    polarity: Polarity,
) -> Result<(), AclError>
where
    R: Repository,
{
    if privileges.is_empty() {
        return Ok(());
    }

    let natives = native_privileges(repository, privileges)?;
    let context = || format!("could not set {polarity} rights for principal {principal_name}");
    let added = list
        .add_entry(principal, natives, polarity)
        .map_err(|err| AclError::internal(context(), err))?;
    if !added {
        return Err(AclError::invariant(context()));
    }

    trace!(principal = principal_name, %polarity, count = privileges.len(), "appended entry");
    Ok(())
}

/// Replace the rights of `principal_name` at `path` with `desired`.
///
/// Privileges which are both granted and denied in `desired` are only written as denied.
pub fn set_rights<R, D>(
    repository: &mut R,
    directory: &D,
    config: &Config,
    principal_name: &str,
    path: &str,
    desired: &RightsSet,
) -> Result<(), AclError>
where
    R: Repository,
    D: IdentityDirectory<Principal = R::Principal>,
{
    let principal = resolve_principal(directory, config, principal_name)?;
    let mut list = access_control_list(repository, path)?;

    let removed = remove_entries(&mut list, &principal, path)?;

    let desired = desired.resolve_conflicts();
    append_entry(
        repository,
        &mut list,
        &principal,
        principal_name,
        desired.granted(),
        Polarity::Allow,
    )?;
    append_entry(
        repository,
        &mut list,
        &principal,
        principal_name,
        desired.denied(),
        Polarity::Deny,
    )?;

    repository
        .set_policy(path, list)
        .map_err(|err| AclError::internal(format!("failed to write policy of {path}"), err))?;

    debug!(
        %path,
        principal = principal_name,
        removed,
        granted = desired.granted().len(),
        denied = desired.denied().len(),
        "updated rights"
    );
    Ok(())
}
