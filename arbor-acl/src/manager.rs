// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::checker::CapabilityChecker;
use crate::config::Config;
use crate::display::DisplayClass;
use crate::error::AclError;
use crate::resolver::{self, Scope};
use crate::rights::{RightsMap, RightsSet};
use crate::traits::{IdentityDirectory, Repository};
use crate::{Privilege, writer};

/// Access-control operations against one repository session.
///
/// Reads go straight to the repository on every call, nothing is cached. Writes borrow the
/// manager mutably, so one manager never interleaves two writes.
#[derive(Debug)]
pub struct AccessManager<R, D> {
    repository: R,
    directory: D,
    config: Config,
}

impl<R, D> AccessManager<R, D>
where
    R: Repository,
    D: IdentityDirectory<Principal = R::Principal>,
{
    pub fn new(repository: R, directory: D) -> Self {
        Self::with_config(repository, directory, Config::default())
    }

    pub fn with_config(repository: R, directory: D, config: Config) -> Self {
        Self {
            repository,
            directory,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rights of every principal with entries bound directly to `path`.
    pub fn resolve_declared(&self, path: &str) -> Result<RightsMap<R::Principal>, AclError> {
        resolver::resolve(&self.repository, path, Scope::Declared)
    }

    /// Rights of every principal in effect at `path`, including inherited entries.
    pub fn resolve_effective(&self, path: &str) -> Result<RightsMap<R::Principal>, AclError> {
        resolver::resolve(&self.repository, path, Scope::Effective)
    }

    pub fn resolve_declared_for_principal(
        &self,
        principal_id: &str,
        path: &str,
    ) -> Result<RightsSet, AclError> {
        resolver::resolve_for_principal(&self.repository, path, Scope::Declared, principal_id)
    }

    pub fn resolve_effective_for_principal(
        &self,
        principal_id: &str,
        path: &str,
    ) -> Result<RightsSet, AclError> {
        resolver::resolve_for_principal(&self.repository, path, Scope::Effective, principal_id)
    }

    /// Same as [`AccessManager::resolve_declared_for_principal`].
    pub fn acl_for_principal(&self, principal_id: &str, path: &str) -> Result<RightsSet, AclError> {
        self.resolve_declared_for_principal(principal_id, path)
    }

    pub fn supported_privileges(&self, path: &str) -> Result<Vec<Privilege>, AclError> {
        resolver::supported_privileges(&self.repository, path)
    }

    /// Replace the declared rights of the principal at `path` with `rights`.
    pub fn set_rights(
        &mut self,
        principal_id: &str,
        path: &str,
        rights: &RightsSet,
    ) -> Result<(), AclError> {
        writer::set_rights(
            &mut self.repository,
            &self.directory,
            &self.config,
            principal_id,
            path,
            rights,
        )
    }

    /// Classify a rights set with the configured "all", "read" and "write" names.
    pub fn display_class(&self, rights: &RightsSet) -> DisplayClass {
        rights.classify(
            &self.config.all_privilege,
            &self.config.read_privilege,
            &self.config.write_privilege,
        )
    }

    pub fn checker(&self) -> CapabilityChecker<'_, R, D> {
        CapabilityChecker::new(&self.repository, &self.directory, &self.config)
    }

    pub fn can_add_children(&self, path: &str) -> bool {
        self.checker().can_add_children(path)
    }

    pub fn can_delete_children(&self, path: &str) -> bool {
        self.checker().can_delete_children(path)
    }

    pub fn can_modify_properties(&self, path: &str) -> bool {
        self.checker().can_modify_properties(path)
    }

    pub fn can_read_access_control(&self, path: &str) -> bool {
        self.checker().can_read_access_control(path)
    }

    pub fn can_modify_access_control(&self, path: &str) -> bool {
        self.checker().can_modify_access_control(path)
    }

    pub fn can_delete(&self, path: &str) -> bool {
        self.checker().can_delete(path)
    }

    pub fn can_update_authorizable(&self, principal_id: &str) -> bool {
        self.checker().can_update_authorizable(principal_id)
    }

    pub fn can_delete_authorizable(&self, principal_id: &str) -> bool {
        self.checker().can_delete_authorizable(principal_id)
    }
}
