// SPDX-License-Identifier: MIT OR Apache-2.0

//! Yes/no capability queries of the session bound to a repository.
//!
//! Every query is answered fail-closed: when the repository or the identity directory fails, or
//! an authorizable cannot be mapped to an item, the answer is `false`.
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::error::BoxedError;
use crate::traits::{IdentityDirectory, Principal, Repository};

#[derive(Debug, Error)]
enum CheckError {
    #[error("repository failed: {0}")]
    Repository(BoxedError),

    #[error("identity directory failed: {0}")]
    Directory(BoxedError),

    #[error("principal {0} does not exist")]
    PrincipalNotFound(String),

    #[error("principal {0} is not backed by an item")]
    ItemPathUnsupported(String),

    #[error("{0} has no parent")]
    NoParent(String),
}

/// Parent of `path`: everything before the last `/`, with `/` being the parent of top-level
/// nodes. The root and relative names without any separator have no parent.
pub(crate) fn parent_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => Some("/"),
        Some(index) => Some(&trimmed[..index]),
        None => None,
    }
}

/// Answers capability queries by delegating to the repository's own privilege evaluation.
#[derive(Debug)]
pub struct CapabilityChecker<'a, R, D> {
    repository: &'a R,
    directory: &'a D,
    config: &'a Config,
}

impl<'a, R, D> CapabilityChecker<'a, R, D>
where
    R: Repository,
    D: IdentityDirectory,
{
    pub fn new(repository: &'a R, directory: &'a D, config: &'a Config) -> Self {
        Self {
            repository,
            directory,
            config,
        }
    }

    pub fn can_add_children(&self, path: &str) -> bool {
        self.fail_closed("add children", path, self.holds(path, &self.config.add_child_nodes))
    }

    pub fn can_delete_children(&self, path: &str) -> bool {
        self.fail_closed(
            "delete children",
            path,
            self.holds(path, &self.config.remove_child_nodes),
        )
    }

    pub fn can_modify_properties(&self, path: &str) -> bool {
        self.fail_closed(
            "modify properties",
            path,
            self.holds(path, &self.config.modify_properties),
        )
    }

    pub fn can_read_access_control(&self, path: &str) -> bool {
        self.fail_closed(
            "read access control",
            path,
            self.holds(path, &self.config.read_access_control),
        )
    }

    pub fn can_modify_access_control(&self, path: &str) -> bool {
        self.fail_closed(
            "modify access control",
            path,
            self.holds(path, &self.config.modify_access_control),
        )
    }

    /// Removing a node also modifies the child list of its parent, so both are required.
    pub fn can_delete(&self, path: &str) -> bool {
        self.fail_closed("delete", path, self.deletable(path))
    }

    /// Return `true` if the session may modify the item backing the named principal.
    pub fn can_update_authorizable(&self, principal_id: &str) -> bool {
        let result = self
            .item_path(principal_id)
            .and_then(|path| self.holds(&path, &self.config.modify_properties));
        self.fail_closed("update authorizable", principal_id, result)
    }

    /// Return `true` if the session may delete the item backing the named principal.
    pub fn can_delete_authorizable(&self, principal_id: &str) -> bool {
        let result = self
            .item_path(principal_id)
            .and_then(|path| self.deletable(&path));
        self.fail_closed("delete authorizable", principal_id, result)
    }

    fn holds(&self, path: &str, privilege: &str) -> Result<bool, CheckError> {
        self.repository
            .has_privileges(path, &[privilege])
            .map_err(|err| CheckError::Repository(Box::new(err)))
    }

    fn deletable(&self, path: &str) -> Result<bool, CheckError> {
        if !self.holds(path, &self.config.remove_node)? {
            return Ok(false);
        }

        let parent = parent_path(path).ok_or_else(|| CheckError::NoParent(path.to_owned()))?;
        self.holds(parent, &self.config.remove_child_nodes)
    }

    fn item_path(&self, principal_id: &str) -> Result<String, CheckError> {
        let principal = self
            .directory
            .find_principal(principal_id)
            .map_err(|err| CheckError::Directory(Box::new(err)))?
            .ok_or_else(|| CheckError::PrincipalNotFound(principal_id.to_owned()))?;

        principal
            .item_path()
            .map(str::to_owned)
            .ok_or_else(|| CheckError::ItemPathUnsupported(principal_id.to_owned()))
    }

    fn fail_closed(&self, capability: &str, target: &str, result: Result<bool, CheckError>) -> bool {
        match result {
            Ok(allowed) => allowed,
            Err(
                err @ (CheckError::Repository(_)
                | CheckError::Directory(_)
                | CheckError::PrincipalNotFound(_)
                | CheckError::ItemPathUnsupported(_)
                | CheckError::NoParent(_)),
            ) => {
                debug!(capability, target, %err, "capability check failed, denying");
                false
            }
        }
    }
}
