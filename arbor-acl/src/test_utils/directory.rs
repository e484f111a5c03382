// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_utils::MemoryError;
use crate::traits::{IdentityDirectory, Principal};

pub const EVERYONE: &str = "everyone";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryPrincipal {
    pub name: String,
    pub item_path: Option<String>,
}

impl MemoryPrincipal {
    pub fn user(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            item_path: Some(format!("/home/users/{name}")),
        }
    }

    pub fn group(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            item_path: Some(format!("/home/groups/{name}")),
        }
    }

    pub fn everyone() -> Self {
        Self {
            name: EVERYONE.to_owned(),
            item_path: None,
        }
    }

    pub fn is_everyone(&self) -> bool {
        self.name == EVERYONE
    }
}

impl Principal for MemoryPrincipal {
    fn name(&self) -> &str {
        &self.name
    }

    fn item_path(&self) -> Option<&str> {
        self.item_path.as_deref()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryDirectory {
    principals: Vec<MemoryPrincipal>,
    failing: bool,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principal(mut self, principal: MemoryPrincipal) -> Self {
        self.principals.push(principal);
        self
    }

    /// Every lookup fails from now on.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl IdentityDirectory for MemoryDirectory {
    type Principal = MemoryPrincipal;
    type Error = MemoryError;

    fn find_principal(&self, name: &str) -> Result<Option<Self::Principal>, Self::Error> {
        if self.failing {
            return Err(MemoryError::DirectoryUnavailable);
        }
        Ok(self.principals.iter().find(|p| p.name == name).cloned())
    }

    fn everyone(&self) -> Self::Principal {
        MemoryPrincipal::everyone()
    }
}
