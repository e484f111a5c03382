// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use thiserror::Error;

pub(crate) type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// Errors surfaced by resolving and writing access-control state.
#[derive(Debug, Error)]
pub enum AclError {
    /// A principal required by the operation does not exist.
    #[error("principal {0} does not exist")]
    PrincipalNotFound(String),

    /// A principal with this name exists already.
    #[error("principal {0} already exists")]
    AlreadyExists(String),

    /// The operation required a user but found a group, or the other way around.
    #[error("principal {name} is not a {expected}")]
    WrongPrincipalKind { name: String, expected: String },

    /// The caller lacks the rights for the surrounding operation.
    #[error("access denied at {path}")]
    AccessDenied { path: String },

    /// The repository or identity directory failed, or no usable policy could be obtained.
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl AclError {
    pub(crate) fn internal<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Internal {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn invariant(context: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
            source: None,
        }
    }

    /// Return `true` for failures of the underlying collaborators.
    pub fn is_internal(&self) -> bool {
        matches!(self, AclError::Internal { .. })
    }
}
