// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

/// Whether an entry grants or denies its privileges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Polarity {
    Allow,
    Deny,
}

impl Polarity {
    pub fn is_allow(&self) -> bool {
        matches!(self, Polarity::Allow)
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Polarity::Deny)
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Polarity::Allow => "allow",
            Polarity::Deny => "deny",
        };

        write!(f, "{}", s)
    }
}

/// One (principal, privileges, polarity) record of an access-control list.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessControlEntry<P, V> {
    pub principal: P,
    pub privileges: Vec<V>,
    pub polarity: Polarity,
}

impl<P, V> AccessControlEntry<P, V> {
    pub fn allow(principal: P, privileges: Vec<V>) -> Self {
        Self {
            principal,
            privileges,
            polarity: Polarity::Allow,
        }
    }

    pub fn deny(principal: P, privileges: Vec<V>) -> Self {
        Self {
            principal,
            privileges,
            polarity: Polarity::Deny,
        }
    }
}
