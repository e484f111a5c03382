// SPDX-License-Identifier: MIT OR Apache-2.0

//! Names of the standard repository privileges.
//!
//! Repositories are free to register their own privileges, these are the ones every repository is
//! expected to understand. `ALL` and `WRITE` are aggregates, everything else is a leaf.

pub const READ: &str = "jcr:read";
pub const WRITE: &str = "jcr:write";
pub const ALL: &str = "jcr:all";
pub const ADD_CHILD_NODES: &str = "jcr:addChildNodes";
pub const REMOVE_CHILD_NODES: &str = "jcr:removeChildNodes";
pub const REMOVE_NODE: &str = "jcr:removeNode";
pub const MODIFY_PROPERTIES: &str = "jcr:modifyProperties";
pub const READ_ACCESS_CONTROL: &str = "jcr:readAccessControl";
pub const MODIFY_ACCESS_CONTROL: &str = "jcr:modifyAccessControl";
pub const LOCK_MANAGEMENT: &str = "jcr:lockManagement";
pub const VERSION_MANAGEMENT: &str = "jcr:versionManagement";
pub const NODE_TYPE_MANAGEMENT: &str = "jcr:nodeTypeManagement";
pub const RETENTION_MANAGEMENT: &str = "jcr:retentionManagement";
pub const LIFECYCLE_MANAGEMENT: &str = "jcr:lifecycleManagement";

/// Declared children of `WRITE`.
pub const WRITE_AGGREGATES: [&str; 4] = [
    MODIFY_PROPERTIES,
    ADD_CHILD_NODES,
    REMOVE_NODE,
    REMOVE_CHILD_NODES,
];

/// Declared children of `ALL`.
pub const ALL_AGGREGATES: [&str; 9] = [
    READ,
    WRITE,
    READ_ACCESS_CONTROL,
    MODIFY_ACCESS_CONTROL,
    LOCK_MANAGEMENT,
    VERSION_MANAGEMENT,
    NODE_TYPE_MANAGEMENT,
    RETENTION_MANAGEMENT,
    LIFECYCLE_MANAGEMENT,
];
