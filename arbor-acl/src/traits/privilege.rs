// SPDX-License-Identifier: MIT OR Apache-2.0

/// Privilege descriptor as handed out by a repository's privilege registry.
///
/// Descriptors form a tree: an aggregate privilege declares its immediate children and reports
/// the full set of privileges it aggregates.
pub trait NativePrivilege {
    /// Unique name of the privilege, for example `jcr:read`.
    fn name(&self) -> &str;

    /// Abstract privileges can only be used as aggregation roots, never on an entry directly.
    fn is_abstract(&self) -> bool;

    /// Immediate children in the aggregation hierarchy.
    fn declared_aggregate_privileges(&self) -> &[Self]
    where
        Self: Sized;

    /// All privileges aggregated by this one, transitively.
    fn aggregate_privileges(&self) -> &[Self]
    where
        Self: Sized;
}
