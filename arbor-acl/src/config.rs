// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::names;

/// Configuration of an access manager.
///
/// All privilege names default to the standard repository privileges. Repositories which
/// register the same capabilities under different names can remap them here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// Principal name denoting the built-in "everyone" principal, compared case-insensitively.
    pub(crate) everyone_principal: String,

    pub(crate) all_privilege: String,
    pub(crate) read_privilege: String,
    pub(crate) write_privilege: String,

    pub(crate) add_child_nodes: String,
    pub(crate) remove_child_nodes: String,
    pub(crate) remove_node: String,
    pub(crate) modify_properties: String,
    pub(crate) read_access_control: String,
    pub(crate) modify_access_control: String,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn everyone_principal(&self) -> &str {
        &self.everyone_principal
    }

    pub fn with_everyone_principal(mut self, name: impl Into<String>) -> Self {
        self.everyone_principal = name.into();
        self
    }

    /// Names used to classify rights sets: "all", "read" and "write".
    pub fn with_display_privileges(
        mut self,
        all: impl Into<String>,
        read: impl Into<String>,
        write: impl Into<String>,
    ) -> Self {
        self.all_privilege = all.into();
        self.read_privilege = read.into();
        self.write_privilege = write.into();
        self
    }

    pub fn with_add_child_nodes(mut self, name: impl Into<String>) -> Self {
        self.add_child_nodes = name.into();
        self
    }

    pub fn with_remove_child_nodes(mut self, name: impl Into<String>) -> Self {
        self.remove_child_nodes = name.into();
        self
    }

    pub fn with_remove_node(mut self, name: impl Into<String>) -> Self {
        self.remove_node = name.into();
        self
    }

    pub fn with_modify_properties(mut self, name: impl Into<String>) -> Self {
        self.modify_properties = name.into();
        self
    }

    pub fn with_read_access_control(mut self, name: impl Into<String>) -> Self {
        self.read_access_control = name.into();
        self
    }

    pub fn with_modify_access_control(mut self, name: impl Into<String>) -> Self {
        self.modify_access_control = name.into();
        self
    }

    /// Return `true` if `name` denotes the built-in "everyone" principal.
    pub(crate) fn is_everyone(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.everyone_principal)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            everyone_principal: "everyone".to_string(),
            all_privilege: names::ALL.to_string(),
            read_privilege: names::READ.to_string(),
            write_privilege: names::WRITE.to_string(),
            add_child_nodes: names::ADD_CHILD_NODES.to_string(),
            remove_child_nodes: names::REMOVE_CHILD_NODES.to_string(),
            remove_node: names::REMOVE_NODE.to_string(),
            modify_properties: names::MODIFY_PROPERTIES.to_string(),
            read_access_control: names::READ_ACCESS_CONTROL.to_string(),
            modify_access_control: names::MODIFY_ACCESS_CONTROL.to_string(),
        }
    }
}
