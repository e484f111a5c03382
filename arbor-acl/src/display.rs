// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::fmt::Display;

/// Coarse classification of a rights set, used to present it to administrators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum DisplayClass {
    /// Nothing granted, nothing denied.
    None,

    /// Exactly the "all" privilege granted.
    AllPrivileges,

    /// Exactly the "read" privilege granted.
    ReadOnly,

    /// Exactly "read" and "write" granted.
    ReadWrite,

    /// Anything else, including every set with denied privileges.
    Custom,
}

impl DisplayClass {
    /// Stable key of the class, used as fallback display name.
    pub fn key(&self) -> &'static str {
        match self {
            DisplayClass::None => "none",
            DisplayClass::AllPrivileges => "all-privileges",
            DisplayClass::ReadOnly => "read-only",
            DisplayClass::ReadWrite => "read-write",
            DisplayClass::Custom => "custom",
        }
    }
}

impl Display for DisplayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Locale-keyed table of human readable display class names.
///
/// Lookups fall back to the default locale and finally to [`DisplayClass::key`].
#[derive(Clone, Debug)]
pub struct DisplayNames {
    default_locale: String,
    names: HashMap<String, HashMap<DisplayClass, String>>,
}

impl DisplayNames {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            names: HashMap::new(),
        }
    }

    /// English names registered under the `en` locale.
    pub fn english() -> Self {
        Self::new("en")
            .with_name("en", DisplayClass::None, "None")
            .with_name("en", DisplayClass::AllPrivileges, "Full Control")
            .with_name("en", DisplayClass::ReadOnly, "Read Only")
            .with_name("en", DisplayClass::ReadWrite, "Read/Write")
            .with_name("en", DisplayClass::Custom, "Custom")
    }

    pub fn with_name(
        mut self,
        locale: impl Into<String>,
        class: DisplayClass,
        name: impl Into<String>,
    ) -> Self {
        self.insert(locale, class, name);
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, class: DisplayClass, name: impl Into<String>) {
        self.names
            .entry(locale.into())
            .or_default()
            .insert(class, name.into());
    }

    /// Display name of `class` in `locale`.
    pub fn display_name(&self, class: DisplayClass, locale: &str) -> &str {
        [locale, self.default_locale.as_str()]
            .into_iter()
            .find_map(|locale| self.names.get(locale).and_then(|names| names.get(&class)))
            .map(String::as_str)
            .unwrap_or(class.key())
    }
}

impl Default for DisplayNames {
    fn default() -> Self {
        Self::english()
    }
}
