//! Structured view of the submodule sections in a `.gitmodules` file.

use std::collections::BTreeMap;

/// Properties declared for one submodule section.
///
/// Recognized keys are `path`, `url` and `branch`; any other key is kept
/// verbatim so callers can still inspect it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmoduleProperties {
    properties: BTreeMap<String, String>,
}

impl SubmoduleProperties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a property, replacing an earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Look up a property by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The submodule's path relative to the repository root.
    pub fn path(&self) -> Option<&str> {
        self.get("path")
    }

    /// The declared branch, if set to a non-empty value.
    pub fn branch(&self) -> Option<&str> {
        self.get("branch").filter(|b| !b.is_empty())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Mapping of submodule name to its properties, in section order.
///
/// A later section with an already-seen name replaces the earlier one's
/// properties but keeps the earlier position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationIndex {
    entries: Vec<(String, SubmoduleProperties)>,
}

impl ConfigurationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section, discarding any properties of an earlier
    /// section with the same name. Returns the properties to fill.
    pub(crate) fn open_section(&mut self, name: &str) -> &mut SubmoduleProperties {
        let position = match self.entries.iter().position(|(n, _)| n == name) {
            Some(position) => {
                self.entries[position].1 = SubmoduleProperties::new();
                position
            }
            None => {
                self.entries
                    .push((name.to_string(), SubmoduleProperties::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut SubmoduleProperties> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, props)| props)
    }

    /// Look up a submodule by name.
    pub fn get(&self, name: &str) -> Option<&SubmoduleProperties> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, props)| props)
    }

    /// Find the first submodule whose `path` property equals `path`.
    pub fn find_by_path(&self, path: &str) -> Option<(&str, &SubmoduleProperties)> {
        self.entries
            .iter()
            .find(|(_, props)| props.path() == Some(path))
            .map(|(name, props)| (name.as_str(), props))
    }

    /// Submodule names in section order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
