//! Lint configuration: the canonical attribute order and the required
//! file extension.
//!
//! The driver builds a [`LintConfig`] once and hands it to the validator,
//! so tests can substitute an alternate ordering.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::LintError;

/// Documented order of task attributes.
pub const CANONICAL_ATTRIBUTE_ORDER: [&str; 27] = [
    "aliases",
    "desc",
    "internal",
    "summary",
    "label",
    "prefix",
    "silent",
    "dotenv",
    "env",
    "vars",
    "requires",
    "sources",
    "dir",
    "platforms",
    "set",
    "shopt",
    "generates",
    "method",
    "prompt",
    "run",
    "deps",
    "preconditions",
    "status",
    "cmd",
    "cmds",
    "ignore_error",
    "interactive",
];

/// Extension (without the leading dot) a Taskfile must carry.
pub const REQUIRED_EXTENSION: &str = "yaml";

/// An ordered list of distinct attribute names with rank lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeOrder {
    ranks: HashMap<String, usize>,
}

impl AttributeOrder {
    /// Builds an ordering from the given names.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::DuplicateAttribute`] if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, LintError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for (rank, name) in names.into_iter().map(Into::into).enumerate() {
            match ranks.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(LintError::DuplicateAttribute(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(rank);
                }
            }
        }
        Ok(Self { ranks })
    }

    /// Position of `name` in the ordering, if it is listed.
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    /// Returns `true` if `name` is part of the ordering.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }
}

impl Default for AttributeOrder {
    fn default() -> Self {
        let ranks = CANONICAL_ATTRIBUTE_ORDER
            .iter()
            .enumerate()
            .map(|(rank, name)| ((*name).to_string(), rank))
            .collect();
        Self { ranks }
    }
}

/// Settings consumed by the validator and the extension check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Required relative order of attributes within a task.
    pub order: AttributeOrder,
    /// Extension, without the leading dot, the Taskfile must use.
    pub required_extension: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            order: AttributeOrder::default(),
            required_extension: REQUIRED_EXTENSION.to_string(),
        }
    }
}
