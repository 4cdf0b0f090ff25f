//! Declared configuration keys.
//!
//! Responsibilities:
//! - Define `KeyDeclaration`: a key the application reads, its static default,
//!   its sensitivity flag and an optional display label.
//! - Define `KeyTable`: the ordered, duplicate-free set of declarations handed
//!   to the resolver at construction time.
//!
//! Does NOT handle:
//! - Resolving values (see `resolver` module).
//! - Loading declarations from a settings file (see `loader` module).
//!
//! Invariants:
//! - Key names are non-empty and contain no whitespace.
//! - A key is declared at most once per table.
//! - Declaration order is preserved for projections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::NOT_FOUND;
use crate::resolver::ResolverError;

fn default_value() -> String {
    NOT_FOUND.to_string()
}

/// A key the application declares up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDeclaration {
    /// Dotted key name, e.g. `app.database.url`.
    pub key: String,
    /// Static default bound when no source supplies the key.
    #[serde(default = "default_value")]
    pub default: String,
    /// Whether the value must be masked in projections.
    #[serde(default)]
    pub sensitive: bool,
    /// Name used in HTTP projections. Falls back to `key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl KeyDeclaration {
    /// Declare a non-sensitive key with the given default.
    pub fn new(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: default.into(),
            sensitive: false,
            label: None,
        }
    }

    /// Mark the key as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The name used by projections.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// The set of keys declared by the application.
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    declarations: Vec<KeyDeclaration>,
    index: HashMap<String, usize>,
}

impl KeyTable {
    /// Build a table, rejecting empty, whitespace-bearing and duplicate keys.
    pub fn new(declarations: Vec<KeyDeclaration>) -> Result<Self, ResolverError> {
        let mut index = HashMap::with_capacity(declarations.len());
        for (position, declaration) in declarations.iter().enumerate() {
            if declaration.key.is_empty() || declaration.key.chars().any(char::is_whitespace) {
                return Err(ResolverError::InvalidKey(declaration.key.clone()));
            }
            if index.insert(declaration.key.clone(), position).is_some() {
                return Err(ResolverError::DuplicateKey(declaration.key.clone()));
            }
        }
        Ok(Self {
            declarations,
            index,
        })
    }

    /// Look up a declaration by key.
    pub fn get(&self, key: &str) -> Option<&KeyDeclaration> {
        self.index.get(key).map(|&i| &self.declarations[i])
    }

    /// Whether `key` is declared.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Whether `key` is declared and flagged sensitive.
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.get(key).is_some_and(|d| d.sensitive)
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyDeclaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table_rejects_duplicates() {
        let result = KeyTable::new(vec![
            KeyDeclaration::new("app.api.key", NOT_FOUND),
            KeyDeclaration::new("app.api.key", "other"),
        ]);
        assert!(matches!(result, Err(ResolverError::DuplicateKey(k)) if k == "app.api.key"));
    }

    #[test]
    fn test_key_table_rejects_blank_and_whitespace_keys() {
        assert!(matches!(
            KeyTable::new(vec![KeyDeclaration::new("", NOT_FOUND)]),
            Err(ResolverError::InvalidKey(_))
        ));
        assert!(matches!(
            KeyTable::new(vec![KeyDeclaration::new("app. key", NOT_FOUND)]),
            Err(ResolverError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_key_table_preserves_order_and_sensitivity() {
        let table = KeyTable::new(vec![
            KeyDeclaration::new("b.key", "1"),
            KeyDeclaration::new("a.key", "2").sensitive(),
        ])
        .unwrap();

        let keys: Vec<&str> = table.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["b.key", "a.key"]);
        assert!(table.is_sensitive("a.key"));
        assert!(!table.is_sensitive("b.key"));
        assert!(!table.is_sensitive("missing"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_declaration_deserializes_with_defaults() {
        let declaration: KeyDeclaration =
            serde_json::from_str(r#"{"key": "app.database.url"}"#).unwrap();
        assert_eq!(declaration.default, NOT_FOUND);
        assert!(!declaration.sensitive);
        assert_eq!(declaration.display_name(), "app.database.url");

        let labelled = declaration.with_label("database.url");
        assert_eq!(labelled.display_name(), "database.url");
    }
}
