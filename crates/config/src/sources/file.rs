//! File-backed KV source.
//!
//! Responsibilities:
//! - Read one JSON or YAML document per source path under a KV root
//!   (`secret/common` -> `<kv_root>/secret/common.json`).
//! - Flatten nested documents into dotted keys with string values.
//!
//! Does NOT handle:
//! - Watching files for changes; the resolver reloads on refresh.
//!
//! Invariants:
//! - Nested objects join with `.`; array elements are keyed `name[i]`.
//! - Numbers and booleans are rendered as their JSON text; `null` is skipped.
//! - The document root must be a mapping.

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::resolver::{SourceError, SourceLoader};

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads a source from a document on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    kv_root: PathBuf,
    path: Option<PathBuf>,
}

impl FileSource {
    /// Resolve documents relative to `kv_root` by source name.
    pub fn new(kv_root: impl Into<PathBuf>) -> Self {
        Self {
            kv_root: kv_root.into(),
            path: None,
        }
    }

    /// Always read `path`, whatever the source name.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            kv_root: PathBuf::new(),
            path: Some(path.into()),
        }
    }

    fn document_path(&self, source_name: &str) -> Result<PathBuf, SourceError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let base = self.kv_root.join(source_name.trim_matches('/'));
        EXTENSIONS
            .iter()
            .map(|ext| with_suffix(&base, ext))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| SourceError::NotFound(with_suffix(&base, EXTENSIONS[0])))
    }
}

impl SourceLoader for FileSource {
    fn load_all(&self, source_name: &str) -> Result<HashMap<String, String>, SourceError> {
        let path = self.document_path(source_name)?;
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.clone())
            } else {
                SourceError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let document = parse_document(&path, &content)?;

        let mut values = HashMap::new();
        match document {
            Value::Object(map) => {
                for (key, value) in map {
                    flatten_into(&mut values, key, value);
                }
            }
            Value::Null => {}
            _ => {
                return Err(SourceError::Parse {
                    path,
                    message: "document root must be a mapping".to_string(),
                });
            }
        }
        tracing::debug!(
            source = source_name,
            path = %path.display(),
            keys = values.len(),
            "Loaded file source"
        );
        Ok(values)
    }
}

// Source names may contain dots, so the extension is appended rather than replaced.
fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

fn parse_document(path: &Path, content: &str) -> Result<Value, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    // Parse errors carry the serde message only; document text is never echoed.
    match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        _ => serde_json::from_str(content).map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Flatten `value` under `prefix` into dotted string entries.
pub(crate) fn flatten_into(out: &mut HashMap<String, String>, prefix: String, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            out.insert(prefix, s);
        }
        Value::Bool(_) | Value::Number(_) => {
            out.insert(prefix, value.to_string());
        }
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                flatten_into(out, format!("{prefix}[{i}]"), item);
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_into(out, format!("{prefix}.{key}"), nested);
            }
        }
    }
}
