use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::PublishError;

pub const MANIFEST_FILE: &str = "package.json";

/// A `package.json` document. Key order is preserved on round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, PublishError> {
        let content = fs::read_to_string(path).map_err(|source| PublishError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| PublishError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(PublishError::ManifestNotObject(path.to_path_buf())),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PublishError> {
        let mut content = serde_json::to_string_pretty(&self.fields)?;
        content.push('\n');
        fs::write(path, content).map_err(|source| PublishError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &str) {
        // Replacing an existing key keeps its position in the map.
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Build the manifest that goes into the publish directory, with `version`
    /// (if given) replacing the current one.
    ///
    /// Only object-valued fields are filtered; a filter naming an array or a
    /// scalar field leaves it as it is.
    pub fn for_publish(
        &self,
        version: Option<&str>,
        filter: &BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut published = self.clone();
        if let Some(version) = version {
            published.set_version(version);
        }

        for (key, value) in published.fields.iter_mut() {
            let (Some(excluded), Value::Object(entries)) = (filter.get(key), value) else {
                continue;
            };
            entries.retain(|name, _| !excluded.contains(name));
        }
        published
    }
}
