use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use ikd_model::KitType;

use crate::embedded::DEFAULT_KIT_LAYOUTS;

/// Environment variable naming an alternative kit-layout catalog file.
pub const KIT_LAYOUTS_ENV_VAR: &str = "IKD_KIT_LAYOUTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read kit layout source {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed kit layout source: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate kit type name '{0}'")]
    DuplicateKitType(String),
    #[error("kit type '{0}' defines no index sets")]
    EmptyKitType(String),
    #[error("index set '{set}' of kit type '{kit_type}' has no fields")]
    EmptyIndexSet { kit_type: String, set: String },
    #[error("field '{field}' appears in more than one index set of kit type '{kit_type}'")]
    DuplicateField { kit_type: String, field: String },
    #[error("unknown kit type '{0}'")]
    UnknownKitType(String),
}

/// The closed set of supported kit types, loaded once at startup.
/// Read-only afterwards; safe to share across the session.
#[derive(Debug, Clone)]
pub struct KitLayoutCatalog {
    kit_types: Vec<KitType>,
}

impl KitLayoutCatalog {
    /// Parse a catalog from JSON text and enforce the layout invariants.
    pub fn load_str(source: &str) -> Result<Self, ConfigError> {
        let kit_types: Vec<KitType> = serde_json::from_str(source)?;
        validate_layouts(&kit_types)?;
        Ok(Self { kit_types })
    }

    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_str(&source)
    }

    /// The embedded catalog, unless `IKD_KIT_LAYOUTS` points elsewhere.
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(KIT_LAYOUTS_ENV_VAR) {
            return Self::load_path(Path::new(&path));
        }
        Self::load_str(DEFAULT_KIT_LAYOUTS)
    }

    /// All kit type names, in source order.
    pub fn names(&self) -> Vec<&str> {
        self.kit_types.iter().map(|kit| kit.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KitType> {
        self.kit_types.iter()
    }

    pub fn lookup(&self, name: &str) -> Result<&KitType, ConfigError> {
        self.kit_types
            .iter()
            .find(|kit| kit.name == name)
            .ok_or_else(|| ConfigError::UnknownKitType(name.to_string()))
    }

    /// The union of every index set's fields for `name`, concatenated in
    /// index-set order.
    pub fn all_fields(&self, name: &str) -> Result<Vec<&str>, ConfigError> {
        Ok(self.lookup(name)?.all_fields())
    }
}

fn validate_layouts(kit_types: &[KitType]) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    for kit in kit_types {
        if !names.insert(kit.name.as_str()) {
            return Err(ConfigError::DuplicateKitType(kit.name.clone()));
        }
        if kit.index_sets.is_empty() {
            return Err(ConfigError::EmptyKitType(kit.name.clone()));
        }
        let mut fields = BTreeSet::new();
        for set in &kit.index_sets {
            if set.fields.is_empty() {
                return Err(ConfigError::EmptyIndexSet {
                    kit_type: kit.name.clone(),
                    set: set.name.clone(),
                });
            }
            for field in &set.fields {
                if !fields.insert(field.as_str()) {
                    return Err(ConfigError::DuplicateField {
                        kit_type: kit.name.clone(),
                        field: field.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
