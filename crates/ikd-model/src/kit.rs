use serde::{Deserialize, Serialize};

/// Field name carrying the i7 barcode sequence, by kit-layout convention.
pub const SEQUENCE_FIELD_I7: &str = "index_i7";

/// Field name carrying the i5 barcode sequence, by kit-layout convention.
pub const SEQUENCE_FIELD_I5: &str = "index_i5";

/// A named group of table fields that together describe one barcode entry
/// (e.g. a name/sequence pair, optionally with a well position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSet {
    pub name: String,
    /// Required field names, in output order. Unique within the set.
    pub fields: Vec<String>,
}

/// A named, fixed schema of index sets describing one vendor/product's
/// table layout. Loaded once from the layout catalog, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitType {
    pub name: String,
    pub index_sets: Vec<IndexSet>,
}

impl KitType {
    /// Every field of every index set, concatenated in index-set order.
    /// Field order within a set is preserved; the catalog guarantees a field
    /// appears in at most one set, so the result has no duplicates.
    pub fn all_fields(&self) -> Vec<&str> {
        self.index_sets
            .iter()
            .flat_map(|set| set.fields.iter().map(String::as_str))
            .collect()
    }

    pub fn index_set_names(&self) -> Vec<&str> {
        self.index_sets.iter().map(|set| set.name.as_str()).collect()
    }

    pub fn index_set(&self, name: &str) -> Option<&IndexSet> {
        self.index_sets.iter().find(|set| set.name == name)
    }

    /// The index set owning `field`, if any. Field→set is a function by
    /// catalog invariant.
    pub fn field_set(&self, field: &str) -> Option<&IndexSet> {
        self.index_sets
            .iter()
            .find(|set| set.fields.iter().any(|f| f == field))
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.field_set(field).is_some()
    }
}
