//! Adapter for the vendor index-kit-definition format: a line-oriented text
//! file with bracketed `[Section]` headers and tab-separated rows.
//!
//! Recognized sections:
//! - `[IndexKit]` / `[Kit]` — key/value pairs describing the kit (name,
//!   display name, version, description, index strategy, UMI flags).
//! - `[SupportedLibraryPrepKits]` — one kit name per line.
//! - `[Resources]` — `Name  Type  Format  Value` rows; `FixedIndexPosition`
//!   entries pin i7/i5 pairs to wells, everything else is kit metadata.
//! - `[Indices]` — `Name  Sequence  IndexReadNumber` rows; read number 1 is
//!   the i7 barcode, read number 2 the i5 barcode.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use ikd_model::{IndexKitInfo, Table, TableError};

use crate::error::IngestError;
use crate::raw::normalize_cell;

/// Override-cycles template attached to kits imported from this format.
pub const OVERRIDE_CYCLES_TEMPLATE: &str = "Y$r1-I$i1-I$i2-Y$r2";

const RESOURCE_COLUMNS: [&str; 4] = ["name", "type", "format", "value"];
const INDEX_COLUMNS: [&str; 3] = ["name", "sequence", "index_read_number"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub kind: String,
    pub format: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub sequence: String,
    pub index_read_number: u8,
}

/// Parsed vendor kit definition: kit metadata plus the raw index and
/// resource tables, with helpers deriving the working table shapes.
#[derive(Debug, Clone, Default)]
pub struct IlluminaIndexKit {
    /// Key/value pairs of the kit section, keys snake_cased.
    pub kit: BTreeMap<String, String>,
    pub supported_library_prep_kits: Vec<String>,
    pub resources: Vec<Resource>,
    pub indices: Vec<IndexEntry>,
}

impl IlluminaIndexKit {
    pub fn parse(content: &str) -> Result<Self, IngestError> {
        let sections = split_sections(content)?;
        let mut parsed = Self::default();

        for (section, lines) in &sections {
            match section.as_str() {
                "IndexKit" | "Kit" => {
                    for line in lines {
                        let (key, value) = line.split_once('\t').unwrap_or((line.as_str(), ""));
                        parsed
                            .kit
                            .insert(to_snake(key.trim()), normalize_cell(value));
                    }
                }
                "SupportedLibraryPrepKits" => {
                    parsed.supported_library_prep_kits =
                        lines.iter().map(|line| normalize_cell(line)).collect();
                }
                "Resources" => {
                    parsed.resources = parse_resources(section, lines)?;
                }
                "Indices" => {
                    parsed.indices = parse_indices(section, lines)?;
                }
                other => {
                    debug!(section = other, "ignoring unrecognized section");
                }
            }
        }
        if !parsed.kit.is_empty() {
            parsed
                .kit
                .entry("override_cycles_pattern".to_string())
                .or_insert_with(|| OVERRIDE_CYCLES_TEMPLATE.to_string());
        }
        Ok(parsed)
    }

    pub fn parse_path(path: &Path) -> Result<Self, IngestError> {
        let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Kit identification block for the export document.
    pub fn kit_info(&self) -> IndexKitInfo {
        IndexKitInfo {
            name: self.kit_value("name"),
            display_name: self.kit_value("display_name"),
            version: self.kit_value("version"),
            description: self.kit_value("description"),
        }
    }

    pub fn kit_value(&self, key: &str) -> String {
        self.kit.get(key).cloned().unwrap_or_default()
    }

    pub fn index_strategy(&self) -> &str {
        self.kit.get("index_strategy").map(String::as_str).unwrap_or("")
    }

    /// Non-positional resources as a snake_cased name → value map
    /// (adapter sequences, UMI compatibility, and similar kit metadata).
    pub fn resource_map(&self) -> BTreeMap<String, String> {
        self.resources
            .iter()
            .filter(|r| !r.kind.contains("FixedIndexPosition"))
            .map(|r| (to_snake(&r.name), r.value.clone()))
            .collect()
    }

    /// i7 barcodes: entries with index read number 1, as (name, sequence).
    pub fn indices_i7(&self) -> Vec<(&str, &str)> {
        self.indices_for_read(1)
    }

    /// i5 barcodes: entries with index read number 2.
    pub fn indices_i5(&self) -> Vec<(&str, &str)> {
        self.indices_for_read(2)
    }

    fn indices_for_read(&self, read_number: u8) -> Vec<(&str, &str)> {
        self.indices
            .iter()
            .filter(|entry| entry.index_read_number == read_number)
            .map(|entry| (entry.name.as_str(), entry.sequence.as_str()))
            .collect()
    }

    /// Well-pinned i7/i5 pairs from `FixedIndexPosition` resources, as
    /// (position, i7 name, i5 name).
    pub fn fixed_positions(&self) -> Vec<(String, String, String)> {
        self.resources
            .iter()
            .filter(|r| r.kind.contains("FixedIndexPosition"))
            .filter_map(|r| {
                r.value
                    .split_once('-')
                    .map(|(i7, i5)| (r.name.clone(), i7.to_string(), i5.to_string()))
            })
            .collect()
    }

    /// True for dual-index kits whose barcode pairs are pinned to wells.
    pub fn is_fixed_layout(&self) -> bool {
        self.index_strategy() == "DualOnly" && !self.fixed_positions().is_empty()
    }

    /// Derive the working table for this kit.
    ///
    /// Fixed-layout kits produce one row per pinned position with both
    /// barcodes resolved by name (positions referencing unknown barcode
    /// names are dropped, matching an inner join). Standard kits produce
    /// positionally paired i7/i5 rows, padded with blanks when one side is
    /// shorter; single-index kits omit the i5 columns.
    pub fn to_table(&self) -> Result<Table, TableError> {
        if self.is_fixed_layout() {
            return self.fixed_table();
        }
        let i7 = self.indices_i7();
        let i5 = self.indices_i5();
        if i5.is_empty() {
            let columns = vec!["index_i7_name".to_string(), "index_i7".to_string()];
            let rows = i7
                .iter()
                .map(|(name, seq)| vec![opt(name), opt(seq)])
                .collect();
            return Table::new(columns, rows);
        }
        let columns = vec![
            "index_i7_name".to_string(),
            "index_i7".to_string(),
            "index_i5_name".to_string(),
            "index_i5".to_string(),
        ];
        let rows = (0..i7.len().max(i5.len()))
            .map(|idx| {
                let (n7, s7) = i7.get(idx).copied().unwrap_or(("", ""));
                let (n5, s5) = i5.get(idx).copied().unwrap_or(("", ""));
                vec![opt(n7), opt(s7), opt(n5), opt(s5)]
            })
            .collect();
        Table::new(columns, rows)
    }

    fn fixed_table(&self) -> Result<Table, TableError> {
        let i7: BTreeMap<&str, &str> = self.indices_i7().into_iter().collect();
        let i5: BTreeMap<&str, &str> = self.indices_i5().into_iter().collect();
        let columns = vec![
            "fixed_pos".to_string(),
            "index_i7_name".to_string(),
            "index_i7".to_string(),
            "index_i5_name".to_string(),
            "index_i5".to_string(),
        ];
        let rows = self
            .fixed_positions()
            .into_iter()
            .filter_map(|(pos, i7_name, i5_name)| {
                let s7 = i7.get(i7_name.as_str())?;
                let s5 = i5.get(i5_name.as_str())?;
                Some(vec![
                    opt(&pos),
                    opt(&i7_name),
                    opt(s7),
                    opt(&i5_name),
                    opt(s5),
                ])
            })
            .collect();
        Table::new(columns, rows)
    }
}

fn opt(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split the file into `(section name, lines)` groups, preserving order.
fn split_sections(content: &str) -> Result<Vec<(String, Vec<String>)>, IngestError> {
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    for (number, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_matches('\u{feff}').trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let name = trimmed[1..trimmed.len() - 1].to_string();
            sections.push((name, Vec::new()));
        } else if let Some((_, lines)) = sections.last_mut() {
            lines.push(line.to_string());
        } else {
            return Err(IngestError::OrphanLine { line: number + 1 });
        }
    }
    Ok(sections)
}

/// Resolve required snake_cased column positions from a tab-separated
/// header line.
fn header_positions(
    section: &str,
    header: &str,
    required: &[&str],
) -> Result<Vec<usize>, IngestError> {
    let names: Vec<String> = header.split('\t').map(|h| to_snake(h.trim())).collect();
    required
        .iter()
        .map(|column| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| IngestError::Section {
                    section: section.to_string(),
                    reason: format!("missing column '{column}'"),
                })
        })
        .collect()
}

fn parse_resources(section: &str, lines: &[String]) -> Result<Vec<Resource>, IngestError> {
    let Some((header, rows)) = lines.split_first() else {
        return Ok(Vec::new());
    };
    let positions = header_positions(section, header, &RESOURCE_COLUMNS)?;
    Ok(rows
        .iter()
        .map(|row| {
            let cells: Vec<&str> = row.split('\t').collect();
            let cell = |idx: usize| normalize_cell(cells.get(positions[idx]).unwrap_or(&""));
            Resource {
                name: cell(0),
                kind: cell(1),
                format: cell(2),
                value: cell(3),
            }
        })
        .collect())
}

fn parse_indices(section: &str, lines: &[String]) -> Result<Vec<IndexEntry>, IngestError> {
    let Some((header, rows)) = lines.split_first() else {
        return Ok(Vec::new());
    };
    let positions = header_positions(section, header, &INDEX_COLUMNS)?;
    rows.iter()
        .map(|row| {
            let cells: Vec<&str> = row.split('\t').collect();
            let cell = |idx: usize| normalize_cell(cells.get(positions[idx]).unwrap_or(&""));
            let read_raw = cell(2);
            let index_read_number =
                read_raw
                    .parse::<u8>()
                    .map_err(|_| IngestError::Section {
                        section: section.to_string(),
                        reason: format!("invalid index read number '{read_raw}'"),
                    })?;
            Ok(IndexEntry {
                name: cell(0),
                sequence: cell(1),
                index_read_number,
            })
        })
        .collect()
}

/// CamelCase → snake_case, e.g. `IndexReadNumber` → `index_read_number`.
pub fn to_snake(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let chars: Vec<char> = value.chars().collect();
    for (idx, ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev_lower = idx > 0 && chars[idx - 1].is_lowercase();
            let next_lower = idx + 1 < chars.len() && chars[idx + 1].is_lowercase();
            if idx > 0 && (prev_lower || next_lower) && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(*ch);
        }
    }
    out
}
