//! Kit, resource, and session metadata carried into the export document.

use serde::{Deserialize, Serialize};

/// User-entered identification of the kit being described.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexKitInfo {
    pub name: String,
    pub display_name: String,
    pub version: String,
    pub description: String,
}

/// The four override-cycles slots of a sequencing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleSlot {
    Read1,
    Index1,
    Index2,
    Read2,
}

/// Short per-slot cycle codes, e.g. `Y151` for a read or `I8` for an index.
/// Index slots are derived from the mapped sequence columns; read slots are
/// user-entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideCycles {
    #[serde(rename = "override_cycles_pattern_r1")]
    pub read1: String,
    #[serde(rename = "override_cycles_pattern_i1")]
    pub index1: String,
    #[serde(rename = "override_cycles_pattern_i2")]
    pub index2: String,
    #[serde(rename = "override_cycles_pattern_r2")]
    pub read2: String,
}

impl OverrideCycles {
    pub fn get(&self, slot: CycleSlot) -> &str {
        match slot {
            CycleSlot::Read1 => &self.read1,
            CycleSlot::Index1 => &self.index1,
            CycleSlot::Index2 => &self.index2,
            CycleSlot::Read2 => &self.read2,
        }
    }

    pub fn set(&mut self, slot: CycleSlot, value: String) {
        *self.slot_mut(slot) = value;
    }

    pub fn clear(&mut self, slot: CycleSlot) {
        self.slot_mut(slot).clear();
    }

    fn slot_mut(&mut self, slot: CycleSlot) -> &mut String {
        match slot {
            CycleSlot::Read1 => &mut self.read1,
            CycleSlot::Index1 => &mut self.index1,
            CycleSlot::Index2 => &mut self.index2,
            CycleSlot::Read2 => &mut self.read2,
        }
    }
}

/// Adapter sequences, the selected kit type, and override cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSettings {
    pub adapter_read1: String,
    pub adapter_read2: String,
    pub kit_type: String,
    #[serde(flatten)]
    pub override_cycles: OverrideCycles,
}

/// Who ran the session and on what input. Supplied explicitly by the caller
/// at session start; the core never reads OS identity or the clock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user: String,
    pub ad_user: String,
    #[serde(rename = "file_path")]
    pub source_file: String,
    pub timestamp: String,
}
