//! Validation of user-entered kit metadata and resource settings.

use std::sync::LazyLock;

use regex::Regex;

use ikd_model::{IndexKitInfo, ResourceSettings};

/// 1-3 dot-separated integer groups, e.g. `1`, `1.2`, `1.2.3`.
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.){0,2}\d+$").expect("valid version pattern"));

/// Read slots: one or more `Y`/`U`/`N` groups, each sized by digits or the
/// `x` placeholder, e.g. `Y151`, `U8N2`, `Yx`.
static READ_SLOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([YUN](\d+|x))+$").expect("valid read slot pattern"));

/// Index slots: same shape with `I`/`U`/`N` groups, e.g. `I8`, `I8U9`.
static INDEX_SLOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([IUN](\d+|x))+$").expect("valid index slot pattern"));

/// Kit names must be non-empty and contain no whitespace.
pub fn valid_kit_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// Version strings are 1-3 dot-separated groups, each in 0..=999.
pub fn valid_version(version: &str) -> bool {
    VERSION_REGEX.is_match(version)
        && version
            .split('.')
            .all(|part| part.parse::<u32>().is_ok_and(|n| n <= 999))
}

/// Adapter sequences use the DNA alphabet plus `+` as a linker separator.
/// Empty means "no adapter", which is acceptable.
pub fn valid_adapter(sequence: &str) -> bool {
    sequence
        .chars()
        .all(|ch| matches!(ch.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | '+'))
}

/// At most one `x` placeholder is allowed per slot; the remaining groups
/// must be explicitly sized.
fn at_most_one_placeholder(slot: &str) -> bool {
    slot.matches('x').count() <= 1
}

pub fn valid_read_slot(slot: &str) -> bool {
    READ_SLOT_REGEX.is_match(slot) && at_most_one_placeholder(slot)
}

pub fn valid_index_slot(slot: &str) -> bool {
    INDEX_SLOT_REGEX.is_match(slot) && at_most_one_placeholder(slot)
}

/// All problems with the kit identification block, as user-facing messages.
pub fn validate_kit_info(info: &IndexKitInfo) -> Vec<String> {
    let mut issues = Vec::new();
    if !valid_kit_name(&info.name) {
        issues.push(format!(
            "Invalid index kit name '{}': must be non-empty with no whitespace",
            info.name
        ));
    }
    if !info.version.is_empty() && !valid_version(&info.version) {
        issues.push(format!(
            "Invalid version '{}': expected up to three dot-separated numbers (e.g. 1.2.3)",
            info.version
        ));
    }
    issues
}

/// All problems with adapters and override-cycles slots. Every slot is
/// checked so the caller can report the complete picture at once.
pub fn validate_resource_settings(resource: &ResourceSettings) -> Vec<String> {
    let mut issues = Vec::new();
    for (name, value) in [
        ("adapter_read1", &resource.adapter_read1),
        ("adapter_read2", &resource.adapter_read2),
    ] {
        if !valid_adapter(value) {
            issues.push(format!("Invalid adapter sequence field: {name}"));
        }
    }
    let cycles = &resource.override_cycles;
    for (name, value) in [
        ("override_cycles_pattern_r1", &cycles.read1),
        ("override_cycles_pattern_r2", &cycles.read2),
    ] {
        if !valid_read_slot(value) {
            issues.push(format!("Incomplete override cycle pattern field: {name}"));
        }
    }
    for (name, value) in [
        ("override_cycles_pattern_i1", &cycles.index1),
        ("override_cycles_pattern_i2", &cycles.index2),
    ] {
        if !valid_index_slot(value) {
            issues.push(format!("Incomplete override cycle pattern field: {name}"));
        }
    }
    issues
}
