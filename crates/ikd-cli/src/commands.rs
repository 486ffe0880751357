//! Command implementations: the boundary between the core crates and the
//! terminal. User-data problems are reported through the notification sink
//! and never crash the session; only startup problems (bad catalog,
//! unreadable input) abort.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use comfy_table::presets::UTF8_FULL;
use tracing::{info, warn};

use ikd_export::{collect_issues, export};
use ikd_ingest::{IlluminaIndexKit, read_delimited, read_spreadsheet};
use ikd_map::{HeaderState, RemapEngine, RemapOutcome};
use ikd_model::{
    CycleSlot, IndexKitInfo, KitType, NotificationSink, OverrideCycles, ResourceSettings,
    SEQUENCE_FIELD_I5, SEQUENCE_FIELD_I7, SessionInfo, Severity, Table,
};
use ikd_standards::KitLayoutCatalog;
use ikd_validate::{
    non_empty, uniform_length, unique_with_rows, valid_alphabet, validate_kit_info,
    validate_resource_settings,
};

use crate::cli::{ConvertArgs, KitTypesArgs, SourceFormatArg};

/// Sink routing user-facing diagnostics through the log stream.
struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => info!("{message}"),
            Severity::Warning => warn!("{message}"),
        }
    }
}

pub struct ConvertOutcome {
    pub issue_count: usize,
    pub written: Option<PathBuf>,
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertOutcome> {
    let catalog = load_catalog(args.layouts.as_deref())?;
    let kit_type = catalog.lookup(&args.kit_type)?;

    let format = match args.format {
        Some(format) => format,
        None => detect_format(&args.input)?,
    };

    let mut kit_info = IndexKitInfo::default();
    let mut resource = ResourceSettings {
        kit_type: kit_type.name.clone(),
        ..ResourceSettings::default()
    };

    let table = load_table(&args.input, format, &mut kit_info, &mut resource)?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded index table"
    );

    let mut engine = RemapEngine::new(HeaderState::new(table), Box::new(TracingSink));
    for spec in &args.assign {
        apply_assignment(&mut engine, kit_type, spec)?;
    }

    apply_metadata_overrides(args, &mut kit_info, &mut resource);
    resource.override_cycles = merged_override_cycles(
        engine.override_cycles().clone(),
        args.override_cycles.as_deref(),
    )?;

    let table = engine.header().table();
    let mut issues = validate_table(table, kit_type);
    issues.extend(validate_kit_info(&kit_info));
    issues.extend(validate_resource_settings(&resource));
    issues.extend(
        collect_issues(table, kit_type)
            .iter()
            .map(ToString::to_string),
    );

    let sink = TracingSink;
    for message in &issues {
        sink.notify(message, Severity::Warning);
    }
    if !issues.is_empty() {
        return Ok(ConvertOutcome {
            issue_count: issues.len(),
            written: None,
        });
    }
    if args.dry_run {
        info!("dry run: table and settings are valid, nothing written");
        return Ok(ConvertOutcome {
            issue_count: 0,
            written: None,
        });
    }

    let user = args.user.clone().unwrap_or_default();
    let session = SessionInfo {
        ad_user: user.clone(),
        user,
        source_file: args.input.display().to_string(),
        timestamp: Local::now().format("%m/%d/%Y, %H:%M:%S").to_string(),
    };
    let record = export(table, kit_type, &session, &resource, &kit_info)?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.input.with_extension("json"));
    let json = serde_json::to_string_pretty(&record).context("serialize export record")?;
    std::fs::write(&out, json + "\n")
        .with_context(|| format!("write export: {}", out.display()))?;
    info!(path = %out.display(), "wrote index kit description");
    Ok(ConvertOutcome {
        issue_count: 0,
        written: Some(out),
    })
}

pub fn run_kit_types(args: &KitTypesArgs) -> Result<()> {
    let catalog = load_catalog(args.layouts.as_deref())?;
    let mut display = comfy_table::Table::new();
    display
        .load_preset(UTF8_FULL)
        .set_header(["Kit type", "Index set", "Fields"]);
    for kit in catalog.iter() {
        for set in &kit.index_sets {
            let fields = set.fields.join(", ");
            display.add_row([kit.name.as_str(), set.name.as_str(), fields.as_str()]);
        }
    }
    println!("{display}");
    Ok(())
}

fn load_catalog(layouts: Option<&Path>) -> Result<KitLayoutCatalog> {
    let catalog = match layouts {
        Some(path) => KitLayoutCatalog::load_path(path)?,
        None => KitLayoutCatalog::load_default()?,
    };
    Ok(catalog)
}

/// Explicit extension first, then content: a leading `[Section]` line marks
/// the vendor kit-definition format.
fn detect_format(path: &Path) -> Result<SourceFormatArg> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if extension == "xlsx" || extension == "xls" {
        return Ok(SourceFormatArg::Spreadsheet);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read input: {}", path.display()))?;
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    if first_line.trim().starts_with('[') {
        Ok(SourceFormatArg::Illumina)
    } else {
        Ok(SourceFormatArg::Delimited)
    }
}

fn load_table(
    input: &Path,
    format: SourceFormatArg,
    kit_info: &mut IndexKitInfo,
    resource: &mut ResourceSettings,
) -> Result<Table> {
    let table = match format {
        SourceFormatArg::Delimited => read_delimited(input)?.into_table()?,
        SourceFormatArg::Spreadsheet => read_spreadsheet(input)?.into_table()?,
        SourceFormatArg::Illumina => {
            let kit = IlluminaIndexKit::parse_path(input)?;
            *kit_info = kit.kit_info();
            let resources = kit.resource_map();
            for key in ["adapter", "adapter_read1"] {
                if let Some(value) = resources.get(key) {
                    resource.adapter_read1 = value.clone();
                }
            }
            if let Some(value) = resources.get("adapter_read2") {
                resource.adapter_read2 = value.clone();
            }
            kit.to_table()?
        }
    };
    Ok(table)
}

fn apply_assignment(
    engine: &mut RemapEngine,
    kit_type: &KitType,
    spec: &str,
) -> Result<()> {
    let Some((field, column_spec)) = spec.split_once('=') else {
        bail!("invalid --assign '{spec}': expected FIELD=COLUMN");
    };
    let column = resolve_column(engine.header().table(), column_spec.trim())?;
    match engine.apply_field_to_column(kit_type, column, field.trim())? {
        RemapOutcome::AppliedWithCycles { cycle_length, .. } => {
            info!(field, column, cycle_length, "mapped sequence column");
        }
        RemapOutcome::Applied { .. } | RemapOutcome::Unchanged => {
            info!(field, column, "mapped column");
        }
        // The engine already surfaced the diagnostic and reverted.
        RemapOutcome::Reverted { .. } => {}
    }
    Ok(())
}

/// A column reference is a 0-based index or a current column label.
fn resolve_column(table: &Table, spec: &str) -> Result<usize> {
    if let Ok(index) = spec.parse::<usize>() {
        if index >= table.column_count() {
            bail!(
                "column index {index} out of range: table has {} columns",
                table.column_count()
            );
        }
        return Ok(index);
    }
    match table.column_index(spec) {
        Some(index) => Ok(index),
        None => bail!(
            "no column labeled '{spec}' (current labels: {})",
            table.columns().join(", ")
        ),
    }
}

fn apply_metadata_overrides(
    args: &ConvertArgs,
    kit_info: &mut IndexKitInfo,
    resource: &mut ResourceSettings,
) {
    if let Some(name) = &args.name {
        kit_info.name = name.clone();
    }
    if let Some(display_name) = &args.display_name {
        kit_info.display_name = display_name.clone();
    }
    if let Some(version) = &args.kit_version {
        kit_info.version = version.clone();
    }
    if let Some(description) = &args.description {
        kit_info.description = description.clone();
    }
    if let Some(adapter) = &args.adapter_read1 {
        resource.adapter_read1 = adapter.clone();
    }
    if let Some(adapter) = &args.adapter_read2 {
        resource.adapter_read2 = adapter.clone();
    }
}

/// Merge the engine-derived index slots with the `--override-cycles` flag.
/// Non-empty flag parts win; empty parts keep the derived value.
fn merged_override_cycles(
    derived: OverrideCycles,
    flag: Option<&str>,
) -> Result<OverrideCycles> {
    let Some(flag) = flag else {
        return Ok(derived);
    };
    let parts: Vec<&str> = flag.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        bail!("invalid --override-cycles '{flag}': expected four comma-separated slots (R1,I1,I2,R2)");
    }
    let mut cycles = derived;
    for (slot, part) in [
        CycleSlot::Read1,
        CycleSlot::Index1,
        CycleSlot::Index2,
        CycleSlot::Read2,
    ]
    .into_iter()
    .zip(parts)
    {
        if !part.is_empty() {
            cycles.set(slot, part.to_string());
        }
    }
    Ok(cycles)
}

/// Domain validation over the reconciled table, accumulated so the user
/// sees the complete picture in one pass.
fn validate_table(table: &Table, kit_type: &KitType) -> Vec<String> {
    let mut issues = Vec::new();
    for set in &kit_type.index_sets {
        let columns: Vec<Vec<Option<&str>>> = set
            .fields
            .iter()
            .filter_map(|field| table.column_by_label(field))
            .collect();
        // Missing labels are reported by the export precondition.
        if columns.len() == set.fields.len() && !non_empty(&columns) {
            issues.push(format!(
                "Empty values in the index table for {}",
                set.name
            ));
        }
        for field in [SEQUENCE_FIELD_I7, SEQUENCE_FIELD_I5] {
            if !set.fields.iter().any(|f| f == field) {
                continue;
            }
            let Some(values) = table.column_by_label(field) else {
                continue;
            };
            match valid_alphabet(field, &values) {
                Err(diagnostic) => issues.push(diagnostic.to_string()),
                Ok(()) => {
                    if !uniform_length(&values) {
                        issues.push(format!(
                            "{field} column contains indexes of different lengths"
                        ));
                    }
                }
            }
            if let Err(diagnostic) = unique_with_rows(field, &values) {
                issues.push(diagnostic.to_string());
            }
        }
    }
    issues
}
