//! Embedded kit-layout catalog.
//!
//! The default catalog is embedded at compile time with `include_str!()`,
//! eliminating runtime path resolution for the common case. An explicit
//! path or the `IKD_KIT_LAYOUTS` environment variable overrides it.

/// Default kit-type layouts shipped with the tool.
pub const DEFAULT_KIT_LAYOUTS: &str = include_str!("../layouts/kit_types.json");
