/// Longest body line accepted before the validator emits a warning.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

/// Case-insensitive markers that flag unfinished rule text.
pub const PLACEHOLDER_MARKERS: &[&str] = &[
    "todo:",
    "fixme",
    "tbd",
    "lorem ipsum",
    "<placeholder>",
    "fill me in",
    "add description here",
    "{{",
];

/// Manifest written next to installed rules; drives uninstall.
pub const MANIFEST_FILE: &str = ".rulekit-manifest.json";

/// Generated catalog index, relative to the catalog root.
pub const INDEX_SUBPATH: &str = ".rulekit/index.json";

pub const MANIFEST_SCHEMA_VERSION: u32 = 1;
pub const INDEX_SCHEMA_VERSION: u32 = 1;
