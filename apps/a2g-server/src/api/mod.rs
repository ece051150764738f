pub mod debug;
pub mod launches;
pub mod meta;
pub mod observability;
pub mod releases;

/// Loose numeric query parameter: absent, blank or unparseable values fall
/// back to `default`.
pub(crate) fn loose_u32(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}
