/// Bytes reserved at the front of every on-disk page for its page id.
pub const PAGE_HEADER_BYTES: usize = 8;

/// Byte width of a single attribute value (fixed-width signed 32-bit ints).
pub const ATTR_BYTES: usize = 4;

/// Maximum length, in bytes, of a table name (matches the reference's
/// `char name[10]`, i.e. up to 9 printable bytes plus a nul terminator).
pub const MAX_TABLE_NAME_BYTES: usize = 9;

// Config
pub const CONFIG_ENV_PREFIX: &str = "RELCORE";
pub const DEFAULT_CONFIG_FILE: &str = "Config.toml";

// Error messages
pub const EMPTY_SLOT_INVARIANT_MSG: &str = "slot is empty";
