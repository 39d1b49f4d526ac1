use crate::common::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILE};
use crate::common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tunables the buffer pool and join planner are sized against. See
/// `spec.md` §6 ("Configuration inputs") for the invariants each field must
/// satisfy; those invariants are checked by [`Config::validate`], not
/// deferred to first use.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes per on-disk page, header included.
    pub page_size: usize,
    /// Page buffer capacity (`B` in spec.md's cost formulas).
    pub buf_slots: usize,
    /// File buffer (open file descriptor cache) capacity.
    pub file_limit: usize,
    /// Directory holding one file per table, named by oid.
    pub database_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: 4096,
            buf_slots: 16,
            file_limit: 8,
            database_root: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Loads configuration layered compiled-in defaults → an optional
    /// `Config.toml`/`Config.json` file in the current directory →
    /// `RELCORE_*` environment variables, matching the `config` crate's
    /// usual builder idiom.
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Same as [`Config::load`] but with an explicit config-file path,
    /// useful for tests that want an isolated configuration.
    pub fn load_from(path: &Path) -> Result<Config> {
        let defaults = Config::default();
        let builder = config::Config::builder()
            .set_default("page_size", defaults.page_size as i64)
            .map_err(config_err)?
            .set_default("buf_slots", defaults.buf_slots as i64)
            .map_err(config_err)?
            .set_default("file_limit", defaults.file_limit as i64)
            .map_err(config_err)?
            .set_default(
                "database_root",
                defaults.database_root.to_string_lossy().into_owned(),
            )
            .map_err(config_err)?
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(CONFIG_ENV_PREFIX));

        let raw = builder.build().map_err(config_err)?;
        let cfg: Config = raw.try_deserialize().map_err(config_err)?;
        Ok(cfg)
    }

    /// Builds a config directly, bypassing file/env layering entirely; used
    /// by tests that only care about the engine, not configuration sourcing.
    pub fn new(page_size: usize, buf_slots: usize, file_limit: usize, database_root: PathBuf) -> Config {
        Config {
            page_size,
            buf_slots,
            file_limit,
            database_root,
        }
    }

    /// Validates the loaded configuration against the widest known table's
    /// attribute count (`spec.md` §6: `page_size` must exceed
    /// `8 + 4 * max_nattrs`).
    pub fn validate(&self, max_nattrs: u32) -> Result<()> {
        if self.buf_slots == 0 {
            return Err(Error::InvalidConfig("buf_slots must be at least 1".into()));
        }
        if self.file_limit == 0 {
            return Err(Error::InvalidConfig("file_limit must be at least 1".into()));
        }
        let min_page_size = 8 + 4 * max_nattrs as usize;
        if self.page_size <= min_page_size {
            return Err(Error::InvalidConfig(format!(
                "page_size {} must exceed 8 + 4 * max_nattrs ({})",
                self.page_size, min_page_size
            )));
        }
        Ok(())
    }
}

fn config_err(err: config::ConfigError) -> Error {
    Error::InvalidConfig(err.to_string())
}
