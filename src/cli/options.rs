use crate::engine::{CipherConfig, HillCipher};
use crate::error::Result;
use std::path::PathBuf;

/// Cipher settings collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CipherOptions {
    /// JSON configuration file; explicit options below override its values
    pub config: Option<PathBuf>,
    pub scheme: Option<String>,
    pub block_size: Option<usize>,
    pub key: Option<String>,
}

impl CipherOptions {
    /// Merge the file (if any) with explicit options into one configuration
    pub fn resolve(&self) -> Result<CipherConfig> {
        let mut config = match &self.config {
            Some(path) => CipherConfig::load(path)?,
            None => CipherConfig::default(),
        };
        if let Some(scheme) = &self.scheme {
            config.scheme = scheme.parse()?;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(key) = &self.key {
            config.key = Some(key.clone());
        }
        Ok(config)
    }

    pub fn cipher(&self) -> Result<HillCipher> {
        HillCipher::from_config(self.resolve()?)
    }
}
