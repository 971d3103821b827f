use crate::codec;
use crate::error::{HillError, Result};
use crate::key::KeyMatrix;
use crate::matrix::{self, Matrix};
use crate::scheme::Scheme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Everything the cipher needs: alphabet, block size and (optionally) a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub scheme: Scheme,
    pub block_size: usize,
    pub key: Option<String>,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::latin_uppercase(),
            block_size: 3,
            key: None,
        }
    }
}

impl CipherConfig {
    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Check the whole configuration and build the key matrix if a key is present
    pub fn validate(&self) -> Result<Option<KeyMatrix>> {
        if self.block_size == 0 || self.block_size > crate::MAX_BLOCK_SIZE {
            return Err(HillError::InvalidBlockSize(self.block_size));
        }
        self.key
            .as_deref()
            .map(|key| KeyMatrix::build(key, &self.scheme, self.block_size))
            .transpose()
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Hill cipher engine.
///
/// Holds a configuration that is always fully validated. Every mutator
/// validates a candidate configuration first and only replaces the current
/// one on success, so a rejected change leaves the engine exactly as it was.
#[derive(Debug, Clone)]
pub struct HillCipher {
    config: CipherConfig,
    key: Option<KeyMatrix>,
}

impl Default for HillCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl HillCipher {
    /// Engine with the default configuration and no key
    pub fn new() -> Self {
        Self {
            config: CipherConfig::default(),
            key: None,
        }
    }

    pub fn from_config(config: CipherConfig) -> Result<Self> {
        let key = config.validate()?;
        Ok(Self { config, key })
    }

    pub fn builder() -> HillCipherBuilder {
        HillCipherBuilder::default()
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    pub fn scheme(&self) -> &Scheme {
        &self.config.scheme
    }

    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    pub fn key(&self) -> Option<&str> {
        self.config.key.as_deref()
    }

    pub fn key_matrix(&self) -> Option<&KeyMatrix> {
        self.key.as_ref()
    }

    pub fn set_scheme(&mut self, scheme: Scheme) -> Result<()> {
        let candidate = CipherConfig {
            scheme,
            ..self.config.clone()
        };
        self.replace(candidate)
    }

    pub fn set_block_size(&mut self, block_size: usize) -> Result<()> {
        let candidate = CipherConfig {
            block_size,
            ..self.config.clone()
        };
        self.replace(candidate)
    }

    pub fn set_key(&mut self, key: &str) -> Result<()> {
        let candidate = CipherConfig {
            key: Some(key.to_string()),
            ..self.config.clone()
        };
        self.replace(candidate)
    }

    pub fn clear_key(&mut self) {
        self.config.key = None;
        self.key = None;
    }

    pub fn add_symbol(&mut self, symbol: char) -> Result<()> {
        let mut candidate = self.config.clone();
        candidate.scheme.add(symbol)?;
        self.replace(candidate)
    }

    pub fn remove_symbol(&mut self, symbol: char) -> Result<()> {
        let mut candidate = self.config.clone();
        candidate.scheme.remove(symbol)?;
        self.replace(candidate)
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        self.transform(plaintext, Direction::Encrypt)
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        self.transform(ciphertext, Direction::Decrypt)
    }

    fn transform(&self, text: &str, direction: Direction) -> Result<String> {
        let scheme = &self.config.scheme;
        if scheme.is_empty() {
            return Err(HillError::EmptyScheme);
        }
        let key = self.key.as_ref().ok_or(HillError::MissingKey)?;
        let transform: &Matrix = match direction {
            Direction::Encrypt => key.matrix(),
            Direction::Decrypt => key.inverse(),
        };
        let modulus = scheme.modulus();

        let blocks = codec::to_blocks(text, scheme, self.config.block_size)?;
        let count = blocks.block_count();
        let transformed = blocks
            .map(|block| {
                let product = matrix::multiply(transform, &block?)?;
                Ok(matrix::normalize(&product, modulus))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(?direction, blocks = count, "transformed text");
        codec::from_blocks(&transformed, scheme)
    }

    fn replace(&mut self, candidate: CipherConfig) -> Result<()> {
        match candidate.validate() {
            Ok(key) => {
                self.config = candidate;
                self.key = key;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "configuration change rejected");
                Err(e)
            }
        }
    }
}

/// Assembles a [`HillCipher`], validating everything at once in [`Self::build`]
#[derive(Debug, Clone, Default)]
pub struct HillCipherBuilder {
    config: CipherConfig,
}

impl HillCipherBuilder {
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.config.scheme = scheme;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<HillCipher> {
        HillCipher::from_config(self.config)
    }
}
