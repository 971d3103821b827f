use crate::error::{HillError, Result};
use crate::matrix::{self, Matrix};
use crate::scheme::Scheme;
use sha3::{Digest, Sha3_256};
use tracing::debug;

/// A validated cipher key and the matrices derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatrix {
    key: String,
    matrix: Matrix,
    determinant: i128,
    inverse: Matrix,
}

impl KeyMatrix {
    /// Validate `key` against the scheme and block size and build its matrix.
    ///
    /// The key fills a `block_size` x `block_size` matrix row by row with the
    /// residues of its symbols. It is rejected unless that matrix has a
    /// non-zero determinant that is also invertible modulo the scheme size,
    /// so every accepted key decrypts what it encrypts.
    pub fn build(key: &str, scheme: &Scheme, block_size: usize) -> Result<Self> {
        if scheme.is_empty() {
            return Err(HillError::EmptyScheme);
        }
        if block_size == 0 || block_size > crate::MAX_BLOCK_SIZE {
            return Err(HillError::InvalidBlockSize(block_size));
        }

        let symbols: Vec<char> = key.chars().collect();
        let expected = block_size * block_size;
        if symbols.len() != expected {
            return Err(HillError::InvalidKeyLength {
                actual: symbols.len(),
                expected,
                block_size,
            });
        }

        let mut key_matrix = Matrix::new(block_size, block_size);
        for (i, &symbol) in symbols.iter().enumerate() {
            let residue = scheme
                .index_of(symbol)
                .ok_or(HillError::UnknownSymbolInKey(symbol))?;
            key_matrix.set(i / block_size, i % block_size, residue as i64);
        }

        let determinant = matrix::determinant(&key_matrix)?;
        if determinant == 0 {
            return Err(HillError::NonInvertibleKey);
        }
        let modulus = scheme.modulus();
        let residue = determinant.rem_euclid(modulus as i128) as i64;
        if matrix::gcd(residue, modulus) != 1 {
            return Err(HillError::NotInvertibleModulo {
                determinant,
                modulus,
            });
        }
        let inverse = matrix::modular_inverse(&key_matrix, modulus)?;

        debug!(
            block_size,
            determinant,
            modulus,
            "key matrix accepted"
        );

        Ok(Self {
            key: key.to_string(),
            matrix: key_matrix,
            determinant,
            inverse,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encryption matrix
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Integer determinant of the encryption matrix
    pub fn determinant(&self) -> i128 {
        self.determinant
    }

    /// Decryption matrix, the inverse of [`Self::matrix`] modulo the scheme size
    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    pub fn block_size(&self) -> usize {
        self.matrix.rows()
    }

    /// Short SHA3-256 fingerprint of the key, safe to print
    pub fn fingerprint(&self) -> String {
        let digest = Sha3_256::new()
            .chain_update(b"hill_key_fingerprint_v1")
            .chain_update(self.key.as_bytes())
            .finalize();
        hex::encode(&digest[..8])
    }
}
