use thiserror::Error;

/// Broad category of a [`HillError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Engine is not configured well enough to run (no key, no scheme, bad block size)
    Configuration,
    /// Caller supplied input that violates a precondition
    Validation,
    /// Internal invariant broken during modular arithmetic
    Arithmetic,
}

#[derive(Error, Debug)]
pub enum HillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No key has been set for encryption yet")]
    MissingKey,

    #[error("Scheme is empty: at least one symbol is required")]
    EmptyScheme,

    #[error("Invalid block size: {0}. Must be between 1 and {max}", max = crate::MAX_BLOCK_SIZE)]
    InvalidBlockSize(usize),

    #[error("Invalid key length: {actual} symbols cannot fill a {block_size}x{block_size} matrix (expected {expected})")]
    InvalidKeyLength {
        actual: usize,
        expected: usize,
        block_size: usize,
    },

    #[error("Key symbol {0:?} is not declared in the scheme")]
    UnknownSymbolInKey(char),

    #[error("Key matrix is not invertible: determinant is 0")]
    NonInvertibleKey,

    #[error("Matrix is not invertible modulo {modulus}: determinant {determinant} shares a factor with it")]
    NotInvertibleModulo { determinant: i128, modulus: i64 },

    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquareMatrix { rows: usize, cols: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Matrix is not invertible")]
    NotInvertible,

    #[error("Symbol {0:?} already exists in the scheme")]
    DuplicateSymbol(char),

    #[error("Symbol {0:?} does not exist in the scheme")]
    UnknownSymbol(char),

    #[error("Block {0} has no characters to encode")]
    EmptyBlock(usize),

    #[error("Residue {residue} has no symbol in a scheme of {modulus} symbols")]
    UnmappableResidue { residue: i64, modulus: usize },

    #[error("Integer overflow in matrix arithmetic")]
    Overflow,
}

impl HillError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HillError::Io(_)
            | HillError::Json(_)
            | HillError::MissingKey
            | HillError::EmptyScheme
            | HillError::InvalidBlockSize(_) => ErrorKind::Configuration,
            HillError::UnmappableResidue { .. } | HillError::Overflow => ErrorKind::Arithmetic,
            HillError::InvalidKeyLength { .. }
            | HillError::UnknownSymbolInKey(_)
            | HillError::NonInvertibleKey
            | HillError::NotInvertibleModulo { .. }
            | HillError::NotSquareMatrix { .. }
            | HillError::DimensionMismatch { .. }
            | HillError::NotInvertible
            | HillError::DuplicateSymbol(_)
            | HillError::UnknownSymbol(_)
            | HillError::EmptyBlock(_) => ErrorKind::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, HillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(HillError::MissingKey.kind(), ErrorKind::Configuration);
        assert_eq!(HillError::InvalidBlockSize(0).kind(), ErrorKind::Configuration);
        assert_eq!(HillError::NonInvertibleKey.kind(), ErrorKind::Validation);
        assert_eq!(HillError::UnknownSymbol('?').kind(), ErrorKind::Validation);
        assert_eq!(
            HillError::UnmappableResidue { residue: 30, modulus: 26 }.kind(),
            ErrorKind::Arithmetic
        );
    }

    #[test]
    fn test_messages_name_the_violation() {
        let err = HillError::InvalidKeyLength {
            actual: 5,
            expected: 9,
            block_size: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid key length: 5 symbols cannot fill a 3x3 matrix (expected 9)"
        );
        assert!(HillError::InvalidBlockSize(0).to_string().contains("between 1 and"));
    }
}
