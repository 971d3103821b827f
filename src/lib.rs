//! Hill cipher engine
//!
//! Encrypts text over a configurable alphabet ("scheme") by splitting it into
//! blocks of `b` symbols and multiplying each block, as a vector of residues,
//! by a `b` x `b` key matrix modulo the alphabet size. Decryption multiplies
//! by the key matrix's inverse modulo the same size.
//!
//! ```text
//! text → to_blocks → K · v mod m → from_blocks → text
//! ```
//!
//! - **Scheme**: ordered alphabet, symbol ↔ residue bijection
//! - **Key matrix**: key string filled row by row into a `b` x `b` matrix,
//!   accepted only if its determinant is invertible modulo `m`
//! - **Block codec**: fixed-size blocks, final block padded with the last
//!   scheme symbol
//! - **Matrix kernel**: cofactor determinant, Gauss–Jordan inverse, modular
//!   inverse
//!
//! The Hill cipher is a classical, linear cipher. It offers no security
//! against known-plaintext attacks and must not protect real data.
//!
//! ## Example
//!
//! ```
//! use hillcipher::HillCipher;
//!
//! let cipher = HillCipher::builder()
//!     .block_size(3)
//!     .key("GYBNQKURP")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(cipher.encrypt("ACT").unwrap(), "POH");
//! assert_eq!(cipher.decrypt("POH").unwrap(), "ACT");
//! ```

pub mod cli;
pub mod codec;
pub mod engine;
pub mod error;
pub mod key;
pub mod matrix;
pub mod scheme;

pub use engine::{CipherConfig, HillCipher, HillCipherBuilder};
pub use error::{ErrorKind, HillError, Result};
pub use key::KeyMatrix;
pub use matrix::Matrix;
pub use scheme::Scheme;

/// Largest accepted block size. Determinants are computed by cofactor
/// expansion, which grows factorially with the block size.
pub const MAX_BLOCK_SIZE: usize = 6;
