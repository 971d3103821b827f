use crate::cli::options::CipherOptions;
use crate::error::Result;
use tracing::info;

/// Encrypt `plaintext` with the cipher described by `options`
pub fn encrypt_text(plaintext: &str, options: &CipherOptions) -> Result<String> {
    let cipher = options.cipher()?;
    let ciphertext = cipher.encrypt(plaintext)?;
    info!(
        symbols = plaintext.chars().count(),
        block_size = cipher.block_size(),
        "encrypted"
    );
    Ok(ciphertext)
}

/// Decrypt `ciphertext` with the cipher described by `options`.
/// The result keeps any padding added during encryption.
pub fn decrypt_text(ciphertext: &str, options: &CipherOptions) -> Result<String> {
    let cipher = options.cipher()?;
    let plaintext = cipher.decrypt(ciphertext)?;
    info!(
        symbols = ciphertext.chars().count(),
        block_size = cipher.block_size(),
        "decrypted"
    );
    Ok(plaintext)
}
