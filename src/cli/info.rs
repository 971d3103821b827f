use crate::cli::options::CipherOptions;
use crate::error::Result;
use crate::matrix::Matrix;

/// Describe the resolved cipher configuration
pub fn show_info(options: &CipherOptions) -> Result<String> {
    let cipher = options.cipher()?;
    let scheme = cipher.scheme();

    let mut output = String::new();

    output.push_str("Hill Cipher Configuration\n");
    output.push_str("=========================\n\n");

    output.push_str("Scheme:\n");
    output.push_str(&format!("  Symbols: {}\n", scheme));
    output.push_str(&format!("  Modulus: {}\n", scheme.modulus()));
    match scheme.pad_symbol() {
        Some(pad) => output.push_str(&format!("  Pad symbol: {:?}\n", pad)),
        None => output.push_str("  Pad symbol: (none)\n"),
    }
    output.push('\n');

    output.push_str(&format!("Block size: {}\n\n", cipher.block_size()));

    match cipher.key_matrix() {
        Some(key) => {
            output.push_str("Key:\n");
            output.push_str(&format!("  Fingerprint: {}\n", key.fingerprint()));
            output.push_str(&format!("  Determinant: {}\n", key.determinant()));
            output.push_str(&format!(
                "  Determinant mod {}: {}\n",
                scheme.modulus(),
                key.determinant().rem_euclid(scheme.modulus() as i128)
            ));
            output.push_str("  Matrix:\n");
            output.push_str(&indent(key.matrix()));
            output.push_str(&format!("  Inverse (mod {}):\n", scheme.modulus()));
            output.push_str(&indent(key.inverse()));
        }
        None => output.push_str("Key: not set\n"),
    }

    Ok(output)
}

fn indent(matrix: &Matrix) -> String {
    matrix
        .to_string()
        .lines()
        .map(|line| format!("    {}\n", line))
        .collect()
}
