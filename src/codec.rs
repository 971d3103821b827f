use crate::error::{HillError, Result};
use crate::scheme::Scheme;

/// Lazy iterator over the residue blocks of a text.
///
/// Each item is one block of `block_size` residues; the final block is
/// filled with the scheme's pad symbol. Cloning the iterator restarts it
/// from the clone's position without re-reading the text.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    scheme: &'a Scheme,
    symbols: Vec<char>,
    block_size: usize,
    pad: char,
    next_index: usize,
}

impl Blocks<'_> {
    /// Number of blocks the text produces, padding included
    pub fn block_count(&self) -> usize {
        self.symbols.len().div_ceil(self.block_size)
    }

    /// Encode the block at `index`
    pub fn block(&self, index: usize) -> Result<Vec<i64>> {
        let start = index * self.block_size;
        if start >= self.symbols.len() {
            return Err(HillError::EmptyBlock(index));
        }
        let end = (start + self.block_size).min(self.symbols.len());

        let mut residues = Vec::with_capacity(self.block_size);
        for &symbol in &self.symbols[start..end] {
            let residue = self
                .scheme
                .index_of(symbol)
                .ok_or(HillError::UnknownSymbol(symbol))?;
            residues.push(residue as i64);
        }
        if residues.len() < self.block_size {
            let pad = self
                .scheme
                .index_of(self.pad)
                .ok_or(HillError::UnknownSymbol(self.pad))?;
            residues.resize(self.block_size, pad as i64);
        }
        Ok(residues)
    }
}

impl Iterator for Blocks<'_> {
    type Item = Result<Vec<i64>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.block_count() {
            return None;
        }
        let block = self.block(self.next_index);
        // Stop after the first failure
        self.next_index = if block.is_ok() {
            self.next_index + 1
        } else {
            self.block_count()
        };
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.block_count().saturating_sub(self.next_index);
        (0, Some(remaining))
    }
}

/// Split `text` into residue blocks of `block_size` symbols
pub fn to_blocks<'a>(text: &str, scheme: &'a Scheme, block_size: usize) -> Result<Blocks<'a>> {
    if block_size == 0 {
        return Err(HillError::InvalidBlockSize(block_size));
    }
    let pad = scheme.pad_symbol().ok_or(HillError::EmptyScheme)?;
    Ok(Blocks {
        scheme,
        symbols: text.chars().collect(),
        block_size,
        pad,
        next_index: 0,
    })
}

/// Map residue blocks back to symbols
pub fn from_blocks<I, B>(blocks: I, scheme: &Scheme) -> Result<String>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[i64]>,
{
    let mut text = String::new();
    for block in blocks {
        for &residue in block.as_ref() {
            let symbol = scheme
                .symbol_at(residue)
                .ok_or(HillError::UnmappableResidue {
                    residue,
                    modulus: scheme.len(),
                })?;
            text.push(symbol);
        }
    }
    Ok(text)
}

/// `text` extended with pad symbols to a whole number of blocks
pub fn pad(text: &str, scheme: &Scheme, block_size: usize) -> Result<String> {
    if block_size == 0 {
        return Err(HillError::InvalidBlockSize(block_size));
    }
    let pad = scheme.pad_symbol().ok_or(HillError::EmptyScheme)?;
    let len = text.chars().count();
    let padded_len = len.div_ceil(block_size) * block_size;
    let mut padded = String::with_capacity(text.len() + (padded_len - len) * pad.len_utf8());
    padded.push_str(text);
    padded.extend(std::iter::repeat(pad).take(padded_len - len));
    Ok(padded)
}
