use crate::error::{HillError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Alphabet of the cipher: an ordered list of unique symbols.
///
/// A symbol's residue is its position in the list, so the mapping is a
/// bijection between the symbols and `0..len()`. The length is the modulus
/// used by all of the cipher's arithmetic. The last symbol doubles as the
/// pad symbol for incomplete blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheme {
    symbols: Vec<char>,
    residues: HashMap<char, usize>,
}

impl Scheme {
    /// Build a scheme from symbols in residue order
    pub fn new<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut scheme = Self::default();
        for symbol in symbols {
            scheme.add(symbol)?;
        }
        Ok(scheme)
    }

    /// The classic 26-letter alphabet, A=0 through Z=25
    pub fn latin_uppercase() -> Self {
        let symbols: Vec<char> = ('A'..='Z').collect();
        let residues = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, residues }
    }

    /// Append a symbol with the next free residue
    pub fn add(&mut self, symbol: char) -> Result<usize> {
        if self.residues.contains_key(&symbol) {
            return Err(HillError::DuplicateSymbol(symbol));
        }
        let residue = self.symbols.len();
        self.symbols.push(symbol);
        self.residues.insert(symbol, residue);
        Ok(residue)
    }

    /// Remove a symbol. Every symbol after it moves down one residue.
    pub fn remove(&mut self, symbol: char) -> Result<()> {
        let position = self
            .residues
            .remove(&symbol)
            .ok_or(HillError::UnknownSymbol(symbol))?;
        self.symbols.remove(position);
        for (residue, s) in self.symbols.iter().enumerate().skip(position) {
            self.residues.insert(*s, residue);
        }
        Ok(())
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.residues.get(&symbol).copied()
    }

    /// Symbol for a residue; `None` outside `0..len()`
    pub fn symbol_at(&self, residue: i64) -> Option<char> {
        usize::try_from(residue)
            .ok()
            .and_then(|r| self.symbols.get(r))
            .copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.residues.contains_key(&symbol)
    }

    /// Symbol used to fill the final block of a message
    pub fn pad_symbol(&self) -> Option<char> {
        self.symbols.last().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Modulus for residue arithmetic
    pub fn modulus(&self) -> i64 {
        self.symbols.len() as i64
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Scheme {
    type Err = HillError;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.chars())
    }
}

impl Serialize for Scheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_uppercase_residues() {
        let scheme = Scheme::latin_uppercase();
        assert_eq!(scheme.len(), 26);
        assert_eq!(scheme.index_of('A'), Some(0));
        assert_eq!(scheme.index_of('Z'), Some(25));
        assert_eq!(scheme.symbol_at(6), Some('G'));
        assert_eq!(scheme.pad_symbol(), Some('Z'));
        assert_eq!(scheme, "ABCDEFGHIJKLMNOPQRSTUVWXYZ".parse().unwrap());
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut scheme: Scheme = "AB".parse().unwrap();
        assert_eq!(scheme.add('C').unwrap(), 2);
        assert!(matches!(scheme.add('A'), Err(HillError::DuplicateSymbol('A'))));
        assert_eq!(scheme.len(), 3);
    }

    #[test]
    fn test_from_str_rejects_duplicates() {
        assert!(matches!(
            "ABCA".parse::<Scheme>(),
            Err(HillError::DuplicateSymbol('A'))
        ));
    }

    #[test]
    fn test_remove_shifts_later_residues() {
        let mut scheme: Scheme = "ABCD".parse().unwrap();
        scheme.remove('B').unwrap();
        assert_eq!(scheme.to_string(), "ACD");
        assert_eq!(scheme.index_of('C'), Some(1));
        assert_eq!(scheme.index_of('D'), Some(2));
        assert_eq!(scheme.index_of('B'), None);
        for (i, &symbol) in scheme.symbols().iter().enumerate() {
            assert_eq!(scheme.index_of(symbol), Some(i));
        }
    }

    #[test]
    fn test_remove_unknown() {
        let mut scheme: Scheme = "AB".parse().unwrap();
        assert!(matches!(scheme.remove('Q'), Err(HillError::UnknownSymbol('Q'))));
    }

    #[test]
    fn test_symbol_at_out_of_range() {
        let scheme: Scheme = "AB".parse().unwrap();
        assert_eq!(scheme.symbol_at(-1), None);
        assert_eq!(scheme.symbol_at(2), None);
    }

    #[test]
    fn test_empty_scheme_has_no_pad() {
        let scheme = Scheme::default();
        assert!(scheme.is_empty());
        assert_eq!(scheme.pad_symbol(), None);
    }

    #[test]
    fn test_serde_as_string() {
        let scheme: Scheme = "XYZ.".parse().unwrap();
        let json = serde_json::to_string(&scheme).unwrap();
        assert_eq!(json, "\"XYZ.\"");
        let back: Scheme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scheme);
        assert!(serde_json::from_str::<Scheme>("\"AA\"").is_err());
    }
}
