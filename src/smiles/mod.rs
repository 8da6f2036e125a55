//! # SMILES Module
//!
//! Parsing, sanitization and canonical writing of SMILES strings, the
//! chemical identity key of every perturbation in a prepared dataset.
//!
//! A string is considered **valid** when it parses, every atom satisfies an
//! allowed valence, and every aromatic system has a Kekulé structure. Valid
//! strings are rewritten into a canonical form so that different spellings of
//! the same molecule (`OCC` / `CCO`, `C1=CC=CC=C1` / `c1ccccc1`) group
//! together.
//!
//! ## Example
//!
//! ```rust
//! use chemprep::smiles;
//!
//! assert_eq!(smiles::canonicalize("OCC")?, "CCO");
//! assert_eq!(smiles::canonicalize("C1=CC=CC=C1")?, "c1ccccc1");
//! assert!(!smiles::is_valid("restricted"));
//! # Ok::<(), chemprep::smiles::SmilesError>(())
//! ```
//!
//! The canonical form carries connectivity, formal charges, isotopes and
//! hydrogen counts. Stereochemistry is parsed but not written.

mod canonical;
mod element;
mod error;
mod molecule;
mod parser;
mod sanitize;

#[cfg(test)]
mod tests;

pub use error::SmilesError;
pub use molecule::{Atom, Bond, BondOrder, Molecule};

/// Largest molecule accepted by [`parse`]; small-molecule perturbagens stay far below it
pub const MAX_ATOMS: usize = 2_000;

/// Parse and sanitize a SMILES string.
pub fn parse(smiles: &str) -> Result<Molecule, SmilesError> {
    let mut mol = parser::parse_smiles(smiles)?;
    sanitize::sanitize(&mut mol)?;
    Ok(mol)
}

/// Canonical SMILES for a string, or the reason it is invalid.
pub fn canonicalize(smiles: &str) -> Result<String, SmilesError> {
    Ok(parse(smiles)?.to_canonical_smiles())
}

/// Whether a string parses and survives sanitization.
pub fn is_valid(smiles: &str) -> bool {
    parse(smiles).is_ok()
}
