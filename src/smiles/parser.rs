//! Streaming SMILES tokenizer that builds the molecular graph.
//!
//! Stereochemistry (`@`, `/`, `\`) and atom classes are accepted but not
//! retained; the graph carries connectivity, charges, isotopes and hydrogens.

use std::collections::BTreeMap;

use super::element;
use super::molecule::{Atom, BondOrder, Molecule};
use super::{SmilesError, MAX_ATOMS};

/// Chirality classes that may follow a single `@`
const CHIRAL_CLASSES: [&str; 5] = ["TH", "AL", "SP", "TB", "OH"];

struct RingOpening {
    atom: usize,
    bond: Option<BondOrder>,
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    mol: Molecule,
    prev: Option<usize>,
    pending: Option<(BondOrder, usize)>,
    branches: Vec<usize>,
    rings: BTreeMap<u16, RingOpening>,
}

/// Parse a SMILES string into an unsanitized molecular graph.
///
/// Parsing stops at the first whitespace character; anything after it is
/// treated as a title.
pub(crate) fn parse_smiles(input: &str) -> Result<Molecule, SmilesError> {
    let input = input.trim();
    let mut parser = Parser {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        mol: Molecule::new(),
        prev: None,
        pending: None,
        branches: Vec::new(),
        rings: BTreeMap::new(),
    };
    parser.run()?;
    Ok(parser.mol)
}

impl<'a> Parser<'a> {
    fn run(&mut self) -> Result<(), SmilesError> {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\r' | b'\n' => break,
                b'(' => {
                    if self.prev.is_none() {
                        return Err(self.unexpected());
                    }
                    if let Some((_, pos)) = self.pending {
                        return Err(SmilesError::DanglingBond(pos));
                    }
                    self.branches.extend(self.prev);
                    self.pos += 1;
                }
                b')' => {
                    if let Some((_, pos)) = self.pending {
                        return Err(SmilesError::DanglingBond(pos));
                    }
                    let root = self
                        .branches
                        .pop()
                        .ok_or(SmilesError::UnbalancedParen(self.pos))?;
                    self.prev = Some(root);
                    self.pos += 1;
                }
                b'-' | b'=' | b'#' | b'$' | b':' | b'/' | b'\\' => {
                    if self.prev.is_none() || self.pending.is_some() {
                        return Err(self.unexpected());
                    }
                    let order = match c {
                        b'=' => BondOrder::Double,
                        b'#' => BondOrder::Triple,
                        b'$' => BondOrder::Quadruple,
                        b':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending = Some((order, self.pos));
                    self.pos += 1;
                }
                b'.' => {
                    if let Some((_, pos)) = self.pending {
                        return Err(SmilesError::DanglingBond(pos));
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                b'0'..=b'9' => {
                    let label = (c - b'0') as u16;
                    self.ring_bond(label)?;
                    self.pos += 1;
                }
                b'%' => {
                    let label = self.percent_label()?;
                    self.ring_bond(label)?;
                }
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.attach(atom)?;
                }
                _ => {
                    let atom = self.organic_atom()?;
                    self.attach(atom)?;
                }
            }
        }

        if let Some((_, pos)) = self.pending {
            return Err(SmilesError::DanglingBond(pos));
        }
        if !self.branches.is_empty() {
            return Err(SmilesError::UnbalancedParen(self.pos));
        }
        if let Some((&label, _)) = self.rings.iter().next() {
            return Err(SmilesError::UnclosedRing(label));
        }
        if self.mol.atom_count() == 0 {
            return Err(SmilesError::Empty);
        }
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn unexpected(&self) -> SmilesError {
        match self.input[self.pos..].chars().next() {
            Some(ch) => SmilesError::UnexpectedChar { ch, pos: self.pos },
            None => SmilesError::UnexpectedEnd,
        }
    }

    fn read_number(&mut self) -> Option<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.input[start..self.pos].parse().ok()
    }

    fn implicit_order(&self, a: usize, b: usize) -> BondOrder {
        if self.mol.atoms[a].aromatic && self.mol.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn attach(&mut self, atom: Atom) -> Result<(), SmilesError> {
        if self.mol.atom_count() == MAX_ATOMS {
            return Err(SmilesError::TooManyAtoms(MAX_ATOMS));
        }
        let index = self.mol.add_atom(atom);
        if let Some(prev) = self.prev {
            let order = match self.pending.take() {
                Some((order, _)) => order,
                None => self.implicit_order(prev, index),
            };
            self.mol.add_bond(prev, index, order);
        }
        self.prev = Some(index);
        Ok(())
    }

    fn percent_label(&mut self) -> Result<u16, SmilesError> {
        // '%nn' or '%(nnn)'
        self.pos += 1;
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let label = self.read_number().ok_or_else(|| self.unexpected())?;
            if self.peek() != Some(b')') {
                return Err(self.unexpected());
            }
            self.pos += 1;
            return u16::try_from(label).map_err(|_| self.unexpected());
        }
        let digits = self
            .bytes
            .get(self.pos..self.pos + 2)
            .ok_or(SmilesError::UnexpectedEnd)?;
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(self.unexpected());
        }
        let label = ((digits[0] - b'0') as u16) * 10 + (digits[1] - b'0') as u16;
        self.pos += 2;
        Ok(label)
    }

    fn ring_bond(&mut self, label: u16) -> Result<(), SmilesError> {
        let current = self.prev.ok_or_else(|| self.unexpected())?;
        let bond = self.pending.take().map(|(order, _)| order);

        match self.rings.remove(&label) {
            Some(opening) => {
                let order = match (opening.bond, bond) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(SmilesError::RingBondMismatch(label))
                    }
                    (Some(a), _) => a,
                    (None, Some(b)) => b,
                    (None, None) => self.implicit_order(opening.atom, current),
                };
                if opening.atom == current
                    || self.mol.bond_between(opening.atom, current).is_some()
                {
                    return Err(SmilesError::InvalidRingClosure(label));
                }
                self.mol.add_bond(opening.atom, current, order);
            }
            None => {
                self.rings.insert(
                    label,
                    RingOpening {
                        atom: current,
                        bond,
                    },
                );
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let rest = &self.input[self.pos..];
        let (atomic_number, aromatic, len) = if rest.starts_with("Cl") {
            (17, false, 2)
        } else if rest.starts_with("Br") {
            (35, false, 2)
        } else {
            match self.bytes[self.pos] {
                b'B' => (5, false, 1),
                b'C' => (6, false, 1),
                b'N' => (7, false, 1),
                b'O' => (8, false, 1),
                b'P' => (15, false, 1),
                b'S' => (16, false, 1),
                b'F' => (9, false, 1),
                b'I' => (53, false, 1),
                b'b' => (5, true, 1),
                b'c' => (6, true, 1),
                b'n' => (7, true, 1),
                b'o' => (8, true, 1),
                b'p' => (15, true, 1),
                b's' => (16, true, 1),
                b'*' => (0, false, 1),
                _ => return Err(self.unexpected()),
            }
        };
        self.pos += len;
        Ok(Atom::organic(atomic_number, aromatic))
    }

    fn bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        self.pos += 1;

        let isotope = match self.read_number() {
            Some(mass) => Some(u16::try_from(mass).map_err(|_| self.unexpected())?),
            None => None,
        };

        let (atomic_number, aromatic) = self.bracket_symbol()?;

        self.skip_chirality();

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            hydrogens = match self.read_number() {
                Some(n) => u8::try_from(n).map_err(|_| self.unexpected())?,
                None => 1,
            };
        }

        let mut charge: i32 = 0;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            let unit = if sign == b'+' { 1 } else { -1 };
            self.pos += 1;
            charge = match self.read_number() {
                Some(n) => unit * n as i32,
                None => {
                    let mut count = 1;
                    while self.peek() == Some(sign) {
                        count += 1;
                        self.pos += 1;
                    }
                    unit * count
                }
            };
            if charge.abs() > 15 {
                return Err(self.unexpected());
            }
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            self.read_number().ok_or_else(|| self.unexpected())?;
        }

        match self.peek() {
            Some(b']') => self.pos += 1,
            Some(_) => return Err(self.unexpected()),
            None => return Err(SmilesError::UnexpectedEnd),
        }

        Ok(Atom {
            atomic_number,
            aromatic,
            isotope,
            charge: charge as i8,
            explicit_h: Some(hydrogens),
            hydrogens,
        })
    }

    /// Skip `@`, `@@` or `@` followed by a class and number (`@TH1`, `@OH12`).
    ///
    /// A class is only consumed when digits follow it, so the hydrogen
    /// count in `[C@H]` is left for the caller.
    fn skip_chirality(&mut self) {
        if self.peek() != Some(b'@') {
            return;
        }
        self.pos += 1;
        if self.peek() == Some(b'@') {
            self.pos += 1;
            return;
        }
        let rest = &self.bytes[self.pos..];
        let has_class = CHIRAL_CLASSES
            .iter()
            .any(|class| rest.starts_with(class.as_bytes()))
            && rest.get(2).is_some_and(u8::is_ascii_digit);
        if has_class {
            self.pos += 2;
            self.read_number();
        }
    }

    fn bracket_symbol(&mut self) -> Result<(u8, bool), SmilesError> {
        let rest = &self.input[self.pos..];
        let first = *self.bytes.get(self.pos).ok_or(SmilesError::UnexpectedEnd)?;

        if first == b'*' {
            self.pos += 1;
            return Ok((0, false));
        }

        if first.is_ascii_lowercase() {
            for (symbol, z) in [("se", element::SELENIUM), ("as", element::ARSENIC)] {
                if rest.starts_with(symbol) {
                    self.pos += 2;
                    return Ok((z, true));
                }
            }
            let z = match first {
                b'b' => element::BORON,
                b'c' => element::CARBON,
                b'n' => element::NITROGEN,
                b'o' => element::OXYGEN,
                b'p' => element::PHOSPHORUS,
                b's' => element::SULFUR,
                _ => return Err(SmilesError::InvalidAromatic(rest[..1].to_string())),
            };
            self.pos += 1;
            return Ok((z, true));
        }

        if !first.is_ascii_uppercase() {
            return Err(self.unexpected());
        }

        if let Some(second) = self.bytes.get(self.pos + 1) {
            if second.is_ascii_lowercase() {
                if let Some(z) = element::atomic_number(&rest[..2]) {
                    self.pos += 2;
                    return Ok((z, false));
                }
            }
        }

        let z = element::atomic_number(&rest[..1])
            .ok_or_else(|| SmilesError::UnknownElement(rest[..1].to_string()))?;
        self.pos += 1;
        Ok((z, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branches_and_rings() {
        let mol = parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        assert_eq!(mol.atom_count(), 13);
        assert_eq!(mol.bond_count(), 13);
    }

    #[test]
    fn test_parse_bracket_atom() {
        let mol = parse_smiles("[13CH3+]").unwrap();
        let atom = &mol.atoms()[0];
        assert_eq!(atom.atomic_number, 6);
        assert_eq!(atom.isotope, Some(13));
        assert_eq!(atom.explicit_h, Some(3));
        assert_eq!(atom.charge, 1);
    }

    #[test]
    fn test_chirality_keeps_hydrogen_count() {
        for smiles in ["C[C@H](N)O", "C[C@@H](N)O", "C[C@TH1H](N)O", "C[C@TH2H](N)O"] {
            let mol = parse_smiles(smiles).unwrap();
            assert_eq!(mol.atoms()[1].explicit_h, Some(1), "{}", smiles);
        }
        let mol = parse_smiles("F[S@OH1](F)(F)(F)(F)F").unwrap();
        assert_eq!(mol.atoms()[1].explicit_h, Some(0));
        let mol = parse_smiles("[C@H2]").unwrap();
        assert_eq!(mol.atoms()[0].explicit_h, Some(2));
    }

    #[test]
    fn test_parse_charge_forms() {
        assert_eq!(parse_smiles("[Fe++]").unwrap().atoms()[0].charge, 2);
        assert_eq!(parse_smiles("[O-2]").unwrap().atoms()[0].charge, -2);
    }

    #[test]
    fn test_parse_percent_ring_label() {
        let mol = parse_smiles("C%10CCCCC%10").unwrap();
        assert_eq!(mol.bond_count(), 6);
    }

    #[test]
    fn test_parse_stops_at_whitespace() {
        let mol = parse_smiles("CCO ethanol").unwrap();
        assert_eq!(mol.atom_count(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_smiles("").unwrap_err(), SmilesError::Empty);
        assert_eq!(parse_smiles("C1CC").unwrap_err(), SmilesError::UnclosedRing(1));
        assert!(matches!(
            parse_smiles("CC)").unwrap_err(),
            SmilesError::UnbalancedParen(_)
        ));
        assert!(matches!(
            parse_smiles("CC=").unwrap_err(),
            SmilesError::DanglingBond(_)
        ));
        assert!(matches!(
            parse_smiles("[Xy]").unwrap_err(),
            SmilesError::UnknownElement(_)
        ));
        assert!(matches!(
            parse_smiles("C=1CC-1").unwrap_err(),
            SmilesError::RingBondMismatch(1)
        ));
        assert!(matches!(
            parse_smiles("-666").unwrap_err(),
            SmilesError::UnexpectedChar { .. }
        ));
        assert!(matches!(
            parse_smiles("restricted").unwrap_err(),
            SmilesError::UnexpectedChar { .. }
        ));
    }
}
