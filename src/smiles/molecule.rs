use super::canonical;
use super::element;

/// Bond multiplicity as written in SMILES
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    /// `-`, `/`, `\` or implicit between aliphatic atoms
    Single,
    /// `=`
    Double,
    /// `#`
    Triple,
    /// `$`
    Quadruple,
    /// `:` or implicit between aromatic atoms; resolved away by kekulization
    Aromatic,
}

impl BondOrder {
    /// Contribution of this bond to an atom's valence
    pub fn valence(&self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }
}

/// A single atom of a parsed molecule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Atomic number (0 for the `*` wildcard)
    pub atomic_number: u8,
    /// Aromatic flag; after sanitization this is the perceived aromaticity
    pub aromatic: bool,
    /// Isotope mass number, if given
    pub isotope: Option<u16>,
    /// Formal charge
    pub charge: i8,
    /// Hydrogen count from a bracket atom; `None` for organic-subset atoms
    pub explicit_h: Option<u8>,
    /// Total attached hydrogens, resolved during sanitization
    pub hydrogens: u8,
}

impl Atom {
    pub(crate) fn organic(atomic_number: u8, aromatic: bool) -> Self {
        Self {
            atomic_number,
            aromatic,
            isotope: None,
            charge: 0,
            explicit_h: None,
            hydrogens: 0,
        }
    }

    /// Element symbol
    pub fn symbol(&self) -> &'static str {
        element::symbol(self.atomic_number)
    }
}

/// A bond between two atoms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    /// First atom index
    pub a: usize,
    /// Second atom index
    pub b: usize,
    /// Kekulé bond order after sanitization
    pub order: BondOrder,
    /// Perceived aromaticity
    pub aromatic: bool,
}

impl Bond {
    /// The atom on the other end of this bond
    pub fn other(&self, atom: usize) -> usize {
        if self.a == atom {
            self.b
        } else {
            self.a
        }
    }
}

/// Molecular graph built from a SMILES string
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub(crate) atoms: Vec<Atom>,
    pub(crate) bonds: Vec<Bond>,
    /// (neighbor atom, bond index) per atom
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    pub(crate) fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) -> usize {
        let index = self.bonds.len();
        self.bonds.push(Bond {
            a,
            b,
            order,
            aromatic: false,
        });
        self.adjacency[a].push((b, index));
        self.adjacency[b].push((a, index));
        index
    }

    /// Atoms in parse order
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Bonds in parse order
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of atoms (explicit hydrogens written as `[H]` count as atoms)
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Neighbors of an atom as (atom index, bond index) pairs
    pub fn neighbors(&self, atom: usize) -> &[(usize, usize)] {
        &self.adjacency[atom]
    }

    /// Number of explicit neighbors
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// Index of the bond joining two atoms, if any
    pub fn bond_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|(_, bond)| *bond)
    }

    /// Sum of bond valences around an atom
    pub fn bond_valence(&self, atom: usize) -> u32 {
        self.adjacency[atom]
            .iter()
            .map(|(_, b)| self.bonds[*b].order.valence())
            .sum()
    }

    /// Number of disconnected fragments (salts, mixtures)
    pub fn fragment_count(&self) -> usize {
        let mut seen = vec![false; self.atoms.len()];
        let mut count = 0;
        for start in 0..self.atoms.len() {
            if seen[start] {
                continue;
            }
            count += 1;
            let mut stack = vec![start];
            seen[start] = true;
            while let Some(atom) = stack.pop() {
                for &(next, _) in &self.adjacency[atom] {
                    if !seen[next] {
                        seen[next] = true;
                        stack.push(next);
                    }
                }
            }
        }
        count
    }

    /// Write the canonical SMILES for this molecule
    pub fn to_canonical_smiles(&self) -> String {
        canonical::write_canonical(self)
    }
}
