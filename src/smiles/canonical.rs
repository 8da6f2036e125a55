//! Canonical atom ranking and SMILES writing.
//!
//! Ranks start from per-atom invariants and are refined by neighbor ranks
//! until the partition is stable; remaining ties are broken one atom at a
//! time. The writer then walks each fragment depth-first from its
//! lowest-ranked atom, visiting neighbors in rank order.

use std::collections::{BTreeSet, HashMap};

use super::element::{self, NITROGEN, PHOSPHORUS};
use super::molecule::{BondOrder, Molecule};
use super::sanitize::{implicit_hydrogens, ring_bond_flags};

/// Dense ranks (0-based) of the given keys.
fn dense_rank<K: Ord>(keys: &[K]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|a, b| keys[*a].cmp(&keys[*b]));
    let mut ranks = vec![0; keys.len()];
    let mut current = 0;
    for (position, &index) in order.iter().enumerate() {
        if position > 0 && keys[order[position - 1]] != keys[index] {
            current += 1;
        }
        ranks[index] = current;
    }
    ranks
}

fn class_count(ranks: &[usize]) -> usize {
    ranks.iter().collect::<BTreeSet<_>>().len()
}

fn bond_code(mol: &Molecule, bond: usize) -> u8 {
    let bond = &mol.bonds[bond];
    if bond.aromatic {
        return 5;
    }
    match bond.order {
        BondOrder::Single | BondOrder::Aromatic => 1,
        BondOrder::Double => 2,
        BondOrder::Triple => 3,
        BondOrder::Quadruple => 4,
    }
}

fn refine(mol: &Molecule, mut ranks: Vec<usize>) -> Vec<usize> {
    loop {
        let keys: Vec<(usize, Vec<(usize, u8)>)> = (0..mol.atom_count())
            .map(|atom| {
                let mut around: Vec<(usize, u8)> = mol
                    .neighbors(atom)
                    .iter()
                    .map(|(next, bond)| (ranks[*next], bond_code(mol, *bond)))
                    .collect();
                around.sort_unstable();
                (ranks[atom], around)
            })
            .collect();
        let refined = dense_rank(&keys);
        if class_count(&refined) == class_count(&ranks) {
            return refined;
        }
        ranks = refined;
    }
}

/// Canonical rank of every atom; all ranks are distinct.
pub(crate) fn canonical_ranks(mol: &Molecule) -> Vec<usize> {
    let ring_bonds = ring_bond_flags(mol);
    let invariants: Vec<_> = mol
        .atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| {
            let in_ring = mol.neighbors(index).iter().any(|(_, b)| ring_bonds[*b]);
            (
                atom.atomic_number,
                atom.aromatic,
                mol.degree(index),
                atom.hydrogens,
                atom.charge,
                atom.isotope.unwrap_or(0),
                in_ring,
            )
        })
        .collect();

    let mut ranks = refine(mol, dense_rank(&invariants));
    while class_count(&ranks) < mol.atom_count() {
        // Lowest rank shared by more than one atom; split off its first member.
        let mut members: HashMap<usize, Vec<usize>> = HashMap::new();
        for (atom, rank) in ranks.iter().enumerate() {
            members.entry(*rank).or_default().push(atom);
        }
        let Some(tied) = members
            .iter()
            .filter(|(_, atoms)| atoms.len() > 1)
            .map(|(rank, _)| *rank)
            .min()
        else {
            break;
        };
        let chosen = members[&tied][0];
        let mut split: Vec<usize> = ranks.iter().map(|r| r * 2 + 1).collect();
        split[chosen] -= 1;
        ranks = refine(mol, dense_rank(&split));
    }
    ranks
}

fn bond_symbol(mol: &Molecule, bond: usize) -> &'static str {
    let b = &mol.bonds[bond];
    if b.aromatic {
        return "";
    }
    match b.order {
        BondOrder::Single | BondOrder::Aromatic => {
            if mol.atoms[b.a].aromatic && mol.atoms[b.b].aromatic {
                "-"
            } else {
                ""
            }
        }
        BondOrder::Double => "=",
        BondOrder::Triple => "#",
        BondOrder::Quadruple => "$",
    }
}

fn atom_symbol(mol: &Molecule, index: usize) -> String {
    let atom = &mol.atoms[index];
    let symbol = if atom.aromatic {
        atom.symbol().to_lowercase()
    } else {
        atom.symbol().to_string()
    };

    let bare = if atom.atomic_number == 0 {
        atom.charge == 0 && atom.isotope.is_none() && atom.hydrogens == 0
    } else {
        element::is_organic_subset(atom.atomic_number)
            && atom.charge == 0
            && atom.isotope.is_none()
            && !(atom.aromatic
                && matches!(atom.atomic_number, NITROGEN | PHOSPHORUS)
                && atom.hydrogens > 0)
            && implicit_hydrogens(atom.atomic_number, mol.bond_valence(index))
                == Some(atom.hydrogens as u32)
    };
    if bare {
        return symbol;
    }

    let mut out = String::from("[");
    if let Some(isotope) = atom.isotope {
        out.push_str(&isotope.to_string());
    }
    out.push_str(&symbol);
    match atom.hydrogens {
        0 => {}
        1 => out.push('H'),
        h => out.push_str(&format!("H{}", h)),
    }
    match atom.charge {
        0 => {}
        1 => out.push('+'),
        -1 => out.push('-'),
        c if c > 0 => out.push_str(&format!("+{}", c)),
        c => out.push_str(&format!("-{}", -c)),
    }
    out.push(']');
    out
}

fn ring_label(digit: usize) -> String {
    if digit < 10 {
        digit.to_string()
    } else {
        format!("%{}", digit)
    }
}

/// Depth-first spanning tree of one fragment with its ring-closure bonds.
struct Traversal {
    children: Vec<Vec<(usize, usize)>>,
    ring_opens: Vec<Vec<(usize, usize)>>,
    ring_closes: Vec<Vec<(usize, usize)>>,
}

impl Traversal {
    /// Depth-first walk from `root`, visiting neighbors in rank order.
    fn build(
        mol: &Molecule,
        ranks: &[usize],
        root: usize,
        visited: &mut [bool],
        used: &mut [bool],
        traversal: &mut Traversal,
    ) {
        let sorted = |atom: usize| {
            let mut neighbors = mol.neighbors(atom).to_vec();
            neighbors.sort_by_key(|(next, _)| ranks[*next]);
            neighbors
        };

        visited[root] = true;
        let mut stack = vec![(root, sorted(root), 0usize)];
        while let Some((atom, neighbors, position)) = stack.last_mut() {
            let Some(&(next, bond)) = neighbors.get(*position) else {
                stack.pop();
                continue;
            };
            *position += 1;
            let atom = *atom;
            if used[bond] {
                continue;
            }
            used[bond] = true;
            if visited[next] {
                // `next` is an ancestor on the current path and was written first.
                traversal.ring_opens[next].push((atom, bond));
                traversal.ring_closes[atom].push((next, bond));
            } else {
                traversal.children[atom].push((next, bond));
                visited[next] = true;
                stack.push((next, sorted(next), 0));
            }
        }
    }
}

/// Pending output while writing a fragment
enum Step {
    Atom { atom: usize, incoming: Option<usize> },
    Text(&'static str),
}

struct Emitter<'a> {
    mol: &'a Molecule,
    ranks: &'a [usize],
    traversal: &'a Traversal,
    digits_in_use: BTreeSet<usize>,
    bond_digits: HashMap<usize, usize>,
    out: String,
}

impl Emitter<'_> {
    fn next_free_digit(&self) -> usize {
        (1..)
            .find(|d| !self.digits_in_use.contains(d))
            .unwrap_or(1)
    }

    fn write_atom(&mut self, atom: usize, incoming: Option<usize>) {
        if let Some(bond) = incoming {
            self.out.push_str(bond_symbol(self.mol, bond));
        }
        self.out.push_str(&atom_symbol(self.mol, atom));

        let mut released = Vec::new();
        for &(_, bond) in &self.traversal.ring_closes[atom] {
            if let Some(digit) = self.bond_digits.remove(&bond) {
                self.out.push_str(bond_symbol(self.mol, bond));
                self.out.push_str(&ring_label(digit));
                released.push(digit);
            }
        }

        let mut opens = self.traversal.ring_opens[atom].clone();
        opens.sort_by_key(|(partner, _)| self.ranks[*partner]);
        for (_, bond) in opens {
            let digit = self.next_free_digit();
            self.digits_in_use.insert(digit);
            self.bond_digits.insert(bond, digit);
            self.out.push_str(&ring_label(digit));
        }

        for digit in released {
            self.digits_in_use.remove(&digit);
        }
    }

    /// Write the fragment rooted at `root`; every child but the last is a branch.
    fn emit(&mut self, root: usize) {
        let traversal = self.traversal;
        let mut steps = vec![Step::Atom {
            atom: root,
            incoming: None,
        }];
        while let Some(step) = steps.pop() {
            let (atom, incoming) = match step {
                Step::Text(text) => {
                    self.out.push_str(text);
                    continue;
                }
                Step::Atom { atom, incoming } => (atom, incoming),
            };
            self.write_atom(atom, incoming);

            let children = &traversal.children[atom];
            let last = children.len().saturating_sub(1);
            // Pushed in reverse so they pop in writing order.
            for (position, &(child, bond)) in children.iter().enumerate().rev() {
                let child_step = Step::Atom {
                    atom: child,
                    incoming: Some(bond),
                };
                if position < last {
                    steps.push(Step::Text(")"));
                    steps.push(child_step);
                    steps.push(Step::Text("("));
                } else {
                    steps.push(child_step);
                }
            }
        }
    }
}

/// Canonical SMILES of a sanitized molecule. Fragments are sorted and joined by `.`.
pub(crate) fn write_canonical(mol: &Molecule) -> String {
    let n = mol.atom_count();
    if n == 0 {
        return String::new();
    }
    let ranks = canonical_ranks(mol);

    let mut visited = vec![false; n];
    let mut used = vec![false; mol.bond_count()];
    let mut traversal = Traversal {
        children: vec![Vec::new(); n],
        ring_opens: vec![Vec::new(); n],
        ring_closes: vec![Vec::new(); n],
    };

    let mut roots = Vec::new();
    let mut by_rank: Vec<usize> = (0..n).collect();
    by_rank.sort_by_key(|atom| ranks[*atom]);
    for atom in by_rank {
        if !visited[atom] {
            roots.push(atom);
            Traversal::build(mol, &ranks, atom, &mut visited, &mut used, &mut traversal);
        }
    }

    let mut fragments: Vec<String> = roots
        .into_iter()
        .map(|root| {
            let mut emitter = Emitter {
                mol,
                ranks: &ranks,
                traversal: &traversal,
                digits_in_use: BTreeSet::new(),
                bond_digits: HashMap::new(),
                out: String::new(),
            };
            emitter.emit(root);
            emitter.out
        })
        .collect();
    fragments.sort();
    fragments.join(".")
}
