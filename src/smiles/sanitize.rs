//! Sanitization: ring detection, kekulization, hydrogen assignment and
//! aromaticity perception.
//!
//! After [`sanitize`] every bond carries a Kekulé order, every atom a resolved
//! hydrogen count, and the aromatic flags reflect perceived aromaticity rather
//! than the case used in the input. Kekulé and aromatic spellings of the same
//! structure therefore sanitize to the same graph.

use std::collections::{HashSet, VecDeque};

use super::element::{self, allowed_valences};
use super::molecule::{BondOrder, Molecule};
use super::SmilesError;

/// Largest ring considered during aromaticity perception
const MAX_AROMATIC_RING: usize = 8;

/// Upper bound on backtracking steps while searching for a Kekulé structure
const KEKULIZE_BUDGET: usize = 1_000_000;

pub(crate) fn sanitize(mol: &mut Molecule) -> Result<(), SmilesError> {
    let ring_bonds = ring_bond_flags(mol);

    for (index, atom) in mol.atoms.iter().enumerate() {
        if !atom.aromatic {
            continue;
        }
        if !element::can_be_aromatic(atom.atomic_number) {
            return Err(SmilesError::InvalidAromatic(atom.symbol().to_string()));
        }
        let in_ring = mol.neighbors(index).iter().any(|(_, b)| ring_bonds[*b]);
        if !in_ring {
            return Err(SmilesError::NonRingAromatic(index));
        }
    }

    // Aromatic bonds outside rings or touching aliphatic atoms are plain singles.
    for (index, bond) in mol.bonds.iter_mut().enumerate() {
        if bond.order == BondOrder::Aromatic
            && (!ring_bonds[index] || !mol.atoms[bond.a].aromatic || !mol.atoms[bond.b].aromatic)
        {
            bond.order = BondOrder::Single;
        }
    }

    kekulize(mol)?;
    assign_hydrogens(mol)?;
    perceive_aromaticity(mol, &ring_bonds);
    Ok(())
}

/// Flag each bond that lies on a cycle (i.e. is not a bridge).
///
/// Tarjan's bridge search with an explicit stack; each frame is
/// `(atom, bond it was reached by, next neighbor position)`.
pub(crate) fn ring_bond_flags(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0; n];
    let mut in_ring = vec![true; mol.bond_count()];
    let mut timer = 0;
    let mut stack: Vec<(usize, Option<usize>, usize)> = Vec::new();

    for start in 0..n {
        if disc[start] != usize::MAX {
            continue;
        }
        disc[start] = timer;
        low[start] = timer;
        timer += 1;
        stack.push((start, None, 0));

        while let Some(frame) = stack.last_mut() {
            let (atom, parent_bond, position) = *frame;
            match mol.neighbors(atom).get(position) {
                Some(&(next, bond)) => {
                    frame.2 += 1;
                    if Some(bond) == parent_bond {
                        continue;
                    }
                    if disc[next] == usize::MAX {
                        disc[next] = timer;
                        low[next] = timer;
                        timer += 1;
                        stack.push((next, Some(bond), 0));
                    } else {
                        low[atom] = low[atom].min(disc[next]);
                    }
                }
                None => {
                    stack.pop();
                    if let (Some(bond), Some(&(parent, _, _))) = (parent_bond, stack.last()) {
                        low[parent] = low[parent].min(low[atom]);
                        if low[atom] > disc[parent] {
                            in_ring[bond] = false;
                        }
                    }
                }
            }
        }
    }
    in_ring
}

/// Whether an aromatic atom must receive a double bond in the Kekulé form.
fn needs_double_bond(mol: &Molecule, atom: usize) -> bool {
    let a = &mol.atoms[atom];
    let total = mol.bond_valence(atom) + a.explicit_h.unwrap_or(0) as u32;
    match allowed_valences(a.atomic_number, a.charge) {
        Some(valences) => valences
            .iter()
            .find(|v| **v >= total)
            .map_or(false, |target| *target > total),
        None => false,
    }
}

fn kekulize(mol: &mut Molecule) -> Result<(), SmilesError> {
    let aromatic_bonds: Vec<usize> = (0..mol.bond_count())
        .filter(|b| mol.bonds[*b].order == BondOrder::Aromatic)
        .collect();
    if aromatic_bonds.is_empty() {
        return Ok(());
    }

    let n = mol.atom_count();
    let needs: Vec<bool> = (0..n)
        .map(|i| mol.atoms[i].aromatic && needs_double_bond(mol, i))
        .collect();
    let needy: Vec<usize> = (0..n).filter(|i| needs[*i]).collect();
    if needy.len() % 2 == 1 {
        return Err(SmilesError::Kekulize);
    }

    let mut mate: Vec<Option<usize>> = vec![None; n];
    let mut budget = KEKULIZE_BUDGET;
    if !match_pi_bonds(mol, &needy, &needs, &mut mate, &mut budget) {
        return Err(SmilesError::Kekulize);
    }

    for b in aromatic_bonds {
        mol.bonds[b].order = BondOrder::Single;
    }
    for &atom in &needy {
        if let Some(bond) = mate[atom] {
            mol.bonds[bond].order = BondOrder::Double;
        }
    }
    Ok(())
}

/// Backtracking perfect matching of atoms that need a double bond, over
/// aromatic bonds only.
fn match_pi_bonds(
    mol: &Molecule,
    needy: &[usize],
    needs: &[bool],
    mate: &mut [Option<usize>],
    budget: &mut usize,
) -> bool {
    let Some(&atom) = needy.iter().find(|a| mate[**a].is_none()) else {
        return true;
    };
    for &(next, bond) in mol.neighbors(atom) {
        if *budget == 0 {
            return false;
        }
        *budget -= 1;
        if mol.bonds[bond].order != BondOrder::Aromatic || !needs[next] || mate[next].is_some() {
            continue;
        }
        mate[atom] = Some(bond);
        mate[next] = Some(bond);
        if match_pi_bonds(mol, needy, needs, mate, budget) {
            return true;
        }
        mate[atom] = None;
        mate[next] = None;
    }
    false
}

/// Smallest valence-consistent hydrogen count for an organic-subset atom.
pub(crate) fn implicit_hydrogens(atomic_number: u8, bond_valence: u32) -> Option<u32> {
    let valences = allowed_valences(atomic_number, 0)?;
    valences
        .iter()
        .find(|v| **v >= bond_valence)
        .map(|v| v - bond_valence)
}

fn assign_hydrogens(mol: &mut Molecule) -> Result<(), SmilesError> {
    for index in 0..mol.atom_count() {
        let bond_valence = mol.bond_valence(index);
        let atom = &mol.atoms[index];
        let hydrogens = match atom.explicit_h {
            Some(h) => {
                let total = bond_valence + h as u32;
                if let Some(valences) = allowed_valences(atom.atomic_number, atom.charge) {
                    let max = valences.last().copied().unwrap_or(0);
                    if total > max {
                        return Err(SmilesError::Valence {
                            index,
                            symbol: atom.symbol().to_string(),
                            valence: total,
                        });
                    }
                }
                h
            }
            None if atom.atomic_number == 0 => 0,
            None => match implicit_hydrogens(atom.atomic_number, bond_valence) {
                Some(h) => h as u8,
                None => {
                    return Err(SmilesError::Valence {
                        index,
                        symbol: atom.symbol().to_string(),
                        valence: bond_valence,
                    })
                }
            },
        };
        mol.atoms[index].hydrogens = hydrogens;
    }
    Ok(())
}

/// Shortest cycle through each ring bond, deduplicated by atom set.
pub(crate) fn smallest_rings(mol: &Molecule, ring_bonds: &[bool]) -> Vec<Vec<usize>> {
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut rings = Vec::new();

    for (index, bond) in mol.bonds.iter().enumerate() {
        if !ring_bonds[index] {
            continue;
        }
        if let Some(path) = shortest_path(mol, bond.a, bond.b, index, ring_bonds) {
            let mut key = path.clone();
            key.sort_unstable();
            if seen.insert(key) {
                rings.push(path);
            }
        }
    }
    rings
}

fn shortest_path(
    mol: &Molecule,
    from: usize,
    to: usize,
    excluded_bond: usize,
    ring_bonds: &[bool],
) -> Option<Vec<usize>> {
    let mut parent: Vec<Option<usize>> = vec![None; mol.atom_count()];
    let mut visited = vec![false; mol.atom_count()];
    let mut queue = VecDeque::new();
    visited[from] = true;
    queue.push_back(from);

    while let Some(atom) = queue.pop_front() {
        if atom == to {
            let mut path = vec![to];
            let mut current = to;
            while let Some(p) = parent[current] {
                path.push(p);
                current = p;
            }
            path.reverse();
            return Some(path);
        }
        for &(next, bond) in mol.neighbors(atom) {
            if bond == excluded_bond || !ring_bonds[bond] || visited[next] {
                continue;
            }
            visited[next] = true;
            parent[next] = Some(atom);
            queue.push_back(next);
        }
    }
    None
}

/// Pi electrons a ring contributes, or `None` if some atom rules it out.
fn ring_pi_electrons(
    mol: &Molecule,
    ring: &[usize],
    aromatic_atoms: &[bool],
    ring_bonds: &[bool],
) -> Option<u32> {
    let mut total = 0;
    for &index in ring {
        let atom = &mol.atoms[index];
        if !element::can_be_aromatic(atom.atomic_number) {
            return None;
        }

        let mut ring_double = false;
        let mut exocyclic_double: Option<(usize, usize)> = None;
        for &(next, bond) in mol.neighbors(index) {
            match mol.bonds[bond].order {
                BondOrder::Triple | BondOrder::Quadruple => return None,
                BondOrder::Double if ring.contains(&next) => ring_double = true,
                BondOrder::Double => exocyclic_double = Some((next, bond)),
                _ => {}
            }
        }

        let contribution = if ring_double {
            1
        } else if let Some((partner, bond)) = exocyclic_double {
            if aromatic_atoms[partner] && ring_bonds[bond] {
                1
            } else if atom.atomic_number == element::CARBON
                && matches!(
                    mol.atoms[partner].atomic_number,
                    element::NITROGEN | element::OXYGEN | element::SULFUR
                )
            {
                0
            } else {
                return None;
            }
        } else {
            let connections = mol.degree(index) + atom.hydrogens as usize;
            match (atom.atomic_number, atom.charge) {
                (element::NITROGEN | element::PHOSPHORUS | element::ARSENIC, 0)
                    if connections == 3 =>
                {
                    2
                }
                (element::OXYGEN | element::SULFUR | element::SELENIUM, 0) if connections == 2 => 2,
                (element::CARBON, -1) if connections == 3 => 2,
                (element::CARBON, 1) if connections == 3 => 0,
                (element::BORON, 0) if connections == 3 => 0,
                _ => return None,
            }
        };
        total += contribution;
    }
    Some(total)
}

fn perceive_aromaticity(mol: &mut Molecule, ring_bonds: &[bool]) {
    for atom in &mut mol.atoms {
        atom.aromatic = false;
    }
    for bond in &mut mol.bonds {
        bond.aromatic = false;
    }

    let rings = smallest_rings(mol, ring_bonds);
    let mut aromatic_ring = vec![false; rings.len()];
    let mut aromatic_atoms = vec![false; mol.atom_count()];

    // Fused systems need repeated passes: a ring may only qualify once its
    // neighbour has been marked aromatic.
    loop {
        let mut changed = false;
        for (r, ring) in rings.iter().enumerate() {
            if aromatic_ring[r] || ring.len() > MAX_AROMATIC_RING {
                continue;
            }
            if let Some(electrons) = ring_pi_electrons(mol, ring, &aromatic_atoms, ring_bonds) {
                if electrons % 4 == 2 {
                    aromatic_ring[r] = true;
                    for &atom in ring {
                        aromatic_atoms[atom] = true;
                    }
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    for (r, ring) in rings.iter().enumerate() {
        if !aromatic_ring[r] {
            continue;
        }
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            if let Some(bond) = mol.bond_between(a, b) {
                mol.bonds[bond].aromatic = true;
            }
        }
    }
    for (atom, aromatic) in mol.atoms.iter_mut().zip(aromatic_atoms) {
        atom.aromatic = aromatic;
    }
}
