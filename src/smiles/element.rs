//! Periodic table lookup and default valences.

/// Element symbols indexed by atomic number. Index 0 is the wildcard atom `*`.
const SYMBOLS: [&str; 119] = [
    "*", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Atomic number of boron
pub const BORON: u8 = 5;
/// Atomic number of carbon
pub const CARBON: u8 = 6;
/// Atomic number of nitrogen
pub const NITROGEN: u8 = 7;
/// Atomic number of oxygen
pub const OXYGEN: u8 = 8;
/// Atomic number of phosphorus
pub const PHOSPHORUS: u8 = 15;
/// Atomic number of sulfur
pub const SULFUR: u8 = 16;
/// Atomic number of arsenic
pub const ARSENIC: u8 = 33;
/// Atomic number of selenium
pub const SELENIUM: u8 = 34;

/// Look up an atomic number by its (case-sensitive) symbol.
pub fn atomic_number(symbol: &str) -> Option<u8> {
    SYMBOLS
        .iter()
        .position(|s| *s == symbol)
        .map(|z| z as u8)
}

/// Symbol for an atomic number.
pub fn symbol(atomic_number: u8) -> &'static str {
    SYMBOLS.get(atomic_number as usize).copied().unwrap_or("*")
}

/// Elements that may be written without brackets.
pub fn is_organic_subset(atomic_number: u8) -> bool {
    matches!(atomic_number, 5 | 6 | 7 | 8 | 9 | 15 | 16 | 17 | 35 | 53)
}

/// Elements that may carry the aromatic (lowercase) flag.
pub fn can_be_aromatic(atomic_number: u8) -> bool {
    matches!(
        atomic_number,
        BORON | CARBON | NITROGEN | OXYGEN | PHOSPHORUS | SULFUR | ARSENIC | SELENIUM
    )
}

/// Allowed valences of a neutral element, smallest first.
///
/// `None` means the element is not valence-checked (metals, noble gases,
/// the wildcard atom).
fn neutral_valences(atomic_number: u8) -> Option<&'static [u32]> {
    match atomic_number {
        1 => Some(&[1]),
        5 => Some(&[3]),
        6 => Some(&[4]),
        7 => Some(&[3]),
        8 => Some(&[2]),
        9 => Some(&[1]),
        14 => Some(&[4]),
        15 => Some(&[3, 5]),
        16 => Some(&[2, 4, 6]),
        17 => Some(&[1]),
        33 => Some(&[3, 5]),
        34 => Some(&[2, 4, 6]),
        35 => Some(&[1]),
        53 => Some(&[1, 3, 5]),
        _ => None,
    }
}

/// Allowed valences of an element carrying a formal charge.
///
/// A charged atom is treated as its isoelectronic neighbour: N+ behaves like
/// C, O- like F, B- like C, and so on.
pub fn allowed_valences(atomic_number: u8, charge: i8) -> Option<&'static [u32]> {
    if atomic_number == 0 {
        return None;
    }
    let shifted = atomic_number as i16 - charge as i16;
    if shifted <= 0 || shifted > 118 {
        return None;
    }
    let shifted = shifted as u8;
    // Only shift within the same period of the main group; otherwise the
    // charged species is not valence-checked.
    if charge != 0 && period(shifted) != period(atomic_number) {
        return None;
    }
    neutral_valences(shifted)
}

fn period(atomic_number: u8) -> u8 {
    match atomic_number {
        0..=2 => 1,
        3..=10 => 2,
        11..=18 => 3,
        19..=36 => 4,
        37..=54 => 5,
        55..=86 => 6,
        _ => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Cl"), Some(17));
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(symbol(35), "Br");
    }

    #[test]
    fn test_charged_valences() {
        assert_eq!(allowed_valences(NITROGEN, 1), Some(&[4][..]));
        assert_eq!(allowed_valences(OXYGEN, -1), Some(&[1][..]));
        assert_eq!(allowed_valences(CARBON, -1), Some(&[3][..]));
        assert_eq!(allowed_valences(CARBON, 1), Some(&[3][..]));
        assert_eq!(allowed_valences(26, 0), None);
    }
}
