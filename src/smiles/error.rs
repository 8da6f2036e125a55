/// Errors that can occur while parsing or sanitizing a SMILES string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmilesError {
    /// Input contained no atoms
    #[error("Empty SMILES string")]
    Empty,

    /// Input has more atoms than [`MAX_ATOMS`](super::MAX_ATOMS)
    #[error("More than {0} atoms")]
    TooManyAtoms(usize),

    /// Character not allowed at this position
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Byte offset in the input
        pos: usize,
    },

    /// Input ended inside a bracket atom or ring label
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// Bracket atom with an unknown element symbol
    #[error("Unknown element '{0}'")]
    UnknownElement(String),

    /// Ring bond label opened but never closed
    #[error("Unclosed ring bond {0}")]
    UnclosedRing(u16),

    /// Parentheses do not balance
    #[error("Unbalanced parentheses at position {0}")]
    UnbalancedParen(usize),

    /// Bond symbol not followed by an atom or ring label
    #[error("Dangling bond at position {0}")]
    DanglingBond(usize),

    /// Ring closure labels on both ends specify different bond orders
    #[error("Conflicting bond orders on ring bond {0}")]
    RingBondMismatch(u16),

    /// Ring closure that would bond an atom to itself or duplicate a bond
    #[error("Invalid ring closure {0}")]
    InvalidRingClosure(u16),

    /// Atom carries more bonds than any allowed valence
    #[error("Explicit valence {valence} for atom {index} ({symbol}) is greater than permitted")]
    Valence {
        /// Atom index in parse order
        index: usize,
        /// Element symbol
        symbol: String,
        /// Sum of bond orders and explicit hydrogens
        valence: u32,
    },

    /// Aromatic atom that is not part of any ring
    #[error("Non-ring atom {0} marked aromatic")]
    NonRingAromatic(usize),

    /// Aromatic flag on an element that cannot be aromatic
    #[error("Element '{0}' cannot be aromatic")]
    InvalidAromatic(String),

    /// No Kekulé structure exists for the aromatic system
    #[error("Can't kekulize aromatic system")]
    Kekulize,
}
