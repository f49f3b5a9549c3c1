use std::fmt;

/// Failures surfaced by family construction and the list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyError {
    /// The growth increment has to be positive.
    InvalidIncrement(usize),

    /// The allocator couldn't provide room for `requested` more members.
    AllocationFailed { requested: usize },

    /// A query that needs at least one family was run against an empty list.
    EmptyFamilyList,

    /// A query that needs at least one member was run against an empty family.
    EmptyFamily { signature: String },

    /// A signature was applied to a pattern of a different length.
    SignatureLengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FamilyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match self {
            FamilyError::InvalidIncrement(increment) => {
                format!("Family increment must be positive, got {increment}")
            }
            FamilyError::AllocationFailed { requested } => {
                format!("Couldn’t allocate room for {requested} more family members")
            }
            FamilyError::EmptyFamilyList => "Family list is empty".to_string(),
            FamilyError::EmptyFamily { signature } => {
                format!("Family “{signature}” has no members")
            }
            FamilyError::SignatureLengthMismatch { expected, actual } => {
                format!("Signature has length {actual}, expected {expected}")
            }
        };
        write!(f, "{string}")
    }
}

impl std::error::Error for FamilyError {}
