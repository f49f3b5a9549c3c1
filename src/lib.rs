//! Partitions word lists into "families" of words that share a signature with respect to one
//! pivot letter: every occurrence of the letter is kept and every other position is replaced by
//! a placeholder. This is the step a letter-guessing game uses to pick the next set of candidate
//! words after a guess.

pub mod config;
pub mod error;
pub mod family;
pub mod family_list;
pub mod signature;
pub mod types;
pub mod word_list;

pub use config::{init_families, FamilyConfig, FamilyContext};
pub use error::FamilyError;
pub use family::{Family, FamilySummary, MemberList};
pub use family_list::{partition, print_families, write_families, FamilyList};
pub use signature::signature_of;

pub const LOG_PARTITION_PROCESS: bool = cfg!(feature = "log_partition_process");
pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// The character standing in for every non-pivot position of a signature.
pub const PLACEHOLDER: char = '-';

/// How many member slots a new family starts with, and how many are added each time it fills up,
/// unless configured otherwise.
pub const DEFAULT_FAMILY_INCREMENT: usize = 8;

/// The expected maximum length for a single word.
pub const MAX_WORD_LENGTH: usize = 24;
