//! A family is one bucket of the partition: a signature plus the words that share it, in the
//! order they were encountered.

use rand::Rng;
use smallvec::SmallVec;
use std::fmt;
use std::fmt::{Debug, Formatter};

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use crate::config::FamilyConfig;
use crate::error::FamilyError;
use crate::signature::revealed_positions;
use crate::MAX_WORD_LENGTH;

/// An append-only list of borrowed words whose capacity grows by a fixed increment whenever it
/// fills up. The words themselves are owned by whoever supplied them to `partition`.
pub struct MemberList<'w> {
    words: Vec<&'w str>,

    /// The number of members we've made room for. `words` is always allocated for at least this
    /// many, so pushes below it never reallocate.
    capacity: usize,

    increment: usize,
}

impl<'w> MemberList<'w> {
    /// Build an empty list with room for `increment` members.
    pub fn with_increment(increment: usize) -> Result<MemberList<'w>, FamilyError> {
        if increment == 0 {
            return Err(FamilyError::InvalidIncrement(increment));
        }

        let mut words = Vec::new();
        words
            .try_reserve_exact(increment)
            .map_err(|_| FamilyError::AllocationFailed {
                requested: increment,
            })?;

        Ok(MemberList {
            words,
            capacity: increment,
            increment,
        })
    }

    /// Append a word, first growing the list by one increment if it's full.
    pub fn push(&mut self, word: &'w str) -> Result<(), FamilyError> {
        if self.words.len() == self.capacity {
            self.words
                .try_reserve_exact(self.increment)
                .map_err(|_| FamilyError::AllocationFailed {
                    requested: self.increment,
                })?;
            self.capacity += self.increment;
        }

        self.words.push(word);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// How many members fit before the next growth step.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn increment(&self) -> usize {
        self.increment
    }

    #[must_use]
    pub fn as_slice(&self) -> &[&'w str] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &'w str> + '_ {
        self.words.iter().copied()
    }
}

impl Debug for MemberList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberList")
            .field("len", &self.words.len())
            .field("capacity", &self.capacity)
            .field("increment", &self.increment)
            .finish()
    }
}

/// A single node of a `FamilyList`.
pub struct Family<'w> {
    signature: String,
    members: MemberList<'w>,

    /// The following family in first-seen order, if any. Each node owns the rest of the chain.
    pub(crate) next: Option<Box<Family<'w>>>,
}

impl<'w> Family<'w> {
    /// Build an empty family for the given signature, sized according to `config`.
    pub fn new(signature: &str, config: &FamilyConfig) -> Result<Family<'w>, FamilyError> {
        Ok(Family {
            signature: signature.to_string(),
            members: MemberList::with_increment(config.increment())?,
            next: None,
        })
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[must_use]
    pub fn members(&self) -> &MemberList<'w> {
        &self.members
    }

    /// The number of words in the family.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a word to the end of the family. Only the partitioning pass adds words, and it has
    /// already checked that the word has this family's signature.
    pub(crate) fn add_word(&mut self, word: &'w str) -> Result<(), FamilyError> {
        debug_assert_eq!(
            word.chars().count(),
            self.signature.chars().count(),
            "Word {word} doesn't fit family signature {}",
            self.signature
        );
        self.members.push(word)
    }

    /// Copy the family's members into a fresh `Vec`, in order. The result doesn't share storage
    /// with the family, so later growth of the family can't affect it.
    #[must_use]
    pub fn export_members(&self) -> Vec<&'w str> {
        self.members.as_slice().to_vec()
    }

    /// Pick one member uniformly at random.
    pub fn random_member<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'w str, FamilyError> {
        if self.members.is_empty() {
            return Err(FamilyError::EmptyFamily {
                signature: self.signature.clone(),
            });
        }

        Ok(self.members.as_slice()[rng.gen_range(0..self.members.len())])
    }

    /// The positions at which every word in this family shows the pivot letter.
    #[must_use]
    pub fn revealed_positions(&self) -> SmallVec<[usize; MAX_WORD_LENGTH]> {
        revealed_positions(&self.signature)
    }

    /// The family that follows this one in its list.
    #[must_use]
    pub fn next(&self) -> Option<&Family<'w>> {
        self.next.as_deref()
    }

    /// An owned snapshot of the family that doesn't borrow from the word source.
    #[must_use]
    pub fn summary(&self) -> FamilySummary {
        FamilySummary {
            signature: self.signature.clone(),
            words: self.members.iter().map(str::to_string).collect(),
        }
    }
}

impl Debug for Family<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("signature", &self.signature)
            .field("members", &self.members.as_slice())
            .finish_non_exhaustive()
    }
}

/// A family's signature and words, detached from the list it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FamilySummary {
    pub signature: String,
    pub words: Vec<String>,
}
