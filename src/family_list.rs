//! This module implements the partitioning pass itself: words are grouped into a singly linked
//! list of families keyed by signature, with families in the order their signatures were first
//! seen and members in input order.

use std::io;
use std::io::Write;

use crate::config::FamilyConfig;
use crate::error::FamilyError;
use crate::family::{Family, FamilySummary};
use crate::signature::{matches_signature, signature_of};
use crate::types::{FamilyId, WordId};
use crate::{CHECK_INVARIANTS, LOG_PARTITION_PROCESS};

/// The result of partitioning a word sequence by one letter. The list borrows its words from the
/// sequence it was built from, so it can't outlive that sequence. Dropping the list (or calling
/// `teardown`) releases every family in it.
pub struct FamilyList<'w> {
    head: Option<Box<Family<'w>>>,
    len: usize,
    letter: char,
}

impl<'w> FamilyList<'w> {
    /// Build an empty list for the given pivot letter.
    fn new(letter: char) -> FamilyList<'w> {
        FamilyList {
            head: None,
            len: 0,
            letter,
        }
    }

    /// The pivot letter the list was partitioned by.
    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// The number of families in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first family in the list, if there is one.
    #[must_use]
    pub fn head(&self) -> Option<&Family<'w>> {
        self.head.as_deref()
    }

    /// Iterate over the families in first-seen order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, 'w> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Find the family with exactly the given signature.
    #[must_use]
    pub fn find_by_signature(&self, signature: &str) -> Option<&Family<'w>> {
        self.iter().find(|family| family.signature() == signature)
    }

    /// Find a family with the most members, or `None` if the list is empty. When several families
    /// tie, any one of them may be returned; currently it's the first in list order, but callers
    /// shouldn't rely on that.
    #[must_use]
    pub fn find_largest(&self) -> Option<&Family<'w>> {
        let mut largest: Option<&Family<'w>> = None;
        for family in self {
            if largest.map_or(true, |best| family.len() > best.len()) {
                largest = Some(family);
            }
        }
        largest
    }

    /// Like `find_largest`, but treating an empty list as an error.
    pub fn try_find_largest(&self) -> Result<&Family<'w>, FamilyError> {
        self.find_largest().ok_or(FamilyError::EmptyFamilyList)
    }

    /// Owned snapshots of every family, in list order.
    #[must_use]
    pub fn summaries(&self) -> Vec<FamilySummary> {
        self.iter().map(Family::summary).collect()
    }

    /// Release every family in the list. This is what dropping the list does anyway; it exists so
    /// that callers can make the end of the list's life explicit.
    pub fn teardown(self) {
        drop(self);
    }

    /// Add `word` to the family for `signature`, creating that family at the end of the list if
    /// it doesn't exist yet. Returns the id of the family the word landed in.
    fn add_word(
        &mut self,
        word: &'w str,
        signature: &str,
        config: &FamilyConfig,
    ) -> Result<FamilyId, FamilyError> {
        let mut family_id = 0;
        let mut cursor = &mut self.head;

        while let Some(family) = cursor {
            if family.signature() == signature {
                family.add_word(word)?;
                return Ok(family_id);
            }
            family_id += 1;
            cursor = &mut family.next;
        }

        let mut family = Box::new(Family::new(signature, config)?);
        family.add_word(word)?;
        *cursor = Some(family);
        self.len += 1;

        Ok(family_id)
    }

    /// Panic unless every member of every family has that family's signature and no signature
    /// appears twice.
    fn check_invariants(&self) {
        let mut seen: Vec<&str> = Vec::with_capacity(self.len);
        for family in self {
            assert!(
                !seen.contains(&family.signature()),
                "Duplicate family signature {}",
                family.signature()
            );
            seen.push(family.signature());

            for word in family.members().iter() {
                assert!(
                    matches_signature(word, self.letter, family.signature()),
                    "Word {word} doesn't match family signature {}",
                    family.signature()
                );
            }
        }
        assert_eq!(seen.len(), self.len, "Family count is out of date");
    }
}

impl Drop for FamilyList<'_> {
    /// Unlink the families one at a time, so that a long list doesn't recurse through its whole
    /// chain of boxes.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut family) = next {
            next = family.next.take();
        }
    }
}

/// Iterator over the families of a `FamilyList`.
pub struct Iter<'a, 'w> {
    next: Option<&'a Family<'w>>,
}

impl<'a, 'w> Iterator for Iter<'a, 'w> {
    type Item = &'a Family<'w>;

    fn next(&mut self) -> Option<Self::Item> {
        let family = self.next?;
        self.next = family.next.as_deref();
        Some(family)
    }
}

impl<'a, 'w> IntoIterator for &'a FamilyList<'w> {
    type Item = &'a Family<'w>;
    type IntoIter = Iter<'a, 'w>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Group `words` into families according to their signatures for `letter`. Families appear in
/// the order their signatures are first seen, and each family keeps its words in input order.
/// An empty input produces an empty list.
///
/// The families borrow the words themselves rather than the slice, so members exported from one
/// partition can be fed straight into the next.
///
/// Lookup is a linear scan over the families built so far, which keeps the list itself the only
/// index we maintain.
pub fn partition<'w>(
    words: &[&'w str],
    letter: char,
    config: &FamilyConfig,
) -> Result<FamilyList<'w>, FamilyError> {
    let mut families = FamilyList::new(letter);

    for (word_id, &word) in words.iter().enumerate() {
        let signature = signature_of(word, letter);
        let family_id = families.add_word(word, &signature, config)?;

        if LOG_PARTITION_PROCESS {
            log_placement(word_id, word, &signature, family_id);
        }
    }

    if LOG_PARTITION_PROCESS {
        println!(
            "Partitioned {} words by {letter:?} into {} families",
            words.len(),
            families.len()
        );
    }

    if CHECK_INVARIANTS {
        families.check_invariants();
    }

    Ok(families)
}

fn log_placement(word_id: WordId, word: &str, signature: &str, family_id: FamilyId) {
    println!("word #{word_id} {word} -> family #{family_id} {signature}");
}

/// Write each family's signature, member count, and members to `out`, in list order. The format
/// is stable so that the output can be compared byte-for-byte.
pub fn write_families<W: Write + ?Sized>(
    families: &FamilyList<'_>,
    out: &mut W,
) -> io::Result<()> {
    for family in families {
        writeln!(
            out,
            "***Family signature: {} Num words: {}",
            family.signature(),
            family.len()
        )?;
        for word in family.members().iter() {
            writeln!(out, "     {word}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the families to stdout in the `write_families` format.
pub fn print_families(families: &FamilyList<'_>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_families(families, &mut handle)
}

#[cfg(test)]
mod tests {
    use crate::config::FamilyConfig;
    use crate::error::FamilyError;
    use crate::family_list::{partition, write_families, FamilyList};
    use crate::signature::signature_of;
    use crate::word_list::tests::word_list_source_config;
    use crate::word_list::WordList;

    fn signatures(families: &FamilyList<'_>) -> Vec<String> {
        families
            .iter()
            .map(|family| family.signature().to_string())
            .collect()
    }

    fn assert_members_match(families: &FamilyList<'_>) {
        for family in families {
            for word in family.members().iter() {
                assert_eq!(signature_of(word, families.letter()), family.signature());
            }
        }
    }

    #[test]
    fn test_partition_groups_by_signature() {
        let words = ["dog", "cat", "dot", "odd"];
        let families = partition(&words, 'd', &FamilyConfig::default()).unwrap();

        assert_eq!(families.len(), 3);
        assert_eq!(signatures(&families), vec!["d--", "---", "-dd"]);

        let head = families.head().unwrap();
        assert_eq!(head.members().as_slice(), &["dog", "dot"]);
        assert_members_match(&families);
    }

    #[test]
    fn test_words_with_matching_pivot_positions_share_a_family() {
        // "dig" only shows the pivot letter in its first position, so it joins "dog" and "dot".
        let words = ["dog", "cat", "dot", "dig"];
        let families = partition(&words, 'd', &FamilyConfig::default()).unwrap();

        assert_eq!(signatures(&families), vec!["d--", "---"]);
        assert_eq!(
            families.head().unwrap().export_members(),
            vec!["dog", "dot", "dig"]
        );
    }

    #[test]
    fn test_partition_of_empty_input() {
        let words: [&str; 0] = [];
        let families = partition(&words, 'e', &FamilyConfig::default()).unwrap();

        assert!(families.is_empty());
        assert_eq!(families.len(), 0);
        assert!(families.head().is_none());
        assert!(families.find_largest().is_none());
        assert!(families.try_find_largest().is_err());
        assert!(families.find_by_signature("---").is_none());
    }

    #[test]
    fn test_partition_is_stable_across_growth() {
        let words: Vec<String> = (0..50)
            .map(|idx| {
                if idx % 3 == 0 {
                    format!("e{idx:03}")
                } else {
                    format!("x{idx:03}")
                }
            })
            .collect();
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let families = partition(&word_refs, 'e', &FamilyConfig::new(2).unwrap()).unwrap();

        assert_eq!(signatures(&families), vec!["e---", "----"]);

        let expected_e: Vec<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|word| word.starts_with('e'))
            .collect();
        let expected_x: Vec<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|word| word.starts_with('x'))
            .collect();

        let e_family = families.find_by_signature("e---").unwrap();
        let x_family = families.find_by_signature("----").unwrap();
        assert_eq!(e_family.export_members(), expected_e);
        assert_eq!(x_family.export_members(), expected_x);
        assert_eq!(e_family.members().capacity(), 18);
    }

    #[test]
    fn test_partition_surfaces_allocation_failure() {
        let config = FamilyConfig::new(usize::MAX / 4).unwrap();

        assert_eq!(
            partition(&["dog"], 'd', &config).err(),
            Some(FamilyError::AllocationFailed {
                requested: usize::MAX / 4
            })
        );
    }

    #[test]
    fn test_find_by_signature() {
        let words = ["tree", "seed", "free", "tea"];
        let families = partition(&words, 'e', &FamilyConfig::default()).unwrap();

        let family = families.find_by_signature("--ee").unwrap();
        assert_eq!(family.members().as_slice(), &["tree", "free"]);
        assert_eq!(families.find_by_signature("-e-").unwrap().len(), 1);
        assert!(families.find_by_signature("e---").is_none());
        assert!(families.find_by_signature("--e").is_none());
    }

    #[test]
    fn test_find_largest_with_ties() {
        // Family sizes in list order: 3, 1, 5, 5.
        let words = [
            "dirt", "echo", "beep", "jams", "able", "deed", "cold", "acre", "feed", "bake", "heel",
            "dice", "meet", "fade",
        ];
        let families = partition(&words, 'e', &FamilyConfig::default()).unwrap();

        assert_eq!(
            families.iter().map(|family| family.len()).collect::<Vec<_>>(),
            vec![3, 1, 5, 5]
        );

        let largest = families.find_largest().unwrap();
        assert_eq!(largest.len(), 5);
        assert!(["-ee-", "---e"].contains(&largest.signature()));
    }

    #[test]
    fn test_summaries_outlive_the_words() {
        let summaries = {
            let words = vec!["tree".to_string(), "seed".to_string(), "free".to_string()];
            let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let families = partition(&word_refs, 'e', &FamilyConfig::default()).unwrap();
            families.summaries()
        };

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].signature, "--ee");
        assert_eq!(summaries[0].words, vec!["tree", "free"]);
        assert_eq!(summaries[1].words, vec!["seed"]);
    }

    #[test]
    fn test_write_families_format() {
        let words = ["dog", "cat", "dot", "odd"];
        let families = partition(&words, 'd', &FamilyConfig::default()).unwrap();

        let mut out = Vec::new();
        write_families(&families, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "***Family signature: d-- Num words: 2\n     dog\n     dot\n\n\
             ***Family signature: --- Num words: 1\n     cat\n\n\
             ***Family signature: -dd Num words: 1\n     odd\n\n"
        );
    }

    #[test]
    fn test_narrowing_rounds() {
        let word_list = WordList::new(word_list_source_config(), Some(4));
        let four_letter_words = word_list.words_of_length(4);
        let config = FamilyConfig::new(4).unwrap();

        let first_round = partition(&four_letter_words, 'e', &config).unwrap();
        assert_members_match(&first_round);
        assert_eq!(
            first_round.iter().map(|family| family.len()).sum::<usize>(),
            four_letter_words.len()
        );

        let survivors = first_round.find_largest().unwrap().export_members();
        let signature = first_round.find_largest().unwrap().signature().to_string();
        first_round.teardown();

        let second_round = partition(&survivors, 'd', &config).unwrap();
        assert_members_match(&second_round);
        for family in &second_round {
            for word in family.members().iter() {
                assert_eq!(signature_of(word, 'e'), signature);
            }
        }
    }

    #[test]
    fn test_teardown_of_many_families() {
        // Every word gets a distinct signature, so the list is as long as the input.
        let words: Vec<String> = (0..1024u32)
            .map(|bits| {
                (0..10)
                    .map(|bit| if bits & (1 << bit) == 0 { 'a' } else { 'b' })
                    .collect()
            })
            .collect();
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let families = partition(&word_refs, 'a', &FamilyConfig::new(1).unwrap()).unwrap();

        assert_eq!(families.len(), 1024);
        assert!(families.iter().all(|family| family.len() == 1));
        families.teardown();
    }

    #[test]
    fn test_check_invariants_accepts_partition() {
        let words = ["seed", "weed", "veer", "went", "eye"];
        let families = partition(&words, 'e', &FamilyConfig::default()).unwrap();
        families.check_invariants();
    }
}
