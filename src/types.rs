/// An identifier for a word, based on its index in the word sequence handed to `partition`.
pub type WordId = usize;

/// An identifier for a family, based on its position in a `FamilyList` (first-seen order).
pub type FamilyId = usize;
