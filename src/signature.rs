//! Signatures reduce a word to the positions of one pivot letter. Two words belong to the same
//! family exactly when their signatures for that letter are equal.

use smallvec::SmallVec;

use crate::error::FamilyError;
use crate::{MAX_WORD_LENGTH, PLACEHOLDER};

/// Compute the signature of `word` with respect to `letter`: a string of the same length that
/// shows `letter` wherever the word does and `PLACEHOLDER` everywhere else.
///
/// The word must be non-empty and the letter must come from the single-byte alphabet.
#[must_use]
pub fn signature_of(word: &str, letter: char) -> String {
    assert!(!word.is_empty(), "Can't compute the signature of an empty word");
    assert!(letter.is_ascii(), "Pivot letter must be ASCII, got {letter:?}");

    word.chars()
        .map(|ch| if ch == letter { letter } else { PLACEHOLDER })
        .collect()
}

/// Does `word` belong to the family with the given signature?
#[must_use]
pub fn matches_signature(word: &str, letter: char, signature: &str) -> bool {
    word.chars().count() == signature.chars().count()
        && word
            .chars()
            .zip(signature.chars())
            .all(|(word_ch, sig_ch)| {
                if word_ch == letter {
                    sig_ch == letter
                } else {
                    sig_ch == PLACEHOLDER
                }
            })
}

/// The indices of a signature that show a letter rather than the placeholder.
#[must_use]
pub fn revealed_positions(signature: &str) -> SmallVec<[usize; MAX_WORD_LENGTH]> {
    signature
        .chars()
        .enumerate()
        .filter(|&(_, ch)| ch != PLACEHOLDER)
        .map(|(idx, _)| idx)
        .collect()
}

/// Merge a family signature into a running pattern of revealed letters. Letters in the signature
/// overwrite the pattern; placeholder positions keep whatever the pattern already showed.
pub fn reveal(pattern: &str, signature: &str) -> Result<String, FamilyError> {
    let expected = pattern.chars().count();
    let actual = signature.chars().count();
    if expected != actual {
        return Err(FamilyError::SignatureLengthMismatch { expected, actual });
    }

    Ok(pattern
        .chars()
        .zip(signature.chars())
        .map(|(pattern_ch, sig_ch)| {
            if sig_ch == PLACEHOLDER {
                pattern_ch
            } else {
                sig_ch
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::error::FamilyError;
    use crate::signature::{matches_signature, reveal, revealed_positions, signature_of};

    #[test]
    fn test_signature_keeps_only_pivot_letter() {
        assert_eq!(signature_of("dog", 'd'), "d--");
        assert_eq!(signature_of("dig", 'g'), "--g");
        assert_eq!(signature_of("cat", 'd'), "---");
        assert_eq!(signature_of("deed", 'e'), "-ee-");
        assert_eq!(signature_of("eee", 'e'), "eee");
    }

    #[test]
    fn test_signature_length_matches_word() {
        for word in ["a", "be", "tree", "lengthier"] {
            let signature = signature_of(word, 'e');
            assert_eq!(signature.len(), word.len());
            for (word_ch, sig_ch) in word.chars().zip(signature.chars()) {
                assert_eq!(sig_ch == 'e', word_ch == 'e', "{word} / {signature}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "empty word")]
    fn test_signature_of_empty_word_panics() {
        let _ = signature_of("", 'e');
    }

    #[test]
    fn test_matches_signature() {
        assert!(matches_signature("dot", 'd', "d--"));
        assert!(!matches_signature("dig", 'g', "d--"));
        assert!(!matches_signature("dots", 'd', "d--"));
        assert!(!matches_signature("odd", 'd', "-d-"));
    }

    #[test]
    fn test_revealed_positions() {
        assert_eq!(revealed_positions("-ee-").as_slice(), &[1, 2]);
        assert!(revealed_positions("----").is_empty());
    }

    #[test]
    fn test_reveal_merges_signature_into_pattern() {
        assert_eq!(reveal("----", "-ee-").unwrap(), "-ee-");
        assert_eq!(reveal("-ee-", "d--d").unwrap(), "deed");
        assert_eq!(reveal("t---", "----").unwrap(), "t---");
        assert_eq!(
            reveal("---", "----"),
            Err(FamilyError::SignatureLengthMismatch {
                expected: 3,
                actual: 4
            })
        );
    }
}
