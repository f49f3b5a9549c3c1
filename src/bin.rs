use clap::Parser;
use std::fmt::{Debug, Formatter};
use word_families::family_list::{partition, print_families};
use word_families::signature::reveal;
use word_families::word_list::{WordList, WordListSourceConfig};
use word_families::{FamilyContext, DEFAULT_FAMILY_INCREMENT, PLACEHOLDER};

const WORDS_RAW: &str = include_str!("../resources/words.dict");

/// word-families: Partition a word list into letter-signature families
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Letters to partition by, one round per letter; each round keeps the biggest family
    letters: String,

    /// Length of the words to partition
    #[arg(long)]
    length: usize,

    /// Path to a word list file, one word per line [default: (embedded word list)]
    #[arg(long)]
    wordlist: Option<String>,

    /// Initial and incremental capacity of each family's member list
    #[arg(long, default_value_t = DEFAULT_FAMILY_INCREMENT)]
    increment: usize,

    /// Seed for picking a random word from the final family [default: random]
    #[arg(long)]
    seed: Option<u64>,
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    if args.length == 0 {
        return Err(Error("Word length must be positive".into()));
    }

    if args.letters.is_empty() || !args.letters.chars().all(|ch| ch.is_ascii_lowercase()) {
        return Err(Error("Letters must be one or more lowercase ASCII letters".into()));
    }

    let mut context = match args.seed {
        Some(seed) => FamilyContext::with_seed(args.increment, seed),
        None => FamilyContext::new(args.increment),
    }
    .map_err(|err| Error(err.to_string()))?;

    let word_list = WordList::new(
        vec![match args.wordlist {
            Some(wordlist_path) => WordListSourceConfig::File {
                id: "0".into(),
                path: wordlist_path.into(),
            },
            None => WordListSourceConfig::FileContents {
                id: "0".into(),
                contents: WORDS_RAW,
            },
        }],
        Some(args.length),
    );

    if let Some(errors) = word_list.get_source_errors().get("0") {
        if let [error] = errors.as_slice() {
            return Err(Error(format!("{error}")));
        } else if !errors.is_empty() {
            let mut full_error: String = "".into();
            for error in errors {
                full_error.push_str(&format!("\n- {error}"));
            }
            return Err(Error(full_error));
        }
    }

    let mut candidates = word_list.words_of_length(args.length);
    if candidates.is_empty() {
        return Err(Error(format!("Word list has no words of length {}", args.length)));
    }

    let mut pattern: String = std::iter::repeat(PLACEHOLDER).take(args.length).collect();

    let round_count = args.letters.chars().count();

    for (round, letter) in args.letters.chars().enumerate() {
        let families = partition(&candidates, letter, &context.config)
            .map_err(|err| Error(err.to_string()))?;

        println!("Partitioning {} words by '{letter}':", candidates.len());
        print_families(&families).map_err(|err| Error(err.to_string()))?;

        let biggest = families
            .try_find_largest()
            .map_err(|err| Error(err.to_string()))?;
        pattern = reveal(&pattern, biggest.signature()).map_err(|err| Error(err.to_string()))?;
        println!(
            "Keeping family {} ({} words), pattern is now {pattern}\n",
            biggest.signature(),
            biggest.len()
        );

        if round + 1 == round_count {
            let word = context
                .random_member(biggest)
                .map_err(|err| Error(err.to_string()))?;
            println!("A word from the final family: {word}");
        }

        let next_candidates = biggest.export_members();
        families.teardown();
        candidates = next_candidates;
    }

    Ok(())
}
