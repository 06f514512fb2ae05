//! Ordering names the way Xcode's project navigator does.
//!
//! Every name is turned into a [`NaturalSortKey`] made of two token lists,
//! compared one after the other:
//!
//! 1. **Natural tokens.** The name is split into digit runs, letter runs and
//!    single other characters. Punctuation and whitespace below `'0'` sort
//!    first, by code point; digit runs come next, by numeric value; letter
//!    runs and the remaining characters come last, compared after
//!    compatibility decomposition with accents stripped and case folded.
//! 2. **Tiebreak tokens.** Names equal under the natural tokens are split
//!    into digit and non-digit runs instead; digit runs compare by the value
//!    of their reversed digits and other runs compare with their case
//!    swapped. This makes `"a"` precede `"A"` and `"1"` precede `"01"`.
//!
//! Comparing keys is a strict weak ordering, so keys work with any sort and
//! as map keys. Ordering is for presentation only; storage order is never
//! sorted.
//!
//! ```
//! use pbxgraph::natural_sort::sort_names;
//!
//! let mut names = vec!["10", "a", "2", ".a", "A", "1", " a"];
//! sort_names(&mut names);
//! assert_eq!(names, vec![" a", ".a", "1", "2", "10", "a", "A"]);
//! ```

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NATURAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|\p{L}+|[^0-9\p{L}]").expect("valid token pattern"));

static TIEBREAK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[^0-9]+").expect("valid token pattern"));

static NONSPACING_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Mn}").expect("valid mark pattern"));

/// One comparable piece of a name. Variants are listed in sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Whitespace or punctuation sorting before digits.
    Separator(char),
    /// Decimal digits without leading zeros; empty for zero.
    Number(String),
    Text(String),
}

impl Token {
    fn number(digits: &str) -> Self {
        Token::Number(digits.trim_start_matches('0').to_string())
    }

    fn rank(&self) -> u8 {
        match self {
            Token::Separator(_) => 0,
            Token::Number(_) => 1,
            Token::Text(_) => 2,
        }
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Token::Separator(a), Token::Separator(b)) => a.cmp(b),
            // Without leading zeros, a longer run is a larger number.
            (Token::Number(a), Token::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Token::Text(a), Token::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A name prepared for repeated comparison.
///
/// Building the key does all tokenizing and normalization once, which makes
/// it the right thing to hand to `sort_by_cached_key` or to store next to
/// listed objects.
#[derive(Debug, Clone)]
pub struct NaturalSortKey {
    name: String,
    natural: Vec<Token>,
    tiebreak: Vec<Token>,
}

impl NaturalSortKey {
    /// Prepares `name`.
    pub fn new(name: &str) -> Self {
        let natural = NATURAL_TOKEN
            .find_iter(name)
            .map(|m| natural_token(m.as_str()))
            .collect();
        let tiebreak = TIEBREAK_TOKEN
            .find_iter(name)
            .map(|m| {
                let piece = m.as_str();
                if is_digits(piece) {
                    let reversed: String = piece.chars().rev().collect();
                    Token::number(&reversed)
                } else {
                    Token::Text(swap_case(piece))
                }
            })
            .collect();
        Self {
            name: name.to_string(),
            natural,
            tiebreak,
        }
    }

    /// The name this key was built from.
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn natural_token(piece: &str) -> Token {
    if is_digits(piece) {
        return Token::number(piece);
    }
    let mut chars = piece.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c < '0' {
            return Token::Separator(c);
        }
    }
    let decomposed: String = piece.nfkd().collect();
    Token::Text(NONSPACING_MARK.replace_all(&decomposed, "").to_lowercase())
}

impl Ord for NaturalSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.natural
            .cmp(&other.natural)
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for NaturalSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NaturalSortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NaturalSortKey {}

/// Compares two names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NaturalSortKey::new(a).cmp(&NaturalSortKey::new(b))
}

/// Sorts names in place. The sort is stable.
pub fn sort_names<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| NaturalSortKey::new(name.as_ref()));
}

fn is_digits(piece: &str) -> bool {
    piece.bytes().all(|b| b.is_ascii_digit())
}

fn swap_case(piece: &str) -> String {
    let mut swapped = String::with_capacity(piece.len());
    for c in piece.chars() {
        if c.is_lowercase() {
            swapped.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            swapped.extend(c.to_lowercase());
        } else {
            swapped.push(c);
        }
    }
    swapped
}
