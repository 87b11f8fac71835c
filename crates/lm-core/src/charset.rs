use std::collections::BTreeSet;

use crate::error::CoreError;

/// Chiffres 0 à 9, jeu initial du shell.
pub const CHARSET_DIGITS: &str = "0123456789";

/// 10 caractères, compact, bon contraste.
pub const CHARSET_COMPACT: &str = " .:-=+*#%@";

/// 69 caractères : rampe de Paul Bourke.
pub const CHARSET_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Premier caractère de `add all` / `remove all`.
pub const FIRST_RENDERABLE: char = ' ';
/// Dernier caractère ASCII imprimable.
pub const LAST_RENDERABLE: char = '~';
/// Premier caractère accepté dans une plage `a-b` (l'espace passe par `space`).
pub const FIRST_RANGE_CHAR: char = '!';

/// Ordered, duplicate-free character set used for matching.
///
/// Enumeration order is ascending code point, which fixes the
/// last-write-wins order when two glyphs share a brightness.
///
/// # Example
/// ```
/// use lm_core::charset::CharSet;
/// let mut set = CharSet::from_chars("ba");
/// set.add_range('c', 'e');
/// assert_eq!(set.to_vec(), vec!['a', 'b', 'c', 'd', 'e']);
/// set.remove_range('b', 'd');
/// assert_eq!(set.to_vec(), vec!['a', 'e']);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: BTreeSet<char>,
}

impl CharSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from every character of `chars`.
    #[must_use]
    pub fn from_chars(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }

    /// Insert every character in the inclusive range. Reversed bounds are swapped.
    pub fn add_range(&mut self, begin: char, end: char) {
        let (lo, hi) = ordered(begin, end);
        self.chars.extend(lo..=hi);
    }

    /// Remove every character in the inclusive range. Reversed bounds are swapped.
    pub fn remove_range(&mut self, begin: char, end: char) {
        let (lo, hi) = ordered(begin, end);
        for ch in lo..=hi {
            self.chars.remove(&ch);
        }
    }

    /// Add every printable ASCII character, space included.
    pub fn add_all(&mut self) {
        self.add_range(FIRST_RENDERABLE, LAST_RENDERABLE);
    }

    /// Remove every printable ASCII character, space included.
    pub fn remove_all(&mut self) {
        self.remove_range(FIRST_RENDERABLE, LAST_RENDERABLE);
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Snapshot in enumeration order, as handed to the matcher.
    #[must_use]
    pub fn to_vec(&self) -> Vec<char> {
        self.iter().collect()
    }
}

/// Validate a user range `begin-end` against printable ASCII (`!`..=`~`).
///
/// # Errors
/// Returns [`CoreError::CharRange`] if either bound is outside the window.
///
/// # Example
/// ```
/// use lm_core::charset::checked_range;
/// assert_eq!(checked_range('z', 'a').unwrap(), ('a', 'z'));
/// assert!(checked_range('a', 'é').is_err());
/// ```
pub fn checked_range(begin: char, end: char) -> Result<(char, char), CoreError> {
    let valid = |c: char| (FIRST_RANGE_CHAR..=LAST_RENDERABLE).contains(&c);
    if valid(begin) && valid(end) {
        Ok(ordered(begin, end))
    } else {
        Err(CoreError::CharRange { begin, end })
    }
}

fn ordered(a: char, b: char) -> (char, char) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_all_covers_printable_ascii() {
        let mut set = CharSet::new();
        set.add_all();
        assert_eq!(set.len(), 95);
        assert!(set.contains(' '));
        assert!(set.contains('~'));
        set.remove_all();
        assert!(set.is_empty());
    }

    #[test]
    fn reversed_range_is_swapped() {
        let mut set = CharSet::new();
        set.add_range('9', '0');
        assert_eq!(set, CharSet::from_chars(CHARSET_DIGITS));
    }

    #[test]
    fn presets_are_duplicate_free() {
        assert_eq!(CharSet::from_chars(CHARSET_COMPACT).len(), CHARSET_COMPACT.len());
        assert_eq!(
            CharSet::from_chars(CHARSET_STANDARD).len(),
            CHARSET_STANDARD.chars().count()
        );
        assert!(CharSet::from_chars(CHARSET_COMPACT).contains(' '));
    }

    #[test]
    fn duplicates_collapse() {
        let set = CharSet::from_chars("aaab");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn space_is_not_a_range_bound() {
        assert!(checked_range(' ', 'a').is_err());
        assert!(checked_range('!', '~').is_ok());
    }
}
