use std::cmp::Ordering;
use std::collections::BTreeMap;

use lm_core::traits::GlyphRasterizer;

use crate::cache::BrightnessCache;

/// Clé de brillance totalement ordonnée (`f64::total_cmp`).
#[derive(Clone, Copy, Debug)]
struct Key(f64);

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Table ordonnée brillance normalisée → caractère.
///
/// Normalisation min/max sur le jeu : le caractère le plus sombre vaut 0.0,
/// le plus dense 1.0. Si toutes les brillances brutes sont égales, les
/// valeurs brutes sont gardées telles quelles (table à un seul seau).
///
/// Deux caractères qui tombent sur la même clé : le dernier inséré gagne et
/// un avertissement est journalisé.
///
/// # Example
/// ```
/// use lm_ascii::table::CharBrightnessTable;
/// let table = CharBrightnessTable::from_raw(&[(' ', 0.0), ('.', 0.1), ('#', 0.4)]);
/// assert_eq!(table.closest_at_or_above(0.2), Some((0.25, '.')));
/// assert_eq!(table.closest_at_or_below(0.2), Some((0.0, ' ')));
/// assert_eq!(table.closest_at_or_above(1.0), Some((1.0, '#')));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharBrightnessTable {
    entries: BTreeMap<Key, char>,
}

impl CharBrightnessTable {
    /// Build the table for `charset`, pulling raw glyph brightness through `cache`.
    ///
    /// An empty `charset` yields an empty table.
    pub fn build<G: GlyphRasterizer + ?Sized>(
        charset: &[char],
        rasterizer: &G,
        cache: &mut BrightnessCache,
    ) -> Self {
        let raw: Vec<(char, f64)> = charset
            .iter()
            .map(|&ch| (ch, cache.char_brightness(ch, rasterizer)))
            .collect();
        Self::from_raw(&raw)
    }

    /// Normalize raw `(char, brightness)` pairs, in enumeration order.
    #[must_use]
    pub fn from_raw(raw: &[(char, f64)]) -> Self {
        let mut table = Self::default();
        let Some(min) = raw.iter().map(|&(_, b)| b).reduce(f64::min) else {
            return table;
        };
        let max = raw.iter().map(|&(_, b)| b).fold(min, f64::max);
        let span = max - min;

        for &(ch, b) in raw {
            let key = if span == 0.0 { b } else { (b - min) / span };
            if let Some(previous) = table.entries.insert(Key(key), ch)
                && previous != ch
            {
                log::warn!(
                    "'{previous}' and '{ch}' share brightness {key:.4}; '{previous}' will never be chosen"
                );
            }
        }
        table
    }

    /// Nearest entry with key ≥ `x`.
    #[must_use]
    pub fn closest_at_or_above(&self, x: f64) -> Option<(f64, char)> {
        self.entries
            .range(Key(x)..)
            .next()
            .map(|(k, &ch)| (k.0, ch))
    }

    /// Nearest entry with key ≤ `x`.
    #[must_use]
    pub fn closest_at_or_below(&self, x: f64) -> Option<(f64, char)> {
        self.entries
            .range(..=Key(x))
            .next_back()
            .map(|(k, &ch)| (k.0, ch))
    }

    /// Entry with the smallest key.
    #[must_use]
    pub fn lowest(&self) -> Option<(f64, char)> {
        self.entries.first_key_value().map(|(k, &ch)| (k.0, ch))
    }

    /// Number of distinct brightness buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending brightness.
    pub fn iter(&self) -> impl Iterator<Item = (f64, char)> + '_ {
        self.entries.iter().map(|(k, &ch)| (k.0, ch))
    }
}
