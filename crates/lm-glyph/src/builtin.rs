//! Glyphes intégrés : police 3×5 pour l'ASCII imprimable, bitmaps 5×5 pour
//! quelques blocs Unicode, densité estimée pour le reste.
use lm_core::frame::GlyphMask;
use lm_core::traits::GlyphRasterizer;

/// Font id reported by [`BuiltinRasterizer`].
pub const BUILTIN_FONT_ID: &str = "builtin";

/// 3×5 glyphs for ' '..='~', indexed by `ch - ' '`.
const FONT_3X5: [[&str; 5]; 95] = [
    ["...", "...", "...", "...", "..."], // ' '
    [".#.", ".#.", ".#.", "...", ".#."], // !
    ["#.#", "#.#", "...", "...", "..."], // "
    ["#.#", "###", "#.#", "###", "#.#"], // #
    [".##", "##.", ".#.", ".##", "##."], // $
    ["#..", "..#", ".#.", "#..", "..#"], // %
    [".#.", "#.#", ".#.", "#.#", ".##"], // &
    [".#.", ".#.", "...", "...", "..."], // '
    ["..#", ".#.", ".#.", ".#.", "..#"], // (
    ["#..", ".#.", ".#.", ".#.", "#.."], // )
    ["...", "#.#", ".#.", "#.#", "..."], // *
    ["...", ".#.", "###", ".#.", "..."], // +
    ["...", "...", "...", ".#.", "#.."], // ,
    ["...", "...", "###", "...", "..."], // -
    ["...", "...", "...", "...", ".#."], // .
    ["..#", "..#", ".#.", "#..", "#.."], // /
    ["###", "#.#", "#.#", "#.#", "###"], // 0
    [".#.", "##.", ".#.", ".#.", "###"], // 1
    ["###", "..#", ".#.", "#..", "###"], // 2
    ["###", "..#", ".##", "..#", "###"], // 3
    ["#.#", "#.#", "###", "..#", "..#"], // 4
    ["###", "#..", "##.", "..#", "##."], // 5
    [".##", "#..", "###", "#.#", "###"], // 6
    ["###", "..#", ".#.", ".#.", ".#."], // 7
    ["###", "#.#", "###", "#.#", "###"], // 8
    ["###", "#.#", "###", "..#", "###"], // 9
    ["...", ".#.", "...", ".#.", "..."], // :
    ["...", ".#.", "...", ".#.", "#.."], // ;
    ["..#", ".#.", "#..", ".#.", "..#"], // <
    ["...", "###", "...", "###", "..."], // =
    ["#..", ".#.", "..#", ".#.", "#.."], // >
    ["##.", "..#", ".#.", "...", ".#."], // ?
    [".#.", "#.#", "###", "#..", ".##"], // @
    [".#.", "#.#", "###", "#.#", "#.#"], // A
    ["##.", "#.#", "##.", "#.#", "##."], // B
    [".##", "#..", "#..", "#..", ".##"], // C
    ["##.", "#.#", "#.#", "#.#", "##."], // D
    ["###", "#..", "###", "#..", "###"], // E
    ["###", "#..", "###", "#..", "#.."], // F
    [".##", "#..", "#.#", "#.#", ".##"], // G
    ["#.#", "#.#", "###", "#.#", "#.#"], // H
    ["###", ".#.", ".#.", ".#.", "###"], // I
    ["..#", "..#", "..#", "#.#", ".#."], // J
    ["#.#", "#.#", "##.", "#.#", "#.#"], // K
    ["#..", "#..", "#..", "#..", "###"], // L
    ["#.#", "###", "###", "#.#", "#.#"], // M
    ["#.#", "###", "###", "###", "#.#"], // N
    [".#.", "#.#", "#.#", "#.#", ".#."], // O
    ["##.", "#.#", "##.", "#..", "#.."], // P
    [".#.", "#.#", "#.#", "###", ".##"], // Q
    ["##.", "#.#", "##.", "#.#", "#.#"], // R
    [".##", "#..", ".#.", "..#", "##."], // S
    ["###", ".#.", ".#.", ".#.", ".#."], // T
    ["#.#", "#.#", "#.#", "#.#", ".##"], // U
    ["#.#", "#.#", "#.#", ".#.", ".#."], // V
    ["#.#", "#.#", "###", "###", "#.#"], // W
    ["#.#", "#.#", ".#.", "#.#", "#.#"], // X
    ["#.#", "#.#", ".#.", ".#.", ".#."], // Y
    ["###", "..#", ".#.", "#..", "###"], // Z
    ["###", "#..", "#..", "#..", "###"], // [
    ["#..", "#..", ".#.", "..#", "..#"], // \
    ["###", "..#", "..#", "..#", "###"], // ]
    [".#.", "#.#", "...", "...", "..."], // ^
    ["...", "...", "...", "...", "###"], // _
    ["#..", ".#.", "...", "...", "..."], // `
    ["...", "##.", ".##", "#.#", "###"], // a
    ["#..", "##.", "#.#", "#.#", "##."], // b
    ["...", ".##", "#..", "#..", ".##"], // c
    ["..#", ".##", "#.#", "#.#", ".##"], // d
    ["...", ".##", "#.#", "##.", ".##"], // e
    ["..#", ".#.", "###", ".#.", ".#."], // f
    [".##", "#.#", "###", "..#", ".#."], // g
    ["#..", "##.", "#.#", "#.#", "#.#"], // h
    [".#.", "...", "##.", ".#.", "###"], // i
    ["..#", "...", "..#", "#.#", ".#."], // j
    ["#..", "#.#", "##.", "##.", "#.#"], // k
    ["##.", ".#.", ".#.", ".#.", "###"], // l
    ["...", "###", "###", "###", "#.#"], // m
    ["...", "##.", "#.#", "#.#", "#.#"], // n
    ["...", ".#.", "#.#", "#.#", ".#."], // o
    ["...", "##.", "#.#", "##.", "#.."], // p
    ["...", ".##", "#.#", ".##", "..#"], // q
    ["...", ".##", "#..", "#..", "#.."], // r
    ["...", ".##", "##.", ".##", "##."], // s
    [".#.", "###", ".#.", ".#.", ".##"], // t
    ["...", "#.#", "#.#", "#.#", ".##"], // u
    ["...", "#.#", "#.#", "###", ".#."], // v
    ["...", "#.#", "###", "###", "###"], // w
    ["...", "#.#", ".#.", ".#.", "#.#"], // x
    ["#.#", "#.#", ".##", "..#", ".#."], // y
    ["...", "###", ".##", "##.", "###"], // z
    [".##", ".#.", "##.", ".#.", ".##"], // {
    [".#.", ".#.", ".#.", ".#.", ".#."], // |
    ["##.", ".#.", ".##", ".#.", "##."], // }
    [".##", "##.", "...", "...", "..."], // ~
];

/// 5×5 bitmaps (row-major, LSB first) for block characters.
const BLOCKS_5X5: &[(char, u32)] = &[
    ('█', 0b11111_11111_11111_11111_11111),
    ('░', 0b10100_01010_10100_01010_10100),
    ('▒', 0b10101_01010_10101_01010_10101),
    ('▓', 0b01011_10101_01011_10101_01011),
];

/// Rasterizer sans police externe.
///
/// Les glyphes sont agrandis au plus proche voisin dans une cellule qui
/// réserve une colonne et une ligne d'espacement, comme une police à chasse fixe.
///
/// # Example
/// ```
/// use lm_glyph::builtin::BuiltinRasterizer;
/// use lm_core::traits::GlyphRasterizer;
/// let r = BuiltinRasterizer::new();
/// assert_eq!(r.rasterize(' ', 16).count_set(), 0);
/// assert!(r.rasterize('#', 16).count_set() > r.rasterize('.', 16).count_set());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinRasterizer;

impl BuiltinRasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GlyphRasterizer for BuiltinRasterizer {
    fn font_id(&self) -> &str {
        BUILTIN_FONT_ID
    }

    fn rasterize(&self, ch: char, size: usize) -> GlyphMask {
        if let Some(rows) = ascii_glyph(ch) {
            // 3×5 glyph inside a 4×6 cell.
            return GlyphMask::from_fn(size, |row, col| {
                let gy = row * 6 / size;
                let gx = col * 4 / size;
                gy < 5 && gx < 3 && rows[gy].as_bytes()[gx] == b'#'
            });
        }

        let bitmap = get_bitmap(ch);
        GlyphMask::from_fn(size, |row, col| {
            let bit = (row * 5 / size) * 5 + col * 5 / size;
            bitmap & (1 << bit) != 0
        })
    }
}

fn ascii_glyph(ch: char) -> Option<&'static [&'static str; 5]> {
    let idx = (ch as u32).checked_sub(' ' as u32)? as usize;
    FONT_3X5.get(idx)
}

/// Get a 5×5 bitmap for a non-ASCII character.
///
/// # Example
/// ```
/// use lm_glyph::builtin::get_bitmap;
/// assert_eq!(get_bitmap('█').count_ones(), 25);
/// assert_ne!(get_bitmap('é'), 0);
/// ```
#[must_use]
pub fn get_bitmap(ch: char) -> u32 {
    BLOCKS_5X5
        .iter()
        .find(|&&(c, _)| c == ch)
        .map_or_else(|| estimate_density(ch), |&(_, bm)| bm)
}

fn estimate_density(ch: char) -> u32 {
    let density = if ch.is_alphabetic() {
        13
    } else if ch.is_numeric() {
        12
    } else if ch.is_whitespace() {
        0
    } else {
        8
    };
    // Centre-out fill pattern
    let order: [u32; 25] = [
        12, 7, 2, 8, 14, 6, 1, 0, 3, 9, 11, 5, 4, 10, 16, 13, 17, 18, 19, 23, 20, 21, 22, 24,
        15,
    ];
    let mut bm = 0u32;
    for &bit in order.iter().take(density) {
        bm |= 1 << bit;
    }
    bm
}

#[cfg(test)]
mod tests {
    use super::*;
    use lm_core::frame::GLYPH_SIZE;

    #[test]
    fn font_rows_are_three_wide() {
        for (i, glyph) in FONT_3X5.iter().enumerate() {
            for row in glyph {
                assert_eq!(row.len(), 3, "glyph {i} has a malformed row {row:?}");
                assert!(row.bytes().all(|b| b == b'.' || b == b'#'));
            }
        }
    }

    #[test]
    fn last_glyph_is_tilde() {
        assert!(ascii_glyph('~').is_some());
        assert!(ascii_glyph('\u{7f}').is_none());
        assert!(ascii_glyph('\t').is_none());
    }

    #[test]
    fn every_digit_has_its_own_density() {
        let r = BuiltinRasterizer::new();
        let mut counts: Vec<usize> = ('0'..='9')
            .map(|c| r.rasterize(c, GLYPH_SIZE).count_set())
            .collect();
        counts.sort_unstable();
        counts.dedup();
        assert_eq!(counts.len(), 10, "digits share a density: {counts:?}");
    }

    #[test]
    fn full_block_covers_mask() {
        let r = BuiltinRasterizer::new();
        assert_eq!(r.rasterize('█', GLYPH_SIZE).count_set(), GLYPH_SIZE * GLYPH_SIZE);
    }

    #[test]
    fn rasterize_is_deterministic() {
        let r = BuiltinRasterizer::new();
        assert_eq!(r.rasterize('@', GLYPH_SIZE), r.rasterize('@', GLYPH_SIZE));
    }
}
