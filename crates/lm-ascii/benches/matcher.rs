use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lm_ascii::cache::BrightnessCache;
use lm_ascii::matcher::render;
use lm_core::charset::CHARSET_STANDARD;
use lm_core::frame::{GlyphMask, PixelImage, Rgb};
use lm_core::traits::GlyphRasterizer;

/// Glyph density derived from the code point, enough to spread the table.
struct CodepointRasterizer;

impl GlyphRasterizer for CodepointRasterizer {
    fn font_id(&self) -> &str {
        "bench"
    }

    fn rasterize(&self, ch: char, size: usize) -> GlyphMask {
        let lit = (ch as usize * 7) % (size * size);
        GlyphMask::from_fn(size, |row, col| row * size + col < lit)
    }
}

fn gradient(size: u32) -> PixelImage {
    PixelImage::from_fn(size, size, |row, col| {
        Rgb::new((col % 256) as u8, (row % 256) as u8, ((row + col) % 256) as u8)
    })
}

fn bench_matcher(c: &mut Criterion) {
    let img = gradient(512);
    let charset: Vec<char> = CHARSET_STANDARD.chars().collect();

    c.bench_function("render_cold_128", |b| {
        b.iter(|| {
            let mut cache = BrightnessCache::new();
            black_box(render(&img, &CodepointRasterizer, &mut cache, 128, &charset));
        });
    });

    let mut warm = BrightnessCache::new();
    render(&img, &CodepointRasterizer, &mut warm, 128, &charset);
    c.bench_function("render_warm_128", |b| {
        b.iter(|| {
            black_box(render(&img, &CodepointRasterizer, &mut warm, 128, &charset));
        });
    });
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
