use std::collections::HashMap;

use crate::errors::{FundError, Result};
use crate::portfolio::LogoColor;

const MIN_ALPHA: u8 = 128;
const WHITE_THRESHOLD: u8 = 240;

/// Most frequent opaque color in an icon.
///
/// Near-white pixels are treated as background and only win when the icon
/// has nothing else. Ties go to the numerically smallest color so the result
/// is stable between builds.
pub fn dominant_color(bytes: &[u8]) -> Result<LogoColor> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| FundError::fetch(format!("Logo image could not be decoded: {}", e)))?
        .to_rgba8();

    let mut colors: HashMap<[u8; 3], usize> = HashMap::new();
    let mut background: HashMap<[u8; 3], usize> = HashMap::new();

    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < MIN_ALPHA {
            continue;
        }
        let bucket = if r >= WHITE_THRESHOLD && g >= WHITE_THRESHOLD && b >= WHITE_THRESHOLD {
            &mut background
        } else {
            &mut colors
        };
        *bucket.entry([r, g, b]).or_insert(0) += 1;
    }

    let counts = if colors.is_empty() { background } else { colors };

    counts
        .into_iter()
        .max_by(|(color_a, count_a), (color_b, count_b)| {
            count_a.cmp(count_b).then_with(|| color_b.cmp(color_a))
        })
        .map(|([r, g, b], _)| LogoColor::new(r, g, b))
        .ok_or_else(|| FundError::fetch("Logo image has no opaque pixels"))
}
