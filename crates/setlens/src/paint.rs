//! Raster painting of ring instructions.
//!
//! A ring is a rectangle stroke centered on its box edges: pixels whose
//! centers fall inside the box grown by half the stroke width, but not inside
//! the box shrunk by half the stroke width. Everything is clipped to the image.

use std::ops::Range;

use image::{Rgb, RgbImage};
use setlens_overlay::RingInstruction;

/// Paint rings in order; later rings cover earlier ones.
pub fn paint_rings(img: &mut RgbImage, rings: &[RingInstruction]) {
    for ring in rings {
        paint_ring(img, ring);
    }
}

pub fn paint_ring(img: &mut RgbImage, ring: &RingInstruction) {
    let half = ring.stroke_width.max(0.0) / 2.0;
    let outer = ring.bbox.grown(half);
    let inner = ring.bbox.grown(-half);
    let color = Rgb([ring.color.0, ring.color.1, ring.color.2]);

    let (w, h) = img.dimensions();
    let xs = pixel_span(outer.x0, outer.x1, w);
    let ys = pixel_span(outer.y0, outer.y1, h);
    let (Some(xs), Some(ys)) = (xs, ys) else {
        return;
    };

    for y in ys {
        let cy = y as f64 + 0.5;
        let hollow_row = inner.y0 <= cy && cy < inner.y1;
        for x in xs.clone() {
            let cx = x as f64 + 0.5;
            if hollow_row && inner.x0 <= cx && cx < inner.x1 {
                continue;
            }
            img.put_pixel(x, y, color);
        }
    }
}

/// Pixel indices whose centers lie in `[lo, hi)`, clipped to `0..max`.
fn pixel_span(lo: f64, hi: f64, max: u32) -> Option<Range<u32>> {
    let start = (lo - 0.5).ceil().max(0.0);
    let end = (hi - 0.5).ceil().min(max as f64);
    (start < end).then(|| start as u32..end as u32)
}
