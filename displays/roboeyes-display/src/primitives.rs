//! Stateless rasterizers
//!
//! Every function draws through [`PixelTarget::set_pixel`] and leaves
//! off-canvas pixels to the target. Circles only scan offsets that can
//! land on the canvas. Shapes with no area draw nothing.

use crate::backend::PixelTarget;

/// Quadrant selector for quarter-circle fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Whether an offset from the circle centre lies in this quadrant
    fn contains(self, dx: i32, dy: i32) -> bool {
        match self {
            Corner::TopLeft => dx <= 0 && dy <= 0,
            Corner::TopRight => dx >= 0 && dy <= 0,
            Corner::BottomRight => dx >= 0 && dy >= 0,
            Corner::BottomLeft => dx <= 0 && dy >= 0,
        }
    }
}

/// Filled circle, scanned as one vertical strip per column
pub fn fill_circle<T: PixelTarget + ?Sized>(target: &mut T, cx: i32, cy: i32, r: i32, on: bool) {
    if r < 0 {
        return;
    }
    let (width, height) = target.size();
    let (xs, ys) = (visible(cx, r, width), visible(cy, r, height));
    let r2 = i64::from(r) * i64::from(r);
    for dx in xs {
        let h = libm::sqrtf((r2 - i64::from(dx) * i64::from(dx)).max(0) as f32) as i32;
        for dy in h.saturating_neg().max(*ys.start())..=h.min(*ys.end()) {
            target.set_pixel(cx + dx, cy + dy, on);
        }
    }
}

/// Offsets in `-r..=r` that land on `0..extent` when added to `centre`
fn visible(centre: i32, r: i32, extent: i32) -> core::ops::RangeInclusive<i32> {
    r.saturating_neg().max(centre.saturating_neg())..=r.min((extent - 1).saturating_sub(centre))
}

/// Bresenham line, both endpoints included
pub fn line<T: PixelTarget + ?Sized>(
    target: &mut T,
    mut x1: i32,
    mut y1: i32,
    x2: i32,
    y2: i32,
    on: bool,
) {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        target.set_pixel(x1, y1, on);
        if x1 == x2 && y1 == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x1 += sx;
        }
        if e2 < dx {
            err += dx;
            y1 += sy;
        }
    }
}

/// Filled rectangle, clipped to the canvas first
pub fn fill_rect<T: PixelTarget + ?Sized>(
    target: &mut T,
    mut x: i32,
    mut y: i32,
    mut w: i32,
    mut h: i32,
    on: bool,
) {
    let (width, height) = target.size();

    if x < 0 {
        w += x;
        x = 0;
    }
    if y < 0 {
        h += y;
        y = 0;
    }
    if x + w > width {
        w = width - x;
    }
    if y + h > height {
        h = height - y;
    }
    if w <= 0 || h <= 0 {
        return;
    }

    for py in y..y + h {
        for px in x..x + w {
            target.set_pixel(px, py, on);
        }
    }
}

/// Filled rounded rectangle
///
/// Built from a full-width middle band, top and bottom bands inset by the
/// radius, and four quarter circles. The radius is clamped to half the
/// smaller side; a radius of 0 gives a plain rectangle.
pub fn fill_round_rect<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    r: i32,
    on: bool,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let r = r.clamp(0, w.min(h) / 2);

    fill_rect(target, x, y + r, w, h - 2 * r, on);
    fill_rect(target, x + r, y, w - 2 * r, r, on);
    fill_rect(target, x + r, y + h - r, w - 2 * r, r, on);

    fill_quarter_circle(target, x + r, y + r, r, Corner::TopLeft, on);
    fill_quarter_circle(target, x + w - r - 1, y + r, r, Corner::TopRight, on);
    fill_quarter_circle(target, x + w - r - 1, y + h - r - 1, r, Corner::BottomRight, on);
    fill_quarter_circle(target, x + r, y + h - r - 1, r, Corner::BottomLeft, on);
}

/// One filled quadrant of a circle; draws nothing for `r <= 0`
pub fn fill_quarter_circle<T: PixelTarget + ?Sized>(
    target: &mut T,
    cx: i32,
    cy: i32,
    r: i32,
    corner: Corner,
    on: bool,
) {
    if r <= 0 {
        return;
    }
    let (width, height) = target.size();
    let r2 = i64::from(r) * i64::from(r);
    for dy in visible(cy, r, height) {
        for dx in visible(cx, r, width) {
            let d2 = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if d2 <= r2 && corner.contains(dx, dy) {
                target.set_pixel(cx + dx, cy + dy, on);
            }
        }
    }
}

/// Filled triangle
///
/// Vertices are sorted by y, then each scanline is filled between the long
/// edge (alpha) and whichever short edge it crosses (beta). The bottom
/// scanline itself is not filled.
#[allow(clippy::too_many_arguments)]
pub fn fill_triangle<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    on: bool,
) {
    let mut v = [(x0, y0), (x1, y1), (x2, y2)];
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    if v[0].1 > v[2].1 {
        v.swap(0, 2);
    }
    if v[1].1 > v[2].1 {
        v.swap(1, 2);
    }
    let [(x0, y0), (x1, y1), (x2, y2)] = v;

    let total_height = y2 - y0;
    if total_height == 0 {
        return;
    }
    let (width, height) = target.size();
    let upper_height = y1 - y0;

    for i in 0..total_height {
        let y = y0 + i;
        if y >= height {
            break;
        }
        if y < 0 {
            continue;
        }

        let second_half = i > upper_height || y1 == y0;
        let segment_height = if second_half { y2 - y1 } else { upper_height };
        if segment_height == 0 {
            continue;
        }

        let alpha = i as f32 / total_height as f32;
        let beta = if second_half {
            (i - upper_height) as f32 / segment_height as f32
        } else {
            i as f32 / segment_height as f32
        };

        let mut ax = (x0 as f32 + (x2 - x0) as f32 * alpha) as i32;
        let mut bx = if second_half {
            (x1 as f32 + (x2 - x1) as f32 * beta) as i32
        } else {
            (x0 as f32 + (x1 - x0) as f32 * beta) as i32
        };
        if ax > bx {
            core::mem::swap(&mut ax, &mut bx);
        }

        for x in ax.max(0)..=bx.min(width - 1) {
            target.set_pixel(x, y, on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::PagedFramebuffer;

    fn rect_pixels(fb: &PagedFramebuffer, x: i32, y: i32, w: i32, h: i32) -> u32 {
        let mut n = 0;
        for py in y..y + h {
            for px in x..x + w {
                if fb.get_pixel(px, py) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_circle_radius_zero_is_single_pixel() {
        let mut fb = PagedFramebuffer::new();
        fill_circle(&mut fb, 10, 10, 0, true);
        assert_eq!(fb.count_set(), 1);
        assert!(fb.get_pixel(10, 10));
    }

    #[test]
    fn test_circle_strips() {
        let mut fb = PagedFramebuffer::new();
        fill_circle(&mut fb, 30, 32, 2, true);
        // strips: dx=-2 -> 1, dx=-1 -> 3, dx=0 -> 5, dx=1 -> 3, dx=2 -> 1
        assert_eq!(fb.count_set(), 13);
        assert!(fb.get_pixel(30, 30));
        assert!(fb.get_pixel(28, 32));
        assert!(!fb.get_pixel(28, 31));
    }

    #[test]
    fn test_circle_clipped_at_corner() {
        let mut fb = PagedFramebuffer::new();
        fill_circle(&mut fb, 0, 0, 3, true);
        assert!(fb.get_pixel(0, 0));
        assert!(fb.get_pixel(3, 0));
        assert!(fb.count_set() > 0);
    }

    #[test]
    fn test_huge_radius_covers_canvas() {
        let mut fb = PagedFramebuffer::new();
        fill_circle(&mut fb, 50, 30, i32::MAX, true);
        assert_eq!(fb.count_set(), 100 * 64);

        let mut fb = PagedFramebuffer::new();
        fill_quarter_circle(&mut fb, 50, 30, i32::MAX, Corner::TopLeft, true);
        assert_eq!(fb.count_set(), 51 * 31);
        assert!(fb.get_pixel(0, 0));
        assert!(!fb.get_pixel(51, 30));
    }

    #[test]
    fn test_line_includes_endpoints() {
        let mut fb = PagedFramebuffer::new();
        line(&mut fb, 2, 3, 12, 7, true);
        assert!(fb.get_pixel(2, 3));
        assert!(fb.get_pixel(12, 7));
        // x-major line draws one pixel per column
        assert_eq!(fb.count_set(), 11);
    }

    #[test]
    fn test_line_reversed_and_vertical() {
        let mut fb = PagedFramebuffer::new();
        line(&mut fb, 50, 40, 50, 30, true);
        assert_eq!(fb.count_set(), 11);
        assert!(fb.get_pixel(50, 30));
        assert!(fb.get_pixel(50, 40));
    }

    #[test]
    fn test_line_single_point() {
        let mut fb = PagedFramebuffer::new();
        line(&mut fb, 4, 4, 4, 4, true);
        assert_eq!(fb.count_set(), 1);
    }

    #[test]
    fn test_fill_rect_clips_negative_origin() {
        let mut fb = PagedFramebuffer::new();
        fill_rect(&mut fb, -5, -5, 10, 10, true);
        assert_eq!(fb.count_set(), 25);
        assert!(fb.get_pixel(0, 0));
        assert!(fb.get_pixel(4, 4));
        assert!(!fb.get_pixel(5, 5));
    }

    #[test]
    fn test_fill_rect_clips_overflow() {
        let mut fb = PagedFramebuffer::new();
        fill_rect(&mut fb, 95, 60, 20, 20, true);
        assert_eq!(fb.count_set(), 5 * 4);
    }

    #[test]
    fn test_fill_rect_degenerate() {
        let mut fb = PagedFramebuffer::new();
        fill_rect(&mut fb, 10, 10, 0, 5, true);
        fill_rect(&mut fb, 10, 10, 5, -3, true);
        fill_rect(&mut fb, 120, 10, 5, 5, true);
        assert_eq!(fb.count_set(), 0);
    }

    #[test]
    fn test_fill_rect_clears() {
        let mut fb = PagedFramebuffer::new();
        fb.fill(true);
        fill_rect(&mut fb, 0, 0, 10, 8, false);
        assert_eq!(fb.count_set(), 800 * 8 - 80);
    }

    #[test]
    fn test_round_rect_radius_zero_is_plain_rect() {
        let mut fb = PagedFramebuffer::new();
        fill_round_rect(&mut fb, 10, 10, 20, 12, 0, true);

        let mut plain = PagedFramebuffer::new();
        fill_rect(&mut plain, 10, 10, 20, 12, true);

        assert_eq!(fb, plain);
        assert_eq!(fb.count_set(), 240);
    }

    #[test]
    fn test_quarter_circle_radius_zero_draws_nothing() {
        let mut fb = PagedFramebuffer::new();
        fill_quarter_circle(&mut fb, 10, 10, 0, Corner::TopLeft, true);
        assert_eq!(fb.count_set(), 0);
    }

    #[test]
    fn test_quarter_circle_stays_in_quadrant() {
        let mut fb = PagedFramebuffer::new();
        fill_quarter_circle(&mut fb, 20, 20, 4, Corner::BottomRight, true);
        assert!(fb.get_pixel(24, 20));
        assert!(fb.get_pixel(20, 24));
        assert!(!fb.get_pixel(19, 20));
        assert!(!fb.get_pixel(20, 19));
        assert_eq!(rect_pixels(&fb, 20, 20, 5, 5), fb.count_set());
    }

    #[test]
    fn test_round_rect_corners_are_cut() {
        let mut fb = PagedFramebuffer::new();
        fill_round_rect(&mut fb, 10, 10, 36, 36, 8, true);
        // corner pixels lie outside the rounded outline
        assert!(!fb.get_pixel(10, 10));
        assert!(!fb.get_pixel(45, 10));
        assert!(!fb.get_pixel(10, 45));
        assert!(!fb.get_pixel(45, 45));
        // edges and centre are filled
        assert!(fb.get_pixel(28, 10));
        assert!(fb.get_pixel(10, 28));
        assert!(fb.get_pixel(45, 28));
        assert!(fb.get_pixel(28, 45));
        assert!(fb.get_pixel(28, 28));
        // nothing escapes the bounding box
        assert_eq!(rect_pixels(&fb, 10, 10, 36, 36), fb.count_set());
    }

    #[test]
    fn test_round_rect_radius_clamped_for_thin_rect() {
        let mut fb = PagedFramebuffer::new();
        fill_round_rect(&mut fb, 10, 30, 36, 1, 8, true);
        assert_eq!(fb.count_set(), 36);
        assert_eq!(rect_pixels(&fb, 10, 30, 36, 1), 36);
    }

    #[test]
    fn test_triangle_flat_draws_nothing() {
        let mut fb = PagedFramebuffer::new();
        fill_triangle(&mut fb, 0, 10, 50, 10, 99, 10, true);
        assert_eq!(fb.count_set(), 0);
    }

    #[test]
    fn test_triangle_right_angle() {
        let mut fb = PagedFramebuffer::new();
        // vertical edge on x=10, hypotenuse to (20, 10)
        fill_triangle(&mut fb, 10, 10, 20, 10, 10, 20, true);
        assert!(fb.get_pixel(10, 10));
        assert!(fb.get_pixel(20, 10));
        assert!(fb.get_pixel(10, 19));
        // bottom scanline excluded
        assert!(!fb.get_pixel(10, 20));
        // outside the hypotenuse
        assert!(!fb.get_pixel(19, 18));
        assert_eq!(rect_pixels(&fb, 10, 10, 11, 10), fb.count_set());
    }

    #[test]
    fn test_triangle_vertex_order_irrelevant() {
        let mut a = PagedFramebuffer::new();
        let mut b = PagedFramebuffer::new();
        fill_triangle(&mut a, 5, 40, 30, 5, 60, 50, true);
        fill_triangle(&mut b, 60, 50, 5, 40, 30, 5, true);
        assert_eq!(a, b);
        assert!(a.count_set() > 0);
    }

    #[test]
    fn test_triangle_clears_pixels() {
        let mut fb = PagedFramebuffer::new();
        fb.fill(true);
        fill_triangle(&mut fb, 0, -1, 36, -1, 0, 17, false);
        assert!(!fb.get_pixel(0, 0));
        assert!(!fb.get_pixel(30, 0));
        assert!(fb.get_pixel(35, 10));
    }

    #[test]
    fn test_triangle_partially_off_canvas() {
        let mut fb = PagedFramebuffer::new();
        fill_triangle(&mut fb, -20, -20, 150, 30, -20, 90, true);
        assert!(fb.get_pixel(0, 30));
        assert!(fb.count_set() > 0);
    }
}
