//! Anti-aliased rasterization of the shapes a gauge is made of.
//!
//! Coverage is computed analytically per pixel from the pixel centre's
//! distance to the shape edge, and blended with the framebuffer's "over"
//! operator. All shapes accept fractional coordinates.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use std::f32::consts::PI;

/// Coverage of a pixel whose centre lies `distance` inside an edge.
///
/// Negative distances are outside. A one pixel wide ramp is centred on the edge.
#[inline]
fn edge_coverage(distance: f32) -> f32 {
    (distance + 0.5).clamp(0.0, 1.0)
}

/// Clip a float span to pixel indices of a framebuffer axis.
#[inline]
fn pixel_span(lo: f32, hi: f32, limit: u32) -> (i32, i32) {
    let lo = (lo.floor() as i32).max(0);
    let hi = (hi.ceil() as i32).min(limit as i32);
    (lo, hi)
}

// ============================================================================
// Rectangles
// ============================================================================

/// Fill a rectangle, blending partially covered edge pixels.
pub fn fill_rect_aa(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }

    let (x0, x1) = pixel_span(rect.x, rect.right(), fb.width());
    let (y0, y1) = pixel_span(rect.y, rect.bottom(), fb.height());

    for y in y0..y1 {
        let fy = y as f32;
        let cov_y = (rect.bottom().min(fy + 1.0) - rect.y.max(fy)).clamp(0.0, 1.0);
        if cov_y <= 0.0 {
            continue;
        }
        for x in x0..x1 {
            let fx = x as f32;
            let cov_x = (rect.right().min(fx + 1.0) - rect.x.max(fx)).clamp(0.0, 1.0);
            fb.plot(x, y, color, cov_x * cov_y);
        }
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Draw a straight stroke of `width` pixels with square (butt) ends.
///
/// The stroke ends exactly at `from` and `to`.
pub fn draw_thick_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba, width: f32) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length < f32::EPSILON || width <= 0.0 {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let half = width / 2.0;

    let pad = half + 1.0;
    let (x0, x1) = pixel_span(from.x.min(to.x) - pad, from.x.max(to.x) + pad, fb.width());
    let (y0, y1) = pixel_span(from.y.min(to.y) - pad, from.y.max(to.y) + pad, fb.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let px = x as f32 + 0.5 - from.x;
            let py = y as f32 + 0.5 - from.y;
            let along = px * ux + py * uy;
            let across = (px * uy - py * ux).abs();

            let cov_across = edge_coverage(half - across);
            let cov_along = edge_coverage(along.min(length - along));
            let coverage = cov_across * cov_along;
            if coverage > 0.0 {
                fb.plot(x, y, color, coverage);
            }
        }
    }
}

// ============================================================================
// Arcs
// ============================================================================

/// Sweep of an arc from `start` to `end`, clockwise, in `(0, 360]`.
fn arc_sweep(start: f64, end: f64) -> f64 {
    let sweep = end - start;
    if sweep >= 360.0 {
        360.0
    } else {
        let wrapped = sweep.rem_euclid(360.0);
        if wrapped == 0.0 { 360.0 } else { wrapped }
    }
}

/// Bounding box of an annular sector.
fn sector_bounds(center: Point, inner: f32, outer: f32, start: f64, sweep: f64) -> Rect {
    if sweep >= 360.0 {
        return Rect::new(center.x - outer, center.y - outer, outer * 2.0, outer * 2.0);
    }

    let mut points = vec![
        Point::polar(center, inner, start),
        Point::polar(center, outer, start),
        Point::polar(center, inner, start + sweep),
        Point::polar(center, outer, start + sweep),
    ];
    // Axis extremes the sector passes through.
    let first_quadrant = (start / 90.0).ceil() as i64;
    let mut axis = first_quadrant as f64 * 90.0;
    while axis <= start + sweep {
        points.push(Point::polar(center, outer, axis));
        axis += 90.0;
    }

    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Draw an arc of the circle inscribed in `bounds`.
///
/// Angles are in degrees, clockwise from 3 o'clock; the arc runs clockwise
/// from `start` to `end`. The stroke grows inwards from the inscribed circle,
/// so `width` pixels of ring lie inside `bounds`.
pub fn draw_arc_aa(fb: &mut Framebuffer, bounds: Rect, start: f64, end: f64, color: Rgba, width: f32) {
    let outer = bounds.width.min(bounds.height) / 2.0;
    if outer <= 0.0 || width <= 0.0 {
        return;
    }
    let inner = (outer - width).max(0.0);
    let center = bounds.center();
    let sweep = arc_sweep(start, end);

    let area = sector_bounds(center, inner, outer, start, sweep);
    let (x0, x1) = pixel_span(area.x - 1.0, area.right() + 1.0, fb.width());
    let (y0, y1) = pixel_span(area.y - 1.0, area.bottom() + 1.0, fb.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let px = x as f32 + 0.5 - center.x;
            let py = y as f32 + 0.5 - center.y;
            let d = (px * px + py * py).sqrt();

            let cov_radial = edge_coverage(outer - d) * edge_coverage(d - inner);
            if cov_radial <= 0.0 {
                continue;
            }

            let cov_angular = if sweep >= 360.0 {
                1.0
            } else {
                let angle = f64::from(py.atan2(px)).to_degrees();
                let rel = (angle - start).rem_euclid(360.0) as f32;
                let sweep = sweep as f32;
                let arc_px = d * PI / 180.0;
                let inside = if rel <= sweep {
                    rel.min(sweep - rel)
                } else {
                    -(rel - sweep).min(360.0 - rel)
                };
                edge_coverage(inside * arc_px)
            };

            let coverage = cov_radial * cov_angular;
            if coverage > 0.0 {
                fb.plot(x, y, color, coverage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(fb: &Framebuffer, x: u32, y: u32) -> u8 {
        fb.get_pixel(x, y).unwrap().a
    }

    #[test]
    fn test_fill_rect_aa_integer_bounds() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fill_rect_aa(&mut fb, Rect::new(5.0, 5.0, 10.0, 4.0), Rgba::BLACK);
        assert_eq!(fb.opaque_pixel_count(), 40);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::BLACK));
        assert_eq!(alpha(&fb, 15, 5), 0);
    }

    #[test]
    fn test_fill_rect_aa_partial_edge() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fill_rect_aa(&mut fb, Rect::new(2.5, 2.0, 3.0, 1.0), Rgba::BLACK);
        assert_eq!(alpha(&fb, 2, 2), 128);
        assert_eq!(alpha(&fb, 3, 2), 255);
        assert_eq!(alpha(&fb, 5, 2), 128);
    }

    #[test]
    fn test_fill_rect_aa_clipped() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fill_rect_aa(&mut fb, Rect::new(-5.0, -5.0, 100.0, 100.0), Rgba::BLACK);
        assert_eq!(fb.opaque_pixel_count(), 100);
    }

    #[test]
    fn test_thick_line_horizontal() {
        let mut fb = Framebuffer::new(30, 30).unwrap();
        draw_thick_line_aa(&mut fb, Point::new(5.0, 15.0), Point::new(25.0, 15.0), Rgba::BLACK, 4.0);

        assert_eq!(alpha(&fb, 15, 13), 255);
        assert_eq!(alpha(&fb, 15, 16), 255);
        assert_eq!(alpha(&fb, 15, 18), 0);
        // Butt ends stop at the endpoints.
        assert_eq!(alpha(&fb, 3, 15), 0);
        assert_eq!(alpha(&fb, 26, 15), 0);
    }

    #[test]
    fn test_thick_line_degenerate() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        draw_thick_line_aa(&mut fb, Point::new(5.0, 5.0), Point::new(5.0, 5.0), Rgba::BLACK, 3.0);
        assert_eq!(fb.opaque_pixel_count(), 0);
    }

    #[test]
    fn test_arc_sweep_normalisation() {
        assert_eq!(arc_sweep(-188.0, 8.0), 196.0);
        assert_eq!(arc_sweep(350.0, 10.0), 20.0);
        assert_eq!(arc_sweep(0.0, 360.0), 360.0);
        assert_eq!(arc_sweep(10.0, 10.0), 360.0);
    }

    #[test]
    fn test_arc_stroke_grows_inwards() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        draw_arc_aa(&mut fb, Rect::square(100.0), 0.0, 360.0, Rgba::BLACK, 10.0);

        // Ring between radius 40 and 50 around (50, 50).
        assert_eq!(alpha(&fb, 94, 50), 255);
        assert_eq!(alpha(&fb, 50, 5), 255);
        assert_eq!(alpha(&fb, 50, 50), 0);
        assert_eq!(alpha(&fb, 80, 50), 0);
    }

    #[test]
    fn test_arc_over_the_top_leaves_bottom_empty() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        draw_arc_aa(&mut fb, Rect::square(100.0), -188.0, 8.0, Rgba::BLACK, 10.0);

        // 12 o'clock is covered, 6 o'clock is not.
        assert_eq!(alpha(&fb, 50, 5), 255);
        assert_eq!(alpha(&fb, 50, 94), 0);
        // 3 and 9 o'clock both lie inside the sweep.
        assert_eq!(alpha(&fb, 94, 50), 255);
        assert_eq!(alpha(&fb, 5, 49), 255);
    }

    #[test]
    fn test_short_arc_segment() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        draw_arc_aa(&mut fb, Rect::square(100.0), -95.0, -85.0, Rgba::BLACK, 10.0);

        assert_eq!(alpha(&fb, 50, 5), 255);
        assert_eq!(alpha(&fb, 94, 50), 0);
        assert_eq!(alpha(&fb, 5, 50), 0);
    }

    #[test]
    fn test_sector_bounds_includes_top() {
        let b = sector_bounds(Point::new(50.0, 50.0), 40.0, 50.0, -100.0, 20.0);
        assert!(b.y <= 1e-3);
        assert!(b.bottom() < 50.0);
    }
}
