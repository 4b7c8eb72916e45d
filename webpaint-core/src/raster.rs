//! Coverage rasterizers for the drawing primitives.
//!
//! Every function walks the pixels a shape covers inside `bounds` (width,
//! height) and hands each one to `plot` exactly once. Pixels are sampled at
//! their centers; there is no antialiasing.

use std::ops::Range;

use crate::Point;

/// Pixel indices whose cells intersect `[lo, hi]`, clipped to `0..limit`.
fn span(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    if !(lo.is_finite() && hi.is_finite()) || hi < 0.0 || limit == 0 {
        return 0..0;
    }
    let start = lo.floor().max(0.0) as u64;
    let end = ((hi.ceil() + 1.0).max(0.0) as u64).min(limit as u64);
    let start = start.min(end);
    start as u32..end as u32
}

fn center(px: u32) -> f32 {
    px as f32 + 0.5
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

/// A segment of the given width with round caps. Zero-length segments
/// produce a round dot.
pub fn capsule(from: Point, to: Point, width: f32, bounds: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    // Anything thinner than a pixel still leaves a one-pixel trail.
    let radius = (width / 2.0).max(0.5);
    let xs = span(from.x.min(to.x) - radius, from.x.max(to.x) + radius, bounds.0);
    let ys = span(from.y.min(to.y) - radius, from.y.max(to.y) + radius, bounds.1);
    let mut covered = false;

    for y in ys {
        for x in xs.clone() {
            if distance_to_segment(Point::new(center(x), center(y)), from, to) <= radius {
                plot(x, y);
                covered = true;
            }
        }
    }

    // A thin dot between pixel centers reaches none of them.
    if !covered {
        if let Some((x, y)) = from.to_pixel().filter(|&(x, y)| x < bounds.0 && y < bounds.1) {
            plot(x, y);
        }
    }
}

/// Normalized (left, top, right, bottom) of the box spanned by two corners.
fn corners(a: Point, b: Point) -> (f32, f32, f32, f32) {
    (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Half-open containment used for rectangles so that adjacent boxes never
/// share a pixel.
fn inside(c: f32, lo: f32, hi: f32) -> bool {
    lo <= c && c < hi
}

/// Interior of the box spanned by `a` and `b`.
pub fn rect_fill(a: Point, b: Point, bounds: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    let (l, t, r, btm) = corners(a, b);
    for y in span(t, btm, bounds.1) {
        for x in span(l, r, bounds.0) {
            if inside(center(x), l, r) && inside(center(y), t, btm) {
                plot(x, y);
            }
        }
    }
}

/// Outline of the box spanned by `a` and `b`, centered on its edges, with
/// square corners. A box with no extent in either direction draws nothing.
pub fn rect_stroke(a: Point, b: Point, width: f32, bounds: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    let (l, t, r, btm) = corners(a, b);
    if l == r && t == btm {
        return;
    }
    let hw = width / 2.0;
    let (ol, ot, or, ob) = (l - hw, t - hw, r + hw, btm + hw);
    let (il, it, ir, ib) = (l + hw, t + hw, r - hw, btm - hw);

    for y in span(ot, ob, bounds.1) {
        for x in span(ol, or, bounds.0) {
            let (cx, cy) = (center(x), center(y));
            let in_outer = inside(cx, ol, or) && inside(cy, ot, ob);
            let in_inner = il < ir && it < ib && inside(cx, il, ir) && inside(cy, it, ib);
            if in_outer && !in_inner {
                plot(x, y);
            }
        }
    }
}

fn ellipse_eq(p: Point, c: Point, rx: f32, ry: f32) -> f32 {
    let nx = (p.x - c.x) / rx;
    let ny = (p.y - c.y) / ry;
    nx * nx + ny * ny
}

/// Interior of an axis-aligned ellipse. Zero radii cover nothing.
pub fn ellipse_fill(c: Point, rx: f32, ry: f32, bounds: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    let (rx, ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        return;
    }
    for y in span(c.y - ry, c.y + ry, bounds.1) {
        for x in span(c.x - rx, c.x + rx, bounds.0) {
            if ellipse_eq(Point::new(center(x), center(y)), c, rx, ry) <= 1.0 {
                plot(x, y);
            }
        }
    }
}

/// Outline of an axis-aligned ellipse: the ring between the ellipses grown
/// and shrunk by half the stroke width. Exact for circles, close enough for
/// moderately eccentric ellipses.
pub fn ellipse_stroke(
    c: Point,
    rx: f32,
    ry: f32,
    width: f32,
    bounds: (u32, u32),
    mut plot: impl FnMut(u32, u32),
) {
    let (rx, ry) = (rx.abs(), ry.abs());
    if rx == 0.0 && ry == 0.0 {
        return;
    }
    let hw = width / 2.0;
    let (orx, ory) = (rx + hw, ry + hw);
    let (irx, iry) = (rx - hw, ry - hw);
    let has_hole = irx > 0.0 && iry > 0.0;

    for y in span(c.y - ory, c.y + ory, bounds.1) {
        for x in span(c.x - orx, c.x + orx, bounds.0) {
            let p = Point::new(center(x), center(y));
            if ellipse_eq(p, c, orx, ory) > 1.0 {
                continue;
            }
            if has_hole && ellipse_eq(p, c, irx, iry) < 1.0 {
                continue;
            }
            plot(x, y);
        }
    }
}

/// A `size` x `size` block anchored at its top-left pixel.
pub fn block(x: u32, y: u32, size: u32, bounds: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    let x_end = x.saturating_add(size).min(bounds.0);
    let y_end = y.saturating_add(size).min(bounds.1);
    for py in y..y_end {
        for px in x..x_end {
            plot(px, py);
        }
    }
}
