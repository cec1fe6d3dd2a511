//! Overlap tests used by combat resolution.
//!
//! All shapes live in map space. Touching edges do not count as overlap.

use bevy::prelude::*;

/// Strict overlap of two axis-aligned rectangles.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Overlap of a circle and an axis-aligned rectangle.
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: Rect) -> bool {
    let closest = center.clamp(rect.min, rect.max);
    center.distance_squared(closest) < radius * radius
}
