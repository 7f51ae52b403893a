//! Heading math.
//!
//! A heading is a rotation about +Z in degrees. Heading `0` points along +Y
//! (the sprite "up" axis), positive headings turn counter-clockwise.

use bevy::prelude::*;

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value can round up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `current` to `target`, in `(-180, 180]`.
#[inline]
pub fn delta_degrees(current: f32, target: f32) -> f32 {
    let d = (target - current).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Rotate `current` towards `target` by at most `max_delta` degrees.
///
/// Takes the shortest direction and lands exactly on `target` instead of
/// overshooting it.
#[inline]
pub fn move_towards_degrees(current: f32, target: f32, max_delta: f32) -> f32 {
    let d = delta_degrees(current, target);
    if d.abs() <= max_delta {
        current + d
    } else {
        current + max_delta.copysign(d)
    }
}

/// Heading that points from `from` to `to`, in `[0, 360)`.
#[inline]
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    normalize_degrees(d.y.atan2(d.x).to_degrees() - 90.0)
}

/// Unit vector a heading travels along (local +Y rotated).
#[inline]
pub fn heading_forward(heading: f32) -> Vec2 {
    let (sin, cos) = heading.to_radians().sin_cos();
    Vec2::new(-sin, cos)
}

/// Unit lateral vector for a heading (local +X rotated).
#[inline]
pub fn heading_right(heading: f32) -> Vec2 {
    let (sin, cos) = heading.to_radians().sin_cos();
    Vec2::new(cos, sin)
}

#[inline]
pub fn heading_rotation(heading: f32) -> Quat {
    Quat::from_rotation_z(heading.to_radians())
}

/// Recover the heading from a rotation about +Z.
#[inline]
pub fn heading_of(rotation: Quat) -> f32 {
    let (z, _, _) = rotation.to_euler(EulerRot::ZYX);
    normalize_degrees(z.to_degrees())
}

/// Angle of fan slot `index` around `base`.
///
/// Even slots step one way, odd slots the other, so consecutive indices
/// alternate sides and the fan stays symmetric.
#[inline]
pub fn shifted_angle(index: usize, base: f32, between: f32) -> f32 {
    if index % 2 == 0 {
        base - between * index as f32 / 2.0
    } else {
        base + between * (index as f32 / 2.0).ceil()
    }
}
