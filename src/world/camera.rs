//! Smoothed follow camera clamped to the map.

use bevy::prelude::*;
use serde::Deserialize;

/// Camera tuning, loaded as the `camera` section of the game config.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered each update
    pub smoothing: f32,
    /// Visible area in pixels
    pub view_size: (f32, f32),
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            view_size: (800.0, 600.0),
        }
    }
}

/// View center that eases toward a target and never shows past the map edge.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FollowCamera {
    center: Vec2,
    view_size: Vec2,
    world_bounds: Rect,
    smoothing: f32,
}

impl FollowCamera {
    pub fn new(view_size: Vec2, world_bounds: Rect, smoothing: f32) -> Self {
        Self {
            center: view_size / 2.0,
            view_size,
            world_bounds,
            smoothing,
        }
    }

    pub fn from_config(config: &CameraConfig, world_bounds: Rect) -> Self {
        Self::new(
            Vec2::new(config.view_size.0, config.view_size.1),
            world_bounds,
            config.smoothing,
        )
    }

    pub fn update(&mut self, target: Vec2) {
        let center = self.center.lerp(target, self.smoothing);
        let (min, max) = (self.world_bounds.min, self.world_bounds.max);
        self.center = Vec2::new(
            Self::clamp_axis(center.x, self.view_size.x, min.x, max.x),
            Self::clamp_axis(center.y, self.view_size.y, min.y, max.y),
        );
    }

    fn clamp_axis(value: f32, view: f32, min: f32, max: f32) -> f32 {
        let half = view / 2.0;
        if max - min <= view {
            (min + max) / 2.0
        } else {
            value.clamp(min + half, max - half)
        }
    }

    /// Jump straight to `target` (still clamped).
    pub fn snap_to(&mut self, target: Vec2) {
        let smoothing = self.smoothing;
        self.smoothing = 1.0;
        self.update(target);
        self.smoothing = smoothing;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn view_size(&self) -> Vec2 {
        self.view_size
    }

    pub fn view_bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.view_size)
    }
}
