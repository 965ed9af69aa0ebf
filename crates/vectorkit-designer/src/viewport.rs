//! Viewport zoom and pan.
//!
//! Screen and world share a top-left origin with y pointing down; a screen
//! point is `world * zoom + pan`.

use serde::{Deserialize, Serialize};
use vectorkit_settings::ViewportSettings;

use crate::model::Point;

/// Factor applied by a single zoom step.
pub const ZOOM_STEP: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewportSettings::default())
    }
}

impl Viewport {
    pub fn new(settings: &ViewportSettings) -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        }
    }

    /// This viewport's zoom and pan under the limits in `settings`.
    ///
    /// Used for viewports read from disk. Limits that are not a positive
    /// range fall back to the defaults. A non-finite pan is dropped.
    pub fn with_limits(&self, settings: &ViewportSettings) -> Viewport {
        let valid = settings.min_zoom.is_finite()
            && settings.max_zoom.is_finite()
            && settings.min_zoom > 0.0
            && settings.max_zoom >= settings.min_zoom;
        let mut limited = if valid {
            Viewport::new(settings)
        } else {
            Viewport::default()
        };
        limited.set_zoom(self.zoom);
        if self.pan.x.is_finite() && self.pan.y.is_finite() {
            limited.pan = self.pan;
        }
        limited
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Sets the zoom level, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Point::new(x, y);
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = Point::new(self.pan.x + dx, self.pan.y + dy);
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan.x,
            world.y * self.zoom + self.pan.y,
        )
    }
}
