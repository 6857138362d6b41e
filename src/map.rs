//! Map surface geometry: the fixed floor-plan bounds and the pan/zoom viewport.
//!
//! Logical coordinates are `LatLng` values inside [`FLOOR_PLAN_BOUNDS`]. The
//! viewport maps them to surface pixels with a uniform scale of
//! `256 * 2^zoom / 360` pixels per unit, origin at the surface's top-left,
//! latitude growing upwards. Bounds are sticky: the viewport never shows area
//! outside them unless the surface is larger than the bounds on that axis, in
//! which case the bounds are centred.

use crate::pins::LatLng;

/// Rectangle in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// The rectangle the floor-plan image is stretched over.
pub const FLOOR_PLAN_BOUNDS: MapBounds = MapBounds {
    south: -35.42,
    west: -66.10,
    north: 35.42,
    east: 66.10,
};

impl MapBounds {
    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

/// Pixel geometry of a pin marker and its popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub size: (f64, f64),
    /// Point of the icon that sits on the pin position, from its top-left.
    pub anchor: (f64, f64),
    /// Popup tip, relative to the top of the icon.
    pub popup_anchor: (f64, f64),
}

impl MarkerGeometry {
    pub const DEFAULT: MarkerGeometry = MarkerGeometry {
        size: (25.0, 25.0),
        anchor: (13.0, 25.0),
        popup_anchor: (0.0, -2.0),
    };

    /// Top-left corner of the icon for a pin projected at `(x, y)`.
    pub fn icon_origin(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.anchor.0, y - self.anchor.1)
    }

    /// Bottom-centre tip of the popup for a pin projected at `(x, y)`.
    pub fn popup_tip(&self, x: f64, y: f64) -> (f64, f64) {
        let (left, top) = self.icon_origin(x, y);
        (
            left + self.size.0 / 2.0 + self.popup_anchor.0,
            top + self.popup_anchor.1,
        )
    }
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    bounds: MapBounds,
    center: LatLng,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(bounds: MapBounds, min_zoom: f64, max_zoom: f64, zoom: f64) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        let mut viewport = Self {
            bounds,
            center: bounds.center(),
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            zoom_step: 0.25,
            width: 0.0,
            height: 0.0,
        };
        viewport.clamp_center();
        viewport
    }

    /// Zoom change applied per wheel notch.
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        if step > 0.0 {
            self.zoom_step = step;
        }
        self
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Pixels per logical unit at the current zoom.
    pub fn scale(&self) -> f64 {
        256.0 * self.zoom.exp2() / 360.0
    }

    /// Surface size changed. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 && (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.clamp_center();
        }
    }

    pub fn project(&self, at: LatLng) -> (f64, f64) {
        let s = self.scale();
        (
            self.width / 2.0 + (at.lng - self.center.lng) * s,
            self.height / 2.0 - (at.lat - self.center.lat) * s,
        )
    }

    pub fn unproject(&self, x: f64, y: f64) -> LatLng {
        let s = self.scale();
        LatLng::new(
            self.center.lat - (y - self.height / 2.0) / s,
            self.center.lng + (x - self.width / 2.0) / s,
        )
    }

    /// The position `at` ends up at after being dragged by a pixel offset.
    pub fn offset_by_pixels(&self, at: LatLng, dx: f64, dy: f64) -> LatLng {
        let s = self.scale();
        LatLng::new(at.lat - dy / s, at.lng + dx / s)
    }

    /// Drags the content by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let s = self.scale();
        self.center.lng -= dx / s;
        self.center.lat += dy / s;
        self.clamp_center();
    }

    /// Zooms by `steps` wheel notches keeping the point under `(x, y)` fixed
    /// where the bounds allow it.
    pub fn zoom_at(&mut self, x: f64, y: f64, steps: f64) {
        let zoom = (self.zoom + steps * self.zoom_step).clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return;
        }
        let anchor = self.unproject(x, y);
        self.zoom = zoom;
        let s = self.scale();
        self.center = LatLng::new(
            anchor.lat + (y - self.height / 2.0) / s,
            anchor.lng - (x - self.width / 2.0) / s,
        );
        self.clamp_center();
    }

    /// Where the floor-plan image is drawn on the surface.
    pub fn image_rect(&self) -> ScreenRect {
        let s = self.scale();
        let (x, y) = self.project(LatLng::new(self.bounds.north, self.bounds.west));
        ScreenRect {
            x,
            y,
            width: (self.bounds.east - self.bounds.west) * s,
            height: (self.bounds.north - self.bounds.south) * s,
        }
    }

    fn clamp_center(&mut self) {
        let s = self.scale();
        self.center.lng = clamp_axis(self.center.lng, self.bounds.west, self.bounds.east, self.width / 2.0 / s);
        self.center.lat = clamp_axis(self.center.lat, self.bounds.south, self.bounds.north, self.height / 2.0 / s);
    }
}

fn clamp_axis(center: f64, min: f64, max: f64, half_span: f64) -> f64 {
    if 2.0 * half_span >= max - min {
        (min + max) / 2.0
    } else {
        center.clamp(min + half_span, max - half_span)
    }
}
