//! Images for the floor plan and the legend icons, with generated
//! placeholders for files that are missing.

use factory_map::Icon;
use factory_map::config::AppConfig;
use slint::{Rgb8Pixel, Rgba8Pixel, SharedPixelBuffer};
use std::collections::HashMap;
use std::path::Path;

/// Side of the generated icon placeholders, in pixels.
const ICON_SIZE: u32 = 25;

pub struct Assets {
    floor_plan: slint::Image,
    icons: HashMap<Icon, slint::Image>,
    unknown_icon: slint::Image,
}

impl Assets {
    pub fn load(config: &AppConfig) -> Self {
        let floor_plan = load_or(&config.map.floor_plan, || {
            slint::Image::from_rgb8(checkerboard(64, 8))
        });
        let icons = Icon::ALL
            .into_iter()
            .map(|icon| {
                let path = config.assets.icon_dir.join(icon.asset_file());
                let image = load_or(&path, || {
                    let color = parse_color(icon.fallback_color())
                        .unwrap_or(slint::Color::from_rgb_u8(0, 0, 0));
                    slint::Image::from_rgba8(swatch(color, ICON_SIZE))
                });
                (icon, image)
            })
            .collect();

        Self {
            floor_plan,
            icons,
            unknown_icon: slint::Image::from_rgba8(swatch(
                slint::Color::from_rgb_u8(120, 120, 120),
                ICON_SIZE,
            )),
        }
    }

    pub fn floor_plan(&self) -> slint::Image {
        self.floor_plan.clone()
    }

    /// Image for a category icon; pins whose category no longer exists get a
    /// neutral grey marker.
    pub fn icon(&self, icon: Option<Icon>) -> slint::Image {
        icon.and_then(|i| self.icons.get(&i))
            .unwrap_or(&self.unknown_icon)
            .clone()
    }
}

fn load_or(path: &Path, fallback: impl FnOnce() -> slint::Image) -> slint::Image {
    match slint::Image::load_from_path(path) {
        Ok(image) => image,
        Err(_) => {
            tracing::warn!("image not found: {}; using a placeholder", path.display());
            fallback()
        }
    }
}

/// Squares of the pattern shown when the floor plan image is missing.
const CHECKER_DARK: Rgb8Pixel = Rgb8Pixel { r: 200, g: 200, b: 200 };
const CHECKER_LIGHT: Rgb8Pixel = Rgb8Pixel { r: 235, g: 235, b: 235 };

fn checkerboard(size: u32, cell: u32) -> SharedPixelBuffer<Rgb8Pixel> {
    let cell = cell.max(1);
    let mut buffer = SharedPixelBuffer::<Rgb8Pixel>::new(size, size);
    for (i, pixel) in buffer.make_mut_slice().iter_mut().enumerate() {
        let (x, y) = (i as u32 % size, i as u32 / size);
        *pixel = if (x / cell + y / cell) % 2 == 0 {
            CHECKER_DARK
        } else {
            CHECKER_LIGHT
        };
    }
    buffer
}

/// Filled disc in `color` on a transparent square, drawn in place of a
/// missing icon file.
fn swatch(color: slint::Color, size: u32) -> SharedPixelBuffer<Rgba8Pixel> {
    let mut buffer = SharedPixelBuffer::<Rgba8Pixel>::new(size, size);
    let fill = Rgba8Pixel {
        r: color.red(),
        g: color.green(),
        b: color.blue(),
        a: 255,
    };
    let r = size as f32 / 2.0;
    for (i, pixel) in buffer.make_mut_slice().iter_mut().enumerate() {
        let dx = (i as u32 % size) as f32 + 0.5 - r;
        let dy = (i as u32 / size) as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            *pixel = fill;
        }
    }
    buffer
}

/// Parses `#rrggbb` or the short `#rgb` form; the `#` is optional.
fn parse_color(hex: &str) -> Option<slint::Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match digits.len() {
        6 => (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ),
        3 => {
            // #abc is #aabbcc
            let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
            (short(0)?, short(1)?, short(2)?)
        }
        _ => return None,
    };
    Some(slint::Color::from_rgb_u8(r, g, b))
}
