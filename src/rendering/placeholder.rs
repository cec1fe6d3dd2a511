//! Procedural placeholder sprite sheet, used when the player's sheet is missing.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Direction rows in the player sheet (down, left, right, up).
pub const DIRECTION_ROWS: u32 = 4;

const MARKER: [u8; 4] = [20, 20, 30, 255];

/// RGBA pixels of a `columns × rows` sheet of `frame_size` square frames.
///
/// Each frame is filled with a colour derived from its row and column, with a
/// dark square marker that shifts with the column so walk cycles read as
/// motion.
pub fn sheet_pixels(frame_size: u32, columns: u32, rows: u32) -> Vec<u8> {
    let width = frame_size * columns;
    let height = frame_size * rows;
    let marker = (frame_size / 4).max(1);
    let mut data = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let (column, row) = (x / frame_size, y / frame_size);
            let (local_x, local_y) = (x % frame_size, y % frame_size);

            let marker_x = marker + column * marker / 2;
            let in_marker = local_x >= marker_x
                && local_x < marker_x + marker
                && local_y >= marker
                && local_y < marker * 2;

            if in_marker {
                data.extend_from_slice(&MARKER);
            } else {
                data.extend_from_slice(&frame_color(column, row));
            }
        }
    }

    data
}

fn frame_color(column: u32, row: u32) -> [u8; 4] {
    [
        (60 + row * 45).min(255) as u8,
        (140 + column * 25).min(255) as u8,
        (90 + row * 30).min(255) as u8,
        255,
    ]
}

/// Build the placeholder sheet as a Bevy image.
pub fn placeholder_sheet(frame_size: u32, columns: u32) -> Image {
    Image::new(
        Extent3d {
            width: frame_size * columns,
            height: frame_size * DIRECTION_ROWS,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        sheet_pixels(frame_size, columns, DIRECTION_ROWS),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}
