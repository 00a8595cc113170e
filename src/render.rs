// src/render.rs
//! Экспорт карты в изображение
//!
//! Отладочная визуализация: каждый тайл рисуется квадратом `scale × scale` пикселей
//! цвета своей местности, залежи ресурсов — кружком цвета ресурса, найденный путь —
//! ломаной через центры тайлов.
//!
//! ```rust,no_run
//! use gamemap::{Coord, GameMap};
//!
//! let map = GameMap::new(64, 48, Some(42))?;
//! let path = map.find_path(Coord::new(0, 0), Coord::new(63, 47));
//! map.save_as_png("map.png", 8, path.as_deref())?;
//! # Ok::<(), gamemap::MapError>(())
//! ```

use crate::error::MapError;
use crate::grid::TileGrid;
use crate::tile::{Coord, ResourceKind, Tile};
use image::{ImageBuffer, Rgba};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

const PATH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// RGBA-пиксели карты, один пиксель на тайл
pub fn to_rgba_image(grid: &TileGrid) -> Vec<u8> {
    let tiles: Vec<&Tile> = grid.tiles().collect();

    #[cfg(feature = "parallel")]
    let pixels: Vec<u8> = tiles.par_iter().flat_map_iter(|tile| tile_rgba(tile)).collect();
    #[cfg(not(feature = "parallel"))]
    let pixels: Vec<u8> = tiles.iter().flat_map(|tile| tile_rgba(tile)).collect();

    pixels
}

fn tile_rgba(tile: &Tile) -> [u8; 4] {
    let [r, g, b] = tile.terrain.to_rgb();
    [r, g, b, 255]
}

/// Рисует карту в буфер с масштабом `scale` и необязательным путём поверх
pub fn render(
    grid: &TileGrid,
    scale: u32,
    path: Option<&[Coord]>,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>, MapError> {
    let base: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(grid.width(), grid.height(), to_rgba_image(grid)).ok_or(
            MapError::ImageBuffer {
                width: grid.width(),
                height: grid.height(),
            },
        )?;

    let scale = scale.max(1);
    if scale == 1 && path.is_none() {
        return Ok(base);
    }

    // Пиксельные координаты центров тайлов считаются в i32
    let scaled = |side: u32| {
        side.checked_mul(scale)
            .filter(|&px| i32::try_from(px).is_ok())
    };
    let (Some(width), Some(height)) = (scaled(grid.width()), scaled(grid.height())) else {
        return Err(MapError::ImageBuffer {
            width: grid.width().saturating_mul(scale),
            height: grid.height().saturating_mul(scale),
        });
    };

    let mut img = ImageBuffer::from_fn(width, height, |x, y| {
        *base.get_pixel(x / scale, y / scale)
    });

    let center = |coord: Coord| -> (i32, i32) {
        let half = (scale / 2) as i32;
        (coord.x * scale as i32 + half, coord.y * scale as i32 + half)
    };

    // Ресурсы видны только при достаточном масштабе
    if scale >= 4 {
        let radius = (scale / 4) as i32;
        for tile in grid.tiles() {
            if let Some(deposit) = tile.resource {
                let [r, g, b] = deposit.kind.to_rgb();
                draw_filled_circle_mut(&mut img, center(tile.coord), radius, Rgba([r, g, b, 255]));
            }
        }
    }

    if let Some(path) = path {
        for step in path.windows(2) {
            let (x0, y0) = center(step[0]);
            let (x1, y1) = center(step[1]);
            draw_line_segment_mut(
                &mut img,
                (x0 as f32, y0 as f32),
                (x1 as f32, y1 as f32),
                PATH_COLOR,
            );
        }
    }

    Ok(img)
}

pub fn save_as_png(
    grid: &TileGrid,
    path: &str,
    scale: u32,
    route: Option<&[Coord]>,
) -> Result<(), MapError> {
    let img = render(grid, scale, route)?;
    img.save(path)?;
    Ok(())
}

/// Текстовое представление карты: одна строка на ряд тайлов
///
/// Залежи ресурсов отображаются буквой ресурса вместо символа местности.
pub fn to_ascii(grid: &TileGrid) -> String {
    let width = grid.width() as usize;
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for (i, tile) in grid.tiles().enumerate() {
        let symbol = match tile.resource {
            Some(deposit) => match deposit.kind {
                ResourceKind::Wood => 'w',
                ResourceKind::Stone => 's',
                ResourceKind::Gold => 'g',
                ResourceKind::Food => 'f',
            },
            None => tile.terrain.to_char(),
        };
        out.push(symbol);
        if (i + 1) % width == 0 {
            out.push('\n');
        }
    }
    out
}
