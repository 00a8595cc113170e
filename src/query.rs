use crate::grid::TileGrid;
use crate::tile::{ResourceKind, TerrainKind, Tile};
use serde::Serialize;
use std::collections::BTreeMap;

/// Сводная статистика карты для интерфейса и отладки
///
/// Считается полным проходом по сетке, не для горячего пути.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    pub total_tiles: usize,
    pub tile_distribution: BTreeMap<TerrainKind, usize>,
    pub resources_placed: usize,
    pub resource_distribution: BTreeMap<ResourceKind, usize>,
}

impl MapInfo {
    #[must_use]
    pub fn terrain_count(&self, kind: TerrainKind) -> usize {
        self.tile_distribution.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn resource_count(&self, kind: ResourceKind) -> usize {
        self.resource_distribution.get(&kind).copied().unwrap_or(0)
    }
}

pub fn get_map_info(grid: &TileGrid) -> MapInfo {
    // Все типы присутствуют в выдаче, даже с нулём
    let mut tile_distribution: BTreeMap<TerrainKind, usize> =
        TerrainKind::ALL.iter().map(|&kind| (kind, 0)).collect();
    let mut resource_distribution: BTreeMap<ResourceKind, usize> =
        ResourceKind::ALL.iter().map(|&kind| (kind, 0)).collect();
    let mut resources_placed = 0;

    for tile in grid.tiles() {
        *tile_distribution.entry(tile.terrain).or_insert(0) += 1;
        if let Some(deposit) = tile.resource {
            resources_placed += 1;
            *resource_distribution.entry(deposit.kind).or_insert(0) += 1;
        }
    }

    MapInfo {
        width: grid.width(),
        height: grid.height(),
        total_tiles: grid.len(),
        tile_distribution,
        resources_placed,
        resource_distribution,
    }
}

/// Тайлы квадрата `[cx - radius, cx + radius] × [cy - radius, cy + radius]`, обрезанного картой
///
/// Несмотря на название параметра, область квадратная, а не круглая.
/// Порядок: `x` снаружи, `y` внутри. Отрицательный радиус даёт пустой результат.
pub fn get_visible_area(grid: &TileGrid, center_x: i32, center_y: i32, radius: i32) -> Vec<&Tile> {
    if radius < 0 {
        return Vec::new();
    }
    let min_x = center_x.saturating_sub(radius).max(0);
    let max_x = center_x.saturating_add(radius).min(grid.width() as i32 - 1);
    let min_y = center_y.saturating_sub(radius).max(0);
    let max_y = center_y.saturating_add(radius).min(grid.height() as i32 - 1);

    let mut visible = Vec::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            if let Some(tile) = grid.get_tile(x, y) {
                visible.push(tile);
            }
        }
    }
    visible
}
