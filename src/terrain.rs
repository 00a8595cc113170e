// src/terrain.rs
//! Генерация местности ростом кластеров
//!
//! Карта начинается целиком из травы. Затем строго по порядку — вода, лес, горы — на ней
//! «выращиваются» кластеры: из случайного центра расходится очередь-фронт (как в BFS),
//! и каждая извлечённая клетка с вероятностью `expansion_chance` добавляет во фронт
//! четырёх соседей по сторонам света.
//!
//! ## Правило приоритета воды
//!
//! Кластер леса или гор никогда не перекрашивает воду. Водный кластер перекрашивает всё.
//! Поэтому озёра, созданные первыми, переживают последующие этапы.
//!
//! ## Размер кластера
//!
//! `size` — это потолок, а не гарантия: если фронт опустел раньше, кластер остаётся меньше.

use crate::config::{ClusterSettings, TerrainSettings};
use crate::grid::TileGrid;
use crate::tile::{Coord, TerrainKind};
use rand::Rng;
use std::collections::{HashSet, VecDeque};

/// Порядок генерации: вода первой, чтобы правило приоритета имело смысл
pub const GENERATION_ORDER: [TerrainKind; 3] =
    [TerrainKind::Water, TerrainKind::Forest, TerrainKind::Mountain];

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Заполняет сетку травой и выращивает кластеры воды, леса и гор
///
/// Порядок потребления случайных чисел фиксирован: для каждого типа сначала количество
/// кластеров, затем для каждого кластера `x` центра, `y` центра и размер, затем броски роста.
/// При одинаковом сиде и размерах результат идентичен.
pub fn generate_terrain<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    settings: &TerrainSettings,
    rng: &mut R,
) {
    for tile in grid.tiles_mut() {
        tile.terrain = TerrainKind::Grass;
        tile.walkable = true;
        tile.resource = None;
    }

    for kind in GENERATION_ORDER {
        if let Some(clusters) = settings.clusters_for(kind) {
            generate_clusters(grid, kind, clusters, settings.expansion_chance, rng);
        }
    }
}

fn generate_clusters<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    kind: TerrainKind,
    clusters: &ClusterSettings,
    expansion_chance: f64,
    rng: &mut R,
) {
    let count = rng.gen_range(clusters.min_count..=clusters.max_count);
    let mut painted = 0;
    for _ in 0..count {
        let center_x = rng.gen_range(0..grid.width()) as i32;
        let center_y = rng.gen_range(0..grid.height()) as i32;
        let size = rng.gen_range(clusters.min_size..=clusters.max_size);
        painted += grow_cluster(
            grid,
            Coord::new(center_x, center_y),
            size,
            kind,
            expansion_chance,
            rng,
        );
    }
    tracing::debug!(?kind, clusters = count, painted, "Terrain clusters grown");
}

/// Выращивает один кластер и возвращает количество перекрашенных клеток
///
/// Соседи добавляются во фронт без проверки на посещённость: дубликаты отсеиваются при извлечении
/// и не потребляют случайных чисел.
pub fn grow_cluster<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    center: Coord,
    size: u32,
    kind: TerrainKind,
    expansion_chance: f64,
    rng: &mut R,
) -> u32 {
    let mut created = 0;
    let mut queue = VecDeque::from([center]);
    let mut visited = HashSet::new();

    while created < size {
        let Some(coord) = queue.pop_front() else {
            break;
        };
        if visited.contains(&coord) || !grid.contains(coord.x, coord.y) {
            continue;
        }
        visited.insert(coord);

        let existing = grid.get_tile(coord.x, coord.y).map(|tile| tile.terrain);
        if existing != Some(TerrainKind::Water) || kind == TerrainKind::Water {
            grid.set_tile(coord.x, coord.y, kind);
            created += 1;
        }

        if rng.r#gen::<f64>() < expansion_chance {
            for &(dx, dy) in &DIRECTIONS {
                queue.push_back(Coord::new(coord.x + dx, coord.y + dy));
            }
        }
    }

    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn terrain_layout(grid: &TileGrid) -> Vec<TerrainKind> {
        grid.tiles().map(|tile| tile.terrain).collect()
    }

    #[test]
    fn same_seed_same_layout() {
        let settings = TerrainSettings::default();
        let mut first = TileGrid::new(40, 30);
        let mut second = TileGrid::new(40, 30);
        generate_terrain(&mut first, &settings, &mut ChaCha8Rng::seed_from_u64(42));
        generate_terrain(&mut second, &settings, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(terrain_layout(&first), terrain_layout(&second));
    }

    #[test]
    fn cluster_never_exceeds_size() {
        let mut grid = TileGrid::new(30, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let created = grow_cluster(
            &mut grid,
            Coord::new(15, 15),
            12,
            TerrainKind::Forest,
            1.0,
            &mut rng,
        );
        assert_eq!(created, 12);
        let forests = grid
            .tiles()
            .filter(|t| t.terrain == TerrainKind::Forest)
            .count();
        assert_eq!(forests, 12);
    }

    #[test]
    fn cluster_stops_when_frontier_empties() {
        let mut grid = TileGrid::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Без расширения фронт содержит только центр
        let created = grow_cluster(
            &mut grid,
            Coord::new(5, 5),
            10,
            TerrainKind::Mountain,
            0.0,
            &mut rng,
        );
        assert_eq!(created, 1);
        assert_eq!(grid.get_tile(5, 5).unwrap().terrain, TerrainKind::Mountain);
    }

    #[test]
    fn cluster_centered_off_map_paints_nothing() {
        let mut grid = TileGrid::new(5, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let created = grow_cluster(
            &mut grid,
            Coord::new(-3, 2),
            5,
            TerrainKind::Forest,
            1.0,
            &mut rng,
        );
        assert_eq!(created, 0);
    }

    #[test]
    fn land_clusters_do_not_overwrite_water() {
        let mut grid = TileGrid::new(5, 5);
        for y in 0..5 {
            grid.set_tile(2, y, TerrainKind::Water);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        grow_cluster(
            &mut grid,
            Coord::new(2, 2),
            25,
            TerrainKind::Mountain,
            1.0,
            &mut rng,
        );
        for y in 0..5 {
            assert_eq!(grid.get_tile(2, y).unwrap().terrain, TerrainKind::Water);
        }
        assert_eq!(grid.get_tile(1, 2).unwrap().terrain, TerrainKind::Mountain);
    }

    #[test]
    fn water_overwrites_everything() {
        let mut grid = TileGrid::new(3, 3);
        for tile in grid.tiles_mut() {
            tile.terrain = TerrainKind::Mountain;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let created = grow_cluster(
            &mut grid,
            Coord::new(1, 1),
            9,
            TerrainKind::Water,
            1.0,
            &mut rng,
        );
        assert_eq!(created, 9);
        assert!(grid
            .tiles()
            .all(|t| t.terrain == TerrainKind::Water && !t.walkable));
    }

    #[test]
    fn generation_keeps_every_tile_in_place() {
        let mut grid = TileGrid::new(20, 20);
        generate_terrain(
            &mut grid,
            &TerrainSettings::default(),
            &mut ChaCha8Rng::seed_from_u64(11),
        );
        for tile in grid.tiles() {
            assert_eq!(grid.get_tile(tile.x(), tile.y()).unwrap().coord, tile.coord);
            assert_eq!(tile.walkable, tile.terrain != TerrainKind::Water);
        }
        assert_eq!(grid.len(), 400);
    }
}
