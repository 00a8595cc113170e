// src/map.rs
//! Игровая карта — точка входа для внешних слоёв
//!
//! `GameMap` владеет сеткой тайлов и выполняет генерацию при создании:
//! 1. Вся карта заполняется травой
//! 2. Выращиваются кластеры воды, леса и гор ([`crate::terrain`])
//! 3. Размещаются залежи ресурсов ([`crate::resources`])
//!
//! После генерации слой юнитов обращается к карте через [`GameMap::find_path`],
//! [`GameMap::get_tile`], [`GameMap::place_resource`] и [`GameMap::harvest_resource`],
//! а слой отображения — через [`GameMap::get_visible_area`] и [`GameMap::get_map_info`].
//!
//! ## Потоки
//!
//! Все изменения требуют `&mut GameMap`, чтение — `&GameMap`, так что правило
//! «один писатель или много читателей» обеспечивается компилятором. Поиск пути не хранит
//! состояния между вызовами и может выполняться параллельно, пока карта не меняется.
//!
//! ## Пример
//! ```rust
//! use gamemap::{Coord, GameMap};
//!
//! let map = GameMap::new(32, 32, Some(7)).unwrap();
//! let again = GameMap::new(32, 32, Some(7)).unwrap();
//! assert_eq!(map.get_map_info(), again.get_map_info());
//!
//! let info = map.get_map_info();
//! assert_eq!(info.total_tiles, 32 * 32);
//! assert!(map.get_tile(40, 0).is_none());
//! ```

use crate::config::MapGenerationParams;
use crate::error::MapError;
use crate::grid::TileGrid;
use crate::pathfinding;
use crate::query::{self, MapInfo};
use crate::render;
use crate::resources;
use crate::terrain;
use crate::tile::{Coord, ResourceKind, TerrainKind, Tile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(Debug, Clone)]
pub struct GameMap {
    grid: TileGrid,
    params: MapGenerationParams,
}

impl GameMap {
    /// Создаёт и генерирует карту с параметрами по умолчанию
    ///
    /// При заданном `seed` результат полностью детерминирован.
    pub fn new(width: u32, height: u32, seed: Option<u64>) -> Result<Self, MapError> {
        Self::from_params(&MapGenerationParams::new(width, height, seed))
    }

    pub fn from_params(params: &MapGenerationParams) -> Result<Self, MapError> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut grid = TileGrid::new(params.width, params.height);
        terrain::generate_terrain(&mut grid, &params.terrain, &mut rng);
        let placed = resources::place_resources(&mut grid, &params.resources, &mut rng);

        tracing::info!(
            width = params.width,
            height = params.height,
            seed = ?params.seed,
            resources = placed,
            "Map generated"
        );

        Ok(Self {
            grid,
            params: params.clone(),
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn params(&self) -> &MapGenerationParams {
        &self.params
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid.get_tile(x, y)
    }

    pub fn set_tile(&mut self, x: i32, y: i32, terrain: TerrainKind) -> bool {
        self.grid.set_tile(x, y, terrain)
    }

    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> bool {
        self.grid.set_walkable(x, y, walkable)
    }

    pub fn neighbors(&self, tile: &Tile) -> Vec<&Tile> {
        self.grid.neighbors(tile)
    }

    pub fn place_resource(&mut self, x: i32, y: i32, kind: ResourceKind, amount: u32) -> bool {
        resources::place_resource(&mut self.grid, x, y, kind, amount)
    }

    pub fn harvest_resource(&mut self, x: i32, y: i32, amount: u32) -> Option<(ResourceKind, u32)> {
        resources::harvest_resource(&mut self.grid, x, y, amount)
    }

    /// Путь A* от `start` до `goal` включительно; `None`, если пути нет
    pub fn find_path(&self, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
        pathfinding::find_path(
            &self.grid,
            start,
            goal,
            self.params.pathfinding.max_expansions,
        )
    }

    pub fn path_cost(&self, path: &[Coord]) -> Option<f32> {
        pathfinding::path_cost(&self.grid, path)
    }

    pub fn get_map_info(&self) -> MapInfo {
        query::get_map_info(&self.grid)
    }

    pub fn get_visible_area(&self, center_x: i32, center_y: i32, radius: i32) -> Vec<&Tile> {
        query::get_visible_area(&self.grid, center_x, center_y, radius)
    }

    pub fn save_as_png(&self, path: &str, scale: u32, route: Option<&[Coord]>) -> Result<(), MapError> {
        render::save_as_png(&self.grid, path, scale, route)
    }

    pub fn to_ascii(&self) -> String {
        render::to_ascii(&self.grid)
    }
}

impl fmt::Display for GameMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameMap(width={}, height={})", self.width(), self.height())
    }
}
