// src/tile.rs
//! Модель тайла: координаты, тип местности, ресурсы
//!
//! Тайл идентифицируется своей координатой; две клетки сетки никогда не делят координату.
//! Проходимость по умолчанию выводится из типа местности, но хранится отдельным флагом
//! и может быть переопределена независимо от типа.

use serde::{Deserialize, Serialize};

/// Координата тайла на карте
///
/// Знаковые компоненты позволяют запрашивать клетки за пределами карты
/// (например, соседей угловой клетки) без переполнения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Евклидово расстояние между координатами
    #[must_use]
    pub fn distance(self, other: Coord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Диагональный шаг: смещение ровно на 1 по обеим осям
    #[must_use]
    pub fn is_diagonal_step(self, other: Coord) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Тип местности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainKind {
    Grass,
    Water,
    Forest,
    Mountain,
}

impl TerrainKind {
    /// Все типы в фиксированном порядке (для статистики)
    pub const ALL: [TerrainKind; 4] = [
        TerrainKind::Grass,
        TerrainKind::Water,
        TerrainKind::Forest,
        TerrainKind::Mountain,
    ];

    /// Проходимость по умолчанию: всё, кроме воды
    #[must_use]
    pub const fn default_walkable(self) -> bool {
        !matches!(self, TerrainKind::Water)
    }

    /// Базовая стоимость входа на тайл (без диагонального множителя)
    ///
    /// Вода непроходима по определению, поэтому её стоимость бесконечна.
    #[must_use]
    pub const fn movement_cost(self) -> f32 {
        match self {
            TerrainKind::Grass => 1.0,
            TerrainKind::Forest => 1.5,
            TerrainKind::Mountain => 2.0,
            TerrainKind::Water => f32::INFINITY,
        }
    }

    #[must_use]
    pub const fn to_rgb(self) -> [u8; 3] {
        match self {
            TerrainKind::Grass => [150, 200, 100],
            TerrainKind::Water => [0, 64, 128],
            TerrainKind::Forest => [60, 120, 60],
            TerrainKind::Mountain => [150, 150, 150],
        }
    }

    /// Символ для текстового вывода карты
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            TerrainKind::Grass => '.',
            TerrainKind::Water => '~',
            TerrainKind::Forest => 'T',
            TerrainKind::Mountain => '^',
        }
    }
}

/// Тип ресурса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Wood,
    Stone,
    Gold,
    Food,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Gold,
        ResourceKind::Food,
    ];

    #[must_use]
    pub const fn to_rgb(self) -> [u8; 3] {
        match self {
            ResourceKind::Wood => [120, 72, 30],
            ResourceKind::Stone => [90, 90, 100],
            ResourceKind::Gold => [240, 200, 40],
            ResourceKind::Food => [220, 60, 60],
        }
    }
}

/// Залежь ресурса на тайле
///
/// Нулевой остаток не хранится: залежь с `amount == 0` удаляется с тайла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeposit {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// Один тайл карты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: Coord,
    pub terrain: TerrainKind,
    pub resource: Option<ResourceDeposit>,
    pub walkable: bool,
}

impl Tile {
    /// Новый тайл без ресурса с проходимостью по умолчанию для типа местности
    #[must_use]
    pub const fn new(coord: Coord, terrain: TerrainKind) -> Self {
        Self {
            coord,
            terrain,
            resource: None,
            walkable: terrain.default_walkable(),
        }
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.coord.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.coord.y
    }
}
