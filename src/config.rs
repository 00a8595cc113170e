// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией карты:
//! - Размеры карты и сид генератора
//! - Количество и размеры кластеров местности (вода, лес, горы)
//! - Вероятности появления ресурсов по типам местности
//! - Ограничения поиска пути
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.
//! Значения по умолчанию воспроизводят классическую карту: 3–6 озёр, 5–10 лесов, 3–6 горных массивов.

use crate::error::MapError;
use crate::tile::{ResourceKind, TerrainKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Параметры одного типа кластеров местности
///
/// Границы диапазонов включительные.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSettings {
    /// Минимальное количество кластеров
    pub min_count: u32,
    /// Максимальное количество кластеров
    pub max_count: u32,
    /// Минимальный целевой размер кластера в тайлах
    pub min_size: u32,
    /// Максимальный целевой размер кластера в тайлах
    ///
    /// Это верхняя граница, а не гарантия: рост может остановиться раньше,
    /// если фронт расширения опустеет.
    pub max_size: u32,
}

impl ClusterSettings {
    #[must_use]
    pub const fn new(min_count: u32, max_count: u32, min_size: u32, max_size: u32) -> Self {
        Self {
            min_count,
            max_count,
            min_size,
            max_size,
        }
    }

    fn validate(&self, count_field: &'static str, size_field: &'static str) -> Result<(), MapError> {
        check_range(count_field, self.min_count, self.max_count)?;
        check_range(size_field, self.min_size, self.max_size)
    }
}

/// Настройки генерации местности
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSettings {
    /// Водоёмы (генерируются первыми и имеют приоритет)
    #[serde(default = "default_water")]
    pub water: ClusterSettings,

    /// Леса
    #[serde(default = "default_forest")]
    pub forest: ClusterSettings,

    /// Горы
    #[serde(default = "default_mountain")]
    pub mountain: ClusterSettings,

    /// Вероятность того, что покрашенная клетка добавит во фронт четырёх соседей.
    ///
    /// Определяет «рваность» кластеров:
    /// - `1.0` → почти ромбовидные сплошные пятна,
    /// - `0.6` → неровные области (по умолчанию),
    /// - ниже `0.5` → кластеры часто обрываются на нескольких клетках.
    #[serde(default = "default_expansion_chance")]
    pub expansion_chance: f64,
}

fn default_water() -> ClusterSettings {
    ClusterSettings::new(3, 6, 5, 15)
}
fn default_forest() -> ClusterSettings {
    ClusterSettings::new(5, 10, 8, 20)
}
fn default_mountain() -> ClusterSettings {
    ClusterSettings::new(3, 6, 6, 15)
}
fn default_expansion_chance() -> f64 {
    0.6
}

impl TerrainSettings {
    /// Настройки кластеров для типа местности (`None` для травы — это фон)
    #[must_use]
    pub fn clusters_for(&self, kind: TerrainKind) -> Option<&ClusterSettings> {
        match kind {
            TerrainKind::Water => Some(&self.water),
            TerrainKind::Forest => Some(&self.forest),
            TerrainKind::Mountain => Some(&self.mountain),
            TerrainKind::Grass => None,
        }
    }
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            water: default_water(),
            forest: default_forest(),
            mountain: default_mountain(),
            expansion_chance: 0.6,
        }
    }
}

/// Вероятность появления одного типа ресурса
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpawn {
    pub resource: ResourceKind,
    pub chance: f64,
}

impl ResourceSpawn {
    #[must_use]
    pub const fn new(resource: ResourceKind, chance: f64) -> Self {
        Self { resource, chance }
    }
}

/// Настройки размещения ресурсов
///
/// Порядок элементов в списках важен: на тайле помещается только одна залежь,
/// поэтому при нескольких успешных бросках побеждает последний по списку.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSettings {
    #[serde(default = "default_grass_spawns")]
    pub grass: Vec<ResourceSpawn>,

    #[serde(default = "default_forest_spawns")]
    pub forest: Vec<ResourceSpawn>,

    #[serde(default = "default_mountain_spawns")]
    pub mountain: Vec<ResourceSpawn>,

    /// Минимальный объём новой залежи
    #[serde(default = "default_min_amount")]
    pub min_amount: u32,

    /// Максимальный объём новой залежи (включительно)
    #[serde(default = "default_max_amount")]
    pub max_amount: u32,
}

fn default_grass_spawns() -> Vec<ResourceSpawn> {
    vec![ResourceSpawn::new(ResourceKind::Food, 0.15)]
}
fn default_forest_spawns() -> Vec<ResourceSpawn> {
    vec![
        ResourceSpawn::new(ResourceKind::Wood, 0.25),
        ResourceSpawn::new(ResourceKind::Food, 0.05),
    ]
}
fn default_mountain_spawns() -> Vec<ResourceSpawn> {
    vec![
        ResourceSpawn::new(ResourceKind::Stone, 0.20),
        ResourceSpawn::new(ResourceKind::Gold, 0.10),
    ]
}
fn default_min_amount() -> u32 {
    5
}
fn default_max_amount() -> u32 {
    20
}

impl ResourceSettings {
    /// Ресурсы, допустимые на данном типе местности, в порядке оценки
    ///
    /// На воде ресурсы не появляются.
    #[must_use]
    pub fn spawns_for(&self, kind: TerrainKind) -> &[ResourceSpawn] {
        match kind {
            TerrainKind::Grass => &self.grass,
            TerrainKind::Forest => &self.forest,
            TerrainKind::Mountain => &self.mountain,
            TerrainKind::Water => &[],
        }
    }
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            grass: default_grass_spawns(),
            forest: default_forest_spawns(),
            mountain: default_mountain_spawns(),
            min_amount: 5,
            max_amount: 20,
        }
    }
}

/// Ограничения поиска пути
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathfindingSettings {
    /// Максимальное число раскрытых узлов за один поиск; при превышении путь считается ненайденным
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

fn default_max_expansions() -> usize {
    100_000
}

impl Default for PathfindingSettings {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGenerationParams {
    /// Сид генератора случайных чисел. Без сида карта каждый раз новая.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Ширина карты в тайлах (по умолчанию 256)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота карты в тайлах (по умолчанию 256)
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub terrain: TerrainSettings,

    #[serde(default)]
    pub resources: ResourceSettings,

    #[serde(default)]
    pub pathfinding: PathfindingSettings,
}

impl MapGenerationParams {
    /// Параметры по умолчанию с заданными размерами и сидом
    #[must_use]
    pub fn new(width: u32, height: u32, seed: Option<u64>) -> Self {
        Self {
            seed,
            width,
            height,
            ..Self::default()
        }
    }

    /// Загружает параметры из TOML-файла и проверяет их
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// seed = 42
    /// width = 64
    /// height = 48
    ///
    /// [terrain]
    /// expansion_chance = 0.7
    /// ```
    ///
    /// ```rust,no_run
    /// use gamemap::MapGenerationParams;
    /// let params = MapGenerationParams::from_toml_file("map.toml")?;
    /// # Ok::<(), gamemap::MapError>(())
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, MapError> {
        let params: Self = toml::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Проверяет размеры, диапазоны и вероятности
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        self.terrain
            .water
            .validate("terrain.water.count", "terrain.water.size")?;
        self.terrain
            .forest
            .validate("terrain.forest.count", "terrain.forest.size")?;
        self.terrain
            .mountain
            .validate("terrain.mountain.count", "terrain.mountain.size")?;
        check_probability("terrain.expansion_chance", self.terrain.expansion_chance)?;

        for (field, spawns) in [
            ("resources.grass", &self.resources.grass),
            ("resources.forest", &self.resources.forest),
            ("resources.mountain", &self.resources.mountain),
        ] {
            for spawn in spawns {
                check_probability(field, spawn.chance)?;
            }
        }
        // Залежь нулевого объёма не хранится на тайле
        if self.resources.min_amount == 0 {
            return Err(MapError::InvalidRange {
                field: "resources.amount",
                min: 0,
                max: self.resources.max_amount,
            });
        }
        check_range(
            "resources.amount",
            self.resources.min_amount,
            self.resources.max_amount,
        )
    }
}

fn check_range(field: &'static str, min: u32, max: u32) -> Result<(), MapError> {
    if min > max {
        return Err(MapError::InvalidRange { field, min, max });
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f64) -> Result<(), MapError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MapError::InvalidProbability { field, value });
    }
    Ok(())
}

fn default_width() -> u32 {
    256
}
fn default_height() -> u32 {
    256
}

impl Default for MapGenerationParams {
    fn default() -> Self {
        Self {
            seed: None,
            width: 256,
            height: 256,
            terrain: TerrainSettings::default(),
            resources: ResourceSettings::default(),
            pathfinding: PathfindingSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let params = MapGenerationParams::from_toml_str("").unwrap();
        assert_eq!(params, MapGenerationParams::default());
        assert_eq!(params.terrain.water, ClusterSettings::new(3, 6, 5, 15));
        assert_eq!(params.terrain.forest, ClusterSettings::new(5, 10, 8, 20));
        assert_eq!(params.terrain.mountain, ClusterSettings::new(3, 6, 6, 15));
        assert_eq!(params.resources.min_amount, 5);
        assert_eq!(params.resources.max_amount, 20);
        assert_eq!(
            params.resources.grass,
            vec![ResourceSpawn::new(ResourceKind::Food, 0.15)]
        );
        assert_eq!(
            params.resources.forest,
            vec![
                ResourceSpawn::new(ResourceKind::Wood, 0.25),
                ResourceSpawn::new(ResourceKind::Food, 0.05),
            ]
        );
        assert_eq!(
            params.resources.mountain,
            vec![
                ResourceSpawn::new(ResourceKind::Stone, 0.20),
                ResourceSpawn::new(ResourceKind::Gold, 0.10),
            ]
        );
        assert_eq!(params.terrain.expansion_chance, 0.6);
        assert_eq!(params.pathfinding.max_expansions, 100_000);
    }

    #[test]
    fn partial_toml_overrides() {
        let params = MapGenerationParams::from_toml_str(
            r#"
            seed = 7
            width = 32
            height = 16

            [terrain]
            expansion_chance = 0.9

            [terrain.water]
            min_count = 1
            max_count = 1
            min_size = 4
            max_size = 4

            [[resources.grass]]
            resource = "Gold"
            chance = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.width, 32);
        assert_eq!(params.terrain.expansion_chance, 0.9);
        assert_eq!(params.terrain.water, ClusterSettings::new(1, 1, 4, 4));
        assert_eq!(params.terrain.forest, default_forest());
        assert_eq!(
            params.resources.grass,
            vec![ResourceSpawn::new(ResourceKind::Gold, 0.5)]
        );
        assert_eq!(params.resources.forest, default_forest_spawns());
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = MapGenerationParams::from_toml_str("width = 0").unwrap_err();
        assert!(matches!(err, MapError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut params = MapGenerationParams::default();
        params.terrain.forest.min_size = 30;
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidRange {
                field: "terrain.forest.size",
                min: 30,
                max: 20
            }
        ));
    }

    #[test]
    fn rejects_zero_min_amount() {
        let err = MapGenerationParams::from_toml_str(
            r#"
            [resources]
            min_amount = 0
            max_amount = 10
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidRange {
                field: "resources.amount",
                min: 0,
                max: 10
            }
        ));
    }

    #[test]
    fn rejects_bad_probabilities() {
        let mut params = MapGenerationParams::default();
        params.resources.mountain[1].chance = 1.5;
        assert!(matches!(
            params.validate(),
            Err(MapError::InvalidProbability {
                field: "resources.mountain",
                ..
            })
        ));

        let mut params = MapGenerationParams::default();
        params.terrain.expansion_chance = -0.1;
        assert!(params.validate().is_err());
    }

    #[test]
    fn water_has_no_spawns() {
        let settings = ResourceSettings::default();
        assert!(settings.spawns_for(TerrainKind::Water).is_empty());
        assert_eq!(settings.spawns_for(TerrainKind::Forest).len(), 2);
    }
}
