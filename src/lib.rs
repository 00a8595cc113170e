pub mod config;
pub mod error;
pub mod grid;
pub mod map;
pub mod pathfinding;
pub mod query;
pub mod render;
pub mod resources;
pub mod terrain;
pub mod tile;

pub use config::{
    ClusterSettings, MapGenerationParams, PathfindingSettings, ResourceSettings, ResourceSpawn,
    TerrainSettings,
};
pub use error::MapError;
pub use grid::TileGrid;
pub use map::GameMap;
pub use query::MapInfo;
pub use tile::{Coord, ResourceDeposit, ResourceKind, TerrainKind, Tile};
