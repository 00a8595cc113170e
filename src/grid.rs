use crate::tile::{Coord, TerrainKind, Tile};

/// Порядок обхода соседей: dx снаружи, dy внутри, без (0, 0)
///
/// От этого порядка зависит детерминированность поиска пути.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Двумерная сетка тайлов фиксированного размера
///
/// Тайлы хранятся построчно: индекс `y * width + x`.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Сетка, целиком покрытая травой
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(Tile::new(Coord::new(x, y), TerrainKind::Grass));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub(crate) fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|idx| &self.tiles[idx])
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |idx| &mut self.tiles[idx])
    }

    /// Перезаписывает тип тайла, сбрасывая ресурс и проходимость к значениям по умолчанию
    ///
    /// Возвращает `false` без изменений, если координата вне карты.
    pub fn set_tile(&mut self, x: i32, y: i32, terrain: TerrainKind) -> bool {
        match self.get_tile_mut(x, y) {
            Some(tile) => {
                *tile = Tile::new(tile.coord, terrain);
                true
            }
            None => false,
        }
    }

    /// Переопределяет проходимость независимо от типа местности
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> bool {
        match self.get_tile_mut(x, y) {
            Some(tile) => {
                tile.walkable = walkable;
                true
            }
            None => false,
        }
    }

    /// Проходимые соседи тайла (до 8 штук) в порядке [`NEIGHBOR_OFFSETS`]
    pub fn neighbors(&self, tile: &Tile) -> Vec<&Tile> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.get_tile(tile.x() + dx, tile.y() + dy))
            .filter(|neighbor| neighbor.walkable)
            .collect()
    }

    /// Все тайлы построчно
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }
}
