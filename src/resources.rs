use crate::config::ResourceSettings;
use crate::grid::TileGrid;
use crate::tile::{ResourceDeposit, ResourceKind, TerrainKind};
use rand::Rng;

/// Размещает залежи ресурсов на всех тайлах, кроме воды
///
/// Тайлы обходятся построчно, ресурсы тайла — в порядке [`ResourceSettings::spawns_for`].
/// Каждый бросок независим; при нескольких успехах остаётся последний.
/// Возвращает количество тайлов с залежами после размещения.
pub fn place_resources<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    settings: &ResourceSettings,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for tile in grid.tiles_mut() {
        if tile.terrain == TerrainKind::Water {
            continue;
        }
        for spawn in settings.spawns_for(tile.terrain) {
            if rng.r#gen::<f64>() < spawn.chance {
                let amount = rng.gen_range(settings.min_amount..=settings.max_amount);
                tile.resource = Some(ResourceDeposit {
                    kind: spawn.resource,
                    amount,
                });
            }
        }
        if tile.resource.is_some() {
            placed += 1;
        }
    }
    tracing::debug!(placed, "Resources placed");
    placed
}

/// Кладёт залежь на тайл, заменяя прежнюю
///
/// Возвращает `false` для клеток вне карты и для воды. Нулевой объём очищает тайл.
pub fn place_resource(
    grid: &mut TileGrid,
    x: i32,
    y: i32,
    kind: ResourceKind,
    amount: u32,
) -> bool {
    let Some(tile) = grid.get_tile_mut(x, y) else {
        return false;
    };
    if tile.terrain == TerrainKind::Water {
        return false;
    }
    tile.resource = (amount > 0).then_some(ResourceDeposit { kind, amount });
    true
}

/// Добывает до `amount` единиц ресурса с тайла
///
/// Возвращает тип ресурса и фактически добытое количество: не больше запрошенного
/// и не больше остатка. Исчерпанная залежь удаляется. `None`, если на тайле нет залежи.
pub fn harvest_resource(
    grid: &mut TileGrid,
    x: i32,
    y: i32,
    amount: u32,
) -> Option<(ResourceKind, u32)> {
    let tile = grid.get_tile_mut(x, y)?;
    let deposit = tile.resource.as_mut()?;

    let harvested = amount.min(deposit.amount);
    deposit.amount -= harvested;
    let kind = deposit.kind;
    if deposit.amount == 0 {
        tile.resource = None;
    }
    Some((kind, harvested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceSpawn;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn harvest_partial_then_exhaust() {
        let mut grid = TileGrid::new(3, 3);
        assert!(place_resource(&mut grid, 1, 1, ResourceKind::Gold, 10));

        assert_eq!(
            harvest_resource(&mut grid, 1, 1, 4),
            Some((ResourceKind::Gold, 4))
        );
        assert_eq!(grid.get_tile(1, 1).unwrap().resource.unwrap().amount, 6);

        // Запрошено больше остатка
        assert_eq!(
            harvest_resource(&mut grid, 1, 1, 100),
            Some((ResourceKind::Gold, 6))
        );
        assert!(grid.get_tile(1, 1).unwrap().resource.is_none());
        assert_eq!(harvest_resource(&mut grid, 1, 1, 1), None);
    }

    #[test]
    fn harvest_zero_keeps_deposit() {
        let mut grid = TileGrid::new(2, 2);
        place_resource(&mut grid, 0, 0, ResourceKind::Food, 3);
        assert_eq!(
            harvest_resource(&mut grid, 0, 0, 0),
            Some((ResourceKind::Food, 0))
        );
        assert_eq!(grid.get_tile(0, 0).unwrap().resource.unwrap().amount, 3);
    }

    #[test]
    fn harvest_without_deposit() {
        let mut grid = TileGrid::new(2, 2);
        grid.set_tile(1, 1, TerrainKind::Water);
        assert_eq!(harvest_resource(&mut grid, 0, 0, 5), None);
        assert_eq!(harvest_resource(&mut grid, 1, 1, 5), None);
        assert_eq!(harvest_resource(&mut grid, -1, 7, 5), None);
    }

    #[test]
    fn place_resource_rejects_water_and_out_of_bounds() {
        let mut grid = TileGrid::new(2, 2);
        grid.set_tile(0, 1, TerrainKind::Water);
        assert!(!place_resource(&mut grid, 0, 1, ResourceKind::Wood, 5));
        assert!(!place_resource(&mut grid, 2, 0, ResourceKind::Wood, 5));
        assert!(grid.get_tile(0, 1).unwrap().resource.is_none());
    }

    #[test]
    fn placing_zero_amount_clears_deposit() {
        let mut grid = TileGrid::new(2, 2);
        place_resource(&mut grid, 1, 0, ResourceKind::Stone, 8);
        assert!(place_resource(&mut grid, 1, 0, ResourceKind::Stone, 0));
        assert!(grid.get_tile(1, 0).unwrap().resource.is_none());
    }

    #[test]
    fn placement_respects_terrain_rules() {
        let mut grid = TileGrid::new(20, 20);
        for x in 0..20 {
            grid.set_tile(x, 0, TerrainKind::Water);
            grid.set_tile(x, 1, TerrainKind::Forest);
            grid.set_tile(x, 2, TerrainKind::Mountain);
        }
        let settings = ResourceSettings::default();
        let placed = place_resources(&mut grid, &settings, &mut ChaCha8Rng::seed_from_u64(4));

        assert_eq!(placed, grid.tiles().filter(|t| t.resource.is_some()).count());
        for tile in grid.tiles() {
            let Some(deposit) = tile.resource else {
                continue;
            };
            assert!((5..=20).contains(&deposit.amount));
            let allowed: Vec<ResourceKind> = settings
                .spawns_for(tile.terrain)
                .iter()
                .map(|s| s.resource)
                .collect();
            assert!(allowed.contains(&deposit.kind), "{tile:?}");
        }
    }

    #[test]
    fn last_successful_spawn_wins() {
        let mut grid = TileGrid::new(4, 4);
        let settings = ResourceSettings {
            grass: vec![
                ResourceSpawn::new(ResourceKind::Wood, 1.0),
                ResourceSpawn::new(ResourceKind::Gold, 1.0),
            ],
            ..ResourceSettings::default()
        };
        let placed = place_resources(&mut grid, &settings, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(placed, 16);
        assert!(grid
            .tiles()
            .all(|t| t.resource.map(|d| d.kind) == Some(ResourceKind::Gold)));
    }
}
