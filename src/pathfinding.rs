// src/pathfinding.rs
//! Поиск пути A* по сетке тайлов
//!
//! ## Алгоритм
//!
//! 1. **Открытое множество** — двоичная куча, упорядоченная по возрастанию `f = g + h`.
//!    При равных `f` раньше извлекается узел с меньшим `h` (ближе к цели), при равных `h` —
//!    добавленный раньше. Такой порядок делает результаты воспроизводимыми.
//! 2. **Ленивое удаление** — улучшенный узел не ищется в куче, а просто добавляется заново.
//!    Лучшая известная стоимость `g` хранится в таблице узлов, и устаревшие записи
//!    (с большим `g`) пропускаются при извлечении.
//! 3. **Закрытое множество** — координаты, до которых уже найден окончательный путь.
//! 4. **Восстановление пути** — узлы хранят координату родителя, а не ссылку на него,
//!    поэтому цепочка разворачивается простым проходом по таблице.
//!
//! ## Стоимость
//!
//! Шаг на тайл стоит его базовую стоимость (трава 1.0, лес 1.5, горы 2.0),
//! диагональный шаг умножается на [`DIAGONAL_MULTIPLIER`]. Эвристика — евклидово расстояние.
//!
//! ## Ограничение
//!
//! Поиск прекращается после `max_expansions` раскрытых узлов: на больших картах
//! недостижимая цель иначе обходит всю связную область.

use crate::grid::TileGrid;
use crate::tile::{Coord, Tile};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Множитель стоимости диагонального шага
pub const DIAGONAL_MULTIPLIER: f32 = 1.414;

/// Узел поиска. Живёт только внутри одного вызова [`find_path`].
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: f32,
    parent: Option<Coord>,
}

/// Запись открытого множества
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    coord: Coord,
    g: f32,
    h: f32,
    seq: u64,
}

impl OpenEntry {
    fn f(&self) -> f32 {
        self.g + self.h
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap — max-куча, поэтому сравнение перевёрнуто
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f()
            .total_cmp(&self.f())
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Евклидово расстояние между тайлами
pub fn heuristic(from: Coord, to: Coord) -> f32 {
    from.distance(to)
}

/// Стоимость перехода на соседний тайл; бесконечность, если `to` непроходим
pub fn movement_cost(from: &Tile, to: &Tile) -> f32 {
    if !to.walkable {
        return f32::INFINITY;
    }
    let multiplier = if from.coord.is_diagonal_step(to.coord) {
        DIAGONAL_MULTIPLIER
    } else {
        1.0
    };
    to.terrain.movement_cost() * multiplier
}

/// Суммарная стоимость пути; `None`, если путь выходит за пределы карты
pub fn path_cost(grid: &TileGrid, path: &[Coord]) -> Option<f32> {
    let mut total = 0.0;
    for step in path.windows(2) {
        let from = grid.get_tile(step[0].x, step[0].y)?;
        let to = grid.get_tile(step[1].x, step[1].y)?;
        total += movement_cost(from, to);
    }
    Some(total)
}

/// Ищет путь от `start` до `goal` включительно
///
/// Возвращает `None`, если один из концов вне карты или непроходим, цель недостижима
/// или исчерпан лимит `max_expansions`. Для `start == goal` возвращает `[start]`.
pub fn find_path(
    grid: &TileGrid,
    start: Coord,
    goal: Coord,
    max_expansions: usize,
) -> Option<Vec<Coord>> {
    let start_tile = grid.get_tile(start.x, start.y)?;
    let goal_tile = grid.get_tile(goal.x, goal.y)?;
    if !start_tile.walkable || !goal_tile.walkable {
        return None;
    }

    let mut nodes: HashMap<Coord, SearchNode> = HashMap::new();
    let mut open = BinaryHeap::new();
    let mut closed: HashSet<Coord> = HashSet::new();
    let mut seq = 0u64;

    nodes.insert(
        start,
        SearchNode {
            g: 0.0,
            parent: None,
        },
    );
    open.push(OpenEntry {
        coord: start,
        g: 0.0,
        h: heuristic(start, goal),
        seq,
    });

    while let Some(current) = open.pop() {
        if closed.contains(&current.coord) {
            continue;
        }
        if nodes
            .get(&current.coord)
            .is_some_and(|best| best.g < current.g)
        {
            continue;
        }

        if current.coord == goal {
            let path = reconstruct_path(&nodes, goal);
            tracing::debug!(
                ?start,
                ?goal,
                steps = path.len(),
                cost = current.g,
                expanded = closed.len(),
                "Path found"
            );
            return Some(path);
        }

        if closed.len() >= max_expansions {
            tracing::debug!(?start, ?goal, max_expansions, "Path search budget exhausted");
            return None;
        }
        closed.insert(current.coord);

        let Some(current_tile) = grid.get_tile(current.coord.x, current.coord.y) else {
            continue;
        };
        for neighbor in grid.neighbors(current_tile) {
            if closed.contains(&neighbor.coord) {
                continue;
            }
            let cost = movement_cost(current_tile, neighbor);
            if cost.is_infinite() {
                continue;
            }

            let tentative_g = current.g + cost;
            if nodes
                .get(&neighbor.coord)
                .is_some_and(|existing| existing.g <= tentative_g)
            {
                continue;
            }

            nodes.insert(
                neighbor.coord,
                SearchNode {
                    g: tentative_g,
                    parent: Some(current.coord),
                },
            );
            seq += 1;
            open.push(OpenEntry {
                coord: neighbor.coord,
                g: tentative_g,
                h: heuristic(neighbor.coord, goal),
                seq,
            });
        }
    }

    tracing::debug!(?start, ?goal, expanded = closed.len(), "No path");
    None
}

fn reconstruct_path(nodes: &HashMap<Coord, SearchNode>, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = nodes.get(&current).and_then(|node| node.parent) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
