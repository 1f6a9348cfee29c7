//! Fixed obstacle layout for maze mode
//!
//! The pattern is deterministic per grid size: corner blocks plus short runs
//! along each edge, with everything inside the spawn safe zone filtered out.

use super::Cell;

/// Safe-zone half-width around the spawn row, in cells
const SAFE_ZONE_X: i32 = 5;
/// Safe-zone half-height around the spawn row, in cells
const SAFE_ZONE_Y: i32 = 2;

/// True when `cell` is close enough to the spawn center that an obstacle
/// there could trap or immediately kill the snake
pub fn in_safe_zone(cell: Cell, grid_w: i32, grid_h: i32) -> bool {
    let cx = grid_w / 2;
    let cy = grid_h / 2;
    (cell.x - cx).abs() <= SAFE_ZONE_X && (cell.y - cy).abs() <= SAFE_ZONE_Y
}

/// Generate the obstacle set for one run
pub fn generate(grid_w: i32, grid_h: i32) -> Vec<Cell> {
    let mut pattern = Vec::new();

    // Corner blocks
    for (bx, by, dx, dy) in [
        (2, 2, 1, 1),
        (grid_w - 3, 2, -1, 1),
        (2, grid_h - 3, 1, -1),
        (grid_w - 3, grid_h - 3, -1, -1),
    ] {
        pattern.push(Cell::new(bx, by));
        pattern.push(Cell::new(bx + dx, by));
        pattern.push(Cell::new(bx, by + dy));
    }

    // Paired runs along the top and bottom edges
    for y in [3, grid_h - 4] {
        pattern.push(Cell::new(grid_w / 3, y));
        pattern.push(Cell::new(grid_w / 3 + 1, y));
        pattern.push(Cell::new(2 * grid_w / 3, y));
        pattern.push(Cell::new(2 * grid_w / 3 - 1, y));
    }

    // Paired runs along the left and right edges
    for x in [3, grid_w - 4] {
        pattern.push(Cell::new(x, grid_h / 3));
        pattern.push(Cell::new(x, grid_h / 3 + 1));
        pattern.push(Cell::new(x, 2 * grid_h / 3));
        pattern.push(Cell::new(x, 2 * grid_h / 3 - 1));
    }

    pattern
        .into_iter()
        .filter(|c| {
            c.x >= 0
                && c.x < grid_w
                && c.y >= 0
                && c.y < grid_h
                && !in_safe_zone(*c, grid_w, grid_h)
        })
        .collect()
}
