/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for finding particle pairs that
 * are close enough to be linked. It divides the drawing surface into square
 * cells as wide as the link distance, so any pair closer than that distance
 * lies in the same or an adjacent cell.
 *
 * Positions outside the surface (left behind by a shrinking resize) are
 * clamped into the border cells. Clamping never pulls two cells further apart,
 * so no close pair is lost.
 */

use nannou::prelude::*;

use crate::surface::Size;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub grid: Vec<Vec<usize>>,
    pub columns: usize,
    pub rows: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, bounds: Size) -> Self {
        let mut grid = Self {
            cell_size,
            grid: Vec::new(),
            columns: 0,
            rows: 0,
        };
        grid.resize(bounds);
        grid
    }

    // Re-fit the grid to new surface bounds, dropping all entries
    pub fn resize(&mut self, bounds: Size) {
        let columns = ((bounds.width / self.cell_size).ceil() as usize).max(1);
        let rows = ((bounds.height / self.cell_size).ceil() as usize).max(1);

        if columns != self.columns || rows != self.rows {
            self.columns = columns;
            self.rows = rows;
            self.grid = vec![Vec::new(); columns * rows];
        } else {
            self.clear();
        }
    }

    #[inline]
    fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let x = (pos.x / self.cell_size).floor().clamp(0.0, self.columns as f32 - 1.0) as usize;
        let y = (pos.y / self.cell_size).floor().clamp(0.0, self.rows as f32 - 1.0) as usize;
        (x, y)
    }

    #[inline]
    pub fn pos_to_cell_index(&self, pos: Vec2) -> usize {
        let (x, y) = self.cell_coords(pos);
        y * self.columns + x
    }

    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let cell_index = self.pos_to_cell_index(position);
        self.grid[cell_index].push(index);
    }

    // Indices in the cell containing the position and its 8 neighbours
    pub fn get_nearby_indices(&self, position: Vec2) -> Vec<usize> {
        let (cx, cy) = self.cell_coords(position);
        let mut result = Vec::new();

        for y in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
            let row = y * self.columns;
            for x in cx.saturating_sub(1)..=(cx + 1).min(self.columns - 1) {
                result.extend_from_slice(&self.grid[row + x]);
            }
        }

        result
    }

    // Candidate pairs (i, j) with i < j, sorted so callers visit them in the
    // same order as a nested i < j loop would
    pub fn candidate_pairs(&mut self, positions: &[Vec2], bounds: Size) -> Vec<(usize, usize)> {
        self.resize(bounds);
        for (i, &p) in positions.iter().enumerate() {
            self.insert(i, p);
        }

        let mut pairs = Vec::new();
        for (i, &p) in positions.iter().enumerate() {
            pairs.extend(
                self.get_nearby_indices(p)
                    .into_iter()
                    .filter(|&j| j > i)
                    .map(|j| (i, j)),
            );
        }
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_the_surface_with_partial_cells() {
        let grid = SpatialGrid::new(100.0, Size::new(250.0, 100.0));
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows, 1);
        assert_eq!(grid.grid.len(), 3);
    }

    #[test]
    fn out_of_bounds_positions_land_in_border_cells() {
        let grid = SpatialGrid::new(100.0, Size::new(300.0, 300.0));
        assert_eq!(grid.pos_to_cell_index(vec2(-40.0, -5.0)), 0);
        assert_eq!(grid.pos_to_cell_index(vec2(1200.0, 1200.0)), 8);
    }

    #[test]
    fn candidate_pairs_include_neighbours_across_cell_borders() {
        let mut grid = SpatialGrid::new(100.0, Size::new(400.0, 400.0));
        let positions = [vec2(99.0, 50.0), vec2(101.0, 50.0), vec2(390.0, 390.0)];
        let pairs = grid.candidate_pairs(&positions, Size::new(400.0, 400.0));
        assert!(pairs.contains(&(0, 1)));
        assert!(!pairs.contains(&(0, 2)));
        assert!(!pairs.contains(&(1, 2)));
    }

    #[test]
    fn candidate_pairs_are_ordered_and_unique() {
        let mut grid = SpatialGrid::new(50.0, Size::new(100.0, 100.0));
        let positions = [vec2(10.0, 10.0), vec2(20.0, 20.0), vec2(30.0, 30.0)];
        let pairs = grid.candidate_pairs(&positions, Size::new(100.0, 100.0));
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }
}
