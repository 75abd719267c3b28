//! Sparse uniform-grid spatial hash for neighbor candidate queries.
//!
//! Space is cut into cubes (squares in 2D) of side `cell_size`. Each occupied
//! cell maps to the ids of the particles inside it; empty cells are never
//! stored. A query gathers the 3^D block of cells around the query point,
//! which always contains every particle within `cell_size` of it:
//!
//! ```text
//!   +---+---+---+
//!   |   |   |   |      any point within one cell side of `q`
//!   +---+---+---+      lies in `q`'s cell or one of its
//!   |   | q |   |      direct neighbors
//!   +---+---+---+
//!   |   |   |   |
//!   +---+---+---+
//! ```
//!
//! The brute-force backend is the same structure with every position mapped
//! to the origin cell, so a query returns the whole population.

use std::collections::HashMap;

use crate::configuration::config::NeighborBackend;
use crate::simulation::states::{CellKey, NVec};

#[derive(Debug, Clone)]
pub struct SpatialIndex<const D: usize> {
    cell_size: f64,
    backend: NeighborBackend,
    cells: HashMap<CellKey<D>, Vec<usize>>,
    offsets: Vec<CellKey<D>>, // neighborhood block searched per query
}

/// Every offset in {-1, 0, 1}^D, produced once per index
fn neighbor_offsets<const D: usize>() -> Vec<CellKey<D>> {
    let count = 3usize.pow(D as u32);
    (0..count)
        .map(|n| {
            let mut offset = [0i64; D];
            let mut rest = n;
            for axis in offset.iter_mut() {
                *axis = (rest % 3) as i64 - 1;
                rest /= 3;
            }
            offset
        })
        .collect()
}

impl<const D: usize> SpatialIndex<D> {
    pub fn new(cell_size: f64, backend: NeighborBackend) -> Self {
        let offsets = match backend {
            NeighborBackend::SpatialHash => neighbor_offsets::<D>(),
            NeighborBackend::BruteForce => vec![[0; D]],
        };
        Self {
            cell_size,
            backend,
            cells: HashMap::new(),
            offsets,
        }
    }

    /// Grid cell containing `position` (floor division on every axis)
    pub fn cell_of(&self, position: &NVec<D>) -> CellKey<D> {
        match self.backend {
            NeighborBackend::BruteForce => [0; D],
            NeighborBackend::SpatialHash => {
                let mut key = [0i64; D];
                for (axis, k) in key.iter_mut().enumerate() {
                    *k = (position[axis] / self.cell_size).floor() as i64;
                }
                key
            }
        }
    }

    /// Replace the contents with one entry per particle
    pub fn build(&mut self, positions: &[NVec<D>]) {
        self.cells.clear();
        for (id, p) in positions.iter().enumerate() {
            self.insert(id, p);
        }
    }

    pub fn insert(&mut self, id: usize, position: &NVec<D>) {
        let key = self.cell_of(position);
        self.cells.entry(key).or_default().push(id);
    }

    /// Remove `id` from the cell of `position`. Returns false if it was not there.
    pub fn remove(&mut self, id: usize, position: &NVec<D>) -> bool {
        let key = self.cell_of(position);
        let Some(bucket) = self.cells.get_mut(&key) else {
            return false;
        };
        let Some(slot) = bucket.iter().position(|&j| j == id) else {
            return false;
        };
        bucket.swap_remove(slot);
        if bucket.is_empty() {
            self.cells.remove(&key);
        }
        true
    }

    /// Move `id` from the cell of `old` to the cell of `new` if they differ.
    /// Returns whether the particle changed cell.
    pub fn relocate(&mut self, id: usize, old: &NVec<D>, new: &NVec<D>) -> bool {
        if self.cell_of(old) == self.cell_of(new) {
            return false;
        }
        self.remove(id, old);
        self.insert(id, new);
        true
    }

    /// Ids in the 3^D block of cells around `position`.
    ///
    /// Superset of everything within `cell_size`; callers filter by distance.
    pub fn candidate_neighbors<'a>(&'a self, position: &NVec<D>) -> impl Iterator<Item = usize> + 'a {
        let center = self.cell_of(position);
        self.offsets.iter().flat_map(move |offset| {
            let mut key = center;
            for (k, o) in key.iter_mut().zip(offset) {
                *k = k.saturating_add(*o);
            }
            self.cells.get(&key).into_iter().flatten().copied()
        })
    }

    /// Ids stored under `key`, if the cell is occupied
    pub fn bucket(&self, key: &CellKey<D>) -> Option<&[usize]> {
        self.cells.get(key).map(Vec::as_slice)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of ids stored across all cells
    pub fn entry_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Check that every particle sits exactly once in the cell of its position
    /// and nowhere else.
    pub fn is_consistent(&self, positions: &[NVec<D>]) -> bool {
        if self.entry_count() != positions.len() {
            return false;
        }
        if self.cells.values().any(Vec::is_empty) {
            return false;
        }
        positions.iter().enumerate().all(|(id, p)| {
            self.bucket(&self.cell_of(p))
                .map(|b| b.iter().filter(|&&j| j == id).count() == 1)
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v3(x: f64, y: f64, z: f64) -> NVec<3> {
        NVec::<3>::new(x, y, z)
    }

    #[test]
    fn offsets_cover_full_block() {
        let offsets = neighbor_offsets::<3>();
        assert_eq!(offsets.len(), 27);
        assert!(offsets.contains(&[0, 0, 0]));
        assert!(offsets.contains(&[-1, 1, -1]));

        let planar = neighbor_offsets::<2>();
        assert_eq!(planar.len(), 9);
    }

    #[test]
    fn cell_of_floors_negative_coordinates() {
        let index = SpatialIndex::<3>::new(0.5, NeighborBackend::SpatialHash);
        assert_eq!(index.cell_of(&v3(0.25, 0.75, 1.0)), [0, 1, 2]);
        assert_eq!(index.cell_of(&v3(-0.25, -0.5, -0.75)), [-1, -1, -2]);
    }

    #[test]
    fn remove_drops_empty_cells() {
        let mut index = SpatialIndex::<3>::new(1.0, NeighborBackend::SpatialHash);
        let p = v3(0.5, 0.5, 0.5);
        index.insert(4, &p);
        assert_eq!(index.cell_count(), 1);

        assert!(index.remove(4, &p));
        assert_eq!(index.cell_count(), 0);
        assert!(!index.remove(4, &p));
    }

    #[test]
    fn relocate_only_moves_across_cells() {
        let mut index = SpatialIndex::<3>::new(1.0, NeighborBackend::SpatialHash);
        let a = v3(0.1, 0.1, 0.1);
        let b = v3(0.9, 0.9, 0.9);
        let c = v3(1.1, 0.9, 0.9);
        index.insert(0, &a);

        assert!(!index.relocate(0, &a, &b));
        assert!(index.relocate(0, &b, &c));
        assert_eq!(index.bucket(&[1, 0, 0]), Some(&[0usize][..]));
        assert_eq!(index.bucket(&[0, 0, 0]), None);
    }

    #[test]
    fn candidates_skip_far_cells() {
        let positions = vec![v3(0.0, 0.0, 0.0), v3(0.9, 0.0, 0.0), v3(5.0, 5.0, 5.0)];
        let mut index = SpatialIndex::<3>::new(1.0, NeighborBackend::SpatialHash);
        index.build(&positions);

        let mut found: Vec<usize> = index.candidate_neighbors(&positions[0]).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
        assert!(index.is_consistent(&positions));
    }

    #[test]
    fn brute_force_returns_everyone() {
        let positions = vec![v3(-3.0, 0.0, 0.0), v3(0.0, 0.0, 0.0), v3(8.0, 8.0, 8.0)];
        let mut index = SpatialIndex::<3>::new(1.0, NeighborBackend::BruteForce);
        index.build(&positions);

        let mut found: Vec<usize> = index.candidate_neighbors(&positions[0]).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);
        assert_eq!(index.cell_count(), 1);
    }
}
