//! Uncovering whole empty regions at once.

use crate::grid::{Cell, Grid, Position, Tile};
use std::collections::{HashSet, VecDeque};

/// Spread out from a freshly revealed empty cell.
///
/// The region grows through empty, unflagged cells that share an edge (never a corner) with
/// it, until nothing more can join. Afterwards every covered numbered cell that touches an
/// uncovered empty cell, corners included, is uncovered as well. Flags are never removed.
///
/// Returns the cells uncovered by this call, in the order they were uncovered.
pub fn cascade(grid: &mut Grid, start: Position) -> Vec<Position> {
    let mut revealed = Vec::new();

    if grid.cell(start) != Cell::Empty {
        return revealed;
    }

    // Flood the region
    let mut region = HashSet::from([start]);
    let mut frontier = VecDeque::from([start]);
    while let Some(pos) = frontier.pop_front() {
        let joining: Vec<_> = grid
            .orthogonal(pos)
            .filter(|&adj| grid.cell(adj) == Cell::Empty)
            .filter(|&adj| grid.tile(adj) != Tile::Flagged)
            .filter(|adj| !region.contains(adj))
            .collect();

        for adj in joining {
            region.insert(adj);
            frontier.push_back(adj);
            if grid.tile(adj) == Tile::Covered {
                grid.reveal(adj);
                revealed.push(adj);
            }
        }
    }

    // Uncover the numbered border
    let border: Vec<_> = grid
        .positions()
        .filter(|&pos| matches!(grid.cell(pos), Cell::Count(_)))
        .filter(|&pos| grid.tile(pos) == Tile::Covered)
        .filter(|&pos| {
            grid.neighbors(pos)
                .any(|adj| grid.tile(adj) == Tile::Revealed(0))
        })
        .collect();
    for pos in border {
        grid.reveal(pos);
        revealed.push(pos);
    }

    log::debug!(
        "cascade from ({}, {}) spread over {} cells, uncovering {}",
        start.0,
        start.1,
        region.len(),
        revealed.len()
    );
    revealed
}
