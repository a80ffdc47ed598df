//! Spawn selection for the two entity categories

use serde::{Deserialize, Serialize};

use crate::algorithm::random::RandomSource;
use crate::io::configuration::HEADING_DEGREES;
use crate::spatial::grid::{CellState, Grid, Position};
use crate::spatial::regions::{Region, regions_of};

/// Which kind of entity a spawn is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnCategory {
    /// Placed first, without any separation constraint
    Primary,
    /// Placed away from every entity already placed
    Secondary,
}

/// One accepted spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRecord {
    /// Cell the entity starts on
    pub position: Position,
    /// Entity category
    pub category: SpawnCategory,
    /// Initial facing in whole degrees, in `0..360`
    pub heading_degrees: u16,
}

/// How many entities to place and how far apart secondaries must be
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Number of primary entities
    pub primary_count: usize,
    /// Number of secondary entities
    pub secondary_count: usize,
    /// Secondaries must be strictly farther than this from every placed entity
    pub min_separation: f64,
}

/// Place entities in one randomly chosen empty region of the grid
pub fn place(grid: &Grid, request: &PlacementRequest, rng: &mut RandomSource) -> Vec<SpawnRecord> {
    place_in_regions(regions_of(grid, CellState::Empty), request, rng)
}

/// Place entities in one region drawn from `regions`
///
/// Primaries are drawn from the pool without replacement. Each secondary slot
/// keeps drawing candidates without replacement until one clears the
/// separation from every placed entity; a slot whose pool runs dry is skipped.
/// Every accepted entity draws its heading immediately after acceptance.
pub fn place_in_regions(
    regions: Vec<Region>,
    request: &PlacementRequest,
    rng: &mut RandomSource,
) -> Vec<SpawnRecord> {
    let mut regions = regions;
    let Some(region_index) = rng.pick_index(regions.len()) else {
        tracing::warn!(
            target: "cavegen::placement",
            "no empty region to spawn into"
        );
        return Vec::new();
    };
    let mut pool = regions.swap_remove(region_index).into_cells();
    let mut spawns = Vec::with_capacity(request.primary_count + request.secondary_count);

    for slot in 0..request.primary_count {
        let Some(index) = rng.pick_index(pool.len()) else {
            tracing::debug!(
                target: "cavegen::placement",
                slot,
                requested = request.primary_count,
                "spawn pool exhausted before all primaries were placed"
            );
            break;
        };
        let position = pool.remove(index);
        spawns.push(SpawnRecord {
            position,
            category: SpawnCategory::Primary,
            heading_degrees: draw_heading(rng),
        });
    }

    for slot in 0..request.secondary_count {
        let mut accepted = None;
        while let Some(index) = rng.pick_index(pool.len()) {
            let candidate = pool.remove(index);
            if is_clear_of(candidate, &spawns, request.min_separation) {
                accepted = Some(candidate);
                break;
            }
        }

        match accepted {
            Some(position) => spawns.push(SpawnRecord {
                position,
                category: SpawnCategory::Secondary,
                heading_degrees: draw_heading(rng),
            }),
            None => tracing::debug!(
                target: "cavegen::placement",
                slot,
                min_separation = request.min_separation,
                "no candidate cleared the separation, skipping secondary slot"
            ),
        }
    }

    spawns
}

fn is_clear_of(candidate: Position, spawns: &[SpawnRecord], min_separation: f64) -> bool {
    spawns
        .iter()
        .all(|spawn| candidate.distance(spawn.position) > min_separation)
}

fn draw_heading(rng: &mut RandomSource) -> u16 {
    rng.below(HEADING_DEGREES) as u16
}
