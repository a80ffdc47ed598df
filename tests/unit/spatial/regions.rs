//! Tests for connected-component discovery

#[cfg(test)]
mod tests {
    use cavegen::spatial::grid::{CellState, Grid, Position, generate_grid};
    use cavegen::spatial::regions::{region_at, regions_of};
    use proptest::prelude::*;

    // Tests the open square of a zero-fill grid is a single region inside the border ring
    // Verified by counting the border ring as four separate regions
    #[test]
    fn test_zero_fill_regions() {
        let (grid, _) = generate_grid(10, 10, 0, "open").expect("valid grid");

        let filled = regions_of(&grid, CellState::Filled);
        assert_eq!(filled.len(), 1);
        assert_eq!(filled.first().map(|r| r.len()), Some(36));

        let empty = regions_of(&grid, CellState::Empty);
        assert_eq!(empty.len(), 1);
        let region = empty.first().expect("one empty region");
        assert_eq!(region.len(), 64);
        assert_eq!(region.state(), CellState::Empty);
    }

    // Tests discovery order visits west, south, north, east from the scan start
    // Verified by reordering the neighbor offsets
    #[test]
    fn test_breadth_first_discovery_order() {
        let (grid, _) = generate_grid(10, 10, 0, "open").expect("valid grid");
        let empty = regions_of(&grid, CellState::Empty);
        let cells = empty.first().expect("one empty region").cells();
        assert_eq!(
            cells.get(..3),
            Some(&[Position::new(1, 1), Position::new(1, 2), Position::new(2, 1)][..])
        );
    }

    // Tests diagonal contact does not join regions
    // Verified by using eight-way adjacency in the flood fill
    #[test]
    fn test_diagonals_stay_separate() {
        let grid = Grid::from_rows(&["#####", "#.#.#", "##.##", "#.#.#", "#####"])
            .expect("valid rows");

        let empty = regions_of(&grid, CellState::Empty);
        assert_eq!(empty.len(), 5);
        assert!(empty.iter().all(|region| region.len() == 1));

        let filled = regions_of(&grid, CellState::Filled);
        assert_eq!(filled.len(), 1);
        assert_eq!(filled.first().map(|r| r.len()), Some(20));
    }

    // Tests a grid without cells of the state yields no regions
    // Verified by returning one empty region for missing states
    #[test]
    fn test_missing_state_yields_no_regions() {
        let grid = Grid::filled(6, 4).expect("valid grid");
        assert!(regions_of(&grid, CellState::Empty).is_empty());
    }

    // Tests region_at returns the component holding the start position
    // Verified by flooding across state boundaries
    #[test]
    fn test_region_at() {
        let grid = Grid::from_rows(&["######", "#..#.#", "#..#.#", "######"])
            .expect("valid rows");

        let left = region_at(&grid, Position::new(1, 1)).expect("on grid");
        assert_eq!(left.len(), 4);
        assert!(left.contains(Position::new(2, 2)));
        assert!(!left.contains(Position::new(4, 1)));

        let right = region_at(&grid, Position::new(4, 2)).expect("on grid");
        assert_eq!(right.into_cells(), vec![Position::new(4, 2), Position::new(4, 1)]);

        assert!(region_at(&grid, Position::new(6, 0)).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        // Tests regions of each state partition exactly the cells of that state
        #[test]
        fn regions_partition_cells(
            seed in any::<u64>(),
            width in 1_usize..24,
            height in 1_usize..24,
            fill in 0_u32..=100
        ) {
            let (grid, _) = generate_grid(width, height, fill, &seed.to_string())
                .expect("valid grid");

            for state in [CellState::Empty, CellState::Filled] {
                let regions = regions_of(&grid, state);
                let mut seen = std::collections::HashSet::new();
                for region in &regions {
                    prop_assert!(!region.is_empty());
                    for &cell in region.cells() {
                        prop_assert_eq!(grid.get(cell.x, cell.y), Some(state));
                        prop_assert!(seen.insert(cell), "cell {:?} in two regions", cell);
                    }
                }
                prop_assert_eq!(seen.len(), grid.count(state));
            }
        }
    }
}
