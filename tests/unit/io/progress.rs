//! Tests for level and stage progress tracking

#[cfg(test)]
mod tests {
    use cavegen::algorithm::executor::Stage;
    use cavegen::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use cavegen::io::progress::ProgressManager;

    // Tests a single level runs through every stage update
    // Verified by leaving the stage bar unconfigured
    #[test]
    fn test_single_level_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        assert_eq!(pm.level_count(), 1);

        pm.start_level(0, "cave.png", 5);
        for stage in [
            Stage::RawGrid,
            Stage::Smoothing(1),
            Stage::Cleanup,
            Stage::Classification,
            Stage::Placement,
        ] {
            pm.complete_stage(0, stage);
        }
        pm.complete_level(0);
        pm.finish();
    }

    // Tests default construction matches new
    // Verified by creating different initial states
    #[test]
    fn test_default_matches_new() {
        let mut pm = ProgressManager::default();
        assert_eq!(pm.level_count(), 0);
        pm.initialize(2);
        pm.start_level(1, "cave_1.png", 3);
        pm.complete_stage(1, Stage::RawGrid);
        pm.complete_level(1);
        pm.finish();
    }

    // Tests batches beyond the bar limit reuse stage bars without panicking
    // Verified by indexing stage bars directly with the level index
    #[test]
    fn test_large_batch_reuses_bars() {
        let mut pm = ProgressManager::new();
        let count = MAX_INDIVIDUAL_PROGRESS_BARS * 3;
        pm.initialize(count);
        assert_eq!(pm.level_count(), count);

        for index in 0..count {
            pm.start_level(index, &format!("cave_{index}.png"), 2);
            pm.complete_stage(index, Stage::RawGrid);
            pm.complete_stage(index, Stage::Placement);
            pm.complete_level(index);
        }
        pm.finish();
    }

    // Tests updates before initialization are ignored
    // Verified by requiring at least one bar
    #[test]
    fn test_uninitialized_updates_are_ignored() {
        let pm = ProgressManager::new();
        pm.start_level(3, "cave.png", 4);
        pm.complete_stage(3, Stage::Cleanup);
        pm.complete_level(3);
        pm.finish();
    }
}
