//! Tests for the JSON level export

#[cfg(test)]
mod tests {
    use cavegen::io::export::{LevelExport, export_level_as_json};
    use cavegen::{GenerationConfig, Level, generate_level};

    fn level() -> Level {
        let config = GenerationConfig {
            seed: Some("export".to_string()),
            width: 20,
            height: 14,
            min_separation: 3.0,
            ..GenerationConfig::default()
        };
        generate_level(&config).expect("generation succeeds")
    }

    // Tests the export mirrors the level's grid, tiles and spawns
    // Verified by exporting rows south first
    #[test]
    fn test_export_mirrors_level() {
        let level = level();
        let export = LevelExport::from_level(&level);

        assert_eq!(export.seed, "export");
        assert_eq!((export.width, export.height), (20, 14));
        assert_eq!(export.rows, level.grid().to_rows());
        assert_eq!(export.tiles.len(), level.tiles().len());
        assert_eq!(export.spawns.len(), level.spawns().len());

        for (record, tile) in export.tiles.iter().zip(level.tiles()) {
            assert_eq!((record.x, record.y), (tile.position.x, tile.position.y));
            assert_eq!(record.tile_type, tile.kind.index());
            assert_eq!(record.rotation_degrees, u16::from(record.orientation) * 90);
            assert_eq!(record.world, tile.position.world(20, 14));
        }
    }

    // Tests the written file parses back to the same export
    // Verified by writing compact output with missing fields
    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out").join("level.json");
        let level = level();
        export_level_as_json(&level, &path).expect("export succeeds");

        let text = std::fs::read_to_string(&path).expect("read export");
        let parsed: LevelExport = serde_json::from_str(&text).expect("valid json");
        assert_eq!(parsed, LevelExport::from_level(&level));
    }

    // Tests spawn categories serialize as lowercase names
    // Verified by removing the serde rename
    #[test]
    fn test_category_names() {
        let value = serde_json::to_value(LevelExport::from_level(&level())).expect("serializable");
        let spawns = value.get("spawns").and_then(|s| s.as_array()).expect("spawn list");
        for spawn in spawns {
            let category = spawn.get("category").and_then(|c| c.as_str()).expect("category");
            assert!(category == "primary" || category == "secondary");
        }
    }
}
