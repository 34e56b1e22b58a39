//! Tile-grid level parsing
//!
//! Levels are described as rows of tile codes: `0` is empty, `1` is a solid
//! brick, and `2..=5` are breakable bricks in fixed colors. The grid is
//! stretched to fill the requested playfield area.

use glam::{Vec2, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::resources::Resources;
use crate::sim::{Body, BodyState, Brick, Level};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse level file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level file contains no playable levels")]
    Empty,
    #[error("level {0:?} has an empty tile grid")]
    EmptyGrid(String),
}

#[derive(Debug, Deserialize)]
struct LevelsFile {
    #[serde(default)]
    levels: Vec<LevelDef>,
}

#[derive(Debug, Deserialize)]
struct LevelDef {
    #[serde(default)]
    name: String,
    #[serde(default = "default_enable")]
    enable: bool,
    #[serde(default)]
    data: Vec<Vec<u8>>,
}

fn default_enable() -> bool {
    true
}

/// Breakable tile colors; anything above the known codes renders white
fn tile_color(tile: u8) -> Vec3 {
    match tile {
        1 => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// Build a level from a tile grid stretched over `level_width` x `level_height`
pub fn create_level(
    resources: &Resources,
    name: &str,
    tiles: &[Vec<u8>],
    level_width: f32,
    level_height: f32,
) -> Result<Level, LevelError> {
    let rows = tiles.len();
    let columns = tiles.first().map_or(0, Vec::len);
    if rows == 0 || columns == 0 {
        return Err(LevelError::EmptyGrid(name.to_owned()));
    }

    let unit_width = level_width / columns as f32;
    let unit_height = level_height / rows as f32;
    // Slight shrink leaves a visible seam between bricks
    let brick_size = Vec2::new(unit_width, unit_height) * 0.995;

    let block = resources.texture("block").unwrap_or_default();
    let block_solid = resources.texture("block_solid").unwrap_or_default();

    let mut bricks = Vec::new();
    for (row, line) in tiles.iter().enumerate() {
        for (column, &tile) in line.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let is_solid = tile == 1;
            bricks.push(Brick {
                body: Body::from_state(BodyState {
                    position: Vec2::new(column as f32 * unit_width, row as f32 * unit_height),
                    size: brick_size,
                    ..Default::default()
                }),
                color: tile_color(tile),
                texture: if is_solid { block_solid } else { block },
                is_solid,
                is_destroyed: false,
            });
        }
    }

    Ok(Level {
        name: name.to_owned(),
        bricks,
        completed: false,
    })
}

/// Parse a JSON level file and build every enabled level
pub fn load_levels(
    resources: &Resources,
    contents: &str,
    level_width: f32,
    level_height: f32,
) -> Result<Vec<Level>, LevelError> {
    let file: LevelsFile = serde_json::from_str(contents)?;

    let mut levels = Vec::new();
    for def in &file.levels {
        if !def.enable {
            log::info!("skipping disabled level {:?}", def.name);
            continue;
        }
        if def.data.is_empty() {
            log::warn!("level {:?} has no tile data, skipping", def.name);
            continue;
        }
        let level = create_level(resources, &def.name, &def.data, level_width, level_height)?;
        log::info!(
            "loaded level {:?} with {} bricks",
            level.name,
            level.bricks.len()
        );
        levels.push(level);
    }

    if levels.is_empty() {
        return Err(LevelError::Empty);
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> Resources {
        Resources::with_defaults()
    }

    #[test]
    fn test_create_level_skips_empty_tiles() {
        let tiles = vec![vec![0, 1, 0], vec![2, 0, 3]];
        let level = create_level(&resources(), "mixed", &tiles, 300.0, 100.0).unwrap();

        assert_eq!(level.bricks.len(), 3);
        assert!(!level.completed);
    }

    #[test]
    fn test_solid_flag_and_texture() {
        let tiles = vec![vec![1, 2]];
        let level = create_level(&resources(), "pair", &tiles, 200.0, 50.0).unwrap();

        assert!(level.bricks[0].is_solid);
        assert!(!level.bricks[1].is_solid);
        assert_ne!(level.bricks[0].texture, level.bricks[1].texture);
    }

    #[test]
    fn test_tile_colors() {
        assert_eq!(tile_color(1), Vec3::new(0.8, 0.8, 0.7));
        assert_eq!(tile_color(2), Vec3::new(0.2, 0.6, 1.0));
        assert_eq!(tile_color(5), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tile_color(99), Vec3::ONE);
    }

    #[test]
    fn test_grid_stretches_to_playfield() {
        let tiles = vec![vec![2, 2], vec![2, 2]];
        let level = create_level(&resources(), "grid", &tiles, 400.0, 100.0).unwrap();

        // Units are 200 x 50; bricks sit on the unit grid
        assert_eq!(level.bricks[0].body.current.position, Vec2::new(0.0, 0.0));
        assert_eq!(level.bricks[1].body.current.position, Vec2::new(200.0, 0.0));
        assert_eq!(level.bricks[2].body.current.position, Vec2::new(0.0, 50.0));
        // Sized just under the unit to leave a seam
        assert!(level.bricks[0].body.current.size.x < 200.0);
        assert!(level.bricks[0].body.current.size.y < 50.0);
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let err = create_level(&resources(), "void", &[], 100.0, 100.0).unwrap_err();
        assert!(matches!(err, LevelError::EmptyGrid(_)));
    }

    #[test]
    fn test_load_levels_skips_disabled() {
        let json = r#"{
            "levels": [
                { "name": "on", "enable": true, "data": [[2, 2]] },
                { "name": "off", "enable": false, "data": [[2, 2]] }
            ]
        }"#;
        let levels = load_levels(&resources(), json, 100.0, 50.0).unwrap();

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].name, "on");
    }

    #[test]
    fn test_load_levels_defaults_enable_on() {
        let json = r#"{ "levels": [ { "name": "plain", "data": [[2]] } ] }"#;
        let levels = load_levels(&resources(), json, 100.0, 50.0).unwrap();
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn test_load_levels_all_disabled_is_empty_error() {
        let json = r#"{ "levels": [ { "name": "off", "enable": false, "data": [[2]] } ] }"#;
        let err = load_levels(&resources(), json, 100.0, 50.0).unwrap_err();
        assert!(matches!(err, LevelError::Empty));
    }

    #[test]
    fn test_load_levels_bad_json_is_parse_error() {
        let err = load_levels(&resources(), "not json", 100.0, 50.0).unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }
}
