//! Arena data loaded from RON.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

pub const ARENA_PATH: &str = "assets/data/arena.ron";

/// An axis-aligned box given by centre and full size.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoxDefinition {
    pub center: (f32, f32),
    pub size: (f32, f32),
}

impl BoxDefinition {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center.0, self.center.1)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1) / 2.0
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Enemy type, matching a file name under `assets/data/enemies`
    pub kind: String,
    pub position: (f32, f32),
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PickupSpawn {
    pub position: (f32, f32),
    pub amount: f32,
}

/// A complete arena: solid geometry, spawns and hazards.
#[derive(Deserialize, Clone, Debug)]
pub struct ArenaDefinition {
    pub name: String,
    pub player_spawn: (f32, f32),
    /// Ground, platforms and walls
    pub solids: Vec<BoxDefinition>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub pickups: Vec<PickupSpawn>,
    #[serde(default)]
    pub kill_zones: Vec<BoxDefinition>,
}

impl Default for ArenaDefinition {
    /// A bare floor with nothing on it.
    fn default() -> Self {
        Self {
            name: "Empty Arena".to_string(),
            player_spawn: (0.0, 1.5),
            solids: vec![BoxDefinition {
                center: (0.0, -0.5),
                size: (40.0, 1.0),
            }],
            enemies: Vec::new(),
            pickups: Vec::new(),
            kill_zones: Vec::new(),
        }
    }
}

impl ArenaDefinition {
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let degenerate = |b: &BoxDefinition| b.size.0 <= 0.0 || b.size.1 <= 0.0;
        if self.solids.iter().chain(&self.kill_zones).any(degenerate) {
            return Err(DataLoadError::InvalidDefinition {
                name: self.name.clone(),
                reason: "boxes must have a positive size".to_string(),
            });
        }
        if self.pickups.iter().any(|pickup| pickup.amount <= 0.0) {
            return Err(DataLoadError::InvalidDefinition {
                name: self.name.clone(),
                reason: "pickups must heal a positive amount".to_string(),
            });
        }
        Ok(())
    }
}

/// The arena being played.
#[derive(Resource, Default, Clone, Debug)]
pub struct CurrentArena(pub ArenaDefinition);

pub fn parse_arena(path: &str, contents: &str) -> Result<ArenaDefinition, DataLoadError> {
    let arena = ron::from_str::<ArenaDefinition>(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    arena.validate()?;
    Ok(arena)
}

pub fn read_arena(path: &Path) -> Result<ArenaDefinition, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_arena(&display, &contents)
}

/// Load the arena, falling back to an empty floor.
pub fn load_arena(mut commands: Commands) {
    let arena = match read_arena(Path::new(ARENA_PATH)) {
        Ok(arena) => {
            info!(
                "Loaded arena '{}': {} solids, {} enemies, {} pickups",
                arena.name,
                arena.solids.len(),
                arena.enemies.len(),
                arena.pickups.len()
            );
            arena
        }
        Err(e) => {
            error!("{}; using an empty arena", e);
            ArenaDefinition::default()
        }
    };
    commands.insert_resource(CurrentArena(arena));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_arena_parses() {
        let arena = read_arena(Path::new(ARENA_PATH)).unwrap();
        assert!(!arena.solids.is_empty());
        assert!(!arena.enemies.is_empty());
        assert!(!arena.kill_zones.is_empty());
    }

    #[test]
    fn degenerate_boxes_are_rejected() {
        let source = r#"(
            name: "Broken",
            player_spawn: (0.0, 1.0),
            solids: [(center: (0.0, 0.0), size: (0.0, 1.0))],
        )"#;
        let result = parse_arena("broken.ron", source);
        assert!(matches!(result, Err(DataLoadError::InvalidDefinition { .. })));
    }

    #[test]
    fn box_geometry() {
        let platform = BoxDefinition {
            center: (2.0, 3.0),
            size: (4.0, 1.0),
        };
        assert_eq!(platform.center(), Vec2::new(2.0, 3.0));
        assert_eq!(platform.half_extents(), Vec2::new(2.0, 0.5));
    }
}
