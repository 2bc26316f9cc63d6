//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::brain::{AttackSpec, BehaviorConfig, PatrolOrder, Waypoints};
use crate::world::DataLoadError;

const ENEMIES_DIR: &str = "assets/data/enemies";

/// One attack variant as written in data files.
#[derive(Deserialize, Clone, Debug)]
pub struct AttackDefinition {
    pub damage: f32,
    pub duration: f32,
    /// Armed window as fractions of the duration
    #[serde(default = "default_window")]
    pub window: (f32, f32),
    #[serde(default)]
    pub knockback: (f32, f32),
    #[serde(default)]
    pub below_health: Option<f32>,
}

fn default_window() -> (f32, f32) {
    (0.4, 0.7)
}

impl AttackDefinition {
    pub fn to_spec(&self) -> AttackSpec {
        AttackSpec {
            damage: self.damage,
            duration: self.duration,
            window: self.window,
            knockback: Vec2::new(self.knockback.0, self.knockback.1),
            below_health: self.below_health,
        }
    }
}

/// Patrol route configuration.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PatrolConfig {
    /// Symmetric patrol distance either side of spawn, used when `offsets` is empty
    #[serde(default)]
    pub distance: f32,
    /// Waypoints as offsets from spawn
    #[serde(default)]
    pub offsets: Vec<(f32, f32)>,
    #[serde(default)]
    pub hold: f32,
    #[serde(default)]
    pub order: PatrolOrder,
}

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_width: 0.4,
            half_height: 0.9,
        }
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    #[serde(default)]
    pub invincibility: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub sight_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    #[serde(default = "default_lose_grace")]
    pub lose_grace: f32,
    #[serde(default = "default_hurt_duration")]
    pub hurt_duration: f32,
    #[serde(default = "default_death_duration")]
    pub death_duration: f32,
    #[serde(default = "default_true")]
    pub return_home: bool,
    #[serde(default = "default_true")]
    pub aggressive: bool,
    pub attacks: Vec<AttackDefinition>,
    #[serde(default)]
    pub patrol: PatrolConfig,
    #[serde(default)]
    pub collider: ColliderConfig,
    /// Detection zone half extents
    #[serde(default = "default_detection")]
    pub detection: (f32, f32),
    /// Hitbox offset (right-facing) and half extents
    #[serde(default = "default_hitbox_offset")]
    pub hitbox_offset: (f32, f32),
    #[serde(default = "default_hitbox_size")]
    pub hitbox_size: (f32, f32),
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
}

fn default_lose_grace() -> f32 {
    1.0
}

fn default_hurt_duration() -> f32 {
    0.4
}

fn default_death_duration() -> f32 {
    1.5
}

fn default_true() -> bool {
    true
}

fn default_detection() -> (f32, f32) {
    (5.0, 1.5)
}

fn default_hitbox_offset() -> (f32, f32) {
    (0.8, 0.0)
}

fn default_hitbox_size() -> (f32, f32) {
    (0.6, 0.6)
}

fn default_color() -> (f32, f32, f32) {
    (0.7, 0.2, 0.2)
}

impl EnemyDefinition {
    /// Reject values the brain and health model cannot work with.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: &str| {
            Err(DataLoadError::InvalidDefinition {
                name: self.name.clone(),
                reason: reason.to_string(),
            })
        };

        if self.max_health <= 0.0 {
            return invalid("max_health must be positive");
        }
        if self.walk_speed < 0.0 || self.run_speed < 0.0 {
            return invalid("speeds must not be negative");
        }
        if self.attack_range < 0.0 || self.sight_range < 0.0 {
            return invalid("ranges must not be negative");
        }
        for attack in &self.attacks {
            let (start, end) = attack.window;
            if attack.duration <= 0.0 {
                return invalid("attack duration must be positive");
            }
            if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start >= end {
                return invalid("attack window must satisfy 0 <= start < end <= 1");
            }
        }
        Ok(())
    }

    pub fn to_config(&self) -> BehaviorConfig {
        BehaviorConfig {
            sight_range: self.sight_range,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
            lose_grace: self.lose_grace,
            hurt_duration: self.hurt_duration,
            death_duration: self.death_duration,
            waypoint_hold: self.patrol.hold,
            return_home: self.return_home,
            aggressive: self.aggressive,
            attacks: self.attacks.iter().map(AttackDefinition::to_spec).collect(),
            ..default()
        }
    }

    /// Patrol route around a spawn point.
    pub fn waypoints(&self, home: Vec2) -> Waypoints {
        if self.patrol.offsets.is_empty() {
            Waypoints::symmetric(home, self.patrol.distance, self.patrol.order)
        } else {
            let offsets: Vec<Vec2> = self
                .patrol
                .offsets
                .iter()
                .map(|(x, y)| Vec2::new(*x, *y))
                .collect();
            Waypoints::from_offsets(home, &offsets, self.patrol.order)
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Parse and validate a definition.
pub fn parse_enemy_definition(path: &str, contents: &str) -> Result<EnemyDefinition, DataLoadError> {
    let definition = ron::from_str::<EnemyDefinition>(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    definition.validate()?;
    Ok(definition)
}

/// Read, parse and validate one definition file.
pub fn load_enemy_definition(path: &Path) -> Result<EnemyDefinition, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_enemy_definition(&display, &contents)
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMIES_DIR);

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let enemy_type = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_enemy_definition(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKELETON: &str = r#"(
        name: "Skeleton",
        max_health: 40.0,
        walk_speed: 1.5,
        run_speed: 3.0,
        sight_range: 6.0,
        attack_range: 1.2,
        attack_cooldown: 1.5,
        attacks: [(damage: 10.0, duration: 0.8, knockback: (4.0, 2.0))],
        patrol: (distance: 3.0, hold: 1.0),
    )"#;

    #[test]
    fn parses_with_defaults() {
        let definition = parse_enemy_definition("skeleton.ron", SKELETON).unwrap();
        assert_eq!(definition.name, "Skeleton");
        assert_eq!(definition.hurt_duration, 0.4);
        assert!(definition.return_home);

        let config = definition.to_config();
        assert_eq!(config.attacks.len(), 1);
        assert_eq!(config.attacks[0].window, (0.4, 0.7));
        assert_eq!(config.attacks[0].knockback, Vec2::new(4.0, 2.0));
        assert_eq!(config.waypoint_hold, 1.0);
    }

    #[test]
    fn symmetric_patrol_around_spawn() {
        let definition = parse_enemy_definition("skeleton.ron", SKELETON).unwrap();
        let waypoints = definition.waypoints(Vec2::new(10.0, 2.0));
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints.current(), Some(Vec2::new(7.0, 2.0)));
    }

    #[test]
    fn invalid_window_is_rejected() {
        let broken = SKELETON.replace("duration: 0.8,", "duration: 0.8, window: (0.9, 0.2),");
        let result = parse_enemy_definition("skeleton.ron", &broken);
        assert!(matches!(result, Err(DataLoadError::InvalidDefinition { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let result = parse_enemy_definition("broken.ron", "(name: ");
        assert!(matches!(result, Err(DataLoadError::ParseError { .. })));
    }

    #[test]
    fn shipped_boss_enrages_below_half_health() {
        let boss = load_enemy_definition(Path::new("assets/data/enemies/boss.ron")).unwrap();
        let config = boss.to_config();
        assert_eq!(config.attacks.len(), 2);
        assert_eq!(config.attacks[1].below_health, Some(0.5));
        assert_eq!(boss.patrol.order, PatrolOrder::RandomDifferent);
        assert!(load_enemy_definition(Path::new("assets/data/enemies/skeleton.ron")).is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        let result = load_enemy_definition(Path::new("assets/data/enemies/does_not_exist.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
