//! Player configuration loading.

use bevy::prelude::*;
use std::fs;
use std::path::Path;

use super::components::PlayerConfig;
use crate::world::DataLoadError;

const PLAYER_CONFIG_PATH: &str = "assets/data/player.ron";

pub fn parse_player_config(path: &str, contents: &str) -> Result<PlayerConfig, DataLoadError> {
    let config = ron::from_str::<PlayerConfig>(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;

    if config.max_health <= 0.0 {
        return Err(DataLoadError::InvalidDefinition {
            name: "player".to_string(),
            reason: "max_health must be positive".to_string(),
        });
    }
    Ok(config)
}

fn read_player_config(path: &Path) -> Result<PlayerConfig, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_player_config(&display, &contents)
}

/// Load `PlayerConfig`, keeping the defaults if the file is missing or broken.
pub fn load_player_config(mut commands: Commands) {
    match read_player_config(Path::new(PLAYER_CONFIG_PATH)) {
        Ok(config) => {
            info!("Loaded player config from {}", PLAYER_CONFIG_PATH);
            commands.insert_resource(config);
        }
        Err(e) => {
            error!("{}; using default player config", e);
            commands.insert_resource(PlayerConfig::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses() {
        let contents = fs::read_to_string(PLAYER_CONFIG_PATH).unwrap();
        let config = parse_player_config(PLAYER_CONFIG_PATH, &contents).unwrap();
        assert!(config.run_speed > config.walk_speed);
        assert!(config.attack.window.0 < config.attack.window.1);
    }

    #[test]
    fn non_positive_health_is_rejected() {
        let contents = fs::read_to_string(PLAYER_CONFIG_PATH)
            .unwrap()
            .replace("max_health: 100.0", "max_health: 0.0");
        let result = parse_player_config(PLAYER_CONFIG_PATH, &contents);
        assert!(matches!(result, Err(DataLoadError::InvalidDefinition { .. })));
    }
}
