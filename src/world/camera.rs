//! 2D camera that follows the player.

use bevy::prelude::*;

use crate::player::Player;

/// World units are meters; this many pixels per meter.
const PIXELS_PER_METER: f32 = 48.0;

#[derive(Component)]
pub struct GameCamera {
    /// Fraction of the remaining distance covered per second
    pub follow_rate: f32,
    /// Offset from the player's position
    pub offset: Vec2,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            follow_rate: 5.0,
            offset: Vec2::new(0.0, 1.5),
        }
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / PIXELS_PER_METER,
            ..OrthographicProjection::default_2d()
        },
        GameCamera::default(),
    ));
}

pub fn follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<GameCamera>)>,
    mut camera_query: Query<(&mut Transform, &GameCamera), Without<Player>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok((mut transform, camera)) = camera_query.get_single_mut() else {
        return;
    };

    let target = player.translation.truncate() + camera.offset;
    let t = (camera.follow_rate * time.delta_secs()).min(1.0);
    let position = transform.translation.truncate().lerp(target, t);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
}
