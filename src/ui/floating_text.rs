//! Floating combat numbers that rise and fade above characters.

use bevy::prelude::*;

use crate::combat::{HealedEvent, HurtEvent};
use crate::core::Countdown;

const LIFETIME: f32 = 0.8;
const RISE_SPEED: f32 = 1.5;
/// Height above the character's centre where numbers appear.
const SPAWN_HEIGHT: f32 = 1.2;
/// Text is laid out in pixels; scale it back into meters.
const TEXT_SCALE: f32 = 1.0 / 48.0;

const DAMAGE_COLOR: Color = Color::srgb(1.0, 0.35, 0.25);
const HEAL_COLOR: Color = Color::srgb(0.4, 1.0, 0.45);

#[derive(Component, Debug)]
pub struct FloatingText {
    lifetime: Countdown,
    rise_speed: f32,
}

impl FloatingText {
    pub fn new(lifetime: f32, rise_speed: f32) -> Self {
        Self {
            lifetime: Countdown::started(lifetime),
            rise_speed,
        }
    }

    /// Advance by `dt`. Returns the opacity to draw with, or `None` once expired.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.lifetime.tick(dt) || !self.lifetime.is_running() {
            return None;
        }
        Some(1.0 - self.lifetime.progress())
    }
}

fn spawn_text(commands: &mut Commands, position: Vec3, text: String, color: Color) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(color),
        Transform::from_translation(position + Vec3::new(0.0, SPAWN_HEIGHT, 5.0))
            .with_scale(Vec3::splat(TEXT_SCALE)),
        FloatingText::new(LIFETIME, RISE_SPEED),
    ));
}

pub fn spawn_combat_text(
    mut commands: Commands,
    mut hurt_events: EventReader<HurtEvent>,
    mut healed_events: EventReader<HealedEvent>,
    transform_query: Query<&GlobalTransform>,
) {
    for event in hurt_events.read() {
        if let Ok(transform) = transform_query.get(event.entity) {
            spawn_text(
                &mut commands,
                transform.translation(),
                format!("{:.0}", event.amount),
                DAMAGE_COLOR,
            );
        }
    }

    for event in healed_events.read() {
        if let Ok(transform) = transform_query.get(event.entity) {
            spawn_text(
                &mut commands,
                transform.translation(),
                format!("+{:.0}", event.amount),
                HEAL_COLOR,
            );
        }
    }
}

pub fn animate_combat_text(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut FloatingText, &mut Transform, &mut TextColor)>,
) {
    let dt = time.delta_secs();
    for (entity, mut text, mut transform, mut color) in query.iter_mut() {
        match text.advance(dt) {
            Some(alpha) => {
                transform.translation.y += text.rise_speed * dt;
                color.0.set_alpha(alpha);
            }
            None => commands.entity(entity).despawn_recursive(),
        }
    }
}
