//! In-game HUD - player health display.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::GameState;
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the numeric health readout.
#[derive(Component)]
pub struct HealthLabel;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), spawn_hud)
        .add_systems(OnEnter(GameState::Loading), cleanup_hud)
        .add_systems(Update, update_health_bar.run_if(in_state(GameState::InGame)));
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // HUD root container (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_bar(parent, "Health", Color::srgb(0.8, 0.2, 0.2));
        });
}

/// Helper to spawn a status bar.
fn spawn_bar(parent: &mut ChildBuilder, label: &str, color: Color) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    // Bar fill
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        HealthBar,
                    ));
                });

            bar_parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    margin: UiRect::left(Val::Px(8.0)),
                    ..default()
                },
                HealthLabel,
            ));
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, (With<Player>, Changed<Health>)>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
    mut label_query: Query<&mut Text, With<HealthLabel>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };

    if let Ok(mut bar) = bar_query.get_single_mut() {
        bar.width = Val::Percent(health.percentage() * 100.0);
    }
    if let Ok(mut label) = label_query.get_single_mut() {
        label.0 = format!("{:.0}/{:.0}", health.current(), health.maximum());
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
