//! Player controller systems - intent to movement, jumping and attacks.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::combat::{HitboxChange, PlayerCombat};
use super::components::{Player, PlayerConfig, PlayerIntent};
use crate::animation::Animator;
use crate::combat::{DeathEvent, Faction, Health, HitboxLink, HurtEvent, MeleeHitbox, TargetMask};
use crate::enemies::brain::AttackSpec;
use crate::movement::{ContactState, MovementController};

/// Stagger on hits, lock up on death, recover on revive.
pub fn react_to_health_events(
    mut commands: Commands,
    mut hurt_events: EventReader<HurtEvent>,
    mut death_events: EventReader<DeathEvent>,
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (&mut PlayerCombat, &mut MovementController, &Health, Option<&HitboxLink>),
        With<Player>,
    >,
    mut hitbox_query: Query<&mut MeleeHitbox>,
) {
    let spec = config.attack_spec();

    for event in hurt_events.read() {
        if let Ok((mut combat, mut movement, _, link)) = player_query.get_mut(event.entity) {
            let change = combat.hurt(config.hurt_stagger, &mut movement);
            apply_hitbox_change(&mut commands, &mut hitbox_query, link, change, &spec);
        }
    }

    for event in death_events.read() {
        if let Ok((mut combat, mut movement, _, link)) = player_query.get_mut(event.entity) {
            let change = combat.die(&mut movement);
            apply_hitbox_change(&mut commands, &mut hitbox_query, link, change, &spec);
        }
    }

    for (mut combat, mut movement, health, _) in player_query.iter_mut() {
        if combat.is_dead() && health.is_alive() {
            info!("Player revived");
            combat.revive(&mut movement);
        }
    }
}

/// Turn the current intent into movement and attack requests.
#[allow(clippy::type_complexity)]
pub fn apply_player_intent(
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (
            &mut PlayerIntent,
            &mut PlayerCombat,
            &mut MovementController,
            Option<&ContactState>,
            Option<&mut Animator>,
        ),
        With<Player>,
    >,
) {
    let spec = config.attack_spec();

    for (mut intent, mut combat, mut movement, contact, animator) in player_query.iter_mut() {
        if intent.toggle_run {
            intent.toggle_run = false;
            let running = !movement.is_running();
            movement.set_running(running);
        }

        if combat.is_dead() {
            intent.attack = false;
            continue;
        }

        let direction = Vec2::new(intent.movement.x, 0.0);
        if direction.x.abs() > f32::EPSILON {
            movement.move_in(direction);
        } else {
            movement.stop();
        }

        if intent.attack {
            intent.attack = false;
            let grounded = contact.is_some_and(|contact| contact.grounded);
            if combat.start_attack(&spec, grounded, &mut movement) {
                if let Some(mut animator) = animator {
                    animator.trigger("attack");
                }
            }
        }
    }
}

/// Advance attack and stagger timers, opening and closing the hitbox.
pub fn tick_player_combat(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (&mut PlayerCombat, &mut MovementController, Option<&HitboxLink>),
        With<Player>,
    >,
    mut hitbox_query: Query<&mut MeleeHitbox>,
) {
    let dt = time.delta_secs();
    let spec = config.attack_spec();

    for (mut combat, mut movement, link) in player_query.iter_mut() {
        let change = combat.tick(dt, &spec, &mut movement);
        apply_hitbox_change(&mut commands, &mut hitbox_query, link, change, &spec);
    }
}

fn apply_hitbox_change(
    commands: &mut Commands,
    hitbox_query: &mut Query<&mut MeleeHitbox>,
    link: Option<&HitboxLink>,
    change: Option<HitboxChange>,
    spec: &AttackSpec,
) {
    let (Some(HitboxLink(hitbox_entity)), Some(change)) = (link, change) else {
        return;
    };
    let Ok(mut hitbox) = hitbox_query.get_mut(*hitbox_entity) else {
        return;
    };

    match change {
        HitboxChange::Arm => {
            hitbox.start_attack(spec.damage, TargetMask::of(&[Faction::Enemy]), spec.knockback);
            commands.entity(*hitbox_entity).remove::<ColliderDisabled>();
        }
        HitboxChange::Disarm => {
            hitbox.disarm();
            commands.entity(*hitbox_entity).insert(ColliderDisabled);
        }
    }
}

/// Jump when grounded and free to move. Runs in the physics tick.
pub fn player_jump(
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (
            &mut PlayerIntent,
            &mut Velocity,
            &MovementController,
            &ContactState,
            Option<&mut Animator>,
        ),
        With<Player>,
    >,
) {
    for (mut intent, mut velocity, movement, contact, animator) in player_query.iter_mut() {
        if !intent.jump {
            continue;
        }
        intent.jump = false;

        if contact.grounded && movement.can_move && !movement.lock_velocity {
            velocity.linvel.y = config.jump_velocity;
            if let Some(mut animator) = animator {
                animator.trigger("jump");
            }
        }
    }
}

/// Pick the animator state for the player.
pub fn animate_player(
    mut player_query: Query<
        (&PlayerCombat, &MovementController, Option<&ContactState>, &mut Animator),
        With<Player>,
    >,
) {
    for (combat, movement, contact, mut animator) in player_query.iter_mut() {
        let grounded = contact.map_or(true, |contact| contact.grounded);
        let state = if combat.is_dead() {
            "Death"
        } else if combat.is_attacking() {
            "Attack"
        } else if combat.is_staggered() {
            "Hurt"
        } else if !grounded {
            "Jump"
        } else if movement.is_moving() && movement.is_running() {
            "Run"
        } else if movement.is_moving() {
            "Walk"
        } else {
            "Idle"
        };
        animator.play(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(PlayerConfig {
                attack: crate::enemies::data::AttackDefinition {
                    damage: 12.0,
                    duration: 0.5,
                    window: (0.0, 0.5),
                    knockback: (3.0, 1.0),
                    below_health: None,
                },
                ..default()
            })
            .add_event::<HurtEvent>()
            .add_event::<DeathEvent>()
            .add_systems(
                Update,
                (
                    react_to_health_events,
                    apply_player_intent,
                    tick_player_combat,
                    animate_player,
                )
                    .chain(),
            );
        app
    }

    fn spawn_player(app: &mut App, grounded: bool) -> (Entity, Entity) {
        let player = app
            .world_mut()
            .spawn((
                Player,
                PlayerIntent::default(),
                PlayerCombat::default(),
                MovementController::default(),
                Health::new(100.0, 0.0),
                ContactState {
                    grounded,
                    ..default()
                },
                Animator::default(),
            ))
            .id();
        let hitbox = app
            .world_mut()
            .spawn((
                MeleeHitbox::new(player, TargetMask::of(&[Faction::Enemy])),
                ColliderDisabled,
            ))
            .id();
        app.world_mut().entity_mut(player).insert(HitboxLink(hitbox));
        (player, hitbox)
    }

    fn press_attack(app: &mut App, player: Entity) {
        app.world_mut().get_mut::<PlayerIntent>(player).unwrap().attack = true;
    }

    #[test]
    fn grounded_attack_arms_hitbox() {
        let mut app = player_app();
        let (player, hitbox) = spawn_player(&mut app, true);

        press_attack(&mut app, player);
        app.update();

        let melee = app.world().get::<MeleeHitbox>(hitbox).unwrap();
        assert!(melee.is_armed());
        assert_eq!(melee.damage(), 12.0);
        assert!(app.world().get::<ColliderDisabled>(hitbox).is_none());
        assert_eq!(app.world().get::<Animator>(player).unwrap().state(), "Attack");
        assert!(app.world().get::<MovementController>(player).unwrap().lock_velocity);
    }

    #[test]
    fn airborne_attack_is_ignored() {
        let mut app = player_app();
        let (player, hitbox) = spawn_player(&mut app, false);

        press_attack(&mut app, player);
        app.update();

        assert!(!app.world().get::<MeleeHitbox>(hitbox).unwrap().is_armed());
        assert!(!app.world().get::<PlayerIntent>(player).unwrap().attack);
    }

    #[test]
    fn hit_staggers_and_closes_hitbox() {
        let mut app = player_app();
        let (player, hitbox) = spawn_player(&mut app, true);

        press_attack(&mut app, player);
        app.update();

        app.world_mut().send_event(HurtEvent {
            entity: player,
            amount: 10.0,
            source: None,
        });
        app.update();

        assert!(!app.world().get::<MeleeHitbox>(hitbox).unwrap().is_armed());
        assert!(app.world().get::<ColliderDisabled>(hitbox).is_some());
        assert!(!app.world().get::<MovementController>(player).unwrap().can_move);
        assert_eq!(app.world().get::<Animator>(player).unwrap().state(), "Hurt");
    }

    #[test]
    fn run_toggle_flips_running() {
        let mut app = player_app();
        let (player, _) = spawn_player(&mut app, true);

        {
            let mut intent = app.world_mut().get_mut::<PlayerIntent>(player).unwrap();
            intent.toggle_run = true;
            intent.movement = Vec2::X;
        }
        app.update();

        let movement = app.world().get::<MovementController>(player).unwrap();
        assert!(movement.is_running());
        assert!(movement.is_moving());
        assert_eq!(app.world().get::<Animator>(player).unwrap().state(), "Run");
    }
}
