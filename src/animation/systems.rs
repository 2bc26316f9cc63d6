//! Systems that feed animator parameters from gameplay state.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::animator::Animator;
use crate::combat::{DeathEvent, HurtEvent};
use crate::enemies::BehaviorChanged;
use crate::movement::{ContactState, MovementController};

/// Play the animator state matching each brain transition.
pub fn play_behavior_states(
    mut changed_events: EventReader<BehaviorChanged>,
    mut animator_query: Query<&mut Animator>,
) {
    for event in changed_events.read() {
        if let Ok(mut animator) = animator_query.get_mut(event.entity) {
            animator.play(event.state.name());
        }
    }
}

/// Hurt and death reactions shared by every character.
pub fn trigger_health_reactions(
    mut hurt_events: EventReader<HurtEvent>,
    mut death_events: EventReader<DeathEvent>,
    mut animator_query: Query<&mut Animator>,
) {
    for event in hurt_events.read() {
        if let Ok(mut animator) = animator_query.get_mut(event.entity) {
            animator.trigger("hurt");
        }
    }
    for event in death_events.read() {
        if let Ok(mut animator) = animator_query.get_mut(event.entity) {
            animator.play("Death");
        }
    }
}

pub fn sync_locomotion(mut query: Query<(&MovementController, &mut Animator)>) {
    for (controller, mut animator) in query.iter_mut() {
        animator.set_bool("isMoving", controller.is_moving());
        animator.set_bool("isRunning", controller.is_running());
    }
}

/// Mirror contact flags and vertical velocity.
pub fn sync_contact_parameters(mut query: Query<(&ContactState, &Velocity, &mut Animator)>) {
    for (contact, velocity, mut animator) in query.iter_mut() {
        animator.set_bool("isGrounded", contact.grounded);
        animator.set_bool("isOnWall", contact.is_on_wall());
        animator.set_bool("isOnCeiling", contact.on_ceiling);
        animator.set_float("yVelocity", velocity.linvel.y);
    }
}

/// One-shot triggers only live for the frame they were raised in.
pub fn clear_triggers(mut query: Query<&mut Animator>) {
    for mut animator in query.iter_mut() {
        if !animator.triggers().is_empty() {
            animator.clear_triggers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::BehaviorState;

    fn animation_app() -> App {
        let mut app = App::new();
        app.add_event::<BehaviorChanged>()
            .add_event::<HurtEvent>()
            .add_event::<DeathEvent>()
            .add_systems(
                Update,
                (
                    play_behavior_states,
                    trigger_health_reactions,
                    sync_locomotion,
                    sync_contact_parameters,
                ),
            );
        app
    }

    #[test]
    fn behavior_changes_play_states() {
        let mut app = animation_app();
        let enemy = app.world_mut().spawn(Animator::default()).id();

        app.world_mut().send_event(BehaviorChanged {
            entity: enemy,
            state: BehaviorState::Patrol,
        });
        app.update();

        assert_eq!(app.world().get::<Animator>(enemy).unwrap().state(), "Walk");
    }

    #[test]
    fn contact_flags_are_mirrored() {
        let mut app = animation_app();
        let contact = ContactState {
            grounded: true,
            on_wall_left: true,
            ..default()
        };
        let character = app
            .world_mut()
            .spawn((
                contact,
                Velocity::linear(Vec2::new(0.0, -3.0)),
                Animator::default(),
            ))
            .id();

        app.update();

        let animator = app.world().get::<Animator>(character).unwrap();
        assert_eq!(animator.bool("isGrounded"), Some(true));
        assert_eq!(animator.bool("isOnWall"), Some(true));
        assert_eq!(animator.bool("isOnCeiling"), Some(false));
        assert_eq!(animator.float("yVelocity"), Some(-3.0));
    }

    #[test]
    fn death_plays_death_state() {
        let mut app = animation_app();
        let character = app.world_mut().spawn(Animator::default()).id();

        app.world_mut().send_event(HurtEvent {
            entity: character,
            amount: 5.0,
            source: None,
        });
        app.world_mut().send_event(DeathEvent {
            entity: character,
            killed_by: None,
        });
        app.update();

        let animator = app.world().get::<Animator>(character).unwrap();
        assert_eq!(animator.state(), "Death");
        assert_eq!(animator.triggers(), &["hurt"]);
    }

    /// Trigger counts seen at the end of each frame's update.
    #[derive(Resource, Default)]
    struct SeenTriggers(Vec<usize>);

    fn record_triggers(query: Query<&Animator>, mut seen: ResMut<SeenTriggers>) {
        seen.0.extend(query.iter().map(|animator| animator.triggers().len()));
    }

    #[test]
    fn triggers_do_not_pile_up_across_frames() {
        let mut app = animation_app();
        app.init_resource::<SeenTriggers>()
            .add_systems(PostUpdate, record_triggers)
            .add_systems(Last, clear_triggers);
        let character = app.world_mut().spawn(Animator::default()).id();

        for _ in 0..3 {
            for _ in 0..2 {
                app.world_mut().send_event(HurtEvent {
                    entity: character,
                    amount: 1.0,
                    source: None,
                });
            }
            app.update();
        }

        assert_eq!(app.world().resource::<SeenTriggers>().0, vec![1, 1, 1]);
        assert!(app.world().get::<Animator>(character).unwrap().triggers().is_empty());
    }
}
