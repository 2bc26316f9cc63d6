//! Enemy behavior state machine.
//!
//! `EnemyBrain` is a plain struct driven once per decision tick by
//! [`EnemyBrain::decide`]. It reads a [`Perception`] snapshot, steers a
//! [`MovementController`] and reports everything else it wants done (arming
//! the hitbox, disabling the body, despawning) as [`BrainSignal`]s that the
//! ECS layer applies.
//!
//! Health-driven transitions come in through [`EnemyBrain::on_hurt`] and
//! [`EnemyBrain::on_die`] and preempt whatever the brain was doing, with
//! `Dead` winning over `Hurt` and `Hurt` winning over `Attack`.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use crate::core::Countdown;
use crate::movement::MovementController;

/// Behavior states. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BehaviorState {
    #[default]
    Idle,
    Patrol,
    Chase,
    Attack { variant: usize },
    Hurt,
    Dead,
    Returning,
    Stunned,
}

impl BehaviorState {
    /// Animator state name.
    pub fn name(self) -> &'static str {
        match self {
            BehaviorState::Idle => "Idle",
            BehaviorState::Patrol => "Walk",
            BehaviorState::Chase => "Chase",
            BehaviorState::Attack { .. } => "Attack",
            BehaviorState::Hurt => "Hurt",
            BehaviorState::Dead => "Death",
            BehaviorState::Returning => "Walk",
            BehaviorState::Stunned => "Stunned",
        }
    }
}

/// One attack variant.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSpec {
    pub damage: f32,
    /// Total length of the swing in seconds
    pub duration: f32,
    /// Armed window as fractions of `duration`
    pub window: (f32, f32),
    pub knockback: Vec2,
    /// Variant is eligible while health fraction is below this
    pub below_health: Option<f32>,
}

impl Default for AttackSpec {
    fn default() -> Self {
        Self {
            damage: 10.0,
            duration: 0.8,
            window: (0.4, 0.7),
            knockback: Vec2::new(4.0, 2.0),
            below_health: None,
        }
    }
}

/// Pick the attack variant for the current health fraction.
///
/// The eligible variant with the lowest threshold wins; otherwise the first
/// variant without a threshold, otherwise the first variant.
pub fn select_attack(attacks: &[AttackSpec], health_fraction: f32) -> usize {
    let phased = attacks
        .iter()
        .enumerate()
        .filter_map(|(index, attack)| attack.below_health.map(|threshold| (index, threshold)))
        .filter(|(_, threshold)| health_fraction < *threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index);

    phased
        .or_else(|| attacks.iter().position(|attack| attack.below_health.is_none()))
        .unwrap_or(0)
}

/// Tuning for a brain.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    pub sight_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// How long a chase continues after the target was last seen
    pub lose_grace: f32,
    pub hurt_duration: f32,
    /// Delay between death and despawn
    pub death_duration: f32,
    /// Pause at each waypoint
    pub waypoint_hold: f32,
    pub waypoint_threshold: f32,
    /// Walk back to the spawn point after losing the target
    pub return_home: bool,
    /// Break off a return to chase a re-detected target
    pub aggressive: bool,
    pub attacks: Vec<AttackSpec>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            sight_range: 6.0,
            attack_range: 1.5,
            attack_cooldown: 1.5,
            lose_grace: 1.0,
            hurt_duration: 0.4,
            death_duration: 1.5,
            waypoint_hold: 1.0,
            waypoint_threshold: 0.3,
            return_home: true,
            aggressive: true,
            attacks: vec![AttackSpec::default()],
        }
    }
}

/// How the next waypoint is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PatrolOrder {
    #[default]
    Sequential,
    /// Any waypoint other than the current one
    RandomDifferent,
}

/// Ordered patrol positions computed at spawn time.
#[derive(Debug, Clone, Default)]
pub struct Waypoints {
    points: Vec<Vec2>,
    index: usize,
    order: PatrolOrder,
}

impl Waypoints {
    pub fn new(points: Vec<Vec2>, order: PatrolOrder) -> Self {
        Self {
            points,
            index: 0,
            order,
        }
    }

    /// Two points `distance` either side of `home`. Empty when distance is not positive.
    pub fn symmetric(home: Vec2, distance: f32, order: PatrolOrder) -> Self {
        if distance <= 0.0 {
            return Self::new(Vec::new(), order);
        }
        let offset = Vec2::new(distance, 0.0);
        Self::new(vec![home - offset, home + offset], order)
    }

    pub fn from_offsets(home: Vec2, offsets: &[Vec2], order: PatrolOrder) -> Self {
        Self::new(offsets.iter().map(|offset| home + *offset).collect(), order)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<Vec2> {
        self.points.get(self.index).copied()
    }

    pub fn advance(&mut self, rng: &mut impl Rng) {
        let len = self.points.len();
        if len < 2 {
            return;
        }
        self.index = match self.order {
            PatrolOrder::Sequential => (self.index + 1) % len,
            PatrolOrder::RandomDifferent => {
                let pick = rng.gen_range(0..len - 1);
                if pick >= self.index {
                    pick + 1
                } else {
                    pick
                }
            }
        };
    }
}

/// What the brain knows about the world this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub position: Vec2,
    /// Target position, `None` when there is no living target
    pub target: Option<Vec2>,
    /// The detection zone currently overlaps the target
    pub target_detected: bool,
    /// Own health as a fraction of maximum
    pub health_fraction: f32,
}

impl Perception {
    pub fn alone(position: Vec2) -> Self {
        Self {
            position,
            target: None,
            target_detected: false,
            health_fraction: 1.0,
        }
    }
}

/// Side effects requested by the brain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrainSignal {
    ArmHitbox { damage: f32, knockback: Vec2 },
    DisarmHitbox,
    DisableBody,
    Despawn,
    Entered(BehaviorState),
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    config: BehaviorConfig,
    state: BehaviorState,
    waypoints: Waypoints,
    home: Vec2,
    clock: f32,
    last_attack_time: Option<f32>,
    last_seen_time: Option<f32>,
    last_seen_position: Option<Vec2>,
    state_timer: Countdown,
    hold: Countdown,
    stun_duration: f32,
    hitbox_armed: bool,
    /// The current swing has reached its hit window
    window_opened: bool,
    despawn_sent: bool,
    pending: Vec<BrainSignal>,
}

impl EnemyBrain {
    pub fn new(config: BehaviorConfig, waypoints: Waypoints, home: Vec2) -> Self {
        Self {
            config,
            state: BehaviorState::Idle,
            waypoints,
            home,
            clock: 0.0,
            last_attack_time: None,
            last_seen_time: None,
            last_seen_position: None,
            state_timer: Countdown::default(),
            hold: Countdown::default(),
            stun_duration: 0.0,
            hitbox_armed: false,
            window_opened: false,
            despawn_sent: false,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn is_dead(&self) -> bool {
        self.state == BehaviorState::Dead
    }

    /// Seconds of decision time since the brain was created.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_running()
    }

    pub fn cooldown_ready(&self) -> bool {
        self.last_attack_time
            .map_or(true, |last| self.clock - last >= self.config.attack_cooldown)
    }

    /// Signals produced outside `decide` that have not been collected yet.
    pub fn take_signals(&mut self) -> Vec<BrainSignal> {
        std::mem::take(&mut self.pending)
    }

    /// The only place the state changes. Returns `false` when nothing happened.
    pub fn change_state(&mut self, next: BehaviorState, movement: &mut MovementController) -> bool {
        if next == self.state || self.state == BehaviorState::Dead {
            return false;
        }

        self.exit_state(movement);
        debug!("Enemy behavior {:?} -> {:?}", self.state, next);
        self.state = next;
        self.enter_state(movement);
        self.pending.push(BrainSignal::Entered(next));
        true
    }

    fn exit_state(&mut self, movement: &mut MovementController) {
        match self.state {
            BehaviorState::Attack { .. } => {
                self.disarm();
                movement.facing_locked = false;
                movement.lock_velocity = false;
                self.state_timer.cancel();
            }
            BehaviorState::Hurt => {
                movement.can_move = true;
                self.state_timer.cancel();
            }
            BehaviorState::Stunned => {
                movement.lock_velocity = false;
                self.state_timer.cancel();
            }
            BehaviorState::Patrol => self.hold.cancel(),
            _ => {}
        }
    }

    fn enter_state(&mut self, movement: &mut MovementController) {
        match self.state {
            BehaviorState::Idle => {
                movement.stop();
                movement.set_running(false);
            }
            BehaviorState::Patrol | BehaviorState::Returning => movement.set_running(false),
            BehaviorState::Chase => {
                movement.set_running(true);
                self.last_seen_time = Some(self.clock);
            }
            BehaviorState::Attack { variant } => {
                movement.stop();
                movement.lock_velocity = true;
                movement.facing_locked = true;
                self.last_attack_time = Some(self.clock);
                self.window_opened = false;
                let duration = self
                    .config
                    .attacks
                    .get(variant)
                    .map_or(0.0, |attack| attack.duration);
                self.state_timer.start(duration);
            }
            BehaviorState::Hurt => {
                movement.stop();
                movement.can_move = false;
                self.state_timer.start(self.config.hurt_duration);
            }
            BehaviorState::Dead => {
                self.disarm();
                movement.stop();
                movement.can_move = false;
                movement.lock_velocity = true;
                movement.facing_locked = true;
                self.hold.cancel();
                self.state_timer.start(self.config.death_duration);
                self.pending.push(BrainSignal::DisableBody);
            }
            BehaviorState::Stunned => {
                movement.stop();
                movement.lock_velocity = true;
                self.state_timer.start(self.stun_duration);
            }
        }
    }

    fn disarm(&mut self) {
        if self.hitbox_armed {
            self.hitbox_armed = false;
            self.pending.push(BrainSignal::DisarmHitbox);
        }
    }

    /// Health reported a survivable hit.
    pub fn on_hurt(&mut self, movement: &mut MovementController) {
        match self.state {
            BehaviorState::Dead => {}
            BehaviorState::Hurt => self.state_timer.start(self.config.hurt_duration),
            _ => {
                self.change_state(BehaviorState::Hurt, movement);
            }
        }
    }

    /// Health reported death.
    pub fn on_die(&mut self, movement: &mut MovementController) {
        self.change_state(BehaviorState::Dead, movement);
    }

    /// Stop acting for `duration` seconds. Ignored while dead or hurt.
    pub fn stun(&mut self, duration: f32, movement: &mut MovementController) {
        match self.state {
            BehaviorState::Dead | BehaviorState::Hurt => {}
            BehaviorState::Stunned => self.state_timer.start(duration.max(0.0)),
            _ => {
                self.stun_duration = duration.max(0.0);
                self.change_state(BehaviorState::Stunned, movement);
            }
        }
    }

    /// Run one decision tick and return every signal raised since the last call.
    pub fn decide(
        &mut self,
        perception: &Perception,
        movement: &mut MovementController,
        rng: &mut impl Rng,
        dt: f32,
    ) -> Vec<BrainSignal> {
        self.clock += dt;

        match self.state {
            BehaviorState::Dead => {
                if self.state_timer.tick(dt) && !self.despawn_sent {
                    self.despawn_sent = true;
                    self.pending.push(BrainSignal::Despawn);
                }
            }
            BehaviorState::Hurt | BehaviorState::Stunned => {
                if self.state_timer.tick(dt) {
                    self.change_state(BehaviorState::Idle, movement);
                }
            }
            BehaviorState::Attack { variant } => self.run_attack(variant, perception, movement, dt),
            _ => self.run_movement_states(perception, movement, rng, dt),
        }

        self.take_signals()
    }

    fn run_attack(
        &mut self,
        variant: usize,
        perception: &Perception,
        movement: &mut MovementController,
        dt: f32,
    ) {
        let finished = self.state_timer.tick(dt) || !self.state_timer.is_running();
        let progress = self.state_timer.progress();

        if let Some(attack) = self.config.attacks.get(variant) {
            let (start, end) = attack.window;
            if !self.window_opened && progress >= start {
                // A long tick may step over the whole window; it still stays
                // armed until the next tick.
                self.window_opened = true;
                self.hitbox_armed = true;
                self.pending.push(BrainSignal::ArmHitbox {
                    damage: attack.damage,
                    knockback: attack.knockback,
                });
                return;
            }
            if progress >= end {
                self.disarm();
            }
        }

        if finished {
            let next = if self.sees_target(perception) {
                BehaviorState::Chase
            } else {
                BehaviorState::Idle
            };
            self.change_state(next, movement);
        }
    }

    fn sees_target(&self, perception: &Perception) -> bool {
        perception.target.is_some_and(|target| {
            perception.target_detected
                || perception.position.distance(target) <= self.config.sight_range
        })
    }

    fn run_movement_states(
        &mut self,
        perception: &Perception,
        movement: &mut MovementController,
        rng: &mut impl Rng,
        dt: f32,
    ) {
        let position = perception.position;

        if let Some(target) = perception.target.filter(|_| self.sees_target(perception)) {
            self.last_seen_time = Some(self.clock);
            self.last_seen_position = Some(target);

            let ignore = self.state == BehaviorState::Returning && !self.config.aggressive;
            if !ignore {
                self.engage(position, target, perception.health_fraction, movement);
                return;
            }
        } else if self.state == BehaviorState::Chase {
            let within_grace = self
                .last_seen_time
                .is_some_and(|seen| self.clock - seen <= self.config.lose_grace);
            match self.last_seen_position.filter(|_| perception.target.is_some()) {
                Some(last_seen) if within_grace => {
                    movement.move_towards(position, last_seen);
                    return;
                }
                _ => {
                    let next = if self.config.return_home {
                        BehaviorState::Returning
                    } else {
                        self.patrol_or_idle()
                    };
                    self.change_state(next, movement);
                }
            }
        }

        if self.state == BehaviorState::Returning {
            if MovementController::has_reached(position, self.home, self.config.waypoint_threshold) {
                let next = self.patrol_or_idle();
                self.change_state(next, movement);
            } else {
                movement.move_towards(position, self.home);
                return;
            }
        }

        self.patrol(position, movement, rng, dt);
    }

    fn patrol_or_idle(&self) -> BehaviorState {
        if self.waypoints.is_empty() {
            BehaviorState::Idle
        } else {
            BehaviorState::Patrol
        }
    }

    /// Chase or attack a visible target.
    fn engage(
        &mut self,
        position: Vec2,
        target: Vec2,
        health_fraction: f32,
        movement: &mut MovementController,
    ) {
        let distance = position.distance(target);

        if distance <= self.config.attack_range && self.cooldown_ready() && !self.config.attacks.is_empty() {
            movement.face(target.x - position.x);
            let variant = select_attack(&self.config.attacks, health_fraction);
            self.change_state(BehaviorState::Attack { variant }, movement);
            return;
        }

        self.change_state(BehaviorState::Chase, movement);
        if distance <= self.config.attack_range {
            movement.stop();
            movement.face(target.x - position.x);
        } else {
            movement.move_towards(position, target);
        }
    }

    fn patrol(
        &mut self,
        position: Vec2,
        movement: &mut MovementController,
        rng: &mut impl Rng,
        dt: f32,
    ) {
        let Some(waypoint) = self.waypoints.current() else {
            self.change_state(BehaviorState::Idle, movement);
            movement.stop();
            return;
        };
        self.change_state(BehaviorState::Patrol, movement);

        if self.hold.is_running() {
            movement.stop();
            if self.hold.tick(dt) {
                self.waypoints.advance(rng);
            }
            return;
        }

        if MovementController::has_reached(position, waypoint, self.config.waypoint_threshold) {
            movement.stop();
            if self.config.waypoint_hold > 0.0 {
                self.hold.start(self.config.waypoint_hold);
            } else {
                self.waypoints.advance(rng);
            }
        } else {
            movement.move_towards(position, waypoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 0.1;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn brain(config: BehaviorConfig) -> EnemyBrain {
        EnemyBrain::new(config, Waypoints::default(), Vec2::ZERO)
    }

    fn sees(distance: f32) -> Perception {
        Perception {
            position: Vec2::ZERO,
            target: Some(Vec2::new(distance, 0.0)),
            target_detected: false,
            health_fraction: 1.0,
        }
    }

    fn armed(signals: &[BrainSignal]) -> bool {
        signals
            .iter()
            .any(|signal| matches!(signal, BrainSignal::ArmHitbox { .. }))
    }

    #[test]
    fn chases_out_of_range_then_attacks_in_range() {
        let config = BehaviorConfig {
            sight_range: 5.0,
            attack_range: 2.0,
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.decide(&sees(3.0), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Chase);
        assert!(movement.is_moving());
        assert!(movement.is_running());

        brain.decide(&sees(1.5), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Attack { variant: 0 });
        assert!(!movement.is_moving());
        assert!(movement.lock_velocity);
    }

    #[test]
    fn out_of_sight_target_is_ignored() {
        let mut brain = brain(BehaviorConfig::default());
        let mut movement = MovementController::default();

        brain.decide(&sees(20.0), &mut movement, &mut rng(), DT);
        assert_eq!(brain.state(), BehaviorState::Idle);
        assert!(!movement.is_moving());
    }

    #[test]
    fn detection_zone_overrides_sight_range() {
        let mut brain = brain(BehaviorConfig::default());
        let mut movement = MovementController::default();
        let perception = Perception {
            target_detected: true,
            ..sees(20.0)
        };

        brain.decide(&perception, &mut movement, &mut rng(), DT);
        assert_eq!(brain.state(), BehaviorState::Chase);
    }

    /// Attack once, then step the clock until `elapsed` seconds after the attack
    /// started and report whether a second attack begins.
    fn attacks_again_after(elapsed: f32) -> bool {
        let config = BehaviorConfig {
            attack_cooldown: 1.0,
            attacks: vec![AttackSpec {
                duration: 0.5,
                ..default()
            }],
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();
        let close = sees(1.0);

        brain.decide(&close, &mut movement, &mut rng, 0.0);
        assert!(matches!(brain.state(), BehaviorState::Attack { .. }));

        let mut attacked_again = false;
        let steps = (elapsed / 0.25).round() as usize;
        for _ in 0..steps {
            let before = brain.state();
            brain.decide(&close, &mut movement, &mut rng, 0.25);
            if !matches!(before, BehaviorState::Attack { .. })
                && matches!(brain.state(), BehaviorState::Attack { .. })
            {
                attacked_again = true;
            }
        }
        attacked_again
    }

    #[test]
    fn cooldown_threshold_is_respected() {
        assert!(!attacks_again_after(0.75));
        assert!(attacks_again_after(1.0));
        assert!(attacks_again_after(1.25));
    }

    #[test]
    fn hitbox_is_armed_only_inside_window() {
        let config = BehaviorConfig {
            attacks: vec![AttackSpec {
                duration: 1.0,
                window: (0.35, 0.65),
                ..default()
            }],
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();
        let close = sees(1.0);

        brain.decide(&close, &mut movement, &mut rng, 0.0);

        let mut armed_at = None;
        let mut disarmed_at = None;
        for step in 1..=10 {
            let signals = brain.decide(&close, &mut movement, &mut rng, 0.1);
            if armed(&signals) {
                armed_at = Some(step);
            }
            if signals.contains(&BrainSignal::DisarmHitbox) {
                disarmed_at = Some(step);
            }
        }

        assert_eq!(armed_at, Some(4));
        assert_eq!(disarmed_at, Some(7));
    }

    #[test]
    fn long_tick_over_the_window_still_arms_once() {
        let config = BehaviorConfig {
            attacks: vec![AttackSpec {
                duration: 1.0,
                window: (0.4, 0.6),
                ..default()
            }],
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();
        let close = sees(1.0);

        brain.decide(&close, &mut movement, &mut rng, 0.0);
        assert!(!armed(&brain.decide(&close, &mut movement, &mut rng, 0.35)));

        // 0.35 -> 0.65 skips the whole window in one step
        let signals = brain.decide(&close, &mut movement, &mut rng, 0.3);
        assert!(armed(&signals));

        let signals = brain.decide(&close, &mut movement, &mut rng, 0.5);
        assert!(signals.contains(&BrainSignal::DisarmHitbox));
        assert!(!armed(&signals));
        assert!(!matches!(brain.state(), BehaviorState::Attack { .. }));
    }

    #[test]
    fn swing_finished_in_one_tick_is_armed_before_it_ends() {
        let config = BehaviorConfig {
            attacks: vec![AttackSpec {
                duration: 0.5,
                window: (0.4, 0.7),
                ..default()
            }],
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();
        let close = sees(1.0);

        brain.decide(&close, &mut movement, &mut rng, 0.0);
        let signals = brain.decide(&close, &mut movement, &mut rng, 2.0);
        assert!(armed(&signals));
        assert!(matches!(brain.state(), BehaviorState::Attack { .. }));

        let signals = brain.decide(&close, &mut movement, &mut rng, 0.016);
        assert!(signals.contains(&BrainSignal::DisarmHitbox));
        assert!(!matches!(brain.state(), BehaviorState::Attack { .. }));
        assert!(!movement.lock_velocity);
    }

    #[test]
    fn change_state_is_idempotent() {
        let mut brain = brain(BehaviorConfig::default());
        let mut movement = MovementController::default();

        assert!(brain.change_state(BehaviorState::Chase, &mut movement));
        assert!(!brain.change_state(BehaviorState::Chase, &mut movement));

        let entered = brain
            .take_signals()
            .into_iter()
            .filter(|signal| *signal == BrainSignal::Entered(BehaviorState::Chase))
            .count();
        assert_eq!(entered, 1);
    }

    #[test]
    fn hurt_preempts_attack_and_disarms() {
        let config = BehaviorConfig {
            attacks: vec![AttackSpec {
                duration: 1.0,
                window: (0.0, 1.0),
                ..default()
            }],
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.decide(&sees(1.0), &mut movement, &mut rng, 0.0);
        let signals = brain.decide(&sees(1.0), &mut movement, &mut rng, 0.1);
        assert!(armed(&signals));

        brain.on_hurt(&mut movement);
        assert_eq!(brain.state(), BehaviorState::Hurt);
        assert!(!movement.can_move);
        assert!(!movement.lock_velocity);
        assert!(brain.take_signals().contains(&BrainSignal::DisarmHitbox));
    }

    #[test]
    fn hurt_again_restarts_timer_without_reentry() {
        let config = BehaviorConfig {
            hurt_duration: 0.4,
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();
        let alone = Perception::alone(Vec2::ZERO);

        brain.on_hurt(&mut movement);
        brain.take_signals();
        brain.decide(&alone, &mut movement, &mut rng, 0.3);

        brain.on_hurt(&mut movement);
        assert!(brain.take_signals().is_empty());

        brain.decide(&alone, &mut movement, &mut rng, 0.3);
        assert_eq!(brain.state(), BehaviorState::Hurt);
        brain.decide(&alone, &mut movement, &mut rng, 0.2);
        assert_eq!(brain.state(), BehaviorState::Idle);
        assert!(movement.can_move);
    }

    #[test]
    fn dead_is_terminal_and_despawns_once() {
        let config = BehaviorConfig {
            death_duration: 0.5,
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.on_die(&mut movement);
        assert!(brain.take_signals().contains(&BrainSignal::DisableBody));

        brain.on_hurt(&mut movement);
        brain.stun(2.0, &mut movement);
        assert!(!brain.change_state(BehaviorState::Chase, &mut movement));
        assert_eq!(brain.state(), BehaviorState::Dead);

        let mut despawns = 0;
        for _ in 0..20 {
            let signals = brain.decide(&sees(1.0), &mut movement, &mut rng, 0.1);
            despawns += signals
                .iter()
                .filter(|signal| **signal == BrainSignal::Despawn)
                .count();
        }
        assert_eq!(despawns, 1);
        assert_eq!(brain.state(), BehaviorState::Dead);
    }

    #[test]
    fn stun_is_ignored_while_hurt() {
        let mut brain = brain(BehaviorConfig::default());
        let mut movement = MovementController::default();

        brain.on_hurt(&mut movement);
        brain.stun(1.0, &mut movement);
        assert_eq!(brain.state(), BehaviorState::Hurt);
    }

    #[test]
    fn stun_expires_to_idle() {
        let mut brain = brain(BehaviorConfig::default());
        let mut movement = MovementController::default();
        let mut rng = rng();
        let alone = Perception::alone(Vec2::ZERO);

        brain.stun(0.5, &mut movement);
        assert_eq!(brain.state(), BehaviorState::Stunned);
        assert!(movement.lock_velocity);

        brain.decide(&alone, &mut movement, &mut rng, 0.25);
        assert_eq!(brain.state(), BehaviorState::Stunned);
        brain.decide(&alone, &mut movement, &mut rng, 0.25);
        assert_eq!(brain.state(), BehaviorState::Idle);
        assert!(!movement.lock_velocity);
    }

    #[test]
    fn empty_waypoints_stay_idle() {
        let mut brain = brain(BehaviorConfig::default());
        let mut movement = MovementController::default();

        brain.decide(&Perception::alone(Vec2::ZERO), &mut movement, &mut rng(), DT);
        assert_eq!(brain.state(), BehaviorState::Idle);
        assert!(!movement.is_moving());
    }

    #[test]
    fn patrol_holds_then_advances() {
        let config = BehaviorConfig {
            waypoint_hold: 0.5,
            ..default()
        };
        let waypoints = Waypoints::symmetric(Vec2::ZERO, 3.0, PatrolOrder::Sequential);
        let mut brain = EnemyBrain::new(config, waypoints, Vec2::ZERO);
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.decide(&Perception::alone(Vec2::ZERO), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Patrol);
        assert!(movement.is_facing_left());

        let at_first = Perception::alone(Vec2::new(-3.0, 0.0));
        brain.decide(&at_first, &mut movement, &mut rng, DT);
        assert!(brain.is_holding());
        assert!(!movement.is_moving());
        assert_eq!(brain.state(), BehaviorState::Patrol);

        brain.decide(&at_first, &mut movement, &mut rng, 0.25);
        brain.decide(&at_first, &mut movement, &mut rng, 0.25);
        assert!(!brain.is_holding());
        assert_eq!(brain.waypoints().index(), 1);

        brain.decide(&at_first, &mut movement, &mut rng, DT);
        assert!(movement.is_facing_right());
    }

    #[test]
    fn random_order_never_repeats_a_waypoint() {
        let points = vec![Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE];
        let mut waypoints = Waypoints::new(points, PatrolOrder::RandomDifferent);
        let mut rng = rng();

        for _ in 0..100 {
            let before = waypoints.index();
            waypoints.advance(&mut rng);
            assert_ne!(waypoints.index(), before);
            assert!(waypoints.index() < waypoints.len());
        }
    }

    #[test]
    fn lost_target_returns_home_after_grace() {
        let config = BehaviorConfig {
            lose_grace: 0.5,
            sight_range: 5.0,
            ..default()
        };
        let mut brain = EnemyBrain::new(config, Waypoints::default(), Vec2::new(-2.0, 0.0));
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.decide(&sees(4.0), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Chase);

        brain.decide(&sees(8.0), &mut movement, &mut rng, 0.25);
        assert_eq!(brain.state(), BehaviorState::Chase);
        brain.decide(&sees(8.0), &mut movement, &mut rng, 0.5);
        assert_eq!(brain.state(), BehaviorState::Returning);
        assert!(movement.is_facing_left());

        let home = Perception::alone(Vec2::new(-2.0, 0.0));
        brain.decide(&home, &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Idle);
    }

    /// Chase a target at x = 4 from the origin, then lose it until the brain
    /// heads back to a home at x = -2.
    fn returning_brain(config: BehaviorConfig, waypoints: Waypoints) -> (EnemyBrain, MovementController, StdRng) {
        let config = BehaviorConfig {
            lose_grace: 0.5,
            sight_range: 5.0,
            ..config
        };
        let mut brain = EnemyBrain::new(config, waypoints, Vec2::new(-2.0, 0.0));
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.decide(&sees(4.0), &mut movement, &mut rng, DT);
        brain.decide(&sees(8.0), &mut movement, &mut rng, 0.75);
        assert_eq!(brain.state(), BehaviorState::Returning);
        (brain, movement, rng)
    }

    #[test]
    fn grace_period_follows_last_seen_position() {
        let config = BehaviorConfig {
            lose_grace: 0.5,
            sight_range: 5.0,
            ..default()
        };
        let mut brain = brain(config);
        let mut movement = MovementController::default();
        let mut rng = rng();

        brain.decide(&sees(4.0), &mut movement, &mut rng, DT);
        assert!(movement.is_facing_right());

        // The target slipped out of sight behind the enemy
        brain.decide(&sees(-9.0), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Chase);
        assert!(movement.is_facing_right());
        assert!(movement.is_moving());
    }

    #[test]
    fn aggressive_enemy_breaks_off_return_to_chase() {
        let (mut brain, mut movement, mut rng) = returning_brain(BehaviorConfig::default(), Waypoints::default());

        brain.decide(&sees(3.0), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Chase);
        assert!(movement.is_facing_right());
    }

    #[test]
    fn passive_enemy_keeps_returning_past_target() {
        let config = BehaviorConfig {
            aggressive: false,
            ..default()
        };
        let (mut brain, mut movement, mut rng) = returning_brain(config, Waypoints::default());

        brain.decide(&sees(3.0), &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Returning);
        assert!(movement.is_facing_left());
        assert!(movement.is_moving());
    }

    #[test]
    fn reaching_home_resumes_patrol() {
        let waypoints = Waypoints::symmetric(Vec2::new(-2.0, 0.0), 3.0, PatrolOrder::Sequential);
        let (mut brain, mut movement, mut rng) = returning_brain(BehaviorConfig::default(), waypoints);

        let home = Perception::alone(Vec2::new(-2.0, 0.0));
        brain.decide(&home, &mut movement, &mut rng, DT);
        assert_eq!(brain.state(), BehaviorState::Patrol);
        assert!(movement.is_moving());
        assert!(movement.is_facing_left());
    }

    #[test]
    fn attack_variant_follows_health_fraction() {
        let attacks = vec![
            AttackSpec::default(),
            AttackSpec {
                below_health: Some(0.5),
                ..default()
            },
            AttackSpec {
                below_health: Some(0.25),
                ..default()
            },
        ];

        assert_eq!(select_attack(&attacks, 1.0), 0);
        assert_eq!(select_attack(&attacks, 0.5), 0);
        assert_eq!(select_attack(&attacks, 0.4), 1);
        assert_eq!(select_attack(&attacks, 0.1), 2);
    }
}
