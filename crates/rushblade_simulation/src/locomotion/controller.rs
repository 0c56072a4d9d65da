//! Per-actor movement state machine: normal movement, dash, slide, stagger,
//! and attack triggering with windup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::mode::LocomotionMode;
use super::scheduler::{CancelToken, DeferredActions};
use crate::combat::{AttackLoadout, AttackProfile, AttackTier};
use crate::combo::{ComboBonuses, ComboMeter};
use crate::components::ActionButtons;

/// Input below this length counts as no input.
const INPUT_DEADZONE: f32 = 0.001;

/// Floor for the attack-speed divisor.
const MIN_ATTACK_SPEED: f32 = 0.01;

/// Movement tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub base_move_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// How strongly the combo move bonus loosens accel/decel
    pub ice_multiplier: f32,
    /// Speed multiplier granted on dash/slide entry
    pub post_dash_bonus: f32,
    /// Decay of the post-dash bonus; the per-second rate is `bonus_decay / post_dash_bonus`
    pub bonus_decay: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub double_tap_window: f32,
    pub slide_duration: f32,
    /// Slide speed lost per second
    pub slide_decay_rate: f32,
    pub stagger_duration: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_move_speed: 4.5,
            acceleration: 20.0,
            deceleration: 25.0,
            ice_multiplier: 0.3,
            post_dash_bonus: 1.5,
            bonus_decay: 0.8,
            dash_speed: 15.0,
            dash_duration: 0.15,
            dash_cooldown: 0.8,
            double_tap_window: 0.3,
            slide_duration: 0.6,
            slide_decay_rate: 8.0,
            stagger_duration: 0.18,
        }
    }
}

impl LocomotionConfig {
    pub fn sanitized(self) -> Self {
        Self {
            base_move_speed: self.base_move_speed.max(0.0),
            acceleration: self.acceleration.max(0.0),
            deceleration: self.deceleration.max(0.0),
            ice_multiplier: self.ice_multiplier.max(0.0),
            post_dash_bonus: self.post_dash_bonus.max(1.0),
            bonus_decay: self.bonus_decay.max(0.0),
            dash_speed: self.dash_speed.max(0.0),
            dash_duration: self.dash_duration.max(0.0),
            dash_cooldown: self.dash_cooldown.max(0.0),
            double_tap_window: self.double_tap_window.max(0.0),
            slide_duration: self.slide_duration.max(0.0),
            slide_decay_rate: self.slide_decay_rate.max(0.0),
            stagger_duration: self.stagger_duration.max(0.0),
        }
    }

    /// Post-dash bonus lost per second while idle.
    pub fn bonus_decay_rate(&self) -> f32 {
        self.bonus_decay / self.post_dash_bonus.max(1.0)
    }
}

/// Input for one tick: movement axes and button press edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub direction: Vec2,
    pub pressed: ActionButtons,
}

impl TickInput {
    pub fn new(direction: Vec2, pressed: ActionButtons) -> Self {
        Self { direction, pressed }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

/// Something observable happened inside the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionSignal {
    DashStarted { direction: Vec2 },
    DashEnded,
    SlideStarted { direction: Vec2 },
    SlideEnded,
    /// Slide cut short by an attack
    SlideCancelled,
    AttackStarted { tier: AttackTier, cooldown: f32 },
    /// A pending swing was dropped (superseded, dash/slide entry or hit)
    SwingCancelled { tier: AttackTier },
    StaggerStarted,
    StaggerEnded,
}

/// Swing waiting for its windup to elapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSwing {
    pub tier: AttackTier,
    pub profile: AttackProfile,
}

/// Result of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Velocity the body should move with this tick
    pub velocity: Vec2,
    pub signals: Vec<LocomotionSignal>,
    /// Swings whose windup elapsed this tick
    pub swings: Vec<PendingSwing>,
}

/// Movement and attack-trigger state for one actor.
#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    attacks: AttackLoadout,
    mode: LocomotionMode,
    velocity: Vec2,
    /// Unit vector, never zero
    facing: Vec2,
    /// Post-dash multiplier, ≥ 1
    speed_bonus: f32,
    dash_ready_at: f32,
    light_ready_at: f32,
    heavy_ready_at: f32,
    last_dash_press: Option<f32>,
    deferred: DeferredActions<PendingSwing>,
    /// At most one swing is pending
    pending_swing: Option<(CancelToken, AttackTier)>,
    /// Signals raised outside `tick` (take_hit), reported on the next tick
    queued_signals: Vec<LocomotionSignal>,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default(), AttackLoadout::default())
    }
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig, attacks: AttackLoadout) -> Self {
        Self {
            config: config.sanitized(),
            attacks: attacks.sanitized(),
            mode: LocomotionMode::Normal,
            velocity: Vec2::ZERO,
            facing: Vec2::X,
            speed_bonus: 1.0,
            dash_ready_at: 0.0,
            light_ready_at: 0.0,
            heavy_ready_at: 0.0,
            last_dash_press: None,
            deferred: DeferredActions::new(),
            pending_swing: None,
            queued_signals: Vec::new(),
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn attacks(&self) -> &AttackLoadout {
        &self.attacks
    }

    pub fn mode(&self) -> LocomotionMode {
        self.mode
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn speed_bonus(&self) -> f32 {
        self.speed_bonus
    }

    pub fn dash_ready_at(&self) -> f32 {
        self.dash_ready_at
    }

    pub fn attack_ready_at(&self, tier: AttackTier) -> f32 {
        match tier {
            AttackTier::Light => self.light_ready_at,
            AttackTier::Heavy => self.heavy_ready_at,
        }
    }

    /// Tier of the swing still in windup, if any.
    pub fn pending_swing(&self) -> Option<AttackTier> {
        self.pending_swing.map(|(_, tier)| tier)
    }

    /// Set facing directly (spawn, restore). Zero is ignored.
    pub fn set_facing(&mut self, facing: Vec2) {
        if let Some(unit) = facing.try_normalize() {
            self.facing = unit;
        }
    }

    /// Advance one fixed tick.
    ///
    /// `bonuses` are the combo meter's current multipliers; they scale move
    /// speed, the ice effect and attack cooldowns.
    pub fn tick(&mut self, input: &TickInput, now: f32, dt: f32, bonuses: &ComboBonuses) -> TickReport {
        let mut report = TickReport {
            signals: std::mem::take(&mut self.queued_signals),
            ..default()
        };

        let direction = normalized_input(input.direction);
        if direction != Vec2::ZERO && !self.mode.locks_direction() {
            self.facing = direction;
        }

        if let LocomotionMode::Staggered { timer } = self.mode {
            self.velocity = Vec2::ZERO;
            self.speed_bonus = 1.0;
            let timer = timer - dt;
            if timer <= 0.0 {
                self.mode = LocomotionMode::Normal;
                report.signals.push(LocomotionSignal::StaggerEnded);
            } else {
                self.mode = LocomotionMode::Staggered { timer };
            }
            report.velocity = self.velocity;
            return report;
        }

        if input.pressed.contains(ActionButtons::DASH) {
            self.handle_dash_press(direction, now, &mut report.signals);
        }
        self.advance_mode_timer(dt, &mut report.signals);

        if !self.mode.is_dashing() {
            for tier in [AttackTier::Light, AttackTier::Heavy] {
                if input.pressed.contains(tier_button(tier)) {
                    self.try_start_attack(tier, now, bonuses, &mut report.signals);
                }
            }
        }

        self.velocity = match self.mode {
            LocomotionMode::Dashing { direction, .. } => direction * self.config.dash_speed,
            LocomotionMode::Sliding { timer, direction, speed } => {
                let speed = (speed - self.config.slide_decay_rate * dt).max(0.0);
                self.mode = LocomotionMode::Sliding { timer, direction, speed };
                direction * speed
            }
            LocomotionMode::Normal | LocomotionMode::Staggered { .. } => {
                self.blend_normal_velocity(direction, dt, bonuses)
            }
        };

        for (token, swing) in self.deferred.drain_due(now) {
            if self.pending_swing.is_some_and(|(pending, _)| pending == token) {
                self.pending_swing = None;
            }
            report.swings.push(swing);
        }

        report.velocity = self.velocity;
        report
    }

    /// React to incoming damage: drop the pending swing and any dash or
    /// slide, reset the combo and enter stagger.
    pub fn take_hit(&mut self, meter: &mut ComboMeter, now: f32) {
        if let Some((_, tier)) = self.pending_swing.take() {
            self.queued_signals.push(LocomotionSignal::SwingCancelled { tier });
        }
        let dropped = self.deferred.cancel_all();
        meter.interrupt();

        crate::logger::log(&format!(
            "Hit taken at {:.3}s while {}: staggered for {:.2}s, {} deferred action(s) dropped",
            now,
            self.mode.name(),
            self.config.stagger_duration,
            dropped
        ));

        self.mode = LocomotionMode::Staggered {
            timer: self.config.stagger_duration,
        };
        self.velocity = Vec2::ZERO;
        self.speed_bonus = 1.0;
        self.queued_signals.push(LocomotionSignal::StaggerStarted);
    }

    /// Dash trigger. A press within the double-tap window of the previous
    /// accepted press turns a dash (running, or a fresh one) into a slide.
    /// Presses rejected by cooldown or mode leave the timestamp alone.
    fn handle_dash_press(&mut self, direction: Vec2, now: f32, signals: &mut Vec<LocomotionSignal>) {
        let double_tap = self
            .last_dash_press
            .is_some_and(|previous| now - previous < self.config.double_tap_window);

        match self.mode {
            LocomotionMode::Sliding { .. } | LocomotionMode::Staggered { .. } => return,
            LocomotionMode::Dashing { .. } => {
                if !double_tap {
                    return;
                }
                self.start_slide(direction, now, signals);
            }
            LocomotionMode::Normal => {
                if now < self.dash_ready_at {
                    return;
                }
                if double_tap {
                    self.start_slide(direction, now, signals);
                } else {
                    self.start_dash(direction, now, signals);
                }
            }
        }
        self.last_dash_press = Some(now);
    }

    fn start_dash(&mut self, direction: Vec2, now: f32, signals: &mut Vec<LocomotionSignal>) {
        let direction = self.locked_direction(direction);
        self.cancel_pending_swing(signals);
        self.mode = LocomotionMode::Dashing {
            timer: self.config.dash_duration,
            direction,
        };
        self.dash_ready_at = now + self.config.dash_cooldown;
        self.speed_bonus = self.config.post_dash_bonus;
        signals.push(LocomotionSignal::DashStarted { direction });
    }

    fn start_slide(&mut self, direction: Vec2, now: f32, signals: &mut Vec<LocomotionSignal>) {
        let direction = self.locked_direction(direction);
        self.cancel_pending_swing(signals);
        self.mode = LocomotionMode::Sliding {
            timer: self.config.slide_duration,
            direction,
            speed: self.config.dash_speed,
        };
        self.dash_ready_at = now + self.config.dash_cooldown;
        self.speed_bonus = self.config.post_dash_bonus;
        signals.push(LocomotionSignal::SlideStarted { direction });
    }

    /// Input if there is any, otherwise current facing.
    fn locked_direction(&self, direction: Vec2) -> Vec2 {
        if direction != Vec2::ZERO {
            direction
        } else {
            self.facing
        }
    }

    fn advance_mode_timer(&mut self, dt: f32, signals: &mut Vec<LocomotionSignal>) {
        match self.mode {
            LocomotionMode::Dashing { timer, direction } => {
                let timer = timer - dt;
                if timer <= 0.0 {
                    self.mode = LocomotionMode::Normal;
                    signals.push(LocomotionSignal::DashEnded);
                } else {
                    self.mode = LocomotionMode::Dashing { timer, direction };
                }
            }
            LocomotionMode::Sliding { timer, direction, speed } => {
                let timer = timer - dt;
                if timer <= 0.0 {
                    self.mode = LocomotionMode::Normal;
                    signals.push(LocomotionSignal::SlideEnded);
                } else {
                    self.mode = LocomotionMode::Sliding { timer, direction, speed };
                }
            }
            LocomotionMode::Normal | LocomotionMode::Staggered { .. } => {}
        }
    }

    fn try_start_attack(
        &mut self,
        tier: AttackTier,
        now: f32,
        bonuses: &ComboBonuses,
        signals: &mut Vec<LocomotionSignal>,
    ) {
        if now < self.attack_ready_at(tier) {
            return;
        }

        if self.mode.is_sliding() {
            self.mode = LocomotionMode::Normal;
            signals.push(LocomotionSignal::SlideCancelled);
        }

        let profile = *self.attacks.profile(tier);
        let cooldown = profile.cooldown / bonuses.attack_speed.max(MIN_ATTACK_SPEED);
        match tier {
            AttackTier::Light => self.light_ready_at = now + cooldown,
            AttackTier::Heavy => self.heavy_ready_at = now + cooldown,
        }

        self.cancel_pending_swing(signals);
        let token = self.deferred.schedule(now + profile.windup, PendingSwing { tier, profile });
        self.pending_swing = Some((token, tier));
        signals.push(LocomotionSignal::AttackStarted { tier, cooldown });
    }

    fn cancel_pending_swing(&mut self, signals: &mut Vec<LocomotionSignal>) {
        if let Some((token, tier)) = self.pending_swing.take() {
            self.deferred.cancel(token);
            signals.push(LocomotionSignal::SwingCancelled { tier });
        }
    }

    /// Rate-limited blend toward the input velocity. Higher combo move bonus
    /// lowers accel and decel (ice effect). The post-dash bonus decays only
    /// while there is no input.
    fn blend_normal_velocity(&mut self, direction: Vec2, dt: f32, bonuses: &ComboBonuses) -> Vec2 {
        let move_mult = bonuses.move_speed.max(0.0);
        let target_speed = self.config.base_move_speed * move_mult * self.speed_bonus;
        let target = direction * target_speed;

        let ice = ((move_mult - 1.0) * self.config.ice_multiplier).max(0.0);
        if direction != Vec2::ZERO {
            move_towards(self.velocity, target, self.config.acceleration / (1.0 + ice) * dt)
        } else {
            self.speed_bonus = move_towards_scalar(self.speed_bonus, 1.0, self.config.bonus_decay_rate() * dt);
            move_towards(self.velocity, Vec2::ZERO, self.config.deceleration / (1.0 + ice) * dt)
        }
    }
}

fn tier_button(tier: AttackTier) -> ActionButtons {
    match tier {
        AttackTier::Light => ActionButtons::LIGHT_ATTACK,
        AttackTier::Heavy => ActionButtons::HEAVY_ATTACK,
    }
}

/// Unit input direction, or zero inside the deadzone.
fn normalized_input(raw: Vec2) -> Vec2 {
    if raw.length_squared() < INPUT_DEADZONE {
        Vec2::ZERO
    } else {
        raw.normalize_or_zero()
    }
}

/// Step `current` toward `target` by at most `max_delta`, never past it.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_delta
    }
}

fn move_towards_scalar(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
