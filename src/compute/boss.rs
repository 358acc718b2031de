/// Boss movement and attack patterns.
///
/// Phase cycle: `Entering → Lateral → Zigzag → Lateral → …`.  `Defeated` is
/// terminal and set by the collision resolver.  The post-hit invincibility
/// window runs on its own timer and never pauses the phase timers.

use std::f32::consts::TAU;

use crate::config::BossConfig;
use crate::entities::{Boss, BossPhase, Bullet};

/// Advance the boss by one frame and return the bullets it fires.
/// `target` is the centre of the player.
pub fn advance_boss(
    boss: &mut Boss,
    target: (f32, f32),
    cfg: &BossConfig,
    field_width: f32,
) -> Vec<Bullet> {
    boss.invincible_timer = boss.invincible_timer.saturating_sub(1);
    let mut shots = Vec::new();

    match boss.phase {
        BossPhase::Entering => {
            boss.y += cfg.entry_speed;
            if boss.y >= cfg.entry_y {
                boss.y = cfg.entry_y;
                boss.anchor_y = cfg.entry_y;
                enter_phase(boss, BossPhase::Lateral, cfg);
            }
        }
        BossPhase::Lateral => {
            sweep(boss, field_width);
            boss.shoot_cooldown = boss.shoot_cooldown.saturating_sub(1);
            if boss.shoot_cooldown == 0 {
                shots.extend(radial_ring(boss, cfg));
                boss.shoot_cooldown = cfg.ring_interval;
            }
            boss.phase_timer = boss.phase_timer.saturating_sub(1);
            if boss.phase_timer == 0 {
                enter_phase(boss, BossPhase::Zigzag, cfg);
            }
        }
        BossPhase::Zigzag => {
            sweep(boss, field_width);
            boss.phase_ticks += 1;
            boss.y = boss.anchor_y
                + cfg.zigzag_amplitude * (boss.phase_ticks as f32 * cfg.zigzag_frequency).sin();
            boss.shoot_cooldown = boss.shoot_cooldown.saturating_sub(1);
            if boss.shoot_cooldown == 0 {
                shots.push(aimed_shot(boss, target, cfg));
                boss.shoot_cooldown = cfg.aimed_interval;
            }
            boss.phase_timer = boss.phase_timer.saturating_sub(1);
            if boss.phase_timer == 0 {
                boss.y = boss.anchor_y;
                enter_phase(boss, BossPhase::Lateral, cfg);
            }
        }
        BossPhase::Defeated => {}
    }

    shots
}

/// Switch to `phase`, arming its timers.
fn enter_phase(boss: &mut Boss, phase: BossPhase, cfg: &BossConfig) {
    boss.phase = phase;
    boss.phase_ticks = 0;
    match phase {
        BossPhase::Lateral => {
            boss.phase_timer = cfg.lateral_frames;
            boss.shoot_cooldown = cfg.ring_interval;
        }
        BossPhase::Zigzag => {
            boss.phase_timer = cfg.zigzag_frames;
            boss.shoot_cooldown = cfg.aimed_interval;
        }
        BossPhase::Entering | BossPhase::Defeated => {
            boss.phase_timer = 0;
            boss.shoot_cooldown = 0;
        }
    }
}

/// Horizontal move, flipping direction at either edge.
fn sweep(boss: &mut Boss, field_width: f32) {
    boss.x += boss.vx;
    if boss.x <= 0.0 {
        boss.x = 0.0;
        boss.vx = boss.vx.abs();
    } else if boss.x + boss.w >= field_width {
        boss.x = (field_width - boss.w).max(0.0);
        boss.vx = -boss.vx.abs();
    }
}

fn boss_bullet(boss: &Boss, angle: f32, speed: f32, size: f32) -> Bullet {
    let (cx, cy) = boss.bounds().center();
    Bullet {
        x: cx - size / 2.0,
        y: cy - size / 2.0,
        w: size,
        h: size,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed,
        damage: 1,
    }
}

/// Evenly spaced ring of bullets around the boss centre.
pub fn radial_ring(boss: &Boss, cfg: &BossConfig) -> Vec<Bullet> {
    let n = cfg.ring_bullets.max(1);
    (0..n)
        .map(|i| {
            let angle = i as f32 * TAU / n as f32;
            boss_bullet(boss, angle, cfg.ring_speed, cfg.bullet_size)
        })
        .collect()
}

/// One bullet from the boss centre towards `target`.
pub fn aimed_shot(boss: &Boss, target: (f32, f32), cfg: &BossConfig) -> Bullet {
    let (cx, cy) = boss.bounds().center();
    let angle = (target.1 - cy).atan2(target.0 - cx);
    boss_bullet(boss, angle, cfg.aimed_speed, cfg.bullet_size)
}
