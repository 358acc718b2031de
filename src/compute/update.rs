/// Kinematics, per-frame timers and off-playfield culling for every entity
/// kind.  Culling is always a `retain`, so no element is skipped.

use crate::entities::{Bullet, Enemy, GameEvent, GameState, WeaponKind};

use super::boss::advance_boss;

/// Run one frame of movement and timers for every live entity.
pub fn step_entities(state: &mut GameState) {
    step_player_timers(state);
    step_bullets(state);
    step_enemies(state);
    step_boss(state);
    step_explosions(state);
    step_power_ups(state);
}

fn step_player_timers(state: &mut GameState) {
    let p = &mut state.player;
    p.invincible_timer = p.invincible_timer.saturating_sub(1);
    p.weapon.cooldown = p.weapon.cooldown.saturating_sub(1);

    if p.weapon.boost_timer > 0 {
        p.weapon.boost_timer -= 1;
        if p.weapon.boost_timer == 0 {
            p.weapon.kind = WeaponKind::Single;
            state.events.push(GameEvent::WeaponReverted);
            tracing::debug!(frame = state.frame, "weapon boost expired");
        }
    }
}

/// True once a rectangle has fully left the playfield on any side.
pub fn is_off_playfield(x: f32, y: f32, w: f32, h: f32, width: f32, height: f32) -> bool {
    x + w < 0.0 || x > width || y + h < 0.0 || y > height
}

fn move_bullet(b: &mut Bullet) {
    b.x += b.vx;
    b.y += b.vy;
}

fn step_bullets(state: &mut GameState) {
    let (width, height) = (state.width(), state.height());
    for list in [&mut state.bullets, &mut state.enemy_bullets] {
        list.iter_mut().for_each(move_bullet);
        list.retain(|b| !is_off_playfield(b.x, b.y, b.w, b.h, width, height));
    }
}

fn step_enemies(state: &mut GameState) {
    let height = state.height();
    let cfg = &state.config.enemy;
    let mut shots: Vec<Bullet> = Vec::new();

    for enemy in state.enemies.iter_mut() {
        enemy.y += enemy.speed;
        enemy.shoot_cooldown = enemy.shoot_cooldown.saturating_sub(1);
        // Only fire once visible
        if enemy.shoot_cooldown == 0 && enemy.y >= 0.0 {
            shots.push(enemy_shot(enemy, cfg.bullet_size, cfg.bullet_speed));
            enemy.shoot_cooldown = enemy.shoot_interval;
        }
    }

    state.enemies.retain(|e| e.y <= height);
    state.enemy_bullets.extend(shots);
}

fn enemy_shot(enemy: &Enemy, size: f32, speed: f32) -> Bullet {
    Bullet {
        x: enemy.x + enemy.w / 2.0 - size / 2.0,
        y: enemy.y + enemy.h,
        w: size,
        h: size,
        vx: 0.0,
        vy: speed,
        damage: 1,
    }
}

fn step_boss(state: &mut GameState) {
    let target = state.player.bounds().center();
    let width = state.width();
    if let Some(boss) = state.boss.as_mut() {
        let shots = advance_boss(boss, target, &state.config.boss, width);
        state.enemy_bullets.extend(shots);
    }
}

fn step_explosions(state: &mut GameState) {
    let cfg = &state.config.explosion;
    for e in state.explosions.iter_mut() {
        e.radius += cfg.growth;
        e.alpha -= cfg.fade;
    }
    // Half a fade step absorbs f32 drift, so the last step always removes
    let floor = cfg.fade / 2.0;
    state.explosions.retain(|e| e.alpha > floor);
}

fn step_power_ups(state: &mut GameState) {
    let height = state.height();
    let fall = state.config.power_up.fall_speed;
    for p in state.power_ups.iter_mut() {
        p.y += fall;
    }
    state.power_ups.retain(|p| p.y - p.radius <= height);
}
