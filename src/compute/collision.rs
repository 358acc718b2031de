/// Pairwise collision scans and their gameplay effects.
///
/// Every scan marks hits first and compacts the lists afterwards, so each
/// entity takes part in at most one damaging collision per scan and no
/// element is skipped by removal.

use rand::Rng;

use crate::entities::{BossPhase, EnemyKind, Explosion, GameEvent, GameState, PowerUpKind};
use crate::geometry::{circle_rect_overlap, rects_overlap};

use super::spawn::roll_power_up_drop;

/// Run every collision scan for this frame.
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) {
    bullets_vs_enemies(state, rng);
    bullets_vs_boss(state);
    enemies_vs_player(state);
    enemy_bullets_vs_player(state);
    boss_vs_player(state);
    power_ups_vs_player(state);
}

/// Drop every element whose mark is set.
fn compact<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = !marked[i];
        i += 1;
        keep
    });
}

fn explosion(state: &mut GameState, x: f32, y: f32, radius: f32) {
    state.explosions.push(Explosion {
        x,
        y,
        radius,
        alpha: 1.0,
    });
}

// ── Player bullets ───────────────────────────────────────────────────────────

pub fn bullets_vs_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let mut spent = vec![false; state.bullets.len()];
    let mut hit = vec![false; state.enemies.len()];
    let mut sparks: Vec<(f32, f32)> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bounds = bullet.bounds();
        for (ei, enemy) in state.enemies.iter_mut().enumerate() {
            if hit[ei] || !rects_overlap(&bounds, &enemy.bounds()) {
                continue;
            }
            enemy.health = enemy.health.saturating_sub(bullet.damage);
            hit[ei] = true;
            spent[bi] = true;
            sparks.push((bullet.x + bullet.w / 2.0, bullet.y));
            break;
        }
    }
    compact(&mut state.bullets, &spent);

    let hit_radius = state.config.explosion.hit_radius;
    for (x, y) in sparks {
        explosion(state, x, y, hit_radius);
        state.events.push(GameEvent::EnemyHit);
    }

    let dead: Vec<bool> = state.enemies.iter().map(|e| e.health == 0).collect();
    let killed: Vec<(EnemyKind, f32, f32)> = state
        .enemies
        .iter()
        .filter(|e| e.health == 0)
        .map(|e| {
            let (cx, cy) = e.bounds().center();
            (e.kind, cx, cy)
        })
        .collect();
    compact(&mut state.enemies, &dead);

    let kill_radius = state.config.explosion.kill_radius;
    for (kind, x, y) in killed {
        state.score += kind.points();
        state.wave.enemies_killed += 1;
        explosion(state, x, y, kill_radius);
        state.events.push(GameEvent::EnemyKilled { kind, x, y });
        if let Some(drop) = roll_power_up_drop(&state.config, x, y, rng) {
            state.power_ups.push(drop);
        }
    }
}

pub fn bullets_vs_boss(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let mut spent = vec![false; state.bullets.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        if boss.is_invincible() || boss.health == 0 {
            break;
        }
        if !rects_overlap(&bullet.bounds(), &boss.bounds()) {
            continue;
        }
        boss.health = boss.health.saturating_sub(bullet.damage);
        boss.invincible_timer = state.config.boss.invincibility_frames;
        spent[bi] = true;
        state.events.push(GameEvent::BossHit {
            health: boss.health,
        });
    }
    compact(&mut state.bullets, &spent);

    if boss.health > 0 {
        return;
    }
    boss.phase = BossPhase::Defeated;
    let (x, y) = boss.bounds().center();
    let level = state.wave.level;
    let radius = state.config.explosion.kill_radius * 3.0;
    state.boss = None;
    state.score += state.config.boss.defeat_bonus * level;
    explosion(state, x, y, radius);
    state.wave.level_clear_timer = Some(state.config.wave.level_clear_frames);
    state.events.push(GameEvent::BossDefeated { level });
    tracing::info!(level, score = state.score, "boss defeated");
}

// ── Hits on the player ───────────────────────────────────────────────────────

/// Apply one hit unless the player is invincible.  Returns whether the hit
/// landed.
fn damage_player(state: &mut GameState) -> bool {
    if state.player.is_invincible() || state.player.health == 0 {
        return false;
    }
    let cfg = &state.config.player;
    state.player.health = state.player.health.saturating_sub(cfg.hit_damage);
    state.player.invincible_timer = cfg.invincibility_frames;
    state.events.push(GameEvent::PlayerHit {
        health: state.player.health,
    });
    true
}

pub fn enemies_vs_player(state: &mut GameState) {
    if state.player.is_invincible() {
        return;
    }
    let player = state.player.bounds();
    let Some(i) = state
        .enemies
        .iter()
        .position(|e| rects_overlap(&player, &e.bounds()))
    else {
        return;
    };
    let (x, y) = state.enemies[i].bounds().center();
    if damage_player(state) {
        state.enemies.remove(i);
        let radius = state.config.explosion.kill_radius;
        explosion(state, x, y, radius);
    }
}

pub fn enemy_bullets_vs_player(state: &mut GameState) {
    if state.player.is_invincible() {
        return;
    }
    let player = state.player.bounds();
    let Some(i) = state
        .enemy_bullets
        .iter()
        .position(|b| rects_overlap(&player, &b.bounds()))
    else {
        return;
    };
    if damage_player(state) {
        state.enemy_bullets.remove(i);
    }
}

pub fn boss_vs_player(state: &mut GameState) {
    let touching = state
        .boss
        .as_ref()
        .is_some_and(|b| rects_overlap(&b.bounds(), &state.player.bounds()));
    if touching {
        damage_player(state);
    }
}

// ── Pickups ──────────────────────────────────────────────────────────────────

pub fn power_ups_vs_player(state: &mut GameState) {
    let player = state.player.bounds();
    let collected: Vec<bool> = state
        .power_ups
        .iter()
        .map(|p| circle_rect_overlap(p.x, p.y, p.radius, &player))
        .collect();
    let kinds: Vec<PowerUpKind> = state
        .power_ups
        .iter()
        .zip(&collected)
        .filter(|(_, c)| **c)
        .map(|(p, _)| p.kind)
        .collect();
    compact(&mut state.power_ups, &collected);

    for kind in kinds {
        apply_power_up(state, kind);
    }
}

pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let cfg = &state.config.player;
    let p = &mut state.player;
    match kind {
        PowerUpKind::Life => {
            p.health = (p.health + cfg.heal_amount).min(p.max_health);
        }
        PowerUpKind::WeaponBoost => {
            p.weapon.kind = p.weapon.kind.upgraded();
            p.weapon.cooldown = 0;
            p.weapon.boost_timer = cfg.boost_frames;
        }
    }
    tracing::debug!(
        ?kind,
        health = p.health,
        weapon = p.weapon.kind.name(),
        "power-up collected"
    );
    state.events.push(GameEvent::PowerUpCollected(kind));
}
