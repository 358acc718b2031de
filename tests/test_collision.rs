use astro_strike::compute::collision::*;
use astro_strike::compute::init_state;
use astro_strike::compute::spawn::roll_power_up_drop;
use astro_strike::config::GameConfig;
use astro_strike::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let mut s = init_state(Difficulty::Medium, &GameConfig::default(), 0);
    s.config.power_up.drop_chance = 0.0;
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet {
        x,
        y,
        w: 6.0,
        h: 15.0,
        vx: 0.0,
        vy: -8.0,
        damage: 1,
    }
}

fn enemy_at(x: f32, y: f32, kind: EnemyKind, health: u32) -> Enemy {
    let size = if kind == EnemyKind::Elite { 50.0 } else { 40.0 };
    Enemy {
        x,
        y,
        w: size,
        h: size,
        speed: 1.0,
        health,
        max_health: health,
        kind,
        shoot_cooldown: 100,
        shoot_interval: 100,
    }
}

/// Boss already in its arena, parked at the top centre.
fn parked_boss(s: &GameState) -> Boss {
    let mut boss = Boss::spawn(s.wave.level, &s.config.boss, s.width());
    boss.y = 60.0;
    boss.phase = BossPhase::Lateral;
    boss
}

// ── Player bullets vs enemies ─────────────────────────────────────────────────

#[test]
fn bullet_kills_normal_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Normal, 1));
    s.bullets.push(bullet_at(115.0, 120.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 20);
    assert_eq!(s.wave.enemies_killed, 1);
    // One spark for the hit, one blast for the kill
    assert_eq!(s.explosions.len(), 2);
    assert!(s.events.contains(&GameEvent::EnemyHit));
    assert!(s.events.contains(&GameEvent::EnemyKilled {
        kind: EnemyKind::Normal,
        x: 120.0,
        y: 120.0,
    }));
}

#[test]
fn elite_survives_a_single_hit() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Elite, 3));
    s.bullets.push(bullet_at(120.0, 120.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].health, 2);
    assert_eq!(s.score, 0);
    assert_eq!(s.wave.enemies_killed, 0);
}

#[test]
fn elite_kill_scores_fifty() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Elite, 1));
    s.bullets.push(bullet_at(120.0, 120.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 50);
}

#[test]
fn one_bullet_damages_only_one_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Normal, 1));
    s.enemies.push(enemy_at(105.0, 105.0, EnemyKind::Normal, 1));
    s.bullets.push(bullet_at(115.0, 120.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.score, 20);
}

#[test]
fn enemy_takes_one_hit_per_scan() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Elite, 3));
    s.bullets.push(bullet_at(110.0, 110.0));
    s.bullets.push(bullet_at(120.0, 110.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert_eq!(s.enemies[0].health, 2);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].x, 120.0);
}

#[test]
fn adjacent_kills_in_one_scan_are_all_removed() {
    let mut s = make_state();
    for i in 0..3 {
        let x = 100.0 + i as f32 * 45.0;
        s.enemies.push(enemy_at(x, 100.0, EnemyKind::Normal, 1));
        s.bullets.push(bullet_at(x + 15.0, 120.0));
    }

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 60);
    assert_eq!(s.wave.enemies_killed, 3);
}

#[test]
fn missing_bullets_are_kept() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Normal, 1));
    s.bullets.push(bullet_at(400.0, 120.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.bullets.len(), 1);
    assert!(s.events.is_empty());
}

#[test]
fn kill_drops_power_up_when_chance_is_certain() {
    let mut s = make_state();
    s.config.power_up.drop_chance = 1.0;
    s.enemies.push(enemy_at(100.0, 100.0, EnemyKind::Normal, 1));
    s.bullets.push(bullet_at(115.0, 120.0));

    bullets_vs_enemies(&mut s, &mut seeded_rng());

    assert_eq!(s.power_ups.len(), 1);
    assert_eq!(s.power_ups[0].x, 120.0);
    assert_eq!(s.power_ups[0].y, 120.0);
}

#[test]
fn drop_roll_respects_chance() {
    let mut cfg = GameConfig::default();
    let mut rng = seeded_rng();
    cfg.power_up.drop_chance = 0.0;
    assert!((0..100).all(|_| roll_power_up_drop(&cfg, 0.0, 0.0, &mut rng).is_none()));
    cfg.power_up.drop_chance = 1.0;
    assert!((0..100).all(|_| roll_power_up_drop(&cfg, 0.0, 0.0, &mut rng).is_some()));
}

// ── Player bullets vs boss ────────────────────────────────────────────────────

#[test]
fn boss_hit_starts_invincibility() {
    let mut s = make_state();
    s.boss = Some(parked_boss(&s));
    s.bullets.push(bullet_at(400.0, 100.0));
    s.bullets.push(bullet_at(410.0, 100.0));

    bullets_vs_boss(&mut s);

    let boss = s.boss.as_ref().unwrap();
    assert_eq!(boss.health, boss.max_health - 1);
    assert_eq!(boss.invincible_timer, 5);
    // Second bullet passes through the invincibility window untouched
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(
        s.events,
        vec![GameEvent::BossHit {
            health: boss.max_health - 1
        }]
    );
}

#[test]
fn invincible_boss_ignores_bullets() {
    let mut s = make_state();
    let mut boss = parked_boss(&s);
    boss.invincible_timer = 3;
    let health = boss.health;
    s.boss = Some(boss);
    s.bullets.push(bullet_at(400.0, 100.0));

    bullets_vs_boss(&mut s);

    assert_eq!(s.boss.as_ref().unwrap().health, health);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn boss_defeat_clears_level() {
    let mut s = make_state();
    s.wave.level = 2;
    s.wave.boss_spawned = true;
    let mut boss = parked_boss(&s);
    boss.health = 1;
    s.boss = Some(boss);
    s.bullets.push(bullet_at(400.0, 100.0));

    bullets_vs_boss(&mut s);

    assert!(s.boss.is_none());
    assert_eq!(s.score, 1000);
    assert_eq!(s.wave.level_clear_timer, Some(120));
    assert!(s.events.contains(&GameEvent::BossDefeated { level: 2 }));
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.explosions[0].radius, 60.0);
}

// ── Hits on the player ────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_damages_player() {
    let mut s = make_state();
    s.enemy_bullets.push(Bullet {
        x: 390.0,
        y: 530.0,
        w: 8.0,
        h: 8.0,
        vx: 0.0,
        vy: 4.0,
        damage: 1,
    });

    enemy_bullets_vs_player(&mut s);

    assert_eq!(s.player.health, 90);
    assert_eq!(s.player.invincible_timer, 60);
    assert!(s.enemy_bullets.is_empty());
    assert_eq!(s.events, vec![GameEvent::PlayerHit { health: 90 }]);
}

#[test]
fn invincible_player_takes_no_damage() {
    let mut s = make_state();
    s.player.invincible_timer = 10;
    s.enemies.push(enemy_at(380.0, 520.0, EnemyKind::Normal, 1));
    s.enemy_bullets.push(bullet_at(390.0, 530.0));
    s.boss = Some({
        let mut b = parked_boss(&s);
        b.y = 500.0;
        b
    });

    enemies_vs_player(&mut s);
    enemy_bullets_vs_player(&mut s);
    boss_vs_player(&mut s);

    assert_eq!(s.player.health, 100);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemy_bullets.len(), 1);
    assert!(s.events.is_empty());
}

#[test]
fn ramming_enemy_is_destroyed_without_score() {
    let mut s = make_state();
    s.enemies.push(enemy_at(380.0, 520.0, EnemyKind::Normal, 1));

    enemies_vs_player(&mut s);

    assert!(s.enemies.is_empty());
    assert_eq!(s.player.health, 90);
    assert_eq!(s.score, 0);
    assert_eq!(s.wave.enemies_killed, 0);
    assert_eq!(s.explosions.len(), 1);
}

#[test]
fn one_hit_per_frame_from_overlapping_sources() {
    let mut s = make_state();
    s.enemies.push(enemy_at(380.0, 520.0, EnemyKind::Normal, 1));
    s.enemy_bullets.push(bullet_at(390.0, 530.0));

    resolve_collisions(&mut s, &mut seeded_rng());

    assert_eq!(s.player.health, 90);
    // The bullet stays; the player was already invincible when it was checked
    assert_eq!(s.enemy_bullets.len(), 1);
}

#[test]
fn boss_contact_damages_player() {
    let mut s = make_state();
    let mut boss = parked_boss(&s);
    boss.x = 350.0;
    boss.y = 480.0;
    s.boss = Some(boss);

    boss_vs_player(&mut s);

    assert_eq!(s.player.health, 90);
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn life_power_up_heals_up_to_max() {
    let mut s = make_state();
    s.player.health = 95;
    s.power_ups.push(PowerUp {
        x: 400.0,
        y: 545.0,
        radius: 12.0,
        kind: PowerUpKind::Life,
    });

    power_ups_vs_player(&mut s);

    assert!(s.power_ups.is_empty());
    assert_eq!(s.player.health, 100);
    assert_eq!(
        s.events,
        vec![GameEvent::PowerUpCollected(PowerUpKind::Life)]
    );
}

#[test]
fn weapon_boost_upgrades_and_rearms() {
    let mut s = make_state();
    s.player.weapon.cooldown = 9;

    apply_power_up(&mut s, PowerUpKind::WeaponBoost);

    assert_eq!(s.player.weapon.kind, WeaponKind::Double);
    assert_eq!(s.player.weapon.cooldown, 0);
    assert_eq!(s.player.weapon.boost_timer, 600);

    apply_power_up(&mut s, PowerUpKind::WeaponBoost);
    apply_power_up(&mut s, PowerUpKind::WeaponBoost);
    assert_eq!(s.player.weapon.kind, WeaponKind::Spread);
}

#[test]
fn distant_power_up_is_left_alone() {
    let mut s = make_state();
    s.power_ups.push(PowerUp {
        x: 100.0,
        y: 100.0,
        radius: 12.0,
        kind: PowerUpKind::WeaponBoost,
    });

    power_ups_vs_player(&mut s);

    assert_eq!(s.power_ups.len(), 1);
    assert_eq!(s.player.weapon.kind, WeaponKind::Single);
}
