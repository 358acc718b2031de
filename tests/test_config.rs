use std::io::Write;

use astro_strike::config::GameConfig;
use astro_strike::entities::Difficulty;
use astro_strike::error::GameError;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_are_valid() {
    let cfg = GameConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.playfield.width, 800.0);
    assert_eq!(cfg.playfield.height, 600.0);
    assert_eq!(cfg.wave.max_level, 5);
}

#[test]
fn partial_file_fills_in_defaults() {
    let file = write_config(r#"{ "player": { "speed": 9.0 }, "wave": { "max_level": 2 } }"#);
    let cfg = GameConfig::load(file.path()).unwrap();
    assert_eq!(cfg.player.speed, 9.0);
    assert_eq!(cfg.player.max_health, 100);
    assert_eq!(cfg.wave.max_level, 2);
    assert_eq!(cfg.boss, GameConfig::default().boss);
}

#[test]
fn malformed_file_is_a_json_error() {
    let file = write_config("{ player: ");
    assert!(matches!(GameConfig::load(file.path()), Err(GameError::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = GameConfig::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(GameError::Io(_))));
}

#[test]
fn empty_playfield_is_rejected() {
    let file = write_config(r#"{ "playfield": { "width": 0.0 } }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(GameError::Config(_))));
}

#[test]
fn probabilities_outside_unit_range_are_rejected() {
    let mut cfg = GameConfig::default();
    cfg.enemy.elite_chance = 1.5;
    assert!(matches!(cfg.validate(), Err(GameError::Config(_))));

    let mut cfg = GameConfig::default();
    cfg.power_up.drop_chance = -0.1;
    assert!(cfg.validate().is_err());
}

#[test]
fn zero_counts_are_rejected() {
    let mut cfg = GameConfig::default();
    cfg.boss.ring_bullets = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = GameConfig::default();
    cfg.wave.max_level = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = GameConfig::default();
    cfg.enemy.elite_health = 0;
    assert!(matches!(cfg.validate(), Err(GameError::Config(_))));

    let mut cfg = GameConfig::default();
    cfg.boss.base_health = 0;
    assert!(matches!(cfg.validate(), Err(GameError::Config(_))));
}

#[test]
fn zero_health_elites_cannot_be_loaded() {
    let file = write_config(r#"{ "enemy": { "elite_health": 0, "elite_chance": 1.0 } }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(GameError::Config(_))));
}

#[test]
fn difficulty_tunes_spawn_rate_and_health() {
    let cfg = GameConfig::default();

    let easy = cfg.tuned_for(&Difficulty::Easy);
    assert_eq!(easy.enemy.base_spawn_interval, 90);
    assert_eq!(easy.player.max_health, 150);

    let medium = cfg.tuned_for(&Difficulty::Medium);
    assert_eq!(medium, cfg);

    let hard = cfg.tuned_for(&Difficulty::Hard);
    assert_eq!(hard.enemy.base_spawn_interval, 36);
    assert_eq!(hard.enemy.min_spawn_interval, 9);
    assert_eq!(hard.player.max_health, 70);
}
