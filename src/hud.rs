/// Formatted HUD strings, rebuilt from the session state after each tick.

use crate::entities::GameState;

#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    pub score: String,
    pub health: String,
    pub level: String,
    pub weapon: String,
    pub enemies_remaining: String,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        let p = &state.player;
        let health_pct = u64::from(p.health) * 100 / u64::from(p.max_health.max(1));
        let weapon = if p.weapon.boost_timer > 0 {
            format!(
                "Weapon: {} ({}s)",
                p.weapon.kind.name(),
                p.weapon.boost_timer / 60 + 1
            )
        } else {
            format!("Weapon: {}", p.weapon.kind.name())
        };
        let enemies_remaining = match (&state.boss, state.wave.level_clear_timer) {
            (Some(boss), _) => format!("Boss: {}/{}", boss.health, boss.max_health),
            (None, Some(_)) => "Level clear!".to_string(),
            (None, None) => format!("Enemies: {}", state.wave.enemies_remaining()),
        };

        HudText {
            score: format!("Score: {}", state.score),
            health: format!("Health: {}%", health_pct),
            level: format!("Level: {}", state.wave.level),
            weapon,
            enemies_remaining,
        }
    }
}
