//! Game mechanics: player stats and how scripts modify them.

use serde::{Deserialize, Serialize};

/// Stats a script can read or modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Health,
    MaxHealth,
    Strength,
    Agility,
    Wisdom,
    Charisma,
}

impl StatKind {
    /// Parse the authored stat name used in node properties.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "health" | "hp" => Some(StatKind::Health),
            "max_health" | "max_hp" => Some(StatKind::MaxHealth),
            "strength" => Some(StatKind::Strength),
            "agility" => Some(StatKind::Agility),
            "wisdom" => Some(StatKind::Wisdom),
            "charisma" => Some(StatKind::Charisma),
            _ => None,
        }
    }
}

/// The player's stat block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub agility: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 10,
            max_health: 10,
            strength: 10,
            agility: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl PlayerStats {
    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Health => self.health,
            StatKind::MaxHealth => self.max_health,
            StatKind::Strength => self.strength,
            StatKind::Agility => self.agility,
            StatKind::Wisdom => self.wisdom,
            StatKind::Charisma => self.charisma,
        }
    }

    /// Add `delta` to a stat.
    ///
    /// Health is clamped to `0..=max_health`; lowering max health drags health down with it.
    pub fn modify(&mut self, stat: StatKind, delta: i32) {
        match stat {
            StatKind::Health => {
                self.health = self.health.saturating_add(delta).clamp(0, self.max_health);
            }
            StatKind::MaxHealth => {
                self.max_health = self.max_health.saturating_add(delta).max(1);
                self.health = self.health.min(self.max_health);
            }
            StatKind::Strength => self.strength = self.strength.saturating_add(delta),
            StatKind::Agility => self.agility = self.agility.saturating_add(delta),
            StatKind::Wisdom => self.wisdom = self.wisdom.saturating_add(delta),
            StatKind::Charisma => self.charisma = self.charisma.saturating_add(delta),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
