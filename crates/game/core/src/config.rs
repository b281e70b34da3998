/// Game configuration constants and tunable parameters.
///
/// Every field has a default so partial TOML files only need to name the
/// values they override.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Width of the world's tile map.
    pub map_width: u32,
    /// Height of the world's tile map.
    pub map_height: u32,
    /// Upper bound on attempts within one decision, alternates included.
    /// Exceeding it forfeits the entity's turn.
    pub max_action_tries: u32,
    /// Hit points removed from the target of an attack.
    pub attack_damage: u32,
    /// Stamina spent by the attacker on every attack.
    pub attack_stamina_cost: u32,
    /// Stamina required (and spent) to dodge.
    pub dodge_stamina_cost: u32,
    /// Number of tiles covered by a successful dodge.
    pub dodge_stride: i32,
    /// Seed for the world's random source. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub const DEFAULT_MAP_WIDTH: u32 = 10;
    pub const DEFAULT_MAP_HEIGHT: u32 = 10;
    pub const DEFAULT_MAX_ACTION_TRIES: u32 = 10;
    pub const DEFAULT_ATTACK_DAMAGE: u32 = 1;
    pub const DEFAULT_ATTACK_STAMINA_COST: u32 = 1;
    pub const DEFAULT_DODGE_STAMINA_COST: u32 = 1;
    pub const DEFAULT_DODGE_STRIDE: i32 = 2;

    pub fn new() -> Self {
        Self {
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            max_action_tries: Self::DEFAULT_MAX_ACTION_TRIES,
            attack_damage: Self::DEFAULT_ATTACK_DAMAGE,
            attack_stamina_cost: Self::DEFAULT_ATTACK_STAMINA_COST,
            dodge_stamina_cost: Self::DEFAULT_DODGE_STAMINA_COST,
            dodge_stride: Self::DEFAULT_DODGE_STRIDE,
            seed: None,
        }
    }

    pub fn with_map_size(mut self, width: u32, height: u32) -> Self {
        self.map_width = width;
        self.map_height = height;
        self
    }

    pub fn with_max_action_tries(mut self, max_action_tries: u32) -> Self {
        self.max_action_tries = max_action_tries;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
