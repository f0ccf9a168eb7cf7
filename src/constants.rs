pub const ARENA_SIZE: u8 = 28;
pub const HALF_ARENA: u8 = 14;

/// Number of opening path points ignored when scoring a full wave. Those
/// points sit next to the player's own edge and are never in enemy range.
pub const FULL_WAVE_SKIP_PREFIX: usize = 8;

/// Interceptors only live long enough to matter for the first few steps.
pub const INTERCEPTOR_PATH_CAP: usize = 10;

/// An interceptor lane whose capped risk is below this is taken immediately.
pub const INTERCEPTOR_SAFE_BELOW: f64 = 10.0;

pub const WALL_COST: f64 = 1.0;
pub const WALL_UPGRADE_COST: f64 = 1.5;
pub const WALL_HEALTH: f64 = 60.0;
pub const WALL_UPGRADED_HEALTH: f64 = 120.0;

pub const SUPPORT_COST: f64 = 4.0;
pub const SUPPORT_UPGRADE_COST: f64 = 4.0;
pub const SUPPORT_HEALTH: f64 = 30.0;

pub const TURRET_COST: f64 = 2.0;
pub const TURRET_UPGRADE_COST: f64 = 4.0;
pub const TURRET_HEALTH: f64 = 75.0;
pub const TURRET_DAMAGE: f64 = 5.0;
pub const TURRET_RANGE: f64 = 2.5;
pub const TURRET_UPGRADED_RANGE: f64 = 3.5;

pub const SCOUT_COST: f64 = 1.0;
pub const SCOUT_HEALTH: f64 = 15.0;
pub const SCOUT_DAMAGE: f64 = 2.0;

pub const DEMOLISHER_COST: f64 = 3.0;
pub const DEMOLISHER_HEALTH: f64 = 5.0;
pub const DEMOLISHER_DAMAGE: f64 = 8.0;

pub const INTERCEPTOR_COST: f64 = 1.0;
pub const INTERCEPTOR_HEALTH: f64 = 40.0;
pub const INTERCEPTOR_DAMAGE: f64 = 20.0;

/// Largest escort group a single wave may carry.
pub const MAX_ESCORTS: u32 = 7;
