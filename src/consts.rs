/// Highest enhancement level a core can reach.
pub const MAX_LEVEL: u8 = 15;

/// Levels gained by one enhancement application.
/// Every application adds one more roll to a single sub-stat.
pub const LEVEL_STEP: u8 = 3;

/// Upper bound for the per-sub-stat enhancement counter accepted as input.
pub const MAX_UPGRADE_COUNT: u8 = 7;

/// A core carries between two and four sub-stats.
pub const MIN_SUB_STATS: usize = 2;
pub const MAX_SUB_STATS: usize = 4;

/// Upper bound of every importance weight and quality score.
pub const SCORE_CEILING: f64 = 100.0;

// Rank label thresholds (inclusive lower bounds).
pub const RANK_GRADUATE: u8 = 95;
pub const RANK_TOP_TIER: u8 = 85;
pub const RANK_EXCELLENT: u8 = 75;
pub const RANK_ABOVE_AVERAGE: u8 = 60;
pub const RANK_BRIDGE: u8 = 40;
