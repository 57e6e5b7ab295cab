// Central constants for gate windows, game tuning and economy limits.

use std::time::Duration;

// Gate windows.
pub const DICE_COOLDOWN: Duration = Duration::from_secs(15);
pub const ROULETTE_COOLDOWN: Duration = Duration::from_secs(15);
pub const DIG_COOLDOWN: Duration = Duration::from_secs(60);
pub const ROB_COOLDOWN: Duration = Duration::from_secs(120);
pub const WORK_COOLDOWN: Duration = Duration::from_secs(60);
pub const GIVE_COOLDOWN: Duration = Duration::from_secs(10);

/// TTL of an exclusive wager session; bounds how long a crashed handler can
/// block the user's slot.
pub const WAGER_SESSION_TTL: Duration = Duration::from_secs(60);
/// Wall-clock window the challenged user has to accept or decline.
pub const WAGER_DECISION_WINDOW: Duration = Duration::from_secs(30);

/// Protection window armed on a robbery victim.
pub const ROB_SHIELD_TTL: Duration = Duration::from_secs(30 * 60);

// Flavor delays (plain timed waits, not cancellable).
pub const DICE_ROLL_DELAY: Duration = Duration::from_secs(2);
pub const ROULETTE_SPIN_DELAY: Duration = Duration::from_secs(3);
pub const DIG_DELAY: Duration = Duration::from_secs(2);

// Economy tuning.
pub const STARTING_WALLET: i64 = 250;
pub const DAILY_AMOUNT: i64 = 200;
pub const DAILY_INTERVAL_HOURS: i64 = 20;
pub const DICE_PAYOUT_MULTIPLIER: i64 = 6;
pub const LOAN_BASE_CAP: i64 = 500;
pub const LOAN_CAP_PER_LEVEL: i64 = 250;
pub const LOAN_INTEREST_PCT: i64 = 10;
