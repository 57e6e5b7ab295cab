//! Row types mapped straight off the tables.

use chrono::{DateTime, Utc};

/// One row of `profiles`: the two-tier balance (wallet is exposed to robbery,
/// bank is not), leveling state and job assignment.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub wallet: i64,
    pub bank: i64,
    pub xp: i64,
    pub level: i32,
    pub job: Option<String>,
    pub work_streak: i32,
    pub last_work: Option<DateTime<Utc>>,
    pub last_daily: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn total(&self) -> i64 {
        self.wallet + self.bank
    }
}

/// One open loan per user. `outstanding` includes interest.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Loan {
    pub user_id: i64,
    pub principal: i64,
    pub outstanding: i64,
    pub taken_at: DateTime<Utc>,
}
