//! Jobs and leveling: the job catalog, the xp curve and the `work` settlement.

use super::models::Profile;
use chrono::{Duration as ChronoDuration, Utc};
use serenity::model::id::UserId;
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Debug, Clone, Copy)]
pub struct JobSpec {
    pub name: &'static str,
    pub min_wage: i64,
    pub max_wage: i64,
    pub xp: i64,
    pub unlock_level: i32,
}

pub const JOBS: &[JobSpec] = &[
    JobSpec { name: "janitor", min_wage: 30, max_wage: 60, xp: 10, unlock_level: 0 },
    JobSpec { name: "fisher", min_wage: 50, max_wage: 110, xp: 15, unlock_level: 2 },
    JobSpec { name: "miner", min_wage: 80, max_wage: 170, xp: 20, unlock_level: 5 },
    JobSpec { name: "croupier", min_wage: 120, max_wage: 260, xp: 25, unlock_level: 8 },
    JobSpec { name: "hacker", min_wage: 200, max_wage: 420, xp: 35, unlock_level: 12 },
];

pub fn find_job(name: &str) -> Option<&'static JobSpec> {
    let wanted = name.to_lowercase();
    JOBS.iter().find(|job| job.name == wanted)
}

/// Xp needed to go from `level` to `level + 1`.
pub fn xp_to_next(level: i32) -> i64 {
    (level as i64 * 100).max(100)
}

/// Folds an xp gain into (level, xp), consuming whole levels as thresholds
/// are crossed. Returns the new pair and whether any level-up happened.
pub fn apply_xp(level: i32, xp: i64, gained: i64) -> (i32, i64, bool) {
    let mut level = level;
    let mut xp = xp + gained.max(0);
    let mut leveled = false;
    while xp >= xp_to_next(level) {
        xp -= xp_to_next(level);
        level += 1;
        leveled = true;
    }
    (level, xp, leveled)
}

/// Wage after the work-streak bonus: +5% per consecutive day, capped at +50%.
pub fn streak_bonus(base: i64, streak: i32) -> i64 {
    base + base * (streak.clamp(0, 10) as i64) * 5 / 100
}

pub async fn set_job(pool: &PgPool, user_id: UserId, job: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET job = $2 WHERE user_id = $1")
        .bind(user_id.get() as i64)
        .bind(job)
        .execute(pool)
        .await?;
    Ok(())
}

pub struct WorkSettlement {
    pub earned: i64,
    pub new_streak: i32,
    pub new_level: Option<i32>,
}

/// Applies one shift: credits the wage (with streak bonus), advances the
/// streak or resets it after a missed day, and folds in the xp gain. The
/// caller already rolled `base_wage` and verified the work cooldown.
pub async fn record_work(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    profile: &Profile,
    base_wage: i64,
    xp_gain: i64,
) -> Result<WorkSettlement, sqlx::Error> {
    let new_streak = match profile.last_work {
        Some(last) if Utc::now() - last < ChronoDuration::hours(36) => profile.work_streak + 1,
        _ => 1,
    };
    let earned = streak_bonus(base_wage, new_streak);
    let (level, xp, leveled) = apply_xp(profile.level, profile.xp, xp_gain);

    sqlx::query(
        "UPDATE profiles SET wallet = wallet + $2, xp = $3, level = $4, work_streak = $5, last_work = NOW() WHERE user_id = $1",
    )
    .bind(user_id.get() as i64)
    .bind(earned)
    .bind(xp)
    .bind(level)
    .bind(new_streak)
    .execute(&mut **tx)
    .await?;

    Ok(WorkSettlement {
        earned,
        new_streak,
        new_level: leveled.then_some(level),
    })
}
