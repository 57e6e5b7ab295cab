//! Database functions for the core economy: profiles, wallet/bank balances
//! and transfers between users.

use super::models::Profile;
use crate::constants::STARTING_WALLET;
use serenity::model::id::UserId;
use sqlx::{PgPool, Postgres, Transaction};

const PROFILE_COLUMNS: &str = "user_id, wallet, bank, xp, level, job, work_streak, last_work, last_daily";

/// Fetches a user's profile, creating it with the starting balance on first
/// contact.
pub async fn get_or_create_profile(pool: &PgPool, user_id: UserId) -> Result<Profile, sqlx::Error> {
    let id = user_id.get() as i64;
    sqlx::query("INSERT INTO profiles (user_id, wallet) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
        .bind(id)
        .bind(STARTING_WALLET)
        .execute(pool)
        .await?;
    sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
    ))
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Same as [`get_or_create_profile`] but inside a transaction, locking the
/// row so concurrent settlements serialize.
pub async fn get_or_create_profile_for_update(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> Result<Profile, sqlx::Error> {
    let id = user_id.get() as i64;
    sqlx::query("INSERT INTO profiles (user_id, wallet) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
        .bind(id)
        .bind(STARTING_WALLET)
        .execute(&mut **tx)
        .await?;
    sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_one(&mut **tx)
    .await
}

/// Adds (or subtracts) coins in a user's wallet. Refuses to drive the wallet
/// negative; that case surfaces as `RowNotFound`.
pub async fn add_wallet(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    delta: i64,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        "UPDATE profiles SET wallet = wallet + $2 WHERE user_id = $1 AND wallet + $2 >= 0",
    )
    .bind(user_id.get() as i64)
    .bind(delta)
    .execute(&mut **tx)
    .await?;
    if result.rows_affected() == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::RowNotFound)
    }
}

/// Moves coins from wallet to bank (positive `amount`) in one conditional
/// update.
pub async fn deposit(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    amount: i64,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        "UPDATE profiles SET wallet = wallet - $2, bank = bank + $2 WHERE user_id = $1 AND wallet >= $2",
    )
    .bind(user_id.get() as i64)
    .bind(amount)
    .execute(&mut **tx)
    .await?;
    if result.rows_affected() == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::RowNotFound)
    }
}

/// Moves coins from bank back to wallet.
pub async fn withdraw(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    amount: i64,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        "UPDATE profiles SET wallet = wallet + $2, bank = bank - $2 WHERE user_id = $1 AND bank >= $2",
    )
    .bind(user_id.get() as i64)
    .bind(amount)
    .execute(&mut **tx)
    .await?;
    if result.rows_affected() == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::RowNotFound)
    }
}

/// Wallet-to-wallet transfer between two users (give, rob proceeds, wager
/// settlement). Deducts conditionally first so the credit never happens
/// without the debit.
pub async fn transfer_wallet(
    tx: &mut Transaction<'_, Postgres>,
    from: UserId,
    to: UserId,
    amount: i64,
) -> Result<(), sqlx::Error> {
    add_wallet(tx, from, -amount).await?;
    add_wallet(tx, to, amount).await
}

/// Credits the daily stipend iff the claim window has elapsed, stamping
/// `last_daily` in the same conditional update so two near-simultaneous
/// claims cannot both land. Returns whether the claim happened.
pub async fn claim_daily(
    pool: &PgPool,
    user_id: UserId,
    amount: i64,
    interval_hours: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE profiles SET wallet = wallet + $2, last_daily = NOW() \
         WHERE user_id = $1 \
           AND (last_daily IS NULL OR last_daily <= NOW() - make_interval(hours => $3))",
    )
    .bind(user_id.get() as i64)
    .bind(amount)
    .bind(interval_hours)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Top profiles by combined wallet + bank, for the leaderboard.
pub async fn top_balances(pool: &PgPool, limit: i64) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT user_id, wallet + bank AS total FROM profiles ORDER BY total DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
