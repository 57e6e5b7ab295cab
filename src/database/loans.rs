//! Loan state: one open loan per user, flat interest, partial repayment.

use super::models::Loan;
use crate::constants::{LOAN_BASE_CAP, LOAN_CAP_PER_LEVEL, LOAN_INTEREST_PCT};
use serenity::model::id::UserId;
use sqlx::{PgPool, Postgres, Transaction};

/// Largest principal a user of `level` may borrow.
pub fn loan_cap(level: i32) -> i64 {
    LOAN_BASE_CAP + LOAN_CAP_PER_LEVEL * level.max(0) as i64
}

/// Outstanding amount owed for a given principal (flat interest).
pub fn with_interest(principal: i64) -> i64 {
    principal + principal * LOAN_INTEREST_PCT / 100
}

pub async fn get_loan(pool: &PgPool, user_id: UserId) -> Result<Option<Loan>, sqlx::Error> {
    sqlx::query_as::<_, Loan>(
        "SELECT user_id, principal, outstanding, taken_at FROM loans WHERE user_id = $1",
    )
    .bind(user_id.get() as i64)
    .fetch_optional(pool)
    .await
}

/// Opens a loan. Fails with `RowNotFound` if one is already open (the command
/// pre-checks, this guards the race).
pub async fn open_loan(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    principal: i64,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO loans (user_id, principal, outstanding, taken_at) VALUES ($1, $2, $3, NOW())
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id.get() as i64)
    .bind(principal)
    .bind(with_interest(principal))
    .execute(&mut **tx)
    .await?;
    if result.rows_affected() == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::RowNotFound)
    }
}

/// Pays `amount` off the outstanding balance, deleting the loan when it hits
/// zero. Returns the remaining balance. Overpayment surfaces as `RowNotFound`
/// (callers clamp to the outstanding amount first).
pub async fn repay_loan(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    amount: i64,
) -> Result<i64, sqlx::Error> {
    let id = user_id.get() as i64;
    let result = sqlx::query(
        "UPDATE loans SET outstanding = outstanding - $2 WHERE user_id = $1 AND outstanding >= $2",
    )
    .bind(id)
    .bind(amount)
    .execute(&mut **tx)
    .await?;
    if result.rows_affected() != 1 {
        return Err(sqlx::Error::RowNotFound);
    }
    let (remaining,): (i64,) =
        sqlx::query_as("SELECT outstanding FROM loans WHERE user_id = $1")
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
    if remaining == 0 {
        sqlx::query("DELETE FROM loans WHERE user_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(remaining)
}
