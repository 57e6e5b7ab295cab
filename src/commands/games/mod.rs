//! Gambling commands. Shared rule: the bet is deducted up front in its own
//! transaction, then the outcome settles in a second one; if settlement
//! fails, the bet is refunded before the error propagates.

pub mod dice;
pub mod dig;
pub mod rob;
pub mod roulette;
pub mod wager;

use crate::database::economy;
use serenity::model::id::UserId;
use sqlx::PgPool;

/// Best-effort compensation: puts `amount` back into `user`'s wallet after a
/// settlement failure. Its own failure is only logged; the original error is
/// what the caller reports.
pub(crate) async fn refund_wallet(pool: &PgPool, user: UserId, amount: i64) {
    let result = async {
        let mut tx = pool.begin().await?;
        economy::add_wallet(&mut tx, user, amount).await?;
        tx.commit().await
    }
    .await;
    if let Err(e) = result {
        tracing::error!(user = user.get(), amount, error = %e, "failed to refund bet");
    }
}
