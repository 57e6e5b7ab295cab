//! `loan` and `repay`: one open loan per user, cap scaling with level, flat
//! interest baked into the outstanding balance at open time.

use crate::database::loans::{self, loan_cap, with_interest};
use crate::database::economy;
use crate::dispatch::parser::parse_amount;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::coins;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

pub struct Loan;

#[async_trait]
impl ChatCommand for Loan {
    fn name(&self) -> &'static str {
        "loan"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["borrow"]
    }

    fn usage(&self) -> &'static str {
        "loan <amount>"
    }

    fn description(&self) -> &'static str {
        "Borrows coins against your level (10% interest, one loan at a time)."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let Some(amount) = args.first().and_then(|a| parse_amount(a)) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Usage: `{}`",
                self.usage()
            )));
        };

        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        let cap = loan_cap(profile.level);
        if amount > cap {
            return Ok(CommandOutcome::UsageError(format!(
                "At level {} you can borrow at most {}.",
                profile.level,
                coins(cap)
            )));
        }
        if loans::get_loan(&app.db, msg.author.id).await?.is_some() {
            return Ok(CommandOutcome::UsageError(
                "You already have an open loan. `repay` it first.".to_string(),
            ));
        }

        let mut tx = app.db.begin().await?;
        match loans::open_loan(&mut tx, msg.author.id, amount).await {
            Ok(()) => {}
            Err(sqlx::Error::RowNotFound) => {
                // Raced a concurrent loan open.
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(
                    "You already have an open loan. `repay` it first.".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }
        economy::add_wallet(&mut tx, msg.author.id, amount).await?;
        tx.commit().await?;

        msg.reply(
            &ctx.http,
            format!(
                "Loan approved: {} in your wallet, {} to repay.",
                coins(amount),
                coins(with_interest(amount))
            ),
        )
        .await?;
        Ok(CommandOutcome::Done)
    }
}

pub struct Repay;

#[async_trait]
impl ChatCommand for Repay {
    fn name(&self) -> &'static str {
        "repay"
    }

    fn usage(&self) -> &'static str {
        "repay [amount]"
    }

    fn description(&self) -> &'static str {
        "Pays your loan down (everything you can, or a given amount)."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let Some(loan) = loans::get_loan(&app.db, msg.author.id).await? else {
            return Ok(CommandOutcome::UsageError(
                "You have no open loan.".to_string(),
            ));
        };
        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;

        let requested = match args.first() {
            Some(raw) => match parse_amount(raw) {
                Some(amount) => amount,
                None => {
                    return Ok(CommandOutcome::UsageError(format!(
                        "Usage: `{}`",
                        self.usage()
                    )))
                }
            },
            None => loan.outstanding,
        };
        let payment = requested.min(loan.outstanding).min(profile.wallet);
        if payment <= 0 {
            return Ok(CommandOutcome::UsageError(
                "Your wallet is empty; earn some coins first.".to_string(),
            ));
        }

        let mut tx = app.db.begin().await?;
        match economy::add_wallet(&mut tx, msg.author.id, -payment).await {
            Ok(()) => {}
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(
                    "Your wallet can't cover that payment.".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }
        let remaining = loans::repay_loan(&mut tx, msg.author.id, payment).await?;
        tx.commit().await?;

        let text = if remaining == 0 {
            format!("You paid {} and cleared your loan. 🎉", coins(payment))
        } else {
            format!(
                "You paid {}; {} still outstanding.",
                coins(payment),
                coins(remaining)
            )
        };
        msg.reply(&ctx.http, text).await?;
        Ok(CommandOutcome::Done)
    }
}
