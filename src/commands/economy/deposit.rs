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

pub struct Deposit;

#[async_trait]
impl ChatCommand for Deposit {
    fn name(&self) -> &'static str {
        "deposit"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["dep"]
    }

    fn usage(&self) -> &'static str {
        "deposit <amount|all>"
    }

    fn description(&self) -> &'static str {
        "Moves coins from your wallet into the bank, out of robbers' reach."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        let amount = match args.first().map(String::as_str) {
            Some("all") => profile.wallet,
            Some(raw) => match parse_amount(raw) {
                Some(amount) => amount,
                None => {
                    return Ok(CommandOutcome::UsageError(format!(
                        "Usage: `{}`",
                        self.usage()
                    )))
                }
            },
            None => {
                return Ok(CommandOutcome::UsageError(format!(
                    "Usage: `{}`",
                    self.usage()
                )))
            }
        };
        if amount <= 0 {
            return Ok(CommandOutcome::UsageError(
                "You have nothing in your wallet to deposit.".to_string(),
            ));
        }

        let mut tx = app.db.begin().await?;
        match economy::deposit(&mut tx, msg.author.id, amount).await {
            Ok(()) => tx.commit().await?,
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(format!(
                    "Your wallet only holds {}.",
                    coins(profile.wallet)
                )));
            }
            Err(e) => return Err(e.into()),
        }

        msg.reply(&ctx.http, format!("Deposited {} into your bank.", coins(amount)))
            .await?;
        Ok(CommandOutcome::Done)
    }
}
