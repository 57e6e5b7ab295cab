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

pub struct Withdraw;

#[async_trait]
impl ChatCommand for Withdraw {
    fn name(&self) -> &'static str {
        "withdraw"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["wd", "with"]
    }

    fn usage(&self) -> &'static str {
        "withdraw <amount|all>"
    }

    fn description(&self) -> &'static str {
        "Moves coins from your bank back into your wallet."
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
            Some("all") => profile.bank,
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
                "Your bank is empty.".to_string(),
            ));
        }

        let mut tx = app.db.begin().await?;
        match economy::withdraw(&mut tx, msg.author.id, amount).await {
            Ok(()) => tx.commit().await?,
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(format!(
                    "Your bank only holds {}.",
                    coins(profile.bank)
                )));
            }
            Err(e) => return Err(e.into()),
        }

        msg.reply(
            &ctx.http,
            format!("Withdrew {} into your wallet.", coins(amount)),
        )
        .await?;
        Ok(CommandOutcome::Done)
    }
}
