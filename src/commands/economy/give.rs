use crate::constants::GIVE_COOLDOWN;
use crate::database::economy;
use crate::dispatch::parser::{parse_amount, parse_user_arg};
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::coins;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

pub struct Give;

#[async_trait]
impl ChatCommand for Give {
    fn name(&self) -> &'static str {
        "give"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["pay", "gift"]
    }

    fn usage(&self) -> &'static str {
        "give <@user> <amount>"
    }

    fn description(&self) -> &'static str {
        "Transfers coins from your wallet to another user."
    }

    fn cooldown(&self) -> Duration {
        GIVE_COOLDOWN
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let (Some(target), Some(amount)) = (
            args.first().and_then(|a| parse_user_arg(a)),
            args.get(1).and_then(|a| parse_amount(a)),
        ) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Usage: `{}`",
                self.usage()
            )));
        };
        let target = UserId::new(target);
        if target == msg.author.id {
            return Ok(CommandOutcome::UsageError(
                "You cannot give coins to yourself.".to_string(),
            ));
        }

        let mut tx = app.db.begin().await?;
        // Make sure the recipient row exists before crediting it.
        economy::get_or_create_profile_for_update(&mut tx, target).await?;
        match economy::transfer_wallet(&mut tx, msg.author.id, target, amount).await {
            Ok(()) => tx.commit().await?,
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(
                    "You don't have that much in your wallet.".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        msg.reply(
            &ctx.http,
            format!("You gave {} to <@{}>.", coins(amount), target.get()),
        )
        .await?;
        Ok(CommandOutcome::Done)
    }
}
