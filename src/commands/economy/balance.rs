use crate::database::{economy, loans};
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{COLOR_GOLD, EMOJI_BANK, EMOJI_COIN};
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

pub struct Balance;

#[async_trait]
impl ChatCommand for Balance {
    fn name(&self) -> &'static str {
        "balance"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["bal", "b"]
    }

    fn usage(&self) -> &'static str {
        "balance"
    }

    fn description(&self) -> &'static str {
        "Shows your wallet and bank balances."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        let loan = loans::get_loan(&app.db, msg.author.id).await?;

        let mut embed = CreateEmbed::new()
            .title(format!("{}'s balance", msg.author.name))
            .field(format!("{EMOJI_COIN} Wallet"), profile.wallet.to_string(), true)
            .field(format!("{EMOJI_BANK} Bank"), profile.bank.to_string(), true)
            .field("Total", profile.total().to_string(), true)
            .color(COLOR_GOLD);
        if let Some(loan) = loan {
            embed = embed.field("Loan outstanding", loan.outstanding.to_string(), true);
        }

        msg.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;
        Ok(CommandOutcome::Done)
    }
}
