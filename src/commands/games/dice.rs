//! `dice <face> <bet>`: call a face, roll one die, win 6x your bet on a hit.

use super::refund_wallet;
use crate::constants::{DICE_COOLDOWN, DICE_PAYOUT_MULTIPLIER, DICE_ROLL_DELAY};
use crate::database::economy;
use crate::dispatch::parser::parse_amount;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, COLOR_LOSS, COLOR_WIN, EMOJI_DICE};
use async_trait::async_trait;
use rand::Rng;
use serenity::builder::{CreateEmbed, CreateMessage, EditMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

/// Total returned to the player for a called face, a rolled face and a bet.
/// Zero on a miss; the stake is already gone by the time this is applied.
pub fn dice_payout(called: u8, rolled: u8, bet: i64) -> i64 {
    if called == rolled {
        bet * DICE_PAYOUT_MULTIPLIER
    } else {
        0
    }
}

fn roll_die() -> u8 {
    rand::thread_rng().gen_range(1..=6)
}

pub struct Dice;

#[async_trait]
impl ChatCommand for Dice {
    fn name(&self) -> &'static str {
        "dice"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["roll"]
    }

    fn usage(&self) -> &'static str {
        "dice <face 1-6> <bet>"
    }

    fn description(&self) -> &'static str {
        "Call a die face. Hit it and win 6x your bet."
    }

    fn cooldown(&self) -> Duration {
        DICE_COOLDOWN
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let called: Option<u8> = args.first().and_then(|a| a.parse().ok());
        let bet = args.get(1).and_then(|a| parse_amount(a));
        let (Some(called), Some(bet)) = (called.filter(|f| (1..=6).contains(f)), bet) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Usage: `{}`",
                self.usage()
            )));
        };

        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        if profile.wallet < bet {
            return Ok(CommandOutcome::UsageError(format!(
                "Insufficient funds: your wallet holds {}.",
                coins(profile.wallet)
            )));
        }

        // Deduct the stake up front so a crash mid-game can only ever be in
        // the player's favor after the refund below.
        let mut tx = app.db.begin().await?;
        match economy::add_wallet(&mut tx, msg.author.id, -bet).await {
            Ok(()) => tx.commit().await?,
            Err(sqlx::Error::RowNotFound) => {
                // Raced another deduction since the pre-check.
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(
                    "Insufficient funds.".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        let table = msg
            .channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new()
                    .content(format!("{EMOJI_DICE} Rolling..."))
                    .reference_message(msg),
            )
            .await;
        let mut table_msg = match table {
            Ok(m) => m,
            // The stake is already gone; put it back before failing.
            Err(e) => {
                refund_wallet(&app.db, msg.author.id, bet).await;
                return Err(e.into());
            }
        };
        tokio::time::sleep(DICE_ROLL_DELAY).await;

        let rolled = roll_die();
        let payout = dice_payout(called, rolled, bet);
        if payout > 0 {
            let settlement = async {
                let mut tx = app.db.begin().await?;
                economy::add_wallet(&mut tx, msg.author.id, payout).await?;
                tx.commit().await
            }
            .await;
            if let Err(e) = settlement {
                refund_wallet(&app.db, msg.author.id, bet).await;
                return Err(e.into());
            }
        }

        let embed = if payout > 0 {
            CreateEmbed::new()
                .title(format!("{EMOJI_DICE} It's a {rolled}, you called it!"))
                .description(format!("You win {}.", coins(payout)))
                .color(COLOR_WIN)
        } else {
            CreateEmbed::new()
                .title(format!("{EMOJI_DICE} It's a {rolled}, no luck"))
                .description(format!("You called {called} and lose {}.", coins(bet)))
                .color(COLOR_LOSS)
        };
        table_msg
            .edit(&ctx.http, EditMessage::new().content("").embed(embed))
            .await?;
        Ok(CommandOutcome::Done)
    }
}
