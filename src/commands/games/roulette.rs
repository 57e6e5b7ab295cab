//! `roulette <red|black|green|0-36> <bet>` on a single-zero wheel.

use super::refund_wallet;
use crate::constants::{ROULETTE_COOLDOWN, ROULETTE_SPIN_DELAY};
use crate::database::economy;
use crate::dispatch::parser::parse_amount;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, COLOR_LOSS, COLOR_WIN};
use async_trait::async_trait;
use rand::Rng;
use serenity::builder::{CreateEmbed, CreateMessage, EditMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouletteBet {
    Red,
    Black,
    Green,
    Straight(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketColor {
    Red,
    Black,
    Green,
}

const RED_POCKETS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

pub fn pocket_color(pocket: u8) -> PocketColor {
    if pocket == 0 {
        PocketColor::Green
    } else if RED_POCKETS.contains(&pocket) {
        PocketColor::Red
    } else {
        PocketColor::Black
    }
}

pub fn parse_roulette_bet(raw: &str) -> Option<RouletteBet> {
    match raw.to_lowercase().as_str() {
        "red" => Some(RouletteBet::Red),
        "black" => Some(RouletteBet::Black),
        "green" => Some(RouletteBet::Green),
        other => other
            .parse::<u8>()
            .ok()
            .filter(|n| *n <= 36)
            .map(RouletteBet::Straight),
    }
}

/// Total-return multiplier for a bet against the spun pocket. Colors pay 2x
/// the stake; green and straight numbers pay 36x (single pocket).
pub fn payout_multiplier(bet: RouletteBet, spun: u8) -> i64 {
    match bet {
        RouletteBet::Red if pocket_color(spun) == PocketColor::Red => 2,
        RouletteBet::Black if pocket_color(spun) == PocketColor::Black => 2,
        RouletteBet::Green if spun == 0 => 36,
        RouletteBet::Straight(n) if n == spun => 36,
        _ => 0,
    }
}

fn spin_wheel() -> u8 {
    rand::thread_rng().gen_range(0..=36)
}

fn color_emoji(pocket: u8) -> &'static str {
    match pocket_color(pocket) {
        PocketColor::Red => "🔴",
        PocketColor::Black => "⚫",
        PocketColor::Green => "🟢",
    }
}

pub struct Roulette;

#[async_trait]
impl ChatCommand for Roulette {
    fn name(&self) -> &'static str {
        "roulette"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["r"]
    }

    fn usage(&self) -> &'static str {
        "roulette <red|black|green|0-36> <bet>"
    }

    fn description(&self) -> &'static str {
        "Spin the wheel. Colors pay 2x, exact numbers pay 36x."
    }

    fn cooldown(&self) -> Duration {
        ROULETTE_COOLDOWN
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let bet_kind = args.first().and_then(|a| parse_roulette_bet(a));
        let bet = args.get(1).and_then(|a| parse_amount(a));
        let (Some(bet_kind), Some(bet)) = (bet_kind, bet) else {
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

        let mut tx = app.db.begin().await?;
        match economy::add_wallet(&mut tx, msg.author.id, -bet).await {
            Ok(()) => tx.commit().await?,
            Err(sqlx::Error::RowNotFound) => {
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
                    .content("🎡 No more bets, spinning...")
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
        tokio::time::sleep(ROULETTE_SPIN_DELAY).await;

        let spun = spin_wheel();
        let payout = bet * payout_multiplier(bet_kind, spun);
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

        let landed = format!("The ball lands on {} **{spun}**.", color_emoji(spun));
        let embed = if payout > 0 {
            CreateEmbed::new()
                .title("🎡 Winner!")
                .description(format!("{landed} You collect {}.", coins(payout)))
                .color(COLOR_WIN)
        } else {
            CreateEmbed::new()
                .title("🎡 The house wins")
                .description(format!("{landed} Your {} is gone.", coins(bet)))
                .color(COLOR_LOSS)
        };
        table_msg
            .edit(&ctx.http, EditMessage::new().content("").embed(embed))
            .await?;
        Ok(CommandOutcome::Done)
    }
}
