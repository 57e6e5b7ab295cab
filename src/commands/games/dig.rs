//! `dig`: scratch around for coins or trinkets. A shovel doubles coin finds.

use crate::constants::{DIG_COOLDOWN, DIG_DELAY};
use crate::database::items::{self, Item};
use crate::database::economy;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, COLOR_NEUTRAL, COLOR_WIN};
use async_trait::async_trait;
use rand::Rng;
use serenity::builder::{CreateEmbed, CreateMessage, EditMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigFind {
    Coins(i64),
    Item(Item),
    Nothing,
}

/// Maps pre-rolled randomness onto a find: 40% coins, 35% an item, 25%
/// nothing. `outcome_roll` and `item_roll` are in 0..100, `coin_roll` is the
/// coin amount.
pub fn dig_outcome(outcome_roll: u8, coin_roll: i64, item_roll: u8) -> DigFind {
    if outcome_roll < 40 {
        DigFind::Coins(coin_roll)
    } else if outcome_roll < 75 {
        let item = match item_roll {
            0..=39 => Item::RustyNail,
            40..=64 => Item::OldBoot,
            65..=84 => Item::CopperCoin,
            85..=94 => Item::SilverLocket,
            95..=98 => Item::GoldNugget,
            _ => Item::Diamond,
        };
        DigFind::Item(item)
    } else {
        DigFind::Nothing
    }
}

fn roll_dig() -> DigFind {
    let mut rng = rand::thread_rng();
    dig_outcome(
        rng.gen_range(0..100),
        rng.gen_range(20..=120),
        rng.gen_range(0..100),
    )
}

pub struct Dig;

#[async_trait]
impl ChatCommand for Dig {
    fn name(&self) -> &'static str {
        "dig"
    }

    fn usage(&self) -> &'static str {
        "dig"
    }

    fn description(&self) -> &'static str {
        "Dig for buried coins and trinkets."
    }

    fn cooldown(&self) -> Duration {
        DIG_COOLDOWN
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let has_shovel = items::get_quantity(&app.db, msg.author.id, Item::Shovel).await? > 0;

        let mut dig_msg = msg
            .channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new()
                    .content("⛏️ Digging...")
                    .reference_message(msg),
            )
            .await?;
        tokio::time::sleep(DIG_DELAY).await;

        let find = match roll_dig() {
            DigFind::Coins(amount) if has_shovel => DigFind::Coins(amount * 2),
            other => other,
        };

        let embed = match find {
            DigFind::Coins(amount) => {
                let mut tx = app.db.begin().await?;
                economy::get_or_create_profile_for_update(&mut tx, msg.author.id).await?;
                economy::add_wallet(&mut tx, msg.author.id, amount).await?;
                tx.commit().await?;
                let note = if has_shovel { " (shovel bonus!)" } else { "" };
                CreateEmbed::new()
                    .title("⛏️ You struck coins")
                    .description(format!("You dug up {}{note}.", coins(amount)))
                    .color(COLOR_WIN)
            }
            DigFind::Item(item) => {
                let mut tx = app.db.begin().await?;
                economy::get_or_create_profile_for_update(&mut tx, msg.author.id).await?;
                items::add_to_inventory(&mut tx, msg.author.id, item, 1).await?;
                tx.commit().await?;
                CreateEmbed::new()
                    .title("⛏️ You found something")
                    .description(format!(
                        "A **{}** goes into your inventory (sells for {}).",
                        item.name(),
                        item.sell_value()
                    ))
                    .color(COLOR_WIN)
            }
            DigFind::Nothing => CreateEmbed::new()
                .title("⛏️ Just dirt")
                .description("You found nothing this time.")
                .color(COLOR_NEUTRAL),
        };

        dig_msg
            .edit(&ctx.http, EditMessage::new().content("").embed(embed))
            .await?;
        Ok(CommandOutcome::Done)
    }
}
