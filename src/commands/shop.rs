//! The shop and inventory commands: `shop`, `buy`, `sell`, `inventory`.
//! Item names can be quoted (`buy "lucky charm"`).

use crate::database::items::{self, Item};
use crate::database::economy;
use crate::dispatch::parser::parse_quantity;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, COLOR_GOLD, COLOR_NEUTRAL};
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::fmt::Write;
use std::sync::Arc;

pub struct Shop;

#[async_trait]
impl ChatCommand for Shop {
    fn name(&self) -> &'static str {
        "shop"
    }

    fn usage(&self) -> &'static str {
        "shop"
    }

    fn description(&self) -> &'static str {
        "Shows what's for sale."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        _app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let mut body = String::new();
        for item in Item::ALL {
            if let Some(price) = item.buy_price() {
                let _ = writeln!(body, "**{}**: {}", item.name(), coins(price));
            }
        }
        let embed = CreateEmbed::new()
            .title("🛒 Shop")
            .description(body)
            .color(COLOR_GOLD);
        msg.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;
        Ok(CommandOutcome::Done)
    }
}

pub struct Buy;

#[async_trait]
impl ChatCommand for Buy {
    fn name(&self) -> &'static str {
        "buy"
    }

    fn usage(&self) -> &'static str {
        "buy <item> [quantity]"
    }

    fn description(&self) -> &'static str {
        "Buys an item from the shop."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let Some(item) = args.first().and_then(|name| Item::from_name(name)) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Unknown item. Usage: `{}`",
                self.usage()
            )));
        };
        let Some(price) = item.buy_price() else {
            return Ok(CommandOutcome::UsageError(format!(
                "**{}** is not for sale.",
                item.name()
            )));
        };
        let quantity = match args.get(1) {
            Some(raw) => match parse_quantity(raw) {
                Some(q) => q,
                None => {
                    return Ok(CommandOutcome::UsageError(
                        "Quantity must be between 1 and 100.".to_string(),
                    ))
                }
            },
            None => 1,
        };
        let cost = price * quantity;

        let mut tx = app.db.begin().await?;
        economy::get_or_create_profile_for_update(&mut tx, msg.author.id).await?;
        match economy::add_wallet(&mut tx, msg.author.id, -cost).await {
            Ok(()) => {}
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                return Ok(CommandOutcome::UsageError(format!(
                    "That costs {} and your wallet can't cover it.",
                    coins(cost)
                )));
            }
            Err(e) => return Err(e.into()),
        }
        items::add_to_inventory(&mut tx, msg.author.id, item, quantity).await?;
        tx.commit().await?;

        msg.reply(
            &ctx.http,
            format!("You bought {}x **{}** for {}.", quantity, item.name(), coins(cost)),
        )
        .await?;
        Ok(CommandOutcome::Done)
    }
}

pub struct Sell;

#[async_trait]
impl ChatCommand for Sell {
    fn name(&self) -> &'static str {
        "sell"
    }

    fn usage(&self) -> &'static str {
        "sell <item> [quantity]"
    }

    fn description(&self) -> &'static str {
        "Sells items from your inventory."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let Some(item) = args.first().and_then(|name| Item::from_name(name)) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Unknown item. Usage: `{}`",
                self.usage()
            )));
        };
        let quantity = match args.get(1) {
            Some(raw) => match parse_quantity(raw) {
                Some(q) => q,
                None => {
                    return Ok(CommandOutcome::UsageError(
                        "Quantity must be between 1 and 100.".to_string(),
                    ))
                }
            },
            None => 1,
        };

        let proceeds = item.sell_value() * quantity;
        let mut tx = app.db.begin().await?;
        economy::get_or_create_profile_for_update(&mut tx, msg.author.id).await?;
        match items::add_to_inventory(&mut tx, msg.author.id, item, -quantity).await {
            Ok(()) => {}
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                let held = items::get_quantity(&app.db, msg.author.id, item).await?;
                return Ok(CommandOutcome::UsageError(format!(
                    "You only have {held}x **{}**.",
                    item.name()
                )));
            }
            Err(e) => return Err(e.into()),
        }
        economy::add_wallet(&mut tx, msg.author.id, proceeds).await?;
        tx.commit().await?;

        msg.reply(
            &ctx.http,
            format!("You sold {}x **{}** for {}.", quantity, item.name(), coins(proceeds)),
        )
        .await?;
        Ok(CommandOutcome::Done)
    }
}

pub struct Inventory;

#[async_trait]
impl ChatCommand for Inventory {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["inv", "i"]
    }

    fn usage(&self) -> &'static str {
        "inventory"
    }

    fn description(&self) -> &'static str {
        "Lists what you're carrying."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let inventory = items::get_inventory(&app.db, msg.author.id).await?;
        let body = if inventory.is_empty() {
            "Nothing but pocket lint. Try `dig`.".to_string()
        } else {
            let mut body = String::new();
            for (item, quantity) in inventory {
                let _ = writeln!(
                    body,
                    "{}x **{}** (sells for {})",
                    quantity,
                    item.name(),
                    item.sell_value()
                );
            }
            body
        };

        let embed = CreateEmbed::new()
            .title(format!("{}'s inventory", msg.author.name))
            .description(body)
            .color(COLOR_NEUTRAL);
        msg.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;
        Ok(CommandOutcome::Done)
    }
}
