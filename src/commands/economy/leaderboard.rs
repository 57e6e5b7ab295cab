use crate::database::economy;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{COLOR_GOLD, EMOJI_COIN};
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::fmt::Write;
use std::sync::Arc;

pub struct Leaderboard;

#[async_trait]
impl ChatCommand for Leaderboard {
    fn name(&self) -> &'static str {
        "leaderboard"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["lb", "top"]
    }

    fn usage(&self) -> &'static str {
        "leaderboard"
    }

    fn description(&self) -> &'static str {
        "Top ten richest players (wallet + bank)."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let rows = economy::top_balances(&app.db, 10).await?;
        let mut body = String::new();
        for (rank, (user_id, total)) in rows.iter().enumerate() {
            let medal = match rank {
                0 => "🥇",
                1 => "🥈",
                2 => "🥉",
                _ => "▫️",
            };
            let _ = writeln!(
                body,
                "{medal} <@{user_id}>: {EMOJI_COIN} {total}",
            );
        }
        if body.is_empty() {
            body = "Nobody has played yet.".to_string();
        }

        let embed = CreateEmbed::new()
            .title("Richest players")
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
