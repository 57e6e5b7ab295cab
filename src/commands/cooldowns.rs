use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{format_wait, COLOR_NEUTRAL};
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::fmt::Write;
use std::sync::Arc;

pub struct Cooldowns;

#[async_trait]
impl ChatCommand for Cooldowns {
    fn name(&self) -> &'static str {
        "cooldowns"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["cd"]
    }

    fn usage(&self) -> &'static str {
        "cooldowns"
    }

    fn description(&self) -> &'static str {
        "Shows which of your command cooldowns are still running."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let guild = msg.guild_id.map(|g| g.get()).unwrap_or(0);
        let user = msg.author.id.get();

        let mut body = String::new();
        for command in app.registry.iter() {
            if command.cooldown().is_zero() {
                continue;
            }
            let remaining = app
                .gate
                .cooldown_remaining(user, guild, command.name())
                .await?;
            let status = match remaining {
                Some(wait) => format!("{} left", format_wait(wait)),
                None => "ready".to_string(),
            };
            let _ = writeln!(body, "`{}` - {}", command.name(), status);
        }

        let embed = CreateEmbed::new()
            .title("Your cooldowns")
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
