use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::COLOR_NEUTRAL;
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::fmt::Write;
use std::sync::Arc;

pub struct Help;

#[async_trait]
impl ChatCommand for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["h", "commands"]
    }

    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn description(&self) -> &'static str {
        "Lists all commands, or shows details for one."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let prefix = app.prefix.read().await.clone();

        let embed = if let Some(wanted) = args.first() {
            let Some(command) = app.registry.find(&wanted.to_lowercase()) else {
                return Ok(CommandOutcome::UsageError(format!(
                    "No command named `{wanted}`. Try `{prefix}help`."
                )));
            };
            let mut body = format!(
                "{}\n\n**Usage:** `{}{}`",
                command.description(),
                prefix,
                command.usage()
            );
            if !command.aliases().is_empty() {
                let _ = write!(body, "\n**Aliases:** {}", command.aliases().join(", "));
            }
            let cooldown = command.cooldown();
            if !cooldown.is_zero() {
                let _ = write!(body, "\n**Cooldown:** {}s", cooldown.as_secs());
            }
            if command.exclusive().is_some() {
                let _ = write!(body, "\n*Exclusive: only one such session at a time.*");
            }
            CreateEmbed::new()
                .title(format!("Command: {}", command.name()))
                .description(body)
                .color(COLOR_NEUTRAL)
        } else {
            let mut body = String::new();
            for command in app.registry.iter() {
                let _ = writeln!(
                    body,
                    "`{}{}` - {}",
                    prefix,
                    command.usage(),
                    command.description()
                );
            }
            CreateEmbed::new()
                .title("Commands")
                .description(body)
                .color(COLOR_NEUTRAL)
        };

        msg.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;
        Ok(CommandOutcome::Done)
    }
}
