use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use async_trait::async_trait;
use serenity::builder::EditMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Instant;

pub struct Ping;

#[async_trait]
impl ChatCommand for Ping {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn usage(&self) -> &'static str {
        "ping"
    }

    fn description(&self) -> &'static str {
        "Measures the round-trip time to Discord."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        _app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let started = Instant::now();
        let mut sent = msg.reply(&ctx.http, "Pong!").await?;
        let rtt = started.elapsed();
        sent.edit(
            &ctx.http,
            EditMessage::new().content(format!("Pong! `{} ms`", rtt.as_millis())),
        )
        .await?;
        Ok(CommandOutcome::Done)
    }
}
