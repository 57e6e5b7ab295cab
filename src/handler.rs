//! The gateway event handler and the dispatch path every chat command takes:
//! parse, registry lookup, exclusive-session acquisition, cooldown
//! reservation, run, settle.

use crate::dispatch::parser::parse_invocation;
use crate::dispatch::{
    ChatCommand, CommandOutcome, CooldownDecision, SessionDecision, SessionToken,
};
use crate::model::AppState;
use crate::ui::style::{error_embed, format_wait};
use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};
use std::sync::Arc;

const GENERIC_FAILURE: &str = "Something went wrong running that command. Please try again later.";

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        // Cooldown and session keys are scoped per guild; DMs are ignored.
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        let Some(app) = AppState::from_ctx(&ctx).await else {
            return;
        };

        let prefix = app.prefix.read().await.clone();
        let Some((name, args)) = parse_invocation(&msg.content, &prefix) else {
            return;
        };
        let Some(command) = app.registry.find(&name) else {
            return;
        };

        dispatch(&ctx, &msg, guild_id.get(), command, &args, &app).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        let Some(app) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let family = component.data.custom_id.split(':').next().unwrap_or("");
        let Some(command) = app.registry.find_interaction(family) else {
            return;
        };
        if let Err(e) = command.component(&ctx, &component, &app).await {
            tracing::error!(
                custom_id = %component.data.custom_id,
                error = %e,
                "component interaction failed"
            );
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, "connected and ready");
    }
}

/// Runs one command invocation through the gate. Never returns an error: the
/// dispatch boundary is where failures stop, get logged and get reported.
async fn dispatch(
    ctx: &Context,
    msg: &Message,
    guild: u64,
    command: Arc<dyn ChatCommand>,
    args: &[String],
    app: &Arc<AppState>,
) {
    let user = msg.author.id.get();
    let name = command.name();

    // Exclusive commands take the per-(user, guild) session slot first, so a
    // second stateful command cannot start while one is in flight, even one
    // dispatched by another bot instance.
    let session: Option<SessionToken> = match command.exclusive() {
        Some(ttl) => match app.gate.acquire_session(user, guild, name, ttl).await {
            Ok(SessionDecision::Granted(token)) => Some(token),
            Ok(SessionDecision::Busy { holder }) => {
                reply(ctx, msg, &format!("Finish your current `{holder}` session first.")).await;
                return;
            }
            Err(e) => {
                tracing::error!(command = name, error = %e, "session acquisition failed");
                fail_reply(ctx, msg).await;
                return;
            }
        },
        None => None,
    };

    let cooldown = command.cooldown();
    if !cooldown.is_zero() {
        match app.gate.reserve_cooldown(user, guild, name, cooldown).await {
            Ok(CooldownDecision::Reserved) => {}
            Ok(CooldownDecision::Blocked { remaining }) => {
                release(app, user, guild, &session).await;
                reply(
                    ctx,
                    msg,
                    &format!("Slow down: `{name}` is ready again in {}.", format_wait(remaining)),
                )
                .await;
                return;
            }
            Err(e) => {
                release(app, user, guild, &session).await;
                tracing::error!(command = name, error = %e, "cooldown reservation failed");
                fail_reply(ctx, msg).await;
                return;
            }
        }
    }

    match command.run(ctx, msg, args, app, session.as_ref()).await {
        Ok(CommandOutcome::Done) => {
            release(app, user, guild, &session).await;
        }
        Ok(CommandOutcome::HoldSession) => {
            // The handler took ownership of the token; its follow-up
            // interaction (or the session TTL) releases the slot.
        }
        Ok(CommandOutcome::UsageError(text)) => {
            reply(ctx, msg, &text).await;
            // A typo must not cost the user their cooldown window.
            if !cooldown.is_zero() {
                if let Err(e) = app.gate.clear_cooldown(user, guild, name).await {
                    tracing::warn!(command = name, error = %e, "failed to waive cooldown");
                }
            }
            release(app, user, guild, &session).await;
        }
        Err(e) => {
            tracing::error!(command = name, user, error = %e, "command failed");
            fail_reply(ctx, msg).await;
            // Handlers compensate their own partial mutations (e.g. bet
            // refunds) before the error reaches us; waiving the cooldown on
            // top errs in the user's favor.
            if !cooldown.is_zero() {
                if let Err(e) = app.gate.clear_cooldown(user, guild, name).await {
                    tracing::warn!(command = name, error = %e, "failed to waive cooldown");
                }
            }
            release(app, user, guild, &session).await;
        }
    }
}

async fn release(app: &Arc<AppState>, user: u64, guild: u64, session: &Option<SessionToken>) {
    if let Some(token) = session {
        if let Err(e) = app.gate.release_session(user, guild, token).await {
            tracing::warn!(error = %e, "failed to release session");
        }
    }
}

async fn reply(ctx: &Context, msg: &Message, text: &str) {
    if let Err(e) = msg.reply(&ctx.http, text).await {
        tracing::warn!(error = %e, "failed to send reply");
    }
}

async fn fail_reply(ctx: &Context, msg: &Message) {
    let message = CreateMessage::new()
        .embed(error_embed("Command failed", GENERIC_FAILURE))
        .reference_message(msg);
    if let Err(e) = msg.channel_id.send_message(&ctx.http, message).await {
        tracing::warn!(error = %e, "failed to send failure reply");
    }
}
