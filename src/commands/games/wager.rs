//! `wager <@user> <amount>`: challenge another player to a coin flip for the
//! pot. This is the bot's exclusive-session command: the challenger's session
//! slot stays held while the challenge waits on the target's button click, so
//! a user cannot stack a second wager behind a pending one.

use crate::constants::{WAGER_DECISION_WINDOW, WAGER_SESSION_TTL};
use crate::database::economy;
use crate::dispatch::parser::{parse_amount, parse_user_arg};
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::{AppState, PendingWager};
use crate::ui::style::coins;
use async_trait::async_trait;
use serenity::builder::{CreateActionRow, CreateButton, CreateMessage, EditMessage};
use serenity::model::application::{ButtonStyle, ComponentInteraction};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

pub const ACCEPT_ID: &str = "wager:accept";
pub const DECLINE_ID: &str = "wager:decline";

pub struct Wager;

#[async_trait]
impl ChatCommand for Wager {
    fn name(&self) -> &'static str {
        "wager"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["duel"]
    }

    fn usage(&self) -> &'static str {
        "wager <@user> <amount>"
    }

    fn description(&self) -> &'static str {
        "Challenge someone to a coin flip for the pot."
    }

    fn exclusive(&self) -> Option<Duration> {
        Some(WAGER_SESSION_TTL)
    }

    fn interaction_prefix(&self) -> Option<&'static str> {
        Some("wager")
    }

    async fn component(
        &self,
        ctx: &Context,
        component: &ComponentInteraction,
        app: &Arc<AppState>,
    ) -> BotResult<()> {
        crate::interactions::wager_handler::handle(ctx, component, app).await
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let (Some(target), Some(amount)) = (
            args.first().and_then(|a| parse_user_arg(a)),
            args.get(1).and_then(|a| parse_amount(a)),
        ) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Usage: `{}`",
                self.usage()
            )));
        };
        let target = UserId::new(target);
        if target == msg.author.id {
            return Ok(CommandOutcome::UsageError(
                "You cannot wager against yourself.".to_string(),
            ));
        }

        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        if profile.wallet < amount {
            return Ok(CommandOutcome::UsageError(format!(
                "Insufficient funds: your wallet holds {}.",
                coins(profile.wallet)
            )));
        }

        // The dispatcher only calls exclusive commands with a session in hand.
        let Some(session) = session else {
            return Ok(CommandOutcome::UsageError(
                "Wager needs an exclusive session.".to_string(),
            ));
        };

        let components = vec![CreateActionRow::Buttons(vec![
            CreateButton::new(ACCEPT_ID)
                .label("Accept")
                .style(ButtonStyle::Success),
            CreateButton::new(DECLINE_ID)
                .label("Decline")
                .style(ButtonStyle::Danger),
        ])];
        let challenge = msg
            .channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new()
                    .content(format!(
                        "<@{}>, <@{}> challenges you to a {} coin flip! You have {}s to respond.",
                        target.get(),
                        msg.author.id.get(),
                        coins(amount),
                        WAGER_DECISION_WINDOW.as_secs()
                    ))
                    .components(components),
            )
            .await?;

        let guild = msg.guild_id.map(|g| g.get()).unwrap_or(0);
        app.pending_wagers.write().await.insert(
            challenge.id,
            PendingWager {
                challenger: msg.author.id,
                target,
                guild,
                amount,
                session: session.clone(),
            },
        );

        // Fixed wall-clock window: after it passes, tear the challenge down
        // and free the challenger's session slot.
        let app = app.clone();
        let http = ctx.http.clone();
        let channel_id = challenge.channel_id;
        let message_id = challenge.id;
        tokio::spawn(async move {
            tokio::time::sleep(WAGER_DECISION_WINDOW).await;
            let expired = app.pending_wagers.write().await.remove(&message_id);
            let Some(pending) = expired else {
                return; // already settled by a click
            };
            if let Err(e) = app
                .gate
                .release_session(pending.challenger.get(), pending.guild, &pending.session)
                .await
            {
                tracing::warn!(error = %e, "failed to release expired wager session");
            }
            let edit = EditMessage::new()
                .content("The wager went unanswered and has expired.")
                .components(Vec::new());
            if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
                tracing::warn!(error = %e, "failed to edit expired wager message");
            }
        });

        Ok(CommandOutcome::HoldSession)
    }
}
