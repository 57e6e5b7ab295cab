//! Resolves a pending wager when the challenged user clicks Accept or
//! Decline. This is the release point of the exclusive session a `wager`
//! invocation left held.

use crate::commands::games::wager::{ACCEPT_ID, DECLINE_ID};
use crate::database::economy;
use crate::model::{AppState, PendingWager};
use crate::ui::style::coins;
use rand::Rng;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub async fn handle(
    ctx: &Context,
    component: &ComponentInteraction,
    app: &Arc<AppState>,
) -> crate::error::BotResult<()> {
    let accept = match component.data.custom_id.as_str() {
        ACCEPT_ID => true,
        DECLINE_ID => false,
        other => {
            tracing::warn!(custom_id = other, "unknown wager custom_id");
            return Ok(());
        }
    };

    // Peek first: only the challenged user may answer, and a wrong clicker
    // must not consume the pending entry.
    let target = {
        let pending = app.pending_wagers.read().await;
        pending.get(&component.message.id).map(|w| w.target)
    };
    let Some(target) = target else {
        ephemeral(ctx, component, "This wager has already been settled or expired.").await?;
        return Ok(());
    };
    if component.user.id != target {
        ephemeral(ctx, component, "This challenge isn't yours to answer.").await?;
        return Ok(());
    }

    // Claim the entry; a concurrent click or the expiry sweep may beat us.
    let Some(pending) = app.pending_wagers.write().await.remove(&component.message.id) else {
        ephemeral(ctx, component, "This wager has already been settled or expired.").await?;
        return Ok(());
    };

    let result = if accept {
        settle(app, &pending).await
    } else {
        Ok(format!("<@{}> declined the wager.", pending.target.get()))
    };

    // Success or failure, the challenger's slot must come free.
    if let Err(e) = app
        .gate
        .release_session(pending.challenger.get(), pending.guild, &pending.session)
        .await
    {
        tracing::warn!(error = %e, "failed to release wager session");
    }

    let text = result?;
    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(text)
                    .components(Vec::new()),
            ),
        )
        .await?;
    Ok(())
}

/// Deducts the stake from both parties and pays the pot to a coin-flip
/// winner, all in one transaction so nobody can lose a stake without the
/// other side losing theirs.
async fn settle(app: &Arc<AppState>, pending: &PendingWager) -> crate::error::BotResult<String> {
    let amount = pending.amount;
    let mut tx = app.db.begin().await?;
    economy::get_or_create_profile_for_update(&mut tx, pending.challenger).await?;
    economy::get_or_create_profile_for_update(&mut tx, pending.target).await?;
    for party in [pending.challenger, pending.target] {
        match economy::add_wallet(&mut tx, party, -amount).await {
            Ok(()) => {}
            Err(sqlx::Error::RowNotFound) => {
                tx.rollback().await.ok();
                return Ok(format!(
                    "<@{}> can no longer cover the {} stake; wager cancelled.",
                    party.get(),
                    coins(amount)
                ));
            }
            Err(e) => return Err(e.into()),
        }
    }
    let challenger_wins = rand::thread_rng().gen_bool(0.5);
    let winner = if challenger_wins {
        pending.challenger
    } else {
        pending.target
    };
    economy::add_wallet(&mut tx, winner, amount * 2).await?;
    tx.commit().await?;

    Ok(format!(
        "🪙 The coin lands! <@{}> takes the {} pot!",
        winner.get(),
        coins(amount * 2)
    ))
}

async fn ephemeral(
    ctx: &Context,
    component: &ComponentInteraction,
    text: &str,
) -> Result<(), serenity::Error> {
    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(text)
                    .ephemeral(true),
            ),
        )
        .await
}
