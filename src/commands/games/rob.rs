//! `rob <@user>`: a coin flip for a cut of the target's *wallet*; the bank
//! is untouchable. Victims get a protection window afterwards, tracked as a
//! timed key in the shared store.

use crate::constants::{ROB_COOLDOWN, ROB_SHIELD_TTL};
use crate::database::economy;
use crate::dispatch::parser::parse_user_arg;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, format_wait, COLOR_LOSS, COLOR_WIN, EMOJI_SHIELD};
use async_trait::async_trait;
use rand::Rng;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

/// Share of the target's wallet taken on success, for a percentage roll in
/// 10..=25. Always at least 1 coin so a success is never empty-handed.
pub fn rob_cut(target_wallet: i64, pct: i64) -> i64 {
    (target_wallet * pct / 100).max(1)
}

/// Fine paid to the would-be victim on a failed attempt: 15% of the robber's
/// wallet, clamped to what they actually have.
pub fn rob_fine(robber_wallet: i64) -> i64 {
    (robber_wallet * 15 / 100).clamp(0, robber_wallet)
}

pub fn shield_key(guild: u64, user: u64) -> String {
    format!("robshield:{guild}:{user}")
}

fn roll_attempt() -> (bool, i64) {
    let mut rng = rand::thread_rng();
    (rng.gen_bool(0.5), rng.gen_range(10..=25))
}

pub struct Rob;

#[async_trait]
impl ChatCommand for Rob {
    fn name(&self) -> &'static str {
        "rob"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["steal"]
    }

    fn usage(&self) -> &'static str {
        "rob <@user>"
    }

    fn description(&self) -> &'static str {
        "Try to rob another player's wallet. Fail and you pay them a fine."
    }

    fn cooldown(&self) -> Duration {
        ROB_COOLDOWN
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let Some(target) = args.first().and_then(|a| parse_user_arg(a)) else {
            return Ok(CommandOutcome::UsageError(format!(
                "Usage: `{}`",
                self.usage()
            )));
        };
        let target = UserId::new(target);
        if target == msg.author.id {
            return Ok(CommandOutcome::UsageError(
                "Robbing yourself moves no coins.".to_string(),
            ));
        }

        let guild = msg.guild_id.map(|g| g.get()).unwrap_or(0);
        if let Some(wait) = app
            .gate
            .timer_remaining(&shield_key(guild, target.get()))
            .await?
        {
            return Ok(CommandOutcome::UsageError(format!(
                "{EMOJI_SHIELD} That user was robbed recently and is protected for another {}.",
                format_wait(wait)
            )));
        }

        let robber = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        let victim = economy::get_or_create_profile(&app.db, target).await?;
        if victim.wallet <= 0 {
            return Ok(CommandOutcome::UsageError(
                "Their wallet is empty, nothing to take.".to_string(),
            ));
        }

        let (success, pct) = roll_attempt();
        let embed = if success {
            let haul = rob_cut(victim.wallet, pct);
            let mut tx = app.db.begin().await?;
            match economy::transfer_wallet(&mut tx, target, msg.author.id, haul).await {
                Ok(()) => tx.commit().await?,
                Err(sqlx::Error::RowNotFound) => {
                    // Victim's wallet emptied since the read.
                    tx.rollback().await.ok();
                    return Ok(CommandOutcome::UsageError(
                        "Their wallet is empty, nothing to take.".to_string(),
                    ));
                }
                Err(e) => return Err(e.into()),
            }
            // Shield the victim against pile-ons.
            app.gate
                .arm_timer(&shield_key(guild, target.get()), ROB_SHIELD_TTL)
                .await?;
            CreateEmbed::new()
                .title("🕶️ Clean getaway")
                .description(format!(
                    "You lifted {} from <@{}>'s wallet.",
                    coins(haul),
                    target.get()
                ))
                .color(COLOR_WIN)
        } else {
            let fine = rob_fine(robber.wallet);
            if fine > 0 {
                let mut tx = app.db.begin().await?;
                match economy::transfer_wallet(&mut tx, msg.author.id, target, fine).await {
                    Ok(()) => tx.commit().await?,
                    Err(sqlx::Error::RowNotFound) => {
                        tx.rollback().await.ok();
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            CreateEmbed::new()
                .title("🚨 Caught red-handed")
                .description(format!(
                    "You were spotted and paid <@{}> a {} fine.",
                    target.get(),
                    coins(fine)
                ))
                .color(COLOR_LOSS)
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
