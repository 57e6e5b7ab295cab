use crate::constants::{DAILY_AMOUNT, DAILY_INTERVAL_HOURS};
use crate::database::economy;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, format_wait};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

/// Remaining wait before the stipend can be claimed again, `None` once the
/// window has elapsed (or for a profile that never claimed).
pub fn next_claim_wait(
    last: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<std::time::Duration> {
    let next = last? + ChronoDuration::hours(DAILY_INTERVAL_HOURS);
    if now < next {
        Some((next - now).to_std().unwrap_or_default())
    } else {
        None
    }
}

pub struct Daily;

#[async_trait]
impl ChatCommand for Daily {
    fn name(&self) -> &'static str {
        "daily"
    }

    fn usage(&self) -> &'static str {
        "daily"
    }

    fn description(&self) -> &'static str {
        "Claims your daily stipend."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        economy::get_or_create_profile(&app.db, msg.author.id).await?;

        // The window lives in Postgres, not the lock store: it must survive
        // cache restarts, and the conditional update means concurrent claims
        // cannot both be credited.
        let claimed = economy::claim_daily(
            &app.db,
            msg.author.id,
            DAILY_AMOUNT,
            DAILY_INTERVAL_HOURS as i32,
        )
        .await?;

        if claimed {
            msg.reply(
                &ctx.http,
                format!("You collected your daily {}.", coins(DAILY_AMOUNT)),
            )
            .await?;
        } else {
            let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
            let wait = next_claim_wait(profile.last_daily, Utc::now()).unwrap_or_default();
            msg.reply(
                &ctx.http,
                format!("Already claimed. Come back in {}.", format_wait(wait)),
            )
            .await?;
        }
        Ok(CommandOutcome::Done)
    }
}
