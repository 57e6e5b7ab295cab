use crate::database::jobs::xp_to_next;
use crate::database::{economy, loans};
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::COLOR_NEUTRAL;
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

pub struct Profile;

#[async_trait]
impl ChatCommand for Profile {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["p", "level"]
    }

    fn usage(&self) -> &'static str {
        "profile"
    }

    fn description(&self) -> &'static str {
        "Your level, job and work streak."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;
        let loan = loans::get_loan(&app.db, msg.author.id).await?;

        let mut embed = CreateEmbed::new()
            .title(format!("{}'s profile", msg.author.name))
            .field("Level", profile.level.to_string(), true)
            .field(
                "XP",
                format!("{}/{}", profile.xp, xp_to_next(profile.level)),
                true,
            )
            .field(
                "Job",
                profile.job.clone().unwrap_or_else(|| "unemployed".to_string()),
                true,
            )
            .field("Work streak", format!("{} days", profile.work_streak), true)
            .color(COLOR_NEUTRAL);
        if let Some(loan) = loan {
            embed = embed.field(
                "Loan",
                format!("{} outstanding of {} borrowed", loan.outstanding, loan.principal),
                true,
            );
        }

        msg.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;
        Ok(CommandOutcome::Done)
    }
}
