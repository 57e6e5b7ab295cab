//! The `job` and `work` commands: pick a job, clock shifts, build a streak.

use crate::constants::WORK_COOLDOWN;
use crate::database::jobs::{self, JOBS};
use crate::database::economy;
use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use crate::ui::style::{coins, COLOR_NEUTRAL, COLOR_WIN};
use async_trait::async_trait;
use rand::Rng;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

pub struct Job;

#[async_trait]
impl ChatCommand for Job {
    fn name(&self) -> &'static str {
        "job"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["jobs"]
    }

    fn usage(&self) -> &'static str {
        "job [list|apply <name>]"
    }

    fn description(&self) -> &'static str {
        "Lists jobs or applies for one you qualify for."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let profile = economy::get_or_create_profile(&app.db, msg.author.id).await?;

        match args.first().map(String::as_str) {
            Some("apply") => {
                let Some(spec) = args.get(1).and_then(|name| jobs::find_job(name)) else {
                    return Ok(CommandOutcome::UsageError(
                        "Unknown job. See `job list` for the openings.".to_string(),
                    ));
                };
                if profile.level < spec.unlock_level {
                    return Ok(CommandOutcome::UsageError(format!(
                        "`{}` requires level {}; you are level {}.",
                        spec.name, spec.unlock_level, profile.level
                    )));
                }
                jobs::set_job(&app.db, msg.author.id, spec.name).await?;
                msg.reply(
                    &ctx.http,
                    format!("You are now employed as a **{}**. Get to `work`!", spec.name),
                )
                .await?;
            }
            _ => {
                let mut body = String::new();
                for spec in JOBS {
                    let marker = if profile.level >= spec.unlock_level {
                        "✅"
                    } else {
                        "🔒"
                    };
                    let _ = writeln!(
                        body,
                        "{marker} **{}**: {}-{} coins per shift (level {}+)",
                        spec.name, spec.min_wage, spec.max_wage, spec.unlock_level
                    );
                }
                let current = profile.job.as_deref().unwrap_or("unemployed");
                let embed = CreateEmbed::new()
                    .title("Job openings")
                    .description(body)
                    .footer(serenity::builder::CreateEmbedFooter::new(format!(
                        "Current job: {current}"
                    )))
                    .color(COLOR_NEUTRAL);
                msg.channel_id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new().embed(embed).reference_message(msg),
                    )
                    .await?;
            }
        }
        Ok(CommandOutcome::Done)
    }
}

pub struct Work;

#[async_trait]
impl ChatCommand for Work {
    fn name(&self) -> &'static str {
        "work"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["w"]
    }

    fn usage(&self) -> &'static str {
        "work"
    }

    fn description(&self) -> &'static str {
        "Works a shift at your job for wages and xp."
    }

    fn cooldown(&self) -> Duration {
        WORK_COOLDOWN
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        _args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        let mut tx = app.db.begin().await?;
        let profile = economy::get_or_create_profile_for_update(&mut tx, msg.author.id).await?;
        let Some(spec) = profile.job.as_deref().and_then(jobs::find_job) else {
            tx.rollback().await.ok();
            return Ok(CommandOutcome::UsageError(
                "You don't have a job yet. See `job list`.".to_string(),
            ));
        };

        let base_wage = rand::thread_rng().gen_range(spec.min_wage..=spec.max_wage);
        let settlement =
            jobs::record_work(&mut tx, msg.author.id, &profile, base_wage, spec.xp).await?;
        tx.commit().await?;

        let mut body = format!(
            "You worked a shift as a **{}** and earned {} (streak: {} days).",
            spec.name,
            coins(settlement.earned),
            settlement.new_streak
        );
        if let Some(level) = settlement.new_level {
            let _ = write!(body, "\n⭐ **Level up!** You are now level {level}.");
        }
        let embed = CreateEmbed::new()
            .title("Shift complete")
            .description(body)
            .color(COLOR_WIN);
        msg.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;
        Ok(CommandOutcome::Done)
    }
}
