//! Runtime prefix management, restricted to the guild owner and members with
//! the administrator permission.

use crate::dispatch::{ChatCommand, CommandOutcome, SessionToken};
use crate::error::BotResult;
use crate::model::AppState;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::model::guild::Role;
use serenity::model::id::{RoleId, UserId};
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;

struct GuildInfo {
    owner_id: UserId,
    roles: HashMap<RoleId, Role>,
}

// Copies what we need out of the cache ref before any await point.
fn guild_info_from_cache(ctx: &Context, msg: &Message) -> Option<GuildInfo> {
    let guild = ctx.cache.guild(msg.guild_id?)?;
    Some(GuildInfo {
        owner_id: guild.owner_id,
        roles: guild.roles.clone(),
    })
}

fn is_admin(info: &GuildInfo, msg: &Message) -> bool {
    if msg.author.id == info.owner_id {
        return true;
    }
    msg.member.as_ref().is_some_and(|member| {
        member.roles.iter().any(|role_id| {
            info.roles
                .get(role_id)
                .is_some_and(|role| role.permissions.contains(Permissions::ADMINISTRATOR))
        })
    })
}

pub struct Prefix;

#[async_trait]
impl ChatCommand for Prefix {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn usage(&self) -> &'static str {
        "prefix [set <new_prefix>]"
    }

    fn description(&self) -> &'static str {
        "Shows or changes the command prefix (admin only)."
    }

    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        _session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome> {
        match args.first().map(String::as_str) {
            Some("set") => {
                let Some(info) = guild_info_from_cache(ctx, msg) else {
                    msg.reply(&ctx.http, "Could not read server info from cache; try again.")
                        .await?;
                    return Ok(CommandOutcome::Done);
                };
                if !is_admin(&info, msg) {
                    msg.reply(&ctx.http, "You must be an administrator to change the prefix.")
                        .await?;
                    return Ok(CommandOutcome::Done);
                }
                let Some(new_prefix) = args.get(1) else {
                    return Ok(CommandOutcome::UsageError(
                        "Usage: `prefix set <new_prefix>`".to_string(),
                    ));
                };
                *app.prefix.write().await = new_prefix.clone();
                msg.reply(&ctx.http, format!("Prefix updated to `{new_prefix}`"))
                    .await?;
            }
            _ => {
                let current = app.prefix.read().await.clone();
                msg.reply(
                    &ctx.http,
                    format!("The current prefix is `{current}`. Use `{current}prefix set <new_prefix>` to change it."),
                )
                .await?;
            }
        }
        Ok(CommandOutcome::Done)
    }
}
