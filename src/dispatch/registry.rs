//! The closed command interface and the registry that maps names and aliases
//! to handlers.
//!
//! Every command declares its gate requirements up front (`cooldown`,
//! `exclusive`) and reports how its run ended through `CommandOutcome`, so the
//! dispatcher never has to inspect reply text to decide whether a cooldown
//! should stick.

use crate::dispatch::SessionToken;
use crate::error::BotResult;
use crate::model::AppState;
use async_trait::async_trait;
use serenity::model::application::ComponentInteraction;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// How a command invocation ended, as reported by the handler itself.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Ran to completion; cooldown stands, session (if any) is released.
    Done,
    /// Ran to completion but the exclusive session must stay held for a
    /// follow-up interaction (e.g. a wager waiting on an accept button). The
    /// session TTL still bounds how long it can live.
    HoldSession,
    /// The invocation was malformed (bad arguments, insufficient funds found
    /// before any mutation). The message is shown to the user and the
    /// cooldown is waived.
    UsageError(String),
}

#[async_trait]
pub trait ChatCommand: Send + Sync {
    fn name(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn usage(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Minimum wait between successive invocations by the same user.
    /// `Duration::ZERO` means no cooldown.
    fn cooldown(&self) -> Duration {
        Duration::ZERO
    }

    /// `Some(ttl)` if the command needs the per-(user, guild) exclusive slot,
    /// with `ttl` bounding how long a crashed handler can hold it.
    fn exclusive(&self) -> Option<Duration> {
        None
    }

    /// The `custom_id` family (the part before the first `:`) of component
    /// interactions this command wants routed to [`ChatCommand::component`].
    fn interaction_prefix(&self) -> Option<&'static str> {
        None
    }

    /// Follow-up component interaction (button click) for a command that
    /// declared an [`ChatCommand::interaction_prefix`].
    async fn component(
        &self,
        ctx: &Context,
        component: &ComponentInteraction,
        app: &Arc<AppState>,
    ) -> BotResult<()> {
        let _ = (ctx, component, app);
        Ok(())
    }

    /// `session` is the exclusive-session token the dispatcher acquired on
    /// this command's behalf (present iff `exclusive()` is `Some`). A handler
    /// returning `HoldSession` must stash a clone so the follow-up interaction
    /// can release it.
    async fn run(
        &self,
        ctx: &Context,
        msg: &Message,
        args: &[String],
        app: &Arc<AppState>,
        session: Option<&SessionToken>,
    ) -> BotResult<CommandOutcome>;
}

pub struct CommandRegistry {
    commands: Vec<Arc<dyn ChatCommand>>,
    index: HashMap<&'static str, usize>,
    interaction_index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new(commands: Vec<Arc<dyn ChatCommand>>) -> Self {
        let mut index = HashMap::new();
        let mut interaction_index = HashMap::new();
        for (i, command) in commands.iter().enumerate() {
            let clash = index.insert(command.name(), i);
            debug_assert!(clash.is_none(), "duplicate command name {}", command.name());
            for alias in command.aliases() {
                let clash = index.insert(alias, i);
                debug_assert!(clash.is_none(), "duplicate alias {alias}");
            }
            if let Some(family) = command.interaction_prefix() {
                let clash = interaction_index.insert(family, i);
                debug_assert!(clash.is_none(), "duplicate interaction family {family}");
            }
        }
        Self {
            commands,
            index,
            interaction_index,
        }
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn ChatCommand>> {
        self.index.get(name).map(|&i| self.commands[i].clone())
    }

    /// The command that claimed this component `custom_id` family, if any.
    pub fn find_interaction(&self, family: &str) -> Option<Arc<dyn ChatCommand>> {
        self.interaction_index
            .get(family)
            .map(|&i| self.commands[i].clone())
    }

    /// All registered commands in registration order, for help listings.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ChatCommand>> {
        self.commands.iter()
    }
}
