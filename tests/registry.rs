//! Registry wiring: every command is reachable by name and alias, and the
//! gate requirements commands declare are self-consistent.

use croupier_bot::commands;
use croupier_bot::dispatch::CommandRegistry;
use std::collections::HashSet;

#[test]
fn all_names_and_aliases_resolve() {
    let registry = CommandRegistry::new(commands::all());
    for command in registry.iter() {
        let by_name = registry.find(command.name()).expect("name must resolve");
        assert_eq!(by_name.name(), command.name());
        for alias in command.aliases() {
            let by_alias = registry.find(alias).expect("alias must resolve");
            assert_eq!(by_alias.name(), command.name());
        }
    }
}

#[test]
fn names_and_aliases_do_not_collide() {
    let mut seen = HashSet::new();
    for command in commands::all() {
        assert!(seen.insert(command.name().to_string()), "dup {}", command.name());
        for alias in command.aliases() {
            assert!(seen.insert(alias.to_string()), "dup alias {alias}");
        }
    }
}

#[test]
fn unknown_commands_do_not_resolve() {
    let registry = CommandRegistry::new(commands::all());
    assert!(registry.find("slots").is_none());
    assert!(registry.find("").is_none());
}

#[test]
fn gambling_commands_declare_cooldowns() {
    let registry = CommandRegistry::new(commands::all());
    for name in ["dice", "roulette", "rob", "dig", "work"] {
        let command = registry.find(name).unwrap();
        assert!(
            !command.cooldown().is_zero(),
            "{name} must carry a cooldown"
        );
    }
    // Wager is the exclusive-session command; its TTL bounds a crashed holder.
    let wager = registry.find("wager").unwrap();
    assert!(wager.exclusive().is_some());
    assert!(registry.find("balance").unwrap().exclusive().is_none());
}

#[test]
fn interaction_families_route_to_their_command() {
    let registry = CommandRegistry::new(commands::all());
    let wager = registry
        .find_interaction("wager")
        .expect("wager claims its button family");
    assert_eq!(wager.name(), "wager");
    assert!(registry.find_interaction("poll").is_none());
    assert!(registry.find_interaction("").is_none());
}

#[test]
fn every_command_documents_itself() {
    for command in commands::all() {
        assert!(!command.usage().is_empty(), "{} has no usage", command.name());
        assert!(
            !command.description().is_empty(),
            "{} has no description",
            command.name()
        );
        assert!(
            command.usage().starts_with(command.name()),
            "{} usage should start with its name",
            command.name()
        );
    }
}
