//! Ordered command registry built once per shell.

use std::rc::Rc;

use leptos::logging;
use terminal_shell_contract::CommandDescriptor;

use crate::command::Command;

/// Built-ins followed by host extensions. Names are unique ignoring case.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Merges `builtins` with `extensions`.
    ///
    /// An extension whose name is already taken is dropped, so built-ins cannot be overridden
    /// and the first extension with a given name wins.
    pub fn build(builtins: Vec<Command>, extensions: Vec<Command>) -> Self {
        let mut registry = Self {
            commands: Vec::with_capacity(builtins.len() + extensions.len()),
        };
        for command in builtins.into_iter().chain(extensions) {
            if command.name().trim().is_empty() {
                logging::warn!("terminal command with a blank name ignored");
                continue;
            }
            if registry.lookup(command.name()).is_some() {
                logging::warn!(
                    "terminal command `{}` already registered; duplicate ignored",
                    command.name()
                );
                continue;
            }
            registry.commands.push(command);
        }
        registry
    }

    /// Finds a command by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|command| command.descriptor.matches(name))
    }

    /// Returns descriptors in registry order.
    pub fn descriptors(&self) -> Rc<[CommandDescriptor]> {
        self.commands
            .iter()
            .map(|command| command.descriptor.clone())
            .collect()
    }

    /// Returns up to `limit` names containing `partial`, ignoring case, in registry order.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<String> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.commands
            .iter()
            .map(Command::name)
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(limit)
            .map(str::to_string)
            .collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn named(names: &[&str]) -> Vec<Command> {
        names
            .iter()
            .map(|name| Command::text(name, "test command", *name))
            .collect()
    }

    #[test]
    fn substring_suggestions_follow_registry_order() {
        let registry = CommandRegistry::build(named(&["help", "history", "about"]), Vec::new());
        assert_eq!(registry.suggest("h", 5), vec!["help", "history"]);
        assert_eq!(registry.suggest("OUT", 5), vec!["about"]);
        assert!(registry.suggest("   ", 5).is_empty());
    }

    #[test]
    fn suggestions_are_capped() {
        let registry = CommandRegistry::build(
            named(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]),
            Vec::new(),
        );
        assert_eq!(registry.suggest("a", 5).len(), 5);
        assert_eq!(registry.suggest("a", 5)[4], "a5");
    }

    #[test]
    fn extensions_cannot_shadow_builtins_or_each_other() {
        let registry = CommandRegistry::build(
            named(&["help"]),
            vec![
                Command::text("HELP", "shadow", "nope"),
                Command::text("skills", "first", "first"),
                Command::text("Skills", "second", "second"),
            ],
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.lookup("help").map(|command| command.descriptor.description.as_str()),
            Some("test command")
        );
        let skills = registry.lookup("SKILLS").map(|command| command.descriptor.clone());
        assert_eq!(skills.map(|descriptor| descriptor.description), Some("first".to_string()));
    }

    #[test]
    fn lookup_resolves_handlers() {
        let registry = CommandRegistry::build(named(&["about"]), Vec::new());
        let command = registry.lookup("About").map(|command| command.name().to_string());
        assert_eq!(command.as_deref(), Some("about"));
        assert!(registry.lookup("frobnicate").is_none());
    }

    #[test]
    fn non_ascii_names_are_suggested_and_resolved_alike() {
        let registry = CommandRegistry::build(named(&["help"]), named(&["Über"]));
        assert_eq!(registry.suggest("ÜB", 5), vec!["Über"]);
        for typed in ["Über", "über", "ÜBER"] {
            assert_eq!(
                registry.lookup(typed).map(Command::name),
                Some("Über"),
                "{typed}"
            );
        }
    }
}
