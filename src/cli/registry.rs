use std::collections::HashMap;

use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Help grouping for registered commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Form,
    Items,
    Export,
    System,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 4] = [
        CommandGroup::Form,
        CommandGroup::Items,
        CommandGroup::Export,
        CommandGroup::System,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Form => "Form",
            CommandGroup::Items => "Checklist items",
            CommandGroup::Export => "Validation & export",
            CommandGroup::System => "System",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub group: CommandGroup,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        group: CommandGroup,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            group,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.list().into_iter().filter(move |entry| entry.group == group)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }

    /// Closest registered name within edit distance 3.
    pub fn closest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_ascii_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &input), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("status", CommandGroup::Items, "", "", noop));
        registry.register(CommandEntry::new("summary", CommandGroup::Form, "", "", noop));
        registry.register(CommandEntry::new("export", CommandGroup::Export, "", "", noop));
        registry
    }

    #[test]
    fn keeps_registration_order_and_ignores_duplicates() {
        let mut registry = registry();
        registry.register(CommandEntry::new("status", CommandGroup::Items, "", "", noop));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["status", "summary", "export"]);
    }

    #[test]
    fn closest_suggests_typos_only() {
        let registry = registry();
        assert_eq!(registry.closest("stauts"), Some("status"));
        assert_eq!(registry.closest("EXPROT"), Some("export"));
        assert_eq!(registry.closest("photograph"), None);
    }
}
