pub mod config;
pub mod export;
pub mod form;
pub mod items;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "show", "summary", "filter", "open", "header", "followup", "clear", "json", "status",
    "describe", "photo", "add", "remove", "validate", "email", "export", "config", "help",
    "version", "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(form::definitions());
    commands.extend(items::definitions());
    commands.extend(export::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_a_place_in_the_order() {
        let entries = all_entries();
        assert_eq!(entries.len(), ROOT_COMMAND_ORDER.len());
        for entry in &entries {
            assert!(ROOT_COMMAND_ORDER.contains(&entry.name), "{}", entry.name);
        }
    }
}
