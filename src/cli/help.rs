use crate::cli::output::{self, section as output_section};
use crate::cli::registry::{CommandEntry, CommandGroup, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for group in CommandGroup::ALL {
        println!("{}", group.title());
        for entry in registry.in_group(group) {
            println!("  {:<10} {}", entry.name, entry.description);
        }
    }
    output::hint("Use `help <command>` for details. Instance numbers start at 1.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    output::two_column(&[
        ("Description", entry.description),
        ("Usage", entry.usage),
        ("Group", entry.group.title()),
    ]);
}
