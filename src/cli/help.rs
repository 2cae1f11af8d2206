use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        println!("  {:<10} {}", entry.name, entry.description);
    }
    output::info("Use `help <command>` for details. Press `?` or Tab to complete.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::two_column(&[("Description", entry.description), ("Usage", entry.usage)]);
}
