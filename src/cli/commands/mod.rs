pub mod entries;
pub mod settings;
pub mod system;

use crate::cli::registry::CommandEntry;

/// Every shell command in help order.
pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(entries::definitions());
    commands.extend(settings::definitions());
    commands.extend(system::definitions());
    commands
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn command_names_are_unique_and_lowercase() {
        let entries = all_entries();
        let names: HashSet<_> = entries.iter().map(|entry| entry.name).collect();
        assert_eq!(names.len(), entries.len());
        assert!(names.iter().all(|name| *name == name.to_lowercase()));
    }
}
