use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::core::{Action, ActionOutcome};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "action",
            "Dispatch a raw action object, e.g. {\"action\":\"fetchAbData\",\"yearMonth\":\"2024-05\"}",
            "action <json>",
            cmd_action,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_action(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: action <json>".into()));
    }
    let action = Action::from_json(&args.join(" "))?;
    let name = action.name();
    let outcome = context.app.dispatch(action)?;
    if matches!(outcome, ActionOutcome::SettingsSaved | ActionOutcome::SettingsLoaded) {
        context.draft = context.app.settings().clone();
    }
    match outcome {
        ActionOutcome::Fetched { year_month, count } => {
            output::success(format!("{}: {} with {} entries.", name, year_month, count))
        }
        ActionOutcome::Mutated(mutation) => output::info(format!("{}: {:?}", name, mutation)),
        ActionOutcome::SettingsSaved | ActionOutcome::SettingsLoaded => {
            output::success(format!("{}: done.", name))
        }
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Kakeibo Core {}", meta.version));
    let rows = meta.rows();
    let borrowed: Vec<_> = rows
        .iter()
        .map(|(label, value)| (*label, value.as_str()))
        .collect();
    output::two_column(&borrowed);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::shell::handle_line;
    use crate::cli::shell_context::{script_context, LoopControl};
    use tempfile::tempdir;

    #[test]
    fn action_command_dispatches_json() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().join("local_storage.json"));

        handle_line(
            &mut context,
            r#"action '{"action":"fetchAbData","yearMonth":"2024-05"}'"#,
        );
        handle_line(
            &mut context,
            r#"action '{"action":"addAbData","item":{"id":"x1","date":"2024-05-10","title":"Bus","category":"交通費","outgo":220}}'"#,
        );

        let bucket = context.app.bucket("2024-05").unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].outgo, Some(220.0));
    }

    #[test]
    fn bad_action_json_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().join("local_storage.json"));
        assert!(cmd_action(&mut context, &["{nope"]).is_err());
        assert_eq!(handle_line(&mut context, "action {nope"), LoopControl::Continue);
    }

    #[test]
    fn exit_stops_the_loop() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().join("local_storage.json"));
        assert_eq!(handle_line(&mut context, "exit"), LoopControl::Exit);
        assert!(!context.running);
    }
}
