//! Settings editing and the derived category lists.

use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "settings",
            "Show, edit, save, or reload settings",
            "settings <show|set <field> <value>|save|load>",
            cmd_settings,
        )
        .with_arguments(&["load", "save", "set", "show"]),
        CommandEntry::new(
            "items",
            "List income categories, outgo categories, or tags",
            "items <income|outgo|tags>",
            cmd_items,
        )
        .with_arguments(&["income", "outgo", "tags"]),
    ]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", field, value] => set(context, field, value),
        ["save"] => {
            context.app.save_settings(context.draft.clone())?;
            output::success(format!(
                "Settings saved to {}.",
                context.storage_path.display()
            ));
            Ok(())
        }
        ["load"] => {
            let result = context.app.load_settings();
            context.draft = context.app.settings().clone();
            result?;
            output::success("Settings reloaded.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: settings <show|set <field> <value>|save|load>".into(),
        )),
    }
}

fn show(context: &ShellContext) {
    output::section(format!("Settings ({})", context.app.title()));
    let current = context.app.settings();
    let rows: Vec<(&str, String)> = context
        .draft
        .fields()
        .into_iter()
        .zip(current.fields())
        .map(|((key, draft), (_, saved))| {
            let value = if key == "authToken" && !draft.is_empty() {
                "********".to_string()
            } else {
                draft.to_string()
            };
            if draft == saved {
                (key, value)
            } else {
                (key, format!("{} (unsaved)", value))
            }
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = rows
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    output::two_column(&borrowed);
}

fn set(context: &mut ShellContext, field: &str, value: &str) -> CommandResult {
    if !context.draft.set_field(field, value) {
        let known: Vec<&str> = context.draft.fields().iter().map(|(key, _)| *key).collect();
        return Err(CommandError::InvalidArguments(format!(
            "unknown settings field `{}` (expected one of: {})",
            field,
            known.join(", ")
        )));
    }
    output::info(format!(
        "`{}` updated. Run `settings save` to apply and persist.",
        field
    ));
    Ok(())
}

fn cmd_items(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (label, items) = match args {
        ["income"] => ("Income categories", context.app.income_items()),
        ["outgo"] => ("Outgo categories", context.app.outgo_items()),
        ["tags"] => ("Tags", context.app.tag_items()),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: items <income|outgo|tags>".into(),
            ))
        }
    };
    output::section(label);
    if items.is_empty() {
        output::info("(none)");
    }
    for item in items {
        println!("  {}", item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::shell::handle_line;
    use crate::cli::shell_context::script_context;
    use tempfile::tempdir;

    #[test]
    fn set_only_touches_the_draft_until_saved() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().join("local_storage.json"));

        handle_line(&mut context, "settings set appName 'My Ledger'");
        assert_eq!(context.draft.app_name, "My Ledger");
        assert_eq!(context.app.settings().app_name, "GAS 家計簿");

        handle_line(&mut context, "settings save");
        assert_eq!(context.app.settings().app_name, "My Ledger");
        assert_eq!(context.app.title(), "My Ledger");
    }

    #[test]
    fn saved_settings_survive_a_new_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        let mut first = script_context(path.clone());
        handle_line(&mut first, "settings set strTagItems '旅行, 医療'");
        handle_line(&mut first, "settings save");

        let second = script_context(path);
        assert_eq!(second.app.tag_items(), vec!["旅行", "医療"]);
        assert_eq!(second.draft.str_tag_items, "旅行, 医療");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().join("local_storage.json"));
        let err = cmd_settings(&mut context, &["set", "theme", "dark"]).unwrap_err();
        assert!(err.to_string().contains("unknown settings field"));
    }
}
