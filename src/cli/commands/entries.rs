//! Month fetching and entry editing commands.

use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::domain::{parse_entry_date, LedgerEntry, YearMonth};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "fetch",
            "Load a month so entries can be added to it",
            "fetch <YYYY-MM>",
            cmd_fetch,
        ),
        CommandEntry::new(
            "add",
            "Add an income or outgo entry",
            "add <YYYY-MM-DD> <title> <category> <income|outgo> <amount> [tags] [memo]",
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List fetched months, or the entries of one month",
            "list [YYYY-MM]",
            cmd_list,
        ),
        CommandEntry::new(
            "edit",
            "Change one field of an entry; a new date may move it to another month",
            "edit <YYYY-MM> <id> <date|title|category|tags|memo|income|outgo> <value>",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Delete an entry",
            "delete <YYYY-MM> <id>",
            cmd_delete,
        ),
    ]
}

fn usage(context: &ShellContext, name: &str) -> CommandError {
    let usage = context
        .registry
        .get(name)
        .map(|entry| entry.usage)
        .unwrap_or(name);
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

fn parse_year_month(raw: &str) -> Result<YearMonth, CommandError> {
    Ok(raw.parse::<YearMonth>()?)
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid amount `{}`", raw)))
}

fn month_label(entry: &LedgerEntry) -> String {
    entry
        .year_month()
        .map(|year_month| year_month.to_string())
        .unwrap_or_else(|| entry.date.clone())
}

fn cmd_fetch(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage(context, "fetch"));
    };
    let year_month = parse_year_month(raw)?;
    let count = context.app.fetch(year_month.as_str())?;
    output::success(format!("Fetched {} with {} entries.", year_month, count));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, title, category, kind, amount, rest @ ..] = args else {
        return Err(usage(context, "add"));
    };
    if rest.len() > 2 {
        return Err(usage(context, "add"));
    }
    parse_entry_date(date)?;
    let amount = parse_amount(amount)?;

    let mut entry = LedgerEntry::new(*date, *title, *category);
    entry = match kind.to_ascii_lowercase().as_str() {
        "income" => entry.with_income(amount),
        "outgo" => entry.with_outgo(amount),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "entry kind must be `income` or `outgo`, not `{}`",
                other
            )))
        }
    };
    if let Some(tags) = rest.first() {
        entry = entry.with_tags(*tags);
    }
    if let Some(memo) = rest.get(1) {
        entry = entry.with_memo(*memo);
    }
    warn_unknown_category(context, &entry, kind);

    let id = entry.id.clone();
    let year_month = month_label(&entry);
    let outcome = context.app.add(entry);
    if outcome.is_applied() {
        output::info(format!("New entry id: {}", id));
    }
    context.report_mutation(outcome, "added", &year_month);
    Ok(())
}

fn warn_unknown_category(context: &ShellContext, entry: &LedgerEntry, kind: &str) {
    let known = if kind.eq_ignore_ascii_case("income") {
        context.app.income_items()
    } else {
        context.app.outgo_items()
    };
    if !known.iter().any(|item| *item == entry.category) {
        output::warning(format!(
            "Category `{}` is not in the configured {} list.",
            entry.category,
            kind.to_ascii_lowercase()
        ));
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => list_months(context),
        [raw] => {
            let year_month = parse_year_month(raw)?;
            list_entries(context, &year_month);
            Ok(())
        }
        _ => Err(usage(context, "list")),
    }
}

fn list_months(context: &ShellContext) -> CommandResult {
    let store = context.app.store();
    output::section("Fetched months");
    let mut any = false;
    for year_month in store.year_months() {
        any = true;
        let entries = store.bucket(year_month.as_str()).unwrap_or_default();
        let balance: f64 = entries.iter().map(LedgerEntry::amount).sum();
        output::info(format!(
            "  {}  {:>3} entries  balance {:>10.0}",
            year_month,
            entries.len(),
            balance
        ));
    }
    if !any {
        output::info("No months fetched yet. Use `fetch <YYYY-MM>`.");
    }
    Ok(())
}

fn list_entries(context: &ShellContext, year_month: &YearMonth) {
    let Some(entries) = context.app.bucket(year_month.as_str()) else {
        output::warning(format!("Month {} is not fetched.", year_month));
        return;
    };
    output::section(format!("Entries for {}", year_month));
    if entries.is_empty() {
        output::info("No entries.");
        return;
    }
    for entry in entries {
        let amount = match (entry.income, entry.outgo) {
            (Some(income), _) => format!("+{:.0}", income),
            (None, Some(outgo)) => format!("-{:.0}", outgo),
            (None, None) => "-".to_string(),
        };
        println!(
            "  {:<8}  {}  {:>10}  {} [{}] {}",
            entry.id, entry.date, amount, entry.title, entry.category, entry.tags
        );
    }
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_month, id, field, value] = args else {
        return Err(usage(context, "edit"));
    };
    let year_month = parse_year_month(raw_month)?;
    let Some(existing) = context.app.store().entry(year_month.as_str(), id) else {
        return Err(CommandError::InvalidArguments(format!(
            "no entry `{}` in {}",
            id, year_month
        )));
    };

    let mut edited = existing.clone();
    match field.to_ascii_lowercase().as_str() {
        "date" => {
            parse_entry_date(value)?;
            edited.date = value.to_string();
        }
        "title" => edited.title = value.to_string(),
        "category" => edited.category = value.to_string(),
        "tags" => edited.tags = value.to_string(),
        "memo" => edited.memo = value.to_string(),
        "income" => edited = edited.with_income(parse_amount(value)?),
        "outgo" => edited = edited.with_outgo(parse_amount(value)?),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown entry field `{}`",
                other
            )))
        }
    }

    let target = month_label(&edited);
    let outcome = context.app.update(year_month.as_str(), edited);
    context.report_mutation(outcome, "updated", &target);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_month, id] = args else {
        return Err(usage(context, "delete"));
    };
    let year_month = parse_year_month(raw_month)?;
    let target = context
        .app
        .store()
        .entry(year_month.as_str(), id)
        .cloned()
        .unwrap_or_else(|| LedgerEntry::new(year_month.day(1), "", "").with_id(*id));
    let outcome = context.app.delete(&target);
    context.report_mutation(outcome, "deleted", year_month.as_str());
    Ok(())
}
