use assessment_core::{DisplayState, Expansion, ViewFilter};
use assessment_domain::{FieldParseError, FollowUpField, HeaderField};

use crate::cli::core::{parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::render;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            CommandGroup::Form,
            "List sections; the open section shows its items",
            "show [section]",
            cmd_show,
        ),
        CommandEntry::new(
            "summary",
            CommandGroup::Form,
            "Status counts overall and per section",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "filter",
            CommandGroup::Form,
            "Show only Not OK items, or everything",
            "filter on|off",
            cmd_filter,
        ),
        CommandEntry::new(
            "open",
            CommandGroup::Form,
            "Expand or collapse a section",
            "open <section>|none",
            cmd_open,
        ),
        CommandEntry::new(
            "header",
            CommandGroup::Form,
            "Show or set assessment date, area and assessor",
            "header [date|area|assessor <value>]",
            cmd_header,
        ),
        CommandEntry::new(
            "followup",
            CommandGroup::Form,
            "Show or set the notes and follow-up fields",
            "followup [summary|recommendations|pic|target <value>]",
            cmd_followup,
        ),
        CommandEntry::new(
            "clear",
            CommandGroup::Form,
            "Discard every answer and start a fresh form",
            "clear",
            cmd_clear,
        ),
        CommandEntry::new(
            "json",
            CommandGroup::Form,
            "Print the current form as JSON (photos omitted)",
            "json",
            cmd_json,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let only = args
        .first()
        .map(|raw| context.resolve_section(raw))
        .transpose()?;
    if only.is_none() {
        output::section("Assessment");
        render::print_header(context.store.form());
        println!();
    }
    render::print_sections(context, only);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Summary");
    render::print_summary(context.store.form());
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        Some("on") | Some("not-ok") => ViewFilter::NotOkOnly,
        Some("off") | Some("all") => ViewFilter::All,
        None => {
            let state = if context.display.filter.is_filtering() {
                "on"
            } else {
                "off"
            };
            io::print_info(format!("Not OK filter is {state}."));
            return Ok(());
        }
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "expected `on` or `off`, got `{other}`"
            )))
        }
    };
    context.display.filter = filter;
    io::print_success(if filter.is_filtering() {
        "Showing only items marked Not OK."
    } else {
        "Showing all items."
    });
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: open <section>|none".into(),
        ));
    };
    if raw.eq_ignore_ascii_case("none") {
        context.display.expansion = Expansion::Collapsed;
        return Ok(());
    }
    let section = context.resolve_section(raw)?;
    context.display.toggle_section(section);
    if context.display.is_open(section) {
        render::print_sections(context, Some(section));
    }
    Ok(())
}

fn joined(args: &[&str]) -> String {
    args.join(" ")
}

fn invalid_field(err: FieldParseError) -> CommandError {
    CommandError::InvalidArguments(err.to_string())
}

fn cmd_header(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((key, rest)) = args.split_first() else {
        render::print_header(context.store.form());
        return Ok(());
    };
    let field: HeaderField = key.parse().map_err(invalid_field)?;
    let mut value = joined(rest);
    if field == HeaderField::AssessmentDate {
        value = parse_date(&value)?.format("%Y-%m-%d").to_string();
    }
    context.store.set_header_field(field, &value);
    io::print_success(format!("{} set.", field.label()));
    Ok(())
}

fn cmd_followup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((key, rest)) = args.split_first() else {
        render::print_follow_up(context.store.form());
        return Ok(());
    };
    let field: FollowUpField = key.parse().map_err(invalid_field)?;
    let mut value = joined(rest);
    if field == FollowUpField::TargetDate && !value.trim().is_empty() {
        value = parse_date(&value)?.format("%Y-%m-%d").to_string();
    }
    context.store.set_follow_up_field(field, &value);
    io::print_success(format!("{} set.", field.label()));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Clear every answer, description and photo?")? {
        io::print_info("Nothing cleared.");
        return Ok(());
    }
    let released = context.previews.clear();
    context.store.reset_all();
    context.display = DisplayState::default();
    io::print_success(format!(
        "Form cleared ({released} photo preview(s) released)."
    ));
    Ok(())
}

fn cmd_json(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let json = serde_json::to_string_pretty(context.store.form())?;
    println!("{json}");
    Ok(())
}
