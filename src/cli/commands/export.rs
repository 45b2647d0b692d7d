use assessment_core::{ExportOutcome, ValidationReport};

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::document::TextDocumentRenderer;
use crate::cli::io;
use crate::cli::mail::ConsoleMailHandoff;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::render;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "validate",
            CommandGroup::Export,
            "Check every instance and flag the incomplete ones",
            "validate",
            cmd_validate,
        ),
        CommandEntry::new(
            "email",
            CommandGroup::Export,
            "Compose the report as an email draft",
            "email [recipient]",
            cmd_email,
        ),
        CommandEntry::new(
            "export",
            CommandGroup::Export,
            "Write the paginated assessment document",
            "export",
            cmd_export,
        ),
    ]
}

/// Prints the diagnostics and opens the first section that needs work.
fn report_problems(context: &mut ShellContext, report: &ValidationReport) {
    for message in report.messages() {
        io::print_warning(message);
    }
    io::print_info(format!(
        "{} instance(s) need attention.",
        report.invalid_count()
    ));
    if let Some(section) = report.first_invalid_section {
        context.display.focus(section);
        render::print_sections(context, Some(section));
    }
}

fn cmd_validate(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.store.validate_all();
    if report.is_valid() {
        io::print_success(format!(
            "All {} instances are complete.",
            context.store.form().instance_count()
        ));
    } else {
        report_problems(context, &report);
    }
    Ok(())
}

fn cmd_email(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    email_report(context, args, |context| {
        io::prompt_text_with_default(
            &context.theme,
            "Recipient",
            &context.config.default_recipient,
        )
    })
}

/// Validates first; the recipient is only asked for once the form is complete.
fn email_report<F>(context: &mut ShellContext, args: &[&str], ask_recipient: F) -> CommandResult
where
    F: FnOnce(&ShellContext) -> Result<String, CommandError>,
{
    let report = context.store.validate_all();
    if !report.is_valid() {
        report_problems(context, &report);
        return Ok(());
    }

    let recipient = match (args.is_empty(), context.mode) {
        (false, _) => args.join(" "),
        (true, CliMode::Script) => context.config.default_recipient.clone(),
        (true, CliMode::Interactive) => ask_recipient(context)?,
    };
    let recipient = recipient.trim().to_string();
    if recipient.is_empty() {
        return Err(CommandError::InvalidArguments(
            "recipient cannot be empty".into(),
        ));
    }

    let mut mail = ConsoleMailHandoff::stdout();
    match context
        .exporter
        .send_email(&mut context.store, &recipient, &mut mail)?
    {
        ExportOutcome::Completed(_) => {
            io::print_success(format!("Email draft for {recipient} is ready."));
        }
        ExportOutcome::Blocked(report) => report_problems(context, &report),
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut renderer = TextDocumentRenderer::new(
        context.config.resolve_export_dir(),
        context.config.lines_per_page,
    );
    match context.exporter.export_document(
        &mut context.store,
        &mut context.display,
        &mut renderer,
    )? {
        ExportOutcome::Completed(artifact) => {
            io::print_success(format!(
                "Document written to {} ({} page(s)).",
                artifact.location, artifact.pages
            ));
        }
        ExportOutcome::Blocked(report) => report_problems(context, &report),
    }
    Ok(())
}
