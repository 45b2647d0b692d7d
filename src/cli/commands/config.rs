use assessment_config::ConfigKey;
use assessment_core::ExportService;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        CommandGroup::System,
        "Show or change preferences",
        "config [key [value]]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw_key, rest)) = args.split_first() else {
        output::section("Configuration");
        let rows: Vec<(&str, String)> = ConfigKey::ALL
            .iter()
            .map(|key| (key.key(), context.config.get(*key)))
            .collect();
        output::two_column(&rows);
        output::hint(format!(
            "Stored at {}",
            context.config_manager.config_path().display()
        ));
        return Ok(());
    };

    let key: ConfigKey = raw_key.parse()?;
    if rest.is_empty() {
        io::print_info(format!("{key} = {}", context.config.get(key)));
        return Ok(());
    }

    let mut updated = context.config.clone();
    updated.set(key, &rest.join(" "))?;
    context.config = updated;
    context.persist_config()?;

    match key {
        ConfigKey::Scale => context.exporter = ExportService::new(context.config.pdf_scale),
        ConfigKey::Color => output::apply_config(&context.config),
        _ => {}
    }
    io::print_success(format!("{key} = {}", context.config.get(key)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use tempfile::tempdir;

    #[test]
    fn invalid_value_keeps_previous_setting() {
        let home = tempdir().unwrap();
        let context =
            process_script(home.path(), &["config scale 3", "config scale zero"]).unwrap();
        assert_eq!(context.config.pdf_scale, 3.0);
        assert_eq!(context.exporter.snapshot_request(context.store.form()).scale, 3.0);
    }
}
