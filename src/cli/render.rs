//! Text layouts for the checklist: the interactive section listing and the
//! plain document captured on export.

use assessment_core::{
    project, CaptureSurface, ProjectedInstance, ProjectedSection, StatusTally, SummaryService,
    NO_NOT_OK_LINE,
};
use assessment_domain::{FollowUpField, FormData, HeaderField, Item};
use colored::Colorize;

use super::output::{self, status_badge};
use super::shell_context::ShellContext;

/// Short reference usable as command arguments, e.g. `3.3#2`.
pub fn instance_ref(item: &Item, position: usize) -> String {
    format!("{}#{}", item.id, position + 1)
}

fn section_counts(tally: &StatusTally) -> String {
    format!("{}/{} answered", tally.filled(), tally.total)
}

/// Prints sections according to the context's display state. `only` forces
/// a single section open regardless of the accordion.
pub fn print_sections(context: &ShellContext, only: Option<usize>) {
    let form = context.store.form();
    let sections = project(form, context.display.filter);
    if context.display.filter.is_filtering() && sections.is_empty() {
        output::info(NO_NOT_OK_LINE);
        return;
    }

    for projected in sections
        .iter()
        .filter(|projected| only.map_or(true, |index| index == projected.index))
    {
        let open = only.is_some() || context.display.is_open(projected.index);
        print_section(context, projected, open);
    }
}

fn print_section(context: &ShellContext, projected: &ProjectedSection<'_>, open: bool) {
    let tally = SummaryService::tally_section(projected.section);
    let flagged = projected
        .section
        .instances()
        .filter(|instance| context.store.is_flagged(instance.id))
        .count();
    let marker = if open { "v" } else { ">" };
    let mut heading = format!(
        "{marker} [{}] {} ({})",
        projected.index + 1,
        projected.section.title,
        section_counts(&tally)
    );
    if flagged > 0 {
        heading.push_str(&format!(", {flagged} need attention"));
    }
    println!("{}", heading.bold());
    if !open {
        return;
    }

    for projected_item in &projected.items {
        for entry in &projected_item.instances {
            print_instance(context, projected_item.item, entry);
        }
    }
}

fn print_instance(context: &ShellContext, item: &Item, entry: &ProjectedInstance<'_>) {
    let instance = entry.instance;
    let flag = if context.store.is_flagged(instance.id) {
        "!".red().bold().to_string()
    } else {
        " ".to_string()
    };
    println!(
        "  {flag} {:<7} {}  {}",
        instance_ref(item, entry.coord.instance),
        item.instance_title(entry.coord.instance),
        status_badge(instance.status)
    );
    if instance.has_description() {
        println!("            {}", instance.description.trim().italic());
    }
    if let Some(label) = context.previews.handle(instance.id) {
        println!("            {}", label.text.dimmed());
    }
}

pub fn print_header(form: &FormData) {
    let rows: Vec<(&str, &str)> = HeaderField::ALL
        .iter()
        .map(|field| (field.label(), form.header.get(*field)))
        .collect();
    output::two_column(&rows);
}

pub fn print_follow_up(form: &FormData) {
    let rows: Vec<(&str, &str)> = FollowUpField::ALL
        .iter()
        .map(|field| (field.label(), form.follow_up.get(*field)))
        .collect();
    output::two_column(&rows);
}

pub fn print_summary(form: &FormData) {
    let total = SummaryService::tally(form);
    output::two_column(&[
        ("OK", total.ok.to_string()),
        ("Not OK", total.not_ok.to_string()),
        ("N/A", total.not_applicable.to_string()),
        ("Not filled", total.not_filled.to_string()),
        (
            "Progress",
            format!("{}% ({}/{})", total.completion_percent(), total.filled(), total.total),
        ),
    ]);
    output::separator();
    for (section, tally) in form.sections.iter().zip(SummaryService::per_section(form)) {
        println!(
            "  {:<40} ok {:>2}  not-ok {:>2}  n/a {:>2}  open {:>2}",
            section.title, tally.ok, tally.not_ok, tally.not_applicable, tally.not_filled
        );
    }
}

/// Plain-text document of the captured surface, one entry per line.
pub fn document_lines(surface: &CaptureSurface<'_>, scale: f32) -> Vec<String> {
    let form = surface.form;
    let mut lines = vec!["AREA ASSESSMENT".to_string(), String::new()];
    for field in HeaderField::ALL {
        lines.push(format!("{}: {}", field.label(), form.header.get(field)));
    }
    lines.push(format!("Capture scale: {scale}x"));

    for projected in &surface.sections {
        lines.push(String::new());
        lines.push(format!("== {} ==", projected.section.title));
        for projected_item in &projected.items {
            let item = projected_item.item;
            for entry in &projected_item.instances {
                let status = entry.instance.status.map_or("-", |status| status.label());
                lines.push(format!(
                    "  {:<6} {:<44} {status}",
                    instance_ref(item, entry.coord.instance),
                    item.instance_title(entry.coord.instance)
                ));
                if entry.instance.has_description() {
                    lines.push(format!("         Description: {}", entry.instance.description.trim()));
                }
                if let Some(photo) = &entry.instance.photo {
                    lines.push(format!("         Photo: {} ({})", photo.file_name, photo.media_type));
                }
            }
        }
    }

    lines.push(String::new());
    lines.push("== Notes & Follow-up ==".to_string());
    for field in FollowUpField::ALL {
        lines.push(format!("{}: {}", field.label(), form.follow_up.get(field)));
    }

    let tally = SummaryService::tally(form);
    lines.push(String::new());
    lines.push(format!(
        "OK {} | Not OK {} | N/A {} | Not filled {} | {}% complete",
        tally.ok,
        tally.not_ok,
        tally.not_applicable,
        tally.not_filled,
        tally.completion_percent()
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_core::{DisplayState, FormStore, ViewFilter};
    use assessment_domain::{Photo, Status};

    #[test]
    fn document_lists_every_instance_with_details() {
        let mut store = FormStore::default();
        let rdf = store.resolve_item("3.3").unwrap();
        store.add_instance(rdf).unwrap();
        store.set_instance_status(rdf.instance(1), Status::NotOk).unwrap();
        store.set_instance_description(rdf.instance(1), "conveyor jam").unwrap();
        store
            .set_instance_photo(rdf.instance(1), Some(Photo::new("jam.jpg", "image/jpeg", vec![1, 2])))
            .unwrap();

        let form = store.snapshot();
        let surface = CaptureSurface {
            form: &form,
            display: DisplayState::CAPTURE,
            sections: project(&form, ViewFilter::All),
        };
        let lines = document_lines(&surface, 2.0);

        let rows = lines.iter().filter(|line| line.starts_with("  ") && line.contains('#')).count();
        assert_eq!(rows, form.instance_count());
        assert!(lines.iter().any(|line| line.contains("3.3#2") && line.ends_with("Not OK")));
        assert!(lines.contains(&"         Description: conveyor jam".to_string()));
        assert!(lines.contains(&"         Photo: jam.jpg (image/jpeg)".to_string()));
        assert!(lines.contains(&"Capture scale: 2x".to_string()));
    }
}
