use std::{fs, path::Path};

use assessment_core::InstanceCoord;
use assessment_domain::{Photo, Status};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::errors::AppError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            CommandGroup::Items,
            "Set a status; repeating the same status clears it",
            "status <item> <n> <ok|not-ok|na>",
            cmd_status,
        ),
        CommandEntry::new(
            "describe",
            CommandGroup::Items,
            "Set the description of an instance",
            "describe <item> <n> <text>",
            cmd_describe,
        ),
        CommandEntry::new(
            "photo",
            CommandGroup::Items,
            "Attach an image file to an instance, or remove it",
            "photo <item> <n> <path>|none",
            cmd_photo,
        ),
        CommandEntry::new(
            "add",
            CommandGroup::Items,
            "Append another instance to a repeatable item",
            "add <item>",
            cmd_add,
        ),
        CommandEntry::new(
            "remove",
            CommandGroup::Items,
            "Remove an instance; the last one always stays",
            "remove <item> <n>",
            cmd_remove,
        ),
    ]
}

/// Display reference for a coordinate, e.g. `3.3#2`.
fn reference(context: &ShellContext, coord: InstanceCoord) -> String {
    context
        .store
        .form()
        .item(coord.section, coord.item)
        .map(|item| format!("{}#{}", item.id, coord.instance + 1))
        .unwrap_or_else(|| coord.to_string())
}

fn warn_if_flagged(context: &ShellContext, coord: InstanceCoord) -> CommandResult {
    let instance = context.store.instance(coord)?;
    if context.store.is_flagged(instance.id) {
        io::print_warning(format!(
            "{} is Not OK and needs a description.",
            reference(context, coord)
        ));
    }
    Ok(())
}

fn instance_args<'a>(
    context: &ShellContext,
    args: &'a [&'a str],
    usage: &str,
) -> Result<(InstanceCoord, &'a [&'a str]), CommandError> {
    match args {
        [item, number, rest @ ..] => Ok((context.resolve_instance(item, number)?, rest)),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn cmd_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "status <item> <n> <ok|not-ok|na>";
    let (coord, rest) = instance_args(context, args, usage)?;
    let [raw] = rest else {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    };
    let requested: Status = raw
        .parse()
        .map_err(|err: assessment_domain::StatusParseError| {
            CommandError::InvalidArguments(err.to_string())
        })?;

    let result = context.store.set_instance_status(coord, requested)?;
    let label = reference(context, coord);
    match result {
        Some(status) => io::print_success(format!("{label} marked {status}.")),
        None => io::print_info(format!("{label} status cleared.")),
    }
    warn_if_flagged(context, coord)
}

fn cmd_describe(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (coord, rest) = instance_args(context, args, "describe <item> <n> <text>")?;
    context.store.set_instance_description(coord, &rest.join(" "))?;
    io::print_success(format!("{} description updated.", reference(context, coord)));
    warn_if_flagged(context, coord)
}

fn cmd_photo(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "photo <item> <n> <path>|none";
    let (coord, rest) = instance_args(context, args, usage)?;
    let [raw] = rest else {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    };

    let label = reference(context, coord);
    if raw.eq_ignore_ascii_case("none") {
        context.store.set_instance_photo(coord, None)?;
        io::print_success(format!("{label} photo removed."));
        return Ok(());
    }

    let photo = load_photo(Path::new(raw))?;
    let file_name = photo.file_name.clone();
    context.store.set_instance_photo(coord, Some(photo))?;
    io::print_success(format!("{label} photo set to {file_name}."));
    Ok(())
}

/// Reads an image file; anything that is not `image/*` is refused.
fn load_photo(path: &Path) -> Result<Photo, CommandError> {
    let media_type = media_type_for(path).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "`{}` is not a supported image (jpg, png, gif, webp, bmp, heic)",
            path.display()
        ))
    })?;
    let bytes = fs::read(path)
        .map_err(|err| AppError::Storage(format!("{}: {err}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Photo::new(file_name, media_type, bytes))
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(media)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [item_id] = args else {
        return Err(CommandError::InvalidArguments("usage: add <item>".into()));
    };
    let coord = context.resolve_item(item_id)?;
    let repeatable = context
        .store
        .form()
        .item(coord.section, coord.item)
        .is_some_and(|item| item.is_repeatable);
    if !repeatable {
        return Err(CommandError::InvalidArguments(format!(
            "item {item_id} cannot be repeated"
        )));
    }
    context.store.add_instance(coord)?;
    let count = context
        .store
        .form()
        .item(coord.section, coord.item)
        .map_or(0, |item| item.instance_count());
    io::print_success(format!("Added {item_id}#{count}."));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "remove <item> <n>";
    let (coord, rest) = instance_args(context, args, usage)?;
    if !rest.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    let label = reference(context, coord);
    if !context.confirm(&format!("Remove {label}?"))? {
        return Ok(());
    }
    if context.store.remove_instance(coord)? {
        io::print_success(format!("Removed {label}; later instances were renumbered."));
    } else {
        io::print_warning(format!("{label} is the only instance and was kept."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_extensions_are_accepted() {
        assert_eq!(media_type_for(Path::new("a/B.JPG")), Some("image/jpeg"));
        assert_eq!(media_type_for(Path::new("leak.png")), Some("image/png"));
        assert_eq!(media_type_for(Path::new("notes.pdf")), None);
        assert_eq!(media_type_for(Path::new("noext")), None);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = load_photo(Path::new("/definitely/missing.jpg")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.jpg"));
    }
}
