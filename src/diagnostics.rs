use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is an
/// obvious next step, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::SourceRootNotFound { path } => format!(
            "\
# Error: Source Root Not Found

`{}` does not exist or is not a directory.

## Fix

Point classdoc at your PHP sources, either in `.classdoc.toml`:

    source = \"app\"

or on the command line:

    classdoc generate --source path/to/app
",
            path.display()
        ),

        Error::EntityNotFound { name } => format!(
            "\
# Error: Unknown Entity

No indexed class, interface, or trait is named `{name}`.

## Fix

List what the index contains:

    classdoc list
"
        ),

        Error::ParseFailed { file, reason } => format!(
            "\
# Error: Parse Failed

Could not parse `{}`: {reason}
",
            file.display()
        ),

        Error::SinkWrite { path, reason } => format!(
            "\
# Error: Write Failed

Could not write `{}`: {reason}
",
            path.display()
        ),

        Error::TomlDe(e) => format!(
            "\
# Error: Invalid Config

`.classdoc.toml` is not valid TOML:

{e}
"
        ),

        Error::Io(e) => format!(
            "\
# Error: I/O

{e}
"
        ),

        Error::JsonSer(e) => format!(
            "\
# Error: JSON Serialization

{e}
"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_root_diagnostic_names_the_path_and_the_fix() {
        let e = Error::SourceRootNotFound {
            path: std::path::PathBuf::from("missing/app"),
        };
        let md = render_error(&e);
        assert!(md.contains("`missing/app`"));
        assert!(md.contains("--source"));
    }

    #[test]
    fn unknown_entity_diagnostic_suggests_listing() {
        let e = Error::EntityNotFound {
            name: "App\\Nope".to_string(),
        };
        let md = render_error(&e);
        assert!(md.contains("classdoc list"));
    }
}
