//! Document rendering: one markdown page per entity summary.
//!
//! Pure and total: any summary renders to a complete document with a title,
//! metadata table, methods section, and properties section. Empty sections
//! get fixed placeholder sentences.

use std::fmt::Write as _;

use crate::summary::{EntitySummary, MemberSummary};

/// Render the markdown document for one entity summary.
/// Rendering the same summary twice yields byte-identical output.
pub fn render(summary: &EntitySummary) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# {}", summary.short_name);
    md.push('\n');
    let _ = writeln!(md, "## `{}`", summary.qualified_name);
    md.push('\n');
    md.push_str("|                |         |\n");
    md.push_str("| -------------: | :------ |\n");
    let _ = writeln!(md, "| **Extends**    | {} |", summary.extends);
    let _ = writeln!(md, "| **Implements** | {} |", summary.implements);
    let _ = writeln!(md, "| **Uses**       | {} |", summary.uses);
    md.push('\n');

    md.push_str("### Methods\n");
    if summary.methods.is_empty() {
        md.push('\n');
        md.push_str("> There are no methods for this class.\n");
    } else {
        for method in &summary.methods {
            render_method(&mut md, method);
        }
    }

    md.push('\n');
    md.push_str("### Properties\n");
    if summary.properties.is_empty() {
        md.push('\n');
        md.push_str("> There are no properties for this class.\n");
    } else {
        for property in &summary.properties {
            render_property(&mut md, property);
        }
    }

    strip_leading_indentation(&md)
}

/// One callout block per method: severity-tagged heading, optional
/// description, signature, and a parameter table when parameters exist.
fn render_method(md: &mut String, method: &MemberSummary) {
    md.push('\n');
    let _ = writeln!(md, "::: {} {}", method.severity.as_str(), method.name);
    md.push_str("-----\n");

    if let Some(description) = &method.description {
        let _ = writeln!(md, "{description}");
        md.push('\n');
    }

    md.push_str("```php{4}\n");
    let _ = writeln!(md, "{}", method.signature);
    md.push_str("```\n");

    if !method.params.is_empty() {
        md.push('\n');
        md.push_str("| Parameter | Type(s)   | Description |\n");
        md.push_str("| --------- | :-------: | :----------- |\n");
        for param in &method.params {
            // Any present default marks the parameter optional, falsy
            // defaults included.
            let marker = if param.default.is_some() {
                "<Badge text=\"optional\" type=\"warn\"/>"
            } else {
                ""
            };
            let description = param.description.as_deref().unwrap_or("");
            let _ = writeln!(
                md,
                "| `${}`{marker} | `{}` | {description} |",
                param.name, param.type_name
            );
        }
    }

    md.push_str(":::\n");
}

/// One callout block per property: heading, optional description,
/// signature, and the value type.
fn render_property(md: &mut String, property: &MemberSummary) {
    md.push('\n');
    let _ = writeln!(md, "::: {} ${}", property.severity.as_str(), property.name);
    md.push_str("-----\n");

    if let Some(description) = &property.description {
        let _ = writeln!(md, "{description}");
        md.push('\n');
    }

    md.push_str("```php{4}\n");
    let _ = writeln!(md, "{}", property.signature);
    md.push_str("```\n");
    md.push_str("***Type***\n");
    let _ = writeln!(md, "* `{}`", property.type_name);
    md.push_str(":::\n");
}

/// Strip leading space indentation from every line. Template assembly must
/// never leak indentation artifacts into the output.
fn strip_leading_indentation(md: &str) -> String {
    let mut out = String::with_capacity(md.len());
    for line in md.lines() {
        out.push_str(line.trim_start_matches(' '));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Severity;
    use crate::summary::{EntitySummary, MemberSummary, ParamSummary};
    use crate::types::EntityKind;

    fn empty_summary() -> EntitySummary {
        EntitySummary {
            extends: "Nothing".to_string(),
            implements: "Nothing".to_string(),
            kind: EntityKind::Class,
            methods: Vec::new(),
            namespace: "App".to_string(),
            properties: Vec::new(),
            qualified_name: "App\\Empty".to_string(),
            short_name: "Empty".to_string(),
            uses: "Nothing".to_string(),
        }
    }

    fn greet_method() -> MemberSummary {
        MemberSummary {
            description: Some("Greet another user.".to_string()),
            name: "greet".to_string(),
            params: vec![
                ParamSummary {
                    default: None,
                    description: Some("Name to greet.".to_string()),
                    name: "who".to_string(),
                    type_name: "string".to_string(),
                },
                ParamSummary {
                    default: Some("0".to_string()),
                    description: None,
                    name: "times".to_string(),
                    type_name: "int".to_string(),
                },
            ],
            prefix: "public".to_string(),
            severity: Severity::Tip,
            signature: "public function greet( string $who, int $times = 0 ) : string"
                .to_string(),
            type_name: "string".to_string(),
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut summary = empty_summary();
        summary.methods.push(greet_method());

        assert_eq!(render(&summary), render(&summary));
    }

    #[test]
    fn empty_sections_render_placeholders() {
        let md = render(&empty_summary());
        assert!(md.contains("> There are no methods for this class."));
        assert!(md.contains("> There are no properties for this class."));
    }

    #[test]
    fn document_structure_is_title_table_methods_properties() {
        let md = render(&empty_summary());
        let title = md.find("# Empty").unwrap();
        let qualified = md.find("## `App\\Empty`").unwrap();
        let table = md.find("| **Extends**").unwrap();
        let methods = md.find("### Methods").unwrap();
        let properties = md.find("### Properties").unwrap();

        assert!(title < qualified);
        assert!(qualified < table);
        assert!(table < methods);
        assert!(methods < properties);
    }

    #[test]
    fn parameters_with_defaults_get_the_optional_badge() {
        let mut summary = empty_summary();
        summary.methods.push(greet_method());
        let md = render(&summary);

        assert!(md.contains("| `$who` | `string` | Name to greet. |"));
        assert!(md.contains("| `$times`<Badge text=\"optional\" type=\"warn\"/> | `int` |  |"));
    }

    #[test]
    fn method_block_is_severity_tagged_with_fenced_signature() {
        let mut summary = empty_summary();
        summary.methods.push(greet_method());
        let md = render(&summary);

        assert!(md.contains("::: tip greet"));
        assert!(md.contains(
            "```php{4}\npublic function greet( string $who, int $times = 0 ) : string\n```"
        ));
        assert!(!md.contains("> There are no methods for this class."));
    }

    #[test]
    fn property_block_lists_its_type() {
        let mut summary = empty_summary();
        summary.properties.push(MemberSummary {
            description: None,
            name: "name".to_string(),
            params: Vec::new(),
            prefix: "protected".to_string(),
            severity: Severity::Warning,
            signature: "protected $name;".to_string(),
            type_name: "string".to_string(),
        });
        let md = render(&summary);

        assert!(md.contains("::: warning $name"));
        assert!(md.contains("***Type***\n* `string`"));
    }

    #[test]
    fn no_line_carries_leading_indentation() {
        let mut summary = empty_summary();
        summary.methods.push(greet_method());
        for line in render(&summary).lines() {
            assert!(!line.starts_with(' '), "indented line: {line:?}");
        }
    }
}
