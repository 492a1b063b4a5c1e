//! Entity summarization: combine ownership, classification, docblock data,
//! and link resolution into one immutable summary per entity.

use serde::Serialize;

use crate::classify::{Severity, classify};
use crate::docblock::DocblockParser;
use crate::index::ProjectIndex;
use crate::links::{LinkContext, markdown_link, resolve_many};
use crate::ownership::owned_members;
use crate::types::{EntityDescriptor, EntityKind, MemberDescriptor, MemberKind};

/// Sentinel rendered when an entity has no ancestor, interfaces, or traits.
pub const NOTHING: &str = "Nothing";

/// The complete structured summary of one entity. Immutable once built;
/// the renderer is a pure function of this data.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    /// Rendered ancestor link, or the `Nothing` sentinel.
    pub extends: String,
    /// Comma-joined interface links, or the `Nothing` sentinel.
    pub implements: String,
    /// Source-level kind of the entity.
    pub kind: EntityKind,
    /// Owned methods in declaration order.
    pub methods: Vec<MemberSummary>,
    /// Namespace portion of the qualified name.
    pub namespace: String,
    /// Owned fields in declaration order.
    pub properties: Vec<MemberSummary>,
    /// Fully qualified name.
    pub qualified_name: String,
    /// Unqualified name, used as the document title.
    pub short_name: String,
    /// Comma-joined trait links, or the `Nothing` sentinel.
    pub uses: String,
}

/// One classified, doc-enriched member ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    /// Human description from the docblock, if any.
    pub description: Option<String>,
    /// Member name without the `$` sigil.
    pub name: String,
    /// Parameter summaries in position order. Empty for fields.
    pub params: Vec<ParamSummary>,
    /// Visibility label with ` static` appended when applicable.
    pub prefix: String,
    /// Callout severity for rendering.
    pub severity: Severity,
    /// Canonical signature string.
    pub signature: String,
    /// Return type for methods (`void` fallback), value type for fields
    /// (`mixed` fallback).
    pub type_name: String,
}

/// One summarized parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSummary {
    /// Rendered default literal, present only for optional parameters.
    /// Falsy literals like `0` and `false` are preserved verbatim.
    pub default: Option<String>,
    /// Docblock description, if any.
    pub description: Option<String>,
    /// Parameter name.
    pub name: String,
    /// Docblock type, `mixed` when absent.
    pub type_name: String,
}

/// Build the summary for one entity against the project index.
pub fn summarize(
    entity: &EntityDescriptor,
    index: &ProjectIndex,
    ctx: &LinkContext,
    parser: &DocblockParser,
) -> EntitySummary {
    let extends = entity
        .ancestor
        .as_deref()
        .map_or_else(|| NOTHING.to_string(), |a| markdown_link(a, ctx));
    let implements = link_list(&entity.interfaces, ctx);
    let uses = link_list(&entity.traits, ctx);

    let methods = owned_members(entity, index, MemberKind::Method)
        .into_iter()
        .map(|m| summarize_method(m, parser))
        .collect();
    let properties = owned_members(entity, index, MemberKind::Field)
        .into_iter()
        .map(|f| summarize_field(f, parser))
        .collect();

    EntitySummary {
        extends,
        implements,
        kind: entity.kind,
        methods,
        namespace: entity.namespace.clone(),
        properties,
        qualified_name: entity.qualified_name.clone(),
        short_name: entity.short_name.clone(),
        uses,
    }
}

/// Comma-joined links, or the sentinel for an empty list.
fn link_list(names: &[String], ctx: &LinkContext) -> String {
    if names.is_empty() {
        NOTHING.to_string()
    } else {
        resolve_many(names, ctx)
    }
}

/// Classify a method, correlate docblock tags with declared parameters by
/// position, and assemble the canonical signature.
fn summarize_method(member: &MemberDescriptor, parser: &DocblockParser) -> MemberSummary {
    let classification = classify(&member.modifiers);
    let prefix = member_prefix(classification.label, classification.is_static);
    let doc = parser.parse(member.doc_comment.as_deref(), MemberKind::Method);

    let mut params = Vec::new();
    let mut param_strings = Vec::new();
    for parameter in &member.parameters {
        // Positional correlation: the tag at the parameter's declaration
        // position wins, whatever `$name` the tag itself mentions.
        let tag = doc.params.get(parameter.position);
        let type_name = tag.map_or_else(|| "mixed".to_string(), |t| t.type_name.clone());
        let description = tag.and_then(|t| t.description.clone());
        let default = parameter.default.as_deref().map(render_default);

        let mut rendered = format!("{type_name} ${}", parameter.name);
        if let Some(default) = &default {
            rendered.push_str(&format!(" = {default}"));
        }
        param_strings.push(rendered);

        params.push(ParamSummary {
            default,
            description,
            name: parameter.name.clone(),
            type_name,
        });
    }

    let return_type = doc.return_type.unwrap_or_else(|| "void".to_string());
    let signature = format!(
        "{prefix} function {}( {} ) : {return_type}",
        member.name,
        param_strings.join(", ")
    );

    MemberSummary {
        description: doc.description,
        name: member.name.clone(),
        params,
        prefix,
        severity: classification.severity,
        signature,
        type_name: return_type,
    }
}

/// Classify a field and derive its type and description from the `@var` tag.
fn summarize_field(member: &MemberDescriptor, parser: &DocblockParser) -> MemberSummary {
    let classification = classify(&member.modifiers);
    let prefix = member_prefix(classification.label, classification.is_static);
    let doc = parser.parse(member.doc_comment.as_deref(), MemberKind::Field);

    let type_name = doc
        .var
        .as_ref()
        .map_or_else(|| "mixed".to_string(), |v| v.type_name.clone());
    // Field descriptions come from the tag only; the free-text line is not
    // used as a fallback.
    let description = doc.var.as_ref().and_then(|v| v.description.clone());
    let signature = format!("{prefix} ${};", member.name);

    MemberSummary {
        description,
        name: member.name.clone(),
        params: Vec::new(),
        prefix,
        severity: classification.severity,
        signature,
        type_name,
    }
}

fn member_prefix(label: &str, is_static: bool) -> String {
    if is_static {
        format!("{label} static")
    } else {
        label.to_string()
    }
}

/// Render a default-value literal for the signature. Array literals always
/// render as an empty container regardless of contents; every other literal
/// is kept verbatim, including falsy ones.
fn render_default(literal: &str) -> String {
    let trimmed = literal.trim();
    if trimmed.starts_with('[') || trimmed.starts_with("array(") {
        "[]".to_string()
    } else {
        trimmed.to_string()
    }
}
