//! Core domain types for classdoc entities, members, and parameters.

/// A class-like declaration extracted from source. The unit of documentation.
///
/// Qualified names are globally unique within a run; the ancestor chain is
/// single-inheritance and finite. Member sequences preserve declaration order.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// Qualified name of the single ancestor class, if any.
    pub ancestor: Option<String>,
    /// Fields declared directly by this entity, in declaration order.
    pub fields: Vec<MemberDescriptor>,
    /// Qualified names of implemented interfaces, in declaration order.
    pub interfaces: Vec<String>,
    /// Whether this is a class, interface, or trait.
    pub kind: EntityKind,
    /// Methods declared directly by this entity, in declaration order.
    pub methods: Vec<MemberDescriptor>,
    /// Namespace portion of the qualified name (empty for the global namespace).
    pub namespace: String,
    /// Fully qualified name, e.g. `App\Models\User`.
    pub qualified_name: String,
    /// Unqualified name, e.g. `User`.
    pub short_name: String,
    /// Qualified names of composed traits, in declaration order.
    pub traits: Vec<String>,
}

impl EntityDescriptor {
    /// The declared members of the given kind, in declaration order.
    pub fn members(&self, kind: MemberKind) -> &[MemberDescriptor] {
        match kind {
            MemberKind::Method => &self.methods,
            MemberKind::Field => &self.fields,
        }
    }
}

/// The source-level kind of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A concrete or abstract class.
    Class,
    /// An interface.
    Interface,
    /// A trait: a reusable member bundle composed into entities without
    /// participating in the ancestor chain.
    Trait,
}

impl EntityKind {
    /// Lowercase label used in listings.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Interface => "interface",
            EntityKind::Trait => "trait",
        }
    }
}

/// A method or field as declared in source.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Raw documentation comment text, including delimiters, if present.
    pub doc_comment: Option<String>,
    /// Whether this member is a method or a field.
    pub kind: MemberKind,
    /// Modifier flags as written in source.
    pub modifiers: Modifiers,
    /// Member name without the `$` sigil.
    pub name: String,
    /// Declared parameters in position order. Always empty for fields.
    pub parameters: Vec<ParameterDescriptor>,
}

/// Distinguishes the two member varieties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A property declaration.
    Field,
    /// A function declaration inside an entity body.
    Method,
}

/// Modifier flags on a member. Visibility is exactly one of three levels;
/// the remaining flags are orthogonal to it and to each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// `abstract` flag.
    pub is_abstract: bool,
    /// `final` flag.
    pub is_final: bool,
    /// `static` flag.
    pub is_static: bool,
    /// Access level. Defaults to public when no modifier is written.
    pub visibility: Visibility,
}

/// A single declared parameter of a method.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Default value literal exactly as written in source, absent when the
    /// parameter is required. Falsy literals like `0` or `false` are kept
    /// verbatim, never collapsed.
    pub default: Option<String>,
    /// Parameter name without the `$` sigil.
    pub name: String,
    /// Zero-based declaration position. Stable across a run.
    pub position: usize,
}

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible to the declaring entity only.
    Private,
    /// Visible to the declaring entity and its descendants.
    Protected,
    /// Visible everywhere.
    #[default]
    Public,
}
