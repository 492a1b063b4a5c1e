//! Source indexing: walk a PHP tree, parse class-like declarations with
//! tree-sitter, and build entity descriptors ahead of time.
//!
//! This replaces runtime reflection with an up-front parse-and-index pass:
//! candidate files are enumerated in deterministic order, and a file that
//! contains no class-like declaration is skipped, not an error.

use std::collections::HashMap;
use std::path::Path;

use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

use crate::error::Error;
use crate::types::{
    EntityDescriptor, EntityKind, MemberDescriptor, MemberKind, Modifiers, ParameterDescriptor,
    Visibility,
};

/// All entities extracted from one source tree, in discovery order, with a
/// lookup table by qualified name.
pub struct ProjectIndex {
    by_name: HashMap<String, usize>,
    /// Number of candidate `.php` files enumerated.
    pub candidate_files: usize,
    entities: Vec<EntityDescriptor>,
    /// Candidate files that resolved to no documentable entity.
    pub skipped_files: usize,
}

impl ProjectIndex {
    /// Build an index directly from descriptors. First declaration of a
    /// qualified name wins; later duplicates are dropped.
    pub fn from_entities(entities: Vec<EntityDescriptor>) -> Self {
        let mut index = Self {
            by_name: HashMap::new(),
            candidate_files: 0,
            entities: Vec::new(),
            skipped_files: 0,
        };
        for entity in entities {
            index.insert(entity);
        }
        index
    }

    /// Look up an entity by fully qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<&EntityDescriptor> {
        self.by_name.get(qualified_name).map(|i| &self.entities[*i])
    }

    fn insert(&mut self, entity: EntityDescriptor) {
        if self.by_name.contains_key(&entity.qualified_name) {
            return;
        }
        self.by_name.insert(entity.qualified_name.clone(), self.entities.len());
        self.entities.push(entity);
    }

    /// Whether the index holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate entities in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.iter()
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

/// Walk `root` for `.php` files and index every class-like declaration.
///
/// # Errors
///
/// Returns `Error::SourceRootNotFound` if `root` is not a directory, or
/// `Error::ParseFailed` if the PHP grammar cannot be loaded. Individual
/// files that cannot be read or parsed are skipped, never fatal.
pub fn build(root: &Path) -> Result<ProjectIndex, Error> {
    if !root.is_dir() {
        return Err(Error::SourceRootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut parser = php_parser(root)?;
    let mut index = ProjectIndex::from_entities(Vec::new());

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "php"))
    {
        index.candidate_files += 1;

        let Ok(source) = std::fs::read_to_string(entry.path()) else {
            index.skipped_files += 1;
            continue;
        };
        let Some(tree) = parser.parse(&source, None) else {
            index.skipped_files += 1;
            continue;
        };

        let entities = extract_entities(tree.root_node(), &source);
        if entities.is_empty() {
            index.skipped_files += 1;
            continue;
        }
        for entity in entities {
            index.insert(entity);
        }
    }

    Ok(index)
}

/// Construct a tree-sitter parser configured for PHP.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the grammar version is incompatible.
fn php_parser(root: &Path) -> Result<Parser, Error> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
        .map_err(|e| Error::ParseFailed {
            file: root.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(parser)
}

// ── File-level extraction ──────────────────────────────────────────────

/// Walk top-level program nodes: track the namespace and `use` imports,
/// extract each class-like declaration.
fn extract_entities(program: Node<'_>, source: &str) -> Vec<EntityDescriptor> {
    let mut namespace = String::new();
    let mut uses: HashMap<String, String> = HashMap::new();
    let mut entities = Vec::new();

    let mut cursor = program.walk();
    for node in program.named_children(&mut cursor) {
        match node.kind() {
            "namespace_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    namespace = node_text(name, source);
                }
            },
            "namespace_use_declaration" => collect_use_clauses(node, source, &mut uses),
            "class_declaration" => {
                if let Some(e) = extract_entity(node, EntityKind::Class, &namespace, &uses, source)
                {
                    entities.push(e);
                }
            },
            "interface_declaration" => {
                if let Some(e) =
                    extract_entity(node, EntityKind::Interface, &namespace, &uses, source)
                {
                    entities.push(e);
                }
            },
            "trait_declaration" => {
                if let Some(e) = extract_entity(node, EntityKind::Trait, &namespace, &uses, source)
                {
                    entities.push(e);
                }
            },
            _ => {},
        }
    }

    entities
}

/// Record each `use Foo\Bar;` / `use Foo\Bar as Baz;` clause keyed by its
/// alias (or last segment when unaliased). The alias is a `name` node under
/// the clause's `alias` field, so the imported name is the first name-like
/// child that is not the alias.
fn collect_use_clauses(node: Node<'_>, source: &str, uses: &mut HashMap<String, String>) {
    let mut cursor = node.walk();
    for clause in node.named_children(&mut cursor) {
        if clause.kind() != "namespace_use_clause" {
            continue;
        }

        let alias = clause.child_by_field_name("alias");
        let mut imported: Option<String> = None;
        let mut inner = clause.walk();
        for child in clause.named_children(&mut inner) {
            if alias.is_some_and(|a| a.id() == child.id()) {
                continue;
            }
            if matches!(child.kind(), "name" | "qualified_name") {
                imported = Some(strip_leading_separator(&node_text(child, source)));
            }
        }

        if let Some(imported) = imported {
            let key = alias.map_or_else(
                || last_segment(&imported).to_string(),
                |a| node_text(a, source),
            );
            uses.insert(key, imported);
        }
    }
}

// ── Entity extraction ──────────────────────────────────────────────────

/// Build a descriptor for one class/interface/trait declaration node.
fn extract_entity(
    node: Node<'_>,
    kind: EntityKind,
    namespace: &str,
    uses: &HashMap<String, String>,
    source: &str,
) -> Option<EntityDescriptor> {
    let short_name = node_text(node.child_by_field_name("name")?, source);
    let qualified_name = if namespace.is_empty() {
        short_name.clone()
    } else {
        format!("{namespace}\\{short_name}")
    };

    let mut ancestor = None;
    let mut interfaces = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "base_clause" => {
                let names = resolve_clause_names(child, namespace, uses, source);
                match kind {
                    // Classes have a single ancestor.
                    EntityKind::Class => ancestor = names.into_iter().next(),
                    // Interfaces may extend several; treat them as interface links.
                    EntityKind::Interface => interfaces.extend(names),
                    EntityKind::Trait => {},
                }
            },
            "class_interface_clause" => {
                interfaces.extend(resolve_clause_names(child, namespace, uses, source));
            },
            _ => {},
        }
    }

    let body = node.child_by_field_name("body")?;
    let (methods, fields, traits) = extract_body(body, namespace, uses, source);

    Some(EntityDescriptor {
        ancestor,
        fields,
        interfaces,
        kind,
        methods,
        namespace: namespace.to_string(),
        qualified_name,
        short_name,
        traits,
    })
}

/// Walk a declaration list collecting methods, fields, and trait uses.
/// A `/**` comment node pairs with the declaration that immediately
/// follows it; any other node in between discards it.
fn extract_body(
    body: Node<'_>,
    namespace: &str,
    uses: &HashMap<String, String>,
    source: &str,
) -> (Vec<MemberDescriptor>, Vec<MemberDescriptor>, Vec<String>) {
    let mut methods = Vec::new();
    let mut fields = Vec::new();
    let mut traits = Vec::new();
    let mut pending_doc: Option<String> = None;

    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "comment" => {
                let text = node_text(child, source);
                pending_doc = text.starts_with("/**").then_some(text);
            },
            "use_declaration" => {
                traits.extend(resolve_clause_names(child, namespace, uses, source));
                pending_doc = None;
            },
            "method_declaration" => {
                if let Some(m) = extract_method(child, pending_doc.take(), source) {
                    methods.push(m);
                }
            },
            "property_declaration" => {
                extract_fields(child, pending_doc.take(), source, &mut fields);
            },
            _ => {
                pending_doc = None;
            },
        }
    }

    (methods, fields, traits)
}

/// Extract a method descriptor: modifiers, name, ordered parameters.
fn extract_method(
    node: Node<'_>,
    doc_comment: Option<String>,
    source: &str,
) -> Option<MemberDescriptor> {
    let name = node_text(node.child_by_field_name("name")?, source);
    let modifiers = collect_modifiers(node, source);

    let mut parameters = Vec::new();
    if let Some(list) = node.child_by_field_name("parameters") {
        let mut cursor = list.walk();
        for param in list.named_children(&mut cursor) {
            if !param.kind().ends_with("parameter") {
                continue;
            }
            let Some(name_node) = param.child_by_field_name("name") else {
                continue;
            };
            let default = param
                .child_by_field_name("default_value")
                .map(|d| node_text(d, source));
            parameters.push(ParameterDescriptor {
                default,
                name: strip_sigil(&node_text(name_node, source)),
                position: parameters.len(),
            });
        }
    }

    Some(MemberDescriptor {
        doc_comment,
        kind: MemberKind::Method,
        modifiers,
        name,
        parameters,
    })
}

/// Extract field descriptors from one property declaration. A single
/// statement may declare several properties sharing modifiers and docblock.
fn extract_fields(
    node: Node<'_>,
    doc_comment: Option<String>,
    source: &str,
    fields: &mut Vec<MemberDescriptor>,
) {
    let modifiers = collect_modifiers(node, source);

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "property_element" {
            continue;
        }
        let Some(name) = property_element_name(child, source) else {
            continue;
        };
        fields.push(MemberDescriptor {
            doc_comment: doc_comment.clone(),
            kind: MemberKind::Field,
            modifiers,
            name,
            parameters: Vec::new(),
        });
    }
}

/// The variable name of a property element, without the `$` sigil.
fn property_element_name(element: Node<'_>, source: &str) -> Option<String> {
    let mut cursor = element.walk();
    for child in element.named_children(&mut cursor) {
        if child.kind() == "variable_name" {
            return Some(strip_sigil(&node_text(child, source)));
        }
    }
    None
}

/// Read modifier nodes off a member declaration.
fn collect_modifiers(node: Node<'_>, source: &str) -> Modifiers {
    let mut modifiers = Modifiers::default();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "visibility_modifier" => {
                modifiers.visibility = match node_text(child, source).as_str() {
                    "protected" => Visibility::Protected,
                    "private" => Visibility::Private,
                    _ => Visibility::Public,
                };
            },
            "static_modifier" => modifiers.is_static = true,
            "abstract_modifier" => modifiers.is_abstract = true,
            "final_modifier" => modifiers.is_final = true,
            _ => {},
        }
    }

    modifiers
}

// ── Name resolution ────────────────────────────────────────────────────

/// Resolve every type name inside an extends/implements/use clause.
fn resolve_clause_names(
    clause: Node<'_>,
    namespace: &str,
    uses: &HashMap<String, String>,
    source: &str,
) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "name" | "qualified_name" => {
                names.push(resolve_type_name(&node_text(child, source), namespace, uses));
            },
            _ => {},
        }
    }
    names
}

/// Resolve a source-level type name to a fully qualified name using PHP's
/// rules: a leading `\` is already fully qualified, a head segment matching
/// a `use` import expands through it, anything else prefixes the current
/// namespace.
fn resolve_type_name(raw: &str, namespace: &str, uses: &HashMap<String, String>) -> String {
    let raw = raw.trim();
    if let Some(stripped) = raw.strip_prefix('\\') {
        return stripped.to_string();
    }

    let head = raw.split('\\').next().unwrap_or(raw);
    if let Some(imported) = uses.get(head) {
        let rest = &raw[head.len()..];
        return format!("{imported}{rest}");
    }

    if namespace.is_empty() {
        raw.to_string()
    } else {
        format!("{namespace}\\{raw}")
    }
}

// ── Small helpers ──────────────────────────────────────────────────────

fn last_segment(qualified: &str) -> &str {
    qualified.rsplit('\\').next().unwrap_or(qualified)
}

fn node_text(node: Node<'_>, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or_default().to_string()
}

fn strip_leading_separator(name: &str) -> String {
    name.trim_start_matches('\\').to_string()
}

fn strip_sigil(variable: &str) -> String {
    variable.trim_start_matches('$').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_php_source(source: &str) -> Result<Vec<EntityDescriptor>, Error> {
        let anon = Path::new("<memory>");
        let mut parser = php_parser(anon)?;
        let tree = parser.parse(source, None).ok_or_else(|| Error::ParseFailed {
            file: anon.to_path_buf(),
            reason: "tree-sitter returned None".to_string(),
        })?;
        Ok(extract_entities(tree.root_node(), source))
    }

    #[test]
    fn extracts_class_with_namespace_and_members() {
        let source = r"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Model;

class User extends Model
{
    /**
     * The user's display name.
     *
     * @var string $name Human readable name.
     */
    protected $name;

    /**
     * Greet another user.
     *
     * @param string $who Name to greet.
     * @return string
     */
    public function greet($who, $punctuation = '!')
    {
        return 'hi';
    }
}
";
        let entities = parse_php_source(source).unwrap();
        assert_eq!(entities.len(), 1);

        let user = &entities[0];
        assert_eq!(user.qualified_name, "App\\Models\\User");
        assert_eq!(user.short_name, "User");
        assert_eq!(user.namespace, "App\\Models");
        assert_eq!(user.kind, EntityKind::Class);
        assert_eq!(
            user.ancestor.as_deref(),
            Some("Illuminate\\Database\\Eloquent\\Model")
        );

        assert_eq!(user.fields.len(), 1);
        assert_eq!(user.fields[0].name, "name");
        assert_eq!(user.fields[0].modifiers.visibility, Visibility::Protected);
        assert!(user.fields[0].doc_comment.as_deref().unwrap().contains("@var string"));

        assert_eq!(user.methods.len(), 1);
        let greet = &user.methods[0];
        assert_eq!(greet.name, "greet");
        assert_eq!(greet.parameters.len(), 2);
        assert_eq!(greet.parameters[0].name, "who");
        assert_eq!(greet.parameters[0].position, 0);
        assert!(greet.parameters[0].default.is_none());
        assert_eq!(greet.parameters[1].default.as_deref(), Some("'!'"));
    }

    #[test]
    fn resolves_interfaces_and_traits_against_imports() {
        let source = r"<?php

namespace App\Services;

use App\Contracts\Renderable as Page;
use App\Concerns\Cachable;

class Builder implements Page, \JsonSerializable
{
    use Cachable;

    public function build() {}
}
";
        let entities = parse_php_source(source).unwrap();
        let builder = &entities[0];

        assert_eq!(
            builder.interfaces,
            vec!["App\\Contracts\\Renderable".to_string(), "JsonSerializable".to_string()]
        );
        assert_eq!(builder.traits, vec!["App\\Concerns\\Cachable".to_string()]);
    }

    #[test]
    fn aliased_ancestors_resolve_through_the_alias() {
        let source = r"<?php

namespace App\Repositories;

use App\Support\Repository as Base;

class UserRepository extends Base
{
}
";
        let entities = parse_php_source(source).unwrap();
        assert_eq!(
            entities[0].ancestor.as_deref(),
            Some("App\\Support\\Repository")
        );
    }

    #[test]
    fn unimported_short_names_prefix_the_current_namespace() {
        let source = r"<?php

namespace App\Models;

class Admin extends User
{
}
";
        let entities = parse_php_source(source).unwrap();
        assert_eq!(entities[0].ancestor.as_deref(), Some("App\\Models\\User"));
    }

    #[test]
    fn file_without_classes_yields_no_entities() {
        let source = "<?php\n\nfunction helper() { return 1; }\n";
        let entities = parse_php_source(source).unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn interface_and_trait_declarations_are_indexed() {
        let source = r"<?php

namespace App\Contracts;

interface Renderable
{
    public function render();
}

trait HasSlug
{
    public function slug() {}
}
";
        let entities = parse_php_source(source).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].kind, EntityKind::Interface);
        assert_eq!(entities[1].kind, EntityKind::Trait);
        assert_eq!(entities[1].qualified_name, "App\\Contracts\\HasSlug");
    }

    #[test]
    fn static_and_abstract_modifiers_are_recorded() {
        let source = r"<?php

namespace App;

abstract class Repo
{
    abstract protected function find($id);

    public static function make() {}
}
";
        let entities = parse_php_source(source).unwrap();
        let repo = &entities[0];

        let find = &repo.methods[0];
        assert!(find.modifiers.is_abstract);
        assert_eq!(find.modifiers.visibility, Visibility::Protected);

        let make = &repo.methods[1];
        assert!(make.modifiers.is_static);
        assert_eq!(make.modifiers.visibility, Visibility::Public);
    }
}
