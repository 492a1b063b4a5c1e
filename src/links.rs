//! Link resolution: internal slugs vs versioned external reference URLs.

/// Settings the resolver needs to classify and render a link.
#[derive(Debug, Clone)]
pub struct LinkContext {
    /// Base URL for external API documentation.
    pub external_base: String,
    /// Full host framework version; truncated to major.minor in URLs.
    pub framework_version: String,
    /// Root namespace segment reserved for the documented project.
    pub internal_root: String,
}

impl LinkContext {
    /// Build a context from loaded configuration.
    pub fn new(config: &crate::config::Config) -> Self {
        return Self {
            external_base: config.external_base.clone(),
            framework_version: config.framework_version.clone(),
            internal_root: config.internal_root.clone(),
        };
    }
}

/// A resolved reference to an entity, tagged by which namespace root it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// A third-party entity, linked into the framework's published API docs.
    External {
        /// Full URL of the external documentation page.
        url: String,
    },
    /// An entity of the documented project, addressed by storage slug.
    Internal {
        /// Path-safe identifier, also the document's storage key.
        slug: String,
    },
}

/// Classify a qualified name as internal or external and produce its target.
///
/// Internal when the root namespace segment equals the reserved project root:
/// the slug kebab-cases every segment independently. External otherwise: the
/// slug keeps original casing with separators swapped, and the URL embeds the
/// framework version truncated to major.minor.
pub fn resolve(qualified_name: &str, ctx: &LinkContext) -> Link {
    let root = qualified_name.split('\\').next().unwrap_or("");

    if root == ctx.internal_root {
        return Link::Internal {
            slug: internal_slug(qualified_name),
        };
    }

    let slug = qualified_name.replace('\\', "/");
    let version = major_minor(&ctx.framework_version);
    return Link::External {
        url: format!("{}/{version}/{slug}.html", ctx.external_base),
    };
}

/// Render a markdown link for one qualified name.
pub fn markdown_link(qualified_name: &str, ctx: &LinkContext) -> String {
    return match resolve(qualified_name, ctx) {
        Link::Internal { slug } => format!("[{qualified_name}](/{slug}.html)"),
        Link::External { url } => format!("[{qualified_name}]({url})"),
    };
}

/// Render a comma-joined list of markdown links, preserving input order.
/// No deduplication.
pub fn resolve_many(qualified_names: &[String], ctx: &LinkContext) -> String {
    let links: Vec<String> = qualified_names
        .iter()
        .map(|name| markdown_link(name, ctx))
        .collect();
    return links.join(", ");
}

/// The storage slug for an internal entity: every namespace segment
/// kebab-cased, joined with path separators.
pub fn internal_slug(qualified_name: &str) -> String {
    let parts: Vec<String> = qualified_name.split('\\').map(kebab).collect();
    return parts.join("/");
}

/// Kebab-case one namespace segment: a hyphen before every upper-case letter
/// after the first character, then lowercase throughout.
fn kebab(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_uppercase() && !out.is_empty() {
            out.push('-');
        }
        for lower in c.to_lowercase() {
            out.push(lower);
        }
    }
    return out;
}

/// Truncate a version string to its major.minor components.
fn major_minor(version: &str) -> String {
    let parts: Vec<&str> = version.split('.').take(2).collect();
    return parts.join(".");
}
