//! Member classification: visibility label, rendering severity, static flag.

use crate::types::{Modifiers, Visibility};

/// The derived classification of one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `static` flag, orthogonal to the label. The renderer appends
    /// ` static` to the prefix when set.
    pub is_static: bool,
    /// Single visibility/modifier label.
    pub label: &'static str,
    /// Callout severity hint for rendering. Not semantically load-bearing.
    pub severity: Severity,
}

/// Rendering severity of a member callout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Plain public members.
    Tip,
    /// Anything non-public.
    Warning,
}

impl Severity {
    /// The callout tag emitted into rendered documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Tip => "tip",
            Severity::Warning => "warning",
        }
    }
}

/// Classify a member's modifiers into a single label.
///
/// Labels are assigned by fixed first-match priority: protected, then
/// private, then abstract, then final, else public. A member that is both
/// protected and abstract classifies as `protected` only. This lossy
/// single-label scheme is a preserved compatibility contract; the full
/// modifier record stays available on `Modifiers` for callers that need it.
pub fn classify(modifiers: &Modifiers) -> Classification {
    let (label, severity) = if modifiers.visibility == Visibility::Protected {
        ("protected", Severity::Warning)
    } else if modifiers.visibility == Visibility::Private {
        ("private", Severity::Warning)
    } else if modifiers.is_abstract {
        ("abstract", Severity::Warning)
    } else if modifiers.is_final {
        ("final", Severity::Warning)
    } else {
        ("public", Severity::Tip)
    };

    Classification {
        is_static: modifiers.is_static,
        label,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiers(visibility: Visibility) -> Modifiers {
        Modifiers {
            visibility,
            ..Modifiers::default()
        }
    }

    #[test]
    fn plain_public_is_a_tip() {
        let c = classify(&modifiers(Visibility::Public));
        assert_eq!(c.label, "public");
        assert_eq!(c.severity, Severity::Tip);
        assert!(!c.is_static);
    }

    #[test]
    fn protected_and_private_are_warnings() {
        assert_eq!(classify(&modifiers(Visibility::Protected)).label, "protected");
        assert_eq!(classify(&modifiers(Visibility::Private)).label, "private");
        assert_eq!(classify(&modifiers(Visibility::Private)).severity, Severity::Warning);
    }

    #[test]
    fn protected_wins_over_abstract() {
        let m = Modifiers {
            is_abstract: true,
            visibility: Visibility::Protected,
            ..Modifiers::default()
        };
        assert_eq!(classify(&m).label, "protected");
    }

    #[test]
    fn public_abstract_classifies_as_abstract() {
        let m = Modifiers {
            is_abstract: true,
            ..Modifiers::default()
        };
        let c = classify(&m);
        assert_eq!(c.label, "abstract");
        assert_eq!(c.severity, Severity::Warning);
    }

    #[test]
    fn abstract_wins_over_final() {
        let m = Modifiers {
            is_abstract: true,
            is_final: true,
            ..Modifiers::default()
        };
        assert_eq!(classify(&m).label, "abstract");
    }

    #[test]
    fn public_final_classifies_as_final() {
        let m = Modifiers {
            is_final: true,
            ..Modifiers::default()
        };
        assert_eq!(classify(&m).label, "final");
    }

    #[test]
    fn static_flag_is_orthogonal_to_the_label() {
        let m = Modifiers {
            is_static: true,
            visibility: Visibility::Private,
            ..Modifiers::default()
        };
        let c = classify(&m);
        assert_eq!(c.label, "private");
        assert!(c.is_static);
    }
}
