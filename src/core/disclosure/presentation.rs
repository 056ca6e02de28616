//! Identity presentation
//!
//! Pure mapping from a stored identity to what may be rendered. The alias is
//! always the primary label; the real name only ever appears as a secondary
//! field (or as a transcript sender label once a conversation is revealed).

use super::types::{DisclosurePresentation, UserIdentity, VisibilityLevel};

/// Compute the presentation of `identity`.
///
/// `force_reveal` is set when the viewer and the author share a mutually
/// revealed conversation; it overrides the author's public visibility level
/// for that viewer only.
pub fn present(
    identity: &UserIdentity,
    viewer_is_owner: bool,
    force_reveal: bool,
) -> DisclosurePresentation {
    let display_name = identity.alias.clone();
    let role = identity.role().map(str::to_string);
    let real_name = identity.trimmed_real_name().map(str::to_string);

    if viewer_is_owner || force_reveal {
        return DisclosurePresentation {
            display_name,
            real_name,
            role,
            school: identity.school.clone(),
            graduation_year: identity.graduation_year,
            is_anonymous: false,
        };
    }

    match identity.visibility_level {
        VisibilityLevel::RealName => DisclosurePresentation {
            display_name,
            real_name,
            role,
            school: identity.school.clone(),
            graduation_year: identity.graduation_year,
            is_anonymous: false,
        },
        VisibilityLevel::School => DisclosurePresentation {
            display_name,
            real_name: None,
            role,
            school: identity.school.clone(),
            graduation_year: identity.graduation_year,
            is_anonymous: true,
        },
        VisibilityLevel::Role => DisclosurePresentation {
            display_name,
            real_name: None,
            role,
            school: None,
            graduation_year: None,
            is_anonymous: true,
        },
        VisibilityLevel::Anonymous => DisclosurePresentation {
            display_name,
            real_name: None,
            role: None,
            school: None,
            graduation_year: None,
            is_anonymous: true,
        },
    }
}

/// Sender label inside a conversation transcript: the real name once the
/// conversation is mutually revealed, the alias otherwise
pub fn sender_label(identity: &UserIdentity, conversation_revealed: bool) -> String {
    match identity.trimmed_real_name() {
        Some(name) if conversation_revealed => name.to_string(),
        _ => identity.alias.clone(),
    }
}
