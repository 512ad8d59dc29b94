//! Keystroke validation for numeric fields

use super::field::FieldKind;

/// Decide whether `candidate` may stand as the new content of a field of `kind`.
///
/// An empty candidate is always allowed so a field can be cleared while
/// editing. Categorical kinds are picked from fixed enumerations and are not
/// constrained here.
pub fn validate(candidate: &str, kind: FieldKind) -> bool {
    if candidate.is_empty() {
        return true;
    }
    match kind {
        FieldKind::Integer => candidate.chars().all(|c| c.is_ascii_digit()),
        FieldKind::Decimal => {
            if candidate.parse::<f64>().is_err() {
                return false;
            }
            match candidate.split_once('.') {
                Some((_, fraction)) => fraction.chars().count() <= 1,
                None => true,
            }
        }
        FieldKind::City | FieldKind::Binary => true,
    }
}
