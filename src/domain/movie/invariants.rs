use crate::domain::movie::MovieDraft;
use crate::domain::{DomainError, DomainResult};

/// Check the required-field invariants of a movie write.
///
/// Matches the form contract: a non-empty trimmed title, a selected category,
/// and a rating that parsed as an actual number. Import drafts bypass this,
/// they may legitimately carry no category.
pub fn validate_movie_draft(draft: &MovieDraft) -> DomainResult<()> {
    if draft.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "movie title must not be empty".to_string(),
        ));
    }

    if draft.category_id.is_none() {
        return Err(DomainError::InvariantViolation(
            "a category must be selected".to_string(),
        ));
    }

    if !draft.rating.is_finite() {
        return Err(DomainError::InvariantViolation(
            "rating must be a number".to_string(),
        ));
    }

    Ok(())
}
