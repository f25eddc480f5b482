//! Movie Entity
//!
//! An owned resource. The owner is set from the resolved session
//! identity at creation and there is no way to change it afterwards;
//! updates go through [`Movie::apply`], which touches content fields
//! only.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_object::{MovieId, UserId};

/// Validated movie content fields
///
/// Built by the application layer after field validation; entities
/// never see raw client input.
#[derive(Debug, Clone)]
pub struct MovieContent {
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub description: String,
}

/// Movie entity
#[derive(Debug, Clone)]
pub struct Movie {
    pub movie_id: MovieId,
    /// Immutable after creation
    pub owner_id: UserId,
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// Create a new movie owned by `owner_id`
    pub fn new(owner_id: UserId, content: MovieContent) -> Self {
        let now = Utc::now();

        Self {
            movie_id: MovieId::new(),
            owner_id,
            title: content.title,
            genre: content.genre,
            release_date: content.release_date,
            description: content.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content fields, leaving identity and ownership alone
    pub fn apply(&mut self, content: MovieContent) {
        self.title = content.title;
        self.genre = content.genre;
        self.release_date = content.release_date;
        self.description = content.description;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> MovieContent {
        MovieContent {
            title: title.to_string(),
            genre: "Drama".to_string(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            description: "A film about things happening.".to_string(),
        }
    }

    #[test]
    fn test_apply_keeps_owner_and_id() {
        let owner = UserId::new();
        let mut movie = Movie::new(owner, content("Original"));
        let id = movie.movie_id;

        movie.apply(content("Updated"));

        assert_eq!(movie.movie_id, id);
        assert_eq!(movie.owner_id, owner);
        assert_eq!(movie.title, "Updated");
    }
}
