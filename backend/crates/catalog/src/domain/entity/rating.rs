//! Rating Entity
//!
//! A 1-5 score a user gives a movie, at most once per (movie, user).

use chrono::{DateTime, Utc};

use crate::domain::value_object::{MovieId, RatingId, UserId};

/// Inclusive rating bounds
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Rating entity
#[derive(Debug, Clone)]
pub struct Rating {
    pub rating_id: RatingId,
    pub movie_id: MovieId,
    pub user_id: UserId,
    /// Always within [`RATING_MIN`]..=[`RATING_MAX`]
    pub value: u8,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Create a rating; `None` when the value is out of bounds
    pub fn new(movie_id: MovieId, user_id: UserId, value: u8) -> Option<Self> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return None;
        }

        Some(Self {
            rating_id: RatingId::new(),
            movie_id,
            user_id,
            value,
            created_at: Utc::now(),
        })
    }
}

/// Average of a set of rating values, `None` when empty
pub fn average(ratings: &[Rating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(r.value)).sum();
    Some(f64::from(sum) / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let movie = MovieId::new();
        let user = UserId::new();

        assert!(Rating::new(movie, user, 0).is_none());
        assert!(Rating::new(movie, user, 6).is_none());
        for value in RATING_MIN..=RATING_MAX {
            assert!(Rating::new(movie, user, value).is_some());
        }
    }

    #[test]
    fn test_average() {
        let movie = MovieId::new();
        assert_eq!(average(&[]), None);

        let ratings: Vec<Rating> = [2, 3, 4]
            .into_iter()
            .filter_map(|v| Rating::new(movie, UserId::new(), v))
            .collect();
        assert_eq!(average(&ratings), Some(3.0));
    }
}
