use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{review, user};
use crate::error::AppError;

/// Request body for creating or replacing the caller's review of a film.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpsertReviewRequest {
    pub film_id: i32,
    /// Integer star rating, 1-10.
    #[schema(example = 8)]
    pub rating: i32,
    /// Optional comment, at most 500 characters before sanitization.
    pub comment: Option<String>,
}

pub fn validate_upsert_review(payload: &UpsertReviewRequest) -> Result<(), AppError> {
    if !(1..=10).contains(&payload.rating) {
        return Err(AppError::Validation(
            "Rating must be an integer between 1 and 10".into(),
        ));
    }
    if let Some(comment) = &payload.comment
        && comment.chars().count() > 500
    {
        return Err(AppError::Validation(
            "Comment must be at most 500 characters".into(),
        ));
    }
    Ok(())
}

/// Author projection nested in each review.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewAuthor {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
}

impl From<user::Model> for ReviewAuthor {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            image: u.image,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub film_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: ReviewAuthor,
}

impl ReviewResponse {
    pub fn new(m: review::Model, author: ReviewAuthor) -> Self {
        Self {
            id: m.id,
            film_id: m.film_id,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
            updated_at: m.updated_at,
            user: author,
        }
    }
}

/// Film review list plus its aggregate.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewResponse>,
    /// Mean rating rounded to one decimal; `null` when there are no reviews.
    #[schema(example = 8.0)]
    pub average: Option<f64>,
    pub count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewUpsertResponse {
    pub review: ReviewResponse,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ReviewListQuery {
    /// Film whose reviews to list.
    pub film_id: i32,
}

/// Mean of the given ratings rounded to one decimal; `None` when empty.
pub fn rounded_average(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
