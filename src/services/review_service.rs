use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::parse_object_id;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

#[derive(Clone)]
pub struct ReviewService {
    reviews: Collection<Review>,
    users: Collection<User>,
}

impl ReviewService {
    pub fn new(db: &Database) -> Self {
        Self {
            reviews: db.collection("reviews"),
            users: db.collection("users"),
        }
    }

    pub async fn product_reviews(
        &self,
        request: GetReviewsRequest,
    ) -> AppResult<Vec<ReviewResponse>> {
        if request.product_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Product ID is required".to_string(),
            ));
        }

        let reviews: Vec<Review> = self
            .reviews
            .find(doc! { "productId": request.product_id.as_str() })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(reviews.into_iter().map(ReviewResponse::from).collect())
    }

    /// 同一 (用户, 商品) 至多一条评论，重复提交覆盖旧评论。
    /// 返回的布尔值表示本次是否为覆盖更新。
    pub async fn add_review(
        &self,
        user_id: &str,
        request: AddReviewRequest,
    ) -> AppResult<(ReviewResponse, bool)> {
        if request.product_id.trim().is_empty() || request.comment.trim().is_empty() {
            return Err(AppError::ValidationError(
                "All fields are required".to_string(),
            ));
        }

        if !(1..=5).contains(&request.rating) {
            return Err(AppError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let user_oid = parse_object_id(user_id, "user")?;
        let user = self
            .users
            .find_one(doc! { "_id": user_oid })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let date = Utc::now().timestamp_millis();

        let existing = self
            .reviews
            .find_one(doc! { "userId": user_id, "productId": request.product_id.as_str() })
            .await?;

        if let Some(existing) = existing {
            let updated = self
                .reviews
                .find_one_and_update(
                    doc! { "_id": existing.id },
                    doc! { "$set": {
                        "rating": request.rating,
                        "comment": request.comment.as_str(),
                        "date": date,
                    } },
                )
                .return_document(ReturnDocument::After)
                .await?
                .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

            return Ok((updated.into(), true));
        }

        let review = Review {
            id: None,
            product_id: request.product_id,
            user_id: user_id.to_string(),
            user_name: user.name,
            user_email: user.email,
            rating: request.rating,
            comment: request.comment,
            date,
        };

        let result = self.reviews.insert_one(&review).await?;

        let response = ReviewResponse {
            id: result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default(),
            product_id: review.product_id,
            user_id: review.user_id,
            user_name: review.user_name,
            user_email: review.user_email,
            rating: review.rating,
            comment: review.comment,
            date: review.date,
        };

        Ok((response, false))
    }
}
