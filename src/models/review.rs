use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_id: String,
    pub user_id: String,
    /// 作者快照，避免展示评论时回查用户
    pub user_name: String,
    pub user_email: String,
    pub rating: i32,
    pub comment: String,
    pub date: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub rating: i32,
    pub comment: String,
    pub date: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_id: review.product_id,
            user_id: review.user_id,
            user_name: review.user_name,
            user_email: review.user_email,
            rating: review.rating,
            comment: review.comment,
            date: review.date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReviewsRequest {
    pub product_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequest {
    pub product_id: String,
    #[schema(example = 5)]
    pub rating: i32,
    pub comment: String,
}
