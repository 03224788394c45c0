use crate::error::AppError;
use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::ReviewService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn require_user_id(req: &HttpRequest) -> Result<String, AppError> {
    auth_context(req)
        .and_then(|context| context.user_id)
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

#[utoipa::path(
    post,
    path = "/review/get",
    tag = "review",
    request_body = GetReviewsRequest,
    responses(
        (status = 200, description = "获取商品评论成功")
    )
)]
pub async fn get_reviews(
    review_service: web::Data<ReviewService>,
    request: web::Json<GetReviewsRequest>,
) -> Result<HttpResponse> {
    match review_service.product_reviews(request.into_inner()).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "reviews": reviews
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/review/add",
    tag = "review",
    request_body = AddReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "评论提交成功，重复提交覆盖旧评论", body = ReviewResponse),
        (status = 400, description = "评分超出范围或字段缺失")
    )
)]
pub async fn add_review(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    request: web::Json<AddReviewRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match review_service.add_review(&user_id, request.into_inner()).await {
        Ok((review, updated)) => {
            let message = if updated {
                "Review updated successfully"
            } else {
                "Review added successfully"
            };
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": message,
                "review": review
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn review_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/review")
            .route("/get", web::post().to(get_reviews))
            .route("/add", web::post().to(add_review)),
    );
}
