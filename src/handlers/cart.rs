use crate::error::AppError;
use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::CartService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn require_user_id(req: &HttpRequest) -> Result<String, AppError> {
    auth_context(req)
        .and_then(|context| context.user_id)
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

#[utoipa::path(
    post,
    path = "/cart/add",
    tag = "cart",
    request_body = AddToCartRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "加入购物车成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn add_to_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.add_to_cart(&user_id, request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Added To Cart"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/update",
    tag = "cart",
    request_body = UpdateCartRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "更新购物车成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn update_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<UpdateCartRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.update_cart(&user_id, request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Cart Updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/get",
    tag = "cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取购物车成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.get_cart(&user_id).await {
        Ok(cart_data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "cartData": cart_data
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("/add", web::post().to(add_to_cart))
            .route("/update", web::post().to(update_cart))
            .route("/get", web::post().to(get_cart)),
    );
}
