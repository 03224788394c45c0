use crate::error::AppError;
use crate::external::RazorpayOrder;
use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::{AnalyticsService, OrderService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn require_user_id(req: &HttpRequest) -> Result<String, AppError> {
    auth_context(req)
        .and_then(|context| context.user_id)
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

fn origin_header(req: &HttpRequest) -> Result<String, AppError> {
    req.headers()
        .get("origin")
        .and_then(|value| value.to_str().ok())
        .map(|origin| origin.to_string())
        .ok_or_else(|| AppError::ValidationError("Missing Origin header".to_string()))
}

#[utoipa::path(
    post,
    path = "/order/place",
    tag = "order",
    request_body = PlaceOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "货到付款下单成功"),
        (status = 400, description = "订单数据不完整或金额不符")
    )
)]
pub async fn place_order(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.place_order(&user_id, request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Order Placed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/stripe",
    tag = "order",
    request_body = PlaceOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "创建 Checkout Session 成功，返回支付页 URL"),
        (status = 502, description = "网关错误")
    )
)]
pub async fn place_order_stripe(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    let origin = match origin_header(&req) {
        Ok(origin) => origin,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service
        .place_order_stripe(&user_id, request.into_inner(), &origin)
        .await
    {
        Ok(session_url) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "session_url": session_url
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/verifyStripe",
    tag = "order",
    request_body = VerifyStripeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "按回跳标记确认或取消订单"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn verify_stripe(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<VerifyStripeRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.verify_stripe(&user_id, request.into_inner()).await {
        // 支付取消时订单已删除，success 直接反映支付结果
        Ok(paid) => Ok(HttpResponse::Ok().json(json!({
            "success": paid
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/razorpay",
    tag = "order",
    request_body = PlaceOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "创建网关订单成功", body = RazorpayOrder),
        (status = 502, description = "网关错误")
    )
)]
pub async fn place_order_razorpay(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service
        .place_order_razorpay(&user_id, request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "order": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/verifyRazorpay",
    tag = "order",
    request_body = VerifyRazorpayRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "签名与网关状态校验通过，订单置为已支付"),
        (status = 400, description = "签名不匹配"),
        (status = 502, description = "网关状态非 paid")
    )
)]
pub async fn verify_razorpay(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<VerifyRazorpayRequest>,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.verify_razorpay(&user_id, request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Payment Successful"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/userorders",
    tag = "order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取当前用户订单成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn user_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = match require_user_id(&req) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.user_orders(&user_id).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "orders": orders
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/list",
    tag = "order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取全部订单成功"),
        (status = 403, description = "需要管理员令牌")
    )
)]
pub async fn all_orders(order_service: web::Data<OrderService>) -> Result<HttpResponse> {
    match order_service.all_orders().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "orders": orders
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/status",
    tag = "order",
    request_body = UpdateStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "更新订单状态成功"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn update_status(
    order_service: web::Data<OrderService>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    match order_service.update_status(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Status Updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/delete",
    tag = "order",
    request_body = DeleteOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除订单成功"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    request: web::Json<DeleteOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.delete_order(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Order Deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order/sales-analytics",
    tag = "order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "按商品统计销量与销售额", body = SalesSummary),
        (status = 403, description = "需要管理员令牌")
    )
)]
pub async fn sales_analytics(
    analytics_service: web::Data<AnalyticsService>,
) -> Result<HttpResponse> {
    match analytics_service.sales_summary().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "totalSales": summary.total_sales,
            "totalOrders": summary.total_orders,
            "productSales": summary.product_sales
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/order")
            .route("/place", web::post().to(place_order))
            .route("/stripe", web::post().to(place_order_stripe))
            .route("/verifyStripe", web::post().to(verify_stripe))
            .route("/razorpay", web::post().to(place_order_razorpay))
            .route("/verifyRazorpay", web::post().to(verify_razorpay))
            .route("/userorders", web::post().to(user_orders))
            .route("/list", web::post().to(all_orders))
            .route("/status", web::post().to(update_status))
            .route("/delete", web::post().to(delete_order))
            .route("/sales-analytics", web::post().to(sales_analytics)),
    );
}
