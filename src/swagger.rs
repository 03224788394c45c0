use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::external::RazorpayOrder;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::register,
        handlers::user::login,
        handlers::user::admin_login,
        handlers::user::get_profile,
        handlers::user::update_profile,
        handlers::cart::add_to_cart,
        handlers::cart::update_cart,
        handlers::cart::get_cart,
        handlers::order::place_order,
        handlers::order::place_order_stripe,
        handlers::order::verify_stripe,
        handlers::order::place_order_razorpay,
        handlers::order::verify_razorpay,
        handlers::order::user_orders,
        handlers::order::all_orders,
        handlers::order::update_status,
        handlers::order::delete_order,
        handlers::order::sales_analytics,
        handlers::subcategory::add_subcategory,
        handlers::subcategory::list_subcategories,
        handlers::subcategory::update_subcategory,
        handlers::subcategory::remove_subcategory,
        handlers::review::get_reviews,
        handlers::review::add_review,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AdminLoginRequest,
            UpdateProfileRequest,
            UserProfileResponse,
            AddToCartRequest,
            UpdateCartRequest,
            PlaceOrderRequest,
            OrderItem,
            Address,
            PaymentMethod,
            OrderStatus,
            OrderResponse,
            VerifyStripeRequest,
            VerifyRazorpayRequest,
            UpdateStatusRequest,
            DeleteOrderRequest,
            RazorpayOrder,
            ProductSales,
            SalesSummary,
            AddSubCategoryRequest,
            UpdateSubCategoryRequest,
            RemoveSubCategoryRequest,
            SubCategoryResponse,
            GetReviewsRequest,
            AddReviewRequest,
            ReviewResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "User account API"),
        (name = "cart", description = "Cart API"),
        (name = "order", description = "Order and payment API"),
        (name = "subcategory", description = "SubCategory API"),
        (name = "review", description = "Product review API"),
    ),
    info(
        title = "Forever Backend API",
        version = "1.0.0",
        description = "Storefront REST API documentation",
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
