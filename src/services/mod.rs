pub mod analytics_service;
pub mod auth_service;
pub mod cart_service;
pub mod order_service;
pub mod review_service;
pub mod subcategory_service;
pub mod user_service;

pub use analytics_service::*;
pub use auth_service::*;
pub use cart_service::*;
pub use order_service::*;
pub use review_service::*;
pub use subcategory_service::*;
pub use user_service::*;
