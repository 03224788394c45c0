pub mod cart;
pub mod order;
pub mod review;
pub mod subcategory;
pub mod user;

pub use cart::cart_config;
pub use order::order_config;
pub use review::review_config;
pub use subcategory::subcategory_config;
pub use user::user_config;
