pub mod analytics;
pub mod cart;
pub mod common;
pub mod order;
pub mod review;
pub mod subcategory;
pub mod user;

pub use analytics::*;
pub use cart::*;
pub use common::*;
pub use order::*;
pub use review::*;
pub use subcategory::*;
pub use user::*;
