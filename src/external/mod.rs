pub mod cloudinary;
pub mod razorpay;
pub mod stripe;

pub use cloudinary::*;
pub use razorpay::*;
pub use stripe::*;
