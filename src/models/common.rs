use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 统一错误响应中的 error 字段
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
