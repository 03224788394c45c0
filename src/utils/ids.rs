use crate::error::{AppError, AppResult};
use mongodb::bson::oid::ObjectId;

/// 解析请求携带的十六进制文档ID
pub fn parse_object_id(id: &str, entity: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::ValidationError(format!("Invalid {entity} id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("665f1c2e8b3e4a0012d90a11", "order").is_ok());
        assert!(parse_object_id("not-an-id", "order").is_err());
        assert!(parse_object_id("", "user").is_err());
    }
}
