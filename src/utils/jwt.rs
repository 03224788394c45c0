use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const SCOPE_USER: &str = "user";
pub const SCOPE_ADMIN: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户ID，管理员令牌固定为 "admin"
    pub scope: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    fn generate_token(&self, subject: &str, scope: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in);

        let claims = Claims {
            sub: subject.to_string(),
            scope: scope.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn generate_user_token(&self, user_id: &str) -> AppResult<String> {
        self.generate_token(user_id, SCOPE_USER)
    }

    pub fn generate_admin_token(&self) -> AppResult<String> {
        self.generate_token("admin", SCOPE_ADMIN)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_token_round_trip() {
        let service = JwtService::new("test-secret", 3600);
        let token = service.generate_user_token("665f1c2e8b3e4a0012d90a11").unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "665f1c2e8b3e4a0012d90a11");
        assert_eq!(claims.scope, SCOPE_USER);
    }

    #[test]
    fn test_admin_token_scope() {
        let service = JwtService::new("test-secret", 3600);
        let token = service.generate_admin_token().unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.scope, SCOPE_ADMIN);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let service = JwtService::new("test-secret", 3600);
        let token = service.generate_user_token("abc").unwrap();

        let other = JwtService::new("another-secret", 3600);
        assert!(other.verify_token(&token).is_err());
    }
}
