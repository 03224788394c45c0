use crate::config::AdminConfig;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

#[derive(Clone)]
pub struct AuthService {
    users: Collection<User>,
    jwt_service: JwtService,
    admin: AdminConfig,
}

impl AuthService {
    pub fn new(db: &Database, jwt_service: JwtService, admin: AdminConfig) -> Self {
        Self {
            users: db.collection("users"),
            jwt_service,
            admin,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<String> {
        // 检查邮箱是否已注册
        let existing = self
            .users
            .find_one(doc! { "email": request.email.as_str() })
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateError("User already exists".to_string()));
        }

        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let password_hash = hash_password(&request.password)?;

        let user = User {
            id: None,
            name: request.name,
            email: request.email,
            password: password_hash,
            cart_data: CartData::new(),
            profile_image: None,
        };

        let result = self.users.insert_one(&user).await?;
        let user_id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("inserted user has no ObjectId".to_string())
        })?;

        self.jwt_service.generate_user_token(&user_id.to_hex())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<String> {
        let user = self
            .users
            .find_one(doc! { "email": request.email.as_str() })
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;

        if !verify_password(&request.password, &user.password)? {
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("stored user has no ObjectId".to_string()))?;

        self.jwt_service.generate_user_token(&user_id.to_hex())
    }

    /// 管理员登录走进程级配置凭据，不查用户表
    pub async fn admin_login(&self, request: AdminLoginRequest) -> AppResult<String> {
        if !self.admin.email.is_empty()
            && request.email == self.admin.email
            && request.password == self.admin.password
        {
            self.jwt_service.generate_admin_token()
        } else {
            Err(AppError::AuthError("Invalid credentials".to_string()))
        }
    }
}
