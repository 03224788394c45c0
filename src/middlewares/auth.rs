use crate::error::AppError;
use crate::utils::{JwtService, SCOPE_ADMIN, SCOPE_USER};
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 鉴权结果，由中间件写入请求扩展
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Option<String>,
    pub is_admin: bool,
}

/// 从请求扩展中取出鉴权上下文
pub fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

// 路径访问配置
struct AccessPaths {
    public_exact: Vec<&'static str>,
    public_prefix: Vec<&'static str>,
    admin_prefix: Vec<&'static str>,
}

impl AccessPaths {
    fn new() -> Self {
        Self {
            // 完全匹配的公开路径
            public_exact: vec![
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
                "/api/user/register",
                "/api/user/login",
                "/api/user/admin",
                "/api/subcategory/list",
                "/api/review/get",
            ],
            // 前缀匹配的公开路径
            public_prefix: vec!["/swagger-ui/", "/api-docs/"],
            // 需要管理员令牌的路径
            admin_prefix: vec![
                "/api/order/list",
                "/api/order/status",
                "/api/order/delete",
                "/api/order/sales-analytics",
                "/api/subcategory/add",
                "/api/subcategory/update",
                "/api/subcategory/remove",
            ],
        }
    }

    fn is_public(&self, path: &str) -> bool {
        if self.public_exact.contains(&path) {
            return true;
        }

        self.public_prefix
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }

    fn is_admin_only(&self, path: &str) -> bool {
        self.admin_prefix
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            access_paths: AccessPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    access_paths: AccessPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let path = req.path();

        if self.access_paths.is_public(path) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // 提取Authorization header
        let auth_header = req.headers().get("Authorization");

        let token = if let Some(auth_value) = auth_header {
            if let Ok(auth_str) = auth_value.to_str() {
                auth_str.strip_prefix("Bearer ")
            } else {
                None
            }
        } else {
            None
        };

        let Some(token) = token else {
            let error = AppError::AuthError("Missing access token".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        let claims = match self.jwt_service.verify_token(token) {
            Ok(claims) => claims,
            Err(_) => {
                let error = AppError::AuthError("Invalid access token".to_string());
                return Box::pin(async move { Err(error.into()) });
            }
        };

        if self.access_paths.is_admin_only(path) && claims.scope != SCOPE_ADMIN {
            let error = AppError::PermissionDenied;
            return Box::pin(async move { Err(error.into()) });
        }

        let context = AuthContext {
            user_id: (claims.scope == SCOPE_USER).then(|| claims.sub.clone()),
            is_admin: claims.scope == SCOPE_ADMIN,
        };
        req.extensions_mut().insert(context);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        let paths = AccessPaths::new();
        assert!(paths.is_public("/api/user/register"));
        assert!(paths.is_public("/api/user/login"));
        assert!(paths.is_public("/api/subcategory/list"));
        assert!(paths.is_public("/api/review/get"));
        assert!(paths.is_public("/api-docs/openapi.json"));
        assert!(!paths.is_public("/api/order/place"));
        assert!(!paths.is_public("/api/cart/get"));
    }

    #[test]
    fn test_admin_paths() {
        let paths = AccessPaths::new();
        assert!(paths.is_admin_only("/api/order/list"));
        assert!(paths.is_admin_only("/api/order/status"));
        assert!(paths.is_admin_only("/api/order/sales-analytics"));
        assert!(paths.is_admin_only("/api/subcategory/remove"));
        assert!(!paths.is_admin_only("/api/order/place"));
        assert!(!paths.is_admin_only("/api/order/userorders"));
    }
}
