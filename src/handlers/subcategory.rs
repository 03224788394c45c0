use crate::models::*;
use crate::services::SubCategoryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/subcategory/add",
    tag = "subcategory",
    request_body = AddSubCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "新增子分类成功", body = SubCategoryResponse),
        (status = 409, description = "子分类已存在")
    )
)]
pub async fn add_subcategory(
    subcategory_service: web::Data<SubCategoryService>,
    request: web::Json<AddSubCategoryRequest>,
) -> Result<HttpResponse> {
    match subcategory_service.add(request.into_inner()).await {
        Ok(sub_category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "SubCategory Added",
            "subCategory": sub_category
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subcategory/list",
    tag = "subcategory",
    responses(
        (status = 200, description = "获取子分类列表成功")
    )
)]
pub async fn list_subcategories(
    subcategory_service: web::Data<SubCategoryService>,
) -> Result<HttpResponse> {
    match subcategory_service.list().await {
        Ok(sub_categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "subCategories": sub_categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subcategory/update",
    tag = "subcategory",
    request_body = UpdateSubCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "更新子分类成功", body = SubCategoryResponse),
        (status = 404, description = "子分类不存在"),
        (status = 409, description = "名称已被占用")
    )
)]
pub async fn update_subcategory(
    subcategory_service: web::Data<SubCategoryService>,
    request: web::Json<UpdateSubCategoryRequest>,
) -> Result<HttpResponse> {
    match subcategory_service.update(request.into_inner()).await {
        Ok(sub_category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "SubCategory Updated",
            "subCategory": sub_category
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subcategory/remove",
    tag = "subcategory",
    request_body = RemoveSubCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除子分类成功"),
        (status = 404, description = "子分类不存在")
    )
)]
pub async fn remove_subcategory(
    subcategory_service: web::Data<SubCategoryService>,
    request: web::Json<RemoveSubCategoryRequest>,
) -> Result<HttpResponse> {
    match subcategory_service.remove(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "SubCategory Removed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subcategory_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subcategory")
            .route("/add", web::post().to(add_subcategory))
            .route("/list", web::get().to(list_subcategories))
            .route("/update", web::post().to(update_subcategory))
            .route("/remove", web::post().to(remove_subcategory)),
    );
}
