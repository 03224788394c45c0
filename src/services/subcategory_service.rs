use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::parse_object_id;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

#[derive(Clone)]
pub struct SubCategoryService {
    subcategories: Collection<SubCategory>,
}

impl SubCategoryService {
    pub fn new(db: &Database) -> Self {
        Self {
            subcategories: db.collection("subcategories"),
        }
    }

    pub async fn add(&self, request: AddSubCategoryRequest) -> AppResult<SubCategoryResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "SubCategory name is required".to_string(),
            ));
        }

        let existing = self
            .subcategories
            .find_one(doc! { "name": name.as_str() })
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateError(
                "SubCategory already exists".to_string(),
            ));
        }

        let sub_category = SubCategory {
            id: None,
            name,
            date: Utc::now().timestamp_millis(),
        };

        let result = self.subcategories.insert_one(&sub_category).await?;

        Ok(SubCategoryResponse {
            id: result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default(),
            name: sub_category.name,
            date: sub_category.date,
        })
    }

    pub async fn list(&self) -> AppResult<Vec<SubCategoryResponse>> {
        let sub_categories: Vec<SubCategory> = self
            .subcategories
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(sub_categories
            .into_iter()
            .map(SubCategoryResponse::from)
            .collect())
    }

    pub async fn update(
        &self,
        request: UpdateSubCategoryRequest,
    ) -> AppResult<SubCategoryResponse> {
        let sub_category_oid = parse_object_id(&request.id, "subcategory")?;

        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "SubCategory name is required".to_string(),
            ));
        }

        // 改名不能撞上其他子分类
        let existing = self
            .subcategories
            .find_one(doc! { "name": name.as_str(), "_id": { "$ne": sub_category_oid } })
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateError(
                "SubCategory name already exists".to_string(),
            ));
        }

        let updated = self
            .subcategories
            .find_one_and_update(
                doc! { "_id": sub_category_oid },
                doc! { "$set": { "name": name } },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("SubCategory not found".to_string()))?;

        Ok(updated.into())
    }

    pub async fn remove(&self, request: RemoveSubCategoryRequest) -> AppResult<()> {
        let sub_category_oid = parse_object_id(&request.id, "subcategory")?;

        let deleted = self
            .subcategories
            .delete_one(doc! { "_id": sub_category_oid })
            .await?;
        if deleted.deleted_count == 0 {
            return Err(AppError::NotFound("SubCategory not found".to_string()));
        }

        Ok(())
    }
}
