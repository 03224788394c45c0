use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub date: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubCategoryResponse {
    pub id: String,
    pub name: String,
    pub date: i64,
}

impl From<SubCategory> for SubCategoryResponse {
    fn from(sub_category: SubCategory) -> Self {
        Self {
            id: sub_category.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: sub_category.name,
            date: sub_category.date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddSubCategoryRequest {
    #[schema(example = "Winterwear")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateSubCategoryRequest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoveSubCategoryRequest {
    pub id: String,
}
