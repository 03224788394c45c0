use crate::error::{AppError, AppResult};
use crate::external::CloudinaryService;
use crate::models::*;
use crate::utils::{parse_object_id, validate_email};
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

#[derive(Clone)]
pub struct UserService {
    users: Collection<User>,
    cloudinary_service: CloudinaryService,
}

impl UserService {
    pub fn new(db: &Database, cloudinary_service: CloudinaryService) -> Self {
        Self {
            users: db.collection("users"),
            cloudinary_service,
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserProfileResponse> {
        let user_oid = parse_object_id(user_id, "user")?;

        let user = self
            .users
            .find_one(doc! { "_id": user_oid })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// 部分更新：仅应用出现且与当前值不同的字段，完全无变化按错误返回
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> AppResult<UserProfileResponse> {
        let user_oid = parse_object_id(user_id, "user")?;

        let current = self
            .users
            .find_one(doc! { "_id": user_oid })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut update = Document::new();

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if !name.is_empty() && name != current.name {
                update.insert("name", name);
            }
        }

        if let Some(email) = request.email {
            let email = email.trim().to_string();
            if !email.is_empty() && email != current.email {
                validate_email(&email)?;

                // 邮箱不能被其他用户占用
                let taken = self
                    .users
                    .find_one(doc! { "email": email.as_str(), "_id": { "$ne": user_oid } })
                    .await?;
                if taken.is_some() {
                    return Err(AppError::DuplicateError("Email already in use".to_string()));
                }

                update.insert("email", email);
            }
        }

        if let Some(image) = request.image {
            let image_url = self.cloudinary_service.upload_image(&image).await?;
            update.insert("profileImage", image_url);
        }

        if update.is_empty() {
            return Err(AppError::ValidationError("No changes to update".to_string()));
        }

        let updated = self
            .users
            .find_one_and_update(doc! { "_id": user_oid }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(updated.into())
    }
}
