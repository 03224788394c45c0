use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::parse_object_id;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson};
use mongodb::{Collection, Database};

#[derive(Clone)]
pub struct CartService {
    users: Collection<User>,
}

impl CartService {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
        }
    }

    pub async fn add_to_cart(&self, user_id: &str, request: AddToCartRequest) -> AppResult<()> {
        if request.item_id.trim().is_empty() || request.size.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Item and size are required".to_string(),
            ));
        }

        let user_oid = parse_object_id(user_id, "user")?;
        let user = self.find_user(user_oid).await?;

        let mut cart = user.cart_data;
        *cart
            .entry(request.item_id)
            .or_default()
            .entry(request.size)
            .or_insert(0) += 1;

        self.save_cart(user_oid, &cart).await
    }

    pub async fn update_cart(&self, user_id: &str, request: UpdateCartRequest) -> AppResult<()> {
        if request.quantity < 0 {
            return Err(AppError::ValidationError(
                "Quantity cannot be negative".to_string(),
            ));
        }

        let user_oid = parse_object_id(user_id, "user")?;
        let user = self.find_user(user_oid).await?;

        let mut cart = user.cart_data;
        if request.quantity == 0 {
            // 数量归零即移除条目
            if let Some(sizes) = cart.get_mut(&request.item_id) {
                sizes.remove(&request.size);
                if sizes.is_empty() {
                    cart.remove(&request.item_id);
                }
            }
        } else {
            cart.entry(request.item_id)
                .or_default()
                .insert(request.size, request.quantity);
        }

        self.save_cart(user_oid, &cart).await
    }

    pub async fn get_cart(&self, user_id: &str) -> AppResult<CartData> {
        let user_oid = parse_object_id(user_id, "user")?;
        let user = self.find_user(user_oid).await?;
        Ok(user.cart_data)
    }

    async fn find_user(&self, user_oid: ObjectId) -> AppResult<User> {
        self.users
            .find_one(doc! { "_id": user_oid })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn save_cart(&self, user_oid: ObjectId, cart: &CartData) -> AppResult<()> {
        let cart_bson = to_bson(cart)?;
        self.users
            .update_one(doc! { "_id": user_oid }, doc! { "$set": { "cartData": cart_bson } })
            .await?;
        Ok(())
    }
}
