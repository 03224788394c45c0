use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    Cod,
    Stripe,
    Razorpay,
}

/// 履约状态，五个状态之间允许任意覆盖，不做状态机校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    Packing,
    Shipped,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
    Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[schema(example = "665f1c2e8b3e4a0012d90a11")]
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    #[schema(example = "M")]
    pub size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub address: Address,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payment: bool,
    pub status: OrderStatus,
    /// 下单时间，毫秒时间戳
    pub date: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub address: Address,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payment: bool,
    pub status: OrderStatus,
    pub date: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: order.user_id,
            items: order.items,
            address: order.address,
            amount: order.amount,
            payment_method: order.payment_method,
            payment: order.payment,
            status: order.status,
            date: order.date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItem>,
    pub amount: i64,
    pub address: Address,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStripeRequest {
    pub order_id: String,
    /// 支付页回跳携带的成功标记，"true" 为成功
    pub success: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyRazorpayRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderRequest {
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_accepts_all_five_strings() {
        // 五个状态串全部可解析，状态更新不校验当前状态，任意状态都可达
        for (s, expected) in [
            ("Order Placed", OrderStatus::OrderPlaced),
            ("Packing", OrderStatus::Packing),
            ("Shipped", OrderStatus::Shipped),
            ("Out for delivery", OrderStatus::OutForDelivery),
            ("Delivered", OrderStatus::Delivered),
        ] {
            let parsed: OrderStatus =
                serde_json::from_value(serde_json::Value::String(s.to_string())).unwrap();
            assert_eq!(parsed, expected);
        }

        let invalid: Result<OrderStatus, _> =
            serde_json::from_value(serde_json::Value::String("Lost".to_string()));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_value(PaymentMethod::Cod).unwrap(),
            serde_json::Value::String("COD".to_string())
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::Razorpay).unwrap(),
            serde_json::Value::String("Razorpay".to_string())
        );
    }
}
