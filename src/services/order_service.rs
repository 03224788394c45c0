use crate::error::{AppError, AppResult};
use crate::external::{RazorpayOrder, RazorpayService, StripeService};
use crate::models::*;
use crate::utils::parse_object_id;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::{Collection, Database};

const CURRENCY: &str = "inr";
const DELIVERY_CHARGE: i64 = 10;

#[derive(Clone)]
pub struct OrderService {
    orders: Collection<Order>,
    users: Collection<User>,
    stripe_service: StripeService,
    razorpay_service: RazorpayService,
}

impl OrderService {
    pub fn new(
        db: &Database,
        stripe_service: StripeService,
        razorpay_service: RazorpayService,
    ) -> Self {
        Self {
            orders: db.collection("orders"),
            users: db.collection("users"),
            stripe_service,
            razorpay_service,
        }
    }

    /// 货到付款下单，下单即清空购物车
    pub async fn place_order(&self, user_id: &str, request: PlaceOrderRequest) -> AppResult<()> {
        let order = build_order(user_id, request, PaymentMethod::Cod)?;
        self.orders.insert_one(&order).await?;

        self.clear_cart(user_id).await?;
        Ok(())
    }

    /// Stripe 下单：先落订单，再创建 Checkout Session，返回支付页 URL
    pub async fn place_order_stripe(
        &self,
        user_id: &str,
        request: PlaceOrderRequest,
        origin: &str,
    ) -> AppResult<String> {
        let order = build_order(user_id, request, PaymentMethod::Stripe)?;
        let result = self.orders.insert_one(&order).await?;
        let order_id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("inserted order has no ObjectId".to_string())
        })?;

        let success_url = format!("{origin}/verify?success=true&orderId={}", order_id.to_hex());
        let cancel_url = format!("{origin}/verify?success=false&orderId={}", order_id.to_hex());

        let session = self
            .stripe_service
            .create_checkout_session(&order.items, DELIVERY_CHARGE, CURRENCY, &success_url, &cancel_url)
            .await?;

        Ok(session.url)
    }

    /// 回跳确认：信任客户端携带的成功标记，成功置 payment 并清空购物车，
    /// 失败直接删除订单。返回支付是否成功。
    pub async fn verify_stripe(
        &self,
        user_id: &str,
        request: VerifyStripeRequest,
    ) -> AppResult<bool> {
        let order_oid = parse_object_id(&request.order_id, "order")?;

        if request.success == "true" {
            let updated = self
                .orders
                .update_one(doc! { "_id": order_oid }, doc! { "$set": { "payment": true } })
                .await?;
            if updated.matched_count == 0 {
                return Err(AppError::NotFound("Order not found".to_string()));
            }

            self.clear_cart(user_id).await?;
            Ok(true)
        } else {
            self.orders.delete_one(doc! { "_id": order_oid }).await?;
            Ok(false)
        }
    }

    /// Razorpay 下单：网关订单金额为派萨，receipt 写内部订单ID供验证时回查
    pub async fn place_order_razorpay(
        &self,
        user_id: &str,
        request: PlaceOrderRequest,
    ) -> AppResult<RazorpayOrder> {
        if !self.razorpay_service.is_configured() {
            return Err(AppError::ConfigError(
                "Razorpay keys are not configured".to_string(),
            ));
        }

        let order = build_order(user_id, request, PaymentMethod::Razorpay)?;
        let result = self.orders.insert_one(&order).await?;
        let receipt = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("inserted order has no ObjectId".to_string()))?
            .to_hex();

        self.razorpay_service
            .create_order(order.amount * 100, "INR", &receipt)
            .await
    }

    /// 校验回调签名后，仍以网关侧订单状态为准，只有 paid 才确认收款
    pub async fn verify_razorpay(
        &self,
        user_id: &str,
        request: VerifyRazorpayRequest,
    ) -> AppResult<()> {
        if request.razorpay_order_id.is_empty()
            || request.razorpay_payment_id.is_empty()
            || request.razorpay_signature.is_empty()
        {
            return Err(AppError::ValidationError(
                "Missing payment details".to_string(),
            ));
        }

        self.razorpay_service.verify_signature(
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
        )?;

        let gateway_order = self
            .razorpay_service
            .fetch_order(&request.razorpay_order_id)
            .await?;

        if gateway_order.status != "paid" {
            return Err(AppError::GatewayError(format!(
                "Payment Failed - Order status: {}",
                gateway_order.status
            )));
        }

        let receipt = gateway_order.receipt.ok_or_else(|| {
            AppError::GatewayError("gateway order carries no receipt".to_string())
        })?;
        let order_oid = parse_object_id(&receipt, "order")?;

        let updated = self
            .orders
            .update_one(doc! { "_id": order_oid }, doc! { "$set": { "payment": true } })
            .await?;
        if updated.matched_count == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        self.clear_cart(user_id).await?;
        Ok(())
    }

    pub async fn user_orders(&self, user_id: &str) -> AppResult<Vec<OrderResponse>> {
        let orders: Vec<Order> = self
            .orders
            .find(doc! { "userId": user_id })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn all_orders(&self) -> AppResult<Vec<OrderResponse>> {
        let orders: Vec<Order> = self
            .orders
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// 无条件覆盖履约状态，不校验当前状态
    pub async fn update_status(&self, request: UpdateStatusRequest) -> AppResult<()> {
        let order_oid = parse_object_id(&request.order_id, "order")?;
        let status = to_bson(&request.status)?;

        let updated = self
            .orders
            .update_one(doc! { "_id": order_oid }, doc! { "$set": { "status": status } })
            .await?;
        if updated.matched_count == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete_order(&self, request: DeleteOrderRequest) -> AppResult<()> {
        let order_oid = parse_object_id(&request.order_id, "order")?;

        let deleted = self.orders.delete_one(doc! { "_id": order_oid }).await?;
        if deleted.deleted_count == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        Ok(())
    }

    // 订单写入与清空购物车是两次独立的单文档写，后者失败只会残留购物车
    async fn clear_cart(&self, user_id: &str) -> AppResult<()> {
        let user_oid = parse_object_id(user_id, "user")?;
        self.users
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$set": { "cartData": Document::new() } },
            )
            .await?;
        Ok(())
    }
}

/// 订单金额 = Σ 单价×数量 + 运费
pub fn calculate_order_amount(items: &[OrderItem]) -> i64 {
    items.iter().map(|item| item.price * item.quantity).sum::<i64>() + DELIVERY_CHARGE
}

fn build_order(
    user_id: &str,
    request: PlaceOrderRequest,
    payment_method: PaymentMethod,
) -> AppResult<Order> {
    validate_order_request(&request)?;

    Ok(Order {
        id: None,
        user_id: user_id.to_string(),
        items: request.items,
        address: request.address,
        amount: request.amount,
        payment_method,
        payment: false,
        status: OrderStatus::OrderPlaced,
        date: Utc::now().timestamp_millis(),
    })
}

fn validate_order_request(request: &PlaceOrderRequest) -> AppResult<()> {
    if request.items.is_empty() {
        return Err(AppError::ValidationError(
            "Order items are required".to_string(),
        ));
    }

    for item in &request.items {
        if item.quantity <= 0 {
            return Err(AppError::ValidationError(
                "Item quantity must be positive".to_string(),
            ));
        }
        if item.price < 0 {
            return Err(AppError::ValidationError(
                "Item price cannot be negative".to_string(),
            ));
        }
    }

    let address = &request.address;
    if address.street.trim().is_empty()
        || address.city.trim().is_empty()
        || address.zipcode.trim().is_empty()
        || address.phone.trim().is_empty()
    {
        return Err(AppError::ValidationError(
            "Shipping address is incomplete".to_string(),
        ));
    }

    if request.amount != calculate_order_amount(&request.items) {
        return Err(AppError::ValidationError(
            "Order amount does not match items total".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, price: i64, quantity: i64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            price,
            quantity,
            size: "M".to_string(),
        }
    }

    fn address() -> Address {
        Address {
            first_name: "Aarav".to_string(),
            last_name: "Sharma".to_string(),
            email: "aarav@example.com".to_string(),
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zipcode: "560001".to_string(),
            country: "India".to_string(),
            phone: "+919876543210".to_string(),
        }
    }

    #[test]
    fn test_calculate_order_amount() {
        // [{20×2}, {15×1}] + 运费10 = 65
        let items = vec![item("p1", 20, 2), item("p2", 15, 1)];
        assert_eq!(calculate_order_amount(&items), 65);
    }

    #[test]
    fn test_validate_order_request_accepts_matching_amount() {
        let items = vec![item("p1", 20, 2), item("p2", 15, 1)];
        let request = PlaceOrderRequest {
            items,
            amount: 65,
            address: address(),
        };
        assert!(validate_order_request(&request).is_ok());
    }

    #[test]
    fn test_validate_order_request_rejects_amount_mismatch() {
        let items = vec![item("p1", 20, 2), item("p2", 15, 1)];
        let request = PlaceOrderRequest {
            items,
            amount: 64,
            address: address(),
        };
        assert!(matches!(
            validate_order_request(&request),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_order_request_rejects_empty_items() {
        let request = PlaceOrderRequest {
            items: vec![],
            amount: DELIVERY_CHARGE,
            address: address(),
        };
        assert!(validate_order_request(&request).is_err());
    }

    #[test]
    fn test_validate_order_request_rejects_incomplete_address() {
        let mut addr = address();
        addr.street = " ".to_string();
        let items = vec![item("p1", 20, 1)];
        let request = PlaceOrderRequest {
            items,
            amount: 30,
            address: addr,
        };
        assert!(validate_order_request(&request).is_err());
    }

    #[test]
    fn test_build_order_starts_unpaid_and_placed() {
        let items = vec![item("p1", 20, 2), item("p2", 15, 1)];
        let request = PlaceOrderRequest {
            items,
            amount: 65,
            address: address(),
        };

        let order = build_order("665f1c2e8b3e4a0012d90a11", request, PaymentMethod::Razorpay)
            .unwrap();
        assert!(!order.payment);
        assert_eq!(order.status, OrderStatus::OrderPlaced);
        assert_eq!(order.payment_method, PaymentMethod::Razorpay);
        assert_eq!(order.amount, 65);
    }
}
