use crate::error::AppResult;
use crate::models::*;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
pub struct AnalyticsService {
    orders: Collection<Order>,
}

impl AnalyticsService {
    pub fn new(db: &Database) -> Self {
        Self {
            orders: db.collection("orders"),
        }
    }

    /// 全量扫描订单后折叠，每次调用重算，不落库。
    /// 订单量大时为 O(订单数×条目数)，无分页。
    pub async fn sales_summary(&self) -> AppResult<SalesSummary> {
        let orders: Vec<Order> = self.orders.find(doc! {}).await?.try_collect().await?;
        Ok(summarize(&orders))
    }
}

/// 按商品折叠销量、销售额与覆盖订单数，按销售额降序输出
pub fn summarize(orders: &[Order]) -> SalesSummary {
    let mut by_product: HashMap<String, ProductSales> = HashMap::new();

    for order in orders {
        // 同一订单内同商品的多个条目只计一次订单数
        let mut counted: HashSet<&str> = HashSet::new();

        for item in &order.items {
            let entry = by_product
                .entry(item.product_id.clone())
                .or_insert_with(|| ProductSales {
                    product_id: item.product_id.clone(),
                    product_name: item.name.clone(),
                    total_quantity: 0,
                    total_revenue: 0,
                    order_count: 0,
                });

            entry.total_quantity += item.quantity;
            entry.total_revenue += item.price * item.quantity;
            if counted.insert(item.product_id.as_str()) {
                entry.order_count += 1;
            }
        }
    }

    let mut product_sales: Vec<ProductSales> = by_product.into_values().collect();
    product_sales.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

    SalesSummary {
        total_sales: orders.iter().map(|order| order.amount).sum(),
        total_orders: orders.len() as i64,
        product_sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, name: &str, price: i64, quantity: i64, size: &str) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            name: name.to_string(),
            price,
            quantity,
            size: size.to_string(),
        }
    }

    fn order(items: Vec<OrderItem>, amount: i64) -> Order {
        Order {
            id: None,
            user_id: "665f1c2e8b3e4a0012d90a11".to_string(),
            items,
            address: Address {
                first_name: "Aarav".to_string(),
                last_name: "Sharma".to_string(),
                email: "aarav@example.com".to_string(),
                street: "12 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                zipcode: "560001".to_string(),
                country: "India".to_string(),
                phone: "+919876543210".to_string(),
            },
            amount,
            payment_method: PaymentMethod::Cod,
            payment: true,
            status: OrderStatus::Delivered,
            date: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_summarize_totals_and_ordering() {
        // 订单1: shirt 20×2 + cap 15×1, 金额 65
        // 订单2: cap 15×3, 金额 55
        let orders = vec![
            order(
                vec![
                    item("shirt", "Shirt", 20, 2, "M"),
                    item("cap", "Cap", 15, 1, "L"),
                ],
                65,
            ),
            order(vec![item("cap", "Cap", 15, 3, "M")], 55),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.total_sales, 120);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.product_sales.len(), 2);

        // cap 销售额 60 > shirt 40，降序排列
        let first = &summary.product_sales[0];
        assert_eq!(first.product_id, "cap");
        assert_eq!(first.total_quantity, 4);
        assert_eq!(first.total_revenue, 60);
        assert_eq!(first.order_count, 2);

        let second = &summary.product_sales[1];
        assert_eq!(second.product_id, "shirt");
        assert_eq!(second.total_quantity, 2);
        assert_eq!(second.total_revenue, 40);
        assert_eq!(second.order_count, 1);
    }

    #[test]
    fn test_summarize_counts_order_once_per_product() {
        // 同一订单里同商品两个尺码，order_count 仍为 1
        let orders = vec![order(
            vec![
                item("shirt", "Shirt", 20, 1, "M"),
                item("shirt", "Shirt", 20, 2, "XL"),
            ],
            70,
        )];

        let summary = summarize(&orders);
        let shirt = &summary.product_sales[0];
        assert_eq!(shirt.order_count, 1);
        assert_eq!(shirt.total_quantity, 3);
        assert_eq!(shirt.total_revenue, 60);
    }

    #[test]
    fn test_summarize_empty_order_set() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_sales, 0);
        assert_eq!(summary.total_orders, 0);
        assert!(summary.product_sales.is_empty());
    }
}
