use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: i64,
    /// 包含该商品的订单数（同一订单多条同商品条目只计一次）
    pub order_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: i64,
    pub total_orders: i64,
    pub product_sales: Vec<ProductSales>,
}
