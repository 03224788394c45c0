use crate::config::StripeConfig;
use crate::error::{AppError, AppResult};
use crate::models::OrderItem;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Clone)]
pub struct StripeService {
    client: Client,
    config: StripeConfig,
}

impl StripeService {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 为一组订单条目创建 Checkout Session，金额单位为主币种，发送前 ×100
    pub async fn create_checkout_session(
        &self,
        items: &[OrderItem],
        delivery_charge: i64,
        currency: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<CheckoutSession> {
        let url = "https://api.stripe.com/v1/checkout/sessions";

        let mut params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        for (i, item) in items.iter().enumerate() {
            params.push((
                format!("line_items[{i}][price_data][currency]"),
                currency.to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                item.name.clone(),
            ));
            params.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                (item.price * 100).to_string(),
            ));
            params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
        }

        // 运费单独一行
        let i = items.len();
        params.push((
            format!("line_items[{i}][price_data][currency]"),
            currency.to_string(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            "Delivery Charges".to_string(),
        ));
        params.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            (delivery_charge * 100).to_string(),
        ));
        params.push((format!("line_items[{i}][quantity]"), "1".to_string()));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            let session: CheckoutSession = response.json().await?;
            Ok(session)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            Err(AppError::GatewayError(format!(
                "failed to create checkout session: {error_text}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripe_service_creation() {
        let config = StripeConfig {
            secret_key: "sk_test_123".to_string(),
        };
        let service = StripeService::new(config);
        assert!(!service.config.secret_key.is_empty());
    }
}
