use crate::config::RazorpayConfig;
use crate::error::{AppError, AppResult};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use utoipa::ToSchema;

type HmacSha256 = Hmac<Sha256>;

/// 网关侧订单记录，receipt 保存内部订单ID用于回查
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

#[derive(Clone)]
pub struct RazorpayService {
    client: Client,
    config: RazorpayConfig,
}

impl RazorpayService {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.key_id.is_empty() && !self.config.key_secret.is_empty()
    }

    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> AppResult<RazorpayOrder> {
        let url = "https://api.razorpay.com/v1/orders";

        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&serde_json::json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            let order: RazorpayOrder = response.json().await?;
            Ok(order)
        } else {
            Err(normalize_gateway_error(response).await)
        }
    }

    pub async fn fetch_order(&self, order_id: &str) -> AppResult<RazorpayOrder> {
        let url = format!("https://api.razorpay.com/v1/orders/{order_id}");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await?;

        if response.status().is_success() {
            let order: RazorpayOrder = response.json().await?;
            Ok(order)
        } else {
            Err(normalize_gateway_error(response).await)
        }
    }

    /// 重算 HMAC-SHA256(order_id + "|" + payment_id) 并与回调签名比对
    pub fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> AppResult<()> {
        let expected = self.expected_signature(order_id, payment_id)?;

        if expected != signature {
            return Err(AppError::SignatureMismatch);
        }

        Ok(())
    }

    fn expected_signature(&self, order_id: &str, payment_id: &str) -> AppResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.config.key_secret.as_bytes())
            .map_err(|_| AppError::InternalError("invalid HMAC key length".to_string()))?;
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// 透传网关错误描述，其余情况回落到原始响应体
async fn normalize_gateway_error(response: reqwest::Response) -> AppError {
    let text = response.text().await.unwrap_or_default();
    let description = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["error"]["description"].as_str().map(|s| s.to_string()))
        .unwrap_or(text);
    AppError::GatewayError(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> RazorpayService {
        RazorpayService::new(RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "rzp_test_secret".to_string(),
        })
    }

    #[test]
    fn test_verify_signature_accepts_matching_hmac() {
        let service = service();
        let signature = service
            .expected_signature("order_abc123", "pay_def456")
            .unwrap();

        assert!(service
            .verify_signature("order_abc123", "pay_def456", &signature)
            .is_ok());
    }

    #[test]
    fn test_verify_signature_rejects_mismatch() {
        let service = service();

        let result = service.verify_signature("order_abc123", "pay_def456", "deadbeef");
        assert!(matches!(result, Err(AppError::SignatureMismatch)));

        // 签名跟的是别的 payment_id，同样拒绝
        let other = service
            .expected_signature("order_abc123", "pay_other")
            .unwrap();
        let result = service.verify_signature("order_abc123", "pay_def456", &other);
        assert!(matches!(result, Err(AppError::SignatureMismatch)));
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let service = service();
        let other = RazorpayService::new(RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "different_secret".to_string(),
        });

        let a = service.expected_signature("order_1", "pay_1").unwrap();
        let b = other.expected_signature("order_1", "pay_1").unwrap();
        assert_ne!(a, b);
    }
}
