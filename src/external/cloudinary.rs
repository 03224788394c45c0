use crate::config::CloudinaryConfig;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Clone)]
pub struct CloudinaryService {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryService {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 上传 data URI 图片，只返回存储侧的 secure URL
    pub async fn upload_image(&self, file: &str) -> AppResult<String> {
        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        );

        let timestamp = Utc::now().timestamp();
        let signature = self.sign_upload(timestamp);

        let params = [
            ("file", file.to_string()),
            ("api_key", self.config.api_key.clone()),
            ("timestamp", timestamp.to_string()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self.client.post(&url).form(&params).send().await?;

        if response.status().is_success() {
            let upload: UploadResponse = response.json().await?;
            Ok(upload.secure_url)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            Err(AppError::GatewayError(format!(
                "failed to upload image: {error_text}"
            )))
        }
    }

    fn sign_upload(&self, timestamp: i64) -> String {
        let to_sign = format!("timestamp={}{}", timestamp, self.config.api_secret);
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_upload_is_deterministic() {
        let service = CloudinaryService::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
        });

        let a = service.sign_upload(1_700_000_000);
        let b = service.sign_upload(1_700_000_000);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // SHA-256 十六进制

        let c = service.sign_upload(1_700_000_001);
        assert_ne!(a, c);
    }
}
