use crate::error::{AppError, AppResult};
use regex::Regex;

/// 校验邮箱格式，域名必须带 TLD
pub fn validate_email(email: &str) -> AppResult<()> {
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    if !email_regex.is_match(email) {
        return Err(AppError::ValidationError(
            "Please enter a valid email".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("foo@bar.com").is_ok());
        assert!(validate_email("a.b+c@sub.domain.org").is_ok());
        assert!(validate_email("foo@bar").is_err()); // 无 TLD
        assert!(validate_email("foo bar@baz.com").is_err());
        assert!(validate_email("@bar.com").is_err());
        assert!(validate_email("foo@").is_err());
    }
}
