//! Card payment boundary

use crate::core::currency::BASE_CURRENCY;
use crate::core::pricing::convert;
use crate::core::resolver::ResolvedCurrency;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

/// Transaction details handed to the payment widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub total_price_status: &'static str,
    /// Converted amount with two decimals, e.g. "42.00".
    pub total_price: String,
    pub currency_code: String,
    pub country_code: &'static str,
    pub merchant_name: String,
}

impl PaymentRequest {
    pub fn new(base_amount: f64, currency: &ResolvedCurrency, merchant_name: &str) -> Self {
        Self {
            total_price_status: "FINAL",
            total_price: format!("{:.2}", convert(base_amount, currency)),
            currency_code: currency.code.clone(),
            country_code: if currency.code == BASE_CURRENCY {
                "IN"
            } else {
                "US"
            },
            merchant_name: merchant_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Success,
    Failure(String),
}

/// External payment authorization service.
#[async_trait]
pub trait PaymentAuthorizer: Send + Sync {
    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentOutcome>;
}

/// Test-environment authorizer: approves any positive amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxAuthorizer;

#[async_trait]
impl PaymentAuthorizer for SandboxAuthorizer {
    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentOutcome> {
        debug!(?request, "Sandbox payment authorization");
        let amount: f64 = request.total_price.parse()?;
        if amount > 0.0 {
            info!(
                "Payment of {} {} authorized",
                request.total_price, request.currency_code
            );
            Ok(PaymentOutcome::Success)
        } else {
            Ok(PaymentOutcome::Failure(format!(
                "Nothing to charge: {} {}",
                request.total_price, request.currency_code
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency(code: &str, rate: f64) -> ResolvedCurrency {
        ResolvedCurrency {
            code: code.to_string(),
            symbol: String::new(),
            rate,
        }
    }

    #[test]
    fn test_request_converts_amount() {
        let request = PaymentRequest::new(3500.0, &currency("USD", 0.012), "Ambs Tattva Store");
        assert_eq!(request.total_price, "42.00");
        assert_eq!(request.currency_code, "USD");
        assert_eq!(request.country_code, "US");

        let request = PaymentRequest::new(3500.0, &currency("INR", 1.0), "Ambs Tattva Store");
        assert_eq!(request.total_price, "3500.00");
        assert_eq!(request.country_code, "IN");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = PaymentRequest::new(100.0, &currency("EUR", 0.011), "Shop");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["totalPrice"], "1.10");
        assert_eq!(json["totalPriceStatus"], "FINAL");
        assert_eq!(json["merchantName"], "Shop");
    }

    #[tokio::test]
    async fn test_sandbox_authorizer() -> Result<()> {
        let authorizer = SandboxAuthorizer;
        let ok = PaymentRequest::new(850.0, &currency("INR", 1.0), "Shop");
        assert_eq!(authorizer.authorize(&ok).await?, PaymentOutcome::Success);

        let empty = PaymentRequest::new(0.0, &currency("INR", 1.0), "Shop");
        assert!(matches!(
            authorizer.authorize(&empty).await?,
            PaymentOutcome::Failure(_)
        ));
        Ok(())
    }
}
