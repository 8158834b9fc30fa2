//! # Billing Configuration
//!
//! Global/implicit settings (currency symbol, default tax rate, default HSN
//! code) modeled as an explicitly injected configuration object.
//!
//! ## Why Injected, Not Ambient
//! The resolver and the checkout session take a `BillingConfig` at
//! construction. Nothing in the engine reads environment variables or any
//! other ambient global state, so every computation is reproducible in a
//! test with nothing but a literal config value. The embedding application
//! owns loading/persisting settings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Billing configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments load these from the settings store.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingConfig {
    /// Store name (displayed on bill headers).
    pub store_name: String,

    /// Store address lines (for bill headers).
    pub store_address: Vec<String>,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Default combined GST rate in basis points, applied to line items
    /// with no tax classification of their own.
    /// e.g., 1800 = 18%
    pub default_tax_rate_bps: u32,

    /// Default HSN code for line items without one. Statutory summaries
    /// still need every line in a bucket, so unclassified goods land here.
    pub default_hsn_code: String,
}

impl Default for BillingConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "SwiftBill Dev Store"
    /// - Currency: INR (₹)
    /// - Tax: 18% combined GST
    /// - Default HSN: "9999"
    fn default() -> Self {
        BillingConfig {
            store_name: "SwiftBill Dev Store".to_string(),
            store_address: vec!["12 Market Road".to_string(), "Chennai, TN 600001".to_string()],
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            default_tax_rate_bps: 1800, // 18%
            default_hsn_code: "9999".to_string(),
        }
    }
}

impl BillingConfig {
    /// Formats a paise amount as a currency string.
    ///
    /// Sub-unit precision is preserved, never truncated: when round-off is
    /// disabled the grand total legitimately carries paise, and dropping
    /// them at display time would contradict the computed settlement.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::config::BillingConfig;
    ///
    /// let config = BillingConfig::default();
    /// assert_eq!(config.format_money(1234), "₹12.34");
    /// ```
    pub fn format_money(&self, paise: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = paise / divisor;
        let frac = (paise % divisor).abs();

        format!(
            "{}{}{}",
            if paise < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_positive() {
        let config = BillingConfig::default();
        assert_eq!(config.format_money(1234), "₹12.34");
        assert_eq!(config.format_money(100), "₹1.00");
        assert_eq!(config.format_money(1), "₹0.01");
        assert_eq!(config.format_money(0), "₹0.00");
    }

    #[test]
    fn test_format_money_negative() {
        let config = BillingConfig::default();
        assert_eq!(config.format_money(-1234), "-₹12.34");
    }

    #[test]
    fn test_format_money_preserves_paise() {
        // round-off disabled leaves fractional totals; display keeps them
        let config = BillingConfig::default();
        assert_eq!(config.format_money(26342), "₹263.42");
    }

    #[test]
    fn test_default_tax_and_hsn() {
        let config = BillingConfig::default();
        assert_eq!(config.default_tax_rate_bps, 1800);
        assert_eq!(config.default_hsn_code, "9999");
    }
}
