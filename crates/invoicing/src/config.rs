//! PIX recipient configuration.

use serde::Deserialize;

use rentivo_pix::to_ascii;

pub const PIX_KEY_VAR: &str = "RENTIVO_PIX_KEY";
pub const MERCHANT_NAME_VAR: &str = "RENTIVO_PIX_MERCHANT_NAME";
pub const MERCHANT_CITY_VAR: &str = "RENTIVO_PIX_MERCHANT_CITY";

/// Default PIX key and the merchant identity printed into every payload.
///
/// Passed explicitly to whoever builds invoices; there is no process-wide copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PixSettings {
    pub pix_key: String,
    pub merchant_name: String,
    pub merchant_city: String,
}

impl PixSettings {
    pub fn new(
        pix_key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
    ) -> Self {
        Self {
            pix_key: pix_key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
        }
    }

    /// Read `RENTIVO_PIX_*` from the process environment. Unset means empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();
        Self {
            pix_key: read(PIX_KEY_VAR),
            merchant_name: read(MERCHANT_NAME_VAR),
            merchant_city: read(MERCHANT_CITY_VAR),
        }
    }

    /// Name and city both keep printable text once folded to ASCII, which is
    /// what ends up in the payload.
    pub fn has_merchant_identity(&self) -> bool {
        has_ascii_text(&self.merchant_name) && has_ascii_text(&self.merchant_city)
    }
}

fn has_ascii_text(value: &str) -> bool {
    !to_ascii(value).trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn from_lookup_reads_prefixed_keys() {
        let env: HashMap<&str, &str> = HashMap::from([
            (PIX_KEY_VAR, " landlord@pix.com "),
            (MERCHANT_NAME_VAR, "João Silva"),
            (MERCHANT_CITY_VAR, "São Paulo"),
        ]);
        let settings = PixSettings::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings, PixSettings::new("landlord@pix.com", "João Silva", "São Paulo"));
        assert!(settings.has_merchant_identity());
    }

    #[test]
    fn unset_values_are_empty() {
        let settings = PixSettings::from_lookup(|_| None);
        assert_eq!(settings, PixSettings::default());
        assert!(!settings.has_merchant_identity());
    }

    #[test]
    fn identity_without_ascii_text_is_incomplete() {
        assert!(!PixSettings::new("k", "東京", "São Paulo").has_merchant_identity());
        assert!(!PixSettings::new("k", "João", "東京 ").has_merchant_identity());
        assert!(PixSettings::new("k", "João 東京", "São Paulo").has_merchant_identity());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let settings: PixSettings =
            serde_json::from_str(r#"{"merchant_name":"Ana","merchant_city":"Recife"}"#).unwrap();
        assert_eq!(settings.pix_key, "");
        assert!(settings.has_merchant_identity());
    }
}
