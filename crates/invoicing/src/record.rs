//! The value handed to the document renderer: a bill plus, when configured,
//! its PIX payload and QR image.

use rentivo_billing::{Bill, BillingTemplate};
use rentivo_pix::{PixRequest, QrOptions, encode, render_png};

use crate::config::PixSettings;
use crate::error::InvoiceError;

/// PIX section of an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixAttachment {
    /// The key actually used (template key, else the configured default).
    pub pix_key: String,
    /// BR Code text, also printed as copy-and-paste code.
    pub payload: String,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub bill: Bill,
    pub pix: Option<PixAttachment>,
}

impl InvoiceRecord {
    /// Build the record with default QR options.
    ///
    /// A missing PIX key or an incomplete merchant identity is not an error:
    /// the record simply carries no PIX section.
    pub fn build(
        bill: Bill,
        template: &BillingTemplate,
        settings: &PixSettings,
    ) -> Result<Self, InvoiceError> {
        Self::build_with(bill, template, settings, &QrOptions::default())
    }

    pub fn build_with(
        bill: Bill,
        template: &BillingTemplate,
        settings: &PixSettings,
        qr: &QrOptions,
    ) -> Result<Self, InvoiceError> {
        let Some(pix_key) = effective_pix_key(template, settings) else {
            tracing::info!(template = template.name(), "no pix key configured; omitting pix");
            return Ok(Self { bill, pix: None });
        };

        if !settings.has_merchant_identity() {
            tracing::info!(
                template = template.name(),
                "pix merchant name/city not configured; omitting pix"
            );
            return Ok(Self { bill, pix: None });
        }

        let request = PixRequest::new(
            pix_key,
            settings.merchant_name.as_str(),
            settings.merchant_city.as_str(),
        )
        .with_amount(bill.total());
        let payload = encode(&request)?;
        let png = render_png(&payload, qr)?;

        Ok(Self {
            bill,
            pix: Some(PixAttachment {
                pix_key: pix_key.to_string(),
                payload,
                png,
            }),
        })
    }

    pub fn has_pix(&self) -> bool {
        self.pix.is_some()
    }
}

/// Template key if set, otherwise the configured default.
pub fn effective_pix_key<'a>(
    template: &'a BillingTemplate,
    settings: &'a PixSettings,
) -> Option<&'a str> {
    template
        .pix_key()
        .or_else(|| Some(settings.pix_key.trim()).filter(|key| !key.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rentivo_billing::{BillingItem, ExtraCharge, VariableOverrides, assemble};
    use rentivo_core::{BillingItemId, Centavos, ReferenceMonth};
    use rentivo_pix::{PixError, top_level_fields, verify};

    fn template() -> BillingTemplate {
        BillingTemplate::new(
            "Apto 101",
            vec![
                BillingItem::fixed(Some(BillingItemId::new()), "Aluguel", Centavos::new(285_000), 0),
                BillingItem::fixed(Some(BillingItemId::new()), "Condomínio", Centavos::new(10_000), 1),
            ],
        )
        .unwrap()
    }

    fn bill_for(template: &BillingTemplate) -> Bill {
        let month: ReferenceMonth = "2025-03".parse().unwrap();
        assemble(
            template,
            &VariableOverrides::new(),
            &[],
            month,
            NaiveDate::from_ymd_opt(2025, 4, 10),
            "",
        )
        .unwrap()
    }

    fn settings() -> PixSettings {
        PixSettings::new("default@pix.com", "João Silva", "São Paulo")
    }

    #[test]
    fn includes_pix_with_bill_total() {
        let template = template();
        let record = InvoiceRecord::build(bill_for(&template), &template, &settings()).unwrap();

        let pix = record.pix.as_ref().unwrap();
        assert_eq!(pix.pix_key, "default@pix.com");
        assert!(verify(&pix.payload));
        assert_eq!(&pix.png[..4], b"\x89PNG");

        let fields = top_level_fields(&pix.payload).unwrap();
        assert!(fields.contains(&("54".to_string(), "2950.00".to_string())));
        assert!(fields.contains(&("59".to_string(), "Joao Silva".to_string())));
        assert!(fields.contains(&("60".to_string(), "Sao Paulo".to_string())));
    }

    #[test]
    fn template_key_wins_over_default() {
        let template = template().with_pix_key("unit101@pix.com");
        let record = InvoiceRecord::build(bill_for(&template), &template, &settings()).unwrap();
        let pix = record.pix.unwrap();
        assert_eq!(pix.pix_key, "unit101@pix.com");
        assert!(pix.payload.contains("unit101@pix.com"));
    }

    #[test]
    fn no_key_anywhere_omits_pix() {
        let template = template();
        let settings = PixSettings::new("", "João Silva", "São Paulo");
        let record = InvoiceRecord::build(bill_for(&template), &template, &settings).unwrap();
        assert!(!record.has_pix());
        assert_eq!(record.bill.total(), Centavos::new(295_000));
    }

    #[test]
    fn incomplete_merchant_identity_omits_pix() {
        let template = template().with_pix_key("unit101@pix.com");
        for settings in [
            PixSettings::new("default@pix.com", "", "São Paulo"),
            PixSettings::new("default@pix.com", "João Silva", ""),
        ] {
            let record = InvoiceRecord::build(bill_for(&template), &template, &settings).unwrap();
            assert!(record.pix.is_none());
        }
    }

    #[test]
    fn merchant_name_without_ascii_text_omits_pix() {
        let template = template();
        let settings = PixSettings::new("default@pix.com", "東京", "São Paulo");
        let record = InvoiceRecord::build(bill_for(&template), &template, &settings).unwrap();
        assert!(record.pix.is_none());
    }

    #[test]
    fn padded_template_key_is_encoded_trimmed() {
        let template = template().with_pix_key("  unit101@pix.com  ");
        let record = InvoiceRecord::build(bill_for(&template), &template, &settings()).unwrap();
        let pix = record.pix.unwrap();
        assert_eq!(pix.pix_key, "unit101@pix.com");
        let fields = top_level_fields(&pix.payload).unwrap();
        assert!(fields.contains(&(
            "26".to_string(),
            "0014br.gov.bcb.pix0115unit101@pix.com".to_string()
        )));
    }

    #[test]
    fn zero_total_gives_open_amount_payload() {
        let template = BillingTemplate::new("Vazio", Vec::new()).unwrap();
        let record = InvoiceRecord::build(bill_for(&template), &template, &settings()).unwrap();
        let payload = record.pix.unwrap().payload;
        let tags: Vec<String> = top_level_fields(&payload)
            .unwrap()
            .into_iter()
            .map(|(tag, _)| tag)
            .collect();
        assert!(!tags.contains(&"54".to_string()));
    }

    #[test]
    fn bill_with_extras_is_carried_unchanged() {
        let template = template();
        let month: ReferenceMonth = "2025-04".parse().unwrap();
        let extras = vec![ExtraCharge::new("Multa", Centavos::new(5_000)).unwrap()];
        let bill = assemble(&template, &VariableOverrides::new(), &extras, month, None, "x").unwrap();
        let expected = bill.clone();

        let record = InvoiceRecord::build(bill, &template, &settings()).unwrap();
        assert_eq!(record.bill, expected);
        let fields = top_level_fields(&record.pix.unwrap().payload).unwrap();
        assert!(fields.contains(&("54".to_string(), "3000.00".to_string())));
    }

    #[test]
    fn encoder_errors_propagate() {
        let template = template().with_pix_key("k".repeat(90));
        let err = InvoiceRecord::build(bill_for(&template), &template, &settings()).unwrap_err();
        assert!(matches!(err, InvoiceError::Pix(PixError::FieldTooLong { .. })));
    }
}
