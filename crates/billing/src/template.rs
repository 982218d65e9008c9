use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rentivo_core::{BillingItemId, Centavos, DomainError, DomainResult};

/// How a template item gets its amount each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingItemKind {
    /// Same amount every month (rent, condo fee).
    Fixed,
    /// Amount supplied per reference month (water, electricity).
    Variable,
}

/// One recurring charge of a billing template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingItem {
    /// Assigned by the persistence layer. Variable items need one so monthly
    /// overrides can be keyed by it.
    pub id: Option<BillingItemId>,
    pub description: String,
    /// Only meaningful for [`BillingItemKind::Fixed`].
    pub amount: Centavos,
    pub kind: BillingItemKind,
    pub sort_order: u32,
}

impl BillingItem {
    pub fn fixed(
        id: Option<BillingItemId>,
        description: impl Into<String>,
        amount: Centavos,
        sort_order: u32,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            kind: BillingItemKind::Fixed,
            sort_order,
        }
    }

    pub fn variable(
        id: Option<BillingItemId>,
        description: impl Into<String>,
        sort_order: u32,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount: Centavos::ZERO,
            kind: BillingItemKind::Variable,
            sort_order,
        }
    }
}

/// Recurring charges of one rented unit, in template order.
///
/// Templates change over time; bills copy their rows by value when they are
/// generated, so editing a template never touches bills already issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingTemplate {
    name: String,
    items: Vec<BillingItem>,
    pix_key: Option<String>,
}

impl BillingTemplate {
    /// Build a template, rejecting duplicate item ids.
    pub fn new(name: impl Into<String>, items: Vec<BillingItem>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for id in items.iter().filter_map(|item| item.id) {
            if !seen.insert(id) {
                return Err(DomainError::validation(format!(
                    "duplicate billing item id {id}"
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            items,
            pix_key: None,
        })
    }

    /// Per-template PIX key, trimmed; overrides the configured default when
    /// non-empty.
    pub fn with_pix_key(mut self, pix_key: impl Into<String>) -> Self {
        let key = pix_key.into().trim().to_string();
        self.pix_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[BillingItem] {
        &self.items
    }

    pub fn pix_key(&self) -> Option<&str> {
        self.pix_key.as_deref()
    }

    /// Ids of the variable items, in template order.
    pub fn variable_item_ids(&self) -> impl Iterator<Item = BillingItemId> + '_ {
        self.items
            .iter()
            .filter(|item| item.kind == BillingItemKind::Variable)
            .filter_map(|item| item.id)
    }

    pub fn contains_item(&self, id: BillingItemId) -> bool {
        self.items.iter().any(|item| item.id == Some(id))
    }
}
