//! Turns a billing template plus one month's inputs into a [`Bill`].
//!
//! Assembly is a pure function: no I/O, no clock, no randomness. Identical
//! inputs always produce an identical bill, so callers may retry or recompute
//! freely.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rentivo_core::{BillingItemId, Centavos, DomainError, DomainResult, ReferenceMonth};

use crate::bill::{Bill, LineItemDraft, LineItemKind};
use crate::template::{BillingItemKind, BillingTemplate};

/// One-off charge added to a single bill (repairs, fines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExtraChargeFields")]
pub struct ExtraCharge {
    description: String,
    amount: Centavos,
}

/// Wire shape of [`ExtraCharge`]; only reachable through validation.
#[derive(Deserialize)]
struct ExtraChargeFields {
    description: String,
    amount: Centavos,
}

impl TryFrom<ExtraChargeFields> for ExtraCharge {
    type Error = DomainError;

    fn try_from(fields: ExtraChargeFields) -> Result<Self, Self::Error> {
        Self::new(fields.description, fields.amount)
    }
}

impl ExtraCharge {
    /// Amount must be positive and the description non-blank.
    pub fn new(description: impl Into<String>, amount: Centavos) -> DomainResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::validation("extra charge description is required"));
        }
        if amount.is_zero() {
            return Err(DomainError::validation("extra charge amount must be positive"));
        }
        Ok(Self {
            description,
            amount,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Centavos {
        self.amount
    }
}

/// Amounts of variable items for one reference month, keyed by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableOverrides(BTreeMap<BillingItemId, Centavos>);

impl VariableOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item_id: BillingItemId, amount: Centavos) -> Option<Centavos> {
        self.0.insert(item_id, amount)
    }

    pub fn get(&self, item_id: BillingItemId) -> Option<Centavos> {
        self.0.get(&item_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = BillingItemId> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(BillingItemId, Centavos)> for VariableOverrides {
    fn from_iter<I: IntoIterator<Item = (BillingItemId, Centavos)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Assemble the bill for `reference_month`.
///
/// Template items come first, in template order: fixed items keep their
/// amount, variable items take their override (zero when absent). Extras
/// follow in the order given. Overrides for ids the template no longer has
/// are ignored.
///
/// Returns [`DomainError::ContractViolation`] if a variable item has no id.
pub fn assemble(
    template: &BillingTemplate,
    overrides: &VariableOverrides,
    extras: &[ExtraCharge],
    reference_month: ReferenceMonth,
    due_date: Option<NaiveDate>,
    notes: impl Into<String>,
) -> DomainResult<Bill> {
    let mut drafts = Vec::with_capacity(template.items().len() + extras.len());

    for item in template.items() {
        let amount = match item.kind {
            BillingItemKind::Fixed => item.amount,
            BillingItemKind::Variable => {
                let id = item.id.ok_or_else(|| {
                    DomainError::contract(format!(
                        "variable billing item {:?} has no id",
                        item.description
                    ))
                })?;
                overrides.get(id).unwrap_or(Centavos::ZERO)
            }
        };
        drafts.push(LineItemDraft::new(
            item.description.clone(),
            amount,
            item.kind.into(),
        ));
    }

    for extra in extras {
        drafts.push(LineItemDraft::new(
            extra.description.clone(),
            extra.amount,
            LineItemKind::Extra,
        ));
    }

    for stale in overrides.item_ids().filter(|id| !template.contains_item(*id)) {
        tracing::debug!(item_id = %stale, "ignoring override for item not in template");
    }

    let bill = Bill::from_drafts(reference_month, drafts, notes.into(), due_date)?;
    tracing::debug!(
        template = template.name(),
        reference_month = %reference_month,
        line_items = bill.line_items().len(),
        total = bill.total().value(),
        "bill assembled"
    );
    Ok(bill)
}
