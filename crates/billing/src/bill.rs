use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rentivo_core::{Centavos, DomainError, DomainResult, ReferenceMonth, ValueObject};

use crate::template::BillingItemKind;

/// Origin of a bill row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    Fixed,
    Variable,
    Extra,
}

impl LineItemKind {
    /// Label printed next to each invoice row.
    pub fn label_pt(self) -> &'static str {
        match self {
            LineItemKind::Fixed => "Fixo",
            LineItemKind::Variable => "Variável",
            LineItemKind::Extra => "Extra",
        }
    }
}

impl From<BillingItemKind> for LineItemKind {
    fn from(kind: BillingItemKind) -> Self {
        match kind {
            BillingItemKind::Fixed => LineItemKind::Fixed,
            BillingItemKind::Variable => LineItemKind::Variable,
        }
    }
}

/// Resolved bill row, copied by value from its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLineItem {
    pub description: String,
    pub amount: Centavos,
    pub kind: LineItemKind,
    /// 0-based position in the bill.
    pub sort_order: u32,
}

impl ValueObject for BillLineItem {}

/// A row before it is placed in a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub description: String,
    pub amount: Centavos,
    pub kind: LineItemKind,
}

impl LineItemDraft {
    pub fn new(description: impl Into<String>, amount: Centavos, kind: LineItemKind) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
        }
    }
}

impl From<BillLineItem> for LineItemDraft {
    fn from(item: BillLineItem) -> Self {
        Self {
            description: item.description,
            amount: item.amount,
            kind: item.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Overdue,
    Pending,
}

/// One month's bill for a billing template.
///
/// Invariant: `total()` is the exact integer sum of the line item amounts and
/// `sort_order` runs `0, 1, 2, …` in row order. Rows are only ever replaced as
/// a whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    reference_month: ReferenceMonth,
    line_items: Vec<BillLineItem>,
    total_centavos: Centavos,
    notes: String,
    due_date: Option<NaiveDate>,
    paid_on: Option<NaiveDate>,
}

impl Bill {
    pub(crate) fn from_drafts(
        reference_month: ReferenceMonth,
        drafts: Vec<LineItemDraft>,
        notes: String,
        due_date: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        let (line_items, total_centavos) = place_rows(drafts)?;
        Ok(Self {
            reference_month,
            line_items,
            total_centavos,
            notes,
            due_date,
            paid_on: None,
        })
    }

    /// Rebuild a stored bill. Rows are taken in the given order and the total
    /// is recomputed from them.
    pub fn restore(
        reference_month: ReferenceMonth,
        drafts: Vec<LineItemDraft>,
        notes: impl Into<String>,
        due_date: Option<NaiveDate>,
        paid_on: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        let mut bill = Self::from_drafts(reference_month, drafts, notes.into(), due_date)?;
        bill.paid_on = paid_on;
        Ok(bill)
    }

    pub fn reference_month(&self) -> ReferenceMonth {
        self.reference_month
    }

    pub fn line_items(&self) -> &[BillLineItem] {
        &self.line_items
    }

    pub fn total(&self) -> Centavos {
        self.total_centavos
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn paid_on(&self) -> Option<NaiveDate> {
        self.paid_on
    }

    /// Discard every current row and install `drafts` in their place.
    ///
    /// On error the bill is left untouched.
    pub fn replace_line_items(&mut self, drafts: Vec<LineItemDraft>) -> DomainResult<()> {
        let (line_items, total_centavos) = place_rows(drafts)?;
        self.line_items = line_items;
        self.total_centavos = total_centavos;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub fn mark_paid(&mut self, paid_on: NaiveDate) {
        self.paid_on = Some(paid_on);
    }

    pub fn mark_unpaid(&mut self) {
        self.paid_on = None;
    }

    /// Overdue only once `today` is strictly past the due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.paid_on.is_some() {
            return false;
        }
        self.due_date.is_some_and(|due| today > due)
    }

    pub fn payment_status(&self, today: NaiveDate) -> PaymentStatus {
        if self.paid_on.is_some() {
            PaymentStatus::Paid
        } else if self.is_overdue(today) {
            PaymentStatus::Overdue
        } else {
            PaymentStatus::Pending
        }
    }
}

fn place_rows(drafts: Vec<LineItemDraft>) -> DomainResult<(Vec<BillLineItem>, Centavos)> {
    let total = Centavos::checked_sum(drafts.iter().map(|draft| draft.amount))
        .ok_or_else(|| DomainError::invariant("bill total overflow"))?;

    let mut line_items = Vec::with_capacity(drafts.len());
    for (position, draft) in drafts.into_iter().enumerate() {
        let sort_order = u32::try_from(position)
            .map_err(|_| DomainError::invariant("too many bill line items"))?;
        line_items.push(BillLineItem {
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            sort_order,
        });
    }

    Ok((line_items, total))
}
