use crate::core::{BillingError, Entity};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment status of an invoice.
///
/// The only transition is `Unpaid → Paid`; `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
        }
    }
}

/// Status filter accepted by invoice listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl InvoiceFilter {
    /// Parse the raw `filter` query value. Absent or empty means `All`.
    pub fn parse(raw: Option<&str>) -> Result<Self, BillingError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(InvoiceFilter::All);
        };

        match raw.to_ascii_lowercase().as_str() {
            "all" => Ok(InvoiceFilter::All),
            "paid" => Ok(InvoiceFilter::Paid),
            "unpaid" | "pending" => Ok(InvoiceFilter::Unpaid),
            other => Err(BillingError::validation(format!(
                "Unknown invoice filter '{}', expected one of: all, paid, unpaid",
                other
            ))),
        }
    }

    /// The status to match, or `None` for every invoice
    pub fn status(&self) -> Option<InvoiceStatus> {
        match self {
            InvoiceFilter::All => None,
            InvoiceFilter::Paid => Some(InvoiceStatus::Paid),
            InvoiceFilter::Unpaid => Some(InvoiceStatus::Unpaid),
        }
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.status().is_none_or(|status| invoice.status == status)
    }
}

/// One billed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    /// `quantity × unitPrice`, or `None` if it does not fit in a `Decimal`
    pub fn total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// A billing document issued to one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub client_id: Uuid,
    /// Owner of the client at the time of issue
    pub user_id: Uuid,
    pub invoice_number: String,
    pub items: Vec<LineItem>,
    pub amount: Decimal,
    pub currency: String,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: InvoiceStatus,
    #[serde(with = "crate::core::timestamp::option", default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::core::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::core::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Sum of the line totals; overflow is a validation error naming the item
    pub fn amount_of(items: &[LineItem]) -> Result<Decimal, BillingError> {
        items
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |sum, (index, item)| {
                item.total()
                    .and_then(|total| sum.checked_add(total))
                    .ok_or_else(|| {
                        BillingError::validation(format!("items[{}]: amount overflows", index))
                    })
            })
    }

    /// Issue a new unpaid invoice; `sequence` is the 1-based per-client number
    pub fn issue(
        client_id: Uuid,
        user_id: Uuid,
        sequence: u64,
        items: Vec<LineItem>,
        currency: String,
        due_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<Self, BillingError> {
        let now = Utc::now();
        let amount = Self::amount_of(&items)?;
        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            user_id,
            invoice_number: format!("INV-{:04}", sequence),
            items,
            amount,
            currency,
            due_date,
            notes,
            status: InvoiceStatus::Unpaid,
            paid_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Apply the `Unpaid → Paid` transition. Returns `false` if already paid.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_paid() {
            return false;
        }
        self.status = InvoiceStatus::Paid;
        self.paid_at = Some(at);
        self.updated_at = at;
        true
    }
}

impl Entity for Invoice {
    fn resource_name() -> &'static str {
        "invoices"
    }

    fn resource_name_singular() -> &'static str {
        "invoice"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
