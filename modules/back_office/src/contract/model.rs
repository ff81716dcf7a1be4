//! Contract models for the back office
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Commission terms agreed with a creator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionTerms {
    /// Percentage of gross sales retained by the platform
    pub rate: f64,
    /// Flat fee retained per sold item (yen)
    pub per_item_fee: i64,
}

/// Tax classification of a creator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessType {
    Individual,
    Corporate,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Corporate => "corporate",
        }
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "corporate" => Ok(Self::Corporate),
            other => Err(format!("unknown business type '{}'", other)),
        }
    }
}

/// Payout bank account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankAccount {
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_type: Option<String>,
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
}

/// Creator profile with live commission defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Creator {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    /// Live commission defaults, replaced whenever a contract is agreed
    pub terms: CommissionTerms,
    pub business_type: BusinessType,
    pub withholding_required: bool,
    pub bank: BankAccount,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating a creator
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorDraft {
    pub name: String,
    pub email: Option<String>,
    pub terms: CommissionTerms,
    pub business_type: BusinessType,
    pub withholding_required: bool,
    pub bank: BankAccount,
    pub is_active: bool,
}

/// Contract lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    Pending,
    Agreed,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Agreed => "agreed",
        }
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "agreed" => Ok(Self::Agreed),
            other => Err(format!("unknown contract status '{}'", other)),
        }
    }
}

/// How the agreement link reached the creator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractDelivery {
    /// Link generated for the admin to hand over manually
    Link,
    /// Link sent to the creator's email address
    Email,
}

impl ContractDelivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Email => "email",
        }
    }
}

impl FromStr for ContractDelivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" => Ok(Self::Link),
            "email" => Ok(Self::Email),
            other => Err(format!("unknown contract delivery '{}'", other)),
        }
    }
}

/// One version of a creator's commission contract
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorContract {
    /// Row id; 0 until persisted
    pub id: i64,
    pub creator_id: i64,
    /// Monotonic per creator, starting at 1
    pub version: i32,
    pub status: ContractStatus,
    /// 64 lowercase hex chars, used by the external agreement page
    pub token: String,
    pub delivery: ContractDelivery,
    /// Terms in force before this contract
    pub previous_terms: CommissionTerms,
    /// Terms proposed by this contract
    pub new_terms: CommissionTerms,
    pub sent_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub agreed_at: Option<DateTime<Utc>>,
}

/// Calendar month used for sales and payments, rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Half-open UTC range `[start, end)` covering the month
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start(), self.next().start())
    }

    fn start(&self) -> DateTime<Utc> {
        // Construction guarantees the first of the month exists
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("period '{}' must be formatted as YYYY-MM", s);
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Aggregated sales for one creator over a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesSummary {
    /// Gross sales in yen
    pub gross_sales: i64,
    /// Sold items (transactions + order item quantities)
    pub item_count: i64,
}

/// Per-creator line of a period sales report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorSales {
    pub creator_id: i64,
    pub summary: SalesSummary,
}

/// Payment notice status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Computed but not yet persisted
    Draft,
    Issued,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "issued" => Ok(Self::Issued),
            "paid" => Ok(Self::Paid),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// Monthly payment statement for a creator
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentNotice {
    /// Row id; 0 for drafts
    pub id: i64,
    pub creator_id: i64,
    pub period: Period,
    pub sales: SalesSummary,
    pub terms: CommissionTerms,
    pub commission_by_rate: i64,
    pub commission_by_item: i64,
    pub total_commission: i64,
    pub withholding_tax: i64,
    pub net_payment: i64,
    pub status: PaymentStatus,
    pub issued_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub archive_file_id: Option<String>,
}

/// Site setting key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Manually ordered content collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Announcements,
    Faq,
    ProductCategories,
    ServiceCategories,
    StickerGroups,
    WorkInsertPages,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Self::Announcements,
        Self::Faq,
        Self::ProductCategories,
        Self::ServiceCategories,
        Self::StickerGroups,
        Self::WorkInsertPages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Announcements => "announcements",
            Self::Faq => "faq",
            Self::ProductCategories => "product_categories",
            Self::ServiceCategories => "service_categories",
            Self::StickerGroups => "sticker_groups",
            Self::WorkInsertPages => "work_insert_pages",
        }
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown collection '{}'", s))
    }
}

/// Entry of an ordered content collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub collection: Collection,
    pub title: String,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating a collection entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDraft {
    pub title: String,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_and_formats() {
        let period: Period = "2024-03".parse().unwrap();
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2024-03");
    }

    #[test]
    fn period_rejects_malformed_input() {
        for bad in [
            "2024-13", "2024-00", "24-03", "2024/03", "2024-3", "", "+999-03", "-999-03",
            "2024-+3", " 024-03",
        ] {
            assert!(bad.parse::<Period>().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn period_bounds_roll_over_year() {
        let period = Period::new(2024, 12).unwrap();
        let (start, end) = period.bounds();
        assert_eq!(start.to_rfc3339(), "2024-12-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn collection_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>(), Ok(collection));
        }
        assert!("banners".parse::<Collection>().is_err());
    }
}
