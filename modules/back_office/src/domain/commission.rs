//! Commission and withholding-tax calculation for creator payouts
//!
//! All amounts are yen. Every intermediate value is floored to an integer,
//! never rounded, and float arithmetic happens in f64 in the order written
//! below so results match previously issued notices to the yen.

use crate::contract::{BusinessType, CommissionTerms};

/// Taxable amount up to which the flat withholding rate applies
pub const WITHHOLDING_THRESHOLD: i64 = 1_000_000;

/// Withholding rate up to the threshold (10.21%)
pub const WITHHOLDING_BASE_RATE: f64 = 0.1021;

/// Withholding rate for the portion above the threshold (20.42%)
pub const WITHHOLDING_UPPER_RATE: f64 = 0.2042;

/// Withholding owed on exactly the threshold amount
pub const WITHHOLDING_THRESHOLD_TAX: i64 = 102_100;

/// Inputs of a payout calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionInput {
    pub gross_sales: i64,
    pub item_count: i64,
    pub terms: CommissionTerms,
    pub business_type: BusinessType,
    pub withholding_required: bool,
}

/// Result of a payout calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionBreakdown {
    pub commission_by_rate: i64,
    pub commission_by_item: i64,
    pub total_commission: i64,
    pub withholding_tax: i64,
    pub net_payment: i64,
}

/// Compute commission, withholding tax and net payment.
///
/// Inputs are trusted internal figures and are not validated; negative
/// values flow through the formulas unchanged.
pub fn calculate(input: &CommissionInput) -> CommissionBreakdown {
    let commission_by_rate = (input.gross_sales as f64 * input.terms.rate / 100.0).floor() as i64;
    let commission_by_item = input.terms.per_item_fee * input.item_count;
    let total_commission = commission_by_rate + commission_by_item;

    let withholding_tax = if input.business_type == BusinessType::Individual
        && input.withholding_required
        && input.gross_sales > 0
    {
        withholding_tax(input.gross_sales - total_commission)
    } else {
        0
    };

    CommissionBreakdown {
        commission_by_rate,
        commission_by_item,
        total_commission,
        withholding_tax,
        net_payment: input.gross_sales - total_commission - withholding_tax,
    }
}

/// Two-bracket withholding on a taxable payout
pub fn withholding_tax(taxable: i64) -> i64 {
    if taxable <= WITHHOLDING_THRESHOLD {
        (taxable as f64 * WITHHOLDING_BASE_RATE).floor() as i64
    } else {
        ((taxable - WITHHOLDING_THRESHOLD) as f64 * WITHHOLDING_UPPER_RATE).floor() as i64
            + WITHHOLDING_THRESHOLD_TAX
    }
}
