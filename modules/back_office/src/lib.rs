//! Back Office Module
//!
//! Administrative back end of a creator marketplace: creator profiles,
//! versioned commission contracts, monthly sales and payment notices with
//! withholding tax, site settings and manually ordered content collections.

// Public exports
pub mod contract;
pub use contract::{
    client::BackOfficeApi, error::BackOfficeError, BusinessType, CatalogEntry, Collection,
    CommissionTerms, Creator, CreatorContract, PaymentNotice, Period, SiteSetting,
};

pub mod module;
pub use module::BackOfficeModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
