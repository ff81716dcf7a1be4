//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::BackOfficeApi;
pub use error::BackOfficeError;
pub use model::{
    BankAccount, BusinessType, CatalogDraft, CatalogEntry, Collection, CommissionTerms, Creator,
    CreatorContract, CreatorDraft, CreatorSales, ContractDelivery, ContractStatus,
    PaymentNotice, PaymentStatus, Period, SalesSummary, SiteSetting,
};
