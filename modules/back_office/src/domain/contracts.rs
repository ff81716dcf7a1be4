//! Creator contract versioning
//!
//! Each new contract for a creator gets `max(version) + 1`, starts `pending`
//! and carries a random token that the external agreement page redeems.
//! Admin views always show the latest agreed contract in preference to any
//! newer pending one.

use super::events::{publish_best_effort, AuditEvent, AuditPublisher};
use super::repository::{ContractRepository, CreatorRepository};
use super::validation::validate_terms;
use crate::contract::{
    BackOfficeError, CommissionTerms, ContractDelivery, ContractStatus, Creator, CreatorContract,
};
use chrono::Utc;
use std::sync::Arc;

/// Bytes of randomness in an agreement token
const TOKEN_BYTES: usize = 32;

/// A freshly issued contract together with its agreement URL
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedContract {
    pub contract: CreatorContract,
    pub agreement_url: String,
}

/// Domain service for the contract workflow
pub struct ContractService {
    contracts: Arc<dyn ContractRepository>,
    creators: Arc<dyn CreatorRepository>,
    audit: Arc<dyn AuditPublisher>,
    agreement_base_url: String,
}

impl ContractService {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        creators: Arc<dyn CreatorRepository>,
        audit: Arc<dyn AuditPublisher>,
        agreement_base_url: impl Into<String>,
    ) -> Self {
        Self {
            contracts,
            creators,
            audit,
            agreement_base_url: agreement_base_url.into(),
        }
    }

    /// Create a pending contract and return its agreement link
    pub async fn generate_link(
        &self,
        creator_id: i64,
        new_terms: CommissionTerms,
    ) -> Result<IssuedContract, BackOfficeError> {
        let creator = self.load_creator(creator_id).await?;
        let contract = self
            .issue(&creator, new_terms, ContractDelivery::Link, None)
            .await?;
        Ok(self.with_url(contract))
    }

    /// Create a pending contract addressed to the creator's email
    pub async fn send_contract(
        &self,
        creator_id: i64,
        new_terms: CommissionTerms,
    ) -> Result<IssuedContract, BackOfficeError> {
        let creator = self.load_creator(creator_id).await?;
        let Some(email) = creator.email.clone() else {
            return Err(BackOfficeError::validation(format!(
                "creator {} has no email address",
                creator_id
            )));
        };

        let contract = self
            .issue(&creator, new_terms, ContractDelivery::Email, Some(email))
            .await?;
        publish_best_effort(self.audit.as_ref(), AuditEvent::contract_sent(&contract)).await;
        Ok(self.with_url(contract))
    }

    /// Redeem an agreement token: pending -> agreed, and the new terms become
    /// the creator's live defaults unless a newer contract is already agreed
    pub async fn agree(&self, token: &str) -> Result<CreatorContract, BackOfficeError> {
        let mut contract = self
            .contracts
            .find_by_token(token)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("contract", "token"))?;

        if contract.status == ContractStatus::Agreed {
            return Err(BackOfficeError::conflict(format!(
                "contract v{} for creator {} is already agreed",
                contract.version, contract.creator_id
            )));
        }

        let superseded = self
            .contracts
            .find_latest_agreed(contract.creator_id)
            .await
            .map_err(BackOfficeError::internal)?
            .is_some_and(|latest| latest.id > contract.id);

        let agreed_at = Utc::now();
        self.contracts
            .mark_agreed(contract.id, agreed_at)
            .await
            .map_err(BackOfficeError::internal)?;
        // A newer agreed contract keeps owning the live defaults
        if !superseded {
            self.creators
                .update_terms(contract.creator_id, contract.new_terms)
                .await
                .map_err(BackOfficeError::internal)?;
        }

        contract.status = ContractStatus::Agreed;
        contract.agreed_at = Some(agreed_at);

        tracing::info!(
            creator_id = contract.creator_id,
            version = contract.version,
            "contract agreed"
        );
        publish_best_effort(self.audit.as_ref(), AuditEvent::contract_agreed(&contract)).await;
        Ok(contract)
    }

    /// Contract to display for a creator
    pub async fn effective_contract(
        &self,
        creator_id: i64,
    ) -> Result<Option<CreatorContract>, BackOfficeError> {
        self.load_creator(creator_id).await?;
        self.contracts
            .find_effective(creator_id)
            .await
            .map_err(BackOfficeError::internal)
    }

    /// Terms in force: latest agreed contract, else the creator's defaults
    pub async fn effective_terms(&self, creator_id: i64) -> Result<CommissionTerms, BackOfficeError> {
        let creator = self.load_creator(creator_id).await?;
        self.terms_for(&creator).await
    }

    pub(crate) async fn terms_for(
        &self,
        creator: &Creator,
    ) -> Result<CommissionTerms, BackOfficeError> {
        Ok(self
            .contracts
            .find_latest_agreed(creator.id)
            .await
            .map_err(BackOfficeError::internal)?
            .map(|c| c.new_terms)
            .unwrap_or(creator.terms))
    }

    /// All contract versions for a creator, newest first
    pub async fn history(&self, creator_id: i64) -> Result<Vec<CreatorContract>, BackOfficeError> {
        self.load_creator(creator_id).await?;
        self.contracts
            .list_for_creator(creator_id)
            .await
            .map_err(BackOfficeError::internal)
    }

    async fn issue(
        &self,
        creator: &Creator,
        new_terms: CommissionTerms,
        delivery: ContractDelivery,
        sent_to: Option<String>,
    ) -> Result<CreatorContract, BackOfficeError> {
        validate_terms(&new_terms)?;

        let previous_terms = self.terms_for(creator).await?;
        let version = self
            .contracts
            .max_version(creator.id)
            .await
            .map_err(BackOfficeError::internal)?
            .unwrap_or(0)
            + 1;

        let now = Utc::now();
        let draft = CreatorContract {
            id: 0,
            creator_id: creator.id,
            version,
            status: ContractStatus::Pending,
            token: generate_token(),
            delivery,
            previous_terms,
            new_terms,
            sent_at: sent_to.as_ref().map(|_| now),
            sent_to,
            created_at: now,
            agreed_at: None,
        };

        let contract = self
            .contracts
            .insert(&draft)
            .await
            .map_err(BackOfficeError::internal)?;

        tracing::info!(
            creator_id = creator.id,
            version,
            delivery = delivery.as_str(),
            "contract issued"
        );
        publish_best_effort(self.audit.as_ref(), AuditEvent::contract_issued(&contract)).await;
        Ok(contract)
    }

    async fn load_creator(&self, creator_id: i64) -> Result<Creator, BackOfficeError> {
        self.creators
            .find_by_id(creator_id)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("creator", creator_id))
    }

    fn with_url(&self, contract: CreatorContract) -> IssuedContract {
        IssuedContract {
            agreement_url: agreement_url(&self.agreement_base_url, &contract.token),
            contract,
        }
    }
}

/// Random, unguessable agreement token (64 lowercase hex chars)
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

pub fn agreement_url(base_url: &str, token: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), token)
}

/// Display precedence: agreed contracts first, then the highest id
pub fn select_effective(contracts: &[CreatorContract]) -> Option<&CreatorContract> {
    contracts
        .iter()
        .max_by_key(|c| (c.status == ContractStatus::Agreed, c.id))
}
