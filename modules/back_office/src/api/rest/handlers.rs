//! HTTP request handlers - thin layer that delegates to domain services

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{BackOfficeError, Collection, CommissionTerms, CreatorDraft, Period};
use crate::domain::{
    CatalogService, ContractService, CreatorService, PaymentService, SettingsService,
};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

fn parse_period(raw: &str) -> Result<Period, Problem> {
    raw.parse()
        .map_err(|e: String| map_domain_error(BackOfficeError::validation(e)))
}

fn parse_collection(raw: &str) -> Result<Collection, Problem> {
    raw.parse()
        .map_err(|_| map_domain_error(BackOfficeError::not_found("collection", raw)))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ===== Site Setting Handlers =====

pub async fn list_settings(
    service: Arc<SettingsService>,
) -> Result<Json<SiteSettingsListResponse>, Problem> {
    let items: Vec<SiteSettingDto> = service
        .list()
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(SiteSettingsListResponse { items, total }))
}

pub async fn get_setting(
    service: Arc<SettingsService>,
    Path(key): Path<String>,
) -> Result<Json<SiteSettingDto>, Problem> {
    let setting = service
        .find(&key)
        .await
        .map_err(map_domain_error)?
        .ok_or_else(|| map_domain_error(BackOfficeError::not_found("site_setting", &key)))?;

    Ok(Json(setting.into()))
}

pub async fn put_setting(
    service: Arc<SettingsService>,
    Path(key): Path<String>,
    Json(req): Json<UpdateSiteSettingRequest>,
) -> Result<Json<SiteSettingDto>, Problem> {
    let setting = service
        .set(&key, &req.value)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(setting.into()))
}

pub async fn delete_setting(
    service: Arc<SettingsService>,
    Path(key): Path<String>,
) -> Result<StatusCode, Problem> {
    service.delete(&key).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Creator Handlers =====

pub async fn list_creators(
    service: Arc<CreatorService>,
    Query(query): Query<ActiveOnlyQuery>,
) -> Result<Json<CreatorsListResponse>, Problem> {
    let items: Vec<CreatorDto> = service
        .list(query.active_only)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(CreatorsListResponse { items, total }))
}

pub async fn create_creator(
    service: Arc<CreatorService>,
    Json(req): Json<CreatorRequest>,
) -> Result<(StatusCode, Json<CreatorDto>), Problem> {
    let draft = CreatorDraft::try_from(req).map_err(map_domain_error)?;
    let creator = service.create(draft).await.map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(creator.into())))
}

pub async fn get_creator(
    service: Arc<CreatorService>,
    Path(id): Path<i64>,
) -> Result<Json<CreatorDto>, Problem> {
    let creator = service.get(id).await.map_err(map_domain_error)?;
    Ok(Json(creator.into()))
}

pub async fn update_creator(
    service: Arc<CreatorService>,
    Path(id): Path<i64>,
    Json(req): Json<CreatorRequest>,
) -> Result<Json<CreatorDto>, Problem> {
    let draft = CreatorDraft::try_from(req).map_err(map_domain_error)?;
    let creator = service.update(id, draft).await.map_err(map_domain_error)?;

    Ok(Json(creator.into()))
}

pub async fn delete_creator(
    service: Arc<CreatorService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Contract Handlers =====

pub async fn issue_contract(
    service: Arc<ContractService>,
    Path(creator_id): Path<i64>,
    Json(req): Json<ContractActionRequest>,
) -> Result<(StatusCode, Json<IssuedContractDto>), Problem> {
    let terms: CommissionTerms = req.terms.into();
    let issued = match req.action {
        ContractAction::GenerateLink => service.generate_link(creator_id, terms).await,
        ContractAction::SendContract => service.send_contract(creator_id, terms).await,
    }
    .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(issued.into())))
}

pub async fn contract_history(
    service: Arc<ContractService>,
    Path(creator_id): Path<i64>,
) -> Result<Json<ContractHistoryResponse>, Problem> {
    let data = service
        .history(creator_id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ContractHistoryResponse {
        success: true,
        data,
    }))
}

pub async fn effective_contract(
    service: Arc<ContractService>,
    Path(creator_id): Path<i64>,
) -> Result<Json<EffectiveContractResponse>, Problem> {
    let contract = service
        .effective_contract(creator_id)
        .await
        .map_err(map_domain_error)?;
    let terms = service
        .effective_terms(creator_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(EffectiveContractResponse {
        contract: contract.map(Into::into),
        terms: terms.into(),
    }))
}

pub async fn agree_contract(
    service: Arc<ContractService>,
    Path(token): Path<String>,
) -> Result<Json<ContractDto>, Problem> {
    let contract = service.agree(&token).await.map_err(map_domain_error)?;
    Ok(Json(contract.into()))
}

// ===== Sales and Payment Handlers =====

pub async fn sales_report(
    service: Arc<PaymentService>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<SalesReportResponse>, Problem> {
    let period = parse_period(&query.period)?;
    let items: Vec<CreatorSalesDto> = service
        .period_report(period)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total_gross_sales = items.iter().map(|i| i.gross_sales).sum();

    Ok(Json(SalesReportResponse {
        period: period.to_string(),
        items,
        total_gross_sales,
    }))
}

pub async fn preview_payment(
    service: Arc<PaymentService>,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<PaymentNoticeDto>, Problem> {
    let period = parse_period(&query.period)?;
    let notice = service
        .preview(query.creator_id, period)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(notice.into()))
}

pub async fn list_notices(
    service: Arc<PaymentService>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PaymentNoticesListResponse>, Problem> {
    let period = parse_period(&query.period)?;
    let items: Vec<PaymentNoticeDto> = service
        .list(period)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(PaymentNoticesListResponse { items, total }))
}

pub async fn issue_notice(
    service: Arc<PaymentService>,
    Json(req): Json<IssueNoticeRequest>,
) -> Result<(StatusCode, Json<PaymentNoticeDto>), Problem> {
    let period = parse_period(&req.period)?;
    let notice = service
        .issue(req.creator_id, period)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(notice.into())))
}

pub async fn mark_notice_paid(
    service: Arc<PaymentService>,
    Path(id): Path<i64>,
) -> Result<Json<PaymentNoticeDto>, Problem> {
    let notice = service.mark_paid(id).await.map_err(map_domain_error)?;
    Ok(Json(notice.into()))
}

pub async fn archive_notice(
    service: Arc<PaymentService>,
    Path(id): Path<i64>,
) -> Result<Json<PaymentNoticeDto>, Problem> {
    let notice = service.archive(id).await.map_err(map_domain_error)?;
    Ok(Json(notice.into()))
}

// ===== Catalog Handlers =====

pub async fn list_entries(
    service: Arc<CatalogService>,
    Path(collection): Path<String>,
    Query(query): Query<ActiveOnlyQuery>,
) -> Result<Json<CatalogListResponse>, Problem> {
    let collection = parse_collection(&collection)?;
    let items: Vec<CatalogEntryDto> = service
        .list(collection, query.active_only)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(CatalogListResponse { items, total }))
}

pub async fn create_entry(
    service: Arc<CatalogService>,
    Path(collection): Path<String>,
    Json(req): Json<CatalogEntryRequest>,
) -> Result<(StatusCode, Json<CatalogEntryDto>), Problem> {
    let collection = parse_collection(&collection)?;
    let entry = service
        .create(collection, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

pub async fn update_entry(
    service: Arc<CatalogService>,
    Path((collection, id)): Path<(String, i64)>,
    Json(req): Json<CatalogEntryRequest>,
) -> Result<Json<CatalogEntryDto>, Problem> {
    let collection = parse_collection(&collection)?;
    let entry = service
        .update(collection, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entry.into()))
}

pub async fn delete_entry(
    service: Arc<CatalogService>,
    Path((collection, id)): Path<(String, i64)>,
) -> Result<StatusCode, Problem> {
    let collection = parse_collection(&collection)?;
    service
        .delete(collection, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_entries(
    service: Arc<CatalogService>,
    Path(collection): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<CatalogListResponse>, Problem> {
    let collection = parse_collection(&collection)?;
    let items: Vec<CatalogEntryDto> = service
        .reorder(collection, &req.ids)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(CatalogListResponse { items, total }))
}
