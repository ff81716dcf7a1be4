//! Route registration

use super::{dto::*, error::Problem, handlers};
use crate::domain::Services;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};

/// Register all REST routes on `router`
pub fn register_routes(router: Router, services: Services) -> Router {
    router
        .route("/health", get(handlers::health))
        // Site settings
        .route("/settings", get(list_settings_handler))
        .route(
            "/settings/{key}",
            get(get_setting_handler)
                .put(put_setting_handler)
                .delete(delete_setting_handler),
        )
        // Creators
        .route(
            "/creators",
            get(list_creators_handler).post(create_creator_handler),
        )
        .route(
            "/creators/{id}",
            get(get_creator_handler)
                .put(update_creator_handler)
                .delete(delete_creator_handler),
        )
        // Contracts
        .route(
            "/creators/{id}/contracts",
            get(contract_history_handler).post(issue_contract_handler),
        )
        .route(
            "/creators/{id}/contracts/effective",
            get(effective_contract_handler),
        )
        .route("/contracts/{token}/agree", post(agree_contract_handler))
        // Sales and payments
        .route("/sales", get(sales_report_handler))
        .route("/payments/preview", get(preview_payment_handler))
        .route(
            "/payments/notices",
            get(list_notices_handler).post(issue_notice_handler),
        )
        .route("/payments/notices/{id}/paid", post(mark_notice_paid_handler))
        .route("/payments/notices/{id}/archive", post(archive_notice_handler))
        // Ordered collections
        .route(
            "/catalog/{collection}",
            get(list_entries_handler).post(create_entry_handler),
        )
        .route("/catalog/{collection}/order", put(reorder_entries_handler))
        .route(
            "/catalog/{collection}/{id}",
            put(update_entry_handler).delete(delete_entry_handler),
        )
        .layer(Extension(services))
}

// ===== Handler wrappers that extract services from Extension =====
//
// Extractor rejections are taken as `Result` so they surface as Problem documents.

async fn list_settings_handler(
    Extension(services): Extension<Services>,
) -> Result<Json<SiteSettingsListResponse>, Problem> {
    handlers::list_settings(services.settings).await
}

async fn get_setting_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<SiteSettingDto>, Problem> {
    handlers::get_setting(services.settings, path?).await
}

async fn put_setting_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
    json: Result<Json<UpdateSiteSettingRequest>, JsonRejection>,
) -> Result<Json<SiteSettingDto>, Problem> {
    handlers::put_setting(services.settings, path?, json?).await
}

async fn delete_setting_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, Problem> {
    handlers::delete_setting(services.settings, path?).await
}

async fn list_creators_handler(
    Extension(services): Extension<Services>,
    query: Result<Query<ActiveOnlyQuery>, QueryRejection>,
) -> Result<Json<CreatorsListResponse>, Problem> {
    handlers::list_creators(services.creators, query?).await
}

async fn create_creator_handler(
    Extension(services): Extension<Services>,
    json: Result<Json<CreatorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatorDto>), Problem> {
    handlers::create_creator(services.creators, json?).await
}

async fn get_creator_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CreatorDto>, Problem> {
    handlers::get_creator(services.creators, path?).await
}

async fn update_creator_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
    json: Result<Json<CreatorRequest>, JsonRejection>,
) -> Result<Json<CreatorDto>, Problem> {
    handlers::update_creator(services.creators, path?, json?).await
}

async fn delete_creator_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Problem> {
    handlers::delete_creator(services.creators, path?).await
}

async fn issue_contract_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
    json: Result<Json<ContractActionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IssuedContractDto>), Problem> {
    handlers::issue_contract(services.contracts, path?, json?).await
}

async fn contract_history_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ContractHistoryResponse>, Problem> {
    handlers::contract_history(services.contracts, path?).await
}

async fn effective_contract_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<EffectiveContractResponse>, Problem> {
    handlers::effective_contract(services.contracts, path?).await
}

async fn agree_contract_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ContractDto>, Problem> {
    handlers::agree_contract(services.contracts, path?).await
}

async fn sales_report_handler(
    Extension(services): Extension<Services>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<SalesReportResponse>, Problem> {
    handlers::sales_report(services.payments, query?).await
}

async fn preview_payment_handler(
    Extension(services): Extension<Services>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<Json<PaymentNoticeDto>, Problem> {
    handlers::preview_payment(services.payments, query?).await
}

async fn list_notices_handler(
    Extension(services): Extension<Services>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<PaymentNoticesListResponse>, Problem> {
    handlers::list_notices(services.payments, query?).await
}

async fn issue_notice_handler(
    Extension(services): Extension<Services>,
    json: Result<Json<IssueNoticeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PaymentNoticeDto>), Problem> {
    handlers::issue_notice(services.payments, json?).await
}

async fn mark_notice_paid_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PaymentNoticeDto>, Problem> {
    handlers::mark_notice_paid(services.payments, path?).await
}

async fn archive_notice_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PaymentNoticeDto>, Problem> {
    handlers::archive_notice(services.payments, path?).await
}

async fn list_entries_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ActiveOnlyQuery>, QueryRejection>,
) -> Result<Json<CatalogListResponse>, Problem> {
    handlers::list_entries(services.catalog, path?, query?).await
}

async fn create_entry_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
    json: Result<Json<CatalogEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CatalogEntryDto>), Problem> {
    handlers::create_entry(services.catalog, path?, json?).await
}

async fn update_entry_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<(String, i64)>, PathRejection>,
    json: Result<Json<CatalogEntryRequest>, JsonRejection>,
) -> Result<Json<CatalogEntryDto>, Problem> {
    handlers::update_entry(services.catalog, path?, json?).await
}

async fn delete_entry_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<StatusCode, Problem> {
    handlers::delete_entry(services.catalog, path?).await
}

async fn reorder_entries_handler(
    Extension(services): Extension<Services>,
    path: Result<Path<String>, PathRejection>,
    json: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<CatalogListResponse>, Problem> {
    handlers::reorder_entries(services.catalog, path?, json?).await
}
