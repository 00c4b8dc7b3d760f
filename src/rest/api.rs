use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::errors::{self, ApiErrorData};
use crate::service::entities::{NameSource, POLICY_ID_LEN};
use crate::service::extractor::{decode_asset_name, split_unit};
use crate::service::WalletService;

#[derive(Debug, Serialize)]
pub struct AssetNameResponse {
    pub unit: String,
    pub policy: String,
    pub asset_name_hex: String,
    pub asset: String,
    pub name_source: NameSource,
    pub fallback_reason: Option<String>,
}

impl AssetNameResponse {
    /// Decodes a unit the same way wallet NFTs are decoded, without touching
    /// the network.
    pub fn decode(unit: &str) -> Self {
        let (policy, asset_hex) = split_unit(unit);
        let decoded = decode_asset_name(asset_hex);
        let fallback_reason = decoded.fallback_reason().map(str::to_owned);
        let (asset, name_source) = decoded.into_display();

        Self {
            unit: unit.to_owned(),
            policy: policy.to_owned(),
            asset_name_hex: asset_hex.to_owned(),
            asset,
            name_source,
            fallback_reason,
        }
    }
}

pub async fn wallet_overview(
    service: web::Data<WalletService>,
) -> Result<HttpResponse, ApiErrorData> {
    let overview = service.fetch_overview().await?;
    Ok(HttpResponse::Ok().json(overview))
}

pub async fn wallet_nfts(service: web::Data<WalletService>) -> Result<HttpResponse, ApiErrorData> {
    let nfts = service.fetch_nfts().await?;
    Ok(HttpResponse::Ok().json(super::ListResult::from(nfts)))
}

pub async fn asset_name(unit: web::Path<String>) -> HttpResponse {
    let unit = unit.into_inner();
    if unit.chars().count() < POLICY_ID_LEN {
        return errors::bad_request(
            "unit is too short",
            Some(format!("expected at least {} characters", POLICY_ID_LEN)),
        );
    }

    HttpResponse::Ok().json(AssetNameResponse::decode(&unit))
}

pub async fn info() -> HttpResponse {
    HttpResponse::Ok().json(crate::get_app_info!())
}
