use futures::future::join_all;

use super::entities::{Nft, WalletOverview};
use super::extractor::{extract_nfts, image_from_metadata};
use crate::blockfrost::{BlockfrostClient, BlockfrostError, Session};
use crate::config::BlockfrostConfig;

/// Builds wallet views for the configured address. Every call is
/// independent: nothing is cached between requests.
#[derive(Clone)]
pub struct WalletService {
    client: BlockfrostClient,
    address: String,
}

impl WalletService {
    pub fn new(cfg: &BlockfrostConfig) -> Self {
        Self {
            client: BlockfrostClient::new(cfg),
            address: cfg.wallet_address.clone(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Wallet info and UTXOs are fetched concurrently and both must succeed.
    /// Image lookups that fail only leave the affected NFT without an image.
    pub async fn fetch_overview(&self) -> Result<WalletOverview, BlockfrostError> {
        let session = self.client.session();
        let (info, utxos) = futures::try_join!(
            session.get_address(&self.address),
            session.get_utxos(&self.address),
        )
        .map_err(|err| {
            error!("failed to fetch wallet: address={} error={}", self.address, err);
            err
        })?;

        let mut nfts = extract_nfts(&utxos);
        attach_images(&session, &mut nfts).await;

        info!(
            "wallet overview built: address={} utxos={} nfts={}",
            self.address,
            utxos.len(),
            nfts.len()
        );

        Ok(WalletOverview {
            ada_balance: info.ada_balance(),
            address: info.address,
            stake_address: info.stake_address,
            nfts,
            generated_at: chrono::Utc::now(),
        })
    }

    pub async fn fetch_nfts(&self) -> Result<Vec<Nft>, BlockfrostError> {
        let session = self.client.session();
        let utxos = session.get_utxos(&self.address).await.map_err(|err| {
            error!("failed to fetch utxos: address={} error={}", self.address, err);
            err
        })?;

        let mut nfts = extract_nfts(&utxos);
        attach_images(&session, &mut nfts).await;
        Ok(nfts)
    }
}

async fn attach_images(session: &Session<'_>, nfts: &mut [Nft]) {
    let images = join_all(nfts.iter().map(|nft| lookup_image(session, &nft.asset_id))).await;

    for (nft, image) in nfts.iter_mut().zip(images) {
        nft.image = image;
    }
}

async fn lookup_image(session: &Session<'_>, unit: &str) -> Option<String> {
    match session.get_asset(unit).await {
        Ok(asset) => asset
            .onchain_metadata
            .as_ref()
            .and_then(image_from_metadata),
        Err(err) => {
            warn!("asset metadata unavailable: unit={} error={}", unit, err);
            None
        }
    }
}
