pub mod entities;
pub mod extractor;
pub mod wallet;

pub use entities::{Nft, WalletOverview};
pub use extractor::{extract_nfts, resolve_ipfs_url, transform_asset_name};
pub use wallet::WalletService;
