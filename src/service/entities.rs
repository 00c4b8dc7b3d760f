use serde::{Deserialize, Serialize};

pub const LOVELACE: &str = "lovelace";
pub const LOVELACE_PER_ADA: f64 = 1_000_000.0;

/// Length of the hex policy id prefix of an asset unit.
pub const POLICY_ID_LEN: usize = 56;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub unit: String,
    pub quantity: String,
}

impl Amount {
    pub fn new(unit: &str, quantity: &str) -> Self {
        Self {
            unit: unit.to_owned(),
            quantity: quantity.to_owned(),
        }
    }

    pub fn is_lovelace(&self) -> bool {
        self.unit == LOVELACE
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: String,
    pub stake_address: Option<String>,
    pub amount: Vec<Amount>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<bool>,
}

impl WalletInfo {
    /// Sum of all lovelace entries, in ADA.
    pub fn ada_balance(&self) -> f64 {
        let lovelace: f64 = self
            .amount
            .iter()
            .filter(|a| a.is_lovelace())
            .map(|a| parse_quantity(&a.quantity))
            .sum();
        lovelace / LOVELACE_PER_ADA
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Utxo {
    pub tx_hash: String,
    pub output_index: u32,
    pub amount: Vec<Amount>,
    pub block: String,
    #[serde(default)]
    pub data_hash: Option<String>,
    #[serde(default)]
    pub inline_datum: Option<String>,
    #[serde(default)]
    pub reference_script_hash: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub asset: String,
    pub policy_id: String,
    #[serde(default)]
    pub asset_name: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub onchain_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    Utf8,
    RawHex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
    pub asset_id: String,
    pub policy: String,
    pub asset: String,
    pub quantity: String,
    pub price: f64,
    pub image: Option<String>,
    pub name_source: NameSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletOverview {
    pub address: String,
    pub stake_address: Option<String>,
    pub ada_balance: f64,
    pub nfts: Vec<Nft>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Numeric value of a quantity string; anything unparseable counts as zero.
pub fn parse_quantity(quantity: &str) -> f64 {
    match quantity.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
