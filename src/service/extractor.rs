//! Turns raw address UTXOs into NFT records.
//!
//! Everything here is pure: no I/O, no errors surfaced to the caller. A name
//! that can't be decoded degrades to its raw hex and is flagged on the record
//! via [`NameSource::RawHex`].

use serde_json::Value;

use super::entities::{
    parse_quantity, Amount, NameSource, Nft, Utxo, LOVELACE_PER_ADA, POLICY_ID_LEN,
};

pub const IPFS_SCHEME: &str = "ipfs://";
pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Result of decoding the hex asset-name suffix of a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedName {
    Utf8(String),
    RawHex { hex: String, reason: String },
}

impl DecodedName {
    /// Why the raw hex was kept, `None` when the name decoded.
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            DecodedName::Utf8(_) => None,
            DecodedName::RawHex { reason, .. } => Some(reason),
        }
    }

    /// Display name and where it came from. Decoded names go through
    /// [`transform_asset_name`], raw hex is shown as is.
    pub fn into_display(self) -> (String, NameSource) {
        match self {
            DecodedName::Utf8(text) => (transform_asset_name(&text), NameSource::Utf8),
            DecodedName::RawHex { hex, .. } => (hex, NameSource::RawHex),
        }
    }
}

/// Splits a unit into `(policy, asset_name_hex)`. Units no longer than a
/// policy id have an empty name.
pub fn split_unit(unit: &str) -> (&str, &str) {
    match unit.char_indices().nth(POLICY_ID_LEN) {
        Some((idx, _)) => unit.split_at(idx),
        None => (unit, ""),
    }
}

pub fn decode_asset_name(asset_hex: &str) -> DecodedName {
    let fallback = |reason: String| DecodedName::RawHex {
        hex: asset_hex.to_owned(),
        reason,
    };

    let bytes = match hex::decode(asset_hex) {
        Ok(bytes) => bytes,
        Err(err) => return fallback(format!("invalid hex: {}", err)),
    };

    match String::from_utf8(bytes) {
        Ok(text) if text.is_empty() => fallback("empty asset name".to_owned()),
        Ok(text) => DecodedName::Utf8(text),
        Err(err) => fallback(format!("not utf-8: {}", err)),
    }
}

/// Formats `"Label0042"` as `"Label #42"`. Names without a trailing run of
/// ASCII digits are returned unchanged. An all-digit name has no label and
/// no separator space: `"0007"` becomes `"#7"`.
pub fn transform_asset_name(name: &str) -> String {
    let label_len = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if label_len == name.len() {
        return name.to_owned();
    }

    let (label, digits) = name.split_at(label_len);
    // labels are single-line
    if label.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return name.to_owned();
    }

    let index = match digits.trim_start_matches('0') {
        "" => "0",
        idx => idx,
    };

    match label.trim_end() {
        "" => format!("#{}", index),
        label => format!("{} #{}", label, index),
    }
}

/// Rewrites `ipfs://` links to the public HTTPS gateway. Non-string values
/// resolve to an empty string.
pub fn resolve_ipfs_url(url: &Value) -> String {
    match url {
        Value::String(s) => resolve_ipfs_str(s),
        _ => String::new(),
    }
}

pub fn resolve_ipfs_str(url: &str) -> String {
    match url.strip_prefix(IPFS_SCHEME) {
        Some(cid_path) => format!("{}{}", IPFS_GATEWAY, cid_path),
        None => url.to_owned(),
    }
}

/// Image url from an asset's `onchain_metadata`. `image` is either a string
/// or an array of string chunks joined in order.
pub fn image_from_metadata(onchain_metadata: &Value) -> Option<String> {
    let image = onchain_metadata.get("image")?;

    let url = match image {
        Value::Array(chunks) => {
            resolve_ipfs_str(&chunks.iter().filter_map(Value::as_str).collect::<String>())
        }
        other => resolve_ipfs_url(other),
    };

    Some(url).filter(|u| !u.is_empty())
}

fn is_nft_holding(item: &Amount) -> bool {
    !item.is_lovelace() && item.quantity == "1"
}

/// ADA held by the first lovelace entry of the output, 0 without one.
pub fn utxo_price(utxo: &Utxo) -> f64 {
    utxo.amount
        .iter()
        .find(|a| a.is_lovelace())
        .map(|a| parse_quantity(&a.quantity) / LOVELACE_PER_ADA)
        .unwrap_or(0.0)
}

/// One record per `(utxo, unit)` holding of exactly `"1"`, in input order.
/// The same unit held in two outputs produces two records.
pub fn extract_nfts(utxos: &[Utxo]) -> Vec<Nft> {
    let mut nfts = Vec::new();

    for utxo in utxos {
        let price = utxo_price(utxo);

        for item in utxo.amount.iter().filter(|a| is_nft_holding(a)) {
            let (policy, asset_hex) = split_unit(&item.unit);
            let decoded = decode_asset_name(asset_hex);
            if let Some(reason) = decoded.fallback_reason() {
                if !asset_hex.is_empty() {
                    warn!(
                        "asset name kept as hex: unit={} tx_hash={} reason={}",
                        item.unit, utxo.tx_hash, reason
                    );
                }
            }
            let (asset, name_source) = decoded.into_display();

            nfts.push(Nft {
                asset_id: item.unit.clone(),
                policy: policy.to_owned(),
                asset,
                quantity: item.quantity.clone(),
                price,
                image: None,
                name_source,
            });
        }
    }

    debug!("extracted {} nfts from {} utxos", nfts.len(), utxos.len());
    nfts
}
