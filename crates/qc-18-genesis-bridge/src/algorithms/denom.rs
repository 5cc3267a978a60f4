//! # Bridged Denom Derivation
//!
//! A rollapp token arriving on the hub is known by its trace hash:
//! `ibc/` followed by the uppercase hex SHA-256 of `{port}/{channel}/{base}`.

use sha2::{Digest, Sha256};

use crate::domain::{DenomMetadata, DenomUnit};

/// Prefix of every bridged denom.
pub const BRIDGED_DENOM_PREFIX: &str = "ibc/";

/// Hub denom of `base` received on `port`/`channel`.
pub fn bridged_denom(port: &str, channel: &str, base: &str) -> String {
    let trace = format!("{port}/{channel}/{base}");
    let digest = Sha256::digest(trace.as_bytes());
    format!("{BRIDGED_DENOM_PREFIX}{}", hex::encode_upper(digest))
}

/// Metadata registered on the hub for a rollapp's native denom.
///
/// The base becomes the bridged denom; the first unit is renamed to it and
/// keeps the rollapp base as an alias. Name and symbol are kept; display is
/// kept unless it names the base unit, in which case it follows the rename.
pub fn hub_denom_metadata(rollapp: &DenomMetadata, bridged: &str) -> DenomMetadata {
    let denom_units = rollapp
        .denom_units
        .iter()
        .map(|unit| {
            if unit.denom == rollapp.base {
                let mut aliases = unit.aliases.clone();
                if !aliases.contains(&rollapp.base) {
                    aliases.insert(0, rollapp.base.clone());
                }
                DenomUnit {
                    denom: bridged.to_string(),
                    exponent: unit.exponent,
                    aliases,
                }
            } else {
                unit.clone()
            }
        })
        .collect();

    let display = if rollapp.display == rollapp.base {
        bridged.to_string()
    } else {
        rollapp.display.clone()
    };

    DenomMetadata {
        base: bridged.to_string(),
        display,
        name: rollapp.name.clone(),
        symbol: rollapp.symbol.clone(),
        denom_units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> DenomMetadata {
        DenomMetadata {
            base: "arax".into(),
            display: "RAX".into(),
            name: "arax".into(),
            symbol: "RAX".into(),
            denom_units: vec![DenomUnit::new("arax", 0), DenomUnit::new("RAX", 18)],
        }
    }

    #[test]
    fn test_bridged_denom_shape() {
        let denom = bridged_denom("transfer", "channel-0", "arax");
        assert!(denom.starts_with("ibc/"));
        assert_eq!(denom.len(), 4 + 64);
        assert_eq!(denom, denom.to_uppercase().replacen("IBC/", "ibc/", 1));
    }

    #[test]
    fn test_bridged_denom_matches_trace_hash() {
        let expected = hex::encode_upper(Sha256::digest(b"transfer/channel-0/arax"));
        assert_eq!(
            bridged_denom("transfer", "channel-0", "arax"),
            format!("ibc/{expected}")
        );
    }

    #[test]
    fn test_bridged_denom_depends_on_channel() {
        assert_ne!(
            bridged_denom("transfer", "channel-0", "arax"),
            bridged_denom("transfer", "channel-1", "arax")
        );
    }

    #[test]
    fn test_hub_metadata() {
        let bridged = bridged_denom("transfer", "channel-0", "arax");
        let hub = hub_denom_metadata(&metadata(), &bridged);

        assert_eq!(hub.base, bridged);
        assert_eq!(hub.display, "RAX");
        assert_eq!(hub.denom_units[0].denom, bridged);
        assert_eq!(hub.denom_units[0].aliases, vec!["arax".to_string()]);
        assert_eq!(hub.unit("RAX").map(|u| u.exponent), Some(18));
    }

    #[test]
    fn test_hub_metadata_display_on_base_unit() {
        let rollapp = DenomMetadata {
            base: "arax".into(),
            display: "arax".into(),
            name: "arax".into(),
            symbol: "RAX".into(),
            denom_units: vec![DenomUnit::new("arax", 0)],
        };
        let bridged = bridged_denom("transfer", "channel-0", "arax");
        let hub = hub_denom_metadata(&rollapp, &bridged);

        assert_eq!(hub.display, bridged);
        assert!(hub.unit(&hub.display).is_some());
    }
}
