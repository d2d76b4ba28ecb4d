//! Topology configuration.

use std::num::NonZeroU32;

use serde::Deserialize;

/// Tunables for a [`NetworkTopology`](crate::NetworkTopology).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Cost of a single tree edge in `distance`.
    ///
    /// With the default of 1, two leaves on the same rack are 2 apart and
    /// leaves on sibling racks are 4 apart. Zero is unrepresentable so
    /// distinct nodes never collapse to distance 0.
    pub hop_weight: NonZeroU32,
    /// Location given to nodes that are declared without one.
    pub default_rack: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            hop_weight: NonZeroU32::MIN,
            default_rack: "/default-rack".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TopologyConfig = serde_json::from_str(r#"{"hop_weight": 3}"#).unwrap();
        assert_eq!(config.hop_weight.get(), 3);
        assert_eq!(config.default_rack, "/default-rack");
    }

    #[test]
    fn test_zero_hop_weight_rejected() {
        let result = serde_json::from_str::<TopologyConfig>(r#"{"hop_weight": 0}"#);
        assert!(result.is_err());
    }
}
