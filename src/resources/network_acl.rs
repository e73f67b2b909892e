// SPDX-License-Identifier: MIT OR Apache-2.0

//! Network ACL rules.
//!
//! Rules are discriminated by `protocol`: `icmp` selects the ICMP shape,
//! `tcp` and `udp` select the port-range shape. Every other value, including
//! the retired `all`, decodes to the generic shape with the protocol string
//! kept verbatim.

use std::sync::LazyLock;

use super::common::{NetworkAclRuleReference, ResourceIdentity};
use crate::codec::macros::{family, variant};
use crate::codec::{Dispatch, Family};

// =============================================================================
// NetworkAclRuleItem (rules as listed in a collection)
// =============================================================================

variant! {
    /// A rule whose protocol has no dedicated shape.
    pub struct NetworkAclRuleItemGeneric in NetworkAclRuleItem {
        /// `allow` or `deny`.
        action: String,
        before: NetworkAclRuleReference,
        created_at: String,
        destination: String,
        /// `inbound` or `outbound`.
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
    }
}

variant! {
    /// An ICMP rule. Unset `code`/`icmp_type` match all codes/types.
    pub struct NetworkAclRuleItemIcmp in NetworkAclRuleItem {
        action: String,
        before: NetworkAclRuleReference,
        code: u8,
        created_at: String,
        destination: String,
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
        icmp_type: u8 => "type",
    }
}

variant! {
    /// A TCP or UDP rule with inclusive port ranges.
    pub struct NetworkAclRuleItemTcpUdp in NetworkAclRuleItem {
        action: String,
        before: NetworkAclRuleReference,
        created_at: String,
        destination: String,
        destination_port_max: u16,
        destination_port_min: u16,
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
        source_port_max: u16,
        source_port_min: u16,
    }
}

family! {
    /// A network ACL rule as returned in rule collections.
    pub enum NetworkAclRuleItem with NETWORK_ACL_RULE_ITEM_DISPATCH {
        Generic(NetworkAclRuleItemGeneric),
        Icmp(NetworkAclRuleItemIcmp),
        TcpUdp(NetworkAclRuleItemTcpUdp),
    }
    common {
        action: String;
        direction: String;
        id: String;
        name: String;
        protocol: String;
    }
}

static NETWORK_ACL_RULE_ITEM_DISPATCH: LazyLock<Dispatch<NetworkAclRuleItem>> =
    LazyLock::new(|| {
        Dispatch::builder(NetworkAclRuleItem::NAME)
            .discriminator("protocol")
            .route::<NetworkAclRuleItemIcmp>("icmp")
            .route::<NetworkAclRuleItemTcpUdp>("tcp")
            .route::<NetworkAclRuleItemTcpUdp>("udp")
            .fallback::<NetworkAclRuleItemGeneric>()
            .build()
    });

// =============================================================================
// NetworkAclRule (a single rule)
// =============================================================================

variant! {
    /// A rule whose protocol has no dedicated shape.
    pub struct NetworkAclRuleGeneric in NetworkAclRule {
        action: String,
        before: NetworkAclRuleReference,
        created_at: String,
        destination: String,
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
    }
}

variant! {
    pub struct NetworkAclRuleIcmp in NetworkAclRule {
        action: String,
        before: NetworkAclRuleReference,
        code: u8,
        created_at: String,
        destination: String,
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
        icmp_type: u8 => "type",
    }
}

variant! {
    pub struct NetworkAclRuleTcpUdp in NetworkAclRule {
        action: String,
        before: NetworkAclRuleReference,
        created_at: String,
        destination: String,
        destination_port_max: u16,
        destination_port_min: u16,
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
        source_port_max: u16,
        source_port_min: u16,
    }
}

family! {
    /// A single network ACL rule.
    pub enum NetworkAclRule with NETWORK_ACL_RULE_DISPATCH {
        Generic(NetworkAclRuleGeneric),
        Icmp(NetworkAclRuleIcmp),
        TcpUdp(NetworkAclRuleTcpUdp),
    }
    common {
        action: String;
        direction: String;
        id: String;
        name: String;
        protocol: String;
    }
}

static NETWORK_ACL_RULE_DISPATCH: LazyLock<Dispatch<NetworkAclRule>> = LazyLock::new(|| {
    Dispatch::builder(NetworkAclRule::NAME)
        .discriminator("protocol")
        .route::<NetworkAclRuleIcmp>("icmp")
        .route::<NetworkAclRuleTcpUdp>("tcp")
        .route::<NetworkAclRuleTcpUdp>("udp")
        .fallback::<NetworkAclRuleGeneric>()
        .build()
});

// =============================================================================
// NetworkAclRulePrototype (request body for rule creation)
// =============================================================================

variant! {
    /// Prototype for a rule with no protocol-specific fields (e.g. `all`).
    pub struct NetworkAclRulePrototypeGeneric in NetworkAclRulePrototype {
        action: String,
        /// Rule to insert this rule immediately before.
        before: ResourceIdentity,
        destination: String,
        direction: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
    }
}

variant! {
    pub struct NetworkAclRulePrototypeIcmp in NetworkAclRulePrototype {
        action: String,
        before: ResourceIdentity,
        code: u8,
        destination: String,
        direction: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
        icmp_type: u8 => "type",
    }
}

variant! {
    pub struct NetworkAclRulePrototypeTcpUdp in NetworkAclRulePrototype {
        action: String,
        before: ResourceIdentity,
        destination: String,
        destination_port_max: u16,
        destination_port_min: u16,
        direction: String,
        ip_version: String,
        name: String,
        protocol: String,
        source: String,
        source_port_max: u16,
        source_port_min: u16,
    }
}

family! {
    /// Body of a create-rule request.
    pub enum NetworkAclRulePrototype with NETWORK_ACL_RULE_PROTOTYPE_DISPATCH {
        Generic(NetworkAclRulePrototypeGeneric),
        Icmp(NetworkAclRulePrototypeIcmp),
        TcpUdp(NetworkAclRulePrototypeTcpUdp),
    }
    common {
        action: String;
        direction: String;
        name: String;
        protocol: String;
    }
}

static NETWORK_ACL_RULE_PROTOTYPE_DISPATCH: LazyLock<Dispatch<NetworkAclRulePrototype>> =
    LazyLock::new(|| {
        Dispatch::builder(NetworkAclRulePrototype::NAME)
            .discriminator("protocol")
            .route::<NetworkAclRulePrototypeIcmp>("icmp")
            .route::<NetworkAclRulePrototypeTcpUdp>("tcp")
            .route::<NetworkAclRulePrototypeTcpUdp>("udp")
            .fallback::<NetworkAclRulePrototypeGeneric>()
            .build()
    });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{self, Encode, Variant};
    use crate::error::VpcError;

    #[test]
    fn test_icmp_type_uses_wire_name() {
        let rule = NetworkAclRuleItemIcmp {
            protocol: Some("icmp".to_string()),
            code: Some(0),
            icmp_type: Some(8),
            ..Default::default()
        };
        let json = codec::marshal(&rule).unwrap();
        assert_eq!(json, r#"{"code":0,"protocol":"icmp","type":8}"#);
    }

    #[test]
    fn test_udp_routes_to_tcp_udp() {
        let rule: NetworkAclRule = codec::unmarshal_str(
            r#"{"protocol": "udp", "destination_port_min": 53, "destination_port_max": 53}"#,
        )
        .unwrap();
        match rule {
            NetworkAclRule::TcpUdp(r) => {
                assert_eq!(r.protocol.as_deref(), Some("udp"));
                assert_eq!(r.destination_port_min, Some(53));
                assert_eq!(r.destination_port_max, Some(53));
                assert_eq!(r.source_port_min, None);
            }
            other => panic!("Expected TcpUdp, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_protocol_is_generic() {
        let rule: NetworkAclRuleItem =
            codec::unmarshal_str(r#"{"action": "deny", "id": "r1"}"#).unwrap();
        assert!(matches!(rule, NetworkAclRuleItem::Generic(_)));
        assert_eq!(rule.protocol(), None);
        assert_eq!(rule.action().map(String::as_str), Some("deny"));
    }

    #[test]
    fn test_out_of_range_port_names_field_and_variant() {
        let err = codec::unmarshal_str::<NetworkAclRuleItem>(
            r#"{"protocol": "tcp", "destination_port_max": 70000}"#,
        )
        .unwrap_err();
        match err {
            VpcError::FieldType {
                family,
                variant,
                field,
                ..
            } => {
                assert_eq!(family, "NetworkAclRuleItem");
                assert_eq!(variant, NetworkAclRuleItemTcpUdp::NAME);
                assert_eq!(field, "destination_port_max");
            }
            other => panic!("Expected FieldType, got {other:?}"),
        }
    }

    #[test]
    fn test_prototype_all_marshals_flat() {
        let prototype = NetworkAclRulePrototype::from(NetworkAclRulePrototypeGeneric {
            action: Some("allow".to_string()),
            destination: Some("192.168.3.2/32".to_string()),
            direction: Some("inbound".to_string()),
            source: Some("192.168.3.2/32".to_string()),
            protocol: Some("all".to_string()),
            name: Some("my-rule".to_string()),
            ..Default::default()
        });
        let raw = prototype.encode().unwrap();
        assert_eq!(raw.len(), 6);
        assert_eq!(raw.get_str("protocol"), Some("all"));
        assert_eq!(prototype.variant_name(), "NetworkAclRulePrototypeGeneric");
    }

    #[test]
    fn test_prototype_before_identity() {
        let prototype: NetworkAclRulePrototype = codec::unmarshal_str(
            r#"{"protocol": "icmp", "before": {"id": "rule-0"}, "type": 8}"#,
        )
        .unwrap();
        match prototype {
            NetworkAclRulePrototype::Icmp(p) => {
                assert_eq!(p.before, Some(ResourceIdentity::by_id("rule-0")));
                assert_eq!(p.icmp_type, Some(8));
                assert_eq!(p.code, None);
            }
            other => panic!("Expected Icmp, got {other:?}"),
        }
    }

    #[test]
    fn test_tcp_udp_without_protocol_refuses_to_encode() {
        let rule = NetworkAclRuleItemTcpUdp {
            destination_port_min: Some(80),
            destination_port_max: Some(80),
            name: Some("web".to_string()),
            ..Default::default()
        };
        match codec::marshal(&rule).unwrap_err() {
            VpcError::Encode { field, reason } => {
                assert_eq!(field, "protocol");
                assert!(reason.contains("NetworkAclRuleItemGeneric"), "{reason}");
            }
            other => panic!("Expected Encode, got {other:?}"),
        }

        let family = NetworkAclRuleItem::from(rule);
        assert!(matches!(
            codec::marshal(&family),
            Err(VpcError::Encode { ref field, .. }) if field == "protocol"
        ));
    }

    #[test]
    fn test_icmp_with_tcp_protocol_refuses_to_encode() {
        let rule = NetworkAclRuleIcmp {
            protocol: Some("tcp".to_string()),
            icmp_type: Some(8),
            ..Default::default()
        };
        let err = codec::marshal(&rule).unwrap_err();
        assert!(matches!(err, VpcError::Encode { ref field, .. } if field == "protocol"));
    }

    #[test]
    fn test_generic_with_routed_protocol_refuses_to_encode() {
        let prototype = NetworkAclRulePrototypeGeneric {
            protocol: Some("udp".to_string()),
            action: Some("allow".to_string()),
            ..Default::default()
        };
        let err = serde_json::to_string(&prototype).unwrap_err();
        assert!(err.to_string().contains("protocol"), "{err}");
    }
}
