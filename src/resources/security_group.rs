// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security group rules, discriminated by `protocol` like ACL rules.

use std::sync::LazyLock;

use super::common::{SecurityGroupRuleLocal, SecurityGroupRuleRemote};
use crate::codec::macros::{family, variant};
use crate::codec::{Dispatch, Family};

variant! {
    /// A rule matching any protocol, or one without a dedicated shape.
    pub struct SecurityGroupRuleGeneric in SecurityGroupRule {
        /// `inbound` or `outbound`.
        direction: String,
        href: String,
        id: String,
        /// `ipv4`.
        ip_version: String,
        local: SecurityGroupRuleLocal,
        protocol: String,
        remote: SecurityGroupRuleRemote,
    }
}

variant! {
    /// An ICMP rule.
    pub struct SecurityGroupRuleIcmp in SecurityGroupRule {
        code: u8,
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        local: SecurityGroupRuleLocal,
        protocol: String,
        remote: SecurityGroupRuleRemote,
        icmp_type: u8 => "type",
    }
}

variant! {
    /// A TCP or UDP rule over the inclusive port range `port_min..=port_max`.
    pub struct SecurityGroupRuleTcpUdp in SecurityGroupRule {
        direction: String,
        href: String,
        id: String,
        ip_version: String,
        local: SecurityGroupRuleLocal,
        port_max: u16,
        port_min: u16,
        protocol: String,
        remote: SecurityGroupRuleRemote,
    }
}

family! {
    /// A rule of a security group.
    pub enum SecurityGroupRule with SECURITY_GROUP_RULE_DISPATCH {
        Generic(SecurityGroupRuleGeneric),
        Icmp(SecurityGroupRuleIcmp),
        TcpUdp(SecurityGroupRuleTcpUdp),
    }
    common {
        direction: String;
        id: String;
        ip_version: String;
        protocol: String;
        remote: SecurityGroupRuleRemote;
    }
}

static SECURITY_GROUP_RULE_DISPATCH: LazyLock<Dispatch<SecurityGroupRule>> =
    LazyLock::new(|| {
        Dispatch::builder(SecurityGroupRule::NAME)
            .discriminator("protocol")
            .route::<SecurityGroupRuleIcmp>("icmp")
            .route::<SecurityGroupRuleTcpUdp>("tcp")
            .route::<SecurityGroupRuleTcpUdp>("udp")
            .fallback::<SecurityGroupRuleGeneric>()
            .build()
    });
