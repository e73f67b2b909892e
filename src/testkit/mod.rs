// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-complete sample values for every variant of every family.
//!
//! Each sample sets every field its variant declares, with values chosen so
//! that the sample decodes back to the same variant. Tests use them for
//! round-trip and encode-equivalence checks.

use crate::resources::*;

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn acl_reference() -> NetworkAclRuleReference {
    NetworkAclRuleReference {
        deleted: Some(Deleted {
            more_info: s("https://cloud.ibm.com/apidocs/vpc#deleted-resources"),
        }),
        href: s("https://us-south.iaas.cloud.ibm.com/v1/network_acls/acl-1/rules/rule-0"),
        id: s("rule-0"),
        name: s("first-rule"),
    }
}

fn full_identity(kind: &str) -> ResourceIdentity {
    ResourceIdentity {
        id: Some(format!("r006-{kind}")),
        crn: Some(format!("crn:v1:bluemix:public:is:us-south:a/123::{kind}:r006-{kind}")),
        href: Some(format!("https://us-south.iaas.cloud.ibm.com/v1/{kind}s/r006-{kind}")),
        name: Some(format!("my-{kind}")),
    }
}

macro_rules! acl_rule {
    ($ty:ident, $protocol:literal, { $($extra:ident: $value:expr),* $(,)? }) => {
        $ty {
            action: s("allow"),
            before: Some(acl_reference()),
            created_at: s("2024-01-15T10:30:00Z"),
            destination: s("192.168.3.0/24"),
            direction: s("inbound"),
            href: s("https://us-south.iaas.cloud.ibm.com/v1/network_acls/acl-1/rules/rule-1"),
            id: s("rule-1"),
            ip_version: s("ipv4"),
            name: s("my-rule"),
            protocol: s($protocol),
            source: s("10.0.0.0/8"),
            $($extra: $value,)*
        }
    };
}

macro_rules! acl_prototype {
    ($ty:ident, $protocol:literal, { $($extra:ident: $value:expr),* $(,)? }) => {
        $ty {
            action: s("deny"),
            before: Some(ResourceIdentity::by_id("rule-0")),
            destination: s("0.0.0.0/0"),
            direction: s("outbound"),
            ip_version: s("ipv4"),
            name: s("my-rule-prototype"),
            protocol: s($protocol),
            source: s("10.240.0.0/24"),
            $($extra: $value,)*
        }
    };
}

/// One sample per [`NetworkAclRuleItem`] variant.
pub fn network_acl_rule_items() -> Vec<NetworkAclRuleItem> {
    vec![
        acl_rule!(NetworkAclRuleItemGeneric, "all", {}).into(),
        acl_rule!(NetworkAclRuleItemIcmp, "icmp", { code: Some(0), icmp_type: Some(8) }).into(),
        acl_rule!(NetworkAclRuleItemTcpUdp, "tcp", {
            destination_port_max: Some(443),
            destination_port_min: Some(443),
            source_port_max: Some(65535),
            source_port_min: Some(1024),
        })
        .into(),
    ]
}

/// One sample per [`NetworkAclRule`] variant.
pub fn network_acl_rules() -> Vec<NetworkAclRule> {
    vec![
        acl_rule!(NetworkAclRuleGeneric, "all", {}).into(),
        acl_rule!(NetworkAclRuleIcmp, "icmp", { code: Some(3), icmp_type: Some(3) }).into(),
        acl_rule!(NetworkAclRuleTcpUdp, "udp", {
            destination_port_max: Some(53),
            destination_port_min: Some(53),
            source_port_max: Some(65535),
            source_port_min: Some(1),
        })
        .into(),
    ]
}

/// One sample per [`NetworkAclRulePrototype`] variant.
pub fn network_acl_rule_prototypes() -> Vec<NetworkAclRulePrototype> {
    vec![
        acl_prototype!(NetworkAclRulePrototypeGeneric, "all", {}).into(),
        acl_prototype!(NetworkAclRulePrototypeIcmp, "icmp", {
            code: Some(0),
            icmp_type: Some(0),
        })
        .into(),
        acl_prototype!(NetworkAclRulePrototypeTcpUdp, "tcp", {
            destination_port_max: Some(22),
            destination_port_min: Some(22),
            source_port_max: Some(65535),
            source_port_min: Some(1),
        })
        .into(),
    ]
}

macro_rules! sg_rule {
    ($ty:ident, $protocol:literal, { $($extra:ident: $value:expr),* $(,)? }) => {
        $ty {
            direction: s("inbound"),
            href: s("https://us-south.iaas.cloud.ibm.com/v1/security_groups/sg-1/rules/r-1"),
            id: s("r-1"),
            ip_version: s("ipv4"),
            local: Some(SecurityGroupRuleLocal {
                address: None,
                cidr_block: s("10.240.0.0/24"),
            }),
            protocol: s($protocol),
            remote: Some(SecurityGroupRuleRemote {
                address: None,
                cidr_block: None,
                crn: s("crn:v1:bluemix:public:is:us-south:a/123::security-group:sg-2"),
                deleted: None,
                href: s("https://us-south.iaas.cloud.ibm.com/v1/security_groups/sg-2"),
                id: s("sg-2"),
                name: s("peer-group"),
            }),
            $($extra: $value,)*
        }
    };
}

/// One sample per [`SecurityGroupRule`] variant.
pub fn security_group_rules() -> Vec<SecurityGroupRule> {
    vec![
        sg_rule!(SecurityGroupRuleGeneric, "any", {}).into(),
        sg_rule!(SecurityGroupRuleIcmp, "icmp", { code: Some(0), icmp_type: Some(8) }).into(),
        sg_rule!(SecurityGroupRuleTcpUdp, "tcp", {
            port_max: Some(22),
            port_min: Some(22),
        })
        .into(),
    ]
}

fn boot_volume_attachment() -> BootVolumeAttachmentPrototype {
    BootVolumeAttachmentPrototype {
        delete_volume_on_instance_delete: Some(true),
        name: s("boot-attachment"),
        volume: Some(BootVolumePrototype {
            bandwidth: Some(1000),
            capacity: Some(100),
            encryption_key: Some(ResourceIdentity::by_crn("crn:v1:key")),
            iops: Some(3000),
            name: s("boot-volume"),
            profile: Some(ResourceIdentity::by_name("general-purpose")),
            resource_group: Some(ResourceIdentity::by_id("rg-1")),
            user_tags: Some(vec!["env:test".to_string()]),
        }),
    }
}

fn snapshot_boot_volume_attachment() -> BootVolumeAttachmentBySourceSnapshot {
    BootVolumeAttachmentBySourceSnapshot {
        delete_volume_on_instance_delete: Some(false),
        name: s("boot-attachment"),
        volume: Some(BootVolumeBySourceSnapshot {
            bandwidth: Some(1000),
            capacity: Some(250),
            encryption_key: None,
            iops: Some(3000),
            name: s("restored-boot"),
            profile: Some(ResourceIdentity::by_name("general-purpose")),
            resource_group: Some(ResourceIdentity::by_id("rg-1")),
            source_snapshot: Some(full_identity("snapshot")),
            user_tags: Some(vec!["restored".to_string()]),
        }),
    }
}

fn catalog_offering() -> CatalogOfferingPrototype {
    CatalogOfferingPrototype {
        offering: None,
        version: Some(ResourceIdentity::by_crn("crn:v1:catalog:offering:version")),
        plan: Some(ResourceIdentity::by_crn("crn:v1:catalog:plan")),
    }
}

macro_rules! instance {
    ($ty:ident { $($extra:ident: $value:expr),* $(,)? }) => {
        $ty {
            availability_policy: Some(InstanceAvailabilityPolicy {
                host_failure: s("restart"),
            }),
            cluster_network_attachments: Some(vec![ClusterNetworkAttachmentPrototype {
                cluster_network_interface: Some(ResourceIdentity::by_id("cni-1")),
                name: s("cluster-attachment"),
            }]),
            confidential_compute_mode: s("disabled"),
            default_trusted_profile: Some(InstanceDefaultTrustedProfile {
                auto_link: Some(false),
                target: Some(ResourceIdentity::by_id("tp-1")),
            }),
            enable_secure_boot: Some(true),
            keys: Some(vec![ResourceIdentity::by_id("key-1")]),
            metadata_service: Some(InstanceMetadataService {
                enabled: Some(true),
                protocol: s("https"),
                response_hop_limit: Some(2),
            }),
            name: s("test-instance"),
            network_attachments: Some(vec![NetworkAttachmentPrototype {
                name: s("secondary"),
                virtual_network_interface: None,
            }]),
            network_interfaces: Some(vec![NetworkInterfacePrototype {
                allow_ip_spoofing: Some(false),
                name: s("eth1"),
                primary_ip: None,
                security_groups: None,
                subnet: Some(ResourceIdentity::by_id("subnet-2")),
            }]),
            placement_target: Some(ResourceIdentity::by_id("placement-1")),
            primary_network_attachment: Some(NetworkAttachmentPrototype {
                name: s("primary"),
                virtual_network_interface: Some(VirtualNetworkInterfacePrototype {
                    allow_ip_spoofing: Some(false),
                    auto_delete: Some(true),
                    enable_infrastructure_nat: Some(true),
                    name: s("vni-1"),
                    primary_ip: Some(ReservedIpPrototype {
                        address: s("10.240.0.4"),
                        auto_delete: Some(true),
                        href: None,
                        id: None,
                        name: s("primary-ip"),
                    }),
                    protocol_state_filtering_mode: s("auto"),
                    resource_group: Some(ResourceIdentity::by_id("rg-1")),
                    security_groups: Some(vec![ResourceIdentity::by_id("sg-1")]),
                    subnet: Some(ResourceIdentity::by_id("test-subnet-id")),
                }),
            }),
            primary_network_interface: Some(NetworkInterfacePrototype {
                allow_ip_spoofing: Some(false),
                name: s("eth0"),
                primary_ip: None,
                security_groups: Some(vec![ResourceIdentity::by_id("sg-1")]),
                subnet: Some(ResourceIdentity::by_id("test-subnet-id")),
            }),
            profile: Some(ResourceIdentity::by_name("bx2-2x8")),
            reservation_affinity: Some(ReservationAffinity {
                policy: s("manual"),
                pool: Some(vec![ResourceIdentity::by_id("reservation-1")]),
            }),
            resource_group: Some(ResourceIdentity::by_id("rg-1")),
            total_volume_bandwidth: Some(500),
            user_data: s("#cloud-config\n"),
            volume_attachments: Some(vec![VolumeAttachmentPrototype {
                delete_volume_on_instance_delete: Some(true),
                name: s("data-attachment"),
                volume: Some(DataVolumePrototype {
                    id: None,
                    crn: None,
                    href: None,
                    capacity: Some(10),
                    iops: None,
                    name: s("data-volume"),
                    profile: Some(ResourceIdentity::by_name("5iops-tier")),
                    source_snapshot: None,
                    user_tags: None,
                }),
            }]),
            volume_bandwidth_qos_mode: s("pooled"),
            vpc: Some(ResourceIdentity::by_id("r010-test-vpc-id")),
            zone: Some(ResourceIdentity::by_name("eu-de-2")),
            $($extra: $value,)*
        }
    };
}

/// One sample per [`InstancePrototype`] variant.
pub fn instance_prototypes() -> Vec<InstancePrototype> {
    vec![
        instance!(InstancePrototypeGeneric {}).into(),
        instance!(InstancePrototypeByImage {
            boot_volume_attachment: Some(boot_volume_attachment()),
            image: Some(ResourceIdentity::by_id("r010-test-image-id")),
        })
        .into(),
        instance!(InstancePrototypeByCatalogOffering {
            boot_volume_attachment: Some(boot_volume_attachment()),
            catalog_offering: Some(catalog_offering()),
        })
        .into(),
        instance!(InstancePrototypeBySourceSnapshot {
            boot_volume_attachment: Some(snapshot_boot_volume_attachment()),
        })
        .into(),
        instance!(InstancePrototypeBySourceTemplate {
            boot_volume_attachment: Some(boot_volume_attachment()),
            catalog_offering: Some(catalog_offering()),
            image: Some(ResourceIdentity::by_id("r010-override-image")),
            source_template: Some(full_identity("instance-template")),
        })
        .into(),
        instance!(InstancePrototypeByVolume {
            boot_volume_attachment: Some(BootVolumeAttachmentByVolume {
                delete_volume_on_instance_delete: Some(false),
                name: s("boot-attachment"),
                volume: Some(full_identity("volume")),
            }),
        })
        .into(),
    ]
}

/// One sample per [`InstanceTemplate`] variant.
pub fn instance_templates() -> Vec<InstanceTemplate> {
    vec![
        instance!(InstanceTemplateGeneric {
            boot_volume_attachment: Some(boot_volume_attachment()),
            catalog_offering: Some(catalog_offering()),
            created_at: s("2024-01-01T10:00:00Z"),
            crn: s("crn:v1:bluemix:public:is:us-south-1:a/123::instance-template:tmpl-1"),
            href: s("https://us-south.iaas.cloud.ibm.com/v1/instance/templates/tmpl-1"),
            id: s("tmpl-1"),
            image: Some(ResourceIdentity::by_id("r010-test-image-id")),
        })
        .into(),
        instance!(InstanceTemplateBySourceSnapshot {
            boot_volume_attachment: Some(snapshot_boot_volume_attachment()),
            created_at: s("2024-01-01T10:00:00Z"),
            crn: s("crn:v1:bluemix:public:is:us-south-1:a/123::instance-template:tmpl-2"),
            href: s("https://us-south.iaas.cloud.ibm.com/v1/instance/templates/tmpl-2"),
            id: s("tmpl-2"),
        })
        .into(),
    ]
}
