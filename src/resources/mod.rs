// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strongly typed models for the polymorphic VPC API types.
//!
//! Each family is a closed enum over its concrete variants. Decode with
//! [`crate::codec::unmarshal_str`] (or plain serde) and encode with
//! [`crate::codec::marshal`]; both directions go through the family's
//! dispatch table and the concrete variant's own field set.

pub mod common;
mod instance_prototype;
mod instance_template;
mod network_acl;
mod security_group;

pub use common::{
    BootVolumeAttachmentBySourceSnapshot, BootVolumeAttachmentByVolume,
    BootVolumeAttachmentPrototype, BootVolumeBySourceSnapshot, BootVolumePrototype,
    CatalogOfferingPrototype, ClusterNetworkAttachmentPrototype, DataVolumePrototype, Deleted,
    ImageIdentity, InstanceAvailabilityPolicy, InstanceDefaultTrustedProfile,
    InstanceMetadataService, InstanceProfileIdentity, InstanceTemplateIdentity, KeyIdentity,
    NetworkAclRuleReference, NetworkAttachmentPrototype, NetworkInterfacePrototype,
    ReservationAffinity, ReservedIpPrototype, ResourceGroupIdentity, ResourceIdentity,
    SecurityGroupIdentity, SecurityGroupRuleLocal, SecurityGroupRuleRemote, SnapshotIdentity,
    SubnetIdentity, VirtualNetworkInterfacePrototype, VolumeAttachmentPrototype, VolumeIdentity,
    VpcIdentity, ZoneIdentity,
};
pub use instance_prototype::{
    InstancePrototype, InstancePrototypeBuilder, InstancePrototypeByCatalogOffering,
    InstancePrototypeByImage, InstancePrototypeBySourceSnapshot,
    InstancePrototypeBySourceTemplate, InstancePrototypeByVolume, InstancePrototypeGeneric,
};
pub use instance_template::{
    InstanceTemplate, InstanceTemplateBySourceSnapshot, InstanceTemplateGeneric,
};
pub use network_acl::{
    NetworkAclRule, NetworkAclRuleGeneric, NetworkAclRuleIcmp, NetworkAclRuleItem,
    NetworkAclRuleItemGeneric, NetworkAclRuleItemIcmp, NetworkAclRuleItemTcpUdp,
    NetworkAclRulePrototype, NetworkAclRulePrototypeGeneric, NetworkAclRulePrototypeIcmp,
    NetworkAclRulePrototypeTcpUdp, NetworkAclRuleTcpUdp,
};
pub use security_group::{
    SecurityGroupRule, SecurityGroupRuleGeneric, SecurityGroupRuleIcmp, SecurityGroupRuleTcpUdp,
};
