// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod resources;
pub mod testkit;

pub use client::{VpcV1, VpcV1Options};
pub use codec::{marshal, unmarshal_str, Encode, Family, RawObject, Variant};
pub use error::{Result, VpcError};
pub use resources::{
    InstancePrototype, InstanceTemplate, NetworkAclRule, NetworkAclRuleItem,
    NetworkAclRulePrototype, SecurityGroupRule,
};
