// SPDX-License-Identifier: MIT OR Apache-2.0

//! Polymorphic JSON codec.
//!
//! Many API types come in several mutually exclusive shapes: a network ACL
//! rule is either ICMP, TCP/UDP, or generic; an instance prototype is built
//! from an image, a volume, a snapshot, a catalog offering or a template.
//! This module decodes such payloads into the right concrete variant and
//! encodes a variant back with its full field set.
//!
//! - [`Variant`] is one concrete shape with its own decoder and encoder.
//! - [`Family`] is the closed set of variants of one API type. Its
//!   [`Encode`] impl forwards to the concrete variant, so encoding through
//!   the family (or through `&dyn Encode`) never loses variant fields.
//! - [`Dispatch`] is the immutable table that picks the variant to decode.
//!
//! # Example
//!
//! ```
//! use vpc_api_rs::codec;
//! use vpc_api_rs::resources::NetworkAclRuleItem;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rule: NetworkAclRuleItem = codec::unmarshal_str(
//!     r#"{"protocol": "tcp", "destination_port_min": 443, "destination_port_max": 443}"#,
//! )?;
//! assert!(matches!(rule, NetworkAclRuleItem::TcpUdp(_)));
//!
//! let json = codec::marshal(&rule)?;
//! assert!(json.contains("\"destination_port_min\":443"));
//! # Ok(())
//! # }
//! ```

mod dispatch;
pub(crate) mod macros;
mod probe;
mod raw;

pub use dispatch::{Decoder, Dispatch, DispatchBuilder, Selection};
pub use probe::KeyPath;
pub use raw::RawObject;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, VpcError};

/// Anything that can produce its complete JSON object form.
pub trait Encode {
    /// Encode every populated field as one flat object.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::Encode`] naming the offending field.
    #[allow(clippy::result_large_err)]
    fn encode(&self) -> Result<RawObject>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Result<RawObject> {
        (**self).encode()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self) -> Result<RawObject> {
        (**self).encode()
    }
}

/// One concrete shape of a family.
pub trait Variant: Encode + Sized {
    /// Family this variant belongs to.
    const FAMILY: &'static str;
    /// Variant name used in errors and logs.
    const NAME: &'static str;

    /// Build the variant from raw fields. Absent or `null` fields stay unset.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::FieldType`] for a present field of the wrong type.
    #[allow(clippy::result_large_err)]
    fn decode(raw: &RawObject) -> Result<Self>;
}

/// A closed set of variants sharing one abstract capability.
pub trait Family: Encode + Sized + 'static {
    /// Family name used in errors and logs.
    const NAME: &'static str;

    /// The family's selection table.
    fn dispatch() -> &'static Dispatch<Self>;

    /// Name of the concrete variant held.
    fn variant_name(&self) -> &'static str;

    /// Select and decode the variant for `raw`.
    ///
    /// # Errors
    ///
    /// Propagates the selected variant's decode error.
    #[allow(clippy::result_large_err)]
    fn unmarshal(raw: &RawObject) -> Result<Self> {
        Self::dispatch().decode(raw)
    }
}

/// Decode a family value from a raw object.
///
/// # Errors
///
/// See [`Family::unmarshal`].
#[allow(clippy::result_large_err)]
pub fn unmarshal<F: Family>(raw: &RawObject) -> Result<F> {
    F::unmarshal(raw)
}

/// Decode a family value from JSON text.
///
/// # Errors
///
/// [`VpcError::MalformedInput`] if the text is not a JSON object, otherwise
/// see [`Family::unmarshal`].
#[allow(clippy::result_large_err)]
pub fn unmarshal_str<F: Family>(json: &str) -> Result<F> {
    F::unmarshal(&RawObject::from_str(F::NAME, json)?)
}

/// Decode a family value from UTF-8 JSON bytes.
///
/// # Errors
///
/// Same as [`unmarshal_str`].
#[allow(clippy::result_large_err)]
pub fn unmarshal_slice<F: Family>(json: &[u8]) -> Result<F> {
    F::unmarshal(&RawObject::from_slice(F::NAME, json)?)
}

/// Decode a family value from a parsed JSON value.
///
/// # Errors
///
/// Same as [`unmarshal_str`].
#[allow(clippy::result_large_err)]
pub fn unmarshal_value<F: Family>(value: Value) -> Result<F> {
    F::unmarshal(&RawObject::from_value(F::NAME, value)?)
}

/// Encode a value (concrete variant, family, or `&dyn Encode`) to its raw object.
///
/// # Errors
///
/// See [`Encode::encode`].
#[allow(clippy::result_large_err)]
pub fn to_raw<T: Encode + ?Sized>(value: &T) -> Result<RawObject> {
    value.encode()
}

/// Encode a value to a `serde_json::Value`.
///
/// # Errors
///
/// See [`Encode::encode`].
#[allow(clippy::result_large_err)]
pub fn marshal_value<T: Encode + ?Sized>(value: &T) -> Result<Value> {
    Ok(value.encode()?.into_value())
}

/// Encode a value to compact JSON text.
///
/// # Errors
///
/// See [`Encode::encode`].
#[allow(clippy::result_large_err)]
pub fn marshal<T: Encode + ?Sized>(value: &T) -> Result<String> {
    let raw = value.encode()?;
    serde_json::to_string(&raw).map_err(|e| VpcError::Encode {
        field: String::new(),
        reason: e.to_string(),
    })
}

/// Encode a value to indented JSON text.
///
/// # Errors
///
/// See [`Encode::encode`].
#[allow(clippy::result_large_err)]
pub fn marshal_pretty<T: Encode + ?Sized>(value: &T) -> Result<String> {
    let raw = value.encode()?;
    serde_json::to_string_pretty(&raw).map_err(|e| VpcError::Encode {
        field: String::new(),
        reason: e.to_string(),
    })
}

/// Serialize through [`Encode`] so serde output matches [`marshal`].
pub(crate) fn serialize_encoded<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: Encode + ?Sized,
    S: serde::Serializer,
{
    value
        .encode()
        .map_err(serde::ser::Error::custom)?
        .serialize(serializer)
}
