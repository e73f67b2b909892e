// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative generators for variant structs and family enums.
//!
//! `variant!` declares a struct whose fields are all optional, together with
//! its field-by-field decoder and encoder. The encoder refuses a value whose
//! output would be routed to another variant of its family. `family!` declares the closed enum
//! over a set of variants and forwards encoding to whichever variant it holds.

/// Wire name of a field: the explicit literal if given, else the field name.
macro_rules! wire_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident $wire:literal) => {
        $wire
    };
}

/// Declare one concrete variant.
///
/// ```ignore
/// variant! {
///     /// An ICMP rule.
///     pub struct SecurityGroupRuleIcmp in SecurityGroupRule {
///         protocol: String,
///         icmp_type: u8 => "type",
///     }
/// }
/// ```
macro_rules! variant {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $family:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty $(=> $wire:literal)?,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::codec::Encode for $name {
            fn encode(&self) -> $crate::error::Result<$crate::codec::RawObject> {
                #[allow(unused_mut)]
                let mut raw = $crate::codec::RawObject::new();
                $(
                    raw.put(
                        $crate::codec::macros::wire_name!($field $($wire)?),
                        self.$field.as_ref(),
                    )?;
                )*
                <$family as $crate::codec::Family>::dispatch()
                    .ensure_selects(<Self as $crate::codec::Variant>::NAME, &raw)?;
                Ok(raw)
            }
        }

        impl $crate::codec::Variant for $name {
            const FAMILY: &'static str = stringify!($family);
            const NAME: &'static str = stringify!($name);

            #[allow(unused_variables)]
            fn decode(raw: &$crate::codec::RawObject) -> $crate::error::Result<Self> {
                Ok(Self {
                    $(
                        $field: raw.field(
                            Self::FAMILY,
                            Self::NAME,
                            $crate::codec::macros::wire_name!($field $($wire)?),
                        )?,
                    )*
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::codec::serialize_encoded(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <$crate::codec::RawObject as ::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <Self as $crate::codec::Variant>::decode(&raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}

/// Declare a family enum over previously declared variants.
///
/// `$dispatch` names a `static` holding the family's
/// [`Dispatch`](crate::codec::Dispatch) table. Fields listed under `common`
/// must exist on every variant and get a borrowing accessor on the enum.
macro_rules! family {
    (
        $(#[$meta:meta])*
        pub enum $name:ident with $dispatch:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty),
            )+
        }
        common {
            $(
                $(#[$cmeta:meta])*
                $field:ident : $fty:ty;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )+

        impl $crate::codec::Encode for $name {
            fn encode(&self) -> $crate::error::Result<$crate::codec::RawObject> {
                match self {
                    $( $name::$variant(inner) => $crate::codec::Encode::encode(inner), )+
                }
            }
        }

        impl $crate::codec::Family for $name {
            const NAME: &'static str = stringify!($name);

            fn dispatch() -> &'static $crate::codec::Dispatch<Self> {
                &$dispatch
            }

            fn variant_name(&self) -> &'static str {
                match self {
                    $( $name::$variant(_) => <$ty as $crate::codec::Variant>::NAME, )+
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::codec::serialize_encoded(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <$crate::codec::RawObject as ::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <Self as $crate::codec::Family>::unmarshal(&raw).map_err(::serde::de::Error::custom)
            }
        }

        $crate::codec::macros::family_accessors! {
            $name [$($variant),+] {
                $( $(#[$cmeta])* $field : $fty; )*
            }
        }
    };
}

macro_rules! family_accessors {
    (
        $name:ident $variants:tt {
            $( $(#[$cmeta:meta])* $field:ident : $fty:ty; )*
        }
    ) => {
        impl $name {
            $(
                $crate::codec::macros::family_accessor! {
                    $name $variants $(#[$cmeta])* $field : $fty
                }
            )*
        }
    };
}

macro_rules! family_accessor {
    (
        $name:ident [$($variant:ident),+] $(#[$cmeta:meta])* $field:ident : $fty:ty
    ) => {
        $(#[$cmeta])*
        #[must_use]
        pub fn $field(&self) -> Option<&$fty> {
            match self {
                $( $name::$variant(inner) => inner.$field.as_ref(), )+
            }
        }
    };
}

pub(crate) use family;
pub(crate) use family_accessor;
pub(crate) use family_accessors;
pub(crate) use variant;
pub(crate) use wire_name;
