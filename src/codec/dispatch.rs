// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-family selection tables.
//!
//! A [`Dispatch`] picks exactly one variant for a [`RawObject`]:
//!
//! 1. explicit discriminator lookup (e.g. `protocol`),
//! 2. structural probes, deepest key path first,
//! 3. the generic fallback variant.
//!
//! Tables are plain data. Each family builds its table once and shares it
//! read-only; nothing in here is mutated after [`DispatchBuilder::build`].

use std::fmt;

use tracing::{debug, trace};

use super::probe::KeyPath;
use super::raw::RawObject;
use super::Variant;
use crate::error::{Result, VpcError};

/// Decoder from raw fields into the family value `F`.
pub type Decoder<F> = fn(&RawObject) -> Result<F>;

fn decode_into<V, F>(raw: &RawObject) -> Result<F>
where
    V: Variant + Into<F>,
{
    V::decode(raw).map(Into::into)
}

/// Which rule of the table selected a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Discriminator,
    Probe,
    Fallback,
}

impl Selection {
    fn as_str(self) -> &'static str {
        match self {
            Selection::Discriminator => "discriminator",
            Selection::Probe => "probe",
            Selection::Fallback => "fallback",
        }
    }
}

struct Entry<F> {
    variant: &'static str,
    decode: Decoder<F>,
}

// Manual impls: a derive would demand `F: Copy`.
impl<F> Clone for Entry<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Entry<F> {}

struct Route<F> {
    value: &'static str,
    entry: Entry<F>,
}

struct Probe<F> {
    path: KeyPath,
    entry: Entry<F>,
}

/// Immutable selection table for one variant family.
pub struct Dispatch<F> {
    family: &'static str,
    discriminator: Option<&'static str>,
    routes: Vec<Route<F>>,
    probes: Vec<Probe<F>>,
    fallback: Option<Entry<F>>,
}

impl<F> Dispatch<F> {
    /// Start a table for `family`.
    #[must_use]
    pub fn builder(family: &'static str) -> DispatchBuilder<F> {
        DispatchBuilder {
            family,
            discriminator: None,
            routes: Vec::new(),
            probes: Vec::new(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// The discriminator field, if the family has one.
    #[must_use]
    pub fn discriminator(&self) -> Option<&'static str> {
        self.discriminator
    }

    /// Discriminator values with a dedicated variant.
    pub fn routed_values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.iter().map(|r| r.value)
    }

    /// Probe paths in evaluation order.
    pub fn probe_paths(&self) -> impl Iterator<Item = KeyPath> + '_ {
        self.probes.iter().map(|p| p.path)
    }

    /// Name of the variant `raw` would decode to, and the rule that chose it.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::AmbiguousVariant`] when nothing matches and the
    /// table has no fallback.
    #[allow(clippy::result_large_err)]
    pub fn select(&self, raw: &RawObject) -> Result<(&'static str, Selection)> {
        self.resolve(raw)
            .map(|(entry, selection)| (entry.variant, selection))
    }

    /// Select a variant for `raw` and decode it.
    ///
    /// # Errors
    ///
    /// Propagates the selected variant's decode error, or
    /// [`VpcError::AmbiguousVariant`] for a strict table with no match.
    #[allow(clippy::result_large_err)]
    pub fn decode(&self, raw: &RawObject) -> Result<F> {
        let (entry, selection) = self.resolve(raw)?;
        trace!(
            target: "vpc_api::codec",
            family = self.family,
            variant = entry.variant,
            rule = selection.as_str(),
            "selected variant"
        );
        (entry.decode)(raw).inspect_err(|e| {
            debug!(
                target: "vpc_api::codec",
                family = self.family,
                variant = entry.variant,
                error = %e,
                "variant decode failed"
            );
        })
    }

    /// Check that `raw`, the encoding of `variant`, selects `variant` again.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::Encode`] naming the field that routes elsewhere:
    /// the discriminator, the key `variant` is selected by, or the
    /// higher-priority key that shadows it.
    #[allow(clippy::result_large_err)]
    pub fn ensure_selects(&self, variant: &'static str, raw: &RawObject) -> Result<()> {
        let (entry, _) = self.resolve(raw)?;
        if entry.variant == variant {
            return Ok(());
        }

        let matched = self.probes.iter().find(|p| p.path.exists_in(raw));
        let mut own = self.probes.iter().filter(|p| p.entry.variant == variant);
        let own_present = own.clone().any(|p| p.path.exists_in(raw));
        let field = match (self.discriminator, own.next(), matched) {
            (Some(field), _, _) => field.to_string(),
            (None, Some(path), _) if !own_present => path.path.to_string(),
            (None, _, Some(shadowing)) => shadowing.path.to_string(),
            (None, _, None) => String::new(),
        };

        debug!(
            target: "vpc_api::codec",
            family = self.family,
            variant,
            selected = entry.variant,
            field = %field,
            "encoded value routes to another variant"
        );
        Err(VpcError::Encode {
            field,
            reason: format!("{variant} would decode as {}", entry.variant),
        })
    }

    fn resolve(&self, raw: &RawObject) -> Result<(Entry<F>, Selection)> {
        if let Some(field) = self.discriminator {
            if let Some(value) = raw.get_str(field) {
                if let Some(route) = self.routes.iter().find(|r| r.value == value) {
                    return Ok((route.entry, Selection::Discriminator));
                }
            }
        }

        if let Some(probe) = self.probes.iter().find(|p| p.path.exists_in(raw)) {
            return Ok((probe.entry, Selection::Probe));
        }

        self.fallback
            .map(|entry| (entry, Selection::Fallback))
            .ok_or(VpcError::AmbiguousVariant {
                family: self.family,
            })
    }
}

impl<F> fmt::Debug for Dispatch<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("family", &self.family)
            .field("discriminator", &self.discriminator)
            .field(
                "routes",
                &self
                    .routes
                    .iter()
                    .map(|r| (r.value, r.entry.variant))
                    .collect::<Vec<_>>(),
            )
            .field(
                "probes",
                &self
                    .probes
                    .iter()
                    .map(|p| (p.path.to_string(), p.entry.variant))
                    .collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.map(|e| e.variant))
            .finish()
    }
}

/// Builder for [`Dispatch`].
pub struct DispatchBuilder<F> {
    family: &'static str,
    discriminator: Option<&'static str>,
    routes: Vec<Route<F>>,
    probes: Vec<Probe<F>>,
    fallback: Option<Entry<F>>,
}

impl<F> DispatchBuilder<F> {
    /// Set the field whose string value names the variant.
    #[must_use]
    pub fn discriminator(mut self, field: &'static str) -> Self {
        self.discriminator = Some(field);
        self
    }

    /// Route discriminator `value` to variant `V`.
    #[must_use]
    pub fn route<V>(mut self, value: &'static str) -> Self
    where
        V: Variant + Into<F>,
    {
        self.routes.push(Route {
            value,
            entry: Entry {
                variant: V::NAME,
                decode: decode_into::<V, F>,
            },
        });
        self
    }

    /// Select variant `V` when `path` exists.
    #[must_use]
    pub fn probe<V>(mut self, path: KeyPath) -> Self
    where
        V: Variant + Into<F>,
    {
        self.probes.push(Probe {
            path,
            entry: Entry {
                variant: V::NAME,
                decode: decode_into::<V, F>,
            },
        });
        self
    }

    /// Decode as `V` when nothing else matches.
    #[must_use]
    pub fn fallback<V>(mut self) -> Self
    where
        V: Variant + Into<F>,
    {
        self.fallback = Some(Entry {
            variant: V::NAME,
            decode: decode_into::<V, F>,
        });
        self
    }

    /// Freeze the table. Probes are ordered deepest path first; probes of
    /// equal depth keep the order they were added in.
    #[must_use]
    pub fn build(mut self) -> Dispatch<F> {
        self.probes
            .sort_by(|a, b| b.path.depth().cmp(&a.path.depth()));
        Dispatch {
            family: self.family,
            discriminator: self.discriminator,
            routes: self.routes,
            probes: self.probes,
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encode;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Shape {
        Plain(String),
        Deep(String),
        Shallow(String),
        Tagged(String),
    }

    macro_rules! test_variant {
        ($name:ident, $ctor:ident) => {
            struct $name;
            impl Encode for $name {
                fn encode(&self) -> Result<RawObject> {
                    Ok(RawObject::new())
                }
            }
            impl Variant for $name {
                const FAMILY: &'static str = "Shape";
                const NAME: &'static str = stringify!($name);
                fn decode(_raw: &RawObject) -> Result<Self> {
                    Ok($name)
                }
            }
            impl From<$name> for Shape {
                fn from(_: $name) -> Self {
                    Shape::$ctor(stringify!($name).to_string())
                }
            }
        };
    }

    test_variant!(PlainShape, Plain);
    test_variant!(DeepShape, Deep);
    test_variant!(ShallowShape, Shallow);
    test_variant!(TaggedShape, Tagged);

    fn raw(value: serde_json::Value) -> RawObject {
        RawObject::from_value("Shape", value).unwrap()
    }

    fn table() -> Dispatch<Shape> {
        // Shallow probe added first on purpose; build() must reorder.
        Dispatch::builder("Shape")
            .discriminator("kind")
            .route::<TaggedShape>("tagged")
            .probe::<ShallowShape>(KeyPath::new(&["a"]))
            .probe::<DeepShape>(KeyPath::new(&["a", "b"]))
            .fallback::<PlainShape>()
            .build()
    }

    #[test]
    fn test_discriminator_wins_over_probes() {
        let shape = table()
            .decode(&raw(json!({"kind": "tagged", "a": {"b": 1}})))
            .unwrap();
        assert_eq!(shape, Shape::Tagged("TaggedShape".to_string()));
    }

    #[test]
    fn test_unknown_discriminator_falls_through() {
        let shape = table().decode(&raw(json!({"kind": "other"}))).unwrap();
        assert_eq!(shape, Shape::Plain("PlainShape".to_string()));
    }

    #[test]
    fn test_non_string_discriminator_is_a_miss() {
        let (variant, selection) = table().select(&raw(json!({"kind": 7}))).unwrap();
        assert_eq!(variant, "PlainShape");
        assert_eq!(selection, Selection::Fallback);
    }

    #[test]
    fn test_deeper_probe_first() {
        let paths: Vec<String> = table().probe_paths().map(|p| p.to_string()).collect();
        assert_eq!(paths, vec!["a.b", "a"]);

        let (variant, selection) = table().select(&raw(json!({"a": {"b": null}}))).unwrap();
        assert_eq!(variant, "DeepShape");
        assert_eq!(selection, Selection::Probe);

        let (variant, _) = table().select(&raw(json!({"a": {}}))).unwrap();
        assert_eq!(variant, "ShallowShape");
    }

    #[test]
    fn test_strict_table_without_fallback() {
        let strict: Dispatch<Shape> = Dispatch::builder("Shape")
            .probe::<DeepShape>(KeyPath::new(&["a", "b"]))
            .build();
        let err = strict.decode(&raw(json!({"x": 1}))).unwrap_err();
        assert!(matches!(err, VpcError::AmbiguousVariant { family: "Shape" }));
    }

    #[test]
    fn test_ensure_selects_names_discriminator() {
        table()
            .ensure_selects("TaggedShape", &raw(json!({"kind": "tagged"})))
            .unwrap();
        let err = table()
            .ensure_selects("TaggedShape", &raw(json!({"a": {}})))
            .unwrap_err();
        match err {
            VpcError::Encode { field, reason } => {
                assert_eq!(field, "kind");
                assert_eq!(reason, "TaggedShape would decode as ShallowShape");
            }
            other => panic!("Expected Encode, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_selects_names_missing_or_shadowing_key() {
        let probes: Dispatch<Shape> = Dispatch::builder("Shape")
            .probe::<ShallowShape>(KeyPath::new(&["a"]))
            .probe::<DeepShape>(KeyPath::new(&["b", "c"]))
            .fallback::<PlainShape>()
            .build();

        // own key missing
        let err = probes.ensure_selects("ShallowShape", &raw(json!({"x": 1}))).unwrap_err();
        assert!(matches!(err, VpcError::Encode { ref field, .. } if field == "a"));

        // own key present but a deeper key wins
        let err = probes
            .ensure_selects("ShallowShape", &raw(json!({"a": 1, "b": {"c": 2}})))
            .unwrap_err();
        assert!(matches!(err, VpcError::Encode { ref field, .. } if field == "b.c"));

        // fallback variant carrying a routed key
        let err = probes.ensure_selects("PlainShape", &raw(json!({"a": 1}))).unwrap_err();
        assert!(matches!(err, VpcError::Encode { ref field, .. } if field == "a"));

        probes.ensure_selects("PlainShape", &raw(json!({"x": 1}))).unwrap();
    }

    #[test]
    fn test_routed_values() {
        let dispatch = table();
        assert_eq!(dispatch.discriminator(), Some("kind"));
        assert_eq!(dispatch.routed_values().collect::<Vec<_>>(), vec!["tagged"]);
        assert_eq!(dispatch.family(), "Shape");
    }
}
