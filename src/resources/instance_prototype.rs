// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instance prototypes: the body of a create-instance request.
//!
//! A prototype names exactly one boot source. There is no discriminator
//! field, so the variant is inferred from which source key is present:
//!
//! | key path                                       | variant                              |
//! |------------------------------------------------|--------------------------------------|
//! | `boot_volume_attachment.volume.source_snapshot`| [`InstancePrototypeBySourceSnapshot`]|
//! | `boot_volume_attachment.volume.{id,crn,href}`  | [`InstancePrototypeByVolume`]        |
//! | `source_template`                              | [`InstancePrototypeBySourceTemplate`]|
//! | `catalog_offering`                             | [`InstancePrototypeByCatalogOffering`]|
//! | `image`                                        | [`InstancePrototypeByImage`]         |
//! | none of the above                              | [`InstancePrototypeGeneric`]         |

use std::sync::LazyLock;

use super::common::{
    BootVolumeAttachmentByVolume, BootVolumeAttachmentBySourceSnapshot,
    BootVolumeAttachmentPrototype, BootVolumeBySourceSnapshot, CatalogOfferingPrototype,
    ImageIdentity, InstanceProfileIdentity, InstanceTemplateIdentity, KeyIdentity,
    NetworkAttachmentPrototype, ResourceGroupIdentity, SnapshotIdentity, VolumeIdentity,
    VpcIdentity, ZoneIdentity,
};
use crate::codec::macros::family;
use crate::codec::{Dispatch, Family, KeyPath};

/// Declare an instance variant carrying the placement and networking fields
/// every instance prototype and template shares, followed by its own fields.
macro_rules! instance_variant {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $family:ident { $($extra:tt)* }
    ) => {
        $crate::codec::macros::variant! {
            $(#[$meta])*
            pub struct $name in $family {
                availability_policy: $crate::resources::common::InstanceAvailabilityPolicy,
                cluster_network_attachments:
                    Vec<$crate::resources::common::ClusterNetworkAttachmentPrototype>,
                /// `disabled`, `sgx` or `tdx`.
                confidential_compute_mode: String,
                default_trusted_profile: $crate::resources::common::InstanceDefaultTrustedProfile,
                enable_secure_boot: bool,
                keys: Vec<$crate::resources::common::KeyIdentity>,
                metadata_service: $crate::resources::common::InstanceMetadataService,
                name: String,
                network_attachments: Vec<$crate::resources::common::NetworkAttachmentPrototype>,
                network_interfaces: Vec<$crate::resources::common::NetworkInterfacePrototype>,
                placement_target: $crate::resources::common::ResourceIdentity,
                primary_network_attachment: $crate::resources::common::NetworkAttachmentPrototype,
                primary_network_interface: $crate::resources::common::NetworkInterfacePrototype,
                profile: $crate::resources::common::InstanceProfileIdentity,
                reservation_affinity: $crate::resources::common::ReservationAffinity,
                resource_group: $crate::resources::common::ResourceGroupIdentity,
                /// Total bandwidth (megabits per second) shared across volumes.
                total_volume_bandwidth: u32,
                user_data: String,
                volume_attachments: Vec<$crate::resources::common::VolumeAttachmentPrototype>,
                /// `pooled` or `weighted`.
                volume_bandwidth_qos_mode: String,
                vpc: $crate::resources::common::VpcIdentity,
                zone: $crate::resources::common::ZoneIdentity,
                $($extra)*
            }
        }
    };
}

pub(super) use instance_variant;

instance_variant! {
    /// Prototype naming no boot source. Only the shared fields are kept.
    pub struct InstancePrototypeGeneric in InstancePrototype {}
}

instance_variant! {
    /// Boot from an image.
    pub struct InstancePrototypeByImage in InstancePrototype {
        boot_volume_attachment: BootVolumeAttachmentPrototype,
        image: ImageIdentity,
    }
}

instance_variant! {
    /// Boot from a catalog offering (or one of its versions).
    pub struct InstancePrototypeByCatalogOffering in InstancePrototype {
        boot_volume_attachment: BootVolumeAttachmentPrototype,
        catalog_offering: CatalogOfferingPrototype,
    }
}

instance_variant! {
    /// Boot from a new volume restored from a snapshot.
    pub struct InstancePrototypeBySourceSnapshot in InstancePrototype {
        boot_volume_attachment: BootVolumeAttachmentBySourceSnapshot,
    }
}

instance_variant! {
    /// Start from an instance template, overriding any of its fields.
    pub struct InstancePrototypeBySourceTemplate in InstancePrototype {
        boot_volume_attachment: BootVolumeAttachmentPrototype,
        catalog_offering: CatalogOfferingPrototype,
        image: ImageIdentity,
        source_template: InstanceTemplateIdentity,
    }
}

instance_variant! {
    /// Boot from an existing volume.
    pub struct InstancePrototypeByVolume in InstancePrototype {
        boot_volume_attachment: BootVolumeAttachmentByVolume,
    }
}

family! {
    /// Body of a create-instance request.
    pub enum InstancePrototype with INSTANCE_PROTOTYPE_DISPATCH {
        Generic(InstancePrototypeGeneric),
        ByImage(InstancePrototypeByImage),
        ByCatalogOffering(InstancePrototypeByCatalogOffering),
        BySourceSnapshot(InstancePrototypeBySourceSnapshot),
        BySourceTemplate(InstancePrototypeBySourceTemplate),
        ByVolume(InstancePrototypeByVolume),
    }
    common {
        name: String;
        profile: InstanceProfileIdentity;
        primary_network_attachment: NetworkAttachmentPrototype;
        resource_group: ResourceGroupIdentity;
        vpc: VpcIdentity;
        zone: ZoneIdentity;
    }
}

pub(super) const BOOT_SOURCE_SNAPSHOT: KeyPath =
    KeyPath::new(&["boot_volume_attachment", "volume", "source_snapshot"]);

static INSTANCE_PROTOTYPE_DISPATCH: LazyLock<Dispatch<InstancePrototype>> =
    LazyLock::new(|| {
        Dispatch::builder(InstancePrototype::NAME)
            .probe::<InstancePrototypeBySourceSnapshot>(BOOT_SOURCE_SNAPSHOT)
            .probe::<InstancePrototypeByVolume>(KeyPath::new(&[
                "boot_volume_attachment",
                "volume",
                "id",
            ]))
            .probe::<InstancePrototypeByVolume>(KeyPath::new(&[
                "boot_volume_attachment",
                "volume",
                "crn",
            ]))
            .probe::<InstancePrototypeByVolume>(KeyPath::new(&[
                "boot_volume_attachment",
                "volume",
                "href",
            ]))
            .probe::<InstancePrototypeBySourceTemplate>(KeyPath::new(&["source_template"]))
            .probe::<InstancePrototypeByCatalogOffering>(KeyPath::new(&["catalog_offering"]))
            .probe::<InstancePrototypeByImage>(KeyPath::new(&["image"]))
            .fallback::<InstancePrototypeGeneric>()
            .build()
    });

impl InstancePrototype {
    /// Start a prototype from its shared placement fields.
    ///
    /// # Example
    ///
    /// ```
    /// use vpc_api_rs::resources::{InstancePrototype, ResourceIdentity};
    ///
    /// let prototype = InstancePrototype::builder()
    ///     .name("web-1")
    ///     .zone(ResourceIdentity::by_name("eu-de-2"))
    ///     .profile(ResourceIdentity::by_name("bx2-2x8"))
    ///     .vpc(ResourceIdentity::by_id("r010-vpc"))
    ///     .by_image(ResourceIdentity::by_id("r010-image"));
    ///
    /// assert!(matches!(prototype, InstancePrototype::ByImage(_)));
    /// ```
    #[must_use]
    pub fn builder() -> InstancePrototypeBuilder {
        InstancePrototypeBuilder::default()
    }

    /// Boot source key that selected this variant, if any.
    #[must_use]
    pub fn boot_source(&self) -> Option<&'static str> {
        match self {
            InstancePrototype::Generic(_) => None,
            InstancePrototype::ByImage(_) => Some("image"),
            InstancePrototype::ByCatalogOffering(_) => Some("catalog_offering"),
            InstancePrototype::BySourceSnapshot(_) | InstancePrototype::ByVolume(_) => {
                Some("boot_volume_attachment")
            }
            InstancePrototype::BySourceTemplate(_) => Some("source_template"),
        }
    }
}

/// Builder for [`InstancePrototype`].
///
/// Collects the shared fields; the terminal method picks the boot source and
/// therefore the variant.
#[derive(Debug, Clone, Default)]
pub struct InstancePrototypeBuilder {
    name: Option<String>,
    zone: Option<ZoneIdentity>,
    profile: Option<InstanceProfileIdentity>,
    vpc: Option<VpcIdentity>,
    resource_group: Option<ResourceGroupIdentity>,
    keys: Option<Vec<KeyIdentity>>,
    user_data: Option<String>,
    primary_network_attachment: Option<NetworkAttachmentPrototype>,
}

macro_rules! from_builder {
    ($variant:ident, $builder:expr, { $($field:ident: $value:expr),* $(,)? }) => {{
        let b = $builder;
        $variant {
            name: b.name,
            zone: b.zone,
            profile: b.profile,
            vpc: b.vpc,
            resource_group: b.resource_group,
            keys: b.keys,
            user_data: b.user_data,
            primary_network_attachment: b.primary_network_attachment,
            $($field: $value,)*
            ..Default::default()
        }
    }};
}

impl InstancePrototypeBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn zone(mut self, zone: ZoneIdentity) -> Self {
        self.zone = Some(zone);
        self
    }

    #[must_use]
    pub fn profile(mut self, profile: InstanceProfileIdentity) -> Self {
        self.profile = Some(profile);
        self
    }

    #[must_use]
    pub fn vpc(mut self, vpc: VpcIdentity) -> Self {
        self.vpc = Some(vpc);
        self
    }

    #[must_use]
    pub fn resource_group(mut self, resource_group: ResourceGroupIdentity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }

    /// Add an SSH key.
    #[must_use]
    pub fn key(mut self, key: KeyIdentity) -> Self {
        self.keys.get_or_insert_with(Vec::new).push(key);
        self
    }

    #[must_use]
    pub fn user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    #[must_use]
    pub fn primary_network_attachment(mut self, attachment: NetworkAttachmentPrototype) -> Self {
        self.primary_network_attachment = Some(attachment);
        self
    }

    /// Prototype without a boot source.
    #[must_use]
    pub fn build(self) -> InstancePrototype {
        from_builder!(InstancePrototypeGeneric, self, {}).into()
    }

    #[must_use]
    pub fn by_image(self, image: ImageIdentity) -> InstancePrototype {
        from_builder!(InstancePrototypeByImage, self, { image: Some(image) }).into()
    }

    #[must_use]
    pub fn by_catalog_offering(self, offering: CatalogOfferingPrototype) -> InstancePrototype {
        from_builder!(InstancePrototypeByCatalogOffering, self, {
            catalog_offering: Some(offering),
        })
        .into()
    }

    #[must_use]
    pub fn by_source_snapshot(self, snapshot: SnapshotIdentity) -> InstancePrototype {
        let attachment = BootVolumeAttachmentBySourceSnapshot {
            volume: Some(BootVolumeBySourceSnapshot {
                source_snapshot: Some(snapshot),
                ..Default::default()
            }),
            ..Default::default()
        };
        from_builder!(InstancePrototypeBySourceSnapshot, self, {
            boot_volume_attachment: Some(attachment),
        })
        .into()
    }

    #[must_use]
    pub fn by_source_template(self, template: InstanceTemplateIdentity) -> InstancePrototype {
        from_builder!(InstancePrototypeBySourceTemplate, self, {
            source_template: Some(template),
        })
        .into()
    }

    /// Boot from an existing volume. The identity must carry an `id`, `crn`
    /// or `href`: a name alone cannot be told apart from a generic prototype
    /// on the wire, so encoding such a prototype fails.
    #[must_use]
    pub fn by_volume(self, volume: VolumeIdentity) -> InstancePrototype {
        let attachment = BootVolumeAttachmentByVolume {
            volume: Some(volume),
            ..Default::default()
        };
        from_builder!(InstancePrototypeByVolume, self, {
            boot_volume_attachment: Some(attachment),
        })
        .into()
    }
}
