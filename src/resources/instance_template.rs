// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instance templates as returned by the API.
//!
//! A template whose boot volume is restored from a snapshot decodes to
//! [`InstanceTemplateBySourceSnapshot`]. The probe only asks whether the
//! `boot_volume_attachment.volume.source_snapshot` key exists, so an empty
//! `{}` snapshot still selects it. Every other template is
//! [`InstanceTemplateGeneric`].

use std::sync::LazyLock;

use super::common::{
    BootVolumeAttachmentBySourceSnapshot, BootVolumeAttachmentPrototype, CatalogOfferingPrototype,
    ImageIdentity, InstanceProfileIdentity, ResourceGroupIdentity, VpcIdentity, ZoneIdentity,
};
use super::instance_prototype::{instance_variant, BOOT_SOURCE_SNAPSHOT};
use crate::codec::macros::family;
use crate::codec::{Dispatch, Family};

instance_variant! {
    /// A template booting from an image, a catalog offering, or a volume
    /// created without a snapshot.
    pub struct InstanceTemplateGeneric in InstanceTemplate {
        boot_volume_attachment: BootVolumeAttachmentPrototype,
        catalog_offering: CatalogOfferingPrototype,
        created_at: String,
        crn: String,
        href: String,
        id: String,
        image: ImageIdentity,
    }
}

instance_variant! {
    /// A template whose boot volume is restored from a snapshot.
    pub struct InstanceTemplateBySourceSnapshot in InstanceTemplate {
        boot_volume_attachment: BootVolumeAttachmentBySourceSnapshot,
        created_at: String,
        crn: String,
        href: String,
        id: String,
    }
}

family! {
    /// An instance template.
    pub enum InstanceTemplate with INSTANCE_TEMPLATE_DISPATCH {
        Generic(InstanceTemplateGeneric),
        BySourceSnapshot(InstanceTemplateBySourceSnapshot),
    }
    common {
        confidential_compute_mode: String;
        created_at: String;
        crn: String;
        enable_secure_boot: bool;
        href: String;
        id: String;
        name: String;
        profile: InstanceProfileIdentity;
        resource_group: ResourceGroupIdentity;
        vpc: VpcIdentity;
        zone: ZoneIdentity;
    }
}

static INSTANCE_TEMPLATE_DISPATCH: LazyLock<Dispatch<InstanceTemplate>> = LazyLock::new(|| {
    Dispatch::builder(InstanceTemplate::NAME)
        .probe::<InstanceTemplateBySourceSnapshot>(BOOT_SOURCE_SNAPSHOT)
        .fallback::<InstanceTemplateGeneric>()
        .build()
});

impl InstanceTemplate {
    /// Whether the boot volume is restored from a snapshot.
    #[must_use]
    pub fn boots_from_snapshot(&self) -> bool {
        matches!(self, InstanceTemplate::BySourceSnapshot(_))
    }
}
