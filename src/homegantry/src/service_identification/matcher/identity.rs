use crate::constants::{
    COMPAT_LABEL_DESCRIPTION, COMPAT_LABEL_GROUP, COMPAT_LABEL_ICON, COMPAT_LABEL_NAME,
    LABEL_CATEGORY, LABEL_DESCRIPTION, LABEL_ICON, LABEL_NAME,
};
use crate::service_identification::knowledge_base::KnowledgeBase;
use crate::service_identification::known_service::KnownService;
use crate::service_identification::matcher::MatchOptions;
use crate::service_identification::names::{image_repository, strip_affixes};
use crate::types::ContainerSnapshot;
use tracing::trace;

/// Display fields resolved before defaults and overrides are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Identity {
    /// Name and category always come from the match; icon and description only
    /// fill gaps left by labels.
    fn adopt(&mut self, known: &KnownService) {
        self.name = Some(known.name.clone());
        self.category = Some(known.category.clone());
        if self.icon.is_none() && !known.icon.is_empty() {
            self.icon = Some(known.icon.clone());
        }
        if self.description.is_none() && !known.description.is_empty() {
            self.description = Some(known.description.clone());
        }
    }
}

/// A label namespace that describes a service's identity.
pub struct LabelNamespace {
    pub name: &'static str,
    name_key: &'static str,
    icon_key: &'static str,
    category_key: &'static str,
    description_key: &'static str,
    enabled: fn(&MatchOptions) -> bool,
}

impl LabelNamespace {
    /// The namespace's fields as one group, if any of name, icon or category is set.
    fn read(&self, snapshot: &ContainerSnapshot) -> Option<Identity> {
        let field = |key| snapshot.non_empty_label(key).map(str::to_string);
        let identity = Identity {
            name: field(self.name_key),
            icon: field(self.icon_key),
            category: field(self.category_key),
            description: field(self.description_key),
        };
        let triggered =
            identity.name.is_some() || identity.icon.is_some() || identity.category.is_some();
        triggered.then_some(identity)
    }
}

fn always(_: &MatchOptions) -> bool {
    true
}

fn compat_enabled(options: &MatchOptions) -> bool {
    options.homepage_compat
}

/// Label namespaces in priority order. The first one that triggers wins as a whole.
pub const LABEL_CASCADE: &[LabelNamespace] = &[
    LabelNamespace {
        name: "first_party",
        name_key: LABEL_NAME,
        icon_key: LABEL_ICON,
        category_key: LABEL_CATEGORY,
        description_key: LABEL_DESCRIPTION,
        enabled: always,
    },
    LabelNamespace {
        name: "compat",
        name_key: COMPAT_LABEL_NAME,
        icon_key: COMPAT_LABEL_ICON,
        category_key: COMPAT_LABEL_GROUP,
        description_key: COMPAT_LABEL_DESCRIPTION,
        enabled: compat_enabled,
    },
];

/// Knowledge-base lookups in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownServiceLookup {
    ComposeService,
    ContainerName,
    ImagePattern,
    DefaultPort,
}

impl KnownServiceLookup {
    pub const CASCADE: [KnownServiceLookup; 4] = [
        KnownServiceLookup::ComposeService,
        KnownServiceLookup::ContainerName,
        KnownServiceLookup::ImagePattern,
        KnownServiceLookup::DefaultPort,
    ];

    pub fn lookup<'a>(
        self,
        snapshot: &ContainerSnapshot,
        knowledge_base: &'a KnowledgeBase,
    ) -> Option<&'a KnownService> {
        match self {
            KnownServiceLookup::ComposeService => snapshot
                .compose_service
                .as_deref()
                .and_then(|service| knowledge_base.find_by_alias(service)),
            KnownServiceLookup::ContainerName => {
                knowledge_base.find_by_alias(&strip_affixes(&snapshot.name))
            }
            KnownServiceLookup::ImagePattern => {
                knowledge_base.find_by_image(image_repository(&snapshot.image))
            }
            KnownServiceLookup::DefaultPort => snapshot
                .ports
                .first()
                .and_then(|pair| knowledge_base.find_by_port(pair.private)),
        }
    }
}

/// Runs the label cascade, then the knowledge-base cascade if no label named the service.
pub fn resolve_identity(
    snapshot: &ContainerSnapshot,
    knowledge_base: &KnowledgeBase,
    options: &MatchOptions,
) -> Identity {
    let mut identity = LABEL_CASCADE
        .iter()
        .filter(|namespace| (namespace.enabled)(options))
        .find_map(|namespace| {
            namespace.read(snapshot).inspect(|_| {
                trace!("[{}] identity from {} labels", snapshot.name, namespace.name)
            })
        })
        .unwrap_or_default();

    if identity.name.is_some() {
        return identity;
    }

    let known = KnownServiceLookup::CASCADE.iter().find_map(|step| {
        step.lookup(snapshot, knowledge_base).inspect(|known| {
            trace!(
                "[{}] matched known service {} by {:?}",
                snapshot.name,
                known.name,
                step
            )
        })
    });
    if let Some(known) = known {
        identity.adopt(known);
    }
    identity
}
