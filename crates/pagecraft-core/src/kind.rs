#![forbid(unsafe_code)]

//! Component variants.
//!
//! [`ComponentKind`] is the closed tag that selects a render strategy. The
//! wire form is a kebab-case string (`"nav-menu"`, `"pricing-table"`).
//! Tags this version does not know are kept verbatim in
//! [`ComponentKind::Unknown`] so a forward-incompatible document survives a
//! load/save cycle and renders a fallback instead of failing. The older
//! spellings `video-embed` and `code-block` render like `video` and `code`
//! and are written back as they were read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Broad rendering family of a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindFamily {
    /// Rendered directly from props/content/style.
    Primitive,
    /// Renders its own frame then its `children` in order.
    SimpleContainer,
    /// Fixed-N-column container (`container`).
    FlexContainer,
    /// Template-driven grid (`grid`).
    GridContainer,
    /// Self-contained widget with internal state and no tree children.
    Composite,
    /// Tag not recognized by this version.
    Unknown,
}

/// The render variant of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Heading,
    Text,
    Button,
    Image,
    /// `legacy` is set for the `video-embed` spelling.
    Video { legacy: bool },
    Divider,
    Spacer,
    /// `legacy` is set for the `code-block` spelling.
    Code { legacy: bool },
    Alert,
    SocialIcons,
    CustomCode,
    Section,
    Card,
    Container,
    Grid,
    Header,
    Footer,
    Cart,
    Slider,
    Banner,
    NavMenu,
    PricingTable,
    Testimonials,
    Faq,
    DomainSearch,
    ProductsGrid,
    ContactForm,
    Newsletter,
    /// A tag with no matching variant; the original string is preserved.
    Unknown(String),
}

impl ComponentKind {
    /// Every known variant, in palette order.
    pub const KNOWN: [ComponentKind; 28] = [
        ComponentKind::Heading,
        ComponentKind::Text,
        ComponentKind::Button,
        ComponentKind::Image,
        ComponentKind::Video { legacy: false },
        ComponentKind::Divider,
        ComponentKind::Spacer,
        ComponentKind::Code { legacy: false },
        ComponentKind::Alert,
        ComponentKind::SocialIcons,
        ComponentKind::CustomCode,
        ComponentKind::Section,
        ComponentKind::Card,
        ComponentKind::Container,
        ComponentKind::Grid,
        ComponentKind::Header,
        ComponentKind::Footer,
        ComponentKind::Cart,
        ComponentKind::Slider,
        ComponentKind::Banner,
        ComponentKind::NavMenu,
        ComponentKind::PricingTable,
        ComponentKind::Testimonials,
        ComponentKind::Faq,
        ComponentKind::DomainSearch,
        ComponentKind::ProductsGrid,
        ComponentKind::ContactForm,
        ComponentKind::Newsletter,
    ];

    /// Wire tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Button => "button",
            Self::Image => "image",
            Self::Video { legacy: false } => "video",
            Self::Video { legacy: true } => "video-embed",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
            Self::Code { legacy: false } => "code",
            Self::Code { legacy: true } => "code-block",
            Self::Alert => "alert",
            Self::SocialIcons => "social-icons",
            Self::CustomCode => "custom-code",
            Self::Section => "section",
            Self::Card => "card",
            Self::Container => "container",
            Self::Grid => "grid",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Cart => "cart",
            Self::Slider => "slider",
            Self::Banner => "banner",
            Self::NavMenu => "nav-menu",
            Self::PricingTable => "pricing-table",
            Self::Testimonials => "testimonials",
            Self::Faq => "faq",
            Self::DomainSearch => "domain-search",
            Self::ProductsGrid => "products-grid",
            Self::ContactForm => "contact-form",
            Self::Newsletter => "newsletter",
            Self::Unknown(tag) => tag,
        }
    }

    /// Human-readable name used by editor badges and palettes.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Heading => "Heading",
            Self::Text => "Text",
            Self::Button => "Button",
            Self::Image => "Image",
            Self::Video { .. } => "Video",
            Self::Divider => "Divider",
            Self::Spacer => "Spacer",
            Self::Code { .. } => "Code",
            Self::Alert => "Alert",
            Self::SocialIcons => "Social Icons",
            Self::CustomCode => "Custom Code",
            Self::Section => "Section",
            Self::Card => "Card",
            Self::Container => "Container",
            Self::Grid => "Grid",
            Self::Header => "Header",
            Self::Footer => "Footer",
            Self::Cart => "Cart",
            Self::Slider => "Slider",
            Self::Banner => "Banner",
            Self::NavMenu => "Nav Menu",
            Self::PricingTable => "Pricing Table",
            Self::Testimonials => "Testimonials",
            Self::Faq => "FAQ",
            Self::DomainSearch => "Domain Search",
            Self::ProductsGrid => "Products Grid",
            Self::ContactForm => "Contact Form",
            Self::Newsletter => "Newsletter",
            Self::Unknown(tag) => tag,
        }
    }

    /// Rendering family for dispatch.
    #[must_use]
    pub fn family(&self) -> KindFamily {
        match self {
            Self::Heading
            | Self::Text
            | Self::Button
            | Self::Image
            | Self::Video { .. }
            | Self::Divider
            | Self::Spacer
            | Self::Code { .. }
            | Self::Alert
            | Self::SocialIcons
            | Self::CustomCode => KindFamily::Primitive,
            Self::Section | Self::Card => KindFamily::SimpleContainer,
            Self::Container => KindFamily::FlexContainer,
            Self::Grid => KindFamily::GridContainer,
            Self::Header
            | Self::Footer
            | Self::Cart
            | Self::Slider
            | Self::Banner
            | Self::NavMenu
            | Self::PricingTable
            | Self::Testimonials
            | Self::Faq
            | Self::DomainSearch
            | Self::ProductsGrid
            | Self::ContactForm
            | Self::Newsletter => KindFamily::Composite,
            Self::Unknown(_) => KindFamily::Unknown,
        }
    }

    /// Whether `content` is treated as a rich-text payload.
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Heading | Self::Text | Self::Alert | Self::Code { .. })
    }

    /// Whether the tag was not recognized.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl FromStr for ComponentKind {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let kind = match tag {
            "video-embed" => Self::Video { legacy: true },
            "code-block" => Self::Code { legacy: true },
            other => Self::KNOWN
                .iter()
                .find(|known| known.as_str() == other)
                .cloned()
                .unwrap_or_else(|| Self::Unknown(other.to_string())),
        };
        Ok(kind)
    }
}

impl From<&str> for ComponentKind {
    fn from(tag: &str) -> Self {
        match tag.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ComponentKind::from(tag.as_str()))
    }
}
