/// Color classification of a technology tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagStyle {
    Yellow,
    Blue,
    SoftBlue,
    Mono,
    Green,
    DeepGreen,
    Slate,
    Orange,
    Teal,
    Red,
    Token,
    #[default]
    Neutral,
}

const TAG_STYLES: &[(&str, TagStyle)] = &[
    ("JavaScript", TagStyle::Yellow),
    ("React.js", TagStyle::Blue),
    ("Next.js", TagStyle::Mono),
    ("Node.js", TagStyle::Green),
    ("Express.js", TagStyle::Slate),
    ("MongoDB", TagStyle::DeepGreen),
    ("Firebase", TagStyle::Orange),
    ("JWT", TagStyle::Token),
    ("Tailwind CSS", TagStyle::Teal),
    ("TanStack Query", TagStyle::Red),
    ("Swiper Slider", TagStyle::SoftBlue),
    ("Vercel", TagStyle::Mono),
];

/// Looks up the style of `tag`; unknown tags get [`TagStyle::Neutral`].
pub fn tag_style(tag: &str) -> TagStyle {
    TAG_STYLES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, style)| *style)
        .unwrap_or_default()
}

impl TagStyle {
    /// Text color used on project cards.
    pub fn card_class(self) -> &'static str {
        match self {
            TagStyle::Yellow => "text-yellow-400",
            TagStyle::Blue => "text-blue-400",
            TagStyle::SoftBlue => "text-blue-300",
            TagStyle::Mono => "text-white",
            TagStyle::Green => "text-green-400",
            TagStyle::DeepGreen => "text-green-500",
            TagStyle::Slate => "text-gray-300",
            TagStyle::Orange => "text-orange-400",
            TagStyle::Teal => "text-cyan-400",
            TagStyle::Red => "text-red-400",
            TagStyle::Token => "text-purple-400",
            TagStyle::Neutral => "text-gray-400",
        }
    }

    /// Text, background and border classes used on the detail page.
    pub fn badge_class(self) -> &'static str {
        match self {
            TagStyle::Yellow | TagStyle::Token => {
                "text-yellow-300 bg-yellow-500/10 border-yellow-500/20"
            }
            TagStyle::Blue | TagStyle::SoftBlue => "text-blue-300 bg-blue-500/10 border-blue-500/20",
            TagStyle::Mono => "text-white bg-black/30 border-white/20",
            TagStyle::Green => "text-green-300 bg-green-500/10 border-green-500/20",
            TagStyle::DeepGreen => "text-green-400 bg-green-600/10 border-green-600/20",
            TagStyle::Orange => "text-orange-300 bg-orange-500/10 border-orange-500/20",
            TagStyle::Teal => "text-teal-300 bg-teal-500/10 border-teal-500/20",
            TagStyle::Red => "text-red-300 bg-red-500/10 border-red-500/20",
            TagStyle::Slate | TagStyle::Neutral => "text-gray-300 bg-gray-500/10 border-gray-500/20",
        }
    }
}

/// Icon shown on a project card, picked from the category text.
pub fn category_icon(category: &str) -> &'static str {
    if category.contains("Full Stack") {
        "fas fa-layer-group"
    } else if category.contains("Web") {
        "fas fa-globe"
    } else if category.contains("Mobile") {
        "fas fa-mobile-alt"
    } else {
        "fas fa-code"
    }
}
