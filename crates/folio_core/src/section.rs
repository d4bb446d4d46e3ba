//! Page sections and the scroll-position rule that picks the active one.

use std::fmt;

/// Height of the fixed navigation bar, in CSS pixels.
pub const NAV_BAR_HEIGHT: f64 = 100.0;
/// Below this scroll offset no section is active.
pub const TOP_THRESHOLD: f64 = 100.0;
/// Above this scroll offset the nav bar switches to its "scrolled" look.
pub const SCROLLED_THRESHOLD: f64 = 50.0;

/// Sections the navigator tracks, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    About,
    Expertise,
    Education,
    Projects,
    Contact,
}

impl Section {
    pub const TRACKED: [Section; 5] = [
        Section::About,
        Section::Expertise,
        Section::Education,
        Section::Projects,
        Section::Contact,
    ];

    /// Element id of the section on the root page.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Expertise => "expertise",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Section> {
        let anchor = anchor.strip_prefix('#').unwrap_or(anchor);
        Section::TRACKED.into_iter().find(|s| s.anchor() == anchor)
    }

    pub fn selector(self) -> String {
        format!("#{}", self.anchor())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Measured box of one section, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBox {
    pub section: Section,
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Section boxes and viewport height as last measured by the shell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionLayout {
    pub boxes: Vec<SectionBox>,
    pub viewport_height: f64,
}

impl SectionLayout {
    pub fn new(boxes: Vec<SectionBox>, viewport_height: f64) -> Self {
        Self {
            boxes,
            viewport_height,
        }
    }

    pub fn box_of(&self, section: Section) -> Option<&SectionBox> {
        self.boxes.iter().find(|b| b.section == section)
    }
}

/// Outcome of one scroll tick for the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveUpdate {
    /// The offset is near the top: nothing is active.
    Clear,
    /// The nav-adjusted position falls inside this section.
    Set(Section),
    /// No section contains the position: keep whatever was active.
    Keep,
}

/// Applies the navigator rule for one scroll offset.
///
/// Boxes are scanned in [`Section::TRACKED`] order regardless of the order in
/// `layout`, so the first section in the document wins on overlap.
pub fn active_section_at(layout: &SectionLayout, offset: f64) -> ActiveUpdate {
    if offset < TOP_THRESHOLD {
        return ActiveUpdate::Clear;
    }
    let position = offset + NAV_BAR_HEIGHT;
    Section::TRACKED
        .into_iter()
        .filter_map(|section| layout.box_of(section))
        .find(|b| b.contains(position))
        .map_or(ActiveUpdate::Keep, |b| ActiveUpdate::Set(b.section))
}
