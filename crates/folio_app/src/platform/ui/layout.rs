//! Headless document layout: stacks the page's blocks top to bottom so the
//! scroll controller and section navigator have boxes to work with.

use folio_core::{AppViewModel, DetailView, ListView, Section, SectionBox, SectionLayout, Viewport};

use super::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    blocks: Vec<Block>,
    viewport_height: f64,
    offset: f64,
}

impl DocumentLayout {
    pub fn for_view(view: &AppViewModel, viewport_height: f64) -> Self {
        let mut stack = Stack::default();
        if view.route.is_home() {
            stack.push(HERO_ID, viewport_height);
            stack.push(Section::About.anchor(), ABOUT_HEIGHT);
            stack.push(Section::Expertise.anchor(), EXPERTISE_HEIGHT);
            stack.push(Section::Education.anchor(), EDUCATION_HEIGHT);
            stack.push(
                Section::Projects.anchor(),
                grid_height(&view.projects, PROJECT_ROW_HEIGHT),
            );
            stack.push(
                ACHIEVEMENTS_ID,
                grid_height(&view.achievements, ACHIEVEMENT_ROW_HEIGHT),
            );
            stack.push(Section::Contact.anchor(), CONTACT_HEIGHT);
        } else {
            match &view.detail {
                Some(DetailView::Found(detail)) => {
                    let items = detail.features.len()
                        + detail.challenges.len()
                        + detail.improvements.len();
                    stack.push(
                        DETAIL_ID,
                        DETAIL_BASE_HEIGHT + items as f64 * DETAIL_ITEM_HEIGHT,
                    );
                }
                _ => stack.push(NOT_FOUND_ID, viewport_height),
            }
        }
        stack.push(FOOTER_ID, FOOTER_HEIGHT);
        Self {
            blocks: stack.blocks,
            viewport_height,
            offset: 0.0,
        }
    }

    pub fn document_height(&self) -> f64 {
        self.blocks.last().map_or(0.0, |b| b.top + b.height)
    }

    /// Boxes of the tracked sections present on this page.
    pub fn section_layout(&self) -> SectionLayout {
        let boxes = self
            .blocks
            .iter()
            .filter_map(|block| {
                Section::from_anchor(&block.id).map(|section| SectionBox {
                    section,
                    top: block.top,
                    height: block.height,
                })
            })
            .collect();
        SectionLayout::new(boxes, self.viewport_height)
    }

    /// Keeps the current offset, clamped to the new document height.
    pub fn relayout(&mut self, next: DocumentLayout) {
        let offset = self.offset;
        *self = next;
        self.set_scroll_offset(offset);
    }
}

impl Viewport for DocumentLayout {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn element_top(&self, selector: &str) -> Option<f64> {
        let id = selector.strip_prefix('#')?;
        self.blocks.iter().find(|b| b.id == id).map(|b| b.top)
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }
}

#[derive(Default)]
struct Stack {
    blocks: Vec<Block>,
    next_top: f64,
}

impl Stack {
    fn push(&mut self, id: &str, height: f64) {
        self.blocks.push(Block {
            id: id.to_string(),
            top: self.next_top,
            height,
        });
        self.next_top += height;
    }
}

fn grid_height<T>(list: &ListView<T>, row_height: f64) -> f64 {
    let rows = match list {
        ListView::Loading => 1,
        ListView::Ready(items) => items.len().div_ceil(GRID_COLUMNS),
        ListView::Failed => 0,
    };
    GRID_CHROME_HEIGHT + rows as f64 * row_height
}
