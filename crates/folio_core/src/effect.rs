use std::time::Duration;

use crate::{ContactFields, ContentSource, Msg, RequestId, ScrollOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchContent {
        request: RequestId,
        source: ContentSource,
    },
    /// Put the viewport at the top without animating.
    ResetScroll,
    /// Drop the fragment from the current history entry.
    ClearFragment,
    ScrollToElement {
        selector: String,
        options: ScrollOptions,
    },
    ScrollToTop {
        duration: Duration,
    },
    /// Full page navigation.
    Navigate { href: String, replace: bool },
    OpenDocument { href: String },
    /// Deliver `msg` back to `update` after `after` has passed.
    Schedule { after: Duration, msg: Box<Msg> },
    SubmitContact { fields: ContactFields },
    LaunchMailto { href: String },
}
