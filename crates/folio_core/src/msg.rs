use crate::{ContentPayload, ContentSource, FormField, Location, RequestId, Section, SectionLayout};

/// What a navigation link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    /// Brand name and footer logo: back to the top of the root page.
    Top,
    Section(Section),
    /// The downloadable resume document.
    Resume,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The shell opened a page address (initial load or full navigation).
    PageLoaded(Location),
    /// The fragment changed after load, e.g. through history navigation.
    HashChanged { fragment: Option<String> },
    /// Layout has settled after a load that carried `fragment`.
    FragmentSettled { fragment: String },
    /// Section boxes were measured or re-measured.
    LayoutMeasured(SectionLayout),
    /// The viewport scroll offset changed.
    Scrolled { offset: f64 },
    /// User activated a navigation link (nav bar, mobile menu or footer).
    NavLinkClicked(NavTarget),
    /// The post-click transition guard window ended.
    ClickGuardElapsed { generation: u64 },
    /// User toggled the mobile menu button.
    MenuToggled,
    /// User clicked outside the open mobile menu.
    MenuDismissed,
    /// "Get In Touch" on a detail page.
    DetailContactClicked,
    /// A content document finished loading.
    ContentLoaded {
        request: RequestId,
        source: ContentSource,
        result: Result<ContentPayload, String>,
    },
    /// User typed into a contact form field.
    FieldEdited { field: FormField, value: String },
    /// User pressed the submit button.
    SubmitClicked,
    /// Remote endpoint accepted the message.
    SubmitSucceeded,
    /// Remote endpoint rejected the message or could not be reached.
    SubmitFailed { reason: String },
    /// The mail client could not be opened for the fallback link.
    MailtoLaunchFailed { reason: String },
    /// The delay before clearing fields after the fallback ended.
    FallbackClearElapsed { generation: u64 },
    /// User closed the notification banner.
    NotificationDismissed,
    /// Render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
