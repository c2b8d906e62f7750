//! Host content units hosted by the pager.
//!
//! ## Usage
//!
//! Implement [`Page`] for whatever the host shows inside a slot. The pager
//! never creates pages; it owns the ones handed to
//! [`PageController::set_pages`](crate::page_controller::PageController::set_pages)
//! and drives their attach/detach lifecycle.
use pagemenu_ui::PxRect;

slotmap::new_key_type! {
    /// Opaque identity assigned to a page when the page list is assigned.
    ///
    /// Identities are never reused, so a `PageId` from a previous list never
    /// matches a page from the current one.
    pub struct PageId;
}

/// A page together with its position in the current page list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRef {
    /// Stable identity of the page.
    pub id: PageId,
    /// Position in the page list.
    pub index: usize,
}

/// A content unit that can be attached into one of the pager's slots.
pub trait Page {
    /// Title shown in the menu bar. `None` is rendered as an empty title.
    fn title(&self) -> Option<&str>;

    /// The page was attached into the container at `frame`.
    fn did_attach(&mut self, _frame: PxRect) {}

    /// The page moved to `frame` while attached.
    fn layout(&mut self, _frame: PxRect) {}

    /// The page was removed from the container.
    fn did_detach(&mut self) {}
}

/// A page that only carries a title.
///
/// Useful for hosts that render slots themselves from
/// [`Window`](crate::window::Window) and only need the pager's bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TitledPage {
    title: Option<String>,
}

impl TitledPage {
    /// Creates a page with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Creates a page without a title.
    pub fn untitled() -> Self {
        Self { title: None }
    }
}

impl Page for TitledPage {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
