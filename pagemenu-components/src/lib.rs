//! Horizontally paged container with a tracking menu bar.
//!
//! # Usage
//!
//! Build a [`PageController`], hand it the pages and the host geometry, then
//! forward gestures. The controller keeps the visible page and its two
//! neighbours attached and moves the menu indicator with the finger.
//!
//! ```
//! use pagemenu_components::{Page, PageController, PageControllerArgs, TitledPage};
//! use pagemenu_ui::{Px, PxRect};
//!
//! let mut controller = PageController::new(PageControllerArgs::default().initial_page(1));
//! controller.set_pages(
//!     ["Inbox", "Starred", "Sent"]
//!         .into_iter()
//!         .map(|title| Box::new(TitledPage::new(title)) as Box<dyn Page>)
//!         .collect(),
//! );
//! controller
//!     .initialize(PxRect::new(Px(0), Px(0), Px(320), Px(480)))
//!     .expect("bounds have an area");
//!
//! // Drag one full page forward.
//! controller.begin_drag();
//! controller.drag_by(Px(320));
//! controller.end_drag(false);
//!
//! assert_eq!(controller.visible_page().map(|page| page.index), Some(2));
//! assert_eq!(controller.window().len(), 3);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod container;
pub mod index;
pub mod menu_bar;
pub mod page;
pub mod page_controller;
pub mod text_metrics;
pub mod window;

pub use crate::{
    container::{ContainerSurface, ScrollSample},
    index::{Direction, neighbor, relative},
    menu_bar::{MenuBar, MenuBarArgs, MenuBarStyle, TitleFrame},
    page::{Page, PageId, PageRef, TitledPage},
    page_controller::{
        GesturePhase, InitializeError, PageController, PageControllerArgs,
        PageControllerDelegate, SwitchPageError,
    },
    text_metrics::{MonospaceMeasurer, TextMeasurer},
    window::{Slot, Window, WindowEntry},
};
