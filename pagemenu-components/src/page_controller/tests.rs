use std::sync::Arc;

use pagemenu_ui::AnimationOutcome;
use parking_lot::Mutex;

use super::*;

const TITLES: [&str; 5] = ["Home", "Settings", "News", "Profile", "About"];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Attached(usize, PxRect),
    Laid(usize, PxRect),
    Detached(usize),
}

type Log = Arc<Mutex<Vec<Event>>>;
type Changes = Arc<Mutex<Vec<(usize, Option<usize>)>>>;

struct RecordingPage {
    index: usize,
    title: Option<String>,
    log: Log,
}

impl Page for RecordingPage {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn did_attach(&mut self, frame: PxRect) {
        self.log.lock().push(Event::Attached(self.index, frame));
    }

    fn layout(&mut self, frame: PxRect) {
        self.log.lock().push(Event::Laid(self.index, frame));
    }

    fn did_detach(&mut self) {
        self.log.lock().push(Event::Detached(self.index));
    }
}

fn pages(count: usize, log: &Log) -> Vec<Box<dyn Page>> {
    (0..count)
        .map(|index| {
            Box::new(RecordingPage {
                index,
                title: Some(TITLES[index % TITLES.len()].to_string()),
                log: Arc::clone(log),
            }) as Box<dyn Page>
        })
        .collect()
}

fn bounds() -> PxRect {
    PxRect::new(Px::ZERO, Px::ZERO, Px(200), Px(444))
}

struct Harness {
    controller: PageController,
    log: Log,
    changes: Changes,
}

impl Harness {
    fn new(count: usize, initial_page: usize) -> Self {
        let log = Log::default();
        let changes = Changes::default();
        let sink = Arc::clone(&changes);
        let mut controller =
            PageController::new(PageControllerArgs::default().initial_page(initial_page))
                .with_delegate(move |page: PageRef, previous: Option<PageRef>| {
                    sink.lock().push((page.index, previous.map(|page| page.index)));
                });
        controller.set_pages(pages(count, &log));
        controller
            .initialize(bounds())
            .expect("bounds have an area");
        Self {
            controller,
            log,
            changes,
        }
    }

    fn slots(&self) -> [Option<usize>; 3] {
        [Slot::Left, Slot::Center, Slot::Right].map(|slot| {
            self.controller
                .window()
                .page_in(slot)
                .map(|page| page.index)
        })
    }

    fn visible(&self) -> Option<usize> {
        self.controller.visible_page().map(|page| page.index)
    }

    fn take_changes(&self) -> Vec<(usize, Option<usize>)> {
        std::mem::take(&mut *self.changes.lock())
    }

    fn take_events(&self) -> Vec<Event> {
        std::mem::take(&mut *self.log.lock())
    }
}

fn dragging(offset: i32) -> ScrollSample {
    ScrollSample {
        offset: Px(offset),
        is_dragging: true,
        is_tracking: true,
    }
}

fn gliding(offset: i32) -> ScrollSample {
    ScrollSample {
        offset: Px(offset),
        is_dragging: false,
        is_tracking: false,
    }
}

fn attached_count(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::Attached(..)))
        .count()
}

#[test]
fn first_load_fills_window_and_sizes_indicator_without_animation() {
    let harness = Harness::new(5, 2);

    assert_eq!(harness.visible(), Some(2));
    assert_eq!(harness.slots(), [Some(1), Some(2), Some(3)]);
    assert_eq!(harness.take_changes(), vec![(2, None)]);
    assert_eq!(attached_count(&harness.take_events()), 3);

    let bar = harness.controller.menu_bar();
    assert_eq!(bar.selected(), Some(2));
    assert_eq!(bar.indicator(), bar.resting_rect(2));
    assert_eq!(bar.presentation(), bar.indicator());
    assert!(harness.controller.last_indicator_animation().is_none());
}

#[test]
fn content_sits_below_menu_bar() {
    let harness = Harness::new(3, 0);
    let controller = &harness.controller;

    assert_eq!(
        controller.menu_bar_frame(),
        PxRect::new(Px::ZERO, Px::ZERO, Px(200), Px(44))
    );
    assert_eq!(
        controller.content_frame(),
        PxRect::new(Px::ZERO, Px(44), Px(200), Px(400))
    );
    assert_eq!(controller.surface().content_offset(), Px(200));
    assert_eq!(
        controller
            .window()
            .entry_in(Slot::Right)
            .map(|entry| entry.frame),
        Some(PxRect::new(Px(400), Px::ZERO, Px(200), Px(400)))
    );
}

#[test]
fn load_pages_is_idempotent() {
    let mut harness = Harness::new(5, 2);
    harness.take_changes();
    harness.take_events();

    harness.controller.load_pages(2);

    assert!(harness.take_events().is_empty());
    assert!(harness.take_changes().is_empty());
    assert_eq!(harness.slots(), [Some(1), Some(2), Some(3)]);
}

#[test]
fn switch_page_wraps_neighbours() {
    let mut harness = Harness::new(5, 2);
    harness.take_changes();

    harness.controller.switch_page(4);

    assert_eq!(harness.visible(), Some(4));
    assert_eq!(harness.slots(), [Some(3), Some(4), Some(0)]);
    assert_eq!(harness.controller.window().len(), 3);
    assert_eq!(harness.take_changes(), vec![(4, Some(2))]);
}

#[test]
fn full_width_drag_commits_once() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    for offset in (210..=400).step_by(10) {
        harness.controller.drag_to(Px(offset));
    }

    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    assert_eq!(harness.visible(), Some(1));
    assert_eq!(harness.controller.surface().content_offset(), Px(200));
    assert_eq!(harness.slots(), [Some(0), Some(1), Some(2)]);

    harness.controller.end_drag(false);
    assert!(harness.take_changes().is_empty());
    assert_eq!(harness.controller.phase(), GesturePhase::Idle);
}

#[test]
fn backward_drag_commits_previous_page() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(60));
    assert!(harness.take_changes().is_empty());
    harness.controller.drag_to(Px(0));

    assert_eq!(harness.take_changes(), vec![(2, Some(0))]);
    assert_eq!(harness.slots(), [Some(1), Some(2), Some(0)]);
}

#[test]
fn commit_evicts_the_far_page() {
    let mut harness = Harness::new(4, 0);
    harness.take_events();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(400));

    let events = harness.take_events();
    assert!(events.contains(&Event::Detached(3)));
    assert!(events.contains(&Event::Attached(
        2,
        PxRect::new(Px(400), Px::ZERO, Px(200), Px(400))
    )));
    assert!(events.contains(&Event::Laid(
        0,
        PxRect::new(Px::ZERO, Px::ZERO, Px(200), Px(400))
    )));
    assert_eq!(harness.slots(), [Some(0), Some(1), Some(2)]);
}

#[test]
fn drifting_inside_centre_span_never_notifies() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    for offset in [260, 150, 299, 101, 200] {
        harness.controller.drag_to(Px(offset));
        assert_eq!(harness.controller.phase(), GesturePhase::Tracking);
    }
    harness.controller.end_drag(false);

    assert!(harness.take_changes().is_empty());
    assert!(harness.controller.last_indicator_animation().is_none());
    assert_eq!(harness.visible(), Some(0));
}

#[test]
fn returning_from_crossing_reverts_indicator() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();
    let home = harness.controller.menu_bar().resting_rect(0);

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(320));
    let page1 = harness.controller.page_ref(1).expect("three pages");
    assert_eq!(
        harness.controller.phase(),
        GesturePhase::Crossing { to: page1 }
    );
    assert_ne!(harness.controller.menu_bar().indicator(), home);

    harness.controller.drag_to(Px(200));

    assert_eq!(harness.visible(), Some(0));
    assert!(harness.take_changes().is_empty());
    assert_eq!(harness.controller.phase(), GesturePhase::Tracking);
    assert_eq!(harness.controller.menu_bar().indicator(), home);

    let start = Instant::now();
    harness.controller.tick(start);
    harness
        .controller
        .tick(start + harness.controller.args().animation_duration);
    assert_eq!(harness.controller.menu_bar().presentation(), home);
    let completion = harness
        .controller
        .take_indicator_animation()
        .expect("revert started an animation");
    assert_eq!(pollster::block_on(completion), AnimationOutcome::Finished);
}

#[test]
fn settling_past_threshold_commits() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(330));
    harness.controller.end_drag(true);
    assert!(harness.take_changes().is_empty());

    harness.controller.end_decelerating();

    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    assert_eq!(harness.controller.surface().content_offset(), Px(200));
    assert_eq!(harness.controller.phase(), GesturePhase::Idle);
}

#[test]
fn native_deceleration_back_to_centre_reverts() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(320));
    harness.controller.end_drag(true);
    assert_eq!(harness.controller.did_scroll(gliding(200)), None);
    assert_eq!(harness.controller.did_end_decelerating(), None);

    assert!(harness.take_changes().is_empty());
    assert!(harness.controller.last_indicator_animation().is_some());
    assert_eq!(harness.controller.phase(), GesturePhase::Idle);
}

#[test]
fn native_samples_past_the_edge_commit_once() {
    let mut harness = Harness::new(5, 0);
    harness.take_changes();

    assert_eq!(harness.controller.did_scroll(dragging(250)), None);
    assert_eq!(harness.controller.did_scroll(dragging(400)), Some(Px(200)));
    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    assert!(harness.controller.is_awaiting_recenter());

    // The host has not applied the new offset yet and keeps reporting the edge.
    assert_eq!(harness.controller.did_scroll(dragging(401)), Some(Px(200)));
    assert_eq!(harness.controller.did_scroll(dragging(402)), Some(Px(200)));
    assert!(harness.take_changes().is_empty());
    assert_eq!(harness.visible(), Some(1));
    assert_eq!(harness.slots(), [Some(0), Some(1), Some(2)]);
    assert_eq!(harness.controller.surface().content_offset(), Px(200));

    assert_eq!(harness.controller.did_scroll(dragging(200)), None);
    assert!(!harness.controller.is_awaiting_recenter());
    assert_eq!(harness.controller.phase(), GesturePhase::Tracking);

    // A fresh gesture from the recentred offset commits again.
    harness.controller.did_scroll(dragging(400));
    assert_eq!(harness.take_changes(), vec![(2, Some(1))]);
}

#[test]
fn native_swipe_then_glide_commits_once() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    for offset in (210..=400).step_by(10) {
        harness.controller.did_scroll(dragging(offset));
    }
    assert_eq!(harness.controller.did_scroll(gliding(400)), Some(Px(200)));
    assert!(!harness.controller.surface().is_dragging());
    assert_eq!(harness.controller.did_end_decelerating(), Some(Px(200)));

    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    assert_eq!(harness.visible(), Some(1));
    assert_eq!(harness.controller.phase(), GesturePhase::Idle);
}

#[test]
fn native_deceleration_past_threshold_reports_recentred_offset() {
    let mut harness = Harness::new(3, 0);
    harness.take_changes();

    harness.controller.did_scroll(dragging(320));
    assert_eq!(harness.controller.did_scroll(gliding(340)), None);
    assert_eq!(harness.controller.did_end_decelerating(), Some(Px(140)));

    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    // 140 sits inside the centre span, so the next report releases the latch.
    assert_eq!(harness.controller.did_scroll(gliding(140)), None);
    assert!(!harness.controller.is_awaiting_recenter());
    assert_eq!(harness.visible(), Some(1));
}

#[test]
fn switch_is_refused_while_dragging() {
    let mut harness = Harness::new(5, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    assert_eq!(
        harness.controller.try_switch_page(2),
        Err(SwitchPageError::Dragging)
    );
    harness.controller.switch_page(2);
    assert_eq!(harness.visible(), Some(0));

    harness.controller.end_drag(false);
    assert_eq!(harness.controller.try_switch_page(2), Ok(()));
    assert_eq!(harness.take_changes(), vec![(2, Some(0))]);
}

#[test]
fn switch_during_crossing_supersedes_revert() {
    let mut harness = Harness::new(5, 0);
    harness.take_changes();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(320));
    harness.controller.drag_to(Px(200));
    let mut revert = harness
        .controller
        .take_indicator_animation()
        .expect("revert started an animation");
    assert_eq!(revert.outcome(), None);

    harness.controller.end_drag(false);
    harness.controller.switch_page(2);

    assert_eq!(revert.outcome(), Some(AnimationOutcome::Superseded));
    assert_eq!(harness.take_changes(), vec![(2, Some(0))]);
    let bar = harness.controller.menu_bar();
    assert_eq!(bar.indicator(), bar.resting_rect(2));
    assert!(harness.controller.last_indicator_animation().is_some());
}

#[test]
fn reload_of_visible_page_reattaches_neighbours_silently() {
    let mut harness = Harness::new(5, 2);
    harness.take_changes();
    harness.take_events();

    harness.controller.reload_pages(2);

    let left = PxRect::new(Px::ZERO, Px::ZERO, Px(200), Px(400));
    let right = PxRect::new(Px(400), Px::ZERO, Px(200), Px(400));
    let events = harness.take_events();
    assert!(events.contains(&Event::Detached(1)));
    assert!(events.contains(&Event::Detached(3)));
    assert!(events.contains(&Event::Attached(1, left)));
    assert!(events.contains(&Event::Attached(3, right)));
    assert!(!events.iter().any(|event| matches!(
        event,
        Event::Attached(2, _) | Event::Detached(2)
    )));
    assert!(harness.take_changes().is_empty());
    assert_eq!(harness.slots(), [Some(1), Some(2), Some(3)]);
}

#[test]
fn out_of_range_commands_are_ignored() {
    let mut harness = Harness::new(5, 1);
    harness.take_changes();
    harness.take_events();

    assert_eq!(
        harness.controller.try_switch_page(9),
        Err(SwitchPageError::OutOfRange { index: 9, count: 5 })
    );
    harness.controller.reload_pages(5);
    harness.controller.load_pages(7);

    assert_eq!(harness.visible(), Some(1));
    assert!(harness.take_changes().is_empty());
    assert!(harness.take_events().is_empty());
}

#[test]
fn switch_before_first_load_reports_not_loaded() {
    let log = Log::default();
    let mut controller = PageController::new(PageControllerArgs::default());
    controller.set_pages(pages(3, &log));

    assert_eq!(
        controller.try_switch_page(1),
        Err(SwitchPageError::NotLoaded)
    );
    assert!(controller.window().is_empty());
}

#[test]
fn initialize_rejects_empty_bounds() {
    let mut controller = PageController::new(PageControllerArgs::default());
    let empty = PxRect::new(Px::ZERO, Px::ZERO, Px::ZERO, Px(100));
    assert_eq!(
        controller.initialize(empty),
        Err(InitializeError::EmptyBounds(empty))
    );
    assert!(!controller.is_initialized());
}

#[test]
fn single_page_only_fills_centre() {
    let mut harness = Harness::new(1, 0);
    assert_eq!(harness.slots(), [None, Some(0), None]);
    harness.take_changes();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(400));
    harness.controller.end_drag(false);

    assert_eq!(harness.visible(), Some(0));
    assert!(harness.take_changes().is_empty());
    assert_eq!(harness.controller.window().len(), 1);
}

#[test]
fn two_pages_never_attach_twice() {
    let mut harness = Harness::new(2, 0);
    assert_eq!(harness.slots(), [Some(1), Some(0), None]);
    harness.take_changes();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(250));
    assert_eq!(harness.slots(), [None, Some(0), Some(1)]);

    harness.controller.drag_to(Px(400));
    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    assert_eq!(harness.slots(), [Some(0), Some(1), None]);

    harness.controller.drag_to(Px(150));
    assert_eq!(harness.slots(), [Some(0), Some(1), None]);
    harness.controller.drag_to(Px(250));
    assert_eq!(harness.slots(), [None, Some(1), Some(0)]);

    let events = harness.take_events();
    let attached = attached_count(&events);
    let detached = events
        .iter()
        .filter(|event| matches!(event, Event::Detached(_)))
        .count();
    assert_eq!(attached - detached, 2);
    assert_eq!(harness.controller.window().len(), 2);
}

#[test]
fn two_pages_backward_drag_keeps_neighbour_on_the_left() {
    let mut harness = Harness::new(2, 0);
    harness.take_changes();
    harness.take_events();

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(60));
    let page1 = harness.controller.page_ref(1).expect("two pages");
    assert_eq!(
        harness.controller.phase(),
        GesturePhase::Crossing { to: page1 }
    );
    assert_eq!(harness.slots(), [Some(1), Some(0), None]);

    harness.controller.drag_to(Px(0));

    assert_eq!(harness.take_changes(), vec![(1, Some(0))]);
    assert_eq!(harness.slots(), [None, Some(1), Some(0)]);
    assert_eq!(harness.controller.window().len(), 2);
    let events = harness.take_events();
    assert_eq!(attached_count(&events), 0);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::Detached(_)))
    );
}

#[test]
fn set_pages_rebuilds_from_scratch() {
    let mut harness = Harness::new(3, 0);
    let old = harness.controller.page_ref(0).expect("three pages");
    harness.take_changes();
    harness.take_events();

    let log = Log::default();
    harness.controller.set_pages(pages(4, &log));

    let detached: Vec<_> = harness.take_events();
    assert_eq!(detached.len(), 3);
    assert!(
        detached
            .iter()
            .all(|event| matches!(event, Event::Detached(_)))
    );
    assert!(harness.controller.page(old.id).is_none());
    assert_eq!(harness.take_changes(), vec![(0, None)]);
    assert_eq!(harness.slots(), [Some(3), Some(0), Some(1)]);
    assert_eq!(attached_count(&log.lock()), 3);
    assert_eq!(
        harness.controller.menu_bar().titles(),
        ["Home", "Settings", "News", "Profile"]
    );
}

#[test]
fn empty_page_list_unloads_everything() {
    let mut harness = Harness::new(3, 1);
    harness.controller.set_pages(Vec::new());

    assert_eq!(harness.visible(), None);
    assert!(harness.controller.window().is_empty());
    assert_eq!(harness.controller.menu_bar().indicator(), None);
    assert_eq!(
        harness.controller.try_switch_page(0),
        Err(SwitchPageError::OutOfRange { index: 0, count: 0 })
    );

    harness.controller.begin_drag();
    harness.controller.drag_to(Px(400));
    assert_eq!(harness.visible(), None);
}

#[test]
fn missing_title_measures_as_empty() {
    let mut controller = PageController::new(PageControllerArgs::default());
    controller.set_pages(vec![
        Box::new(crate::page::TitledPage::untitled()) as Box<dyn Page>,
        Box::new(crate::page::TitledPage::new("Next")),
    ]);
    controller.initialize(bounds()).expect("bounds have an area");

    let indicator = controller
        .menu_bar()
        .indicator()
        .expect("first load sizes the indicator");
    assert_eq!(indicator.width, Px(8));
    assert_eq!(indicator.x, Px(96));
}

#[test]
fn tapping_a_title_switches_page() {
    let mut harness = Harness::new(5, 2);
    harness.take_changes();

    let tapped = harness
        .controller
        .tap_menu_bar(PxPosition::new(Px(20), Px(10)));

    assert_eq!(tapped, Some(1));
    assert_eq!(harness.visible(), Some(1));
    assert_eq!(harness.take_changes(), vec![(1, Some(2))]);
    assert_eq!(
        harness
            .controller
            .tap_menu_bar(PxPosition::new(Px(20), Px(100))),
        None
    );
}

#[test]
fn set_bounds_relayouts_window_and_indicator() {
    let mut harness = Harness::new(3, 0);
    harness.controller.begin_drag();
    harness.controller.drag_to(Px(330));
    harness.take_events();

    harness
        .controller
        .set_bounds(PxRect::new(Px::ZERO, Px::ZERO, Px(300), Px(544)));

    let controller = &harness.controller;
    assert_eq!(controller.surface().content_offset(), Px(300));
    assert_eq!(controller.phase(), GesturePhase::Idle);
    let centre = PxRect::new(Px(300), Px::ZERO, Px(300), Px(500));
    assert_eq!(
        controller
            .window()
            .entry_in(Slot::Center)
            .map(|entry| entry.frame),
        Some(centre)
    );
    assert!(harness.take_events().contains(&Event::Laid(0, centre)));
    assert_eq!(
        controller.menu_bar().indicator(),
        controller.menu_bar().resting_rect(0)
    );
}
