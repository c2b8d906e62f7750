//! Scripted paging session against an in-memory host.
//!
//! Builds a page controller, replays a few drags, a tab tap and a
//! programmatic switch, and logs what the host would have to draw after
//! each step. Run with `RUST_LOG=pagemenu_components=trace` for every
//! attach and detach.
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use pagemenu_components::{
    MenuBarStyle, Page, PageController, PageControllerArgs, PageRef, Slot,
};
use pagemenu_ui::{Dp, Px, PxPosition, PxRect, dp, logging};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Style {
    Carousel,
    Fixed,
}

impl From<Style> for MenuBarStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Carousel => MenuBarStyle::Carousel,
            Style::Fixed => MenuBarStyle::Fixed,
        }
    }
}

#[derive(Parser)]
#[command(name = "example")]
#[command(version, about = "Replays a scripted drag session on a page controller", long_about = None)]
struct Cli {
    /// Number of pages
    #[arg(short, long, default_value_t = 5)]
    pages: usize,
    /// Page shown first
    #[arg(short, long, default_value_t = 0)]
    start: usize,
    /// Host width in pixels
    #[arg(long, default_value_t = 360)]
    width: i32,
    /// Host height in pixels
    #[arg(long, default_value_t = 640)]
    height: i32,
    /// Display scale factor applied to dp values
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Menu bar layout
    #[arg(long, value_enum, default_value_t = Style::Carousel)]
    style: Style,
    /// Log every controller transition
    #[arg(short, long)]
    verbose: bool,
}

struct DemoPage {
    title: String,
}

impl Page for DemoPage {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn did_attach(&mut self, frame: PxRect) {
        info!(title = %self.title, x = frame.x.raw(), "page attached");
    }

    fn did_detach(&mut self) {
        info!(title = %self.title, "page detached");
    }
}

/// Drives animations with a synthetic clock so the demo runs instantly.
struct Clock {
    now: Instant,
}

impl Clock {
    fn settle(&mut self, controller: &mut PageController) {
        controller.tick(self.now);
        self.now += controller.args().animation_duration + Duration::from_millis(16);
        controller.tick(self.now);
    }
}

fn report(step: &str, controller: &PageController) {
    let slot = |slot| {
        controller
            .window()
            .page_in(slot)
            .map(|page: PageRef| page.index)
    };
    let titles: Vec<_> = controller
        .menu_bar()
        .title_frames()
        .iter()
        .map(|title| title.title.to_owned())
        .collect();
    info!(
        step,
        visible = controller.visible_page().map(|page| page.index),
        left = slot(Slot::Left),
        center = slot(Slot::Center),
        right = slot(Slot::Right),
        offset = controller.surface().content_offset().raw(),
        indicator = ?controller.menu_bar().presentation(),
        ?titles,
        "state"
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let directive = if cli.verbose {
        "error,pagemenu_components=trace,example=info"
    } else {
        "error,pagemenu_components=info,example=info"
    };
    logging::init_tracing_with_default(directive);

    if cli.pages == 0 {
        bail!("at least one page is required");
    }
    if !(cli.scale.is_finite() && cli.scale > 0.0) {
        bail!("scale factor must be positive, got {}", cli.scale);
    }
    dp::set_scale_factor(cli.scale);

    let args = PageControllerArgs::default()
        .initial_page(cli.start)
        .menu_bar_height(Dp(44.0))
        .menu_bar_style(cli.style.into());
    let mut controller = PageController::new(args).with_delegate(
        |page: PageRef, previous: Option<PageRef>| {
            info!(
                page = page.index,
                previous = previous.map(|page| page.index),
                "visible page changed"
            );
        },
    );
    controller.set_pages(
        (0..cli.pages)
            .map(|index| {
                Box::new(DemoPage {
                    title: format!("Page {index}"),
                }) as Box<dyn Page>
            })
            .collect(),
    );
    controller
        .initialize(PxRect::new(
            Px::ZERO,
            Px::ZERO,
            Px(cli.width),
            Px(cli.height),
        ))
        .context("host geometry")?;
    report("initialized", &controller);

    let width = controller.surface().width();
    let step = (width / 8).max(Px(1));
    let mut clock = Clock {
        now: Instant::now(),
    };

    // A full swipe to the next page.
    controller.begin_drag();
    for _ in 0..8 {
        controller.drag_by(step);
    }
    controller.end_drag(false);
    clock.settle(&mut controller);
    report("swiped forward", &controller);

    // Past the threshold and back again.
    controller.begin_drag();
    for _ in 0..5 {
        controller.drag_by(step);
    }
    report("crossing", &controller);
    for _ in 0..5 {
        controller.drag_by(-step);
    }
    controller.end_drag(false);
    clock.settle(&mut controller);
    report("reverted", &controller);

    // Released past the threshold, glides onto the previous page.
    controller.begin_drag();
    for _ in 0..5 {
        controller.drag_by(-step);
    }
    controller.end_drag(true);
    controller.end_decelerating();
    clock.settle(&mut controller);
    report("flung backward", &controller);

    let bar = controller.menu_bar_frame();
    let tap = PxPosition::new(bar.x + bar.width / 6, bar.y + bar.height / 2);
    if let Some(index) = controller.tap_menu_bar(tap) {
        clock.settle(&mut controller);
        report(&format!("tapped title {index}"), &controller);
    }

    let target = cli.pages - 1;
    controller
        .try_switch_page(target)
        .with_context(|| format!("switching to page {target}"))?;
    clock.settle(&mut controller);
    report("switched to last page", &controller);

    Ok(())
}
