//! Terminal host: drives a [`Document`] with the wall clock and routes input
//! to the shell.
//!
//! One terminal cell is one document pixel. The bottom row is reserved for
//! the status bar; the rest of the terminal is the document viewport.

mod input;
mod render;
mod screen;
mod terminal;

use std::time::Instant;

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, info, trace, warn};
use perchdom::{Document, ElementId, Platform, Rect};
use tokio::time::{MissedTickBehavior, sleep_until};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::shell::Shell;

use self::input::Action;
use self::terminal::TerminalGuard;

pub const TRIGGER_CLASS: &str = "trigger";

/// Rows below the viewport used by host chrome.
const STATUS_ROWS: u16 = 1;

/// Run the demo until the user quits.
pub async fn run(config: DemoConfig) -> Result<(), DemoError> {
    let mut terminal = TerminalGuard::new()?;
    let mut host = Host::new(config, terminal.size())?;
    let result = host.run_loop(&mut terminal).await;
    host.shutdown();
    result
}

/// Sleep until the deadline, or forever if there is none.
///
/// This is used as a conditional branch in tokio::select!
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

fn viewport_size(config: &DemoConfig, (width, height): (u16, u16)) -> (f64, f64, f64) {
    let rows = height.saturating_sub(STATUS_ROWS).max(1);
    let page = rows.saturating_mul(config.page_screens.max(1));
    (f64::from(width), f64::from(rows), f64::from(page))
}

struct Host {
    config: DemoConfig,
    doc: Document,
    shell: Shell,
    trigger: ElementId,
    started: Instant,
    /// Overlay whose list is scrolled by `list_offset`.
    list_overlay: Option<ElementId>,
    /// First option row shown in the overlay.
    list_offset: usize,
}

impl Host {
    fn new(config: DemoConfig, size: (u16, u16)) -> Result<Self, DemoError> {
        let (width, height, page_height) = viewport_size(&config, size);
        let mut doc = Document::new(width, height).with_page_size(width, page_height);
        let mut shell = Shell::new(config.overlay());
        shell.reposition(config.alignment);

        let trigger = doc.create_element(TRIGGER_CLASS);
        doc.append_to_body(trigger)?;

        let mut host = Self {
            config,
            doc,
            shell,
            trigger,
            started: Instant::now(),
            list_overlay: None,
            list_offset: 0,
        };
        host.layout_trigger()?;
        host.shell.mount(&mut host.doc, host.trigger);
        info!(
            "Host: viewport {}x{}, page height {}, trigger {}",
            width, height, page_height, trigger
        );
        Ok(host)
    }

    async fn run_loop(&mut self, terminal: &mut TerminalGuard) -> Result<(), DemoError> {
        let mut events = EventStream::new();
        let mut animation_interval = tokio::time::interval(self.config.frame_duration());
        animation_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            self.settle();
            render::draw(
                terminal.screen()?,
                &self.doc,
                &self.shell,
                self.list_offset,
            );
            terminal.flush()?;

            let next_deadline = self.doc.next_deadline().map(|at| self.started + at);
            let animating = self.doc.is_animating() || self.doc.pending_frames() > 0;

            let action = tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        trace!("Crossterm event: {:?}", event);
                        input::map_event(event)
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => Some(Action::Quit),
                },
                _ = sleep_until_optional(next_deadline) => None,
                _ = animation_interval.tick(), if animating => None,
            };

            let Some(action) = action else { continue };
            if action == Action::Quit {
                info!("Host: quit requested");
                return Ok(());
            }
            self.settle();
            self.apply(action)?;
        }
    }

    /// Catch the document up with the wall clock and deliver everything it
    /// queued until no signals remain.
    fn settle(&mut self) {
        self.doc.advance_to(self.started.elapsed());
        let frames = self.doc.run_frame();
        if frames > 0 {
            trace!("Host: ran {} frame callbacks", frames);
        }

        while self.doc.has_pending_signals() {
            for signal in self.doc.take_signals() {
                if !self.shell.handle(&mut self.doc, signal) {
                    trace!("Host: stale signal {:?}", signal);
                }
            }
        }

        let label = [self.shell.select().label().to_string()];
        if self.doc.content(self.trigger) != Some(&label[..])
            && let Err(e) = self.doc.set_content(self.trigger, &label)
        {
            warn!("Host: could not update trigger label: {}", e);
        }
        self.sync_list();
    }

    /// A new overlay starts at the top of its list.
    fn sync_list(&mut self) {
        let overlay = self.shell.select().dropdown().overlay();
        if overlay != self.list_overlay {
            self.list_overlay = overlay;
            self.list_offset = 0;
        }
    }

    fn apply(&mut self, action: Action) -> Result<(), DemoError> {
        debug!("Host: {:?}", action);
        match action {
            Action::Toggle => self.shell.toggle(&mut self.doc),
            Action::Close => self.shell.close(&mut self.doc),
            Action::Click { x, y } => self.click(x, y)?,
            Action::Wheel { x, y, rows } => self.wheel(x, y, rows)?,
            Action::Scroll(rows) => self.doc.scroll_by(0.0, rows),
            Action::ScrollPages(pages) => {
                let height = self.doc.viewport().height;
                self.doc.scroll_by(0.0, pages * height);
            }
            Action::ScrollHome => self.doc.scroll_to(0.0, 0.0),
            Action::ScrollEnd => self.doc.scroll_to(0.0, f64::MAX),
            Action::Reposition(alignment) => {
                self.shell.reposition(alignment);
                self.layout_trigger()?;
            }
            Action::Resize { width, height } => {
                let (width, height, page_height) = viewport_size(&self.config, (width, height));
                self.doc.resize(width, height);
                self.doc.set_page_size(width, page_height);
                self.layout_trigger()?;
            }
            Action::Quit => {}
        }
        Ok(())
    }

    fn click(&mut self, x: u16, y: u16) -> Result<(), DemoError> {
        let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let Some(target) = self.doc.hit_test(px, py) else {
            return Ok(());
        };

        if target == self.trigger {
            self.shell.toggle(&mut self.doc);
        } else if Some(target) == self.shell.select().dropdown().overlay() {
            let rect = self.doc.bounding_rect(target)?;
            self.sync_list();
            let row = self.list_offset + (py - rect.y).floor() as usize;
            if let Err(e) = self.shell.choose(&mut self.doc, row) {
                warn!("Host: click on overlay row {}: {}", row, e);
            }
        }
        Ok(())
    }

    /// The wheel scrolls the option list when over the overlay, the page
    /// otherwise.
    fn wheel(&mut self, x: u16, y: u16, rows: i32) -> Result<(), DemoError> {
        let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let overlay = self.shell.select().dropdown().overlay();
        match overlay {
            Some(overlay) if self.doc.hit_test(px, py) == Some(overlay) => {
                self.scroll_list(overlay, rows)
            }
            _ => {
                self.doc.scroll_by(0.0, f64::from(rows));
                Ok(())
            }
        }
    }

    fn scroll_list(&mut self, overlay: ElementId, rows: i32) -> Result<(), DemoError> {
        self.sync_list();
        let visible = self.doc.bounding_rect(overlay)?.height.max(0.0).round() as usize;
        let len = self.doc.content(overlay).map_or(0, |lines| lines.len());
        let max = len.saturating_sub(visible);
        self.list_offset = self
            .list_offset
            .saturating_add_signed(rows as isize)
            .min(max);
        trace!("Host: list offset {} of {}", self.list_offset, max);
        Ok(())
    }

    /// Place the trigger in the first screen of the page for the current
    /// alignment.
    fn layout_trigger(&mut self) -> Result<(), DemoError> {
        let viewport = self.doc.viewport();
        let area = Rect::from_size(viewport.width, viewport.height);
        let rect = self.shell.trigger_rect(area);
        debug!(
            "Host: trigger at ({}, {}) for {}",
            rect.x,
            rect.y,
            self.shell.menu_class()
        );
        self.doc.set_layout(self.trigger, rect)?;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.shell.dispose(&mut self.doc);
        info!(
            "Host: disposed after {:.1}s, {} timers left",
            self.started.elapsed().as_secs_f64(),
            self.doc.timer_count()
        );
    }
}
