#![forbid(unsafe_code)]

//! panesplit terminal playground.
//!
//! Every pane is a coloured tile. Press in a pane corner and drag inward to
//! split; keep dragging to size the new pane. Drag the top-left corner
//! outward to see the collapse hint, release to confirm it.
//!
//! # Running
//!
//! ```sh
//! PANESPLIT_LOG=panesplit.log cargo run -p panesplit-demo
//! ```
//!
//! `PANESPLIT_LOG` names a file for structured logs; `RUST_LOG` filters them
//! (default `debug`).
//!
//! # Controls
//!
//! - Mouse: corner gestures and separator drags
//! - u: collapse the parent of the hovered pane
//! - q / Esc / Ctrl+C: quit

mod buffer;
mod session;

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use panesplit::prelude::*;
use panesplit::ViewResponse;
use tracing_subscriber::EnvFilter;

use crate::buffer::CellBuffer;
use crate::session::Session;

const PALETTE: [Rgba; 6] = [
    Rgba::rgb(0x2e, 0x34, 0x40),
    Rgba::rgb(0x3b, 0x42, 0x52),
    Rgba::rgb(0x5e, 0x81, 0xac),
    Rgba::rgb(0x8f, 0xbc, 0xbb),
    Rgba::rgb(0xa3, 0xbe, 0x8c),
    Rgba::rgb(0xb4, 0x8e, 0xad),
];

/// Pane content: a solid tile.
#[derive(Debug, Clone, Copy)]
struct Tile {
    color: Rgba,
    area: Rect,
}

impl Tile {
    const fn new(color: Rgba) -> Self {
        Self {
            color,
            area: Rect::new(0, 0, 0, 0),
        }
    }
}

impl Payload for Tile {
    fn render(&self, surface: &mut dyn RenderSurface, rect: Rect) {
        surface.fill_rect(rect, self.color);
    }

    fn on_layout_changed(&mut self, rect: Rect) {
        self.area = rect;
    }
}

/// Terminal-side half of the host contract.
///
/// Terminals cannot change the mouse pointer, so the shape is only shown in
/// the status line.
#[derive(Debug, Default)]
struct TerminalHost {
    pointer: Option<Point>,
    buttons: PointerButtons,
    dirty: bool,
    cursor: CursorShape,
}

impl TerminalHost {
    fn observe(&mut self, event: &PaneEvent) {
        match *event {
            PaneEvent::Pressed { button, .. } => self.buttons.insert(PointerButtons::from(button)),
            PaneEvent::Released { button, .. } => self.buttons.remove(PointerButtons::from(button)),
            PaneEvent::HoverLeave => {
                self.pointer = None;
                self.buttons = PointerButtons::NONE;
            }
            _ => {}
        }
        if let Some(point) = event.position() {
            self.pointer = Some(point);
        }
    }
}

impl PaneHost for TerminalHost {
    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    fn pointer_buttons(&self) -> PointerButtons {
        self.buttons
    }

    fn request_repaint(&mut self, _rect: Rect) {
        self.dirty = true;
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.cursor = shape;
    }
}

fn init_logging() {
    let Ok(path) = std::env::var("PANESPLIT_LOG") else {
        return;
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("panesplit-demo: cannot open log file {path}: {err}");
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn status_line(view: &SplitView<Tile>, host: &TerminalHost) -> String {
    let hovered = view
        .hovered_leaf()
        .and_then(|id| view.payload(id).map(|tile| (id, tile.area)))
        .map_or_else(
            || "-".to_owned(),
            |(id, area)| format!("{id} {}x{}", area.width, area.height),
        );
    format!(
        " panes: {}  depth: {}  hover: {hovered}  cursor: {:?}  [u] collapse  [q] quit",
        view.tree().leaf_count(),
        view.tree().depth(),
        host.cursor,
    )
}

fn report(response: &ViewResponse<Tile>) {
    if let Some(split) = &response.split {
        tracing::info!(
            node = split.node.get(),
            new_leaf = split.new_leaf.get(),
            axis = ?split.axis,
            "pane split"
        );
    }
    if let Some(unsplit) = &response.unsplit {
        tracing::info!(
            node = unsplit.node.get(),
            discarded = unsplit.discarded.len(),
            "pane collapsed"
        );
    }
    if let Some(leaf) = response.unsplit_requested {
        tracing::debug!(leaf = leaf.get(), "collapse hint released");
    }
    if let Some(err) = &response.absorbed {
        tracing::debug!(%err, "structural request absorbed");
    }
}

fn run() -> Result<()> {
    let session = Session::new()?;
    let (width, height) = session.size()?;
    let area = Rect::from_size(width, height.saturating_sub(1));

    let mut next = 1;
    let factory = move || {
        let tile = Tile::new(PALETTE[next % PALETTE.len()]);
        next += 1;
        tile
    };
    let gesture = GestureConfig {
        confirm_unsplit_on_release: true,
        ..GestureConfig::with_corner_size(3)?
    };
    let mut view =
        SplitView::with_config(area, Tile::new(PALETTE[0]), factory, SplitConfig::default(), gesture)?;
    let mut host = TerminalHost {
        dirty: true,
        ..TerminalHost::default()
    };
    let mut buffer = CellBuffer::new(width, height);
    let mut stdout = io::stdout();

    loop {
        if host.dirty {
            buffer.clear();
            view.render(&mut buffer);
            buffer.flush(&mut stdout, &status_line(&view, &host))?;
            host.dirty = false;
        }

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let raw = event::read()?;
        if let Event::Key(key) = &raw
            && key.kind == KeyEventKind::Press
        {
            if is_quit(key) {
                break;
            }
            if key.code == KeyCode::Char('u')
                && let Some(leaf) = view.hovered_leaf()
            {
                match view.unsplit_parent_of(leaf, &mut host) {
                    Ok(outcome) => tracing::info!(node = outcome.node.get(), "pane collapsed"),
                    Err(err) if err.is_benign() => {}
                    Err(err) => return Err(err.into()),
                }
            }
            continue;
        }

        let Some(mut pane_event) = PaneEvent::from_crossterm(&raw) else {
            continue;
        };
        if let PaneEvent::Resized(rect) = pane_event {
            buffer.resize(rect.width, rect.height);
            pane_event = PaneEvent::Resized(Rect::from_size(
                rect.width,
                rect.height.saturating_sub(1),
            ));
        }
        host.observe(&pane_event);
        let response = view.handle_event(pane_event, &mut host);
        report(&response);
        // The status line tracks hover and cursor changes as well.
        host.dirty = true;
    }

    drop(session);
    Ok(())
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("panesplit-demo: {err}");
        std::process::exit(1);
    }
}
