use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use indoc::indoc;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Color;

use overlay_host::components::{Component, DocumentView, StatusBar};
use overlay_host::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use overlay_host::drivers::{InputDriver, OutputDriver};
use overlay_host::event_loop::{ControlFlow, EventLoop};
use overlay_host::overlay::ContentContainer;
use overlay_host::{
    Document, Event, EventKind, Listener, OverlayError, OverlayHost, Phase, Renderer, tracing_sub,
};

const PAGE_TEXT: &str = indoc! {"
    The panel below mounts an overlay host. While closed it takes no space;
    while open it is moved to the top of the document and drawn over it.
    Space or o toggles it. Click outside the box or press Escape to dismiss.
"};

const AFTER_HELP: &str = indoc! {"
    Keys:
      Space, o   toggle the overlay
      Escape     dismiss the overlay
      Ctrl+Q     quit

    Logging is off unless --log-file is given.
"};

#[derive(Parser, Debug)]
#[command(name = "overlay-host", version, about, after_help = AFTER_HELP)]
struct Args {
    /// Start with the overlay open.
    #[arg(long)]
    open: bool,

    /// Dim the page behind the open overlay.
    #[arg(long)]
    backdrop: bool,

    /// Append debug logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Input poll interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    poll_ms: u64,
}

/// Owner handed to the renderer; counts how often content was produced.
#[derive(Debug, Default)]
struct DemoOwner {
    renders: Cell<usize>,
}

fn render_content(owner: &DemoOwner, document: &Document, container: ContentContainer) {
    let n = owner.renders.get() + 1;
    owner.renders.set(n);
    let text = format!("Rendered {n} time(s) into the same container.\nClick outside or press Escape.");
    if let Err(err) = document.set_text(container.node(), text) {
        tracing::warn!(%err, "could not write overlay content");
    }
}

struct App {
    host: OverlayHost,
    view: DocumentView,
    status: StatusBar,
    dismissals: Rc<RefCell<VecDeque<EventKind>>>,
}

impl App {
    fn new(args: &Args) -> Result<Self, OverlayError> {
        let document = Document::new();
        let body = document.body();

        let title = document.create_element("h1");
        document.set_text(title, "overlay-host")?;
        document.append_child(body, title)?;
        let intro = document.create_element("p");
        document.set_text(intro, PAGE_TEXT)?;
        document.append_child(body, intro)?;

        let panel = document.create_element("section");
        document.append_child(body, panel)?;
        let before = document.create_element("p");
        document.set_text(before, "[panel] content above the host")?;
        document.append_child(panel, before)?;
        let mut host = OverlayHost::new(&document);
        document.append_child(panel, host.node())?;
        let after = document.create_element("p");
        document.set_text(after, "[panel] content below the host")?;
        document.append_child(panel, after)?;

        host.first_updated();
        host.set_with_backdrop(args.backdrop)?;
        host.set_owner(Rc::new(DemoOwner::default()));
        host.set_renderer(Some(Renderer::new(render_content)));

        // Closing from inside dispatch would re-enter the host, so the
        // listener only records the request.
        let dismissals = Rc::new(RefCell::new(VecDeque::new()));
        let listener = Listener::new({
            let dismissals = dismissals.clone();
            move |event: &Event| dismissals.borrow_mut().push_back(event.kind())
        });
        for kind in [EventKind::OutsideClick, EventKind::EscapePress] {
            document.add_event_listener(host.node(), kind, Phase::Bubble, &listener);
        }

        let mut view = DocumentView::new(document);
        view.chrome_mut().set_title(" overlay ");
        view.chrome_mut().set_bg(Color::Reset);

        let status = StatusBar::new("Space/o toggle  Esc dismiss  Ctrl+Q quit");

        let mut app = Self {
            host,
            view,
            status,
            dismissals,
        };
        if args.open {
            app.host.set_opened(true)?;
        }
        Ok(app)
    }

    fn toggle(&mut self) -> Result<(), OverlayError> {
        let next = !self.host.opened();
        self.host.set_opened(next)?;
        Ok(())
    }

    fn drain_dismissals(&mut self) -> Result<(), OverlayError> {
        loop {
            let Some(kind) = self.dismissals.borrow_mut().pop_front() else {
                return Ok(());
            };
            tracing::info!(%kind, "dismissal requested");
            if self.host.opened() {
                self.host.set_opened(false)?;
            }
        }
    }

    fn draw<O: OutputDriver>(&mut self, output: &mut O) -> io::Result<()> {
        self.status.update(self.host.opened(), self.host.stats());
        output.draw(|mut frame| {
            let [page, bar] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
            self.view.render(&mut frame, page);
            self.status.render(&mut frame, bar);
        })
    }

    fn handle(&mut self, event: &TermEvent) -> Result<ControlFlow, OverlayError> {
        if let TermEvent::Key(key) = event
            && key.kind != KeyEventKind::Release
        {
            if is_quit(key) {
                return Ok(ControlFlow::Quit);
            }
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Char('o')) {
                self.toggle()?;
                return Ok(ControlFlow::Continue);
            }
        }
        self.view.handle_event(event);
        self.drain_dismissals()?;
        Ok(ControlFlow::Continue)
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        tracing_sub::init_default(Some(path))?;
    }
    let mut app = App::new(&args).map_err(io::Error::other)?;

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(
        ConsoleInputDriver::new(),
        Duration::from_millis(args.poll_ms),
    );
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_driver, event| match event {
        None => app.draw(&mut output).map(|_| ControlFlow::Continue),
        Some(event) => app.handle(&event).map_err(io::Error::other),
    });

    let _ = event_loop.driver().set_mouse_capture(false);
    output.exit()?;
    result
}
