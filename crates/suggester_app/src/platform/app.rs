use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use rand::rngs::ThreadRng;
use suggester_core::{render_results, update, AmbientAnimator, AppState, Mount, Msg};
use suggester_logging::{suggester_debug, suggester_info, suggester_trace, suggester_warn};

use super::config::{self, AppConfig, OutputFormat};
use super::effects::EffectRunner;
use super::logging;
use super::ui;

/// Inputs to the host loop. Producer threads only send these; all state lives
/// on the loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    IdentifierEntered(Option<String>),
    Tick,
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let config = config::load(&config_path)?;
    logging::initialize(config.log_destination, config.log_level);
    suggester_info!("Using config {:?}: {:?}", config_path, config);

    let runner = EffectRunner::new(config.lookup_settings())
        .context("failed to start lookup engine")?;

    let (event_tx, event_rx) = mpsc::channel::<HostEvent>();
    spawn_input_reader(event_tx.clone());
    spawn_ticker(event_tx, config.tick_interval());

    let mut host = Host::new(runner, &config, io::stdout());
    while let Ok(event) = event_rx.recv() {
        if host.handle(event)? == Flow::Exit {
            break;
        }
    }
    suggester_info!("Input closed and no lookup pending; exiting");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || read_identifiers(io::stdin().lock(), &event_tx));
}

/// Each input line is one submission; an empty line counts as missing input.
/// Bytes that are not UTF-8 are replaced rather than ending input; only an
/// I/O error or end of input sends `InputClosed`.
fn read_identifiers<R: BufRead>(mut reader: R, event_tx: &mpsc::Sender<HostEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                suggester_warn!("Reading input failed: {}", err);
                break;
            }
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(line) => line,
            Err(err) => {
                suggester_warn!("Input line is not valid UTF-8; invalid bytes replaced");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        if event_tx.send(HostEvent::IdentifierEntered(Some(line))).is_err() {
            return;
        }
    }
    let _ = event_tx.send(HostEvent::InputClosed);
}

fn spawn_ticker(event_tx: mpsc::Sender<HostEvent>, interval: Duration) {
    thread::spawn(move || {
        while event_tx.send(HostEvent::Tick).is_ok() {
            thread::sleep(interval);
        }
    });
}

/// Owns the panel state, its mount and the animator; single-threaded.
struct Host<W: Write> {
    state: AppState,
    results: Mount,
    animator: AmbientAnimator,
    runner: EffectRunner,
    rng: ThreadRng,
    output: OutputFormat,
    out: W,
    last_printed: Option<String>,
    started: Instant,
    last_tick: Instant,
    frame: u64,
    input_closed: bool,
}

impl<W: Write> Host<W> {
    fn new(runner: EffectRunner, config: &AppConfig, out: W) -> Self {
        let now = Instant::now();
        Self {
            state: AppState::new(),
            results: Mount::new(),
            animator: AmbientAnimator::start(config.canvas_bounds()),
            runner,
            rng: rand::rng(),
            output: config.output,
            out,
            last_printed: None,
            started: now,
            last_tick: now,
            frame: 0,
            input_closed: false,
        }
    }

    fn handle(&mut self, event: HostEvent) -> io::Result<Flow> {
        match event {
            HostEvent::IdentifierEntered(identifier) => {
                self.dispatch(Msg::SuggestionsRequested { identifier })?;
            }
            HostEvent::Tick => self.tick()?,
            HostEvent::InputClosed => self.input_closed = true,
        }

        if self.input_closed && !self.state.view().is_loading() {
            Ok(Flow::Exit)
        } else {
            Ok(Flow::Continue)
        }
    }

    fn tick(&mut self) -> io::Result<()> {
        self.frame += 1;
        suggester_logging::set_frame(self.frame);

        for msg in self.runner.drain() {
            self.dispatch(msg)?;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.dispatch(Msg::Tick { elapsed })?;

        let report = self
            .animator
            .advance_to(now.duration_since(self.started), &mut self.rng);
        if report.spawned > 0 || report.retired > 0 {
            suggester_trace!(
                "ambient spawned={} retired={} live={}",
                report.spawned,
                report.retired,
                self.animator.live_count()
            );
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            // Destroy-then-build: the whole subtree is swapped on every change.
            let view = self.state.view();
            self.results.replace(render_results(&view.results));
            self.print()?;
        }
        Ok(())
    }

    /// Writes the results area when its visible content changed. Fade-in
    /// steps alone do not change the text form, so they print nothing.
    fn print(&mut self) -> io::Result<()> {
        let text = ui::render::describe(self.results.current());
        if self.last_printed.as_deref() == Some(text.as_str()) {
            return Ok(());
        }
        suggester_debug!("Results area changed ({} bytes)", text.len());

        match self.output {
            OutputFormat::Text => writeln!(self.out, "{text}\n")?,
            OutputFormat::Html => {
                let page = ui::layout::page(&self.results, self.animator.render_canvas());
                writeln!(self.out, "{}", page.to_html())?;
            }
        }
        self.out.flush()?;
        self.last_printed = Some(text);
        Ok(())
    }
}
