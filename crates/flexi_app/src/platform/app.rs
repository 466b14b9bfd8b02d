use std::borrow::Cow;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use base64::prelude::*;
use flexi_core::{update, AppState, Msg};
use flexi_engine::EngineSettings;
use flexi_logging::{flexi_info, flexi_warn};

use super::effects::EffectRunner;
use super::ui::command::{parse_command, Command, HELP};
use super::ui::render::render;

/// How often the loop wakes up when stdin is quiet.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(settings: EngineSettings) -> anyhow::Result<()> {
    let runner = EffectRunner::new(settings)?;
    let (line_tx, line_rx) = mpsc::channel::<String>();

    thread::spawn(move || forward_lines(io::stdin().lock(), &line_tx));

    let mut app = App::new(runner, io::stdout());
    app.start()?;

    loop {
        app.pump_engine()?;
        match line_rx.recv_timeout(TICK_INTERVAL) {
            Ok(line) => {
                if app.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => app.dispatch(Msg::Tick)?,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // stdin closed: let a scripted submission finish before leaving.
                app.wait_for_pending()?;
                break;
            }
        }
    }

    flexi_info!("FlexiConnect playground exiting");
    Ok(())
}

/// Sends each line of `reader` to `line_tx` until EOF, a read error, or the
/// receiver going away. Bytes that are not UTF-8 are replaced, not fatal.
fn forward_lines<R: BufRead>(mut reader: R, line_tx: &mpsc::Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                flexi_warn!("Stopped reading stdin: {}", err);
                break;
            }
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        let line = match String::from_utf8_lossy(&buf) {
            Cow::Borrowed(line) => line.to_string(),
            Cow::Owned(line) => {
                flexi_warn!("Input line was not valid UTF-8; invalid bytes replaced");
                line
            }
        };
        if line_tx.send(line).is_err() {
            break;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Single-threaded front end: owns the state, applies messages, runs
/// effects and redraws after every state change.
pub(crate) struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> App<W> {
    pub(crate) fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    pub(crate) fn start(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}\n")?;
        self.redraw()
    }

    #[cfg(test)]
    fn state(&self) -> &AppState {
        &self.state
    }

    pub(crate) fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.redraw()?;
        }
        Ok(())
    }

    pub(crate) fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Select(view) => self.dispatch(Msg::ViewSelected(view))?,
            Command::Input(text) => self.dispatch(Msg::InputChanged(text))?,
            Command::Load(path) => match fs::read(&path) {
                Ok(bytes) => {
                    flexi_info!("Loaded {} bytes from {:?}", bytes.len(), path);
                    self.dispatch(Msg::InputChanged(BASE64_STANDARD.encode(bytes)))?;
                }
                Err(err) => {
                    flexi_warn!("Failed to read {:?}: {}", path, err);
                    writeln!(self.out, "Could not read {}: {err}", path.display())?;
                }
            },
            Command::Submit => self.dispatch(Msg::Submitted)?,
            Command::Show => self.redraw()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Applies every engine message that is already waiting.
    pub(crate) fn pump_engine(&mut self) -> io::Result<()> {
        while let Some(msg) = self.runner.try_next_msg() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    /// Blocks until the mounted panel has no request in flight.
    pub(crate) fn wait_for_pending(&mut self) -> io::Result<()> {
        while self.state.panel().outcome().pending_request().is_some() {
            if let Some(msg) = self.runner.next_msg_timeout(TICK_INTERVAL) {
                self.dispatch(msg)?;
            }
        }
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        let text = render(&self.state.view());
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}
