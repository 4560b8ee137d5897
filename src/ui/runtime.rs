use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use atsel_store::Clipboard;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use crate::session::{SelectionSession, SessionOutcome};

use super::Dialog;

/// Longest wait for input when no debounce deadline is pending.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Take over the terminal and drive `session` until it closes.
///
/// Text copied by menu actions lands in `clipboard`; flush it after this
/// returns so the escape reaches the restored screen.
pub fn run(
    session: &mut SelectionSession<'_>,
    clipboard: &mut dyn Clipboard,
) -> Result<SessionOutcome> {
    let mut dialog = Dialog::new(session);
    dialog.run(clipboard)
}

impl Dialog<'_, '_> {
    fn run(&mut self, clipboard: &mut dyn Clipboard) -> Result<SessionOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;
        self.sync_table();

        let (event_tx, event_rx) = mpsc::channel();
        let event_loop_running = Arc::new(AtomicBool::new(true));
        let event_loop_flag = Arc::clone(&event_loop_running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while event_loop_flag.load(Ordering::Relaxed) {
                if event::poll(Duration::from_millis(50))? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let result: Result<SessionOutcome> = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }

            let wait = self.session.next_deadline().map_or(IDLE_WAIT, |deadline| {
                deadline.saturating_duration_since(Instant::now()).min(IDLE_WAIT)
            });
            let outcome = match event_rx.recv_timeout(wait) {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key, Instant::now(), clipboard)
                }
                Ok(_) | Err(mpsc::RecvTimeoutError::Timeout) => None,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    break Err(anyhow!("input event channel disconnected"));
                }
            };

            if let Some(outcome) = outcome {
                break Ok(outcome);
            }
            if self.session.tick(Instant::now()) {
                self.sync_table();
            }
        };

        ratatui::restore();

        event_loop_running.store(false, Ordering::Relaxed);
        match event_thread.join() {
            Ok(input) => self.settle(result, input),
            Err(err) => {
                self.session.cancel();
                std::panic::resume_unwind(err)
            }
        }
    }

    /// Combine the loop result with the input thread's. Any failure cancels
    /// the session so it still records an outcome and saves its size.
    pub(crate) fn settle(
        &mut self,
        result: Result<SessionOutcome>,
        input: Result<()>,
    ) -> Result<SessionOutcome> {
        let result = input.and(result);
        if result.is_err() {
            self.session.cancel();
        }
        result
    }
}
