//! Command source reading the real terminal through crossterm.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use blocks_core::CommandSource;

use crate::map::map_key;
use crate::types::Command;

/// Reads key presses and turns them into commands.
///
/// Releases and auto-repeat events are ignored; terminals that do not report
/// key kinds deliver everything as presses.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl CommandSource for TerminalInput {
    fn next_command(&mut self, timeout: Duration) -> Result<Option<Command>> {
        Ok(next_key(timeout)?.and_then(map_key))
    }
}

/// Wait up to `timeout` for a key press.
pub fn next_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if !event::poll(timeout).context("polling terminal events")? {
        return Ok(None);
    }
    match event::read().context("reading terminal event")? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Block until any key is pressed.
pub fn wait_for_key() -> Result<KeyEvent> {
    loop {
        if let Some(key) = next_key(Duration::from_millis(250))? {
            return Ok(key);
        }
    }
}
