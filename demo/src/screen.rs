//! Crossterm output for the demo.
//!
//! [`Screen`] owns the terminal for as long as it lives: raw mode and the
//! alternate screen are entered on [`Screen::open`] and left on drop.
//! Painting is queued and only reaches the terminal on [`Screen::frame`].
//! Write errors are kept until [`Screen::check`] so that painting can
//! happen inside the infallible callbacks of [`gridmaze_core::drive`].

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridmaze_core::{CancelToken, Cell, Grid, NodeState};

/// Glyph and colour for each node state.
fn look(state: NodeState) -> (char, Color) {
    match state {
        NodeState::Start => ('S', Color::Green),
        NodeState::End => ('E', Color::Red),
        NodeState::Wall => ('█', Color::DarkGrey),
        NodeState::Empty => (' ', Color::Reset),
        NodeState::Visited => ('·', Color::Cyan),
        NodeState::Solution => ('●', Color::Yellow),
    }
}

pub struct Screen {
    out: io::Stdout,
    error: Option<io::Error>,
}

impl Screen {
    /// Take over the terminal.
    pub fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        crossterm::execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out, error: None })
    }

    /// Usable (columns, rows) for the grid, leaving two status lines.
    pub fn grid_area() -> io::Result<(i32, i32)> {
        let (cols, rows) = terminal::size()?;
        Ok((i32::from(cols), i32::from(rows).saturating_sub(2)))
    }

    fn keep(&mut self, r: io::Result<()>) {
        if let Err(e) = r {
            self.error.get_or_insert(e);
        }
    }

    /// Queue one cell.
    pub fn paint(&mut self, c: Cell, state: NodeState) {
        let (Ok(col), Ok(row)) = (u16::try_from(c.col), u16::try_from(c.row)) else {
            return;
        };
        let (ch, color) = look(state);
        let r = queue!(
            self.out,
            cursor::MoveTo(col, row),
            SetForegroundColor(color),
            Print(ch),
            ResetColor
        );
        self.keep(r);
    }

    /// Queue the whole grid.
    pub fn draw_grid(&mut self, grid: &Grid) {
        for n in grid.nodes() {
            self.paint(n.cell, n.state);
        }
    }

    /// Queue a status line below a grid of `height` rows.
    pub fn status(&mut self, height: i32, line: u16, text: &str) {
        let row = u16::try_from(height).unwrap_or(u16::MAX).saturating_add(line);
        let r = queue!(
            self.out,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        );
        self.keep(r);
    }

    /// Flush queued output, then wait up to `delay` for input. `q` or `Esc`
    /// cancels `token`; so does any terminal error.
    pub fn frame(&mut self, delay: Duration, token: &CancelToken) {
        let r = self.out.flush();
        self.keep(r);
        match wait_for_quit(delay) {
            Ok(true) => token.cancel(),
            Ok(false) => {}
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        if self.error.is_some() {
            token.cancel();
        }
    }

    /// Surface the first error hit while painting.
    pub fn check(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Flush and block until a key is pressed.
    pub fn wait_key(&mut self) -> io::Result<()> {
        self.out.flush()?;
        loop {
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(());
            }
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = crossterm::execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Drain input for up to `delay`. Returns whether a quit key was seen.
fn wait_for_quit(delay: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + delay;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if !event::poll(left)? {
            return Ok(false);
        }
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(true);
        }
        if left.is_zero() {
            return Ok(false);
        }
    }
}
