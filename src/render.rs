use crate::mood::{bounces, Emote, Level};
use crate::pet::PetState;
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Writes only the cells that changed since the last frame.
    pub(crate) fn present(&mut self, force: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        let mut last_bold = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if !force && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                if last_bold != Some(c.bold) {
                    let attr = if c.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.out, SetAttribute(attr))?;
                    last_bold = Some(c.bold);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/* -----------------------------
   Text + bars
------------------------------ */

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bold: bool) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(
            xx,
            y,
            Cell {
                ch,
                fg,
                bg: Color::Black,
                bold,
            },
        );
    }
}

pub(crate) fn bar(value: i32, width: usize) -> String {
    let v = (value.clamp(0, 100) as f32) / 100.0;
    let fill = (v * width as f32 + 0.5) as usize;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { ' ' });
    }
    s.push(']');
    s
}

fn level_color(level: Level, enable_color: bool) -> Color {
    if !enable_color {
        return Color::White;
    }
    match level {
        Level::Good => Color::Green,
        Level::Okay => Color::Yellow,
        Level::Warning => Color::DarkYellow,
        Level::Critical => Color::Red,
    }
}

/* -----------------------------
   Pet face
------------------------------ */

const FACE_W: i32 = 13;

fn face_lines(emote: Option<Emote>) -> [String; 6] {
    let (eyes, mouth) = match emote {
        None => ("  -   -  ", "   ~~~   "),
        Some(Emote::VeryHappy) => ("  ^   ^  ", "  \\___/  "),
        Some(Emote::Happy) => ("  o   o  ", "  \\___/  "),
        Some(Emote::Neutral) => ("  o   o  ", "   ___   "),
        Some(Emote::Sad) => ("  o   o  ", "   /-\\   "),
        Some(Emote::VerySad) => ("  T   T  ", "  /___\\  "),
        Some(Emote::Bored) => ("  -   o  ", "   ---   "),
        Some(Emote::Worried) => ("  O   O  ", "   ~~~   "),
    };
    [
        "  /\\_____/\\  ".to_string(),
        " /         \\ ".to_string(),
        format!(" |{eyes}| "),
        format!(" |{mouth}| "),
        " \\         / ".to_string(),
        "  \\_______/  ".to_string(),
    ]
}

pub(crate) fn draw_pet(buf: &mut CellBuffer, pet: &PetState, cx: i32, cy: i32, frame: u64, enable_color: bool) {
    let stats = pet.stats();
    let emote = (!pet.is_sleeping()).then(|| Emote::from_stats(&stats));

    // hop every few frames
    let bob = if emote.is_some() && bounces(&stats) && (frame / 8) % 2 == 0 {
        -1
    } else {
        0
    };

    let fg = match (enable_color, emote) {
        (false, _) => Color::White,
        (true, None) => Color::Blue,
        (true, Some(Emote::VeryHappy | Emote::Happy)) => Color::Green,
        (true, Some(Emote::Worried | Emote::VerySad)) => Color::Red,
        (true, Some(_)) => Color::White,
    };

    let lines = face_lines(emote);
    let x0 = cx - FACE_W / 2;
    let y0 = cy - lines.len() as i32 / 2 + bob;

    for (row, line) in lines.iter().enumerate() {
        let y = y0 + row as i32;
        if y < 0 || y >= buf.h as i32 {
            continue;
        }
        for (i, ch) in line.chars().enumerate() {
            let x = x0 + i as i32;
            if x >= 0 && x < buf.w as i32 {
                buf.set(
                    x as u16,
                    y as u16,
                    Cell {
                        ch,
                        fg,
                        bg: Color::Black,
                        bold: false,
                    },
                );
            }
        }
    }

    if pet.is_sleeping() {
        let zx = x0 + FACE_W - 1;
        let zy = y0 - 1;
        if zx >= 0 && zy >= 0 {
            draw_text(buf, zx as u16, zy as u16, "z Z", Color::Cyan, true);
        }
    }
}

/* -----------------------------
   Panels
------------------------------ */

pub(crate) struct Overlay<'a> {
    pub(crate) reaction: Option<&'a str>,
    pub(crate) tick_secs: u64,
    pub(crate) enable_color: bool,
}

pub(crate) fn draw_stats_panel(buf: &mut CellBuffer, pet: &PetState, ov: &Overlay<'_>) {
    let fg = Color::White;
    draw_text(buf, 1, 0, "Virtual Pet", fg, true);

    let stats = pet.stats();
    for (i, (stat, value)) in stats.iter().enumerate() {
        let label = format!("{:<12}", stat.label());
        let y = 2 + i as u16;
        draw_text(buf, 1, y, &label, fg, false);
        let color = level_color(Level::from_value(value), ov.enable_color);
        draw_text(buf, 13, y, &bar(value, 20), color, false);
        draw_text(buf, 36, y, &format!("{value:>3}%"), fg, false);
    }

    let status = if pet.is_sleeping() {
        "Sleeping... Zzz".to_string()
    } else {
        Emote::from_stats(&stats).status().to_string()
    };
    draw_text(buf, 1, 7, &format!("Mood: {status}"), fg, false);
    draw_text(
        buf,
        1,
        8,
        &format!("Time passes every {}s", ov.tick_secs),
        Color::DarkGrey,
        false,
    );
    if let Some(r) = ov.reaction {
        draw_text(buf, 1, 10, r, Color::Magenta, true);
    }
}

pub(crate) fn draw_activity_panel(buf: &mut CellBuffer, pet: &PetState, x: u16, y: u16) {
    draw_text(buf, x, y, "Activity", Color::White, true);
    for (i, line) in pet.activity_log().iter().enumerate() {
        let fg = if i == 0 { Color::White } else { Color::Grey };
        draw_text(buf, x, y + 1 + i as u16, line, fg, false);
    }
}

pub(crate) fn draw_footer(buf: &mut CellBuffer, help_open: bool) {
    let text = if help_open {
        "Help: h/esc close | q quit"
    } else {
        "Keys: f feed | p play | c clean | s sleep | h help | q quit"
    };
    let y = buf.h.saturating_sub(1);
    draw_text(buf, 1, y, text, Color::White, false);
}

pub(crate) fn draw_center_box(buf: &mut CellBuffer, title: &str, body: &str) {
    let w = buf.w;
    let h = buf.h;
    let bw = 60.min(w.saturating_sub(4));
    let bh = 16.min(h.saturating_sub(4));
    if bw < 4 || bh < 4 {
        return;
    }
    let x0 = (w - bw) / 2;
    let y0 = (h - bh) / 2;

    let edge = |ch| Cell {
        ch,
        fg: Color::White,
        bg: Color::Black,
        bold: false,
    };

    for y in y0..y0 + bh {
        for x in x0..x0 + bw {
            buf.set(x, y, Cell::default());
        }
    }
    for x in x0..x0 + bw {
        buf.set(x, y0, edge('─'));
        buf.set(x, y0 + bh - 1, edge('─'));
    }
    for y in y0..y0 + bh {
        buf.set(x0, y, edge('│'));
        buf.set(x0 + bw - 1, y, edge('│'));
    }
    buf.set(x0, y0, edge('┌'));
    buf.set(x0 + bw - 1, y0, edge('┐'));
    buf.set(x0, y0 + bh - 1, edge('└'));
    buf.set(x0 + bw - 1, y0 + bh - 1, edge('┘'));

    draw_text(buf, x0 + 2, y0 + 1, title, Color::White, true);

    let mut yy = y0 + 3;
    for line in body.lines() {
        if yy >= y0 + bh - 1 {
            break;
        }
        draw_text(buf, x0 + 2, yy, line, Color::White, false);
        yy += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &CellBuffer, y: u16) -> String {
        (0..buf.w).map(|x| buf.cells[buf.idx(x, y)].ch).collect()
    }

    #[test]
    fn bar_fill_tracks_value() {
        assert_eq!(bar(0, 4), "[    ]");
        assert_eq!(bar(50, 4), "[██  ]");
        assert_eq!(bar(100, 4), "[████]");
        assert_eq!(bar(150, 4), "[████]");
    }

    #[test]
    fn text_is_clipped_at_edge() {
        let mut buf = CellBuffer::new(5, 1);
        draw_text(&mut buf, 2, 0, "hello", Color::White, false);
        assert_eq!(row(&buf, 0), "  hel");
    }

    #[test]
    fn activity_panel_lists_newest_first() {
        let mut pet = PetState::new();
        let _ = pet.feed();
        let mut buf = CellBuffer::new(80, 6);
        draw_activity_panel(&mut buf, &pet, 0, 0);
        assert!(row(&buf, 1).contains("You fed your pet!"));
        assert!(row(&buf, 2).contains("has been created"));
    }

    #[test]
    fn sleeping_pet_shows_z() {
        let mut pet = PetState::new();
        let _ = pet.sleep();
        let mut buf = CellBuffer::new(40, 12);
        draw_pet(&mut buf, &pet, 20, 6, 0, true);
        assert!((0..buf.h).any(|y| row(&buf, y).contains("z Z")));
    }

    #[test]
    fn tiny_terminal_skips_box() {
        let mut buf = CellBuffer::new(6, 6);
        draw_center_box(&mut buf, "t", "b");
        assert!(buf.cells.iter().all(|c| c.ch == ' '));
    }
}
