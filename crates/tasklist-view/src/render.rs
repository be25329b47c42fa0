use std::io::{self, Write};

use crate::frame::Frame;

pub const LOADING_TEXT: &str = "Loading tasks…";
pub const EMPTY_TEXT: &str = "No tasks yet.";

/// Something that can display a [`Frame`].
pub trait Render {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Plain text renderer, one frame per block of lines.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        for line in frame_lines(frame) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}

/// Text lines for `frame`: counters, then placeholder / empty state / rows, then the banner.
pub fn frame_lines(frame: &Frame) -> Vec<String> {
    let mut lines = Vec::with_capacity(frame.rows.len() + 3);
    lines.push(format!(
        "Tasks  total: {}  open: {}  done: {}",
        frame.stats.total, frame.stats.open, frame.stats.done
    ));

    if frame.is_loading() {
        lines.push(format!("  {LOADING_TEXT}"));
    } else if frame.is_empty_state() {
        lines.push(format!("  {EMPTY_TEXT}"));
    } else {
        for row in &frame.rows {
            let mark = if row.done { 'x' } else { ' ' };
            lines.push(format!(
                "{:>3}. [{mark}] {}  ({})",
                row.index, row.label, row.status
            ));
        }
    }

    if let Some(banner) = &frame.banner {
        lines.push(format!("! {banner}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use tasklist_model::TaskStats;

    use super::*;
    use crate::{board::Phase, frame::Row};

    fn frame(phase: Phase, rows: Vec<Row>, banner: Option<&str>) -> Frame {
        let done = rows.iter().filter(|r| r.done).count();
        Frame {
            phase,
            stats: TaskStats {
                total: rows.len(),
                open: rows.len() - done,
                done,
            },
            rows,
            banner: banner.map(str::to_string),
        }
    }

    fn row(index: usize, label: &str, done: bool) -> Row {
        Row {
            index,
            label: label.to_string(),
            done,
            status: if done { "Done" } else { "Open" },
        }
    }

    #[test]
    fn empty_state() {
        let lines = frame_lines(&frame(Phase::Ready, vec![], None));
        assert_eq!(
            lines,
            ["Tasks  total: 0  open: 0  done: 0", "  No tasks yet."]
        );
    }

    #[test]
    fn loading_placeholder_hides_rows() {
        let lines = frame_lines(&frame(Phase::Loading, vec![row(1, "a", false)], None));
        assert_eq!(lines[1], "  Loading tasks…");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn rows_and_banner() {
        let lines = frame_lines(&frame(
            Phase::Ready,
            vec![row(1, "a", false), row(2, "b", true)],
            Some("Failed to add task. Try again."),
        ));
        assert_eq!(
            lines,
            [
                "Tasks  total: 2  open: 1  done: 1",
                "  1. [ ] a  (Open)",
                "  2. [x] b  (Done)",
                "! Failed to add task. Try again.",
            ]
        );
    }

    #[test]
    fn failed_load_shows_no_empty_state() {
        let lines = frame_lines(&frame(Phase::Failed, vec![], Some("Failed to load tasks.")));
        assert_eq!(
            lines,
            ["Tasks  total: 0  open: 0  done: 0", "! Failed to load tasks."]
        );
    }

    #[test]
    fn text_renderer_writes_lines() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render(&frame(Phase::Ready, vec![row(1, "a", true)], None))
            .unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "Tasks  total: 1  open: 0  done: 1\n  1. [x] a  (Done)\n");
    }
}
