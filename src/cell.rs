//! Rendering tasks into grid cells, and finding the task back from a rendered cell
//!
//! A display grid can only hold renderable strings. A rendered cell is a small HTML snippet
//! whose last paragraph is invisible and carries the task id:
//!
//! ```text
//! <html><p style="…">TEXT</p><p style="font-size: 10px;">TIME</p><p style="font-size: 0px;">ID</p></html>
//! ```
//!
//! Text and time are HTML-escaped, so that user content can never contain the `<p` marker that precedes the id.
//! The [`Grid`](crate::grid::Grid) also keeps the id of every cell on the side, so this decoding is
//! only needed by surfaces that can do nothing but echo the rendered string back.

use crate::error::PlannerError;
use crate::settings::Palette;
use crate::task::{Task, TaskId};

const ID_MARKER: &str = "<p style=\"font-size: 0px;\">";
const ID_TERMINATOR: &str = "</p></html>";
/// Length of a hyphenated UUID
const ID_LEN: usize = 36;

/// Escape the characters that are meaningful in HTML
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders tasks with the colours of a given palette
#[derive(Clone, Debug, Default)]
pub struct CellCodec {
    palette: Palette,
}

impl CellCodec {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Render a task into the content of a grid cell. The id of the task is embedded in it.
    pub fn encode(&self, task: &Task) -> String {
        let color = self.palette.color_for(task.priority()).to_hex_string();
        format!(
            "<html>\
                <p style=\"font-size: 12px; color: {}; font-weight: bold;\">{}</p>\
                <p style=\"font-size: 10px;\">{}</p>\
                {}{}{}",
            color, escape_html(task.text()),
            escape_html(task.time()),
            ID_MARKER, task.id(), ID_TERMINATOR,
        )
    }
}

/// Extract the task id embedded by [`CellCodec::encode`].
///
/// Anything else (an empty string, a truncated cell, plain text...) fails with [`PlannerError::MalformedCellContent`], which means "no task here".
pub fn decode(rendered: &str) -> Result<TaskId, PlannerError> {
    let start = match rendered.find(ID_MARKER) {
        None => return Err(PlannerError::MalformedCellContent("missing id marker".to_string())),
        Some(index) => index + ID_MARKER.len(),
    };

    let raw_id = rendered.get(start..start + ID_LEN)
        .ok_or_else(|| PlannerError::MalformedCellContent("truncated id".to_string()))?;
    if rendered[start + ID_LEN..].starts_with(ID_TERMINATOR) == false {
        return Err(PlannerError::MalformedCellContent(format!("unterminated id {:?}", raw_id)));
    }

    raw_id.parse()
        .map_err(|err| PlannerError::MalformedCellContent(format!("invalid id {:?}: {}", raw_id, err)))
}
