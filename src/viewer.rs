//! Where a fetched dataset goes once the request flow is done.

use crate::models::Dataset;
use anyhow::Result;
use std::io::Write;

/// Receives the JSON-stat result and takes over from there.
pub trait Viewer {
    fn present(&mut self, dataset: Dataset) -> Result<()>;
}

/// Writes a short summary followed by the full document as pretty JSON.
pub struct TerminalViewer<W: Write> {
    out: W,
}

impl<W: Write> TerminalViewer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Viewer for TerminalViewer<W> {
    fn present(&mut self, dataset: Dataset) -> Result<()> {
        if let Some(label) = dataset.label() {
            writeln!(self.out, "# {}", label)?;
        }
        let dims = dataset.dimensions();
        if !dims.is_empty() {
            let shape = dims
                .iter()
                .map(|(id, size)| format!("{}[{}]", id, size))
                .collect::<Vec<_>>()
                .join(" x ");
            writeln!(self.out, "# {}  ({} values)", shape, dataset.value_count())?;
        }
        writeln!(self.out, "{}", serde_json::to_string_pretty(dataset.as_value())?)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn terminal_viewer_prints_summary_then_document() {
        let mut v = TerminalViewer::new(Vec::new());
        v.present(Dataset(json!({
            "dataset": {
                "label": "Folkemengde",
                "dimension": {"id": ["Region", "Tid"], "size": [1, 2]},
                "value": [5, 6]
            }
        })))
        .unwrap();
        let text = String::from_utf8(v.into_inner()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# Folkemengde"));
        assert_eq!(lines.next(), Some("# Region[1] x Tid[2]  (2 values)"));
        assert!(text.contains("\"label\": \"Folkemengde\""));
    }
}
