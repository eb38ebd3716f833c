//! Terminal rendering of driver progress and the final summary.

use std::io::{self, Write};

use audiobatch_core::{ConversionReport, ProgressUpdate};
use tokio::sync::mpsc::UnboundedReceiver;

/// Writes progress lines as updates arrive from the conversion worker.
pub struct ProgressView<W: Write> {
    out: W,
}

impl<W: Write> ProgressView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn render(&mut self, update: &ProgressUpdate) -> io::Result<()> {
        match update {
            ProgressUpdate::FileStarted { file_name, .. } => {
                writeln!(self.out, "Processing: {}", file_name)
            }
            ProgressUpdate::FileFinished { completed, total } => writeln!(
                self.out,
                "{}/{} [{:>3.0}%]",
                completed,
                total,
                update.fraction() * 100.0
            ),
        }
    }

    /// Renders updates until every sender is gone.
    ///
    /// After a write error the remaining updates are still received and
    /// dropped, so this only returns once the worker is done reporting.
    pub async fn follow(
        &mut self,
        updates: &mut UnboundedReceiver<ProgressUpdate>,
    ) -> io::Result<()> {
        let mut first_error = None;
        while let Some(update) = updates.recv().await {
            if first_error.is_none() {
                first_error = self.render(&update).err();
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Prints the summary and resets the current-file line.
    pub fn finish(&mut self, report: &ConversionReport) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Summary")?;
        writeln!(self.out, "{}", report)?;
        writeln!(self.out)?;
        writeln!(self.out, "Processing: None")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
