use chrono::{DateTime, FixedOffset};

use crate::config::HISTORY_CAPACITY;
use crate::error::{LensError, Result};
use crate::report::{self, Report};
use crate::source::ImageHandle;
use crate::types::{AnalysisRecord, DetectionResult};

/// Everything the client knows about the current session.
///
/// All mutation goes through the transition methods below, which keep two
/// invariants: at most one analysis is in flight, and the history never holds
/// more than [`HISTORY_CAPACITY`] records (newest first). A rejected
/// transition leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current_image: Option<ImageHandle>,
    current_result: Option<DetectionResult>,
    history: Vec<AnalysisRecord>,
    /// File name of the image being analyzed; `Some` exactly while a
    /// request is in flight.
    in_flight: Option<String>,
    last_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_image(&self) -> Option<&ImageHandle> {
        self.current_image.as_ref()
    }

    pub fn current_result(&self) -> Option<&DetectionResult> {
        self.current_result.as_ref()
    }

    pub fn history(&self) -> &[AnalysisRecord] {
        &self.history
    }

    /// The newest `n` records.
    pub fn recent(&self, n: usize) -> &[AnalysisRecord] {
        &self.history[..n.min(self.history.len())]
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the analyze action should be enabled.
    pub fn can_analyze(&self) -> bool {
        self.current_image.is_some() && !self.is_analyzing()
    }

    /// Whether there is anything to export.
    pub fn has_report_data(&self) -> bool {
        self.current_result.is_some() || !self.history.is_empty()
    }

    pub fn select_image(&mut self, handle: ImageHandle) {
        log::debug!("Selected image {} ({} bytes)", handle.file_name, handle.len());
        self.current_image = Some(handle);
        self.current_result = None;
        self.last_error = None;
    }

    /// Enters the analyzing state and hands back the image to upload.
    pub fn begin_analysis(&mut self) -> Result<ImageHandle> {
        if self.is_analyzing() {
            log::warn!("Analysis requested while another one is in flight");
            return Err(LensError::AnalysisInProgress);
        }
        let image = self.current_image.clone().ok_or(LensError::NoImageSelected)?;

        self.in_flight = Some(image.file_name.clone());
        self.last_error = None;
        log::debug!("Analysis started for {}", image.file_name);
        Ok(image)
    }

    /// Records `result` under the name of the image that was uploaded, even
    /// if another image has been selected since.
    pub fn complete_analysis(
        &mut self,
        result: DetectionResult,
        at: DateTime<FixedOffset>,
    ) -> Result<()> {
        let filename = self.take_in_flight()?;
        let record = AnalysisRecord::new(filename, at, result.clone());
        log::debug!(
            "Analysis of {} found {} objects",
            record.filename,
            record.detection.total_objects
        );

        self.current_result = Some(result);
        self.history.insert(0, record);
        self.history.truncate(HISTORY_CAPACITY);
        Ok(())
    }

    pub fn fail_analysis(&mut self, message: impl Into<String>) -> Result<()> {
        self.take_in_flight()?;

        let message = message.into();
        log::debug!("Analysis failed: {message}");
        self.last_error = Some(message);
        Ok(())
    }

    /// Ends an analysis that produced nothing to show.
    pub fn dismiss_analysis(&mut self) -> Result<()> {
        self.take_in_flight().map(|_| ())
    }

    /// Applies the outcome of a detection request.
    pub fn settle(
        &mut self,
        outcome: Result<Option<DetectionResult>>,
        at: DateTime<FixedOffset>,
    ) -> Result<()> {
        match outcome {
            Ok(Some(result)) => self.complete_analysis(result, at),
            Ok(None) => self.dismiss_analysis(),
            Err(err) => self.fail_analysis(err.to_string()),
        }
    }

    /// Shows an error that did not come from an analysis.
    pub fn note_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn report(&self, generated_at: DateTime<FixedOffset>) -> Report {
        Report::new(
            report::generate_report(
                self.current_result.as_ref(),
                self.current_image.as_ref().map(|image| image.file_name.as_str()),
                &self.history,
                &generated_at,
            ),
            &generated_at,
        )
    }

    fn take_in_flight(&mut self) -> Result<String> {
        self.in_flight.take().ok_or_else(|| {
            log::warn!("Analysis outcome arrived with no analysis in flight");
            LensError::NotAnalyzing
        })
    }
}
