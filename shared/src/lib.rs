//! Framework-free core of the InventoryLens client: the detection data
//! model, the service response contract, the analysis session state
//! machine and the text report generator.

pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod source;
pub mod types;

pub use config::{ApiConfig, Environment, SampleImage, HISTORY_CAPACITY, SAMPLE_IMAGES};
pub use error::{LensError, Result};
pub use report::{generate_report, report_file_name, HistoryStats, Report};
pub use session::SessionState;
pub use source::{resolve_drop, DropPlan, ImageHandle};
pub use types::{
    interpret_response, AnalysisRecord, Detection, DetectionBox, DetectionResult, ObjectCounts,
};
