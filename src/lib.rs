//! LBW Review Archive
//!
//! Tooling for a curated archive of leg-before-wicket review footage: schema
//! validation with summary statistics, and random clip selection.
//!
//! ## Archive layout
//!
//! ```text
//! videos[]
//! ├── id, youtube_url
//! ├── match { teams[2], venue, format, match_date, year }
//! └── deliveries[]
//!     ├── innings, over, ball, bowler, batter, ...
//!     ├── onfield_decision, final_decision
//!     ├── drs { pitching, impact, wickets }
//!     └── clips[] { type, start, end, tag, notes }
//! ```
//!
//! ## Pipeline
//!
//! load schema → load archive → validate → aggregate → report

pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod report;
pub mod select;
pub mod timestamp;
pub mod validator;

pub use config::{LbwConfig, OutputFormat};
pub use dataset::{Clip, ClipKind, Dataset, Delivery, Drs, Match, Video};
pub use error::{ArchiveError, FailureKind, Result};
pub use loader::{load_json, DocumentRole};
pub use metrics::{aggregate, aggregate_document, FrequencyTable, Metrics};
pub use report::{build_report, render_error, render_failure, render_json, render_text, Report};
pub use select::{build_link, collect_candidates, select_random, Selection};
pub use timestamp::{format_duration, parse_timestamp, TimestampError};
pub use validator::{validate, Conformance, PathSegment, SchemaValidator, ValidationFailure};
