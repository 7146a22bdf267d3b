pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use input::{SourceError, load_table};
pub use model::params::AnalysisParams;
pub use model::record::{AnalyticsResult, PlayerSeries, ScoreRecord};
pub use model::table::{Cell, RawTable};
pub use pipeline::stage1_normalize::{NormalizeError, normalize};
pub use pipeline::stage2_analyze::{AnalyzeError, analyze};
