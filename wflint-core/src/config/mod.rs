pub mod scan_config;
pub mod score_config;

pub use scan_config::ScanConfig;
pub use score_config::ScoreConfig;
