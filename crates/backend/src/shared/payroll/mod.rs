pub mod calculator;
pub mod errors;
pub mod matcher;
pub mod segmenter;

pub use calculator::{HoursSplit, MoneyFigures, PayrollRates};
pub use errors::ImportError;
pub use matcher::MatchOutcome;
pub use segmenter::PayrollPeriod;
