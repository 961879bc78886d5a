pub mod debounce;
pub mod event_filter;
pub mod history;
pub mod iir;
pub mod stats;

pub use debounce::Debouncer;
pub use event_filter::EventThresholdFilter;
pub use history::HistoryBuffer;
pub use iir::{IirFilter, SimpleIirFilter};
pub use stats::{AxisX, AxisY, AxisZ, Channel, Identity, MagSq, RunningStats};
