pub mod format;
pub mod view;
pub mod window;

pub use format::DisplayZone;
pub use view::{CurrentValues, DashboardView, LoadState, ReportView, SeriesSet};
pub use window::{filter_by_window, TimeRange};
