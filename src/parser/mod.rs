mod locate;
mod report;

pub use locate::find_report;
pub use report::{load_report, parse_report, ReportOptions};
