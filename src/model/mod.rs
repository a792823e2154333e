mod document;
mod instance;
mod labels;
mod record;
mod severity;

pub use document::{ResultDocument, DEFAULT_STATUS};
pub use instance::{InstanceRef, InstanceTable};
pub use labels::{LabelEntry, Labels};
pub use record::{group_key, NormalizedRecord, ResultRecord, PLACEHOLDER, UNCATEGORIZED};
pub use severity::Severity;
