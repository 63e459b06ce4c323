//! System-wide constants for FormGate.

/// Maximum accepted submissions before the quota gate closes.
pub const MAX_SUBMISSIONS: u32 = 10;

/// Shared secret required to reset the submission counter.
pub const RESET_SECRET: &str = "25485650";

/// Wire strings of the robot types a submission may select, in display order.
pub const ALLOWED_ROBOT_TYPES: [&str; 3] = ["Cleaning Robot", "Security Robot", "Delivery Robot"];

/// Separator used when flattening selected robot types into one column.
pub const ROBOT_TYPE_SEPARATOR: &str = ", ";

/// Column headers of the record table, in storage order.
pub const RECORD_COLUMNS: [&str; 7] = [
    "ID",
    "Name",
    "Phone",
    "Email",
    "School Name",
    "Selected Robot Types",
    "Submitted At",
];

/// File name of the record table inside the data directory.
pub const RECORD_FILE_NAME: &str = "submissions.json";

/// File name of the counter inside the data directory.
pub const COUNTER_FILE_NAME: &str = "counter.json";

/// Download name offered for the exported record table.
pub const EXPORT_FILE_NAME: &str = "form_submissions.json";

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default API listen port.
pub const DEFAULT_API_PORT: u16 = 5000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name.
pub const SERVICE_NAME: &str = "FormGate";
