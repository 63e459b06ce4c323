//! Flat table layout of the record store.
//!
//! One header row of fixed column names, then one row per accepted
//! submission. Selected robot types are flattened into a single
//! `", "`-joined column; the timestamp is stored as RFC 3339.

use chrono::{DateTime, Utc};
use formgate_types::{
    FormgateError, NewSubmission, Result, RobotType, Submission, SubmissionId, constants,
};
use serde::{Deserialize, Serialize};

/// One stored submission, keyed by the column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRow {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "School Name")]
    pub school_name: String,
    #[serde(rename = "Selected Robot Types")]
    pub selected_robots: String,
    #[serde(rename = "Submitted At")]
    pub submitted_at: DateTime<Utc>,
}

impl From<&Submission> for SubmissionRow {
    fn from(s: &Submission) -> Self {
        Self {
            id: s.id.0,
            name: s.name.clone(),
            phone: s.phone.clone(),
            email: s.email.clone(),
            school_name: s.school_name.clone(),
            selected_robots: s.robots_joined(),
            submitted_at: s.submitted_at,
        }
    }
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = FormgateError;

    fn try_from(row: SubmissionRow) -> Result<Self> {
        let selected_robots = row
            .selected_robots
            .split(constants::ROBOT_TYPE_SEPARATOR)
            .map(|s| {
                s.parse::<RobotType>().map_err(|_| {
                    FormgateError::Storage(format!("row {}: unknown robot type {s:?}", row.id))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: SubmissionId(row.id),
            name: row.name,
            phone: row.phone,
            email: row.email,
            school_name: row.school_name,
            selected_robots,
            submitted_at: row.submitted_at,
        })
    }
}

/// The whole record table as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTable {
    pub columns: Vec<String>,
    pub rows: Vec<SubmissionRow>,
}

impl SubmissionTable {
    /// An empty table carrying only the header.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: constants::RECORD_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Parse a stored table and verify its header.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let table: Self = serde_json::from_slice(bytes)?;
        table.check_header()?;
        Ok(table)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    fn check_header(&self) -> Result<()> {
        if self.columns.iter().map(String::as_str).eq(constants::RECORD_COLUMNS) {
            Ok(())
        } else {
            Err(FormgateError::Storage(format!(
                "unexpected record table header: {:?}",
                self.columns
            )))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a validated submission under the next sequential id.
    pub fn push(&mut self, new: NewSubmission) -> Submission {
        let submission = Submission::from_new(SubmissionId::after(self.rows.len()), new);
        self.rows.push(SubmissionRow::from(&submission));
        submission
    }

    /// All rows as submissions, in storage order.
    pub fn submissions(&self) -> Result<Vec<Submission>> {
        self.rows.iter().cloned().map(Submission::try_from).collect()
    }
}

impl Default for SubmissionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_submission(robots: Vec<RobotType>) -> NewSubmission {
        NewSubmission {
            name: "John Doe".into(),
            phone: "12345678".into(),
            email: String::new(),
            school_name: "Springfield".into(),
            selected_robots: robots,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn push_assigns_sequential_ids() {
        let mut table = SubmissionTable::new();
        let a = table.push(new_submission(vec![RobotType::CleaningRobot]));
        let b = table.push(new_submission(vec![RobotType::SecurityRobot]));
        assert_eq!(a.id, SubmissionId(1));
        assert_eq!(b.id, SubmissionId(2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn row_uses_header_keys_and_joined_robots() {
        let mut table = SubmissionTable::new();
        table.push(new_submission(vec![RobotType::DeliveryRobot, RobotType::CleaningRobot]));
        let json: serde_json::Value = serde_json::from_slice(&table.to_vec().unwrap()).unwrap();

        assert_eq!(json["columns"][0], "ID");
        assert_eq!(json["columns"][6], "Submitted At");
        let row = &json["rows"][0];
        assert_eq!(row["ID"], 1);
        assert_eq!(row["Selected Robot Types"], "Delivery Robot, Cleaning Robot");
        assert!(row["Submitted At"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn stored_rows_read_back_in_order() {
        let mut table = SubmissionTable::new();
        let first = table.push(new_submission(vec![RobotType::SecurityRobot]));
        let second = table.push(new_submission(vec![
            RobotType::CleaningRobot,
            RobotType::DeliveryRobot,
        ]));

        let back = SubmissionTable::from_slice(&table.to_vec().unwrap()).unwrap();
        assert_eq!(back.submissions().unwrap(), vec![first, second]);
    }

    #[test]
    fn foreign_header_rejected() {
        let bytes = br#"{"columns":["a","b"],"rows":[]}"#;
        let err = SubmissionTable::from_slice(bytes).unwrap_err();
        assert!(matches!(err, FormgateError::Storage(_)));
    }

    #[test]
    fn corrupt_robot_column_is_storage_error() {
        let mut table = SubmissionTable::new();
        table.push(new_submission(vec![RobotType::CleaningRobot]));
        table.rows[0].selected_robots = "Cleaning Robot,Flying Robot".into();
        let err = table.submissions().unwrap_err();
        assert!(matches!(err, FormgateError::Storage(_)));
    }
}
