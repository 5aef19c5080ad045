//! Time-entry date conflict detection.
//!
//! Before new time-entry rows are written, they are checked against the rows
//! already stored and against each other. A leave day on a worked day, or
//! two rows of the same kind for the same employee and date, is a conflict
//! the caller must resolve before saving.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::WorkSessionRecord;

/// Why two rows collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two rows of the same kind (and service, for sessions).
    Duplicate,
    /// An incoming leave row on a date that already has work.
    LeaveOverWork,
    /// An incoming work row on a date that already has leave.
    WorkOverLeave,
}

/// The row an incoming row collides with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ConflictSource {
    /// A row already stored.
    Existing {
        /// The stored row's id, if known.
        id: Option<String>,
    },
    /// An earlier row in the same incoming batch.
    Incoming {
        /// Position of that row in the batch.
        index: usize,
    },
}

/// One detected conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConflict {
    /// The employee both rows belong to.
    pub employee_id: String,
    /// The shared date.
    pub date: NaiveDate,
    /// Position of the offending row in the incoming batch.
    pub incoming_index: usize,
    /// Why the rows collide.
    pub kind: ConflictKind,
    /// The row collided with.
    pub conflicts_with: ConflictSource,
}

fn classify(incoming: &WorkSessionRecord, other: &WorkSessionRecord) -> Option<ConflictKind> {
    let (a, b) = (incoming.entry_type, other.entry_type);
    if a.is_leave() && b.is_leave() {
        Some(ConflictKind::Duplicate)
    } else if a.is_leave() && b.is_work() {
        Some(ConflictKind::LeaveOverWork)
    } else if a.is_work() && b.is_leave() {
        Some(ConflictKind::WorkOverLeave)
    } else if a.is_work() && a == b && incoming.service_id == other.service_id {
        Some(ConflictKind::Duplicate)
    } else {
        None
    }
}

fn same_slot(a: &WorkSessionRecord, b: &WorkSessionRecord) -> bool {
    a.employee_id == b.employee_id && a.date.is_some() && a.date == b.date
}

/// Detects conflicts between `incoming` rows and `existing` rows.
///
/// Deleted and undated rows on either side are ignored. An incoming row
/// carrying the same id as an existing row is an edit of that row and does
/// not conflict with it.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{ConflictKind, detect_date_conflicts};
/// use leave_engine::models::WorkSessionRecord;
///
/// let existing: Vec<WorkSessionRecord> = serde_json::from_str(r#"[
///     {"id": "ws_1", "employee_id": "emp_001", "date": "2024-03-04", "entry_type": "hours", "hours": 8}
/// ]"#).unwrap();
/// let incoming: Vec<WorkSessionRecord> = serde_json::from_str(r#"[
///     {"employee_id": "emp_001", "date": "2024-03-04", "entry_type": "leave_system_paid"}
/// ]"#).unwrap();
///
/// let conflicts = detect_date_conflicts(&existing, &incoming);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].kind, ConflictKind::LeaveOverWork);
/// ```
pub fn detect_date_conflicts(
    existing: &[WorkSessionRecord],
    incoming: &[WorkSessionRecord],
) -> Vec<DateConflict> {
    let mut conflicts = Vec::new();

    for (index, row) in incoming.iter().enumerate() {
        let Some(date) = row.date.filter(|_| !row.deleted) else {
            continue;
        };

        let stored = existing.iter().filter(|other| {
            !other.deleted
                && same_slot(row, other)
                && !(row.id.is_some() && row.id == other.id)
        });
        for other in stored {
            if let Some(kind) = classify(row, other) {
                conflicts.push(DateConflict {
                    employee_id: row.employee_id.clone(),
                    date,
                    incoming_index: index,
                    kind,
                    conflicts_with: ConflictSource::Existing {
                        id: other.id.clone(),
                    },
                });
            }
        }

        let earlier = incoming[..index]
            .iter()
            .enumerate()
            .filter(|(_, other)| !other.deleted && same_slot(row, other));
        for (other_index, other) in earlier {
            if let Some(kind) = classify(row, other) {
                conflicts.push(DateConflict {
                    employee_id: row.employee_id.clone(),
                    date,
                    incoming_index: index,
                    kind,
                    conflicts_with: ConflictSource::Incoming { index: other_index },
                });
            }
        }
    }

    conflicts
}
