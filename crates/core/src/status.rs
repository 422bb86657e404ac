//! Task status pipeline.

use serde::{Deserialize, Serialize};

/// Position of a task in the kanban pipeline.
///
/// The order below is presentational only: a task may move from any
/// status to any other status directly, so there is no transition
/// validation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Backlog,
    ToDo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Backlog,
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_to_screaming_snake_case() {
        let rendered: Vec<String> = TaskStatus::ALL
            .iter()
            .map(|s| serde_json::to_string(s).unwrap())
            .collect();
        assert_eq!(
            rendered,
            [
                "\"BACKLOG\"",
                "\"TO_DO\"",
                "\"IN_PROGRESS\"",
                "\"IN_REVIEW\"",
                "\"DONE\"",
            ]
        );
    }

    #[test]
    fn statuses_round_trip() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn only_done_is_done() {
        assert!(TaskStatus::Done.is_done());
        assert!(!TaskStatus::Backlog.is_done());
        assert!(!TaskStatus::InReview.is_done());
    }
}
