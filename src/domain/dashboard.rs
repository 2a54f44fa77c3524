// Dashboard domain models
use chrono::{DateTime, Utc};

/// The complete per-unit dashboard view at one point in time.
/// Each successful fetch produces a new snapshot that entirely
/// supersedes the previous one; there are no partial updates.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub unit_name: String,
    pub total_students: i64,
    pub average_score: f64,
    pub recent_visits: Vec<Visit>,
}

impl DashboardSnapshot {
    pub fn new(
        unit_name: String,
        total_students: i64,
        average_score: f64,
        recent_visits: Vec<Visit>,
    ) -> Self {
        Self {
            unit_name,
            total_students,
            average_score,
            recent_visits,
        }
    }

    /// Average score with two fraction digits, as shown in the summary.
    pub fn average_score_display(&self) -> String {
        format!("{:.2}", self.average_score)
    }
}

/// One row of recent student activity. Ordering is the server's
/// response order and is treated as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub student_id: String,
    pub score: f64,
    pub visit_date: DateTime<Utc>,
}

impl Visit {
    pub fn new(student_id: String, score: f64, visit_date: DateTime<Utc>) -> Self {
        Self {
            student_id,
            score,
            visit_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_score_display() {
        let snapshot = DashboardSnapshot::new("Unit 1".to_string(), 10, 87.5, Vec::new());
        assert_eq!(snapshot.average_score_display(), "87.50");

        let snapshot = DashboardSnapshot::new("Unit 2".to_string(), 3, 100.0, Vec::new());
        assert_eq!(snapshot.average_score_display(), "100.00");
    }
}
