// Text rendering of the dashboard state
//
// Pure function of the state so it stays testable; the sync core is the
// only writer, this layer only reads.
use crate::application::sync_service::DashboardState;
use chrono::Local;
use std::fmt::Write;

pub fn render(state: &DashboardState) -> String {
    if let Some(error) = &state.error {
        return format!("error: {error}\n");
    }
    if state.snapshot.is_none() {
        return if state.is_loading {
            "loading...\n".to_string()
        } else {
            "no dashboard data\n".to_string()
        };
    }

    let mut out = String::new();
    let _ = writeln!(out, "student activity");
    let _ = writeln!(out);

    let _ = writeln!(out, "units:");
    for unit in &state.units {
        let marker = if state.selection.as_deref() == Some(unit.world_id.as_str()) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, " {marker} {} ({})", unit.unit_name, unit.world_id);
    }
    let _ = writeln!(out);

    // Checked above; snapshot is present here.
    if let Some(snapshot) = &state.snapshot {
        let _ = writeln!(out, "unit:            {}", snapshot.unit_name);
        let _ = writeln!(out, "total students:  {}", snapshot.total_students);
        let _ = writeln!(out, "average score:   {}", snapshot.average_score_display());
        let _ = writeln!(out);

        let _ = writeln!(out, "{:<16} {:>8}  {}", "student", "score", "last visit");
        for visit in &snapshot.recent_visits {
            let _ = writeln!(
                out,
                "{:<16} {:>8}  {}",
                visit.student_id,
                visit.score,
                visit
                    .visit_date
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    out
}
