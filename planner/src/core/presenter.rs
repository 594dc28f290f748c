//! Result presentation
//!
//! Flattens an assignment into rows in driver-then-route order and renders
//! them as a text table, a JSON document or CSV.

use shared::{Assignment, AssignmentDocument, AssignmentRow};

use crate::config::OutputFormat;
use crate::error::{PlannerError, PlannerResult};

const HEADERS: [&str; 4] = ["Driver ID", "Job ID", "Pickup Zone", "Dropoff Zone"];
const CSV_HEADERS: [&str; 4] = ["driver_id", "job_id", "pickup_zone", "dropoff_zone"];

/// One row per assigned job; idle drivers produce none
pub fn rows(assignment: &Assignment) -> Vec<AssignmentRow> {
    assignment.to_document(false).rows()
}

pub fn render(assignment: &Assignment, format: OutputFormat, include_idle_drivers: bool) -> PlannerResult<String> {
    match format {
        OutputFormat::Table => Ok(render_table(assignment, include_idle_drivers)),
        OutputFormat::Json => render_json(assignment, include_idle_drivers),
        OutputFormat::Csv => render_csv(assignment),
    }
}

pub fn render_table(assignment: &Assignment, include_idle_drivers: bool) -> String {
    let rows: Vec<[String; 4]> = rows(assignment)
        .into_iter()
        .map(|row| [row.driver_id, row.job_id, row.pickup_zone, row.dropoff_zone])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("No jobs assigned\n");
    } else {
        out.push_str(&line(HEADERS));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &rows {
            out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
            out.push('\n');
        }
    }

    if include_idle_drivers {
        let idle: Vec<&str> = assignment
            .routes
            .iter()
            .filter(|route| route.is_empty())
            .map(|route| route.driver_id.as_str())
            .collect();
        if !idle.is_empty() {
            out.push_str(&format!("\nIdle drivers: {}\n", idle.join(", ")));
        }
    }

    out
}

pub fn render_json(assignment: &Assignment, include_idle_drivers: bool) -> PlannerResult<String> {
    Ok(assignment.to_document(include_idle_drivers).to_json_pretty()?)
}

pub fn render_csv(assignment: &Assignment) -> PlannerResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for row in rows(assignment) {
        writer.write_record([&row.driver_id, &row.job_id, &row.pickup_zone, &row.dropoff_zone])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| PlannerError::IoError(error.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse a document rendered by [`render_json`]
pub fn parse_document(text: &str) -> PlannerResult<AssignmentDocument> {
    Ok(AssignmentDocument::from_json(text)?)
}
