use anyhow::Result;
use autofill_session::SessionOutcome;
use serde::Serialize;

use super::output::{print_structured, OutputFormat};

#[derive(Serialize)]
struct OutcomeRow {
    ordinal: u8,
    label: &'static str,
    suggestion_used: bool,
    form_changed: bool,
    submitted: bool,
}

pub fn cmd_outcomes(output: OutputFormat) -> Result<()> {
    let rows: Vec<OutcomeRow> = SessionOutcome::ALL
        .iter()
        .map(|outcome| OutcomeRow {
            ordinal: outcome.ordinal(),
            label: outcome.label(),
            suggestion_used: outcome.suggestion_used(),
            form_changed: outcome.form_changed(),
            submitted: outcome.submitted(),
        })
        .collect();

    if print_structured(output, &rows)? {
        return Ok(());
    }
    for row in &rows {
        println!("{:>2}  {}", row.ordinal, row.label);
    }
    Ok(())
}
