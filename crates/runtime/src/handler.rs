//! The historical-events request handler.
//!
//! Validates the one `date` argument, builds the model prompt, and shapes
//! the model's reply into the final tool result.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Completion;

/// Typed arguments for the `historical_events` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsRequest {
    /// Date in YYYY-MM-DD format.
    pub date: String,
}

/// Handles one tool invocation end to end.
pub struct EventsHandler<C> {
    client: C,
}

impl<C: Completion> EventsHandler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Handle an invocation. `arguments` is the raw JSON object from the
    /// tool call; it must carry a string `date`.
    pub async fn handle(&self, arguments: Value) -> Result<String> {
        let request: EventsRequest =
            serde_json::from_value(arguments).map_err(|e| Error::InvalidArgument(e.to_string()))?;

        let date = parse_date(&request.date)?;
        let year = date.year();
        let label = month_day_label(date);

        let prompt = build_prompt(&label, year);
        tracing::debug!(%label, year, "querying model");

        let answer = self.client.complete(&prompt).await?;
        let cleaned = answer.trim();

        if mentions_no_events(cleaned) {
            return Ok(format!("No historical events found for {label} {year}"));
        }

        Ok(format!("On {label} {year}:\n{cleaned}"))
    }
}

/// Parse a calendar date, accepting only the exact `YYYY-MM-DD` shape.
///
/// Chrono alone accepts unpadded fields, so the parsed value is formatted
/// back and compared against the input.
fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == input)
        .ok_or_else(|| Error::InvalidArgument("invalid date format, must be YYYY-MM-DD".into()))
}

/// Full month name plus unpadded day, e.g. "January 2".
fn month_day_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.day())
}

fn build_prompt(label: &str, year: i32) -> String {
    format!(
        "Provide exactly two significant historical events that happened on {label} {year}.\n\
         The events must have occurred on this exact date (same month and day).\n\
         Format your response exactly as:\n\
         1. [Year] Event description\n\
         2. [Year] Event description\n\
         \n\
         If no events match this exact date, say \"No significant historical events found for {label} {year}.\""
    )
}

/// Whether the model signaled the no-events case.
///
/// Deliberately a substring match against the fallback sentence the prompt
/// asks for, since models tend to pad that sentence with extra prose.
fn mentions_no_events(text: &str) -> bool {
    text.contains("No significant historical events")
}
