use tracing::{debug, warn};

use crate::description::{parse_description, StructuredDescription};
use crate::error::{Error, Result};
use crate::models::{DateKey, Event, EventBuckets, EventKind, RawEvent, Role};

fn unescape_commas(value: Option<&str>) -> String {
    value.unwrap_or_default().replace("\\,", ",")
}

/// Builds the canonical [`Event`] for one calendar entry.
///
/// The start keeps only its date part. A role outside the known set, absent
/// included, is a feed defect and is reported rather than guessed at.
pub fn classify(raw: &RawEvent, description: &StructuredDescription) -> Result<Event> {
    let name = unescape_commas(raw.summary.as_deref());
    let start_value = unescape_commas(raw.start.as_deref());
    let date_part: String = start_value.chars().take(8).collect();

    let start = DateKey::parse(&date_part).ok_or_else(|| Error::InvalidStart {
        value: start_value.clone(),
        summary: name.clone(),
    })?;

    let role_value = description.field("role");
    let role = Role::parse(role_value).ok_or_else(|| Error::UnknownRole {
        role: role_value.to_string(),
        summary: name.clone(),
        start: start_value.clone(),
    })?;

    Ok(Event {
        start,
        name,
        location: unescape_commas(raw.location.as_deref()),
        role,
        kind: EventKind::from_text(description.field("type")),
    })
}

/// Classifies `raw` and appends the result to its role's bucket.
pub fn classify_into(
    buckets: &mut EventBuckets,
    raw: &RawEvent,
    description: &StructuredDescription,
) -> Result<()> {
    let event = classify(raw, description)?;
    buckets.push(event);
    Ok(())
}

/// Runs every raw event through the description decoder and classifier, in
/// feed order. Stops at the first defective event.
pub fn build_buckets(raw_events: &[RawEvent]) -> Result<EventBuckets> {
    let mut buckets = EventBuckets::new();

    for raw in raw_events {
        let description = parse_description(raw.description.as_deref());
        if description.is_malformed() {
            warn!(
                summary = raw.summary.as_deref().unwrap_or_default(),
                description = %description.to_json(),
                "Event description is not valid JSON"
            );
        }
        classify_into(&mut buckets, raw, &description)?;
    }

    debug!(events = buckets.len(), "Classified feed events");
    Ok(buckets)
}
