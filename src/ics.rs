use ical::IcalParser;
use reqwest::Client;
use std::io::Cursor;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::RawEvent;

/// Pulls the four fields we care about out of every `VEVENT` in `ics_data`.
///
/// Property values are left exactly as the grammar produced them; undoing
/// calendar text escaping is the caller's business.
pub fn parse_ics(ics_data: &str) -> Vec<RawEvent> {
    let mut events = Vec::new();
    let reader = Cursor::new(ics_data.as_bytes());
    let parser = IcalParser::new(reader);

    for calendar in parser {
        match calendar {
            Ok(calendar) => {
                for ical_event in calendar.events {
                    let mut event = RawEvent::default();
                    for property in ical_event.properties {
                        match property.name.as_str() {
                            "DTSTART" => event.start = property.value,
                            "SUMMARY" => event.summary = property.value,
                            "LOCATION" => event.location = property.value,
                            "DESCRIPTION" => event.description = property.value,
                            _ => {}
                        }
                    }
                    events.push(event);
                }
            }
            Err(e) => warn!(error = ?e, "Skipping calendar the parser rejected"),
        }
    }

    events
}

pub async fn fetch_ics(client: &Client, ics_url: &str) -> Result<String> {
    debug!(url = ics_url, "Fetching calendar feed");
    let response = client.get(ics_url).send().await?.error_for_status()?;
    let ics_data = response.text().await?;
    debug!(bytes = ics_data.len(), "Fetched calendar feed");
    Ok(ics_data)
}

pub async fn fetch_and_parse_ics(client: &Client, ics_url: &str) -> Result<Vec<RawEvent>> {
    let ics_data = fetch_ics(client, ics_url).await?;
    Ok(parse_ics(&ics_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const FEED: &str = "BEGIN:VCALENDAR
VERSION:2.0
BEGIN:VEVENT
DTSTART;TZID=Europe/Paris:20240615T090000
SUMMARY:RustConf\\, day one
LOCATION:Montreal\\, QC
DESCRIPTION:{\\n  \"role\": \"speaker\"\\,\\n  \"type\": \"conf
 erence\"\\n}
END:VEVENT
BEGIN:VEVENT
DTSTART;VALUE=DATE:20240701
SUMMARY:Local meetup
END:VEVENT
END:VCALENDAR
";

    #[test]
    fn test_parse_ics_extracts_raw_fields() {
        let events = parse_ics(FEED);

        assert_eq!(events.len(), 2);
        let first = &events[0];
        assert_eq!(first.start.as_deref(), Some("20240615T090000"));
        assert_eq!(first.summary.as_deref(), Some("RustConf\\, day one"));
        assert_eq!(first.location.as_deref(), Some("Montreal\\, QC"));
        assert_eq!(
            first.description.as_deref(),
            Some("{\\n  \"role\": \"speaker\"\\,\\n  \"type\": \"conference\"\\n}")
        );
    }

    #[test]
    fn test_parse_ics_missing_properties_are_none() {
        let events = parse_ics(FEED);

        let second = &events[1];
        assert_eq!(second.start.as_deref(), Some("20240701"));
        assert_eq!(second.location, None);
        assert_eq!(second.description, None);
    }

    #[test]
    fn test_parse_ics_without_events() {
        let events = parse_ics("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_and_parse_ics() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events.ics")
            .with_status(200)
            .with_header("content-type", "text/calendar")
            .with_body(FEED)
            .create_async()
            .await;

        let ics_url = format!("{}/events.ics", server.url());
        let events = fetch_and_parse_ics(&Client::new(), &ics_url)
            .await
            .expect("Failed to fetch and parse ICS");

        mock.assert_async().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].summary.as_deref(), Some("Local meetup"));
    }

    #[tokio::test]
    async fn test_fetch_ics_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events.ics")
            .with_status(503)
            .create_async()
            .await;

        let ics_url = format!("{}/events.ics", server.url());
        let result = fetch_ics(&Client::new(), &ics_url).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(Error::Fetch(_))));
    }
}
