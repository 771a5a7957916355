use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// One `VEVENT` as the calendar grammar hands it over, escapes and all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub start: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Speaker,
    Host,
    Booth,
    Attendee,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Speaker, Role::Host, Role::Booth, Role::Attendee];

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "speaker" => Some(Role::Speaker),
            "host" => Some(Role::Host),
            "booth" => Some(Role::Booth),
            "attendee" => Some(Role::Attendee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Speaker => "speaker",
            Role::Host => "host",
            Role::Booth => "booth",
            Role::Attendee => "attendee",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Role::Speaker => "Speaking",
            Role::Host => "Hosting",
            Role::Booth => "At a booth",
            Role::Attendee => "Attending",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` of an event. Anything the feed sends that isn't a known kind
/// is carried as-is; an absent type is `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Conference,
    Meetup,
    Other(String),
}

impl EventKind {
    pub fn from_text(value: &str) -> EventKind {
        match value {
            "conference" => EventKind::Conference,
            "meetup" => EventKind::Meetup,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Conference => "conference",
            EventKind::Meetup => "meetup",
            EventKind::Other(other) => other,
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An eight digit `YYYYMMDD` key. Text order equals date order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn parse(value: &str) -> Option<DateKey> {
        if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(DateKey(value.to_string()))
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> DateKey {
        DateKey(date.format("%Y%m%d").to_string())
    }

    pub fn today() -> DateKey {
        DateKey::from_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y%m%d").ok()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateKey,
    pub name: String,
    pub location: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBuckets {
    speaker: Vec<Event>,
    host: Vec<Event>,
    booth: Vec<Event>,
    attendee: Vec<Event>,
}

impl EventBuckets {
    pub fn new() -> EventBuckets {
        EventBuckets::default()
    }

    pub fn bucket(&self, role: Role) -> &[Event] {
        match role {
            Role::Speaker => &self.speaker,
            Role::Host => &self.host,
            Role::Booth => &self.booth,
            Role::Attendee => &self.attendee,
        }
    }

    pub fn bucket_mut(&mut self, role: Role) -> &mut Vec<Event> {
        match role {
            Role::Speaker => &mut self.speaker,
            Role::Host => &mut self.host,
            Role::Booth => &mut self.booth,
            Role::Attendee => &mut self.attendee,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.bucket_mut(event.role).push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &[Event])> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.bucket(role)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, events)| events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
