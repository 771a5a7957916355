use crate::models::{DateKey, EventBuckets, Role};

/// Orders every bucket by start date and, unless `include_historical` is set,
/// keeps only events starting strictly after `today`.
///
/// Events on the same day keep their feed order.
pub fn sort_and_filter(
    mut buckets: EventBuckets,
    include_historical: bool,
    today: &DateKey,
) -> EventBuckets {
    for role in Role::ALL {
        let events = buckets.bucket_mut(role);
        events.sort_by(|a, b| a.start.cmp(&b.start));
        if !include_historical {
            events.retain(|event| &event.start > today);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, EventKind};

    fn event(start: &str, name: &str, role: Role) -> Event {
        Event {
            start: DateKey::parse(start).unwrap(),
            name: name.to_string(),
            location: String::new(),
            role,
            kind: EventKind::Meetup,
        }
    }

    fn names(buckets: &EventBuckets, role: Role) -> Vec<&str> {
        buckets
            .bucket(role)
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }

    #[test]
    fn test_filter_keeps_only_events_after_today() {
        let mut buckets = EventBuckets::new();
        buckets.push(event("20240101", "today", Role::Attendee));
        buckets.push(event("20240102", "tomorrow", Role::Attendee));
        buckets.push(event("20231231", "yesterday", Role::Attendee));

        let today = DateKey::parse("20240101").unwrap();
        let filtered = sort_and_filter(buckets, false, &today);

        assert_eq!(names(&filtered, Role::Attendee), ["tomorrow"]);
    }

    #[test]
    fn test_historical_keeps_everything_sorted() {
        let mut buckets = EventBuckets::new();
        buckets.push(event("20240102", "b", Role::Speaker));
        buckets.push(event("20231231", "a", Role::Speaker));
        buckets.push(event("20240101", "x", Role::Host));

        let today = DateKey::parse("20240101").unwrap();
        let sorted = sort_and_filter(buckets, true, &today);

        assert_eq!(names(&sorted, Role::Speaker), ["a", "b"]);
        assert_eq!(names(&sorted, Role::Host), ["x"]);
    }

    #[test]
    fn test_sort_is_stable_for_same_day() {
        let mut buckets = EventBuckets::new();
        buckets.push(event("20240305", "later", Role::Booth));
        buckets.push(event("20240301", "first", Role::Booth));
        buckets.push(event("20240301", "second", Role::Booth));
        buckets.push(event("20240301", "third", Role::Booth));

        let today = DateKey::parse("20240101").unwrap();
        let sorted = sort_and_filter(buckets, false, &today);

        assert_eq!(
            names(&sorted, Role::Booth),
            ["first", "second", "third", "later"]
        );
    }

    #[test]
    fn test_every_bucket_is_filtered() {
        let mut buckets = EventBuckets::new();
        for role in Role::ALL {
            buckets.push(event("20200101", "old", role));
            buckets.push(event("20300101", "new", role));
        }

        let today = DateKey::parse("20240101").unwrap();
        let filtered = sort_and_filter(buckets, false, &today);

        for role in Role::ALL {
            assert_eq!(names(&filtered, role), ["new"]);
        }
    }
}
