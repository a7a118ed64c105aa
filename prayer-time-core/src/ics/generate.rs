//! ICS generation for a whole subscription calendar.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};

use crate::error::{PrayerTimeError, PrayerTimeResult};
use crate::event::{CalendarEvent, CalendarMeta, Transparency};

const PRODID: &str = "-//prayer-time//Prayer Time Calendar//EN";

/// Generate one VCALENDAR containing every event, each with its alarm.
pub fn generate_calendar(meta: &CalendarMeta, events: &[CalendarEvent]) -> PrayerTimeResult<String> {
    let mut cal = Calendar::new();
    cal.name(&meta.name);
    cal.description(&meta.description);
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("COLOR", &meta.color));

    for event in events {
        cal.push(build_event(event));
    }

    let output = normalize_output(&cal.done().to_string());

    if !output.starts_with("BEGIN:VCALENDAR") {
        return Err(PrayerTimeError::IcsGenerate(
            "calendar output did not start with BEGIN:VCALENDAR".into(),
        ));
    }

    Ok(output)
}

fn build_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);
    ics_event.description(&event.description);
    ics_event.location(&event.location);

    // Event::new() stamps the wall clock; overwrite it so output is reproducible
    ics_event.add_property("DTSTAMP", format_utc(&event.stamp));
    ics_event.add_property("DTSTART", format_utc(&event.start));
    ics_event.add_property("DTEND", format_utc(&event.end));
    ics_event.add_property("CATEGORIES", &event.category);

    if event.transparency == Transparency::Transparent {
        ics_event.add_property("TRANSP", "TRANSPARENT");
    }

    for (key, value) in &event.custom_properties {
        ics_event.add_property(key, value);
    }

    let trigger = Trigger::before_start(chrono::Duration::minutes(event.alarm.minutes_before));
    ics_event.alarm(Alarm::display(&event.alarm.description, trigger));

    ics_event.done()
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Rewrite icalendar's output so equal inputs serialize to equal bytes.
fn normalize_output(ics: &str) -> String {
    let mut out = String::with_capacity(ics.len());
    let mut in_alarm = false;

    for line in ics.lines() {
        match line {
            "BEGIN:VALARM" => in_alarm = true,
            "END:VALARM" => in_alarm = false,
            _ => {}
        }

        if let Some(line) = rewrite_line(line, in_alarm) {
            out.push_str(&line);
            out.push_str("\r\n");
        }
    }

    out
}

/// `None` drops the line.
fn rewrite_line(line: &str, in_alarm: bool) -> Option<Cow<'_, str>> {
    if line.starts_with("PRODID:") {
        return Some(Cow::Owned(format!("PRODID:{PRODID}")));
    }
    if line == "CALSCALE:GREGORIAN" {
        return None;
    }
    // icalendar stamps a fresh UID and DTSTAMP on every alarm
    if in_alarm && (line.starts_with("UID:") || line.starts_with("DTSTAMP:")) {
        return None;
    }
    Some(Cow::Borrowed(line))
}
