//! Calendar events produced from a prayer schedule.
//!
//! These are transient: built during a render, written to ICS, dropped.

use chrono::{DateTime, Utc};

/// A timed calendar event with one alarm.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// DTSTAMP; derived from schedule data so re-renders are identical
    pub stamp: DateTime<Utc>,
    pub transparency: Transparency,
    pub alarm: Alarm,
    /// Client-specific X- properties
    pub custom_properties: Vec<(String, String)>,
}

/// A display alarm relative to the event start.
#[derive(Debug, Clone, PartialEq)]
pub struct Alarm {
    /// Minutes before start; 0 fires at start
    pub minutes_before: i64,
    pub description: String,
}

/// Event transparency (busy/free status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// Event blocks time on calendar (default)
    Opaque,
    /// Event does not block time (shows as free)
    Transparent,
}

/// Calendar-level metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMeta {
    pub name: String,
    pub description: String,
    pub color: String,
}
