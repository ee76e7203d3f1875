//! Daily-reminder calendar export.
//!
//! Produces a single `.ics` file with one event recurring daily for the 365
//! plan days, starting on the plan's start date at a user-chosen wall-clock
//! time, with a display alarm at the event time. The times are floating
//! local times on purpose: the reminder should fire at the same clock time
//! wherever the user's calendar lives.

use crate::days::PLAN_DAYS;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use icalendar::{Alarm, Calendar, Component, Event, EventLike, Trigger};

pub const DEFAULT_REMINDER_TIME: &str = "08:00";

pub fn reminder_ics(start_date: NaiveDate, time: NaiveTime) -> String {
    let mut event = Event::new();
    event.uid("daily-reading-reminder@reading-plan");
    event.summary("Daily Bible Reading");
    event.description(
        "Time for your daily reading. Open the reading plan app to see today's chapters.",
    );

    // DTSTAMP must be UTC per RFC 5545; only the event times float.
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    event.add_property("DTSTAMP", dtstamp);
    event.add_property(
        "DTSTART",
        format!("{}T{}00", start_date.format("%Y%m%d"), time.format("%H%M")),
    );
    event.add_property("RRULE", format!("FREQ=DAILY;COUNT={PLAN_DAYS}"));
    event.alarm(Alarm::display(
        "Daily Bible Reading",
        Trigger::before_start(Duration::minutes(0)),
    ));

    let mut cal = Calendar::new();
    cal.push(event.done());
    cal.done().to_string()
}
