//! The fixed catalog of time labels a task can be given
//!
//! Times are only displayed next to a task, they play no role in where a task is placed.

use once_cell::sync::Lazy;

/// The label meaning "anytime today". It always comes first in the catalog.
pub const END_OF_DAY: &str = "11:59 PM";

const FIRST_HOUR: u32 = 8;
const LAST_HOUR_PM: u32 = 8;

static TIME_SLOTS: Lazy<Vec<String>> = Lazy::new(build_catalog);

fn build_catalog() -> Vec<String> {
    let mut slots = vec![END_OF_DAY.to_string()];

    // Morning, up to 12:30 PM
    for hour in FIRST_HOUR..=12 {
        let suffix = if hour == 12 { "PM" } else { "AM" };
        for minute in [0, 30] {
            slots.push(format!("{}:{:02} {}", hour, minute, suffix));
        }
    }
    // Afternoon, up to (and including) 8:00 PM
    for hour in 1..=LAST_HOUR_PM {
        slots.push(format!("{}:00 PM", hour));
        if hour != LAST_HOUR_PM {
            slots.push(format!("{}:30 PM", hour));
        }
    }
    slots
}

/// Every time label, in display order
pub fn time_slots() -> &'static [String] {
    &TIME_SLOTS
}

/// Position of a label in the catalog
pub fn slot_index(label: &str) -> Option<usize> {
    TIME_SLOTS.iter().position(|slot| slot == label)
}

pub fn is_valid_slot(label: &str) -> bool {
    slot_index(label).is_some()
}
