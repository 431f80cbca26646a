use crate::models::ProjectState;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// A single step of the row counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Plus,
    Minus,
}

impl Delta {
    pub fn value(self) -> i64 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Plus => "+1",
            Self::Minus => "-1",
        }
    }
}

pub fn apply_delta<Tz>(state: &mut ProjectState, delta: Delta, at: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    state.count = state.count.saturating_add(delta.value());
    state.history.push(history_line(delta.label(), at));
}

pub fn reset<Tz>(state: &mut ProjectState, at: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    state.count = 0;
    state.history.push(history_line("Reset", at));
}

/// Returns false, leaving the state alone, when the answer is missing or empty.
pub fn rename(state: &mut ProjectState, answer: Option<String>) -> bool {
    match answer.filter(|name| !name.is_empty()) {
        Some(name) => {
            state.project_name = name;
            true
        }
        None => false,
    }
}

pub fn relink(state: &mut ProjectState, answer: Option<String>) -> bool {
    match answer.filter(|link| !link.is_empty()) {
        Some(link) => {
            state.project_link = Some(link);
            true
        }
        None => false,
    }
}

/// `"<label> le dd/mm/yyyy à hh:mm:ss"`
pub fn history_line<Tz>(label: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{label} le {} à {}",
        at.format("%d/%m/%Y"),
        at.format("%H:%M:%S")
    )
}
