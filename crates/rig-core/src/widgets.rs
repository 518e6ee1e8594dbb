//! Dashboard widget state: task list, calendar notes, alarms.
//!
//! Each widget loads from and saves to a [`KeyValueStore`] under its own key.

use crate::constants::{ALARMS_STORAGE_KEY, NOTES_STORAGE_KEY, TASKS_STORAGE_KEY};
use crate::error::Result;
use crate::store::{load_json_or_default, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    System,
    Work,
    #[default]
    Personal,
    Health,
}

impl TaskCategory {
    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "health" => Some(Self::Health),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub category: TaskCategory,
    pub created_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Completed share in percent; 0 for an empty list.
    pub progress_pct: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        load_json_or_default(store, TASKS_STORAGE_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, TASKS_STORAGE_KEY, self)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task at the top of the list. Blank text is ignored. Returns the
    /// new id, derived from `now_ms`.
    pub fn add(&mut self, text: &str, category: TaskCategory, now_ms: u64) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let mut stamp = now_ms;
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }
        let id = stamp.to_string();
        self.tasks.insert(
            0,
            Task {
                id: id.clone(),
                text: text.to_owned(),
                completed: false,
                category,
                created_at: now_ms,
            },
        );
        Some(id)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.completed = !t.completed;
                true
            }
            None => false,
        }
    }

    pub fn edit(&mut self, id: &str, text: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.text = text.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let progress_pct = if total == 0 {
            0.0
        } else {
            completed as f32 / total as f32 * 100.0
        };
        TaskStats {
            total,
            completed,
            progress_pct,
        }
    }
}

/// Calendar day used as a note key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl NoteDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next()?.parse().ok()?;
        let month: u8 = parts.next()?.parse().ok()?;
        let day: u8 = parts.next()?.parse().ok()?;
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { year, month, day })
    }
}

impl fmt::Display for NoteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarNotes {
    notes: BTreeMap<String, String>,
}

impl CalendarNotes {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        load_json_or_default(store, NOTES_STORAGE_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, NOTES_STORAGE_KEY, self)
    }

    /// The note for `date`, or an empty string.
    pub fn get(&self, date: NoteDate) -> &str {
        self.notes
            .get(&date.to_string())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, date: NoteDate, content: &str) {
        self.notes.insert(date.to_string(), content.to_owned());
    }

    pub fn delete(&mut self, date: NoteDate) -> bool {
        self.notes.remove(&date.to_string()).is_some()
    }

    /// True when a non-empty note exists for `date`.
    pub fn has(&self, date: NoteDate) -> bool {
        !self.get(date).is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Wall-clock minute an alarm fires at, stored as `HH:MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlarmTime {
    pub hour: u8,
    pub minute: u8,
}

impl AlarmTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parse `HH:MM` (24-hour).
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.trim().split_once(':')?;
        Self::new(h.parse().ok()?, m.parse().ok()?)
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for AlarmTime {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("invalid alarm time {:?}", s))
    }
}

impl From<AlarmTime> for String {
    fn from(t: AlarmTime) -> Self {
        t.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    pub time: AlarmTime,
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmList {
    alarms: Vec<Alarm>,
}

impl AlarmList {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        load_json_or_default(store, ALARMS_STORAGE_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, ALARMS_STORAGE_KEY, self)
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn get(&self, id: &str) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id == id)
    }

    /// Append an active alarm. Returns its id, derived from `now_ms`.
    pub fn add(&mut self, time: AlarmTime, label: &str, now_ms: u64) -> String {
        let mut stamp = now_ms;
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }
        let id = stamp.to_string();
        self.alarms.push(Alarm {
            id: id.clone(),
            time,
            label: label.trim().to_owned(),
            active: true,
        });
        id
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        match self.alarms.iter_mut().find(|a| a.id == id) {
            Some(a) => {
                a.active = !a.active;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id != id);
        self.alarms.len() != before
    }

    /// Active alarms set for `hour:minute`.
    pub fn due(&self, hour: u8, minute: u8) -> impl Iterator<Item = &Alarm> + '_ {
        self.alarms
            .iter()
            .filter(move |a| a.active && a.time.hour == hour && a.time.minute == minute)
    }

    /// The earliest active alarm later than `now`, wrapping to the earliest
    /// active alarm of the next day.
    pub fn next_after(&self, now: AlarmTime) -> Option<&Alarm> {
        let active = || self.alarms.iter().filter(|a| a.active);
        active()
            .filter(|a| a.time > now)
            .min_by_key(|a| a.time)
            .or_else(|| active().min_by_key(|a| a.time))
    }
}
