//! The home page feed: an in-memory, newest-first list of short messages.
//!
//! The feed is seeded with sample messages at startup and lives for the
//! lifetime of the process. Nothing here touches the database.

use chrono::{DateTime, Datelike, Local, TimeZone};
use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;

/// Sample (text, author) pairs shown before anyone posts.
const SEED_MESSAGES: [(&str, &str); 20] = [
    ("Hey how you doing", "hunter2"),
    ("Im good, thanks for asking!", "Alice123"),
    ("Whats up?", "BobSmith"),
    ("Feeling great today!", "EmilyRose"),
    ("Hey, long time no see!", "Sara21"),
    ("Just chilling on a lazy Sunday.", "Mark87"),
    ("Whats your favorite hobby?", "LilyGreen"),
    ("Hows the weather over there?", "AlexWinter"),
    ("Working hard or hardly working?", "ChrisCoder"),
    ("Pizza or burgers for dinner?", "Foodie123"),
    ("Good morning!", "MorningPerson"),
    ("Just finished a great book! It's fantastic.", "Bookworm"),
    ("Excited for the weekend plans!", "WeekendWarrior"),
    ("Coding late into the night.", "NightCoder"),
    ("What's your favorite movie genre?", "FilmBuff"),
    ("Reached a new fitness milestone today!", "FitnessFanatic"),
    ("Coffee or tea person?", "CaffeineLover"),
    ("Just adopted a new pet!", "PetLover"),
    ("Dreaming of a tropical vacation.", "TravelBug"),
    ("Learning a new language is challenging but fun!", "LanguageLearner"),
];

/// Seed timestamps fall somewhere in this window before startup (about 31 years).
const SEED_SPREAD_MILLIS: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub text: String,
    pub user: String,
    pub added: String,
}

impl FeedEntry {
    /// An entry stamped with the current local time.
    pub fn now(text: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user: user.into(),
            added: format_added(&Local::now()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Feed {
    entries: RwLock<Vec<FeedEntry>>,
    max_entries: Option<usize>,
}

impl Feed {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            max_entries: None,
        }
    }

    /// Caps the feed at `max` entries, dropping the oldest on insert. `0` means no cap.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = (max > 0).then_some(max);
        self
    }

    /// A feed holding the sample messages, each stamped with a random past time.
    pub fn seeded() -> Self {
        let mut rng = rand::thread_rng();
        let now = Local::now();

        let entries = SEED_MESSAGES
            .iter()
            .map(|(text, user)| {
                let offset = chrono::Duration::milliseconds(rng.gen_range(0..SEED_SPREAD_MILLIS));
                FeedEntry {
                    text: text.to_string(),
                    user: user.to_string(),
                    added: format_added(&(now - offset)),
                }
            })
            .collect();

        Self::new(entries)
    }

    /// Puts `entry` at the front of the feed, trimming the tail past the cap.
    pub async fn prepend(&self, entry: FeedEntry) {
        let mut entries = self.entries.write().await;
        entries.insert(0, entry);
        if let Some(max) = self.max_entries {
            entries.truncate(max);
        }
    }

    pub async fn snapshot(&self) -> Vec<FeedEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Formats a timestamp like `Sun, Oct 18th 2026 (03:04)`.
pub fn format_added<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let day = at.day();
    format!(
        "{}{}{}{}",
        at.format("%a, %b "),
        day,
        ordinal_suffix(day),
        at.format(" %Y (%I:%M)")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
