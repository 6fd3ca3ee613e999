//! Closed option sets the listener picks from, and the registry holding the
//! current pick for each.
//!
//! Every category is an enum, so an invalid selection cannot be represented.
//! The registry is always constructed with a default for each category.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::Locator;
use crate::error::ValidationError;
use crate::events::Event;

/// A closed, ordered set of options with stable string keys.
pub trait Choice: Copy + Eq + 'static {
    /// Category name used in error messages.
    const CATEGORY: &'static str;

    fn all() -> &'static [Self];

    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

fn parse_choice<C: Choice>(s: &str) -> Result<C, ValidationError> {
    C::from_key(s).ok_or_else(|| {
        let known: Vec<&str> = C::all().iter().map(|c| c.key()).collect();
        ValidationError::invalid(
            C::CATEGORY,
            format!("unknown {} '{}' (expected one of: {})", C::CATEGORY, s, known.join(", ")),
        )
    })
}

/// Light or dark rendering of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    #[default]
    Dark,
}

impl Appearance {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Appearance::Dark
        } else {
            Appearance::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Appearance::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        }
    }
}

// ── Backgrounds ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Background {
    #[default]
    StudyRoom,
    LivingRoom,
    Kitchen,
}

impl Background {
    /// Image for the given appearance.
    pub fn image(self, appearance: Appearance) -> Locator {
        match appearance {
            Appearance::Light => Locator::new(format!("bg/{}.png", self.key())),
            Appearance::Dark => Locator::new(format!("bg/{}-dark.png", self.key())),
        }
    }
}

impl Choice for Background {
    const CATEGORY: &'static str = "background";

    fn all() -> &'static [Self] {
        &[Background::StudyRoom, Background::LivingRoom, Background::Kitchen]
    }

    fn key(self) -> &'static str {
        match self {
            Background::StudyRoom => "study-room",
            Background::LivingRoom => "living-room",
            Background::Kitchen => "kitchen",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Background::StudyRoom => "Study Room",
            Background::LivingRoom => "Living Room",
            Background::Kitchen => "Kitchen",
        }
    }
}

// ── Genres ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Chill,
    Gaming,
    Study,
    Sleep,
    Focus,
    Relax,
    Work,
    Rain,
}

impl Genre {
    pub fn icon(self) -> &'static str {
        match self {
            Genre::Chill => "\u{2601}\u{fe0f}",
            Genre::Gaming => "\u{1f3ae}",
            Genre::Study => "\u{1f4da}",
            Genre::Sleep => "\u{1f634}",
            Genre::Focus => "\u{1f3af}",
            Genre::Relax => "\u{1f9d8}",
            Genre::Work => "\u{1f4bc}",
            Genre::Rain => "\u{1f327}\u{fe0f}",
        }
    }

    /// Accent colour as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            Genre::Chill => "#7B9E8F",
            Genre::Gaming => "#E76F51",
            Genre::Study => "#2A9D8F",
            Genre::Sleep => "#9B8FB8",
            Genre::Focus => "#F4A261",
            Genre::Relax => "#E9C46A",
            Genre::Work => "#264653",
            Genre::Rain => "#5B7E8F",
        }
    }
}

impl Choice for Genre {
    const CATEGORY: &'static str = "genre";

    fn all() -> &'static [Self] {
        &[
            Genre::Chill,
            Genre::Gaming,
            Genre::Study,
            Genre::Sleep,
            Genre::Focus,
            Genre::Relax,
            Genre::Work,
            Genre::Rain,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            Genre::Chill => "chill",
            Genre::Gaming => "gaming",
            Genre::Study => "study",
            Genre::Sleep => "sleep",
            Genre::Focus => "focus",
            Genre::Relax => "relax",
            Genre::Work => "work",
            Genre::Rain => "rain",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Genre::Chill => "Chill",
            Genre::Gaming => "Gaming",
            Genre::Study => "Study",
            Genre::Sleep => "Sleep",
            Genre::Focus => "Focus",
            Genre::Relax => "Relax",
            Genre::Work => "Work",
            Genre::Rain => "Rain",
        }
    }
}

macro_rules! choice_str_impls {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_choice(s)
            }
        }
    )*};
}

choice_str_impls!(Background, Genre);

// ── Registry ─────────────────────────────────────────────────────────

/// Current background and genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRegistry {
    background: Background,
    genre: Genre,
}

impl SelectionRegistry {
    pub fn new(background: Background, genre: Genre) -> Self {
        Self { background, genre }
    }

    pub fn selected_background(&self) -> Background {
        self.background
    }

    pub fn selected_genre(&self) -> Genre {
        self.genre
    }

    /// Image of the selected background for the requested appearance.
    pub fn background(&self, appearance: Appearance) -> Locator {
        self.background.image(appearance)
    }

    pub fn select_background(&mut self, background: Background) -> Event {
        debug!(%background, "background selected");
        self.background = background;
        Event::BackgroundSelected {
            background,
            at: Utc::now(),
        }
    }

    pub fn select_genre(&mut self, genre: Genre) -> Event {
        debug!(%genre, "genre selected");
        self.genre = genre;
        Event::GenreSelected {
            genre,
            at: Utc::now(),
        }
    }
}

/// Catalog entry for listing a category.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn catalog<C: Choice>(selected: C) -> Vec<ChoiceInfo> {
    C::all()
        .iter()
        .map(|c| ChoiceInfo {
            key: c.key(),
            label: c.label(),
            selected: *c == selected,
        })
        .collect()
}
