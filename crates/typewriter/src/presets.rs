//! Phrase and timing sets used by the portfolio page sections.

use std::time::Duration;

use crate::machine::TypingOptions;

pub const HERO_ROLES: &[&str] = &[
    "Frontend Developer",
    "React.js Developer",
    "Web Developer",
    "UI/UX Enthusiast",
];

pub const CONTACT_TAGLINES: &[&str] = &[
    "Let's discuss your next project or collaboration opportunity",
    "Available for freelance work and exciting new challenges",
    "Ready to bring your ideas to life with modern web technology",
];

pub fn hero() -> TypingOptions {
    TypingOptions::default()
}

pub fn contact_tagline() -> TypingOptions {
    TypingOptions::default()
        .with_speed(Duration::from_millis(60))
        .with_hold_delay(Duration::from_millis(3500))
        .with_start_delay(Duration::from_millis(500))
}

/// One-shot heading reveal. Cards further down a list start later, 500ms
/// apart.
pub fn staggered_heading(position: u32) -> TypingOptions {
    TypingOptions::default()
        .with_speed(Duration::from_millis(60))
        .with_loop(false)
        .with_start_delay(Duration::from_millis(500) * position)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Hero,
    Contact,
}

impl Preset {
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            Self::Hero => HERO_ROLES,
            Self::Contact => CONTACT_TAGLINES,
        }
    }

    pub fn options(self) -> TypingOptions {
        match self {
            Self::Hero => hero(),
            Self::Contact => contact_tagline(),
        }
    }
}
