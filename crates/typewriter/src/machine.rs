use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_SPEED: Duration = Duration::from_millis(100);
pub const DEFAULT_HOLD_DELAY: Duration = Duration::from_millis(2000);

/// Session configuration. Fixed once the machine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingOptions {
    /// Delay per typed character. Deleting runs at half this.
    pub speed: Duration,
    /// Pause after a phrase is fully typed, before deleting starts.
    pub hold_delay: Duration,
    /// Cycle through the phrases forever. With `false`, or with a single
    /// phrase, the first phrase stays on screen once typed.
    pub loop_phrases: bool,
    /// Wait before the first character is scheduled.
    pub start_delay: Duration,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            hold_delay: DEFAULT_HOLD_DELAY,
            loop_phrases: true,
            start_delay: Duration::ZERO,
        }
    }
}

impl TypingOptions {
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_hold_delay(mut self, hold_delay: Duration) -> Self {
        self.hold_delay = hold_delay;
        self
    }

    pub fn with_loop(mut self, loop_phrases: bool) -> Self {
        self.loop_phrases = loop_phrases;
        self
    }

    pub fn with_start_delay(mut self, start_delay: Duration) -> Self {
        self.start_delay = start_delay;
        self
    }

    pub fn delete_speed(&self) -> Duration {
        self.speed / 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting out the start delay.
    Idle,
    Typing,
    /// Current phrase fully typed; waiting out the hold delay.
    Holding,
    Deleting,
    /// Terminal. Nothing is scheduled.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypingSnapshot {
    pub phase: Phase,
    pub phrase_index: usize,
    pub char_index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TypingMachine {
    phrases: Vec<String>,
    options: TypingOptions,
    phase: Phase,
    phrase_index: usize,
    // Counted in chars, not bytes.
    char_index: usize,
    visible: String,
}

impl TypingMachine {
    pub fn new<I, S>(phrases: I, options: TypingOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        let phase = if phrases.is_empty() {
            Phase::Done
        } else {
            Phase::Idle
        };
        Self {
            phrases,
            options,
            phase,
            phrase_index: 0,
            char_index: 0,
            visible: String::new(),
        }
    }

    pub fn options(&self) -> &TypingOptions {
        &self.options
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn visible_text(&self) -> &str {
        &self.visible
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn current_phrase(&self) -> Option<&str> {
        self.phrases.get(self.phrase_index).map(String::as_str)
    }

    pub fn snapshot(&self) -> TypingSnapshot {
        TypingSnapshot {
            phase: self.phase,
            phrase_index: self.phrase_index,
            char_index: self.char_index,
            text: self.visible.clone(),
        }
    }

    /// Delay before the first call to [`advance`](Self::advance), or `None`
    /// when there is nothing to animate.
    pub fn initial_delay(&self) -> Option<Duration> {
        match self.phase {
            Phase::Idle => Some(self.options.start_delay),
            Phase::Done => None,
            _ => Some(self.tick_delay()),
        }
    }

    /// Applies exactly one transition and returns the delay before the next
    /// one. Returns `None` once the machine has settled in [`Phase::Done`].
    pub fn advance(&mut self) -> Option<Duration> {
        match self.phase {
            Phase::Done => return None,
            Phase::Idle => self.phase = Phase::Typing,
            Phase::Typing => {
                if self.char_index < self.current_len() {
                    self.char_index += 1;
                    self.refresh_visible();
                }
                if self.char_index == self.current_len() {
                    self.phase = if self.options.loop_phrases && self.phrases.len() > 1 {
                        Phase::Holding
                    } else {
                        Phase::Done
                    };
                }
            }
            Phase::Holding => self.phase = Phase::Deleting,
            Phase::Deleting => {
                if self.char_index > 0 {
                    self.char_index -= 1;
                    self.refresh_visible();
                }
                if self.char_index == 0 {
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                }
            }
        }

        match self.phase {
            Phase::Done => None,
            _ => Some(self.tick_delay()),
        }
    }

    fn tick_delay(&self) -> Duration {
        match self.phase {
            Phase::Idle => self.options.start_delay,
            Phase::Holding => self.options.hold_delay,
            Phase::Deleting => self.options.delete_speed(),
            Phase::Typing | Phase::Done => self.options.speed,
        }
    }

    fn current_len(&self) -> usize {
        self.current_phrase()
            .map(|phrase| phrase.chars().count())
            .unwrap_or(0)
    }

    fn refresh_visible(&mut self) {
        let phrase = self
            .phrases
            .get(self.phrase_index)
            .map(String::as_str)
            .unwrap_or_default();
        let end = phrase
            .char_indices()
            .nth(self.char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(phrase.len());
        self.visible.clear();
        self.visible.push_str(&phrase[..end]);
    }
}

#[cfg(test)]
#[path = "tests/machine_tests.rs"]
mod tests;
