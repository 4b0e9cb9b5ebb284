//! Presentation policy derived from a stats snapshot.
//!
//! Nothing here feeds back into [`PetState`](crate::pet::PetState); the
//! thresholds only decide which face, caption and bar colour to draw.

use crate::pet::Stats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emote {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
    Bored,
    Worried,
}

impl Emote {
    /// Urgent needs win over general happiness.
    pub fn from_stats(s: &Stats) -> Self {
        if s.hunger < 30 {
            Emote::Worried
        } else if s.energy < 30 {
            Emote::Bored
        } else if s.cleanliness < 30 {
            Emote::Worried
        } else if s.happiness > 85 {
            Emote::VeryHappy
        } else if s.happiness > 65 {
            Emote::Happy
        } else if s.happiness > 40 {
            Emote::Neutral
        } else if s.happiness > 20 {
            Emote::Sad
        } else {
            Emote::VerySad
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Emote::VeryHappy => "Very Happy!",
            Emote::Happy => "Happy!",
            Emote::Neutral => "Content",
            Emote::Sad => "A Bit Sad",
            Emote::VerySad => "Very Sad",
            Emote::Bored => "Bored",
            Emote::Worried => "Worried",
        }
    }
}

/// Colour tier for a single stat bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Good,
    Okay,
    Warning,
    Critical,
}

impl Level {
    pub fn from_value(v: i32) -> Self {
        if v > 75 {
            Level::Good
        } else if v > 50 {
            Level::Okay
        } else if v > 25 {
            Level::Warning
        } else {
            Level::Critical
        }
    }
}

pub fn bounces(s: &Stats) -> bool {
    s.happiness > 80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hunger: i32, happiness: i32, energy: i32, cleanliness: i32) -> Stats {
        Stats {
            hunger,
            happiness,
            energy,
            cleanliness,
        }
    }

    #[test]
    fn needs_take_priority() {
        assert_eq!(Emote::from_stats(&stats(10, 100, 10, 10)), Emote::Worried);
        assert_eq!(Emote::from_stats(&stats(50, 100, 10, 10)), Emote::Bored);
        assert_eq!(Emote::from_stats(&stats(50, 100, 50, 29)), Emote::Worried);
    }

    #[test]
    fn happiness_bands() {
        let cases = [
            (86, Emote::VeryHappy),
            (85, Emote::Happy),
            (66, Emote::Happy),
            (65, Emote::Neutral),
            (41, Emote::Neutral),
            (40, Emote::Sad),
            (21, Emote::Sad),
            (20, Emote::VerySad),
            (0, Emote::VerySad),
        ];
        for (happiness, want) in cases {
            assert_eq!(
                Emote::from_stats(&stats(50, happiness, 50, 50)),
                want,
                "happiness={happiness}"
            );
        }
    }

    #[test]
    fn fresh_pet_is_content() {
        let e = Emote::from_stats(&Stats::default());
        assert_eq!(e, Emote::Neutral);
        assert_eq!(e.status(), "Content");
        assert!(!bounces(&Stats::default()));
    }

    #[test]
    fn bounce_starts_above_eighty() {
        assert!(!bounces(&stats(50, 80, 50, 50)));
        assert!(bounces(&stats(50, 81, 50, 50)));
        // bouncing is independent of the emote cascade
        assert!(bounces(&stats(10, 90, 50, 50)));
    }

    #[test]
    fn level_edges() {
        assert_eq!(Level::from_value(100), Level::Good);
        assert_eq!(Level::from_value(76), Level::Good);
        assert_eq!(Level::from_value(75), Level::Okay);
        assert_eq!(Level::from_value(51), Level::Okay);
        assert_eq!(Level::from_value(50), Level::Warning);
        assert_eq!(Level::from_value(26), Level::Warning);
        assert_eq!(Level::from_value(25), Level::Critical);
        assert_eq!(Level::from_value(0), Level::Critical);
    }
}
