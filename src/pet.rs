use crate::activity::{ActivityLog, LogEntry};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::debug;

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;
pub const STAT_START: i32 = 50;

const MSG_CREATED: &str = "Your virtual pet has been created!";
const MSG_ASLEEP: &str = "Pet is sleeping... Zzz";
const MSG_FED: &str = "You fed your pet! Hunger decreased.";
const MSG_PLAYED: &str = "You played with your pet! Happiness increased.";
const MSG_CLEANED: &str = "You cleaned your pet! Cleanliness increased.";
const MSG_FELL_ASLEEP: &str = "Your pet went to sleep... Zzz";
const MSG_WOKE_UP: &str = "Your pet woke up! Energy restored.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hunger,
    Happiness,
    Energy,
    Cleanliness,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Hunger, Stat::Happiness, Stat::Energy, Stat::Cleanliness];

    pub fn label(self) -> &'static str {
        match self {
            Stat::Hunger => "Hunger",
            Stat::Happiness => "Happiness",
            Stat::Energy => "Energy",
            Stat::Cleanliness => "Cleanliness",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hunger: i32,
    pub happiness: i32,
    pub energy: i32,
    pub cleanliness: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hunger: STAT_START,
            happiness: STAT_START,
            energy: STAT_START,
            cleanliness: STAT_START,
        }
    }
}

impl Stats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hunger => self.hunger,
            Stat::Happiness => self.happiness,
            Stat::Energy => self.energy,
            Stat::Cleanliness => self.cleanliness,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Hunger => &mut self.hunger,
            Stat::Happiness => &mut self.happiness,
            Stat::Energy => &mut self.energy,
            Stat::Cleanliness => &mut self.cleanliness,
        }
    }

    /// The only way a stat changes. Keeps every value inside `[0, 100]`.
    pub(crate) fn adjust(&mut self, stat: Stat, delta: i32) -> i32 {
        let slot = self.slot(stat);
        *slot = slot.saturating_add(delta).clamp(STAT_MIN, STAT_MAX);
        debug!("{} {:+} -> {}", stat.label(), delta, *slot);
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

impl Index<Stat> for Stats {
    type Output = i32;

    fn index(&self, stat: Stat) -> &i32 {
        match stat {
            Stat::Hunger => &self.hunger,
            Stat::Happiness => &self.happiness,
            Stat::Energy => &self.energy,
            Stat::Cleanliness => &self.cleanliness,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Awake,
    Asleep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Feed,
    Play,
    Clean,
    Sleep,
}

/// Result of asking the pet to do something.
///
/// A rejection is ordinary control flow, not an error: nothing about the
/// stats changed, but a log line explains why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Applied,
    RejectedBecauseAsleep,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Clone, Debug)]
pub struct PetState {
    stats: Stats,
    activity: Activity,
    log: ActivityLog,
}

impl Default for PetState {
    fn default() -> Self {
        Self::new()
    }
}

impl PetState {
    pub fn new() -> Self {
        let mut log = ActivityLog::new(ActivityLog::CAPACITY);
        log.push(MSG_CREATED);
        Self {
            stats: Stats::default(),
            activity: Activity::Awake,
            log,
        }
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Feed => self.feed(),
            Action::Play => self.play(),
            Action::Clean => self.clean(),
            Action::Sleep => self.sleep(),
        }
    }

    pub fn feed(&mut self) -> Outcome {
        self.when_awake(MSG_FED, |stats| {
            stats.adjust(Stat::Hunger, 20);
            stats.adjust(Stat::Energy, -5);
        })
    }

    pub fn play(&mut self) -> Outcome {
        self.when_awake(MSG_PLAYED, |stats| {
            stats.adjust(Stat::Happiness, 15);
            stats.adjust(Stat::Energy, -10);
            stats.adjust(Stat::Hunger, -5);
        })
    }

    pub fn clean(&mut self) -> Outcome {
        self.when_awake(MSG_CLEANED, |stats| {
            stats.adjust(Stat::Cleanliness, 25);
            stats.adjust(Stat::Happiness, 5);
        })
    }

    pub fn sleep(&mut self) -> Outcome {
        match self.activity {
            Activity::Awake => {
                self.activity = Activity::Asleep;
                self.log.push(MSG_FELL_ASLEEP);
            }
            Activity::Asleep => {
                self.activity = Activity::Awake;
                self.stats.adjust(Stat::Energy, 30);
                self.log.push(MSG_WOKE_UP);
            }
        }
        debug!("sleep toggled, now {:?}", self.activity);
        Outcome::Applied
    }

    /// One step of time passing. Awake pets lose a point of everything;
    /// sleeping pets only recover energy.
    pub fn tick(&mut self) {
        match self.activity {
            Activity::Awake => {
                for stat in Stat::ALL {
                    self.stats.adjust(stat, -1);
                }
            }
            Activity::Asleep => {
                self.stats.adjust(Stat::Energy, 2);
            }
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_sleeping(&self) -> bool {
        self.activity == Activity::Asleep
    }

    pub fn activity_log(&self) -> Vec<String> {
        self.log.lines()
    }

    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.log.iter().cloned().collect()
    }

    fn when_awake(&mut self, message: &str, effect: impl FnOnce(&mut Stats)) -> Outcome {
        if self.is_sleeping() {
            debug!("action rejected: pet is asleep");
            self.log.push(MSG_ASLEEP);
            return Outcome::RejectedBecauseAsleep;
        }
        effect(&mut self.stats);
        self.log.push(message);
        Outcome::Applied
    }
}
