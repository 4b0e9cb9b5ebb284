use crate::config::Settings;
use crate::input::{collect_input_nonblocking, map_event_to_command, Command};
use crate::pet::{Action, Outcome, PetState};
use crate::render::{
    draw_activity_panel, draw_center_box, draw_footer, draw_pet, draw_stats_panel, Overlay,
    Terminal,
};
use tracing::{debug, info};
use std::time::{Duration, Instant};

const HELP_TEXT: &str = "Keep your pet fed, happy, rested and clean.\n\
Every few seconds all stats drop by one while it is awake.\n\n\
F Feed: +20 hunger, -5 energy\n\
P Play: +15 happiness, -10 energy, -5 hunger\n\
C Clean: +25 cleanliness, +5 happiness\n\
S Sleep: toggle. A sleeping pet regains energy\n\
  and wakes up with +30 energy, but can't be\n\
  fed, played with or cleaned.\n\n\
Esc or H to close help.";

struct Reaction {
    text: &'static str,
    until: Instant,
}

fn reaction_for(action: Action, now_asleep: bool) -> Option<(&'static str, Duration)> {
    match action {
        Action::Feed => Some(("*munch*", Duration::from_millis(1500))),
        Action::Play => Some(("*wag*", Duration::from_millis(1500))),
        Action::Clean => Some(("*sparkle*", Duration::from_millis(1500))),
        Action::Sleep if now_asleep => Some(("*yawn*", Duration::from_millis(2000))),
        Action::Sleep => None,
    }
}

struct App {
    settings: Settings,
    pet: PetState,
    term: Terminal,
    help_open: bool,
    should_quit: bool,
    reaction: Option<Reaction>,
    frame: u64,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let term = Terminal::begin()?;
        Ok(Self {
            settings,
            pet: PetState::new(),
            term,
            help_open: false,
            should_quit: false,
            reaction: None,
            frame: 0,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = self.settings.frame_time();
        let tick_every = self.settings.tick_interval();
        info!(
            "pet created; decay every {:?}, frame budget {:?}",
            tick_every, frame_dt
        );

        let mut last_frame = Instant::now();
        let mut tick_accum = Duration::ZERO;
        let mut force_redraw = true;

        while !self.should_quit {
            if self.term.resize_if_needed()? {
                force_redraw = true;
            }

            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(cmd) = map_event_to_command(self.help_open, &ev) {
                    self.handle(cmd);
                }
                if self.should_quit {
                    break;
                }
            }

            // fixed-cadence decay
            let now = Instant::now();
            let due = due_ticks(
                &mut tick_accum,
                now.saturating_duration_since(last_frame),
                tick_every,
            );
            last_frame = now;
            for _ in 0..due {
                self.pet.tick();
                debug!("tick: {:?}", self.pet.stats());
            }

            if matches!(&self.reaction, Some(r) if now >= r.until) {
                self.reaction = None;
            }

            self.render_frame(force_redraw)?;
            force_redraw = false;
            self.frame = self.frame.wrapping_add(1);

            spin_sleep(frame_dt, Instant::now());
        }

        info!("quitting with stats {:?}", self.pet.stats());
        Ok(())
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.should_quit = true,
            Command::HelpToggle => self.help_open = !self.help_open,
            Command::Pet(action) => {
                let outcome = self.pet.apply(action);
                info!("{:?} -> {:?}", action, outcome);
                if outcome == Outcome::Applied {
                    self.reaction = reaction_for(action, self.pet.is_sleeping()).map(
                        |(text, ttl)| Reaction {
                            text,
                            until: Instant::now() + ttl,
                        },
                    );
                }
            }
        }
    }

    fn render_frame(&mut self, force: bool) -> anyhow::Result<()> {
        let buf = &mut self.term.cur;
        buf.clear();

        let overlay = Overlay {
            reaction: self.reaction.as_ref().map(|r| r.text),
            tick_secs: self.settings.tick_interval().as_secs(),
            enable_color: self.settings.enable_color,
        };
        draw_stats_panel(buf, &self.pet, &overlay);

        // Pet sits to the right of the bars when there is room, else below.
        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;
        let (pet_x, pet_y, log_y) = if cols >= 64 {
            (42 + (cols - 42) / 2, 6, 13)
        } else {
            (cols / 2, 15, 20)
        };
        draw_pet(
            buf,
            &self.pet,
            pet_x,
            pet_y.min(rows - 4),
            self.frame,
            self.settings.enable_color,
        );
        draw_activity_panel(buf, &self.pet, 1, log_y as u16);
        draw_footer(buf, self.help_open);

        if self.help_open {
            draw_center_box(buf, "How to care for your pet", HELP_TEXT);
        }

        self.term.present(force)
    }
}

/// Runs the interactive session until the player quits.
///
/// The terminal is restored before any loop error is returned.
pub fn run(settings: Settings) -> anyhow::Result<()> {
    let mut app = App::init(settings)?;
    let result = app.run();
    let restored = app.term.end();
    result.and(restored)
}

/// Adds `elapsed` to the accumulator and takes out every whole `every`
/// period, returning how many decay ticks are owed. The remainder carries
/// over to the next frame.
fn due_ticks(accum: &mut Duration, elapsed: Duration, every: Duration) -> u32 {
    *accum = accum.saturating_add(elapsed);
    if every.is_zero() {
        return 0;
    }
    let mut due = 0;
    while *accum >= every {
        *accum -= every;
        due += 1;
    }
    due
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
