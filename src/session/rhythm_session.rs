use rand::SeedableRng;
use rand::rngs::StdRng;

use super::events::{MissReason, PressOutcome, SessionEvent};
use crate::combo::{ComboBreak, ComboEngine, DriftTracker, PlayStats};
use crate::command::{
    Command, CommandAction, CommandCatalog, CommandMatcher, CommandString, MatchOutcome,
};
use crate::config::RhythmConfig;
use crate::judge::{Tier, TimingJudge};
use crate::rhythm::{BeatClock, BeatDriver, BeatPulseSender, BeatSlots};
use crate::state::{GameState, SimonMachine, SimonPress, SimonRetry};
use crate::traits::{AudioSink, ButtonId, InputSource, MISS_SOUND, MovementSink, PresentationSink};
use crate::util::error::ConfigError;

#[derive(Debug, Clone)]
enum Mode {
    Simon(SimonMachine),
    Freeplay(CommandString),
}

/// Where a judged, on-time press went.
enum Routed {
    Ignored,
    Hit,
    Miss(MissReason),
    PatternCleared,
    Performed(Command),
}

/// One level's worth of rhythm gameplay.
///
/// Owns the beat clock, judge, matcher and combo state, and drives the
/// presentation, audio and movement sinks. Everything runs on the thread
/// calling [`tick`](Self::tick); other threads reach the session only
/// through [`BeatPulseSender`] and the input channel.
pub struct RhythmSession<P, A, M> {
    config: RhythmConfig,
    clock: BeatClock,
    driver: BeatDriver,
    slots: BeatSlots,
    judge: TimingJudge,
    matcher: CommandMatcher,
    combo: ComboEngine,
    drift: DriftTracker,
    stats: PlayStats,
    mode: Mode,
    rng: StdRng,
    beats_fired: u64,
    area_complete_reported: bool,
    events: Vec<SessionEvent>,
    presentation: P,
    audio: A,
    movement: M,
}

impl<P: PresentationSink, A: AudioSink, M: MovementSink> RhythmSession<P, A, M> {
    pub fn new(
        config: RhythmConfig,
        catalog: CommandCatalog,
        presentation: P,
        audio: A,
        movement: M,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.check_buttons(config.button_count)?;
        let clock = BeatClock::new(config.bpm)?;
        let judge = TimingJudge::new(config.timing_windows())?;
        let driver = BeatDriver::for_source(config.beat_source, clock.beat_interval_us());
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mode = initial_mode(config.start_state, &catalog, &mut rng);
        log::info!(
            "session: {} bpm, {} commands, {:?} beats, starting in {:?}",
            config.bpm,
            catalog.len(),
            config.beat_source,
            config.start_state
        );

        Ok(Self {
            combo: ComboEngine::new(config.combo_rules()),
            drift: DriftTracker::new(config.static_beat_limit),
            config,
            clock,
            driver,
            slots: BeatSlots::new(),
            judge,
            matcher: CommandMatcher::new(catalog),
            stats: PlayStats::new(),
            mode,
            rng,
            beats_fired: 0,
            area_complete_reported: false,
            events: Vec::new(),
            presentation,
            audio,
            movement,
        })
    }

    /// Advance one frame: fire due beats, run the idle watchdog, then apply
    /// pending presses. Returns everything that happened since the last call.
    pub fn tick(&mut self, dt_us: i64, input: &mut dyn InputSource) -> Vec<SessionEvent> {
        let dt_us = dt_us.max(0);
        self.clock.advance(dt_us);
        for _ in 0..self.driver.poll(dt_us) {
            self.fire_beat();
        }
        if let Some(brk) = self.combo.advance_idle(dt_us, self.game_state()) {
            self.apply_combo_break(brk);
        }
        for press in input.poll_presses() {
            self.on_button_press(press.button);
        }
        self.take_events()
    }

    /// Judge and route one press at the current beat progress.
    ///
    /// `None` when input is closed (pattern being taught) or the button is
    /// not one of the configured buttons.
    pub fn on_button_press(&mut self, button: ButtonId) -> Option<PressOutcome> {
        let state = self.game_state();
        if !state.accepts_input() {
            log::debug!("button {} ignored while {:?}", button, state);
            return None;
        }
        if button == 0 || button > self.config.button_count {
            log::debug!("button {} out of range", button);
            return None;
        }

        self.presentation.flash_button(button);
        let progress = self.clock.progress();
        let judgment = self.judge.judge(progress, &self.slots);
        if let Some(slot) = judgment.slot {
            self.slots.claim(slot);
        }
        log::debug!(
            "button {} at progress {:.3}: {:?} on {:?}",
            button,
            progress,
            judgment.tier,
            judgment.slot
        );

        let hit = if judgment.tier == Tier::Miss {
            self.audio.play_button_sound(MISS_SOUND);
            self.missed_note(MissReason::Timing);
            false
        } else {
            self.stats.add_judgment(judgment.tier);
            self.presentation.show_judgment(judgment.tier);
            self.audio.play_button_sound(button);
            match self.route_press(button) {
                Routed::Ignored => false,
                Routed::Miss(reason) => {
                    self.missed_note(reason);
                    false
                }
                Routed::Hit => {
                    self.register_hit();
                    true
                }
                Routed::PatternCleared => {
                    self.register_hit();
                    self.clear_pattern();
                    true
                }
                Routed::Performed(command) => {
                    self.register_hit();
                    self.perform_command(command);
                    true
                }
            }
        };

        let outcome = PressOutcome {
            button,
            judgment,
            hit,
        };
        self.events.push(SessionEvent::Pressed(outcome));
        Some(outcome)
    }

    /// Apply a missed note in the current mode.
    ///
    /// Simon playback returns to teaching; freeplay loses its command string
    /// and optionally steps back. Ignored while a pattern is being taught.
    pub fn missed_note(&mut self, reason: MissReason) {
        let state = self.game_state();
        if state == GameState::SimonTeach {
            log::debug!("{:?} miss ignored while teaching", reason);
            return;
        }

        self.stats.misses += 1;
        match reason {
            MissReason::Dropped => self.stats.dropped_beats += 1,
            MissReason::WrongButton => self.stats.wrong_buttons += 1,
            MissReason::Timing => {}
        }
        self.presentation.show_judgment(Tier::Miss);
        self.events.push(SessionEvent::Missed(reason));
        log::debug!("missed note: {:?}", reason);

        match &mut self.mode {
            Mode::Simon(machine) => {
                match self.config.simon_retry {
                    SimonRetry::FreshPattern => {
                        let next = self.matcher.catalog().choose(&mut self.rng).clone();
                        machine.restart(next);
                    }
                    SimonRetry::SamePattern => machine.reteach(),
                }
                log::info!("pattern failed, teaching `{}`", machine.pattern().name);
                self.events.push(SessionEvent::StateChanged {
                    from: state,
                    to: GameState::SimonTeach,
                });
            }
            Mode::Freeplay(string) => {
                string.clear();
                if self.config.miss_regresses_movement {
                    self.movement.move_backward(self.config.regress_distance);
                }
            }
        }

        if self.combo.current_note_streak() > 0 || self.combo.in_fever_mode() {
            let brk = self.combo.reset_combo();
            self.apply_combo_break(brk);
        }
    }

    /// Switch to Simon mode and teach `pattern`, or a random catalog command.
    pub fn start_simon(&mut self, pattern: Option<&Command>) {
        let from = self.game_state();
        let pattern = match pattern {
            Some(pattern) => pattern.clone(),
            None => self.matcher.catalog().choose(&mut self.rng).clone(),
        };
        log::info!("simon: teaching `{}`", pattern.name);
        self.mode = Mode::Simon(SimonMachine::new(pattern));
        self.drift.reset();
        self.push_state_change(from);
    }

    pub fn start_freeplay(&mut self) {
        let from = self.game_state();
        log::info!("freeplay started");
        self.mode = Mode::Freeplay(CommandString::new());
        self.drift.reset();
        self.push_state_change(from);
    }

    /// Back to the configured start state with fresh clock, slots, combo
    /// and stats.
    pub fn restart(&mut self) {
        self.clock.reset_phase();
        self.driver.restart();
        self.slots.reset();
        self.combo.reset();
        self.drift.reset();
        self.stats.reset();
        self.beats_fired = 0;
        self.area_complete_reported = false;
        self.events.clear();
        self.mode = initial_mode(self.config.start_state, self.matcher.catalog(), &mut self.rng);
        self.presentation.update_score(0);
        log::info!("session restarted in {:?}", self.game_state());
    }

    /// Change tempo. The beat in progress keeps its scheduled fire time.
    pub fn set_bpm(&mut self, bpm: f64) -> Result<(), ConfigError> {
        self.clock.set_bpm(bpm)?;
        self.config.bpm = bpm;
        self.driver.set_interval(self.clock.beat_interval_us());
        log::info!("tempo set to {} bpm", bpm);
        Ok(())
    }

    /// Events queued by direct [`on_button_press`](Self::on_button_press)
    /// or [`missed_note`](Self::missed_note) calls.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &RhythmConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CommandCatalog {
        self.matcher.catalog()
    }

    pub fn game_state(&self) -> GameState {
        match &self.mode {
            Mode::Simon(machine) => machine.state(),
            Mode::Freeplay(_) => GameState::Freeplay,
        }
    }

    /// Fraction of the current beat elapsed. May slightly exceed 1.
    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    pub fn clock(&self) -> &BeatClock {
        &self.clock
    }

    pub fn slots(&self) -> &BeatSlots {
        &self.slots
    }

    pub fn combo(&self) -> &ComboEngine {
        &self.combo
    }

    pub fn drift(&self) -> &DriftTracker {
        &self.drift
    }

    pub fn stats(&self) -> &PlayStats {
        &self.stats
    }

    /// The freeplay command string. Empty in Simon mode.
    pub fn command_string(&self) -> &[ButtonId] {
        match &self.mode {
            Mode::Freeplay(string) => string.as_slice(),
            Mode::Simon(_) => &[],
        }
    }

    pub fn simon(&self) -> Option<&SimonMachine> {
        match &self.mode {
            Mode::Simon(machine) => Some(machine),
            Mode::Freeplay(_) => None,
        }
    }

    pub fn beats_fired(&self) -> u64 {
        self.beats_fired
    }

    pub fn is_area_complete(&self) -> bool {
        self.movement.is_area_complete()
    }

    /// Sender for the audio engine's beat callback. `None` when self-timed.
    pub fn beat_pulse_sender(&self) -> Option<BeatPulseSender> {
        self.driver.pulse_sender()
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn movement(&self) -> &M {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut M {
        &mut self.movement
    }

    fn fire_beat(&mut self) {
        self.clock.reset_phase();
        self.beats_fired += 1;
        self.events.push(SessionEvent::BeatFired {
            beat: self.beats_fired,
        });
        let upcoming_free = self.slots.upcoming_beat_free();
        let ending_used = self.slots.ending_beat_used();

        let dropped = match &mut self.mode {
            Mode::Simon(machine) => {
                if let Some(reveal) = machine.on_beat(upcoming_free) {
                    self.presentation.flash_button(reveal.button);
                    self.audio.play_button_sound(reveal.button);
                    self.events.push(SessionEvent::Revealed {
                        button: reveal.button,
                    });
                    if reveal.entered_play {
                        log::info!("pattern `{}` taught, input open", machine.pattern().name);
                        self.events.push(SessionEvent::StateChanged {
                            from: GameState::SimonTeach,
                            to: GameState::SimonPlay,
                        });
                    }
                }
                machine.dropped_beat(ending_used)
            }
            Mode::Freeplay(string) => {
                let step = self.drift.on_static_beat();
                if step.started {
                    self.events.push(SessionEvent::DriftStarted);
                }
                if step.drift {
                    self.movement.drift(self.config.drift_distance);
                }
                !string.is_empty() && !ending_used
            }
        };
        if dropped {
            log::debug!("beat {} passed without a press", self.beats_fired);
            self.missed_note(MissReason::Dropped);
        }

        self.slots.free_beat();
        self.presentation.flicker_border();
    }

    fn route_press(&mut self, button: ButtonId) -> Routed {
        match &mut self.mode {
            Mode::Simon(machine) => match machine.on_press(button) {
                Some(SimonPress::Correct) => Routed::Hit,
                Some(SimonPress::Completed) => Routed::PatternCleared,
                Some(SimonPress::Wrong { expected }) => {
                    log::debug!("expected button {}, got {}", expected, button);
                    Routed::Miss(MissReason::WrongButton)
                }
                None => Routed::Ignored,
            },
            Mode::Freeplay(string) => match self.matcher.feed(string, button) {
                MatchOutcome::Extended => Routed::Hit,
                MatchOutcome::Completed(command) => Routed::Performed(command),
                MatchOutcome::Rejected | MatchOutcome::Unrecognized(_) => {
                    Routed::Miss(MissReason::WrongButton)
                }
            },
        }
    }

    fn register_hit(&mut self) {
        let outcome = self.combo.register_hit();
        self.presentation.update_score(self.combo.player_score());
        if outcome.entered_fever {
            self.presentation.show_fever_enter();
            self.audio.play_fever_stinger();
            self.events.push(SessionEvent::FeverEntered);
        }
    }

    fn apply_combo_break(&mut self, brk: ComboBreak) {
        self.presentation.show_combo_break();
        if brk.fever_ended {
            self.presentation.show_fever_exit();
        }
        self.events.push(SessionEvent::ComboBroken(brk));
    }

    // A clean playback always moves on to a new pattern.
    fn clear_pattern(&mut self) {
        self.stats.simon_patterns_cleared += 1;
        let next = self.matcher.catalog().choose(&mut self.rng).clone();
        if let Mode::Simon(machine) = &mut self.mode {
            let cleared = machine.pattern().name.clone();
            log::info!("pattern `{}` cleared, next `{}`", cleared, next.name);
            machine.restart(next);
            self.events.push(SessionEvent::SimonCleared { pattern: cleared });
            self.events.push(SessionEvent::StateChanged {
                from: GameState::SimonPlay,
                to: GameState::SimonTeach,
            });
        }
    }

    fn perform_command(&mut self, command: Command) {
        self.stats.commands_performed += 1;
        log::info!("performed `{}` ({})", command.name, command.action.name());
        match &command.action {
            CommandAction::Move => {
                self.drift.reset();
                let distance = if self.combo.in_fever_mode() {
                    self.config.fever_move_distance
                } else {
                    self.config.move_distance
                };
                self.movement.move_forward(distance);
                if !self.area_complete_reported && self.movement.is_area_complete() {
                    self.area_complete_reported = true;
                    log::info!("area complete");
                    self.events.push(SessionEvent::AreaComplete);
                }
            }
            CommandAction::Custom(_) => {}
        }
        self.events.push(SessionEvent::CommandPerformed {
            name: command.name,
            action: command.action,
        });
    }

    fn push_state_change(&mut self, from: GameState) {
        let to = self.game_state();
        if from != to {
            self.events.push(SessionEvent::StateChanged { from, to });
        }
    }
}

fn initial_mode(state: GameState, catalog: &CommandCatalog, rng: &mut StdRng) -> Mode {
    match state {
        GameState::Freeplay => Mode::Freeplay(CommandString::new()),
        GameState::SimonTeach | GameState::SimonPlay => {
            Mode::Simon(SimonMachine::new(catalog.choose(rng).clone()))
        }
    }
}
