//! Eye animation engine
//!
//! Owns the framebuffer and all animation state. The caller drives it by
//! calling [`RoboEyes::update`] in a loop with a monotonic millisecond
//! clock; the engine decides when a frame is due, composes it, and hands it
//! to a [`RenderSink`].
//!
//! # Frame pipeline
//!
//! 1. Scripted sequences fire (every call, even between frames)
//! 2. Frame gate: return early if the frame interval has not elapsed
//! 3. Curiosity offsets, then height/width/space/position/radius tweening
//! 4. Right eye follows the left; cyclops collapses it
//! 5. Autoblink, laugh, confuse, idle drift, flicker
//! 6. Draw eyes, then eyelid overlays in the background colour
//! 7. Hand the frame to the sink

use core::mem;

use rand::{Rng, RngCore};
use roboeyes_display::primitives::{fill_round_rect, fill_triangle};
use roboeyes_display::{PagedFramebuffer, RenderSink, HEIGHT, WIDTH};

use super::command::{EyeCommand, Which};
use super::geometry::{tween, Eye};
use super::position::Position;
use crate::animation::{
    MacroAnimations, OneShotEdge, CONFUSE_AMPLITUDE, CONFUSE_DURATION_MS, LAUGH_AMPLITUDE,
    LAUGH_DURATION_MS,
};
use crate::config::EyesConfig;
use crate::mood::{Eyelids, Mood};
use crate::sequence::Sequences;

/// Curiosity kicks in this close to the edge of travel (pixels)
const CURIOUS_EDGE: i32 = 10;

/// Extra eye height while curious (pixels)
const CURIOUS_BUMP: i32 = 8;

const CANVAS_W: i32 = WIDTH as i32;
const CANVAS_H: i32 = HEIGHT as i32;

/// Setters clamp geometry and flicker amplitude to this many pixels
const MAX_EXTENT: i32 = 2 * CANVAS_W;

fn extent(value: i32) -> i32 {
    value.clamp(0, MAX_EXTENT)
}

/// Outcome of one [`RoboEyes::update`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick<E> {
    /// Frame interval not yet elapsed; only sequences advanced
    Skipped,
    /// Frame composed and accepted by the sink
    Rendered,
    /// Frame composed but the sink failed; animation state still advanced
    ShowFailed(E),
}

/// Current eyelid overlay sizes, tweened toward the mood's targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct LidHeights {
    tired: i32,
    angry: i32,
    happy: i32,
}

/// Animated robot eyes on a 100x64 paged framebuffer
pub struct RoboEyes<R> {
    fb: PagedFramebuffer,
    rng: R,

    frame_interval_ms: u64,
    last_frame_ms: Option<u64>,

    mood: Mood,
    eyelids: Eyelids,
    lids: LidHeights,
    curious: bool,
    cyclops: bool,

    left: Eye,
    right: Eye,
    space_default: i32,
    space: i32,
    space_next: i32,

    animations: MacroAnimations,
    sequences: Sequences<EyeCommand>,

    foreground: bool,
    background: bool,
}

impl<R: RngCore> RoboEyes<R> {
    /// Engine with default settings
    pub fn new(rng: R) -> Self {
        Self::with_config(&EyesConfig::default(), rng)
    }

    /// Engine from a start-up config
    ///
    /// Out-of-range values are clamped rather than rejected; call
    /// [`EyesConfig::validate`] first to catch them.
    pub fn with_config(config: &EyesConfig, rng: R) -> Self {
        let g = &config.geometry;
        let (width, height) = (i32::from(g.width), i32::from(g.height));
        let radius = i32::from(g.radius);
        let space = i32::from(g.space_between);

        let x = (CANVAS_W - (width + space + width)) / 2;
        let y = (CANVAS_H - height) / 2;
        let left = Eye::new(width, height, radius, x, y);
        let right = Eye::new(width, height, radius, x + width + space, y);

        let mut eyes = Self {
            fb: PagedFramebuffer::new(),
            rng,
            frame_interval_ms: config.frame_interval_ms(),
            last_frame_ms: None,
            mood: Mood::Default,
            eyelids: Eyelids::None,
            lids: LidHeights::default(),
            curious: false,
            cyclops: config.cyclops,
            left,
            right,
            space_default: space,
            space,
            space_next: space,
            animations: MacroAnimations::default(),
            sequences: Sequences::new(),
            foreground: true,
            background: false,
        };

        let (blink, idle) = (config.autoblink, config.idle);
        eyes.set_autoblinker(blink.enabled, blink.interval_s, blink.variation_s);
        eyes.set_idle_mode(idle.enabled, idle.interval_s, idle.variation_s);
        eyes.set_mood(config.mood);
        if config.curious {
            eyes.set_curiosity(true);
        }
        eyes
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance the animation to `now_ms`
    ///
    /// Sequences fire on every call. A frame is composed and handed to
    /// `sink` only when the frame interval has elapsed since the last one
    /// (the first call always renders). A sink failure is returned but does
    /// not roll anything back.
    pub fn update<S: RenderSink + ?Sized>(&mut self, now_ms: u64, sink: &mut S) -> Tick<S::Error> {
        self.run_sequences(now_ms);

        if let Some(last) = self.last_frame_ms {
            if now_ms.saturating_sub(last) < self.frame_interval_ms {
                return Tick::Skipped;
            }
        }
        self.last_frame_ms = Some(now_ms);

        self.advance_geometry();
        self.run_animations(now_ms);
        self.draw();

        match sink.show(&self.fb) {
            Ok(()) => Tick::Rendered,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("frame at {=u64} ms not shown", now_ms);
                Tick::ShowFailed(e)
            }
        }
    }

    /// Fill the canvas with the background colour and show it once
    pub fn blank<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        self.fb.fill(self.background);
        sink.show(&self.fb)
    }

    fn run_sequences(&mut self, now_ms: u64) {
        if self.sequences.is_empty() {
            return;
        }
        let mut sequences = mem::take(&mut self.sequences);
        sequences.update(now_ms, |command| self.apply(command));
        self.sequences = sequences;
    }

    fn advance_geometry(&mut self) {
        let (left_bump, right_bump) = if self.curious {
            let max_x = self.constraint_x();
            let left = self.left.x_next <= CURIOUS_EDGE
                || (self.cyclops && self.left.x_next >= max_x - CURIOUS_EDGE);
            let right = self.right.x_next >= CANVAS_W - self.right.width - CURIOUS_EDGE;
            (
                if left { CURIOUS_BUMP } else { 0 },
                if right { CURIOUS_BUMP } else { 0 },
            )
        } else {
            (0, 0)
        };
        self.left.height_offset = left_bump;
        self.right.height_offset = right_bump;

        for eye in [&mut self.left, &mut self.right] {
            eye.tween_height();
            eye.reopen_if_closed();
            eye.width = tween(eye.width, eye.width_next);
        }
        self.space = tween(self.space, self.space_next);

        self.left.tween_position();
        self.right.x_next = self.left.x_next + self.left.width + self.space;
        self.right.y_next = self.left.y_next;
        self.right.tween_position();

        for eye in [&mut self.left, &mut self.right] {
            eye.radius = tween(eye.radius, eye.radius_next);
        }

        if self.cyclops {
            self.right.width = 0;
            self.right.height = 0;
            self.space = 0;
        }
    }

    fn run_animations(&mut self, now_ms: u64) {
        if self.animations.autoblink.poll(now_ms, &mut self.rng) {
            for eye in [&mut self.left, &mut self.right] {
                if eye.open {
                    eye.squint();
                }
            }
        }

        match self.animations.laugh.poll(now_ms, LAUGH_DURATION_MS) {
            Some(OneShotEdge::Started) => {
                self.animations.vertical.set(true, Some(LAUGH_AMPLITUDE));
                #[cfg(feature = "defmt")]
                defmt::debug!("laugh started");
            }
            Some(OneShotEdge::Finished) => {
                self.animations.vertical.set(false, Some(0));
                #[cfg(feature = "defmt")]
                defmt::debug!("laugh finished");
            }
            None => {}
        }

        match self.animations.confuse.poll(now_ms, CONFUSE_DURATION_MS) {
            Some(OneShotEdge::Started) => {
                self.animations.horizontal.set(true, Some(CONFUSE_AMPLITUDE));
                #[cfg(feature = "defmt")]
                defmt::debug!("confuse started");
            }
            Some(OneShotEdge::Finished) => {
                self.animations.horizontal.set(false, Some(0));
                #[cfg(feature = "defmt")]
                defmt::debug!("confuse finished");
            }
            None => {}
        }

        if self.animations.idle.poll(now_ms, &mut self.rng) {
            let max_x = self.constraint_x().max(0);
            let max_y = self.constraint_y().max(0);
            self.left.x_next = self.rng.gen_range(0..=max_x);
            self.left.y_next = self.rng.gen_range(0..=max_y);
        }

        let dx = self.animations.horizontal.next_offset();
        let dy = self.animations.vertical.next_offset();
        for eye in [&mut self.left, &mut self.right] {
            eye.x += dx;
            eye.y += dy;
        }
    }

    fn draw(&mut self) {
        let (fg, bg) = (self.foreground, self.background);
        let (l, r) = (self.left, self.right);

        self.fb.fill(bg);
        fill_round_rect(&mut self.fb, l.x, l.y, l.width, l.height, l.radius, fg);
        if !self.cyclops {
            fill_round_rect(&mut self.fb, r.x, r.y, r.width, r.height, r.radius, fg);
        }

        // Lid targets follow the left eye so both lids move together
        let half = l.height.div_euclid(2);
        let (tired, angry, happy) = match self.eyelids {
            Eyelids::None => (0, 0, 0),
            Eyelids::Tired => (half, 0, 0),
            Eyelids::Angry => (0, half, 0),
            Eyelids::Happy => (0, 0, half),
        };
        self.lids.tired = tween(self.lids.tired, tired);
        self.lids.angry = tween(self.lids.angry, angry);
        self.lids.happy = tween(self.lids.happy, happy);

        let fb = &mut self.fb;
        let (lx, ly, lw) = (l.x, l.y - 1, l.width);
        let (rx, ry, rw) = (r.x, r.y - 1, r.width);
        let half_w = lw.div_euclid(2);

        let t = self.lids.tired;
        if t > 0 {
            if self.cyclops {
                fill_triangle(fb, lx, ly, lx + half_w, ly, lx, ly + t, bg);
                fill_triangle(fb, lx + half_w, ly, lx + lw, ly, lx + lw, ly + t, bg);
            } else {
                fill_triangle(fb, lx, ly, lx + lw, ly, lx, ly + t, bg);
                fill_triangle(fb, rx, ry, rx + rw, ry, rx + rw, ry + t, bg);
            }
        }

        let a = self.lids.angry;
        if a > 0 {
            if self.cyclops {
                fill_triangle(fb, lx, ly, lx + half_w, ly, lx + half_w, ly + a, bg);
                fill_triangle(fb, lx + half_w, ly, lx + lw, ly, lx + half_w, ly + a, bg);
            } else {
                fill_triangle(fb, lx, ly, lx + lw, ly, lx + lw, ly + a, bg);
                fill_triangle(fb, rx, ry, rx + rw, ry, rx, ry + a, bg);
            }
        }

        let h = self.lids.happy;
        if h > 0 {
            let top = l.y + l.height - h + 1;
            fill_round_rect(fb, l.x - 1, top, l.width + 2, l.default_height, l.radius, bg);
            if !self.cyclops {
                let top = r.y + r.height - h + 1;
                fill_round_rect(fb, r.x - 1, top, r.width + 2, r.default_height, r.radius, bg);
            }
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Run a command value (what sequences fire)
    pub fn apply(&mut self, command: EyeCommand) {
        match command {
            EyeCommand::SetMood(mood) => self.set_mood(mood),
            EyeCommand::Blink(which) => self.blink(which),
            EyeCommand::Open(which) => self.open(which),
            EyeCommand::Close(which) => self.close(which),
            EyeCommand::Wink { left, right } => self.wink(left, right),
            EyeCommand::Laugh => self.laugh(),
            EyeCommand::Confuse => self.confuse(),
            EyeCommand::SetPosition(position) => self.set_position(position),
            EyeCommand::SetCuriosity(on) => self.set_curiosity(on),
            EyeCommand::SetCyclops(on) => self.set_cyclops(on),
            EyeCommand::SetAutoblink(on) => self.set_autoblinker(on, None, None),
            EyeCommand::SetIdle(on) => self.set_idle_mode(on, None, None),
            EyeCommand::HorizontalFlicker(on) => self.horizontal_flicker(on, None),
            EyeCommand::VerticalFlicker(on) => self.vertical_flicker(on, None),
        }
    }

    /// Change mood and apply its entry effects
    pub fn set_mood(&mut self, mood: Mood) {
        let effects = self.mood.transition(mood);
        self.eyelids = effects.eyelids;
        self.curious = effects.curious;
        self.animations.horizontal.apply(effects.horizontal);
        self.animations.vertical.apply(effects.vertical);
        self.mood = mood;

        #[cfg(feature = "defmt")]
        defmt::debug!("mood -> {}", mood);
    }

    /// Close the selected eyes; they stay closed until [`open`](Self::open)
    pub fn close(&mut self, which: Which) {
        if which.left() {
            self.left.close();
        }
        if which.right() {
            self.right.close();
        }
    }

    /// Flag the selected eyes open; they reopen once fully collapsed
    pub fn open(&mut self, which: Which) {
        if which.left() {
            self.left.open = true;
        }
        if which.right() {
            self.right.open = true;
        }
    }

    /// Close then reopen the selected eyes
    pub fn blink(&mut self, which: Which) {
        self.close(which);
        self.open(which);
    }

    /// Blink one eye; neither selected means the right eye
    ///
    /// Turns off autoblink and idle drift so the wink reads clearly.
    pub fn wink(&mut self, left: bool, right: bool) {
        self.animations.autoblink.set_enabled(false);
        self.animations.idle.set_enabled(false);
        self.blink(Which::from_flags(left, right));
    }

    /// One-shot vertical shake
    pub fn laugh(&mut self) {
        self.animations.laugh.trigger();
    }

    /// One-shot horizontal shake
    pub fn confuse(&mut self) {
        self.animations.confuse.trigger();
    }

    /// Point the eyes at a predefined position
    pub fn set_position(&mut self, position: Position) {
        let (x, y) = position.target(self.constraint_x(), self.constraint_y());
        self.left.x_next = x;
        self.left.y_next = y;
    }

    pub fn set_curiosity(&mut self, on: bool) {
        self.curious = on;
    }

    pub fn set_cyclops(&mut self, on: bool) {
        self.cyclops = on;
    }

    /// Configure periodic blinking; `None` keeps the current timing
    pub fn set_autoblinker(&mut self, enabled: bool, interval_s: Option<u16>, variation_s: Option<u16>) {
        self.animations.autoblink.configure(enabled, interval_s, variation_s);
    }

    /// Configure idle gaze drift; `None` keeps the current timing
    pub fn set_idle_mode(&mut self, enabled: bool, interval_s: Option<u16>, variation_s: Option<u16>) {
        self.animations.idle.configure(enabled, interval_s, variation_s);
    }

    pub fn horizontal_flicker(&mut self, enabled: bool, amplitude: Option<i32>) {
        let amplitude = amplitude.map(|a| a.clamp(-MAX_EXTENT, MAX_EXTENT));
        self.animations.horizontal.set(enabled, amplitude);
    }

    pub fn vertical_flicker(&mut self, enabled: bool, amplitude: Option<i32>) {
        let amplitude = amplitude.map(|a| a.clamp(-MAX_EXTENT, MAX_EXTENT));
        self.animations.vertical.set(enabled, amplitude);
    }

    // =========================================================================
    // Geometry and rendering settings
    // =========================================================================

    /// Frame rate; 0 is treated as 1
    pub fn set_framerate(&mut self, fps: u16) {
        self.frame_interval_ms = 1000 / u64::from(fps.max(1));
    }

    /// Eye widths; this and the other geometry setters clamp to `0..=200`
    pub fn set_width(&mut self, left: i32, right: i32) {
        let (left, right) = (extent(left), extent(right));
        self.left.default_width = left;
        self.left.width_next = left;
        self.right.default_width = right;
        self.right.width_next = right;
    }

    pub fn set_height(&mut self, left: i32, right: i32) {
        let (left, right) = (extent(left), extent(right));
        self.left.default_height = left;
        self.left.height_next = left;
        self.right.default_height = right;
        self.right.height_next = right;
    }

    pub fn set_border_radius(&mut self, left: i32, right: i32) {
        let (left, right) = (extent(left), extent(right));
        self.left.default_radius = left;
        self.left.radius_next = left;
        self.right.default_radius = right;
        self.right.radius_next = right;
    }

    pub fn set_space_between(&mut self, space: i32) {
        let space = extent(space);
        self.space_default = space;
        self.space_next = space;
    }

    /// Pixel values for the eyes and for everything else
    pub fn set_colors(&mut self, foreground: bool, background: bool) {
        self.foreground = foreground;
        self.background = background;
    }

    /// Rightmost legal x for the left eye; a cyclops has the whole width
    pub fn constraint_x(&self) -> i32 {
        if self.cyclops {
            return CANVAS_W - self.left.width;
        }
        CANVAS_W - self.left.width - self.space - self.right.width
    }

    /// Lowest legal y for the left eye
    pub fn constraint_y(&self) -> i32 {
        CANVAS_H - self.left.default_height
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn eyelids(&self) -> Eyelids {
        self.eyelids
    }

    pub fn is_curious(&self) -> bool {
        self.curious
    }

    pub fn is_cyclops(&self) -> bool {
        self.cyclops
    }

    pub fn left(&self) -> &Eye {
        &self.left
    }

    pub fn right(&self) -> &Eye {
        &self.right
    }

    /// Current gap between the eyes
    pub fn space_between(&self) -> i32 {
        self.space
    }

    pub fn space_between_default(&self) -> i32 {
        self.space_default
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    pub fn animations(&self) -> &MacroAnimations {
        &self.animations
    }

    pub fn framebuffer(&self) -> &PagedFramebuffer {
        &self.fb
    }

    pub fn sequences(&self) -> &Sequences<EyeCommand> {
        &self.sequences
    }

    pub fn sequences_mut(&mut self) -> &mut Sequences<EyeCommand> {
        &mut self.sequences
    }
}
