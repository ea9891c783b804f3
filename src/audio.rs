//! Audio using the Web Audio API
//!
//! Two independent channels: procedurally generated one-shot cues (the crash
//! on collision plus level/end stings) and a looping background track that
//! plays only while the session is running.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::Settings;
use crate::sim::{GameEvent, GamePhase, Outcome};

/// Background track, relative to the page
pub const MUSIC_SRC: &str = "audio/music.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Car hit an obstacle
    Impact,
    /// New level reached
    LevelUp,
    /// All levels cleared
    Victory,
    /// Out of lives
    Defeat,
}

impl SoundEffect {
    /// The cue that accompanies a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Collision { .. } => Some(SoundEffect::Impact),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver {
                outcome: Outcome::Victory,
            } => Some(SoundEffect::Victory),
            GameEvent::GameOver {
                outcome: Outcome::Defeat,
            } => Some(SoundEffect::Defeat),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    music_playing: bool,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }

        let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
        match &music {
            Some(track) => track.set_loop(true),
            None => log::warn!("Failed to create music element - music disabled"),
        }

        let mut manager = Self {
            ctx,
            music,
            music_playing: false,
            sfx_volume: 0.0,
            music_volume: 0.0,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pick up volume / mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.sfx_gain();
        self.music_volume = settings.music_gain();
        if let Some(track) = &self.music {
            track.set_volume(f64::from(self.music_volume));
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the background loop while running; otherwise stop and rewind it
    pub fn sync_music(&mut self, phase: GamePhase) {
        let should_play = phase.music_playing();
        if should_play == self.music_playing {
            return;
        }
        self.music_playing = should_play;

        let Some(track) = &self.music else { return };
        if should_play {
            if let Err(e) = track.play() {
                log::warn!("Music playback failed: {:?}", e);
            }
        } else {
            let _ = track.pause();
            track.set_current_time(0.0);
        }
    }

    /// Play the cues for a batch of simulation events
    pub fn handle_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Impact => self.play_impact(ctx, vol),
            SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            SoundEffect::Victory => self.play_victory(ctx, vol),
            SoundEffect::Defeat => self.play_defeat(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Crash - low boom with a metallic crunch on top
    fn play_impact(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(25.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.6).ok();

        for (freq, len) in [(1800.0, 0.08), (2600.0, 0.05)] {
            if let Some((crunch, crunch_gain)) = self.create_osc(ctx, freq, OscillatorType::Square)
            {
                crunch_gain.gain().set_value_at_time(vol * 0.15, t).ok();
                crunch_gain
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + len)
                    .ok();
                crunch.start().ok();
                crunch.stop_with_when(t + len + 0.05).ok();
            }
        }
    }

    /// Level up - quick rising pair
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        self.play_arpeggio(ctx, vol * 0.3, &[523.0, 784.0], 0.1, OscillatorType::Triangle);
    }

    /// Victory - celebratory run
    fn play_victory(&self, ctx: &AudioContext, vol: f32) {
        self.play_arpeggio(
            ctx,
            vol * 0.3,
            &[523.0, 659.0, 784.0, 1047.0],
            0.12,
            OscillatorType::Triangle,
        );
    }

    /// Defeat - sad descending
    fn play_defeat(&self, ctx: &AudioContext, vol: f32) {
        self.play_arpeggio(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], 0.2, OscillatorType::Sine);
    }

    fn play_arpeggio(
        &self,
        ctx: &AudioContext,
        vol: f32,
        notes: &[f32],
        spacing: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in notes.iter().enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + spacing * 1.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + spacing * 2.0).ok();
            }
        }
    }
}
