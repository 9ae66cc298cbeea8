//! Audio cues using the Web Audio API
//!
//! Procedurally generated - no sound files. If the browser won't give us an
//! `AudioContext` everything here is a silent no-op.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// One-shot cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Glass refilled - falling pitch sweep
    Pour,
    /// Glass empty - short sawtooth blip
    Empty,
}

/// The looping drinking tone and its vibrato LFO
struct DrinkTone {
    osc: OscillatorNode,
    gain: GainNode,
    lfo: OscillatorNode,
}

/// Audio manager for the glass
pub struct AudioManager {
    ctx: Option<AudioContext>,
    tone: Option<DrinkTone>,
    master_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            tone: None,
            master_volume: 0.8,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Context ready to play, resumed if the browser suspended it
    fn live_ctx(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator routed through a gain node to the speakers
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

    /// Start the gulping tone: 200 Hz sine wobbled ±20 Hz at 5 Hz.
    /// Does nothing if it's already playing.
    pub fn start_drinking_tone(&mut self) {
        if self.tone.is_some() || self.master_volume <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.1 * self.master_volume, t).ok();

        let Ok(lfo) = ctx.create_oscillator() else { return };
        let Ok(depth) = ctx.create_gain() else { return };
        lfo.frequency().set_value(5.0);
        depth.gain().set_value(20.0);
        lfo.connect_with_audio_node(&depth).ok();
        depth.connect_with_audio_param(&osc.frequency()).ok();

        osc.start().ok();
        lfo.start().ok();
        self.tone = Some(DrinkTone { osc, gain, lfo });
    }

    /// Fade the gulping tone out over 0.3 s
    pub fn stop_drinking_tone(&mut self) {
        let Some(tone) = self.tone.take() else { return };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();

        tone.gain
            .gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        tone.osc.stop_with_when(t + 0.3).ok();
        tone.lfo.stop_with_when(t + 0.3).ok();
    }

    /// Play a one-shot cue
    pub fn play(&self, cue: Cue) {
        let vol = self.master_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };

        match cue {
            Cue::Pour => self.play_pour(ctx, vol),
            Cue::Empty => self.play_empty(ctx, vol),
        }
    }

    /// Pour - 300 Hz sliding down to 150 Hz
    fn play_pour(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(150.0, t + 0.5)
            .ok();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();
    }

    /// Empty - low buzzy sawtooth
    fn play_empty(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }
}
