//! Audio system using Web Audio API
//!
//! Sound effects are synthesized from oscillators; nothing is downloaded.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundEffect;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    /// Page hidden; nothing should play until it is visible again
    suspended: bool,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
            suspended: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&mut self) {
        self.suspended = false;
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Silence everything while the page is hidden
    pub fn suspend(&mut self) {
        self.suspended = true;
        if let Some(ctx) = &self.ctx {
            let _ = ctx.suspend();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 || self.suspended {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers start the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::ButtonClick => self.play_click(ctx, vol),
            SoundEffect::Warning => self.play_warning(ctx, vol),
            SoundEffect::Shhh => self.play_shhh(ctx, vol),
            SoundEffect::RevealCrewmate => self.play_reveal_crewmate(ctx, vol),
            SoundEffect::RevealImpostor => self.play_reveal_impostor(ctx, vol),
            SoundEffect::Kill => self.play_kill(ctx, vol),
            SoundEffect::Report => self.play_report(ctx, vol),
            SoundEffect::EmergencyMeeting => self.play_emergency(ctx, vol),
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

    /// One note with an exponential fade, optionally sliding to `end_freq`
    #[allow(clippy::too_many_arguments)]
    fn tone(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        freq: f32,
        end_freq: Option<f32>,
        delay: f64,
        duration: f64,
        peak: f32,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        if let Some(end) = end_freq {
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + duration)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }

    /// Button click - short blip
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sine, 800.0, Some(600.0), 0.0, 0.06, vol * 0.3);
    }

    /// Refused action - two low buzzes
    fn play_warning(&self, ctx: &AudioContext, vol: f32) {
        for i in 0..2 {
            self.tone(ctx, OscillatorType::Square, 220.0, None, i as f64 * 0.15, 0.1, vol * 0.15);
        }
    }

    /// Shhh - hiss approximated by a falling high sawtooth
    fn play_shhh(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sawtooth, 3200.0, Some(1800.0), 0.0, 0.9, vol * 0.06);
        self.tone(ctx, OscillatorType::Sawtooth, 4100.0, Some(2600.0), 0.02, 0.85, vol * 0.04);
    }

    /// Crewmate reveal - bright rising arpeggio
    fn play_reveal_crewmate(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [262.0, 330.0, 392.0, 523.0].iter().enumerate() {
            self.tone(ctx, OscillatorType::Triangle, *freq, None, i as f64 * 0.12, 0.5, vol * 0.3);
        }
    }

    /// Impostor reveal - ominous descent over a drone
    fn play_reveal_impostor(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sine, 55.0, None, 0.0, 1.6, vol * 0.4);
        for (i, freq) in [220.0, 185.0, 147.0, 110.0].iter().enumerate() {
            self.tone(ctx, OscillatorType::Sawtooth, *freq, None, i as f64 * 0.2, 0.4, vol * 0.15);
        }
    }

    /// Kill - stab and thud
    fn play_kill(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sawtooth, 1200.0, Some(200.0), 0.0, 0.12, vol * 0.25);
        self.tone(ctx, OscillatorType::Sine, 120.0, Some(40.0), 0.08, 0.3, vol * 0.5);
    }

    /// Body reported - alternating alarm
    fn play_report(&self, ctx: &AudioContext, vol: f32) {
        for i in 0..6 {
            let freq = if i % 2 == 0 { 880.0 } else { 660.0 };
            self.tone(ctx, OscillatorType::Square, freq, None, i as f64 * 0.15, 0.14, vol * 0.15);
        }
    }

    /// Emergency meeting - rising siren
    fn play_emergency(&self, ctx: &AudioContext, vol: f32) {
        for i in 0..2 {
            let delay = i as f64 * 0.6;
            self.tone(ctx, OscillatorType::Sawtooth, 600.0, Some(1200.0), delay, 0.3, vol * 0.15);
            self.tone(ctx, OscillatorType::Sawtooth, 1200.0, Some(600.0), delay + 0.3, 0.3, vol * 0.15);
        }
    }
}
