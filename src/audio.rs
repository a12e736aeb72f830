//! Audio system
//!
//! Procedurally generated sound effects via the Web Audio API - no external
//! files needed. The mapping from simulation events to effects is plain Rust
//! so it works (and is tested) on every target; playback is wasm32 only.

use rand::Rng;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Block destroyed; pitch multiplier varies per hit
    BlockBreak { pitch: f32 },
    /// Ball launched from idle
    Launch,
    /// Ball fell out of the field
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event<R: Rng>(event: &GameEvent, rng: &mut R) -> Option<Self> {
        match event {
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::BlockDestroyed { .. } => Some(SoundEffect::BlockBreak {
                pitch: rng.random_range(8..=12u8) as f32 / 10.0,
            }),
            GameEvent::Launched => Some(SoundEffect::Launch),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::WallBounce | GameEvent::Restarted => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Gain from the settings (already zero when muted there)
        volume: f32,
        /// Temporary mute, e.g. while the window is unfocused
        muted: bool,
        rng: Pcg32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings, seed: u64) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                muted: false,
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.volume
            }
        }

        /// Play whatever sound belongs to a simulation event
        pub fn play_event(&mut self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event, &mut self.rng) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::PaddleHit => self.play_paddle_hit(ctx, vol),
                SoundEffect::BlockBreak { pitch } => self.play_block_break(ctx, vol, pitch),
                SoundEffect::Launch => self.play_launch(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
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

        /// Paddle hit - solid thump
        fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(110.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Block break - short bright blip, pitch varies per hit
        fn play_block_break(&self, ctx: &AudioContext, vol: f32, pitch: f32) {
            let freq = 660.0 * pitch;
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Launch - quick rising chirp
        fn play_launch(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(900.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Game over - long falling tone
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.9)
                .ok();
            osc.frequency().set_value_at_time(440.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.8)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 1.0).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_event_mapping() {
        let mut rng = Pcg32::seed_from_u64(1);

        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleHit, &mut rng),
            Some(SoundEffect::PaddleHit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver, &mut rng),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Restarted, &mut rng), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::WallBounce, &mut rng), None);
    }

    #[test]
    fn test_block_pitch_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let event = GameEvent::BlockDestroyed {
            column: 0,
            row: 0,
            points: 8,
        };

        for _ in 0..200 {
            match SoundEffect::for_event(&event, &mut rng) {
                Some(SoundEffect::BlockBreak { pitch }) => {
                    assert!((0.8..=1.2).contains(&pitch), "pitch {pitch} out of range");
                    // Steps of 0.1
                    let tenths = pitch * 10.0;
                    assert!((tenths - tenths.round()).abs() < 1e-4);
                }
                other => panic!("unexpected effect {other:?}"),
            }
        }
    }
}
