//! Synthesized page-turn sound.
//!
//! Three layers scheduled on one `AudioContext`: a short band-passed noise
//! "grab", a smoothed low-passed "swoosh" and a low sine "thump" as the page
//! lands. Sample generation is pure; only [`FlipSound::play`] touches Web Audio.

use web_sys::{AudioContext, BiquadFilterType, OscillatorType};

use crate::error::FlipbookError;

#[cfg(test)]
#[path = "audio_test.rs"]
mod audio_test;

pub const GRAB_SECS: f64 = 0.06;
const GRAB_DECAY: f64 = 60.0;
const GRAB_GAIN: f64 = 0.25;
const GRAB_BAND_HZ: f32 = 3000.0;
const GRAB_Q: f32 = 1.5;

pub const SWOOSH_SECS: f64 = 0.25;
pub const SWOOSH_PEAK_SECS: f64 = 0.08;
const SWOOSH_WIDTH_SECS: f64 = 0.06;
const SWOOSH_GAIN: f64 = 0.15;
const SWOOSH_SMOOTHING_PASSES: usize = 3;
const SWOOSH_CUTOFF_HZ: f32 = 2500.0;
const SWOOSH_DELAY: f64 = 0.02;

const THUMP_HZ: f32 = 80.0;
const THUMP_START: f64 = 0.18;
const THUMP_PEAK_AT: f64 = 0.2;
const THUMP_PEAK: f32 = 0.08;
const THUMP_FADE_AT: f64 = 0.32;
const THUMP_FLOOR: f32 = 0.001;
const THUMP_STOP: f64 = 0.35;

fn sample_count(sample_rate: f32, secs: f64) -> usize {
    (f64::from(sample_rate) * secs).round().max(0.0) as usize
}

/// Exponentially decaying noise burst. `noise` yields values in `[-1, 1]`.
pub fn grab_samples(sample_rate: f32, mut noise: impl FnMut() -> f32) -> Vec<f32> {
    let sr = f64::from(sample_rate);
    (0..sample_count(sample_rate, GRAB_SECS))
        .map(|i| {
            let t = i as f64 / sr;
            let env = (-t * GRAB_DECAY).exp() * GRAB_GAIN;
            (f64::from(noise()) * env) as f32
        })
        .collect()
}

/// Bell-enveloped noise, softened by repeated in-place `[1 2 1] / 4` passes.
pub fn swoosh_samples(sample_rate: f32, mut noise: impl FnMut() -> f32) -> Vec<f32> {
    let sr = f64::from(sample_rate);
    let mut data: Vec<f32> = (0..sample_count(sample_rate, SWOOSH_SECS))
        .map(|i| {
            let t = i as f64 / sr;
            let z = (t - SWOOSH_PEAK_SECS) / SWOOSH_WIDTH_SECS;
            let env = (-z * z).exp() * SWOOSH_GAIN;
            (f64::from(noise()) * env) as f32
        })
        .collect();
    for _ in 0..SWOOSH_SMOOTHING_PASSES {
        for i in 1..data.len().saturating_sub(1) {
            data[i] = (data[i - 1] + data[i] * 2.0 + data[i + 1]) / 4.0;
        }
    }
    data
}

fn js_noise() -> f32 {
    (js_sys::Math::random() * 2.0 - 1.0) as f32
}

/// Lazily created audio output. Browsers only allow an `AudioContext` to start
/// from a user gesture, so [`FlipSound::unlock`] is called from input handlers
/// and [`FlipSound::play`] stays silent until then.
#[derive(Default)]
pub struct FlipSound {
    ctx: Option<AudioContext>,
    enabled: bool,
}

impl FlipSound {
    pub fn new(enabled: bool) -> Self {
        Self { ctx: None, enabled }
    }

    pub fn unlock(&mut self) {
        if !self.enabled || self.ctx.is_some() {
            return;
        }
        match AudioContext::new() {
            Ok(ctx) => {
                let _ = ctx.resume();
                self.ctx = Some(ctx);
            }
            Err(err) => {
                log::warn!("audio unavailable: {}", FlipbookError::from(err));
                self.enabled = false;
            }
        }
    }

    pub fn play(&self) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        if let Err(err) = schedule(ctx) {
            log::debug!("flip sound failed: {err}");
        }
    }
}

fn schedule(ctx: &AudioContext) -> Result<(), FlipbookError> {
    let now = ctx.current_time();
    let sr = ctx.sample_rate();
    let out = ctx.destination();

    let mut grab = grab_samples(sr, js_noise);
    let grab_src = noise_source(ctx, &mut grab)?;
    let band = ctx.create_biquad_filter()?;
    band.set_type(BiquadFilterType::Bandpass);
    band.frequency().set_value(GRAB_BAND_HZ);
    band.q().set_value(GRAB_Q);
    grab_src.connect_with_audio_node(&band)?;
    band.connect_with_audio_node(&out)?;
    grab_src.start_with_when(now)?;

    let mut swoosh = swoosh_samples(sr, js_noise);
    let swoosh_src = noise_source(ctx, &mut swoosh)?;
    let low = ctx.create_biquad_filter()?;
    low.set_type(BiquadFilterType::Lowpass);
    low.frequency().set_value(SWOOSH_CUTOFF_HZ);
    swoosh_src.connect_with_audio_node(&low)?;
    low.connect_with_audio_node(&out)?;
    swoosh_src.start_with_when(now + SWOOSH_DELAY)?;

    let osc = ctx.create_oscillator()?;
    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value(THUMP_HZ);
    let gain = ctx.create_gain()?;
    let level = gain.gain();
    level.set_value_at_time(0.0, now + THUMP_START)?;
    level.linear_ramp_to_value_at_time(THUMP_PEAK, now + THUMP_PEAK_AT)?;
    level.exponential_ramp_to_value_at_time(THUMP_FLOOR, now + THUMP_FADE_AT)?;
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&out)?;
    osc.start_with_when(now + THUMP_START)?;
    osc.stop_with_when(now + THUMP_STOP)?;
    Ok(())
}

fn noise_source(
    ctx: &AudioContext,
    samples: &mut [f32],
) -> Result<web_sys::AudioBufferSourceNode, FlipbookError> {
    let len = u32::try_from(samples.len()).map_err(|_| FlipbookError::Js("sound buffer too long".into()))?;
    let buffer = ctx.create_buffer(1, len.max(1), ctx.sample_rate())?;
    buffer.copy_to_channel(samples, 0)?;
    let src = ctx.create_buffer_source()?;
    src.set_buffer(Some(&buffer));
    Ok(src)
}
