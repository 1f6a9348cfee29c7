//! Sound effects synthesized in-process
//!
//! Short PCM16 mono tones built as WAV blobs and handed to macroquad's
//! audio backend once at startup. Playback is fire-and-forget and a failed
//! load simply mutes that effect.

use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Eat,
    Die,
}

#[derive(Clone, Copy)]
enum Waveform {
    Sine,
    Sawtooth,
}

/// Generate a single decaying tone as a complete WAV file
fn tone_wav(frequency_hz: f32, duration_seconds: f32, volume: f32, waveform: Waveform) -> Vec<u8> {
    let sample_rate: u32 = 44100;
    let num_samples: u32 = (duration_seconds * sample_rate as f32) as u32;
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2; // mono 16-bit
    let byte_rate: u32 = sample_rate * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    // RIFF header
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    // fmt chunk
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    // data chunk
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    for n in 0..num_samples {
        let t = n as f32 / sample_rate as f32;
        let phase = frequency_hz * t;
        let wave = match waveform {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Sawtooth => 2.0 * (phase - (phase + 0.5).floor()),
        };
        // Linear fade-out so the tone doesn't click at the end
        let envelope = 1.0 - t / duration_seconds;
        let sample = (amplitude * envelope * wave * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

pub struct SoundBank {
    eat: Option<Sound>,
    die: Option<Sound>,
    pub enabled: bool,
}

impl SoundBank {
    pub async fn load(enabled: bool) -> Self {
        let eat = load_sound_from_bytes(&tone_wav(600.0, 0.15, 0.5, Waveform::Sine))
            .await
            .ok();
        let die = load_sound_from_bytes(&tone_wav(200.0, 0.25, 0.6, Waveform::Sawtooth))
            .await
            .ok();
        Self { eat, die, enabled }
    }

    pub fn play(&self, kind: SoundKind) {
        if !self.enabled {
            return;
        }
        let (sound, volume) = match kind {
            SoundKind::Eat => (&self.eat, 0.35),
            SoundKind::Die => (&self.die, 0.60),
        };
        if let Some(sound) = sound {
            audio::play_sound(sound, PlaySoundParams { looped: false, volume });
        }
    }
}
