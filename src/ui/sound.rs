/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely
/// (the stub SoundEngine does nothing).

use crate::sim::event::GameEvent;

/// One sound effect per kind of thing worth hearing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Key,
    Unlock,
    Push,
    Land,
}

/// Which cue an event plays. Plain walking and fall starts are silent.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::KeyCollected { .. } => Some(Cue::Key),
        GameEvent::LocksOpened { count, .. } if *count > 0 => Some(Cue::Unlock),
        GameEvent::LocksOpened { .. } => None,
        GameEvent::BlockPushed { .. } => Some(Cue::Push),
        GameEvent::BlockLanded { .. } => Some(Cue::Land),
        GameEvent::PlayerMoved { .. } | GameEvent::BlockStartedFalling { .. } => None,
    }
}

/// Cues for one tick, each at most once, in first-seen order.
pub fn cues_for(events: &[GameEvent]) -> Vec<Cue> {
    let mut cues = Vec::new();
    for cue in events.iter().filter_map(cue_for) {
        if !cues.contains(&cue) {
            cues.push(cue);
        }
    }
    cues
}

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Cue;

    const SAMPLE_RATE: u32 = 22050;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_key: Arc<Vec<u8>>,
        sfx_unlock: Arc<Vec<u8>>,
        sfx_push: Arc<Vec<u8>>,
        sfx_land: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("no audio output, running silent: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_key: Arc::new(make_wav(&gen_key())),
                sfx_unlock: Arc::new(make_wav(&gen_unlock())),
                sfx_push: Arc::new(make_wav(&gen_push())),
                sfx_land: Arc::new(make_wav(&gen_land())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_cue(&self, cue: Cue) {
            match cue {
                Cue::Key => self.play(&self.sfx_key),
                Cue::Unlock => self.play(&self.sfx_unlock),
                Cue::Push => self.play(&self.sfx_push),
                Cue::Land => self.play(&self.sfx_land),
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators: mono f32 samples
    // ════════════════════════════════════════════════════════════

    fn tone(freq: f32, i: usize) -> f32 {
        let t = i as f32 / SAMPLE_RATE as f32;
        (t * freq * 2.0 * std::f32::consts::PI).sin()
    }

    /// Key pickup: quick two-note rise A5→E6
    fn gen_key() -> Vec<f32> {
        let notes = [880.0_f32, 1319.0];
        let note_dur = 0.05;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                // Sine + 3rd harmonic for a square-ish edge
                let wave = tone(freq, i) * 0.7 + tone(freq * 3.0, i) * 0.3;
                samples.push(wave * env * 0.25);
            }
        }
        samples
    }

    /// Locks opening: bright chime G5 then C6, held a little longer
    fn gen_unlock() -> Vec<f32> {
        let pairs = [(784.0_f32, 0.08), (1047.0, 0.18)];
        let mut samples = Vec::new();
        for &(freq, dur) in &pairs {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = tone(freq, i) * 0.7 + tone(freq * 2.0, i) * 0.3;
                samples.push(wave * env * 0.3);
            }
        }
        samples
    }

    /// Push: low scrape, noise over a falling tone
    fn gen_push() -> Vec<f32> {
        let duration = 0.1;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 24680;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 180.0 - t * 60.0;
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(0.8);
                (tone(freq, i) * 0.5 + noise * 0.5) * env * 0.25
            })
            .collect()
    }

    /// Landing: short thud
    fn gen_land() -> Vec<f32> {
        let duration = 0.08;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 140.0 - t * 80.0;
                let env = (1.0 - t).powf(2.0);
                tone(freq, i) * env * 0.35
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder: wraps f32 samples into a 16-bit PCM buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2;
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn wav_header_matches_payload() {
            let wav = make_wav(&gen_land());
            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(&wav[8..12], b"WAVE");
            let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
            assert_eq!(wav.len(), 44 + data_size as usize);
        }
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_cue(&self, _cue: Cue) {}
}

impl SoundEngine {
    pub fn play_events(&self, events: &[GameEvent]) {
        for cue in cues_for(events) {
            self.play_cue(cue);
        }
    }
}
