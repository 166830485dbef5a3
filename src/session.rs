//! Live vocoder session.
//!
//! A session owns one engine and is driven from the audio callback. Control
//! threads talk to it only through [`ParameterHandle`]; the newest published
//! snapshot is applied at the start of each block the session processes.

use crate::builder::VocoderSessionBuilder;
use crate::handle::ParameterHandle;
use crate::source::ModulatorFeed;
use robovox_core::{EngineConfig, SharedParameters};
use robovox_dsp::VocoderEngine;

pub struct VocoderSession {
    config: EngineConfig,
    engine: VocoderEngine,
    shared: SharedParameters,
    /// Modulator staging for [`render_from`](Self::render_from)
    input: Vec<f32>,
    /// Mono engine output before interleaving
    mono: Vec<f32>,
}

impl VocoderSession {
    pub fn builder() -> VocoderSessionBuilder {
        VocoderSessionBuilder::default()
    }

    pub(crate) fn new(
        config: EngineConfig,
        engine: VocoderEngine,
        shared: SharedParameters,
    ) -> Self {
        let block = config.block_size;
        Self {
            config,
            engine,
            shared,
            input: vec![0.0; block],
            mono: vec![0.0; block],
        }
    }

    /// Control surface for this session. Clone freely across threads.
    pub fn parameters(&self) -> ParameterHandle {
        ParameterHandle::new(self.shared.clone())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.config.channels
    }

    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    pub fn engine(&self) -> &VocoderEngine {
        &self.engine
    }

    #[inline]
    fn begin_block(&mut self) {
        let snapshot = self.shared.load();
        if snapshot != self.engine.parameters() {
            self.engine.set_parameters(snapshot);
        }
    }

    /// Process one block of planar output.
    ///
    /// The newest parameter snapshot is applied once, before the first frame.
    pub fn process_block(&mut self, modulator: Option<&[f32]>, outputs: &mut [&mut [f32]]) {
        self.begin_block();
        self.engine.process_block(modulator, outputs);
    }

    /// Process an interleaved output buffer of `channels()` channels.
    ///
    /// The buffer is split into chunks of at most `block_size()` frames, each
    /// treated as its own block. `modulator` is mono and indexed by frame;
    /// frames it does not cover are silent. A trailing partial frame is zeroed.
    pub fn process_interleaved(&mut self, modulator: Option<&[f32]>, output: &mut [f32]) {
        let channels = self.config.channels;
        let frames = output.len() / channels;
        let modulator = modulator.unwrap_or(&[]);

        let mut start = 0;
        while start < frames {
            let n = (frames - start).min(self.config.block_size);
            let end = modulator.len().min(start + n);
            let chunk = modulator.get(start..end).unwrap_or(&[]);

            self.begin_block();
            self.engine.process_block(Some(chunk), &mut [&mut self.mono[..n]]);
            let frames_out = &mut output[start * channels..(start + n) * channels];
            interleave(&self.mono[..n], frames_out, channels);
            start += n;
        }

        output[frames * channels..].fill(0.0);
    }

    /// Pull modulator audio from `feed` and fill an interleaved output buffer.
    ///
    /// When the feed under-runs, the frames it could not supply are silent.
    /// Returns the number of frames the feed actually provided.
    pub fn render_from<F>(&mut self, feed: &mut F, output: &mut [f32]) -> usize
    where
        F: ModulatorFeed + ?Sized,
    {
        let channels = self.config.channels;
        let frames = output.len() / channels;
        let mut supplied = 0;

        let mut start = 0;
        while start < frames {
            let n = (frames - start).min(self.config.block_size);
            let filled = feed.fill(&mut self.input[..n]).min(n);
            supplied += filled;

            self.begin_block();
            self.engine.process_block(Some(&self.input[..filled]), &mut [&mut self.mono[..n]]);
            let frames_out = &mut output[start * channels..(start + n) * channels];
            interleave(&self.mono[..n], frames_out, channels);
            start += n;
        }

        output[frames * channels..].fill(0.0);
        supplied
    }
}

#[inline]
fn interleave(mono: &[f32], output: &mut [f32], channels: usize) {
    for (frame, &value) in output.chunks_exact_mut(channels).zip(mono) {
        frame.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ModulatorPlayer;
    use robovox_core::ParameterSnapshot;

    fn session(channels: usize, block_size: usize) -> VocoderSession {
        VocoderSession::builder()
            .sample_rate(44100.0)
            .channels(channels)
            .block_size(block_size)
            .seed(11)
            .build()
            .unwrap()
    }

    fn voice(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| 0.5 * (std::f32::consts::TAU * 200.0 * i as f32 / 44100.0).sin())
            .collect()
    }

    #[test]
    fn test_interleaved_channels_are_identical() {
        let mut s = session(3, 64);
        let input = voice(300);
        let mut out = vec![0.0; 300 * 3];
        s.process_interleaved(Some(&input[..]), &mut out);

        for frame in out.chunks_exact(3) {
            assert_eq!(frame[0], frame[1]);
            assert_eq!(frame[1], frame[2]);
        }
        assert!(out.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_interleaved_matches_engine() {
        let mut s = session(1, 128);
        let mut engine = VocoderEngine::with_seed(44100.0, 11);
        let input = voice(1000);

        let mut live = vec![0.0; 1000];
        s.process_interleaved(Some(&input[..]), &mut live);

        let expected: Vec<f32> = input.iter().map(|&x| engine.process_sample(x)).collect();
        assert_eq!(live, expected);
    }

    #[test]
    fn test_missing_modulator_is_silent() {
        let mut s = session(2, 128);
        let mut out = vec![1.0; 512];
        s.process_interleaved(None, &mut out);
        assert!(out.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_trailing_partial_frame_is_zeroed() {
        let mut s = session(2, 128);
        let input = voice(10);
        let mut out = vec![1.0; 21];
        s.process_interleaved(Some(&input[..]), &mut out);
        assert_eq!(out[20], 0.0);
    }

    #[test]
    fn test_parameters_apply_at_block_start() {
        let mut s = session(1, 4);
        let handle = s.parameters();
        let input = voice(4);
        let mut out = vec![0.0; 4];

        s.process_block(Some(&input[..]), &mut [&mut out[..]]);
        assert_eq!(s.engine().parameters(), ParameterSnapshot::default());

        handle.set_formant_shift(1.0);
        // Not applied until the next block begins
        assert_eq!(s.engine().parameters().formant_shift, 0.0);

        s.process_block(Some(&input[..]), &mut [&mut out[..]]);
        assert_eq!(s.engine().parameters().formant_shift, 1.0);
    }

    #[test]
    fn test_render_from_underrun_is_silent() {
        let mut s = session(2, 64);
        let mut player = ModulatorPlayer::new(voice(100));
        let mut out = vec![1.0; 256 * 2];

        let supplied = s.render_from(&mut player, &mut out);
        assert_eq!(supplied, 100);
        assert!(out[100 * 2..].iter().all(|&x| x == 0.0));
        assert!(out[..100 * 2].iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_render_from_matches_process_interleaved() {
        let input = voice(500);
        let mut a = session(2, 128);
        let mut b = session(2, 128);

        let mut player = ModulatorPlayer::new(input.clone());
        let mut out_a = vec![0.0; 500 * 2];
        let mut out_b = vec![0.0; 500 * 2];
        a.render_from(&mut player, &mut out_a);
        b.process_interleaved(Some(&input[..]), &mut out_b);

        assert_eq!(out_a, out_b);
    }
}
