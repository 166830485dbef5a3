//! Modulator sources for live sessions.
//!
//! - [`ModulatorFeed`]: anything that can hand the audio thread a block of mono samples
//! - [`capture_feed`]: lock-free SPSC ring for capture callbacks
//! - [`ModulatorPlayer`]: plays a preloaded buffer at variable speed

use ringbuf::traits::{Consumer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use robovox_core::{AtomicFlag, AtomicFloat, Arc, PLAYBACK_SPEED_RANGE};

/// Supplies mono modulator samples to the audio thread.
///
/// Implementations must not block or allocate.
pub trait ModulatorFeed {
    /// Write up to `block.len()` samples and return how many were written.
    fn fill(&mut self, block: &mut [f32]) -> usize;
}

impl ModulatorFeed for HeapCons<f32> {
    #[inline]
    fn fill(&mut self, block: &mut [f32]) -> usize {
        self.pop_slice(block)
    }
}

/// Create a ring buffer for pushing captured microphone samples to a session.
///
/// The producer half belongs to the capture callback; the consumer half is a
/// [`ModulatorFeed`].
pub fn capture_feed(capacity: usize) -> (HeapProd<f32>, HeapCons<f32>) {
    HeapRb::<f32>::new(capacity.max(1)).split()
}

/// Average interleaved frames down to mono.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    let scale = 1.0 / channels as f32;
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}

/// Variable-speed player over a preloaded mono buffer.
///
/// Speed and looping can be changed from any thread; speed is read once per
/// block and clamped to [`PLAYBACK_SPEED_RANGE`].
#[derive(Debug, Clone)]
pub struct ModulatorPlayer {
    samples: Arc<[f32]>,
    position: f64,
    speed: Arc<AtomicFloat>,
    looping: Arc<AtomicFlag>,
}

impl ModulatorPlayer {
    pub fn new(samples: impl Into<Arc<[f32]>>) -> Self {
        Self {
            samples: samples.into(),
            position: 0.0,
            speed: Arc::new(AtomicFloat::new(PLAYBACK_SPEED_RANGE.default)),
            looping: Arc::new(AtomicFlag::new(false)),
        }
    }

    /// Build from interleaved multi-channel audio.
    pub fn from_interleaved(interleaved: &[f32], channels: usize) -> Self {
        Self::new(downmix(interleaved, channels))
    }

    pub fn with_looping(self, looping: bool) -> Self {
        self.looping.set(looping);
        self
    }

    pub fn with_speed(self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn set_speed(&self, speed: f32) {
        self.speed.set(PLAYBACK_SPEED_RANGE.clamp(speed));
    }

    pub fn speed(&self) -> f32 {
        self.speed.get()
    }

    /// Shared speed control, for adjusting playback from another thread.
    pub fn speed_handle(&self) -> Arc<AtomicFloat> {
        Arc::clone(&self.speed)
    }

    pub fn set_looping(&self, looping: bool) {
        self.looping.set(looping);
    }

    pub fn is_looping(&self) -> bool {
        self.looping.get()
    }

    pub fn looping_handle(&self) -> Arc<AtomicFlag> {
        Arc::clone(&self.looping)
    }

    /// Read position in (fractional) samples.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True once a non-looping player has run past its last sample.
    pub fn is_finished(&self) -> bool {
        !self.is_looping() && self.position >= self.samples.len() as f64
    }

    pub fn reset(&mut self) {
        self.position = 0.0;
    }

    #[inline]
    fn sample_at(&self, index: usize, looping: bool) -> f32 {
        match self.samples.get(index) {
            Some(&x) => x,
            None if looping => self.samples[index % self.samples.len()],
            None => 0.0,
        }
    }
}

impl ModulatorFeed for ModulatorPlayer {
    fn fill(&mut self, block: &mut [f32]) -> usize {
        let len = self.samples.len();
        if len == 0 {
            return 0;
        }

        // The atomic may hold an unclamped value if written through the shared handle
        let speed = PLAYBACK_SPEED_RANGE.clamp(self.speed.get()) as f64;
        let looping = self.looping.get();
        let end = len as f64;

        let mut written = 0;
        for slot in block.iter_mut() {
            if self.position >= end {
                if !looping {
                    break;
                }
                self.position %= end;
            }

            let index = self.position as usize;
            let frac = (self.position - index as f64) as f32;
            let a = self.samples[index];
            let b = self.sample_at(index + 1, looping);
            *slot = a + (b - a) * frac;

            self.position += speed;
            written += 1;
        }
        written
    }
}
