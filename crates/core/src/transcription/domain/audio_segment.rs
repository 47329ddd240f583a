/// Decoded mono audio: PCM samples normalized to [-1.0, 1.0].
///
/// Recognizers consume exactly this shape; the reader is responsible for
/// downmixing and resampling whatever the source container held.
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_creates_segment_with_correct_fields() {
        let samples = vec![0.0f32; 16000];
        let seg = AudioSegment::new(samples.clone(), 16000);
        assert_eq!(seg.samples(), &samples[..]);
        assert_eq!(seg.sample_rate(), 16000);
        assert!(!seg.is_empty());
    }

    #[test]
    fn test_duration_secs() {
        let seg = AudioSegment::new(vec![0.0; 48000], 16000);
        assert_relative_eq!(seg.duration_secs(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_segment() {
        let seg = AudioSegment::new(Vec::new(), 16000);
        assert!(seg.is_empty());
        assert_eq!(seg.duration_secs(), 0.0);
    }
}
