use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{WavReader, WavSpec, WavWriter};

use crate::error::{BufferError, Result};

/// Mono audio loaded from a WAV file, normalized to [-1, 1]
pub struct MonoWav {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Load a mono WAV file
///
/// Integer formats are scaled by their full-scale value.
///
/// # Errors
/// Returns `BufferError::UnsupportedChannels` for anything but one channel
pub fn load_mono_wav<P: AsRef<Path>>(path: P) -> Result<MonoWav> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(BufferError::UnsupportedChannels(spec.channels));
    }

    let samples = read_samples(reader, &spec)?;
    log::debug!(
        "Loaded {} samples at {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.as_ref().display()
    );

    Ok(MonoWav {
        samples,
        sample_rate: spec.sample_rate,
    })
}

fn read_samples(mut reader: WavReader<BufReader<File>>, spec: &WavSpec) -> Result<Vec<f32>> {
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Save mono 32-bit float samples to a WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
