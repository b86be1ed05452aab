use crate::config::{ProcessorConfig, ProcessorKind};
use crate::error::{BufferError, Result};
use crate::signal_processing::{DelayLine, Filter, FirFilter};

enum Stage {
    Delay(DelayLine<f64>),
    Fir(FirFilter<f64>),
}

/// Block processor that runs samples through a configured delay line or FIR filter
pub struct Processor {
    stage: Stage,
    kind: ProcessorKind,
    samples_processed: usize,
}

impl Processor {
    pub fn from_config(kind: ProcessorKind, config: &ProcessorConfig) -> Result<Self> {
        let stage = match kind {
            ProcessorKind::Delay => Stage::Delay(config.delay_line()?),
            ProcessorKind::Fir => {
                if config.fir.taps.is_empty() {
                    return Err(BufferError::EmptyTaps);
                }
                Stage::Fir(config.fir_filter()?)
            }
        };

        log::info!("Processor: {} over {} slots", kind, config.buffer.capacity);

        Ok(Self {
            stage,
            kind,
            samples_processed: 0,
        })
    }

    /// Process a block of samples in-place, one in and one out
    ///
    /// On error the samples before the failing one have been processed and
    /// the rest are untouched.
    pub fn process_block(&mut self, block: &mut [f64]) -> Result<()> {
        match &mut self.stage {
            Stage::Delay(delay) => {
                for sample in block.iter_mut() {
                    match delay.process(*sample) {
                        Ok(out) => *sample = out,
                        Err(e) => {
                            log::warn!(
                                "Delay line stopped after {} samples: {}",
                                self.samples_processed,
                                e
                            );
                            return Err(e);
                        }
                    }
                    self.samples_processed += 1;
                }
            }
            Stage::Fir(fir) => {
                fir.process_buffer(block);
                self.samples_processed += block.len();
            }
        }
        Ok(())
    }

    /// Zero the processor history without moving its pointers
    pub fn clear(&mut self) {
        match &mut self.stage {
            Stage::Delay(delay) => delay.clear(),
            Stage::Fir(fir) => fir.clear(),
        }
    }

    /// Latency in samples between an input and its main contribution to the output
    pub fn latency_samples(&self) -> usize {
        match &self.stage {
            Stage::Delay(delay) => delay.delay_samples(),
            Stage::Fir(fir) => fir.group_delay_samples(),
        }
    }

    pub fn kind(&self) -> ProcessorKind {
        self.kind
    }

    pub fn samples_processed(&self) -> usize {
        self.samples_processed
    }
}
