use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use burn::train::renderer::{MetricState, MetricsRenderer, TrainingProgress};
use log::info;
use serde::Serialize;

/// Name burn gives the accuracy metric
pub static ACCURACY: &str = "Accuracy";

/// Name burn gives the loss metric
pub static LOSS: &str = "Loss";

/// Which dataloader a metric value came from
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Split {
    /// The training batches
    Train,

    /// The validation batches
    Valid,
}

/// Per-epoch averages of one metric
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Series {
    /// Training averages, one per epoch
    pub train: Vec<f64>,

    /// Validation averages, one per epoch
    pub valid: Vec<f64>,
}

/// Metric values collected over a training run, averaged per epoch
#[derive(Clone, Debug, Default)]
pub struct History {
    totals: BTreeMap<(String, Split), BTreeMap<usize, (f64, usize)>>,
}

impl History {
    /// Record one batch value of a metric
    pub fn record(&mut self, split: Split, epoch: usize, name: &str, value: f64) {
        let (sum, count) = self
            .totals
            .entry((name.to_string(), split))
            .or_default()
            .entry(epoch)
            .or_insert((0.0, 0));

        *sum += value;
        *count += 1;
    }

    /// The epoch averages of a metric for one split
    pub fn averages(&self, name: &str, split: Split) -> Vec<f64> {
        self.totals
            .get(&(name.to_string(), split))
            .map(|epochs| {
                epochs
                    .values()
                    .map(|(sum, count)| sum / *count as f64)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The epoch averages of a metric for both splits
    pub fn series(&self, name: &str) -> Series {
        Series {
            train: self.averages(name, Split::Train),
            valid: self.averages(name, Split::Valid),
        }
    }

    /// The number of epochs seen on the training split
    pub fn epochs(&self) -> usize {
        self.totals
            .iter()
            .filter(|((_, split), _)| *split == Split::Train)
            .map(|(_, epochs)| epochs.len())
            .max()
            .unwrap_or(0)
    }
}

/// A metrics renderer that records numeric metrics into a shared [`History`] and logs epoch
/// boundaries instead of drawing a dashboard
#[derive(Clone, Default)]
pub struct Recorder {
    history: Arc<Mutex<History>>,
    pending_train: Vec<(String, f64)>,
    pending_valid: Vec<(String, f64)>,
    epoch: usize,
}

impl Recorder {
    /// Create a recorder and a handle to the history it fills
    pub fn new() -> (Self, Arc<Mutex<History>>) {
        let recorder = Self::default();
        let history = recorder.history.clone();

        (recorder, history)
    }

    // Metric updates for an iteration arrive just before its progress, which carries the epoch
    fn flush(&mut self, split: Split, epoch: usize) {
        let pending = match split {
            Split::Train => std::mem::take(&mut self.pending_train),
            Split::Valid => std::mem::take(&mut self.pending_valid),
        };

        if let Ok(mut history) = self.history.lock() {
            for (name, value) in pending {
                history.record(split, epoch, &name, value);
            }
        }
    }
}

impl MetricsRenderer for Recorder {
    fn update_train(&mut self, state: MetricState) {
        if let MetricState::Numeric(entry, value) = state {
            self.pending_train.push((entry.name, value));
        }
    }

    fn update_valid(&mut self, state: MetricState) {
        if let MetricState::Numeric(entry, value) = state {
            self.pending_valid.push((entry.name, value));
        }
    }

    fn render_train(&mut self, item: TrainingProgress) {
        if item.epoch != self.epoch {
            self.epoch = item.epoch;
            info!("Epoch {}/{}", item.epoch, item.epoch_total);
        }

        self.flush(Split::Train, item.epoch);
    }

    fn render_valid(&mut self, item: TrainingProgress) {
        self.flush(Split::Valid, item.epoch);
    }
}
