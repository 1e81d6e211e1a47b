//! Boundary between query evaluation and sample storage.
//!
//! The compiler never writes samples; the trait is declared here so fixture
//! loaders and the evaluator agree on one append contract.

use crate::labels::LabelSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("unknown series reference {0}")]
    UnknownReference(u64),

    #[error("out of order sample")]
    OutOfOrder,

    #[error("appender already committed or rolled back")]
    Closed,
}

/// Batched sample writer. Samples become visible on `commit`.
pub trait Appender {
    /// Appends a sample for `labels`, returning a reference usable with [`Appender::add_fast`].
    fn add(&mut self, labels: &LabelSet, timestamp: i64, value: f64) -> Result<u64, StorageError>;

    /// Appends a sample to a series previously returned by [`Appender::add`].
    fn add_fast(
        &mut self,
        labels: &LabelSet,
        reference: u64,
        timestamp: i64,
        value: f64,
    ) -> Result<(), StorageError>;

    fn commit(&mut self) -> Result<(), StorageError>;

    fn rollback(&mut self) -> Result<(), StorageError>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopAppender;

impl Appender for NopAppender {
    fn add(&mut self, _: &LabelSet, _: i64, _: f64) -> Result<u64, StorageError> {
        Ok(0)
    }

    fn add_fast(&mut self, _: &LabelSet, _: u64, _: i64, _: f64) -> Result<(), StorageError> {
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub labels: LabelSet,
    pub timestamp: i64,
    pub value: f64,
}

/// Buffers samples in memory and exposes them once committed.
#[derive(Debug, Default)]
pub struct CollectingAppender {
    series: Vec<LabelSet>,
    pending: Vec<Sample>,
    committed: Vec<Sample>,
    closed: bool,
}

impl CollectingAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.committed
    }

    fn push(&mut self, labels: LabelSet, timestamp: i64, value: f64) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        let previous = self
            .pending
            .iter()
            .chain(self.committed.iter())
            .filter(|s| s.labels == labels)
            .map(|s| s.timestamp)
            .max();
        if previous.is_some_and(|t| t > timestamp) {
            return Err(StorageError::OutOfOrder);
        }
        self.pending.push(Sample {
            labels,
            timestamp,
            value,
        });
        Ok(())
    }
}

impl Appender for CollectingAppender {
    fn add(&mut self, labels: &LabelSet, timestamp: i64, value: f64) -> Result<u64, StorageError> {
        self.push(labels.clone(), timestamp, value)?;
        let reference = match self.series.iter().position(|s| s == labels) {
            Some(index) => index,
            None => {
                self.series.push(labels.clone());
                self.series.len() - 1
            }
        };
        Ok(reference as u64)
    }

    fn add_fast(
        &mut self,
        _: &LabelSet,
        reference: u64,
        timestamp: i64,
        value: f64,
    ) -> Result<(), StorageError> {
        let labels = usize::try_from(reference)
            .ok()
            .and_then(|index| self.series.get(index))
            .cloned()
            .ok_or(StorageError::UnknownReference(reference))?;
        self.push(labels, timestamp, value)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        self.committed.append(&mut self.pending);
        self.closed = true;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        self.pending.clear();
        self.closed = true;
        Ok(())
    }
}
