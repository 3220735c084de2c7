// Immutable time series and the index views derived from them
use super::sample::Sample;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// An ordered, immutable sequence of samples.
///
/// Cloning is cheap and shares the underlying records. Every constructed
/// series gets a fresh id, so two loads of identical data are still distinct
/// series for caching purposes.
#[derive(Debug)]
pub struct Series<T> {
    id: u64,
    records: Arc<[T]>,
}

impl<T> Clone for Series<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Sample> Series<T> {
    /// Builds a series, sorting by timestamp if the input is out of order.
    /// The sort is stable so records sharing a timestamp keep their order.
    pub fn new(mut records: Vec<T>) -> Self {
        if !records.is_sorted_by_key(|r| r.timestamp()) {
            tracing::debug!("Sorting {} out-of-order records", records.len());
            records.sort_by_key(|r| r.timestamp());
        }
        Self {
            id: NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed),
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Series<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A read-only subset of a [`Series`], stored as indices into it.
#[derive(Debug)]
pub struct DownsampledView<T> {
    series: Series<T>,
    indices: Arc<[usize]>,
}

impl<T> Clone for DownsampledView<T> {
    fn clone(&self) -> Self {
        Self {
            series: self.series.clone(),
            indices: Arc::clone(&self.indices),
        }
    }
}

impl<T> DownsampledView<T> {
    /// Callers must pass ascending indices that are in bounds for `series`.
    pub(crate) fn from_parts(series: Series<T>, indices: Arc<[usize]>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(indices.last().is_none_or(|&i| i < series.len()));
        Self { series, indices }
    }

    pub fn series(&self) -> &Series<T> {
        &self.series
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let records = self.series.as_slice();
        self.indices.iter().map(move |&i| &records[i])
    }
}
