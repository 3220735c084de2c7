// Stride downsampling for chart rendering
use crate::domain::sample::Sample;
use crate::domain::series::{DownsampledView, Series};
use std::collections::HashMap;
use std::sync::Arc;

/// Keeps every `step`-th element, where `step = ceil(len / cap)`.
///
/// Inputs no longer than `cap` come back unchanged. The first element is
/// always kept, the last one only when it falls on the stride. No values are
/// averaged or interpolated. A `cap` of 0 behaves like 1.
pub fn downsample<T: Clone>(items: &[T], cap: usize) -> Vec<T> {
    let cap = cap.max(1);
    if items.len() <= cap {
        return items.to_vec();
    }

    let step = items.len().div_ceil(cap);
    items.iter().step_by(step).cloned().collect()
}

/// Downsamples a whole series into a view sharing its records.
pub fn downsample_series<T>(series: &Series<T>, cap: usize) -> DownsampledView<T> {
    let all: Vec<usize> = (0..series.len()).collect();
    DownsampledView::from_parts(series.clone(), downsample(&all, cap).into())
}

/// Memoizes views by (series id, cap).
///
/// Entries for series other than the one being requested are dropped on a
/// miss, so a refresh does not leave stale views behind.
#[derive(Debug)]
pub struct ViewCache<T> {
    views: HashMap<(u64, usize), Arc<[usize]>>,
    _records: std::marker::PhantomData<fn() -> T>,
}

impl<T: Sample> ViewCache<T> {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
            _records: std::marker::PhantomData,
        }
    }

    pub fn view(&mut self, series: &Series<T>, cap: usize) -> DownsampledView<T> {
        let key = (series.id(), cap);
        if let Some(indices) = self.views.get(&key) {
            return DownsampledView::from_parts(series.clone(), indices.clone());
        }

        self.views.retain(|(id, _), _| *id == series.id());
        let view = downsample_series(series, cap);
        tracing::debug!(
            "Downsampled series {} from {} to {} points (cap {})",
            series.id(),
            series.len(),
            view.len(),
            cap
        );
        self.views.insert(key, view.indices().into());
        view
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.views.len()
    }
}

impl<T: Sample> Default for ViewCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
