// Nearest-timestamp lookup across independently sampled series
use crate::domain::sample::Sample;

/// Returns the record whose timestamp is closest to `target`.
///
/// An exact timestamp match always wins, the first one in sequence order if
/// several records share it. Otherwise the record with the smallest absolute
/// distance wins, and on equal distances the earlier record is kept.
///
/// Linear in the series length. Series reaching this function are capped at
/// ingest to a few thousand records.
pub fn find_nearest<'a, T: Sample>(records: impl IntoIterator<Item = &'a T>, target: i64) -> Option<&'a T> {
    let mut best: Option<(&T, u64)> = None;
    for record in records {
        let distance = record.timestamp().abs_diff(target);
        if distance == 0 {
            return Some(record);
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((record, distance)),
        }
    }
    best.map(|(record, _)| record)
}
