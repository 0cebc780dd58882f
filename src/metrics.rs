//! Single-pass statistics over an archive document

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, info};

use crate::dataset::{ClipKind, Dataset};
use crate::timestamp::clip_duration;

/// Occurrence counts per label, reported most-common first.
///
/// Ties keep the order in which labels were first seen.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// `(label, count)` in first-seen order
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.index.get(label).map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by descending count, then first-seen position
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(usize, &str, usize)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(seen, (label, count))| (seen, label.as_str(), *count))
            .collect();
        ranked.sort_by_key(|&(seen, _, count)| (Reverse(count), seen));
        ranked.into_iter().map(|(_, label, count)| (label, count)).collect()
    }
}

impl Serialize for FrequencyTable {
    /// Serialized as an ordered list of `[label, count]` pairs
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.most_common())
    }
}

/// Clip lengths in seconds, split by tracked clip kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClipLengths {
    pub delivery: Vec<i128>,
    pub review: Vec<i128>,
}

impl ClipLengths {
    fn samples_mut(&mut self, kind: ClipKind) -> Option<&mut Vec<i128>> {
        match kind {
            ClipKind::Delivery => Some(&mut self.delivery),
            ClipKind::Review => Some(&mut self.review),
            ClipKind::Other => None,
        }
    }

    pub fn samples(&self, kind: ClipKind) -> &[i128] {
        match kind {
            ClipKind::Delivery => &self.delivery,
            ClipKind::Review => &self.review,
            ClipKind::Other => &[],
        }
    }

    /// Arithmetic mean, or 0 with no samples
    pub fn average(&self, kind: ClipKind) -> f64 {
        mean(self.samples(kind))
    }
}

fn mean(samples: &[i128]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<i128>() as f64 / samples.len() as f64
}

/// Aggregate statistics for one archive document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    pub video_count: usize,
    pub delivery_count: usize,
    pub format_counts: FrequencyTable,
    pub onfield_decision_counts: FrequencyTable,
    pub final_decision_counts: FrequencyTable,
    pub drs_pitching_counts: FrequencyTable,
    pub drs_impact_counts: FrequencyTable,
    pub drs_wickets_counts: FrequencyTable,
    #[serde(skip)]
    pub clip_lengths: ClipLengths,
    pub avg_delivery_clip_secs: f64,
    pub avg_review_clip_secs: f64,
}

impl Metrics {
    pub fn average_clip_length(&self, kind: ClipKind) -> f64 {
        match kind {
            ClipKind::Delivery => self.avg_delivery_clip_secs,
            ClipKind::Review => self.avg_review_clip_secs,
            ClipKind::Other => 0.0,
        }
    }
}

/// Walk every video, delivery and clip once and tally what is present.
///
/// Never fails: absent fields are not counted and clips whose timestamps are
/// missing, malformed or run backwards are left out of the averages.
pub fn aggregate(dataset: &Dataset) -> Metrics {
    let mut metrics = Metrics::default();

    for video in &dataset.videos {
        metrics.video_count += 1;
        let format = video.match_info.format.as_deref();

        for delivery in &video.deliveries {
            metrics.delivery_count += 1;

            if let Some(format) = format {
                metrics.format_counts.increment(format);
            }
            if let Some(decision) = &delivery.onfield_decision {
                metrics.onfield_decision_counts.increment(decision);
            }
            if let Some(decision) = &delivery.final_decision {
                metrics.final_decision_counts.increment(decision);
            }
            if let Some(drs) = &delivery.drs {
                if let Some(pitching) = &drs.pitching {
                    metrics.drs_pitching_counts.increment(pitching);
                }
                if let Some(impact) = &drs.impact {
                    metrics.drs_impact_counts.increment(impact);
                }
                if let Some(wickets) = &drs.wickets {
                    metrics.drs_wickets_counts.increment(wickets);
                }
            }

            for clip in &delivery.clips {
                let Some(samples) = metrics.clip_lengths.samples_mut(clip.kind) else {
                    continue;
                };
                let Some((start, end)) = clip.bounds() else {
                    debug!(video = ?video.id, "skipping clip without start/end");
                    continue;
                };
                match clip_duration(start, end) {
                    Ok(seconds) if seconds >= 0 => samples.push(seconds),
                    Ok(seconds) => {
                        debug!(video = ?video.id, start, end, seconds, "skipping clip with negative length")
                    }
                    Err(e) => debug!(video = ?video.id, error = %e, "skipping clip with bad timestamp"),
                }
            }
        }
    }

    metrics.avg_delivery_clip_secs = metrics.clip_lengths.average(ClipKind::Delivery);
    metrics.avg_review_clip_secs = metrics.clip_lengths.average(ClipKind::Review);

    info!(
        videos = metrics.video_count,
        deliveries = metrics.delivery_count,
        delivery_clips = metrics.clip_lengths.delivery.len(),
        review_clips = metrics.clip_lengths.review.len(),
        "aggregated archive"
    );
    metrics
}

/// [`aggregate`] straight from a raw document
pub fn aggregate_document(document: &Value) -> Metrics {
    aggregate(&Dataset::from_value(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metrics_for(doc: Value) -> Metrics {
        aggregate_document(&doc)
    }

    #[test]
    fn test_most_common_ranks_by_count() {
        let metrics = metrics_for(json!({
            "videos": [{
                "deliveries": [
                    { "onfield_decision": "Out" },
                    { "onfield_decision": "Out" },
                    { "onfield_decision": "Not Out" }
                ]
            }]
        }));
        assert_eq!(
            metrics.onfield_decision_counts.most_common(),
            vec![("Out", 2), ("Not Out", 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut table = FrequencyTable::new();
        for label in ["Umpire's call", "Hitting", "Missing", "Hitting", "Missing", "Umpire's call"] {
            table.increment(label);
        }
        table.increment("Missing");
        assert_eq!(
            table.most_common(),
            vec![("Missing", 3), ("Umpire's call", 2), ("Hitting", 2)]
        );
        assert_eq!(table.get("Hitting"), 2);
        assert_eq!(table.get("Clipping"), 0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_format_counted_per_delivery() {
        let metrics = metrics_for(json!({
            "videos": [
                { "match": { "format": "Test" }, "deliveries": [{}, {}] },
                { "match": { "format": "ODI" }, "deliveries": [{}] },
                { "deliveries": [{}] }
            ]
        }));
        assert_eq!(metrics.video_count, 3);
        assert_eq!(metrics.delivery_count, 4);
        assert_eq!(metrics.format_counts.most_common(), vec![("Test", 2), ("ODI", 1)]);
    }

    #[test]
    fn test_drs_fields_counted_independently() {
        let metrics = metrics_for(json!({
            "videos": [{
                "deliveries": [
                    { "drs": { "pitching": "In line", "impact": "In line", "wickets": "Hitting" } },
                    { "drs": { "pitching": "Outside leg" } },
                    { "drs": { "impact": "", "wickets": "Umpire's call" } },
                    { "final_decision": "Out" }
                ]
            }]
        }));
        assert_eq!(metrics.drs_pitching_counts.most_common(), vec![("In line", 1), ("Outside leg", 1)]);
        assert_eq!(metrics.drs_impact_counts.most_common(), vec![("In line", 1)]);
        assert_eq!(metrics.drs_wickets_counts.len(), 2);
        assert_eq!(metrics.final_decision_counts.get("Out"), 1);
    }

    #[test]
    fn test_bad_clips_excluded_from_averages() {
        let metrics = metrics_for(json!({
            "videos": [{
                "deliveries": [{
                    "clips": [
                        { "type": "delivery", "start": "00:00:10", "end": "00:00:20" },
                        { "type": "delivery", "start": "00:00:30", "end": "00:00:20" },
                        { "type": "delivery", "start": "00:00:10" },
                        { "type": "delivery", "start": "0:10", "end": "00:00:20" },
                        { "type": "review", "start": "", "end": "00:00:20" },
                        { "type": "replay", "start": "00:00:00", "end": "00:10:00" }
                    ]
                }]
            }]
        }));
        assert_eq!(metrics.clip_lengths.delivery, vec![10]);
        assert!(metrics.clip_lengths.review.is_empty());
        assert_eq!(metrics.avg_delivery_clip_secs, 10.0);
        assert_eq!(metrics.avg_review_clip_secs, 0.0);
    }

    #[test]
    fn test_oversized_timestamps_skip_only_that_clip() {
        let metrics = metrics_for(json!({
            "videos": [{ "deliveries": [{ "clips": [
                { "type": "delivery", "start": "00:00:00", "end": "9999999999999999:00:00" },
                { "type": "delivery", "start": "00:00:10", "end": "00:00:40" },
                { "type": "review", "start": "00:00:00", "end": "3000000000000000:00:00" }
            ]}]}]
        }));
        assert_eq!(metrics.delivery_count, 1);
        assert_eq!(metrics.clip_lengths.delivery, vec![30]);
        assert_eq!(metrics.clip_lengths.review, vec![3_000_000_000_000_000i128 * 3600]);
        assert!(metrics.avg_review_clip_secs > 0.0);
    }

    #[test]
    fn test_zero_length_clip_counts() {
        let metrics = metrics_for(json!({
            "videos": [{ "deliveries": [{ "clips": [
                { "type": "review", "start": "00:01:00", "end": "00:01:00" },
                { "type": "review", "start": "00:01:00", "end": "00:01:30" }
            ]}]}]
        }));
        assert_eq!(metrics.clip_lengths.review, vec![0, 30]);
        assert_eq!(metrics.average_clip_length(ClipKind::Review), 15.0);
    }

    #[test]
    fn test_every_video_entry_is_counted() {
        let metrics = metrics_for(json!({
            "videos": [{ "match": { "format": "ODI" }, "deliveries": [{}] }, null, 5]
        }));
        assert_eq!(metrics.video_count, 3);
        assert_eq!(metrics.delivery_count, 1);
    }

    #[test]
    fn test_empty_document() {
        let metrics = metrics_for(json!({}));
        assert_eq!(metrics.video_count, 0);
        assert_eq!(metrics.delivery_count, 0);
        assert_eq!(metrics.avg_delivery_clip_secs, 0.0);
        assert!(metrics.format_counts.is_empty());
    }

    #[test]
    fn test_frequency_table_serializes_ranked() {
        let mut table = FrequencyTable::new();
        table.increment("ODI");
        table.increment("Test");
        table.increment("Test");
        assert_eq!(serde_json::to_value(&table).unwrap(), json!([["Test", 2], ["ODI", 1]]));
    }
}
