//! ghpulse Chart: renders a store snapshot as a PNG bar chart.
//!
//! Events are bucketed by the minute of their store key; each bucket is one
//! bar, alternating blue and red. Only the most recent [`MAX_BUCKETS`]
//! buckets are drawn.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ghpulse_core::event::GitHubEvent;
use ghpulse_store::domain::timestamp_key::TimestampKey;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use thiserror::Error;

/// Image width in pixels.
pub const WIDTH: u32 = 800;
/// Image height in pixels.
pub const HEIGHT: u32 = 400;
/// Most recent minute buckets drawn.
pub const MAX_BUCKETS: usize = 60;

const MARGIN: u32 = 40;
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const BAR_COLORS: [Rgb<u8>; 2] = [Rgb([31, 119, 180]), Rgb([214, 39, 40])];

/// Chart rendering errors.
#[derive(Debug, Error)]
pub enum ChartError {
    /// PNG encoding failed.
    #[error("chart encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Number of events recorded in one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteBucket {
    /// Start of the minute.
    pub start: DateTime<Utc>,
    /// Events keyed within the minute.
    pub count: usize,
}

/// Groups the snapshot into per-minute counts, oldest first, keeping the
/// most recent [`MAX_BUCKETS`].
#[must_use]
pub fn minute_buckets(snapshot: &BTreeMap<TimestampKey, GitHubEvent>) -> Vec<MinuteBucket> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for key in snapshot.keys() {
        *counts.entry(key.instant().timestamp().div_euclid(60)).or_default() += 1;
    }

    let skip = counts.len().saturating_sub(MAX_BUCKETS);
    counts
        .into_iter()
        .skip(skip)
        .filter_map(|(minute, count)| {
            DateTime::from_timestamp(minute * 60, 0).map(|start| MinuteBucket { start, count })
        })
        .collect()
}

/// Renders the snapshot as a PNG bar chart.
///
/// # Errors
///
/// Returns `ChartError::Encode` if PNG encoding fails.
pub fn render_event_chart(snapshot: &BTreeMap<TimestampKey, GitHubEvent>) -> Result<Vec<u8>, ChartError> {
    let buckets = minute_buckets(snapshot);
    let mut canvas = RgbImage::from_pixel(WIDTH, HEIGHT, WHITE);

    let baseline = HEIGHT - MARGIN;
    fill(&mut canvas, MARGIN, WIDTH - MARGIN, baseline, baseline + 1, AXIS);
    fill(&mut canvas, MARGIN, MARGIN + 1, MARGIN, baseline + 1, AXIS);

    let peak = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    if peak > 0 {
        let plot_width = WIDTH - 2 * MARGIN;
        let plot_height = u64::from(HEIGHT - 2 * MARGIN);
        let slot = (plot_width / u32::try_from(buckets.len()).unwrap_or(u32::MAX)).max(1);
        let bar_width = (slot * 3 / 4).max(1);

        for (i, (bucket, color)) in buckets.iter().zip(BAR_COLORS.iter().cycle()).enumerate() {
            let height = plot_height * bucket.count as u64 / peak as u64;
            let height = u32::try_from(height).unwrap_or(u32::MAX);
            let left = MARGIN + 1 + u32::try_from(i).unwrap_or(u32::MAX).saturating_mul(slot);
            fill(
                &mut canvas,
                left,
                left.saturating_add(bar_width),
                baseline.saturating_sub(height),
                baseline,
                *color,
            );
        }
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(canvas).write_with_encoder(PngEncoder::new(&mut png))?;
    Ok(png)
}

// Fills the half-open rectangle [x0, x1) x [y0, y1), clipped to the canvas.
fn fill(canvas: &mut RgbImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(canvas.height()) {
        for x in x0..x1.min(canvas.width()) {
            canvas.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghpulse_core::event::EventCategory;
    use ghpulse_store::domain::timestamp_store::TimestampKeyedStore;
    use ghpulse_test_support::fixtures::{event, instant};

    fn snapshot_of(instants: &[DateTime<Utc>]) -> BTreeMap<TimestampKey, GitHubEvent> {
        let mut store = TimestampKeyedStore::new();
        for (i, at) in instants.iter().enumerate() {
            store.insert(*at, event(&i.to_string(), EventCategory::Watch, *at, 1, "octo/cat"));
        }
        store.snapshot()
    }

    #[test]
    fn test_minute_buckets_count_events_per_minute() {
        let snapshot = snapshot_of(&[instant(10, 0, 0), instant(10, 0, 0), instant(10, 0, 59), instant(10, 2, 1)]);

        let buckets = minute_buckets(&snapshot);

        assert_eq!(
            buckets,
            vec![
                MinuteBucket { start: instant(10, 0, 0), count: 3 },
                MinuteBucket { start: instant(10, 2, 0), count: 1 },
            ]
        );
    }

    #[test]
    fn test_minute_buckets_keep_most_recent() {
        let instants: Vec<_> = (0..70).map(|m| instant(8 + m / 60, m % 60, 0)).collect();
        let snapshot = snapshot_of(&instants);

        let buckets = minute_buckets(&snapshot);

        assert_eq!(buckets.len(), MAX_BUCKETS);
        assert_eq!(buckets[0].start, instant(8, 10, 0));
        assert_eq!(buckets[MAX_BUCKETS - 1].start, instant(9, 9, 0));
    }

    #[test]
    fn test_render_empty_snapshot_is_valid_png() {
        let png = render_event_chart(&BTreeMap::new()).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(*decoded.get_pixel(WIDTH / 2, HEIGHT / 2), WHITE);
    }

    #[test]
    fn test_render_draws_alternating_bars_scaled_to_peak() {
        // Arrange: two events in the first minute, one in the next.
        let snapshot = snapshot_of(&[instant(10, 0, 0), instant(10, 0, 1), instant(10, 1, 0)]);

        // Act
        let png = render_event_chart(&snapshot).unwrap();

        // Assert: slots are 360px wide, the peak bar spans the plot height.
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        let just_above_axis = HEIGHT - MARGIN - 5;
        assert_eq!(*decoded.get_pixel(MARGIN + 11, just_above_axis), BAR_COLORS[0]);
        assert_eq!(*decoded.get_pixel(MARGIN + 11, MARGIN + 5), BAR_COLORS[0]);
        assert_eq!(*decoded.get_pixel(MARGIN + 371, just_above_axis), BAR_COLORS[1]);
        assert_eq!(*decoded.get_pixel(MARGIN + 371, MARGIN + 5), WHITE);
    }
}
