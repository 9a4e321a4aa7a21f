//! Daily line count time series graph implementation

use crate::{DailyHistogram, GraphRenderer};
use async_trait::async_trait;
use chrono::Duration;
use plotters::prelude::*;
use std::io::Cursor;
use tally_common::{Result, TallyError};
use tally_config::{parse_hex_color, ChartConfig};
use tracing::info;

/// File name used when the chart is attached to a reply.
pub const CHART_FILE_NAME: &str = "messages_graph.png";

/// Styling and labels for a daily count chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Caption drawn above the plot.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Line color.
    pub line_color: (u8, u8, u8),
}

impl ChartOptions {
    /// Labels a chart for `channel`, with dates shown in the `zone` abbreviation.
    pub fn for_channel(channel: &str, zone: &str, chart: &ChartConfig) -> Self {
        Self {
            title: format!("Messages Over Time in #{channel} ({zone})"),
            x_label: format!("Date ({zone})"),
            y_label: "Number of Messages".to_string(),
            width: chart.width,
            height: chart.height,
            line_color: parse_hex_color(&chart.line_color).unwrap_or((255, 0, 0)),
        }
    }
}

/// Line chart of counted lines per day.
#[derive(Debug, Default)]
pub struct DailyCountGraph;

impl DailyCountGraph {
    /// Create a new daily count graph
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GraphRenderer for DailyCountGraph {
    type Data = DailyHistogram;
    type Config = ChartOptions;

    async fn render(&self, data: Self::Data, config: Self::Config) -> Result<Vec<u8>> {
        let png = tokio::task::spawn_blocking(move || draw_png(&data, &config))
            .await
            .map_err(|e| TallyError::graph_with_source("chart rendering task failed", e))??;
        info!("Rendered daily count chart ({} bytes)", png.len());
        Ok(png)
    }

    fn name(&self) -> &'static str {
        "daily_count"
    }

    fn description(&self) -> &'static str {
        "Counted lines per day over the channel's lifetime"
    }
}

fn plot_error<E>(e: E) -> TallyError
where
    E: std::error::Error + Send + Sync + 'static,
{
    TallyError::graph_with_source("failed to draw chart", e)
}

/// Draws the histogram into an RGB buffer and encodes it as PNG.
pub fn draw_png(histogram: &DailyHistogram, options: &ChartOptions) -> Result<Vec<u8>> {
    let (width, height) = (options.width, options.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let start = histogram.first_date();
        let last_offset = i64::try_from(histogram.len().saturating_sub(1)).unwrap_or(i64::MAX);
        let y_top = histogram.max_count() + histogram.max_count() / 10 + 1;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0i64..last_offset.max(1), 0u64..y_top)
            .map_err(plot_error)?;

        let date_label = |offset: &i64| (start + Duration::days(*offset)).format("%Y-%m-%d").to_string();
        chart
            .configure_mesh()
            .x_desc(options.x_label.as_str())
            .y_desc(options.y_label.as_str())
            .x_labels(8)
            .x_label_formatter(&date_label)
            .draw()
            .map_err(plot_error)?;

        let (r, g, b) = options.line_color;
        let points = (0i64..).zip(histogram.days().iter().map(|day| day.count));
        chart
            .draw_series(LineSeries::new(points, RGBColor(r, g, b).stroke_width(2)))
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
    }

    encode_png(pixels, width, height)
}

/// Encodes a packed RGB buffer as PNG.
pub fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| TallyError::graph("pixel buffer does not match chart dimensions"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .map_err(|e| TallyError::graph_with_source("failed to encode PNG", e))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn histogram() -> DailyHistogram {
        let stamps = vec![
            New_York.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            New_York.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            New_York.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap(),
        ];
        DailyHistogram::from_sorted(&stamps, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).unwrap()
    }

    #[test]
    fn test_chart_options_for_channel() {
        let options = ChartOptions::for_channel("daily-log", "EST", &ChartConfig::default());
        assert_eq!(options.title, "Messages Over Time in #daily-log (EST)");
        assert_eq!(options.x_label, "Date (EST)");
        assert_eq!(options.y_label, "Number of Messages");
        assert_eq!((options.width, options.height), (1000, 600));
        assert_eq!(options.line_color, (255, 0, 0));
    }

    #[test]
    fn test_bad_color_falls_back_to_red() {
        let chart = ChartConfig {
            line_color: "blue".to_string(),
            ..ChartConfig::default()
        };
        let options = ChartOptions::for_channel("c", "UTC", &chart);
        assert_eq!(options.line_color, (255, 0, 0));
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(vec![255; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_size_mismatch() {
        let err = encode_png(vec![0; 10], 4, 3).unwrap_err();
        assert!(matches!(err, TallyError::Graph { .. }));
    }

    #[test]
    fn test_renderer_metadata() {
        let graph = DailyCountGraph::new();
        assert_eq!(graph.name(), "daily_count");
        assert!(!graph.description().is_empty());
    }

    #[tokio::test]
    async fn test_render_produces_png() {
        let options = ChartOptions::for_channel("log", "EST", &ChartConfig::default());
        let png = DailyCountGraph::new().render(histogram(), options).await.unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_draw_single_day_history() {
        let stamps = [New_York.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap()];
        let single =
            DailyHistogram::from_sorted(&stamps, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).unwrap();
        assert_eq!(single.len(), 1);

        let options = ChartOptions::for_channel("log", "EST", &ChartConfig::default());
        let png = draw_png(&single, &options).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }
}
