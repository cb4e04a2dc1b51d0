use crate::models::{Grid, Histogram, histogram::BINS};

/// Chart height in rows; also the top of the bar scale
pub const CHART_HEIGHT: usize = 200;
/// Chart width in columns, one per bin
pub const CHART_WIDTH: usize = BINS;

const BACKGROUND: u8 = 255;
const BAR: [u8; 3] = [0, 0, 0];

/// Render a histogram as a 200x256 RGB bar chart
///
/// Column `x` holds a 1px-wide black bar rising from the bottom edge, with
/// height equal to the min-max scaled count of bin `x`. The background is
/// white and samples are stored in RGB order.
pub fn render_chart(histogram: &Histogram) -> Grid {
    let mut chart = Grid::filled(CHART_WIDTH, CHART_HEIGHT, 3, BACKGROUND);

    let heights = histogram.scaled(CHART_HEIGHT as u32);
    for (x, &h) in heights.iter().enumerate() {
        let top = CHART_HEIGHT - h as usize;
        for y in top..CHART_HEIGHT {
            chart.put_pixel(x, y, &BAR);
        }
    }

    chart
}
