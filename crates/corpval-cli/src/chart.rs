//! Text line chart of projected versus discounted cash flows.
//!
//! A chart owns a rendering surface from `create` until `destroy`. The
//! [`ChartSlot`] holds at most one live chart and always destroys the previous
//! one before a replacement is created, so surfaces never accumulate across
//! recalculations.

use std::fmt::Write as _;

use colored::Colorize;
use corpval_analytics::dcf::ChartPoint;
use corpval_core::format::format_currency;

/// A chart with an explicit surface lifecycle.
pub trait Chart {
    /// Allocates the surface and plots the data onto it.
    fn create(&mut self);

    /// Renders the live surface. Empty when the chart is not live.
    fn render(&self) -> String;

    /// Releases the surface.
    fn destroy(&mut self);
}

/// Holds at most one live chart.
pub struct ChartSlot<C: Chart> {
    live: Option<C>,
}

impl<C: Chart> ChartSlot<C> {
    /// An empty slot.
    pub fn new() -> Self {
        Self { live: None }
    }

    /// Tears down the current chart, then creates `chart` in its place.
    pub fn replace(&mut self, chart: C) -> &C {
        self.clear();
        let live = self.live.insert(chart);
        live.create();
        live
    }

    /// Tears down the current chart, if any.
    pub fn clear(&mut self) {
        if let Some(mut old) = self.live.take() {
            old.destroy();
        }
    }

    /// The live chart, if any.
    pub fn current(&self) -> Option<&C> {
        self.live.as_ref()
    }
}

impl<C: Chart> Default for ChartSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chart> Drop for ChartSlot<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

const CASH_FLOW_MARK: char = '●';
const PRESENT_VALUE_MARK: char = '○';
const OVERLAP_MARK: char = '◉';
const COLUMN_WIDTH: usize = 4;

/// Two-series text line chart, y axis starting at zero.
#[derive(Debug, Clone)]
pub struct TextLineChart {
    title: String,
    points: Vec<ChartPoint>,
    height: usize,
    surface: Option<Vec<Vec<char>>>,
    skipped: usize,
}

impl TextLineChart {
    /// A chart over `points`, `height` rows tall.
    pub fn new(title: impl Into<String>, points: Vec<ChartPoint>, height: usize) -> Self {
        Self {
            title: title.into(),
            points,
            height: height.max(2),
            surface: None,
            skipped: 0,
        }
    }

    /// Whether the surface is allocated.
    pub fn is_live(&self) -> bool {
        self.surface.is_some()
    }

    /// Number of values left out of the last plot for being non-finite or negative.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn plottable(value: f64) -> Option<f64> {
        (value.is_finite() && value >= 0.0).then_some(value)
    }

    fn y_max(&self) -> f64 {
        let max = self
            .points
            .iter()
            .flat_map(|p| [p.cash_flow, p.present_value])
            .filter_map(Self::plottable)
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    /// Year ranges of each stage run, e.g. `Year 1-3 expansion · Year 4-5 maturity`.
    fn stage_key(&self) -> Option<String> {
        let mut runs: Vec<(usize, usize, &str)> = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            let Some(stage) = point.stage.as_deref() else {
                continue;
            };
            match runs.last_mut() {
                Some((_, end, name)) if *name == stage && *end + 1 == i + 1 => *end = i + 1,
                _ => runs.push((i + 1, i + 1, stage)),
            }
        }
        if runs.is_empty() {
            return None;
        }
        let key = runs
            .iter()
            .map(|&(start, end, name)| {
                let name = if name.is_empty() { "unnamed stage" } else { name };
                if start == end {
                    format!("Year {start} {name}")
                } else {
                    format!("Year {start}-{end} {name}")
                }
            })
            .collect::<Vec<_>>()
            .join(" · ");
        Some(key)
    }

    fn row_for(&self, value: f64, max: f64) -> usize {
        let top = (self.height - 1) as f64;
        // Row 0 is the top line of the surface.
        let level = ((value / max) * top).round().clamp(0.0, top);
        self.height - 1 - level as usize
    }
}

impl Chart for TextLineChart {
    fn create(&mut self) {
        let width = self.points.len() * COLUMN_WIDTH;
        let mut grid = vec![vec![' '; width]; self.height];
        let max = self.y_max();
        let mut skipped = 0;

        for (i, point) in self.points.iter().enumerate() {
            let col = i * COLUMN_WIDTH + COLUMN_WIDTH / 2;
            for (value, mark) in [
                (point.cash_flow, CASH_FLOW_MARK),
                (point.present_value, PRESENT_VALUE_MARK),
            ] {
                let Some(value) = Self::plottable(value) else {
                    skipped += 1;
                    continue;
                };
                let cell = &mut grid[self.row_for(value, max)][col];
                *cell = if *cell == ' ' { mark } else { OVERLAP_MARK };
            }
        }

        self.skipped = skipped;
        self.surface = Some(grid);
    }

    fn render(&self) -> String {
        let Some(grid) = &self.surface else {
            return String::new();
        };

        let top_label = format_currency(self.y_max());
        let gutter = top_label.chars().count();
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title.bold());

        for (row, cells) in grid.iter().enumerate() {
            let axis = match row {
                0 => top_label.clone(),
                r if r == grid.len() - 1 => "0".to_string(),
                _ => String::new(),
            };
            let line: String = cells
                .iter()
                .map(|&c| match c {
                    CASH_FLOW_MARK => c.to_string().blue().to_string(),
                    PRESENT_VALUE_MARK => c.to_string().magenta().to_string(),
                    OVERLAP_MARK => c.to_string().cyan().to_string(),
                    _ => c.to_string(),
                })
                .collect();
            let _ = writeln!(out, "{axis:>gutter$} │{line}");
        }

        let _ = writeln!(
            out,
            "{:>gutter$} └{}",
            "",
            "─".repeat(self.points.len() * COLUMN_WIDTH)
        );
        let years: String = (1..=self.points.len())
            .map(|year| format!("{year:^COLUMN_WIDTH$}"))
            .collect();
        let _ = writeln!(out, "{:>gutter$}  {years}", "");
        if let Some(key) = self.stage_key() {
            let _ = writeln!(out, "{:>gutter$}  {key}", "");
        }
        let _ = writeln!(
            out,
            "{:>gutter$}  {} cash flow   {} present value",
            "",
            CASH_FLOW_MARK.to_string().blue(),
            PRESENT_VALUE_MARK.to_string().magenta()
        );
        out
    }

    fn destroy(&mut self) {
        self.surface = None;
    }
}
