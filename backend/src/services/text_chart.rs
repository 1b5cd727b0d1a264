//! Plain-text Gantt rendering for terminals.

use super::gantt::{GanttChart, GanttRenderer, ScheduleRenderer};
use crate::models::{Schedule, TimeFormat, TimePoint};

/// Default bar area width in characters.
pub const DEFAULT_WIDTH: usize = 60;

const BAR: char = '#';
const DEGENERATE: char = '!';

/// Renders a schedule as one text line per job.
#[derive(Debug, Clone)]
pub struct TextGantt {
    renderer: GanttRenderer,
    width: usize,
}

impl TextGantt {
    pub fn new(format: TimeFormat, width: usize) -> Self {
        Self {
            renderer: GanttRenderer::new(format),
            width: width.max(10),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render an already built chart.
    pub fn render_chart(&self, chart: &GanttChart) -> String {
        let mut out = format!("{}\n", chart.title);

        let (Some(lower), Some(upper)) = (chart.time_axis.lower, chart.time_axis.upper) else {
            out.push_str("(no jobs)\n");
            return out;
        };

        let name_width = chart
            .tasks()
            .map(|t| t.name.chars().count())
            .chain(std::iter::once(chart.category_axis_label.chars().count()))
            .max()
            .unwrap_or(0);

        let lower_label = lower.format(self.renderer.format());
        let upper_label = upper.format(self.renderer.format());
        let gap = self
            .width
            .saturating_sub(lower_label.chars().count() + upper_label.chars().count());
        out.push_str(&format!(
            "{:<name_width$} |{}{}{}|\n",
            chart.category_axis_label,
            lower_label,
            " ".repeat(gap),
            upper_label,
        ));

        let total = upper.seconds_since(lower).max(1);
        for task in chart.tasks() {
            let bar = self.bar(lower, total, task.start, task.end);
            out.push_str(&format!(
                "{:<name_width$} |{}| {} - {}\n",
                task.name, bar, task.start_label, task.end_label
            ));
        }

        out
    }

    fn column(&self, lower: TimePoint, total: i64, at: TimePoint) -> usize {
        let ratio = at.seconds_since(lower) as f64 / total as f64;
        ((ratio * self.width as f64).round() as usize).min(self.width)
    }

    fn bar(&self, lower: TimePoint, total: i64, start: TimePoint, end: TimePoint) -> String {
        let from = self.column(lower, total, start.min(end));
        let to = self.column(lower, total, start.max(end));

        let mut cells = vec![' '; self.width];
        if end <= start {
            cells[from.min(self.width - 1)] = DEGENERATE;
        } else {
            let to = to.max(from + 1).min(self.width);
            let from = from.min(to - 1);
            for cell in &mut cells[from..to] {
                *cell = BAR;
            }
        }
        cells.into_iter().collect()
    }
}

impl Default for TextGantt {
    fn default() -> Self {
        Self::new(TimeFormat::default(), DEFAULT_WIDTH)
    }
}

impl ScheduleRenderer for TextGantt {
    type Output = String;

    fn render(&self, schedule: &Schedule) -> String {
        self.render_chart(&self.renderer.render(schedule))
    }
}
