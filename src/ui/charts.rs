use eframe::egui::{self, Color32, Pos2, RichText, ScrollArea, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::CategoryColors;
use crate::data::aggregate::{self, Categorical};
use crate::data::model::RecordTable;
use crate::state::AppState;

/// Number of buckets in the wealth histogram.
const WEALTH_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Central panel – metrics and charts over the filtered subset
// ---------------------------------------------------------------------------

/// Render the dashboard body: metric row, then the four chart panels.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let table = match &state.dataset {
        Some(t) => t.clone(),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV to explore billionaires  (File → Open…)");
            });
            return;
        }
    };

    // Copied out so the closures below can borrow `state` mutably for the
    // top-N slider.
    let indices: Vec<usize> = state.visible_indices.clone();
    if indices.is_empty() {
        ui.add_space(12.0);
        ui.label(
            RichText::new("No data matches your filters. Please select more options.")
                .color(Color32::YELLOW)
                .strong(),
        );
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric_row(ui, &table, &indices);
            ui.separator();

            ui.heading("Top Countries by Number of Billionaires");
            ui.add(
                egui::Slider::new(&mut state.top_n, 5..=20).text("countries"),
            );
            country_bar_chart(ui, &table, &indices, state.top_n);
            ui.separator();

            ui.heading("Billionaires by Industry");
            industry_pie_chart(ui, &table, &indices);
            ui.separator();

            ui.heading("Wealth Distribution");
            wealth_histogram(ui, &table, &indices);
            ui.separator();

            ui.heading("Billionaires by Gender");
            gender_bar_chart(ui, &table, &indices);
        });
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Three headline figures. Wealth figures display to 2 decimals; the
/// aggregates themselves stay full precision.
fn metric_row(ui: &mut Ui, table: &RecordTable, indices: &[usize]) {
    let total = aggregate::count(indices);
    let sum = aggregate::sum_wealth(table, indices);
    let mean = aggregate::mean_wealth(table, indices);

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total Billionaires", total.to_string());
        metric(&mut cols[1], "Total Wealth ($B)", format!("{sum:.2}"));
        let mean_text = match mean {
            Ok(m) => format!("{m:.2}"),
            Err(_) => "no data".to_string(),
        };
        metric(&mut cols[2], "Average Wealth ($B)", mean_text);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Bar charts (countries, gender)
// ---------------------------------------------------------------------------

fn country_bar_chart(ui: &mut Ui, table: &RecordTable, indices: &[usize], top_n: usize) {
    let counts = aggregate::value_counts(table, indices, Categorical::Country, Some(top_n));
    labelled_bar_chart(ui, "country_bars", counts, Color32::LIGHT_BLUE);
}

fn gender_bar_chart(ui: &mut Ui, table: &RecordTable, indices: &[usize]) {
    let counts = aggregate::value_counts(table, indices, Categorical::Gender, None);
    labelled_bar_chart(ui, "gender_bars", counts, Color32::LIGHT_GREEN);
}

/// Vertical bar chart with category labels on the x axis.
fn labelled_bar_chart(ui: &mut Ui, id: &str, counts: Vec<(String, usize)>, fill: Color32) {
    let labels: Vec<String> = counts.iter().map(|(l, _)| l.clone()).collect();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, n))| {
            Bar::new(i as f64, *n as f64)
                .width(0.7)
                .name(label)
                .fill(fill)
        })
        .collect();

    Plot::new(id)
        .height(240.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 0.25 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .y_axis_label("Billionaires")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Histogram (wealth)
// ---------------------------------------------------------------------------

fn wealth_histogram(ui: &mut Ui, table: &RecordTable, indices: &[usize]) {
    let bins = aggregate::histogram(table, indices, WEALTH_BINS);
    if bins.is_empty() {
        ui.label("No numeric wealth values in the current selection.");
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new(b.center, b.count as f64)
                .width(b.width)
                .fill(Color32::from_rgb(120, 160, 255))
        })
        .collect();

    Plot::new("wealth_histogram")
        .height(240.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Wealth ($B)")
        .y_axis_label("Billionaires")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Pie chart (industry)
// ---------------------------------------------------------------------------

/// egui_plot has no pie primitive, so sectors are drawn directly with the
/// painter as fans of short arc segments, with a legend alongside.
fn industry_pie_chart(ui: &mut Ui, table: &RecordTable, indices: &[usize]) {
    let counts = aggregate::value_counts(table, indices, Categorical::Industry, None);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        ui.label("No industry values in the current selection.");
        return;
    }

    // Keyed off the full option list, not the filtered count order, so an
    // industry keeps its color when filtering changes its rank.
    let colors = CategoryColors::new(table.industries.iter().map(|s| s.as_str()));

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) =
            ui.allocate_painter(Vec2::splat(240.0), egui::Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.45;

        // Start at 12 o'clock, sweep clockwise.
        let mut angle = -std::f32::consts::FRAC_PI_2;
        for (label, n) in &counts {
            let sweep = (*n as f32 / total as f32) * std::f32::consts::TAU;
            for shape in pie_sector(center, radius, angle, sweep, colors.color_for(label)) {
                painter.add(shape);
            }
            angle += sweep;
        }

        ui.add_space(8.0);
        ui.vertical(|ui: &mut Ui| {
            for (label, n) in &counts {
                let pct = 100.0 * *n as f64 / total as f64;
                ui.label(
                    RichText::new(format!("⏺ {label}  {n} ({pct:.1}%)"))
                        .color(colors.color_for(label)),
                );
            }
        });
    });
}

/// A filled circular sector approximated by short straight segments.
///
/// Tessellation requires convex polygons, so sweeps wider than a quarter
/// turn are emitted as several adjacent fans.
fn pie_sector(center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) -> Vec<Shape> {
    let quarter = std::f32::consts::FRAC_PI_2;
    let mut shapes = Vec::new();
    let mut done = 0.0f32;

    while done < sweep {
        let part = (sweep - done).min(quarter);
        let from = start + done;
        // ~3 degrees per segment keeps the rim smooth at this size.
        let steps = ((part / 0.05).ceil() as usize).max(2);

        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for s in 0..=steps {
            let a = from + part * s as f32 / steps as f32;
            points.push(Pos2::new(
                center.x + radius * a.cos(),
                center.y + radius * a.sin(),
            ));
        }
        shapes.push(Shape::convex_polygon(points, fill, Stroke::NONE));
        done += part;
    }
    shapes
}
