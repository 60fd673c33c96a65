//! Chart figures for the dashboard
//!
//! Both figures are built with `plotly` and sent to the page as Plotly JSON
//! (`data` + `layout`), where Plotly.js draws them. Each request builds its
//! own figures.

use plotly::{
    common::{AxisSide, Mode, Title},
    layout::Axis,
    Bar, Layout, Plot, Scatter,
};
use serde::Serialize;
use shared::{unit_symbol, ForecastRow, ForecastTable};

use crate::error::{AppError, AppResult};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Trace id of the right-hand axis
const SECONDARY_AXIS: &str = "y2";

/// The two figures shown under the search box, as Plotly JSON
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCharts {
    pub temperature_clouds: serde_json::Value,
    pub pressure_precipitation: serde_json::Value,
}

fn dual_axis_layout(title: &str, primary: String, secondary: String) -> Layout {
    Layout::new()
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text("hour")))
        .y_axis(Axis::new().title(Title::with_text(primary)))
        .y_axis2(
            Axis::new()
                .title(Title::with_text(secondary))
                .overlaying("y")
                .side(AxisSide::Right),
        )
}

fn axis_label(name: &str, unit: &str) -> String {
    format!("<b>{}</b> {}", name, unit_symbol(unit))
}

fn x_values(table: &ForecastTable) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|r| r.time.format(TIME_FORMAT).to_string())
        .collect()
}

/// Cloud fraction (left axis) and temperature (right axis)
pub fn temperature_clouds_figure(table: &ForecastTable) -> Plot {
    let x = x_values(table);

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(x.clone(), table.column(|r: &ForecastRow| r.cloud_area_fraction))
            .name("cloud fraction")
            .mode(Mode::LinesMarkers),
    );
    plot.add_trace(
        Scatter::new(x, table.column(|r: &ForecastRow| r.temperature))
            .name("temperature")
            .mode(Mode::LinesMarkers)
            .y_axis(SECONDARY_AXIS),
    );
    plot.set_layout(dual_axis_layout(
        "Day weather forecast: temperature and clouds",
        axis_label("Cloud fraction", &table.units.cloud_area_fraction),
        axis_label("Temperature", &table.units.temperature),
    ));
    plot
}

/// Pressure line (left axis) and precipitation bars (right axis)
pub fn pressure_precipitation_figure(table: &ForecastTable) -> Plot {
    let x = x_values(table);

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(x.clone(), table.column(|r: &ForecastRow| r.pressure))
            .name("pressure")
            .mode(Mode::LinesMarkers),
    );
    plot.add_trace(
        Bar::new(x, table.column(|r: &ForecastRow| r.precipitation))
            .name("precipitation")
            .y_axis(SECONDARY_AXIS),
    );
    plot.set_layout(dual_axis_layout(
        "Day weather forecast: pressure and precipitation",
        axis_label("Pressure", &table.units.pressure),
        axis_label("Precipitation", &table.units.precipitation),
    ));
    plot
}

fn to_json(plot: &Plot) -> AppResult<serde_json::Value> {
    serde_json::to_value(plot)
        .map_err(|e| AppError::Internal(format!("Chart serialization error: {}", e)))
}

pub fn build_charts(table: &ForecastTable) -> AppResult<DashboardCharts> {
    Ok(DashboardCharts {
        temperature_clouds: to_json(&temperature_clouds_figure(table))?,
        pressure_precipitation: to_json(&pressure_precipitation_figure(table))?,
    })
}
