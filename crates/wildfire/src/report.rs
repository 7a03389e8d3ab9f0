// crates/wildfire/src/report.rs

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use wildfire_core::analytics::{
    self, CauseCount, HeatmapRow, Insights, MonthCount, Overview, SeasonCount, StateSummary,
    YearlyTrend,
};
use wildfire_core::area::{format_area, NOT_AVAILABLE};
use wildfire_core::{EnrichedRecord, PipelineOutput};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Serialize)]
struct OverviewPage<'a> {
    overview: Overview,
    records: Vec<&'a EnrichedRecord>,
}

#[derive(Serialize)]
struct TrendsPage {
    yearly: Vec<YearlyTrend>,
    seasons: Vec<SeasonCount>,
    months: Vec<MonthCount>,
}

#[derive(Serialize)]
struct BreakdownPage {
    top_states_by_count: Vec<StateSummary>,
    top_states_by_area: Vec<StateSummary>,
    causes: Vec<CauseCount>,
    heatmap: Vec<HeatmapRow>,
    insights: Insights,
}

fn print_json<T: Serialize>(page: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(page)?);
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn days(value: Option<f64>) -> String {
    or_na(value.map(|v| format!("{v:.1}")))
}

fn print_titled(title: &str, table: &Table) {
    println!("{title}");
    println!("{table}");
    println!();
}

pub fn overview(view: &[&EnrichedRecord], rows: usize, json: bool) -> Result<()> {
    let kpis = analytics::overview(view);
    if json {
        return print_json(&OverviewPage {
            overview: kpis,
            records: view.iter().take(rows).copied().collect(),
        });
    }
    if view.is_empty() {
        println!("No records match the current filters.");
        return Ok(());
    }

    let mut summary = new_table(vec!["Total fires", "Mean duration (days)", "Total area", "Mean area"]);
    summary.add_row(vec![
        right(kpis.total_fires),
        right(days(kpis.mean_duration_days)),
        right(format_area(kpis.total_area_m2)),
        right(format_area(kpis.mean_area_m2)),
    ]);
    print_titled("Overview", &summary);

    let mut table = new_table(vec![
        "ID", "Year", "State", "Discovered", "Contained", "Days", "Season", "Area", "Cause",
    ]);
    for record in view.iter().take(rows) {
        table.add_row(vec![
            Cell::new(or_na(record.raw.record_id)),
            Cell::new(or_na(record.fire_year())),
            Cell::new(or_na(record.state_name.as_deref())),
            Cell::new(or_na(record.discovery_date)),
            Cell::new(or_na(record.containment_date)),
            right(or_na(record.duration_days)),
            Cell::new(or_na(record.season)),
            right(format_area(record.area_m2)),
            Cell::new(or_na(record.cause())),
        ]);
    }
    print_titled(&format!("First {} of {} records", rows.min(view.len()), view.len()), &table);
    Ok(())
}

pub fn trends(view: &[&EnrichedRecord], json: bool) -> Result<()> {
    let page = TrendsPage {
        yearly: analytics::yearly_trends(view),
        seasons: analytics::season_counts(view),
        months: analytics::monthly_counts(view),
    };
    if json {
        return print_json(&page);
    }
    if view.is_empty() {
        println!("No records match the current filters.");
        return Ok(());
    }

    let mut yearly = new_table(vec!["Year", "Fires", "Mean duration (days)", "Mean area", "Total area"]);
    for row in &page.yearly {
        yearly.add_row(vec![
            Cell::new(row.year),
            right(row.fires),
            right(days(row.mean_duration_days)),
            right(format_area(row.mean_area_m2)),
            right(format_area(row.total_area_m2)),
        ]);
    }
    print_titled("Fires per year", &yearly);

    let mut seasons = new_table(vec!["Season", "Fires"]);
    for row in &page.seasons {
        seasons.add_row(vec![Cell::new(row.season), right(row.fires)]);
    }
    print_titled("Fires per season", &seasons);

    let mut months = new_table(vec!["Month", "Fires"]);
    for row in &page.months {
        let label = (row.month as usize)
            .checked_sub(1)
            .and_then(|idx| MONTH_LABELS.get(idx))
            .copied()
            .unwrap_or(NOT_AVAILABLE);
        months.add_row(vec![Cell::new(label), right(row.fires)]);
    }
    print_titled("Fires per discovery month", &months);
    Ok(())
}

pub fn breakdown(view: &[&EnrichedRecord], top: usize, causes: usize, json: bool) -> Result<()> {
    let page = BreakdownPage {
        top_states_by_count: analytics::top_states_by_count(view, top),
        top_states_by_area: analytics::top_states_by_area(view, top),
        causes: analytics::cause_counts(view, causes),
        heatmap: analytics::month_year_heatmap(view),
        insights: analytics::insights(view),
    };
    if json {
        return print_json(&page);
    }
    if view.is_empty() {
        println!("No records match the current filters.");
        return Ok(());
    }

    print_titled(
        &format!("Top {top} states by fire count"),
        &state_table(&page.top_states_by_count),
    );
    print_titled(
        &format!("Top {top} states by burned area"),
        &state_table(&page.top_states_by_area),
    );

    let mut cause_table = new_table(vec!["Cause", "Fires"]);
    for row in &page.causes {
        cause_table.add_row(vec![Cell::new(&row.cause), right(row.fires)]);
    }
    print_titled("Causes", &cause_table);

    let mut header = vec!["Year"];
    header.extend(MONTH_LABELS);
    let mut heatmap = new_table(header);
    for row in &page.heatmap {
        let mut cells = vec![Cell::new(row.year)];
        cells.extend(row.months.iter().map(|count| right(count)));
        heatmap.add_row(cells);
    }
    print_titled("Fires per month and year", &heatmap);

    let insights = &page.insights;
    let mut indicators = new_table(vec!["Indicator", "Value"]);
    indicators.add_row(vec![
        Cell::new("Peak season"),
        Cell::new(or_na(
            insights
                .peak_season
                .map(|row| format!("{} ({} fires)", row.season, row.fires)),
        )),
    ]);
    indicators.add_row(vec![
        Cell::new("Largest burned area"),
        Cell::new(or_na(insights.largest_burned_state.as_ref().map(|row| {
            format!("{} ({})", row.name, format_area(row.total_area_m2))
        }))),
    ]);
    indicators.add_row(vec![
        Cell::new("Most common cause"),
        Cell::new(or_na(
            insights
                .top_cause
                .as_ref()
                .map(|row| format!("{} ({} fires)", row.cause, row.fires)),
        )),
    ]);
    print_titled("Key indicators", &indicators);
    Ok(())
}

fn state_table(rows: &[StateSummary]) -> Table {
    let mut table = new_table(vec!["Code", "State", "Fires", "Total area", "Mean area"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.code),
            Cell::new(&row.name),
            right(row.fires),
            right(format_area(row.total_area_m2)),
            right(format_area(row.mean_area_m2)),
        ]);
    }
    table
}

pub fn states(output: &PipelineOutput, json: bool) -> Result<()> {
    if json {
        return print_json(&output.code_to_name);
    }
    if output.code_to_name.is_empty() {
        println!("No state reference loaded; raw state codes are shown as names.");
        return Ok(());
    }
    let mut table = new_table(vec!["Code", "State"]);
    for (code, name) in &output.code_to_name {
        table.add_row(vec![code.as_str(), name.as_str()]);
    }
    print_titled(
        &format!("{} states in reference", output.code_to_name.len()),
        &table,
    );
    Ok(())
}
