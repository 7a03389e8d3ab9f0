use wildfire_core::analytics::{
    cause_counts, insights, month_year_heatmap, monthly_counts, overview, season_counts,
    state_breakdown, top_states_by_area, top_states_by_count, yearly_trends, DEFAULT_TOP_CAUSES,
    DEFAULT_TOP_STATES,
};
use wildfire_core::pipeline::enrich;
use wildfire_core::{EnrichedRecord, RecordFilter, Season, StateLookup};
use wildfire_parser::{parse_fire_records, StateRow};

// 2459015.5 = 2020-06-15, 2459020.5 = 2020-06-20, 2459033.5 = 2020-07-03,
// 2459036.5 = 2020-07-06, 2458849.5 = 2020-01-01, 2458514.5 = 2019-01-31
const FIRES: &str = "\
FIRE_YEAR,STATE,STAT_CAUSE_DESCR,FIRE_SIZE,DISCOVERY_DATE,CONT_DATE
2020,CA,Lightning,100,2459015.5,2459020.5
2020,CA,Arson,10,2459033.5,2459036.5
2020,OR,Lightning,1000,2458849.5,
2019,OR,Campfire,,2458514.5,2458514.5
2019,NV,Arson,1,,
";

fn records() -> Vec<EnrichedRecord> {
    let table = parse_fire_records(FIRES.as_bytes()).unwrap();
    let lookup = StateLookup::from_rows([("CA", "California"), ("OR", "Oregon")].into_iter().map(
        |(code, name)| StateRow {
            code: code.to_string(),
            name: name.to_string(),
        },
    ));
    enrich(table, lookup).records
}

fn close(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-6)
}

#[test]
fn overview_summarises_the_view() {
    let records = records();
    let view = RecordFilter::new().apply(&records);
    let kpis = overview(&view);

    assert_eq!(kpis.total_fires, 5);
    // durations 5, 3 and 0
    assert!(close(kpis.mean_duration_days, 8.0 / 3.0));
    assert!(close(kpis.total_area_m2, 1111.0 * 4046.86));
    assert!(close(kpis.mean_area_m2, 1111.0 * 4046.86 / 4.0));
}

#[test]
fn empty_view_has_empty_tables_and_absent_means() {
    let view: Vec<&EnrichedRecord> = Vec::new();
    let kpis = overview(&view);
    assert_eq!(kpis.total_fires, 0);
    assert_eq!(kpis.mean_duration_days, None);
    assert_eq!(kpis.total_area_m2, None);
    assert!(yearly_trends(&view).is_empty());
    assert!(season_counts(&view).is_empty());
    assert!(state_breakdown(&view).is_empty());
    assert!(month_year_heatmap(&view).is_empty());
    let summary = insights(&view);
    assert!(summary.peak_season.is_none());
    assert!(summary.largest_burned_state.is_none());
    assert!(summary.top_cause.is_none());
}

#[test]
fn yearly_trends_are_ascending() {
    let records = records();
    let view = RecordFilter::new().apply(&records);
    let trends = yearly_trends(&view);

    let years: Vec<i32> = trends.iter().map(|row| row.year).collect();
    assert_eq!(years, vec![2019, 2020]);
    assert_eq!(trends[0].fires, 2);
    assert!(close(trends[0].mean_duration_days, 0.0));
    assert!(close(trends[0].total_area_m2, 4046.86));
    assert_eq!(trends[1].fires, 3);
    assert!(close(trends[1].mean_duration_days, 4.0));
    assert!(close(trends[1].mean_area_m2, 370.0 * 4046.86));
}

#[test]
fn season_counts_sort_by_count_then_calendar() {
    let records = records();
    let view = RecordFilter::new().apply(&records);
    let seasons: Vec<(Season, usize)> = season_counts(&view)
        .into_iter()
        .map(|row| (row.season, row.fires))
        .collect();
    assert_eq!(seasons, vec![(Season::Winter, 2), (Season::Summer, 2)]);

    let months: Vec<(u32, usize)> = monthly_counts(&view)
        .into_iter()
        .map(|row| (row.month, row.fires))
        .collect();
    assert_eq!(months, vec![(1, 2), (6, 1), (7, 1)]);
}

#[test]
fn state_rankings_use_resolved_names() {
    let records = records();
    let view = RecordFilter::new().apply(&records);

    let breakdown = state_breakdown(&view);
    let codes: Vec<&str> = breakdown.iter().map(|row| row.code.as_str()).collect();
    assert_eq!(codes, vec!["CA", "NV", "OR"]);
    assert_eq!(breakdown[1].name, "NV");

    let by_count = top_states_by_count(&view, DEFAULT_TOP_STATES);
    assert_eq!(by_count[0].name, "California");
    assert_eq!(by_count[1].name, "Oregon");

    let by_area = top_states_by_area(&view, 2);
    let names: Vec<&str> = by_area.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Oregon", "California"]);
    assert!(close(by_area[0].mean_area_m2, 1000.0 * 4046.86));
}

#[test]
fn causes_rank_by_count_then_name() {
    let records = records();
    let view = RecordFilter::new().apply(&records);
    let causes: Vec<(String, usize)> = cause_counts(&view, DEFAULT_TOP_CAUSES)
        .into_iter()
        .map(|row| (row.cause, row.fires))
        .collect();
    assert_eq!(
        causes,
        vec![
            ("Arson".to_string(), 2),
            ("Lightning".to_string(), 2),
            ("Campfire".to_string(), 1),
        ]
    );
    assert_eq!(cause_counts(&view, 1).len(), 1);
}

#[test]
fn heatmap_rows_are_zero_filled() {
    let records = records();
    let view = RecordFilter::new().apply(&records);
    let heatmap = month_year_heatmap(&view);

    assert_eq!(heatmap.len(), 2);
    assert_eq!(heatmap[0].year, 2019);
    assert_eq!(heatmap[0].months, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(heatmap[1].months, [1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0]);
}

#[test]
fn insights_pick_the_leaders() {
    let records = records();
    let view = RecordFilter::new().apply(&records);
    let summary = insights(&view);

    assert_eq!(summary.peak_season.map(|row| row.season), Some(Season::Winter));
    assert_eq!(
        summary.largest_burned_state.map(|row| row.code),
        Some("OR".to_string())
    );
    assert_eq!(
        summary.top_cause.map(|row| row.cause),
        Some("Arson".to_string())
    );
}

#[test]
fn aggregations_follow_the_filtered_view() {
    let records = records();
    let view = RecordFilter::new().with_states(["California"]).apply(&records);
    let kpis = overview(&view);
    assert_eq!(kpis.total_fires, 2);
    assert!(close(kpis.mean_duration_days, 4.0));
    assert_eq!(state_breakdown(&view).len(), 1);
}
