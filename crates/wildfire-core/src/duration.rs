use chrono::NaiveDate;

/// Longest span, in days, accepted as a plausible containment time.
pub const MAX_DURATION_DAYS: i64 = 365;

/// Signed day count from discovery to containment.
pub fn duration_days(discovery: Option<NaiveDate>, containment: Option<NaiveDate>) -> Option<i64> {
    let (discovery, containment) = (discovery?, containment?);
    Some(containment.signed_duration_since(discovery).num_days())
}

/// Drops spans outside `[0, MAX_DURATION_DAYS]`. Negative spans are date-order
/// entry errors; longer ones are unresolved incidents.
pub fn sanitize_duration(days: Option<i64>) -> Option<i64> {
    days.filter(|value| (0..=MAX_DURATION_DAYS).contains(value))
}
