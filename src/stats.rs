use crate::ledger::Ledger;
use crate::models::{DayPoint, SummaryResponse, Transaction};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Weekday};

/// Weekly revenue the shop aims for, in whole currency units.
pub const WEEKLY_TARGET: f64 = 9_000_000.0;

/// The behind-target warning is only raised on this weekday.
pub const WARNING_DAY: Weekday = Weekday::Thu;

pub fn build_summary(ledger: &Ledger) -> SummaryResponse {
    build_summary_at(ledger, &Local::now())
}

pub fn build_summary_at<Tz: TimeZone>(ledger: &Ledger, now: &DateTime<Tz>) -> SummaryResponse {
    let today = start_of_day(now);
    let week = start_of_week(now);
    let today_ms = today.timestamp_millis();
    let week_ms = week.timestamp_millis();

    let daily_transactions: Vec<Transaction> = ledger
        .transactions()
        .iter()
        .filter(|tx| tx.timestamp >= today_ms)
        .cloned()
        .collect();
    let weekly: Vec<&Transaction> = ledger
        .transactions()
        .iter()
        .filter(|tx| tx.timestamp >= week_ms)
        .collect();

    let total_sales_today = sales(daily_transactions.iter());
    let total_items_today = items(daily_transactions.iter());
    let total_sales_this_week = sales(weekly.iter().copied());

    let tz = now.timezone();
    let today_date = now.date_naive();
    let mut week_days = Vec::with_capacity(7);
    let mut date = week.date_naive();
    while date <= today_date {
        let lower = local_midnight(date, &tz).timestamp_millis();
        let upper = date
            .succ_opt()
            .filter(|_| date < today_date)
            .map(|next| local_midnight(next, &tz).timestamp_millis());
        let bucket = weekly
            .iter()
            .copied()
            .filter(|tx| tx.timestamp >= lower && upper.is_none_or(|upper| tx.timestamp < upper));
        week_days.push(DayPoint {
            date: date.format("%Y-%m-%d").to_string(),
            items: items(bucket.clone()),
            sales: sales(bucket),
        });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    SummaryResponse {
        start_of_today: today_ms,
        start_of_week: week_ms,
        weekly_transaction_count: weekly.len(),
        total_sales_today,
        total_items_today,
        total_sales_this_week,
        weekly_target: WEEKLY_TARGET,
        remaining_to_target: (WEEKLY_TARGET - total_sales_this_week).max(0.0),
        show_warning: should_warn(now.weekday(), total_sales_this_week),
        week_days,
        daily_transactions,
    }
}

pub fn should_warn(weekday: Weekday, total_sales_this_week: f64) -> bool {
    weekday == WARNING_DAY && total_sales_this_week < WEEKLY_TARGET
}

/// Local midnight at the start of `now`'s day.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(now.date_naive(), &now.timezone())
}

/// Local midnight of the most recent Saturday (today, if today is Saturday).
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let offset = days_since_week_start(now.weekday());
    let date = now.date_naive() - Duration::days(i64::from(offset));
    local_midnight(date, &now.timezone())
}

/// Days back from `weekday` to the Saturday that opens its week.
pub fn days_since_week_start(weekday: Weekday) -> u32 {
    let index = weekday.num_days_from_sunday();
    if index < 6 { index + 1 } else { index - 6 }
}

// Falls back to UTC interpretation when midnight is skipped by a DST jump.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

fn sales<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> f64 {
    transactions.map(Transaction::total).sum()
}

fn items<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> u64 {
    transactions.map(|tx| u64::from(tx.quantity)).sum()
}
