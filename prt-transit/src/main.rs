use std::process::ExitCode;

use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use prt_transit::cache::{route_cache, stop_cache};
use prt_transit::domain::Stop;
use prt_transit::history::{HistorySummary, HistoryTable};
use prt_transit::info;
use prt_transit::loader::{self, LoadError, LoaderConfig};
use prt_transit::schedule::{
    Schedule, ScheduleConfig, ScheduleError, Selector, SelectorError, arrival_times_for,
};

/// How many upcoming arrivals to report.
const UPCOMING_ARRIVALS: usize = 5;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("failed to render report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no routes loaded")]
    NoRoutes,

    #[error("unknown route {0}")]
    UnknownRoute(String),
}

#[derive(Debug, Serialize)]
struct ScheduleReport {
    trips: usize,
    rows_read: usize,
    rows_excluded: usize,
    rows_dropped: usize,
    valid_from: NaiveDate,
    valid_until: NaiveDate,
}

#[derive(Debug, Serialize)]
struct StopReport {
    stop_id: String,
    stop_name: String,
    routes_thru: Vec<String>,
    upcoming_arrivals: Vec<NaiveTime>,
}

#[derive(Debug, Serialize)]
struct Report {
    schedule: ScheduleReport,
    route_id: String,
    route_name: String,
    date: NaiveDate,
    trips_remaining_today: usize,
    stop: Option<StopReport>,
    route_history: HistorySummary,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "prt-transit failed");
            ExitCode::FAILURE
        }
    }
}

/// Usage: `prt-transit [ROUTE_ID [STOP_ID]]`
fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let route_arg = args.next();
    let stop_arg = args.next();

    let config = LoaderConfig::from_env();
    tracing::info!(data_dir = %config.data_dir().display(), "loading network");

    loader::load_routes(&config, route_cache())?;
    loader::load_stops(&config, stop_cache())?;

    let rows = loader::load_schedule_rows(&config)?;
    let schedule = Schedule::build(rows, route_cache(), stop_cache(), &ScheduleConfig::default())?;
    let schedule = Schedule::install(schedule)?;

    let table = match loader::load_history_rows(&config) {
        Ok(rows) => HistoryTable::from_raw_rows(rows, route_cache(), stop_cache()),
        Err(e) if e.is_not_found() => {
            tracing::warn!(path = %e.path().display(), "no history file, continuing without history");
            HistoryTable::new(Vec::new())
        }
        Err(e) => return Err(e.into()),
    };
    let history = HistoryTable::load_full_table(|| table);

    let route = match route_arg {
        Some(id) => info::route_of(route_cache(), &id).ok_or(AppError::UnknownRoute(id))?,
        None => info::all_routes(route_cache())
            .into_iter()
            .next()
            .ok_or(AppError::NoRoutes)?,
    };

    let now = Local::now().naive_local();
    let remaining = Selector::new()
        .for_route(&route)
        .on_date(now.date())?
        .after(now.time())?
        .trips(schedule);

    let stop = match stop_arg {
        Some(id) => stop_cache().get(&id),
        None => remaining
            .first()
            .and_then(|trip| trip.stops().first())
            .map(|arrival| arrival.stop_arc().clone()),
    };
    let stop = stop.map(|stop| stop_report(schedule, &stop, now.time()));

    let stats = schedule.stats();
    let report = Report {
        schedule: ScheduleReport {
            trips: schedule.len(),
            rows_read: stats.rows_read,
            rows_excluded: stats.rows_excluded,
            rows_dropped: stats.rows_dropped,
            valid_from: schedule.start_date(),
            valid_until: schedule.expiration_date(),
        },
        route_id: route.id().to_string(),
        route_name: route.name().to_string(),
        date: now.date(),
        trips_remaining_today: remaining.len(),
        stop,
        route_history: history.of_route(&route).summary(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn stop_report(schedule: &Schedule, stop: &Stop, after: NaiveTime) -> StopReport {
    let trips = Selector::new().at_stop(stop).trips(schedule);
    let upcoming_arrivals = arrival_times_for(&trips, stop)
        .into_iter()
        .filter(|time| *time > after)
        .take(UPCOMING_ARRIVALS)
        .collect();

    StopReport {
        stop_id: stop.id().to_string(),
        stop_name: stop.name().to_string(),
        routes_thru: info::routes_thru(schedule, stop)
            .iter()
            .map(|route| route.id().to_string())
            .collect(),
        upcoming_arrivals,
    }
}
