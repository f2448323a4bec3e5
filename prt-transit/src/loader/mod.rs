//! Reading routes, stops, schedule and history from comma-separated files.
//!
//! Each file has a header row; columns are matched by name and any extra
//! columns are ignored. Rows may be shorter than the header. A file that
//! cannot be opened is an error, while a row that cannot be decoded is
//! logged and skipped.

mod config;
mod error;

pub use config::{DATA_DIR_ENV, LoaderConfig};
pub use error::LoadError;

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::cache::IdentityCache;
use crate::domain::{Location, Route, Stop, VehicleType};
use crate::history::RawHistoryRow;
use crate::schedule::RawScheduleRow;

/// GTFS route type for funiculars (the inclines).
const FUNICULAR_ROUTE_TYPE: &str = "7";

#[derive(Debug, Deserialize)]
struct RouteRow {
    route_id: String,
    #[serde(default)]
    route_short_name: String,
    #[serde(default)]
    route_long_name: String,
    route_type: String,
}

impl RouteRow {
    /// Long name where the feed has one, otherwise the short name.
    fn name(&self) -> &str {
        if self.route_long_name.is_empty() {
            &self.route_short_name
        } else {
            &self.route_long_name
        }
    }
}

#[derive(Debug, Deserialize)]
struct StopRow {
    stop_id: String,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
}

/// Register every route in the routes file with `cache`.
///
/// Funicular routes are skipped, as are routes of a type the model does
/// not know. Returns the number of routes registered or found.
pub fn load_routes(config: &LoaderConfig, cache: &IdentityCache<Route>) -> Result<usize, LoadError> {
    let mut count = 0;
    for row in read_rows::<RouteRow>(&config.routes_path())? {
        if row.route_type == FUNICULAR_ROUTE_TYPE {
            tracing::debug!(route_id = %row.route_id, "skipping incline route");
            continue;
        }
        let vehicle_type = match VehicleType::parse(&row.route_type) {
            Ok(vehicle_type) => vehicle_type,
            Err(e) => {
                tracing::warn!(route_id = %row.route_id, error = %e, "skipping route");
                continue;
            }
        };
        Route::create_from(cache, &row.route_id, row.name(), vehicle_type);
        count += 1;
    }

    tracing::info!(routes = count, "routes loaded");
    Ok(count)
}

/// Register every stop in the stops file with `cache`.
///
/// Stops with out-of-range coordinates are skipped. Returns the number of
/// stops registered or found.
pub fn load_stops(config: &LoaderConfig, cache: &IdentityCache<Stop>) -> Result<usize, LoadError> {
    let mut count = 0;
    for row in read_rows::<StopRow>(&config.stops_path())? {
        let location = match Location::new(row.stop_lat, row.stop_lon) {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(stop_id = %row.stop_id, error = %e, "skipping stop");
                continue;
            }
        };
        Stop::create_from(cache, &row.stop_id, &row.stop_name, location);
        count += 1;
    }

    tracing::info!(stops = count, "stops loaded");
    Ok(count)
}

/// Raw stop-time rows from the schedule file, in file order.
pub fn load_schedule_rows(config: &LoaderConfig) -> Result<Vec<RawScheduleRow>, LoadError> {
    read_rows(&config.schedule_path())
}

/// Raw observed-arrival rows from the history file, in file order.
pub fn load_history_rows(config: &LoaderConfig) -> Result<Vec<RawHistoryRow>, LoadError> {
    read_rows(&config.history_path())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);
    reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                tracing::warn!(path = %path.display(), ?line, error = %e, "skipping malformed row");
                skipped += 1;
            }
        }
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), skipped, "read data file");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn loads_routes_skipping_inclines_and_unknown_types() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "routes.txt",
            "route_id,agency_id,route_short_name,route_long_name,route_desc,route_type\n\
             61D,PRT,61D,Murray,,3\n\
             RED,PRT,RED,Red Line - Castle Shannon via Beechview,,0\n\
             MI,PRT,MI,Monongahela Incline,,7\n\
             FERRY,PRT,F,Ferry,,4\n\
             P1,PRT,P1,,,3\n",
        );
        let config = LoaderConfig::new(dir.path());
        let cache = IdentityCache::new();

        assert_eq!(load_routes(&config, &cache).unwrap(), 3);
        assert_eq!(cache.get("61D").unwrap().name(), "Murray");
        assert_eq!(cache.get("RED").unwrap().vehicle_type(), VehicleType::LightRail);
        assert_eq!(cache.get("P1").unwrap().name(), "P1");
        assert!(!cache.contains_key("MI"));
        assert!(!cache.contains_key("FERRY"));
    }

    #[test]
    fn loads_stops_skipping_bad_coordinates() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "stops.txt",
            "stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon\n\
             7117,7117,Forbes Ave + Morewood Ave,,40.444300,-79.943600\n\
             BAD,BAD,Nowhere,,123.0,-79.9\n\
             WORSE,WORSE,Garbled,,north,west\n",
        );
        let config = LoaderConfig::new(dir.path());
        let cache = IdentityCache::new();

        assert_eq!(load_stops(&config, &cache).unwrap(), 1);
        let stop = cache.get("7117").unwrap();
        assert_eq!(stop.name(), "Forbes Ave + Morewood Ave");
        assert!((stop.location().latitude() - 40.4443).abs() < 1e-9);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn loads_schedule_rows_ignoring_extra_columns() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "schedule.txt",
            "trip_id,route_id,service_id,direction_id,arrival_time,stop_sequence,stop_id,stop_name,stop_lat,stop_lon\n\
             T1,61D,2,1,25:04:00,1,7117,Forbes + Morewood,40.4443,-79.9436\n\
             T1,61D,2,one,08:10:00,2,7118,Forbes + Craig,40.4444,-79.9485\n",
        );
        let rows = load_schedule_rows(&LoaderConfig::new(dir.path())).unwrap();

        // The second row has an undecodable direction
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trip_id, "T1");
        assert_eq!(rows[0].service_code, "2");
        assert_eq!(rows[0].direction_code, 1);
        assert_eq!(rows[0].arrival_time, "25:04:00");
    }

    #[test]
    fn loads_history_rows() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "history.txt",
            "tatripid,log_time,vid,stop_id,route_id,direction,scheduled_start_date,scheduled_start_time,dly\n\
             12345-01, 2023-11-02T08:17 ,5501,7117,61C,OUTBOUND,2023-11-02,08:15,false\n",
        );
        let rows = load_history_rows(&LoaderConfig::new(dir.path())).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trip_id, "12345-01");
        assert_eq!(rows[0].log_time, "2023-11-02T08:17");
        assert_eq!(rows[0].scheduled_start_time, "08:15");
    }

    #[test]
    fn loads_history_rows_shorter_than_header() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "history.txt",
            "tatripid,log_time,stop_name,stop_id,route_id,direction,scheduled_start_date,scheduled_start_time,actual_arrival_time,scheduled_arrival_time
             12345-01,2023-11-02T08:17,'Forbes Ave + Morewood Ave',7117,61C,OUTBOUND,2023-11-02,08:15,08:17
             12345-02,2023-11-03T00:09,'Fifth Ave + Craig St',7118,61C,INBOUND,2023-11-03,24:05,00:09
",
        );
        let rows = load_history_rows(&LoaderConfig::new(dir.path())).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].trip_id, "12345-01");
        assert_eq!(rows[0].stop_id, "7117");
        assert_eq!(rows[0].direction, "OUTBOUND");
        assert_eq!(rows[1].scheduled_start_time, "24:05");
    }

    #[test]
    fn loads_schedule_rows_with_flattened_column_names() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "schedule.txt",
            "trip_id,route_id,service_id,route_direction,arrival_time,departure_time,stop_id,stop_name,stop_latitude,stop_longitude
             T1,61D,2,0,08:00:00,08:00:00,7117,Forbes + Morewood,40.4443,-79.9436
",
        );
        let rows = load_schedule_rows(&LoaderConfig::new(dir.path())).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].direction_code, 0);
        assert!((rows[0].stop_lat - 40.4443).abs() < 1e-9);
        assert!((rows[0].stop_lon + 79.9436).abs() < 1e-9);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let config = LoaderConfig::new(dir.path());

        let err = load_history_rows(&config).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), config.history_path());

        assert!(matches!(
            load_routes(&config, &IdentityCache::new()),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = tempdir().unwrap();
        write(&dir, "history.txt", "tatripid,log_time,stop_id,route_id,direction,scheduled_start_date,scheduled_start_time\n");
        assert!(load_history_rows(&LoaderConfig::new(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn end_to_end_into_schedule() {
        use crate::schedule::{Schedule, ScheduleConfig, Selector};

        let dir = tempdir().unwrap();
        write(
            &dir,
            "routes.txt",
            "route_id,route_short_name,route_long_name,route_type\n61D,61D,Murray,3\n",
        );
        write(
            &dir,
            "schedule.txt",
            "trip_id,route_id,service_id,direction_id,arrival_time,stop_sequence,stop_id,stop_name,stop_lat,stop_lon\n\
             T1,61D,2,1,08:00:00,1,A,Stop A,40.44,-79.94\n\
             T1,61D,2,1,08:05:00,2,B,Stop B,40.45,-79.95\n",
        );
        let config = LoaderConfig::new(dir.path());
        let routes = IdentityCache::new();
        let stops = IdentityCache::new();

        load_routes(&config, &routes).unwrap();
        let rows = load_schedule_rows(&config).unwrap();
        let schedule = Schedule::build(rows, &routes, &stops, &ScheduleConfig::default()).unwrap();

        let trips = Selector::new().for_route_id("61D").at_stop_id("B").trips(&schedule);
        assert_eq!(trips.len(), 1);
        assert_eq!(stops.len(), 2);
    }
}
