//! Station and depot aggregates
//!
//! Each level folds only over the already-computed values of its immediate
//! children: a station over its points, a depot over its stations'
//! summaries.

use crate::domain::{Availability, ChargingPointInfo};

/// Percentage rounded to two decimals; a zero total yields 0.0
pub fn availability_percent(available: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = f64::from(available) / f64::from(total) * 100.0;
    (percent * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StationSummary {
    pub total_points: u32,
    pub available_points: u32,
    pub unavailable_points: u32,
    pub total_energy_wh: f64,
}

impl StationSummary {
    /// Account for one point. Absent energy readings add nothing.
    pub fn add_point(&mut self, point: &ChargingPointInfo) {
        self.total_points += 1;
        match Availability::classify(point.status()) {
            Availability::Available => self.available_points += 1,
            Availability::Unavailable => self.unavailable_points += 1,
            Availability::Other => {}
        }
        if let Some(energy) = point.energy_meter_reading {
            self.total_energy_wh += energy;
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a ChargingPointInfo>) -> Self {
        let mut summary = Self::default();
        for point in points {
            summary.add_point(point);
        }
        summary
    }

    pub fn availability_percent(&self) -> f64 {
        availability_percent(self.available_points, self.total_points)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DepotSummary {
    pub total_stations: u32,
    pub available_stations: u32,
    pub unavailable_stations: u32,
    pub total_points: u32,
    pub available_points: u32,
    pub unavailable_points: u32,
    pub total_energy_wh: f64,
}

impl DepotSummary {
    pub fn add_station(&mut self, status: &str, station: &StationSummary) {
        self.total_stations += 1;
        match Availability::classify(status) {
            Availability::Available => self.available_stations += 1,
            Availability::Unavailable => self.unavailable_stations += 1,
            Availability::Other => {}
        }
        self.total_points += station.total_points;
        self.available_points += station.available_points;
        self.unavailable_points += station.unavailable_points;
        self.total_energy_wh += station.total_energy_wh;
    }

    pub fn station_availability_percent(&self) -> f64 {
        availability_percent(self.available_stations, self.total_stations)
    }

    pub fn point_availability_percent(&self) -> f64 {
        availability_percent(self.available_points, self.total_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(status: Option<&str>, energy: Option<f64>) -> ChargingPointInfo {
        ChargingPointInfo {
            charging_point_status: status.map(String::from),
            energy_meter_reading: energy,
            ..Default::default()
        }
    }

    #[test]
    fn test_percent_of_zero_total_is_zero() {
        assert_eq!(availability_percent(0, 0), 0.0);
        assert_eq!(StationSummary::default().availability_percent(), 0.0);
        assert_eq!(DepotSummary::default().point_availability_percent(), 0.0);
    }

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(availability_percent(1, 3), 33.33);
        assert_eq!(availability_percent(2, 3), 66.67);
        assert_eq!(availability_percent(4, 4), 100.0);
    }

    #[test]
    fn test_station_fold() {
        let points = vec![
            point(Some("Available"), Some(100.0)),
            point(Some("Unavailable"), None),
            point(Some("Charging"), Some(50.5)),
            point(None, None),
        ];
        let summary = StationSummary::from_points(&points);

        assert_eq!(summary.total_points, 4);
        assert_eq!(summary.available_points, 1);
        assert_eq!(summary.unavailable_points, 1);
        assert_eq!(summary.total_energy_wh, 150.5);
        assert_eq!(summary.availability_percent(), 25.0);
    }

    #[test]
    fn test_depot_fold_uses_station_summaries() {
        let a = StationSummary {
            total_points: 2,
            available_points: 2,
            unavailable_points: 0,
            total_energy_wh: 10.0,
        };
        let b = StationSummary {
            total_points: 3,
            available_points: 0,
            unavailable_points: 1,
            total_energy_wh: 5.0,
        };

        let mut depot = DepotSummary::default();
        depot.add_station("Available", &a);
        depot.add_station("Unknown", &b);

        assert_eq!(depot.total_stations, 2);
        assert_eq!(depot.available_stations, 1);
        assert_eq!(depot.unavailable_stations, 0);
        assert_eq!(depot.total_points, 5);
        assert_eq!(depot.available_points, 2);
        assert_eq!(depot.unavailable_points, 1);
        assert_eq!(depot.total_energy_wh, 15.0);
        assert_eq!(depot.station_availability_percent(), 50.0);
        assert_eq!(depot.point_availability_percent(), 40.0);
    }
}
