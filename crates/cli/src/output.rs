//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use ambumap_core::map::{format_distance, MarkerColor};
use ambumap_core::StationRecord;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Colors `text` the way the map colors the station's marker.
pub fn paint(text: &str, color: MarkerColor) -> String {
    match color {
        MarkerColor::Red => text.red().to_string(),
        MarkerColor::Orange => text.yellow().to_string(),
        MarkerColor::Blue => text.blue().to_string(),
        MarkerColor::Green => text.green().to_string(),
    }
}

/// One table row: marker dot, tier columns, name, optional distance.
pub fn station_row(station: &StationRecord, distance_km: Option<f64>) -> String {
    let color = MarkerColor::for_station(station.category(), station.schedule());
    let mut row = format!(
        "{} {:<3} {:<10} {}",
        paint("●", color),
        station.category().code(),
        station.schedule().label(),
        station.name()
    );
    if let Some(km) = distance_km {
        row.push_str(&format!("  {}", format_distance(km).dimmed()));
    }
    row
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambumap_core::Registry;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "station", "stations"), "1 station");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(14, "station", "stations"), "14 stations");
    }

    #[test]
    fn test_station_row_contents() {
        let registry = Registry::la_rioja();
        let station = registry.find_by_name("Cenicero SVB").unwrap();

        let row = station_row(station, None);
        assert!(row.contains("SVB"));
        assert!(row.contains("12 h (día)"));
        assert!(row.ends_with("Cenicero SVB"));

        let row = station_row(station, Some(14.44));
        assert!(row.contains("14.4 km"));
    }

    #[test]
    fn test_paint_keeps_text() {
        assert!(paint("SVA", MarkerColor::Orange).contains("SVA"));
    }
}
