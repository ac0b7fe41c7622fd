//! Terminal rendering for the home and detail surfaces.

use chrono::Local;
use skycast_core::detail::RenderSink;
use skycast_core::lookup::CityTile;
use skycast_core::model::DisplayModel;

/// Render sink that writes straight to stdout.
#[derive(Debug, Default)]
pub struct TerminalScreen;

impl TerminalScreen {
    pub fn new() -> Self {
        Self
    }

    /// Header line like "Monday, August 25, 2026 at 10:04 AM".
    pub fn print_header(&self) {
        println!("{}", Local::now().format("%A, %B %-d, %Y at %I:%M %p"));
        println!();
    }

    pub fn print_featured(&self, tiles: &[CityTile]) {
        println!("Featured cities");
        for tile in tiles {
            println!(
                "  {:<12} {:>4}°C   {}",
                tile.name, tile.temperature, tile.icon_url
            );
        }
        println!();
    }
}

impl RenderSink for TerminalScreen {
    fn show_weather(&mut self, model: &DisplayModel) {
        println!();
        println!("{} {}", model.city_line, model.flag);
        println!("{}  ({})", model.condition, model.icon_url);
        println!();
        println!("  Temperature  {}", model.temperature);
        println!("  Feels like   {}", model.feels_like);
        println!("  Min          {}", model.temp_min);
        println!("  Max          {}", model.temp_max);
        println!("  Humidity     {}", model.humidity);
        println!("  Wind         {}", model.wind_speed);
        println!("  Sunrise      {}", model.sunrise);
        println!("  Sunset       {}", model.sunset);
        println!();
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
