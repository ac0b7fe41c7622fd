use std::fmt;

use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use skycast_core::config::Config;
use skycast_core::detail::{DetailSession, RenderSink};
use skycast_core::display;
use skycast_core::handoff;
use skycast_core::location::IpLocationSource;
use skycast_core::lookup;
use skycast_core::model::UnitPreference;
use skycast_core::provider::{self, OpenWeatherClient};

use crate::screen::TerminalScreen;

const SEARCH: &str = "Search by city name";
const MY_LOCATION: &str = "Use my location";
const QUIT: &str = "Quit";
const REFRESH: &str = "Refresh";
const BACK: &str = "Back";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default units.
    Configure,

    /// Open the home surface: featured cities, search, location lookup.
    Home,

    /// Show current conditions for a city.
    Show {
        /// City name.
        city: Option<String>,

        /// Unit override: "celsius"/"c" or "fahrenheit"/"f".
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Home) {
            Command::Configure => configure(),
            Command::Home => home().await,
            Command::Show { city, units } => show(city, units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Text::new("OpenWeather API key:").prompt()?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }
    config.set_api_key(key.to_string());

    config.units = Select::new("Default units:", UnitPreference::all().to_vec()).prompt()?;

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn home() -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = provider::client_from_config(&config)?;
    let mut screen = TerminalScreen::new();

    screen.print_header();
    let tiles = lookup::featured_panel(&client, &config.featured_cities).await;
    screen.print_featured(&tiles);

    loop {
        let mut options = vec![SEARCH.to_string(), MY_LOCATION.to_string()];
        options.extend(config.featured_cities.iter().cloned());
        options.push(QUIT.to_string());

        // Esc or a closed stdin ends the session.
        let Ok(choice) = Select::new("Open a city:", options).prompt() else {
            return Ok(());
        };

        let handoff_query = match choice.as_str() {
            QUIT => return Ok(()),
            SEARCH => {
                let Ok(input) = Text::new("City name:").prompt() else {
                    return Ok(());
                };
                match lookup::validate_city(&input) {
                    Ok(city) => handoff::to_query(city),
                    Err(err) => {
                        screen.show_error(&err.user_message());
                        continue;
                    }
                }
            }
            MY_LOCATION => {
                let source = IpLocationSource::new();
                match lookup::city_from_location(&source, &client).await {
                    Ok(city) => handoff::to_query(&city),
                    Err(err) => {
                        screen.show_error(&err.user_message());
                        continue;
                    }
                }
            }
            city => handoff::to_query(city),
        };

        detail(&client, Some(&handoff_query), config.units).await?;
    }
}

async fn show(city: Option<String>, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = provider::client_from_config(&config)?;

    let unit = match units.as_deref() {
        Some(raw) => UnitPreference::try_from(raw)?,
        None => config.units,
    };

    let handoff_query = city.as_deref().map(handoff::to_query);
    detail(&client, handoff_query.as_deref(), unit).await
}

async fn detail(
    client: &OpenWeatherClient,
    handoff_query: Option<&str>,
    unit: UnitPreference,
) -> anyhow::Result<()> {
    let mut session = DetailSession::new(client, TerminalScreen::new(), unit);
    session.open(handoff_query).await;

    // Nothing rendered means guidance or a fetch error was already shown.
    if session.snapshot().is_none() {
        return Ok(());
    }

    loop {
        let options = detail_options(session.unit());

        let Ok(choice) = Select::new("View:", options).prompt() else {
            return Ok(());
        };

        match choice {
            DetailChoice::Back => return Ok(()),
            DetailChoice::Refresh => {
                let Some(city) = session.snapshot().map(|s| s.city.clone()) else {
                    return Ok(());
                };
                session.load(&city).await;
            }
            // Picking the already-active unit is a no-op inside the session.
            DetailChoice::Unit { unit, .. } => session.set_unit(unit),
        }
    }
}

/// One entry of the detail menu. Carrying the [`UnitPreference`] in the
/// variant keeps the handler independent of the rendered label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailChoice {
    Unit { unit: UnitPreference, active: bool },
    Refresh,
    Back,
}

impl fmt::Display for DetailChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailChoice::Unit { unit, active } => {
                let symbol = display::unit_symbol(*unit);
                if *active {
                    write!(f, "{symbol} (active)")
                } else {
                    f.write_str(symbol)
                }
            }
            DetailChoice::Refresh => f.write_str(REFRESH),
            DetailChoice::Back => f.write_str(BACK),
        }
    }
}

fn detail_options(active: UnitPreference) -> Vec<DetailChoice> {
    let mut options: Vec<DetailChoice> = UnitPreference::all()
        .iter()
        .map(|&unit| DetailChoice::Unit {
            unit,
            active: unit == active,
        })
        .collect();
    options.push(DetailChoice::Refresh);
    options.push(DetailChoice::Back);
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_menu_marks_the_active_unit() {
        let celsius_active: Vec<String> = detail_options(UnitPreference::Celsius)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(celsius_active, ["°C (active)", "°F", REFRESH, BACK]);

        let fahrenheit_active: Vec<String> = detail_options(UnitPreference::Fahrenheit)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(fahrenheit_active, ["°C", "°F (active)", REFRESH, BACK]);
    }

    #[test]
    fn unit_entries_carry_the_unit_they_label() {
        let options = detail_options(UnitPreference::Celsius);

        assert_eq!(
            options[0],
            DetailChoice::Unit {
                unit: UnitPreference::Celsius,
                active: true,
            }
        );
        assert_eq!(
            options[1],
            DetailChoice::Unit {
                unit: UnitPreference::Fahrenheit,
                active: false,
            }
        );
    }
}
