use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, Select, Text};
use skyview_core::{
    Config, Controller, Coordinates, LocationMode, OpenWeatherGateway, Status, location, theme,
};
use std::{process::ExitCode, sync::Arc};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather, themed by condition and daylight")]
pub struct Cli {
    /// Print the view as JSON instead of a weather card.
    #[arg(long, global = true)]
    pub json: bool,

    /// OpenWeatherMap API key for this run; overrides config and SKYVIEW_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the API key, default city and location mode.
    Configure,

    /// Show current weather for a city (the configured default if omitted).
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: Option<String>,
    },

    /// Show current weather for your current location.
    Here,

    /// Show the 5-day outlook for a city.
    Forecast {
        /// City name; the configured default if omitted.
        city: Option<String>,
    },

    /// Search repeatedly in one session, with location lookup and retry.
    Session,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let config = Config::load()?;

        match &self.command {
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => {
                let controller = self.controller(&config)?;
                println!("{}", render::loading(&controller.theme()));
                match city {
                    Some(city) => controller.submit_city(city).await,
                    None => controller.start().await,
                }
                print_view(&controller, self.json)?;
                Ok(exit_code(&controller))
            }
            Command::Here => {
                let controller = self.controller(&config)?;
                println!("{}", render::loading(&controller.theme()));
                controller.request_location().await;
                print_view(&controller, self.json)?;
                Ok(exit_code(&controller))
            }
            Command::Forecast { city } => {
                let city = city.as_deref().unwrap_or(&config.default_city).trim();
                if city.is_empty() {
                    println!("{}", render::idle(&theme::DEFAULT));
                    return Ok(ExitCode::FAILURE);
                }
                let gateway = self.gateway(&config)?;
                match gateway.fetch_forecast_by_city(city).await {
                    Ok(entries) if self.json => {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                        Ok(ExitCode::SUCCESS)
                    }
                    Ok(entries) => {
                        println!("{}", render::forecast(city, &entries));
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(err) => {
                        tracing::debug!(error = ?err, "forecast lookup failed");
                        let panel = render::error_panel(&err.to_string(), &theme::DEFAULT, false);
                        eprintln!("{panel}");
                        Ok(ExitCode::FAILURE)
                    }
                }
            }
            Command::Session => {
                let controller = self.controller(&config)?;
                session::run(&controller, self.json).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn gateway(&self, config: &Config) -> Result<OpenWeatherGateway> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => config.api_key()?,
        };
        Ok(OpenWeatherGateway::with_base_url(api_key, config.base_url.clone()))
    }

    fn controller(&self, config: &Config) -> Result<Controller> {
        let gateway = Arc::new(self.gateway(config)?);
        let location = location::provider_from_config(&config.location)?;
        Ok(Controller::new(gateway, Some(location), config.default_city.clone()))
    }
}

pub fn print_view(controller: &Controller, json: bool) -> Result<()> {
    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::view(&view, controller.can_retry()));
    }
    Ok(())
}

fn exit_code(controller: &Controller) -> ExitCode {
    match controller.status() {
        Status::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let city = Text::new("Default city:").with_default(&config.default_city).prompt()?;
    config.set_default_city(&city)?;

    let modes = LocationMode::all().to_vec();
    let start = modes.iter().position(|m| *m == config.location.mode).unwrap_or(0);
    config.location.mode = Select::new("Location lookup:", modes)
        .with_starting_cursor(start)
        .with_help_message("ip: by public IP, fixed: coordinates below, off: never locate")
        .prompt()?;

    if config.location.mode == LocationMode::Fixed {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number between -90 and 90")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number between -180 and 180")
            .prompt()?;
        let coords = Coordinates::new(latitude, longitude)?;
        config.location.latitude = Some(coords.latitude);
        config.location.longitude = Some(coords.longitude);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
