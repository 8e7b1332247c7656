//! Interactive session: one controller, many searches.

use anyhow::Result;
use inquire::{InquireError, Text};
use skyview_core::Controller;

use crate::render;

/// What one line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(String),
    Here,
    Retry,
    Quit,
    /// Blank line or unknown command.
    Nothing,
}

impl Action {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input {
            "" => Action::Nothing,
            ":here" | ":h" => Action::Here,
            ":retry" | ":r" => Action::Retry,
            ":quit" | ":q" | ":exit" => Action::Quit,
            cmd if cmd.starts_with(':') => Action::Nothing,
            city => Action::Search(city.to_string()),
        }
    }
}

pub async fn run(controller: &Controller, json: bool) -> Result<()> {
    println!("{}\n", render::banner(&controller.theme()));

    println!("{}", render::loading(&controller.theme()));
    controller.start().await;
    crate::cli::print_view(controller, json)?;

    loop {
        let input = Text::new("City:")
            .with_help_message(":here for your location, :retry to try again, :quit to exit")
            .prompt();

        let input = match input {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match Action::parse(&input) {
            Action::Search(city) => {
                println!("{}", render::loading(&controller.theme()));
                controller.submit_city(&city).await;
            }
            Action::Here => {
                println!("{}", render::loading(&controller.theme()));
                controller.request_location().await;
            }
            Action::Retry => controller.retry().await,
            Action::Quit => break,
            Action::Nothing => continue,
        }

        crate::cli::print_view(controller, json)?;
    }

    Ok(())
}
