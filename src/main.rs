mod api;
mod config;
mod models;
mod report;
mod share;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use crate::api::ApiClient;
use crate::report::ReportGenerator;
use crate::share::ShareError;
use crate::ui::{
    add_wizard::{AddWizardAction, AddWizardState, handle_input as handle_add_input, render_add_wizard},
    home::{HomeAction, HomeState, handle_input as handle_home_input, render_home},
    update_wizard::{
        UpdateWizardAction, UpdateWizardState, handle_input as handle_update_input,
        render_update_wizard,
    },
    view::{ViewAction, ViewState, handle_input as handle_view_input, render_view},
};

/// Terminal client for the Vidwat Associates project records backend.
#[derive(Parser, Debug)]
#[command(name = "vidwat-manager", version, about)]
struct Cli {
    /// Override the backend API base URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Override the directory reports are written to
    #[arg(long)]
    output_dir: Option<String>,
}

// Represents the current screen in the app
enum AppScreen {
    Home,
    AddProject,
    ViewProject,
    UpdateProject,
}

// Main application state
struct AppState {
    api: ApiClient,
    generator: ReportGenerator,
    screen: AppScreen,
    home_state: HomeState,
    add_state: Option<AddWizardState>,
    view_state: Option<ViewState>,
    update_state: Option<UpdateWizardState>,
}

impl AppState {
    fn new(api: ApiClient, generator: ReportGenerator) -> Self {
        Self {
            api,
            generator,
            screen: AppScreen::Home,
            home_state: HomeState::new(),
            add_state: None,
            view_state: None,
            update_state: None,
        }
    }

    fn go_home(&mut self) {
        self.home_state = HomeState::new();
        self.screen = AppScreen::Home;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init(cli.backend_url, cli.output_dir)?;
    println!("Initializing Vidwat project manager...");
    println!("Backend: {}", config.backend_url());

    let api = ApiClient::new(&config);
    let generator = ReportGenerator::new(config.output_dir())?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app_state = AppState::new(api, generator);

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = result {
        println!("Error: {}", err);
    }

    println!("Thanks for using Vidwat project manager!");

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        // Render current screen
        terminal.draw(|f| match app_state.screen {
            AppScreen::Home => {
                render_home(f, &mut app_state.home_state);
            }
            AppScreen::AddProject => {
                if let Some(state) = &mut app_state.add_state {
                    render_add_wizard(f, state);
                }
            }
            AppScreen::ViewProject => {
                if let Some(state) = &mut app_state.view_state {
                    render_view(f, state);
                }
            }
            AppScreen::UpdateProject => {
                if let Some(state) = &mut app_state.update_state {
                    render_update_wizard(f, state);
                }
            }
        })?;

        // Handle input for current screen
        let should_quit = match app_state.screen {
            AppScreen::Home => handle_home_screen(app_state)?,
            AppScreen::AddProject => handle_add_screen(app_state).await?,
            AppScreen::ViewProject => handle_view_screen(app_state).await?,
            AppScreen::UpdateProject => handle_update_screen(app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_home_screen(app_state: &mut AppState) -> Result<bool> {
    match handle_home_input(&mut app_state.home_state)? {
        Some(HomeAction::Exit) => {
            return Ok(true);
        }
        Some(HomeAction::AddProject) => {
            app_state.add_state = Some(AddWizardState::new());
            app_state.screen = AppScreen::AddProject;
        }
        Some(HomeAction::ViewProject) => {
            app_state.view_state = Some(ViewState::new());
            app_state.screen = AppScreen::ViewProject;
        }
        Some(HomeAction::UpdateProject) => {
            app_state.update_state = Some(UpdateWizardState::new());
            app_state.screen = AppScreen::UpdateProject;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_add_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.add_state {
        match handle_add_input(state)? {
            Some(AddWizardAction::Cancel) => {
                app_state.go_home();
            }
            Some(AddWizardAction::Submit(project)) => {
                match app_state.api.add_project(&project).await {
                    Ok(()) => {
                        // Clear the form for the next entry, keeping the notice
                        app_state.add_state = Some(AddWizardState::after_submission());
                    }
                    Err(err) => {
                        state.set_error(format!("Submission failed: {}", err));
                    }
                }
            }
            None => {}
        }
    }

    Ok(false)
}

async fn handle_view_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.view_state {
        match handle_view_input(state)? {
            Some(ViewAction::Back) => {
                app_state.go_home();
            }
            Some(ViewAction::Fetch(client_id)) => {
                match app_state.api.get_projects(client_id).await {
                    Ok(projects) => {
                        if projects.is_empty() {
                            state.set_error("No project found with that Client ID.".to_string());
                        } else {
                            state.set_projects(projects);
                        }
                    }
                    Err(_) => {
                        state.set_error(
                            "Could not fetch project. Make sure the ID is correct.".to_string(),
                        );
                    }
                }
            }
            Some(ViewAction::Download(project)) => {
                match app_state.generator.generate(&project) {
                    Ok((_, pdf_path)) => {
                        state.set_success(format!("Report saved to {}", pdf_path));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "report generation failed");
                        state.set_error("Failed to download PDF.".to_string());
                    }
                }
            }
            Some(ViewAction::Share(project)) => match share::build_share_message(&project) {
                Ok(message) => match share::open_share_link(&message) {
                    Ok(()) => {
                        state.set_success("WhatsApp opened with the project summary.".to_string());
                    }
                    Err(ShareError::NavigationBlocked) => {
                        state.set_warning(
                            "The browser refused to open the share link. The summary was still composed."
                                .to_string(),
                        );
                    }
                    Err(err) => {
                        state.set_error(err.to_string());
                    }
                },
                Err(ShareError::InvalidPhone) => {
                    state.set_error("Invalid contact number in project data.".to_string());
                }
                Err(err) => {
                    state.set_error(err.to_string());
                }
            },
            None => {}
        }
    }

    Ok(false)
}

async fn handle_update_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.update_state {
        match handle_update_input(state)? {
            Some(UpdateWizardAction::Cancel) => {
                app_state.go_home();
            }
            Some(UpdateWizardAction::Fetch(client_id)) => {
                match app_state.api.get_projects(client_id).await {
                    Ok(projects) => match projects.into_iter().next() {
                        Some(project) => state.load_existing(project),
                        None => {
                            state.set_error("No project found with that Client ID.".to_string());
                        }
                    },
                    Err(_) => {
                        state.set_error("Error fetching project.".to_string());
                    }
                }
            }
            Some(UpdateWizardAction::Submit { client_id, patch }) => {
                match app_state.api.clone_project(client_id, &patch).await {
                    Ok(()) => {
                        app_state.update_state = Some(UpdateWizardState::after_submission());
                    }
                    Err(err) => {
                        state.set_error(format!("Failed to add new project: {}", err));
                    }
                }
            }
            None => {}
        }
    }

    Ok(false)
}
