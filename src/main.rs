use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use show_finder::config::DEFAULT_BASE_URL;
use show_finder::{
    DirectoryConfig, Page, ProgressEvent, RenderPolicy, ShowDirectory, ShowFinder, SubmitEvent,
    TvMazeDirectory, UiEvent, Visibility, WidgetConfig, dispatch, export_document, open_finder,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

/// Search the TVMaze show directory and list a show's episodes
#[derive(Debug, Parser)]
#[command(name = "show-finder", version, about)]
struct Cli {
    /// Base URL of the show directory API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Drop responses of requests that were superseded by a newer one
    #[arg(long, global = true)]
    discard_stale: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for shows and print the result cards
    Search {
        /// Free-text search term
        term: String,

        /// Write the rendered page to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Print the episode list of a show
    Episodes {
        /// Directory id of the show
        show_id: u64,
    },

    /// Search and browse episodes interactively (default)
    Interactive {
        /// Write the rendered page to this HTML file after every action
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::SearchStarted { term } => {
            println!("Searching for '{}'...", term);
        }
        ProgressEvent::ShowsFound { count } => {
            if count == 0 {
                println!("No shows found.");
            } else {
                println!("Found {} show(s)\n", count);
            }
        }
        ProgressEvent::EpisodesRequested { show_id } => {
            println!("Fetching episodes for show {}...", show_id);
        }
        ProgressEvent::EpisodesFound { show_id, count } => {
            println!("Found {} episode(s) for show {}\n", count, show_id);
        }
        ProgressEvent::StaleResponseDiscarded { ticket } => {
            println!(
                "Ignoring outdated {:?} response #{}",
                ticket.flow, ticket.sequence
            );
        }
    }
}

fn print_cards(page: &Page) -> Result<(), Box<dyn Error>> {
    for (index, card) in page.cards()?.iter().enumerate() {
        println!("[{}] {} (id {})", index + 1, card.name, card.show_id);
        println!("    Image: {}", card.image);
        if !card.summary.is_empty() {
            println!("    {}", card.summary);
        }
        println!();
    }
    Ok(())
}

fn print_episodes(page: &Page) -> Result<(), Box<dyn Error>> {
    if page.episodes_area() == Visibility::Hidden {
        return Ok(());
    }
    println!("=== Episodes ===");
    for line in page.episode_lines()? {
        println!("  {}", line);
    }
    println!();
    Ok(())
}

fn export_if_requested(page: &Page, html: Option<&Path>) -> Result<(), Box<dyn Error>> {
    if let Some(path) = html {
        export_document(page, path)?;
        println!("Page written to {}", path.display());
    }
    Ok(())
}

fn run_search(
    finder: &mut ShowFinder<TvMazeDirectory>,
    term: &str,
    html: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut page = Page::new();
    page.set_search_term(term);

    let mut event = UiEvent::SearchSubmitted(SubmitEvent::new());
    dispatch(finder, &mut page, &mut event, handle_progress_event)?;

    print_cards(&page)?;
    export_if_requested(&page, html)
}

fn run_episodes(
    finder: &mut ShowFinder<TvMazeDirectory>,
    show_id: u64,
) -> Result<(), Box<dyn Error>> {
    // No card to click here: the show id comes from the command line
    let mut page = Page::new();
    let ticket = finder.begin_episodes();
    let episodes = finder.directory().get_episodes(show_id)?;
    finder.finish_episodes(&mut page, ticket, show_id, &episodes, handle_progress_event)?;

    print_episodes(&page)
}

fn run_interactive(
    finder: &mut ShowFinder<TvMazeDirectory>,
    html: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut page = Page::new();

    loop {
        let term: String = Input::new()
            .with_prompt("Search shows (empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        if term.trim().is_empty() {
            return Ok(());
        }

        page.set_search_term(term);
        let mut event = UiEvent::SearchSubmitted(SubmitEvent::new());
        if let Err(e) = dispatch(finder, &mut page, &mut event, handle_progress_event) {
            // The page keeps its previous content
            eprintln!("Search failed: {}", e);
            continue;
        }

        print_cards(&page)?;
        export_if_requested(&page, html)?;

        loop {
            let mut items: Vec<String> = page
                .cards()?
                .iter()
                .map(|card| format!("Episodes of {}", card.name))
                .collect();
            items.push("New search".to_string());

            let selection = Select::new()
                .with_prompt("Choose a show")
                .items(&items)
                .default(0)
                .interact()?;

            if selection == items.len() - 1 {
                break;
            }

            let mut event = UiEvent::EpisodesClicked { trigger: selection };
            match dispatch(finder, &mut page, &mut event, handle_progress_event) {
                Ok(_) => {
                    print_episodes(&page)?;
                    export_if_requested(&page, html)?;
                }
                Err(e) => eprintln!("Fetching episodes failed: {}", e),
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let directory_config = DirectoryConfig {
        base_url: cli.api_url,
        timeout: Duration::from_secs(cli.timeout),
        ..DirectoryConfig::default()
    };
    let widget_config = WidgetConfig {
        render_policy: if cli.discard_stale {
            RenderPolicy::DiscardStale
        } else {
            RenderPolicy::LastWriteWins
        },
    };

    let mut finder = open_finder(directory_config, widget_config)?;

    match cli.command {
        Some(Command::Search { term, html }) => run_search(&mut finder, &term, html.as_deref()),
        Some(Command::Episodes { show_id }) => run_episodes(&mut finder, show_id),
        Some(Command::Interactive { html }) => run_interactive(&mut finder, html.as_deref()),
        None => run_interactive(&mut finder, None),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
