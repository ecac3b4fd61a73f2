mod logging;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podshelf::present::{
    SeasonPicker, episode_label, episode_summary, format_date, season_heading,
};
use podshelf::{
    ApiConfig, DEFAULT_API_URL, GenreFilter, History, LoadState, Loader, Location, NoopReporter,
    ProgressEvent, ProgressReporter, QueryStore, ReqwestClient, Route, SearchParams,
    SharedProgressReporter, ShowDetail, SortMode, derive, fetch_all_previews, fetch_show_detail,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static BACK: Emoji<'_, '_> = Emoji("← ", "<- ");

/// Browse a podcast catalogue from the terminal
#[derive(Parser, Debug)]
#[command(name = "podshelf")]
#[command(about = "Browse, search and page through a podcast catalogue")]
#[command(version)]
struct Args {
    /// Base URL of the catalogue API
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - no spinner, only errors are logged
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List shows, optionally searched, filtered, sorted and paged
    List {
        /// Only shows whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Genre id, or "all"
        #[arg(short, long)]
        genre: Option<String>,

        /// One of: default, az, za, seasons, updated
        #[arg(long)]
        sort: Option<SortMode>,

        /// Page number; out-of-range pages are clamped
        #[arg(short, long, allow_hyphen_values = true)]
        page: Option<i64>,
    },

    /// Show a single podcast with its seasons and episodes
    Show {
        /// Show id
        id: String,

        /// Season to open
        #[arg(short, long, default_value = "1")]
        season: u32,
    },

    /// Open an app location such as "/?q=history&page=2" or "/show/10716"
    Open {
        location: String,

        /// Season to open on a show page
        #[arg(short, long, default_value = "1")]
        season: u32,
    },
}

/// Spinner shown while a request is in flight
struct SpinnerReporter {
    spinner: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {wide_msg}")
                .unwrap(),
        );
        Self { spinner }
    }

    fn start(&self, message: String) {
        self.spinner.set_message(message);
        self.spinner.enable_steady_tick(Duration::from_millis(100));
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingPreviews { url } => {
                self.start(format!("{SEARCH}Loading shows from {}", url.cyan()));
            }
            ProgressEvent::FetchingShow { id, .. } => {
                self.start(format!("{SEARCH}Loading show {}", id.cyan()));
            }
            ProgressEvent::PreviewsLoaded { .. }
            | ProgressEvent::ShowLoaded { .. }
            | ProgressEvent::FetchFailed { .. }
            | ProgressEvent::FetchCancelled { .. } => {
                self.spinner.finish_and_clear();
            }
        }
    }
}

/// Everything a view needs to talk to the catalogue
struct App {
    client: ReqwestClient,
    config: ApiConfig,
    reporter: SharedProgressReporter,
}

impl App {
    /// Render the view for `location`; false when the view ended in an error state
    async fn render(&self, location: &Location, season: u32) -> bool {
        match location.route() {
            Route::Listing => self.render_listing(&location.params).await,
            Route::Show { id } => self.render_show(&id, &location.params, season).await,
            Route::NotFound => {
                render_not_found();
                false
            }
        }
    }

    async fn render_listing(&self, params: &SearchParams) -> bool {
        let mut loader = Loader::new();
        let (token, ticket) = loader.begin();
        let result = fetch_all_previews(&self.client, &self.config, token, &self.reporter).await;
        loader.finish(ticket, result);

        let shows = match loader.into_state() {
            LoadState::Ready(shows) => shows,
            LoadState::Failed(message) => {
                render_failure(&message);
                return false;
            }
            _ => return false,
        };

        let store = QueryStore::new(params.clone());
        let state = store.state();
        let view = derive(&shows, &state);

        println!(
            "\n{HEADPHONES}{} {}  {} {}  {} {}\n",
            "Search:".dimmed(),
            if state.term.is_empty() {
                "-".to_string()
            } else {
                format!("\"{}\"", state.term)
            },
            "Genre:".dimmed(),
            state.genre.label(),
            "Sort:".dimmed(),
            state.sort.label(),
        );

        if view.visible.is_empty() {
            println!("{}", "No shows match your filters.".dimmed());
            return true;
        }

        for show in &view.visible {
            println!("  {}", show.title.bold());
            let genres = show.genre_labels();
            if !genres.is_empty() {
                println!("    {}", genres.join(" • ").dimmed());
            }
            if show.updated.is_some() {
                println!(
                    "    {}",
                    format!("Updated {}", format_date(show.updated.as_ref())).dimmed()
                );
            }
            println!(
                "    {}",
                Location::show(&show.id, params.clone()).href().cyan()
            );
        }

        if view.total_pages > 1 {
            println!(
                "\n{} {} / {}",
                "Page".dimmed(),
                view.page.to_string().bold(),
                view.total_pages
            );

            let mut previous = QueryStore::new(params.clone());
            if previous.prev_page(view.page) {
                println!("  Prev: {}", Location::listing(previous.into_inner()).href().cyan());
            }
            let mut next = QueryStore::new(params.clone());
            if next.next_page(view.page, view.total_pages) {
                println!("  Next: {}", Location::listing(next.into_inner()).href().cyan());
            }
        }
        println!();

        true
    }

    async fn render_show(&self, id: &str, params: &SearchParams, season: u32) -> bool {
        let mut loader: Loader<ShowDetail> = Loader::new();
        let (token, ticket) = loader.begin();
        let result =
            fetch_show_detail(&self.client, &self.config, id, token, &self.reporter).await;
        loader.finish(ticket, result);

        let ok = match loader.state() {
            LoadState::Ready(show) => {
                render_detail(show, season);
                true
            }
            LoadState::Failed(message) => {
                render_failure(message);
                false
            }
            LoadState::NotFound => {
                println!("\nShow not found.");
                false
            }
            LoadState::Idle | LoadState::Loading => false,
        };

        // Back link keeps the listing's filters
        let back = Location::listing(params.clone());
        println!("\n{BACK}Back to results: {}\n", back.href().cyan());

        ok
    }
}

fn render_detail(show: &ShowDetail, season: u32) {
    println!("\n{MICROPHONE}{}", show.title.bold().magenta());
    if !show.description.is_empty() {
        println!("{}", show.description);
    }

    let genres = show.genre_labels();
    if !genres.is_empty() {
        let chips: Vec<String> = genres.iter().map(|g| format!("[{}]", g)).collect();
        println!("{}", chips.join(" ").cyan());
    }

    println!(
        "\n{} {} Seasons   {} {}   {} {} Episodes",
        "Total Seasons:".dimmed(),
        show.season_count(),
        "Last Updated:".dimmed(),
        format_date(show.updated.as_ref()),
        "Total Episodes:".dimmed(),
        show.episode_count(),
    );

    let picker = SeasonPicker::new(&show.seasons, season);
    let Some(active) = picker.active() else {
        println!("\nNo seasons available.");
        return;
    };

    let available: Vec<String> = picker.numbers().iter().map(|n| n.to_string()).collect();
    println!(
        "\n{} {}",
        "Current Season".bold(),
        format!("(available: {})", available.join(", ")).dimmed()
    );
    if picker.selected() != Some(season) {
        println!(
            "{}",
            format!("Season {} not available, showing Season {}", season, active.season).yellow()
        );
    }

    println!(
        "\n{}  {}",
        season_heading(active).bold(),
        format!("{} episodes", active.episodes.len()).dimmed()
    );

    if active.episodes.is_empty() {
        println!("{}", "No episodes in this season yet.".dimmed());
        return;
    }

    for episode in &active.episodes {
        println!(
            "  {} {}",
            episode_label(episode).cyan(),
            episode.title.bold()
        );
        let summary = episode_summary(episode);
        if !summary.is_empty() {
            println!("      {}", summary.dimmed());
        }
    }
}

fn render_failure(message: &str) {
    println!("\n{FAILURE}{}", format!("Oops—{}", message).red());
}

fn render_not_found() {
    println!("\n{}", "404 – Page Not Found".bold());
    println!("{BACK}Go Back Home: {}\n", "/".cyan());
}

/// Build the listing location for command-line filters.
///
/// The page is applied last since every other update resets it.
fn listing_location(
    search: Option<String>,
    genre: Option<String>,
    sort: Option<SortMode>,
    page: Option<i64>,
) -> Location {
    let mut store = QueryStore::new(History::new(Location::listing(SearchParams::new())));

    if let Some(term) = search {
        store.set_term(&term);
    }
    if let Some(genre) = genre {
        store.set_genre(&GenreFilter::from_param(&genre));
    }
    if let Some(sort) = sort {
        store.set_sort(sort);
    }
    if let Some(page) = page {
        store.set_page(page);
    }

    store.into_inner().current().clone()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose, args.quiet);

    let config = ApiConfig::with_base_url(&args.api_url)
        .with_context(|| format!("Invalid API URL '{}'", args.api_url))?;

    let reporter: SharedProgressReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    };

    let (location, season) = match args.command {
        Command::List {
            search,
            genre,
            sort,
            page,
        } => (listing_location(search, genre, sort, page), 1),
        Command::Show { id, season } => (Location::show(&id, SearchParams::new()), season),
        Command::Open { location, season } => (Location::parse(&location), season),
    };

    let app = App {
        client: ReqwestClient::new(),
        config,
        reporter,
    };

    if !app.render(&location, season).await {
        std::process::exit(1);
    }

    Ok(())
}
