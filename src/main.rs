use clap::{Parser, Subcommand};
use mbx_catalog::config::{self, CatalogConfig};
use mbx_catalog::i18n::{self, Language};
use mbx_catalog::item::Field;
use mbx_catalog::output::{self, PrefsSummary};
use mbx_catalog::prefs::{JsonFilePrefs, Preferences, Theme, ViewMode};
use mbx_catalog::render::{self, RenderContext};
use mbx_catalog::sort::{SortKey, SortState};
use mbx_catalog::source::{self, SourceError};
use mbx_catalog::store::Store;
use mbx_catalog::years::{YearBuckets, YearSelection};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

/// Search and favorites filters shared by the viewing commands.
#[derive(clap::Args, Clone, Default)]
struct FilterArgs {
    /// Search text matched against name, code and year
    #[arg(long, short)]
    query: Option<String>,

    /// Only show favorites
    #[arg(long)]
    favorites: bool,
}

#[derive(Parser)]
#[command(name = "mbx-catalog")]
#[command(about = "Catalog of model cars: gallery, editor and year infographic")]
#[command(long_about = "\
Catalog of model cars: gallery, editor and year infographic

The catalog is a JSON file holding a list of items, either a bare array or an
object with an `items` or `data` array:

  [
    {\"name\": \"Mini Cooper\", \"year\": \"1959\", \"code\": \"M10\",
     \"image\": \"mini.jpg\", \"link\": \"https://...\"}
  ]

Years may be a single year (1959), a range (1948-1958) or any text.

Search matches name and code by substring, and years by value: `1961`
matches a 1960-1962 range, `55` means 1955.

Sort order, view mode, favorites, theme and language are remembered between
runs in the preferences file.

Run 'mbx-catalog gen-config' to generate a documented config.toml.")]
#[command(version = env!("MBX_BUILD_VERSION"))]
struct Cli {
    /// Directory holding config.toml; relative config paths resolve against it
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Catalog JSON file (overrides data_path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Preferences file (overrides prefs_path)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the visible items in sorted order
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show image and link under each item
        #[arg(long)]
        details: bool,
    },
    /// Search interactively: each stdin line replaces the query, and results
    /// print once input has been quiet for `[search] debounce_ms`
    Search {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
        /// Show image and link under each item
        #[arg(long)]
        details: bool,
    },
    /// Show items per year, or the items of one year
    Years {
        #[command(flatten)]
        filter: FilterArgs,
        /// List the items covering this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Select the sort key; selecting the active key flips the direction
    Sort {
        #[arg(value_parser = parse_sort_key)]
        key: SortKey,
        /// Sort descending instead of toggling
        #[arg(long, conflicts_with = "asc")]
        desc: bool,
        /// Sort ascending instead of toggling
        #[arg(long)]
        asc: bool,
    },
    /// Toggle an image in the favorites
    Favorite {
        /// Image filename identifying the item
        image: String,
    },
    /// Change one field of one item (index in file order)
    Edit {
        index: usize,
        #[arg(value_parser = parse_field)]
        field: Field,
        value: String,
    },
    /// Write the HTML views
    Render {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
        /// Write only the infographic with this year selected
        #[arg(long)]
        year: Option<i32>,
    },
    /// Write the catalog as pretty JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the catalog with the items of a JSON file
    Import { file: PathBuf },
    /// Prepend blank items for new photos
    AddPhoto {
        /// Image filenames
        images: Vec<String>,
        /// Add every photo found under this directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Set the theme, or toggle it when none is given
    Theme {
        #[arg(value_parser = parse_theme)]
        theme: Option<Theme>,
    },
    /// Set the UI language (ru, en, pt)
    Lang { code: String },
    /// Set the view mode shown by index.html
    Mode {
        #[arg(value_parser = parse_view_mode)]
        mode: ViewMode,
    },
    /// Show the stored preferences
    Prefs,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| format!("unknown sort key '{s}' (name, code, year)"))
}

fn parse_field(s: &str) -> Result<Field, String> {
    Field::parse(s).ok_or_else(|| format!("unknown field '{s}' (name, year, code, image, link)"))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| format!("unknown theme '{s}' (light, dark)"))
}

fn parse_view_mode(s: &str) -> Result<ViewMode, String> {
    ViewMode::parse(s).ok_or_else(|| format!("unknown view '{s}' (gallery, editor, infographic)"))
}

/// Resolved configuration and file locations for one run.
struct Session {
    config: CatalogConfig,
    data_path: PathBuf,
    prefs: Preferences<JsonFilePrefs>,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self, config::ConfigError> {
        let config = config::load_config(&cli.config_dir)?;
        let data_path = resolve(&cli.config_dir, cli.data.as_deref(), &config.data_path);
        let prefs_path = resolve(&cli.config_dir, cli.prefs.as_deref(), &config.prefs_path);
        let prefs = Preferences::with_defaults(
            JsonFilePrefs::load(&prefs_path),
            config.pref_defaults(),
        );
        Ok(Self {
            config,
            data_path,
            prefs,
        })
    }

    fn language(&self) -> Language {
        self.prefs.language()
    }

    fn t(&self, key: &str) -> String {
        i18n::t(self.language(), key, &[])
    }

    /// The catalog with persisted sort and favorites applied.
    fn store(&self) -> Store {
        let mut store = Store::new(self.prefs.sort_state(), self.prefs.favorites());
        store.load(source::load_or_empty(&self.data_path));
        store
    }

    fn filtered_store(&self, filter: &FilterArgs) -> Store {
        let mut store = self.store();
        if let Some(query) = &filter.query {
            store.set_query(query.as_str());
        }
        store.set_favorites_only(filter.favorites);
        store
    }

    fn save(&self, store: &Store) -> Result<(), SourceError> {
        source::write_items(&self.data_path, store.data())
    }
}

/// CLI flags are taken as given; config paths are relative to the config dir.
fn resolve(config_dir: &Path, flag: Option<&Path>, configured: &str) -> PathBuf {
    match flag {
        Some(path) => path.to_path_buf(),
        None => config_dir.join(configured),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut session = Session::open(&cli)?;
    let language = session.language();

    match &cli.command {
        Command::List { filter, details } => {
            let store = session.filtered_store(filter);
            output::print_list_output(&store, language, *details);
        }
        Command::Search { favorites, details } => {
            run_search(&session, *favorites, *details);
        }
        Command::Years { filter, year } => {
            let store = session.filtered_store(filter);
            let visible = store.visible_items();
            if let Some(key) = visible.empty_message_key() {
                println!("{}", session.t(key));
                return Ok(());
            }
            let buckets = YearBuckets::build(visible.items(), session.config.infographic.years());
            match year {
                Some(year) => output::print_year_detail(&buckets, *year, language),
                None => output::print_year_histogram(&buckets),
            }
        }
        Command::Sort { key, desc, asc } => {
            let mut state = session.prefs.sort_state();
            if *desc || *asc {
                state.set_explicit(*key, *desc);
            } else {
                state.select(*key);
            }
            session.prefs.set_sort_state(state);
            print_sort_state(state, language);
        }
        Command::Favorite { image } => {
            let mut favorites = session.prefs.favorites();
            let added = favorites.toggle(image);
            session.prefs.set_favorites(&favorites);
            let key = if added {
                "favoriteAdded"
            } else {
                "favoriteRemoved"
            };
            println!("{}: {}", session.t(key), image);
        }
        Command::Edit {
            index,
            field,
            value,
        } => {
            let mut store = session.store();
            if !store.edit(*index, *field, value.as_str()) {
                return Err(format!(
                    "no item at index {index} ({} items)",
                    store.len()
                )
                .into());
            }
            session.save(&store)?;
            println!("{index}.{} = {value}", field.as_str());
        }
        Command::Render {
            filter,
            output: output_dir,
            year,
        } => {
            let store = session.filtered_store(filter);
            let ctx = RenderContext::new(&session.config, language, session.prefs.theme());
            match year {
                Some(year) => {
                    let mut selection = YearSelection::default();
                    selection.click(*year);
                    let page = render::render_infographic_page(&ctx, &store, selection, "");
                    let path = output_dir.join("infographic.html");
                    render::write_page(&path, &page)?;
                    println!("{}", path.display());
                }
                None => {
                    let mode = session.prefs.view_mode(None);
                    let summary = render::render_site(&ctx, &store, mode, output_dir)?;
                    output::print_render_output(&summary, output_dir);
                }
            }
        }
        Command::Export { output: target } => {
            let store = session.store();
            if store.is_empty() {
                return Err(session.t("loadJsonFirst").into());
            }
            match target {
                Some(path) => {
                    source::write_items(path, store.data())?;
                    println!("{}: {}", session.t("fileDownloaded"), path.display());
                }
                None => println!("{}", store.to_json()),
            }
        }
        Command::Import { file } => {
            let items = match source::import_file(file) {
                Ok(items) => items,
                Err(SourceError::Json(e)) => {
                    return Err(format!("{}: {}", session.t("errorInvalidJson"), e).into());
                }
                Err(e) => return Err(e.into()),
            };
            let mut store = session.store();
            store.load(items);
            session.save(&store)?;
            println!("{} ({} items)", session.t("jsonLoaded"), store.len());
        }
        Command::AddPhoto { images, dir } => {
            let mut names = images.clone();
            if let Some(dir) = dir {
                names.extend(source::discover_photos(dir)?);
            }
            let mut store = session.store();
            let added = store.add_photos(names);
            if added > 0 {
                session.save(&store)?;
            }
            let count = added.to_string();
            println!("{}", i18n::t(language, "addPhotoAdded", &[("n", &count)]));
        }
        Command::Theme { theme } => {
            let theme = theme.unwrap_or(match session.prefs.theme() {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            });
            session.prefs.set_theme(theme);
            let key = match theme {
                Theme::Light => "themeLight",
                Theme::Dark => "themeDark",
            };
            println!("{}", session.t(key));
        }
        Command::Lang { code } => {
            if session.prefs.set_language_code(code) {
                println!("{}", session.prefs.language());
            } else {
                eprintln!("Ignoring unknown language '{code}' (ru, en, pt)");
            }
        }
        Command::Mode { mode } => {
            if *mode == ViewMode::Editor {
                // The editor lists items in the order the gallery showed them.
                let mut store = session.store();
                if !store.is_empty() {
                    store.adopt_sorted_order();
                    session.save(&store)?;
                }
            }
            session.prefs.set_view_mode(*mode);
            println!("{}", session.t(mode.as_str()));
        }
        Command::Prefs => {
            let favorites = session.prefs.favorites();
            let summary = PrefsSummary {
                path: session.prefs.backend().path(),
                sort: session.prefs.sort_state(),
                view_mode: session.prefs.view_mode(None),
                theme: session.prefs.theme(),
                language,
                favorites: &favorites,
            };
            output::print_prefs(&summary);
        }
        // Printed before the config is loaded.
        Command::GenConfig => {}
    }

    Ok(())
}

/// Read queries from stdin and list matches for the last one typed once
/// input goes quiet. Closing stdin applies any query still waiting.
fn run_search(session: &Session, favorites: bool, details: bool) {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let language = session.language();
    let mut store = session.store();
    store.set_favorites_only(favorites);
    let mut pending = session.config.search.debouncer::<String>();

    loop {
        let received = match pending.due_at() {
            Some(due) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(query) => pending.push(query, Instant::now()),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(query) = pending.cancel() {
                    store.set_query(query);
                    output::print_list_output(&store, language, details);
                }
                return;
            }
        }
        if let Some(query) = pending.poll(Instant::now()) {
            store.set_query(query);
            output::print_list_output(&store, language, details);
        }
    }
}

fn print_sort_state(state: SortState, language: Language) {
    let label = match state.key {
        SortKey::Name => "sortByName",
        SortKey::Code => "sortByCode",
        SortKey::Year => "sortByYear",
    };
    let direction = if state.descending {
        "sortDescending"
    } else {
        "sortAscending"
    };
    println!(
        "{} ({})",
        i18n::t(language, label, &[]),
        i18n::t(language, direction, &[])
    );
}
