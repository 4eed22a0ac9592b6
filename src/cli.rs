use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use atty::Stream;
use clap::{Parser, Subcommand};
use rand::thread_rng;
use serde_json::json;
use termimad::{FmtText, MadSkin, terminal_size};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wordscope::record::WordRecord;
use wordscope::session::Panel;
use wordscope::wordplay::{self, TRENDING_WORDS};
use wordscope::{
    Action, ClientConfig, Controller, FileStore, Library, LookupClient, Persistence, Phase,
    Render, Theme, View,
};

const DEFAULT_LOG_FILTER: &str = "wordscope=warn";
const SHELL_PROMPT: &str = "wordscope> ";
const MAX_DEFINITIONS: usize = 3;
const MAX_RELATED: usize = 8;

#[derive(Parser, Debug)]
#[command(name = "wordscope", about = "Look up English words from the terminal", version)]
pub struct Cli {
    /// Emit JSON instead of formatted text.
    #[arg(long, global = true)]
    json: bool,

    /// Base URL of the dictionary service.
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Directory holding history, favorites and preferences.
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Abandon a lookup after this many seconds.
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a word and show its definitions.
    Define {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show recent searches.
    History {
        /// Forget every recorded search first.
        #[arg(long)]
        clear: bool,
    },
    /// Show starred words.
    Favorites {
        /// Remove every favorite first.
        #[arg(long)]
        clear: bool,
    },
    /// Look up a word and star it, or unstar it if already starred.
    Favorite {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show the color theme, word of the day and trending words.
    Theme {
        /// Switch between light and dark.
        #[arg(long)]
        toggle: bool,
    },
    /// Show today's word.
    Wotd {
        /// Look the word up as well.
        #[arg(long)]
        explore: bool,
    },
    /// List trending words.
    Trending,
    /// Shuffle the letters of a word.
    Scramble {
        word: String,
        /// Print the original word under the scramble.
        #[arg(long)]
        reveal: bool,
    },
    /// Suggest rhymes for a word.
    Rhymes { word: String },
    /// Search for a transcript read from stdin, as produced by a speech recogniser.
    Listen,
    /// Interactive session.
    Shell,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        config
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();
    let config = cli.client_config();
    let as_json = cli.json;
    match cli.command {
        Command::Scramble { word, reveal } => handle_scramble(&word, reveal, as_json),
        Command::Rhymes { word } => handle_rhymes(&word, as_json),
        Command::Trending => handle_trending(as_json),
        command => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_client(command, config, as_json))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

type App = Controller<FileStore, LookupClient, Presenter>;

async fn run_client(
    command: Command,
    config: ClientConfig,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let store = FileStore::open(config.store_path())?;
    let library = Library::load(Persistence::new(store));
    let dictionary = LookupClient::new(&config)?;
    let mut app = Controller::new(library, dictionary, Presenter::new(as_json));

    match command {
        Command::Define { words } => {
            app.dispatch(Action::Search(words.join(" "))).await;
            lookup_outcome(&app)
        }
        Command::History { clear } => {
            if clear {
                app.apply(Action::ClearHistory).await;
            }
            app.dispatch(Action::ToggleHistoryPanel).await;
            Ok(())
        }
        Command::Favorites { clear } => {
            if clear {
                app.apply(Action::ClearFavorites).await;
            }
            app.dispatch(Action::ToggleFavoritesPanel).await;
            Ok(())
        }
        Command::Favorite { words } => {
            app.apply(Action::Search(words.join(" "))).await;
            app.dispatch(Action::ToggleFavorite).await;
            lookup_outcome(&app)
        }
        Command::Theme { toggle } => {
            if toggle {
                app.dispatch(Action::ToggleTheme).await;
            } else {
                app.render();
            }
            Ok(())
        }
        Command::Wotd { explore } => {
            if explore {
                app.dispatch(Action::ExploreWordOfTheDay).await;
                lookup_outcome(&app)
            } else {
                app.render();
                Ok(())
            }
        }
        Command::Listen => {
            let mut transcript = String::new();
            BufReader::new(tokio::io::stdin())
                .read_line(&mut transcript)
                .await?;
            app.dispatch(Action::VoiceTranscript(transcript)).await;
            lookup_outcome(&app)
        }
        Command::Shell => run_shell(&mut app).await,
        Command::Scramble { .. } | Command::Rhymes { .. } | Command::Trending => Ok(()),
    }
}

/// A failed lookup has already been rendered; surface it for the exit code.
fn lookup_outcome(app: &App) -> Result<(), Box<dyn Error>> {
    match app.session().phase() {
        Phase::Error(err) => Err(err.clone().into()),
        _ => Ok(()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ShellInput {
    Action(Action),
    Help,
    Quit,
    Unknown(String),
    Nothing,
}

fn parse_shell_line(line: &str) -> ShellInput {
    let line = line.trim();
    if line.is_empty() {
        return ShellInput::Nothing;
    }
    let Some(command) = line.strip_prefix(':') else {
        return ShellInput::Action(Action::Search(line.to_string()));
    };
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    let action = match (name, argument) {
        ("q" | "quit" | "exit", _) => return ShellInput::Quit,
        ("help" | "?", _) => return ShellInput::Help,
        ("theme", _) => Action::ToggleTheme,
        ("history", _) => Action::ToggleHistoryPanel,
        ("favorites", _) => Action::ToggleFavoritesPanel,
        ("clear-history", _) => Action::ClearHistory,
        ("clear-favorites", _) => Action::ClearFavorites,
        ("star", _) => Action::ToggleFavorite,
        ("reveal", _) => Action::RevealScramble,
        ("wotd", _) => Action::ExploreWordOfTheDay,
        ("clear", _) => Action::ClearInput,
        ("tag", word) if !word.is_empty() => Action::SearchTag(word.to_string()),
        _ => return ShellInput::Unknown(line.to_string()),
    };
    ShellInput::Action(action)
}

const SHELL_HELP: &str = "\
Type a word to look it up, or one of:
  :star             star or unstar the current word
  :reveal           reveal the scrambled word
  :tag <word>       look up a trending word or rhyme
  :wotd             look up the word of the day
  :history          show or hide recent searches
  :favorites        show or hide favorites
  :clear-history    forget recent searches
  :clear-favorites  remove all favorites
  :theme            switch between light and dark
  :clear            clear the search input
  :quit             leave";

async fn run_shell(app: &mut App) -> Result<(), Box<dyn Error>> {
    app.render();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{SHELL_PROMPT}");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_shell_line(&line) {
            ShellInput::Action(action) => app.dispatch(action).await,
            ShellInput::Help => println!("{SHELL_HELP}"),
            ShellInput::Quit => break,
            ShellInput::Unknown(input) => println!("Unknown command {input:?}. Type :help for a list."),
            ShellInput::Nothing => {}
        }
    }
    Ok(())
}

fn handle_scramble(word: &str, reveal: bool, as_json: bool) -> Result<(), Box<dyn Error>> {
    if word.trim().is_empty() {
        return Err("Word to scramble cannot be empty".into());
    }
    let scrambled = wordplay::scramble(word.trim(), &mut thread_rng());
    if as_json {
        let payload = json!({
            "word": reveal.then_some(word.trim()),
            "scrambled": scrambled,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{scrambled}");
        if reveal {
            println!("Answer: {}", word.trim());
        }
    }
    Ok(())
}

fn handle_rhymes(word: &str, as_json: bool) -> Result<(), Box<dyn Error>> {
    let rhymes = wordplay::rhymes_for(word.trim());
    if as_json {
        let payload = json!({ "word": word.trim(), "rhymes": rhymes });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("Rhymes for \"{}\": {}", word.trim(), rhymes.join(", "));
    }
    Ok(())
}

fn handle_trending(as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&json!({ "trending": TRENDING_WORDS }))?);
    } else {
        for word in TRENDING_WORDS {
            println!("{word}");
        }
    }
    Ok(())
}

/// Terminal front end: Markdown through termimad, or JSON snapshots.
struct Presenter {
    as_json: bool,
    tty: bool,
}

impl Presenter {
    fn new(as_json: bool) -> Self {
        Self {
            as_json,
            tty: stdout_is_tty(),
        }
    }
}

impl Render for Presenter {
    fn render(&mut self, view: &View<'_>) {
        if self.as_json {
            match serde_json::to_string_pretty(&view.to_json()) {
                Ok(text) => println!("{text}"),
                Err(err) => warn!(error = %err, "failed to encode view"),
            }
            return;
        }
        let text = view_markdown(view);
        if self.tty {
            let skin = markdown_skin(view.theme);
            println!("{}", FmtText::from(&skin, &text, Some(markdown_width())));
        } else {
            println!("{}", text.trim_end());
        }
    }
}

fn view_markdown(view: &View<'_>) -> String {
    let mut out = String::new();
    if let Some(panel) = view.session.open_panel() {
        push_panel(&mut out, view, panel);
    }
    match view.session.phase() {
        Phase::Idle => {
            if view.session.open_panel().is_none() {
                push_home(&mut out, view);
            }
        }
        Phase::Loading => out.push_str("*Looking up…*\n"),
        Phase::Error(err) => {
            out.push_str(&format!("## {}\n\n", err.title()));
            if let Some(message) = view.session.error_message() {
                out.push_str(&message);
                out.push('\n');
            }
        }
        Phase::Results => {
            if let Some(record) = view.displayed_record() {
                push_record(&mut out, view, record);
            }
        }
    }
    out
}

fn push_home(out: &mut String, view: &View<'_>) {
    if let Some(wotd) = view.session.word_of_the_day() {
        out.push_str(&format!("**Word of the Day:** *{}*\n\n", wotd.word));
    }
    out.push_str(&format!("**Trending:** {}\n\n", view.trending().join(" · ")));
    out.push_str(&format!(
        "Theme: {} · {} searched · {} favorites\n",
        view.theme,
        view.history.len(),
        view.favorites.len()
    ));
}

fn push_panel(out: &mut String, view: &View<'_>, panel: Panel) {
    let (title, words, empty) = match panel {
        Panel::History => ("Recent searches", view.history.entries(), "No search history yet"),
        Panel::Favorites => ("Favorites", view.favorites.words(), "No favorite words yet"),
    };
    out.push_str(&format!("## {title}\n\n"));
    if words.is_empty() {
        out.push_str(&format!("*{empty}*\n\n"));
        return;
    }
    for word in words {
        out.push_str(&format!("* {word}\n"));
    }
    out.push('\n');
}

fn push_record(out: &mut String, view: &View<'_>, record: &WordRecord) {
    let star = if view.is_current_favorite() { " ★" } else { "" };
    out.push_str(&format!("# {}{star}\n\n", record.word));

    for phonetic in record.phonetics() {
        match (phonetic.text(), phonetic.audio_url()) {
            (Some(text), Some(audio)) => out.push_str(&format!("`{text}` audio: {audio}\n")),
            (Some(text), None) => out.push_str(&format!("`{text}`\n")),
            (None, Some(audio)) => out.push_str(&format!("audio: {audio}\n")),
            (None, None) => {}
        }
    }

    let stats = record.stats();
    out.push_str(&format!(
        "\n{} meanings · {} definitions · {} parts of speech · {} letters\n",
        stats.meanings, stats.definitions, stats.parts_of_speech, stats.letters
    ));

    if record.meanings.is_empty() {
        out.push_str("\nNo meanings available.\n");
    }
    for meaning in &record.meanings {
        out.push_str(&format!("\n## {}\n\n", meaning.part_of_speech));
        for (index, definition) in meaning.definitions.iter().take(MAX_DEFINITIONS).enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, definition.definition));
            if let Some(example) = &definition.example {
                out.push_str(&format!("   > *{example}*\n"));
            }
        }
        if let Some(synonyms) = format_list(WordRecord::synonyms_of(meaning), MAX_RELATED) {
            out.push_str(&format!("\n**Synonyms:** {synonyms}\n"));
        }
        if let Some(antonyms) = format_list(WordRecord::antonyms_of(meaning), MAX_RELATED) {
            out.push_str(&format!("\n**Antonyms:** {antonyms}\n"));
        }
    }

    out.push_str("\n## Word games\n\n");
    if let Some(game) = view.session.scramble() {
        let label = if game.revealed { "Answer" } else { "Unscramble" };
        out.push_str(&format!("{label}: `{}`\n\n", game.display()));
    }
    match format_list(view.session.rhymes().iter().map(String::as_str).collect(), 6) {
        Some(rhymes) => out.push_str(&format!("Rhymes: {rhymes}\n")),
        None => out.push_str("No common rhymes found\n"),
    }

    if let Some(url) = record.source_urls.first() {
        out.push_str(&format!("\n## Source\n\n{url}\n"));
    }
    if let Some(license) = &record.license {
        out.push_str(&format!("\nLicense: {}\n", license.name));
    }
}

fn format_list(items: Vec<&str>, limit: usize) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let truncated = items.len() > limit;
    let display = if truncated {
        &items[..limit]
    } else {
        &items[..]
    };
    let mut text = display.join(", ");
    if truncated {
        text.push_str(", …");
    }
    Some(text)
}

fn stdout_is_tty() -> bool {
    atty::is(Stream::Stdout)
}

fn markdown_width() -> usize {
    let (width, _) = terminal_size();
    width.max(60) as usize
}

fn markdown_skin(theme: Theme) -> MadSkin {
    if theme.is_dark() {
        MadSkin::default_dark()
    } else {
        MadSkin::default_light()
    }
}
