use clap::Parser;
use colored::*;
use console::{Key, Term};
use directories::ProjectDirs;
use medcat::api::MedcatApi;
use medcat::browse::{BrowseMode, BrowseState, Debouncer};
use medcat::commands::config::ConfigAction;
use medcat::commands::{CmdMessage, MessageLevel, PageInfo};
use medcat::config::MedcatConfig;
use medcat::editor::{edit_text, DetailBuffer};
use medcat::error::{MedcatError, Result};
use medcat::leaflet::SectionEditor;
use medcat::model::{LeafletSection, MedicineDetail, MedicineSummary, Photo};
use medcat::remote::http::HttpStore;
use medcat::session::{FileTokenStore, Session, TokenStore};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, PhotoCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: MedcatApi<HttpStore, FileTokenStore>,
    config: MedcatConfig,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config is handled before building a context so it works without a
    // reachable server or a valid URL.
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&config_dir()?, key.clone(), value.clone());
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Login { email }) => handle_login(&ctx, email),
        Some(Commands::Logout) => handle_logout(&ctx),
        Some(Commands::List { page }) => handle_list(&ctx, page),
        Some(Commands::Search { term }) => handle_search(&ctx, term),
        Some(Commands::Browse) => handle_browse(&ctx),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Edit { id, section }) => handle_edit(&ctx, id, section),
        Some(Commands::Photos { action }) => handle_photos(&ctx, action),
        Some(Commands::Config { .. }) => unreachable!("handled above"),
        None => handle_list(&ctx, 1),
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins when set; --verbose only raises the default.
    let default = if verbose { "medcat=debug" } else { "medcat=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    // Override for tests and unusual setups
    if let Ok(dir) = std::env::var("MEDCAT_CONFIG_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "medcat", "medcat")
        .ok_or_else(|| MedcatError::Api("Could not determine config dir".to_string()))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let mut config = MedcatConfig::load(&config_dir).unwrap_or_default();
    if let Some(url) = &cli.api_url {
        config.set_api_url(url);
    }

    let tokens = FileTokenStore::new(config_dir.clone());
    let token = tokens.load()?;
    let session = Session::new(config.api_url.clone(), token);

    let store = HttpStore::new(session)?;
    let api = MedcatApi::new(store, tokens);

    Ok(AppContext {
        api,
        config,
        config_dir,
    })
}

fn handle_login(ctx: &AppContext, email: String) -> Result<()> {
    let term = Term::stdout();
    term.write_str("Password: ").map_err(MedcatError::Io)?;
    let password = term.read_secure_line().map_err(MedcatError::Io)?;

    let result = ctx.api.login(&email, &password)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, page: usize) -> Result<()> {
    let result = ctx.api.list(page, ctx.config.page_size)?;
    print_medicines(&result.listed);
    if let Some(page) = result.page {
        print_page_footer(page);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let result = ctx.api.search(&term)?;
    print_medicines(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: String) -> Result<()> {
    let result = ctx.api.view(&id)?;
    let detail = result
        .detail
        .ok_or_else(|| MedcatError::MedicineNotFound(id.clone()))?;
    print_detail(&detail)?;

    // The gallery is fetched independently of the record; a photo
    // failure should not sink the whole view.
    match ctx.api.photos(&id) {
        Ok(photos) => print_photos(&photos.photos),
        Err(e) => eprintln!("{}", format!("Warning: could not load photos: {}", e).yellow()),
    }
    Ok(())
}

fn handle_edit(ctx: &AppContext, id: String, section: Option<String>) -> Result<()> {
    let result = ctx.api.view(&id)?;
    let mut detail = result
        .detail
        .ok_or_else(|| MedcatError::MedicineNotFound(id.clone()))?;

    match section {
        Some(name) => {
            let section: LeafletSection = name.parse().map_err(MedcatError::Api)?;
            let mut editor = SectionEditor::new(section);
            editor.load(detail.leaflet_data.section(section));

            let edited = edit_text(&editor.markdown()?, ".md")?;
            editor.replace(&edited);
            detail
                .leaflet_data
                .set_section(section, editor.paragraphs()?);
        }
        None => {
            let initial = DetailBuffer::new(
                detail.commercial_name.clone(),
                detail.registry_code.clone(),
                detail.description.clone(),
            );
            let edited = DetailBuffer::from_buffer(&edit_text(&initial.to_buffer(), ".txt")?);
            if edited.commercial_name.is_empty() {
                return Err(MedcatError::Api("Commercial name cannot be empty".into()));
            }
            detail.commercial_name = edited.commercial_name;
            detail.registry_code = edited.registry_code;
            detail.description = edited.description;
        }
    }

    let result = ctx.api.save(&detail)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_photos(ctx: &AppContext, action: PhotoCommands) -> Result<()> {
    match action {
        PhotoCommands::List { id } => {
            let result = ctx.api.photos(&id)?;
            print_photos(&result.photos);
            print_messages(&result.messages);
        }
        PhotoCommands::Upload { id, file } => {
            let result = ctx.api.upload_photo(&id, &file)?;
            print_messages(&result.messages);
            print_photos(&result.photos);
        }
        PhotoCommands::Delete { id, key, yes } => {
            let confirmed = yes || confirm(&format!("Delete photo {}? [y/N] ", key))?;
            let result = ctx.api.delete_photo(&id, &key, confirmed)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_config(config_dir: &PathBuf, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some("api-url"), None) => ConfigAction::ShowKey("api-url".to_string()),
        (Some("api-url"), Some(v)) => ConfigAction::SetApiUrl(v),
        (Some("page-size"), None) => ConfigAction::ShowKey("page-size".to_string()),
        (Some("page-size"), Some(v)) => {
            let size = v
                .parse()
                .map_err(|_| MedcatError::Api(format!("invalid page size: {}", v)))?;
            ConfigAction::SetPageSize(size)
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    let show_key = key;
    let result = medcat::commands::config::run(config_dir, action)?;
    if let Some(config) = &result.config {
        match show_key.as_deref() {
            Some("api-url") => println!("api-url = {}", config.api_url),
            Some("page-size") => println!("page-size = {}", config.page_size),
            _ => {
                println!("api-url = {}", config.api_url);
                println!("page-size = {}", config.page_size);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

// ---- interactive browser ----

fn handle_browse(ctx: &AppContext) -> Result<()> {
    let term = Term::stdout();
    let (tx, rx) = mpsc::channel();

    // Keystrokes come in on their own thread; the main loop alternates
    // between draining them and polling the debounce deadline.
    std::thread::spawn(move || {
        let term = Term::stdout();
        while let Ok(key) = term.read_key() {
            if tx.send(key).is_err() {
                break;
            }
        }
    });

    let mut state = BrowseState::new(ctx.config.page_size);
    let mut debouncer = Debouncer::default();
    let mut last_error: Option<String> = None;

    fetch_into(ctx, &mut state, &mut last_error);
    render_browse(&term, &state, last_error.as_deref())?;

    loop {
        let timeout = debouncer
            .remaining(Instant::now())
            .unwrap_or(Duration::from_millis(250));

        match rx.recv_timeout(timeout) {
            Ok(key) => {
                match key {
                    Key::Escape if state.search_text().is_empty() => break,
                    Key::Escape => {
                        state.set_search("");
                        debouncer.cancel();
                        fetch_into(ctx, &mut state, &mut last_error);
                    }
                    Key::Char(c) => {
                        state.push_char(c);
                        debouncer.schedule(Instant::now());
                    }
                    Key::Backspace => {
                        state.pop_char();
                        debouncer.schedule(Instant::now());
                    }
                    Key::Enter => {
                        debouncer.cancel();
                        fetch_into(ctx, &mut state, &mut last_error);
                    }
                    Key::ArrowRight => {
                        if state.next_page() {
                            fetch_into(ctx, &mut state, &mut last_error);
                        }
                    }
                    Key::ArrowLeft => {
                        if state.prev_page() {
                            fetch_into(ctx, &mut state, &mut last_error);
                        }
                    }
                    _ => {}
                }
                render_browse(&term, &state, last_error.as_deref())?;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if debouncer.poll(Instant::now()) {
                    fetch_into(ctx, &mut state, &mut last_error);
                    render_browse(&term, &state, last_error.as_deref())?;
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

fn fetch_into(ctx: &AppContext, state: &mut BrowseState, last_error: &mut Option<String>) {
    match ctx.api.fetch(&state.plan()) {
        Ok(medicines) => {
            state.apply_page(medicines);
            *last_error = None;
        }
        Err(e) => {
            state.apply_error();
            *last_error = Some(e.to_string());
        }
    }
}

fn render_browse(term: &Term, state: &BrowseState, last_error: Option<&str>) -> Result<()> {
    term.clear_screen().map_err(MedcatError::Io)?;

    let header = match state.mode() {
        BrowseMode::Search => format!("Search: {}_", state.search_text()),
        BrowseMode::Paginated => {
            if state.search_text().is_empty() {
                format!("Catalog, page {}  (type to search)", state.page())
            } else {
                format!("Search: {}_", state.search_text())
            }
        }
    };
    println!("{}", header.bold());
    println!();

    print_medicines(state.medicines());
    println!();

    if let Some(err) = last_error {
        println!("{}", err.red());
    }

    let mut footer = Vec::new();
    if state.can_prev() {
        footer.push("← prev");
    }
    if state.can_next() {
        footer.push("→ next");
    }
    footer.push("esc quit");
    println!("{}", footer.join("   ").dimmed());
    Ok(())
}

// ---- output helpers ----

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const REGISTRY_WIDTH: usize = 16;

fn print_medicines(medicines: &[MedicineSummary]) {
    if medicines.is_empty() {
        println!("No medicines found.");
        return;
    }

    for med in medicines {
        let registry = format!("[{}]", med.registry_code);
        let categories = if med.categories.is_empty() {
            String::new()
        } else {
            med.categories.join(", ")
        };

        let fixed = REGISTRY_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name_and_cats = if categories.is_empty() {
            med.commercial_name.clone()
        } else {
            format!("{} ({})", med.commercial_name, categories)
        };
        let display = truncate_to_width(&name_and_cats, available);
        let padding = available.saturating_sub(display.width());

        println!(
            "  {}{}  {}",
            display.bold(),
            " ".repeat(padding),
            registry.dimmed()
        );
        println!("    {}", med.id.dimmed());
    }
}

fn print_page_footer(page: PageInfo) {
    let next = if page.has_more {
        "next page available"
    } else {
        "last page"
    };
    println!();
    println!("{}", format!("Page {} ({})", page.page, next).dimmed());
}

fn print_detail(detail: &MedicineDetail) -> Result<()> {
    println!("{}", detail.commercial_name.bold());
    println!(
        "{}  {}",
        format!("REG {}", detail.registry_code).dimmed(),
        if detail.categories.is_empty() {
            "no categories".to_string()
        } else {
            detail.categories.join(", ")
        }
    );
    println!("--------------------------------");
    if !detail.description.is_empty() {
        println!("{}", detail.description);
        println!();
    }

    for section in LeafletSection::ALL {
        let mut editor = SectionEditor::new(section);
        editor.load(detail.leaflet_data.section(section));

        println!("{}", section.title().bold());
        if editor.is_empty() {
            println!("  {}", editor.display()?.dimmed().italic());
        } else {
            for line in editor.display()?.lines() {
                println!("  {}", line);
            }
        }
        println!();
    }
    Ok(())
}

fn print_photos(photos: &[Photo]) {
    if photos.is_empty() {
        return;
    }
    println!("{}", "Photos".bold());
    for photo in photos {
        println!("  {}  {}", photo.key.yellow(), photo.url);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stdout();
    term.write_str(prompt).map_err(MedcatError::Io)?;
    let answer = term.read_line().map_err(MedcatError::Io)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
