//! PageGuide CLI — load a scene, run guide commands against it, print the
//! result.

mod script;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pageguide_core::data::scene::Scene;
use pageguide_core::help::help_text;
use pageguide_core::response::Response;
use pageguide_core::welcome::{welcome_key, DismissalStore, FileStore, MemoryStore, StoredWelcome};
use pageguide_core::PageGuide;


#[derive(Debug, Parser)]
#[command(
    name = "pageguide",
    version,
    about = "Drive a page guide over a scene file"
)]
struct Cli {
    /// Scene file (YAML), or 'help'.
    scene: PathBuf,

    /// Command words, run in order. Defaults to 'status'.
    commands: Vec<String>,

    /// Where welcome dismissals are remembered.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Print the rendered scene as JSON after the commands run.
    #[arg(long)]
    json: bool,
}


fn main() {
    init_logging();
    let cli = Cli::parse();

    if cli.scene.as_os_str() == "help" {
        println!("{}", help_text(cli.commands.first().map(String::as_str)));
        return;
    }

    let word_refs: Vec<&str> = cli.commands.iter().map(|s| s.as_str()).collect();
    let mut commands = match script::parse_script(&word_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("pageguide: {}", e);
            process::exit(1);
        }
    };
    if commands.is_empty() {
        commands.push(pageguide_core::command::Command::Status);
    }

    let scene = match Scene::load(&cli.scene) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("pageguide: {}", e);
            process::exit(1);
        }
    };

    let settings = scene.settings.clone();
    let key = welcome_key(&settings.welcome_key_prefix, &scene.url);
    let gate = StoredWelcome::new(
        key,
        primary_store(cli.state_file),
        Box::new(MemoryStore::new()),
    );
    tracing::debug!(key = gate.key(), "welcome gate ready");
    let Some(guide) = PageGuide::init(scene, settings) else {
        eprintln!("pageguide: {} has no tour", cli.scene.display());
        process::exit(1);
    };
    let mut guide = guide.with_welcome_gate(Box::new(gate));
    flush(&mut guide);

    wait_until_loaded(&mut guide);

    for cmd in commands {
        let response = guide.execute(cmd);
        flush(&mut guide);
        match response {
            Response::Ok { output } => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Response::Error { message } => {
                eprintln!("pageguide error: {}", message);
                process::exit(1);
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&guide.page().rendered) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("pageguide: {}", e);
                process::exit(1);
            }
        }
    }
}


fn init_logging() {
    let filter = EnvFilter::try_from_env("PAGEGUIDE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}


/// The welcome store: `--state-file`, else the user data dir, else memory.
fn primary_store(state_file: Option<PathBuf>) -> Box<dyn DismissalStore> {
    let path = state_file.or_else(|| {
        dirs::data_dir().map(|dir| dir.join("pageguide").join("welcome.json"))
    });
    match path {
        Some(p) => {
            let store = FileStore::new(p);
            tracing::debug!(path = %store.path().display(), "welcome dismissals kept on disk");
            Box::new(store)
        }
        None => {
            tracing::debug!("no data directory; welcome dismissals kept in memory");
            Box::new(MemoryStore::new())
        }
    }
}


/// Run the loading poll on a simulated clock. A scene is static, so if the
/// loading indicator is still shown after the first check it stays shown;
/// the `ready` command finishes the wait in that case.
fn wait_until_loaded(guide: &mut PageGuide<Scene>) {
    let interval = guide.settings().poll_interval_ms;
    guide.tick(0);
    if !guide.tick(interval) {
        tracing::info!("scene still loading; waiting for 'ready'");
    }
    flush(guide);
}


/// Apply queued guide actions to the scene.
fn flush(guide: &mut PageGuide<Scene>) {
    let actions = guide.drain_actions();
    tracing::debug!(count = actions.len(), "applying actions");
    guide.page_mut().apply_all(actions);
}
