//! Binary entry point: handles a single skill event and prints the response.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use brennan_skill::backends::brennan::BrennanAdapter;
use brennan_skill::config_persistence::{default_config_path, load_config_file};
use brennan_skill::protocol::{
    Application, Intent, IntentRequest, Session, SkillEvent, SkillRequest, Slot,
};
use brennan_skill::skill_handler::{SkillHandler, ALBUM_SLOT};

#[derive(Debug, Parser)]
#[command(version, about = "Handle one Brennan skill event")]
struct Args {
    /// Config file. Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skill event JSON file. Read from stdin when omitted.
    #[arg(long, conflicts_with = "album")]
    event: Option<PathBuf>,
    /// Play the closest album to this name instead of reading an event.
    #[arg(long)]
    album: Option<String>,
}

fn album_event(album: &str, application_id: Option<&str>) -> SkillEvent {
    let mut slots = HashMap::new();
    slots.insert(
        ALBUM_SLOT.to_string(),
        Slot {
            value: Some(album.to_string()),
        },
    );
    SkillEvent {
        session: Session {
            session_id: "cli".to_string(),
            new: true,
            application: Application {
                application_id: application_id.unwrap_or("cli").to_string(),
            },
        },
        request: SkillRequest::IntentRequest(IntentRequest {
            request_id: "cli".to_string(),
            intent: Intent {
                name: "PlayAlbum".to_string(),
                slots,
            },
        }),
    }
}

fn read_event(path: Option<&PathBuf>) -> Result<SkillEvent, Box<dyn std::error::Error>> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Debug);
    clog.init();

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    let args = Args::parse();
    let config_path = args
        .config
        .or_else(default_config_path)
        .ok_or("no config directory available; pass --config")?;
    let config = load_config_file(&config_path);
    info!(
        "Using device {} (config {})",
        config.device.endpoint,
        config_path.display()
    );

    let event = match &args.album {
        Some(album) => album_event(album, config.skill.application_id.as_deref()),
        None => read_event(args.event.as_ref())?,
    };

    let handler = SkillHandler::new(BrennanAdapter::new(&config.device), config);
    match handler.handle_event(&event) {
        Ok(Some(response)) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            error!("Failed to handle skill event: {}", err);
            Err(err.into())
        }
    }
}
