//! Talekeeper Player - terminal client binary.

use std::collections::HashSet;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talekeeper_domain::{Journal, PageEdge, Role, SessionRef, TimelineChange, Turn};
use talekeeper_player::infrastructure::{ApiAdapter, HttpSessionGateway, SystemClock};
use talekeeper_player::ports::outbound::SessionGatewayPort;
use talekeeper_player::{ErrorKind, PlayerConfig, ServiceError, SessionCatalogService, SessionView};

const USAGE: &str = "\
usage: talekeeper-player <command>

commands:
  list                       list sessions
  new <name> <prompt...>     start a new session
  delete <id>                delete a session
  play <id>                  play a session";

const HELP: &str = "\
type an action and press enter, or:
  /more      load older turns
  /undo      take back the last move
  /journal   show quests, characters and lore
  /quit      leave";

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talekeeper_player=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let config = PlayerConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, page_size = config.page_size, "Starting Talekeeper Player");

    let api = Arc::new(ApiAdapter::from_config(&config)?);
    let gateway: Arc<dyn SessionGatewayPort> = Arc::new(HttpSessionGateway::new(api));
    let catalog = SessionCatalogService::new(Arc::clone(&gateway));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["list"] => {
            let sessions = catalog.list().await?;
            if sessions.is_empty() {
                println!("no sessions yet; start one with `new <name> <prompt>`");
            }
            for session in sessions {
                println!("{:>5}  {}", session.id, session.name);
            }
        }
        ["new", name, prompt @ ..] => {
            let info = catalog.create(name, &prompt.join(" ")).await?;
            println!("created session {} ({})", info.id, info.name);
        }
        ["delete", id] => {
            catalog.delete(&SessionRef::from(*id)).await?;
            println!("deleted session {}", id);
        }
        ["play", id] => {
            play(SessionRef::from(*id), gateway, &config).await?;
        }
        _ => {
            eprintln!("{}", USAGE);
            bail!("unrecognised arguments: {}", args.join(" "));
        }
    }

    Ok(())
}

async fn play(session: SessionRef, gateway: Arc<dyn SessionGatewayPort>, config: &PlayerConfig) -> Result<()> {
    let view = Arc::new(SessionView::open(session, gateway, Arc::new(SystemClock::new()), config).await?);

    println!("== {} ==", view.info().name);
    let mut shown = HashSet::new();
    print_unseen(&view.timeline(), &mut shown);
    if view.has_more() {
        println!("(/more for earlier turns)");
    }
    println!("{}", HELP);

    let printer = tokio::spawn({
        let mut changes = view.watch();
        let view = Arc::clone(&view);
        async move {
            while let Some(change) = changes.next().await {
                render(&change, &view.timeline(), &mut shown);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "/quit" | "/exit" => break,
            "/help" => println!("{}", HELP),
            "/journal" => print_journal(&view.journal()),
            "/more" => match view.load_older().await {
                Ok(0) if !view.has_more() => println!("(this is where the story begins)"),
                Ok(0) => println!("(could not load earlier turns, try again)"),
                Ok(_) => {}
                Err(e) => report(&e),
            },
            "/undo" => {
                print!("Undo the last move? [y/N] ");
                std::io::stdout().flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if matches!(answer.trim(), "y" | "Y" | "yes") {
                    let view = Arc::clone(&view);
                    spawn_reporting(async move { view.undo().await });
                }
            }
            text => {
                let view = Arc::clone(&view);
                let text = text.to_string();
                spawn_reporting(async move { view.send(&text).await });
            }
        }
    }

    view.close();
    let _ = printer.await;
    Ok(())
}

fn spawn_reporting(operation: impl Future<Output = Result<(), ServiceError>> + Send + 'static) {
    tokio::spawn(async move {
        if let Err(e) = operation.await {
            report(&e);
        }
    });
}

fn report(error: &ServiceError) {
    match error.kind() {
        ErrorKind::NetworkFailure => println!("! {} (nothing was lost, try again)", error),
        ErrorKind::Busy => println!("! still waiting for the narrator"),
        ErrorKind::InvalidState => println!("! {}", error),
    }
}

fn render(change: &TimelineChange, timeline: &[Turn], shown: &mut HashSet<i64>) {
    match change {
        TimelineChange::PlaceholderInserted { .. } => println!("..."),
        TimelineChange::PlaceholderDiscarded { .. } => println!("(action withdrawn)"),
        TimelineChange::PageMerged {
            edge: PageEdge::Newest,
            ..
        } => print_unseen(timeline, shown),
        TimelineChange::PageMerged {
            edge: PageEdge::Oldest,
            added,
            ..
        } => {
            if *added > 0 {
                println!("---- {} earlier turns ----", added);
                print_unseen(timeline, shown);
                println!("---- back to the present ----");
            }
        }
        TimelineChange::Replaced { .. } => {
            shown.clear();
            println!("---- the story rewinds ----");
            print_unseen(timeline, shown);
        }
    }
}

fn print_unseen(timeline: &[Turn], shown: &mut HashSet<i64>) {
    for turn in timeline {
        let Some(id) = turn.id.confirmed() else {
            continue;
        };
        if shown.insert(id) {
            match turn.role {
                Role::User => println!("> {}", turn.content),
                Role::Narrator => println!("{}\n", turn.content),
            }
        }
    }
}

fn print_journal(journal: &Journal) {
    if journal.is_empty() {
        println!("(the journal is empty)");
        return;
    }
    for (heading, entries) in [
        ("Quests", journal.quests().collect::<Vec<_>>()),
        ("Characters", journal.characters().collect()),
        ("Lore", journal.lore().collect()),
    ] {
        if entries.is_empty() {
            continue;
        }
        println!("{}", heading);
        for entry in entries {
            println!("  * {}: {}", entry.title, entry.content);
        }
    }
}
