use anyhow::{bail, Context};
use deckforge_core::{
    BuildPhase, BuildRules, BuildSession, Catalog, CardRecord, Event, EventBus, Face, GhostOverlay,
    GhostPhase, HandleId, RngState, Table, Transform, Tweens, Vec2,
};
use deckforge_store::{
    ensure_user_id, DeckStore, FileIdentity, HttpTransport, MemoryTransport, RemoteTransport,
    StoreError,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const FRAME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 100_000;

#[derive(Debug, Clone)]
struct CliOptions {
    seed: Option<u64>,
    assets: PathBuf,
    remote: Option<String>,
    key: Option<String>,
}

fn parse_options() -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        seed: None,
        assets: std::env::var_os("DECKFORGE_ASSETS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets")),
        remote: std::env::var("DECKFORGE_REMOTE").ok(),
        key: std::env::var("DECKFORGE_KEY").ok(),
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.seed = Some(value.parse().context("--seed must be a number")?);
            }
            "--assets" => {
                options.assets = PathBuf::from(args.next().context("--assets needs a value")?);
            }
            "--remote" => {
                options.remote = Some(args.next().context("--remote needs a value")?);
            }
            "--key" => {
                options.key = Some(args.next().context("--key needs a value")?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument {other}"),
        }
    }
    Ok(options)
}

fn print_usage() {
    println!("deckforge [--seed N] [--assets DIR] [--remote URL] [--key SECRET]");
    println!();
    println!("Environment: DECKFORGE_ASSETS, DECKFORGE_REMOTE, DECKFORGE_KEY,");
    println!("             DECKFORGE_IDENTITY");
}

fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let path = dir.join("cards.json");
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let records: Vec<CardRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Catalog::from_records(records).map_err(|err| anyhow::anyhow!(err))
}

fn make_transport(options: &CliOptions) -> Box<dyn RemoteTransport> {
    match &options.remote {
        Some(base) => {
            let mut transport = HttpTransport::new(base.clone());
            if let Some(key) = &options.key {
                transport = transport.with_secret(key.clone());
            }
            Box::new(transport)
        }
        None => {
            println!("no remote configured; decks are kept in memory for this run");
            Box::new(MemoryTransport::new())
        }
    }
}

/// Saved-deck inspection: a row of handles plus the ghost overlay.
struct Viewer {
    table: Table,
    handles: Vec<HandleId>,
    overlay: GhostOverlay,
    tweens: Tweens,
    names: Vec<String>,
}

impl Viewer {
    fn new(catalog: &Catalog, tags: &[String]) -> anyhow::Result<Self> {
        let mut table = Table::default();
        let mut handles = Vec::with_capacity(tags.len());
        let mut names = Vec::with_capacity(tags.len());
        for (index, tag) in tags.iter().enumerate() {
            let record = catalog
                .by_tag(tag)
                .map_err(|err| anyhow::anyhow!("deck entry {}: {err}", index + 1))?;
            let pos = Vec2::new(90.0 + 140.0 * index as f32, 400.0);
            handles.push(table.spawn(record.id, Face::Up, Transform::at(pos)));
            names.push(record.name.clone());
        }
        let anchor = Transform {
            pos: Vec2::new(640.0, 330.0),
            scale: 1.6,
            rot: 0.0,
        };
        Ok(Self {
            table,
            handles,
            overlay: GhostOverlay::new(anchor, 0.2),
            tweens: Tweens::new(),
            names,
        })
    }

    fn settle(&mut self, events: &mut EventBus) {
        for _ in 0..MAX_FRAMES {
            if self.tweens.is_idle() {
                return;
            }
            for id in self.tweens.tick(FRAME, &mut self.table) {
                self.overlay.on_tween_complete(id, &mut self.table, events);
            }
        }
    }
}

struct App {
    catalog: Catalog,
    session: BuildSession,
    tweens: Tweens,
    events: EventBus,
    store: DeckStore<Box<dyn RemoteTransport>>,
    user_id: String,
    viewer: Option<Viewer>,
}

impl App {
    fn settle(&mut self) {
        for _ in 0..MAX_FRAMES {
            self.session.tick();
            if self.tweens.is_idle() {
                return;
            }
            for id in self.tweens.tick(FRAME, &mut self.session.table) {
                self.session
                    .on_tween_complete(id, &mut self.tweens, &mut self.events);
            }
        }
    }

    fn drain_events(&mut self) {
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            println!("  {}", describe_event(&event, &self.catalog));
        }
    }

    fn card_name(&self, tag: &str) -> String {
        self.catalog
            .by_tag(tag)
            .map(|record| record.name.clone())
            .unwrap_or_else(|_| tag.to_string())
    }

    fn print_board(&self) {
        match self.session.phase() {
            BuildPhase::ReadyToDraw => println!("phase: ready to draw"),
            BuildPhase::Animating(_) => println!("phase: animating"),
            BuildPhase::Focusing { .. } => println!("phase: focusing"),
            BuildPhase::Built => println!("phase: deck complete"),
        }
        println!("pile: {} cards left", self.session.pile.len());
        if let Some(focused) = self.session.focused() {
            if let Some(card) = self.session.table.get(focused) {
                println!("focused: {}", self.card_name(&card.tag));
            }
        }
        println!(
            "hand ({}/{}):",
            self.session.hand.len(),
            self.session.hand.capacity()
        );
        for &id in self.session.hand.slots() {
            let Some(card) = self.session.table.get(id) else {
                continue;
            };
            println!(
                "  {:<22} at ({:7.1}, {:7.1}) tilt {:+.1}",
                self.card_name(&card.tag),
                card.transform.pos.x,
                card.transform.pos.y,
                card.transform.rot,
            );
        }
    }

    fn draw(&mut self) {
        if self.session.is_built() {
            println!("deck is complete; `save` it or `discard` it");
            return;
        }
        match self.session.pile.top() {
            Some(top) => {
                self.session
                    .on_card_clicked(top, &mut self.tweens, &mut self.events);
                self.settle();
            }
            None => println!("the pile is empty"),
        }
    }

    fn keep(&mut self) {
        if !matches!(self.session.phase(), BuildPhase::Focusing { .. }) {
            println!("no card is in focus; `draw` first");
            return;
        }
        self.session.on_confirm(&mut self.tweens, &mut self.events);
        self.settle();
    }

    fn save(&mut self) {
        if !self.session.is_built() {
            println!(
                "the hand has {}/{} cards; finish it before saving",
                self.session.hand.len(),
                self.session.hand.capacity()
            );
            return;
        }
        let tags = self.session.deck_tags();
        match self.store.append_deck(&self.user_id, tags) {
            Ok(()) => {
                println!("deck saved for {}", self.user_id);
                self.session.reset(&mut self.tweens, &mut self.events);
            }
            Err(err) => report_store_error(&err),
        }
    }

    fn discard(&mut self) {
        self.session.reset(&mut self.tweens, &mut self.events);
    }

    fn list_decks(&mut self) {
        match self.store.decks_for_user(&self.user_id) {
            Ok(decks) if decks.is_empty() => println!("no saved decks for {}", self.user_id),
            Ok(decks) => {
                for (index, deck) in decks.iter().enumerate() {
                    let names: Vec<String> =
                        deck.cards.iter().map(|tag| self.card_name(tag)).collect();
                    println!("{:>3}. {}", index + 1, names.join(", "));
                }
            }
            Err(err) => report_store_error(&err),
        }
    }

    fn view(&mut self, index: usize) {
        let decks = match self.store.decks_for_user(&self.user_id) {
            Ok(decks) => decks,
            Err(err) => {
                report_store_error(&err);
                return;
            }
        };
        let Some(deck) = index.checked_sub(1).and_then(|i| decks.get(i)) else {
            println!("no deck #{index}; `decks` lists what is saved");
            return;
        };
        match Viewer::new(&self.catalog, &deck.cards) {
            Ok(viewer) => {
                println!("viewing deck #{index}; `open N` enlarges a card, `back` leaves");
                for (slot, name) in viewer.names.iter().enumerate() {
                    println!("{:>3}. {}", slot + 1, name);
                }
                self.viewer = Some(viewer);
            }
            Err(err) => println!("cannot view deck: {err:#}"),
        }
    }

    fn open_card(&mut self, index: usize) {
        let Some(viewer) = self.viewer.as_mut() else {
            println!("not viewing a deck; `view N` first");
            return;
        };
        let Some(&handle) = index.checked_sub(1).and_then(|i| viewer.handles.get(i)) else {
            println!("no card #{index} in this deck");
            return;
        };
        viewer.overlay.open(
            handle,
            &mut viewer.table,
            &mut viewer.tweens,
            &mut self.events,
        );
        viewer.settle(&mut self.events);
        if viewer.overlay.is_open() {
            if let Some(card) = viewer.overlay.ghost().and_then(|g| viewer.table.get(g)) {
                let tag = card.tag.clone();
                println!("showing {} enlarged; any input closes it", self.card_name(&tag));
            }
        }
    }

    fn close_card(&mut self) {
        let Some(viewer) = self.viewer.as_mut() else {
            println!("not viewing a deck");
            return;
        };
        if viewer.overlay.phase() == GhostPhase::Closed {
            println!("nothing is enlarged");
            return;
        }
        viewer.overlay.close(&mut viewer.table, &mut viewer.tweens);
        viewer.settle(&mut self.events);
    }
}

fn report_store_error(err: &StoreError) {
    tracing::warn!(%err, "deck store operation failed");
    println!("could not reach the deck store; check connectivity and credentials");
}

fn describe_event(event: &Event, catalog: &Catalog) -> String {
    let name = |tag: &str| {
        catalog
            .by_tag(tag)
            .map(|record| record.name.clone())
            .unwrap_or_else(|_| tag.to_string())
    };
    match event {
        Event::CardDrawn { tag, pile_left } => {
            format!("drew {} ({pile_left} left in the pile)", name(tag))
        }
        Event::CardFocused { tag } => format!("{} is in focus; `keep` commits it", name(tag)),
        Event::CardCommitted { tag, hand, capacity } => {
            format!("kept {} ({hand}/{capacity})", name(tag))
        }
        Event::DeckCompleted { tags } => {
            format!("deck complete with {} cards; `save` to persist it", tags.len())
        }
        Event::SessionReset => "table cleared; a fresh pile is ready".to_string(),
        Event::FocusOpened { tag } => format!("enlarged {}", name(tag)),
        Event::FocusClosed { tag } => format!("closed {}", name(tag)),
    }
}

fn print_help() {
    println!("commands:");
    println!("  draw         flip the top pile card into focus");
    println!("  keep         commit the focused card to the hand");
    println!("  board        show pile, focus and hand state");
    println!("  save         persist the completed deck and start over");
    println!("  discard      throw the session away and start over");
    println!("  decks        list decks saved for this identity");
    println!("  view N       inspect saved deck N");
    println!("  open N       enlarge card N of the viewed deck");
    println!("  close        put the enlarged card back");
    println!("  back         leave the deck viewer");
    println!("  quit         exit");
}

fn run(options: CliOptions) -> anyhow::Result<()> {
    let catalog = load_catalog(&options.assets)?;
    let mut rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };

    let identity_path = FileIdentity::default_path().context("cannot locate an identity path")?;
    let mut identity = FileIdentity::new(identity_path);
    let user_id = ensure_user_id(&mut identity, &mut rng)
        .map_err(|err| anyhow::anyhow!("identity store: {err}"))?;

    let session = BuildSession::new(&catalog, BuildRules::default(), rng)
        .map_err(|err| anyhow::anyhow!(err))?;
    let store = DeckStore::new(make_transport(&options));

    let mut app = App {
        catalog,
        session,
        tweens: Tweens::new(),
        events: EventBus::default(),
        store,
        user_id,
        viewer: None,
    };

    println!("deckforge — build a deck of 8, card by card");
    println!("playing as {}; type `help` for commands", app.user_id);

    let stdin = io::stdin();
    loop {
        let prompt = if app.viewer.is_some() { "viewer> " } else { "> " };
        print!("{prompt}");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next().map(|word| word.to_string());

        match (command, argument) {
            ("help" | "?", _) => print_help(),
            ("draw" | "d", _) => app.draw(),
            ("keep" | "k" | "ok", _) => app.keep(),
            ("board" | "state" | "b", _) => app.print_board(),
            ("save" | "s", _) => app.save(),
            ("discard", _) => app.discard(),
            ("decks" | "ls", _) => app.list_decks(),
            ("view" | "v", Some(value)) => match value.parse() {
                Ok(index) => app.view(index),
                Err(_) => println!("view needs a deck number"),
            },
            ("open" | "o", Some(value)) => match value.parse() {
                Ok(index) => app.open_card(index),
                Err(_) => println!("open needs a card number"),
            },
            ("view" | "v", None) => println!("view needs a deck number"),
            ("open" | "o", None) => println!("open needs a card number"),
            ("close" | "c", _) => app.close_card(),
            ("back", _) => {
                app.viewer = None;
            }
            ("quit" | "exit" | "q", _) => break,
            (other, _) => println!("unknown command {other}; `help` lists commands"),
        }
        app.drain_events();
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let result = parse_options().and_then(run);
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
