mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use guardian_defense::assets::load_sprites;
use guardian_defense::config::{GameConfig, DEFAULT_CONFIG_PATH};
use guardian_defense::error::{GameError, Result};
use guardian_defense::game::Game;
use guardian_defense::input::{InputEvent, Key};

/// Without key-release reporting, a key counts as held for this many frames
/// after its last auto-repeat.
const HOLD_WINDOW: u64 = 8;

/// Window after a fresh press, long enough to span the OS delay before the
/// first auto-repeat (typically 250 to 600 ms).
const FIRST_REPEAT_WINDOW: u64 = 40;

#[derive(Parser, Debug)]
#[command(name = "guardian_defense", about = "Shield the avatar, send the guardian down")]
struct Args {
    /// Config file to read.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Fixed RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes while the terminal is in raw mode.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Input translation ────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
        KeyCode::Char(c @ '1'..='4') => Key::Digit(c as u8 - b'0'),
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

/// Turns terminal key events into game input.  On terminals that never send
/// releases, it synthesizes a `KeyUp` once a key goes quiet.
struct InputTranslator {
    releases_reported: bool,
    /// Frame of the last press, and whether auto-repeat has started.
    last_seen: HashMap<Key, (u64, bool)>,
}

impl InputTranslator {
    fn new(releases_reported: bool) -> Self {
        Self { releases_reported, last_seen: HashMap::new() }
    }

    fn translate(&mut self, key_event: KeyEvent, frame: u64) -> Option<InputEvent> {
        let KeyEvent { code, kind, modifiers, .. } = key_event;
        let quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'))
            || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
        if quit && kind == KeyEventKind::Press {
            return Some(InputEvent::Quit);
        }

        let key = map_key(code);
        if key == Key::Other {
            return None;
        }
        match kind {
            KeyEventKind::Press => {
                if self.releases_reported {
                    return Some(InputEvent::down(key));
                }
                // OS key repeat shows up as another press.
                let repeat = self.last_seen.contains_key(&key);
                self.last_seen.insert(key, (frame, repeat));
                Some(InputEvent::KeyDown { key, repeat })
            }
            KeyEventKind::Repeat => Some(InputEvent::KeyDown { key, repeat: true }),
            KeyEventKind::Release => Some(InputEvent::up(key)),
        }
    }

    fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        if self.releases_reported {
            return Vec::new();
        }
        let stale: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, (seen, repeating))| {
                let window = if *repeating { HOLD_WINDOW } else { FIRST_REPEAT_WINDOW };
                frame.saturating_sub(*seen) > window
            })
            .map(|(key, _)| *key)
            .collect();
        stale
            .into_iter()
            .map(|key| {
                self.last_seen.remove(&key);
                InputEvent::up(key)
            })
            .collect()
    }
}

// ── Game loop ────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    translator: &mut InputTranslator,
    sprites: &guardian_defense::assets::SpriteSet,
    config: &GameConfig,
    rng: &mut StdRng,
) -> Result<()> {
    let clock = Instant::now();
    let mut frame: u64 = 0;

    while !game.quit_requested() {
        frame += 1;

        // Drain every pending event before stepping.
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key_event) = ev {
                events.extend(translator.translate(key_event, frame));
            }
        }
        events.extend(translator.expire(frame));

        let now_ms = clock.elapsed().as_millis() as u64;
        game.frame(events, now_ms, rng);

        display::render(out, game, sprites)?;
        thread::sleep(config.frame_delay());
    }
    Ok(())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| GameError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = GameConfig::load(&args.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }

    init_logging(&config.log_file)?;
    if let Err(err) = loaded {
        log::warn!("{err}; using defaults");
    }

    let seed = config.seed.unwrap_or_else(wall_clock_seed);
    log::info!("guardian_defense starting (seed {seed})");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut game = Game::new(config.initial_spawn_timer_ms);
    let loaded_sprites = load_sprites(&config.assets_dir);
    if let Some(err) = loaded_sprites.unavailable() {
        log::error!("{err}");
        game.block_play(err.to_string());
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("key release reporting: {keyboard_enhanced}");

    // Blocking reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut translator = InputTranslator::new(keyboard_enhanced);
    let result = game_loop(
        &mut out,
        &mut game,
        &rx,
        &mut translator,
        &loaded_sprites.sprites,
        &config,
        &mut rng,
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("guardian_defense exiting");
    result
}
