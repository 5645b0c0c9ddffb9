
use std::convert::TryInto;
use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use wordgrid::{AiPlayer, Bag, Board, Dictionary, Direction, Engine};

#[derive(Debug, serde::Deserialize)]
struct Settings {
    /// The dictionary of words that are allowed to be played, a `.txt` file
    /// with one word per line
    dictionary: PathBuf,

    /// Seed for the bag shuffle; a random one is drawn when absent
    seed: Option<u64>,

    /// Stop the match after this many turns even if tiles remain
    #[serde(default = "forty")]
    max_turns: usize,
}

fn forty() -> usize {
    40
}

#[derive(Debug, StructOpt)]
#[structopt(name = "autoplay", about = "Play an automated word-placement match")]
struct Opt {
    /// The config file, if not present, looks only at flags and environment
    #[structopt(short = "c", long = "config")]
    config: Option<String>,

    /// The dictionary of words that are allowed to be played (`.txt`, one
    /// word per line)
    #[structopt(short = "d", long = "dictionary")]
    dict: Option<String>,

    /// Seed for the bag shuffle, for reproducible matches
    #[structopt(short = "s", long = "seed")]
    seed: Option<u64>,

    /// Stop the match after this many turns
    #[structopt(short = "t", long = "max-turns")]
    max_turns: Option<usize>,
}

fn load_config(opt: Opt) -> Result<Settings, config::ConfigError> {
    let mut s = config::Config::new();

    if let Some(f) = opt.config {
        s.merge(config::File::with_name(&f))?;
    }

    s.merge(config::Environment::new())?;

    if let Some(d) = opt.dict {
        s.set("dictionary", d)?;
    }
    if let Some(seed) = opt.seed {
        s.set::<i64>("seed", seed.try_into().unwrap())?;
    }
    if let Some(t) = opt.max_turns {
        s.set::<i64>("max_turns", t.try_into().unwrap())?;
    }

    s.try_into()
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();
    let conf = load_config(opt).expect("config");

    let start = Instant::now();
    let dict = Dictionary::from_file(&conf.dictionary).expect("reading the word list");
    log::info!("dictionary loaded in {:?}", Instant::now() - start);

    let seed = conf.seed.unwrap_or_else(rand::random);
    log::info!("bag seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut bag = Bag::new(&mut rng);
    let mut engine = Engine::new(Board::new(), dict);
    let mut players = [AiPlayer::new(), AiPlayer::new()];
    for ai in players.iter_mut() {
        bag.fill_rack(&mut ai.player);
    }

    let mut passes = 0;
    for turn in 0..conf.max_turns {
        let seat = turn % 2;

        let start = Instant::now();
        let best = players[seat].find_best_move(&mut engine);
        log::info!("player {} searched in {:?}", seat + 1, Instant::now() - start);

        match best {
            Some(best) => {
                let arrow = match best.dir {
                    Direction::Horizontal => "→",
                    Direction::Vertical => "↓",
                };
                if players[seat].apply_move(&mut engine, &best) {
                    passes = 0;
                    bag.fill_rack(&mut players[seat].player);
                    println!(
                        "player {} plays {} at ({}, {}) {} for {} points",
                        seat + 1,
                        best.word,
                        best.start.row,
                        best.start.col,
                        arrow,
                        best.score,
                    );
                    println!("{}\n", engine.board());
                } else {
                    println!("player {} passes", seat + 1);
                    passes += 1;
                }
            }
            None => {
                println!("player {} passes", seat + 1);
                passes += 1;
            }
        }

        if passes >= 2 {
            log::info!("two consecutive passes, ending the match");
            break;
        }
        if bag.is_empty() && players.iter().all(|ai| ai.player.rack_len() == 0) {
            log::info!("bag and racks are empty, ending the match");
            break;
        }
    }

    println!(
        "final score: {} - {}",
        players[0].player.score(),
        players[1].player.score(),
    );
}
