
use std::path::PathBuf;

use structopt::StructOpt;

use wordgrid::Dictionary;

#[derive(Debug, StructOpt)]
#[structopt(name = "add_word", about = "Append a new word to a dictionary file")]
struct Opt {
    /// The dictionary `.txt` file, one word per line
    dictionary: PathBuf,

    /// The word to add
    word: String,
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();

    let mut dict = Dictionary::from_file(&opt.dictionary).expect("reading the word list");

    match dict.add_word(&opt.word) {
        Ok(true) => println!("added {:?} ({} words total)", opt.word.to_lowercase(), dict.len()),
        Ok(false) => println!("{:?} is already in the dictionary (or blank)", opt.word),
        Err(e) => {
            // the trie was left untouched, the file may need attention
            log::error!("could not persist {:?}: {}", opt.word, e);
            std::process::exit(1);
        }
    }
}
