use std::env;
use huffman::Config;
use huffman::run;

fn main() {
    env_logger::init();

    let config = Config::build(env::args())
        .unwrap_or_else(|err| err.exit());

    if let Err(err) = run(config) {
        eprintln!("Application error: {}", err);
        std::process::exit(1);
    }
}
