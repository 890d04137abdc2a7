//! qca8k-initvals: convert `qca,ar8327-initvals` tables into qca8k binding advice

use std::env;
use std::path::Path;
use std::process;

use anyhow::Context;
use qca8k_initvals::config::Config;
use qca8k_initvals::decode::Dispatcher;
use qca8k_initvals::parser::{self, InitvalsBlock};

const START_BANNER: &str = "######################START##############################";
const END_BANNER: &str = "#######################END###############################";

fn usage() -> ! {
    eprintln!("usage: qca8k-initvals [-d|--debug] [-i|--ifile] <file-or-directory>");
    eprintln!("       qca8k-initvals --sample-config");
    process::exit(2);
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut debug = false;
    let mut path = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-d" | "--debug" => debug = true,
            "-i" | "--ifile" => match iter.next() {
                Some(p) => path = Some(p.as_str()),
                None => usage(),
            },
            "--sample-config" => {
                print!("{}", Config::sample_config());
                return Ok(());
            }
            "-h" | "--help" => usage(),
            a if a.starts_with("--ifile=") => path = Some(&a["--ifile=".len()..]),
            a if a.starts_with('-') => {
                eprintln!("unknown option: {}", a);
                usage();
            }
            a => path = Some(a),
        }
    }

    let Some(path) = path else {
        usage();
    };

    let config = Config::get();
    let mut options = config.to_options();
    if debug {
        options.verbose = true;
    }
    let dispatcher = Dispatcher::new(options);

    let sources = parser::find_sources(path, &config.extensions())
        .with_context(|| format!("cannot read {}", path))?;
    if sources.is_empty() {
        log::warn!("no device tree sources found in {}", path);
    }

    for source in &sources {
        let blocks = match parser::scan_file(source) {
            Ok(blocks) => blocks,
            Err(e) => {
                // Keep going over the rest of the directory
                log::warn!("{}", e);
                continue;
            }
        };
        print_file(source, &blocks, &dispatcher);
    }

    Ok(())
}

fn print_file(path: &Path, blocks: &[InitvalsBlock], dispatcher: &Dispatcher) {
    if blocks.is_empty() {
        return;
    }

    println!("{}", START_BANNER);
    println!("Found qca8k switch in {}", path.display());

    for block in blocks {
        println!();
        println!(
            "qca,ar8327-initvals for {} (line {}, {} registers)",
            block.context,
            block.line,
            block.samples.len()
        );
        for outcome in dispatcher.decode_block(block.context, &block.samples) {
            print!("{}", outcome);
        }
    }

    println!("{}", END_BANNER);
    println!();
}
