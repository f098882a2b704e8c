#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** DiceCrawl **
//! A dice-driven dungeon crawl in the terminal.

use dicecrawl_engine::combat::SUCCESS_THRESHOLD;
use dicecrawl_engine::style::GameStyle;
use dicecrawl_engine::{DICECRAWL_VERSION, Engine, load_config, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;

use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading DiceCrawl config...");
    let config = load_config().context("while loading game config")?;
    info!("config loaded: {}x{} grid, floor {}", config.grid_size, config.grid_size, config.floor_level);

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("flushing stdout")?;

    println!("{:^60}", "DICECRAWL".bright_yellow().underline());
    println!("{:^60}\n", format!("v{DICECRAWL_VERSION}").dimmed());
    let hint = format!(
        "Type help for commands. Roll {} or better to succeed.",
        SUCCESS_THRESHOLD + 1
    );
    println!("{}\n", hint.gm_style());

    let mut engine = Engine::new(config);
    info!("Starting the game!");
    run_repl(&mut engine)
}
