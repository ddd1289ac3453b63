// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  browse.rs - Interactive results browser for ATA club score files.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use atadata::interpreter::*;
use atadata::reader::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The score file to read.
    file: PathBuf,
}

/// Logs go to stderr so they don't mix with the menu. Use RUST_LOG to
/// change the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Reads one line of input, or `None` once input is exhausted.
fn read_input(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Shows `list` and asks for an index below `limit` until one is given.
fn select_index(
    input: &mut impl BufRead,
    list: impl Fn(),
    question: &str,
    prompt: &str,
    invalid: &str,
    limit: usize,
) -> io::Result<Option<usize>> {
    loop {
        list();
        println!("{}", question);
        print!("{}", prompt);
        io::stdout().flush()?;

        let Some(answer) = read_input(input)? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(index) if index < limit => return Ok(Some(index)),
            _ => println!("{}", invalid),
        }
    }
}

fn print_scores(dataset: &Dataset, input: &mut impl BufRead) -> io::Result<()> {
    if dataset.events().is_empty() {
        println!("No events in this file.");
        return Ok(());
    }

    let list = || {
        for (i, event) in dataset.events().iter().enumerate() {
            println!("\t[{}] {}", i, event);
        }
    };
    let Some(index) = select_index(
        input,
        list,
        "Which event?",
        "Event #: ",
        "Invalid event selected!",
        dataset.events().len(),
    )?
    else {
        return Ok(());
    };

    if let Some(standings) = EventStandings::for_event(dataset, index) {
        println!("{}", standings.event);
        println!("{} shooters", standings.len());
        for placing in &standings.placings {
            println!("{:3} {}", placing.score.hit, placing.shooter.name);
        }
        println!();
    }

    Ok(())
}

fn view_shooter_info(dataset: &Dataset, input: &mut impl BufRead) -> io::Result<()> {
    if dataset.shooters().is_empty() {
        println!("No shooters in this file.");
        return Ok(());
    }

    let list = || {
        for (i, shooter) in dataset.shooters().iter().enumerate() {
            println!("\t[{}] {}", i, shooter.name);
        }
    };
    let Some(index) = select_index(
        input,
        list,
        "Which shooter?",
        "Shooter #: ",
        "Invalid shooter selected!",
        dataset.shooters().len(),
    )?
    else {
        return Ok(());
    };

    if let Some(history) = ShooterHistory::for_shooter(dataset, index) {
        let shooter = history.shooter;
        println!("{}", shooter.name);
        println!("ATA Number: {}", shooter.ata_number);
        println!(
            "Address: {}, {}, {} {}",
            shooter.address, shooter.city, shooter.state, shooter.postal_code
        );
        println!("Scores: ");
        for entry in &history.entries {
            print!("\t{}   {}/{}", entry.event, entry.score.hit, entry.score.shot_at);
            if entry.score.has_yardage() {
                print!(" {:.1} yd", entry.score.yardage);
            }
            println!();
        }
    }

    Ok(())
}

fn run(dataset: &Dataset) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("[P]rint Scores, [V]iew Shooter Info, [Q]uit");
        print!("Command: ");
        io::stdout().flush()?;

        let Some(command) = read_input(&mut input)? else {
            return Ok(());
        };
        match command.chars().next() {
            Some('P' | 'p') => print_scores(dataset, &mut input)?,
            Some('V' | 'v') => view_shooter_info(dataset, &mut input)?,
            Some('Q' | 'q') => return Ok(()),
            _ => println!("Unknown command!"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let dataset = match load(&args.file) {
        Ok(dataset) => dataset,
        Err(error) => {
            eprintln!("Error loading file {:?}: {}", &args.file, error);
            return ExitCode::FAILURE;
        }
    };
    info!(path = %args.file.display(), "loaded score file");

    println!("Club Number: {}", dataset.club_number());
    println!(
        "{} events and {} shooters loaded.",
        dataset.events().len(),
        dataset.shooters().len()
    );

    if let Err(error) = run(&dataset) {
        eprintln!("Error reading input: {}", error);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
