// Labcheck: Validating Network-Wide Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use labcheck::report::{ConsoleReporter, Reporter};

use clap::{Parser, Subcommand};

use std::process;

mod analysis;
mod configs;

fn main() {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();
    let mut reporter = ConsoleReporter::new();

    // match on the action
    let result = match args.cmd {
        MainCommand::Configs {
            path,
            json_filename,
        } => configs::run(&path, json_filename.as_deref(), &mut reporter),
        MainCommand::Analysis { snapshot_dir, port } => {
            analysis::run(&snapshot_dir, port, &mut reporter)
        }
    };

    if let Err(e) = result {
        reporter.rule("✗ Checks failed ✗");
        eprintln!("{}", e);
        process::exit(1);
    }
}

/// This is the binary to check student lab submissions. It validates the device configuration
/// files for required properties, and runs a battery of structural checks on a Batfish
/// service.
#[derive(Parser, Debug)]
#[clap(name = "labcheck", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Check the device configuration files for required properties
    #[clap(name = "configs")]
    Configs {
        /// Directory containing the device configuration files
        #[clap(short = 'p', long, default_value = "lab/configs")]
        path: String,
        /// Store the extracted tables in a json file
        #[clap(long = "json")]
        json_filename: Option<String>,
    },
    /// Run the structural checks of the snapshot on the Batfish service
    #[clap(name = "analysis")]
    Analysis {
        /// Directory containing the snapshot to upload
        #[clap(short = 'd', long, default_value = "lab")]
        snapshot_dir: String,
        /// Port on which the Batfish service listens
        #[clap(short = 'p', long, default_value = "9996")]
        port: u32,
    },
}
