// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod pbm;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::error;

use pdf417_core::{Bitmap, Pdf417Decoder, Pdf417Options};

use pbm::PbmBitmap;

/// Decode a PDF417 barcode from a PBM bitmap.
#[derive(Parser, Debug)]
#[command(name = "pdf417-cli", version, about)]
struct Cli {
    /// Path to a PBM (P1/P4) bitmap, or "-" to read from stdin.
    input: PathBuf,

    /// Increase diagnostic verbosity (repeatable).
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug: u8,

    /// Dump the matched codebook entry for every demodulated symbol.
    #[arg(short = 'c', long = "dump-codebook")]
    dump_codebook: bool,

    /// Frame output as `TAG "HEXBYTES"` instead of writing raw bytes.
    #[arg(short = 'e', long = "emit-framed")]
    emit_framed: bool,

    /// Run Reed-Solomon error/erasure correction before parsing.
    #[arg(long = "rs", alias = "apply-ecc")]
    apply_ecc: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `err` already carries clap's own formatted usage message; print
            // it and map to this crate's own exit code rather than letting
            // clap exit the process with its own code 2.
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    // `-d`/`-dd` raises both this crate's own DiagnosticFlags and the `log`
    // crate's filter level, so `RUST_LOG` still wins if the caller set it.
    let level = match cli.debug {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let options = Pdf417Options {
        debug_level: cli.debug,
        dump_codebook: cli.dump_codebook,
        emit_framed: cli.emit_framed,
        apply_ecc: cli.apply_ecc,
        ..Pdf417Options::default()
    };

    let bytes = match read_input(&cli.input) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("pdf417-cli: could not read {}: {}", cli.input.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let bitmap = match PbmBitmap::parse(&bytes) {
        Ok(bitmap) => bitmap,
        Err(err) => {
            error!("pdf417-cli: not a valid PBM bitmap: {}", err);
            return ExitCode::FAILURE;
        }
    };

    run(&bitmap, options)
}

fn run(bitmap: &dyn Bitmap, options: Pdf417Options) -> ExitCode {
    let decoder = Pdf417Decoder::new(options);
    let stdout = io::stdout();
    let mut sink = pdf417_core::sink::WriteSink::new(stdout.lock());

    if let Err(err) = decoder.decode(bitmap, &mut sink) {
        error!("pdf417-cli: decode failed: {}", err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = sink.into_result() {
        error!("pdf417-cli: error writing output: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(path)
    }
}
