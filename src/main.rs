/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use anyhow::Result;
use clap::Parser as clap_parser;
use i281asm::errors::AssemblyError;
use i281asm::output::{self, BuildReport};
use i281asm::{assemble, file_reader, logging};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Compile assembly code to machine code for the i281 microprocessor.
#[derive(clap_parser)]
#[clap(version = "0.4.9", about)]
struct Opts {
    /// File(s) or directories to be compiled to machine language
    #[clap(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,
    /// Directory that receives one output bundle per source file
    #[clap(short, long, default_value = "./output")]
    output: PathBuf,
    /// Produce a more verbose output to the command line
    #[clap(short, long)]
    verbose: bool,
    /// Force all command line prompts to default to yes
    #[clap(short, long)]
    force: bool,
    /// Write a report.json summary into the output directory
    #[clap(long)]
    report: bool,
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();
    let mut succeeded: BTreeMap<String, String> = BTreeMap::new();
    let mut failed: BTreeMap<String, String> = BTreeMap::new();

    for input in &opts.input {
        let input = strip_current_dir(input);

        let sources = match file_reader::collect_sources(&input) {
            Ok(sources) => sources,
            Err(err) => {
                failed.insert(input.display().to_string(), err.to_string());
                continue;
            }
        };

        for source_path in sources {
            let banner = format!("========= Compiling <{}>.. =========", source_path.display());
            println!("{}", banner);

            match compile_file(&source_path, &opts) {
                Ok(name) => {
                    println!(
                        "File ({}) has successfully compiled.",
                        source_path.display()
                    );
                    succeeded.insert(source_path.display().to_string(), name);
                }
                Err(err) => {
                    failed.insert(source_path.display().to_string(), err.to_string());
                }
            }

            println!("{}", "=".repeat(banner.len()));
        }
    }

    print_summary(&succeeded, &failed, &opts);

    if opts.report {
        let report = BuildReport { succeeded, failed };
        output::write_report(&opts.output, &report)?;
    }

    Ok(())
}

/// Runs one source through the assembler and writes its output bundle.
fn compile_file(source_path: &Path, opts: &Opts) -> Result<String, AssemblyError> {
    let source = file_reader::read_source(source_path)?;

    if opts.verbose {
        print_listing(&source);
        println!();
    }

    let name = source_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| AssemblyError::Io {
            reason: "File given is not an assembly file.".to_string(),
        })?;

    let bundle_dir = output::prepare_bundle_dir(&opts.output, &name, opts.force)?;
    let transcript_path = bundle_dir.join(format!("{}.bin", name));

    // The assembly half of the transcript is written before assembling
    // so a failed compile still leaves the echoed source behind.
    output::write_transcript_source(&transcript_path, &source)?;

    let assembly = assemble(&source)?;

    if opts.verbose {
        println!(" == == MACHINE CODE == == ");
        println!("{}\n", assembly.code_image().join("\n"));
    }

    output::append_machine_code(&transcript_path, &assembly)?;
    output::write_verilog_modules(&bundle_dir, &assembly)?;

    Ok(name)
}

fn strip_current_dir(path: &Path) -> PathBuf {
    path.strip_prefix(".")
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Numbered listing of the source, printed in verbose mode.
fn print_listing(source: &str) {
    for (count, line) in source.lines().enumerate() {
        println!("{:>3}| {}", count, line);
    }
}

fn print_summary(succeeded: &BTreeMap<String, String>, failed: &BTreeMap<String, String>, opts: &Opts) {
    println!("\n\nAll files have been processed.");

    if !succeeded.is_empty() {
        println!("Files that succeeded ({}):", succeeded.len());
        for (source, name) in succeeded {
            logging::success(&format!(
                "{} -> {}",
                source,
                opts.output.join(name).join(format!("{}.bin", name)).display()
            ));
            if opts.verbose {
                for module in ["User_Code_Low.v", "User_Code_High.v", "User_Data.v"] {
                    println!("\t => {}", opts.output.join(name).join(module).display());
                }
            }
        }
    }

    if !failed.is_empty() {
        println!("Files that failed ({}):", failed.len());
        for (source, message) in failed {
            logging::error(&format!("{}: {}", source, message));
        }
    }
}
