use std::fs::File;
use std::io::BufRead;
use std::io::BufWriter;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use log::info;

use rafa_automaton::AutomatonFormat;
use rafa_automaton::Compiled;
use rafa_automaton::compile;
use rafa_automaton::convert;
use rafa_automaton::guess_format_from_extension;
use rafa_automaton::read_expression;
use rafa_automaton::write_automaton;
use rafa_tools::Version;
use rafa_tools::VersionFlag;
use rafa_tools::verbosity::VerbosityFlag;
use rafa_utilities::RafaError;

#[derive(clap::Parser, Debug)]
#[command(about = "A command line tool that converts regular expressions into finite automata")]
struct Cli {
    #[command(flatten)]
    version: VersionFlag,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Option<Commands>,
}

/// Defines the subcommands for this tool.
#[derive(Debug, Subcommand)]
enum Commands {
    Convert(ConvertArgs),
    Info(InfoArgs),
    Check(CheckArgs),
    Interactive(InteractiveArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints the postfix form of the given regular expression")]
struct ConvertArgs {
    expression: String,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints the automata of the regular expression on the first line of the given file")]
struct InfoArgs {
    filename: String,

    #[arg(long, help = "Print the epsilon automaton instead of the deterministic automaton")]
    nfa: bool,

    #[arg(long, help = "Explicitly specify the output format")]
    format: Option<AutomatonFormat>,

    #[arg(short, long, help = "Write the automaton to the given file instead of stdout")]
    output: Option<String>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether the given words are accepted by the regular expression in the given file")]
struct CheckArgs {
    filename: String,

    words: Vec<String>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Starts an interactive menu for the regular expression in the given file")]
struct InteractiveArgs {
    filename: String,
}

fn main() -> Result<ExitCode, RafaError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    if cli.version.into() {
        eprintln!("{}", Version);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(command) = cli.commands {
        match command {
            Commands::Convert(args) => {
                println!("{}", convert(&args.expression)?);
            }
            Commands::Info(args) => {
                let compiled = compile_file(&args.filename)?;
                println!("Regular expression: {}", compiled.expression());
                println!("Postfix form: {}", compiled.postfix());

                let automaton = if args.nfa { compiled.nfa() } else { compiled.dfa() };

                if let Some(file) = args.output {
                    let format = guess_format_from_extension(Path::new(&file), args.format);
                    let mut writer = BufWriter::new(File::create(&file)?);
                    write_automaton(&mut writer, automaton, format)?;
                    writer.flush()?;
                    info!("Wrote automaton to {file}");
                } else {
                    let format = args.format.unwrap_or(AutomatonFormat::Text);
                    write_automaton(&mut stdout(), automaton, format)?;
                }
            }
            Commands::Check(args) => {
                let compiled = compile_file(&args.filename)?;

                let mut all_accepted = true;
                for word in &args.words {
                    match compiled.accepts(word) {
                        Ok(true) => println!("\"{word}\" is accepted"),
                        Ok(false) => {
                            all_accepted = false;
                            println!("\"{word}\" is not accepted");
                        }
                        Err(error) => {
                            all_accepted = false;
                            println!("\"{word}\" is not accepted: {error}");
                        }
                    }
                }

                if !all_accepted {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Commands::Interactive(args) => {
                let compiled = compile_file(&args.filename)?;
                println!("Regular expression: {}", compiled.expression());
                println!("Postfix form: {}", compiled.postfix());

                menu(&compiled, stdin().lock(), &mut stdout())?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads the expression on the first line of the file and compiles it.
fn compile_file(filename: &str) -> Result<Compiled, RafaError> {
    let file = File::open(filename).map_err(|error| format!("Cannot open {filename}: {error}"))?;
    let expression = read_expression(file)?;
    Ok(compile(&expression)?)
}

/// Repeatedly asks for an option until 0 is chosen or the input ends.
fn menu(compiled: &Compiled, mut input: impl BufRead, output: &mut impl Write) -> Result<(), RafaError> {
    let mut line = String::new();

    loop {
        writeln!(output)?;
        writeln!(output, "1. Print the regular expression")?;
        writeln!(output, "2. Print the deterministic automaton")?;
        writeln!(output, "3. Check a word")?;
        writeln!(output, "0. Exit")?;
        write!(output, "Option: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let option = line.trim().to_string();
        match option.as_str() {
            "1" => writeln!(output, "The regular expression is {}", compiled.expression())?,
            "2" => writeln!(output, "The deterministic automaton is\n{}", compiled.dfa())?,
            "3" => {
                write!(output, "Word: ")?;
                output.flush()?;

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    return Ok(());
                }
                let word = line.trim_end_matches(['\r', '\n']);

                match compiled.accepts(word) {
                    Ok(true) => writeln!(output, "\"{word}\" is accepted")?,
                    Ok(false) => writeln!(output, "\"{word}\" is not accepted")?,
                    Err(error) => writeln!(output, "\"{word}\" is not accepted: {error}")?,
                }
            }
            "0" => {
                writeln!(output, "Exit")?;
                return Ok(());
            }
            option => writeln!(output, "Invalid option {option}, choose another option")?,
        }
    }
}
