// Countoor: Anchor account size calculator

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use countoor::layout::{compute, Overrides};
use countoor::report::render_snippet;
use countoor::ui::App;

/// Settings collected from the command line
struct Config {
    /// `None` when reading from stdin
    path: Option<PathBuf>,
    overrides: Overrides,
    print: bool,
    with_initializer: bool,
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file.rs | -> [--vec N] [--string N] [--type NAME=BYTES]... [--print] [--init]",
        program_name
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --vec N             Assumed element count of every Vec<T> (default 10)");
    eprintln!("  --string N          Assumed byte length of every String (default 1)");
    eprintln!("  --type NAME=BYTES   Size of a type declared elsewhere (repeatable)");
    eprintln!("  --print             Print the MAX_SIZE snippet instead of opening the UI");
    eprintln!("  --init              Include the #[derive(Accounts)] initializer");
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} programs/vault/src/state.rs          # Explore sizes interactively",
        program_name
    );
    eprintln!(
        "  {} state.rs --vec 32 --print            # Size lists of 32 entries",
        program_name
    );
}

fn parse_count(flag: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} expects a number", flag))?;
    value
        .parse::<usize>()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, value))
}

fn parse_type_override(value: Option<&String>) -> Result<(String, usize), String> {
    let value = value.ok_or_else(|| "--type expects NAME=BYTES".to_string())?;
    let (name, bytes) = value
        .split_once('=')
        .ok_or_else(|| format!("--type expects NAME=BYTES, got '{}'", value))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("--type expects NAME=BYTES, got '{}'", value));
    }
    let bytes = bytes
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("--type {}: '{}' is not a byte count", name, bytes.trim()))?;
    Ok((name.to_string(), bytes))
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut path = None;
    let mut overrides = Overrides::default();
    let mut print = false;
    let mut with_initializer = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--vec" => {
                overrides = overrides.with_sequence_length(parse_count("--vec", iter.next())?);
            }
            "--string" => {
                overrides = overrides.with_string_length(parse_count("--string", iter.next())?);
            }
            "--type" => {
                let (name, bytes) = parse_type_override(iter.next())?;
                overrides = overrides.with_type(name, bytes);
            }
            "--print" => print = true,
            "--init" => with_initializer = true,
            "-" if path.is_none() => path = Some(None),
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            file if path.is_none() => path = Some(Some(PathBuf::from(file))),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    let path = path.ok_or_else(|| "No input file provided".to_string())?;

    Ok(Config {
        path,
        overrides,
        print,
        with_initializer,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("countoor");

    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    // Read source code
    let source = match &config.path {
        Some(path) => {
            if !Path::new(path).exists() {
                eprintln!("Error: File '{}' not found", path.display());
                std::process::exit(1);
            }
            eprintln!("Reading {}...", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    if config.print {
        let computation = compute(&source, &config.overrides);
        for diagnostic in &computation.diagnostics {
            eprintln!("{}: {}", diagnostic.severity(), diagnostic);
        }
        eprintln!("Computed {} bytes", computation.total_size);
        print!(
            "{}",
            render_snippet(&source, &computation, config.with_initializer)
        );
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(source, config.path, config.overrides);
    app.with_initializer = config.with_initializer;
    if config.with_initializer {
        app.recompute();
    }
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
