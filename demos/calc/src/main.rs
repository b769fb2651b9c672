use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use calc_demo::Calc;
use clap::Parser;
use frontkit::ParseConfig;

/// Evaluate a calc program.
#[derive(Parser, Debug)]
#[command(name = "calc", version, about)]
struct Args {
    /// Program text. Read from standard input when neither this nor
    /// --file is given.
    #[arg(conflicts_with = "file")]
    expr: Option<String>,

    /// Read the program from a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum nesting depth of brackets.
    #[arg(long, default_value_t = ParseConfig::DEFAULT.max_recursion_depth)]
    max_depth: usize,

    /// Print the parsed tree instead of evaluating it.
    #[arg(long)]
    tree: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let (name, source) = match read_source(&args) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("calc: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let config = ParseConfig::new().with_max_recursion_depth(args.max_depth);
    let mut calc = Calc::with_config(config);
    let result = if args.tree {
        calc.parse(&source)
            .map(|expr| expr.sexp(calc.symbols()).to_string())
    } else {
        calc.evaluate_named(&name, &source)
            .map(|value| value.to_string())
    };

    match result {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", name, err);
            ExitCode::FAILURE
        }
    }
}

fn read_source(args: &Args) -> std::io::Result<(String, String)> {
    if let Some(expr) = &args.expr {
        return Ok(("<argument>".to_string(), expr.clone()));
    }
    if let Some(path) = &args.file {
        log::info!("reading {}", path.display());
        let text = std::fs::read_to_string(path)?;
        return Ok((path.display().to_string(), text));
    }
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(("<stdin>".to_string(), text))
}
