use std::{env, fs::read_to_string, path::PathBuf, process::ExitCode, sync::Once, time::Instant};

use script_parser::{
    lexer::lexer::tokenize,
    parser::{
        lookups::FunctionDetection,
        parser::{parse_with_options, ParseOptions},
    },
    render_error,
};
use tracing::info;

static TRACING_INIT: Once = Once::new();

/// Installs a subscriber only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=script_parser=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

struct Args {
    file: PathBuf,
    options: ParseOptions,
    print: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut file = None;
    let mut options = ParseOptions::default();
    let mut print = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--anchored" => options.function_detection = FunctionDetection::Anchored,
            "--print" => print = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{}`", flag)),
            path if file.is_none() => file = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument `{}`", extra)),
        }
    }

    let file = file.ok_or_else(|| String::from("no input file given"))?;
    Ok(Args {
        file,
        options,
        print,
    })
}

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: script_parser <file> [--anchored] [--print]");
            return ExitCode::from(2);
        }
    };

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let start = Instant::now();
    let tokens = match tokenize(source.clone(), file_name) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return ExitCode::FAILURE;
        }
    };
    info!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let program = match parse_with_options(&tokens, args.options) {
        Ok(program) => program,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return ExitCode::FAILURE;
        }
    };
    info!(elapsed = ?parse_start.elapsed(), statements = program.body.len(), "parsed");

    if args.print {
        print!("{}", program.render(args.options.function_detection));
    } else {
        println!("{:#?}", program);
    }

    ExitCode::SUCCESS
}
