use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use typedc::config::{load_config, resolve_options};
use typedc::{compile_file, expand_target, parse, tokenize, TypedcError};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(TypedcError::Failed) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_env_var("TYPEDC_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn run() -> Result<(), TypedcError> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "-h" | "--help" | "help" => {
            print_help();
            Ok(())
        }
        "compile" => cmd_compile(&rest),
        "tokens" => cmd_tokens(&rest),
        "parse" => cmd_parse(&rest),
        other => {
            eprintln!("unknown command: {other}");
            print_help();
            Err(TypedcError::Failed)
        }
    }
}

fn print_help() {
    println!("typedc — compile .typed declarations to TypeScript");
    println!();
    println!("Usage:");
    println!("  typedc compile <target> [--single] [--dts] [--out <dir>]");
    println!("  typedc tokens <file>");
    println!("  typedc parse <file>");
    println!();
    println!("Targets are a .typed file, a directory, or <dir>/... to recurse.");
    println!("Settings can also come from a typed.toml next to the target.");
}

fn cmd_compile(args: &[String]) -> Result<(), TypedcError> {
    let mut target = None;
    let mut single = false;
    let mut dts = false;
    let mut out_dir: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--single" => single = true,
            "--dts" => dts = true,
            "--out" => {
                let Some(dir) = iter.next() else {
                    eprintln!("--out requires a directory");
                    return Err(TypedcError::Failed);
                };
                out_dir = Some(PathBuf::from(dir));
            }
            other if target.is_none() => target = Some(other.to_string()),
            other => {
                eprintln!("unexpected argument: {other}");
                return Err(TypedcError::Failed);
            }
        }
    }
    let Some(target) = target else {
        print_help();
        return Err(TypedcError::Failed);
    };

    let config = load_config(Path::new(&target))?;
    let options = resolve_options(&config, single, dts)?;
    if out_dir.is_none() {
        out_dir = config.compiler.out_dir.as_ref().map(PathBuf::from);
    }

    let mut had_errors = false;
    for path in expand_target(&target)? {
        match compile_file(&path, &options) {
            Ok(files) => write_outputs(&path, &files, out_dir.as_deref())?,
            Err(err) => {
                eprintln!("error: {err}");
                had_errors = true;
            }
        }
    }
    if had_errors {
        return Err(TypedcError::Failed);
    }
    Ok(())
}

fn write_outputs(
    source_path: &Path,
    files: &[typedc::GeneratedFile],
    out_dir: Option<&Path>,
) -> Result<(), TypedcError> {
    let base_dir = match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.to_path_buf()
        }
        None => source_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf(),
    };
    for file in files {
        let path = base_dir.join(&file.file_name);
        fs::write(&path, &file.text)?;
        let map_path = base_dir.join(format!("{}.map", file.file_name));
        fs::write(&map_path, file.source_map.encode())?;
    }
    Ok(())
}

fn read_single_file(args: &[String]) -> Result<(PathBuf, String), TypedcError> {
    let Some(target) = args.first() else {
        print_help();
        return Err(TypedcError::Failed);
    };
    let path = PathBuf::from(target);
    let source = fs::read_to_string(&path)?;
    Ok((path, source))
}

fn cmd_tokens(args: &[String]) -> Result<(), TypedcError> {
    let (path, source) = read_single_file(args)?;
    let tokens = tokenize(&source).map_err(|error| TypedcError::Compile {
        path: path.display().to_string(),
        error,
    })?;
    let output = serde_json::to_string_pretty(&tokens)
        .map_err(|err| TypedcError::Io(std::io::Error::other(err)))?;
    println!("{output}");
    Ok(())
}

fn cmd_parse(args: &[String]) -> Result<(), TypedcError> {
    let (path, source) = read_single_file(args)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| TypedcError::InvalidPath(path.display().to_string()))?;
    let source_file = parse(file_name, &source).map_err(|error| TypedcError::Compile {
        path: path.display().to_string(),
        error,
    })?;
    let output = serde_json::to_string_pretty(&source_file)
        .map_err(|err| TypedcError::Io(std::io::Error::other(err)))?;
    println!("{output}");
    Ok(())
}
