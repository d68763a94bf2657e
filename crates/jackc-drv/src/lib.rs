//! Driver: CLI argument handling, `.jack` file discovery, the
//! comment-stripping preprocessor, and per-file compile-and-write.
//!
//! Each file is compiled independently by its own `Engine` (own lexer, own
//! symbol tables, own VM buffer — see `jackc_compile::Engine`), so the only
//! concurrency here is `rayon`'s `par_iter` across files; nothing is shared
//! across iterations.

pub mod preprocess;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Context, Result};
use jackc_compile::Engine;
use jackc_lex::Lexer;
use rayon::prelude::*;

/// Driver configuration, built from `std::env::args()`.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub verbose: bool,
    pub emit_tokens: bool,
}

impl Config {
    /// Parses `jackc <path> [--verbose] [--emit-tokens]`. No `clap`
    /// dependency — a handful of flags doesn't warrant one, and the
    /// teacher's own driver crate parses by hand the same way.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Config> {
        args.next(); // skip argv[0]

        let mut input = None;
        let mut verbose = false;
        let mut emit_tokens = false;

        for arg in args {
            match arg.as_str() {
                "--verbose" => verbose = true,
                "--emit-tokens" => emit_tokens = true,
                _ if input.is_none() => input = Some(PathBuf::from(arg)),
                other => return Err(anyhow!("unexpected argument `{other}`")),
            }
        }

        let input = input.ok_or_else(|| anyhow!("usage: jackc <path> [--verbose] [--emit-tokens]"))?;
        Ok(Config {
            input,
            verbose,
            emit_tokens,
        })
    }
}

/// Non-recursive `.jack` discovery: the input itself if it's a file, or its
/// immediate `*.jack` entries if it's a directory.
fn discover_jack_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("reading directory {}", path.display()))? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.extension().and_then(|e| e.to_str()) == Some("jack") {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Compiles every discovered `.jack` file under `config.input`, writing one
/// `.vm` per input alongside it. Returns `true` if every file compiled
/// successfully.
pub fn run(config: &Config) -> Result<bool> {
    let files = discover_jack_files(&config.input)?;
    if files.is_empty() {
        return Err(anyhow!("no .jack files found at {}", config.input.display()));
    }

    let all_succeeded = AtomicBool::new(true);
    files.par_iter().for_each(|file| {
        if let Err(err) = compile_file(file, config) {
            eprintln!("{}: {err}", file.display());
            all_succeeded.store(false, Ordering::Relaxed);
        } else if config.verbose {
            eprintln!("{}: ok", file.display());
        }
    });

    Ok(all_succeeded.load(Ordering::Relaxed))
}

fn compile_file(path: &Path, config: &Config) -> Result<()> {
    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let preprocessed = preprocess::preprocess(&source);

    if config.emit_tokens {
        return print_tokens(path, &preprocessed);
    }

    let vm_path = path.with_extension("vm");
    match Engine::compile(&preprocessed) {
        Ok(vm_text) => {
            fs::write(&vm_path, vm_text)
                .with_context(|| format!("writing {}", vm_path.display()))?;
            Ok(())
        }
        Err(err) => {
            // No partial output guarantee per the error-handling contract;
            // remove rather than leave a stale file a downstream assembler
            // might pick up.
            let _ = fs::remove_file(&vm_path);
            Err(anyhow!(err.display_with_file(&path.display().to_string())))
        }
    }
}

/// `--emit-tokens` stops the pipeline after lexing and prints the token
/// stream instead of compiling, mirroring the early-return shape of the
/// teacher driver's `EmitType::Tokens` branch.
fn print_tokens(path: &Path, preprocessed: &str) -> Result<()> {
    let mut lexer = Lexer::new(preprocessed)
        .map_err(|err| anyhow!(err.display_with_file(&path.display().to_string())))?;
    loop {
        let tok = lexer.current();
        if tok.is_eof() {
            break;
        }
        println!("{}: {tok}", path.display());
        lexer
            .advance()
            .map_err(|err| anyhow!(err.display_with_file(&path.display().to_string())))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_path_and_flags() {
        let args = vec![
            "jackc".to_string(),
            "Main.jack".to_string(),
            "--verbose".to_string(),
        ];
        let config = Config::from_args(args.into_iter()).unwrap();
        assert_eq!(config.input, PathBuf::from("Main.jack"));
        assert!(config.verbose);
        assert!(!config.emit_tokens);
    }

    #[test]
    fn missing_path_is_an_error() {
        let args = vec!["jackc".to_string()];
        assert!(Config::from_args(args.into_iter()).is_err());
    }

    #[test]
    fn compiles_a_single_file_to_vm() {
        let dir = tempdir().unwrap();
        let jack_path = dir.path().join("Main.jack");
        fs::write(&jack_path, "class Main { function void main() { return; } }").unwrap();

        let config = Config {
            input: jack_path.clone(),
            verbose: false,
            emit_tokens: false,
        };
        assert!(run(&config).unwrap());

        let vm_text = fs::read_to_string(jack_path.with_extension("vm")).unwrap();
        assert!(vm_text.contains("function Main.main 0"));
    }

    #[test]
    fn removes_partial_output_on_failure() {
        let dir = tempdir().unwrap();
        let jack_path = dir.path().join("Bad.jack");
        fs::write(&jack_path, "class Bad { oops }").unwrap();

        let config = Config {
            input: jack_path.clone(),
            verbose: false,
            emit_tokens: false,
        };
        assert!(!run(&config).unwrap());
        assert!(!jack_path.with_extension("vm").exists());
    }

    #[test]
    fn emit_tokens_does_not_write_a_vm_file() {
        let dir = tempdir().unwrap();
        let jack_path = dir.path().join("Main.jack");
        fs::write(&jack_path, "class Main { function void main() { return; } }").unwrap();

        let config = Config {
            input: jack_path.clone(),
            verbose: false,
            emit_tokens: true,
        };
        assert!(run(&config).unwrap());
        assert!(!jack_path.with_extension("vm").exists());
    }

    #[test]
    fn compiles_every_jack_file_in_a_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("A.jack"),
            "class A { function void f() { return; } }",
        )
        .unwrap();
        fs::write(
            dir.path().join("B.jack"),
            "class B { function void g() { return; } }",
        )
        .unwrap();

        let config = Config {
            input: dir.path().to_path_buf(),
            verbose: false,
            emit_tokens: false,
        };
        assert!(run(&config).unwrap());
        assert!(dir.path().join("A.vm").exists());
        assert!(dir.path().join("B.vm").exists());
    }
}
