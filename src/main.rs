use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use layout::{ConvertOptions, HtmlToText};

const USAGE: &str = "Usage: htmltext [--config FILE.toml] [--width N | --no-wrap] [--preserve-newlines] [FILE]";

fn main() -> Result<()> {
    env_logger::init();

    let mut config: Option<PathBuf> = None;
    let mut width: Option<Option<usize>> = None;
    let mut preserve_newlines = false;
    let mut input: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config expects a path");
                };
                config = Some(PathBuf::from(path));
            }
            "--width" => {
                let Some(n) = args.next() else {
                    bail!("--width expects a number");
                };
                let n = n
                    .parse::<usize>()
                    .with_context(|| format!("invalid width `{n}`"))?;
                width = Some(Some(n));
            }
            "--no-wrap" => width = Some(None),
            "--preserve-newlines" => preserve_newlines = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("unknown option `{flag}`\n{USAGE}"),
            path => {
                if input.is_some() {
                    bail!("more than one input file\n{USAGE}");
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let mut options = match &config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ConvertOptions::from_toml_str(&source)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ConvertOptions::default(),
    };
    if let Some(width) = width {
        options.wordwrap = width;
    }
    options.preserve_newlines |= preserve_newlines;

    let html = match &input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let converter = HtmlToText::new(options).context("invalid selector configuration")?;
    log::debug!("converting {} bytes", html.len());
    let text = converter.convert(&html);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write output")?;
    Ok(())
}
