//! Subcommands and their execution.

use crate::Cli;
use anyhow::{bail, Context, Result};
use fly::{Adapter, CreateDirOptions, Error, Filesystem, FlyConfig, WriteOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "fly.toml";

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Create a directory (and any missing parents)
    Mkdir {
        path: String,
        /// Permission mode in octal, e.g. 755
        #[arg(long, value_parser = parse_mode)]
        mode: Option<u32>,
    },
    /// Copy a file
    Cp { src: String, dst: String },
    /// Move a file (copy, then delete the source)
    Mv { src: String, dst: String },
    /// Delete a file
    Rm { path: String },
    /// Delete a directory
    Rmdir { path: String },
    /// Print whether a file (or with --dir, a directory) exists
    Exists {
        path: String,
        #[arg(long)]
        dir: bool,
    },
    /// Print the MIME type of a file
    Mime { path: String },
    /// Write a file's content to stdout
    Cat { path: String },
    /// Write a file's content to stdout, then delete it
    Take { path: String },
    /// Write stdin (or --from FILE) to a file
    Put {
        path: String,
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
        /// Permission mode in octal, e.g. 600
        #[arg(long, value_parser = parse_mode)]
        mode: Option<u32>,
    },
    /// Print the resolved configuration as TOML
    Config,
}

fn parse_mode(value: &str) -> std::result::Result<u32, String> {
    let digits = value.trim_start_matches("0o");
    u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode {value:?}: {e}"))
}

/// Resolve the backend configuration from flags, env and defaults.
async fn resolve_config(root: Option<&Path>, config: Option<&Path>) -> Result<FlyConfig> {
    if let Some(root) = root {
        return Ok(FlyConfig::local(root));
    }

    let path = config.unwrap_or_else(|| Path::new(DEFAULT_CONFIG));
    FlyConfig::load_from(path)
        .await
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.root.as_deref(), cli.config.as_deref()).await?;
    let fs = Filesystem::from_config(&config).context("Failed to build storage backend")?;
    tracing::info!(backend = fs.backend_name(), "backend ready");

    match cli.command {
        Command::Mkdir { path, mode } => {
            let options = mode.map(CreateDirOptions::with_mode).unwrap_or_default();
            fs.create_dir(&path, &options).await?;
        }
        Command::Cp { src, dst } => fs.copy(&src, &dst).await?,
        Command::Mv { src, dst } => fs.rename(&src, &dst).await?,
        Command::Rm { path } => fs.delete(&path).await?,
        Command::Rmdir { path } => fs.delete_dir(&path).await?,
        Command::Exists { path, dir } => {
            let exists = if dir {
                fs.has_dir(&path).await?
            } else {
                fs.has(&path).await?
            };
            println!("{exists}");
        }
        Command::Mime { path } => println!("{}", fs.mime_type(&path).await?),
        Command::Cat { path } => write_stdout(&fs.read(&path).await?)?,
        Command::Take { path } => take(&fs, &path, &mut std::io::stdout()).await?,
        Command::Put { path, from, mode } => {
            let contents = match from {
                Some(file) => std::fs::read(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin()
                        .read_to_end(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            let options = mode.map(WriteOptions::with_mode).unwrap_or_default();
            fs.write(&path, &contents, &options).await?;
        }
        Command::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

/// Read and delete `path`, writing its content to `out`.
///
/// When only the delete fails, the recovered content is still written before
/// the error is returned.
async fn take<A, W>(fs: &A, path: &str, out: &mut W) -> Result<()>
where
    A: Adapter + ?Sized,
    W: Write,
{
    match fs.read_and_delete(path).await {
        Ok(content) => write_all(out, &content),
        Err(err @ Error::DeleteAfterRead { .. }) => {
            if let Some(content) = err.recovered_content() {
                write_all(out, content)?;
            }
            bail!(err);
        }
        Err(err) => Err(err.into()),
    }
}

fn write_all<W: Write>(out: &mut W, content: &[u8]) -> Result<()> {
    out.write_all(content)?;
    out.flush()?;
    Ok(())
}

fn write_stdout(content: &[u8]) -> Result<()> {
    write_all(&mut std::io::stdout().lock(), content)
}
