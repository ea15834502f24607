use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

use fibre_forge::{GenerationConfig, Network};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::File(w) => w.write(buf),
            OutputTarget::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::File(w) => w.flush(),
            OutputTarget::Stdout(w) => w.flush(),
        }
    }
}

pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            Ok(OutputTarget::File(BufWriter::new(file)))
        }
        None => Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn read_config(path: &Path) -> Result<GenerationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = GenerationConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

pub fn read_network(path: &Path) -> Result<Network> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open network file: {}", path.display()))?;
    parse_network(BufReader::new(file))
        .with_context(|| format!("Invalid network JSON: {}", path.display()))
}

/// Deserializes a network and checks its bead references.
fn parse_network(reader: impl Read) -> Result<Network> {
    let network: Network = serde_json::from_reader(reader)?;
    network.validate()?;
    Ok(network)
}

pub fn write_network(network: &Network, path: Option<&Path>) -> Result<()> {
    let mut out = create_output(path)?;
    serde_json::to_writer_pretty(&mut out, network).context("Failed to serialize network")?;
    writeln!(out).context("Failed to write network")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
