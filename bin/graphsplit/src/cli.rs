use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// `graphsplit`: pack a file tree into fixed-size content-addressed CAR
/// slices, compute Filecoin piece commitments, and restore them back
/// (spec.md §6).
#[derive(Debug, Parser)]
#[command(name = "graphsplit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Slice an input file or directory into fixed-size CAR files.
    Chunk(ChunkArgs),
    /// Reconstruct a file tree from one or more CAR files.
    Restore(RestoreArgs),
    /// Compute the Filecoin piece commitment (CommP) of an existing CAR file.
    Commp(CommpArgs),
}

#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// File or directory to slice.
    pub input: PathBuf,

    /// Maximum size in bytes of each output CAR slice.
    #[arg(long = "slice-size", default_value_t = 16 * (1u64 << 30))]
    pub slice_size: u64,

    /// Number of worker threads used to build each slice's file DAGs.
    #[arg(long = "parallel", default_value_t = 2)]
    pub parallel: usize,

    /// Name used to derive output CAR filenames.
    #[arg(long = "graph-name")]
    pub graph_name: String,

    /// Directory CAR files and the manifest are written to. Must exist.
    #[arg(long = "car-dir")]
    pub car_dir: PathBuf,

    /// Path prefix stripped from each file's directory before building the
    /// in-CAR directory hierarchy.
    #[arg(long = "parent-path", default_value = "")]
    pub parent_path: String,

    /// Append a manifest.csv row for each slice.
    #[arg(long = "save-manifest", default_value_t = true)]
    pub save_manifest: bool,

    /// Compute each slice's Filecoin piece commitment (CommP).
    #[arg(long = "calc-commp", default_value_t = false)]
    pub calc_commp: bool,

    /// Rename each slice's output CAR to `<pieceCID>.car` (requires `--calc-commp`).
    #[arg(long = "rename", default_value_t = false)]
    pub rename: bool,

    /// Zero-pad each slice's CAR file up to its piece's padded size
    /// (requires `--calc-commp`).
    #[arg(long = "add-padding", default_value_t = false)]
    pub add_padding: bool,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// CAR file, or directory of CAR files, to restore from.
    #[arg(long = "car-path")]
    pub car_path: PathBuf,

    /// Directory the restored tree is written to.
    #[arg(long = "output-dir")]
    pub output_dir: PathBuf,

    /// Number of worker threads used to restore independent CAR files / merge independent bases.
    #[arg(long = "parallel", default_value_t = 4)]
    pub parallel: usize,
}

#[derive(Debug, Args)]
pub struct CommpArgs {
    /// CAR file to compute the piece commitment of.
    pub carfile: PathBuf,

    /// Rename the CAR file to `<pieceCID>.car` after computing its commitment.
    #[arg(long = "rename", default_value_t = false)]
    pub rename: bool,

    /// Zero-pad the CAR file up to its piece's padded size.
    #[arg(long = "add-padding", default_value_t = false)]
    pub add_padding: bool,
}
