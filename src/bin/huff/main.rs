//! `huff`, a command line front end running the Huffman pipeline one stage at a time:
//!
//! ```text
//! huff generate input.txt           -> frequency.txt
//! huff build-tree frequency.txt     -> tree.dat, bitcodes.dat, huffman-tree.dot
//! huff encode input.txt bitcodes.dat    -> encoded-text.bin
//! huff decode bitcodes.dat encoded-text.bin -> decoded-text.txt
//! ```
mod progress;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use console::style;
use progress::{fmt_size, ProgressMonitor};
use ruhuff::{decoding, encoding, persist, visualize, FrequencyTable, HuffmanTree};
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(version, about = "Huffman coding of text files", long_about = None)]
struct Cli {
    /// Log more, may be repeated up to three times
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count how often every character occurs
    Generate {
        /// Text file to count
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        input: Option<PathBuf>,
        /// Count these words instead of a file. They are saved to the sample file
        #[arg(long, num_args = 1..)]
        text: Vec<String>,
        #[arg(short, long, default_value = "frequency.txt")]
        output: PathBuf,
        /// Where the text given with --text is saved
        #[arg(long, default_value = "sample.txt")]
        sample: PathBuf,
    },
    /// Build the tree for a frequency file and derive the character codes
    BuildTree {
        frequencies: PathBuf,
        /// Human readable table of characters, frequencies and codes
        #[arg(long, default_value = "tree.dat")]
        listing: PathBuf,
        #[arg(long, default_value = "bitcodes.dat")]
        codes: PathBuf,
        /// Graphviz source of the tree
        #[arg(long, default_value = "huffman-tree.dot")]
        dot: PathBuf,
    },
    /// Encode a text file with a code table
    Encode {
        input: PathBuf,
        codes: PathBuf,
        #[arg(short, long, default_value = "encoded-text.bin")]
        output: PathBuf,
    },
    /// Decode an encoded file with the code table it was encoded with
    Decode {
        codes: PathBuf,
        encoded: PathBuf,
        #[arg(short, long, default_value = "decoded-text.txt")]
        output: PathBuf,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            input,
            text,
            output,
            sample,
        } => generate(input.as_deref(), &text, &output, &sample),
        Command::BuildTree {
            frequencies,
            listing,
            codes,
            dot,
        } => build_tree(&frequencies, &listing, &codes, &dot),
        Command::Encode {
            input,
            codes,
            output,
        } => encode(&input, &codes, &output),
        Command::Decode {
            codes,
            encoded,
            output,
        } => decode(&codes, &encoded, &output),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // log lines go through the indicatif writer so they don't tear up progress bars
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(level)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn generate(
    input: Option<&Path>,
    words: &[String],
    output: &Path,
    sample: &Path,
) -> color_eyre::Result<()> {
    let text = match input {
        Some(path) => read_text(path)?,
        None => {
            let mut text: String = words.iter().map(|word| format!("{} ", word)).collect();
            text.push('\n');
            fs::write(sample, &text)
                .wrap_err_with(|| format!("writing sample text to {}", sample.display()))?;
            info!("saved the text to {}", sample.display());
            text
        }
    };
    if text.is_empty() {
        bail!("there is no text to count");
    }

    let frequencies = FrequencyTable::from_symbols(text.chars());
    debug!("{} distinct characters", frequencies.len());
    persist::write_frequencies(create(output)?, &frequencies)
        .wrap_err_with(|| format!("writing frequencies to {}", output.display()))?;

    println!(
        "{} frequencies of {} characters to {}",
        style("Wrote").green().bold(),
        frequencies.len(),
        output.display()
    );
    Ok(())
}

fn build_tree(
    frequency_file: &Path,
    listing: &Path,
    codes: &Path,
    dot: &Path,
) -> color_eyre::Result<()> {
    let frequencies = persist::read_frequencies(open(frequency_file)?)
        .wrap_err_with(|| format!("reading frequencies from {}", frequency_file.display()))?;
    let tree = HuffmanTree::build(&frequencies)
        .wrap_err_with(|| format!("building a tree from {}", frequency_file.display()))?;
    let table = tree.code_table();
    debug!(
        "tree over {} characters, codes are {} to {} bits long",
        table.len(),
        table.min_code_len(),
        table.max_code_len()
    );

    persist::write_tree_listing(create(listing)?, &tree)
        .wrap_err_with(|| format!("writing the tree listing to {}", listing.display()))?;
    persist::write_code_table(create(codes)?, &table)
        .wrap_err_with(|| format!("writing codes to {}", codes.display()))?;
    fs::write(dot, visualize::to_dot(&tree))
        .wrap_err_with(|| format!("writing the tree graph to {}", dot.display()))?;

    println!(
        "{} {}, {} and {}",
        style("Wrote").green().bold(),
        listing.display(),
        codes.display(),
        dot.display()
    );
    info!("render the tree with `dot -Tpdf {}`", dot.display());
    Ok(())
}

fn encode(input: &Path, codes: &Path, output: &Path) -> color_eyre::Result<()> {
    let table = persist::read_code_table(open(codes)?)
        .wrap_err_with(|| format!("reading codes from {}", codes.display()))?;
    let text = read_text(input)?;

    let packed = encoding::encode(text.chars(), &table)
        .wrap_err_with(|| format!("encoding {} with the codes from {}", input.display(), codes.display()))?;
    fs::write(output, &packed).wrap_err_with(|| format!("writing {}", output.display()))?;

    println!(
        "{} {} to {} ({})",
        style("Encoded").green().bold(),
        fmt_size(text.len() as u64),
        fmt_size(packed.len() as u64),
        output.display()
    );
    Ok(())
}

fn decode(codes: &Path, encoded: &Path, output: &Path) -> color_eyre::Result<()> {
    let table = persist::read_code_table(open(codes)?)
        .wrap_err_with(|| format!("reading codes from {}", codes.display()))?;
    let packed = read_bytes(encoded)?;

    let text: String = decoding::decode(&packed, &table)
        .wrap_err_with(|| format!("decoding {} with the codes from {}", encoded.display(), codes.display()))?
        .into_iter()
        .collect();
    fs::write(output, &text).wrap_err_with(|| format!("writing {}", output.display()))?;

    println!(
        "{} {} to {} ({})",
        style("Decoded").green().bold(),
        fmt_size(packed.len() as u64),
        fmt_size(text.len() as u64),
        output.display()
    );
    Ok(())
}

fn open(path: &Path) -> color_eyre::Result<BufReader<File>> {
    let file = File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn create(path: &Path) -> color_eyre::Result<BufWriter<File>> {
    let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn read_bytes(path: &Path) -> color_eyre::Result<Vec<u8>> {
    let file = File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("reading metadata of {}", path.display()))?
        .len();
    let mut monitor = ProgressMonitor::new(file, size, path.display().to_string());
    let mut content = Vec::with_capacity(size as usize);
    monitor
        .read_to_end(&mut content)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    Ok(content)
}

fn read_text(path: &Path) -> color_eyre::Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).wrap_err_with(|| format!("{} is not UTF-8 text", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{build_tree, decode, encode, generate, Cli};
    use clap::CommandFactory;
    use std::fs;
    use std::io::BufReader;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huff-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn run_pipeline(name: &str, text: &str) {
        let dir = scratch_dir(name);
        let input = dir.join("input.txt");
        let frequencies = dir.join("frequency.txt");
        let listing = dir.join("tree.dat");
        let codes = dir.join("bitcodes.dat");
        let dot = dir.join("huffman-tree.dot");
        let encoded = dir.join("encoded-text.bin");
        let decoded = dir.join("decoded-text.txt");
        fs::write(&input, text).unwrap();

        generate(Some(&input), &[], &frequencies, &dir.join("sample.txt")).unwrap();
        build_tree(&frequencies, &listing, &codes, &dot).unwrap();
        encode(&input, &codes, &encoded).unwrap();
        decode(&codes, &encoded, &decoded).unwrap();

        assert_eq!(fs::read_to_string(&decoded).unwrap(), text);
        assert!(fs::read_to_string(&listing)
            .unwrap()
            .starts_with("Character"));
        assert!(fs::read_to_string(&dot).unwrap().starts_with("digraph"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pipeline_restores_the_input() {
        run_pipeline("text", "this is an example of a huffman tree\nwith two lines\n");
        run_pipeline("single", "x");
    }

    #[test]
    fn generate_saves_sample_text() {
        let dir = scratch_dir("sample");
        let frequencies = dir.join("frequency.txt");
        let sample = dir.join("sample.txt");
        let words = ["aab".to_string(), "ba".to_string()];

        generate(None, &words, &frequencies, &sample).unwrap();
        assert_eq!(fs::read_to_string(&sample).unwrap(), "aab ba \n");
        let file = BufReader::new(fs::File::open(&frequencies).unwrap());
        let counted = ruhuff::persist::read_frequencies(file).unwrap();
        assert_eq!(counted.get(&'a'), Some(3));
        assert_eq!(counted.get(&' '), Some(2));
        fs::remove_dir_all(&dir).unwrap();
    }
}
