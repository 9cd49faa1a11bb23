/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{stdin, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, warn};
use ochre_asl::decoder::PATTERNS_KEY;
use ochre_asl::errors::AslDecodeErrors;
use ochre_asl::{compression, AslDecoder, AslTree, AslValue};
use ochre_core::options::DecoderOptions;

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, options: DecoderOptions
) -> Result<(), AslDecodeErrors> {
    info!("Creating workflows from input");

    let outputs: Vec<&OsStr> = match args.get_raw("out") {
        Some(values) => values.collect(),
        None => vec![]
    };

    for (index, in_file) in args.get_raw("in").unwrap().enumerate() {
        let out_file = outputs.get(index).copied();

        verify_file_paths(in_file, out_file, args)?;

        // file i/o
        let fd = BufReader::new(File::open(in_file).unwrap());

        let mut decoder = AslDecoder::new_with_options(fd, options);
        let tree = decoder.decode();

        if let Some(error) = &tree.error {
            warn!("Decoding {:?} stopped early, reason {:?}", in_file, error);
        }

        let num_patterns = tree
            .root
            .find(PATTERNS_KEY)
            .map(|node| node.children().len());
        let num_styles = tree.root.children().len() - usize::from(num_patterns.is_some());

        info!(
            "Decoded {} embedded patterns and {} style descriptors from {:?}",
            num_patterns.unwrap_or(0),
            num_styles,
            in_file
        );

        let xml = tree.to_xml();

        match out_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .create(true)
                    .open(path)
                    .unwrap();

                let mut buf_writer = BufWriter::new(file);

                buf_writer.write_all(xml.as_bytes()).map_err(|e| {
                    AslDecodeErrors::GenericString(format!("Cannot write to {path:?}: {e}"))
                })?;
                buf_writer.flush().map_err(|e| {
                    AslDecodeErrors::GenericString(format!("Cannot write to {path:?}: {e}"))
                })?;
            }
            None => print!("{xml}")
        }

        if let Some(dir) = args.get_one::<String>("extract-patterns") {
            extract_patterns(&tree, Path::new(dir))?;
        }

        if let Some(error) = tree.error {
            return Err(error);
        }
    }

    Ok(())
}

fn verify_file_paths(
    in_file: &OsStr, out_file: Option<&OsStr>, args: &ArgMatches
) -> Result<(), AslDecodeErrors> {
    let in_path = Path::new(in_file);

    if !in_path.exists() {
        return Err(AslDecodeErrors::GenericString(format!(
            "Path {:?}, does not exist",
            in_path
        )));
    }

    if !in_path.is_file() {
        return Err(AslDecodeErrors::GenericString(format!(
            "Path {:?} is not a file",
            in_path
        )));
    }

    if let Some(out_file) = out_file {
        if in_file == out_file {
            return Err(AslDecodeErrors::GenericString(format!(
                "Cannot use {:?} as both input and output",
                in_file
            )));
        }

        let out_path = Path::new(out_file);

        if out_path.exists() {
            if args.value_source("all-yes") == Some(ValueSource::CommandLine) {
                info!("Overwriting path {:?} ", out_file);
            } else {
                println!("File {:?} exists, overwrite [y/N]", out_path);
                let mut result = String::new();

                stdin().lock().read_line(&mut result).unwrap();

                if result.trim() != "y" {
                    return Err(AslDecodeErrors::GenericString(format!(
                        "Not overwriting file {:?}",
                        out_path
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Inflate every pattern blob in the tree and write it into `dir` as
/// a standalone GIMP pattern file
fn extract_patterns(tree: &AslTree, dir: &Path) -> Result<(), AslDecodeErrors> {
    let patterns = match tree.root.find(PATTERNS_KEY) {
        Some(node) => node,
        None => {
            info!("No embedded patterns to extract");
            return Ok(());
        }
    };

    std::fs::create_dir_all(dir).map_err(|e| {
        AslDecodeErrors::GenericString(format!("Cannot create directory {dir:?}: {e}"))
    })?;

    for (index, pattern) in patterns.children().iter().enumerate() {
        let blob = match pattern.find("Data").map(|node| &node.value) {
            Some(AslValue::PatternBlob(blob)) => blob,
            _ => continue
        };

        let compressed = BASE64_STANDARD.decode(blob).map_err(|e| {
            AslDecodeErrors::GenericString(format!("Pattern {index} carries bad base64: {e}"))
        })?;
        let pat = compression::decompress(&compressed)?;

        let name = match pattern.find("Idnt").map(|node| &node.value) {
            Some(AslValue::Text(uuid)) if !uuid.is_empty() => sanitize_file_name(uuid),
            _ => format!("pattern-{index}")
        };
        let path = dir.join(format!("{name}.pat"));

        std::fs::write(&path, &pat).map_err(|e| {
            AslDecodeErrors::GenericString(format!("Cannot write {path:?}: {e}"))
        })?;

        info!("Wrote pattern {:?}", path);
    }

    Ok(())
}

/// Keep file names portable, identifiers straight out of a stream can
/// hold anything
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a1b8-c/3..z"), "a1b8-c-3..z");
        assert_eq!(sanitize_file_name("../../etc"), "..-..-etc");
    }
}
