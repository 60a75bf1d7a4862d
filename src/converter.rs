use crate::cli::SplitArgs;
use crate::config::SplitOptions;
use crate::epub_reader::EpubBook;
use crate::format::DocumentFormat;
use crate::pdf_reader::PdfBook;
use crate::reader::BookReader;
use crate::sequencer::SummarizationUnit;
use crate::splitter;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn convert(args: &SplitArgs) -> Result<()> {
    let options = args.options();
    let format = DocumentFormat::detect(&args.input)
        .with_context(|| format!("Failed to identify {}", args.input.display()))?;
    log::info!("Reading {} as {}", args.input.display(), format);

    let units = match format {
        DocumentFormat::Epub => split_book(&EpubBook::open(&args.input)?, &options)?,
        DocumentFormat::Pdf => split_book(&PdfBook::open(&args.input)?, &options)?,
    };

    if units.is_empty() {
        log::warn!(
            "No sections found with at least {} words",
            options.min_word_count
        );
        return Ok(());
    }

    if args.dry_run {
        print!("{}", list_units(&units));
        return Ok(());
    }

    write_units(&args.output, &units)?;
    log::info!(
        "Wrote {} sections to {}",
        units.len(),
        args.output.display()
    );

    Ok(())
}

fn split_book<R: BookReader>(reader: &R, options: &SplitOptions) -> Result<Vec<SummarizationUnit>> {
    if let Some(title) = reader.title() {
        log::info!("Splitting \"{}\"", title);
    }
    Ok(splitter::split(reader, options)?)
}

/// One line per unit: file name, body words, number of ancestor intros.
pub fn list_units(units: &[SummarizationUnit]) -> String {
    let mut listing = String::new();
    for unit in units {
        listing.push_str(&format!(
            "{}\t{} words\t{} intros\n",
            unit.file_name(None),
            unit.word_count,
            unit.ancestor_intros.len()
        ));
    }
    listing
}

pub fn write_units(output_dir: &Path, units: &[SummarizationUnit]) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    for unit in units {
        let path = output_dir.join(unit.file_name(None));
        fs::write(&path, unit.render())
            .with_context(|| format!("Failed to write section: {}", path.display()))?;
    }

    Ok(())
}
