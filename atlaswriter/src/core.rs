use crate::{
    catalog::{Catalog, Loaded},
    cli::Args,
    combine::{Combined, combine},
    coords::Layout,
    edit::EditSpec,
    error::{AtlasError, Result},
    fasta::write_output,
    selection::parse_selection,
};

use log::{debug, info, warn};

/// Main processing function: lists the catalog or writes the combined record.
pub fn atlaswriter(args: Args) -> Result<()> {
    let Args {
        input,
        include_locus_segment,
        truncate,
        poly_a,
        output,
        compress,
        list,
        ..
    } = args;

    let Loaded { catalog, skipped } = Catalog::load(&input)?;
    for record in &skipped {
        warn!("WARN: {}", record);
    }

    if list {
        print!("{}", catalog.listing());
        return Ok(());
    }

    let selection = include_locus_segment.ok_or_else(|| {
        AtlasError::selection(
            "",
            "no segment selection provided, use --include-locus-segment or --list",
        )
    })?;

    let combined = build_record(
        &catalog,
        &selection,
        truncate.as_deref(),
        poly_a.as_deref(),
    )?;

    write_output(&combined, output.as_deref(), compress)?;

    Ok(())
}

/// Runs the whole pipeline in memory: selection, layout, edits and combination.
pub fn build_record(
    catalog: &Catalog,
    selection: &str,
    truncate: Option<&str>,
    poly_a: Option<&str>,
) -> Result<Combined> {
    let ids = parse_selection(selection, catalog.len())?;
    let layout = Layout::new(catalog, &ids)?;
    debug!("Linear layout: {}", layout);

    for (a, b) in layout.overlaps() {
        warn!(
            "WARN: selected segments {} and {} have overlapping reference ranges",
            a, b
        );
    }

    let edits = EditSpec::resolve(truncate, poly_a, &layout)?;
    debug!("Resolved edits: {}", edits);

    let combined = combine(&layout, &edits)?;
    info!(
        "Combined {} segments into {} bases",
        ids.len(),
        combined.sequence.len()
    );

    Ok(combined)
}
