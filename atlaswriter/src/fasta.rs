//! FASTA rendering of the combined record.

use crate::{
    combine::Combined,
    consts::LINE_WIDTH,
    error::{AtlasError, Result},
};

use flate2::{Compression, write::GzEncoder};
use log::info;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Writes one wrapped record to `writer`.
pub fn write_record<W: Write>(writer: &mut W, combined: &Combined, width: usize) -> io::Result<()> {
    writer.write_all(b">")?;
    writer.write_all(combined.header.to_string().as_bytes())?;
    writer.write_all(b"\n")?;

    for line in combined.sequence.chunks(width.max(1)) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }

    Ok(())
}

/// Writes the record to `output` (gzip-compressed if asked) or to stdout.
///
/// Returns the path actually written, if any.
pub fn write_output(
    combined: &Combined,
    output: Option<&Path>,
    compress: bool,
) -> Result<Option<PathBuf>> {
    let Some(output) = output else {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_record(&mut writer, combined, LINE_WIDTH)
            .and_then(|_| writer.flush())
            .map_err(|source| AtlasError::Output {
                path: PathBuf::from("<stdout>"),
                source,
            })?;

        return Ok(None);
    };

    let path = with_gzip_extension(output.to_path_buf(), compress);
    let to_output_error = |source| AtlasError::Output {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(to_output_error)?;
    if compress {
        let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
        write_record(&mut writer, combined, LINE_WIDTH)
            .and_then(|_| writer.finish())
            .and_then(|mut inner| inner.flush())
            .map_err(to_output_error)?;
    } else {
        let mut writer = BufWriter::new(file);
        write_record(&mut writer, combined, LINE_WIDTH)
            .and_then(|_| writer.flush())
            .map_err(to_output_error)?;
    }

    info!("Output written to {}", path.display());
    Ok(Some(path))
}

fn with_gzip_extension(mut path: PathBuf, compress: bool) -> PathBuf {
    if compress && path.extension().and_then(|ext| ext.to_str()) != Some("gz") {
        path.as_mut_os_string().push(".gz");
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::Header;

    fn render(record: &Combined) -> String {
        let mut buf = Vec::new();
        write_record(&mut buf, record, LINE_WIDTH).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn combined(len: usize) -> Combined {
        Combined {
            header: Header {
                accession: "MZ242719".to_string(),
                start: 1,
                end: len as u64,
                description: "Combined locus segments 1".to_string(),
            },
            sequence: vec![b'C'; len],
        }
    }

    #[test]
    fn test_lines_wrap_at_width() {
        let record = combined(150);
        let text = render(&record);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], ">MZ242719.1:1-150 Combined locus segments 1");
        assert_eq!(
            lines[1..].iter().map(|l| l.len()).collect::<Vec<_>>(),
            vec![70, 70, 10]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_exact_multiple_has_no_empty_line() {
        let record = combined(140);
        let text = render(&record);

        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_empty_sequence_writes_header_only() {
        let record = combined(0);

        assert_eq!(render(&record), ">MZ242719.1:1-0 Combined locus segments 1\n");
    }

    #[test]
    fn test_gzip_extension() {
        assert_eq!(
            with_gzip_extension(PathBuf::from("out.fa"), true),
            PathBuf::from("out.fa.gz")
        );
        assert_eq!(
            with_gzip_extension(PathBuf::from("out.fa.gz"), true),
            PathBuf::from("out.fa.gz")
        );
        assert_eq!(
            with_gzip_extension(PathBuf::from("out.fa"), false),
            PathBuf::from("out.fa")
        );
    }
}
