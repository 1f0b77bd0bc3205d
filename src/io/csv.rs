//! Reading the intensity matrix and writing tabular outputs

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use serde::Serialize;

use crate::data::IntensityMatrix;
use crate::error::{ProteoError, Result};
use crate::summary::{GroupDistribution, SampleCounts, UpSetData};

use super::results::ContrastResults;

/// Number of leading non-intensity columns (protein identifier, ignored column)
const LEADING_COLUMNS: usize = 2;

/// Protein name: first `;`-separated token of the identifier
fn protein_name(identifier: &str) -> String {
    identifier.split(';').next().unwrap_or("").trim().to_string()
}

/// Parse one intensity cell; `None` marks a missing value
fn parse_intensity(token: &str, row: usize, sample: &str) -> Result<Option<f64>> {
    let token = token.trim();
    if token.is_empty()
        || token.eq_ignore_ascii_case("na")
        || token.eq_ignore_ascii_case("nan")
        || token.eq_ignore_ascii_case("n/a")
    {
        return Ok(None);
    }

    let value = token.parse::<f64>().map_err(|_| ProteoError::InvalidMatrix {
        reason: format!("Invalid intensity '{}' at row {}, sample {}", token, row, sample),
    })?;
    if !value.is_finite() {
        return Err(ProteoError::InvalidMatrix {
            reason: format!("Non-finite intensity '{}' at row {}, sample {}", token, row, sample),
        });
    }
    Ok(Some(value))
}

/// Read a proteomics intensity matrix from a delimited text file
///
/// Row 0 is the header. Column 0 holds the protein identifier, column 1 is
/// ignored and every further column is one sample. The delimiter is a tab when
/// the header line contains one, a comma otherwise. Empty, `NA` and `NaN`
/// cells are missing values.
pub fn read_intensity_matrix<P: AsRef<Path>>(path: P) -> Result<IntensityMatrix> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let header_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ProteoError::EmptyData {
            reason: format!("{} is empty", path.display()),
        })?;
    let delimiter = if header_line.contains('\t') { b'\t' } else { b',' };

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let header = reader.headers()?.clone();
    if header.len() <= LEADING_COLUMNS {
        return Err(ProteoError::InvalidMatrix {
            reason: format!(
                "Header has {} columns; expected an identifier column, an ignored column and at least one sample",
                header.len()
            ),
        });
    }
    let sample_ids: Vec<String> = header.iter().skip(LEADING_COLUMNS).map(|s| s.to_string()).collect();
    let n_samples = sample_ids.len();

    let mut protein_names = Vec::new();
    let mut cells: Vec<Option<f64>> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        protein_names.push(protein_name(record.get(0).unwrap_or("")));
        for (token, sample) in record.iter().skip(LEADING_COLUMNS).zip(sample_ids.iter()) {
            cells.push(parse_intensity(token, row + 1, sample)?);
        }
    }

    if protein_names.is_empty() {
        return Err(ProteoError::EmptyData {
            reason: format!("No proteins found in {}", path.display()),
        });
    }

    let n_proteins = protein_names.len();
    let values = Array2::from_shape_vec((n_proteins, n_samples), cells).map_err(|e| ProteoError::InvalidMatrix {
        reason: e.to_string(),
    })?;

    log::info!(
        "Read {} proteins x {} samples from {}",
        n_proteins,
        n_samples,
        path.display()
    );

    IntensityMatrix::new(values, protein_names, sample_ids)
}

/// Format an optional number, `NA` when absent
fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6e}", v),
        None => "NA".to_string(),
    }
}

/// Write the volcano table of one contrast
pub fn write_contrast_results<P: AsRef<Path>>(path: P, results: &ContrastResults) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(
        file,
        "protein\tstatistic\tdf\tpvalue\tpadj\tratio\tlog2_ratio\tneg_log10_padj\tcategory\tissues"
    )?;

    for p in &results.proteins {
        writeln!(
            file,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            p.protein,
            fmt_opt(p.statistic),
            fmt_opt(p.df),
            fmt_opt(p.pvalue),
            fmt_opt(p.padj),
            fmt_opt(p.ratio),
            fmt_opt(p.log2_ratio),
            fmt_opt(p.neg_log10_padj()),
            p.category,
            p.issues(),
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Write per-sample present and missing counts
pub fn write_sample_counts<P: AsRef<Path>>(path: P, counts: &[SampleCounts]) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "sample_id\tgroup\tpresent\tmissing")?;
    for c in counts {
        writeln!(file, "{}\t{}\t{}\t{}", c.sample_id, c.group, c.present, c.missing)?;
    }

    file.flush()?;
    Ok(())
}

/// Write box statistics of every raincloud
pub fn write_raincloud_summary<P: AsRef<Path>>(path: P, clouds: &[GroupDistribution]) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(
        file,
        "group\tsample_id\tn_values\tn_nonpositive\tmin\tq1\tmedian\tq3\tmax\twhisker_low\twhisker_high"
    )?;
    for cloud in clouds {
        for s in &cloud.samples {
            let b = s.box_stats;
            writeln!(
                file,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                cloud.group,
                s.sample_id,
                s.log10_values.len(),
                s.n_nonpositive,
                fmt_opt(b.map(|b| b.min)),
                fmt_opt(b.map(|b| b.q1)),
                fmt_opt(b.map(|b| b.median)),
                fmt_opt(b.map(|b| b.q3)),
                fmt_opt(b.map(|b| b.max)),
                fmt_opt(b.map(|b| b.whisker_low)),
                fmt_opt(b.map(|b| b.whisker_high)),
            )?;
        }
    }

    file.flush()?;
    Ok(())
}

/// Write the UpSet intersection table
pub fn write_upset<P: AsRef<Path>>(path: P, upset: &UpSetData) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "groups\tn_groups\texclusive\tinclusive")?;
    for row in &upset.intersections {
        let names: Vec<&str> = row.groups.iter().map(|g| g.slug()).collect();
        writeln!(
            file,
            "{}\t{}\t{}\t{}",
            names.join("&"),
            row.groups.len(),
            row.exclusive,
            row.inclusive
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Serialize any result structure as pretty-printed JSON
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::data::Contrast;
    use crate::io::results::ProteinResult;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_comma_matrix() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Protein,Description,s1,s2,s3").unwrap();
        writeln!(file, "P1;P1-2,alpha,100,NA,150").unwrap();
        writeln!(file, "P2,beta,,75,NaN").unwrap();
        writeln!(file, "\"P3;x\",\"gamma, delta\",1.5e3,2,3").unwrap();
        file.flush().unwrap();

        let matrix = read_intensity_matrix(file.path()).unwrap();
        assert_eq!(matrix.n_proteins(), 3);
        assert_eq!(matrix.n_samples(), 3);
        assert_eq!(matrix.protein_names(), &["P1", "P2", "P3"]);
        assert_eq!(matrix.sample_ids(), &["s1", "s2", "s3"]);
        assert_eq!(matrix.value(0, 0), Some(100.0));
        assert_eq!(matrix.value(0, 1), None);
        assert_eq!(matrix.value(1, 0), None);
        assert_eq!(matrix.value(1, 2), None);
        assert_eq!(matrix.value(2, 0), Some(1500.0));
    }

    #[test]
    fn test_read_tab_matrix() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id\tdesc\ta\tb").unwrap();
        writeln!(file, "P1\tx\t1\t2").unwrap();
        file.flush().unwrap();

        let matrix = read_intensity_matrix(file.path()).unwrap();
        assert_eq!(matrix.n_samples(), 2);
        assert_eq!(matrix.value(0, 1), Some(2.0));
    }

    #[test]
    fn test_read_rejects_bad_tokens() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,desc,a,b").unwrap();
        writeln!(file, "P1,x,1,high").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            read_intensity_matrix(file.path()),
            Err(ProteoError::InvalidMatrix { .. })
        ));

        let mut short = NamedTempFile::new().unwrap();
        writeln!(short, "id,desc,a,b").unwrap();
        writeln!(short, "P1,x,1").unwrap();
        short.flush().unwrap();
        assert!(matches!(read_intensity_matrix(short.path()), Err(ProteoError::CsvError(_))));

        let empty = NamedTempFile::new().unwrap();
        assert!(matches!(
            read_intensity_matrix(empty.path()),
            Err(ProteoError::EmptyData { .. })
        ));
    }

    #[test]
    fn test_write_contrast_results() {
        let results = ContrastResults {
            contrast: Contrast::DxSite,
            alpha: 0.05,
            proteins: vec![ProteinResult {
                protein: "P1".to_string(),
                statistic: None,
                df: None,
                pvalue: None,
                padj: None,
                rejected: false,
                numerator_mean: 0.0,
                denominator_mean: 0.0,
                ratio: None,
                log2_ratio: None,
                category: Category::Inconclusive,
                test_issue: Some(crate::testing::TestIssue::ZeroVariance),
                ratio_issue: None,
            }],
            correction_error: None,
        };

        let file = NamedTempFile::new().unwrap();
        write_contrast_results(file.path(), &results).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("protein\t"));
        assert_eq!(lines[1], "P1\tNA\tNA\tNA\tNA\tNA\tNA\tNA\tinconclusive\tzero_variance");
    }
}
