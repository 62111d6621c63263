//! Point-set files.
//!
//! Text format: a count `n` followed by `n` whitespace-separated `x y` pairs
//! (any mix of spaces and newlines). CSV files need numeric `x` and `y`
//! columns and are read through polars.

use anyhow::{anyhow, bail, Context, Result};
use planar::geom2::Point;
use polars::prelude::*;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Load points, picking the format by extension (`.csv` or text).
pub fn load(path: &Path) -> Result<Vec<Point>> {
    let is_csv = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let points = if is_csv {
        load_csv(path)?
    } else {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        parse_text(&text).with_context(|| format!("parsing {}", path.display()))?
    };
    tracing::info!(path = %path.display(), points = points.len(), "loaded points");
    Ok(points)
}

pub fn parse_text(text: &str) -> Result<Vec<Point>> {
    let mut tokens = text.split_whitespace();
    let n: usize = tokens
        .next()
        .ok_or_else(|| anyhow!("missing point count"))?
        .parse()
        .context("point count is not an integer")?;
    let mut coord = |k: usize, axis: &str| -> Result<f64> {
        let tok = tokens
            .next()
            .ok_or_else(|| anyhow!("expected {n} points, input ends at point {k}"))?;
        tok.parse()
            .with_context(|| format!("point {k}: bad {axis} coordinate `{tok}`"))
    };
    let mut points = Vec::with_capacity(n);
    for k in 0..n {
        let x = coord(k, "x")?;
        let y = coord(k, "y")?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

fn load_csv(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns of {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(k, xy)| match xy {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => bail!("row {k}: missing coordinate"),
        })
        .collect()
}

/// Write points in the text format.
pub fn save(path: &Path, points: &[Point]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, format_text(points)).with_context(|| format!("writing {}", path.display()))
}

pub fn format_text(points: &[Point]) -> String {
    let mut out = format!("{}\n", points.len());
    for p in points {
        // `{}` on f64 prints the shortest representation that parses back exactly.
        let _ = writeln!(out, "{} {}", p.x, p.y);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn text_format_reads_mixed_whitespace() {
        let pts = parse_text("3\n0 0\n1.5 -2\t4e-1\n7").unwrap();
        assert_eq!(
            pts,
            vec![Point::new(0.0, 0.0), Point::new(1.5, -2.0), Point::new(0.4, 7.0)]
        );
    }

    #[test]
    fn text_format_reports_short_input() {
        let err = parse_text("2\n0 0\n1").unwrap_err();
        assert!(err.to_string().contains("bad y") || err.to_string().contains("ends at point 1"));
        assert!(parse_text("").is_err());
        assert!(parse_text("1\n0 nope").is_err());
    }

    #[test]
    fn save_then_load_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts/cloud.txt");
        let pts = vec![Point::new(0.1, 0.2), Point::new(-3.0, 1e-12)];
        save(&path, &pts).unwrap();
        assert_eq!(load(&path).unwrap(), pts);
    }

    #[test]
    fn csv_columns_are_read_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.csv");
        fs::write(&path, "id,y,x\n0,1.0,2\n1,3.5,-1\n").unwrap();
        let pts = load(&path).unwrap();
        assert_eq!(pts, vec![Point::new(2.0, 1.0), Point::new(-1.0, 3.5)]);
    }
}
