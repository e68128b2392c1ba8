// src/output.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One engine's result for a CSV price report
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub engine: String,
    pub kind: String,
    pub style: String,
    pub price: f64,
    /// Monte Carlo only
    pub std_error: Option<f64>,
    pub time_ms: f64,
}

pub fn write_prices_to_csv<P: AsRef<Path>>(filename: P, rows: &[PriceRow]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "engine,kind,style,price,std_error,time_ms")?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{:.8},{},{:.3}",
            row.engine,
            row.kind,
            row.style,
            row.price,
            row.std_error
                .map(|e| format!("{:.8}", e))
                .unwrap_or_default(),
            row.time_ms
        )?;
    }
    file.flush()
}

pub fn write_summary_to_csv<P: AsRef<Path>>(
    filename: P,
    summary_data: &[(&str, String)],
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_csv_layout() {
        let path = std::env::temp_dir().join(format!("options_pricer_{}.csv", std::process::id()));
        let rows = vec![
            PriceRow {
                engine: "black-scholes".into(),
                kind: "call".into(),
                style: "european".into(),
                price: 10.450583572185565,
                std_error: None,
                time_ms: 0.01,
            },
            PriceRow {
                engine: "monte-carlo".into(),
                kind: "call".into(),
                style: "european".into(),
                price: 10.44,
                std_error: Some(0.0147),
                time_ms: 120.0,
            },
        ];
        write_prices_to_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "engine,kind,style,price,std_error,time_ms");
        assert!(lines[1].starts_with("black-scholes,call,european,10.45058357,,"));
        assert!(lines[2].contains(",0.01470000,"));
    }
}
