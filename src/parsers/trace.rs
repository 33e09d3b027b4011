//! # 实测强度曲线解析器
//!
//! 读取相机/光电二极管扫描得到的一维强度数据。
//!
//! ## 支持格式
//! ```text
//! # CSV（可有表头，# 开头为注释）
//! position,intensity
//! -0.005,0.12
//! ...
//!
//! # XY / DAT / TXT（空白分隔，# 开头为注释）
//! -0.005   0.12
//! ...
//! ```
//! 每行一列时视为强度值（位置由调用方给出），两列及以上取前两列为 (位置, 强度)。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `csv` 库解析 CSV

use crate::error::{Result, SlitError};
use std::fs;
use std::path::Path;

/// 未归一化的实测曲线
#[derive(Debug, Clone, PartialEq)]
pub struct RawTrace {
    pub name: String,
    /// 文件中给出的位置列（单位由文件决定）
    pub positions: Option<Vec<f64>>,
    pub values: Vec<f64>,
}

/// 逐行累积数值，统一一列/两列的判定
struct TraceBuilder<'a> {
    format: &'a str,
    name: &'a str,
    columns: Option<usize>,
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl<'a> TraceBuilder<'a> {
    fn new(format: &'a str, name: &'a str) -> Self {
        Self {
            format,
            name,
            columns: None,
            positions: Vec::new(),
            values: Vec::new(),
        }
    }

    fn error(&self, reason: String) -> SlitError {
        SlitError::ParseError {
            format: self.format.to_string(),
            path: self.name.to_string(),
            reason,
        }
    }

    /// 处理一行字段；第一行无法解析时视为表头
    fn push<'f>(&mut self, line_no: usize, fields: impl Iterator<Item = &'f str>) -> Result<()> {
        let fields: Vec<&str> = fields.map(str::trim).filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            return Ok(());
        }

        let numbers: Option<Vec<f64>> = fields.iter().take(2).map(|f| f.parse().ok()).collect();
        let numbers = match numbers {
            Some(n) => n,
            None if self.columns.is_none() && self.values.is_empty() => {
                // 表头
                self.columns = Some(fields.len().min(2));
                return Ok(());
            }
            None => {
                return Err(self.error(format!("line {}: non-numeric value in '{}'", line_no, fields.join(" "))));
            }
        };

        let expected = *self.columns.get_or_insert(numbers.len());
        if numbers.len() != expected {
            return Err(self.error(format!(
                "line {}: expected {} column(s), found {}",
                line_no,
                expected,
                numbers.len()
            )));
        }

        if expected == 2 {
            self.positions.push(numbers[0]);
            self.values.push(numbers[1]);
        } else {
            self.values.push(numbers[0]);
        }
        Ok(())
    }

    fn finish(self) -> Result<RawTrace> {
        if self.values.is_empty() {
            return Err(self.error("no data rows".to_string()));
        }
        let positions = if self.positions.is_empty() {
            None
        } else {
            Some(self.positions)
        };
        Ok(RawTrace {
            name: self.name.to_string(),
            positions,
            values: self.values,
        })
    }
}

/// 解析实测曲线文件，按扩展名选择 CSV 或空白分隔格式
pub fn parse_trace_file(path: &Path) -> Result<RawTrace> {
    if !path.exists() {
        return Err(SlitError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| SlitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("trace");

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => parse_csv_content(&content, name),
        _ => parse_columns_content(&content, name),
    }
}

/// 从字符串解析 CSV 曲线
pub fn parse_csv_content(content: &str, name: &str) -> Result<RawTrace> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut builder = TraceBuilder::new("CSV", name);
    for record in reader.records() {
        let record = record?;
        let line_no = record.position().map(|p| p.line() as usize).unwrap_or(0);
        builder.push(line_no, record.iter())?;
    }
    builder.finish()
}

/// 从字符串解析空白分隔的 XY/DAT/TXT 曲线
pub fn parse_columns_content(content: &str, name: &str) -> Result<RawTrace> {
    let mut builder = TraceBuilder::new("XY", name);
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        builder.push(i + 1, line.split(|c: char| c.is_whitespace() || c == ',' || c == ';'))?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_header_and_comments() {
        let content = "\
# camera row 240
position,intensity
-0.002, 0.10
-0.001, 0.80
0.000, 1.00
0.001, 0.75
";
        let trace = parse_csv_content(content, "row240").unwrap();
        assert_eq!(trace.name, "row240");
        assert_eq!(trace.positions, Some(vec![-0.002, -0.001, 0.0, 0.001]));
        assert_eq!(trace.values, vec![0.10, 0.80, 1.00, 0.75]);
    }

    #[test]
    fn test_parse_single_column() {
        let content = "12\n40\n95\n41\n13\n";
        let trace = parse_columns_content(content, "pixels").unwrap();
        assert_eq!(trace.positions, None);
        assert_eq!(trace.values.len(), 5);
        assert_eq!(trace.values[2], 95.0);

        let csv_trace = parse_csv_content("intensity\n1\n2\n3\n", "c").unwrap();
        assert_eq!(csv_trace.positions, None);
        assert_eq!(csv_trace.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_xy_extra_columns() {
        let content = "# x y err\n0.0\t1.0\t0.1\n1.0\t2.0\t0.1\n";
        let trace = parse_columns_content(content, "xy").unwrap();
        assert_eq!(trace.positions, Some(vec![0.0, 1.0]));
        assert_eq!(trace.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(matches!(
            parse_columns_content("1 2\n3 abc\n", "bad"),
            Err(SlitError::ParseError { .. })
        ));
        // 列数不一致
        assert!(parse_columns_content("1 2\n3\n", "bad").is_err());
        assert!(parse_csv_content("# only comments\n", "empty").is_err());
        assert!(parse_columns_content("", "empty").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = parse_trace_file(Path::new("/nonexistent/trace.csv"));
        assert!(matches!(result, Err(SlitError::FileNotFound { .. })));
    }
}
