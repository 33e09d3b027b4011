//! # 长度单位解析与格式化
//!
//! 命令行中的长度可带单位：`650nm`, `0.2 mm`, `50um`, `1.5m`；
//! 不带单位时按米处理。波长另外支持常见激光器名称。
//!
//! ## 依赖关系
//! - 被 `cli/optics.rs` 用作 clap value_parser
//! - 被 `commands/` 用于格式化输出
//! - 使用 `regex` crate

use regex::Regex;

/// 预定义激光波长 (m)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "red" => Some(650e-9),
        "he-ne" | "hene" => Some(632.8e-9),
        "green" | "nd-yag-2" => Some(532e-9),
        "blue" => Some(450e-9),
        "violet" => Some(405e-9),
        _ => None,
    }
}

/// 解析带单位的长度，返回米
pub fn parse_length(input: &str) -> Result<f64, String> {
    let re = Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*(nm|um|µm|μm|mm|cm|m)?\s*$")
        .map_err(|e| e.to_string())?;

    let caps = re.captures(input).ok_or_else(|| {
        format!(
            "Invalid length '{}'. Use a number in meters or add a unit: nm, um, mm, cm, m",
            input
        )
    })?;

    let number: f64 = caps[1]
        .parse()
        .map_err(|_| format!("Invalid number in '{}'", input))?;

    let factor = match caps.get(2).map(|m| m.as_str()) {
        Some("nm") => 1e-9,
        Some("um") | Some("µm") | Some("μm") => 1e-6,
        Some("mm") => 1e-3,
        Some("cm") => 1e-2,
        _ => 1.0,
    };

    Ok(number * factor)
}

/// 解析波长输入（激光器名称或长度）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    if let Some(wl) = get_predefined_wavelength(input.trim()) {
        return Ok(wl);
    }
    parse_length(input).map_err(|_| {
        format!(
            "Invalid wavelength '{}'. Use a length (e.g., 650nm) or a name: red, he-ne, green, blue, violet",
            input
        )
    })
}

/// 按量级选择单位格式化长度
pub fn format_length(meters: f64) -> String {
    let abs = meters.abs();
    if abs == 0.0 {
        "0 m".to_string()
    } else if abs < 1e-6 {
        format!("{:.1} nm", meters * 1e9)
    } else if abs < 1e-3 {
        format!("{:.2} µm", meters * 1e6)
    } else if abs < 1.0 {
        format!("{:.3} mm", meters * 1e3)
    } else {
        format!("{:.3} m", meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1e-30)
    }

    #[test]
    fn test_parse_length_units() {
        assert!(close(parse_length("650nm").unwrap(), 650e-9));
        assert!(close(parse_length("0.2 mm").unwrap(), 0.2e-3));
        assert!(close(parse_length("50um").unwrap(), 50e-6));
        assert!(close(parse_length("50µm").unwrap(), 50e-6));
        assert!(close(parse_length("1.5m").unwrap(), 1.5));
        assert!(close(parse_length("2cm").unwrap(), 0.02));
        assert!(close(parse_length("6.5e-7").unwrap(), 6.5e-7));
        assert!(close(parse_length(" 1 ").unwrap(), 1.0));
    }

    #[test]
    fn test_parse_length_rejects_garbage() {
        assert!(parse_length("").is_err());
        assert!(parse_length("abc").is_err());
        assert!(parse_length("5 km").is_err());
        assert!(parse_length("1.2.3mm").is_err());
    }

    #[test]
    fn test_parse_wavelength_presets() {
        assert_eq!(parse_wavelength("red").unwrap(), 650e-9);
        assert_eq!(parse_wavelength("He-Ne").unwrap(), 632.8e-9);
        assert!(close(parse_wavelength("532nm").unwrap(), 532e-9));
        assert!(parse_wavelength("infrared").is_err());
    }

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(650e-9), "650.0 nm");
        assert_eq!(format_length(200e-6), "200.00 µm");
        assert_eq!(format_length(3.25e-3), "3.250 mm");
        assert_eq!(format_length(1.5), "1.500 m");
        assert_eq!(format_length(0.0), "0 m");
    }
}
