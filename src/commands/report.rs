//! # report 子命令实现
//!
//! 将手工测得的条纹间距与理论值 λD/d 对照，给出符合程度、反推缝间距和误差传递。
//!
//! ## 依赖关系
//! - 使用 `cli/report.rs` 定义的 ReportArgs
//! - 使用 `analysis/lab.rs` 计算

use super::{print_configuration, print_warnings};
use crate::analysis::lab::{self, Agreement, Uncertainties};
use crate::cli::report::ReportArgs;
use crate::error::Result;
use crate::utils::output;
use crate::utils::units::format_length;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Quantity")]
    quantity: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行测量报告
pub fn execute(args: ReportArgs) -> Result<()> {
    output::print_header("Fringe Spacing Report");

    let config = args.optics.configuration()?;
    print_configuration(&config);
    print_warnings(&config.warnings());

    let uncertainties = match (args.distance_uncertainty, args.separation_uncertainty) {
        (None, None) => None,
        (distance, separation) => Some(Uncertainties {
            screen_distance: distance.unwrap_or(0.0),
            slit_separation: separation.unwrap_or(0.0),
        }),
    };

    let assessment = lab::assess(&config, args.measured, uncertainties.as_ref())?;

    let mut rows = vec![
        ReportRow {
            quantity: "Predicted spacing λD/d",
            value: format_length(assessment.predicted_spacing),
        },
        ReportRow {
            quantity: "Measured spacing",
            value: format_length(assessment.measured_spacing),
        },
        ReportRow {
            quantity: "Relative error",
            value: format!("{:+.2} %", assessment.relative_error * 100.0),
        },
        ReportRow {
            quantity: "Agreement",
            value: assessment.agreement.to_string(),
        },
        ReportRow {
            quantity: "Slit separation from data",
            value: format_length(assessment.estimated_separation),
        },
    ];
    if let Some(sigma) = assessment.spacing_uncertainty {
        rows.push(ReportRow {
            quantity: "Predicted spacing uncertainty",
            value: format!("± {}", format_length(sigma)),
        });
    }

    output::print_header("Measurement vs Theory");
    println!("{}", Table::new(&rows));

    match assessment.agreement {
        Agreement::Excellent | Agreement::Good => output::print_success(&format!(
            "Measurement agrees with theory ({})",
            assessment.agreement
        )),
        Agreement::Fair | Agreement::Poor => output::print_warning(&format!(
            "Measurement deviates from theory ({}); check D, d and the fringe count",
            assessment.agreement
        )),
    }

    if let Some(sigma) = assessment.spacing_uncertainty {
        let deviation = (assessment.measured_spacing - assessment.predicted_spacing).abs();
        if deviation <= sigma {
            output::print_done("Deviation is within the propagated uncertainty");
        } else {
            output::print_warning(&format!(
                "Deviation {} exceeds the propagated uncertainty",
                format_length(deviation)
            ));
        }
    }

    Ok(())
}
