//! Side-by-side comparison of the solvers on one instance.

use anyhow::Result;
use modsum_core::{
    format_count, solve_adaptive, solve_dense, solve_filtered, solve_sparse, Instance,
    ModulusList, SelectorConfig, SolveResult,
};
use serde::Serialize;

use crate::config::ReportConfig;
use crate::output::Output;

/// How the filtered solver picks its moduli in a comparison
pub enum FilterMode {
    Explicit(ModulusList),
    Adaptive { max_moduli: usize },
}

/// All records produced by one comparison run
#[derive(Debug, Serialize)]
pub struct Comparison {
    /// Absent when the target exceeds the configured naive limit
    pub naive: Option<SolveResult>,
    pub standard: SolveResult,
    pub modular: SolveResult,
    pub agree: bool,
}

impl Comparison {
    /// Run the baselines and the filtered solver on `instance`.
    pub fn run(
        instance: &Instance,
        mode: &FilterMode,
        selector: &SelectorConfig,
        report: &ReportConfig,
    ) -> Result<Self> {
        let naive = if instance.target() <= report.naive_limit {
            Some(solve_dense(instance)?)
        } else {
            log::info!(
                "Skipping dense DP: target {} exceeds naive limit {}",
                instance.target(),
                report.naive_limit
            );
            None
        };

        let standard = solve_sparse(instance);
        let modular = match mode {
            FilterMode::Explicit(moduli) => solve_filtered(instance, moduli),
            FilterMode::Adaptive { max_moduli } => solve_adaptive(instance, *max_moduli, selector)?,
        };

        let agree = standard.solution_exists == modular.solution_exists
            && naive
                .as_ref()
                .map_or(true, |n| n.solution_exists == standard.solution_exists);

        Ok(Comparison {
            naive,
            standard,
            modular,
            agree,
        })
    }
}

/// Ratio of baseline to filtered operations, when defined
pub fn speedup(baseline: u64, filtered: u64) -> Option<f64> {
    if filtered == 0 {
        None
    } else {
        Some(baseline as f64 / filtered as f64)
    }
}

fn format_speedup(baseline: u64, filtered: u64) -> String {
    match speedup(baseline, filtered) {
        Some(ratio) => format!("{:.1}x", ratio),
        None => "n/a".to_string(),
    }
}

fn format_saved(baseline: u64, filtered: u64) -> String {
    if baseline >= filtered {
        format_count(baseline - filtered)
    } else {
        format!("-{}", format_count(filtered - baseline))
    }
}

/// Print one solver record
pub fn print_record(output: &Output, result: &SolveResult) -> Result<()> {
    if output.is_json() {
        return output.json(result);
    }
    output.writeln(&result.to_string());
    Ok(())
}

/// Run and print a full comparison. Returns whether the solvers agreed.
pub fn run_comparison(
    output: &Output,
    instance: &Instance,
    mode: &FilterMode,
    selector: &SelectorConfig,
    report: &ReportConfig,
) -> Result<bool> {
    if output.is_json() {
        let comparison = Comparison::run(instance, mode, selector, report)?;
        output.json(&comparison)?;
        return Ok(comparison.agree);
    }

    output.rule();
    output.writeln("SUBSET SUM PROBLEM");
    output.writeln(&format!("Set S = {:?}", instance.weights()));
    output.writeln(&format!("Target T = {}", format_count(instance.target())));
    output.rule();

    let comparison = Comparison::run(instance, mode, selector, report)?;
    let mut step = 1;

    match &comparison.naive {
        Some(naive) => {
            output.writeln(&format!("\n[{}] Running Naive DP (textbook O(n*T) baseline)...", step));
            output.writeln(&naive.to_string());
            step += 1;
        }
        None => {
            output.writeln(&format!(
                "\n[{}] Skipping Naive DP (T too large, would take too long)",
                step
            ));
        }
    }

    output.writeln(&format!("\n[{}] Running Standard DP (optimized)...", step));
    output.writeln(&comparison.standard.to_string());
    step += 1;

    match mode {
        FilterMode::Explicit(moduli) => output.writeln(&format!(
            "\n[{}] Running Modular-Filtered DP with moduli={}...",
            step, moduli
        )),
        FilterMode::Adaptive { .. } => output.writeln(&format!(
            "\n[{}] Running Adaptive Modular-Filtered DP...",
            step
        )),
    }
    output.writeln(&comparison.modular.to_string());

    output.writeln("");
    output.rule();
    output.writeln("COMPARISON");
    output.rule();

    if comparison.agree {
        output.success("\u{2713} All algorithms agree on solution existence");
    } else {
        output.error("\u{2717} ALGORITHMS DISAGREE - ERROR IN IMPLEMENTATION");
    }

    let modular_ops = comparison.modular.operations;

    if let Some(naive) = &comparison.naive {
        output.writeln("\nOperations (vs Naive DP):");
        output.writeln(&format!("  Naive DP: {}", format_count(naive.operations)));
        output.writeln(&format!("  Modular-Filtered DP: {}", format_count(modular_ops)));
        output.writeln(&format!(
            "  Speedup: {}",
            format_speedup(naive.operations, modular_ops)
        ));
    }

    let standard_ops = comparison.standard.operations;
    output.writeln("\nOperations (vs Optimized DP):");
    output.writeln(&format!("  Standard DP: {}", format_count(standard_ops)));
    output.writeln(&format!("  Modular-Filtered DP: {}", format_count(modular_ops)));
    output.writeln(&format!(
        "  Speedup: {}",
        format_speedup(standard_ops, modular_ops)
    ));

    if comparison.modular.early_termination {
        output.success("\n\u{2713} Modular filtering detected impossibility immediately");
        if let Some(naive) = &comparison.naive {
            output.writeln(&format!(
                "  Saved (vs naive): {} operations",
                format_saved(naive.operations, modular_ops)
            ));
        }
        output.writeln(&format!(
            "  Saved (vs optimized): {} operations",
            format_saved(standard_ops, modular_ops)
        ));
    }

    output.writeln("");
    Ok(comparison.agree)
}
