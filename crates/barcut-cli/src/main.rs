use anyhow::Result;
use barcut_core::{
    recommend_waste, BatchStats, OptimizationRequest, Optimizer, SourceType,
    WasteRecommendationRequest,
};
use clap::{Parser, Subcommand};
use colored::*;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "barcut")]
#[command(about = "Profile bar cutting planner - assign cuts to offcuts and new bars", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate a batch of cut orders
    Optimize {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find the best warehouse offcut for a single piece
    Recommend {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { input, output } => {
            optimize_command(input, output)?;
        }
        Commands::Recommend { input } => {
            recommend_command(input)?;
        }
    }

    Ok(())
}

fn load_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    parse_input(path, &content)
}

/// YAML for `.yaml`/`.yml` files, JSON for everything else.
fn parse_input<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

fn optimize_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading input...".bright_blue());

    let request: OptimizationRequest = load_input(&input)?;

    println!(
        "  {} orders to cut",
        request.orders.len().to_string().bright_white().bold()
    );
    println!(
        "  {} offcuts in stock",
        request.available_waste.len().to_string().bright_white().bold()
    );
    println!(
        "  Bar {} mm, usable offcut ≥ {} mm, scrap < {} mm",
        request.full_bar_length_mm,
        request.min_usable_offcut_mm,
        request.scrap_threshold_mm
    );
    println!();

    println!("{}", "🚀 Allocating cuts...".bright_blue());

    let optimizer = Optimizer::new(request)?;
    let response = optimizer.optimize();
    let stats = BatchStats::from_response(&response);

    println!();
    println!("{}", "✅ Allocation complete!".bright_green().bold());
    println!();

    println!("{}", "📊 Results:".bright_yellow().bold());
    for cut in &response.cuts {
        let source = match cut.source_type {
            SourceType::Waste => format!(
                "{} {}",
                cut.source_type,
                cut.source_id.as_deref().unwrap_or("?")
            )
            .bright_cyan(),
            SourceType::NewBarRemnant => cut.source_type.to_string().bright_magenta(),
            SourceType::NewBar => cut.source_type.to_string().bright_white(),
        };
        let leftover = if cut.is_scrap {
            format!("{} mm scrap", cut.waste_created_mm).red()
        } else {
            format!("{} mm left", cut.waste_created_mm).normal()
        };
        println!("    • {} ← {} ({})", cut.order_id.bright_white(), source, leftover);
    }
    println!();
    println!(
        "  New bars opened: {}",
        response
            .total_new_bars_count
            .to_string()
            .bright_white()
            .bold()
    );
    println!(
        "  Offcuts used: {}",
        response.total_waste_used_count.to_string().bright_white()
    );
    println!(
        "  Cuts from line remnants: {}",
        stats.from_remnants.to_string().bright_white()
    );
    println!(
        "  Scrap: {} mm in {} cuts",
        response
            .total_scrap_generated_mm
            .to_string()
            .bright_white(),
        stats.scrap_cuts
    );
    println!(
        "  Served without a new bar: {}",
        format!("{:.1}%", stats.reuse_percentage()).bright_green()
    );
    println!();

    let json = serde_json::to_string_pretty(&response)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn recommend_command(input: PathBuf) -> Result<()> {
    let request: WasteRecommendationRequest = load_input(&input)?;
    let recommendation = recommend_waste(&request);

    match &recommendation.recommended_item_id {
        Some(id) => println!(
            "{} {} ({} mm, cutoff {} mm)",
            "✅".bright_green(),
            id.bright_white().bold(),
            recommendation.waste_length_mm,
            recommendation.cutoff_waste_mm
        ),
        None => println!("{}", "⚠️  No matching offcut".bright_yellow()),
    }
    println!("  {}", recommendation.message);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML_REQUEST: &str = "
orders:
  - order_id: o1
    profile_code: P1
    color: White
    required_length_mm: 2000
    priority: 5
available_waste:
  - id: w1
    location: A1
    length_mm: 2100
    profile_code: P1
    color: White
scrap_threshold_mm: 150
";

    #[test]
    fn test_parse_yaml_input() {
        let request: OptimizationRequest =
            parse_input(Path::new("batch.yml"), YAML_REQUEST).unwrap();

        assert_eq!(request.orders.len(), 1);
        assert_eq!(request.available_waste[0].id, "w1");
        assert_eq!(request.scrap_threshold_mm, 150);
        assert_eq!(request.full_bar_length_mm, 6500);
    }

    #[test]
    fn test_parse_json_input_by_default() {
        let content = r#"{"profile_code":"P1","color":"White","required_length_mm":900}"#;

        let request: WasteRecommendationRequest =
            parse_input(Path::new("piece.txt"), content).unwrap();

        assert_eq!(request.required_length_mm, 900);
        assert!(request.available_waste.is_empty());
        assert!(parse_input::<WasteRecommendationRequest>(Path::new("piece.json"), YAML_REQUEST)
            .is_err());
    }
}
