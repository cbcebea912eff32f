use super::display::{heading, style_error, style_provider_name, style_success};
use anyhow::Result;
use ccwai_core::utils::diff_summary;
use ccwai_core::{DispatchEngine, DoctorReport};
use console::style;
use std::path::Path;

fn print_report(report: &DoctorReport) {
    println!("{}", heading("CCWAI doctor"));
    println!("  Root:              {}", report.root.display());
    println!("  Config:            {}", report.config_path.display());
    println!("  Commands dir:      {}", report.commands_dir.display());
    println!("  Agents dir:        {}", report.agents_dir.display());
    println!(
        "  Default provider:  {}",
        style_provider_name(&report.default_provider)
    );
    println!(
        "  Fallback provider: {}",
        style_provider_name(&report.fallback_provider)
    );

    println!("\n{}", heading("Providers"));
    for provider in &report.providers {
        let credential = if provider.credential_present {
            style_success(&format!("✓ {}", provider.api_key_env))
        } else {
            style_error(&format!("✗ {} not set", provider.api_key_env))
        };
        println!(
            "  {} {} {}",
            style_provider_name(&provider.name),
            style(format!("({}, {})", provider.kind, provider.model)).dim(),
            credential
        );
    }
}

/// Handle the doctor command
pub async fn handle_doctor_command(start: &Path) -> Result<()> {
    let engine = DispatchEngine::new(start)?;
    let report = engine.doctor().await;
    print_report(&report);

    println!("\n{}", heading("Git"));
    println!("{}", diff_summary(&report.root).await);
    Ok(())
}
