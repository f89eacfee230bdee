use anyhow::Result;
use std::io::Write;

use scangate_client::ScanClient;
use scangate_core::{should_block, GateDecision, ScanResult};
use tracing::info;

use crate::config::ScangateConfig;

/// Print a decision followed by the scan details as JSON.
pub fn print_decision<W: Write>(out: &mut W, decision: &GateDecision, result: &ScanResult) -> Result<()> {
    let verdict = if decision.blocked { "rejected" } else { "accepted" };
    writeln!(out, "{} {}: {}", result.kind(), verdict, decision.reason)?;
    writeln!(out, "{}", serde_json::to_string_pretty(result.details())?)?;
    Ok(())
}

/// Returns true when the gate blocked the prompt.
pub async fn run_prompt_command(
    config: &ScangateConfig,
    text: &str,
    scanners: Option<&[String]>,
) -> Result<bool> {
    let client = ScanClient::new(config.to_client_config())?;
    let scanners = scanners.unwrap_or(config.scanners.prompt.as_slice());

    let result = client.scan_prompt(text, scanners).await?;
    let decision = should_block(&result);
    info!(blocked = decision.blocked, "Prompt gate: {}", decision.reason);

    print_decision(&mut std::io::stdout().lock(), &decision, &result)?;
    Ok(decision.blocked)
}

/// Returns true when the gate blocked the output.
pub async fn run_output_command(
    config: &ScangateConfig,
    prompt: &str,
    text: &str,
    scanners: Option<&[String]>,
) -> Result<bool> {
    let client = ScanClient::new(config.to_client_config())?;
    let scanners = scanners.unwrap_or(config.scanners.output.as_slice());

    let result = client.scan_output(prompt, text, scanners).await?;
    let decision = should_block(&result);
    info!(blocked = decision.blocked, "Output gate: {}", decision.reason);

    print_decision(&mut std::io::stdout().lock(), &decision, &result)?;
    Ok(decision.blocked)
}
