use anyhow::Result;
use std::io::Write;

use scangate_client::ScanClient;
use scangate_core::{should_block_output, should_block_prompt, GateDecision};
use tracing::info;

use crate::config::{ScangateConfig, ScannersConfig};

/// Where the guarded flow stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    PromptRejected(GateDecision),
    OutputRejected(GateDecision),
    Delivered,
}

/// Scan the prompt, stand in for generation, scan the output.
///
/// Stops at the first gate that blocks. Transport errors are returned as-is;
/// there is no degraded path.
pub async fn run_guarded_flow<W: Write>(
    client: &ScanClient,
    scanners: &ScannersConfig,
    prompt: &str,
    generated: &str,
    out: &mut W,
) -> Result<FlowOutcome> {
    let prompt_result = client.scan_prompt(prompt, &scanners.prompt).await?;
    let decision = should_block_prompt(&prompt_result);
    info!(blocked = decision.blocked, "Prompt gate: {}", decision.reason);

    if decision.blocked {
        writeln!(out, "Prompt rejected: {}", decision.reason)?;
        writeln!(out, "{}", serde_json::to_string_pretty(prompt_result.details())?)?;
        return Ok(FlowOutcome::PromptRejected(decision));
    }

    writeln!(out, "Prompt accepted.")?;

    // Model generation is outside this client; `generated` stands in for it.
    let output_result = client
        .scan_output(prompt, generated, &scanners.output)
        .await?;
    let decision = should_block_output(&output_result);
    info!(blocked = decision.blocked, "Output gate: {}", decision.reason);

    if decision.blocked {
        writeln!(out, "Output rejected: {}", decision.reason)?;
        writeln!(out, "{}", serde_json::to_string_pretty(output_result.details())?)?;
        return Ok(FlowOutcome::OutputRejected(decision));
    }

    writeln!(out, "Safe output:")?;
    writeln!(out, "{}", generated)?;
    Ok(FlowOutcome::Delivered)
}

pub async fn run_demo_command(config: &ScangateConfig, prompt: &str, generated: &str) -> Result<()> {
    let client = ScanClient::new(config.to_client_config())?;
    let mut stdout = std::io::stdout();
    run_guarded_flow(&client, &config.scanners, prompt, generated, &mut stdout).await?;
    Ok(())
}
