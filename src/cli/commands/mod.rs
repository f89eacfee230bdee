pub mod demo;
pub mod scan;

pub use demo::{run_demo_command, run_guarded_flow, FlowOutcome};
pub use scan::{print_decision, run_output_command, run_prompt_command};
