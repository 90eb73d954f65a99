use crate::error::CliError;
use planner::CompiledQuery;

/// Query text followed by one `name = value` line per binding.
pub fn render_text(compiled: &CompiledQuery) -> String {
    let mut text = compiled.query.clone();
    for (name, value) in &compiled.parameters {
        text.push_str(&format!("\n  ?{name} = {value}"));
    }
    if let Some(count) = compiled.count {
        text.push_str(&format!("\n  count = {count}"));
    }
    text
}

pub fn render_json(compiled: &CompiledQuery) -> Result<String, CliError> {
    serde_json::to_string_pretty(compiled).map_err(CliError::JsonSerialize)
}

pub async fn emit(content: String, output: Option<String>) -> Result<(), CliError> {
    match output {
        Some(path) => tokio::fs::write(path, content).await?,
        None => println!("{content}"),
    }
    Ok(())
}
