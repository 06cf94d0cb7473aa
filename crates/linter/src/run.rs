use {
    crate::arguments::{Arguments, Command, ValidateArguments},
    alloy::{
        primitives::{B256, U256},
        providers::Provider,
    },
    anyhow::{Context, Result},
    clap::Parser,
    model::{Diagnostics, Issue, order::Order},
    order_validation::{Addresses, OrderValidator},
    serde_json::{Map, Value},
    std::{path::Path, process::ExitCode},
};

pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Arguments::parse_from(args);
    let obs_config = observe::Config::new(
        args.logging.log_filter.as_str(),
        args.logging.log_stderr_threshold.into_level(),
        args.logging.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    tracing::info!("running linter with validated arguments:\n{}", args);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(?err, "linter failed");
            ExitCode::from(2)
        }
    }
}

/// Runs the command and prints its report. Returns whether the command
/// succeeded.
async fn run(args: Arguments) -> Result<bool> {
    let report = match &args.command {
        Command::Validate(validate) => validate_order(validate).await?,
        Command::MerkleRoot { identifiers } => merkle_root(identifiers),
        Command::MerkleProof { identifiers, index } => merkle_proof(identifiers, *index),
        Command::MerkleVerify {
            root,
            proof,
            identifier,
        } => merkle_verify(*root, proof, *identifier),
    };
    let success = report.success;
    println!("{}", serde_json::to_string_pretty(&report.render(args.names)?)?);
    Ok(success)
}

/// Output of a command: its own fields followed by the diagnostics.
#[derive(Debug)]
struct Report {
    output: Map<String, Value>,
    diagnostics: Diagnostics,
    success: bool,
}

impl Report {
    fn new(diagnostics: Diagnostics) -> Self {
        Self {
            output: Map::new(),
            success: !diagnostics.has_errors(),
            diagnostics,
        }
    }

    fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.output.insert(key.to_string(), value.into());
        self
    }

    fn render(self, names: bool) -> serde_json::Result<Value> {
        let mut output = self.output;
        if names {
            let by_name = |issues: &[Issue]| issues.iter().map(|issue| issue.name()).collect::<Vec<_>>();
            output.insert("errors".into(), by_name(self.diagnostics.errors()).into());
            output.insert("warnings".into(), by_name(self.diagnostics.warnings()).into());
        } else if let Value::Object(diagnostics) = serde_json::to_value(&self.diagnostics)? {
            output.extend(diagnostics);
        }
        Ok(Value::Object(output))
    }
}

async fn validate_order(args: &ValidateArguments) -> Result<Report> {
    let order = read_order(&args.order)?;
    let provider = ethrpc::alloy::provider(args.node_url.as_str())?;
    let chain_id = provider
        .get_chain_id()
        .await
        .context("failed to fetch chain id")?;
    let addresses = args
        .contracts
        .resolve(Addresses::for_chain(chain_id))
        .with_context(|| format!("no known exchange deployment on chain {chain_id}"))?;
    tracing::debug!(chain_id, ?addresses, "resolved contracts");

    let validator = OrderValidator::onchain(&provider, addresses, args.validation.config());
    let diagnostics = validator.validate_order(&order).await;
    Ok(Report::new(diagnostics))
}

/// Reads a JSON order from `path`, or from stdin if the path is `-`.
fn read_order(path: &Path) -> Result<Order> {
    let json = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read order from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read order from {}", path.display()))?
    };
    serde_json::from_str(&json).context("malformed order")
}

fn merkle_root(identifiers: &[U256]) -> Report {
    let (root, diagnostics) = merkle::build_root(identifiers);
    let report = Report::new(diagnostics);
    if !report.success {
        return report;
    }
    report.with("root", const_hex::encode_prefixed(root))
}

fn merkle_proof(identifiers: &[U256], index: usize) -> Report {
    let (proof, diagnostics) = merkle::build_proof(identifiers, index);
    let report = Report::new(diagnostics);
    let Some(identifier) = merkle::sort(identifiers).get(index).copied() else {
        return report;
    };
    if !report.success {
        return report;
    }
    report
        .with("identifier", identifier.to_string())
        .with("proof", hashes(&proof))
}

fn merkle_verify(root: B256, proof: &[B256], identifier: U256) -> Report {
    let valid = merkle::verify_proof(root, proof, identifier);
    let mut report = Report::new(Diagnostics::empty()).with("valid", valid);
    report.success = valid;
    report
}

fn hashes(hashes: &[B256]) -> Vec<Value> {
    hashes
        .iter()
        .map(|hash| const_hex::encode_prefixed(hash).into())
        .collect()
}
