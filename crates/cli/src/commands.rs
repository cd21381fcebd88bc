//! Command handlers. Each returns the rendered output so `main` only prints.

use anyhow::{Context, Result};
use market_codec::{execute_proposal_bytes, module_codec, Codec, ModuleMsg, ParamsChangeProposal};
use market_governance::{Content, ProposalTypeTable};
use market_params::{
    default_genesis, init_genesis, validate_genesis, GenesisState, MarketParams, ParamSubspace,
};
use market_storage::{CacheStore, SledStore};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};

pub fn render<T: Serialize + Display>(value: &T, output: OutputFormat) -> Result<String> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
        OutputFormat::Text => value.to_string(),
    };
    Ok(rendered)
}

fn open_store(config: &CliConfig) -> Result<SledStore> {
    let path = config.data_dir();
    SledStore::open(&path).with_context(|| format!("failed to open store at {}", path.display()))
}

fn open_initialized(config: &CliConfig) -> Result<SledStore> {
    let store = open_store(config)?;
    if !ParamSubspace::new(&store).is_initialized()? {
        anyhow::bail!(
            "market parameters are not initialized under {}; run `market-cli init` first",
            config.home.display()
        );
    }
    Ok(store)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn build_codec() -> Arc<Codec> {
    module_codec(&mut ProposalTypeTable::new())
}

pub fn init(config: &CliConfig, genesis_file: Option<&Path>, force: bool) -> Result<String> {
    let genesis: GenesisState = match genesis_file {
        Some(path) => read_json(path)?,
        None => default_genesis(),
    };
    validate_genesis(&genesis).context("invalid genesis parameters")?;

    let store = open_store(config)?;
    let subspace = ParamSubspace::new(&store);
    if subspace.is_initialized()? {
        if !force {
            anyhow::bail!(
                "market parameters already initialized under {} (use --force to overwrite)",
                config.home.display()
            );
        }
        warn!(home = %config.home.display(), "overwriting existing market parameters");
    }

    init_genesis(&subspace, &genesis)?;
    store.flush()?;
    info!(home = %config.home.display(), "market home initialized");
    render(&genesis.params, config.output)
}

pub fn query_params(config: &CliConfig) -> Result<String> {
    let store = open_initialized(config)?;
    let params = ParamSubspace::new(&store)
        .try_get()
        .context("failed to read market parameters")?;
    render(&params, config.output)
}

pub fn query_param(config: &CliConfig, key: &str) -> Result<String> {
    let store = open_initialized(config)?;
    let value = ParamSubspace::new(&store).get_raw(key)?;
    match (config.output, &value) {
        (OutputFormat::Text, serde_json::Value::String(text)) => Ok(text.clone()),
        _ => render(&value, config.output),
    }
}

pub fn params_proposal(params_file: &Path, title: &str, description: &str) -> Result<String> {
    let params: MarketParams = read_json(params_file)?;
    let proposal = ParamsChangeProposal::new(title, description, params);
    proposal
        .validate_basic()
        .context("proposal failed basic validation")?;

    let bytes = build_codec().encode(&ModuleMsg::from(proposal))?;
    Ok(hex::encode(bytes))
}

/// Execute a proposal on a branch of the store; nothing is committed unless
/// the proposal is accepted.
pub fn gov_execute(config: &CliConfig, proposal_hex: &str) -> Result<String> {
    let bytes = hex::decode(proposal_hex.trim()).context("proposal is not valid hex")?;
    let store = open_initialized(config)?;
    let branch = CacheStore::new(&store);
    let subspace = ParamSubspace::new(&branch);

    if let Err(err) = execute_proposal_bytes(&build_codec(), &subspace, &bytes) {
        branch.discard();
        return Err(err).context("proposal rejected");
    }
    branch.commit()?;
    store.flush()?;

    let params = ParamSubspace::new(&store).try_get()?;
    render(&params, config.output)
}

pub fn codec_decode(config: &CliConfig, msg_hex: &str) -> Result<String> {
    let bytes = hex::decode(msg_hex.trim()).context("message is not valid hex")?;
    let codec = build_codec();
    let msg = codec.decode(&bytes)?;
    render(&codec.to_json(&msg)?, config.output)
}

pub fn codec_tags() -> String {
    build_codec().tags().collect::<Vec<_>>().join("\n")
}
