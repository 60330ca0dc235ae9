use dao_summon_args::abi::ContractInterfaceRegistry;
use dao_summon_args::cli::{Cli, Command, SummonOpts};
use dao_summon_args::oracle::{AddressOracle, RpcChainClient};
use dao_summon_args::output;
use dao_summon_args::registry::{ContractRegistry, SummonDefaults};
use dao_summon_args::salt::{Salt, SaltGenerator};
use dao_summon_args::summon::{PredictedAddresses, SummonArgBuilder, SummonVariant};

use clap::Parser;
use eyre::WrapErr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Main entry point for the summon argument builder
#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut registry = ContractRegistry::base_defaults();
    if let Some(path) = &cli.registry {
        registry.merge(
            ContractRegistry::from_file(path)
                .wrap_err_with(|| format!("failed to load registry {}", path.display()))?,
        );
        info!(path = %path.display(), "loaded registry overlay");
    }

    let defaults = match &cli.defaults {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read defaults {}", path.display()))?;
            SummonDefaults::from_json_str(&json)
                .wrap_err_with(|| format!("failed to parse defaults {}", path.display()))?
        }
        None => SummonDefaults::default(),
    };

    match &cli.command {
        Command::Salt { digits, count } => {
            let salts = SaltGenerator::new(*digits, *count);
            let drawn = (0..*count).map(|_| salts.next_salt()).collect::<Result<Vec<_>, _>>()?;
            output::print_salts(&drawn);
        }
        Command::Registry => {
            output::print_registry(&registry, cli.chain_id);
            let missing = registry.missing_roles(cli.chain_id);
            if !missing.is_empty() {
                output::print_warning(&format!(
                    "{} role(s) missing; pass --registry to configure them",
                    missing.len()
                ));
            }
        }
        Command::Predict { salt } => {
            output::print_banner(cli.chain_id, &cli.rpc_url);
            let client = rpc_client(&cli)?;
            let interfaces = load_interfaces(&cli)?;
            let salt = match salt {
                Some(digits) => Salt::from_decimal(digits)?,
                None => SaltGenerator::default().next_salt()?,
            };

            let oracle = AddressOracle::new(&client, &registry, &interfaces);
            let (dao, treasury) = tokio::try_join!(
                oracle.predict_dao_address(&salt, cli.chain_id),
                oracle.predict_treasury_address(&salt, cli.chain_id),
            )?;
            output::print_predictions(&salt, &PredictedAddresses { dao, treasury, shaman: None });
        }
        Command::Meme(opts) => summon(&cli, opts, SummonVariant::Meme, &registry, &defaults).await?,
        Command::Crowdfund(opts) => {
            summon(&cli, opts, SummonVariant::Crowdfund, &registry, &defaults).await?
        }
    }

    Ok(())
}

/// Assemble, print and encode one summon.
async fn summon(
    cli: &Cli,
    opts: &SummonOpts,
    variant: SummonVariant,
    registry: &ContractRegistry,
    defaults: &SummonDefaults,
) -> eyre::Result<()> {
    let client = rpc_client(cli)?;
    let interfaces = load_interfaces(cli)?;
    let salts = SaltGenerator::default();
    let builder = SummonArgBuilder::new(&client, registry, &interfaces, defaults, &salts);

    let request = opts.to_request(variant, cli.chain_id);
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let plan = match &opts.salt {
        Some(digits) => builder.plan_with_salt(&request, Salt::from_decimal(digits)?, now).await?,
        None => builder.plan(&request, now).await?,
    };
    let tx = plan.args.to_transaction(registry, &interfaces, cli.chain_id)?;

    if opts.json {
        let rendered = serde_json::json!({
            "args": plan.args,
            "predicted": plan.predicted,
            "transaction": tx,
        });
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        output::print_banner(cli.chain_id, &cli.rpc_url);
        output::print_predictions(&plan.args.salt, &plan.predicted);
        output::print_summon_args(variant, &plan.args);
        output::print_transaction(&tx);
        println!();
        output::print_calldata(&tx.input);
    }
    Ok(())
}

fn load_interfaces(cli: &Cli) -> eyre::Result<ContractInterfaceRegistry> {
    match &cli.abi_dir {
        Some(dir) => ContractInterfaceRegistry::from_dir(dir)
            .wrap_err_with(|| format!("failed to load interfaces from {}", dir.display())),
        None => Ok(ContractInterfaceRegistry::bundled()?),
    }
}

fn rpc_client(cli: &Cli) -> eyre::Result<RpcChainClient> {
    RpcChainClient::new(&cli.rpc_url, Duration::from_secs(cli.rpc_timeout_secs))
        .wrap_err_with(|| format!("failed to connect to {}", cli.rpc_url))
}

/// Log to stderr so stdout stays clean for JSON and calldata.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
